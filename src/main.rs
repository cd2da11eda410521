//! # velg CLI Entry Point
//!
//! This is the main entry point for the velg TUI application.
//!
//! ## Overview
//!
//! velg presents the county chapters (fylkeslag) of Norges Bondelag as a
//! filterable dropdown. Picking a chapter opens its page in the system
//! browser. A custom link table can be supplied as a JSON file.
//!
//! ## Usage
//!
//! ```bash
//! # Built-in county table
//! velg
//!
//! # Custom link table
//! velg --links ./my-links.json
//!
//! # Pick a theme for this run
//! velg --theme "Nord"
//!
//! # Debug mode - print the resolved link table and exit
//! velg --debug
//! ```
//!
//! ## Key Bindings
//!
//! - `Enter` / `Space` - Open or close the picker
//! - typing - Filter the option list (while open)
//! - `↑` / `↓` - Move the highlight (while open)
//! - `Esc` - Close the picker / cancel the search prompt
//! - `s` - Site search on bondelaget.no
//! - `Tab` - Switch focus between panes
//! - `i` - Show/hide the info dialog
//! - `q` / `Q` - Quit
//!
//! Mouse: click the trigger to toggle, click an option to open it, click
//! anywhere outside the picker to dismiss it.

use velg::links::LinkTable;
use velg::nav::{BrowserNavigator, Navigate};
use velg::picker::Picker;
use velg::ui::app::FocusPane;
use velg::ui::config::Config;
use velg::ui::render::{option_index_at, screen_layout, trigger_row};
use velg::ui::theme::Theme;
use velg::ui::App;
use velg::{history, ui};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::{Position, Rect};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::Duration;

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// velg - a terminal picker for Norges Bondelag county chapter pages
#[derive(Parser, Debug)]
#[command(name = "velg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pick a county chapter and open its page in the browser", long_about = None)]
struct Args {
    /// Path to a JSON file with a custom link table
    #[arg(short, long, value_name = "FILE")]
    links: Option<PathBuf>,

    /// Theme name for this run (overrides the config file)
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// Print the resolved link table and exit
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);

        original_hook(panic_info);
    }));

    let result = run_application(args).await;

    let _ = panic::take_hook();

    result
}

async fn run_application(args: Args) -> Result<()> {
    // Resolve the link table: custom file or the built-in county table
    let table = if let Some(links_path) = args.links {
        let canonical_path = links_path
            .canonicalize()
            .with_context(|| format!("Failed to access links file: {}", links_path.display()))?;
        LinkTable::load_from(&canonical_path)?
    } else {
        LinkTable::builtin()
    };

    // Debug mode: print the table and exit
    if args.debug {
        println!("=== Link Table ===");
        for entry in table.entries() {
            println!(
                "  Value: {}\n    Label: {}\n    URL: {}\n",
                entry.value, entry.label, entry.url
            );
        }
        println!("Total: {} entries", table.len());
        return Ok(());
    }

    // An empty table means there is nothing to anchor the picker on: the
    // component stays uninitialized and there is nothing else to show.
    let Some(picker) = Picker::new(table.options()) else {
        eprintln!("Warning: The link table has no entries");
        eprintln!("\nExample links file format:");
        eprintln!(r#"  [{{"value": "agder", "label": "Agder", "url": "https://..."}}]"#);
        std::process::exit(1);
    };

    // Theme: CLI flag wins over the config file; unknown names fall back
    let config = Config::load();
    let theme_name = args.theme.unwrap_or(config.theme);
    let theme = match Theme::by_name(&theme_name) {
        Some(theme) => theme.clone(),
        None => {
            eprintln!("Warning: Unknown theme '{theme_name}', using default");
            Theme::default_theme().clone()
        }
    };

    let mut app = App::new(picker, table, theme);

    // Initialize visit history (gracefully handle errors)
    match history::VisitTracker::new() {
        Ok(tracker) => app.set_tracker(tracker),
        Err(e) => eprintln!("Warning: Could not initialize visit history: {e:#}"),
    }

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut event_reader = CrosstermEventReader;
    let mut navigator = BrowserNavigator;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader, &mut navigator).await;

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
    navigator: &mut dyn Navigate,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        let event = event_reader.read_event(Duration::from_millis(100))?;

        let event = match event {
            Some(e) => e,
            None => continue,
        };

        match event {
            Event::Key(key) => {
                // Handle info modal close first
                if app.show_info {
                    match key.code {
                        KeyCode::Char('i') | KeyCode::Esc => {
                            app.toggle_info();
                        }
                        _ => {}
                    }
                    continue;
                }

                // Site search prompt captures all input while active
                if app.search_prompt.is_some() {
                    match key.code {
                        KeyCode::Esc => {
                            app.exit_search_prompt();
                        }
                        KeyCode::Enter => {
                            app.submit_search(navigator);
                        }
                        KeyCode::Backspace => {
                            app.search_pop_char();
                        }
                        KeyCode::Char(c) => {
                            app.search_push_char(c);
                        }
                        _ => {}
                    }
                    continue;
                }

                if app.picker.is_open() {
                    // Filter input has focus while the dropdown is open
                    match key.code {
                        KeyCode::Esc => {
                            app.picker.close();
                        }
                        KeyCode::Down => {
                            app.picker.highlight_next();
                        }
                        KeyCode::Up => {
                            app.picker.highlight_previous();
                        }
                        KeyCode::Backspace => {
                            app.picker.pop_filter_char();
                        }
                        KeyCode::Enter => {
                            app.select_highlighted(navigator);
                        }
                        KeyCode::Char(c) => {
                            app.picker.push_filter_char(c);
                        }
                        _ => {}
                    }
                } else {
                    // Normal mode keybindings
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => {
                            app.should_quit = true;
                        }
                        KeyCode::Char('i') => {
                            app.toggle_info();
                        }
                        KeyCode::Char('s') => {
                            app.enter_search_prompt();
                        }
                        KeyCode::Tab => {
                            app.toggle_focus();
                        }
                        code => {
                            // Enter/Space activate the trigger when it has focus
                            if app.focus == FocusPane::Picker {
                                app.picker.handle_key_activation(code);
                            }
                        }
                    }
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                let size = terminal.size()?;
                let layout = screen_layout(Rect::new(0, 0, size.width, size.height));
                handle_mouse_click(app, navigator, column, row, layout.picker);
            }
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Route a left click: toggle on the trigger, select on an option row,
/// dismiss on anything outside the picker.
fn handle_mouse_click(
    app: &mut App,
    navigator: &mut dyn Navigate,
    column: u16,
    row: u16,
    picker_area: Rect,
) {
    if picker_area.contains(Position::new(column, row)) {
        if row == trigger_row(picker_area) {
            app.picker.toggle();
        } else if app.picker.is_open() {
            if let Some(position) = option_index_at(picker_area, row) {
                app.select_at_visible(position, navigator);
            }
        }
    } else {
        app.picker.handle_outside_click(column, row, picker_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    /// Mock event reader for testing that returns a predetermined sequence of events
    struct MockEventReader {
        events: VecDeque<Event>,
    }

    impl MockEventReader {
        fn new(events: Vec<Event>) -> Self {
            Self {
                events: VecDeque::from(events),
            }
        }
    }

    impl EventReader for MockEventReader {
        fn read_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
            Ok(self.events.pop_front())
        }
    }

    /// Helper to create a key event
    fn key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_mock_event_reader() {
        let events = vec![
            key_event(KeyCode::Char('a')),
            key_event(KeyCode::Enter),
        ];

        let mut reader = MockEventReader::new(events);

        assert!(matches!(
            reader.read_event(Duration::from_millis(10)).unwrap(),
            Some(Event::Key(KeyEvent {
                code: KeyCode::Char('a'),
                ..
            }))
        ));
        assert!(matches!(
            reader.read_event(Duration::from_millis(10)).unwrap(),
            Some(Event::Key(KeyEvent {
                code: KeyCode::Enter,
                ..
            }))
        ));

        // Should return None when no more events
        assert!(reader
            .read_event(Duration::from_millis(10))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_crossterm_event_reader_type() {
        let _reader: Box<dyn EventReader> = Box::new(CrosstermEventReader);
    }

    #[tokio::test]
    async fn test_run_application_nonexistent_links_file() {
        let args = Args {
            links: Some(PathBuf::from("/nonexistent/links/file.json")),
            theme: None,
            debug: false,
        };

        let result = run_application(args).await;
        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to access links file"));
    }

    #[tokio::test]
    async fn test_run_application_debug_prints_and_exits() {
        let args = Args {
            links: None,
            theme: None,
            debug: true,
        };

        // Debug mode never touches the terminal, so it is safe to run here
        let result = run_application(args).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_application_invalid_links_file() {
        use std::fs;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let links_path = temp_dir.path().join("links.json");
        fs::write(&links_path, "not json").unwrap();

        let args = Args {
            links: Some(links_path),
            theme: None,
            debug: false,
        };

        let result = run_application(args).await;
        assert!(result.is_err());
        let err_msg = format!("{:?}", result.unwrap_err());
        assert!(err_msg.contains("Failed to parse links file"));
    }

    #[test]
    fn test_args_parsing_defaults() {
        let args = Args {
            links: None,
            theme: None,
            debug: false,
        };
        assert_eq!(args.links, None);
        assert_eq!(args.theme, None);
        assert!(!args.debug);
    }

    #[test]
    fn test_handle_mouse_click_outside_closes() {
        let table = LinkTable::builtin();
        let picker = Picker::new(table.options()).expect("non-empty table");
        let mut app = App::new(picker, table, Theme::default_theme().clone());
        let mut navigator = velg::nav::RecordingNavigator::new();

        let picker_area = Rect::new(0, 3, 40, 20);
        app.picker.open();

        handle_mouse_click(&mut app, &mut navigator, 80, 10, picker_area);
        assert!(!app.picker.is_open());
        assert!(navigator.opened.is_empty());
    }

    #[test]
    fn test_handle_mouse_click_trigger_toggles() {
        let table = LinkTable::builtin();
        let picker = Picker::new(table.options()).expect("non-empty table");
        let mut app = App::new(picker, table, Theme::default_theme().clone());
        let mut navigator = velg::nav::RecordingNavigator::new();

        let picker_area = Rect::new(0, 3, 40, 20);

        handle_mouse_click(&mut app, &mut navigator, 5, trigger_row(picker_area), picker_area);
        assert!(app.picker.is_open());

        handle_mouse_click(&mut app, &mut navigator, 5, trigger_row(picker_area), picker_area);
        assert!(!app.picker.is_open());
    }

    #[test]
    fn test_handle_mouse_click_option_row_selects() {
        let table = LinkTable::builtin();
        let picker = Picker::new(table.options()).expect("non-empty table");
        let mut app = App::new(picker, table, Theme::default_theme().clone());
        let mut navigator = velg::nav::RecordingNavigator::new();

        let picker_area = Rect::new(0, 3, 40, 20);
        app.picker.open();

        // First option row: akershus (declaration order)
        handle_mouse_click(&mut app, &mut navigator, 5, 6, picker_area);
        assert!(!app.picker.is_open());
        assert_eq!(app.picker.selected_value(), Some("akershus"));
        assert_eq!(
            navigator.opened,
            vec!["https://www.bondelaget.no/fylkeslag/akershus/"]
        );
    }
}
