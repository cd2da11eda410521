use crate::ui::app::{App, FocusPane};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Screen regions, computed purely from the frame size so that mouse
/// hit-testing and rendering agree on the same geometry.
#[derive(Debug, Clone, Copy)]
pub struct ScreenLayout {
    pub header: Rect,
    pub picker: Rect,
    pub details: Rect,
    pub footer: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[1]);

    ScreenLayout {
        header: main_chunks[0],
        picker: body_chunks[0],
        details: body_chunks[1],
        footer: main_chunks[2],
    }
}

/// Screen row of the picker trigger line (first row inside the border).
pub fn trigger_row(picker_area: Rect) -> u16 {
    picker_area.y.saturating_add(1)
}

/// Map a mouse row to a position in the visible option list. Option rows
/// start below the trigger and filter lines.
pub fn option_index_at(picker_area: Rect, mouse_row: u16) -> Option<usize> {
    if picker_area.height <= 4 {
        return None;
    }
    let first_option_row = picker_area.y.saturating_add(3);
    let last_inner_row = picker_area.y + picker_area.height - 2;
    if mouse_row >= first_option_row && mouse_row <= last_inner_row {
        Some((mouse_row - first_option_row) as usize)
    } else {
        None
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let layout = screen_layout(frame.area());

    render_header(frame, app, layout.header);
    render_picker(frame, app, layout.picker);
    render_details(frame, app, layout.details);
    render_footer(frame, app, layout.footer);

    if app.show_info {
        render_info_modal(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let header_text = vec![Line::from(vec![Span::styled(
        "  VELG - Norges Bondelag fylkeslag  ",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )])];

    let header = Paragraph::new(header_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .style(Style::default().bg(theme.bg));

    frame.render_widget(header, area);
}

fn render_picker(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let picker = &app.picker;

    let arrow = if picker.is_open() { "▴" } else { "▾" };
    let trigger_label = picker.selected_label().unwrap_or("Velg fylkeslag");
    let trigger_style = if picker.selected_label().is_some() {
        Style::default()
            .fg(theme.secondary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg)
    };

    let mut items: Vec<ListItem> = vec![ListItem::new(Line::from(vec![
        Span::styled(format!("{arrow} "), Style::default().fg(theme.accent)),
        Span::styled(trigger_label.to_string(), trigger_style),
    ]))];

    if picker.is_open() {
        // Filter input line, with a block cursor
        items.push(ListItem::new(Line::from(vec![
            Span::styled("Søkebegrep: ", Style::default().fg(theme.fg_dim)),
            Span::styled(
                picker.filter_text().to_string(),
                Style::default().fg(theme.secondary),
            ),
            Span::styled("█", Style::default().fg(theme.secondary)),
        ])));

        let visible = picker.visible_indices();
        for (pos, &index) in visible.iter().enumerate() {
            let option = &picker.options()[index];
            let is_highlighted = pos == picker.highlight();
            let is_selected = picker.is_selected(index);

            let marker = if is_selected { "✓ " } else { "  " };
            let style = if is_highlighted {
                Style::default()
                    .fg(theme.bg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default().fg(theme.secondary)
            } else {
                Style::default().fg(theme.fg)
            };

            items.push(ListItem::new(format!("{marker}{}", option.label)).style(style));
        }

        if visible.is_empty() {
            items.push(
                ListItem::new("  (ingen treff)").style(Style::default().fg(theme.fg_dim)),
            );
        }
    } else {
        items.push(
            ListItem::new("  Enter to open").style(Style::default().fg(theme.fg_dim)),
        );
    }

    let border_color = if app.focus == FocusPane::Picker {
        theme.accent
    } else {
        theme.fg_dim
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Fylkeslag ")
            .border_style(Style::default().fg(border_color)),
    );

    frame.render_widget(list, area);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let border_color = if app.focus == FocusPane::Details {
        theme.accent
    } else {
        theme.fg_dim
    };

    let text = if let Some(term) = app.search_prompt.as_deref() {
        vec![
            Line::from(vec![Span::styled(
                "Site search",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Søkebegrep: ", Style::default().fg(theme.fg_dim)),
                Span::styled(term.to_string(), Style::default().fg(theme.secondary)),
                Span::styled("█", Style::default().fg(theme.secondary)),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Enter opens the search on bondelaget.no, Esc cancels",
                Style::default().fg(theme.fg_dim),
            )]),
        ]
    } else if let Some(option) = detail_option(app) {
        let url = app.table.url_for(&option.value).unwrap_or("(no link)");
        let mut lines = vec![
            Line::from(vec![Span::styled(
                option.label.clone(),
                Style::default()
                    .fg(theme.secondary)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Value: ", Style::default().fg(theme.fg_dim)),
                Span::raw(option.value.clone()),
            ]),
            Line::from(vec![
                Span::styled("Link: ", Style::default().fg(theme.fg_dim)),
                Span::raw(url.to_string()),
            ]),
        ];

        if let Some(entry) = app
            .tracker
            .as_ref()
            .and_then(|t| t.entry(&option.value))
        {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Visits: ", Style::default().fg(theme.fg_dim)),
                Span::raw(format!("{}", entry.count)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Last: ", Style::default().fg(theme.fg_dim)),
                Span::raw(entry.last_visited.format("%Y-%m-%d %H:%M").to_string()),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled(
            if app.picker.is_open() {
                "Enter opens the highlighted chapter page"
            } else {
                "Enter or Space opens the picker"
            },
            Style::default().fg(theme.fg_dim),
        )]));

        lines
    } else {
        let mut lines = vec![
            Line::from("No chapter highlighted"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Open the picker and use ↑↓ to navigate",
                Style::default().fg(theme.fg_dim),
            )]),
        ];

        if let Some(tracker) = app.tracker.as_ref().filter(|t| t.has_visits()) {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![Span::styled(
                "Most visited",
                Style::default().fg(theme.accent),
            )]));
            for entry in tracker.most_visited(3) {
                lines.push(Line::from(vec![
                    Span::raw(format!("  {} ", entry.label)),
                    Span::styled(
                        format!("({}x)", entry.count),
                        Style::default().fg(theme.fg_dim),
                    ),
                ]));
            }
        }

        lines
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .border_style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// The option the details panel describes: the highlighted one while the
/// picker is open, otherwise the current selection.
fn detail_option(app: &App) -> Option<crate::links::LinkOption> {
    if app.picker.is_open() {
        app.picker.highlighted().cloned()
    } else {
        let selected = app.picker.selected_value()?;
        app.picker
            .options()
            .iter()
            .find(|o| o.value == selected)
            .cloned()
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if let Some(status) = app.status.as_ref() {
        let color = if status.is_warning {
            theme.error
        } else {
            theme.success
        };
        let footer =
            Paragraph::new(status.text.clone()).style(Style::default().fg(color));
        frame.render_widget(footer, area);
        return;
    }

    let help_text = if app.search_prompt.is_some() {
        "[Type] Search term  [Enter] Open search  [Esc] Cancel"
    } else if app.picker.is_open() {
        "[Type] Filter  [↑↓] Navigate  [Enter] Open page  [Esc] Close"
    } else {
        "[Enter/Space] Open picker  [s] Site search  [Tab] Switch  [i] Info  [q] Quit"
    };

    let footer = Paragraph::new(help_text).style(Style::default().fg(theme.fg_dim));
    frame.render_widget(footer, area);
}

fn render_info_modal(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(60, 50, frame.area());

    let lines = vec![
        Line::from(vec![Span::styled(
            "velg",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Pick a county chapter and open its page in the browser."),
        Line::from(""),
        Line::from("  Enter/Space  open or close the picker"),
        Line::from("  ↑/↓          move the highlight"),
        Line::from("  typing       filter the option list"),
        Line::from("  s            search on bondelaget.no"),
        Line::from("  Tab          switch pane"),
        Line::from("  i / Esc      close this dialog"),
        Line::from("  q            quit"),
    ];

    let modal = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Info ")
                .border_style(Style::default().fg(theme.accent)),
        )
        .style(Style::default().bg(theme.bg))
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(modal, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
