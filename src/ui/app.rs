use crate::history::VisitTracker;
use crate::links::LinkTable;
use crate::nav::{search_url, Navigate};
use crate::picker::{Picker, SelectOutcome};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPane {
    Picker,
    Details,
}

/// One-line message shown in the footer until the next action replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_warning: bool,
}

pub struct App {
    pub picker: Picker,
    pub table: LinkTable,
    pub theme: Theme,
    pub focus: FocusPane,
    pub should_quit: bool,
    pub show_info: bool,
    /// `Some(term)` while the site-search prompt is active.
    pub search_prompt: Option<String>,
    pub status: Option<StatusMessage>,
    pub tracker: Option<VisitTracker>,
}

impl App {
    pub fn new(picker: Picker, table: LinkTable, theme: Theme) -> Self {
        Self {
            picker,
            table,
            theme,
            focus: FocusPane::Picker,
            should_quit: false,
            show_info: false,
            search_prompt: None,
            status: None,
            tracker: None,
        }
    }

    pub fn set_tracker(&mut self, tracker: VisitTracker) {
        self.tracker = Some(tracker);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Picker => FocusPane::Details,
            FocusPane::Details => FocusPane::Picker,
        };
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    // -- Site search prompt --

    pub fn enter_search_prompt(&mut self) {
        self.search_prompt = Some(String::new());
    }

    pub fn exit_search_prompt(&mut self) {
        self.search_prompt = None;
    }

    pub fn search_push_char(&mut self, c: char) {
        if let Some(term) = self.search_prompt.as_mut() {
            term.push(c);
        }
    }

    pub fn search_pop_char(&mut self) {
        if let Some(term) = self.search_prompt.as_mut() {
            term.pop();
        }
    }

    /// Submit the search prompt: open the site search page for the entered
    /// term. An empty term dismisses the prompt without navigating.
    pub fn submit_search(&mut self, navigator: &mut dyn Navigate) {
        let Some(term) = self.search_prompt.take() else {
            return;
        };

        let term = term.trim().to_string();
        if term.is_empty() {
            return;
        }

        match search_url(&term).and_then(|url| {
            navigator.open_external(&url)?;
            Ok(url)
        }) {
            Ok(url) => self.set_status(format!("Opened {url}")),
            Err(e) => self.set_warning(format!("Search failed: {e:#}")),
        }
    }

    // -- Selection --

    /// Choose the highlighted option, record the visit, and surface the
    /// outcome in the status line.
    pub fn select_highlighted(&mut self, navigator: &mut dyn Navigate) {
        if let Some(outcome) = self.picker.select_highlighted(&self.table, navigator) {
            self.apply_outcome(outcome);
        }
    }

    /// Choose the option at `position` within the currently visible list
    /// (mouse click on an option row).
    pub fn select_at_visible(&mut self, position: usize, navigator: &mut dyn Navigate) {
        let visible = self.picker.visible_indices();
        let Some(value) = visible
            .get(position)
            .and_then(|&i| self.picker.options().get(i))
            .map(|o| o.value.clone())
        else {
            return;
        };

        let outcome = self.picker.select(&value, &self.table, navigator);
        self.apply_outcome(outcome);
    }

    fn apply_outcome(&mut self, outcome: SelectOutcome) {
        match outcome {
            SelectOutcome::Navigated { value, url } => {
                self.record_visit(&value);
                self.set_status(format!("Opened {url}"));
            }
            SelectOutcome::Unmapped { value } => {
                self.set_warning(format!("No link registered for '{value}'"));
            }
            SelectOutcome::NavigationFailed { url, error, .. } => {
                self.set_warning(format!("Failed to open {url}: {error}"));
            }
        }
    }

    fn record_visit(&mut self, value: &str) {
        let label = self
            .picker
            .options()
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.clone())
            .unwrap_or_else(|| value.to_string());

        if let Some(tracker) = self.tracker.as_mut() {
            if let Err(e) = tracker.record(value, &label) {
                self.set_warning(format!("Could not record visit: {e:#}"));
            }
        }
    }

    pub fn set_status(&mut self, text: String) {
        self.status = Some(StatusMessage {
            text,
            is_warning: false,
        });
    }

    pub fn set_warning(&mut self, text: String) {
        self.status = Some(StatusMessage {
            text,
            is_warning: true,
        });
    }
}
