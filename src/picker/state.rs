//! Picker state: open/closed flag, selection, filter text, highlight cursor.

use crate::links::{LinkOption, LinkTable};
use crate::nav::Navigate;
use crossterm::event::KeyCode;
use ratatui::layout::Rect;

/// Result of choosing an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The value was mapped and the destination was handed to the navigator.
    Navigated { value: String, url: String },
    /// The value has no mapped destination; selection applied, no navigation.
    Unmapped { value: String },
    /// The navigator failed to open the destination; selection applied.
    NavigationFailed {
        value: String,
        url: String,
        error: String,
    },
}

/// Filterable single-select dropdown state.
///
/// All mutation happens through methods in response to discrete input
/// events. The renderer reads the flags and maps them to open / selected /
/// hidden visual treatments.
#[derive(Debug, Clone)]
pub struct Picker {
    options: Vec<LinkOption>,
    is_open: bool,
    selected_value: Option<String>,
    filter_text: String,
    /// Position of the highlight cursor within the *visible* options.
    highlight: usize,
}

impl Picker {
    /// Build a picker over the given options.
    ///
    /// Returns `None` for an empty option set: with nothing to anchor on,
    /// the component does not initialize and the caller proceeds without it.
    pub fn new(options: Vec<LinkOption>) -> Option<Self> {
        if options.is_empty() {
            return None;
        }

        Some(Self {
            options,
            is_open: false,
            selected_value: None,
            filter_text: String::new(),
            highlight: 0,
        })
    }

    pub fn options(&self) -> &[LinkOption] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected_value.as_deref()
    }

    /// Display label of the selected option, if the selected value is one of
    /// the declared options.
    pub fn selected_label(&self) -> Option<&str> {
        let value = self.selected_value.as_deref()?;
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Open the dropdown and hand focus to the filter input. No-op if open.
    pub fn open(&mut self) {
        if !self.is_open {
            self.is_open = true;
        }
    }

    /// Close the dropdown. No-op if already closed.
    pub fn close(&mut self) {
        if self.is_open {
            self.is_open = false;
        }
    }

    /// Flip between open and closed.
    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Replace the filter text. Matching is case-insensitive, so the stored
    /// text is lowercased up front.
    pub fn set_filter(&mut self, text: &str) {
        self.filter_text = text.to_lowercase();
        self.highlight = 0; // Reset highlight when the visible set changes
    }

    pub fn push_filter_char(&mut self, c: char) {
        for lower in c.to_lowercase() {
            self.filter_text.push(lower);
        }
        self.highlight = 0;
    }

    pub fn pop_filter_char(&mut self) {
        self.filter_text.pop();
        self.highlight = 0;
    }

    /// Whether the option at `index` passes the current filter.
    ///
    /// An empty filter keeps every option visible.
    pub fn is_visible(&self, index: usize) -> bool {
        match self.options.get(index) {
            Some(option) => option.label.to_lowercase().contains(&self.filter_text),
            None => false,
        }
    }

    /// Indices of the options that pass the current filter, in declaration
    /// order.
    pub fn visible_indices(&self) -> Vec<usize> {
        (0..self.options.len())
            .filter(|&i| self.is_visible(i))
            .collect()
    }

    /// Whether the option at `index` is the selected one.
    pub fn is_selected(&self, index: usize) -> bool {
        match (self.options.get(index), self.selected_value.as_deref()) {
            (Some(option), Some(selected)) => option.value == selected,
            _ => false,
        }
    }

    /// Position of the highlight cursor within the visible options.
    pub fn highlight(&self) -> usize {
        self.highlight
    }

    /// The currently highlighted option, if any option is visible.
    pub fn highlighted(&self) -> Option<&LinkOption> {
        let visible = self.visible_indices();
        visible
            .get(self.highlight)
            .and_then(|&i| self.options.get(i))
    }

    pub fn highlight_next(&mut self) {
        let count = self.visible_indices().len();
        if count > 0 {
            self.highlight = (self.highlight + 1) % count;
        }
    }

    pub fn highlight_previous(&mut self) {
        let count = self.visible_indices().len();
        if count > 0 {
            if self.highlight > 0 {
                self.highlight -= 1;
            } else {
                self.highlight = count - 1;
            }
        }
    }

    /// Choose an option by value.
    ///
    /// Looks the value up in the table; a mapped value is handed to the
    /// navigator to open in a new browsing context, an unmapped value skips
    /// navigation and yields a diagnostic outcome. In every case the
    /// selection is updated (replacing any prior one), the picker closes,
    /// and the filter is cleared so all options are visible again.
    pub fn select(
        &mut self,
        value: &str,
        table: &LinkTable,
        navigator: &mut dyn Navigate,
    ) -> SelectOutcome {
        let outcome = match table.url_for(value) {
            Some(url) => match navigator.open_external(url) {
                Ok(()) => SelectOutcome::Navigated {
                    value: value.to_string(),
                    url: url.to_string(),
                },
                Err(e) => SelectOutcome::NavigationFailed {
                    value: value.to_string(),
                    url: url.to_string(),
                    error: format!("{e:#}"),
                },
            },
            None => SelectOutcome::Unmapped {
                value: value.to_string(),
            },
        };

        self.selected_value = Some(value.to_string());
        self.close();
        self.filter_text.clear();
        // Park the highlight on the chosen option for the next open
        self.highlight = self
            .options
            .iter()
            .position(|o| o.value == value)
            .unwrap_or(0);

        outcome
    }

    /// Choose the highlighted option. Returns `None` when the filter has
    /// hidden every option.
    pub fn select_highlighted(
        &mut self,
        table: &LinkTable,
        navigator: &mut dyn Navigate,
    ) -> Option<SelectOutcome> {
        let value = self.highlighted()?.value.clone();
        Some(self.select(&value, table, navigator))
    }

    /// Close the dropdown when a click lands outside the picker's rectangle.
    pub fn handle_outside_click(&mut self, column: u16, row: u16, picker_area: Rect) {
        if !point_in_rect(column, row, picker_area) {
            self.close();
        }
    }

    /// Enter or Space on the trigger toggles the dropdown. Returns `true`
    /// when the key was consumed.
    pub fn handle_key_activation(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle();
                true
            }
            _ => false,
        }
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    let right = rect.x.saturating_add(rect.width);
    let bottom = rect.y.saturating_add(rect.height);
    x >= rect.x && x < right && y >= rect.y && y < bottom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(labels: &[(&str, &str)]) -> Vec<LinkOption> {
        labels
            .iter()
            .map(|(value, label)| LinkOption {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_new_rejects_empty_option_set() {
        assert!(Picker::new(vec![]).is_none());
    }

    #[test]
    fn test_open_close_are_idempotent() {
        let mut picker = Picker::new(opts(&[("a", "Alpha")])).expect("non-empty");
        assert!(!picker.is_open());

        picker.open();
        picker.open();
        assert!(picker.is_open());

        picker.close();
        picker.close();
        assert!(!picker.is_open());
    }

    #[test]
    fn test_highlight_wraps_over_visible_options() {
        let mut picker =
            Picker::new(opts(&[("a", "Alpha"), ("b", "Beta"), ("c", "Gamma")])).expect("non-empty");

        picker.highlight_next();
        picker.highlight_next();
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("c"));

        picker.highlight_next();
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("a"));

        picker.highlight_previous();
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("c"));
    }

    #[test]
    fn test_filter_resets_highlight() {
        let mut picker =
            Picker::new(opts(&[("a", "Alpha"), ("b", "Beta")])).expect("non-empty");
        picker.highlight_next();
        assert_eq!(picker.highlight(), 1);

        picker.push_filter_char('b');
        assert_eq!(picker.highlight(), 0);
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("b"));
    }

    #[test]
    fn test_filter_is_case_insensitive_both_ways() {
        let mut picker = Picker::new(opts(&[("mr", "Møre og Romsdal")])).expect("non-empty");

        picker.set_filter("ROMSDAL");
        assert!(picker.is_visible(0));

        picker.set_filter("xyz");
        assert!(!picker.is_visible(0));
        assert!(picker.highlighted().is_none());
    }
}
