//! # Picker Module
//!
//! The filterable single-select dropdown at the heart of velg.
//!
//! ## Behavior
//!
//! - The closed picker shows a trigger line with the current selection.
//!   Enter or Space on the trigger opens it; opening activates the filter
//!   input.
//! - While open, typed text narrows the option list: an option stays visible
//!   when its label contains the filter text, case-insensitively. An empty
//!   filter shows every option.
//! - Choosing an option looks its value up in the [`LinkTable`], asks the
//!   injected [`Navigate`] implementation to open the mapped URL, marks the
//!   option selected, closes the picker, and clears the filter. A value with
//!   no mapped URL keeps the selection but skips navigation and reports a
//!   diagnostic outcome.
//! - A mouse click outside the picker's rectangle closes it.
//!
//! At most one option is selected at any time.
//!
//! [`LinkTable`]: crate::links::LinkTable
//! [`Navigate`]: crate::nav::Navigate

mod state;

pub use state::{Picker, SelectOutcome};
