//! velg - a terminal picker for Norges Bondelag county chapters
//!
//! This library provides the core functionality for presenting a filterable
//! single-select dropdown of county chapter pages (fylkeslag) and opening the
//! chosen page in the system browser.

pub mod history;
pub mod links;
pub mod nav;
pub mod picker;
pub mod ui;
