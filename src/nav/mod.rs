//! # Navigation Module
//!
//! Abstracts the "open a page in a new browsing context" side effect behind
//! the [`Navigate`] trait so the picker logic can be exercised in tests with
//! a recording stub instead of spawning a real browser.

mod browser;

pub use browser::{search_url, BrowserNavigator, Navigate, RecordingNavigator, SITE_SEARCH_BASE};
