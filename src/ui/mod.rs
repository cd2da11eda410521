//! # UI Module
//!
//! This module provides the terminal user interface components for velg.
//!
//! ## Components
//!
//! - [`App`] - Application state management (picker, focus, status, search)
//! - [`mod@render`] - Rendering functions for drawing the TUI
//! - [`mod@theme`] - Color themes
//! - [`mod@config`] - Persisted user configuration
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                    Header                        │
//! ├─────────────────────┬───────────────────────────┤
//! │  ▾ Velg fylkeslag   │                           │
//! │  Søkebegrep: ro█    │      Details Panel        │
//! │    Rogaland         │   (label, link, visits)   │
//! │    Troms            │                           │
//! │    Trøndelag        │                           │
//! ├─────────────────────┴───────────────────────────┤
//! │                    Footer                        │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - Filterable dropdown with keyboard and mouse interaction
//! - Click outside the picker to dismiss it
//! - Site search prompt opening bondelaget.no in the browser
//! - Visit history surfaced in the details panel

pub mod app;
pub mod config;
pub mod render;
pub mod theme;

pub use app::App;
pub use render::render;
