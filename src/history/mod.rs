//! # Visit History Module
//!
//! Tracks which chapter pages have been opened, and when.
//!
//! ## Storage
//!
//! Visit data is stored in an XDG-compliant location:
//! - Linux: `~/.local/share/velg/visits.json`
//! - macOS: `~/Library/Application Support/velg/visits.json`
//! - Windows: `%APPDATA%\velg\visits.json`
//!
//! ## Data Format
//!
//! ```json
//! {
//!   "entries": {
//!     "agder": {
//!       "value": "agder",
//!       "label": "Agder",
//!       "count": 3,
//!       "last_visited": "2026-08-07T10:30:00Z"
//!     }
//!   }
//! }
//! ```

mod storage;

pub use storage::{VisitEntry, VisitLog, VisitTracker};
