//! # Link Table Module
//!
//! This module provides the mapping from option values to destination URLs.
//!
//! ## Overview
//!
//! A [`LinkTable`] is an ordered set of entries, each carrying a stable value
//! (identifier), a display label, and a destination URL. The picker derives
//! its option list from the table and looks destinations up by value when an
//! option is chosen.
//!
//! The built-in table covers the 14 county chapters of Norges Bondelag. A
//! custom table can be loaded from a JSON file:
//!
//! ```json
//! [
//!   { "value": "agder", "label": "Agder", "url": "https://www.bondelaget.no/fylkeslag/agder/" }
//! ]
//! ```

mod table;

pub use table::{LinkEntry, LinkOption, LinkTable};
