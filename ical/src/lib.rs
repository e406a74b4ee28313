// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse iCalendar documents into calendars, events and timezones.
//!
//! The parser reads one line at a time. Folded lines are joined, each line is
//! split into name, parameters and value, and a stack of open components
//! decides where the line belongs. Closing the root `VCALENDAR` ends parsing.
//!
//! ```
//! # use calparse_ical::{IcsParser, ParserConfig};
//! let src = "BEGIN:VCALENDAR\r\n\
//! BEGIN:VTIMEZONE\r\n\
//! TZID:America/New_York\r\n\
//! END:VTIMEZONE\r\n\
//! BEGIN:VEVENT\r\n\
//! SUMMARY:Meeting\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let calendar = IcsParser::new(ParserConfig::strict()).parse(src).unwrap();
//! let event = &calendar.events()[0];
//! assert_eq!(event.summary(), Some("Meeting"));
//! assert_eq!(event.tzid(), Some("America/New_York"));
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::module_name_repetitions)]

pub mod component;
mod config;
mod error;
pub mod keyword;
mod parser;
pub mod syntax;

pub use crate::component::{
    AttributeError, AttributeValue, Attributes, Calendar, Component, ComponentKind, Event,
    EventComponent, GenericComponent, Parameters, Timezone,
};
pub use crate::config::ParserConfig;
pub use crate::error::ParseError;
pub use crate::parser::{IcsParser, ParseReport, parse};
