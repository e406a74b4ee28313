// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::component::{Calendar, Event, EventComponent};
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::syntax::{ParserState, TreeBuilder, logical_lines, scan_content_line};

/// Parse an iCalendar document with the default, strict configuration.
///
/// ## Errors
///
/// Returns the first [`ParseError`] found in the document.
///
/// ## Examples
///
/// ```
/// # use calparse_ical::parse;
/// let ical_src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// SUMMARY:Test Event\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let calendar = parse(ical_src).unwrap();
/// assert_eq!(calendar.total_items(), 1);
/// ```
///
/// Mismatched nesting is reported with the offending line:
///
/// ```
/// # use calparse_ical::{ParseError, parse};
/// let invalid_ical_src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// END:VEVENT\r\n\
/// ";
/// let err = parse(invalid_ical_src).unwrap_err();
/// assert!(matches!(err, ParseError::StructureMismatch { line: 3, .. }));
/// ```
pub fn parse(src: &str) -> Result<Calendar, ParseError> {
    IcsParser::default().parse(src)
}

/// An iCalendar parser, generic over the event type it builds.
#[derive(Debug)]
pub struct IcsParser<E = Event> {
    config: ParserConfig,
    new_event: fn() -> E,
}

impl<E> Clone for IcsParser<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for IcsParser<E> {}

impl IcsParser<Event> {
    /// Create a parser building [`Event`]s.
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self::with_event_factory(config, Event::new)
    }
}

impl Default for IcsParser<Event> {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl<E: EventComponent> IcsParser<E> {
    /// Create a parser that calls `new_event` for every VEVENT block.
    #[must_use]
    pub const fn with_event_factory(config: ParserConfig, new_event: fn() -> E) -> Self {
        Self { config, new_event }
    }

    /// The configuration of this parser.
    #[must_use]
    pub const fn config(&self) -> ParserConfig {
        self.config
    }

    /// Categories known to the event type, see [`EventComponent::categories`].
    #[must_use]
    pub fn event_categories(&self) -> Vec<String> {
        E::categories()
    }

    /// Parse a document into a calendar, dropping lenient-mode diagnostics.
    ///
    /// ## Errors
    ///
    /// In strict mode, returns the first error. Never fails in lenient mode.
    pub fn parse(&self, src: &str) -> Result<Calendar<E>, ParseError> {
        self.parse_report(src).map(|report| report.calendar)
    }

    /// Parse a document, keeping the errors skipped in lenient mode.
    ///
    /// ## Errors
    ///
    /// In strict mode, returns the first error. Never fails in lenient mode.
    #[tracing::instrument(
        skip_all,
        fields(input_len = src.len(), halt = self.config.halt_on_parse_errors)
    )]
    pub fn parse_report(&self, src: &str) -> Result<ParseReport<E>, ParseError> {
        let mut builder = TreeBuilder::new(self.config, self.new_event);
        for source in logical_lines(src) {
            if source.is_blank() {
                continue;
            }

            let line = scan_content_line(&source);
            if builder.feed(&source, line)? == ParserState::Done {
                tracing::debug!(line = source.number, "calendar closed, stop reading");
                break;
            }
        }

        let (calendar, diagnostics) = builder.finish();
        tracing::debug!(
            events = calendar.total_items(),
            diagnostics = diagnostics.len(),
            "parsed calendar"
        );
        Ok(ParseReport {
            calendar,
            diagnostics,
        })
    }
}

/// Outcome of a parse: the calendar and the errors skipped on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport<E = Event> {
    /// The parsed calendar
    pub calendar: Calendar<E>,
    /// Errors recovered from in lenient mode, in input order
    pub diagnostics: Vec<ParseError>,
}

impl<E> ParseReport<E> {
    /// Number of events in the calendar.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.calendar.total_items()
    }

    /// Whether the document parsed without any recovered error.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
