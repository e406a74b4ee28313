// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tree builder for constructing the component hierarchy from content lines.
//!
//! # Architecture
//!
//! ```text
//! Content Lines → Tree Builder → Calendar
//! ```
//!
//! # Algorithm
//!
//! The tree builder uses a stack-based algorithm:
//! 1. On BEGIN:X, push a new component onto the stack
//! 2. On property, add to the current component (top of stack)
//! 3. On END:X, pop from stack and hand the component to its parent
//!
//! The calendar itself lives outside the stack; its frame is only a marker,
//! so a calendar exists even when the document never opens one. Components
//! closed with nothing open around them still land in that calendar, and a
//! nested VCALENDAR re-enters it. Closing any VCALENDAR ends the parse,
//! anything after it is never looked at.

use crate::component::{
    Calendar, Component, ComponentKind, EventComponent, GenericComponent, Parameters, Timezone,
};
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::keyword::{KW_BEGIN, KW_END, KW_TZID, KW_VCALENDAR};
use crate::syntax::scanner::ContentLine;
use crate::syntax::unfold::LogicalLine;

/// Position of the builder in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Nothing opened yet
    AwaitingRoot,
    /// Only the calendar is open
    InCalendar,
    /// A component is open inside the calendar
    InNestedComponent,
    /// The calendar was closed, remaining input is ignored
    Done,
}

/// An open component on the parse stack.
#[derive(Debug)]
enum Frame<E> {
    Calendar,
    Event(E),
    Timezone(Timezone),
    Generic(GenericComponent),
    /// Inert frame that swallows everything up to its own END.
    Ignored(String),
}

impl<E: Component> Frame<E> {
    fn kind_name(&self) -> &str {
        match self {
            Frame::Calendar => KW_VCALENDAR,
            Frame::Event(event) => event.kind_name(),
            Frame::Timezone(timezone) => timezone.kind_name(),
            Frame::Generic(component) => component.kind_name(),
            Frame::Ignored(name) => name,
        }
    }
}

/// Build a calendar from content lines, one line at a time.
#[derive(Debug)]
pub struct TreeBuilder<E> {
    config: ParserConfig,
    new_event: fn() -> E,
    calendar: Calendar<E>,
    stack: Vec<Frame<E>>,
    add_event: bool,
    done: bool,
    diagnostics: Vec<ParseError>,
}

impl<E: EventComponent> TreeBuilder<E> {
    /// Create a builder; `new_event` constructs the component for each VEVENT.
    #[must_use]
    pub fn new(config: ParserConfig, new_event: fn() -> E) -> Self {
        Self {
            config,
            new_event,
            calendar: Calendar::new(),
            stack: Vec::new(),
            add_event: false,
            done: false,
            diagnostics: Vec::new(),
        }
    }

    /// Current state, derived from the stack.
    #[must_use]
    pub fn state(&self) -> ParserState {
        if self.done {
            return ParserState::Done;
        }

        match self.stack.as_slice() {
            [] => ParserState::AwaitingRoot,
            [Frame::Calendar] => ParserState::InCalendar,
            _ => ParserState::InNestedComponent,
        }
    }

    /// Feed one scanned line; `source` is the logical line it came from.
    ///
    /// Lines fed after the calendar was closed are ignored.
    ///
    /// ## Errors
    ///
    /// In strict mode, returns the error for a line that is malformed or does
    /// not fit the structure. In lenient mode errors are only recorded.
    pub fn feed(
        &mut self,
        source: &LogicalLine<'_>,
        line: ContentLine,
    ) -> Result<ParserState, ParseError> {
        if !self.done {
            self.dispatch(source, line)?;
        }
        Ok(self.state())
    }

    /// Finish building, returning the calendar and the recorded errors.
    #[must_use]
    pub fn finish(self) -> (Calendar<E>, Vec<ParseError>) {
        if !self.done && !self.stack.is_empty() {
            let open: Vec<_> = self.stack.iter().map(Frame::kind_name).collect();
            tracing::warn!(?open, "input ended with unclosed components");
        }
        (self.calendar, self.diagnostics)
    }

    fn dispatch(
        &mut self,
        source: &LogicalLine<'_>,
        mut line: ContentLine,
    ) -> Result<(), ParseError> {
        if let Some(reason) = line.error.take() {
            return self.recover(ParseError::MalformedLine {
                line: line.number,
                text: source.text.to_string(),
                reason,
            });
        }

        match line.name.as_str() {
            KW_BEGIN => self.begin(source, &line),
            KW_END => self.end(source, &line),
            _ => self.attribute(source, line),
        }
    }

    fn begin(&mut self, source: &LogicalLine<'_>, line: &ContentLine) -> Result<(), ParseError> {
        let name = line.value.to_ascii_uppercase();
        if let Some(Frame::Ignored(_)) = self.stack.last() {
            tracing::trace!(%name, line = line.number, "nested in ignored component");
            self.stack.push(Frame::Ignored(name));
            return Ok(());
        }

        let Ok(kind) = name.parse::<ComponentKind>() else {
            self.recover(ParseError::UnknownComponentType {
                line: line.number,
                text: source.text.to_string(),
                name: name.clone(),
            })?;
            self.stack.push(Frame::Ignored(name));
            return Ok(());
        };

        let frame = match kind {
            ComponentKind::Calendar => Frame::Calendar,
            ComponentKind::Event => {
                self.add_event = true;
                Frame::Event((self.new_event)())
            }
            ComponentKind::Timezone => Frame::Timezone(Timezone::new()),
            other => Frame::Generic(GenericComponent::new(other)),
        };
        tracing::trace!(%kind, depth = self.stack.len(), "begin component");
        self.stack.push(frame);
        Ok(())
    }

    fn end(&mut self, source: &LogicalLine<'_>, line: &ContentLine) -> Result<(), ParseError> {
        let Some(frame) = self.stack.pop() else {
            return self.recover(ParseError::StructureMismatch {
                line: line.number,
                text: source.text.to_string(),
                expected: format!("{KW_BEGIN}:{KW_VCALENDAR}"),
                found: format!("{KW_END}:{}", line.value),
            });
        };

        if !frame.kind_name().eq_ignore_ascii_case(&line.value) {
            // The popped frame is discarded, it never reaches a parent
            return self.recover(ParseError::StructureMismatch {
                line: line.number,
                text: source.text.to_string(),
                expected: format!("{KW_END}:{}", frame.kind_name()),
                found: format!("{KW_END}:{}", line.value),
            });
        }

        match frame {
            Frame::Calendar => {
                tracing::trace!(line = line.number, "calendar closed");
                self.done = true;
            }
            Frame::Event(event) => self.finish_event(source, line, event)?,
            Frame::Timezone(timezone) => self.calendar.set_timezone(timezone),
            Frame::Generic(component) => self.attach(component),
            Frame::Ignored(name) => tracing::debug!(%name, "discarded ignored component"),
        }
        Ok(())
    }

    fn finish_event(
        &mut self,
        source: &LogicalLine<'_>,
        line: &ContentLine,
        mut event: E,
    ) -> Result<(), ParseError> {
        if !self.add_event {
            tracing::debug!(line = line.number, "dropping event damaged by earlier errors");
            return Ok(());
        }

        let tzid = self
            .calendar
            .timezone()
            .and_then(Timezone::tzid)
            .map(str::to_owned);
        if let Some(tzid) = tzid
            && let Err(source_err) = event.set_attribute(KW_TZID, tzid, Parameters::new())
        {
            self.recover(ParseError::AttributeRejected {
                line: line.number,
                text: source.text.to_string(),
                name: KW_TZID.to_owned(),
                source: source_err,
            })?;
            return Ok(());
        }

        self.calendar.add_event(event);
        Ok(())
    }

    fn attach(&mut self, component: GenericComponent) {
        match self.stack.last_mut() {
            Some(Frame::Calendar) => self.calendar.add_component(component),
            Some(Frame::Event(event)) => event.add_subcomponent(component),
            Some(Frame::Timezone(timezone)) => timezone.add_subcomponent(component),
            Some(Frame::Generic(parent)) => parent.add_child(component),
            None => self.calendar.add_component(component),
            Some(Frame::Ignored(_)) => {
                tracing::debug!(kind = %component.kind(), "discarded orphan component");
            }
        }
    }

    fn attribute(&mut self, source: &LogicalLine<'_>, line: ContentLine) -> Result<(), ParseError> {
        let ContentLine {
            name,
            value,
            params,
            number,
            ..
        } = line;

        let result = match self.stack.last_mut() {
            None => {
                return self.recover(ParseError::StructureMismatch {
                    line: number,
                    text: source.text.to_string(),
                    expected: format!("{KW_BEGIN}:{KW_VCALENDAR}"),
                    found: name,
                });
            }
            Some(Frame::Ignored(_)) => return Ok(()),
            Some(Frame::Calendar) => self.calendar.set_attribute(&name, value, params),
            Some(Frame::Event(event)) => event.set_attribute(&name, value, params),
            Some(Frame::Timezone(timezone)) => timezone.set_attribute(&name, value, params),
            Some(Frame::Generic(component)) => component.set_attribute(&name, value, params),
        };

        if let Err(source_err) = result {
            self.recover(ParseError::AttributeRejected {
                line: number,
                text: source.text.to_string(),
                name,
                source: source_err,
            })?;
            self.add_event = false;
        }
        Ok(())
    }

    /// Apply the error policy: abort in strict mode, log and record otherwise.
    fn recover(&mut self, err: ParseError) -> Result<(), ParseError> {
        if self.config.halt_on_parse_errors {
            return Err(err);
        }

        tracing::warn!(line = err.line(), "{err}");
        self.diagnostics.push(err);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::component::Event;
    use crate::syntax::scanner::scan_content_line;
    use crate::syntax::unfold::logical_lines;

    use super::*;

    fn build(config: ParserConfig, src: &str) -> Result<TreeBuilder<Event>, ParseError> {
        let mut builder = TreeBuilder::new(config, Event::new);
        for source in logical_lines(src) {
            if source.is_blank() {
                continue;
            }
            let line = scan_content_line(&source);
            builder.feed(&source, line)?;
        }
        Ok(builder)
    }

    fn states(src: &str) -> Vec<ParserState> {
        let mut builder = TreeBuilder::new(ParserConfig::strict(), Event::new);
        logical_lines(src)
            .iter()
            .map(|source| builder.feed(source, scan_content_line(source)).unwrap())
            .collect()
    }

    #[test]
    fn state_follows_nesting_depth() {
        let src = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
BEGIN:VALARM\n\
END:VALARM\n\
END:VEVENT\n\
END:VCALENDAR";
        assert_eq!(
            states(src),
            vec![
                ParserState::InCalendar,
                ParserState::InNestedComponent,
                ParserState::InNestedComponent,
                ParserState::InNestedComponent,
                ParserState::InCalendar,
                ParserState::Done,
            ]
        );
    }

    #[test]
    fn builder_starts_awaiting_root() {
        let builder = TreeBuilder::new(ParserConfig::strict(), Event::new);
        assert_eq!(builder.state(), ParserState::AwaitingRoot);
    }

    #[test]
    fn lines_after_done_are_not_processed() {
        let src = "BEGIN:VCALENDAR\nEND:VCALENDAR\nthis is not a content line\nEND:VEVENT";
        let builder = build(ParserConfig::strict(), src).unwrap();
        assert_eq!(builder.state(), ParserState::Done);
        let (calendar, diagnostics) = builder.finish();
        assert_eq!(calendar.total_items(), 0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn observances_attach_to_their_timezone() {
        let src = "BEGIN:VCALENDAR\n\
BEGIN:VTIMEZONE\n\
TZID:Europe/Berlin\n\
BEGIN:STANDARD\n\
TZOFFSETTO:+0100\n\
END:STANDARD\n\
BEGIN:DAYLIGHT\n\
TZOFFSETTO:+0200\n\
END:DAYLIGHT\n\
END:VTIMEZONE\n\
END:VCALENDAR";
        let (calendar, _) = build(ParserConfig::strict(), src).unwrap().finish();
        let timezone = calendar.timezone().unwrap();
        assert_eq!(timezone.tzid(), Some("Europe/Berlin"));
        assert_eq!(timezone.standard().count(), 1);
        assert_eq!(timezone.daylight().count(), 1);
        assert_eq!(
            timezone.daylight().next().and_then(|d| d.attributes().first("TZOFFSETTO")),
            Some("+0200")
        );
    }

    #[test]
    fn alarm_attaches_to_event_and_todo_to_calendar() {
        let src = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
BEGIN:VALARM\n\
ACTION:DISPLAY\n\
END:VALARM\n\
END:VEVENT\n\
BEGIN:VTODO\n\
SUMMARY:Write report\n\
BEGIN:VALARM\n\
ACTION:AUDIO\n\
END:VALARM\n\
END:VTODO\n\
END:VCALENDAR";
        let (calendar, _) = build(ParserConfig::strict(), src).unwrap().finish();
        assert_eq!(calendar.events().first().map(|e| e.alarms().len()), Some(1));

        let todo = calendar.components().first().unwrap();
        assert_eq!(todo.kind(), ComponentKind::Todo);
        assert_eq!(todo.attributes().first("SUMMARY"), Some("Write report"));
        assert_eq!(todo.children().len(), 1);
    }

    #[test]
    fn unknown_component_is_absorbed_in_lenient_mode() {
        let src = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
SUMMARY:Kept\n\
BEGIN:X-CUSTOM\n\
SUMMARY:Swallowed\n\
BEGIN:VALARM\n\
END:VALARM\n\
END:X-CUSTOM\n\
END:VEVENT\n\
END:VCALENDAR";
        let (calendar, diagnostics) = build(ParserConfig::lenient(), src).unwrap().finish();
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics.first(),
            Some(ParseError::UnknownComponentType { name, .. }) if name == "X-CUSTOM"
        ));

        let event = calendar.events().first().unwrap();
        assert_eq!(event.attributes().get("SUMMARY").len(), 1);
        assert!(event.alarms().is_empty());
    }

    #[test]
    fn components_before_calendar_land_in_the_calendar() {
        let src = "BEGIN:VEVENT\n\
SUMMARY:Early\n\
END:VEVENT\n\
BEGIN:VTODO\n\
END:VTODO\n\
BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
SUMMARY:Inside\n\
END:VEVENT\n\
END:VCALENDAR";
        let builder = build(ParserConfig::strict(), src).unwrap();
        assert_eq!(builder.state(), ParserState::Done);
        let (calendar, diagnostics) = builder.finish();
        assert!(diagnostics.is_empty());
        let summaries: Vec<_> = calendar.events().iter().map(Event::summary).collect();
        assert_eq!(summaries, vec![Some("Early"), Some("Inside")]);
        assert_eq!(calendar.components().len(), 1);
    }

    #[test]
    fn open_event_without_calendar_is_nested_state() {
        assert_eq!(
            states("BEGIN:VEVENT\nEND:VEVENT"),
            vec![ParserState::InNestedComponent, ParserState::AwaitingRoot]
        );
    }

    #[test]
    fn nested_calendar_reenters_the_root() {
        let src = "BEGIN:VCALENDAR\nBEGIN:VCALENDAR\nVERSION:1.0\nEND:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR";
        for config in [ParserConfig::strict(), ParserConfig::lenient()] {
            let builder = build(config, src).unwrap();
            assert_eq!(builder.state(), ParserState::Done);
            let (calendar, diagnostics) = builder.finish();
            assert!(diagnostics.is_empty());
            assert_eq!(calendar.attributes().get("VERSION").len(), 1);
            assert_eq!(calendar.attributes().first("VERSION"), Some("1.0"));
        }
    }

    #[test]
    fn stray_end_in_calendar_keeps_later_events() {
        let src = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
UID:a\n\
END:VEVENT\n\
END:VTODO\n\
BEGIN:VEVENT\n\
UID:b\n\
END:VEVENT\n\
BEGIN:VEVENT\n\
UID:c\n\
END:VEVENT\n\
END:VCALENDAR";
        assert!(matches!(
            build(ParserConfig::strict(), src),
            Err(ParseError::StructureMismatch { line: 5, .. })
        ));

        let (calendar, diagnostics) = build(ParserConfig::lenient(), src).unwrap().finish();
        assert_eq!(calendar.total_items(), 3);
        // the mismatched END and the final END:VCALENDAR on an empty stack
        assert!(matches!(
            diagnostics.as_slice(),
            [
                ParseError::StructureMismatch { line: 5, .. },
                ParseError::StructureMismatch { line: 12, .. },
            ]
        ));
    }

    #[test]
    fn end_matches_custom_event_kind_name() {
        #[derive(Debug, Default)]
        struct Task;

        impl Component for Task {
            fn kind_name(&self) -> &str {
                "VTODO"
            }

            fn set_attribute(
                &mut self,
                _name: &str,
                _value: String,
                _params: Parameters,
            ) -> Result<(), crate::component::AttributeError> {
                Ok(())
            }
        }

        impl EventComponent for Task {}

        let feed_all = |config: ParserConfig, src: &str| {
            let mut builder = TreeBuilder::new(config, Task::default);
            for source in logical_lines(src) {
                builder.feed(&source, scan_content_line(&source))?;
            }
            Ok::<_, ParseError>(builder.finish())
        };

        let (calendar, _) = feed_all(
            ParserConfig::strict(),
            "BEGIN:VCALENDAR\nBEGIN:VEVENT\nEND:VTODO\nEND:VCALENDAR",
        )
        .unwrap();
        assert_eq!(calendar.total_items(), 1);

        let err = feed_all(
            ParserConfig::strict(),
            "BEGIN:VCALENDAR\nBEGIN:VEVENT\nEND:VEVENT\nEND:VCALENDAR",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::StructureMismatch { line: 3, ref expected, .. } if expected == "END:VTODO"
        ));
    }

    #[test]
    fn end_without_begin_is_a_structure_error() {
        let src = "END:VCALENDAR";
        assert!(matches!(
            build(ParserConfig::strict(), src),
            Err(ParseError::StructureMismatch { .. })
        ));
        let (_, diagnostics) = build(ParserConfig::lenient(), src).unwrap().finish();
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn rejected_alarm_attribute_withholds_the_event() {
        let src = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
BEGIN:VALARM\n\
X_BAD:1\n\
END:VALARM\n\
END:VEVENT\n\
END:VCALENDAR";
        let (calendar, diagnostics) = build(ParserConfig::lenient(), src).unwrap().finish();
        assert_eq!(calendar.total_items(), 0);
        assert!(matches!(
            diagnostics.as_slice(),
            [ParseError::AttributeRejected { line: 4, .. }]
        ));
    }

    #[test]
    fn unclosed_calendar_keeps_finished_events() {
        let src = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nUID:1\nEND:VEVENT\nBEGIN:VEVENT\nUID:2";
        let builder = build(ParserConfig::strict(), src).unwrap();
        assert_eq!(builder.state(), ParserState::InNestedComponent);
        let (calendar, diagnostics) = builder.finish();
        assert_eq!(calendar.total_items(), 1);
        assert!(diagnostics.is_empty());
    }
}
