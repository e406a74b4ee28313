// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component object model for parsed iCalendar data.
//!
//! Every component stores its content lines in an [`Attributes`] table. The
//! stack machine only talks to components through the [`Component`] trait,
//! which is also what a custom event type has to implement.

mod calendar;
mod event;
mod generic;
mod timezone;

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

pub use calendar::Calendar;
pub use event::Event;
pub use generic::GenericComponent;
pub use timezone::Timezone;

/// Parameters of a content line, keyed by upper-cased parameter name.
pub type Parameters = BTreeMap<String, String>;

/// The closed set of component kinds the parser understands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ComponentKind {
    /// VCALENDAR, the root component
    #[strum(serialize = "VCALENDAR")]
    Calendar,

    /// VEVENT
    #[strum(serialize = "VEVENT")]
    Event,

    /// VTIMEZONE
    #[strum(serialize = "VTIMEZONE")]
    Timezone,

    /// DAYLIGHT observance rule inside a VTIMEZONE
    #[strum(serialize = "DAYLIGHT")]
    Daylight,

    /// STANDARD observance rule inside a VTIMEZONE
    #[strum(serialize = "STANDARD")]
    Standard,

    /// VTODO
    #[strum(serialize = "VTODO")]
    Todo,

    /// VJOURNAL
    #[strum(serialize = "VJOURNAL")]
    Journal,

    /// VFREEBUSY
    #[strum(serialize = "VFREEBUSY")]
    FreeBusy,

    /// VALARM
    #[strum(serialize = "VALARM")]
    Alarm,
}

impl ComponentKind {
    /// The component name as written after `BEGIN:` / `END:`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Capability shared by every component: accept attributes and report the
/// component name used to match `BEGIN`/`END` lines.
pub trait Component: fmt::Debug {
    /// Component name, e.g. `VEVENT`.
    fn kind_name(&self) -> &str;

    /// Apply one content line to this component.
    ///
    /// ## Errors
    ///
    /// Returns an [`AttributeError`] if the component rejects the attribute.
    fn set_attribute(
        &mut self,
        name: &str,
        value: String,
        params: Parameters,
    ) -> Result<(), AttributeError>;
}

/// A component usable as the event type of a parser.
pub trait EventComponent: Component {
    /// Take ownership of a finished sub-component such as a VALARM.
    ///
    /// The default implementation drops it.
    fn add_subcomponent(&mut self, component: GenericComponent) {
        tracing::trace!(kind = %component.kind(), "event type drops sub-component");
    }

    /// Categories this event type sorts its events into, used by callers
    /// to build filters before any document is parsed.
    ///
    /// The default implementation knows none.
    fn categories() -> Vec<String>
    where
        Self: Sized,
    {
        Vec::new()
    }
}

/// Reasons a component refuses an attribute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    /// The name is not an RFC 5545 name (`1*(ALPHA / DIGIT / "-")`).
    #[error("invalid attribute name `{0}`")]
    InvalidName(String),

    /// The attribute requires a value.
    #[error("{name} must not be empty")]
    EmptyValue {
        /// Attribute name
        name: String,
    },

    /// The value does not have the required form.
    #[error("{name} value `{value}` is not {expected}")]
    InvalidValue {
        /// Attribute name
        name: String,
        /// Rejected value
        value: String,
        /// Description of the accepted form
        expected: &'static str,
    },
}

/// One occurrence of an attribute: its value and parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeValue {
    /// Unescaped value
    pub value: String,
    /// Parameters given on the same line
    pub params: Parameters,
}

/// Attribute table of a component.
///
/// Repeated attributes are all retained in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, Vec<AttributeValue>>);

impl Attributes {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an occurrence of `name`.
    ///
    /// ## Errors
    ///
    /// Returns [`AttributeError::InvalidName`] if `name` is not a valid name.
    pub fn append(
        &mut self,
        name: &str,
        value: String,
        params: Parameters,
    ) -> Result<(), AttributeError> {
        if !is_valid_name(name) {
            return Err(AttributeError::InvalidName(name.to_owned()));
        }

        self.0
            .entry(name.to_owned())
            .or_default()
            .push(AttributeValue { value, params });
        Ok(())
    }

    /// All occurrences of `name`, in source order.
    #[must_use]
    pub fn get(&self, name: &str) -> &[AttributeValue] {
        self.0.get(name).map_or(&[], Vec::as_slice)
    }

    /// Value of the first occurrence of `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).first().map(|a| a.value.as_str())
    }

    /// Whether `name` occurs at least once.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of distinct attribute names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over attribute names and their occurrences, ordered by name.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<AttributeValue>> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a Vec<AttributeValue>);
    type IntoIter = btree_map::Iter<'a, String, Vec<AttributeValue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn kind_round_trips_through_its_name() {
        for kind in ComponentKind::iter() {
            assert_eq!(kind.name().parse::<ComponentKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!("vevent".parse::<ComponentKind>(), Ok(ComponentKind::Event));
        assert_eq!("Daylight".parse::<ComponentKind>(), Ok(ComponentKind::Daylight));
        assert!("XFOO".parse::<ComponentKind>().is_err());
    }

    #[test]
    fn attributes_keep_repeated_values() {
        let mut attrs = Attributes::new();
        attrs.append("ATTENDEE", "mailto:a@x".to_owned(), Parameters::new()).unwrap();
        let params = Parameters::from([("CN".to_owned(), "B".to_owned())]);
        attrs.append("ATTENDEE", "mailto:b@x".to_owned(), params.clone()).unwrap();

        assert_eq!(attrs.len(), 1);
        let values = attrs.get("ATTENDEE");
        assert_eq!(values.len(), 2);
        assert_eq!(attrs.first("ATTENDEE"), Some("mailto:a@x"));
        assert_eq!(values.last().map(|a| &a.params), Some(&params));
    }

    #[test]
    fn attributes_reject_invalid_names() {
        let mut attrs = Attributes::new();
        for name in ["", "X_BAD", " SUMMARY", "DT START"] {
            assert_eq!(
                attrs.append(name, String::new(), Parameters::new()),
                Err(AttributeError::InvalidName(name.to_owned()))
            );
        }
        assert!(attrs.is_empty());
        assert!(attrs.get("X_BAD").is_empty());
    }
}
