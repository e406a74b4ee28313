// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Root calendar component (VCALENDAR).

use crate::component::{
    AttributeError, Attributes, Component, Event, GenericComponent, Parameters, Timezone,
};
use crate::keyword::KW_VCALENDAR;

/// Root calendar component (VCALENDAR)
///
/// Holds the events in parse order and at most one timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar<E = Event> {
    attributes: Attributes,
    events: Vec<E>,
    timezone: Option<Timezone>,
    components: Vec<GenericComponent>,
}

impl<E> Default for Calendar<E> {
    fn default() -> Self {
        Self {
            attributes: Attributes::new(),
            events: Vec::new(),
            timezone: None,
            components: Vec::new(),
        }
    }
}

impl<E> Calendar<E> {
    /// Create an empty calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calendar-level attributes such as VERSION or PRODID.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Events in parse order.
    #[must_use]
    pub fn events(&self) -> &[E] {
        &self.events
    }

    /// Consume the calendar, returning its events.
    #[must_use]
    pub fn into_events(self) -> Vec<E> {
        self.events
    }

    /// The calendar timezone, if one was defined.
    #[must_use]
    pub const fn timezone(&self) -> Option<&Timezone> {
        self.timezone.as_ref()
    }

    /// VTODO, VJOURNAL and VFREEBUSY components found directly in the calendar.
    #[must_use]
    pub fn components(&self) -> &[GenericComponent] {
        &self.components
    }

    /// Number of events attached to the calendar.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.events.len()
    }

    /// Append an event.
    pub fn add_event(&mut self, event: E) {
        self.events.push(event);
    }

    /// Set the timezone, replacing any previous one.
    pub fn set_timezone(&mut self, timezone: Timezone) {
        if let Some(previous) = self.timezone.replace(timezone) {
            tracing::debug!(tzid = previous.tzid(), "replacing calendar timezone");
        }
    }

    /// Attach a component nested directly in the calendar.
    pub fn add_component(&mut self, component: GenericComponent) {
        self.components.push(component);
    }
}

impl<E: std::fmt::Debug> Component for Calendar<E> {
    fn kind_name(&self) -> &str {
        KW_VCALENDAR
    }

    fn set_attribute(
        &mut self,
        name: &str,
        value: String,
        params: Parameters,
    ) -> Result<(), AttributeError> {
        self.attributes.append(name, value, params)
    }
}
