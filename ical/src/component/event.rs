// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Event component (VEVENT).

use crate::component::{
    AttributeError, Attributes, Component, ComponentKind, EventComponent, GenericComponent,
    Parameters,
};
use crate::keyword::{KW_DTSTART, KW_PRIORITY, KW_SEQUENCE, KW_SUMMARY, KW_TZID, KW_UID, KW_VEVENT};

/// The default event type built for VEVENT blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    attributes: Attributes,
    alarms: Vec<GenericComponent>,
}

impl Event {
    /// Create an empty event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes of the event.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Unique identifier
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.attributes.first(KW_UID)
    }

    /// Summary/title
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.attributes.first(KW_SUMMARY)
    }

    /// Start date-time, as written in the source
    #[must_use]
    pub fn dtstart(&self) -> Option<&str> {
        self.attributes.first(KW_DTSTART)
    }

    /// Timezone identifier, inherited from the calendar when it has one
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.attributes.first(KW_TZID)
    }

    /// Alarms and other components nested in the event
    #[must_use]
    pub fn alarms(&self) -> &[GenericComponent] {
        &self.alarms
    }
}

impl Component for Event {
    fn kind_name(&self) -> &str {
        KW_VEVENT
    }

    fn set_attribute(
        &mut self,
        name: &str,
        value: String,
        params: Parameters,
    ) -> Result<(), AttributeError> {
        match name {
            KW_PRIORITY if !value.parse::<u8>().is_ok_and(|p| p <= 9) => {
                return Err(AttributeError::InvalidValue {
                    name: name.to_owned(),
                    value,
                    expected: "an integer between 0 and 9",
                });
            }
            KW_SEQUENCE if value.parse::<u32>().is_err() => {
                return Err(AttributeError::InvalidValue {
                    name: name.to_owned(),
                    value,
                    expected: "a non-negative integer",
                });
            }
            _ => {}
        }
        self.attributes.append(name, value, params)
    }
}

impl EventComponent for Event {
    fn add_subcomponent(&mut self, component: GenericComponent) {
        if component.kind() != ComponentKind::Alarm {
            tracing::debug!(kind = %component.kind(), "unusual component nested in VEVENT");
        }
        self.alarms.push(component);
    }
}
