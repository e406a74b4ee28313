// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Timezone component (VTIMEZONE).

use crate::component::{
    AttributeError, Attributes, Component, ComponentKind, GenericComponent, Parameters,
};
use crate::keyword::{KW_TZID, KW_VTIMEZONE};

/// Timezone component (VTIMEZONE)
///
/// Offsets are not interpreted; the observance rules are kept as parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timezone {
    attributes: Attributes,
    observances: Vec<GenericComponent>,
}

impl Timezone {
    /// Create an empty timezone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Timezone identifier, the first `TZID` attribute.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.attributes.first(KW_TZID)
    }

    /// Attributes of the timezone itself.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Nested components in source order, normally the observance rules.
    #[must_use]
    pub fn observances(&self) -> &[GenericComponent] {
        &self.observances
    }

    /// Daylight saving time rules.
    pub fn daylight(&self) -> impl Iterator<Item = &GenericComponent> {
        self.observances_of(ComponentKind::Daylight)
    }

    /// Standard time rules.
    pub fn standard(&self) -> impl Iterator<Item = &GenericComponent> {
        self.observances_of(ComponentKind::Standard)
    }

    /// Attach a nested component.
    pub fn add_subcomponent(&mut self, component: GenericComponent) {
        self.observances.push(component);
    }

    fn observances_of(&self, kind: ComponentKind) -> impl Iterator<Item = &GenericComponent> {
        self.observances.iter().filter(move |c| c.kind() == kind)
    }
}

impl Component for Timezone {
    fn kind_name(&self) -> &str {
        KW_VTIMEZONE
    }

    fn set_attribute(
        &mut self,
        name: &str,
        value: String,
        params: Parameters,
    ) -> Result<(), AttributeError> {
        if name == KW_TZID && value.is_empty() {
            return Err(AttributeError::EmptyValue {
                name: name.to_owned(),
            });
        }
        self.attributes.append(name, value, params)
    }
}
