// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::component::{AttributeError, Attributes, Component, ComponentKind, Parameters};

/// A component without dedicated behavior: DAYLIGHT, STANDARD, VTODO,
/// VJOURNAL, VFREEBUSY or VALARM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericComponent {
    kind: ComponentKind,
    attributes: Attributes,
    children: Vec<GenericComponent>,
}

impl GenericComponent {
    /// Create an empty component of the given kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Kind of this component.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Attributes of this component.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Components nested inside this one.
    #[must_use]
    pub fn children(&self) -> &[GenericComponent] {
        &self.children
    }

    /// Attach a nested component.
    pub fn add_child(&mut self, child: GenericComponent) {
        self.children.push(child);
    }
}

impl Component for GenericComponent {
    fn kind_name(&self) -> &str {
        self.kind.name()
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
