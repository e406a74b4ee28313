// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::component::AttributeError;
use crate::syntax::ContentLineError;

/// Errors raised while parsing a calendar document.
///
/// In strict mode the first error aborts the parse. In lenient mode every
/// error is logged and collected in the [`ParseReport`](crate::ParseReport).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line could not be split into name, parameters and value.
    #[error("line {line}: malformed content line ({reason}): {text}")]
    MalformedLine {
        /// Line number
        line: usize,
        /// Offending line
        text: String,
        /// What went wrong
        #[source]
        reason: ContentLineError,
    },

    /// `BEGIN` names a component type the parser does not know.
    #[error("line {line}: unknown component type `{name}`")]
    UnknownComponentType {
        /// Line number
        line: usize,
        /// Offending line
        text: String,
        /// Component name found after `BEGIN:`
        name: String,
    },

    /// A line does not fit the current nesting, e.g. `END:VTODO` closing a
    /// VEVENT or a property before `BEGIN:VCALENDAR`.
    #[error("line {line}: expected {expected}, found {found}")]
    StructureMismatch {
        /// Line number
        line: usize,
        /// Offending line
        text: String,
        /// What the current nesting allows
        expected: String,
        /// What the line contains
        found: String,
    },

    /// A component refused an attribute.
    #[error("line {line}: attribute {name} rejected: {source}")]
    AttributeRejected {
        /// Line number
        line: usize,
        /// Offending line
        text: String,
        /// Attribute name
        name: String,
        /// Reason given by the component
        source: AttributeError,
    },
}

impl ParseError {
    /// Line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MalformedLine { line, .. }
            | Self::UnknownComponentType { line, .. }
            | Self::StructureMismatch { line, .. }
            | Self::AttributeRejected { line, .. } => *line,
        }
    }

    /// Text of the offending line.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::MalformedLine { text, .. }
            | Self::UnknownComponentType { text, .. }
            | Self::StructureMismatch { text, .. }
            | Self::AttributeRejected { text, .. } => text,
        }
    }
}
