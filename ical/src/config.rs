// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Parser configuration, fixed for the lifetime of a parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct ParserConfig {
    /// Abort on the first parse error instead of logging it and continuing.
    #[serde(default = "default_halt_on_parse_errors")]
    pub halt_on_parse_errors: bool,
}

const fn default_halt_on_parse_errors() -> bool {
    true
}

impl ParserConfig {
    /// Abort on the first error.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            halt_on_parse_errors: true,
        }
    }

    /// Log errors and keep going.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            halt_on_parse_errors: false,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            halt_on_parse_errors: default_halt_on_parse_errors(),
        }
    }
}
