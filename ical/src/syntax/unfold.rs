// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Line unfolding as defined in RFC 5545 section 3.1.
//!
//! Long content lines are folded by inserting a line break followed by a
//! single linear-whitespace character (SPACE or HTAB). Unfolding removes the
//! break together with that one whitespace character, nothing else.

use std::borrow::Cow;

/// A logical content line, i.e. one line after unfolding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine<'src> {
    /// 1-based physical line number where this logical line starts
    pub number: usize,

    /// Unfolded text, without the line terminator
    pub text: Cow<'src, str>,
}

impl LogicalLine<'_> {
    /// Whether the line carries no content at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Split source text into logical lines.
///
/// Both CRLF and bare LF terminate a physical line. A physical line starting
/// with SPACE or HTAB continues the previous logical line; the leading
/// whitespace character is dropped and the rest is appended verbatim. A
/// continuation with nothing before it is kept as its own line.
///
/// Lines that need no merging borrow from `src`.
#[must_use]
pub fn logical_lines(src: &str) -> Vec<LogicalLine<'_>> {
    let mut lines: Vec<LogicalLine<'_>> = Vec::new();

    for (i, raw) in src.split('\n').enumerate() {
        let physical = raw.strip_suffix('\r').unwrap_or(raw);
        match (physical.strip_prefix([' ', '\t']), lines.last_mut()) {
            (Some(continuation), Some(prev)) => prev.text.to_mut().push_str(continuation),
            _ => lines.push(LogicalLine {
                number: i + 1,
                text: Cow::Borrowed(physical),
            }),
        }
    }

    lines
}

/// Unfold source text, normalizing line endings to LF.
///
/// This is the purely textual form of [`logical_lines`].
#[must_use]
pub fn unfold(src: &str) -> String {
    logical_lines(src)
        .iter()
        .map(|line| line.text.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}
