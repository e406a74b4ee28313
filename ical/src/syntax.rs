// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Line-oriented syntax layer for iCalendar as defined in RFC 5545.
//!
//! ```text
//! Source → Unfold → Lexer → Scanner → Tree Builder → Calendar
//! ```

pub mod lexer;
pub mod scanner;
pub mod tree_builder;
pub mod unfold;

pub use scanner::{ContentLine, ContentLineError, scan_content_line, unescape_text};
pub use tree_builder::{ParserState, TreeBuilder};
pub use unfold::{LogicalLine, logical_lines, unfold};
