// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! Converts one logical (unfolded) line into a [`ContentLine`].
//!
//! # Content Line Format
//!
//! Per RFC 5545, a content line has the format:
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! ```
//!
//! The separating colon is the first one that is neither escaped with a
//! backslash nor inside a double-quoted parameter value. Errors are kept on
//! the returned line instead of failing, so the caller decides whether a
//! broken line aborts the parse.

use std::ops::Range;

use crate::component::Parameters;
use crate::keyword::{KW_BEGIN, KW_END};
use crate::syntax::lexer::{SpannedToken, Token, tokenize};
use crate::syntax::unfold::LogicalLine;

/// A scanned iCalendar content line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name, upper-cased (e.g., "DTSTART", "SUMMARY")
    pub name: String,

    /// Property value with text escapes decoded and surrounding whitespace trimmed
    pub value: String,

    /// Property parameters keyed by upper-cased name
    pub params: Parameters,

    /// 1-based physical line number where the line starts
    pub number: usize,

    /// Error information if scanning this line failed
    pub error: Option<ContentLineError>,
}

impl ContentLine {
    /// Check if this content line is valid (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Whether this line opens a component.
    #[must_use]
    pub fn is_begin(&self) -> bool {
        self.is_valid() && self.name == KW_BEGIN
    }

    /// Whether this line closes a component.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.is_valid() && self.name == KW_END
    }

    fn invalid(number: usize, error: ContentLineError) -> Self {
        Self {
            number,
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Errors that can occur when scanning a content line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentLineError {
    /// No unescaped colon separates the name from the value.
    ///
    /// Example: `PROPNAME value` instead of `PROPNAME:value`
    #[error("missing colon separator")]
    MissingColon,

    /// Nothing precedes the colon.
    #[error("empty property name")]
    EmptyName,

    /// Parameter without an equals sign.
    ///
    /// Example: `DTSTART;TZID:20250101T090000`
    #[error("missing equals in parameter `{0}`")]
    MissingEquals(String),

    /// Parameter with an empty name.
    ///
    /// Example: `;=value`
    #[error("empty parameter name")]
    EmptyParameterName,

    /// A double-quoted parameter value runs to the end of the line.
    #[error("unterminated quoted string")]
    UnterminatedQuote,
}

/// Scan a logical line into a content line.
#[must_use]
pub fn scan_content_line(line: &LogicalLine<'_>) -> ContentLine {
    match split_content_line(&line.text) {
        Ok((name, params, raw_value)) => ContentLine {
            name,
            value: unescape_text(raw_value).trim().to_owned(),
            params,
            number: line.number,
            error: None,
        },
        Err(err) => ContentLine::invalid(line.number, err),
    }
}

/// Split a line into its name, parameters and raw (still escaped) value.
fn split_content_line(text: &str) -> Result<(String, Parameters, &str), ContentLineError> {
    let mut segments: Vec<Range<usize>> = Vec::new();
    let mut segment_start = 0;
    let mut in_quotes = false;
    let mut value_start = None;

    for SpannedToken(token, span) in tokenize(text) {
        match token {
            Token::DQuote => in_quotes = !in_quotes,
            Token::Semicolon if !in_quotes => {
                segments.push(segment_start..span.start);
                segment_start = span.end;
            }
            Token::Colon if !in_quotes => {
                segments.push(segment_start..span.start);
                value_start = Some(span.end);
                break;
            }
            _ => {}
        }
    }

    let Some(value_start) = value_start else {
        return Err(if in_quotes {
            ContentLineError::UnterminatedQuote
        } else {
            ContentLineError::MissingColon
        });
    };

    let mut segments = segments.into_iter().filter_map(|range| text.get(range));
    let name = match segments.next() {
        Some(name) if !name.is_empty() => name.to_ascii_uppercase(),
        _ => return Err(ContentLineError::EmptyName),
    };

    let mut params = Parameters::new();
    for segment in segments {
        let (key, raw) = segment
            .split_once('=')
            .ok_or_else(|| ContentLineError::MissingEquals(segment.to_owned()))?;
        if key.is_empty() {
            return Err(ContentLineError::EmptyParameterName);
        }
        params.insert(key.to_ascii_uppercase(), unescape_param_value(raw));
    }

    Ok((name, params, text.get(value_start..).unwrap_or_default()))
}

/// Decode the text escapes of a property value.
///
/// `\n` and `\N` become a newline; `\,`, `\;` and `\\` become the escaped
/// character. Any other backslash sequence is kept as written.
#[must_use]
pub fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(escaped @ (',' | ';' | '\\')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Strip quoting from a parameter value and decode RFC 6868 caret escapes.
fn unescape_param_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().filter(|&c| c != '"').peekable();
    while let Some(c) = chars.next() {
        if c != '^' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some('n') => out.push('\n'),
            Some('\'') => out.push('"'),
            Some('^') => out.push('^'),
            _ => {
                // Invalid caret escape, preserve as-is
                out.push('^');
                continue;
            }
        }
        chars.next();
    }
    out
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    fn scan(text: &str) -> ContentLine {
        scan_content_line(&LogicalLine {
            number: 1,
            text: Cow::Borrowed(text),
        })
    }

    #[test]
    fn scans_simple_line() {
        let line = scan("SUMMARY:Team Meeting");
        assert!(line.is_valid());
        assert_eq!(line.name, "SUMMARY");
        assert_eq!(line.value, "Team Meeting");
        assert!(line.params.is_empty());
    }

    #[test]
    fn scans_parameters() {
        let line = scan("DTSTART;TZID=America/New_York;VALUE=DATE-TIME:20260123T120000");
        assert_eq!(line.name, "DTSTART");
        assert_eq!(line.value, "20260123T120000");
        assert_eq!(line.params.len(), 2);
        assert_eq!(line.params.get("TZID").map(String::as_str), Some("America/New_York"));
        assert_eq!(line.params.get("VALUE").map(String::as_str), Some("DATE-TIME"));
    }

    #[test]
    fn value_keeps_later_colons() {
        let line = scan("ORGANIZER;CN=Jane:mailto:jane@example.com");
        assert_eq!(line.value, "mailto:jane@example.com");
    }

    #[test]
    fn quoted_parameter_may_contain_separators() {
        let line = scan(r#"ATTENDEE;CN="Doe, Jane; PhD";DIR="ldap://example.com:6666":mailto:j@example.com"#);
        assert!(line.is_valid());
        assert_eq!(line.params.get("CN").map(String::as_str), Some("Doe, Jane; PhD"));
        assert_eq!(
            line.params.get("DIR").map(String::as_str),
            Some("ldap://example.com:6666")
        );
        assert_eq!(line.value, "mailto:j@example.com");
    }

    #[test]
    fn multi_valued_parameter_loses_all_quotes() {
        let line = scan(r#"ATTENDEE;MEMBER="mailto:a@x","mailto:b@x":mailto:c@x"#);
        assert_eq!(
            line.params.get("MEMBER").map(String::as_str),
            Some("mailto:a@x,mailto:b@x")
        );
    }

    #[test]
    fn caret_escapes_are_decoded() {
        let line = scan(r#"ATTENDEE;CN="Test^nName ^'Q^' ^^ ^x":mailto:t@example.com"#);
        assert_eq!(
            line.params.get("CN").map(String::as_str),
            Some("Test\nName \"Q\" ^ ^x")
        );
    }

    #[test]
    fn names_are_case_insensitive() {
        let line = scan("dtstart;tzid=Europe/Paris:20250101");
        assert_eq!(line.name, "DTSTART");
        assert!(line.params.contains_key("TZID"));
    }

    #[test]
    fn repeated_parameter_keeps_last_value() {
        let line = scan("X-TEST;A=1;A=2:v");
        assert_eq!(line.params.get("A").map(String::as_str), Some("2"));
    }

    #[test]
    fn value_escapes_are_decoded() {
        let line = scan(r"DESCRIPTION:Foo\, Bar\; Baz\n Qux");
        assert_eq!(line.value, "Foo, Bar; Baz\n Qux");
    }

    #[test]
    fn unknown_escapes_pass_through() {
        assert_eq!(unescape_text(r"C:\temp\N\\x\"), "C:\\temp\n\\x\\");
        assert_eq!(unescape_text(r"\t\:"), r"\t\:");
    }

    #[test]
    fn value_is_trimmed() {
        let line = scan("SUMMARY:   padded \t");
        assert_eq!(line.value, "padded");
    }

    #[test]
    fn escaped_colon_is_not_a_separator() {
        let line = scan(r"X-NAME\:PART:value");
        assert_eq!(line.name, r"X-NAME\:PART");
        assert_eq!(line.value, "value");
    }

    #[test]
    fn empty_value_is_valid() {
        let line = scan("DESCRIPTION:");
        assert!(line.is_valid());
        assert_eq!(line.value, "");
    }

    #[test]
    fn missing_colon_is_an_error() {
        let line = scan("INVALID LINE");
        assert_eq!(line.error, Some(ContentLineError::MissingColon));
        assert!(line.name.is_empty());
        assert!(!line.is_begin());
        assert!(!line.is_end());
    }

    #[test]
    fn parameter_errors() {
        assert_eq!(scan(":value").error, Some(ContentLineError::EmptyName));
        assert_eq!(
            scan("DTSTART;TZID:20250101").error,
            Some(ContentLineError::MissingEquals("TZID".to_owned()))
        );
        assert_eq!(scan("X;=a:b").error, Some(ContentLineError::EmptyParameterName));
        assert_eq!(
            scan(r#"ATTENDEE;CN="Unclosed:mailto:t@example.com"#).error,
            Some(ContentLineError::UnterminatedQuote)
        );
    }

    #[test]
    fn begin_and_end_lines() {
        assert!(scan("BEGIN:VEVENT").is_begin());
        assert!(scan("end:VEVENT").is_end());
        assert!(!scan("BEGINNING:x").is_begin());
    }
}
