// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for a single unfolded iCalendar content line.
//!
//! The lexer only recognizes the structural characters of a content line.
//! A backslash always forms an [`Token::Escape`] together with the character
//! that follows it, so an escaped colon never looks like a separator.

use std::fmt::{self, Display};

use logos::{Logos, Span};

/// Tokenize one logical content line into spanned tokens.
pub fn tokenize(line: &str) -> impl Iterator<Item = SpannedToken<'_>> {
    Token::lexer(line).spanned().map(|(tok, span)| match tok {
        Ok(tok) => SpannedToken(tok, span),
        Err(()) => SpannedToken(Token::Error, span),
    })
}

/// Token emitted by the content line lexer
#[derive(PartialEq, Eq, Clone, Copy, Logos)]
pub enum Token<'a> {
    /// Double Quote ("), decimal codepoint 34
    #[token(r#"""#)]
    DQuote,

    /// Colon (:), decimal codepoint 58
    #[token(":")]
    Colon,

    /// Semicolon (;), decimal codepoint 59
    #[token(";")]
    Semicolon,

    /// Equal sign (=), decimal codepoint 61
    #[token("=")]
    Equal,

    /// Backslash followed by the character it protects, if any
    #[regex(r"\\.?")]
    Escape(&'a str),

    /// Any run of characters without structural meaning
    #[regex(r#"[^":;=\\]+"#)]
    Text(&'a str),

    /// Error token for lexing errors
    Error,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DQuote => write!(f, "DQuote"),
            Self::Colon => write!(f, "Colon"),
            Self::Semicolon => write!(f, "Semicolon"),
            Self::Equal => write!(f, "Equal"),
            Self::Escape(s) => write!(f, "Escape({s})"),
            Self::Text(s) => write!(f, "Text({s})"),
            Self::Error => write!(f, "Error"),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A token with its byte range in the content line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken<'src>(pub Token<'src>, pub Span);
