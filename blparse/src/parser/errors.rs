use core::fmt::Display;
use core::iter::Iterator;

use miette::Diagnostic;
use miette::LabeledSpan;
use thiserror::Error;

use crate::lexer::END_OF_INPUT;
use crate::span::SourceSpan;
use crate::span::Span;

/// Token text as it should read in an error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found(pub String);

impl Display for Found {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == END_OF_INPUT {
            write!(f, "end of input")
        } else {
            write!(f, "\"{}\"", self.0)
        }
    }
}

impl From<&Span<String>> for Found {
    fn from(token: &Span<String>) -> Self {
        Found(token.inner.clone())
    }
}

#[derive(Error, Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub enum SyntaxError {
    #[error("Expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: Found,
        span: SourceSpan,
    },

    #[error("{construct} condition not valid: {found}")]
    InvalidCondition {
        construct: &'static str,
        found: Found,
        span: SourceSpan,
    },

    #[error("Expected IF, WHILE, or a valid identifier, found {found}")]
    InvalidStatementStart { found: Found, span: SourceSpan },

    #[error("Unknown condition: {found}")]
    UnknownCondition { found: Found, span: SourceSpan },

    #[error("Expected end of input, found {found}")]
    ExtraToken { found: Found, span: SourceSpan },

    #[error("Statements nested more than {limit} deep, found {found}")]
    NestingTooDeep {
        limit: usize,
        found: Found,
        span: SourceSpan,
    },
}

/// Category of a `SyntaxError`, without its payload.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    UnexpectedToken,
    InvalidCondition,
    InvalidStatementStart,
    UnknownCondition,
    ExtraToken,
    NestingTooDeep,
}

impl SyntaxError {
    pub(super) fn unexpected(expected: &'static str, token: &Span<String>) -> Self {
        SyntaxError::UnexpectedToken {
            expected,
            found: token.into(),
            span: token.span,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        use SyntaxError::*;
        match self {
            UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            InvalidCondition { .. } => ErrorKind::InvalidCondition,
            InvalidStatementStart { .. } => ErrorKind::InvalidStatementStart,
            UnknownCondition { .. } => ErrorKind::UnknownCondition,
            ExtraToken { .. } => ErrorKind::ExtraToken,
            NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
        }
    }

    /// Where the offending token sits in the source.
    pub fn span(&self) -> SourceSpan {
        use SyntaxError::*;
        match self {
            UnexpectedToken { span, .. }
            | InvalidCondition { span, .. }
            | InvalidStatementStart { span, .. }
            | UnknownCondition { span, .. }
            | ExtraToken { span, .. }
            | NestingTooDeep { span, .. } => *span,
        }
    }
}

// Every variant points at exactly one token, so the label is written out by hand
impl Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        let code = match self.kind() {
            ErrorKind::UnexpectedToken => "bl::unexpected_token",
            ErrorKind::InvalidCondition => "bl::invalid_condition",
            ErrorKind::InvalidStatementStart => "bl::invalid_statement_start",
            ErrorKind::UnknownCondition => "bl::unknown_condition",
            ErrorKind::ExtraToken => "bl::extra_token",
            ErrorKind::NestingTooDeep => "bl::nesting_too_deep",
        };
        Some(Box::new(code))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(core::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), self.span()),
        )))
    }
}
