use std::collections::VecDeque;
use std::sync::OnceLock;

use miette::Diagnostic;
use regex::Regex;
use thiserror::Error;

use crate::span::SourceSpan;
use crate::span::Span;
use crate::span::Spanned;


/// Reserved token terminating every token stream. Contains spaces, so the tokenizer can never
/// produce it from source text.
pub const END_OF_INPUT: &str = "### END OF INPUT ###";

pub const KEYWORDS: &[&str] = &[
    "PROGRAM",
    "IS",
    "BEGIN",
    "END",
    "INSTRUCTION",
    "IF",
    "THEN",
    "ELSE",
    "WHILE",
    "DO",
];

pub const CONDITIONS: &[&str] = &[
    "next-is-empty",
    "next-is-not-empty",
    "next-is-wall",
    "next-is-not-wall",
    "next-is-friend",
    "next-is-not-friend",
    "next-is-enemy",
    "next-is-not-enemy",
    "random",
    "true",
];

pub fn is_keyword(token: &str) -> bool {
    KEYWORDS.contains(&token)
}

pub fn is_condition(token: &str) -> bool {
    CONDITIONS.contains(&token)
}

/// A letter followed by letters, digits and hyphens, that is neither a keyword nor a
/// condition.
pub fn is_identifier(token: &str) -> bool {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    let re = IDENTIFIER
        .get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9-]*$").expect("invalid regex"));
    re.is_match(token) && !is_keyword(token) && !is_condition(token)
}

/// Front-consumable queue of tokens. The `END_OF_INPUT` sentinel is held apart from the
/// queue, so it is always the last token and can never be dequeued away.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: VecDeque<Span<String>>,
    end: Span<String>,
}

impl TokenStream {
    /// Builds a stream from already-classified tokens. A trailing `END_OF_INPUT` is taken as
    /// the sentinel; otherwise one is appended just past the last token.
    pub fn new(tokens: impl IntoIterator<Item = Span<String>>) -> Self {
        let mut tokens = tokens.into_iter().collect::<VecDeque<_>>();
        let end = match tokens.back() {
            Some(last) if last.inner == END_OF_INPUT => tokens.pop_back(),
            _ => None,
        };
        let end = end.unwrap_or_else(|| {
            let at = tokens.back().map_or(0, |last| last.span.end());
            END_OF_INPUT.to_string().spanned(SourceSpan::new(at, at))
        });
        Self { tokens, end }
    }

    /// Tokens without source positions, for programmatic callers.
    pub fn from_raw<S: Into<String>>(tokens: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            tokens
                .into_iter()
                .map(|token| token.into().spanned(SourceSpan::empty())),
        )
    }

    pub fn front(&self) -> &Span<String> {
        self.tokens.front().unwrap_or(&self.end)
    }

    pub fn front_is(&self, token: &str) -> bool {
        self.front().inner == token
    }

    /// Removes and returns the front token. Once only the sentinel remains this returns a copy
    /// of it and leaves the stream as is.
    pub fn dequeue(&mut self) -> Span<String> {
        self.tokens.pop_front().unwrap_or_else(|| self.end.clone())
    }

    /// Number of tokens, sentinel included.
    pub fn token_count(&self) -> usize {
        self.tokens.len() + 1
    }

    /// True when nothing but the sentinel is left.
    pub fn at_end(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Span<String>> {
        self.tokens.iter().chain(std::iter::once(&self.end))
    }
}

#[derive(Error, Diagnostic, Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub enum LexError {
    #[error("Invalid token: {found}")]
    InvalidToken {
        found: String,
        #[label("here")]
        span: SourceSpan,
    },
}

struct Tokenizer {
    whitespace: Regex,
    word: Regex,
}

impl Tokenizer {
    fn new() -> Self {
        Self {
            whitespace: Regex::new(r"^\s+").expect("invalid regex"),
            word: Regex::new(r"^[a-zA-Z0-9-]+").expect("invalid regex"),
        }
    }

    fn skip_whitespace<'a>(&self, source: &'a str) -> &'a str {
        match self.whitespace.find(source) {
            Some(m) => &source[m.end()..],
            None => source,
        }
    }

    /// `offset` is where `source` starts in the original text.
    fn consume_token<'a>(
        &self,
        source: &'a str,
        offset: usize,
    ) -> Result<(Span<String>, &'a str), LexError> {
        // Truncates the string so it appears about `mid` characters long
        fn safe_truncate(s: &str, mut mid: usize) -> &str {
            while mid < s.len() {
                if let Some((front, _)) = s.split_at_checked(mid) {
                    return front;
                }
                mid += 1;
            }
            s
        }

        match self.word.find(source) {
            Some(m) => {
                let span = SourceSpan::new(offset, offset + m.end());
                Ok((m.as_str().to_string().spanned(span), &source[m.end()..]))
            }
            None => {
                let width = source.chars().next().map_or(0, char::len_utf8);
                Err(LexError::InvalidToken {
                    found: safe_truncate(source, 8).to_string(),
                    span: SourceSpan::new(offset, offset + width),
                })
            }
        }
    }
}

/// Splits BL source text into a token stream terminated by `END_OF_INPUT`.
pub fn lex(source: &str) -> Result<TokenStream, LexError> {
    let tokenizer = Tokenizer::new();
    let mut out = Vec::<Span<String>>::new();
    let mut rest = source;
    loop {
        rest = tokenizer.skip_whitespace(rest);
        if rest.is_empty() {
            break;
        }

        let (token, new_rest) = tokenizer.consume_token(rest, source.len() - rest.len())?;
        out.push(token);
        rest = new_rest;
    }

    out.push(END_OF_INPUT.to_string().spanned(SourceSpan::new(source.len(), source.len())));
    tracing::trace!(tokens = out.len(), "lexed source");
    Ok(TokenStream::new(out))
}
