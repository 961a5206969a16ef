use super::*;

use miette::Diagnostic;

use crate::lexer::lex;
use crate::span::SourceSpan;

fn parse_err(source: &str) -> SyntaxError {
    parse(lex(source).expect("lex failed")).expect_err("expected Err, got Ok")
}

fn assert_labels_eq<'a>(
    expected: &'a [(Option<String>, (usize, usize))],
    actual: Box<dyn Iterator<Item = miette::LabeledSpan> + 'a>,
) {
    let actual = actual
        .map(|span| {
            (
                span.label().map(ToString::to_string),
                (span.offset(), span.len()),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(expected, actual);
}

#[test]
fn missing_if_after_end() {
    let err = parse_err("IF next-is-empty THEN move END");
    assert_eq!(
        SyntaxError::UnexpectedToken {
            expected: "IF",
            found: Found(END_OF_INPUT.to_string()),
            span: SourceSpan::new(30, 30),
        },
        err
    );
    assert_eq!("Expected IF, found end of input", err.to_string());
}

#[test]
fn end_cannot_start_a_statement() {
    let mut ts = TokenStream::from_raw(["END", "IF"]);
    let err = Statement::parse(&mut ts).expect_err("expected Err, got Ok");
    assert_eq!(ErrorKind::InvalidStatementStart, err.kind());
}

#[test]
fn missing_then() {
    let err = parse_err("IF true move END IF");
    assert_eq!(
        SyntaxError::UnexpectedToken {
            expected: "THEN",
            found: Found("move".to_string()),
            span: SourceSpan::new(8, 12),
        },
        err
    );
}

#[test]
fn if_body_not_closed() {
    let err = parse_err("IF true THEN move");
    assert_eq!(
        SyntaxError::UnexpectedToken {
            expected: "ELSE or END",
            found: Found(END_OF_INPUT.to_string()),
            span: SourceSpan::new(17, 17),
        },
        err
    );
}

#[test]
fn else_body_not_closed() {
    let err = parse_err("IF true THEN move ELSE skip ELSE");
    assert_eq!(
        SyntaxError::UnexpectedToken {
            expected: "END",
            found: Found("ELSE".to_string()),
            span: SourceSpan::new(28, 32),
        },
        err
    );
}

#[test]
fn invalid_if_condition() {
    let err = parse_err("IF next-is-hungry THEN move END IF");
    assert_eq!(
        SyntaxError::InvalidCondition {
            construct: "IF",
            found: Found("next-is-hungry".to_string()),
            span: SourceSpan::new(3, 17),
        },
        err
    );
    assert_eq!("IF condition not valid: \"next-is-hungry\"", err.to_string());
}

#[test]
fn invalid_while_condition() {
    let err = parse_err("WHILE DO move END WHILE");
    assert_eq!(ErrorKind::InvalidCondition, err.kind());
    assert_eq!(SourceSpan::new(6, 8), err.span());
}

#[test]
fn missing_do() {
    let err = parse_err("WHILE true THEN move END WHILE");
    assert_eq!(
        SyntaxError::UnexpectedToken {
            expected: "DO",
            found: Found("THEN".to_string()),
            span: SourceSpan::new(11, 15),
        },
        err
    );
}

#[test]
fn while_closed_by_else() {
    let err = parse_err("WHILE true DO move ELSE");
    assert_eq!("Expected END, found \"ELSE\"", err.to_string());
}

#[test]
fn end_not_followed_by_while() {
    let err = parse_err("WHILE true DO move END IF");
    assert_eq!(
        SyntaxError::UnexpectedToken {
            expected: "WHILE",
            found: Found("IF".to_string()),
            span: SourceSpan::new(23, 25),
        },
        err
    );
}

#[test]
fn stray_terminator_at_top_level() {
    let err = parse_err("move END");
    assert_eq!(
        SyntaxError::ExtraToken {
            found: Found("END".to_string()),
            span: SourceSpan::new(5, 8),
        },
        err
    );
}

#[test]
fn first_error_wins() {
    let err = parse_err("IF true THEN BEGIN END WHILE");
    assert_eq!(ErrorKind::InvalidStatementStart, err.kind());
    assert_eq!(SourceSpan::new(13, 18), err.span());
}

#[test]
fn labels_point_at_token() {
    let err = parse_err("IF true THEN move END WHILE");
    let labels = err.labels();
    assert!(labels.is_some());
    assert_labels_eq(&[(Some("here".to_string()), (22, 5))], labels.unwrap());
    assert_eq!(
        Some("bl::unexpected_token".to_string()),
        err.code().map(|c| c.to_string())
    );
}

#[test]
fn nesting_past_the_limit() {
    const LEVELS: usize = 20_000;
    let source = format!(
        "{}move {}",
        "WHILE true DO ".repeat(LEVELS),
        "END WHILE ".repeat(LEVELS)
    );
    let err = parse_err(&source);
    let at = MAX_NESTING * "WHILE true DO ".len();
    assert_eq!(
        SyntaxError::NestingTooDeep {
            limit: MAX_NESTING,
            found: Found("WHILE".to_string()),
            span: SourceSpan::new(at, at + "WHILE".len()),
        },
        err
    );
    assert_eq!(
        Some("bl::nesting_too_deep".to_string()),
        err.code().map(|c| c.to_string())
    );
}
