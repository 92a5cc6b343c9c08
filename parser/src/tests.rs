//! FILENAME: parser/src/tests.rs
//! PURPOSE: Consolidated unit tests for the parser crate.

use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::lexer::Lexer;
use crate::parser::parse;
use crate::token::Token;

// ========================================
// LEXER TESTS
// ========================================

#[test]
fn lexer_tokenizes_simple_math() {
    let mut lexer = Lexer::new("1 + 2");
    assert_eq!(lexer.next_token(), Token::Number(1.0));
    assert_eq!(lexer.next_token(), Token::Plus);
    assert_eq!(lexer.next_token(), Token::Number(2.0));
    assert_eq!(lexer.next_token(), Token::EOF);
}

#[test]
fn lexer_tokenizes_cell_reference() {
    let mut lexer = Lexer::new("A1+BC17");
    assert_eq!(lexer.next_token(), Token::Cell("A1".to_string()));
    assert_eq!(lexer.next_token(), Token::Plus);
    assert_eq!(lexer.next_token(), Token::Cell("BC17".to_string()));
    assert_eq!(lexer.next_token(), Token::EOF);
}

#[test]
fn lexer_letters_with_no_digits_still_a_cell_token() {
    // Shape validation happens downstream (Position::from_text); the lexer
    // just groups the letter run with whatever digits follow, if any.
    let mut lexer = Lexer::new("ABC");
    assert_eq!(lexer.next_token(), Token::Cell("ABC".to_string()));
}

#[test]
fn lexer_skips_whitespace() {
    let mut lexer = Lexer::new("  1   +   2  ");
    assert_eq!(lexer.next_token(), Token::Number(1.0));
    assert_eq!(lexer.next_token(), Token::Plus);
    assert_eq!(lexer.next_token(), Token::Number(2.0));
    assert_eq!(lexer.next_token(), Token::EOF);
}

#[test]
fn lexer_reads_decimal_number() {
    let mut lexer = Lexer::new("3.5");
    assert_eq!(lexer.next_token(), Token::Number(3.5));
}

#[test]
fn lexer_flags_illegal_character() {
    let mut lexer = Lexer::new("1 & 2");
    assert_eq!(lexer.next_token(), Token::Number(1.0));
    assert_eq!(lexer.next_token(), Token::Illegal('&'));
}

// ========================================
// PARSER TESTS
// ========================================

#[test]
fn parses_single_literal() {
    assert_eq!(parse("42").unwrap(), Expression::Literal(42.0));
}

#[test]
fn parses_single_cell_ref() {
    assert_eq!(parse("A1").unwrap(), Expression::CellRef("A1".to_string()));
}

#[test]
fn parses_additive_left_associative() {
    // 1 + 2 - 3 => (1 + 2) - 3
    let expr = parse("1 + 2 - 3").unwrap();
    assert_eq!(
        expr,
        Expression::Binary(
            BinaryOperator::Sub,
            Box::new(Expression::Binary(
                BinaryOperator::Add,
                Box::new(Expression::Literal(1.0)),
                Box::new(Expression::Literal(2.0)),
            )),
            Box::new(Expression::Literal(3.0)),
        )
    );
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    // 1 + 2 * 3 => 1 + (2 * 3)
    let expr = parse("1+2*3").unwrap();
    assert_eq!(
        expr,
        Expression::Binary(
            BinaryOperator::Add,
            Box::new(Expression::Literal(1.0)),
            Box::new(Expression::Binary(
                BinaryOperator::Mul,
                Box::new(Expression::Literal(2.0)),
                Box::new(Expression::Literal(3.0)),
            )),
        )
    );
}

#[test]
fn parses_parenthesized_subexpression() {
    // (1+2)*3
    let expr = parse("(1+2)*3").unwrap();
    assert_eq!(
        expr,
        Expression::Binary(
            BinaryOperator::Mul,
            Box::new(Expression::Paren(Box::new(Expression::Binary(
                BinaryOperator::Add,
                Box::new(Expression::Literal(1.0)),
                Box::new(Expression::Literal(2.0)),
            )))),
            Box::new(Expression::Literal(3.0)),
        )
    );
}

#[test]
fn parses_unary_minus() {
    let expr = parse("-5").unwrap();
    assert_eq!(
        expr,
        Expression::Unary(UnaryOperator::Minus, Box::new(Expression::Literal(5.0)))
    );
}

#[test]
fn parses_chained_unary() {
    let expr = parse("--5").unwrap();
    assert_eq!(
        expr,
        Expression::Unary(
            UnaryOperator::Minus,
            Box::new(Expression::Unary(
                UnaryOperator::Minus,
                Box::new(Expression::Literal(5.0)),
            )),
        )
    );
}

#[test]
fn rejects_empty_expression() {
    assert!(parse("").is_err());
}

#[test]
fn rejects_trailing_garbage() {
    assert!(parse("1 + 2 3").is_err());
}

#[test]
fn rejects_unclosed_paren() {
    assert!(parse("(1+2").is_err());
}

#[test]
fn rejects_illegal_character() {
    assert!(parse("1 & 2").is_err());
}

#[test]
fn rejects_dangling_operator() {
    assert!(parse("1 +").is_err());
}
