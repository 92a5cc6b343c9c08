//! FILENAME: engine/src/expr.rs
//! PURPOSE: The resolved, evaluable, rewritable expression tree.
//! CONTEXT: `parser::Expression` is pure syntax — a cell reference there
//! is just the text that matched the CELL token. This module turns that
//! into `Expr`, whose `CellRef` holds a resolved `Position` that later
//! structural edits can mutate in place (including setting it to the
//! `-1` sentinel when a deletion removes the cell it named). Kept as a
//! closed tagged-variant tree with exhaustive match arms in place of the
//! downcasting visitor the reference implementation used.

use crate::error::{CellValue, EvalValue, FormulaError};
use crate::position::Position;
use parser::{BinaryOperator as ParsedBinaryOp, Expression as ParsedExpr, UnaryOperator as ParsedUnaryOp};

/// A sign applied to a sub-expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

/// The four arithmetic binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// The resolved expression tree a `Formula` owns and evaluates.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(f64),
    CellRef(Position),
    Unary(Sign, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Paren(Box<Expr>),
}

/// Anything an `Expr` can read cell values from. `Sheet` is the only
/// implementer; the trait exists so this module doesn't need to know
/// about sheets, cells, or sparse storage.
pub trait CellLookup {
    fn value_at(&self, pos: Position) -> Option<CellValue>;
}

impl Expr {
    /// Builds an `Expr` from a parsed `parser::Expression`, collecting
    /// every `CellRef` position encountered along the way (duplicates and
    /// ordering are the caller's concern — `Formula::parse` sorts and dedupes).
    pub fn from_parsed(parsed: &ParsedExpr, refs: &mut Vec<Position>) -> Expr {
        match parsed {
            ParsedExpr::Literal(n) => Expr::Literal(*n),
            ParsedExpr::CellRef(text) => {
                let pos = Position::from_text(text);
                refs.push(pos);
                Expr::CellRef(pos)
            }
            ParsedExpr::Unary(op, child) => {
                let sign = match op {
                    ParsedUnaryOp::Plus => Sign::Plus,
                    ParsedUnaryOp::Minus => Sign::Minus,
                };
                Expr::Unary(sign, Box::new(Expr::from_parsed(child, refs)))
            }
            ParsedExpr::Binary(op, lhs, rhs) => {
                let op = match op {
                    ParsedBinaryOp::Add => BinaryOp::Add,
                    ParsedBinaryOp::Sub => BinaryOp::Sub,
                    ParsedBinaryOp::Mul => BinaryOp::Mul,
                    ParsedBinaryOp::Div => BinaryOp::Div,
                };
                Expr::Binary(
                    op,
                    Box::new(Expr::from_parsed(lhs, refs)),
                    Box::new(Expr::from_parsed(rhs, refs)),
                )
            }
            ParsedExpr::Paren(child) => Expr::Paren(Box::new(Expr::from_parsed(child, refs))),
        }
    }

    /// Evaluates the tree against a sheet. Errors from any sub-expression
    /// propagate outward by early return, left operand first.
    pub fn evaluate(&self, sheet: &dyn CellLookup) -> EvalValue {
        match self {
            Expr::Literal(v) => EvalValue::Number(*v),

            Expr::CellRef(pos) => {
                if !pos.is_valid() {
                    return EvalValue::Error(FormulaError::Ref);
                }
                match sheet.value_at(*pos) {
                    None => EvalValue::Number(0.0),
                    Some(CellValue::Number(n)) => EvalValue::Number(n),
                    Some(CellValue::Text(s)) if s.is_empty() => EvalValue::Number(0.0),
                    Some(CellValue::Text(_)) => EvalValue::Error(FormulaError::Value),
                    Some(CellValue::Error(e)) => EvalValue::Error(e),
                }
            }

            Expr::Unary(sign, child) => match child.evaluate(sheet) {
                EvalValue::Error(e) => EvalValue::Error(e),
                EvalValue::Number(n) => match sign {
                    Sign::Plus => EvalValue::Number(n),
                    Sign::Minus => EvalValue::Number(-n),
                },
            },

            Expr::Binary(op, lhs, rhs) => {
                let l = match lhs.evaluate(sheet) {
                    EvalValue::Error(e) => return EvalValue::Error(e),
                    EvalValue::Number(n) => n,
                };
                let r = match rhs.evaluate(sheet) {
                    EvalValue::Error(e) => return EvalValue::Error(e),
                    EvalValue::Number(n) => n,
                };

                let result = match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => {
                        if r == 0.0 {
                            return EvalValue::Error(FormulaError::Div0);
                        }
                        l / r
                    }
                };

                if !result.is_finite() {
                    return EvalValue::Error(FormulaError::Div0);
                }
                EvalValue::Number(result)
            }

            Expr::Paren(child) => child.evaluate(sheet),
        }
    }

    /// Renders the canonical, minimally-parenthesized source text.
    pub fn to_text(&self) -> String {
        match self {
            Expr::Literal(v) => format_number(*v),
            Expr::CellRef(pos) => {
                if pos.is_valid() {
                    pos.to_text()
                } else {
                    FormulaError::Ref.to_string()
                }
            }
            Expr::Unary(sign, child) => {
                let sign_text = match sign {
                    Sign::Plus => "+",
                    Sign::Minus => "-",
                };
                format!("{}{}", sign_text, child.to_text())
            }
            Expr::Binary(op, lhs, rhs) => binary_to_text(*op, lhs, rhs),
            Expr::Paren(body) => match body.as_ref() {
                Expr::Literal(_) | Expr::Paren(_) | Expr::CellRef(_) => body.to_text(),
                _ => format!("({})", body.to_text()),
            },
        }
    }

    /// Walks every `CellRef` reachable from this node, mutating its row
    /// when `before <= row`. Mirrors the reference implementation's
    /// `ModifyStatementRowPositions` tree walk.
    pub fn shift_rows(&mut self, before: i32, count: i32) {
        match self {
            Expr::CellRef(pos) => {
                if pos.row >= before {
                    pos.row += count;
                }
            }
            Expr::Binary(_, lhs, rhs) => {
                lhs.shift_rows(before, count);
                rhs.shift_rows(before, count);
            }
            Expr::Unary(_, child) | Expr::Paren(child) => child.shift_rows(before, count),
            Expr::Literal(_) => {}
        }
    }

    /// Column counterpart of `shift_rows`.
    pub fn shift_cols(&mut self, before: i32, count: i32) {
        match self {
            Expr::CellRef(pos) => {
                if pos.col >= before {
                    pos.col += count;
                }
            }
            Expr::Binary(_, lhs, rhs) => {
                lhs.shift_cols(before, count);
                rhs.shift_cols(before, count);
            }
            Expr::Unary(_, child) | Expr::Paren(child) => child.shift_cols(before, count),
            Expr::Literal(_) => {}
        }
    }

    /// Shifts references above the deleted range up, and invalidates
    /// (row = -1) any `CellRef` that falls inside it. Mirrors
    /// `DeleteStatementRowPositions`.
    pub fn delete_rows(&mut self, first: i32, count: i32) {
        match self {
            Expr::CellRef(pos) => {
                if pos.row >= first + count {
                    pos.row -= count;
                } else if pos.row >= first {
                    pos.row = -1;
                }
            }
            Expr::Binary(_, lhs, rhs) => {
                lhs.delete_rows(first, count);
                rhs.delete_rows(first, count);
            }
            Expr::Unary(_, child) | Expr::Paren(child) => child.delete_rows(first, count),
            Expr::Literal(_) => {}
        }
    }

    /// Column counterpart of `delete_rows`.
    pub fn delete_cols(&mut self, first: i32, count: i32) {
        match self {
            Expr::CellRef(pos) => {
                if pos.col >= first + count {
                    pos.col -= count;
                } else if pos.col >= first {
                    pos.col = -1;
                }
            }
            Expr::Binary(_, lhs, rhs) => {
                lhs.delete_cols(first, count);
                rhs.delete_cols(first, count);
            }
            Expr::Unary(_, child) | Expr::Paren(child) => child.delete_cols(first, count),
            Expr::Literal(_) => {}
        }
    }
}

/// Applies the §4.B canonical-printing rules for a binary node, inspecting
/// only the direct children's top-level operator.
fn binary_to_text(op: BinaryOp, lhs: &Expr, rhs: &Expr) -> String {
    let left_text = render_left(op, lhs);
    let right_text = render_right(op, rhs);
    let op_text = match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
    };
    format!("{}{}{}", left_text, op_text, right_text)
}

fn top_level_op(expr: &Expr) -> Option<BinaryOp> {
    match expr {
        Expr::Paren(body) => match body.as_ref() {
            Expr::Binary(op, _, _) => Some(*op),
            _ => None,
        },
        _ => None,
    }
}

fn strip_parens(expr: &Expr) -> String {
    match expr {
        Expr::Paren(body) => body.to_text(),
        other => other.to_text(),
    }
}

fn render_left(op: BinaryOp, lhs: &Expr) -> String {
    let drop = match (op, top_level_op(lhs)) {
        (BinaryOp::Add | BinaryOp::Sub, Some(BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div)) => true,
        (BinaryOp::Mul, Some(BinaryOp::Mul)) => true,
        (BinaryOp::Div, Some(BinaryOp::Mul | BinaryOp::Div)) => true,
        _ => false,
    };
    if drop {
        strip_parens(lhs)
    } else {
        lhs.to_text()
    }
}

fn render_right(op: BinaryOp, rhs: &Expr) -> String {
    let drop = match (op, top_level_op(rhs)) {
        (BinaryOp::Add, Some(_)) => true,
        (BinaryOp::Sub, Some(inner)) => !matches!(inner, BinaryOp::Add | BinaryOp::Sub),
        (BinaryOp::Mul, Some(BinaryOp::Mul | BinaryOp::Div)) => true,
        (BinaryOp::Div, _) => false,
        _ => false,
    };
    if drop {
        strip_parens(rhs)
    } else {
        rhs.to_text()
    }
}

/// Default double formatting, matching what the reference implementation's
/// stream insertion produces for the stable inputs this grammar targets
/// (integers and one-decimal values print without a trailing `.0`-style
/// artifact beyond what Rust's own `Display` for `f64` already gives).
fn format_number(v: f64) -> String {
    format!("{}", v)
}
