//! FILENAME: engine/src/error.rs
//! PURPOSE: The engine's two error algebras — in-band cell values and
//! out-of-band Sheet-boundary failures — kept as separate closed types.
//! CONTEXT: A `FormulaError` is a `CellValue`, produced and propagated by
//! `evaluate`, never by `?`. A `SheetError` is returned by `Result`-typed
//! Sheet methods and is the only place this crate uses `thiserror`,
//! mirroring the error-enum style the surrounding workspace uses in its
//! own persistence and format crates.

use crate::position::Position;

/// The three error categories a formula can evaluate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FormulaError {
    /// A formula dereferences a position that is invalid or was deleted.
    Ref,
    /// A cell reached through a reference cannot be interpreted as a number.
    Value,
    /// Division by zero, or a non-finite arithmetic result.
    Div0,
}

impl std::fmt::Display for FormulaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FormulaError::Ref => "#REF!",
            FormulaError::Value => "#VALUE!",
            FormulaError::Div0 => "#DIV/0!",
        };
        write!(f, "{}", text)
    }
}

/// The result of evaluating an expression tree: a number, or an error.
/// Distinct from `CellValue` because a cell can also hold arbitrary text,
/// which is never something `evaluate` itself produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvalValue {
    Number(f64),
    Error(FormulaError),
}

impl EvalValue {
    pub fn to_cell_value(self) -> CellValue {
        match self {
            EvalValue::Number(n) => CellValue::Number(n),
            EvalValue::Error(e) => CellValue::Error(e),
        }
    }
}

/// The value held by a cell, or produced by evaluating a formula.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Error(FormulaError),
}

impl CellValue {
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_value_round_trips_through_json() {
        for value in [
            CellValue::Text("hello".to_string()),
            CellValue::Number(42.5),
            CellValue::Error(FormulaError::Div0),
        ] {
            let json = serde_json::to_string(&value).unwrap();
            let back: CellValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn position_round_trips_through_json() {
        let pos = Position::new(12, 300);
        let json = serde_json::to_string(&pos).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos);
    }
}

/// Failures surfaced synchronously by the Sheet's public methods.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SheetError {
    #[error("invalid position: {0}")]
    InvalidPosition(Position),

    #[error("formula error: {0}")]
    FormulaException(String),

    #[error("circular dependency detected")]
    CircularDependency,

    #[error("table too big: {0}")]
    TableTooBig(String),
}

pub type SheetResult<T> = Result<T, SheetError>;
