//! FILENAME: engine/src/formula.rs
//! PURPOSE: Wraps a parsed expression tree together with its reference set.
//! CONTEXT: `Formula::parse` is the only place this crate calls into the
//! `parser` crate; everything downstream (evaluation, canonical text,
//! structural-edit rewrites) works against the resolved `Expr` tree.

use crate::error::{EvalValue, SheetError, SheetResult};
use crate::expr::{CellLookup, Expr};
use crate::position::Position;

/// What a structural edit did to a formula's reference set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlingResult {
    NothingChanged,
    ReferencesRenamedOnly,
    ReferencesChanged,
}

/// A parsed formula: an expression tree plus the sorted, deduplicated
/// positions it reads from.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    root: Expr,
    references: Vec<Position>,
}

impl Formula {
    /// Parses formula source (without the leading `=`) into a `Formula`.
    /// Fails if the grammar rejects the text, or if any cell reference in
    /// it names an invalid position.
    pub fn parse(source: &str) -> SheetResult<Formula> {
        let parsed = parser::parse(source).map_err(|e| {
            log::debug!("formula rejected: {}", e.message);
            SheetError::FormulaException(e.message)
        })?;

        let mut references = Vec::new();
        let root = Expr::from_parsed(&parsed, &mut references);

        references.sort();
        references.dedup();

        if let Some(bad) = references.iter().find(|p| !p.is_valid()) {
            log::debug!("formula rejected: invalid reference {:?}", bad);
            return Err(SheetError::FormulaException(format!(
                "invalid cell reference in formula: {}",
                source
            )));
        }

        Ok(Formula { root, references })
    }

    pub fn evaluate(&self, sheet: &dyn CellLookup) -> EvalValue {
        self.root.evaluate(sheet)
    }

    pub fn expression_text(&self) -> String {
        self.root.to_text()
    }

    pub fn referenced_cells(&self) -> &[Position] {
        &self.references
    }

    pub fn handle_inserted_rows(&mut self, before: i32, count: i32) -> HandlingResult {
        let mut changed = false;
        for pos in &mut self.references {
            if pos.row >= before {
                pos.row += count;
                changed = true;
            }
        }
        self.root.shift_rows(before, count);

        if changed {
            HandlingResult::ReferencesRenamedOnly
        } else {
            HandlingResult::NothingChanged
        }
    }

    pub fn handle_inserted_cols(&mut self, before: i32, count: i32) -> HandlingResult {
        let mut changed = false;
        for pos in &mut self.references {
            if pos.col >= before {
                pos.col += count;
                changed = true;
            }
        }
        self.root.shift_cols(before, count);

        if changed {
            HandlingResult::ReferencesRenamedOnly
        } else {
            HandlingResult::NothingChanged
        }
    }

    pub fn handle_deleted_rows(&mut self, first: i32, count: i32) -> HandlingResult {
        let (changed, deleted) = rewrite_references(&mut self.references, first, count, |p| p.row, |p, v| p.row = v);
        self.root.delete_rows(first, count);
        resolve_handling_result(changed, deleted)
    }

    pub fn handle_deleted_cols(&mut self, first: i32, count: i32) -> HandlingResult {
        let (changed, deleted) = rewrite_references(&mut self.references, first, count, |p| p.col, |p, v| p.col = v);
        self.root.delete_cols(first, count);
        resolve_handling_result(changed, deleted)
    }
}

fn resolve_handling_result(changed: bool, deleted: bool) -> HandlingResult {
    if deleted {
        HandlingResult::ReferencesChanged
    } else if changed {
        HandlingResult::ReferencesRenamedOnly
    } else {
        HandlingResult::NothingChanged
    }
}

/// Shared renamed/deleted bookkeeping for `handle_deleted_rows`/`_cols`:
/// references at or past the deleted range shift down by `count`;
/// references inside it are dropped from the reference set entirely
/// (the tree-level invalidation is handled separately by the caller).
fn rewrite_references(
    references: &mut Vec<Position>,
    first: i32,
    count: i32,
    axis: impl Fn(&Position) -> i32,
    set_axis: impl Fn(&mut Position, i32),
) -> (bool, bool) {
    let mut changed = false;
    let mut deleted = false;

    references.retain_mut(|pos| {
        let value = axis(pos);
        if value >= first + count {
            set_axis(pos, value - count);
            changed = true;
            true
        } else if value >= first {
            deleted = true;
            false
        } else {
            true
        }
    });

    (changed, deleted)
}
