//! Formula evaluator
//!
//! Evaluates formula ASTs against a [`Grid`].
//!
//! Reading a referenced cell is a resolve-and-memoize step: when the cell
//! holds an accepted expression, its contents are parsed and evaluated again
//! and the fresh value is written back into the cell before it is used.

use crate::ast::{BinaryOperator, FormulaExpr};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionRegistry;
use crate::parser::parse_formula;
use microcalc_core::{CellAddress, CellFlags, CellRange, Grid};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::trace;

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// The shared registry of built-in functions
pub fn function_registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Result of a successful evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    /// The expression referenced at least one cell or range
    pub is_formula: bool,
}

/// Evaluate an expression against a grid
///
/// Referenced expression cells are re-evaluated and their cached values
/// refreshed as a side effect.
///
/// # Example
/// ```rust
/// use microcalc_core::{CellAddress, Grid};
/// use microcalc_formula::evaluate;
///
/// let mut grid = Grid::new();
/// let a1 = CellAddress::parse("A1").unwrap();
/// grid.cell_mut(a1).set_expression("10", 10.0, false);
///
/// let result = evaluate("A1*2+1", &mut grid).unwrap();
/// assert_eq!(result.value, 21.0);
/// assert!(result.is_formula);
/// ```
pub fn evaluate(text: &str, grid: &mut Grid) -> FormulaResult<Evaluation> {
    EvaluationContext::new(grid).evaluate(text)
}

/// State for one top-level evaluation
///
/// Holds the set of cells currently being resolved; it starts empty and is
/// emptied again as nested resolution unwinds.
pub struct EvaluationContext<'a> {
    grid: &'a mut Grid,
    resolving: HashSet<CellAddress>,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(grid: &'a mut Grid) -> Self {
        Self {
            grid,
            resolving: HashSet::new(),
        }
    }

    /// Parse and evaluate `text`
    pub fn evaluate(&mut self, text: &str) -> FormulaResult<Evaluation> {
        let expr = parse_formula(text)?;
        let value = self.evaluate_expr(&expr)?;
        Ok(Evaluation {
            value,
            is_formula: expr.has_references(),
        })
    }

    /// Evaluate a parsed expression
    pub fn evaluate_expr(&mut self, expr: &FormulaExpr) -> FormulaResult<f64> {
        match expr {
            FormulaExpr::Number(n) => Ok(*n),

            FormulaExpr::CellRef { address, position } => self.resolve_cell(*address, *position),

            FormulaExpr::RangeSum { range, position } => self.sum_range(range, *position),

            FormulaExpr::BinaryOp {
                op,
                left,
                right,
                position,
            } => {
                let left = self.evaluate_expr(left)?;
                let right = self.evaluate_expr(right)?;
                apply_binary(*op, left, right, *position)
            }

            FormulaExpr::Negate(operand) => Ok(-self.evaluate_expr(operand)?),

            FormulaExpr::Function {
                name,
                arg,
                position,
            } => {
                let arg = self.evaluate_expr(arg)?;
                apply_function(name, arg, *position)
            }
        }
    }

    fn sum_range(&mut self, range: &CellRange, position: usize) -> FormulaResult<f64> {
        let mut sum = 0.0;
        for address in range.cells() {
            sum += self.resolve_cell(address, position)?;
        }
        Ok(sum)
    }

    /// Read a cell's value, re-evaluating expression cells
    fn resolve_cell(&mut self, address: CellAddress, position: usize) -> FormulaResult<f64> {
        if !self.resolving.insert(address) {
            return Err(FormulaError::CyclicReference { address, position });
        }

        let result = self.resolve_cell_inner(address);
        self.resolving.remove(&address);
        result
    }

    fn resolve_cell_inner(&mut self, address: CellAddress) -> FormulaResult<f64> {
        let cell = self.grid.cell(address);

        if cell.is_text() {
            return Ok(0.0);
        }

        if cell.flags().contains(CellFlags::CONSTANT) && !cell.contents().trim().is_empty() {
            let contents = cell.contents().to_string();
            trace!(%address, contents = %contents, "resolving nested cell");

            let expr = parse_formula(&contents)?;
            let value = self.evaluate_expr(&expr)?;
            self.grid.cell_mut(address).set_value(value);
            return Ok(value);
        }

        Ok(cell.value())
    }
}

fn apply_binary(op: BinaryOperator, left: f64, right: f64, position: usize) -> FormulaResult<f64> {
    Ok(match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Subtract => left - right,
        BinaryOperator::Multiply => left * right,
        BinaryOperator::Divide => {
            if right.abs() < f64::MIN_POSITIVE {
                return Err(FormulaError::DivisionByZero { position });
            }
            left / right
        }
        BinaryOperator::Power => left.powf(right),
    })
}

fn apply_function(name: &str, arg: f64, position: usize) -> FormulaResult<f64> {
    let def = function_registry()
        .get(name)
        .ok_or_else(|| FormulaError::UnknownFunction {
            name: name.to_string(),
            position,
        })?;

    (def.implementation)(arg).ok_or_else(|| FormulaError::Domain {
        function: def.name.to_string(),
        expected: def.domain,
        position,
    })
}
