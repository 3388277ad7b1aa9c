//! Formula Abstract Syntax Tree types

use microcalc_core::{CellAddress, CellRange};

/// Formula expression AST
///
/// Nodes that can fail during evaluation record the 1-based position at
/// which the failure is reported.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    /// Numeric literal
    Number(f64),

    /// Single cell reference
    CellRef {
        address: CellAddress,
        position: usize,
    },

    /// Rectangular range, evaluated as the sum of its cells
    RangeSum { range: CellRange, position: usize },

    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
        position: usize,
    },

    /// Unary minus
    Negate(Box<FormulaExpr>),

    /// One-argument function call (name is uppercase)
    Function {
        name: String,
        arg: Box<FormulaExpr>,
        position: usize,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl FormulaExpr {
    /// Whether the expression reads any other cell, directly or through a range
    pub fn has_references(&self) -> bool {
        match self {
            FormulaExpr::CellRef { .. } | FormulaExpr::RangeSum { .. } => true,
            FormulaExpr::BinaryOp { left, right, .. } => {
                left.has_references() || right.has_references()
            }
            FormulaExpr::Negate(operand) => operand.has_references(),
            FormulaExpr::Function { arg, .. } => arg.has_references(),
            FormulaExpr::Number(_) => false,
        }
    }
}
