//! # microcalc-formula
//!
//! Formula parser and evaluator for MicroCalc.
//!
//! This crate provides:
//! - Formula parsing (text → AST) with 1-based error positions
//! - Formula evaluation (AST → number) against a [`Grid`](microcalc_core::Grid),
//!   including recursive resolution of referenced formula cells and cycle detection
//! - The built-in one-argument math functions
//!
//! ## Example
//!
//! ```rust
//! use microcalc_core::Grid;
//! use microcalc_formula::evaluate;
//!
//! let mut grid = Grid::new();
//! let result = evaluate("2+3*4", &mut grid).unwrap();
//! assert_eq!(result.value, 14.0);
//! assert!(!result.is_formula);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;

pub use ast::{BinaryOperator, FormulaExpr};
pub use error::{FormulaError, FormulaErrorKind, FormulaResult};
pub use evaluator::{evaluate, function_registry, Evaluation, EvaluationContext};
pub use functions::{FunctionDef, FunctionRegistry};
pub use parser::{normalize, parse_formula};
