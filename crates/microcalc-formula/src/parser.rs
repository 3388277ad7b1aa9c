//! Formula parser
//!
//! A recursive descent parser over the MicroCalc expression grammar:
//!
//! ```text
//! expression   := simple (('+' | '-') simple)*
//! simple       := term (('*' | '/') term)*
//! term         := signed ('^' signed)*
//! signed       := '-'? factor
//! factor       := number | '(' expression ')' | name '(' expression ')'
//!               | address ('>' address)?
//! ```
//!
//! Every level is left-associative, exponentiation included.

use crate::ast::{BinaryOperator, FormulaExpr};
use crate::error::{FormulaError, FormulaResult};
use microcalc_core::{CellAddress, CellRange};

/// Trim an expression and apply the leading-sign shorthands
///
/// A leading `.` gets a `0` prefix; a leading `+` is dropped.
pub fn normalize(text: &str) -> String {
    let text = text.trim();
    if text.starts_with('.') {
        format!("0{}", text)
    } else if let Some(rest) = text.strip_prefix('+') {
        rest.to_string()
    } else {
        text.to_string()
    }
}

/// Parse an expression into an AST
///
/// Error positions are 1-based character offsets into the normalized text.
///
/// # Example
/// ```rust
/// use microcalc_formula::parse_formula;
///
/// let ast = parse_formula("2+3*4").unwrap();
/// assert!(!ast.has_references());
///
/// let ast = parse_formula("SQRT(A1>B3)").unwrap();
/// assert!(ast.has_references());
///
/// let err = parse_formula("A1+").unwrap_err();
/// assert_eq!(err.position(), 4);
/// ```
pub fn parse_formula(text: &str) -> FormulaResult<FormulaExpr> {
    if text.trim().is_empty() {
        return Err(FormulaError::parse("expression is empty", 1));
    }

    let normalized = normalize(text);
    let mut parser = FormulaParser::new(&normalized);
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    parser.skip_whitespace();
    if !parser.is_at_end() {
        return Err(parser.error("unexpected character"));
    }

    Ok(expr)
}

/// Formula parser
struct FormulaParser<'a> {
    input: &'a str,
    /// Byte offset of the next unread character
    pos: usize,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek_char().map_or(false, &pred) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        self.advance_while(char::is_whitespace);
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// 1-based character position of the next unread character
    fn position(&self) -> usize {
        self.input[..self.pos].chars().count() + 1
    }

    fn error(&self, message: &str) -> FormulaError {
        FormulaError::parse(message, self.position())
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> FormulaResult<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(&format!("'{}' expected", expected)))
        }
    }

    fn binary(&self, op: BinaryOperator, left: FormulaExpr, right: FormulaExpr) -> FormulaExpr {
        FormulaExpr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            position: self.position(),
        }
    }

    // === Expression parsing with precedence ===

    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_simple_expression()?;

        loop {
            self.skip_whitespace();
            let op = match self.peek_char() {
                Some('+') => BinaryOperator::Add,
                Some('-') => BinaryOperator::Subtract,
                _ => break,
            };

            self.advance();
            let right = self.parse_simple_expression()?;
            left = self.binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_simple_expression(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_term()?;

        loop {
            self.skip_whitespace();
            let op = match self.peek_char() {
                Some('*') => BinaryOperator::Multiply,
                Some('/') => BinaryOperator::Divide,
                _ => break,
            };

            self.advance();
            // parse_term stops after the divisor's trailing whitespace,
            // which is where a division by zero gets reported
            let right = self.parse_term()?;
            left = self.binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_signed_factor()?;

        loop {
            self.skip_whitespace();
            if !self.eat('^') {
                return Ok(left);
            }

            let right = self.parse_signed_factor()?;
            left = self.binary(BinaryOperator::Power, left, right);
        }
    }

    fn parse_signed_factor(&mut self) -> FormulaResult<FormulaExpr> {
        self.skip_whitespace();
        if self.eat('-') {
            let operand = self.parse_factor()?;
            return Ok(FormulaExpr::Negate(Box::new(operand)));
        }

        self.parse_factor()
    }

    fn parse_factor(&mut self) -> FormulaResult<FormulaExpr> {
        self.skip_whitespace();

        match self.peek_char() {
            None => Err(self.error("unexpected end of expression")),
            Some('(') => {
                self.advance();
                let inner = self.parse_expression()?;
                self.skip_whitespace();
                self.expect(')')?;
                Ok(inner)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(),
            Some(c) if c.is_alphabetic() => self.parse_reference_or_call(c),
            Some(_) => Err(self.error("operand expected")),
        }
    }

    fn parse_number(&mut self) -> FormulaResult<FormulaExpr> {
        let start = self.pos;

        // Integer part
        self.advance_while(|c| c.is_ascii_digit());

        // Decimal part
        if self.eat('.') {
            self.advance_while(|c| c.is_ascii_digit());
        }

        // Exponent part
        if matches!(self.peek_char(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.advance();
            }
            let digits = self.pos;
            self.advance_while(|c| c.is_ascii_digit());
            if self.pos == digits {
                return Err(self.error("exponent expected"));
            }
        }

        self.input[start..self.pos]
            .parse()
            .map(FormulaExpr::Number)
            .map_err(|_| self.error("invalid number"))
    }

    /// A letter naming a column and followed by a digit starts a reference;
    /// anything else is a function name
    fn parse_reference_or_call(&mut self, first: char) -> FormulaResult<FormulaExpr> {
        let starts_address = CellAddress::is_column_in_range(first)
            && self.peek_char_at(1).is_some_and(|c| c.is_ascii_digit());

        if starts_address {
            let from = self.parse_cell_address()?;
            self.skip_whitespace();
            if self.eat('>') {
                let to = self.parse_cell_address()?;
                return Ok(FormulaExpr::RangeSum {
                    range: CellRange::new(from, to),
                    position: self.position(),
                });
            }
            return Ok(FormulaExpr::CellRef {
                address: from,
                position: self.position(),
            });
        }

        let name = self.parse_name();
        self.skip_whitespace();
        self.expect('(')?;
        let arg = self.parse_expression()?;
        self.skip_whitespace();
        self.expect(')')?;

        Ok(FormulaExpr::Function {
            name,
            arg: Box::new(arg),
            position: self.position(),
        })
    }

    fn parse_cell_address(&mut self) -> FormulaResult<CellAddress> {
        self.skip_whitespace();

        let letter = match self.peek_char() {
            Some(c) if c.is_alphabetic() => c,
            _ => return Err(self.error("column expected")),
        };
        if !CellAddress::is_column_in_range(letter) {
            return Err(FormulaError::range("invalid column", self.position()));
        }
        self.advance();

        let digits = self.pos;
        self.advance_while(|c| c.is_ascii_digit());
        if self.pos == digits {
            return Err(self.error("row expected"));
        }

        let row: u32 = self.input[digits..self.pos]
            .parse()
            .map_err(|_| FormulaError::range("invalid row", self.position()))?;

        CellAddress::new(letter, row)
            .map_err(|_| FormulaError::range("row out of range", self.position()))
    }

    fn parse_name(&mut self) -> String {
        let start = self.pos;
        self.advance_while(char::is_alphabetic);
        self.input[start..self.pos].to_uppercase()
    }
}
