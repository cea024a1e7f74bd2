//! Formula evaluator
//!
//! Recursively computes the numeric value of an expression tree against a
//! live cell source.

use crate::ast::{BinaryOperator, FormulaExpr};
use crate::error::FormulaResult;

/// Source of numeric cell values during evaluation
///
/// The sheet implements this; tests substitute fixed maps. The reference is
/// the raw identifier from the expression tree, in the plain address string
/// form.
pub trait ReferenceResolver {
    /// The numeric value of the referenced cell.
    ///
    /// Expected failures: the identifier is not a valid address, the cell
    /// holds text, or the cell's own formula is in an error state.
    fn resolve_reference(&self, reference: &str) -> FormulaResult<f64>;
}

/// Evaluate an expression tree to a number
///
/// Arithmetic follows IEEE double-precision semantics throughout: division by
/// zero is not trapped, overflow and NaN propagate as the platform produces
/// them.
pub fn evaluate(expr: &FormulaExpr, cells: &dyn ReferenceResolver) -> FormulaResult<f64> {
    match expr {
        FormulaExpr::Reference(name) => cells.resolve_reference(name),
        FormulaExpr::BinaryOp { op, left, right } => {
            let left = evaluate(left, cells)?;
            let right = evaluate(right, cells)?;
            Ok(match op {
                BinaryOperator::Add => left + right,
                BinaryOperator::Subtract => left - right,
                BinaryOperator::Multiply => left * right,
                BinaryOperator::Divide => left / right,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormulaError;
    use crate::parser::parse_formula;
    use std::collections::HashMap;

    struct FixedCells(HashMap<&'static str, f64>);

    impl ReferenceResolver for FixedCells {
        fn resolve_reference(&self, reference: &str) -> FormulaResult<f64> {
            self.0
                .get(reference)
                .copied()
                .ok_or_else(|| FormulaError::NotNumeric(reference.to_string()))
        }
    }

    fn cells() -> FixedCells {
        FixedCells(HashMap::from([("A1", 6.0), ("B2", 3.0), ("C3", 2.0)]))
    }

    fn eval(formula: &str) -> FormulaResult<f64> {
        evaluate(&parse_formula(formula).unwrap(), &cells())
    }

    #[test]
    fn test_evaluate_operators() {
        assert_eq!(eval("=A1+B2").unwrap(), 9.0);
        assert_eq!(eval("=A1-B2").unwrap(), 3.0);
        assert_eq!(eval("=A1*B2").unwrap(), 18.0);
        assert_eq!(eval("=A1/B2").unwrap(), 2.0);
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(eval("=A1+B2*C3").unwrap(), 12.0);
        assert_eq!(eval("=(A1+B2)*C3").unwrap(), 18.0);
        assert_eq!(eval("=A1-B2-C3").unwrap(), 1.0);
    }

    #[test]
    fn test_division_by_zero_is_not_trapped() {
        let cells = FixedCells(HashMap::from([("A1", 6.0), ("Z1", 0.0)]));
        let expr = parse_formula("=A1/Z1").unwrap();
        let result = evaluate(&expr, &cells).unwrap();
        assert!(result.is_infinite());

        let expr = parse_formula("=Z1/Z1").unwrap();
        assert!(evaluate(&expr, &cells).unwrap().is_nan());
    }

    #[test]
    fn test_resolver_errors_propagate() {
        assert_eq!(
            eval("=A1+D4"),
            Err(FormulaError::NotNumeric("D4".into()))
        );
    }
}
