//! Formula expression tree types

use crate::error::{FormulaError, FormulaResult};
use ripple_sheets_core::Address;

/// Formula expression tree
///
/// Built once per formula assignment and owned by the cell that parsed it;
/// replaced wholesale (never mutated in place) whenever the formula changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaExpr {
    /// Cell reference, carrying the raw identifier as written
    ///
    /// Resolution to an [`Address`] is deferred to
    /// [`FormulaExpr::referenced_cells`], not done at parse time.
    Reference(String),

    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl FormulaExpr {
    /// The addresses referenced anywhere in this tree, in pre-order
    /// (left before right), duplicates preserved.
    ///
    /// Fails with [`FormulaError::UnresolvedReference`] on the first
    /// identifier that cannot be interpreted as a cell address.
    pub fn referenced_cells(&self) -> FormulaResult<Vec<Address>> {
        let mut addrs = Vec::new();
        self.collect_references(&mut addrs)?;
        Ok(addrs)
    }

    fn collect_references(&self, addrs: &mut Vec<Address>) -> FormulaResult<()> {
        match self {
            FormulaExpr::Reference(name) => {
                let addr = Address::parse(name)
                    .map_err(|_| FormulaError::UnresolvedReference(name.clone()))?;
                addrs.push(addr);
                Ok(())
            }
            FormulaExpr::BinaryOp { left, right, .. } => {
                left.collect_references(addrs)?;
                right.collect_references(addrs)
            }
        }
    }
}
