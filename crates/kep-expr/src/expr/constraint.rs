//! Constraint expressions: linear expression with comparison sense and RHS.

use crate::expr::core::Expr;
use crate::ids::VariableId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl ComparisonSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "le",
            ComparisonSense::GreaterEqual => "ge",
            ComparisonSense::Equal => "eq",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintExpr {
    expr: Expr,
    sense: ComparisonSense,
    rhs: f64,
}

impl ConstraintExpr {
    pub fn new(expr: Expr, sense: ComparisonSense, rhs: f64) -> Self {
        Self { expr, sense, rhs }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn into_parts(self) -> (Expr, ComparisonSense, f64) {
        (self.expr, self.sense, self.rhs)
    }

    /// Amount by which an assignment breaks this constraint (0.0 when satisfied).
    pub fn violation(&self, value_of: impl Fn(VariableId) -> f64) -> f64 {
        let lhs = self.expr.evaluate(value_of);
        match self.sense {
            ComparisonSense::LessEqual => (lhs - self.rhs).max(0.0),
            ComparisonSense::GreaterEqual => (self.rhs - lhs).max(0.0),
            ComparisonSense::Equal => (lhs - self.rhs).abs(),
        }
    }

    pub fn is_satisfied_by(&self, value_of: impl Fn(VariableId) -> f64, tolerance: f64) -> bool {
        self.violation(value_of) <= tolerance
    }
}
