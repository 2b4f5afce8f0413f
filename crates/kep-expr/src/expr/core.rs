//! Core expression type: linear terms + constant.
//!
//! Terms are kept in insertion order and may repeat a variable; the model
//! merges duplicates when an expression is lowered into a row or objective.

use crate::expr::constraint::{ComparisonSense, ConstraintExpr};
use crate::ids::VariableId;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expr {
    constant: f64,
    linear: Vec<(VariableId, f64)>,
}

impl Expr {
    // ── Constructors ────────────────────────────────────────

    /// Empty expression (all zeros).
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Expression from linear terms and constant.
    pub fn new(linear: Vec<(VariableId, f64)>, constant: f64) -> Self {
        Self { constant, linear }
    }

    /// Just a constant, no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            constant,
            linear: Vec::new(),
        }
    }

    /// Single linear term: coeff * var.
    pub fn term(var_id: VariableId, coeff: f64) -> Self {
        if coeff == 0.0 {
            return Self::default();
        }
        Self {
            constant: 0.0,
            linear: vec![(var_id, coeff)],
        }
    }

    /// Single variable with coefficient 1.0.
    pub fn var(var_id: VariableId) -> Self {
        Self::term(var_id, 1.0)
    }

    /// From raw linear terms, no constant.
    pub fn from_linear(linear: Vec<(VariableId, f64)>) -> Self {
        Self {
            constant: 0.0,
            linear,
        }
    }

    /// Unit-coefficient sum of the given variables.
    pub fn sum_vars(vars: impl IntoIterator<Item = VariableId>) -> Self {
        Self::from_linear(vars.into_iter().map(|var_id| (var_id, 1.0)).collect())
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn linear_terms(&self) -> &[(VariableId, f64)] {
        &self.linear
    }

    /// True when the expression has no variable terms.
    pub fn is_constant(&self) -> bool {
        self.linear.is_empty()
    }

    /// Consume and return linear terms.
    pub fn into_linear_terms(self) -> Vec<(VariableId, f64)> {
        self.linear
    }

    /// Consume and return (linear_terms, constant).
    pub fn into_parts(self) -> (Vec<(VariableId, f64)>, f64) {
        (self.linear, self.constant)
    }

    /// Value of the expression under an assignment.
    pub fn evaluate(&self, value_of: impl Fn(VariableId) -> f64) -> f64 {
        self.linear
            .iter()
            .fold(self.constant, |acc, (var_id, coeff)| {
                acc + coeff * value_of(*var_id)
            })
    }

    // ── Operations ──────────────────────────────────────────

    /// Append a term in place.
    pub fn push_term(&mut self, var_id: VariableId, coeff: f64) {
        if coeff != 0.0 {
            self.linear.push((var_id, coeff));
        }
    }

    /// Scale all terms and constant by a factor.
    pub fn scale(&self, by: f64) -> Self {
        Self {
            constant: self.constant * by,
            linear: self
                .linear
                .iter()
                .map(|(v, c)| (*v, *c * by))
                .filter(|(_, c)| *c != 0.0)
                .collect(),
        }
    }

    /// Add another expression (concatenates terms, sums constants).
    pub fn add(&self, other: &Expr) -> Self {
        let mut linear = Vec::with_capacity(self.linear.len() + other.linear.len());
        linear.extend_from_slice(&self.linear);
        linear.extend_from_slice(&other.linear);
        Self {
            constant: self.constant + other.constant,
            linear,
        }
    }

    /// Add a constant offset.
    pub fn add_constant(&self, value: f64) -> Self {
        Self {
            constant: self.constant + value,
            linear: self.linear.clone(),
        }
    }

    /// Copy with constant set to zero.
    pub fn without_constant(&self) -> Self {
        Self {
            constant: 0.0,
            linear: self.linear.clone(),
        }
    }

    /// Merged linear terms with duplicates combined.
    pub fn normalized_terms(&self) -> Vec<(VariableId, f64)> {
        let mut merged: BTreeMap<VariableId, f64> = BTreeMap::new();
        for (var_id, coeff) in &self.linear {
            if *coeff == 0.0 {
                continue;
            }
            *merged.entry(*var_id).or_insert(0.0) += *coeff;
        }
        merged.into_iter().filter(|(_, c)| *c != 0.0).collect()
    }

    // ── Comparison methods (produce ConstraintExpr) ─────────

    pub fn compare_scalar(&self, rhs: f64, sense: ComparisonSense) -> ConstraintExpr {
        ConstraintExpr::new(self.without_constant(), sense, rhs - self.constant)
    }

    pub fn compare_expr(&self, other: &Expr, sense: ComparisonSense) -> ConstraintExpr {
        let combined = self.add(&other.scale(-1.0));
        ConstraintExpr::new(combined.without_constant(), sense, -combined.constant)
    }

    pub fn le_scalar(&self, rhs: f64) -> ConstraintExpr {
        self.compare_scalar(rhs, ComparisonSense::LessEqual)
    }

    pub fn ge_scalar(&self, rhs: f64) -> ConstraintExpr {
        self.compare_scalar(rhs, ComparisonSense::GreaterEqual)
    }

    pub fn eq_scalar(&self, rhs: f64) -> ConstraintExpr {
        self.compare_scalar(rhs, ComparisonSense::Equal)
    }

    pub fn le_expr(&self, rhs: &Expr) -> ConstraintExpr {
        self.compare_expr(rhs, ComparisonSense::LessEqual)
    }

    pub fn ge_expr(&self, rhs: &Expr) -> ConstraintExpr {
        self.compare_expr(rhs, ComparisonSense::GreaterEqual)
    }

    pub fn eq_expr(&self, rhs: &Expr) -> ConstraintExpr {
        self.compare_expr(rhs, ComparisonSense::Equal)
    }
}

// ── Operator overloads ──────────────────────────────────────

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Self::Output {
        Expr::add(&self, &rhs)
    }
}

impl std::ops::AddAssign for Expr {
    fn add_assign(&mut self, rhs: Expr) {
        self.constant += rhs.constant;
        self.linear.extend(rhs.linear);
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Self::Output {
        Expr::add(&self, &rhs.scale(-1.0))
    }
}

impl std::ops::Mul<f64> for Expr {
    type Output = Expr;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

impl std::iter::Sum for Expr {
    fn sum<I: Iterator<Item = Expr>>(iter: I) -> Self {
        iter.fold(Expr::new_empty(), |mut acc, expr| {
            acc += expr;
            acc
        })
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::VariableId;
    use crate::expr::{ComparisonSense, ConstraintExpr, Expr};

    fn x() -> VariableId {
        VariableId::new(1)
    }

    fn y() -> VariableId {
        VariableId::new(2)
    }

    #[test]
    fn from_constant() {
        let e = Expr::from_constant(5.0);
        assert_eq!(e.constant(), 5.0);
        assert!(e.is_constant());
    }

    #[test]
    fn zero_term_is_dropped() {
        assert!(Expr::term(x(), 0.0).is_constant());
        let mut e = Expr::var(x());
        e.push_term(y(), 0.0);
        assert_eq!(e.linear_terms().len(), 1);
    }

    #[test]
    fn sum_vars_uses_unit_coefficients() {
        let e = Expr::sum_vars([x(), y(), x()]);
        assert_eq!(e.linear_terms(), &[(x(), 1.0), (y(), 1.0), (x(), 1.0)]);
        assert_eq!(e.normalized_terms(), vec![(x(), 2.0), (y(), 1.0)]);
    }

    #[test]
    fn scale_with_constant() {
        let e = Expr::new(vec![(x(), 2.0)], 3.0);
        let scaled = e.scale(2.0);
        assert_eq!(scaled.constant(), 6.0);
        assert_eq!(scaled.linear_terms()[0].1, 4.0);
    }

    #[test]
    fn sum_of_exprs_accumulates_terms_and_constants() {
        let total: Expr = vec![
            Expr::new(vec![(x(), 1.0)], 3.0),
            Expr::new(vec![(y(), 2.0)], 7.0),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.constant(), 10.0);
        assert_eq!(total.linear_terms().len(), 2);
    }

    #[test]
    fn le_scalar_moves_constant_to_rhs() {
        let e = Expr::new(vec![(x(), 1.0)], 3.0);
        let c = e.le_scalar(10.0);
        assert_eq!(c.sense(), ComparisonSense::LessEqual);
        assert_eq!(c.rhs(), 7.0);
        assert_eq!(c.expr().constant(), 0.0);
    }

    #[test]
    fn ge_expr_combines_both_sides() {
        let lhs = Expr::new(vec![(x(), 1.0)], 3.0);
        let rhs = Expr::new(vec![(y(), 1.0)], 7.0);
        let c = lhs.ge_expr(&rhs);
        assert_eq!(c.sense(), ComparisonSense::GreaterEqual);
        assert_eq!(c.rhs(), 4.0);
        assert_eq!(c.expr().linear_terms(), &[(x(), 1.0), (y(), -1.0)]);
    }

    #[test]
    fn evaluate_and_violation() {
        let values = |_: VariableId| 1.0;
        let cut = (Expr::var(x()) + Expr::var(y())).le_scalar(1.0);
        assert_eq!(cut.expr().evaluate(values), 2.0);
        assert_eq!(cut.violation(values), 1.0);
        assert!(!cut.is_satisfied_by(values, 1e-6));

        let balance = Expr::var(x()).eq_expr(&Expr::var(y()));
        assert!(balance.is_satisfied_by(values, 1e-6));
    }

    #[test]
    fn constraint_expr_exposes_parts() {
        let expr = Expr::term(x(), 1.0);
        let constraint = ConstraintExpr::new(expr, ComparisonSense::LessEqual, 10.0);
        let (inner, sense, rhs) = constraint.into_parts();
        assert_eq!(sense, ComparisonSense::LessEqual);
        assert_eq!(rhs, 10.0);
        assert_eq!(inner.linear_terms().len(), 1);
    }
}
