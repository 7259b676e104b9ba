//! Population aging curve — age factor indexed to peak.

use serde::{Deserialize, Serialize};

/// Upper bound of a valid age factor. Peak is 1.0, with headroom for noise.
pub const MAX_AGE_FACTOR: f64 = 1.1;

/// Age range used when neither the curve nor a player supplies any ages.
pub const DEFAULT_AGE_DOMAIN: (u32, u32) = (20, 40);

/// One row of the population aging curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgingCurvePoint {
    pub age: u32,
    pub age_factor: f64,
}

impl AgingCurvePoint {
    /// True if the factor is finite and within `[0, MAX_AGE_FACTOR]`.
    pub fn is_valid(&self) -> bool {
        self.age_factor.is_finite() && (0.0..=MAX_AGE_FACTOR).contains(&self.age_factor)
    }
}

/// Ordered, deduplicated population curve. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgingCurve {
    points: Vec<AgingCurvePoint>,
}

impl AgingCurve {
    /// Build a curve from arbitrary rows: sorts by age and keeps the first row
    /// for each age. Callers are expected to have filtered invalid rows.
    pub fn from_points(mut points: Vec<AgingCurvePoint>) -> Self {
        points.sort_by_key(|p| p.age);
        points.dedup_by_key(|p| p.age);
        Self { points }
    }

    pub fn points(&self) -> &[AgingCurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Youngest and oldest age on the curve, if any.
    pub fn age_domain(&self) -> Option<(u32, u32)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.age, last.age)),
            _ => None,
        }
    }

    /// Factor at an exact age.
    pub fn factor_at(&self, age: u32) -> Option<f64> {
        self.points
            .binary_search_by_key(&age, |p| p.age)
            .ok()
            .map(|i| self.points[i].age_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(age: u32, age_factor: f64) -> AgingCurvePoint {
        AgingCurvePoint { age, age_factor }
    }

    #[test]
    fn from_points_sorts_and_keeps_first_duplicate() {
        let curve = AgingCurve::from_points(vec![pt(27, 1.0), pt(21, 0.8), pt(27, 0.5)]);
        let ages: Vec<u32> = curve.points().iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![21, 27]);
        assert_eq!(curve.factor_at(27), Some(1.0));
    }

    #[test]
    fn age_domain_and_lookup() {
        let curve = AgingCurve::from_points(vec![pt(22, 0.85), pt(30, 0.97), pt(26, 1.0)]);
        assert_eq!(curve.age_domain(), Some((22, 30)));
        assert_eq!(curve.factor_at(26), Some(1.0));
        assert_eq!(curve.factor_at(25), None);
    }

    #[test]
    fn empty_curve_has_no_domain() {
        let curve = AgingCurve::default();
        assert!(curve.is_empty());
        assert_eq!(curve.age_domain(), None);
    }

    #[test]
    fn point_validity_bounds() {
        assert!(pt(20, 0.0).is_valid());
        assert!(pt(20, 1.1).is_valid());
        assert!(!pt(20, 1.2).is_valid());
        assert!(!pt(20, -0.01).is_valid());
        assert!(!pt(20, f64::NAN).is_valid());
    }
}
