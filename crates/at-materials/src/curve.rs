//! Constant-or-table material properties.

use crate::error::{MaterialError, MaterialResult};
use at_core::numeric::{interp_clamped, is_strictly_increasing};
use serde::{Deserialize, Serialize};

/// A property that is either constant or a piecewise-linear function of one
/// variable (temperature, heat flux, ...). Table lookups hold the end values
/// outside the tabulated range.
///
/// In YAML either a bare number or `{ table: [[x, y], ...] }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyCurve {
    Constant(f64),
    Table { table: Vec<[f64; 2]> },
}

impl PropertyCurve {
    pub fn table(points: &[(f64, f64)]) -> Self {
        Self::Table {
            table: points.iter().map(|&(x, y)| [x, y]).collect(),
        }
    }

    pub fn validate(&self) -> MaterialResult<()> {
        match self {
            PropertyCurve::Constant(v) => {
                if !v.is_finite() {
                    return Err(MaterialError::Table {
                        what: "constant property must be finite",
                    });
                }
            }
            PropertyCurve::Table { table } => {
                if table.is_empty() {
                    return Err(MaterialError::Table {
                        what: "table must have at least one point",
                    });
                }
                if table.iter().flatten().any(|v| !v.is_finite()) {
                    return Err(MaterialError::Table {
                        what: "table entries must be finite",
                    });
                }
                let xs: Vec<f64> = table.iter().map(|p| p[0]).collect();
                if !is_strictly_increasing(&xs) {
                    return Err(MaterialError::Table {
                        what: "table abscissa must be strictly increasing",
                    });
                }
            }
        }
        Ok(())
    }

    /// Smallest value the curve can return.
    pub fn min_value(&self) -> f64 {
        match self {
            PropertyCurve::Constant(v) => *v,
            PropertyCurve::Table { table } => {
                table.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min)
            }
        }
    }

    pub fn evaluate(&self, x: f64) -> MaterialResult<f64> {
        match self {
            PropertyCurve::Constant(v) => Ok(*v),
            PropertyCurve::Table { table } => {
                let (xs, ys): (Vec<f64>, Vec<f64>) = table.iter().map(|p| (p[0], p[1])).unzip();
                interp_clamped(&xs, &ys, x).map_err(|_| MaterialError::Table {
                    what: "lookup on malformed table",
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_and_table_lookup() {
        assert_eq!(PropertyCurve::Constant(3.0).evaluate(1e6).unwrap(), 3.0);

        let c = PropertyCurve::table(&[(300.0, 1000.0), (500.0, 1400.0)]);
        assert!((c.evaluate(400.0).unwrap() - 1200.0).abs() < 1e-9);
        assert_eq!(c.evaluate(100.0).unwrap(), 1000.0);
        assert_eq!(c.evaluate(900.0).unwrap(), 1400.0);
        assert_eq!(c.min_value(), 1000.0);
    }

    #[test]
    fn validate_rejects_unsorted_tables() {
        let c = PropertyCurve::table(&[(500.0, 1.0), (300.0, 2.0)]);
        assert!(c.validate().is_err());
        assert!(PropertyCurve::Table { table: vec![] }.validate().is_err());
        assert!(PropertyCurve::Constant(f64::NAN).validate().is_err());
    }

    #[test]
    fn yaml_accepts_number_or_table() {
        let c: PropertyCurve = serde_yaml::from_str("0.9").unwrap();
        assert_eq!(c, PropertyCurve::Constant(0.9));

        let c: PropertyCurve = serde_yaml::from_str("table: [[300, 1.0], [600, 2.0]]").unwrap();
        assert_eq!(c, PropertyCurve::table(&[(300.0, 1.0), (600.0, 2.0)]));
    }
}
