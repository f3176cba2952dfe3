use crate::GeoFloat;
use geo_types::Coord;
use num_traits::ToPrimitive;

use std::cmp::Ordering;

/// The grid model coordinates are expressed in.
///
/// `Floating` and `FloatingSingle` coordinates are left untouched.
/// A `Fixed` model snaps every ordinate onto a grid with spacing
/// `1 / scale`: a scale of `1000.0` keeps three decimal digits.
///
/// Models are ordered by increasing precision, with `Fixed` models ranking
/// above the floating kinds (and among themselves by scale). The overlay
/// driver uses the more precise of its two operand models.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrecisionModel {
    /// Single-precision floating point coordinates.
    FloatingSingle,
    /// Full double-precision floating point coordinates.
    Floating,
    /// Coordinates snapped to a grid with spacing `1 / scale`.
    Fixed {
        /// Grid points per unit. Must be positive and finite.
        scale: f64,
    },
}

impl Default for PrecisionModel {
    fn default() -> Self {
        PrecisionModel::Floating
    }
}

impl PrecisionModel {
    pub fn fixed(scale: f64) -> Self {
        debug_assert!(scale.is_finite() && scale > 0.0, "scale must be positive");
        PrecisionModel::Fixed { scale }
    }

    pub fn is_floating(&self) -> bool {
        !matches!(self, PrecisionModel::Fixed { .. })
    }

    pub fn scale(&self) -> Option<f64> {
        match self {
            PrecisionModel::Fixed { scale } => Some(*scale),
            _ => None,
        }
    }

    /// Round `coord` onto this model's grid.
    pub fn make_precise<F: GeoFloat>(&self, coord: Coord<F>) -> Coord<F> {
        match self {
            PrecisionModel::Floating => coord,
            PrecisionModel::FloatingSingle => {
                // round-trip through f32, the nearest representable single
                let x = <F as num_traits::NumCast>::from(coord.x.to_f32().unwrap()).unwrap();
                let y = <F as num_traits::NumCast>::from(coord.y.to_f32().unwrap()).unwrap();
                Coord { x, y }
            }
            PrecisionModel::Fixed { scale } => {
                let scale = <F as num_traits::NumCast>::from(*scale).unwrap();
                Coord {
                    x: (coord.x * scale).round() / scale,
                    y: (coord.y * scale).round() / scale,
                }
            }
        }
    }
}

fn rank(pm: &PrecisionModel) -> u8 {
    match pm {
        PrecisionModel::FloatingSingle => 0,
        PrecisionModel::Floating => 1,
        PrecisionModel::Fixed { .. } => 2,
    }
}

impl Eq for PrecisionModel {}

impl PartialOrd for PrecisionModel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PrecisionModel {
    fn cmp(&self, other: &Self) -> Ordering {
        rank(self).cmp(&rank(other)).then_with(|| match (self, other) {
            (PrecisionModel::Fixed { scale: a }, PrecisionModel::Fixed { scale: b }) => {
                // scales are finite and positive
                a.partial_cmp(b).unwrap()
            }
            _ => Ordering::Equal,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::coord;

    #[test]
    fn ordering_prefers_fixed_then_scale() {
        let single = PrecisionModel::FloatingSingle;
        let floating = PrecisionModel::Floating;
        let coarse = PrecisionModel::fixed(10.0);
        let fine = PrecisionModel::fixed(1000.0);

        assert!(single < floating);
        assert!(floating < coarse);
        assert!(coarse < fine);
        assert_eq!(floating.max(fine), fine);
    }

    #[test]
    fn fixed_snaps_to_grid() {
        let pm = PrecisionModel::fixed(10.0);
        let snapped = pm.make_precise(coord! { x: 1.2345, y: -9.8765 });
        assert_eq!(snapped, coord! { x: 1.2, y: -9.9 });
    }

    #[test]
    fn floating_is_identity() {
        let pm = PrecisionModel::Floating;
        let c = coord! { x: 1.2345678901234, y: 2.0 };
        assert_eq!(pm.make_precise(c), c);
    }
}
