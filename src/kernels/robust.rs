use super::{Kernel, Orientation};
use geo_types::Coord;

use num_traits::{Float, NumCast};
use std::marker::PhantomData;

/// Robust kernel that uses [fast robust
/// predicates](//www.cs.cmu.edu/~quake/robust.html) to provide robust
/// floating point predicates. Should only be used with types that can _fit_
/// in a `f64` without loss of precision.
#[derive(Default, Debug)]
pub struct RobustKernel<T>(PhantomData<T>);

impl<T: Float> Kernel for RobustKernel<T>
where
    T: geo_types::CoordNum,
{
    type Scalar = T;

    fn orient2d(
        p: Coord<Self::Scalar>,
        q: Coord<Self::Scalar>,
        r: Coord<Self::Scalar>,
    ) -> Orientation {
        use robust::{orient2d, Coord};

        let orientation = orient2d(
            Coord {
                x: <f64 as NumCast>::from(p.x).unwrap(),
                y: <f64 as NumCast>::from(p.y).unwrap(),
            },
            Coord {
                x: <f64 as NumCast>::from(q.x).unwrap(),
                y: <f64 as NumCast>::from(q.y).unwrap(),
            },
            Coord {
                x: <f64 as NumCast>::from(r.x).unwrap(),
                y: <f64 as NumCast>::from(r.y).unwrap(),
            },
        );

        if orientation < 0. {
            Orientation::Clockwise
        } else if orientation > 0. {
            Orientation::CounterClockwise
        } else {
            Orientation::Collinear
        }
    }
}
