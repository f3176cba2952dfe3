use geo_types::{Coord, CoordNum};

/// The orientation of three 2-dimensional points.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Kernel trait to provide predicates to operate on
/// different scalar types.
pub trait Kernel {
    type Scalar: CoordNum;

    /// Gives the orientation of 3 2-dimensional points:
    /// ccw, cw or collinear
    fn orient2d(
        p: Coord<Self::Scalar>,
        q: Coord<Self::Scalar>,
        r: Coord<Self::Scalar>,
    ) -> Orientation;

    fn square_euclidean_distance(p: Coord<Self::Scalar>, q: Coord<Self::Scalar>) -> Self::Scalar {
        (p.x - q.x) * (p.x - q.x) + (p.y - q.y) * (p.y - q.y)
    }
}

/// Marker trait to assign a `Kernel` for a scalar
pub trait HasKernel: CoordNum {
    type Ker: Kernel<Scalar = Self>;
}

// Helper macro to implement `HasKernel` on a scalar type `T` (first arg.) by
// assigning the second arg. It expects the second arg. to be a type that
// takes one generic parameter that is `T`.
macro_rules! has_kernel {
    ($t:ident, $k:ident) => {
        impl $crate::kernels::HasKernel for $t {
            type Ker = $k<$t>;
        }
    };
}

pub mod robust;
pub use self::robust::RobustKernel;
has_kernel!(f64, RobustKernel);
has_kernel!(f32, RobustKernel);
