//! The `geo-overlay` crate computes boolean combinations of planar
//! geometries: intersection, union, difference, and symmetric difference.
//!
//! The implementation is the classic topological-overlay pipeline: both
//! operands are decomposed into a noded, labelled planar graph, every edge
//! and node of the graph is classified against both operands, and the
//! subset satisfying the requested operation is reassembled into points,
//! lines, and polygons.
//!
//! # Example
//!
//! ```
//! use geo_overlay::{overlay, OpType, OverlayOptions};
//! use geo_types::{polygon, Geometry};
//!
//! let a: Geometry<f64> = polygon![
//!     (x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.), (x: 0., y: 0.),
//! ].into();
//! let b: Geometry<f64> = polygon![
//!     (x: 5., y: 5.), (x: 15., y: 5.), (x: 15., y: 15.), (x: 5., y: 15.), (x: 5., y: 5.),
//! ].into();
//!
//! let union = overlay(&a, &b, OpType::Union, &OverlayOptions::default()).unwrap();
//! # let _ = union;
//! ```
//!
//! Geometry value types come from [`geo_types`]. The engine is
//! single-threaded and holds no state between invocations; concurrent
//! callers run one overlay per call.
//!
//! # Robustness
//!
//! Segment intersections are computed with adaptive-precision predicates
//! (the [`robust`] crate). For inputs that still defeat floating-point
//! noding, callers can retry with snap-rounding by setting
//! [`OverlayOptions::noding_precision`] to a fixed [`PrecisionModel`].

#![allow(clippy::type_complexity)]

#[macro_use]
extern crate log;

pub use crate::coordinate_position::{CoordPos, CoordinatePosition};
pub use crate::dimensions::{Dimensions, HasDimensions};
pub use crate::error::TopologyError;
pub use crate::line_intersection::{line_intersection, LineIntersection};
pub use crate::overlay::{overlay, OpType, OverlayOptions};
pub use crate::precision_model::PrecisionModel;

pub use geo_types::{
    coord, Coord, CoordFloat, CoordNum, Geometry, GeometryCollection, Line, LineString,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Rect, Triangle,
};

mod coordinate_position;
mod dimensions;
mod error;
pub mod kernels;
pub use crate::kernels::{HasKernel, Kernel, Orientation};
mod line_intersection;
mod precision_model;
pub(crate) mod utils;
mod winding_order;

pub(crate) mod geomgraph;
pub(crate) mod noding;
mod overlay;

/// The base numeric trait for scalars usable in the overlay graph: a
/// coordinate scalar with a robust predicate kernel attached.
pub trait GeoNum: CoordNum + HasKernel {}
impl<T> GeoNum for T where T: CoordNum + HasKernel {}

/// The scalar trait the overlay pipeline is written against.
///
/// `f64` and `f32` satisfy it. Constrain generic callers to `GeoFloat` to
/// stay compatible with every scalar this crate supports.
pub trait GeoFloat:
    GeoNum + num_traits::Float + num_traits::Signed + num_traits::Bounded + float_next_after::NextAfter
{
}
impl<T> GeoFloat for T where
    T: GeoNum
        + num_traits::Float
        + num_traits::Signed
        + num_traits::Bounded
        + float_next_after::NextAfter
{
}
