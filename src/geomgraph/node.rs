use super::{CoordPos, Label};
use crate::GeoFloat;
use geo_types::Coord;

/// A node in a topology graph: a coordinate together with the label
/// classifying it against both operands.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CoordNode<F>
where
    F: GeoFloat,
{
    coordinate: Coord<F>,
    label: Label,
}

impl<F> CoordNode<F>
where
    F: GeoFloat,
{
    pub fn new(coordinate: Coord<F>) -> CoordNode<F> {
        CoordNode {
            coordinate,
            label: Label::empty_line_or_point(),
        }
    }

    pub fn coordinate(&self) -> &Coord<F> {
        &self.coordinate
    }

    pub(crate) fn label(&self) -> &Label {
        &self.label
    }

    pub(crate) fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub fn set_label_on_position(&mut self, geom_index: usize, position: CoordPos) {
        self.label.set_on_position(geom_index, position)
    }

    /// A node is isolated when it was only reached through one of the
    /// operands; its label for the other operand is still missing.
    pub(crate) fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }
}
