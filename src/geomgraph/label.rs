use super::{CoordPos, Direction, TopologyPosition};

use std::fmt;

/// The overlay graph has components (nodes and edges) which are labeled with
/// their topological relations to the two operand geometries.
///
/// More precisely, each `Label` holds a `TopologyPosition` for each operand
/// that states whether the node or edge being labeled occurs `Inside`,
/// `Outside`, or `OnBoundary` of that operand.
///
/// For lines and points, a `TopologyPosition` tracks only an `On` position,
/// while areas have positions for `On`, `Left`, and `Right`.
///
/// If the component has *no* incidence with one of the geometries, than the
/// `Label`'s `TopologyPosition` for that geometry is called `empty`.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Label {
    geometry_topologies: [TopologyPosition; 2],
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Label {{ A: {:?}, B: {:?} }}",
            &self.geometry_topologies[0], &self.geometry_topologies[1]
        )
    }
}

impl Label {
    /// Construct an empty `Label` for relating a 1-D line or 0-D point to both geometries.
    pub fn empty_line_or_point() -> Label {
        Label {
            geometry_topologies: [
                TopologyPosition::empty_line_or_point(),
                TopologyPosition::empty_line_or_point(),
            ],
        }
    }

    /// Construct an empty `Label` for relating a 2-D area to both geometries.
    pub fn empty_area() -> Self {
        Self {
            geometry_topologies: [
                TopologyPosition::empty_area(),
                TopologyPosition::empty_area(),
            ],
        }
    }

    /// Construct a `Label` initialized with `position` for the geometry
    /// specified by `geom_index`.
    ///
    /// The label's position for the other geometry will be initialized as empty.
    pub fn new(geom_index: usize, position: TopologyPosition) -> Self {
        let mut label = match position {
            TopologyPosition::LineOrPoint { .. } => Self::empty_line_or_point(),
            TopologyPosition::Area { .. } => Self::empty_area(),
        };
        label.geometry_topologies[geom_index] = position;
        label
    }

    pub fn flip(&mut self) {
        self.geometry_topologies[0].flip();
        self.geometry_topologies[1].flip();
    }

    /// Fold `other` into this label, filling empty positions. Populated
    /// positions are left alone, so earlier writes take precedence.
    pub fn merge(&mut self, other: &Label) {
        for (geom_index, position) in self.geometry_topologies.iter_mut().enumerate() {
            position.merge(&other.geometry_topologies[geom_index]);
        }
    }

    /// Collapse the position for `geom_index` to an on-only line position,
    /// recording a dimensional collapse of that operand.
    pub fn to_line(&mut self, geom_index: usize) {
        self.geometry_topologies[geom_index].to_line();
    }

    /// A copy of this label with every area position collapsed to a line
    /// position.
    pub fn to_line_label(&self) -> Label {
        let mut label = self.clone();
        for geom_index in 0..2 {
            label.to_line(geom_index);
        }
        label
    }

    pub fn position(&self, geom_index: usize, direction: Direction) -> Option<CoordPos> {
        self.geometry_topologies[geom_index].get(direction)
    }

    pub fn on_position(&self, geom_index: usize) -> Option<CoordPos> {
        self.geometry_topologies[geom_index].get(Direction::On)
    }

    pub fn set_position(&mut self, geom_index: usize, direction: Direction, position: CoordPos) {
        self.geometry_topologies[geom_index].set_position(direction, position);
    }

    pub fn set_on_position(&mut self, geom_index: usize, position: CoordPos) {
        self.geometry_topologies[geom_index].set_position(Direction::On, position);
    }

    pub fn set_all_positions(&mut self, geom_index: usize, position: CoordPos) {
        self.geometry_topologies[geom_index].set_all_positions(position)
    }

    pub fn set_all_positions_if_empty(&mut self, geom_index: usize, position: CoordPos) {
        self.geometry_topologies[geom_index].set_all_positions_if_empty(position)
    }

    pub fn geometry_count(&self) -> usize {
        self.geometry_topologies
            .iter()
            .filter(|location| !location.is_empty())
            .count()
    }

    pub fn is_empty(&self, geom_index: usize) -> bool {
        self.geometry_topologies[geom_index].is_empty()
    }

    pub fn is_any_empty(&self, geom_index: usize) -> bool {
        self.geometry_topologies[geom_index].is_any_empty()
    }

    pub fn is_area(&self) -> bool {
        self.geometry_topologies[0].is_area() || self.geometry_topologies[1].is_area()
    }

    pub fn is_geom_area(&self, geom_index: usize) -> bool {
        self.geometry_topologies[geom_index].is_area()
    }

    pub fn is_line(&self, geom_index: usize) -> bool {
        self.geometry_topologies[geom_index].is_line()
    }

    /// True iff every position recorded for `geom_index` equals `position`.
    pub fn all_positions_equal(&self, geom_index: usize, position: CoordPos) -> bool {
        match self.geometry_topologies[geom_index] {
            TopologyPosition::Area { on, left, right } => {
                on == Some(position) && left == Some(position) && right == Some(position)
            }
            TopologyPosition::LineOrPoint { on } => on == Some(position),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flip_swaps_sides_on_both_operands() {
        let mut label = Label::new(
            0,
            TopologyPosition::area(CoordPos::OnBoundary, CoordPos::Outside, CoordPos::Inside),
        );
        label.set_position(1, Direction::Left, CoordPos::Inside);
        label.set_position(1, Direction::Right, CoordPos::Outside);
        label.flip();
        assert_eq!(label.position(0, Direction::Left), Some(CoordPos::Inside));
        assert_eq!(label.position(0, Direction::Right), Some(CoordPos::Outside));
        assert_eq!(label.position(1, Direction::Left), Some(CoordPos::Outside));
        assert_eq!(label.position(1, Direction::Right), Some(CoordPos::Inside));
    }

    #[test]
    fn merge_fills_only_empty_operand_slots() {
        let mut label = Label::new(
            0,
            TopologyPosition::area(CoordPos::OnBoundary, CoordPos::Outside, CoordPos::Inside),
        );
        let other = Label::new(1, TopologyPosition::line_or_point(CoordPos::Inside));
        label.merge(&other);

        assert_eq!(label.on_position(0), Some(CoordPos::OnBoundary));
        assert_eq!(label.on_position(1), Some(CoordPos::Inside));
        // operand 0 positions were populated and must be untouched
        assert_eq!(label.position(0, Direction::Right), Some(CoordPos::Inside));
    }

    #[test]
    fn line_label_conversion() {
        let label = Label::new(
            0,
            TopologyPosition::area(CoordPos::OnBoundary, CoordPos::Inside, CoordPos::Inside),
        );
        let line_label = label.to_line_label();
        assert!(line_label.is_line(0));
        assert_eq!(line_label.on_position(0), Some(CoordPos::OnBoundary));
    }
}
