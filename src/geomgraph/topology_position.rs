use super::{CoordPos, Direction};

use std::fmt;

/// A `TopologyPosition` is the labelling of a graph component's topological
/// relationship to a single Geometry for each of the component's
/// [`Direction`s](Direction).
///
/// If the graph component is an _area_ edge, there is a position for each
/// [`Direction`]:
/// - [`On`](Direction::On): on the edge
/// - [`Left`](Direction::Left): left-hand side of the edge
/// - [`Right`](Direction::Right): right-hand side
///
/// If the parent component is a _line_ edge or a node (a point), there is a
/// single topological relationship attribute for the [`On`](Direction::On)
/// position.
///
/// See [`CoordPos`] for the possible values.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum TopologyPosition {
    Area {
        on: Option<CoordPos>,
        left: Option<CoordPos>,
        right: Option<CoordPos>,
    },
    LineOrPoint {
        on: Option<CoordPos>,
    },
}

impl fmt::Debug for TopologyPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn fmt_position(position: &Option<CoordPos>, f: &mut fmt::Formatter) -> fmt::Result {
            match position {
                Some(CoordPos::Inside) => write!(f, "i"),
                Some(CoordPos::OnBoundary) => write!(f, "b"),
                Some(CoordPos::Outside) => write!(f, "e"),
                None => write!(f, "_"),
            }
        }
        match self {
            Self::LineOrPoint { on } => fmt_position(on, f)?,
            Self::Area { on, left, right } => {
                fmt_position(left, f)?;
                fmt_position(on, f)?;
                fmt_position(right, f)?;
            }
        }
        Ok(())
    }
}

impl TopologyPosition {
    pub fn area(on: CoordPos, left: CoordPos, right: CoordPos) -> Self {
        Self::Area {
            on: Some(on),
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn empty_area() -> Self {
        Self::Area {
            on: None,
            left: None,
            right: None,
        }
    }

    pub fn line_or_point(on: CoordPos) -> Self {
        Self::LineOrPoint { on: Some(on) }
    }

    pub fn empty_line_or_point() -> Self {
        Self::LineOrPoint { on: None }
    }

    pub fn get(&self, direction: Direction) -> Option<CoordPos> {
        match (direction, self) {
            (Direction::Left, Self::Area { left, .. }) => *left,
            (Direction::Right, Self::Area { right, .. }) => *right,
            (Direction::On, Self::LineOrPoint { on }) | (Direction::On, Self::Area { on, .. }) => {
                *on
            }
            (_, Self::LineOrPoint { .. }) => {
                panic!("LineOrPoint only has a position for `Direction::On`")
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self::LineOrPoint { on: None }
                | Self::Area {
                    on: None,
                    left: None,
                    right: None,
                }
        )
    }

    pub fn is_any_empty(&self) -> bool {
        !matches!(
            self,
            Self::LineOrPoint { on: Some(_) }
                | Self::Area {
                    on: Some(_),
                    left: Some(_),
                    right: Some(_),
                }
        )
    }

    pub fn is_area(&self) -> bool {
        matches!(self, Self::Area { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Self::LineOrPoint { .. })
    }

    pub fn flip(&mut self) {
        match self {
            Self::LineOrPoint { .. } => {}
            Self::Area { left, right, .. } => {
                std::mem::swap(left, right);
            }
        }
    }

    pub fn set_all_positions(&mut self, position: CoordPos) {
        match self {
            Self::LineOrPoint { on } => {
                *on = Some(position);
            }
            Self::Area { on, left, right } => {
                *on = Some(position);
                *left = Some(position);
                *right = Some(position);
            }
        }
    }

    pub fn set_all_positions_if_empty(&mut self, position: CoordPos) {
        match self {
            Self::LineOrPoint { on } => {
                if on.is_none() {
                    *on = Some(position);
                }
            }
            Self::Area { on, left, right } => {
                if on.is_none() {
                    *on = Some(position);
                }
                if left.is_none() {
                    *left = Some(position);
                }
                if right.is_none() {
                    *right = Some(position);
                }
            }
        }
    }

    pub fn set_position(&mut self, direction: Direction, position: CoordPos) {
        match (direction, self) {
            (Direction::On, Self::LineOrPoint { on }) => *on = Some(position),
            (_, Self::LineOrPoint { .. }) => {
                panic!("invalid assignment dimensions for Self::Line")
            }
            (Direction::On, Self::Area { on, .. }) => *on = Some(position),
            (Direction::Left, Self::Area { left, .. }) => *left = Some(position),
            (Direction::Right, Self::Area { right, .. }) => *right = Some(position),
        }
    }

    pub fn set_on_position(&mut self, position: CoordPos) {
        match self {
            Self::LineOrPoint { on } | Self::Area { on, .. } => {
                *on = Some(position);
            }
        }
    }

    pub fn set_locations(&mut self, new_on: CoordPos, new_left: CoordPos, new_right: CoordPos) {
        match self {
            Self::LineOrPoint { .. } => {
                error!("invalid assignment dimensions for {:?}", self);
                debug_assert!(false, "invalid assignment dimensions for {:?}", self);
            }
            Self::Area { on, left, right } => {
                *on = Some(new_on);
                *left = Some(new_left);
                *right = Some(new_right);
            }
        }
    }

    /// Fold `other` into this position: empty slots are filled from `other`,
    /// and a line position grows into an area position when merged with one.
    pub fn merge(&mut self, other: &TopologyPosition) {
        if other.is_area() && self.is_line() {
            let on = match self {
                Self::LineOrPoint { on } => *on,
                Self::Area { .. } => unreachable!(),
            };
            *self = Self::Area {
                on,
                left: None,
                right: None,
            };
        }

        match (self, other) {
            (Self::LineOrPoint { on }, _) => {
                if on.is_none() {
                    *on = other.get(Direction::On);
                }
            }
            (Self::Area { on, left, right }, other) => {
                if on.is_none() {
                    *on = other.get(Direction::On);
                }
                if let Self::Area {
                    left: other_left,
                    right: other_right,
                    ..
                } = other
                {
                    if left.is_none() {
                        *left = *other_left;
                    }
                    if right.is_none() {
                        *right = *other_right;
                    }
                }
            }
        }
    }

    /// Collapse an area position to its line (on-only) equivalent.
    pub fn to_line(&mut self) {
        if let Self::Area { on, .. } = self {
            let on = *on;
            *self = Self::LineOrPoint { on };
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn merge_promotes_line_to_area() {
        let mut position = TopologyPosition::line_or_point(CoordPos::Inside);
        position.merge(&TopologyPosition::area(
            CoordPos::OnBoundary,
            CoordPos::Inside,
            CoordPos::Outside,
        ));
        assert_eq!(
            position,
            TopologyPosition::area(CoordPos::Inside, CoordPos::Inside, CoordPos::Outside)
        );
    }

    #[test]
    fn merge_only_fills_empty_slots() {
        let mut position = TopologyPosition::area(CoordPos::Inside, CoordPos::Inside, CoordPos::Inside);
        position.merge(&TopologyPosition::area(
            CoordPos::Outside,
            CoordPos::Outside,
            CoordPos::Outside,
        ));
        assert_eq!(
            position,
            TopologyPosition::area(CoordPos::Inside, CoordPos::Inside, CoordPos::Inside)
        );
    }

    #[test]
    fn collapse_to_line_keeps_on() {
        let mut position =
            TopologyPosition::area(CoordPos::OnBoundary, CoordPos::Inside, CoordPos::Inside);
        position.to_line();
        assert_eq!(
            position,
            TopologyPosition::line_or_point(CoordPos::OnBoundary)
        );
    }
}
