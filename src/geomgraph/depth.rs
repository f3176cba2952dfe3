use super::{CoordPos, Direction, Label};

use std::fmt;

/// A `Depth` records, for each operand geometry and each side of an edge, how
/// many times that side is covered by the operand's area.
///
/// Depths accumulate as duplicate edges are merged in the edge table. After
/// [`normalize`](Depth::normalize), a zero left/right delta for an operand
/// means the edge no longer separates interior from exterior there: the area
/// contribution has dimensionally collapsed.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Depth {
    depths: [[Option<u32>; 2]; 2],
}

fn side_index(direction: Direction) -> usize {
    match direction {
        Direction::Left => 0,
        Direction::Right => 1,
        Direction::On => panic!("depth is only tracked for Left and Right"),
    }
}

impl Depth {
    pub fn new() -> Self {
        Depth {
            depths: [[None; 2]; 2],
        }
    }

    pub fn is_null(&self) -> bool {
        self.depths
            .iter()
            .all(|sides| sides.iter().all(Option::is_none))
    }

    pub fn is_geom_null(&self, geom_index: usize) -> bool {
        self.depths[geom_index].iter().all(Option::is_none)
    }

    pub fn depth(&self, geom_index: usize, direction: Direction) -> Option<u32> {
        self.depths[geom_index][side_index(direction)]
    }

    /// The location a depth count encodes: covered sides are `Inside`.
    pub fn position(&self, geom_index: usize, direction: Direction) -> CoordPos {
        if self.depths[geom_index][side_index(direction)].unwrap_or(0) > 0 {
            CoordPos::Inside
        } else {
            CoordPos::Outside
        }
    }

    /// Accumulate the area sides of `label`: sides located `Inside` deepen by
    /// one, other sides are initialized at zero.
    pub fn add(&mut self, label: &Label) {
        for geom_index in 0..2 {
            if !label.is_geom_area(geom_index) {
                continue;
            }
            for direction in [Direction::Left, Direction::Right] {
                match label.position(geom_index, direction) {
                    Some(position @ (CoordPos::Inside | CoordPos::Outside)) => {
                        let depth = &mut self.depths[geom_index][side_index(direction)];
                        let current = depth.unwrap_or(0);
                        *depth = Some(if position == CoordPos::Inside {
                            current + 1
                        } else {
                            current
                        });
                    }
                    _ => {}
                }
            }
        }
    }

    /// Normalize the depths so that the minimum depth for each operand is 0,
    /// keeping each side's excess over that minimum.
    pub fn normalize(&mut self) {
        for sides in self.depths.iter_mut() {
            let min_depth = match (sides[0], sides[1]) {
                (None, None) => continue,
                (left, right) => left.unwrap_or(0).min(right.unwrap_or(0)),
            };
            for side in sides.iter_mut() {
                let depth = side.unwrap_or(0);
                *side = Some(depth - min_depth.min(depth));
            }
        }
    }

    /// Left depth minus right depth. Zero after normalization means the
    /// operand's area lies on both sides equally - a dimensional collapse.
    pub fn delta(&self, geom_index: usize) -> i64 {
        let left = self.depths[geom_index][0].unwrap_or(0) as i64;
        let right = self.depths[geom_index][1].unwrap_or(0) as i64;
        left - right
    }
}

impl fmt::Debug for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn fmt_depth(depth: &Option<u32>, f: &mut fmt::Formatter) -> fmt::Result {
            match depth {
                Some(depth) => write!(f, "{}", depth),
                None => write!(f, "_"),
            }
        }
        write!(f, "Depth {{ A: ")?;
        fmt_depth(&self.depths[0][0], f)?;
        write!(f, "/")?;
        fmt_depth(&self.depths[0][1], f)?;
        write!(f, ", B: ")?;
        fmt_depth(&self.depths[1][0], f)?;
        write!(f, "/")?;
        fmt_depth(&self.depths[1][1], f)?;
        write!(f, " }}")
    }
}

#[cfg(test)]
mod test {
    use super::super::TopologyPosition;
    use super::*;

    fn boundary_label(geom_index: usize, left: CoordPos, right: CoordPos) -> Label {
        Label::new(
            geom_index,
            TopologyPosition::area(CoordPos::OnBoundary, left, right),
        )
    }

    #[test]
    fn add_counts_interior_sides() {
        let mut depth = Depth::new();
        assert!(depth.is_null());

        depth.add(&boundary_label(0, CoordPos::Outside, CoordPos::Inside));
        assert!(!depth.is_null());
        assert_eq!(depth.depth(0, Direction::Left), Some(0));
        assert_eq!(depth.depth(0, Direction::Right), Some(1));
        assert_eq!(depth.delta(0), -1);
        assert!(depth.is_geom_null(1));
    }

    #[test]
    fn opposing_duplicates_collapse() {
        // the same boundary segment contributed twice in opposite directions
        let mut depth = Depth::new();
        depth.add(&boundary_label(0, CoordPos::Outside, CoordPos::Inside));
        let mut flipped = boundary_label(0, CoordPos::Outside, CoordPos::Inside);
        flipped.flip();
        depth.add(&flipped);

        depth.normalize();
        assert_eq!(depth.delta(0), 0);
    }

    #[test]
    fn normalize_zeroes_the_minimum_side() {
        let mut depth = Depth::new();
        depth.add(&boundary_label(0, CoordPos::Inside, CoordPos::Inside));
        depth.add(&boundary_label(0, CoordPos::Outside, CoordPos::Inside));
        depth.normalize();
        assert_eq!(depth.depth(0, Direction::Left), Some(0));
        assert_eq!(depth.depth(0, Direction::Right), Some(1));
        assert_eq!(depth.position(0, Direction::Right), CoordPos::Inside);
        assert_eq!(depth.position(0, Direction::Left), CoordPos::Outside);
    }
}
