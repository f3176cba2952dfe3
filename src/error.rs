use crate::GeoFloat;
use geo_types::Coord;

use thiserror::Error;

/// The single failure kind the overlay engine surfaces.
///
/// Raised when noding produced crossing segments, when ring tracing meets an
/// inconsistent link, or when a free hole cannot be assigned to any shell.
/// Anomalous *inputs* (empty operands, degenerate rings) are not errors; they
/// yield well-defined empty or identity results.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct TopologyError<F: GeoFloat> {
    message: String,
    coordinate: Option<Coord<F>>,
}

impl<F: GeoFloat> TopologyError<F> {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        TopologyError {
            message: message.into(),
            coordinate: None,
        }
    }

    pub(crate) fn at_coordinate(message: impl Into<String>, coordinate: Coord<F>) -> Self {
        let message = format!(
            "{} [ ({:?}, {:?}) ]",
            message.into(),
            coordinate.x,
            coordinate.y
        );
        TopologyError {
            message,
            coordinate: Some(coordinate),
        }
    }

    /// The coordinate at which the topology failure was detected, when known.
    pub fn coordinate(&self) -> Option<Coord<F>> {
        self.coordinate
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::coord;

    #[test]
    fn message_carries_coordinate() {
        let error: TopologyError<f64> =
            TopologyError::at_coordinate("found non-noded intersection", coord! { x: 1.5, y: 2.0 });
        assert_eq!(error.coordinate(), Some(coord! { x: 1.5, y: 2.0 }));
        assert!(error.to_string().contains("found non-noded intersection"));
        assert!(error.to_string().contains("1.5"));
    }
}
