use std::str::FromStr;

use wkt::types::Dimension;
use wkt::Wkt;

use crate::SimulationError;

/// parses WKT text, accepting only two-dimensional (x, y) geometries.
pub(crate) fn parse_xy_wkt(text: &str) -> Result<Wkt<f64>, SimulationError> {
    let geometry = Wkt::<f64>::from_str(text.trim()).map_err(|e| {
        SimulationError::MalformedGeometry(format!("unable to parse WKT '{text}': {e}"))
    })?;
    match geometry.dimension() {
        Dimension::XY => Ok(geometry),
        other => Err(SimulationError::MalformedGeometry(format!(
            "expected (x, y) coordinates in '{text}', found {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_xy_wkt;
    use crate::SimulationError;

    #[test]
    fn test_rejects_extra_dimensions() {
        for text in [
            "POINT Z(13.0 55.5 99.0)",
            "POINT M(13.0 55.5 1.0)",
            "POINT ZM(13.0 55.5 99.0 1.0)",
            "LINESTRING Z(0 0 1,1 1 1)",
        ] {
            assert!(
                matches!(
                    parse_xy_wkt(text),
                    Err(SimulationError::MalformedGeometry(_))
                ),
                "expected {text} to be rejected"
            );
        }
        assert!(parse_xy_wkt(" POINT(13.0 55.5) ").is_ok());
    }
}
