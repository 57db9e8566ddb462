//! Visual encodings for earthquake markers.
//!
//! Magnitude drives the circle radius, depth drives the fill color. The
//! depth table is shared with the legend so both always agree.

/// Radius multiplier applied to the magnitude.
const RADIUS_PER_MAGNITUDE: f64 = 5.0;

// Depth colors, shallow to deep (green -> red)
const SHALLOW: &str = "#00FF00";
const INTERMEDIATE: &str = "#7FFF00";
const MODERATE: &str = "#FFFF00";
const DEEP: &str = "#FFA500";
const VERY_DEEP: &str = "#FF4500";

/// Lower boundaries (km) of the five depth buckets, in ascending order.
pub const DEPTH_BOUNDARIES: [i32; 5] = [0, 30, 50, 70, 90];

/// Marker radius for a magnitude. Not clamped: zero or negative magnitudes
/// produce zero or negative radii.
#[must_use]
pub fn marker_size(magnitude: f64) -> f64 {
    magnitude * RADIUS_PER_MAGNITUDE
}

/// Fill color for a depth in km.
///
/// Comparisons are strict, so a depth sitting exactly on a boundary keeps
/// the shallower color (`30.0` is still green).
#[must_use]
pub fn marker_color(depth_km: f64) -> &'static str {
    match depth_km {
        d if d > 90.0 => VERY_DEEP,
        d if d > 70.0 => DEEP,
        d if d > 50.0 => MODERATE,
        d if d > 30.0 => INTERMEDIATE,
        _ => SHALLOW,
    }
}

/// Fixed stroke and opacity settings shared by every circle marker.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStroke {
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl Default for MarkerStroke {
    fn default() -> Self {
        Self {
            color: "#000",
            weight: 1.0,
            opacity: 1.0,
            fill_opacity: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_size_scales_linearly() {
        assert!((marker_size(4.5) - 22.5).abs() < f64::EPSILON);
        assert!((marker_size(1.0) - 5.0).abs() < f64::EPSILON);
        assert!(marker_size(0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_marker_size_not_clamped() {
        assert!((marker_size(-0.8) - -4.0).abs() < 1e-12);
    }

    #[test]
    fn test_marker_color_buckets() {
        assert_eq!(marker_color(-3.0), "#00FF00");
        assert_eq!(marker_color(10.0), "#00FF00");
        assert_eq!(marker_color(40.0), "#7FFF00");
        assert_eq!(marker_color(60.0), "#FFFF00");
        assert_eq!(marker_color(80.0), "#FFA500");
        assert_eq!(marker_color(600.0), "#FF4500");
    }

    #[test]
    fn test_marker_color_boundaries_keep_shallower_color() {
        assert_eq!(marker_color(30.0), "#00FF00");
        assert_eq!(marker_color(50.0), "#7FFF00");
        assert_eq!(marker_color(70.0), "#FFFF00");
        assert_eq!(marker_color(90.0), "#FFA500");

        assert_eq!(marker_color(30.000_1), "#7FFF00");
        assert_eq!(marker_color(90.000_1), "#FF4500");
    }

    #[test]
    fn test_marker_color_is_monotonic() {
        let order = [SHALLOW, INTERMEDIATE, MODERATE, DEEP, VERY_DEEP];
        let rank = |c: &str| order.iter().position(|o| *o == c).unwrap_or(usize::MAX);

        let mut previous = 0;
        for depth in -50..700 {
            let r = rank(marker_color(f64::from(depth)));
            assert!(r >= previous, "color got cooler at depth {depth}");
            previous = r;
        }
    }
}
