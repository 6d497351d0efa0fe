//! Score-driven node styling.

/// Radius used when a node carries no usable score.
pub const BASE_RADIUS: f64 = 5.0;
/// Radius of a node scoring `0.0`.
pub const MIN_RADIUS: f64 = 3.5;
/// Radius of a node scoring `1.0`.
pub const MAX_RADIUS: f64 = 10.0;

/// Low to high score, cool to warm.
pub const SCORE_PALETTE: &[&str] = &["#1f77b4", "#17becf", "#2ca02c", "#bcbd22", "#ff7f0e", "#d62728"];

/// Fallback for unscored nodes.
pub const UNSCORED_COLOR: &str = "#7f7f7f";

fn unit(score: Option<f64>) -> Option<f64> {
	score.filter(|s| s.is_finite()).map(|s| s.clamp(0.0, 1.0))
}

/// Radius for a node, growing linearly with its score.
pub fn node_radius(score: Option<f64>) -> f64 {
	match unit(score) {
		Some(s) => MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * s,
		None => BASE_RADIUS,
	}
}

/// Fill colour for a node's score band.
pub fn score_color(score: Option<f64>) -> &'static str {
	match unit(score) {
		Some(s) => {
			let band = (s * (SCORE_PALETTE.len() - 1) as f64).round() as usize;
			SCORE_PALETTE[band]
		}
		None => UNSCORED_COLOR,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn radius_is_bounded() {
		assert_eq!(node_radius(Some(0.0)), MIN_RADIUS);
		assert_eq!(node_radius(Some(1.0)), MAX_RADIUS);
		assert_eq!(node_radius(Some(-3.0)), MIN_RADIUS);
		assert_eq!(node_radius(Some(42.0)), MAX_RADIUS);
		assert!(node_radius(Some(0.5)) > MIN_RADIUS && node_radius(Some(0.5)) < MAX_RADIUS);
	}

	#[test]
	fn missing_scores_use_base_style() {
		assert_eq!(node_radius(None), BASE_RADIUS);
		assert_eq!(node_radius(Some(f64::NAN)), BASE_RADIUS);
		assert_eq!(score_color(None), UNSCORED_COLOR);
	}

	#[test]
	fn colors_follow_palette_ends() {
		assert_eq!(score_color(Some(0.0)), SCORE_PALETTE[0]);
		assert_eq!(score_color(Some(1.0)), SCORE_PALETTE[SCORE_PALETTE.len() - 1]);
		assert_eq!(score_color(Some(7.0)), SCORE_PALETTE[SCORE_PALETTE.len() - 1]);
	}
}
