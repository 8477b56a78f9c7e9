//! Tunable interaction settings, loadable from the host's config file.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Screen distance a box-select drag must cover before it counts.
    pub box_select_threshold: f32,
    /// Pick tolerance around connector lines, in screen pixels.
    pub connector_hit_width: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Zoom change per scrolled pixel.
    pub zoom_speed: f32,
    pub grid_spacing: f32,
    pub show_grid: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            box_select_threshold: 4.0,
            connector_hit_width: 6.0,
            min_zoom: 0.2,
            max_zoom: 3.0,
            zoom_speed: 0.002,
            grid_spacing: 50.0,
            show_grid: true,
        }
    }
}

impl EditorSettings {
    /// Returns a copy with unusable values (non-finite, or non-positive
    /// where a positive value is required) replaced by the defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;

        if !positive(self.min_zoom) {
            self.min_zoom = defaults.min_zoom;
        }
        if !positive(self.max_zoom) {
            self.max_zoom = defaults.max_zoom;
        }
        if !self.zoom_speed.is_finite() {
            self.zoom_speed = defaults.zoom_speed;
        }
        if !non_negative(self.box_select_threshold) {
            self.box_select_threshold = defaults.box_select_threshold;
        }
        if !non_negative(self.connector_hit_width) {
            self.connector_hit_width = defaults.connector_hit_width;
        }
        if !positive(self.grid_spacing) {
            self.grid_spacing = defaults.grid_spacing;
        }
        self
    }

    /// Ordered `(min, max)` zoom limits, both finite and positive.
    pub fn zoom_limits(&self) -> (f32, f32) {
        let defaults = Self::default();
        let pick = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        let lo = pick(self.min_zoom, defaults.min_zoom);
        let hi = pick(self.max_zoom, defaults.max_zoom);
        if lo <= hi { (lo, hi) } else { (hi, lo) }
    }

    /// Clamps `zoom` to the limits. A non-finite zoom becomes 100% (clamped).
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        let (lo, hi) = self.zoom_limits();
        if zoom.is_finite() {
            zoom.clamp(lo, hi)
        } else {
            1.0_f32.clamp(lo, hi)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: EditorSettings =
            serde_json::from_str(r#"{ "box_select_threshold": 10.0 }"#).unwrap();
        assert_eq!(settings.box_select_threshold, 10.0);
        assert_eq!(settings.max_zoom, EditorSettings::default().max_zoom);
    }

    #[test]
    fn test_clamp_zoom_tolerates_swapped_limits() {
        let settings = EditorSettings {
            min_zoom: 2.0,
            max_zoom: 0.5,
            ..Default::default()
        };
        assert_eq!(settings.clamp_zoom(5.0), 2.0);
        assert_eq!(settings.clamp_zoom(0.1), 0.5);
    }

    #[test]
    fn test_clamp_zoom_ignores_nan_limit() {
        let settings = EditorSettings {
            max_zoom: f32::NAN,
            ..Default::default()
        };
        assert_eq!(settings.clamp_zoom(100.0), 3.0);
        assert_eq!(settings.clamp_zoom(1.5), 1.5);
        assert_eq!(settings.clamp_zoom(f32::NAN), 1.0);
    }

    #[test]
    fn test_clamp_zoom_never_reaches_zero() {
        let settings = EditorSettings {
            min_zoom: 0.0,
            ..Default::default()
        };
        assert_eq!(settings.clamp_zoom(-5.0), 0.2);
    }

    #[test]
    fn test_validated_replaces_unusable_values() {
        let settings = EditorSettings {
            min_zoom: -1.0,
            max_zoom: f32::INFINITY,
            zoom_speed: f32::NAN,
            connector_hit_width: -3.0,
            grid_spacing: 0.0,
            box_select_threshold: 8.0,
            show_grid: false,
        }
        .validated();
        let defaults = EditorSettings::default();
        assert_eq!(settings.min_zoom, defaults.min_zoom);
        assert_eq!(settings.max_zoom, defaults.max_zoom);
        assert_eq!(settings.zoom_speed, defaults.zoom_speed);
        assert_eq!(settings.connector_hit_width, defaults.connector_hit_width);
        assert_eq!(settings.grid_spacing, defaults.grid_spacing);
        assert_eq!(settings.box_select_threshold, 8.0);
        assert!(!settings.show_grid);
    }
}
