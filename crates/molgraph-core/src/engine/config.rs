use nalgebra::Point2;
use thiserror::Error;

/// Side length of the square diagram surface, in layout units.
pub const CANVAS_SIZE: f64 = 250.0;
/// Preferred link length when a link does not declare one.
pub const DEFAULT_LINK_DISTANCE: f64 = 20.0;
/// Link stiffness when a link does not declare one.
pub const DEFAULT_LINK_STRENGTH: f64 = 1.0;

const DEFAULT_ALPHA_MIN: f64 = 0.001;
const DEFAULT_VELOCITY_DECAY: f64 = 0.4;
const DEFAULT_CHARGE_STRENGTH: f64 = -30.0;
const DEFAULT_CHARGE_DISTANCE_MIN: f64 = 1.0;
const COOLING_TICKS: f64 = 300.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

fn require_finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(name, format!("must be finite, got {}", value)))
    }
}

fn require_unit_interval(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(invalid(name, format!("must lie in [0, 1], got {}", value)))
    }
}

/// The cooling rate that takes alpha from 1 to `alpha_min` in about 300 ticks.
pub fn alpha_decay_for(alpha_min: f64) -> f64 {
    1.0 - alpha_min.powf(1.0 / COOLING_TICKS)
}

/// Parameters of the force-directed layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Energy the simulation starts (and restarts) with.
    pub alpha: f64,
    /// The simulation stops ticking once alpha falls below this threshold.
    pub alpha_min: f64,
    /// Fraction of the remaining distance to `alpha_target` covered per tick.
    pub alpha_decay: f64,
    pub alpha_target: f64,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f64,
    /// Many-body strength; negative values repel.
    pub charge_strength: f64,
    pub charge_distance_min: f64,
    /// Point the centering force keeps the mean node position on.
    pub center: Point2<f64>,
    pub default_link_distance: f64,
    pub default_link_strength: f64,
    /// Seed of the generator separating coincident nodes.
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            alpha_min: DEFAULT_ALPHA_MIN,
            alpha_decay: alpha_decay_for(DEFAULT_ALPHA_MIN),
            alpha_target: 0.0,
            velocity_decay: DEFAULT_VELOCITY_DECAY,
            charge_strength: DEFAULT_CHARGE_STRENGTH,
            charge_distance_min: DEFAULT_CHARGE_DISTANCE_MIN,
            center: Point2::new(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0),
            default_link_distance: DEFAULT_LINK_DISTANCE,
            default_link_strength: DEFAULT_LINK_STRENGTH,
            seed: 0,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct LayoutConfigBuilder {
    alpha: Option<f64>,
    alpha_min: Option<f64>,
    alpha_decay: Option<f64>,
    alpha_target: Option<f64>,
    velocity_decay: Option<f64>,
    charge_strength: Option<f64>,
    charge_distance_min: Option<f64>,
    center: Option<Point2<f64>>,
    default_link_distance: Option<f64>,
    default_link_strength: Option<f64>,
    seed: Option<u64>,
}

impl LayoutConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }
    pub fn alpha_min(mut self, alpha_min: f64) -> Self {
        self.alpha_min = Some(alpha_min);
        self
    }
    pub fn alpha_decay(mut self, alpha_decay: f64) -> Self {
        self.alpha_decay = Some(alpha_decay);
        self
    }
    pub fn alpha_target(mut self, alpha_target: f64) -> Self {
        self.alpha_target = Some(alpha_target);
        self
    }
    pub fn velocity_decay(mut self, velocity_decay: f64) -> Self {
        self.velocity_decay = Some(velocity_decay);
        self
    }
    pub fn charge_strength(mut self, strength: f64) -> Self {
        self.charge_strength = Some(strength);
        self
    }
    pub fn charge_distance_min(mut self, distance: f64) -> Self {
        self.charge_distance_min = Some(distance);
        self
    }
    pub fn center(mut self, x: f64, y: f64) -> Self {
        self.center = Some(Point2::new(x, y));
        self
    }
    pub fn default_link_distance(mut self, distance: f64) -> Self {
        self.default_link_distance = Some(distance);
        self
    }
    pub fn default_link_strength(mut self, strength: f64) -> Self {
        self.default_link_strength = Some(strength);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fills unset parameters with defaults and validates the result.
    ///
    /// When `alpha_min` is set but `alpha_decay` is not, the decay is derived
    /// from `alpha_min` so cooling still takes about 300 ticks.
    pub fn build(self) -> Result<LayoutConfig, ConfigError> {
        let defaults = LayoutConfig::default();

        let alpha = require_unit_interval("alpha", self.alpha.unwrap_or(defaults.alpha))?;
        let alpha_min = require_unit_interval(
            "alpha_min",
            self.alpha_min.unwrap_or(defaults.alpha_min),
        )?;
        let alpha_decay = require_unit_interval(
            "alpha_decay",
            self.alpha_decay.unwrap_or_else(|| alpha_decay_for(alpha_min)),
        )?;
        let alpha_target = require_unit_interval(
            "alpha_target",
            self.alpha_target.unwrap_or(defaults.alpha_target),
        )?;
        let velocity_decay = require_unit_interval(
            "velocity_decay",
            self.velocity_decay.unwrap_or(defaults.velocity_decay),
        )?;
        let charge_strength = require_finite(
            "charge_strength",
            self.charge_strength.unwrap_or(defaults.charge_strength),
        )?;
        let charge_distance_min = require_finite(
            "charge_distance_min",
            self.charge_distance_min
                .unwrap_or(defaults.charge_distance_min),
        )?;
        if charge_distance_min <= 0.0 {
            return Err(invalid("charge_distance_min", "must be positive"));
        }
        let center = self.center.unwrap_or(defaults.center);
        require_finite("center.x", center.x)?;
        require_finite("center.y", center.y)?;
        let default_link_distance = require_finite(
            "default_link_distance",
            self.default_link_distance
                .unwrap_or(defaults.default_link_distance),
        )?;
        if default_link_distance < 0.0 {
            return Err(invalid("default_link_distance", "must not be negative"));
        }
        let default_link_strength = require_finite(
            "default_link_strength",
            self.default_link_strength
                .unwrap_or(defaults.default_link_strength),
        )?;

        Ok(LayoutConfig {
            alpha,
            alpha_min,
            alpha_decay,
            alpha_target,
            velocity_decay,
            charge_strength,
            charge_distance_min,
            center,
            default_link_distance,
            default_link_strength,
            seed: self.seed.unwrap_or(defaults.seed),
        })
    }
}

/// Visual parameters of the scene renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    /// Size values mapped onto `radius_range` through a square-root scale.
    ///
    /// The scale is clamped: sizes beyond the domain's upper bound are drawn
    /// at the range's maximum radius, so circle area only tracks size inside
    /// the domain.
    pub radius_domain: (f64, f64),
    pub radius_range: (f64, f64),
    pub default_node_color: String,
    pub default_link_color: String,
    /// Stroke of the gap lines drawn inside double and triple bonds.
    pub separator_color: String,
    pub dash_length: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_SIZE,
            height: CANVAS_SIZE,
            radius_domain: (0.0, 3.0),
            radius_range: (0.0, 6.0),
            default_node_color: "white".to_string(),
            default_link_color: "black".to_string(),
            separator_color: "#FFF".to_string(),
            dash_length: 5.0,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RenderConfigBuilder {
    width: Option<f64>,
    height: Option<f64>,
    radius_domain: Option<(f64, f64)>,
    radius_range: Option<(f64, f64)>,
    default_node_color: Option<String>,
    default_link_color: Option<String>,
    separator_color: Option<String>,
    dash_length: Option<f64>,
}

impl RenderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
    pub fn radius_domain(mut self, min: f64, max: f64) -> Self {
        self.radius_domain = Some((min, max));
        self
    }
    pub fn radius_range(mut self, min: f64, max: f64) -> Self {
        self.radius_range = Some((min, max));
        self
    }
    pub fn default_node_color(mut self, color: &str) -> Self {
        self.default_node_color = Some(color.to_string());
        self
    }
    pub fn default_link_color(mut self, color: &str) -> Self {
        self.default_link_color = Some(color.to_string());
        self
    }
    pub fn separator_color(mut self, color: &str) -> Self {
        self.separator_color = Some(color.to_string());
        self
    }
    pub fn dash_length(mut self, length: f64) -> Self {
        self.dash_length = Some(length);
        self
    }

    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        let defaults = RenderConfig::default();

        let width = require_finite("width", self.width.unwrap_or(defaults.width))?;
        let height = require_finite("height", self.height.unwrap_or(defaults.height))?;
        if width <= 0.0 || height <= 0.0 {
            return Err(invalid("size", "width and height must be positive"));
        }

        let radius_domain = self.radius_domain.unwrap_or(defaults.radius_domain);
        require_finite("radius_domain", radius_domain.0)?;
        require_finite("radius_domain", radius_domain.1)?;
        if radius_domain.0 == radius_domain.1 {
            return Err(invalid("radius_domain", "must not be empty"));
        }

        let radius_range = self.radius_range.unwrap_or(defaults.radius_range);
        require_finite("radius_range", radius_range.0)?;
        require_finite("radius_range", radius_range.1)?;
        if radius_range.0 < 0.0 || radius_range.1 < 0.0 {
            return Err(invalid("radius_range", "radii must not be negative"));
        }

        let color = |name: &'static str, value: Option<String>, default: String| {
            let value = value.unwrap_or(default);
            if value.trim().is_empty() {
                Err(invalid(name, "must not be empty"))
            } else {
                Ok(value)
            }
        };

        let dash_length = require_finite(
            "dash_length",
            self.dash_length.unwrap_or(defaults.dash_length),
        )?;
        if dash_length < 0.0 {
            return Err(invalid("dash_length", "must not be negative"));
        }

        Ok(RenderConfig {
            width,
            height,
            radius_domain,
            radius_range,
            default_node_color: color(
                "default_node_color",
                self.default_node_color,
                defaults.default_node_color,
            )?,
            default_link_color: color(
                "default_link_color",
                self.default_link_color,
                defaults.default_link_color,
            )?,
            separator_color: color(
                "separator_color",
                self.separator_color,
                defaults.separator_color,
            )?,
            dash_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_centers_on_canvas_midpoint() {
        let config = LayoutConfig::default();
        assert_eq!(config.center, Point2::new(125.0, 125.0));
        assert_eq!(config.default_link_distance, 20.0);
        assert_eq!(config.default_link_strength, 1.0);
    }

    #[test]
    fn default_alpha_decay_cools_in_about_300_ticks() {
        let config = LayoutConfig::default();
        let remaining = (1.0 - config.alpha_decay).powi(300);
        assert!((remaining - config.alpha_min).abs() < 1e-9);
    }

    #[test]
    fn empty_builder_yields_defaults() {
        assert_eq!(
            LayoutConfigBuilder::new().build().unwrap(),
            LayoutConfig::default()
        );
        assert_eq!(
            RenderConfigBuilder::new().build().unwrap(),
            RenderConfig::default()
        );
    }

    #[test]
    fn alpha_decay_follows_custom_alpha_min() {
        let config = LayoutConfigBuilder::new().alpha_min(0.01).build().unwrap();
        assert_eq!(config.alpha_decay, alpha_decay_for(0.01));
    }

    #[test]
    fn builder_rejects_out_of_range_decay() {
        let err = LayoutConfigBuilder::new()
            .velocity_decay(1.5)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                name: "velocity_decay",
                ..
            }
        ));
    }

    #[test]
    fn builder_rejects_non_finite_charge() {
        let err = LayoutConfigBuilder::new()
            .charge_strength(f64::NAN)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("charge_strength"));
    }

    #[test]
    fn render_builder_rejects_empty_radius_domain() {
        let err = RenderConfigBuilder::new()
            .radius_domain(1.0, 1.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                name: "radius_domain",
                ..
            }
        ));
    }

    #[test]
    fn render_builder_rejects_blank_colors() {
        let err = RenderConfigBuilder::new()
            .default_link_color("  ")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("default_link_color"));
    }

    #[test]
    fn render_builder_applies_overrides() {
        let config = RenderConfigBuilder::new()
            .size(500.0, 400.0)
            .default_node_color("#ccc")
            .dash_length(3.0)
            .build()
            .unwrap();
        assert_eq!(config.width, 500.0);
        assert_eq!(config.height, 400.0);
        assert_eq!(config.default_node_color, "#ccc");
        assert_eq!(config.dash_length, 3.0);
    }
}
