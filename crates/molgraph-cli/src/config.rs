use crate::cli::RenderArgs;
use crate::error::{CliError, Result};
use molgraph::engine::config::{
    LayoutConfig, LayoutConfigBuilder, RenderConfig, RenderConfigBuilder,
};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Ticks simulated per snapshot when neither the file nor the CLI set a limit.
pub const DEFAULT_MAX_TICKS: u64 = 1_000;

/// Fully resolved settings of one `render` invocation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub max_ticks: u64,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialLayoutConfig {
    alpha: Option<f64>,
    alpha_min: Option<f64>,
    alpha_decay: Option<f64>,
    alpha_target: Option<f64>,
    velocity_decay: Option<f64>,
    charge_strength: Option<f64>,
    charge_distance_min: Option<f64>,
    center: Option<(f64, f64)>,
    link_distance: Option<f64>,
    link_strength: Option<f64>,
    seed: Option<u64>,
    max_ticks: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialRenderConfig {
    width: Option<f64>,
    height: Option<f64>,
    radius_domain: Option<(f64, f64)>,
    radius_range: Option<(f64, f64)>,
    node_color: Option<String>,
    link_color: Option<String>,
    separator_color: Option<String>,
    dash_length: Option<f64>,
}

/// The optional TOML configuration file, before CLI overrides are applied.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialDiagramConfig {
    layout: Option<PartialLayoutConfig>,
    render: Option<PartialRenderConfig>,
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid value for {}: '{}' ({} expected)",
            key,
            value,
            std::any::type_name::<T>()
        ))
    })
}

impl PartialDiagramConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies `-S` values and dedicated CLI flags on top of the file values,
    /// then validates the result through the core config builders.
    pub fn merge_with_cli(mut self, args: &RenderArgs) -> Result<AppConfig> {
        self.apply_set_values(&args.set_values)?;

        let layout = self.layout.take().unwrap_or_default();
        let render = self.render.take().unwrap_or_default();

        let max_ticks = args
            .max_ticks
            .or(layout.max_ticks)
            .unwrap_or(DEFAULT_MAX_TICKS);
        if max_ticks == 0 {
            return Err(CliError::Config("`max-ticks` must be positive.".to_string()));
        }

        Ok(AppConfig {
            layout: Self::build_layout(layout, args.seed)?,
            render: Self::build_render(render)?,
            max_ticks,
        })
    }

    fn build_layout(partial: PartialLayoutConfig, cli_seed: Option<u64>) -> Result<LayoutConfig> {
        let mut builder = LayoutConfigBuilder::new();
        if let Some(v) = partial.alpha {
            builder = builder.alpha(v);
        }
        if let Some(v) = partial.alpha_min {
            builder = builder.alpha_min(v);
        }
        if let Some(v) = partial.alpha_decay {
            builder = builder.alpha_decay(v);
        }
        if let Some(v) = partial.alpha_target {
            builder = builder.alpha_target(v);
        }
        if let Some(v) = partial.velocity_decay {
            builder = builder.velocity_decay(v);
        }
        if let Some(v) = partial.charge_strength {
            builder = builder.charge_strength(v);
        }
        if let Some(v) = partial.charge_distance_min {
            builder = builder.charge_distance_min(v);
        }
        if let Some((x, y)) = partial.center {
            builder = builder.center(x, y);
        }
        if let Some(v) = partial.link_distance {
            builder = builder.default_link_distance(v);
        }
        if let Some(v) = partial.link_strength {
            builder = builder.default_link_strength(v);
        }
        if let Some(v) = cli_seed.or(partial.seed) {
            builder = builder.seed(v);
        }
        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn build_render(partial: PartialRenderConfig) -> Result<RenderConfig> {
        let defaults = RenderConfig::default();
        let mut builder = RenderConfigBuilder::new().size(
            partial.width.unwrap_or(defaults.width),
            partial.height.unwrap_or(defaults.height),
        );
        if let Some((min, max)) = partial.radius_domain {
            builder = builder.radius_domain(min, max);
        }
        if let Some((min, max)) = partial.radius_range {
            builder = builder.radius_range(min, max);
        }
        if let Some(color) = &partial.node_color {
            builder = builder.default_node_color(color);
        }
        if let Some(color) = &partial.link_color {
            builder = builder.default_link_color(color);
        }
        if let Some(color) = &partial.separator_color {
            builder = builder.separator_color(color);
        }
        if let Some(v) = partial.dash_length {
            builder = builder.dash_length(v);
        }
        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();

            if let Some(field) = key.strip_prefix("layout.") {
                let layout = self.layout.get_or_insert_with(Default::default);
                match field {
                    "alpha" => layout.alpha = Some(parse_value(key, value)?),
                    "alpha-min" => layout.alpha_min = Some(parse_value(key, value)?),
                    "alpha-decay" => layout.alpha_decay = Some(parse_value(key, value)?),
                    "alpha-target" => layout.alpha_target = Some(parse_value(key, value)?),
                    "velocity-decay" => layout.velocity_decay = Some(parse_value(key, value)?),
                    "charge-strength" => layout.charge_strength = Some(parse_value(key, value)?),
                    "charge-distance-min" => {
                        layout.charge_distance_min = Some(parse_value(key, value)?)
                    }
                    "link-distance" => layout.link_distance = Some(parse_value(key, value)?),
                    "link-strength" => layout.link_strength = Some(parse_value(key, value)?),
                    "seed" => layout.seed = Some(parse_value(key, value)?),
                    "max-ticks" => layout.max_ticks = Some(parse_value(key, value)?),
                    _ => return Err(unsupported(key)),
                }
            } else if let Some(field) = key.strip_prefix("render.") {
                let render = self.render.get_or_insert_with(Default::default);
                match field {
                    "width" => render.width = Some(parse_value(key, value)?),
                    "height" => render.height = Some(parse_value(key, value)?),
                    "node-color" => render.node_color = Some(value.trim().to_string()),
                    "link-color" => render.link_color = Some(value.trim().to_string()),
                    "separator-color" => render.separator_color = Some(value.trim().to_string()),
                    "dash-length" => render.dash_length = Some(parse_value(key, value)?),
                    _ => return Err(unsupported(key)),
                }
            } else {
                return Err(unsupported(key));
            }
        }
        Ok(())
    }
}

fn unsupported(key: &str) -> CliError {
    CliError::Config(format!("Unsupported configuration key for --set: '{}'", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use molgraph::engine::config::alpha_decay_for;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;

    fn render_args(extra: &[&str]) -> RenderArgs {
        let mut argv = vec!["molgraph", "render", "-i", "in.json", "-o", "out.svg"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Render(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("molgraph.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_sections_fall_back_to_defaults() {
        let config = PartialDiagramConfig::default()
            .merge_with_cli(&render_args(&[]))
            .unwrap();

        assert_eq!(config.layout, LayoutConfig::default());
        assert_eq!(config.render, RenderConfig::default());
        assert_eq!(config.max_ticks, DEFAULT_MAX_TICKS);
    }

    #[test]
    fn loads_kebab_case_tables_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r##"
            [layout]
            link-distance = 30.0
            charge-strength = -60.0
            center = [100.0, 80.0]
            seed = 9
            max-ticks = 200

            [render]
            node-color = "#EEE"
            radius-range = [0.0, 8.0]
            "##,
        );

        let config = PartialDiagramConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&render_args(&[]))
            .unwrap();

        assert_eq!(config.layout.default_link_distance, 30.0);
        assert_eq!(config.layout.charge_strength, -60.0);
        assert_eq!(config.layout.center.x, 100.0);
        assert_eq!(config.layout.center.y, 80.0);
        assert_eq!(config.layout.seed, 9);
        assert_eq!(config.max_ticks, 200);
        assert_eq!(config.render.default_node_color, "#EEE");
        assert_eq!(config.render.radius_range, (0.0, 8.0));
    }

    #[test]
    fn cli_flags_and_set_values_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[layout]\nseed = 1\nmax-ticks = 10\nvelocity-decay = 0.2\n");
        let args = render_args(&[
            "--seed", "5", "--max-ticks", "50", "-S", "layout.velocity-decay=0.3", "-S",
            "render.link-color=navy",
        ]);

        let config = PartialDiagramConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();

        assert_eq!(config.layout.seed, 5);
        assert_eq!(config.max_ticks, 50);
        assert_eq!(config.layout.velocity_decay, 0.3);
        assert_eq!(config.render.default_link_color, "navy");
    }

    #[test]
    fn alpha_min_alone_rescales_the_cooling_rate() {
        let config = PartialDiagramConfig::default()
            .merge_with_cli(&render_args(&["-S", "layout.alpha-min=0.01"]))
            .unwrap();

        assert_eq!(config.layout.alpha_min, 0.01);
        assert_eq!(config.layout.alpha_decay, alpha_decay_for(0.01));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[layout]\nlink-length = 30.0\n");

        let result = PartialDiagramConfig::from_file(&path);

        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for set in ["layout.seed", "layout.seed=abc", "physics.seed=1", "render.radius=3"] {
            let result = PartialDiagramConfig::default().merge_with_cli(&render_args(&["-S", set]));
            assert!(matches!(result, Err(CliError::Config(_))), "accepted {set}");
        }
    }

    #[test]
    fn invalid_values_are_rejected_by_core_validation() {
        let result = PartialDiagramConfig::default()
            .merge_with_cli(&render_args(&["-S", "layout.velocity-decay=1.5"]));
        assert!(matches!(result, Err(CliError::Config(_))));

        let result =
            PartialDiagramConfig::default().merge_with_cli(&render_args(&["--max-ticks", "0"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
