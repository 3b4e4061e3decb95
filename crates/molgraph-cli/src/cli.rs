use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "molgraph contributors",
    version,
    about = "molgraph - lay out molecular diagrams with a force simulation and render them as SVG.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lay out one or more data snapshots and write the resulting diagram as SVG.
    Render(RenderArgs),
    /// Check a data file for malformed entries and links to missing atoms.
    Validate(ValidateArgs),
}

/// Arguments for the `render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Node/link data in JSON. Repeat to apply several snapshots in order;
    /// each one is reconciled against the previous.
    #[arg(short, long = "input", required = true, value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Path for the output SVG file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Atom ids to click (toggle into the selection) after the last snapshot.
    #[arg(long = "select", value_name = "ID", num_args(1..))]
    pub select: Vec<i64>,

    /// Override the maximum number of ticks simulated per snapshot.
    #[arg(long, value_name = "INT")]
    pub max_ticks: Option<u64>,

    /// Override the seed used to separate coincident atoms.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S layout.velocity-decay=0.3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Node/link data in JSON.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_accepts_repeated_inputs_and_selection() {
        let cli = Cli::parse_from([
            "molgraph", "-vv", "render", "-i", "a.json", "-i", "b.json", "-o", "out.svg",
            "--select", "1", "3", "-S", "layout.seed=4",
        ]);

        assert_eq!(cli.verbose, 2);
        let Commands::Render(args) = cli.command else {
            panic!("expected the render command");
        };
        assert_eq!(args.inputs, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
        assert_eq!(args.select, vec![1, 3]);
        assert_eq!(args.set_values, vec!["layout.seed=4".to_string()]);
        assert!(args.config.is_none());
    }

    #[test]
    fn render_requires_an_output() {
        assert!(Cli::try_parse_from(["molgraph", "render", "-i", "a.json"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["molgraph", "-q", "-v", "validate", "-i", "a.json"]).is_err());
    }
}
