use crate::cli::RenderArgs;
use crate::config::PartialDiagramConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use molgraph::{
    core::{
        io::{json::GraphData, svg::SvgWriter},
        models::ids::NodeId,
    },
    engine::{config::LayoutConfig, events::EventReporter},
    workflows::Diagram,
};
use tracing::{info, warn};

/// Ticks the cooling schedule needs to take alpha below `alpha_min`, capped at `max_ticks`.
pub fn expected_ticks(layout: &LayoutConfig, max_ticks: u64) -> u64 {
    if layout.alpha < layout.alpha_min {
        return 0;
    }
    if layout.alpha_target >= layout.alpha_min || layout.alpha_decay <= 0.0 {
        return max_ticks;
    }
    if layout.alpha_decay >= 1.0 {
        return 1.min(max_ticks);
    }
    let remaining = (layout.alpha_min - layout.alpha_target) / (layout.alpha - layout.alpha_target);
    let ticks = (remaining.ln() / (1.0 - layout.alpha_decay).ln()).ceil();
    if ticks.is_finite() && ticks >= 0.0 {
        (ticks as u64).min(max_ticks)
    } else {
        max_ticks
    }
}

pub fn run(args: RenderArgs, quiet: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialDiagramConfig::from_file(path)?,
        None => PartialDiagramConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let expected = expected_ticks(&config.layout, config.max_ticks);
    let progress_handler = if quiet {
        CliProgressHandler::hidden(expected)
    } else {
        CliProgressHandler::new(expected)
    };
    let reporter = EventReporter::with_callback(progress_handler.get_callback());
    let mut diagram =
        Diagram::headless(config.layout.clone(), config.render.clone()).with_reporter(reporter);

    for input in &args.inputs {
        info!("Loading diagram data from {:?}", input);
        let data = GraphData::read_from_path(input).map_err(|e| CliError::FileParsing {
            path: input.clone(),
            source: e.into(),
        })?;

        let report = diagram.apply(data);
        info!(
            generation = report.generation,
            added = report.node_join.entered,
            removed = report.node_join.exited,
            "Snapshot applied."
        );

        let ticks = diagram.run_until_converged(config.max_ticks);
        progress_handler.finish();
        if diagram.is_running() {
            warn!(
                "Layout of {:?} did not settle within {} ticks; writing the current positions.",
                input, ticks
            );
        }
    }

    for &id in &args.select {
        let selected = diagram.click_node(NodeId(id))?;
        info!(node = id, selected, "Atom clicked.");
    }

    let atoms = diagram.nodes().len();
    let bonds = diagram.links().len();
    let scene = diagram.into_scene();
    SvgWriter::write_to_path(&scene, &args.output)?;

    println!(
        "✓ Diagram with {} atom(s) and {} bond(s) written to: {}",
        atoms,
        bonds,
        args.output.display()
    );
    Ok(())
}
