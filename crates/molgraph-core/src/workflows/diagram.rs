use crate::core::io::json::GraphData;
use crate::core::models::ids::{ElementId, LinkId, NodeId};
use crate::core::models::link::Link;
use crate::core::models::node::Node;
use crate::core::reconcile::{MergeStats, merge_with_stats};
use crate::core::scene::Scene;
use crate::core::scene::graph::SceneGraph;
use crate::engine::config::{LayoutConfig, RenderConfig};
use crate::engine::error::DiagramError;
use crate::engine::events::{DiagramEvent, EventReporter};
use crate::engine::layout::{Simulation, TickOutcome, UnresolvedLink};
use crate::engine::render::{JoinStats, MountPoints, SceneRenderer, update_transforms};
use crate::engine::selection::{Selection, SelectionController};
use std::collections::HashSet;
use tracing::{info, instrument, warn};

/// What one data update did to the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    /// Generation of the simulation started by this update.
    pub generation: u64,
    pub nodes: MergeStats,
    pub links: MergeStats,
    pub node_join: JoinStats,
    pub link_join: JoinStats,
    /// Links that could not be bound and are not drawn.
    pub unresolved: Vec<UnresolvedLink>,
}

/// An interactive molecular diagram drawn into a [`Scene`].
///
/// The diagram owns the reconciled node and link arrays, the selection and
/// the running simulation. The host drives it cooperatively: it calls
/// [`update`](Self::update) whenever new data arrives, [`advance`](Self::advance)
/// once per animation frame, and [`click_node`](Self::click_node) or
/// [`click_element`](Self::click_element) for user input. Every call runs to
/// completion before returning, so a tick never observes a half-joined scene.
pub struct Diagram<'a, S: Scene> {
    scene: S,
    renderer: SceneRenderer,
    layout: LayoutConfig,
    nodes: Vec<Node>,
    links: Vec<Link>,
    selection: SelectionController,
    simulation: Option<Simulation>,
    generation: u64,
    unresolved: Vec<UnresolvedLink>,
    logged_unresolved: HashSet<(LinkId, NodeId)>,
    reporter: EventReporter<'a>,
}

impl<'a> Diagram<'a, SceneGraph> {
    /// A diagram drawing into an in-memory [`SceneGraph`] sized by `render`.
    pub fn headless(layout: LayoutConfig, render: RenderConfig) -> Self {
        let mut scene = SceneGraph::new(render.width, render.height);
        let root = scene.root();
        let mounts = MountPoints::create(&mut scene, root);
        Self::new(scene, mounts, layout, render)
    }
}

impl<'a, S: Scene> Diagram<'a, S> {
    /// Creates an empty diagram drawing into the given mount points of `scene`.
    pub fn new(scene: S, mounts: MountPoints, layout: LayoutConfig, render: RenderConfig) -> Self {
        Self {
            scene,
            renderer: SceneRenderer::new(render, mounts),
            layout,
            nodes: Vec::new(),
            links: Vec::new(),
            selection: SelectionController::new(),
            simulation: None,
            generation: 0,
            unresolved: Vec::new(),
            logged_unresolved: HashSet::new(),
            reporter: EventReporter::new(),
        }
    }

    pub fn with_reporter(mut self, reporter: EventReporter<'a>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Reconciles new data, restarts the layout and re-joins the scene.
    ///
    /// Atoms and bonds that persist keep their position and velocity. The
    /// previous simulation is dropped before the new one starts.
    #[instrument(skip_all, name = "diagram_update")]
    pub fn update(&mut self, nodes: Vec<Node>, links: Vec<Link>) -> UpdateReport {
        self.simulation = None;

        let (nodes, node_stats) = merge_with_stats(std::mem::take(&mut self.nodes), nodes);
        let (links, link_stats) = merge_with_stats(std::mem::take(&mut self.links), links);
        self.nodes = nodes;
        self.links = links;

        self.generation += 1;
        let (simulation, bind_report) =
            Simulation::start(&self.layout, self.generation, &mut self.nodes, &mut self.links);
        self.record_unresolved(bind_report.unresolved);
        self.reporter.report(DiagramEvent::SimulationStarted {
            generation: self.generation,
            nodes: self.nodes.len(),
            links: self.links.len(),
        });

        let node_join =
            self.renderer
                .render_nodes(&mut self.scene, &self.nodes, self.selection.selection().as_slice());
        let link_join = self
            .renderer
            .render_links(&mut self.scene, &self.links, &self.nodes);
        update_transforms(&mut self.scene, &self.renderer, &self.nodes);
        self.simulation = Some(simulation);

        info!(
            generation = self.generation,
            nodes = self.nodes.len(),
            links = self.links.len(),
            unresolved = self.unresolved.len(),
            "Diagram updated."
        );
        UpdateReport {
            generation: self.generation,
            nodes: node_stats,
            links: link_stats,
            node_join,
            link_join,
            unresolved: self.unresolved.clone(),
        }
    }

    /// [`update`](Self::update) from an ingested data snapshot.
    pub fn apply(&mut self, data: GraphData) -> UpdateReport {
        self.update(data.nodes, data.links)
    }

    /// Runs one simulation tick, if the layout is still cooling, and moves the
    /// elements to the new coordinates.
    pub fn advance(&mut self) -> TickOutcome {
        let Some(simulation) = self.simulation.as_mut() else {
            return TickOutcome::Converged;
        };

        match simulation.tick(&mut self.nodes, &self.links) {
            TickOutcome::Ticked(info) if info.generation != self.generation => {
                self.simulation = None;
                TickOutcome::Stale
            }
            TickOutcome::Ticked(info) => {
                update_transforms(&mut self.scene, &self.renderer, &self.nodes);
                self.reporter.report(DiagramEvent::Tick {
                    generation: info.generation,
                    tick: info.tick,
                    alpha: info.alpha,
                    kinetic_energy: info.kinetic_energy,
                });
                if info.converged {
                    self.reporter.report(DiagramEvent::SimulationConverged {
                        generation: info.generation,
                        ticks: info.tick,
                    });
                }
                TickOutcome::Ticked(info)
            }
            TickOutcome::Stale => {
                warn!(
                    generation = self.generation,
                    "Simulation no longer matches the diagram data; dropping it."
                );
                self.simulation = None;
                TickOutcome::Stale
            }
            TickOutcome::Converged => TickOutcome::Converged,
        }
    }

    /// Advances until the layout converges or `max_ticks` ticks have run.
    /// Returns the number of ticks run.
    pub fn run_until_converged(&mut self, max_ticks: u64) -> u64 {
        let mut ticks = 0;
        while ticks < max_ticks {
            match self.advance() {
                TickOutcome::Ticked(info) => {
                    ticks += 1;
                    if info.converged {
                        break;
                    }
                }
                TickOutcome::Converged | TickOutcome::Stale => break,
            }
        }
        ticks
    }

    /// Toggles the selection of atom `id`. Returns whether it is now selected.
    pub fn click_node(&mut self, id: NodeId) -> Result<bool, DiagramError> {
        if !self.nodes.iter().any(|node| node.id == id) {
            return Err(DiagramError::NodeNotFound(id));
        }
        let change = self.selection.on_click_node(
            id,
            &mut self.renderer,
            &mut self.scene,
            &self.nodes,
            &self.links,
        );
        self.reporter.report(DiagramEvent::SelectionChanged {
            node: change.node,
            selected: change.selected,
            selection: self.selection.selection().as_slice().to_vec(),
        });
        Ok(change.selected)
    }

    /// Resolves a clicked scene element to its atom and toggles it.
    pub fn click_element(&mut self, element: ElementId) -> Result<bool, DiagramError> {
        let id = self
            .scene
            .click_target(element)
            .ok_or(DiagramError::NotAnAtom(element))?;
        self.click_node(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Links of the current data that reference missing atoms.
    pub fn unresolved_links(&self) -> &[UnresolvedLink] {
        &self.unresolved
    }

    pub fn is_running(&self) -> bool {
        self.simulation
            .as_ref()
            .is_some_and(|simulation| simulation.is_running())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn into_scene(self) -> S {
        self.scene
    }

    /// Logs and reports each (link, missing atom) pair once while it stays
    /// unresolved. Pairs that resolve are forgotten, so the set never outgrows
    /// the current data.
    fn record_unresolved(&mut self, unresolved: Vec<UnresolvedLink>) {
        let current: HashSet<(LinkId, NodeId)> = unresolved
            .iter()
            .flat_map(|entry| entry.missing.iter().map(|missing| (entry.link.clone(), *missing)))
            .collect();
        self.logged_unresolved.retain(|pair| current.contains(pair));

        for entry in &unresolved {
            let fresh: Vec<NodeId> = entry
                .missing
                .iter()
                .copied()
                .filter(|missing| self.logged_unresolved.insert((entry.link.clone(), *missing)))
                .collect();
            if fresh.is_empty() {
                continue;
            }
            warn!(
                link = %entry.link,
                missing = ?fresh,
                "Link references atoms that are not in the diagram; it will not be drawn."
            );
            self.reporter.report(DiagramEvent::UnresolvedLink {
                link: entry.link.clone(),
                missing: fresh,
            });
        }
        self.unresolved = unresolved;
    }
}
