use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use molgraph::engine::events::{DiagramEvent, EventCallback};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Drives one progress bar per simulation from the diagram's event stream.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    expected_ticks: u64,
}

impl CliProgressHandler {
    /// `expected_ticks` is the bar length used for every simulation.
    pub fn new(expected_ticks: u64) -> Self {
        let pb = ProgressBar::new(expected_ticks).with_style(Self::bar_style());
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            expected_ticks,
        }
    }

    /// A hidden handler, for quiet runs and tests.
    pub fn hidden(expected_ticks: u64) -> Self {
        let handler = Self::new(expected_ticks);
        if let Ok(pb) = handler.pb.lock() {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        handler
    }

    pub fn get_callback(&self) -> EventCallback<'static> {
        let pb_clone = self.pb.clone();
        let expected_ticks = self.expected_ticks;

        Box::new(move |event: &DiagramEvent| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match event {
                DiagramEvent::SimulationStarted {
                    generation,
                    nodes,
                    links,
                } => {
                    pb_guard.reset();
                    pb_guard.set_length(expected_ticks);
                    pb_guard.set_position(0);
                    pb_guard.set_message(format!(
                        "Snapshot {} ({} atoms, {} bonds)",
                        generation, nodes, links
                    ));
                }
                DiagramEvent::Tick { tick, .. } => {
                    pb_guard.set_position((*tick).min(expected_ticks));
                }
                DiagramEvent::SimulationConverged { generation, ticks } => {
                    pb_guard.set_position(pb_guard.length().unwrap_or(expected_ticks));
                    pb_guard.finish_with_message(format!(
                        "✓ Snapshot {} settled after {} ticks",
                        generation, ticks
                    ));
                }
                DiagramEvent::UnresolvedLink { link, missing } => {
                    let missing: Vec<String> = missing.iter().map(ToString::to_string).collect();
                    pb_guard.println(format!(
                        "  ⚠ Bond {} references missing atom(s): {}",
                        link,
                        missing.join(", ")
                    ));
                }
                DiagramEvent::SelectionChanged { .. } => {}
            }
        })
    }

    /// Finishes the bar at its current position, leaving the last message visible.
    pub fn finish(&self) {
        if let Ok(pb) = self.pb.lock() {
            if !pb.is_finished() {
                pb.abandon();
            }
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<36} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "elapsed",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.elapsed().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use molgraph::core::models::ids::{LinkId, NodeId};
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::hidden(300);
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(300));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_a_simulation_from_start_to_convergence() {
        let handler = CliProgressHandler::hidden(300);
        let callback = handler.get_callback();

        callback(&DiagramEvent::SimulationStarted {
            generation: 2,
            nodes: 4,
            links: 3,
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Snapshot 2 (4 atoms, 3 bonds)");
            assert_eq!(pb.position(), 0);
            assert!(!pb.is_finished());
        }

        callback(&DiagramEvent::Tick {
            generation: 2,
            tick: 12,
            alpha: 0.9,
            kinetic_energy: 1.0,
        });
        assert_eq!(handler.pb.lock().unwrap().position(), 12);

        callback(&DiagramEvent::SimulationConverged {
            generation: 2,
            ticks: 299,
        });
        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 300);
        assert_eq!(pb.message(), "✓ Snapshot 2 settled after 299 ticks");
    }

    #[test]
    fn ticks_beyond_the_expected_count_are_clamped() {
        let handler = CliProgressHandler::hidden(10);
        let callback = handler.get_callback();
        callback(&DiagramEvent::SimulationStarted {
            generation: 1,
            nodes: 1,
            links: 0,
        });

        callback(&DiagramEvent::Tick {
            generation: 1,
            tick: 25,
            alpha: 0.01,
            kinetic_energy: 0.0,
        });

        assert_eq!(handler.pb.lock().unwrap().position(), 10);
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::hidden(5);
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(&DiagramEvent::SimulationStarted {
                generation: 1,
                nodes: 2,
                links: 1,
            });
            callback(&DiagramEvent::UnresolvedLink {
                link: LinkId::Number(7),
                missing: vec![NodeId(9)],
            });
            callback(&DiagramEvent::SimulationConverged {
                generation: 1,
                ticks: 5,
            });
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 5);
    }

    #[test]
    fn finish_stops_an_unconverged_bar() {
        let handler = CliProgressHandler::hidden(300);
        let callback = handler.get_callback();
        callback(&DiagramEvent::SimulationStarted {
            generation: 1,
            nodes: 1,
            links: 0,
        });

        handler.finish();

        assert!(handler.pb.lock().unwrap().is_finished());
    }
}
