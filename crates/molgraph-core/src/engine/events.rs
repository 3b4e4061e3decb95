use crate::core::models::ids::{LinkId, NodeId};

/// Observable changes of a diagram, for consumption by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagramEvent {
    SimulationStarted {
        generation: u64,
        nodes: usize,
        links: usize,
    },
    Tick {
        generation: u64,
        tick: u64,
        alpha: f64,
        kinetic_energy: f64,
    },
    SimulationConverged {
        generation: u64,
        ticks: u64,
    },
    SelectionChanged {
        node: NodeId,
        selected: bool,
        selection: Vec<NodeId>,
    },
    UnresolvedLink {
        link: LinkId,
        missing: Vec<NodeId>,
    },
}

pub type EventCallback<'a> = Box<dyn Fn(&DiagramEvent) + 'a>;

#[derive(Default)]
pub struct EventReporter<'a> {
    callback: Option<EventCallback<'a>>,
}

impl<'a> EventReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: EventCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: DiagramEvent) {
        if let Some(cb) = &self.callback {
            cb(&event);
        }
    }

    #[inline]
    pub fn is_listening(&self) -> bool {
        self.callback.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = EventReporter::new();
        assert!(!reporter.is_listening());
        reporter.report(DiagramEvent::SimulationConverged {
            generation: 1,
            ticks: 10,
        });
    }

    #[test]
    fn reporter_forwards_events_to_callback() {
        let seen = RefCell::new(Vec::new());
        let reporter = EventReporter::with_callback(Box::new(|event: &DiagramEvent| {
            seen.borrow_mut().push(event.clone());
        }));

        reporter.report(DiagramEvent::SelectionChanged {
            node: NodeId(3),
            selected: true,
            selection: vec![NodeId(3)],
        });

        drop(reporter);
        assert_eq!(
            seen.into_inner(),
            vec![DiagramEvent::SelectionChanged {
                node: NodeId(3),
                selected: true,
                selection: vec![NodeId(3)],
            }]
        );
    }
}
