use crate::cli::ValidateArgs;
use crate::error::{CliError, Result};
use molgraph::{
    core::{
        io::json::GraphData,
        models::ids::{LinkId, NodeId},
    },
    engine::layout::{UnresolvedLink, bind_links},
};
use std::collections::HashSet;
use tracing::info;

/// Summary of a data file as the diagram would see it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub nodes: usize,
    pub links: usize,
    pub duplicate_nodes: Vec<NodeId>,
    pub duplicate_links: Vec<LinkId>,
    pub unresolved: Vec<UnresolvedLink>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.unresolved.is_empty()
    }
}

fn duplicates<T: Clone + Eq + std::hash::Hash>(ids: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    ids.filter(|id| !seen.insert(id.clone()) && reported.insert(id.clone()))
        .collect()
}

pub fn inspect(data: &GraphData) -> ValidationReport {
    let mut links = data.links.clone();
    let binding = bind_links(&data.nodes, &mut links);

    ValidationReport {
        nodes: data.nodes.len(),
        links: data.links.len(),
        duplicate_nodes: duplicates(data.nodes.iter().map(|n| n.id)),
        duplicate_links: duplicates(data.links.iter().map(|l| l.id.clone())),
        unresolved: binding.unresolved,
    }
}

pub fn run(args: ValidateArgs) -> Result<()> {
    info!("Validating diagram data in {:?}", &args.input);
    let data = GraphData::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;

    let report = inspect(&data);
    println!(
        "{}: {} atom(s), {} bond(s)",
        args.input.display(),
        report.nodes,
        report.links
    );
    for id in &report.duplicate_nodes {
        println!("  ⚠ Atom id {} appears more than once; the last entry wins.", id);
    }
    for id in &report.duplicate_links {
        println!("  ⚠ Bond id {} appears more than once; the last entry wins.", id);
    }
    for unresolved in &report.unresolved {
        let missing: Vec<String> = unresolved.missing.iter().map(ToString::to_string).collect();
        println!(
            "  ✗ Bond {} references missing atom(s): {}",
            unresolved.link,
            missing.join(", ")
        );
    }

    if report.is_valid() {
        println!("✓ Data is valid.");
        Ok(())
    } else {
        Err(CliError::Validation(format!(
            "{} bond(s) reference atoms that do not exist",
            report.unresolved.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DATA: &str = r#"{
        "nodes": [
            {"id": 1, "atom": "N"},
            {"id": 2, "atom": "H"},
            {"id": 2, "atom": "H"}
        ],
        "links": [
            {"id": "a", "source": 1, "target": 2, "bond": 1},
            {"id": "a", "source": 1, "target": 2, "bond": 1},
            {"id": "b", "source": 1, "target": 9, "bond": 1}
        ]
    }"#;

    #[test]
    fn inspect_reports_duplicates_and_missing_atoms() {
        let report = inspect(&GraphData::from_json_str(DATA).unwrap());

        assert_eq!(report.nodes, 3);
        assert_eq!(report.links, 3);
        assert_eq!(report.duplicate_nodes, vec![NodeId(2)]);
        assert_eq!(report.duplicate_links, vec![LinkId::from("a")]);
        assert_eq!(
            report.unresolved,
            vec![UnresolvedLink {
                link: LinkId::from("b"),
                missing: vec![NodeId(9)],
            }]
        );
        assert!(!report.is_valid());
    }

    #[test]
    fn run_accepts_consistent_data() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ok.json");
        fs::write(
            &input,
            r#"{"nodes": [{"id": 1, "atom": "C"}, {"id": 2, "atom": "O"}],
                "links": [{"id": 1, "source": 1, "target": 2, "bond": 2}]}"#,
        )
        .unwrap();

        run(ValidateArgs { input }).unwrap();
    }

    #[test]
    fn run_rejects_links_to_missing_atoms() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.json");
        fs::write(&input, DATA).unwrap();

        let result = run(ValidateArgs { input });

        assert!(matches!(result, Err(CliError::Validation(_))));
    }
}
