//! Random progression graphs: themed node names and layered prerequisites.
//! This module exists to turn one seeded stream into a ready-to-play graph.
//! It does not own unlock rules or screen placement beyond calling the layout pass.

use rand_chacha::rand_core::Rng;

use super::layout::apply_layout;
use super::{DungeonNode, ProgressionDag};
use crate::config::LayoutConfig;
use crate::content::{BOSS_NODE_NAMES, START_NODE_NAME, THEMES};
use crate::roll::{choose, roll_index, roll_range, sample};
use crate::types::{BOSS_NODE_ID, START_NODE_ID};

pub const MIN_NODES: u32 = 6;
pub const MAX_NODES: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeBlueprint {
    pub id: String,
    pub name: String,
    pub difficulty: u8,
    pub requires: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DagBlueprint {
    pub nodes: Vec<NodeBlueprint>,
    /// Node ids per layer, `start` first and `boss` last.
    pub layers: Vec<Vec<String>>,
}

pub fn generate_dag<R: Rng + ?Sized>(rng: &mut R, layout: &LayoutConfig) -> ProgressionDag {
    let blueprint = roll_blueprint(rng);
    let mut dag = build_dag(&blueprint);
    debug_assert!(dag.is_acyclic(), "generated progression graph must be acyclic");
    apply_layout(&mut dag, layout);
    dag.update_unlocked_nodes();
    log::debug!("generated progression graph with {} nodes", dag.len());
    dag
}

pub fn build_dag(blueprint: &DagBlueprint) -> ProgressionDag {
    let mut dag = ProgressionDag::new();
    for entry in &blueprint.nodes {
        let mut node = DungeonNode::new(&entry.id, &entry.name, entry.difficulty);
        node.required_nodes = entry.requires.clone();
        dag.add_node(node);
    }
    for entry in &blueprint.nodes {
        for requirement in &entry.requires {
            dag.add_edge(requirement, &entry.id);
        }
    }
    dag
}

pub fn roll_blueprint<R: Rng + ?Sized>(rng: &mut R) -> DagBlueprint {
    let mut nodes = roll_node_names(rng);
    let layers = layer_ids(&nodes);
    for (depth, layer) in layers.iter().enumerate().skip(1) {
        let previous = &layers[depth - 1];
        for id in layer {
            let requires = if depth == 1 {
                vec![START_NODE_ID.to_string()]
            } else {
                let count = roll_range(rng, 1, previous.len().min(2) as u32) as usize;
                sample(rng, previous, count)
            };
            if let Some(entry) = nodes.iter_mut().find(|entry| &entry.id == id) {
                entry.requires = requires;
            }
        }
    }
    DagBlueprint { nodes, layers }
}

fn roll_node_names<R: Rng + ?Sized>(rng: &mut R) -> Vec<NodeBlueprint> {
    let node_count = roll_range(rng, MIN_NODES, MAX_NODES) as usize;
    let mut used = vec![START_NODE_NAME];
    let mut nodes = vec![blueprint(START_NODE_ID, START_NODE_NAME, 1)];

    for i in 1..node_count - 1 {
        let theme = &THEMES[roll_index(rng, THEMES.len())];
        let available: Vec<&str> =
            theme.node_names.iter().copied().filter(|name| !used.contains(name)).collect();
        let name = if available.is_empty() {
            format!("{} {i}", theme.name)
        } else {
            let picked = choose(rng, &available);
            used.push(picked);
            picked.to_string()
        };
        let difficulty = (1 + i / 2).min(5) as u8;
        nodes.push(blueprint(&format!("dungeon_{i}"), &name, difficulty));
    }

    nodes.push(blueprint(BOSS_NODE_ID, choose(rng, &BOSS_NODE_NAMES), 5));
    nodes
}

fn blueprint(id: &str, name: &str, difficulty: u8) -> NodeBlueprint {
    NodeBlueprint { id: id.to_string(), name: name.to_string(), difficulty, requires: Vec::new() }
}

/// Splits the regular nodes into two or three layers between `start` and `boss`.
pub fn layer_sizes(node_count: usize) -> Vec<usize> {
    debug_assert!(node_count >= MIN_NODES as usize);
    let first = (node_count / 3).clamp(2, 3);
    let remaining = node_count - first - 2;
    let second = (remaining / 2).max(1);
    let third = node_count - 2 - first - second;
    let mut sizes = vec![first, second];
    if third > 0 {
        sizes.push(third);
    }
    sizes
}

fn layer_ids(nodes: &[NodeBlueprint]) -> Vec<Vec<String>> {
    let mut layers = vec![vec![START_NODE_ID.to_string()]];
    let mut cursor = 1;
    for size in layer_sizes(nodes.len()) {
        layers.push(nodes[cursor..cursor + size].iter().map(|entry| entry.id.clone()).collect());
        cursor += size;
    }
    layers.push(vec![BOSS_NODE_ID.to_string()]);
    layers
}
