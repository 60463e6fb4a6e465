//! Screen placement of progression nodes for the map view.
//! This module exists to derive node depths and spread each depth row evenly.
//! It does not own drawing or camera concerns.

use std::cmp::Reverse;
use std::collections::{BTreeMap, VecDeque};

use super::ProgressionDag;
use crate::config::LayoutConfig;

/// Longest-prerequisite-chain depth per node, in the order depths were assigned.
/// Nodes unreachable from a root are left out.
pub fn node_depths(dag: &ProgressionDag) -> Vec<(String, u32)> {
    let mut depths: BTreeMap<String, u32> = BTreeMap::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::new();
    for node in dag.nodes() {
        if dag.prerequisites(&node.id).is_empty() {
            depths.insert(node.id.clone(), 0);
            order.push((node.id.clone(), 0));
            queue.push_back(node.id.clone());
        }
    }

    while let Some(current) = queue.pop_front() {
        for node in dag.nodes() {
            let requires = dag.prerequisites(&node.id);
            if depths.contains_key(&node.id) || !requires.contains(&current) {
                continue;
            }
            let resolved: Option<Vec<u32>> =
                requires.iter().map(|req| depths.get(req).copied()).collect();
            if let Some(resolved) = resolved {
                let depth = resolved.into_iter().max().unwrap_or(0) + 1;
                depths.insert(node.id.clone(), depth);
                order.push((node.id.clone(), depth));
                queue.push_back(node.id.clone());
            }
        }
    }
    order
}

fn depth_rows(depths: &[(String, u32)]) -> BTreeMap<u32, Vec<String>> {
    let mut rows: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for (id, depth) in depths {
        rows.entry(*depth).or_default().push(id.clone());
    }
    rows
}

fn row_y(depth: u32, max_depth: u32, config: &LayoutConfig) -> f32 {
    let spacing = (config.screen_height - config.reserved_height) / (max_depth + 1) as f32;
    config.top_offset + depth as f32 * spacing
}

fn spread(ids: &[String], margin: f32, config: &LayoutConfig) -> Vec<f32> {
    let width = config.screen_width;
    match ids.len() {
        0 => Vec::new(),
        1 => vec![(width / 2.0).floor()],
        2 => vec![(width / 3.0).floor(), (2.0 * width / 3.0).floor()],
        count => {
            let spacing = (width - 2.0 * margin) / (count - 1) as f32;
            (0..count).map(|i| margin + i as f32 * spacing).collect()
        }
    }
}

/// First pass: one row per depth, nodes kept in depth-assignment order.
pub fn spread_positions(
    depths: &[(String, u32)],
    config: &LayoutConfig,
) -> BTreeMap<String, (f32, f32)> {
    let max_depth = depths.iter().map(|(_, depth)| *depth).max().unwrap_or(0);
    let mut positions = BTreeMap::new();
    for (depth, ids) in depth_rows(depths) {
        let y = row_y(depth, max_depth, config);
        for (id, x) in ids.iter().zip(spread(&ids, config.spread_margin, config)) {
            positions.insert(id.clone(), (x, y));
        }
    }
    positions
}

/// Second pass: better-connected nodes take the leftmost slots of their row.
pub fn refine_positions(
    dag: &ProgressionDag,
    depths: &[(String, u32)],
    positions: &mut BTreeMap<String, (f32, f32)>,
    config: &LayoutConfig,
) {
    let degree = |id: &str| dag.prerequisites(id).len() + dag.dependents(id).len();
    for (_, mut ids) in depth_rows(depths) {
        if ids.len() <= 1 {
            continue;
        }
        ids.sort_by_key(|id| Reverse(degree(id.as_str())));
        for (id, x) in ids.iter().zip(spread(&ids, config.refined_margin, config)) {
            if let Some(position) = positions.get_mut(id) {
                position.0 = x;
            }
        }
    }
}

pub fn apply_layout(dag: &mut ProgressionDag, config: &LayoutConfig) {
    let depths = node_depths(dag);
    let mut positions = spread_positions(&depths, config);
    refine_positions(dag, &depths, &mut positions, config);
    for node in dag.nodes_mut() {
        if let Some(position) = positions.get(&node.id) {
            node.position = *position;
        }
    }
}
