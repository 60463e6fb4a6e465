//! Dungeon progression graph and unlock propagation.
//! This module exists to own the nodes, their prerequisite edges and the rule that
//! turns completed prerequisites into unlocked successors.
//! It does not own grid generation, enemy placement or the simulation tick.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::mem;

use slotmap::SlotMap;

use crate::state::{Enemy, Grid};
use crate::types::*;

pub mod generation;
pub mod layout;

#[derive(Clone, Debug)]
pub struct DungeonNode {
    pub id: String,
    pub name: String,
    pub difficulty: u8,
    pub required_nodes: Vec<String>,
    pub completed: bool,
    pub unlocked: bool,
    pub position: (f32, f32),
    pub grid: Option<Grid>,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub enemy_count: usize,
    pub treasures_collected: u32,
    pub total_treasures: u32,
}

impl DungeonNode {
    pub fn new(id: &str, name: &str, difficulty: u8) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            difficulty,
            required_nodes: Vec::new(),
            completed: false,
            unlocked: false,
            position: (0.0, 0.0),
            grid: None,
            enemies: SlotMap::with_key(),
            enemy_count: 0,
            treasures_collected: 0,
            total_treasures: 0,
        }
    }

    pub fn living_enemies(&self) -> usize {
        self.enemies.values().filter(|enemy| enemy.alive).count()
    }
}

/// Nodes in insertion order plus forward (`dependents`) and reverse
/// (`prerequisites`) adjacency. An edge `a -> b` means `b` requires `a`.
#[derive(Clone, Debug, Default)]
pub struct ProgressionDag {
    nodes: Vec<DungeonNode>,
    index: BTreeMap<String, usize>,
    dependents: BTreeMap<String, Vec<String>>,
    prerequisites: BTreeMap<String, Vec<String>>,
}

impl ProgressionDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node. Re-registering an id replaces the stored node in place
    /// and hands the previous one back.
    pub fn add_node(&mut self, node: DungeonNode) -> Option<DungeonNode> {
        if let Some(&slot) = self.index.get(&node.id) {
            log::warn!("dungeon node `{}` registered twice; keeping the latest", node.id);
            return Some(mem::replace(&mut self.nodes[slot], node));
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        None
    }

    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.dependents.entry(from.to_string()).or_default().push(to.to_string());
        self.prerequisites.entry(to.to_string()).or_default().push(from.to_string());
    }

    pub fn node(&self, id: &str) -> Option<&DungeonNode> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut DungeonNode> {
        self.index.get(id).map(|&slot| &mut self.nodes[slot])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &DungeonNode> {
        self.nodes.iter()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut DungeonNode> {
        self.nodes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn dependents(&self, id: &str) -> &[String] {
        self.dependents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn prerequisites(&self, id: &str) -> &[String] {
        self.prerequisites.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.node(id).is_some_and(|node| node.completed)
    }

    pub fn all_completed(&self) -> bool {
        self.nodes.iter().all(|node| node.completed)
    }

    pub fn mark_completed(&mut self, id: &str) -> Result<(), GameError> {
        let node = self.node_mut(id).ok_or_else(|| GameError::UnknownNode(id.to_string()))?;
        node.completed = true;
        node.unlocked = true;
        Ok(())
    }

    /// Walks outward from `start` through completed nodes and unlocks every
    /// dependent whose prerequisites are all completed. Nodes are never locked
    /// again. Returns the ids that became unlocked during this call.
    pub fn update_unlocked_nodes(&mut self) -> Vec<String> {
        let mut newly_unlocked = Vec::new();
        let Some(start) = self.node_mut(START_NODE_ID) else {
            return newly_unlocked;
        };
        if !start.unlocked {
            start.unlocked = true;
            newly_unlocked.push(START_NODE_ID.to_string());
        }

        let mut visited = BTreeSet::from([START_NODE_ID.to_string()]);
        let mut queue = VecDeque::from([START_NODE_ID.to_string()]);
        while let Some(current) = queue.pop_front() {
            let successors = self.dependents(&current).to_vec();
            for next in successors {
                if visited.contains(&next) {
                    continue;
                }
                let ready = self.prerequisites(&next).iter().all(|req| self.is_completed(req));
                if !ready {
                    continue;
                }
                let Some(node) = self.node_mut(&next) else {
                    continue;
                };
                if !node.unlocked {
                    node.unlocked = true;
                    newly_unlocked.push(next.clone());
                }
                if node.completed {
                    visited.insert(next.clone());
                    queue.push_back(next);
                }
            }
        }
        newly_unlocked
    }

    /// Kahn's algorithm over registered nodes.
    pub fn is_acyclic(&self) -> bool {
        let mut in_degree: BTreeMap<&str, usize> =
            self.nodes.iter().map(|node| (node.id.as_str(), 0)).collect();
        for node in &self.nodes {
            for next in self.dependents(&node.id) {
                if let Some(degree) = in_degree.get_mut(next.as_str()) {
                    *degree += 1;
                }
            }
        }
        let mut ready: VecDeque<&str> =
            in_degree.iter().filter(|(_, degree)| **degree == 0).map(|(id, _)| *id).collect();
        let mut drained = 0;
        while let Some(id) = ready.pop_front() {
            drained += 1;
            for next in self.dependents(id) {
                if let Some(degree) = in_degree.get_mut(next.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push_back(next.as_str());
                    }
                }
            }
        }
        drained == self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> ProgressionDag {
        let mut dag = ProgressionDag::new();
        for id in [START_NODE_ID, "a", "b", BOSS_NODE_ID] {
            dag.add_node(DungeonNode::new(id, id, 1));
        }
        dag.add_edge(START_NODE_ID, "a");
        dag.add_edge(START_NODE_ID, "b");
        dag.add_edge("a", BOSS_NODE_ID);
        dag.add_edge("b", BOSS_NODE_ID);
        dag
    }

    fn unlocked(dag: &ProgressionDag) -> Vec<&str> {
        dag.nodes().filter(|node| node.unlocked).map(|node| node.id.as_str()).collect()
    }

    #[test]
    fn start_is_unlocked_even_with_nothing_completed() {
        let mut dag = diamond();
        assert_eq!(dag.update_unlocked_nodes(), vec![START_NODE_ID.to_string()]);
        assert_eq!(unlocked(&dag), vec![START_NODE_ID]);
    }

    #[test]
    fn diamond_unlocks_boss_only_after_both_branches() {
        let mut dag = diamond();
        dag.update_unlocked_nodes();

        dag.mark_completed(START_NODE_ID).unwrap();
        assert_eq!(dag.update_unlocked_nodes(), vec!["a".to_string(), "b".to_string()]);

        dag.mark_completed("a").unwrap();
        assert!(dag.update_unlocked_nodes().is_empty());
        assert!(!dag.node(BOSS_NODE_ID).unwrap().unlocked);

        dag.mark_completed("b").unwrap();
        assert_eq!(dag.update_unlocked_nodes(), vec![BOSS_NODE_ID.to_string()]);
    }

    #[test]
    fn propagation_only_walks_through_completed_nodes() {
        let mut dag = ProgressionDag::new();
        for id in [START_NODE_ID, "mid", "far"] {
            dag.add_node(DungeonNode::new(id, id, 1));
        }
        dag.add_edge(START_NODE_ID, "mid");
        dag.add_edge("mid", "far");

        // `mid` is completed out of order while `start` is not, so the walk never reaches `far`.
        dag.mark_completed("mid").unwrap();
        dag.update_unlocked_nodes();
        assert!(!dag.node("far").unwrap().unlocked);

        dag.mark_completed(START_NODE_ID).unwrap();
        dag.update_unlocked_nodes();
        assert!(dag.node("far").unwrap().unlocked);
    }

    #[test]
    fn re_adding_a_node_replaces_it_in_place() {
        let mut dag = diamond();
        let previous = dag.add_node(DungeonNode::new("a", "Renamed", 3));
        assert_eq!(previous.map(|node| node.name), Some("a".to_string()));
        assert_eq!(dag.len(), 4);
        assert_eq!(dag.node("a").unwrap().name, "Renamed");
        assert_eq!(dag.nodes().nth(1).unwrap().id, "a");
        assert_eq!(dag.dependents("a"), [BOSS_NODE_ID.to_string()]);
    }

    #[test]
    fn unknown_node_cannot_be_completed() {
        let mut dag = diamond();
        assert_eq!(dag.mark_completed("nowhere"), Err(GameError::UnknownNode("nowhere".into())));
    }

    #[test]
    fn cycle_detection_flags_back_edges() {
        let mut dag = diamond();
        assert!(dag.is_acyclic());
        dag.add_edge(BOSS_NODE_ID, START_NODE_ID);
        assert!(!dag.is_acyclic());
    }
}
