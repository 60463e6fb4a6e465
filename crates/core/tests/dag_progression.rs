use std::collections::BTreeSet;

use crawl_core::dag::generation::{MAX_NODES, MIN_NODES, generate_dag};
use crawl_core::{BOSS_NODE_ID, DungeonNode, LayoutConfig, ProgressionDag, START_NODE_ID};
use proptest::{collection::vec, prelude::*};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

fn unlocked_ids(dag: &ProgressionDag) -> BTreeSet<String> {
    dag.nodes().filter(|node| node.unlocked).map(|node| node.id.clone()).collect()
}

#[test]
fn diamond_scenario_unlocks_in_stages() {
    let mut dag = ProgressionDag::new();
    for id in [START_NODE_ID, "a", "b", BOSS_NODE_ID] {
        dag.add_node(DungeonNode::new(id, id, 1));
    }
    dag.add_edge(START_NODE_ID, "a");
    dag.add_edge(START_NODE_ID, "b");
    dag.add_edge("a", BOSS_NODE_ID);
    dag.add_edge("b", BOSS_NODE_ID);

    dag.update_unlocked_nodes();
    assert_eq!(unlocked_ids(&dag), BTreeSet::from([START_NODE_ID.to_string()]));

    dag.mark_completed(START_NODE_ID).unwrap();
    dag.update_unlocked_nodes();
    assert_eq!(unlocked_ids(&dag).len(), 3);

    dag.mark_completed("a").unwrap();
    dag.update_unlocked_nodes();
    assert!(!dag.node(BOSS_NODE_ID).unwrap().unlocked);

    dag.mark_completed("b").unwrap();
    dag.update_unlocked_nodes();
    assert!(dag.node(BOSS_NODE_ID).unwrap().unlocked);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_graphs_are_well_formed(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let dag = generate_dag(&mut rng, &LayoutConfig::default());
        prop_assert!((MIN_NODES as usize..=MAX_NODES as usize).contains(&dag.len()));
        prop_assert!(dag.is_acyclic());
        prop_assert!(dag.prerequisites(START_NODE_ID).is_empty());
        prop_assert!(!dag.prerequisites(BOSS_NODE_ID).is_empty());
        prop_assert_eq!(unlocked_ids(&dag), BTreeSet::from([START_NODE_ID.to_string()]));
        for node in dag.nodes() {
            prop_assert!((1..=5).contains(&node.difficulty));
            prop_assert_eq!(&node.required_nodes, &dag.prerequisites(&node.id).to_vec());
        }
    }

    #[test]
    fn completing_unlocked_nodes_never_relocks_and_reaches_every_node(
        seed in any::<u64>(),
        picks in vec(any::<usize>(), 16),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut dag = generate_dag(&mut rng, &LayoutConfig::default());
        let mut previous = unlocked_ids(&dag);

        for pick in picks.iter().copied().cycle().take(dag.len()) {
            let open: Vec<String> = dag
                .nodes()
                .filter(|node| node.unlocked && !node.completed)
                .map(|node| node.id.clone())
                .collect();
            prop_assert!(!open.is_empty(), "progress stalled before every node was completed");
            let chosen = &open[pick % open.len()];
            dag.mark_completed(chosen).unwrap();
            dag.update_unlocked_nodes();

            let current = unlocked_ids(&dag);
            prop_assert!(previous.is_subset(&current));
            for node in dag.nodes().filter(|node| node.unlocked && node.id != START_NODE_ID) {
                prop_assert!(dag.prerequisites(&node.id).iter().all(|req| dag.is_completed(req)));
            }
            previous = current;
        }
        prop_assert!(dag.all_completed());
    }
}
