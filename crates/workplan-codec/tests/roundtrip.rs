//! End-to-end encode/decode coverage for whole plans.

use std::collections::{HashMap, HashSet};
use std::io::Cursor;

use proptest::prelude::*;

use workplan_codec::{read_plan, varint, write_plan, JsonNodeCodec};
use workplan_core::{NodeId, WorkEdge, WorkGraph};

fn successor_payloads(graph: &WorkGraph<u64>, node: NodeId, edge: WorkEdge) -> HashSet<u64> {
    graph
        .successors(node, edge)
        .map(|succ| graph.node(succ).unwrap().payload)
        .collect()
}

/// Maps each payload to its node in `graph`. Payloads must be unique.
fn by_payload(graph: &WorkGraph<u64>) -> HashMap<u64, NodeId> {
    graph
        .node_ids()
        .map(|id| (graph.node(id).unwrap().payload, id))
        .collect()
}

#[test]
fn empty_plan_roundtrips() {
    let graph: WorkGraph<u64> = WorkGraph::new();
    let mut codec = JsonNodeCodec::new();
    let mut buf = Vec::new();
    write_plan(&mut buf, &graph, &[], &mut codec).unwrap();

    let plan = read_plan(&mut Cursor::new(buf), &mut codec).unwrap();
    assert!(plan.graph.is_empty());
    assert!(plan.nodes.is_empty());
}

#[test]
fn diamond_scenario_assigns_expected_ids() {
    // A depends on B and C; B depends on C; C is a leaf.
    // C must get id 0 and A must come last.
    let mut graph = WorkGraph::new();
    let a = graph.add_node(0u64);
    let b = graph.add_node(1u64);
    let c = graph.add_node(2u64);
    graph.add_dependency_successor(a, b).unwrap();
    graph.add_dependency_successor(a, c).unwrap();
    graph.add_dependency_successor(b, c).unwrap();

    let mut codec = JsonNodeCodec::new();
    let mut buf = Vec::new();
    write_plan(&mut buf, &graph, &[a, b, c], &mut codec).unwrap();

    let plan = read_plan(&mut Cursor::new(buf), &mut codec).unwrap();
    assert_eq!(plan.nodes.len(), 3);
    assert_eq!(plan.graph.node(plan.nodes[0]).unwrap().payload, 2); // C first
    assert_eq!(plan.graph.node(plan.nodes[2]).unwrap().payload, 0); // A last

    let decoded = by_payload(&plan.graph);
    assert_eq!(
        successor_payloads(&plan.graph, decoded[&0], WorkEdge::Dependency),
        HashSet::from([1, 2])
    );
    assert_eq!(
        successor_payloads(&plan.graph, decoded[&1], WorkEdge::Dependency),
        HashSet::from([2])
    );
}

#[test]
fn shared_successor_is_written_once_and_shared_after_read() {
    // B is a successor of both A1 and A2.
    let mut graph = WorkGraph::new();
    let b = graph.add_node(0u64);
    let a1 = graph.add_node(1u64);
    let a2 = graph.add_node(2u64);
    graph.add_dependency_successor(a1, b).unwrap();
    graph.add_dependency_successor(a2, b).unwrap();

    let mut codec = JsonNodeCodec::new();
    let mut buf = Vec::new();
    write_plan(&mut buf, &graph, &[a1, a2], &mut codec).unwrap();

    // Exactly three records in the stream.
    assert_eq!(varint::read_len(&mut Cursor::new(&buf)).unwrap(), 3);

    let plan = read_plan(&mut Cursor::new(buf), &mut codec).unwrap();
    assert_eq!(plan.graph.node_count(), 3);
    let decoded = by_payload(&plan.graph);
    let b_node: Vec<NodeId> = plan
        .graph
        .dependency_successors(decoded[&1])
        .chain(plan.graph.dependency_successors(decoded[&2]))
        .collect();
    // Both edge sets resolve to the same reconstructed node.
    assert_eq!(b_node.len(), 2);
    assert_eq!(b_node[0], b_node[1]);
}

#[test]
fn task_edges_roundtrip() {
    let mut graph = WorkGraph::new();
    let t1 = graph.add_task(0u64);
    let t2 = graph.add_task(1u64);
    let t3 = graph.add_task(2u64);
    let g = graph.add_node(3u64);
    graph.add_dependency_successor(t1, g).unwrap();
    graph.add_must_successor(t1, t2).unwrap();
    graph.add_finalizing_successor(t1, t3).unwrap();

    let mut codec = JsonNodeCodec::new();
    let mut buf = Vec::new();
    write_plan(&mut buf, &graph, &[t1], &mut codec).unwrap();

    let plan = read_plan(&mut Cursor::new(buf), &mut codec).unwrap();
    let decoded = by_payload(&plan.graph);
    assert!(plan.graph.is_task(decoded[&0]));
    assert!(!plan.graph.is_task(decoded[&3]));
    assert_eq!(
        successor_payloads(&plan.graph, decoded[&0], WorkEdge::Must),
        HashSet::from([1])
    );
    assert_eq!(
        successor_payloads(&plan.graph, decoded[&0], WorkEdge::Finalizing),
        HashSet::from([2])
    );
    assert_eq!(
        successor_payloads(&plan.graph, decoded[&0], WorkEdge::Dependency),
        HashSet::from([3])
    );
}

#[test]
fn only_the_reachable_closure_is_serialized() {
    let mut graph = WorkGraph::new();
    let a = graph.add_node(0u64);
    let b = graph.add_node(1u64);
    let orphan = graph.add_node(2u64);
    graph.add_dependency_successor(a, b).unwrap();

    let mut codec = JsonNodeCodec::new();
    let mut buf = Vec::new();
    write_plan(&mut buf, &graph, &[a], &mut codec).unwrap();

    let plan = read_plan(&mut Cursor::new(buf), &mut codec).unwrap();
    assert_eq!(plan.graph.node_count(), 2);
    let payloads: HashSet<u64> = plan
        .nodes
        .iter()
        .map(|&n| plan.graph.node(n).unwrap().payload)
        .collect();
    assert_eq!(payloads, HashSet::from([0, 1]));
    assert!(!payloads.contains(&graph.node(orphan).unwrap().payload));
}

#[test]
fn identical_payloads_are_deduplicated_in_the_stream() {
    let payload = "a fairly long shared payload string".to_string();
    let mut unshared = WorkGraph::new();
    let u1 = unshared.add_node(payload.clone());
    let u2 = unshared.add_node("a different but equally long text".to_string());
    unshared.add_dependency_successor(u1, u2).unwrap();

    let mut shared = WorkGraph::new();
    let s1 = shared.add_node(payload.clone());
    let s2 = shared.add_node(payload.clone());
    shared.add_dependency_successor(s1, s2).unwrap();

    let mut codec = JsonNodeCodec::new();
    let mut unshared_buf = Vec::new();
    write_plan(&mut unshared_buf, &unshared, &[u1], &mut codec).unwrap();
    let mut shared_buf = Vec::new();
    write_plan(&mut shared_buf, &shared, &[s1], &mut codec).unwrap();

    // The repeated payload collapses to a back-reference.
    assert!(shared_buf.len() < unshared_buf.len());

    let plan = read_plan(&mut Cursor::new(shared_buf), &mut codec).unwrap();
    for &node in &plan.nodes {
        assert_eq!(plan.graph.node(node).unwrap().payload, payload);
    }
}

/// Raw description of a random plan: one entry per node, each holding the
/// task flag and seed bytes for dependency/must/finalizing edges pointing at
/// earlier nodes only (which makes the graph acyclic by construction).
type RawPlan = Vec<(bool, Vec<u8>, Vec<u8>, Vec<u8>)>;

fn build_graph(raw: &RawPlan) -> (WorkGraph<u64>, Vec<NodeId>) {
    let mut graph = WorkGraph::new();
    let mut nodes = Vec::new();
    for (i, (is_task, deps, musts, finals)) in raw.iter().enumerate() {
        let id = if *is_task {
            graph.add_task(i as u64)
        } else {
            graph.add_node(i as u64)
        };
        nodes.push(id);
        if i == 0 {
            continue;
        }
        for &seed in deps {
            let target = nodes[seed as usize % i];
            graph.add_dependency_successor(id, target).unwrap();
        }
        if *is_task {
            for &seed in musts {
                let target = nodes[seed as usize % i];
                if graph.is_task(target) {
                    graph.add_must_successor(id, target).unwrap();
                }
            }
            for &seed in finals {
                let target = nodes[seed as usize % i];
                if graph.is_task(target) {
                    graph.add_finalizing_successor(id, target).unwrap();
                }
            }
        }
    }
    (graph, nodes)
}

proptest! {
    #[test]
    fn random_acyclic_plans_roundtrip(
        raw in prop::collection::vec(
            (
                any::<bool>(),
                prop::collection::vec(any::<u8>(), 0..4),
                prop::collection::vec(any::<u8>(), 0..3),
                prop::collection::vec(any::<u8>(), 0..3),
            ),
            0..14,
        )
    ) {
        let (graph, nodes) = build_graph(&raw);

        let mut codec = JsonNodeCodec::new();
        let mut buf = Vec::new();
        write_plan(&mut buf, &graph, &nodes, &mut codec).unwrap();
        let plan = read_plan(&mut Cursor::new(buf), &mut codec).unwrap();

        // Same node multiset.
        prop_assert_eq!(plan.graph.node_count(), graph.node_count());
        let decoded = by_payload(&plan.graph);

        // Same edge membership per node and edge kind, same variant, and
        // the processed hook fired on every reconstructed node.
        for &node in &nodes {
            let payload = graph.node(node).unwrap().payload;
            let twin = decoded[&payload];
            prop_assert_eq!(graph.is_task(node), plan.graph.is_task(twin));
            prop_assert!(plan.graph.node(twin).unwrap().dependencies_processed());
            for edge in [WorkEdge::Dependency, WorkEdge::Must, WorkEdge::Finalizing] {
                prop_assert_eq!(
                    successor_payloads(&graph, node, edge),
                    successor_payloads(&plan.graph, twin, edge)
                );
            }
        }

        // Successors-first order on decode: every successor appears earlier
        // in the stream than the node referencing it.
        let position: HashMap<NodeId, usize> = plan
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &n)| (n, i))
            .collect();
        for &node in &plan.nodes {
            for succ in plan.graph.all_successors(node) {
                prop_assert!(position[&succ] < position[&node]);
            }
        }
    }
}
