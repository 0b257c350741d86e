use std::collections::VecDeque;

use goalfsm_core::error::ErrorKind;
use goalfsm_core::fsm::{next_step, Transition};

const NODES: u8 = 7;

/// Hop distance from every node to `target` over available edges, by plain
/// forward BFS from each source.
fn distance(edges: &[Transition<'_, u8>], from: u8, target: u8) -> Option<usize> {
    let mut seen = [false; NODES as usize];
    let mut queue = VecDeque::from([(from, 0usize)]);
    seen[from as usize] = true;
    while let Some((node, hops)) = queue.pop_front() {
        if node == target {
            return Some(hops);
        }
        for edge in edges.iter().filter(|e| e.is_available() && e.source() == node) {
            let next = edge.destination();
            if !seen[next as usize] {
                seen[next as usize] = true;
                queue.push_back((next, hops + 1));
            }
        }
    }
    None
}

fn graph() -> Vec<Transition<'static, u8>> {
    let mut edges: Vec<_> = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 4),
        (0, 5),
        (5, 4),
        (4, 0),
        (2, 2),
        (1, 2),
        (6, 0),
        (3, 1),
    ]
    .into_iter()
    .map(|(s, d)| Transition::new(s, d))
    .collect();
    // Blocked shortcuts that would otherwise win.
    edges.push(Transition::new(0, 3).blocked());
    edges.push(Transition::new(1, 4).blocked());
    edges
}

#[test]
fn next_step_starts_a_shortest_path_for_every_pair() {
    let edges = graph();
    let mut scratch = [0u8; NODES as usize];

    for current in 0..NODES {
        for target in 0..NODES {
            let step = next_step(current, target, edges.iter(), &mut scratch).unwrap();
            let shortest = distance(&edges, current, target);

            match (step, shortest) {
                (None, None) => {}
                (None, Some(0)) => assert_eq!(current, target),
                (Some(t), Some(hops)) => {
                    assert!(hops > 0);
                    assert_eq!(t.source(), current);
                    assert!(t.is_available(), "blocked edge returned");
                    assert_eq!(
                        distance(&edges, t.destination(), target),
                        Some(hops - 1),
                        "{current} -> {target} stepped off a shortest path"
                    );
                }
                (step, shortest) => panic!(
                    "{current} -> {target}: search gave {step:?}, bfs distance {shortest:?}"
                ),
            }
        }
    }
}

#[test]
fn blocking_changes_reachability_only_through_available_edges() {
    let edges = graph();
    let mut scratch = [0u8; NODES as usize];

    // 6 only leaves through 6 -> 0; nothing enters 6.
    assert!(next_step(0, 6, edges.iter(), &mut scratch).unwrap().is_none());

    let step = next_step(0, 4, edges.iter(), &mut scratch).unwrap().unwrap();
    assert_eq!((step.source(), step.destination()), (0, 5));
}

#[test]
fn search_is_deterministic() {
    let edges = graph();
    let mut scratch = [0u8; NODES as usize];
    let first = next_step(6, 3, edges.iter(), &mut scratch).unwrap().unwrap();
    for _ in 0..5 {
        let again = next_step(6, 3, edges.iter(), &mut scratch).unwrap().unwrap();
        assert!(std::ptr::eq(first, again));
    }
}

#[test]
fn scratch_shorter_than_domain_fails_cleanly() {
    let edges = graph();
    let mut scratch = [0u8; 2];
    let err = next_step(6, 3, edges.iter(), &mut scratch).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ScratchExhausted);
}
