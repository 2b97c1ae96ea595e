use std::collections::HashSet;
use std::vec::IntoIter;

use rand::Rng;

use crate::common::{Edge, Node, ParticipantId};
use crate::flow_network::FlowNetwork;

struct Frame<'a, T> {
    node: Node<'a, T>,
    candidates: IntoIter<Node<'a, T>>,
}

/// Depth-first search for a path from `from` to `to` whose edges all have positive residual
/// capacity.
///
/// Neighbors are tried in the random order the network hands out, so repeated searches on
/// the same network explore different paths. A directed edge is used at most once per path.
/// A node whose candidates have all been tried without reaching `to` is dead for the rest of
/// the call and never entered again, so every edge is descended at most once and one call
/// draws at most one neighbor list per edge. Returns `None` once every candidate is
/// exhausted.
pub fn find_augmenting_path<'a, T: ParticipantId, R: Rng + ?Sized>(
    network: &FlowNetwork<'a, T>,
    from: Node<'a, T>,
    to: Node<'a, T>,
    rng: &mut R,
) -> Option<Vec<Edge<'a, T>>> {
    let mut path: Vec<Edge<'a, T>> = Vec::new();
    if from == to {
        return Some(path);
    }
    // mirrors `path`, for constant time membership checks
    let mut used: HashSet<Edge<'a, T>> = HashSet::new();
    // nodes that cannot reach `to` in this call
    let mut dead: HashSet<Node<'a, T>> = HashSet::new();
    let mut stack = vec![Frame {
        node: from,
        candidates: network.neighbors(from, rng).into_iter(),
    }];
    while let Some(frame) = stack.last_mut() {
        let u = frame.node;
        let Some(v) = frame.candidates.next() else {
            // dead end: backtrack over the edge that led here
            dead.insert(u);
            stack.pop();
            if let Some(edge) = path.pop() {
                used.remove(&edge);
            }
            continue;
        };
        let edge = (u, v);
        if dead.contains(&v) || network.residual(u, v) <= 0 || used.contains(&edge) {
            continue;
        }
        path.push(edge);
        used.insert(edge);
        if v == to {
            return Some(path);
        }
        stack.push(Frame {
            node: v,
            candidates: network.neighbors(v, rng).into_iter(),
        });
    }
    None
}
