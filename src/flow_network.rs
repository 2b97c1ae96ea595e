use std::collections::HashMap;
use std::iter::once;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::{Edge, Node, ParticipantId};

// Kept anti-symmetric by `FlowNetwork::push_flow`: flow(u, v) == -flow(v, u).
#[derive(Debug, Clone)]
struct Flows<'a, T: ParticipantId>(HashMap<Edge<'a, T>, i64>);

impl<'a, T: ParticipantId> Flows<'a, T> {
    fn new() -> Self {
        Flows(HashMap::new())
    }
    fn get_or(&self, edge: &Edge<'a, T>, default: i64) -> i64 {
        *self.0.get(edge).unwrap_or(&default)
    }
    fn add(&mut self, edge: Edge<'a, T>, delta: i64) {
        *self.0.entry(edge).or_insert(0) += delta;
    }
}

/// Capacitated network with four tiers: source, reviewers, reviewees, sink.
///
/// Every participant gets a reviewer node fed by the source with capacity N and a reviewee
/// node draining into the sink with capacity N. Each reviewer is connected to every other
/// participant's reviewee with capacity 1. Pairs that were never configured have capacity 0,
/// which is also how the reverse (residual) direction of every edge is represented.
#[derive(Debug, Clone)]
pub struct FlowNetwork<'a, T: ParticipantId> {
    participants: &'a [T],
    reviewers_per_participant: i64,
    capacities: HashMap<Edge<'a, T>, i64>,
    flows: Flows<'a, T>,
}

impl<'a, T: ParticipantId> FlowNetwork<'a, T> {
    pub fn new(participants: &'a [T], reviewers_per_participant: i64) -> Self {
        let n = participants.len();
        let mut capacities = HashMap::with_capacity(n * (n + 1));
        for id in participants {
            capacities.insert((Node::Source, Node::Reviewer(id)), reviewers_per_participant);
            capacities.insert((Node::Reviewee(id), Node::Sink), reviewers_per_participant);
        }
        for reviewer in participants {
            for reviewee in participants.iter().filter(|reviewee| *reviewee != reviewer) {
                capacities.insert((Node::Reviewer(reviewer), Node::Reviewee(reviewee)), 1);
            }
        }
        debug!(
            "built review network: {} participants, {} edges, {} reviewers each",
            n,
            capacities.len(),
            reviewers_per_participant
        );
        FlowNetwork {
            participants,
            reviewers_per_participant,
            capacities,
            flows: Flows::new(),
        }
    }
    pub fn source(&self) -> Node<'a, T> {
        Node::Source
    }
    pub fn sink(&self) -> Node<'a, T> {
        Node::Sink
    }
    pub fn participants(&self) -> &'a [T] {
        self.participants
    }
    pub fn reviewers_per_participant(&self) -> i64 {
        self.reviewers_per_participant
    }
    pub fn capacity(&self, u: Node<'a, T>, v: Node<'a, T>) -> i64 {
        *self.capacities.get(&(u, v)).unwrap_or(&0)
    }
    pub fn flow(&self, u: Node<'a, T>, v: Node<'a, T>) -> i64 {
        self.flows.get_or(&(u, v), 0)
    }
    pub fn residual(&self, u: Node<'a, T>, v: Node<'a, T>) -> i64 {
        self.capacity(u, v) - self.flow(u, v)
    }
    /// Pushes `amount` units along `u -> v` and cancels the same amount on `v -> u`.
    ///
    /// The caller is responsible for `amount <= residual(u, v)`; nothing is clamped here.
    pub fn push_flow(&mut self, u: Node<'a, T>, v: Node<'a, T>, amount: i64) {
        debug_assert!(
            amount <= self.residual(u, v),
            "pushing {} on {} -> {} exceeds its residual capacity {}",
            amount,
            u,
            v,
            self.residual(u, v)
        );
        self.flows.add((u, v), amount);
        self.flows.add((v, u), -amount);
    }
    // Unshuffled adjacency, in participant order.
    fn adjacent(&self, node: Node<'a, T>) -> Vec<Node<'a, T>> {
        match node {
            Node::Source => self.participants.iter().map(Node::Reviewer).collect(),
            Node::Sink => self.participants.iter().map(Node::Reviewee).collect(),
            Node::Reviewer(id) => self
                .participants
                .iter()
                .filter(|other| *other != id)
                .map(Node::Reviewee)
                .chain(once(Node::Source))
                .collect(),
            Node::Reviewee(id) => self
                .participants
                .iter()
                .filter(|other| *other != id)
                .map(Node::Reviewer)
                .chain(once(Node::Sink))
                .collect(),
        }
    }
    /// All nodes `node` shares an edge with (in either direction), in a fresh random order.
    pub fn neighbors<R: Rng + ?Sized>(&self, node: Node<'a, T>, rng: &mut R) -> Vec<Node<'a, T>> {
        let mut out = self.adjacent(node);
        out.shuffle(rng);
        out
    }
    pub fn outflow(&self, node: Node<'a, T>) -> i64 {
        self.adjacent(node)
            .into_iter()
            .map(|v| self.flow(node, v).max(0))
            .sum()
    }
    pub fn inflow(&self, node: Node<'a, T>) -> i64 {
        self.adjacent(node)
            .into_iter()
            .map(|u| self.flow(u, node).max(0))
            .sum()
    }
    pub fn nodes(&self) -> Vec<Node<'a, T>> {
        once(Node::Source)
            .chain(self.participants.iter().map(Node::Reviewer))
            .chain(self.participants.iter().map(Node::Reviewee))
            .chain(once(Node::Sink))
            .collect()
    }
    // configured (forward) edges only
    pub fn edges(&self) -> impl Iterator<Item = (Edge<'a, T>, i64)> + '_ {
        self.capacities.iter().map(|(edge, c)| (*edge, *c))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_capacities() {
        let people = ids(&["a", "b", "c"]);
        let (a, b) = (&people[0], &people[1]);
        let net = FlowNetwork::new(&people, 2);
        assert_eq!(net.capacity(Node::Source, Node::Reviewer(a)), 2);
        assert_eq!(net.capacity(Node::Reviewee(b), Node::Sink), 2);
        assert_eq!(net.capacity(Node::Reviewer(a), Node::Reviewee(b)), 1);
        // no self review, no reverse capacity, no shortcuts
        assert_eq!(net.capacity(Node::Reviewer(a), Node::Reviewee(a)), 0);
        assert_eq!(net.capacity(Node::Reviewee(b), Node::Reviewer(a)), 0);
        assert_eq!(net.capacity(Node::Reviewer(a), Node::Source), 0);
        assert_eq!(net.capacity(Node::Source, Node::Sink), 0);
        // 3 source edges + 3 sink edges + 3 * 2 cross edges
        assert_eq!(net.edges().count(), 12);
        assert_eq!(net.nodes().len(), 8);
    }

    #[test]
    fn test_push_flow_is_antisymmetric() {
        let people = ids(&["a", "b"]);
        let (a, b) = (&people[0], &people[1]);
        let mut net = FlowNetwork::new(&people, 1);
        let (u, v) = (Node::Reviewer(a), Node::Reviewee(b));
        assert_eq!(net.residual(u, v), 1);
        assert_eq!(net.residual(v, u), 0);

        net.push_flow(u, v, 1);
        assert_eq!(net.flow(u, v), 1);
        assert_eq!(net.flow(v, u), -1);
        assert_eq!(net.residual(u, v), 0);
        // the cancelling direction opens up
        assert_eq!(net.residual(v, u), 1);

        net.push_flow(v, u, 1);
        assert_eq!(net.flow(u, v), 0);
        assert_eq!(net.flow(v, u), 0);
    }

    #[test]
    fn test_neighbors() {
        let people = ids(&["a", "b", "c", "d"]);
        let a = &people[0];
        let net = FlowNetwork::new(&people, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let from_reviewer: HashSet<_> = net.neighbors(Node::Reviewer(a), &mut rng).into_iter().collect();
        let expected: HashSet<_> = people[1..]
            .iter()
            .map(Node::Reviewee)
            .chain(once(Node::Source))
            .collect();
        assert_eq!(from_reviewer, expected);

        let from_reviewee: HashSet<_> = net.neighbors(Node::Reviewee(a), &mut rng).into_iter().collect();
        assert!(from_reviewee.contains(&Node::Sink));
        assert!(!from_reviewee.contains(&Node::Reviewer(a)));
        assert_eq!(from_reviewee.len(), 4);

        let from_source = net.neighbors(Node::Source, &mut rng);
        assert_eq!(from_source.len(), 4);
        assert!(from_source.iter().all(|node| matches!(node, Node::Reviewer(_))));
        let from_sink = net.neighbors(Node::Sink, &mut rng);
        assert!(from_sink.iter().all(|node| matches!(node, Node::Reviewee(_))));
    }

    #[test]
    fn test_neighbors_order_is_redrawn() {
        let people: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let net = FlowNetwork::new(&people, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let orders: HashSet<Vec<Node<String>>> = (0..10).map(|_| net.neighbors(Node::Source, &mut rng)).collect();
        assert!(orders.len() > 1);

        // same seed, same order
        let first = net.neighbors(Node::Sink, &mut ChaCha8Rng::seed_from_u64(3));
        let second = net.neighbors(Node::Sink, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(first, second);
    }

    #[test]
    fn test_inflow_outflow() {
        let people = ids(&["a", "b", "c"]);
        let (a, b) = (&people[0], &people[1]);
        let mut net = FlowNetwork::new(&people, 2);
        net.push_flow(Node::Source, Node::Reviewer(a), 1);
        net.push_flow(Node::Reviewer(a), Node::Reviewee(b), 1);
        net.push_flow(Node::Reviewee(b), Node::Sink, 1);
        assert_eq!(net.outflow(Node::Source), 1);
        assert_eq!(net.inflow(Node::Sink), 1);
        assert_eq!(net.inflow(Node::Reviewer(a)), 1);
        assert_eq!(net.outflow(Node::Reviewer(a)), 1);
        assert_eq!(net.inflow(Node::Reviewee(b)), net.outflow(Node::Reviewee(b)));
        assert_eq!(net.outflow(Node::Reviewer(b)), 0);
    }
}
