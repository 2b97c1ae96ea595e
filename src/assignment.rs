use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::common::{Node, ParticipantId};
use crate::flow_network::FlowNetwork;

/// Who reviews whom, read off a solved [`FlowNetwork`].
///
/// Both maps have every participant as a key, in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment<T: ParticipantId> {
    reviewers_per_participant: usize,
    needs_to_review: BTreeMap<T, BTreeSet<T>>,
    reviewed_by: BTreeMap<T, BTreeSet<T>>,
}

impl<T: ParticipantId> Assignment<T> {
    pub fn from_network(network: &FlowNetwork<'_, T>) -> Self {
        let participants = network.participants();
        let mut needs_to_review: BTreeMap<T, BTreeSet<T>> =
            participants.iter().map(|id| (id.clone(), BTreeSet::new())).collect();
        let mut reviewed_by = needs_to_review.clone();
        for reviewer in participants {
            for reviewee in participants.iter().filter(|reviewee| *reviewee != reviewer) {
                if network.flow(Node::Reviewer(reviewer), Node::Reviewee(reviewee)) <= 0 {
                    continue;
                }
                needs_to_review
                    .entry(reviewer.clone())
                    .or_default()
                    .insert(reviewee.clone());
                reviewed_by
                    .entry(reviewee.clone())
                    .or_default()
                    .insert(reviewer.clone());
            }
        }
        Assignment {
            reviewers_per_participant: network.reviewers_per_participant().max(0) as usize,
            needs_to_review,
            reviewed_by,
        }
    }
    pub fn reviewers_per_participant(&self) -> usize {
        self.reviewers_per_participant
    }
    pub fn needs_to_review(&self) -> &BTreeMap<T, BTreeSet<T>> {
        &self.needs_to_review
    }
    pub fn reviewed_by(&self) -> &BTreeMap<T, BTreeSet<T>> {
        &self.reviewed_by
    }
    pub fn num_participants(&self) -> usize {
        self.needs_to_review.len()
    }
    // equals the max flow of the network this was read from
    pub fn total_reviews(&self) -> usize {
        self.needs_to_review.values().map(BTreeSet::len).sum()
    }
    /// One node per participant, one `reviewer -> reviewee` edge per review.
    pub fn to_graph(&self) -> DiGraph<T, ()> {
        let mut graph = DiGraph::with_capacity(self.num_participants(), self.total_reviews());
        let indices: HashMap<&T, NodeIndex> = self
            .needs_to_review
            .keys()
            .map(|id| (id, graph.add_node(id.clone())))
            .collect();
        for (reviewer, reviewees) in &self.needs_to_review {
            for reviewee in reviewees {
                graph.add_edge(indices[reviewer], indices[reviewee], ());
            }
        }
        graph
    }
}
