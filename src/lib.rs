//! Random peer review assignment.
//!
//! Every participant reviews exactly N others and is reviewed by exactly N others, never
//! themselves. The assignment is found as a maximum flow through a four tier network
//! (source, reviewers, reviewees, sink) using augmenting paths whose neighbor order is drawn
//! from a caller supplied random generator.

pub mod assignment;
pub mod common;
pub mod flow_network;
pub mod path_search;
pub mod solver;

use std::collections::HashSet;

use log::error;
use rand::Rng;

pub use assignment::Assignment;
pub use common::{Edge, Node, ParticipantId, ReviewError};
pub use flow_network::FlowNetwork;
pub use path_search::find_augmenting_path;
pub use solver::ford_fulkerson;

pub fn check_participants<T: ParticipantId>(
    participants: &[T],
    reviewers_per_participant: usize,
) -> Result<(), ReviewError> {
    let mut seen = HashSet::with_capacity(participants.len());
    for (index, id) in participants.iter().enumerate() {
        if id.to_string().is_empty() {
            return Err(ReviewError::EmptyId { index });
        }
        if !seen.insert(id) {
            return Err(ReviewError::DuplicateId { id: id.to_string() });
        }
    }
    if reviewers_per_participant < 1 {
        return Err(ReviewError::NoReviewers);
    }
    if reviewers_per_participant >= participants.len() {
        return Err(ReviewError::TooManyReviewers {
            reviewers: reviewers_per_participant,
            participants: participants.len(),
        });
    }
    Ok(())
}

/// Draws a review assignment where everybody reviews and is reviewed by
/// `reviewers_per_participant` others.
///
/// Input is validated before any network is built. A flow that falls short of
/// `participants * reviewers_per_participant` aborts with [`ReviewError::IncompleteFlow`]
/// instead of handing back a partial assignment.
pub fn assign_reviewers<T: ParticipantId, R: Rng + ?Sized>(
    participants: &[T],
    reviewers_per_participant: usize,
    rng: &mut R,
) -> Result<Assignment<T>, ReviewError> {
    check_participants(participants, reviewers_per_participant)?;
    // n < participants.len(), so both fit
    let n = reviewers_per_participant as i64;
    let expected = participants.len() as i64 * n;

    let mut network = FlowNetwork::new(participants, n);
    let (source, sink) = (network.source(), network.sink());
    let achieved = ford_fulkerson(&mut network, source, sink, rng);
    if achieved != expected {
        error!("max flow {} falls short of {}", achieved, expected);
        return Err(ReviewError::IncompleteFlow { achieved, expected });
    }
    Ok(Assignment::from_network(&network))
}
