use std::fmt::{Debug, Display};
use std::hash::Hash;

use thiserror::Error;

pub trait ParticipantId: Eq + Hash + Ord + Debug + Clone + Display {}
impl<T> ParticipantId for T where T: Eq + Hash + Ord + Debug + Clone + Display {}

/// A vertex of the review flow network.
///
/// Participant nodes borrow their id from the slice the network was built from, so the
/// same person shows up twice: once in the reviewer tier and once in the reviewee tier.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Node<'a, T> {
    Source,
    Sink,
    Reviewer(&'a T),
    Reviewee(&'a T),
}

impl<'a, T> Clone for Node<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Node<'a, T> {}

impl<'a, T> Node<'a, T> {
    pub fn participant(&self) -> Option<&'a T> {
        match *self {
            Node::Reviewer(id) | Node::Reviewee(id) => Some(id),
            Node::Source | Node::Sink => None,
        }
    }
}

impl<'a, T: Display> Display for Node<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Source => write!(f, "source"),
            Node::Sink => write!(f, "sink"),
            Node::Reviewer(id) => write!(f, "reviewer({})", id),
            Node::Reviewee(id) => write!(f, "reviewee({})", id),
        }
    }
}

// (from, to)
pub type Edge<'a, T> = (Node<'a, T>, Node<'a, T>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("every participant needs at least one reviewer")]
    NoReviewers,
    #[error(
        "cannot give {participants} participants {reviewers} reviewers each: \
         the number of reviewers must be smaller than the number of participants"
    )]
    TooManyReviewers { reviewers: usize, participants: usize },
    #[error("participant #{index} has an empty id")]
    EmptyId { index: usize },
    #[error("participant `{id}` is listed more than once")]
    DuplicateId { id: String },
    #[error("max flow is {achieved}, expected {expected}")]
    IncompleteFlow { achieved: i64, expected: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_participant() {
        let id = "ann".to_owned();
        assert_eq!(Node::Reviewer(&id).participant(), Some(&id));
        assert_eq!(Node::Reviewee(&id).participant(), Some(&id));
        assert_eq!(Node::<String>::Source.participant(), None);
        assert_eq!(Node::<String>::Sink.participant(), None);
    }

    #[test]
    fn test_roles_are_distinct_nodes() {
        let id = "ann";
        assert_ne!(Node::Reviewer(&id), Node::Reviewee(&id));
    }

    #[test]
    fn test_display() {
        // ids containing separators cannot collide with other nodes
        let id = "a_b";
        assert_eq!(Node::Reviewer(&id).to_string(), "reviewer(a_b)");
        assert_eq!(Node::<&str>::Sink.to_string(), "sink");
    }

    #[test]
    fn test_error_messages() {
        let err = ReviewError::TooManyReviewers {
            reviewers: 2,
            participants: 2,
        };
        assert!(err.to_string().starts_with("cannot give 2 participants 2 reviewers"));
        let err = ReviewError::DuplicateId { id: "x".into() };
        assert_eq!(err.to_string(), "participant `x` is listed more than once");
    }
}
