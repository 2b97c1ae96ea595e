use log::{debug, trace};
use rand::Rng;

use crate::common::{Node, ParticipantId};
use crate::flow_network::FlowNetwork;
use crate::path_search::find_augmenting_path;

/// Ford-Fulkerson: augment along random paths until none is left, then report the flow
/// leaving `source`.
///
/// Capacities are integral, so every augmentation adds at least one unit and the loop runs
/// at most (total source capacity) times.
pub fn ford_fulkerson<'a, T: ParticipantId, R: Rng + ?Sized>(
    network: &mut FlowNetwork<'a, T>,
    source: Node<'a, T>,
    sink: Node<'a, T>,
    rng: &mut R,
) -> i64 {
    let mut augmentations = 0usize;
    while let Some(path) = find_augmenting_path(network, source, sink, rng) {
        let Some(delta) = path.iter().map(|(u, v)| network.residual(*u, *v)).min() else {
            // source == sink, nothing to push
            break;
        };
        for (u, v) in &path {
            network.push_flow(*u, *v, delta);
        }
        augmentations += 1;
        trace!("augmented {} along a path of {} edges", delta, path.len());
    }
    let max_flow = network.outflow(source);
    debug!("max flow {} after {} augmentations", max_flow, augmentations);
    max_flow
}
