//! Path reconstruction from predecessor links.

use super::predecessors::Predecessors;
use crate::{error::ReconstructionError, graph::Cell};

/// Walks predecessor links back from `goal` to `start` and returns the path start-first.
///
/// Pure with respect to `preds`: reconstructing twice from the same map yields
/// the same sequence.
///
/// # Errors
/// - [`ReconstructionError::MissingPredecessor`] if a cell before the start has no entry.
/// - [`ReconstructionError::Cycle`] if the chain is longer than the maze has cells.
pub fn reconstruct<P>(start: Cell, goal: Cell, preds: &P) -> Result<Vec<Cell>, ReconstructionError>
where
    P: Predecessors + ?Sized,
{
    let bound = preds.chain_bound();
    let mut path = vec![goal];
    let mut cur = goal;

    while cur != start {
        if path.len() >= bound {
            return Err(ReconstructionError::Cycle {
                goal,
                steps: path.len() - 1,
            });
        }
        cur = preds
            .predecessor(cur)
            .ok_or(ReconstructionError::MissingPredecessor { cell: cur })?;
        path.push(cur);
    }

    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::search::PredecessorMap;

    #[test]
    fn walks_chain_back_to_start() {
        let map = PredecessorMap::new(5);
        map.record(1, 0);
        map.record(2, 1);
        map.record(4, 2);
        assert_eq!(reconstruct(0, 4, &map).unwrap(), vec![0, 1, 2, 4]);
    }

    #[test]
    fn start_equal_to_goal_is_a_single_cell() {
        let map = PredecessorMap::new(3);
        assert_eq!(reconstruct(2, 2, &map).unwrap(), vec![2]);
    }

    #[test]
    fn reconstruction_is_idempotent() {
        let map = PredecessorMap::new(4);
        map.record(3, 1);
        map.record(1, 0);
        let first = reconstruct(0, 3, &map).unwrap();
        let second = reconstruct(0, 3, &map).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn broken_chain_is_reported() {
        let map = PredecessorMap::new(4);
        map.record(3, 2);
        assert_eq!(
            reconstruct(0, 3, &map),
            Err(ReconstructionError::MissingPredecessor { cell: 2 })
        );
    }

    #[test]
    fn loop_is_reported() {
        let map = PredecessorMap::new(3);
        map.record(1, 2);
        map.record(2, 1);
        assert!(matches!(
            reconstruct(0, 1, &map),
            Err(ReconstructionError::Cycle { goal: 1, .. })
        ));
    }

    #[test]
    fn hash_map_predecessors_work_too() {
        let preds: HashMap<Cell, Cell> = [(7, 3), (3, 5)].into_iter().collect();
        assert_eq!(reconstruct(5, 7, &preds).unwrap(), vec![5, 3, 7]);
    }
}
