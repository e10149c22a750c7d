use super::params::TieBreaker;
use clue_core::board::Board;
use clue_core::model::location::Location;
use std::collections::BTreeSet;

/// Chosen destination and whether it had to fall back to a visited location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    pub destination: Location,
    pub revisit: bool,
}

pub struct MovePlanner;

impl MovePlanner {
    /// Picks the next location one step from `current`.
    ///
    /// Occupied locations are never entered. Unvisited neighbours are preferred;
    /// when every free neighbour has been visited before, one of those is taken
    /// instead. Returns `None` when every neighbour is occupied.
    pub fn choose(
        board: &Board,
        current: Location,
        occupied: &BTreeSet<Location>,
        visited: &BTreeSet<Location>,
        tie_breaker: &mut TieBreaker,
    ) -> Option<MovePlan> {
        let free: BTreeSet<Location> = board
            .neighbors_at_distance(current, 1)
            .into_iter()
            .filter(|location| !occupied.contains(location))
            .collect();

        let fresh: BTreeSet<Location> = free.difference(visited).copied().collect();
        if let Some(destination) = tie_breaker.pick(&fresh) {
            return Some(MovePlan {
                destination,
                revisit: false,
            });
        }

        tie_breaker.pick(&free).map(|destination| MovePlan {
            destination,
            revisit: true,
        })
    }
}
