//! Static adjacency model of the Clue-Less board.
//!
//! Nine rooms sit on a 3x3 grid joined by twelve hallways; the two diagonal
//! secret passages are stored as ordinary edges so a passage costs one step.

use crate::error::ClueError;
use crate::model::location::Location;
use crate::model::room::Room;
use std::collections::{BTreeSet, VecDeque};

const fn h(number: u8) -> Location {
    Location::hallway(number)
}

const fn r(room: Room) -> Location {
    Location::Room(room)
}

/// Every hallway sits between exactly two rooms.
const HALLWAY_EDGES: [(Location, Location); 24] = [
    (r(Room::Study), h(1)),
    (h(1), r(Room::Hall)),
    (r(Room::Hall), h(2)),
    (h(2), r(Room::Lounge)),
    (r(Room::Study), h(3)),
    (h(3), r(Room::Library)),
    (r(Room::Hall), h(4)),
    (h(4), r(Room::Billiard)),
    (r(Room::Lounge), h(5)),
    (h(5), r(Room::Dining)),
    (r(Room::Library), h(6)),
    (h(6), r(Room::Billiard)),
    (r(Room::Billiard), h(7)),
    (h(7), r(Room::Dining)),
    (r(Room::Library), h(8)),
    (h(8), r(Room::Conservatory)),
    (r(Room::Billiard), h(9)),
    (h(9), r(Room::Ballroom)),
    (r(Room::Dining), h(10)),
    (h(10), r(Room::Kitchen)),
    (r(Room::Conservatory), h(11)),
    (h(11), r(Room::Ballroom)),
    (r(Room::Ballroom), h(12)),
    (h(12), r(Room::Kitchen)),
];

const SECRET_PASSAGES: [(Location, Location); 2] = [
    (r(Room::Conservatory), r(Room::Lounge)),
    (r(Room::Kitchen), r(Room::Study)),
];

/// Undirected location graph. Built once and only queried afterwards, so a
/// single instance can be shared (e.g. behind an `Arc`) by every player.
#[derive(Debug, Clone)]
pub struct Board {
    adjacency: Vec<Vec<Location>>,
}

impl Board {
    pub fn standard() -> Self {
        let mut adjacency = vec![Vec::new(); Location::COUNT];
        for (a, b) in HALLWAY_EDGES.iter().chain(SECRET_PASSAGES.iter()) {
            adjacency[a.index()].push(*b);
            adjacency[b.index()].push(*a);
        }
        for neighbors in &mut adjacency {
            neighbors.sort();
        }
        Self { adjacency }
    }

    /// Direct neighbours of `location`, secret passages included.
    pub fn adjacent(&self, location: Location) -> &[Location] {
        &self.adjacency[location.index()]
    }

    pub fn is_adjacent(&self, from: Location, to: Location) -> bool {
        self.adjacent(from).contains(&to)
    }

    /// Locations whose shortest-path distance from `location` is exactly `n`.
    pub fn neighbors_at_distance(&self, location: Location, n: usize) -> BTreeSet<Location> {
        let mut dist = [usize::MAX; Location::COUNT];
        dist[location.index()] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(location);

        while let Some(current) = queue.pop_front() {
            let d = dist[current.index()];
            if d >= n {
                continue;
            }
            for &neighbor in self.adjacent(current) {
                if dist[neighbor.index()] <= d + 1 {
                    continue;
                }
                dist[neighbor.index()] = d + 1;
                queue.push_back(neighbor);
            }
        }

        Location::all()
            .filter(|candidate| dist[candidate.index()] == n)
            .collect()
    }

    /// Name-keyed variant of [`Board::neighbors_at_distance`].
    pub fn neighborhood(&self, name: &str, n: usize) -> Result<BTreeSet<Location>, ClueError> {
        let location = Location::parse(name)?;
        Ok(self.neighbors_at_distance(location, n))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
