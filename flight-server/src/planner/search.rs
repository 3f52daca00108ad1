//! Time-respecting best-first itinerary search.
//!
//! Plain Dijkstra settles cities. Here whether an edge can be taken depends
//! on when the traveller reached its tail city, so the frontier carries the
//! whole path and states are settled by `(city, timestamp)` instead.
//!
//! The origin starts with an unbound timestamp. Expanding it binds the
//! path to the departure time of each outgoing flight in turn, so every
//! flight out of the origin starts its own candidate itinerary.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashSet};

use tracing::{debug, trace};

use crate::domain::{PlanError, ScheduleDetail};

use super::config::SearchConfig;
use super::graph::Graph;

/// Itineraries found by the search, bucketed by total duration.
pub type ItinerariesByDuration = BTreeMap<i64, Vec<Vec<ScheduleDetail>>>;

/// A partial itinerary on the search frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathState {
    /// Elapsed time from the first departure, layovers included.
    duration: i64,

    /// Points visited so far. The last one is the frontier.
    nodes: Vec<ScheduleDetail>,
}

impl PathState {
    fn seed(origin: &str) -> Self {
        Self {
            duration: 0,
            nodes: vec![ScheduleDetail::unbound(origin)],
        }
    }

    fn frontier(&self) -> &ScheduleDetail {
        // Never empty: seeded with the origin and only ever extended.
        &self.nodes[self.nodes.len() - 1]
    }
}

/// Heap entry ordering states by duration, then fewer points, then
/// insertion order. `BinaryHeap` is a max-heap, so the ordering is reversed.
#[derive(Debug)]
struct QueueEntry {
    seq: usize,
    state: PathState,
}

impl QueueEntry {
    fn key(&self) -> (i64, usize, usize) {
        (self.state.duration, self.state.nodes.len(), self.seq)
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Result of a search.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Shortest duration reaching the destination; 0 if it was never reached.
    pub min_duration: i64,

    /// Every itinerary that reached the destination, keyed by duration.
    /// Only the minimal duration is ever populated.
    pub itineraries: ItinerariesByDuration,

    /// Number of states popped and settled.
    pub states_explored: usize,
}

impl SearchOutcome {
    /// Returns true if the destination was reached.
    pub fn found(&self) -> bool {
        !self.itineraries.is_empty()
    }
}

fn state_key(point: &ScheduleDetail) -> (String, i64) {
    (point.city.clone(), point.timestamp)
}

/// Find all minimal-duration itineraries from `origin` to `destination`.
///
/// Legs are only chained when the next one departs at or after the
/// previous arrival. Waiting between the two adds to the duration and
/// inserts an explicit departure point at the connecting city.
pub fn search(
    graph: &Graph,
    origin: &str,
    destination: &str,
    config: &SearchConfig,
) -> Result<SearchOutcome, PlanError> {
    let mut queue = BinaryHeap::new();
    let mut seq = 0;
    queue.push(QueueEntry {
        seq,
        state: PathState::seed(origin),
    });

    let mut visited: HashSet<(String, i64)> = HashSet::new();
    let mut itineraries = ItinerariesByDuration::new();
    let mut min_duration: Option<i64> = None;
    let mut states_explored = 0;

    while let Some(QueueEntry { state, .. }) = queue.pop() {
        // The queue is duration-ordered: once something longer than the
        // best arrival surfaces, nothing that follows can tie it.
        if min_duration.is_some_and(|min| state.duration > min) {
            break;
        }

        let node = state.frontier().clone();
        if visited.contains(&state_key(&node)) {
            continue;
        }

        states_explored += 1;
        if states_explored > config.max_states {
            debug!(
                limit = config.max_states,
                queued = queue.len(),
                "Search state limit exceeded"
            );
            return Err(PlanError::SearchLimitExceeded {
                limit: config.max_states,
            });
        }

        if node.city == destination {
            trace!(duration = state.duration, points = state.nodes.len(), "Reached destination");
            min_duration = Some(state.duration);
            itineraries.entry(state.duration).or_default().push(state.nodes);
            continue;
        }

        let unresolved = node.is_unbound();

        for edge in graph.edges_of(&node.city) {
            if edge.is_reverse {
                continue;
            }

            if visited.contains(&state_key(&edge.target)) {
                continue;
            }

            // Can't board a flight that has already left.
            if !unresolved && node.timestamp > edge.origin_departure {
                continue;
            }

            let mut nodes = if unresolved {
                state
                    .nodes
                    .iter()
                    .map(|p| {
                        if p.city == node.city && p.is_unbound() {
                            ScheduleDetail::new(p.city.clone(), edge.origin_departure)
                        } else {
                            p.clone()
                        }
                    })
                    .collect()
            } else {
                state.nodes.clone()
            };

            let mut layover = 0;
            if node.timestamp > 0 && node.timestamp < edge.origin_departure {
                layover = edge.origin_departure - node.timestamp;
                nodes.push(ScheduleDetail::new(node.city.clone(), edge.origin_departure));
            }

            nodes.push(edge.target.clone());

            seq += 1;
            queue.push(QueueEntry {
                seq,
                state: PathState {
                    duration: state.duration + edge.duration + layover,
                    nodes,
                },
            });

            if unresolved {
                visited.insert((node.city.clone(), edge.origin_departure));
            }
        }

        visited.insert(state_key(&node));
    }

    debug!(
        min_duration = min_duration.unwrap_or(0),
        candidates = itineraries.values().map(Vec::len).sum::<usize>(),
        states_explored,
        "Itinerary search complete"
    );

    Ok(SearchOutcome {
        min_duration: min_duration.unwrap_or(0),
        itineraries,
        states_explored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlightDetail;

    fn leg(from: &str, dep: i64, to: &str, arr: i64) -> FlightDetail {
        FlightDetail::new(ScheduleDetail::new(from, dep), ScheduleDetail::new(to, arr))
    }

    fn point(city: &str, timestamp: i64) -> ScheduleDetail {
        ScheduleDetail::new(city, timestamp)
    }

    fn run(legs: &[FlightDetail], origin: &str, destination: &str) -> SearchOutcome {
        let graph = Graph::build(legs).unwrap();
        search(&graph, origin, destination, &SearchConfig::default()).unwrap()
    }

    #[test]
    fn queue_pops_shortest_first() {
        let mut heap = BinaryHeap::new();
        for (seq, duration) in [(0, 9), (1, 3), (2, 6)] {
            heap.push(QueueEntry {
                seq,
                state: PathState {
                    duration,
                    nodes: vec![point("A", 1)],
                },
            });
        }
        let order: Vec<i64> = std::iter::from_fn(|| heap.pop())
            .map(|e| e.state.duration)
            .collect();
        assert_eq!(order, vec![3, 6, 9]);
    }

    #[test]
    fn queue_prefers_fewer_points_then_earlier_insertion() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry {
            seq: 0,
            state: PathState {
                duration: 5,
                nodes: vec![point("A", 1), point("B", 3), point("Z", 6)],
            },
        });
        heap.push(QueueEntry {
            seq: 1,
            state: PathState {
                duration: 5,
                nodes: vec![point("A", 1), point("Z", 6)],
            },
        });
        heap.push(QueueEntry {
            seq: 2,
            state: PathState {
                duration: 5,
                nodes: vec![point("A", 2), point("Z", 7)],
            },
        });

        assert_eq!(heap.pop().map(|e| e.seq), Some(1));
        assert_eq!(heap.pop().map(|e| e.seq), Some(2));
        assert_eq!(heap.pop().map(|e| e.seq), Some(0));
    }

    #[test]
    fn direct_flight() {
        let outcome = run(&[leg("A", 1, "Z", 10)], "A", "Z");
        assert_eq!(outcome.min_duration, 9);
        assert_eq!(
            outcome.itineraries[&9],
            vec![vec![point("A", 1), point("Z", 10)]]
        );
    }

    #[test]
    fn shorter_direct_beats_connection() {
        let legs = [leg("A", 1, "Z", 10), leg("A", 2, "B", 8), leg("B", 8, "Z", 15)];
        let outcome = run(&legs, "A", "Z");
        assert_eq!(outcome.min_duration, 9);
        assert_eq!(outcome.itineraries.len(), 1);
        assert!(!outcome.itineraries.contains_key(&13));
    }

    #[test]
    fn layover_adds_wait_and_point() {
        let legs = [leg("A", 1, "B", 3), leg("B", 5, "Z", 9)];
        let outcome = run(&legs, "A", "Z");
        assert_eq!(outcome.min_duration, 8);
        assert_eq!(
            outcome.itineraries[&8],
            vec![vec![point("A", 1), point("B", 3), point("B", 5), point("Z", 9)]]
        );
    }

    #[test]
    fn zero_minute_connection_is_allowed() {
        let legs = [leg("A", 2, "B", 8), leg("B", 8, "Z", 15)];
        let outcome = run(&legs, "A", "Z");
        assert_eq!(outcome.min_duration, 13);
        assert_eq!(
            outcome.itineraries[&13],
            vec![vec![point("A", 2), point("B", 8), point("Z", 15)]]
        );
    }

    #[test]
    fn departed_connection_is_not_taken() {
        let legs = [leg("A", 1, "B", 10), leg("B", 8, "Z", 12)];
        let outcome = run(&legs, "A", "Z");
        assert!(!outcome.found());
        assert_eq!(outcome.min_duration, 0);
    }

    #[test]
    fn reverse_edges_are_not_traversed() {
        // Only Z->A exists; A->Z must not be inferred from its back-edge.
        let outcome = run(&[leg("Z", 1, "A", 10)], "A", "Z");
        assert!(!outcome.found());
    }

    #[test]
    fn unknown_origin_finds_nothing() {
        let outcome = run(&[leg("A", 1, "Z", 10)], "Q", "Z");
        assert!(!outcome.found());
        assert_eq!(outcome.states_explored, 1);
    }

    #[test]
    fn later_start_can_be_shorter() {
        // Leaving at 1 means waiting until 20; leaving at 18 is much shorter.
        let legs = [
            leg("A", 1, "B", 2),
            leg("A", 18, "B", 19),
            leg("B", 20, "Z", 25),
        ];
        let outcome = run(&legs, "A", "Z");
        assert_eq!(outcome.min_duration, 7);
        assert_eq!(
            outcome.itineraries[&7],
            vec![vec![point("A", 18), point("B", 19), point("B", 20), point("Z", 25)]]
        );
    }

    #[test]
    fn ties_are_all_kept() {
        let legs = [
            leg("A", 1, "B", 4),
            leg("B", 4, "Z", 10),
            leg("A", 1, "Z", 10),
        ];
        let outcome = run(&legs, "A", "Z");
        assert_eq!(outcome.min_duration, 9);
        let tied = &outcome.itineraries[&9];
        assert_eq!(tied.len(), 2);
        // Fewer points surface first.
        assert_eq!(tied[0], vec![point("A", 1), point("Z", 10)]);
        assert_eq!(tied[1], vec![point("A", 1), point("B", 4), point("Z", 10)]);
    }

    #[test]
    fn revisiting_a_city_respects_time() {
        // A -> B -> A -> Z: the second departure from A must not predate
        // the return to A.
        let legs = [
            leg("A", 1, "B", 2),
            leg("B", 3, "A", 4),
            leg("A", 3, "Z", 5),
        ];
        let outcome = run(&legs, "A", "Z");
        assert_eq!(outcome.min_duration, 2);
        assert_eq!(
            outcome.itineraries[&2],
            vec![vec![point("A", 3), point("Z", 5)]]
        );
    }

    #[test]
    fn connecting_city_expands_every_onward_leg() {
        let legs = [leg("A", 1, "B", 3), leg("B", 5, "C", 6), leg("B", 5, "Z", 7)];
        let outcome = run(&legs, "A", "Z");

        assert_eq!(outcome.min_duration, 6);
        assert_eq!(
            outcome.itineraries[&6],
            vec![vec![point("A", 1), point("B", 3), point("B", 5), point("Z", 7)]]
        );
        // Origin, B@3, C@6, then the destination.
        assert_eq!(outcome.states_explored, 4);
    }

    #[test]
    fn zero_length_cycle_terminates() {
        let legs = [leg("A", 5, "B", 5), leg("B", 5, "A", 5)];
        let outcome = run(&legs, "A", "Z");
        assert!(!outcome.found());
    }

    #[test]
    fn state_limit_is_enforced() {
        let legs = [leg("A", 1, "B", 2), leg("B", 3, "C", 4), leg("C", 5, "Z", 6)];
        let graph = Graph::build(&legs).unwrap();
        let result = search(&graph, "A", "Z", &SearchConfig::new(2));
        assert_eq!(result.unwrap_err(), PlanError::SearchLimitExceeded { limit: 2 });
    }
}
