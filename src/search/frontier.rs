use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap},
    sync::Arc,
};

use bitvec::vec::BitVec;

use crate::{
    search::action::Action,
    shared::{Duration, Time},
};

/// Total order over frontier entries: `(accum_elapsed, absolute_arrival,
/// destination_platform_id, insertion_counter)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierKey {
    elapsed_s: u32,
    arrival_abs_s: u32,
    to_platform_id: Arc<str>,
    counter: u64,
}

#[derive(Debug, Clone)]
struct FrontierEntry {
    key: FrontierKey,
    action: Action,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// One traveller's independent Dijkstra-like priority frontier.
pub struct PersonFrontier {
    pub label: Arc<str>,
    heap: BinaryHeap<std::cmp::Reverse<FrontierEntry>>,
    visited: BitVec,
    parent: HashMap<u32, Action>,
    reached_first: HashMap<u32, (Time, Duration)>,
    pub unique_visited: usize,
}

impl PersonFrontier {
    pub fn new(label: Arc<str>, platform_count: usize, seed: u32, seed_id: Arc<str>, t0: Time) -> Self {
        let mut frontier = Self {
            label,
            heap: BinaryHeap::new(),
            visited: BitVec::repeat(false, platform_count),
            parent: HashMap::new(),
            reached_first: HashMap::new(),
            unique_visited: 0,
        };
        frontier.push(0, t0, seed_id.clone(), Action::start(seed, seed_id, t0), 0);
        frontier
    }

    /// `to_platform_id` is the destination's real GTFS identifier, not its
    /// internal index — it participates in the tie-break key.
    pub fn push(
        &mut self,
        elapsed_s: u32,
        arrival_abs: Time,
        to_platform_id: Arc<str>,
        action: Action,
        counter: u64,
    ) {
        let key = FrontierKey {
            elapsed_s,
            arrival_abs_s: arrival_abs.as_seconds(),
            to_platform_id,
            counter,
        };
        self.heap.push(std::cmp::Reverse(FrontierEntry { key, action }));
    }

    /// Peeks the smallest `(elapsed, arrival, to, counter)` key without
    /// popping it, for the global interleaving step.
    pub fn peek_key(&self) -> Option<(u32, u32, Arc<str>, u64)> {
        self.heap.peek().map(|e| {
            let key = &e.0.key;
            (
                key.elapsed_s,
                key.arrival_abs_s,
                key.to_platform_id.clone(),
                key.counter,
            )
        })
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pops the next candidate, alongside the elapsed cost it was keyed
    /// with. Returns `None` once the frontier is drained.
    pub fn pop(&mut self) -> Option<(u32, Action)> {
        self.heap.pop().map(|e| (e.0.key.elapsed_s, e.0.action))
    }

    pub fn is_visited(&self, platform_index: u32) -> bool {
        self.visited
            .get(platform_index as usize)
            .map(|b| *b)
            .unwrap_or(false)
    }

    /// Marks `action.to_platform_index` visited, records the predecessor
    /// (unless this is the seed's START action) and the first-reached
    /// `(arrival, elapsed)` pair if unset.
    pub fn settle(&mut self, action: &Action, elapsed: Duration) {
        let to = action.to_platform_index;
        self.visited.set(to as usize, true);
        self.unique_visited += 1;
        if !matches!(action.kind, crate::search::action::ActionKind::Start) {
            self.parent.insert(to, action.clone());
        }
        self.reached_first
            .entry(to)
            .or_insert((action.arrival_abs, elapsed));
    }

    pub fn has_reached(&self, platform_index: u32) -> bool {
        self.reached_first.contains_key(&platform_index)
    }

    pub fn reached_at(&self, platform_index: u32) -> Option<(Time, Duration)> {
        self.reached_first.get(&platform_index).copied()
    }

    /// Walks the predecessor map backward from `platform_index` to the
    /// seed, reversing to produce the ordered step sequence.
    pub fn reconstruct(&self, platform_index: u32) -> Vec<Action> {
        let mut steps = Vec::new();
        let mut current = platform_index;
        while let Some(action) = self.parent.get(&current) {
            let from = action.from_platform_index;
            steps.push(action.clone());
            match from {
                Some(from) => current = from,
                None => break,
            }
        }
        steps.reverse();
        steps
    }
}
