//! Travel queue of one elevator
//!
//! The queue holds pending stops in the exact order the car will visit them. A floor
//! appears at most once; requesting a queued floor again moves it instead of adding
//! a second entry.

use crate::types::FloorId;
use serde::Serialize;
use std::collections::VecDeque;

/// Ordered, duplicate-free sequence of pending stops
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TravelQueue {
    stops: VecDeque<FloorId>,
}

impl TravelQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// The floor to go: the stop the car is currently heading for (or will head for next)
    pub fn head(&self) -> Option<FloorId> {
        self.stops.front().copied()
    }

    /// Append a stop at the tail. A floor that is already queued keeps its place.
    ///
    /// Returns `true` if the floor was added.
    pub fn push_back(&mut self, floor: FloorId) -> bool {
        if self.contains(floor) {
            return false;
        }
        self.stops.push_back(floor);
        true
    }

    /// Put a stop at the head, removing any earlier occurrence first
    pub fn move_to_front(&mut self, floor: FloorId) {
        self.remove(floor);
        self.stops.push_front(floor);
    }

    /// Put a stop directly behind the head, removing any earlier occurrence first.
    ///
    /// Used while the head is latched as an in-flight target. If `floor` is the head
    /// itself nothing changes; on an empty queue the floor becomes the head.
    pub fn insert_after_head(&mut self, floor: FloorId) {
        if self.head() == Some(floor) {
            return;
        }
        self.remove(floor);
        let position = self.stops.len().min(1);
        self.stops.insert(position, floor);
    }

    /// Take the head off the queue
    pub fn pop_front(&mut self) -> Option<FloorId> {
        self.stops.pop_front()
    }

    /// Remove a floor wherever it is. Returns `true` if it was queued.
    pub fn remove(&mut self, floor: FloorId) -> bool {
        match self.stops.iter().position(|queued| *queued == floor) {
            Some(index) => {
                self.stops.remove(index);
                true
            }
            None => false,
        }
    }

    /// Check whether a floor is queued
    pub fn contains(&self, floor: FloorId) -> bool {
        self.stops.contains(&floor)
    }

    /// Number of pending stops
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Check whether no stops are pending
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Iterate over the pending stops in visiting order
    pub fn iter(&self) -> impl Iterator<Item = FloorId> + '_ {
        self.stops.iter().copied()
    }

    /// Copy the pending stops into a vector, in visiting order
    pub fn to_vec(&self) -> Vec<FloorId> {
        self.iter().collect()
    }
}
