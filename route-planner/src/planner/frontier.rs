//! Search frontiers: partial itineraries waiting to be expanded.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::sync::Arc;

use crate::domain::{Departure, Itinerary};

/// A partial itinerary on the frontier.
///
/// Always holds at least one leg; the city reached is the last leg's
/// destination.
#[derive(Debug, Clone)]
pub(crate) struct Node<L> {
    pub legs: Vec<Arc<Departure>>,
    /// Criterion-specific accumulated state.
    pub label: L,
    /// Accumulated cost under the search criterion.
    pub cost: u64,
}

impl<L> Node<L> {
    /// The city this partial itinerary has reached.
    pub fn city(&self) -> &str {
        &self.legs[self.legs.len() - 1].destination
    }

    /// Number of legs so far.
    pub fn hops(&self) -> usize {
        self.legs.len()
    }

    /// Number of transfers so far.
    pub fn transfers(&self) -> usize {
        self.legs.len() - 1
    }

    /// Convert into an itinerary.
    pub fn into_itinerary(self) -> Option<Itinerary> {
        Itinerary::new(self.legs).ok()
    }
}

/// Ordering policy for partial itineraries.
pub(crate) trait Frontier<L>: Default {
    fn push(&mut self, node: Node<L>);
    fn pop(&mut self) -> Option<Node<L>>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Min-priority frontier ordered by (cost, legs, insertion order).
pub(crate) struct CostQueue<L> {
    heap: BinaryHeap<Queued<L>>,
    next_seq: u64,
}

impl<L> Default for CostQueue<L> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<L> Frontier<L> for CostQueue<L> {
    fn push(&mut self, node: Node<L>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Queued { node, seq });
    }

    fn pop(&mut self) -> Option<Node<L>> {
        self.heap.pop().map(|queued| queued.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

struct Queued<L> {
    node: Node<L>,
    seq: u64,
}

impl<L> Queued<L> {
    fn key(&self) -> (u64, usize, u64) {
        (self.node.cost, self.node.hops(), self.seq)
    }
}

impl<L> PartialEq for Queued<L> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<L> Eq for Queued<L> {}

impl<L> PartialOrd for Queued<L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<L> Ord for Queued<L> {
    // Reversed: BinaryHeap is a max-heap
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// First-in first-out frontier for breadth-first search.
pub(crate) struct FifoQueue<L> {
    queue: VecDeque<Node<L>>,
}

impl<L> Default for FifoQueue<L> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<L> Frontier<L> for FifoQueue<L> {
    fn push(&mut self, node: Node<L>) {
        self.queue.push_back(node);
    }

    fn pop(&mut self) -> Option<Node<L>> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransportMode;

    fn node(to: &str, legs: usize, cost: u64) -> Node<()> {
        let mut chain = Vec::new();
        let mut from = "S".to_string();
        for i in 0..legs {
            let dest = if i + 1 == legs {
                to.to_string()
            } else {
                format!("X{i}")
            };
            chain.push(Arc::new(Departure::new(
                TransportMode::Bus,
                &from,
                &dest,
                "08:00",
                10,
                10,
                0,
            )));
            from = dest;
        }
        Node {
            legs: chain,
            label: (),
            cost,
        }
    }

    #[test]
    fn cost_queue_pops_cheapest() {
        let mut q = CostQueue::default();
        q.push(node("A", 1, 30));
        q.push(node("B", 1, 10));
        q.push(node("C", 1, 20));

        assert_eq!(q.len(), 3);
        assert_eq!(q.pop().unwrap().city(), "B");
        assert_eq!(q.pop().unwrap().city(), "C");
        assert_eq!(q.pop().unwrap().city(), "A");
        assert!(q.pop().is_none());
        assert!(q.is_empty());
    }

    #[test]
    fn cost_queue_ties_prefer_fewer_legs_then_insertion() {
        let mut q = CostQueue::default();
        q.push(node("Long", 3, 10));
        q.push(node("First", 1, 10));
        q.push(node("Second", 1, 10));

        assert_eq!(q.pop().unwrap().city(), "First");
        assert_eq!(q.pop().unwrap().city(), "Second");
        assert_eq!(q.pop().unwrap().city(), "Long");
    }

    #[test]
    fn fifo_queue_keeps_order() {
        let mut q = FifoQueue::default();
        q.push(node("A", 1, 30));
        q.push(node("B", 1, 10));

        assert_eq!(q.pop().unwrap().city(), "A");
        assert_eq!(q.pop().unwrap().city(), "B");
        assert!(q.is_empty());
    }

    #[test]
    fn node_accessors() {
        let n = node("D", 3, 0);
        assert_eq!(n.city(), "D");
        assert_eq!(n.hops(), 3);
        assert_eq!(n.transfers(), 2);

        let itinerary = n.into_itinerary().unwrap();
        assert_eq!(itinerary.origin(), "S");
        assert_eq!(itinerary.destination(), "D");
    }
}
