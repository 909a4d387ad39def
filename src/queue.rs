use crate::collections::FxHashMap;

use std::{
    collections::BinaryHeap,
    hash::Hash,
    fmt::Debug,
    cmp::Ordering
};
use num_traits::float::FloatCore;
use ordered_float::OrderedFloat;


/// Heap entry
/// - BinaryHeap is a max-heap, so ordering is reversed to pop the lowest priority first
/// - float priorities are totally ordered through OrderedFloat
#[derive(Debug)]
struct Entry<T, C> {
    priority: OrderedFloat<C>,
    item: T,
}

impl<T, C: FloatCore> Ord for Entry<T, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
    }
}
impl<T, C: FloatCore> PartialOrd for Entry<T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T, C: FloatCore> PartialEq for Entry<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}
impl<T, C: FloatCore> Eq for Entry<T, C> {}


/// Min priority queue over float priorities
/// The same item may be pushed several times, callers skip stale pops themselves.
/// Order between equal priorities is unspecified.
#[derive(Debug)]
pub struct PriorityQueue<T, C> {
    heap: BinaryHeap<Entry<T, C>>,
}

impl<T, C: FloatCore> PriorityQueue<T, C> {

    pub fn new() -> Self {
        Self { heap: BinaryHeap::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { heap: BinaryHeap::with_capacity(capacity) }
    }

    pub fn push(&mut self, item: T, priority: C) {
        self.heap.push(Entry { priority: OrderedFloat(priority), item });
    }

    /// Remove the item with the lowest priority
    pub fn pop(&mut self) -> Option<(T, C)> {
        self.heap.pop().map(|Entry { priority, item }| (item, priority.0))
    }

    pub fn peek_priority(&self) -> Option<C> {
        self.heap.peek().map(|entry| entry.priority.0)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T, C: FloatCore> Default for PriorityQueue<T, C> {
    fn default() -> Self {
        Self::new()
    }
}


/// Keyed min priority queue
/// Each key is pending at most once, membership checks are O(1).
/// Lowering the priority of a pending key pushes a fresh heap entry and the
/// old one is dropped when it surfaces.
#[derive(Debug)]
pub struct PrioritySet<K, C> {
    heap: BinaryHeap<Entry<K, C>>,
    // live keys and their current priority
    members: FxHashMap<K, C>,
}

impl<K, C> PrioritySet<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: FloatCore + Debug,
{

    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            members: FxHashMap::default(),
        }
    }

    /// Insert a key, or lower its priority if it is already pending
    /// Returns false when the key is pending with an equal or lower priority.
    pub fn push(&mut self, key: K, priority: C) -> bool {
        match self.members.get(&key) {
            Some(&current) if current <= priority => false,
            _ => {
                self.members.insert(key.clone(), priority);
                self.heap.push(Entry { priority: OrderedFloat(priority), item: key });
                true
            }
        }
    }

    /// Remove the pending key with the lowest priority
    /// Entries are matched through OrderedFloat, so a NaN priority still pops (last).
    pub fn pop(&mut self) -> Option<(K, C)> {
        while let Some(Entry { priority, item }) = self.heap.pop() {
            match self.members.get(&item) {
                Some(&current) if OrderedFloat(current) == priority => {
                    self.members.remove(&item);
                    return Some((item, current));
                }
                _ => {
                    log::trace!("skipping stale queue entry {item:?} at {:?}", priority.0);
                }
            }
        }
        None
    }

    pub fn contains(&self, key: &K) -> bool {
        self.members.contains_key(key)
    }

    /// Current priority of a pending key
    pub fn priority(&self, key: &K) -> Option<C> {
        self.members.get(key).copied()
    }

    /// Number of pending keys
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<K, C> Default for PrioritySet<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: FloatCore + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
