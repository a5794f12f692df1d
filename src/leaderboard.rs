/// A ranked collection that only keeps its `capacity` greatest items.
///
/// Items are stored best-first. Among equal items the one added first keeps
/// the better rank, so a full leaderboard never lets a newcomer push out an
/// equal entry.
#[derive(Debug, Clone)]
pub struct Leaderboard<T: Ord> {
    collection: Vec<T>,
    capacity: usize,
}

impl<T: Ord> Leaderboard<T> {
    /// Storage grows with the entries, so any `capacity` is fine here.
    pub fn new(capacity: usize) -> Self {
        Self {
            collection: Vec::new(),
            capacity,
        }
    }

    /// Inserts `item` at its rank.
    /// Returns the item that no longer fits, which may be `item` itself.
    pub fn add(&mut self, item: T) -> Option<T> {
        if self.is_full() {
            match self.collection.last() {
                Some(lowest) if item <= *lowest => return Some(item),
                None => return Some(item),
                _ => {}
            }
        }

        let position = self.collection.partition_point(|ranked| *ranked >= item);
        self.collection.insert(position, item);

        if self.collection.len() > self.capacity {
            self.collection.pop()
        } else {
            None
        }
    }

    pub fn top(&self, n: usize) -> impl Iterator<Item = &T> {
        self.collection.iter().take(n)
    }

    fn is_full(&self) -> bool {
        self.collection.len() >= self.capacity
    }
}
