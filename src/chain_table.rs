use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::strategy::KeyStrategy;

/// Default number of bucket slots for [`ChainTable::new`].
///
/// A prime, so modular strategies spread consecutive integer keys evenly
/// instead of clustering. Nearby primes if you want a wider table: 101, 151,
/// 199, 251, 307.
pub const DEFAULT_BUCKET_COUNT: usize = 53;

/// One stored association: a key, its value, and the bucket index the key
/// hashed to when it was inserted.
///
/// Entries are created by [`ChainTable::insert`] and handed to [`traverse`]
/// visitors and [`iter`] by reference.
///
/// [`traverse`]: ChainTable::traverse
/// [`iter`]: ChainTable::iter
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    key: K,
    value: V,
    bucket: usize,
}

impl<K, V> Entry<K, V> {
    /// The entry's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The entry's value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The bucket index the key hashed to at insertion.
    ///
    /// Always equal to the index of the bucket whose chain holds this entry;
    /// the bucket count never changes, so the cached index never goes stale.
    pub fn bucket(&self) -> usize {
        self.bucket
    }
}

/// A hash table with a fixed number of buckets, resolving collisions by
/// separate chaining.
///
/// `ChainTable<K, V, S>` owns its entries and delegates all hashing and key
/// comparison to the [`KeyStrategy`] it was constructed with. The bucket
/// count is chosen at construction and never changes: there is no resizing
/// and no rehashing, so memory layout is predictable and insertion cost is
/// flat. The flip side is that chains grow without bound, and lookup degrades
/// linearly once the table is loaded well past its bucket count.
///
/// ## Duplicate keys
///
/// Insertion performs **no uniqueness check**. Inserting a key that compares
/// equal to an existing one appends a second entry to the same chain, so the
/// table can hold several entries with equal keys at once, multi-map style.
/// [`get`] and [`remove`] walk chains head-to-tail and insertion appends at
/// the tail, so both always hit the **oldest** surviving duplicate first.
///
/// ## Example
///
/// ```rust
/// use chain_table::ChainTable;
/// use chain_table::strategy::Modular;
///
/// let mut table = ChainTable::new(Modular::default());
///
/// table.insert(1u32, "one");
/// table.insert(54u32, "fifty-four"); // 54 % 53 == 1: same chain
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get(&1), Some(&"one"));
/// assert_eq!(table.get(&54), Some(&"fifty-four"));
/// assert_eq!(table.remove(&1), Some((1, "one")));
/// assert_eq!(table.get(&1), None);
/// ```
///
/// [`get`]: ChainTable::get
/// [`remove`]: ChainTable::remove
#[derive(Clone)]
pub struct ChainTable<K, V, S> {
    buckets: Box<[Vec<Entry<K, V>>]>,
    len: usize,
    strategy: S,
}

impl<K, V, S> core::fmt::Debug for ChainTable<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChainTable")
            .field("buckets", &self.buckets.len())
            .field("len", &self.len)
            .field(
                "occupancy",
                &self.buckets.iter().map(Vec::len).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<K, V, S> ChainTable<K, V, S>
where
    S: KeyStrategy<K>,
{
    /// Creates a table with [`DEFAULT_BUCKET_COUNT`] buckets, all empty, and
    /// binds the given strategy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_table::ChainTable;
    /// use chain_table::strategy::Modular;
    ///
    /// let table: ChainTable<u32, String, _> = ChainTable::new(Modular::default());
    /// assert!(table.is_empty());
    /// assert_eq!(table.bucket_count(), 53);
    /// ```
    pub fn new(strategy: S) -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT, strategy)
    }

    /// Creates a table with `bucket_count` buckets.
    ///
    /// The count is fixed for the table's lifetime. The strategy must map
    /// every key below it; see [`KeyStrategy`] for the contract.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_table::ChainTable;
    /// use chain_table::strategy::Modular;
    ///
    /// let table: ChainTable<u64, (), _> = ChainTable::with_buckets(101, Modular::new(101));
    /// assert_eq!(table.bucket_count(), 101);
    /// ```
    pub fn with_buckets(bucket_count: usize, strategy: S) -> Self {
        assert!(bucket_count > 0, "a chain table needs at least one bucket");
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Vec::new);
        Self {
            buckets: buckets.into_boxed_slice(),
            len: 0,
            strategy,
        }
    }

    fn bucket_index(&self, key: &K) -> usize {
        let bucket = self.strategy.bucket_of(key);
        assert!(
            bucket < self.buckets.len(),
            "strategy returned out-of-range bucket {bucket} for a table with {} buckets",
            self.buckets.len(),
        );
        bucket
    }

    /// Inserts a key-value pair, returning the bucket index it landed in.
    ///
    /// The new entry is appended at the tail of its bucket's chain, so chain
    /// order is insertion order. No uniqueness check is made: a key equal to
    /// an existing one gets a second entry rather than replacing the first
    /// (see the [type docs](ChainTable#duplicate-keys)). The returned index
    /// is diagnostic; most callers ignore it.
    ///
    /// # Panics
    ///
    /// Panics if the strategy maps the key outside the table's buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_table::ChainTable;
    /// use chain_table::strategy::Modular;
    ///
    /// let mut table = ChainTable::new(Modular::default());
    /// assert_eq!(table.insert(7u32, "a"), 7);
    /// assert_eq!(table.insert(60u32, "b"), 7); // collides with 7
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> usize {
        let bucket = self.bucket_index(&key);
        self.buckets[bucket].push(Entry { key, value, bucket });
        self.len += 1;
        bucket
    }

    /// Returns a reference to the value of the oldest entry whose key
    /// compares equal to `key`, or `None` if there is none.
    ///
    /// # Panics
    ///
    /// Panics if the strategy maps the key outside the table's buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_table::ChainTable;
    /// use chain_table::strategy::Modular;
    ///
    /// let mut table = ChainTable::new(Modular::default());
    /// table.insert(3u32, "first");
    /// table.insert(3u32, "second");
    ///
    /// assert_eq!(table.get(&3), Some(&"first"));
    /// assert_eq!(table.get(&4), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_entry(key).map(|entry| &entry.value)
    }

    /// Like [`get`](ChainTable::get), but yields the whole [`Entry`],
    /// including its cached bucket index.
    pub fn get_entry(&self, key: &K) -> Option<&Entry<K, V>> {
        let bucket = self.bucket_index(key);
        self.buckets[bucket]
            .iter()
            .find(|entry| self.strategy.eq(key, &entry.key))
    }

    /// Returns a mutable reference to the value of the oldest matching
    /// entry.
    ///
    /// Only the value is reachable; keys are immutable once stored, since
    /// changing one would invalidate its bucket placement.
    ///
    /// # Panics
    ///
    /// Panics if the strategy maps the key outside the table's buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_table::ChainTable;
    /// use chain_table::strategy::Modular;
    ///
    /// let mut table = ChainTable::new(Modular::default());
    /// table.insert(9u32, 1);
    /// if let Some(value) = table.get_mut(&9) {
    ///     *value += 9;
    /// }
    /// assert_eq!(table.get(&9), Some(&10));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let bucket = self.bucket_index(key);
        let Self {
            buckets, strategy, ..
        } = self;
        buckets[bucket]
            .iter_mut()
            .find(|entry| strategy.eq(key, &entry.key))
            .map(|entry| &mut entry.value)
    }

    /// Removes the oldest entry whose key compares equal to `key`, handing
    /// ownership of its key and value back to the caller.
    ///
    /// Later duplicates and other entries in the same chain keep their
    /// relative order. Returns `None` if no entry matches.
    ///
    /// # Panics
    ///
    /// Panics if the strategy maps the key outside the table's buckets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_table::ChainTable;
    /// use chain_table::strategy::Modular;
    ///
    /// let mut table = ChainTable::new(Modular::default());
    /// table.insert(42u32, "answer");
    ///
    /// assert_eq!(table.remove(&42), Some((42, "answer")));
    /// assert_eq!(table.remove(&42), None);
    /// assert!(table.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let bucket = self.bucket_index(key);
        let Self {
            buckets,
            strategy,
            len,
        } = self;
        let chain = &mut buckets[bucket];
        let index = chain
            .iter()
            .position(|entry| strategy.eq(key, &entry.key))?;
        let entry = chain.remove(index);
        *len -= 1;
        Some((entry.key, entry.value))
    }
}

impl<K, V, S> ChainTable<K, V, S> {
    /// Returns the number of entries in the table. O(1).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_table::ChainTable;
    /// use chain_table::strategy::Modular;
    ///
    /// let mut table = ChainTable::new(Modular::default());
    /// assert_eq!(table.len(), 0);
    /// table.insert(1u32, "a");
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of buckets, fixed at construction.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// The strategy this table was constructed with.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Returns an iterator over all entries, in bucket-index order and then
    /// chain order (oldest first) within each bucket.
    ///
    /// That order is part of the interface: it is the same order
    /// [`traverse`](ChainTable::traverse) visits in.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_table::ChainTable;
    /// use chain_table::strategy::Modular;
    ///
    /// let mut table = ChainTable::new(Modular::default());
    /// table.insert(5u32, "a");
    /// table.insert(2u32, "b");
    /// table.insert(58u32, "c"); // chains after 5
    ///
    /// let keys: Vec<u32> = table.iter().map(|entry| *entry.key()).collect();
    /// assert_eq!(keys, [2, 5, 58]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            bucket_index: 0,
            chain_index: 0,
        }
    }

    /// Visits every entry, in the same order as [`iter`](ChainTable::iter),
    /// and sums the visitor's per-entry results.
    ///
    /// This is the hook for layering side-effecting passes (an export, a
    /// diagnostic dump) over the table without touching its contents. The
    /// shared receiver means a visitor cannot mutate the chain it is walking.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_table::ChainTable;
    /// use chain_table::strategy::Modular;
    ///
    /// let mut table = ChainTable::new(Modular::default());
    /// for k in 0..10u32 {
    ///     table.insert(k, k);
    /// }
    ///
    /// let visited = table.traverse(|_| 1);
    /// assert_eq!(visited, 10);
    /// ```
    pub fn traverse<F>(&self, mut visitor: F) -> i64
    where
        F: FnMut(&Entry<K, V>) -> i64,
    {
        let mut total = 0;
        for entry in self.iter() {
            total += visitor(entry);
        }
        total
    }

    /// Removes all entries, dropping their keys and values.
    ///
    /// The buckets themselves are kept, so the table is immediately reusable
    /// at the same width.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
    }

    /// Returns an iterator that removes and yields every `(key, value)`
    /// pair, in the same order as [`iter`](ChainTable::iter).
    ///
    /// The table is empty once the iterator is consumed or dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_table::ChainTable;
    /// use chain_table::strategy::Modular;
    ///
    /// let mut table = ChainTable::new(Modular::default());
    /// table.insert(1u32, "a");
    /// table.insert(2u32, "b");
    ///
    /// let pairs: Vec<(u32, &str)> = table.drain().collect();
    /// assert_eq!(pairs, [(1, "a"), (2, "b")]);
    /// assert!(table.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            buckets: self.buckets.iter_mut(),
            current: Vec::new().into_iter(),
            len: &mut self.len,
        }
    }

    /// Chain length of every bucket, indexed by bucket.
    #[cfg(feature = "stats")]
    pub fn chain_histogram(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    /// Summarizes bucket occupancy for diagnostics.
    #[cfg(feature = "stats")]
    pub fn chain_stats(&self) -> ChainStats {
        let occupied_buckets = self.buckets.iter().filter(|chain| !chain.is_empty()).count();
        let longest_chain = self.buckets.iter().map(Vec::len).max().unwrap_or(0);
        ChainStats {
            entries: self.len,
            buckets: self.buckets.len(),
            occupied_buckets,
            longest_chain,
            load_factor: self.len as f64 / self.buckets.len() as f64,
        }
    }
}

/// Occupancy statistics for a [`ChainTable`].
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct ChainStats {
    /// Number of entries currently in the table.
    pub entries: usize,
    /// Number of buckets, fixed at construction.
    pub buckets: usize,
    /// Number of buckets with a non-empty chain.
    pub occupied_buckets: usize,
    /// Length of the longest chain.
    pub longest_chain: usize,
    /// Entries per bucket (`entries / buckets`).
    pub load_factor: f64,
}

#[cfg(feature = "stats")]
impl ChainStats {
    /// Pretty-print the statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Chain Table Statistics ===");
        println!(
            "Entries: {} across {} buckets ({:.2} load factor)",
            self.entries, self.buckets, self.load_factor
        );
        println!(
            "Occupied buckets: {}/{}",
            self.occupied_buckets, self.buckets
        );
        println!("Longest chain: {}", self.longest_chain);
    }
}

/// An iterator over the entries of a [`ChainTable`].
///
/// This struct is created by the [`iter`] method on [`ChainTable`]. It yields
/// `&Entry<K, V>` in bucket-index order, then chain order within each bucket.
///
/// [`iter`]: ChainTable::iter
pub struct Iter<'a, K, V> {
    buckets: &'a [Vec<Entry<K, V>>],
    bucket_index: usize,
    chain_index: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.bucket_index < self.buckets.len() {
            let chain = &self.buckets[self.bucket_index];
            if self.chain_index < chain.len() {
                let entry = &chain[self.chain_index];
                self.chain_index += 1;
                return Some(entry);
            }
            self.bucket_index += 1;
            self.chain_index = 0;
        }
        None
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainTable<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = &'a Entry<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A draining iterator over the entries of a [`ChainTable`].
///
/// This struct is created by the [`drain`] method on [`ChainTable`]. It
/// yields owned `(K, V)` pairs and empties the table as it iterates; entries
/// not yet yielded when it is dropped are dropped with it.
///
/// [`drain`]: ChainTable::drain
pub struct Drain<'a, K, V> {
    buckets: core::slice::IterMut<'a, Vec<Entry<K, V>>>,
    current: alloc::vec::IntoIter<Entry<K, V>>,
    len: &'a mut usize,
}

impl<K, V> Drop for Drain<'_, K, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                *self.len -= 1;
                return Some((entry.key, entry.value));
            }
            match self.buckets.next() {
                Some(chain) => self.current = core::mem::take(chain).into_iter(),
                None => return None,
            }
        }
    }
}
