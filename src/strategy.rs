#[cfg(feature = "foldhash")]
use core::hash::BuildHasher;
#[cfg(feature = "foldhash")]
use core::hash::Hash;

use crate::chain_table::DEFAULT_BUCKET_COUNT;

/// Hashing and equality for a key type, bound to a table at construction.
///
/// A [`ChainTable`] never hashes or compares keys itself; it delegates both to
/// the strategy it was built with. Implement this trait to control how keys
/// map to buckets and when two keys count as equal.
///
/// # Contract
///
/// [`bucket_of`] must return an index strictly less than the bucket count of
/// every table the strategy is bound to. Table operations assert this and
/// panic on a violation: a strategy that hashes out of range is a programming
/// error, not a recoverable condition.
///
/// [`ChainTable`]: crate::ChainTable
/// [`bucket_of`]: KeyStrategy::bucket_of
pub trait KeyStrategy<K> {
    /// Maps a key to the index of the bucket it belongs in.
    fn bucket_of(&self, key: &K) -> usize;

    /// Tests two keys for equality.
    fn eq(&self, a: &K, b: &K) -> bool;
}

/// The reference strategy for unsigned integer keys: modular arithmetic on
/// the bucket count, equality by value.
///
/// Consecutive integer keys spread one per bucket, which makes this a good
/// fit for dense integer key spaces despite doing no mixing at all. Keys with
/// a common factor of the bucket count will cluster; pick a prime bucket
/// count (the [`Default`] uses [`DEFAULT_BUCKET_COUNT`]) to avoid that.
///
/// # Examples
///
/// ```rust
/// use chain_table::ChainTable;
/// use chain_table::strategy::Modular;
///
/// let mut table = ChainTable::new(Modular::default());
/// let bucket = table.insert(60u32, "sixty");
/// assert_eq!(bucket, 7); // 60 % 53
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modular {
    buckets: usize,
}

impl Modular {
    /// Creates a strategy that reduces keys modulo `buckets`.
    ///
    /// # Panics
    ///
    /// Panics if `buckets` is zero.
    pub const fn new(buckets: usize) -> Self {
        assert!(buckets > 0, "a strategy needs at least one bucket");
        Self { buckets }
    }

    /// The modulus this strategy reduces keys by.
    pub const fn buckets(&self) -> usize {
        self.buckets
    }
}

impl Default for Modular {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_COUNT)
    }
}

macro_rules! impl_modular_strategy {
    ($($key:ty)*) => {$(
        impl KeyStrategy<$key> for Modular {
            fn bucket_of(&self, key: &$key) -> usize {
                (*key as u64 % self.buckets as u64) as usize
            }

            fn eq(&self, a: &$key, b: &$key) -> bool {
                a == b
            }
        }
    )*};
}

impl_modular_strategy!(u8 u16 u32 u64 usize);

/// A strategy for arbitrary `Hash + Eq` keys, folding a real hash down to a
/// bucket index.
///
/// Where [`Modular`] is the bare reference implementation, this is what you
/// want for string keys, composite keys, or integer keys with structure that
/// would collide under plain modular reduction.
///
/// # Examples
///
/// ```rust
/// use chain_table::ChainTable;
/// use chain_table::strategy::Folded;
///
/// let mut table = ChainTable::with_buckets(101, Folded::new(101));
/// table.insert("alpha", 1);
/// assert_eq!(table.get(&"alpha"), Some(&1));
/// ```
#[cfg(feature = "foldhash")]
#[derive(Clone)]
pub struct Folded {
    state: foldhash::fast::FixedState,
    buckets: usize,
}

#[cfg(feature = "foldhash")]
impl Folded {
    /// Creates a strategy targeting tables with `buckets` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `buckets` is zero.
    pub fn new(buckets: usize) -> Self {
        Self::with_seed(buckets, 0)
    }

    /// Like [`new`](Folded::new), with an explicit hash seed.
    ///
    /// Two strategies built with the same seed place the same keys in the
    /// same buckets, which matters if bucket indices are recorded across
    /// runs.
    pub fn with_seed(buckets: usize, seed: u64) -> Self {
        assert!(buckets > 0, "a strategy needs at least one bucket");
        Self {
            state: foldhash::fast::FixedState::with_seed(seed),
            buckets,
        }
    }
}

#[cfg(feature = "foldhash")]
impl<K> KeyStrategy<K> for Folded
where
    K: Hash + Eq,
{
    fn bucket_of(&self, key: &K) -> usize {
        (self.state.hash_one(key) % self.buckets as u64) as usize
    }

    fn eq(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modular_stays_in_bounds() {
        let strategy = Modular::default();
        for k in 0..(10 * DEFAULT_BUCKET_COUNT as u64) {
            assert!(strategy.bucket_of(&k) < DEFAULT_BUCKET_COUNT);
        }
    }

    #[test]
    fn modular_is_key_mod_bucket_count() {
        let strategy = Modular::new(11);
        assert_eq!(strategy.bucket_of(&0u32), 0);
        assert_eq!(strategy.bucket_of(&10u32), 10);
        assert_eq!(strategy.bucket_of(&11u32), 0);
        assert_eq!(strategy.bucket_of(&25u32), 3);
    }

    #[test]
    fn modular_compares_by_value() {
        let strategy = Modular::default();
        assert!(strategy.eq(&4u64, &4u64));
        assert!(!strategy.eq(&4u64, &5u64));
    }

    #[cfg(feature = "foldhash")]
    #[test]
    fn folded_stays_in_bounds() {
        let strategy = Folded::new(53);
        for k in 0..1000u64 {
            assert!(strategy.bucket_of(&k) < 53);
        }
    }

    #[cfg(feature = "foldhash")]
    #[test]
    fn folded_is_seed_stable() {
        let a = Folded::with_seed(53, 0xDEAD);
        let b = Folded::with_seed(53, 0xDEAD);
        for k in 0..100u64 {
            assert_eq!(a.bucket_of(&k), b.bucket_of(&k));
        }
    }
}
