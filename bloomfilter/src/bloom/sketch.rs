// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::error::Error;
use crate::hash::hash_pair;

use super::BloomFilterBuilder;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides fast membership queries with:
/// - No false negatives (inserted items always return `true`)
/// - Tunable false positive rate
/// - Constant space usage, fixed at construction
///
/// Items are hashed as raw bytes, so `"abc"`, `b"abc"` and `String::from("abc")` are the same
/// item.
///
/// Insertion takes `&mut self`. Sharing a filter between threads that insert therefore needs a
/// lock around it; concurrent queries only need shared references.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter {
    /// Configured target false positive probability
    pub(super) fpp: f64,
    /// Number of hash functions to use (k)
    pub(super) num_hashes: u16,
    /// Total number of bits in the filter (m)
    pub(super) capacity_bits: u64,
    /// Count of bits set to 1 (for statistics)
    pub(super) num_bits_set: u64,
    /// Bit array packed into u64 words
    /// Length = ceil(capacity_bits / 64)
    pub(super) bit_array: Box<[u64]>,
}

impl BloomFilter {
    /// Creates a filter sized for `max_items` distinct items at the target false positive
    /// probability `fpp`.
    ///
    /// Shorthand for [`BloomFilterBuilder::with_accuracy()`] followed by
    /// [`BloomFilterBuilder::build()`].
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if
    /// `max_items` is 0 or `fpp` is not in the open interval (0.0, 1.0).
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    /// filter.insert("hello");
    /// assert!(filter.contains("hello"));
    ///
    /// assert!(BloomFilter::new(0, 0.01).is_err());
    /// assert!(BloomFilter::new(100, 1.0).is_err());
    /// ```
    pub fn new(max_items: u64, fpp: f64) -> Result<Self, Error> {
        Ok(BloomFilterBuilder::with_accuracy(max_items, fpp)?.build())
    }

    /// Tests whether an item is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Item was **possibly** inserted (or false positive)
    /// - `false`: Item was **definitely not** inserted
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    /// filter.insert("apple");
    ///
    /// assert!(filter.contains("apple"));
    /// assert!(!filter.contains("grape"));
    /// ```
    pub fn contains<T: AsRef<[u8]> + ?Sized>(&self, item: &T) -> bool {
        let (h1, h2) = hash_pair(item.as_ref());
        self.check_bits(h1, h2)
    }

    /// Tests and inserts an item in a single operation.
    ///
    /// Returns whether the item was possibly already in the set before insertion.
    /// Both steps share one pair of base hashes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    ///
    /// assert!(!filter.contains_and_insert("apple"));
    /// assert!(filter.contains_and_insert("apple"));
    /// ```
    pub fn contains_and_insert<T: AsRef<[u8]> + ?Sized>(&mut self, item: &T) -> bool {
        let (h1, h2) = hash_pair(item.as_ref());
        let was_present = self.check_bits(h1, h2);
        self.set_bits(h1, h2);
        was_present
    }

    /// Inserts an item into the filter.
    ///
    /// After insertion, `contains(item)` will always return `true`. Inserting the same item
    /// again leaves the filter unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    ///
    /// filter.insert("apple");
    /// filter.insert(b"raw bytes");
    /// filter.insert(vec![1u8, 2, 3]);
    ///
    /// assert!(filter.contains("apple"));
    /// assert!(filter.contains(&[1u8, 2, 3]));
    /// ```
    pub fn insert<T: AsRef<[u8]>>(&mut self, item: T) {
        let (h1, h2) = hash_pair(item.as_ref());
        self.set_bits(h1, h2);
    }

    /// Returns the bit position the `index`-th hash function selects for `item`.
    ///
    /// Formula:
    /// ```text
    /// position = (fnv1(item) + index * fnv1a(item)) % capacity
    /// ```
    ///
    /// The result is always in `[0, capacity())`. Indices at or past
    /// [`num_hashes()`](Self::num_hashes) are accepted and simply continue the sequence.
    pub fn hash_at<T: AsRef<[u8]> + ?Sized>(&self, item: &T, index: u16) -> u64 {
        let (h1, h2) = hash_pair(item.as_ref());
        self.compute_bit_index(h1, h2, index)
    }

    /// Returns whether the filter is empty (no items inserted).
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of bits set to 1.
    ///
    /// Useful for monitoring filter saturation.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the total number of bits in the filter (capacity).
    pub fn capacity(&self) -> u64 {
        self.capacity_bits
    }

    /// Returns the number of hash functions used.
    pub fn num_hashes(&self) -> u16 {
        self.num_hashes
    }

    /// Returns the target false positive probability the filter was sized for.
    pub fn fpp(&self) -> f64 {
        self.fpp
    }

    /// Returns the current load factor (fraction of bits set).
    ///
    /// Values near 0.5 indicate the filter is approaching its sized capacity.
    /// Values above 0.5 indicate degraded false positive rates.
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.capacity_bits as f64
    }

    /// Estimates the current false positive probability.
    ///
    /// Uses the approximation `load_factor^k`, which assumes uniformly distributed bits.
    pub fn estimated_fpp(&self) -> f64 {
        self.load_factor().powi(i32::from(self.num_hashes))
    }

    /// Checks if all k bits are set for the given hash values.
    fn check_bits(&self, h1: u64, h2: u64) -> bool {
        (0..self.num_hashes).all(|i| self.get_bit(self.compute_bit_index(h1, h2, i)))
    }

    /// Sets all k bits for the given hash values.
    fn set_bits(&mut self, h1: u64, h2: u64) {
        for i in 0..self.num_hashes {
            let bit_index = self.compute_bit_index(h1, h2, i);
            self.set_bit(bit_index);
        }
    }

    /// Double hashing: `(h1 + i * h2) % capacity_bits` in wrapping 64-bit arithmetic.
    /// The index `i` is 0-based, so the first position is `h1` itself.
    fn compute_bit_index(&self, h1: u64, h2: u64, i: u16) -> u64 {
        let hash = h1.wrapping_add(u64::from(i).wrapping_mul(h2));
        hash % self.capacity_bits
    }

    fn get_bit(&self, bit_index: u64) -> bool {
        let word_index = (bit_index >> 6) as usize;
        let mask = 1u64 << (bit_index & 63);
        (self.bit_array[word_index] & mask) != 0
    }

    /// Sets a single bit and updates the count if it wasn't already set.
    fn set_bit(&mut self, bit_index: u64) {
        let word_index = (bit_index >> 6) as usize;
        let mask = 1u64 << (bit_index & 63);

        if (self.bit_array[word_index] & mask) == 0 {
            self.bit_array[word_index] |= mask;
            self.num_bits_set += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BloomFilter;
    use crate::bloom::BloomFilterBuilder;

    #[test]
    fn test_new_sizing() {
        let filter = BloomFilter::new(20, 0.05).unwrap();
        assert_eq!(filter.capacity(), 124);
        assert_eq!(filter.num_hashes(), 4);
        assert_eq!(filter.fpp(), 0.05);
        assert_eq!(filter.bit_array.len(), 2);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_insert_and_contains() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();

        assert!(!filter.contains("apple"));
        filter.insert("apple");
        assert!(filter.contains("apple"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_known_absent_items() {
        // positions for these items under m = 958, k = 6 share no bit
        let mut filter = BloomFilter::new(100, 0.01).unwrap();
        filter.insert("hello");
        filter.insert("world");
        assert!(filter.contains("hello"));
        assert!(filter.contains("world"));
        assert!(!filter.contains("not_in_filter"));
        assert!(!filter.contains("definitely-not-inserted-xyz"));
    }

    #[test]
    fn test_hash_at_positions() {
        let filter = BloomFilter::new(100, 0.01).unwrap();
        let positions: Vec<u64> = (0..filter.num_hashes())
            .map(|i| filter.hash_at("hello", i))
            .collect();
        assert_eq!(positions, vec![335, 58, 663, 386, 109, 714]);
    }

    #[test]
    fn test_hash_at_deterministic_and_bounded() {
        let filter = BloomFilterBuilder::with_size(37, 5).unwrap().build();
        for item in ["", "a", "hello", "a much longer item than the others"] {
            for i in 0..64 {
                let pos = filter.hash_at(item, i);
                assert!(pos < filter.capacity());
                assert_eq!(pos, filter.hash_at(item.as_bytes(), i));
            }
        }
    }

    #[test]
    fn test_insert_idempotent() {
        let mut once = BloomFilter::new(100, 0.01).unwrap();
        once.insert("hello");

        let mut twice = BloomFilter::new(100, 0.01).unwrap();
        twice.insert("hello");
        twice.insert("hello");

        assert_eq!(once, twice);
        assert_eq!(once.bits_used(), u64::from(once.num_hashes()));
    }

    #[test]
    fn test_contains_and_insert() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();

        let was_present = filter.contains_and_insert(&42_u64.to_le_bytes());
        assert!(!was_present);

        let was_present = filter.contains_and_insert(&42_u64.to_le_bytes());
        assert!(was_present);
    }

    #[test]
    fn test_single_bit_filter() {
        let mut filter = BloomFilter::new(1, 0.99).unwrap();
        assert_eq!(filter.capacity(), 1);
        assert_eq!(filter.num_hashes(), 1);
        assert!(!filter.contains("x"));
        filter.insert("x");
        assert!(filter.contains("x"));
        assert!(filter.contains("anything else"));
    }

    #[test]
    fn test_statistics() {
        let mut filter = BloomFilterBuilder::with_size(1000, 5).unwrap().build();
        assert_eq!(filter.bits_used(), 0);
        assert_eq!(filter.load_factor(), 0.0);
        assert_eq!(filter.estimated_fpp(), 0.0);

        for i in 0..100 {
            filter.insert(format!("item_{i}"));
        }

        assert!(filter.bits_used() > 0);
        assert!(filter.bits_used() <= 500);
        assert!(filter.load_factor() > 0.0 && filter.load_factor() < 1.0);
        assert!(filter.estimated_fpp() > 0.0 && filter.estimated_fpp() < 1.0);
    }

    #[test]
    fn test_bits_used_matches_array() {
        let mut filter = BloomFilter::new(50, 0.02).unwrap();
        for i in 0..50 {
            filter.insert(format!("key-{i}"));
        }
        let counted: u64 = filter.bit_array.iter().map(|w| w.count_ones() as u64).sum();
        assert_eq!(filter.bits_used(), counted);
    }
}
