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

use super::BloomFilter;
use crate::error::Error;

/// Smallest bit array a filter can have.
pub const MIN_NUM_BITS: u64 = 1;
/// Largest bit array a filter can have: `i32::MAX` 64-bit words.
pub const MAX_NUM_BITS: u64 = i32::MAX as u64 * 64;
/// Fewest hash functions a filter uses.
pub const MIN_NUM_HASHES: u16 = 1;
/// Most hash functions a filter uses.
pub const MAX_NUM_HASHES: u16 = i16::MAX as u16;

/// Builder for creating [`BloomFilter`] instances.
///
/// Provides two construction modes:
/// - [`with_accuracy()`](Self::with_accuracy): Specify expected items and false positive rate
///   (recommended)
/// - [`with_size()`](Self::with_size): Specify bit count and hash functions (manual)
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    num_bits: u64,
    num_hashes: u16,
    fpp: f64,
}

impl BloomFilterBuilder {
    /// Creates a builder sized for a target accuracy.
    ///
    /// The number of bits and hash functions are derived with
    /// [`suggest_num_bits()`](Self::suggest_num_bits) and
    /// [`suggest_num_hashes()`](Self::suggest_num_hashes).
    ///
    /// # Arguments
    ///
    /// - `max_items`: Expected number of distinct items
    /// - `fpp`: Target false positive probability (e.g., 0.01 for 1%)
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if
    /// `max_items` is 0, `fpp` is not in the open interval (0.0, 1.0), or the resulting bit
    /// count exceeds [`MAX_NUM_BITS`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_accuracy(20, 0.05).unwrap().build();
    /// assert_eq!(filter.capacity(), 124);
    /// assert_eq!(filter.num_hashes(), 4);
    /// ```
    pub fn with_accuracy(max_items: u64, fpp: f64) -> Result<Self, Error> {
        if max_items == 0 {
            return Err(Error::out_of_range("max_items", max_items, "[1, u64::MAX]"));
        }
        // written this way so that NaN is rejected too
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(Error::out_of_range("fpp", fpp, "(0.0, 1.0)"));
        }

        let num_bits = Self::suggest_num_bits(max_items, fpp);
        if num_bits > MAX_NUM_BITS {
            return Err(
                Error::invalid_argument(format!("num_bits must not exceed {MAX_NUM_BITS}"))
                    .with_context("max_items", max_items)
                    .with_context("fpp", fpp)
                    .with_context("num_bits", num_bits),
            );
        }
        let num_hashes = Self::suggest_num_hashes(max_items, num_bits);

        tracing::debug!(max_items, fpp, num_bits, num_hashes, "sized bloom filter");

        Ok(BloomFilterBuilder {
            num_bits,
            num_hashes,
            fpp,
        })
    }

    /// Creates a builder with manual size specification.
    ///
    /// Use this when working with pre-calculated parameters. The target false positive
    /// probability reported by the built filter is then the theoretical rate for `num_bits`
    /// bits and `num_hashes` hashes at the optimal load, `0.5^num_hashes`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if
    /// `num_bits` is not in `[MIN_NUM_BITS, MAX_NUM_BITS]` or `num_hashes` is not in
    /// `[MIN_NUM_HASHES, MAX_NUM_HASHES]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_size(10_000, 7).unwrap().build();
    /// assert_eq!(filter.capacity(), 10_000);
    /// ```
    pub fn with_size(num_bits: u64, num_hashes: u16) -> Result<Self, Error> {
        if !(MIN_NUM_BITS..=MAX_NUM_BITS).contains(&num_bits) {
            return Err(Error::out_of_range(
                "num_bits",
                num_bits,
                &format!("[{MIN_NUM_BITS}, {MAX_NUM_BITS}]"),
            ));
        }
        if !(MIN_NUM_HASHES..=MAX_NUM_HASHES).contains(&num_hashes) {
            return Err(Error::out_of_range(
                "num_hashes",
                num_hashes,
                &format!("[{MIN_NUM_HASHES}, {MAX_NUM_HASHES}]"),
            ));
        }

        Ok(BloomFilterBuilder {
            num_bits,
            num_hashes,
            fpp: 0.5_f64.powi(i32::from(num_hashes)),
        })
    }

    /// Builds the Bloom filter with every bit cleared.
    pub fn build(self) -> BloomFilter {
        let num_words = self.num_bits.div_ceil(64) as usize;
        let bit_array = vec![0u64; num_words].into_boxed_slice();

        BloomFilter {
            fpp: self.fpp,
            num_hashes: self.num_hashes,
            capacity_bits: self.num_bits,
            num_bits_set: 0,
            bit_array,
        }
    }

    /// Suggests the number of bits given max items and target FPP.
    ///
    /// Formula: `m = -n * ln(p) / (ln(2)^2)`
    /// where n = max_items, p = fpp
    ///
    /// The result is truncated rather than rounded, then raised to at least [`MIN_NUM_BITS`].
    /// It is not capped; callers compare against [`MAX_NUM_BITS`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// assert_eq!(BloomFilterBuilder::suggest_num_bits(20, 0.05), 124); // 124.70
    /// assert_eq!(BloomFilterBuilder::suggest_num_bits(1000, 0.01), 9585); // 9585.06
    /// ```
    pub fn suggest_num_bits(max_items: u64, fpp: f64) -> u64 {
        let n = max_items as f64;
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;

        // float to int casts saturate, so an overflowing size lands above MAX_NUM_BITS
        let bits = (-(n * fpp.ln()) / ln2_squared) as u64;
        bits.max(MIN_NUM_BITS)
    }

    /// Suggests the number of hash functions given max items and bit count.
    ///
    /// Formula: `k = (m/n) * ln(2)`
    /// where m = num_bits, n = max_items
    ///
    /// Truncated, then clamped to `[MIN_NUM_HASHES, MAX_NUM_HASHES]`. The formula yields zero
    /// whenever `fpp > 0.5`; such filters still use one hash function.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// assert_eq!(BloomFilterBuilder::suggest_num_hashes(20, 124), 4); // 4.30
    /// assert_eq!(BloomFilterBuilder::suggest_num_hashes(10, 3), 1); // 0.21
    /// ```
    pub fn suggest_num_hashes(max_items: u64, num_bits: u64) -> u16 {
        let m = num_bits as f64;
        let n = max_items as f64;

        let k = (m / n * std::f64::consts::LN_2).trunc();
        if k < f64::from(MIN_NUM_HASHES) {
            tracing::debug!(max_items, num_bits, "hash count formula gave zero, using one");
        }
        k.clamp(f64::from(MIN_NUM_HASHES), f64::from(MAX_NUM_HASHES)) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_suggest_num_bits_truncates() {
        assert_eq!(BloomFilterBuilder::suggest_num_bits(20, 0.05), 124);
        assert_eq!(BloomFilterBuilder::suggest_num_bits(100, 0.01), 958);
        assert_eq!(BloomFilterBuilder::suggest_num_bits(1, 0.5), 1);
    }

    #[test]
    fn test_suggest_num_bits_minimum() {
        // -ln(0.99) / ln(2)^2 is about 0.02
        assert_eq!(BloomFilterBuilder::suggest_num_bits(1, 0.99), MIN_NUM_BITS);
    }

    #[test]
    fn test_suggest_num_hashes() {
        assert_eq!(BloomFilterBuilder::suggest_num_hashes(100, 958), 6);
        assert_eq!(BloomFilterBuilder::suggest_num_hashes(1000, 10000), 6);
        assert_eq!(BloomFilterBuilder::suggest_num_hashes(10, 10), MIN_NUM_HASHES);
        assert_eq!(BloomFilterBuilder::suggest_num_hashes(1, u64::MAX), MAX_NUM_HASHES);
    }

    #[test]
    fn test_with_accuracy_rejects_zero_items() {
        let err = BloomFilterBuilder::with_accuracy(0, 0.05).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_with_accuracy_rejects_bad_fpp() {
        for fpp in [0.0, 1.0, -0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = BloomFilterBuilder::with_accuracy(20, fpp).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "fpp = {fpp}");
        }
    }

    #[test]
    fn test_with_accuracy_rejects_oversized() {
        let err = BloomFilterBuilder::with_accuracy(u64::MAX, 1e-10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_with_accuracy_loose_fpp_uses_one_hash() {
        let filter = BloomFilterBuilder::with_accuracy(10, 0.6).unwrap().build();
        assert_eq!(filter.capacity(), 10);
        assert_eq!(filter.num_hashes(), 1);
    }

    #[test]
    fn test_with_size_bounds() {
        assert!(BloomFilterBuilder::with_size(0, 3).is_err());
        assert!(BloomFilterBuilder::with_size(MAX_NUM_BITS + 1, 3).is_err());
        assert!(BloomFilterBuilder::with_size(64, 0).is_err());
        assert!(BloomFilterBuilder::with_size(64, MAX_NUM_HASHES + 1).is_err());

        let filter = BloomFilterBuilder::with_size(65, 3).unwrap().build();
        assert_eq!(filter.capacity(), 65);
        assert_eq!(filter.num_hashes(), 3);
        assert_eq!(filter.fpp(), 0.125);
    }
}
