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

//! Bloom Filter implementation for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! an element is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If an item was inserted, `contains()` will always return `true`
//! - **Possible false positives**: `contains()` may return `true` for items never inserted
//! - **Fixed size**: The bit array never grows, shrinks or clears after construction
//! - **Linear space**: Size is proportional to the expected number of distinct items
//!
//! # Usage
//!
//! ```rust
//! use bloomfilter::bloom::BloomFilter;
//!
//! // Create a filter sized for 1000 items with 1% false positive rate
//! let mut filter = BloomFilter::new(1000, 0.01)?;
//!
//! filter.insert("apple");
//! filter.insert("banana");
//! filter.insert(42_u64.to_le_bytes());
//!
//! assert!(filter.contains("apple")); // true - definitely inserted
//! assert!(!filter.contains("grape")); // false - never inserted (probably)
//!
//! println!("Capacity: {} bits", filter.capacity());
//! println!("Bits used: {}", filter.bits_used());
//! println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
//! # Ok::<(), bloomfilter::error::Error>(())
//! ```
//!
//! # Creating Filters
//!
//! ## By Accuracy (Recommended)
//!
//! ```rust
//! # use bloomfilter::bloom::BloomFilterBuilder;
//! let filter = BloomFilterBuilder::with_accuracy(
//!     10_000, // Expected items
//!     0.01,   // Target false positive probability (1%)
//! )?
//! .build();
//! # Ok::<(), bloomfilter::error::Error>(())
//! ```
//!
//! ## By Size (Manual)
//!
//! ```rust
//! # use bloomfilter::bloom::BloomFilterBuilder;
//! let filter = BloomFilterBuilder::with_size(
//!     95_851, // Number of bits
//!     7,      // Number of hash functions
//! )?
//! .build();
//! # Ok::<(), bloomfilter::error::Error>(())
//! ```
//!
//! # Implementation Details
//!
//! - Sizing formulas are truncated, never rounded
//! - Base hashes are 64-bit FNV-1 and FNV-1a over the item bytes
//! - Implements double hashing (Kirsch-Mitzenmacher method) for k hash functions
//! - Bits packed in `u64` words
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"
//! - Kirsch and Mitzenmacher (2008). "Less Hashing, Same Performance: Building a Better Bloom
//!   Filter"

mod builder;
mod sketch;

pub use self::builder::BloomFilterBuilder;
pub use self::builder::MAX_NUM_BITS;
pub use self::builder::MAX_NUM_HASHES;
pub use self::builder::MIN_NUM_BITS;
pub use self::builder::MIN_NUM_HASHES;
pub use self::sketch::BloomFilter;
