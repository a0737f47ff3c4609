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

use std::hash::Hasher;

const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const PRIME: u64 = 0x100000001b3;

/// The 64-bit FNV-1 hash: each byte is folded in after the multiply.
///
/// FNV is fast and has a low collision rate on short keys. It is not resistant to adversarial
/// input.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1Hasher64 {
    state: u64,
}

impl Fnv1Hasher64 {
    /// Creates a hasher starting from the standard offset basis.
    pub fn new() -> Self {
        Fnv1Hasher64 {
            state: OFFSET_BASIS,
        }
    }
}

impl Default for Fnv1Hasher64 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1Hasher64 {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = self.state.wrapping_mul(PRIME);
            self.state ^= u64::from(b);
        }
    }
}

/// The 64-bit FNV-1a hash: each byte is folded in before the multiply.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1aHasher64 {
    state: u64,
}

impl Fnv1aHasher64 {
    /// Creates a hasher starting from the standard offset basis.
    pub fn new() -> Self {
        Fnv1aHasher64 {
            state: OFFSET_BASIS,
        }
    }
}

impl Default for Fnv1aHasher64 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1aHasher64 {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= u64::from(b);
            self.state = self.state.wrapping_mul(PRIME);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fnv1(key: &[u8]) -> u64 {
        let mut hasher = Fnv1Hasher64::new();
        hasher.write(key);
        hasher.finish()
    }

    fn fnv1a(key: &[u8]) -> u64 {
        let mut hasher = Fnv1aHasher64::new();
        hasher.write(key);
        hasher.finish()
    }

    #[test]
    fn test_empty_input_is_offset_basis() {
        assert_eq!(fnv1(b""), 0xcbf29ce484222325);
        assert_eq!(fnv1a(b""), 0xcbf29ce484222325);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(fnv1(b"a"), 0xaf63bd4c8601b7be);
        assert_eq!(fnv1a(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv1(b"foobar"), 0x340d8765a4dda9c2);
        assert_eq!(fnv1a(b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn test_incremental_writes() {
        let mut hasher = Fnv1aHasher64::new();
        hasher.write(b"foo");
        hasher.write(b"bar");
        assert_eq!(hasher.finish(), fnv1a(b"foobar"));

        let mut hasher = Fnv1Hasher64::new();
        hasher.write(b"foo");
        hasher.write(b"");
        hasher.write(b"bar");
        assert_eq!(hasher.finish(), fnv1(b"foobar"));
    }
}
