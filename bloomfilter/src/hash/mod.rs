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

mod fnv;

pub(crate) use self::fnv::Fnv1Hasher64;
pub(crate) use self::fnv::Fnv1aHasher64;

/// Computes the two base hashes used to derive every bit position of an item.
///
/// `h1` is the FNV-1 hash and `h2` the FNV-1a hash of the same bytes. The two variants differ
/// only in the order of the xor and multiply steps, which is enough to make them independent for
/// double hashing.
pub(crate) fn hash_pair(bytes: &[u8]) -> (u64, u64) {
    use std::hash::Hasher;

    let mut h1 = Fnv1Hasher64::new();
    h1.write(bytes);
    let mut h2 = Fnv1aHasher64::new();
    h2.write(bytes);
    (h1.finish(), h2.finish())
}
