// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Separation options.

use crate::matching::MateSearch;

/// Options for [`separate_with`](crate::separate_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeparationOptions {
    /// Search every face's mate on the rayon pool before pairing.
    /// Output is identical either way.
    pub parallel_search: bool,
    /// Check the output invariants before returning.
    pub verify: bool,
}

impl SeparationOptions {
    pub fn mate_search(&self) -> MateSearch {
        if self.parallel_search {
            MateSearch::Parallel
        } else {
            MateSearch::Sequential
        }
    }
}

impl Default for SeparationOptions {
    fn default() -> Self {
        Self {
            parallel_search: false,
            verify: true,
        }
    }
}
