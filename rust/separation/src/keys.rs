// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for face lookup.
//!
//! A [`FaceSlot`] names one face occurrence `(element, face)`. A [`FaceKey`]
//! is the ordered tuple of original node ids around that occurrence; two
//! elements sharing a face traverse it in opposite winding, so their keys are
//! related by one of the reversed rotations in
//! [`REVERSED_ROTATIONS`](crate::topology::REVERSED_ROTATIONS).

use std::fmt;

use crate::topology::{FACES_PER_ELEMENT, NODES_PER_FACE, REVERSED_ROTATIONS};

/// One face occurrence: face `face` (0..6) of element `element`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceSlot {
    pub element: usize,
    pub face: usize,
}

impl FaceSlot {
    #[inline]
    pub fn new(element: usize, face: usize) -> Self {
        Self { element, face }
    }

    /// Flat index `6 * element + face`.
    #[inline]
    pub fn index(&self) -> usize {
        self.element * FACES_PER_ELEMENT + self.face
    }

    /// Inverse of [`FaceSlot::index`].
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self {
            element: index / FACES_PER_ELEMENT,
            face: index % FACES_PER_ELEMENT,
        }
    }
}

impl fmt::Display for FaceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element {} face {}", self.element, self.face)
    }
}

/// Canonical face key: original node ids in face-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceKey(pub [usize; NODES_PER_FACE]);

impl FaceKey {
    /// Returns the key restated by reversed rotation `rotation` (0..4).
    #[inline]
    pub fn reversed_rotation(&self, rotation: usize) -> FaceKey {
        let perm = &REVERSED_ROTATIONS[rotation];
        FaceKey([
            self.0[perm[0]],
            self.0[perm[1]],
            self.0[perm[2]],
            self.0[perm[3]],
        ])
    }

    /// Iterates over the four reversed restatements, in search order.
    pub fn reversed_rotations(self) -> impl Iterator<Item = (usize, FaceKey)> {
        (0..NODES_PER_FACE).map(move |p| (p, self.reversed_rotation(p)))
    }
}

impl fmt::Display for FaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "({a}, {b}, {c}, {d})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_index_round_trip() {
        let slot = FaceSlot::new(7, 4);
        assert_eq!(slot.index(), 46);
        assert_eq!(FaceSlot::from_index(46), slot);
        assert_eq!(FaceSlot::from_index(0), FaceSlot::new(0, 0));
        assert_eq!(FaceSlot::from_index(11), FaceSlot::new(1, 5));
    }

    #[test]
    fn reversed_rotation_order() {
        let key = FaceKey([10, 11, 12, 13]);
        let all: Vec<_> = key.reversed_rotations().map(|(_, k)| k).collect();
        assert_eq!(
            all,
            vec![
                FaceKey([13, 12, 11, 10]),
                FaceKey([12, 11, 10, 13]),
                FaceKey([11, 10, 13, 12]),
                FaceKey([10, 13, 12, 11]),
            ]
        );
    }

    fn rotations_of(nodes: [usize; NODES_PER_FACE]) -> impl Iterator<Item = (usize, FaceKey)> {
        FaceKey(nodes).reversed_rotations()
    }

    #[test]
    fn rotations_outlive_their_key() {
        let found = rotations_of([1, 2, 3, 4]).find(|(_, k)| *k == FaceKey([1, 4, 3, 2]));
        assert_eq!(found, Some((3, FaceKey([1, 4, 3, 2]))));
    }

    #[test]
    fn reversed_rotation_is_symmetric() {
        let key = FaceKey([4, 8, 15, 16]);
        for p in 0..NODES_PER_FACE {
            assert_eq!(key.reversed_rotation(p).reversed_rotation(p), key);
        }
    }

    #[test]
    fn slots_order_by_element_then_face() {
        assert!(FaceSlot::new(0, 5) < FaceSlot::new(1, 0));
        assert!(FaceSlot::new(2, 1) < FaceSlot::new(2, 3));
    }
}
