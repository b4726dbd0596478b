// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face key lookup over the original (shared-node) connectivity.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::keys::{FaceKey, FaceSlot};
use crate::mesh::OriginalElement;
use crate::topology::FACES_PER_ELEMENT;

/// Map from canonical face key to the single face occurrence producing it.
#[derive(Debug, Default)]
pub struct FaceLookup {
    slots: FxHashMap<FaceKey, FaceSlot>,
}

impl FaceLookup {
    /// Inserts the key of every `(element, face)` occurrence.
    ///
    /// Fails on the first key that is already present: two occurrences with
    /// identical keys mean the connectivity is degenerate or non-manifold.
    pub fn build(elements: &[OriginalElement]) -> Result<Self> {
        let mut slots = FxHashMap::default();
        slots.reserve(elements.len() * FACES_PER_ELEMENT);

        for (element, original) in elements.iter().enumerate() {
            for face in 0..FACES_PER_ELEMENT {
                let key = original.face_key(face);
                let slot = FaceSlot::new(element, face);
                if let Some(&first) = slots.get(&key) {
                    return Err(Error::DuplicateFaceKey {
                        key,
                        first,
                        second: slot,
                    });
                }
                slots.insert(key, slot);
            }
        }

        Ok(Self { slots })
    }

    /// Returns the occurrence that produced `key`, if any.
    #[inline]
    pub fn get(&self, key: &FaceKey) -> Option<FaceSlot> {
        self.slots.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_element_has_six_keys() {
        let lookup = FaceLookup::build(&[OriginalElement::new([0, 1, 2, 3, 4, 5, 6, 7])]).unwrap();
        assert_eq!(lookup.len(), 6);
        assert_eq!(lookup.get(&FaceKey([0, 3, 2, 1])), Some(FaceSlot::new(0, 0)));
        assert_eq!(lookup.get(&FaceKey([1, 2, 6, 5])), Some(FaceSlot::new(0, 5)));
        assert_eq!(lookup.get(&FaceKey([0, 1, 2, 3])), None);
    }

    #[test]
    fn repeated_element_is_rejected() {
        let elem = OriginalElement::new([0, 1, 2, 3, 4, 5, 6, 7]);
        match FaceLookup::build(&[elem, elem]) {
            Err(Error::DuplicateFaceKey { key, first, second }) => {
                assert_eq!(key, FaceKey([0, 3, 2, 1]));
                assert_eq!(first, FaceSlot::new(0, 0));
                assert_eq!(second, FaceSlot::new(1, 0));
            }
            other => panic!("expected duplicate key, got {other:?}"),
        }
    }

    #[test]
    fn collapsed_element_is_rejected() {
        // Every corner on one node: bottom and top produce the same key.
        let elem = OriginalElement::new([5; 8]);
        match FaceLookup::build(&[elem]) {
            Err(Error::DuplicateFaceKey { first, second, .. }) => {
                assert_eq!(first, FaceSlot::new(0, 0));
                assert_eq!(second, FaceSlot::new(0, 1));
            }
            other => panic!("expected duplicate key, got {other:?}"),
        }
    }
}
