// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face matching: pairs every shared face exactly once and classifies the
//! rest as boundary.
//!
//! Slots are visited in `(element, face)` order. The mate search itself is a
//! pure function of the lookup, so it can be precomputed in parallel with
//! [`MateSearch::Parallel`]; pairing always happens sequentially, which keeps
//! the output identical for both strategies.
//!
//! Two situations the plain pairing rule does not cover are rejected instead
//! of skipped. A mate on the slot's own element means the element is
//! degenerate ([`Error::DegenerateElement`]). An unpaired slot whose mate is
//! already paired means a third face covers the same four nodes
//! ([`Error::NonManifoldFace`]). Silently skipping either would leave a face
//! slot unrecorded or join an element to itself.

use rayon::prelude::*;

use crate::boundary::classify_boundary;
use crate::error::{Error, Result};
use crate::interface::build_interface;
use crate::keys::FaceSlot;
use crate::lookup::FaceLookup;
use crate::mesh::{BoundaryFace, DuplicatedElement, InterfaceElement, OriginalElement};
use crate::topology::FACES_PER_ELEMENT;

/// A face occurrence matched to another, with the reversed rotation under
/// which the mate's key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mate {
    pub slot: FaceSlot,
    /// Index into [`REVERSED_ROTATIONS`](crate::topology::REVERSED_ROTATIONS).
    pub rotation: usize,
}

/// How mates are searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MateSearch {
    /// Search lazily, one slot at a time.
    #[default]
    Sequential,
    /// Search every slot up front on the rayon pool.
    Parallel,
}

/// Finds the face occurrence sharing `slot`'s face, if any.
///
/// Tries the four reversed rotations of the slot's key in order and returns
/// the first hit that is not the slot itself.
pub fn find_mate(
    lookup: &FaceLookup,
    originals: &[OriginalElement],
    slot: FaceSlot,
) -> Option<Mate> {
    let key = originals[slot.element].face_key(slot.face);
    key.reversed_rotations().find_map(|(rotation, candidate)| {
        lookup
            .get(&candidate)
            .filter(|&found| found != slot)
            .map(|found| Mate {
                slot: found,
                rotation,
            })
    })
}

/// Paired flag per face slot, indexed by [`FaceSlot::index`].
#[derive(Debug)]
pub struct PairingState {
    paired: Vec<bool>,
}

impl PairingState {
    pub fn new(element_count: usize) -> Self {
        Self {
            paired: vec![false; element_count * FACES_PER_ELEMENT],
        }
    }

    #[inline]
    pub fn is_paired(&self, slot: FaceSlot) -> bool {
        self.paired[slot.index()]
    }

    #[inline]
    pub fn mark(&mut self, slot: FaceSlot) {
        self.paired[slot.index()] = true;
    }

    /// Number of slots consumed by interfaces.
    pub fn paired_count(&self) -> usize {
        self.paired.iter().filter(|&&p| p).count()
    }
}

/// Interface and boundary records produced by [`match_faces`].
#[derive(Debug, Default)]
pub struct FaceClassification {
    pub interfaces: Vec<InterfaceElement>,
    pub boundaries: Vec<BoundaryFace>,
}

/// Visits every face slot once, building interfaces for matched pairs and
/// boundary records for the rest. Stamps face directions on `elements`.
///
/// Fails with [`Error::DegenerateElement`] when a face matches another face
/// of the same element, and with [`Error::NonManifoldFace`] when an unpaired
/// slot's mate was already consumed by another face.
pub fn match_faces(
    originals: &[OriginalElement],
    lookup: &FaceLookup,
    elements: &mut [DuplicatedElement],
    search: MateSearch,
) -> Result<FaceClassification> {
    let slot_count = originals.len() * FACES_PER_ELEMENT;

    let precomputed: Option<Vec<Option<Mate>>> = match search {
        MateSearch::Sequential => None,
        MateSearch::Parallel => Some(
            (0..slot_count)
                .into_par_iter()
                .map(|i| find_mate(lookup, originals, FaceSlot::from_index(i)))
                .collect(),
        ),
    };

    let mut state = PairingState::new(originals.len());
    let mut out = FaceClassification::default();

    for index in 0..slot_count {
        let slot = FaceSlot::from_index(index);
        // Already consumed as the second side of an earlier interface.
        if state.is_paired(slot) {
            continue;
        }

        let mate = match &precomputed {
            Some(mates) => mates[index],
            None => find_mate(lookup, originals, slot),
        };

        match mate {
            None => out.boundaries.push(classify_boundary(slot, elements)),
            Some(mate) if mate.slot.element == slot.element => {
                tracing::warn!(%slot, mate = %mate.slot, "face matched its own element");
                return Err(Error::DegenerateElement {
                    slot,
                    mate: mate.slot,
                });
            }
            Some(mate) if state.is_paired(mate.slot) => {
                tracing::warn!(%slot, mate = %mate.slot, "face mate already paired");
                return Err(Error::NonManifoldFace {
                    slot,
                    mate: mate.slot,
                });
            }
            Some(mate) => {
                state.mark(slot);
                state.mark(mate.slot);
                out.interfaces.push(build_interface(slot, mate, elements));
            }
        }
    }

    tracing::debug!(
        paired_slots = state.paired_count(),
        interfaces = out.interfaces.len(),
        boundaries = out.boundaries.len(),
        "Face matching complete"
    );

    Ok(out)
}
