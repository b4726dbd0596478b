// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary records for faces without a mate.

use crate::keys::FaceSlot;
use crate::mesh::{BoundaryFace, DuplicatedElement, FaceDirection};

/// Records `slot` as an exterior face of its owning element.
pub fn classify_boundary(slot: FaceSlot, elements: &mut [DuplicatedElement]) -> BoundaryFace {
    let owner = &mut elements[slot.element];
    owner.face_directions[slot.face] = FaceDirection::Boundary;
    BoundaryFace {
        element: slot.element,
        face: slot.face,
        nodes: owner.face_nodes(slot.face),
    }
}
