// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interface element construction for a matched face pair.

use crate::keys::FaceSlot;
use crate::matching::Mate;
use crate::mesh::{DuplicatedElement, FaceDirection, InterfaceElement, InterfaceSide};
use crate::topology::{face_slots, NODES_PER_FACE, REVERSED_ROTATIONS};

/// Builds the interface joining `slot` (first side) to its `mate` (second
/// side) and stamps both owners' face directions.
///
/// The second side's node order comes straight from the rotation found by the
/// mate search: slot `i` of the first face coincides with slot
/// `REVERSED_ROTATIONS[rotation][i]` of the second.
pub fn build_interface(
    slot: FaceSlot,
    mate: Mate,
    elements: &mut [DuplicatedElement],
) -> InterfaceElement {
    let perm = &REVERSED_ROTATIONS[mate.rotation];
    let first_slots = face_slots(slot.face);
    let second_slots = face_slots(mate.slot.face);
    let first = &elements[slot.element];
    let second = &elements[mate.slot.element];

    let mut nodes = [0usize; 2 * NODES_PER_FACE];
    for i in 0..NODES_PER_FACE {
        nodes[i] = first.nodes[first_slots[i]];
        nodes[i + NODES_PER_FACE] = second.nodes[second_slots[perm[i]]];
    }

    elements[slot.element].face_directions[slot.face] = FaceDirection::Negative;
    elements[mate.slot.element].face_directions[mate.slot.face] = FaceDirection::Positive;

    InterfaceElement {
        nodes,
        sides: [
            InterfaceSide {
                element: slot.element,
                face: slot.face,
                direction: FaceDirection::Negative,
            },
            InterfaceSide {
                element: mate.slot.element,
                face: mate.slot.face,
                direction: FaceDirection::Positive,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplication::duplicate_nodes;
    use crate::mesh::OriginalElement;

    #[test]
    fn shared_face_of_two_cubes() {
        let originals = [
            OriginalElement::new([0, 1, 2, 3, 4, 5, 6, 7]),
            OriginalElement::new([1, 8, 9, 2, 5, 10, 11, 6]),
        ];
        let (mut elements, origin) = duplicate_nodes(&originals);
        let mate = Mate {
            slot: FaceSlot::new(1, 4),
            rotation: 3,
        };

        let iface = build_interface(FaceSlot::new(0, 5), mate, &mut elements);

        assert_eq!(iface.nodes, [1, 2, 6, 5, 8, 11, 15, 12]);
        for i in 0..NODES_PER_FACE {
            assert_eq!(
                origin[iface.nodes[i]].original_node,
                origin[iface.nodes[i + NODES_PER_FACE]].original_node
            );
        }
        assert_eq!(iface.sides[0].element, 0);
        assert_eq!(iface.sides[0].face, 5);
        assert_eq!(iface.sides[0].direction, FaceDirection::Negative);
        assert_eq!(iface.sides[1].element, 1);
        assert_eq!(iface.sides[1].face, 4);
        assert_eq!(iface.sides[1].direction, FaceDirection::Positive);

        assert_eq!(elements[0].face_directions[5], FaceDirection::Negative);
        assert_eq!(elements[1].face_directions[4], FaceDirection::Positive);
        assert_eq!(elements[0].face_directions[0], FaceDirection::Boundary);
    }
}
