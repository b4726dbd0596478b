// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node duplication and coordinate assignment.
//!
//! Duplicated node `8 * e + s` belongs to element `e` at corner slot `s`, so
//! no two elements of the output reference the same node.

use crate::mesh::{Coordinate, DuplicatedElement, FaceDirection, NodeOrigin, OriginalElement};
use crate::topology::{FACES_PER_ELEMENT, NODES_PER_ELEMENT};

/// Allocates fresh node ids for every `(element, slot)` pair.
///
/// Returns the duplicated connectivity, with every face direction still
/// [`FaceDirection::Boundary`], and the origin record of each new node.
pub fn duplicate_nodes(
    elements: &[OriginalElement],
) -> (Vec<DuplicatedElement>, Vec<NodeOrigin>) {
    let mut duplicated = Vec::with_capacity(elements.len());
    let mut origin = Vec::with_capacity(elements.len() * NODES_PER_ELEMENT);

    for (element, original) in elements.iter().enumerate() {
        let base = element * NODES_PER_ELEMENT;
        let mut nodes = [0usize; NODES_PER_ELEMENT];
        for (local_slot, &original_node) in original.nodes.iter().enumerate() {
            nodes[local_slot] = base + local_slot;
            origin.push(NodeOrigin {
                original_node,
                element,
                local_slot,
            });
        }
        duplicated.push(DuplicatedElement {
            nodes,
            face_directions: [FaceDirection::Boundary; FACES_PER_ELEMENT],
        });
    }

    (duplicated, origin)
}

/// Gathers the original coordinate of every duplicated node.
///
/// Every `original_node` in `origin` must index into `original`; the input
/// mesh is validated before this runs.
pub fn assign_coordinates(original: &[Coordinate], origin: &[NodeOrigin]) -> Vec<Coordinate> {
    origin.iter().map(|o| original[o.original_node]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_elements() -> Vec<OriginalElement> {
        vec![
            OriginalElement::new([0, 1, 2, 3, 4, 5, 6, 7]),
            OriginalElement::new([1, 8, 9, 2, 5, 10, 11, 6]),
        ]
    }

    #[test]
    fn ids_are_element_major() {
        let (dup, origin) = duplicate_nodes(&two_elements());
        assert_eq!(dup.len(), 2);
        assert_eq!(dup[0].nodes, [0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(dup[1].nodes, [8, 9, 10, 11, 12, 13, 14, 15]);
        assert!(dup
            .iter()
            .all(|e| e.face_directions == [FaceDirection::Boundary; FACES_PER_ELEMENT]));

        assert_eq!(origin.len(), 16);
        for (i, o) in origin.iter().enumerate() {
            assert_eq!(o.element, i / NODES_PER_ELEMENT);
            assert_eq!(o.local_slot, i % NODES_PER_ELEMENT);
        }
        assert_eq!(
            origin[9],
            NodeOrigin {
                original_node: 8,
                element: 1,
                local_slot: 1
            }
        );
    }

    #[test]
    fn shared_original_nodes_get_separate_copies() {
        let (_, origin) = duplicate_nodes(&two_elements());
        let copies_of_1: Vec<usize> = origin
            .iter()
            .enumerate()
            .filter(|(_, o)| o.original_node == 1)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(copies_of_1, vec![1, 8]);
    }

    #[test]
    fn coordinates_follow_origin() {
        let original: Vec<Coordinate> = (0..12)
            .map(|i| Coordinate::new(i as f64, 2.0 * i as f64, -(i as f64)))
            .collect();
        let (_, origin) = duplicate_nodes(&two_elements());
        let coords = assign_coordinates(&original, &origin);

        assert_eq!(coords.len(), 16);
        for (coord, o) in coords.iter().zip(&origin) {
            assert_eq!(*coord, original[o.original_node]);
        }
        assert_eq!(coords[1], coords[8]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let (dup, origin) = duplicate_nodes(&[]);
        assert!(dup.is_empty());
        assert!(origin.is_empty());
    }
}
