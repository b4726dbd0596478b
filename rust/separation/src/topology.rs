// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed local topology of a hexahedron.
//!
//! Corner slots 0..3 form the bottom quad, counter-clockwise when viewed from
//! above, and slots 4..7 sit directly above them. Each face lists its four
//! corner slots so that the winding is counter-clockwise when viewed from
//! outside the element.

/// Corner nodes per hexahedron.
pub const NODES_PER_ELEMENT: usize = 8;

/// Faces per hexahedron.
pub const FACES_PER_ELEMENT: usize = 6;

/// Corner nodes per quadrilateral face.
pub const NODES_PER_FACE: usize = 4;

/// Local corner slots of each face, outward winding.
///
/// | face | slots        | outward side |
/// |------|--------------|--------------|
/// | 0    | 0, 3, 2, 1   | bottom       |
/// | 1    | 4, 5, 6, 7   | top          |
/// | 2    | 0, 1, 5, 4   | front        |
/// | 3    | 3, 7, 6, 2   | back         |
/// | 4    | 0, 4, 7, 3   | left         |
/// | 5    | 1, 2, 6, 5   | right        |
pub const FACE_NODES: [[usize; NODES_PER_FACE]; FACES_PER_ELEMENT] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [3, 7, 6, 2],
    [0, 4, 7, 3],
    [1, 2, 6, 5],
];

/// The four rotations of a reversed face key, in search order.
///
/// Entry `p` lists which position of the original key lands at each position
/// of the restated key: `R_p[j] = K[REVERSED_ROTATIONS[p][j]]`. Every entry is
/// a reflection, so it is its own inverse: if face B's key is `R_p` of face
/// A's key, then slot `j` of B holds the node at slot `REVERSED_ROTATIONS[p][j]`
/// of A and vice versa.
pub const REVERSED_ROTATIONS: [[usize; NODES_PER_FACE]; NODES_PER_FACE] = [
    [3, 2, 1, 0],
    [2, 1, 0, 3],
    [1, 0, 3, 2],
    [0, 3, 2, 1],
];

/// Returns the local corner slots of `face`.
#[inline]
pub fn face_slots(face: usize) -> &'static [usize; NODES_PER_FACE] {
    &FACE_NODES[face]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_corner_is_on_three_faces() {
        let mut uses = [0usize; NODES_PER_ELEMENT];
        for face in &FACE_NODES {
            for &slot in face {
                uses[slot] += 1;
            }
        }
        assert_eq!(uses, [3; NODES_PER_ELEMENT]);
    }

    #[test]
    fn every_edge_is_traversed_once_in_each_direction() {
        // Consistent outward winding means each directed edge appears once and
        // its reverse appears on the neighbouring face.
        let mut directed = Vec::new();
        for face in &FACE_NODES {
            for i in 0..NODES_PER_FACE {
                directed.push((face[i], face[(i + 1) % NODES_PER_FACE]));
            }
        }
        for &(a, b) in &directed {
            assert_eq!(directed.iter().filter(|&&e| e == (a, b)).count(), 1);
            assert!(directed.contains(&(b, a)), "edge {a}->{b} has no reverse");
        }
    }

    #[test]
    fn reversed_rotations_are_involutions() {
        for perm in &REVERSED_ROTATIONS {
            for i in 0..NODES_PER_FACE {
                assert_eq!(perm[perm[i]], i);
            }
        }
    }
}
