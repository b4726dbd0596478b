// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures.
//!
//! Input is a [`HexMesh`] of [`OriginalElement`]s that share node ids. Output
//! is a [`SeparatedMesh`] whose [`DuplicatedElement`]s own disjoint nodes,
//! joined by [`InterfaceElement`]s at every formerly shared face and closed
//! by [`BoundaryFace`]s everywhere else.

use std::fmt;

use crate::error::{Error, Result};
use crate::keys::FaceKey;
use crate::topology::{face_slots, FACES_PER_ELEMENT, NODES_PER_ELEMENT, NODES_PER_FACE};

/// A point in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Coordinate {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// A hexahedron of the input mesh: eight original node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OriginalElement {
    pub nodes: [usize; NODES_PER_ELEMENT],
}

impl OriginalElement {
    #[inline]
    pub fn new(nodes: [usize; NODES_PER_ELEMENT]) -> Self {
        Self { nodes }
    }

    /// Builds an element from raw connectivity.
    ///
    /// `element` is only used to label the error when `nodes` does not hold
    /// exactly eight entries.
    pub fn from_slice(element: usize, nodes: &[usize]) -> Result<Self> {
        let nodes: [usize; NODES_PER_ELEMENT] =
            nodes.try_into().map_err(|_| Error::ElementArity {
                element,
                len: nodes.len(),
            })?;
        Ok(Self { nodes })
    }

    /// Canonical key of `face`: the original node ids in face-table order.
    #[inline]
    pub fn face_key(&self, face: usize) -> FaceKey {
        FaceKey(face_slots(face).map(|slot| self.nodes[slot]))
    }
}

/// Conforming input mesh.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexMesh {
    pub nodes: Vec<Coordinate>,
    pub elements: Vec<OriginalElement>,
}

impl HexMesh {
    pub fn new(nodes: Vec<Coordinate>, elements: Vec<OriginalElement>) -> Self {
        Self { nodes, elements }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

/// Which side of an interface a face sits on, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaceDirection {
    /// First side of an interface.
    Negative,
    /// Exterior face with no neighbour.
    #[default]
    Boundary,
    /// Second side of an interface.
    Positive,
}

impl FaceDirection {
    /// Signed tag: -1, 0 or +1.
    #[inline]
    pub fn sign(&self) -> i8 {
        match self {
            FaceDirection::Negative => -1,
            FaceDirection::Boundary => 0,
            FaceDirection::Positive => 1,
        }
    }
}

/// A hexahedron of the separated mesh, owning its eight nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuplicatedElement {
    pub nodes: [usize; NODES_PER_ELEMENT],
    pub face_directions: [FaceDirection; FACES_PER_ELEMENT],
}

impl DuplicatedElement {
    /// Duplicated node ids of `face`, in face-table order.
    #[inline]
    pub fn face_nodes(&self, face: usize) -> [usize; NODES_PER_FACE] {
        face_slots(face).map(|slot| self.nodes[slot])
    }
}

/// Where a duplicated node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeOrigin {
    /// Original node id the duplicate copies.
    pub original_node: usize,
    /// Element that owns the duplicate.
    pub element: usize,
    /// Corner slot (0..8) within that element.
    pub local_slot: usize,
}

/// One side of an interface element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceSide {
    pub element: usize,
    pub face: usize,
    pub direction: FaceDirection,
}

/// Connector between two formerly shared faces.
///
/// `nodes[0..4]` are the first side's duplicated nodes in its own face order;
/// `nodes[4..8]` are the second side's duplicated nodes, arranged so that
/// `nodes[i]` and `nodes[i + 4]` copy the same original node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceElement {
    pub nodes: [usize; 2 * NODES_PER_FACE],
    pub sides: [InterfaceSide; 2],
}

impl InterfaceElement {
    /// Duplicated nodes of side `side` (0 or 1).
    #[inline]
    pub fn side_nodes(&self, side: usize) -> [usize; NODES_PER_FACE] {
        let base = side * NODES_PER_FACE;
        [
            self.nodes[base],
            self.nodes[base + 1],
            self.nodes[base + 2],
            self.nodes[base + 3],
        ]
    }
}

/// An exterior face owned by exactly one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryFace {
    pub element: usize,
    pub face: usize,
    pub nodes: [usize; NODES_PER_FACE],
}

/// Output of the separation transform.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeparatedMesh {
    /// `8 * elements.len()` coordinates, one per duplicated node.
    pub nodes: Vec<Coordinate>,
    pub elements: Vec<DuplicatedElement>,
    pub interfaces: Vec<InterfaceElement>,
    pub boundaries: Vec<BoundaryFace>,
    /// `node_origin[i]` describes duplicated node `i`.
    pub node_origin: Vec<NodeOrigin>,
}

impl SeparatedMesh {
    /// Counts of every output collection.
    pub fn summary(&self) -> SeparationSummary {
        SeparationSummary {
            elements: self.elements.len(),
            nodes: self.nodes.len(),
            interfaces: self.interfaces.len(),
            boundaries: self.boundaries.len(),
        }
    }
}

/// Entity counts of a [`SeparatedMesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeparationSummary {
    pub elements: usize,
    pub nodes: usize,
    pub interfaces: usize,
    pub boundaries: usize,
}

impl fmt::Display for SeparationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} elements, {} nodes, {} interfaces, {} boundary faces",
            self.elements, self.nodes, self.interfaces, self.boundaries
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_checks_arity() {
        let ok = OriginalElement::from_slice(0, &[0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(ok.nodes, [0, 1, 2, 3, 4, 5, 6, 7]);

        match OriginalElement::from_slice(3, &[0, 1, 2]) {
            Err(Error::ElementArity { element: 3, len: 3 }) => {}
            other => panic!("expected arity error, got {other:?}"),
        }
        assert!(OriginalElement::from_slice(0, &[0; 9]).is_err());
    }

    #[test]
    fn face_key_follows_face_table() {
        let elem = OriginalElement::new([10, 11, 12, 13, 14, 15, 16, 17]);
        assert_eq!(elem.face_key(0), FaceKey([10, 13, 12, 11]));
        assert_eq!(elem.face_key(5), FaceKey([11, 12, 16, 15]));
    }

    #[test]
    fn direction_signs() {
        assert_eq!(FaceDirection::Negative.sign(), -1);
        assert_eq!(FaceDirection::Boundary.sign(), 0);
        assert_eq!(FaceDirection::Positive.sign(), 1);
        assert_eq!(FaceDirection::default(), FaceDirection::Boundary);
    }

    #[test]
    fn interface_side_nodes_split_layout() {
        let side = InterfaceSide {
            element: 0,
            face: 0,
            direction: FaceDirection::Negative,
        };
        let iface = InterfaceElement {
            nodes: [1, 2, 3, 4, 5, 6, 7, 8],
            sides: [side, side],
        };
        assert_eq!(iface.side_nodes(0), [1, 2, 3, 4]);
        assert_eq!(iface.side_nodes(1), [5, 6, 7, 8]);
    }

    #[test]
    fn summary_display() {
        let summary = SeparationSummary {
            elements: 2,
            nodes: 16,
            interfaces: 1,
            boundaries: 10,
        };
        assert_eq!(
            summary.to_string(),
            "2 elements, 16 nodes, 1 interfaces, 10 boundary faces"
        );
    }
}
