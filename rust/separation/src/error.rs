// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for mesh separation.

use crate::keys::{FaceKey, FaceSlot};

/// Result type alias for separation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while separating a hexahedral mesh.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input mesh has no elements.
    #[error("invalid mesh: no elements")]
    EmptyMesh,

    /// An element references a node that does not exist.
    #[error(
        "invalid mesh: element {element} slot {slot} references node {node}, \
         but the mesh has only {node_count} nodes"
    )]
    NodeOutOfRange {
        element: usize,
        slot: usize,
        node: usize,
        node_count: usize,
    },

    /// Raw connectivity did not contain exactly eight nodes.
    #[error("invalid mesh: element {element} has {len} nodes, expected 8")]
    ElementArity { element: usize, len: usize },

    /// Two face occurrences produced the same canonical key.
    #[error("duplicate face key {key}: produced by {first} and {second}")]
    DuplicateFaceKey {
        key: FaceKey,
        first: FaceSlot,
        second: FaceSlot,
    },

    /// A face's mating face was already consumed by a third face over the
    /// same four nodes.
    #[error("non-manifold face {slot}: mate {mate} is already paired with another face")]
    NonManifoldFace { slot: FaceSlot, mate: FaceSlot },

    /// A face matched another face of its own element, as happens when an
    /// element is flattened so that two of its faces cover the same nodes.
    #[error("invalid mesh: degenerate element {}: {slot} matches {mate}", .slot.element)]
    DegenerateElement { slot: FaceSlot, mate: FaceSlot },

    /// The separated output violates one of its structural invariants.
    #[error("inconsistent separation output: {0}")]
    Inconsistent(String),
}

impl Error {
    /// Returns `true` for errors caused by a malformed input mesh (as opposed
    /// to connectivity that is well-formed but topologically degenerate).
    pub fn is_invalid_mesh(&self) -> bool {
        matches!(
            self,
            Error::EmptyMesh
                | Error::NodeOutOfRange { .. }
                | Error::ElementArity { .. }
                | Error::DegenerateElement { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_mesh_grouping() {
        assert!(Error::EmptyMesh.is_invalid_mesh());
        assert!(Error::ElementArity { element: 0, len: 7 }.is_invalid_mesh());
        assert!(!Error::Inconsistent("x".into()).is_invalid_mesh());
        assert!(Error::DegenerateElement {
            slot: FaceSlot::new(0, 0),
            mate: FaceSlot::new(0, 1),
        }
        .is_invalid_mesh());

        let dup = Error::DuplicateFaceKey {
            key: FaceKey([0, 1, 2, 3]),
            first: FaceSlot::new(0, 0),
            second: FaceSlot::new(1, 0),
        };
        assert!(!dup.is_invalid_mesh());
    }

    #[test]
    fn messages_name_the_offender() {
        let err = Error::NodeOutOfRange {
            element: 2,
            slot: 5,
            node: 40,
            node_count: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("element 2"));
        assert!(msg.contains("node 40"));

        let dup = Error::DuplicateFaceKey {
            key: FaceKey([0, 3, 2, 1]),
            first: FaceSlot::new(0, 0),
            second: FaceSlot::new(1, 0),
        };
        assert_eq!(
            dup.to_string(),
            "duplicate face key (0, 3, 2, 1): produced by element 0 face 0 and element 1 face 0"
        );
    }
}
