// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input mesh preconditions, checked before anything is allocated.

use crate::error::{Error, Result};
use crate::mesh::HexMesh;

/// Checks that `mesh` has at least one element and that every node id it
/// references exists.
///
/// Reports the first out-of-range reference in `(element, slot)` order.
pub fn validate(mesh: &HexMesh) -> Result<()> {
    if mesh.elements.is_empty() {
        return Err(Error::EmptyMesh);
    }

    let node_count = mesh.nodes.len();
    for (element, original) in mesh.elements.iter().enumerate() {
        if let Some((slot, &node)) = original
            .nodes
            .iter()
            .enumerate()
            .find(|&(_, &node)| node >= node_count)
        {
            return Err(Error::NodeOutOfRange {
                element,
                slot,
                node,
                node_count,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Coordinate, OriginalElement};

    fn cube_nodes() -> Vec<Coordinate> {
        vec![Coordinate::default(); 8]
    }

    #[test]
    fn empty_mesh_is_invalid() {
        let mesh = HexMesh::new(cube_nodes(), Vec::new());
        assert!(matches!(validate(&mesh), Err(Error::EmptyMesh)));
    }

    #[test]
    fn in_range_mesh_passes() {
        let mesh = HexMesh::new(
            cube_nodes(),
            vec![OriginalElement::new([0, 1, 2, 3, 4, 5, 6, 7])],
        );
        assert!(validate(&mesh).is_ok());
    }

    #[test]
    fn first_out_of_range_reference_is_reported() {
        let mesh = HexMesh::new(
            cube_nodes(),
            vec![
                OriginalElement::new([0, 1, 2, 3, 4, 5, 6, 7]),
                OriginalElement::new([0, 1, 9, 3, 4, 8, 6, 7]),
            ],
        );
        match validate(&mesh) {
            Err(Error::NodeOutOfRange {
                element,
                slot,
                node,
                node_count,
            }) => {
                assert_eq!((element, slot, node, node_count), (1, 2, 9, 8));
            }
            other => panic!("expected out-of-range error, got {other:?}"),
        }
    }

    #[test]
    fn elements_without_nodes_are_invalid() {
        let mesh = HexMesh::new(
            Vec::new(),
            vec![OriginalElement::new([0, 1, 2, 3, 4, 5, 6, 7])],
        );
        assert!(validate(&mesh).unwrap_err().is_invalid_mesh());
    }
}
