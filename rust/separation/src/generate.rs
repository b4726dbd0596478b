// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Small conforming meshes for demos, tests, and benchmarks.

use crate::mesh::{Coordinate, HexMesh, OriginalElement};

/// Builds an `nx × ny × nz` block of unit-aligned hexahedra with edge length
/// `spacing`, sharing nodes between neighbours.
///
/// Elements are numbered with `x` varying fastest, then `y`, then `z`.
pub fn structured_grid(nx: usize, ny: usize, nz: usize, spacing: f64) -> HexMesh {
    let node_id = |i: usize, j: usize, k: usize| i + (nx + 1) * (j + (ny + 1) * k);

    let mut nodes = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                nodes.push(Coordinate::new(
                    i as f64 * spacing,
                    j as f64 * spacing,
                    k as f64 * spacing,
                ));
            }
        }
    }

    let mut elements = Vec::with_capacity(nx * ny * nz);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                elements.push(OriginalElement::new([
                    node_id(i, j, k),
                    node_id(i + 1, j, k),
                    node_id(i + 1, j + 1, k),
                    node_id(i, j + 1, k),
                    node_id(i, j, k + 1),
                    node_id(i + 1, j, k + 1),
                    node_id(i + 1, j + 1, k + 1),
                    node_id(i, j + 1, k + 1),
                ]));
            }
        }
    }

    HexMesh::new(nodes, elements)
}

/// Number of faces shared by two elements of [`structured_grid`]`(nx, ny, nz, _)`.
pub fn interior_face_count(nx: usize, ny: usize, nz: usize) -> usize {
    nx.saturating_sub(1) * ny * nz + nx * ny.saturating_sub(1) * nz + nx * ny * nz.saturating_sub(1)
}

/// Two unit cubes side by side along `x`, sharing the face through nodes
/// 1, 2, 5 and 6.
pub fn two_element_example() -> HexMesh {
    let nodes = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
        [2.0, 0.0, 0.0],
        [2.0, 1.0, 0.0],
        [2.0, 0.0, 1.0],
        [2.0, 1.0, 1.0],
    ]
    .into_iter()
    .map(Coordinate::from)
    .collect();

    HexMesh::new(
        nodes,
        vec![
            OriginalElement::new([0, 1, 2, 3, 4, 5, 6, 7]),
            OriginalElement::new([1, 8, 9, 2, 5, 10, 11, 6]),
        ],
    )
}
