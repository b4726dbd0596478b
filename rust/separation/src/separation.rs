// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The separation transform.

use std::time::Instant;

use crate::duplication::{assign_coordinates, duplicate_nodes};
use crate::error::Result;
use crate::lookup::FaceLookup;
use crate::matching::match_faces;
use crate::mesh::{HexMesh, SeparatedMesh};
use crate::options::SeparationOptions;
use crate::validation::validate;

/// Separates `mesh` with default options.
///
/// # Example
///
/// ```
/// use hexsplit_separation::{generate::two_element_example, separate};
///
/// let out = separate(&two_element_example()).unwrap();
/// assert_eq!(out.interfaces.len(), 1);
/// assert_eq!(out.boundaries.len(), 10);
/// assert_eq!(out.nodes.len(), 16);
/// ```
pub fn separate(mesh: &HexMesh) -> Result<SeparatedMesh> {
    separate_with(mesh, &SeparationOptions::default())
}

/// Separates `mesh`: gives every element its own eight nodes, inserts an
/// interface at every shared face, and records every other face as boundary.
///
/// Nothing is returned on failure; the input is left untouched.
pub fn separate_with(mesh: &HexMesh, options: &SeparationOptions) -> Result<SeparatedMesh> {
    let start = Instant::now();
    tracing::info!(
        nodes = mesh.node_count(),
        elements = mesh.element_count(),
        parallel_search = options.parallel_search,
        "Starting mesh separation"
    );

    if let Err(err) = validate(mesh) {
        tracing::warn!(error = %err, "Rejected input mesh");
        return Err(err);
    }

    let (mut elements, node_origin) = duplicate_nodes(&mesh.elements);
    tracing::debug!(nodes = node_origin.len(), "Duplicated nodes");

    let lookup = match FaceLookup::build(&mesh.elements) {
        Ok(lookup) => lookup,
        Err(err) => {
            tracing::warn!(error = %err, "Rejected input mesh");
            return Err(err);
        }
    };
    tracing::debug!(keys = lookup.len(), "Built face lookup");

    let faces = match_faces(&mesh.elements, &lookup, &mut elements, options.mate_search())?;
    let nodes = assign_coordinates(&mesh.nodes, &node_origin);

    let separated = SeparatedMesh {
        nodes,
        elements,
        interfaces: faces.interfaces,
        boundaries: faces.boundaries,
        node_origin,
    };

    if options.verify {
        separated.verify()?;
    }

    let summary = separated.summary();
    tracing::info!(
        interfaces = summary.interfaces,
        boundaries = summary.boundaries,
        nodes = summary.nodes,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Mesh separation complete"
    );

    Ok(separated)
}
