// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HexSplit mesh I/O
//!
//! Reads the plain-text hexahedral mesh format and writes meshes, separated
//! meshes, and interface sets as legacy VTK unstructured grids for viewing in
//! ParaView or similar tools. Nothing here mutates separation output.

pub mod error;
pub mod reader;
pub mod vtk;

pub use error::{Error, Result};
pub use reader::{parse_mesh, read_mesh, read_mesh_file, write_mesh};
pub use vtk::{write_vtk, write_vtk_file, HexCell, VtkOptions, VTK_HEXAHEDRON};
