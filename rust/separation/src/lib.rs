// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # HexSplit Separation
//!
//! Converts a conforming hexahedral mesh, where neighbouring elements share
//! node ids, into a separated mesh where every element owns its eight nodes.
//! Every formerly shared face becomes an [`InterfaceElement`] referencing the
//! duplicated nodes of both sides; every other face becomes a
//! [`BoundaryFace`].
//!
//! Faces are matched purely by original node identity, never by coordinate
//! proximity. A face's key is the tuple of its original node ids in the order
//! of [`topology::FACE_NODES`]; the two owners of a shared face traverse it in
//! opposite winding, so one key is a reversed rotation of the other.
//!
//! ```
//! use hexsplit_separation::{generate::structured_grid, separate};
//!
//! let out = separate(&structured_grid(2, 2, 2, 1.0)).unwrap();
//! assert_eq!(out.interfaces.len(), 12);
//! assert_eq!(2 * out.interfaces.len() + out.boundaries.len(), 6 * 8);
//! ```

pub mod boundary;
pub mod duplication;
pub mod error;
pub mod generate;
pub mod interface;
pub mod keys;
pub mod lookup;
pub mod matching;
pub mod mesh;
pub mod options;
pub mod separation;
pub mod topology;
pub mod validation;
mod verify;

pub use error::{Error, Result};
pub use keys::{FaceKey, FaceSlot};
pub use lookup::FaceLookup;
pub use matching::{find_mate, Mate, MateSearch};
pub use mesh::{
    BoundaryFace, Coordinate, DuplicatedElement, FaceDirection, HexMesh, InterfaceElement,
    InterfaceSide, NodeOrigin, OriginalElement, SeparatedMesh, SeparationSummary,
};
pub use options::SeparationOptions;
pub use separation::{separate, separate_with};
