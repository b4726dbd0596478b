// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for mesh I/O.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing mesh files.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("truncated input: expected {expected} {what}, found {found}")]
    Count {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("cell {cell} references point {node}, but only {point_count} points were given")]
    CornerOutOfRange {
        cell: usize,
        node: usize,
        point_count: usize,
    },

    #[error("Invalid VTK options: {0}")]
    InvalidOptions(String),
}
