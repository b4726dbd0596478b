// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plain-text hexahedral mesh format.
//!
//! Whitespace-separated tokens:
//!
//! ```text
//! <node count>
//! x y z            (node count times)
//! <element count>
//! n0 n1 ... n7     (element count times, 1-based node indices)
//! ```
//!
//! Node indices are converted to 0-based on read and back on write.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use hexsplit_separation::topology::NODES_PER_ELEMENT;
use hexsplit_separation::{Coordinate, HexMesh, OriginalElement};
use nom::{
    branch::alt,
    character::complete::{digit1, multispace0, multispace1},
    combinator::{eof, map_res, peek},
    number::complete::double,
    sequence::terminated,
    IResult,
};

use crate::error::{Error, Result};

const MAX_PREALLOC: usize = 1 << 20;

/// Parse an unsigned integer: 42
fn unsigned(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// Whitespace or end of input after a token
fn separator(input: &str) -> IResult<&str, &str> {
    alt((multispace1, eof))(input)
}

/// Token stream over the whole file, tracking the current line for errors.
struct Tokens<'a> {
    source: &'a str,
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
        }
    }

    fn line(&self) -> usize {
        let consumed = &self.source[..self.source.len() - self.rest.len()];
        1 + consumed.matches('\n').count()
    }

    fn is_exhausted(&mut self) -> bool {
        if let Ok((rest, _)) = multispace0::<&str, nom::error::Error<&str>>(self.rest) {
            self.rest = rest;
        }
        self.rest.is_empty()
    }

    fn current_token(&self) -> &'a str {
        self.rest.split_whitespace().next().unwrap_or("")
    }

    /// Parses the next token, or returns `None` at end of input.
    fn next<T, P>(&mut self, what: &str, parser: P) -> Result<Option<T>>
    where
        P: FnMut(&'a str) -> IResult<&'a str, T>,
    {
        if self.is_exhausted() {
            return Ok(None);
        }
        match terminated(parser, peek(separator))(self.rest) {
            Ok((rest, value)) => {
                self.rest = rest;
                Ok(Some(value))
            }
            Err(_) => Err(self.error(format!(
                "expected {what}, found `{}`",
                self.current_token()
            ))),
        }
    }

    fn error(&self, message: String) -> Error {
        Error::Parse {
            line: self.line(),
            message,
        }
    }
}

/// Parses a mesh from its text form.
pub fn parse_mesh(input: &str) -> Result<HexMesh> {
    let mut tokens = Tokens::new(input);

    let node_count = tokens
        .next("node count", unsigned)?
        .ok_or_else(|| tokens.error("missing node count".into()))?;

    let mut nodes = Vec::with_capacity(node_count.min(MAX_PREALLOC));
    for found in 0..node_count {
        let mut xyz = [0.0; 3];
        for value in &mut xyz {
            *value = tokens.next("coordinate", double)?.ok_or(Error::Count {
                what: "nodes",
                expected: node_count,
                found,
            })?;
        }
        if !xyz.iter().all(|v| v.is_finite()) {
            return Err(tokens.error(format!("node {} has a non-finite coordinate", found + 1)));
        }
        nodes.push(Coordinate::from(xyz));
    }

    let element_count = tokens
        .next("element count", unsigned)?
        .ok_or_else(|| tokens.error("missing element count".into()))?;

    let mut elements = Vec::with_capacity(element_count.min(MAX_PREALLOC));
    for found in 0..element_count {
        let mut connectivity = [0usize; NODES_PER_ELEMENT];
        for slot in &mut connectivity {
            let index = tokens.next("node index", unsigned)?.ok_or(Error::Count {
                what: "elements",
                expected: element_count,
                found,
            })?;
            if index == 0 {
                return Err(tokens.error(format!(
                    "element {} has node index 0; indices are 1-based",
                    found + 1
                )));
            }
            *slot = index - 1;
        }
        elements.push(OriginalElement::new(connectivity));
    }

    if !tokens.is_exhausted() {
        tracing::warn!(line = tokens.line(), "Ignoring trailing content after element list");
    }

    tracing::debug!(nodes = nodes.len(), elements = elements.len(), "Parsed mesh");
    Ok(HexMesh::new(nodes, elements))
}

/// Reads a mesh from any reader.
pub fn read_mesh<R: Read>(mut reader: R) -> Result<HexMesh> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_mesh(&content)
}

/// Reads a mesh file.
pub fn read_mesh_file(path: impl AsRef<Path>) -> Result<HexMesh> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Reading mesh");
    let content = fs::read_to_string(path)?;
    parse_mesh(&content)
}

/// Writes a mesh in the text form read by [`parse_mesh`].
pub fn write_mesh<W: Write>(mut writer: W, mesh: &HexMesh) -> Result<()> {
    writeln!(writer, "{}", mesh.nodes.len())?;
    for node in &mesh.nodes {
        writeln!(writer, "{} {} {}", node.x, node.y, node.z)?;
    }

    writeln!(writer, "{}", mesh.elements.len())?;
    for element in &mesh.elements {
        let [a, b, c, d, e, f, g, h] = element.nodes.map(|n| n + 1);
        writeln!(writer, "{a} {b} {c} {d} {e} {f} {g} {h}")?;
    }
    Ok(())
}
