// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Legacy VTK unstructured-grid writer for hexahedral cells.
//!
//! Two presentational transforms are applied to a copy of the points:
//! shrinking every cell toward its centroid, so separated elements are visibly
//! apart, and pushing the two sides of every interface cell apart along the
//! interface normal, so zero-thickness interfaces are visible.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use hexsplit_separation::topology::{NODES_PER_ELEMENT, NODES_PER_FACE};
use hexsplit_separation::{Coordinate, DuplicatedElement, InterfaceElement, OriginalElement};
use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};

/// VTK cell type tag for an 8-node hexahedron.
pub const VTK_HEXAHEDRON: u8 = 12;

/// A cell that can be written as a VTK hexahedron.
pub trait HexCell {
    /// Whether `corners()[0..4]` and `corners()[4..8]` are the two sides of a
    /// zero-thickness interface.
    const INTERFACE: bool = false;

    fn corners(&self) -> [usize; NODES_PER_ELEMENT];
}

impl HexCell for OriginalElement {
    fn corners(&self) -> [usize; NODES_PER_ELEMENT] {
        self.nodes
    }
}

impl HexCell for DuplicatedElement {
    fn corners(&self) -> [usize; NODES_PER_ELEMENT] {
        self.nodes
    }
}

impl HexCell for InterfaceElement {
    const INTERFACE: bool = true;

    fn corners(&self) -> [usize; NODES_PER_ELEMENT] {
        self.nodes
    }
}

/// Writer options.
#[derive(Debug, Clone, PartialEq)]
pub struct VtkOptions {
    /// Second header line of the file.
    pub title: String,
    /// Scale of every cell about its centroid. 1.0 leaves points in place.
    pub shrink_factor: f64,
    /// Separation given to the two sides of interface cells. Ignored for
    /// other cells.
    pub expand_distance: f64,
}

impl Default for VtkOptions {
    fn default() -> Self {
        Self {
            title: "Hexahedral Mesh".into(),
            shrink_factor: 1.0,
            expand_distance: 0.0,
        }
    }
}

impl VtkOptions {
    fn validate(&self) -> Result<()> {
        if !self.shrink_factor.is_finite() || self.shrink_factor <= 0.0 {
            return Err(Error::InvalidOptions(format!(
                "shrink factor must be positive, got {}",
                self.shrink_factor
            )));
        }
        if !self.expand_distance.is_finite() {
            return Err(Error::InvalidOptions(format!(
                "expand distance must be finite, got {}",
                self.expand_distance
            )));
        }
        if self.title.contains('\n') {
            return Err(Error::InvalidOptions("title must be a single line".into()));
        }
        Ok(())
    }
}

#[inline]
fn to_point(c: &Coordinate) -> Point3<f64> {
    Point3::new(c.x, c.y, c.z)
}

#[inline]
fn from_point(p: &Point3<f64>) -> Coordinate {
    Coordinate::new(p.x, p.y, p.z)
}

/// Fails on the first cell corner that does not index into `points`.
fn check_corners<C: HexCell>(points: &[Coordinate], cells: &[C]) -> Result<()> {
    for (cell, c) in cells.iter().enumerate() {
        if let Some(&node) = c.corners().iter().find(|&&n| n >= points.len()) {
            return Err(Error::CornerOutOfRange {
                cell,
                node,
                point_count: points.len(),
            });
        }
    }
    Ok(())
}

/// Centroid of a cell's eight corners.
///
/// Panics if a corner is not an index into `points`.
pub fn cell_centroid(points: &[Coordinate], corners: &[usize; NODES_PER_ELEMENT]) -> Point3<f64> {
    let sum = corners
        .iter()
        .fold(Vector3::zeros(), |acc, &n| acc + to_point(&points[n]).coords);
    Point3::from(sum / NODES_PER_ELEMENT as f64)
}

/// Moves every cell's corners toward the cell centroid by `factor`.
///
/// Centroids are taken from `points`; the result is a new point list.
/// Panics if a corner is not an index into `points`; [`write_vtk`] checks
/// this before transforming.
pub fn shrink_points<C: HexCell>(points: &[Coordinate], cells: &[C], factor: f64) -> Vec<Coordinate> {
    let mut out = points.to_vec();
    if factor == 1.0 {
        return out;
    }
    for cell in cells {
        let corners = cell.corners();
        let center = cell_centroid(points, &corners);
        for &n in &corners {
            let p = center + (to_point(&points[n]) - center) * factor;
            out[n] = from_point(&p);
        }
    }
    out
}

/// Unit normal of a quad from its diagonals, or `None` if degenerate.
///
/// Panics if `quad` has fewer than four entries or indexes past `points`.
pub fn quad_normal(points: &[Coordinate], quad: &[usize]) -> Option<Vector3<f64>> {
    let p = |i: usize| to_point(&points[quad[i]]);
    let normal = (p(2) - p(0)).cross(&(p(3) - p(1)));
    normal.try_normalize(f64::EPSILON)
}

/// Pushes each interface's first side back by `distance / 2` along its
/// normal and the second side forward by the same amount.
///
/// Panics if a corner is not an index into `points`.
pub fn expand_interfaces<C: HexCell>(points: &mut [Coordinate], cells: &[C], distance: f64) {
    if !C::INTERFACE || distance == 0.0 {
        return;
    }
    for cell in cells {
        let corners = cell.corners();
        let (first, second) = corners.split_at(NODES_PER_FACE);
        let Some(normal) = quad_normal(points, first) else {
            continue;
        };
        let offset = normal * (distance / 2.0);
        for &n in first {
            points[n] = from_point(&(to_point(&points[n]) - offset));
        }
        for &n in second {
            points[n] = from_point(&(to_point(&points[n]) + offset));
        }
    }
}

/// Writes `cells` over `points` as a legacy ASCII VTK unstructured grid.
pub fn write_vtk<W: Write, C: HexCell>(
    mut writer: W,
    points: &[Coordinate],
    cells: &[C],
    options: &VtkOptions,
) -> Result<()> {
    options.validate()?;
    check_corners(points, cells)?;

    let mut transformed = shrink_points(points, cells, options.shrink_factor);
    expand_interfaces(&mut transformed, cells, options.expand_distance);

    writeln!(writer, "# vtk DataFile Version 3.0")?;
    writeln!(writer, "{}", options.title)?;
    writeln!(writer, "ASCII")?;
    writeln!(writer, "DATASET UNSTRUCTURED_GRID")?;

    writeln!(writer, "POINTS {} double", transformed.len())?;
    for p in &transformed {
        writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
    }

    writeln!(
        writer,
        "CELLS {} {}",
        cells.len(),
        cells.len() * (1 + NODES_PER_ELEMENT)
    )?;
    for cell in cells {
        let [a, b, c, d, e, f, g, h] = cell.corners();
        writeln!(writer, "{NODES_PER_ELEMENT} {a} {b} {c} {d} {e} {f} {g} {h}")?;
    }

    writeln!(writer, "CELL_TYPES {}", cells.len())?;
    for _ in cells {
        writeln!(writer, "{VTK_HEXAHEDRON}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes a VTK file at `path`.
pub fn write_vtk_file<C: HexCell>(
    path: impl AsRef<Path>,
    points: &[Coordinate],
    cells: &[C],
    options: &VtkOptions,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_vtk(BufWriter::new(file), points, cells, options)?;
    tracing::info!(path = %path.display(), cells = cells.len(), "Wrote VTK file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hexsplit_separation::generate::structured_grid;

    #[test]
    fn unit_cube_file_layout() {
        let mesh = structured_grid(1, 1, 1, 1.0);
        let mut buffer = Vec::new();
        write_vtk(&mut buffer, &mesh.nodes, &mesh.elements, &VtkOptions::default()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# vtk DataFile Version 3.0");
        assert_eq!(lines[1], "Hexahedral Mesh");
        assert_eq!(lines[2], "ASCII");
        assert_eq!(lines[3], "DATASET UNSTRUCTURED_GRID");
        assert_eq!(lines[4], "POINTS 8 double");
        assert_eq!(lines[5], "0 0 0");
        assert_eq!(lines[13], "CELLS 1 9");
        assert_eq!(lines[14], "8 0 1 3 2 4 5 7 6");
        assert_eq!(lines[15], "CELL_TYPES 1");
        assert_eq!(lines[16], "12");
        assert_eq!(lines.len(), 17);
    }

    #[test]
    fn shrink_moves_corners_toward_centroid() {
        let mesh = structured_grid(1, 1, 1, 2.0);
        let shrunk = shrink_points(&mesh.nodes, &mesh.elements, 0.5);
        assert_relative_eq!(shrunk[0].x, 0.5);
        assert_relative_eq!(shrunk[0].y, 0.5);
        assert_relative_eq!(shrunk[0].z, 0.5);
        assert_relative_eq!(shrunk[7].x, 1.5);
        assert_relative_eq!(shrunk[7].z, 1.5);
    }

    #[test]
    fn shrink_factor_one_is_identity() {
        let mesh = structured_grid(2, 1, 1, 1.0);
        assert_eq!(shrink_points(&mesh.nodes, &mesh.elements, 1.0), mesh.nodes);
    }

    #[test]
    fn bottom_face_normal_points_down() {
        let mesh = structured_grid(1, 1, 1, 1.0);
        let bottom: Vec<usize> = [0, 3, 2, 1].iter().map(|&s| mesh.elements[0].nodes[s]).collect();
        let n = quad_normal(&mesh.nodes, &bottom).unwrap();
        assert_relative_eq!(n.z, -1.0);
    }

    #[test]
    fn degenerate_quad_has_no_normal() {
        let points = vec![Coordinate::default(); 4];
        assert!(quad_normal(&points, &[0, 1, 2, 3]).is_none());
    }

    #[test]
    fn expansion_ignores_solid_cells() {
        let mesh = structured_grid(1, 1, 1, 1.0);
        let mut points = mesh.nodes.clone();
        expand_interfaces(&mut points, &mesh.elements, 0.3);
        assert_eq!(points, mesh.nodes);
    }

    #[test]
    fn out_of_range_corner_is_an_error() {
        let mesh = structured_grid(1, 1, 1, 1.0);
        let mut buffer = Vec::new();
        let result = write_vtk(
            &mut buffer,
            &mesh.nodes[..7],
            &mesh.elements,
            &VtkOptions {
                shrink_factor: 0.5,
                ..VtkOptions::default()
            },
        );
        match result {
            Err(Error::CornerOutOfRange {
                cell,
                node,
                point_count,
            }) => {
                assert_eq!((cell, node, point_count), (0, 7, 7));
            }
            other => panic!("expected corner error, got {other:?}"),
        }
        assert!(buffer.is_empty());
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mesh = structured_grid(1, 1, 1, 1.0);
        let options = VtkOptions {
            shrink_factor: 0.0,
            ..VtkOptions::default()
        };
        let result = write_vtk(Vec::new(), &mesh.nodes, &mesh.elements, &options);
        assert!(matches!(result, Err(Error::InvalidOptions(_))));

        let options = VtkOptions {
            expand_distance: f64::NAN,
            ..VtkOptions::default()
        };
        assert!(write_vtk(Vec::new(), &mesh.nodes, &mesh.elements, &options).is_err());
    }
}
