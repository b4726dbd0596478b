// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural invariants of a separated mesh.

use crate::error::{Error, Result};
use crate::keys::FaceSlot;
use crate::mesh::{FaceDirection, SeparatedMesh};
use crate::topology::{FACES_PER_ELEMENT, NODES_PER_ELEMENT, NODES_PER_FACE};

fn inconsistent(message: String) -> Error {
    Error::Inconsistent(message)
}

impl SeparatedMesh {
    /// Checks every structural invariant of the output.
    ///
    /// - node and origin counts are `8 * elements`
    /// - duplicated node `i` belongs to element `i / 8` at slot `i % 8`
    /// - every face slot is consumed by exactly one interface side or one
    ///   boundary record, and its direction tag agrees
    /// - interface sides sit on different elements, tagged -1 then +1, and
    ///   `nodes[i]` / `nodes[i + 4]` copy the same original node
    /// - boundary nodes are the owner's own face nodes
    pub fn verify(&self) -> Result<()> {
        let element_count = self.elements.len();
        let node_count = element_count * NODES_PER_ELEMENT;

        if self.nodes.len() != node_count {
            return Err(inconsistent(format!(
                "{} coordinates for {} duplicated nodes",
                self.nodes.len(),
                node_count
            )));
        }
        if self.node_origin.len() != node_count {
            return Err(inconsistent(format!(
                "{} origin records for {} duplicated nodes",
                self.node_origin.len(),
                node_count
            )));
        }

        for (i, origin) in self.node_origin.iter().enumerate() {
            let element = i / NODES_PER_ELEMENT;
            let slot = i % NODES_PER_ELEMENT;
            if origin.element != element
                || origin.local_slot != slot
                || self.elements[element].nodes[slot] != i
            {
                return Err(inconsistent(format!(
                    "duplicated node {i} is not element {element} slot {slot}"
                )));
            }
        }

        let face_slots = element_count * FACES_PER_ELEMENT;
        if 2 * self.interfaces.len() + self.boundaries.len() != face_slots {
            return Err(inconsistent(format!(
                "2 * {} interfaces + {} boundaries != {} face slots",
                self.interfaces.len(),
                self.boundaries.len(),
                face_slots
            )));
        }

        let mut consumed = vec![false; face_slots];
        let mut consume = |slot: FaceSlot, direction: FaceDirection| -> Result<()> {
            if slot.element >= element_count || slot.face >= FACES_PER_ELEMENT {
                return Err(inconsistent(format!("{slot} does not exist")));
            }
            if std::mem::replace(&mut consumed[slot.index()], true) {
                return Err(inconsistent(format!("{slot} consumed twice")));
            }
            let tagged = self.elements[slot.element].face_directions[slot.face];
            if tagged != direction {
                return Err(inconsistent(format!(
                    "{slot} tagged {} but recorded as {}",
                    tagged.sign(),
                    direction.sign()
                )));
            }
            Ok(())
        };

        for (n, iface) in self.interfaces.iter().enumerate() {
            let [first, second] = iface.sides;
            if first.element == second.element {
                return Err(inconsistent(format!(
                    "interface {n} joins element {} to itself",
                    first.element
                )));
            }
            if first.direction != FaceDirection::Negative
                || second.direction != FaceDirection::Positive
            {
                return Err(inconsistent(format!("interface {n} has wrong side signs")));
            }
            consume(FaceSlot::new(first.element, first.face), first.direction)?;
            consume(FaceSlot::new(second.element, second.face), second.direction)?;

            if iface.side_nodes(0) != self.elements[first.element].face_nodes(first.face) {
                return Err(inconsistent(format!(
                    "interface {n} first side is not its owner's face order"
                )));
            }
            for i in 0..NODES_PER_FACE {
                let a = iface.nodes[i];
                let b = iface.nodes[i + NODES_PER_FACE];
                let owned_by_second = self
                    .node_origin
                    .get(b)
                    .is_some_and(|o| o.element == second.element);
                if !owned_by_second
                    || self.node_origin[a].original_node != self.node_origin[b].original_node
                {
                    return Err(inconsistent(format!(
                        "interface {n} nodes {a} and {b} do not coincide"
                    )));
                }
            }
        }

        for boundary in &self.boundaries {
            let slot = FaceSlot::new(boundary.element, boundary.face);
            consume(slot, FaceDirection::Boundary)?;
            if boundary.nodes != self.elements[boundary.element].face_nodes(boundary.face) {
                return Err(inconsistent(format!(
                    "boundary {slot} does not use its owner's nodes"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::generate::two_element_example;
    use crate::separate;

    #[test]
    fn separated_output_verifies() {
        let out = separate(&two_element_example()).unwrap();
        assert!(out.verify().is_ok());
    }

    #[test]
    fn dropped_boundary_is_detected() {
        let mut out = separate(&two_element_example()).unwrap();
        out.boundaries.pop();
        let err = out.verify().unwrap_err();
        assert!(err.to_string().contains("face slots"));
    }

    #[test]
    fn double_counted_face_is_detected() {
        let mut out = separate(&two_element_example()).unwrap();
        // Keep the count identity but consume one slot twice.
        out.boundaries[1] = out.boundaries[0];
        let err = out.verify().unwrap_err();
        assert!(err.to_string().contains("consumed twice"));
    }

    #[test]
    fn flipped_interface_sides_are_detected() {
        let mut out = separate(&two_element_example()).unwrap();
        out.interfaces[0].sides.swap(0, 1);
        assert!(out.verify().is_err());
    }

    #[test]
    fn misaligned_interface_nodes_are_detected() {
        let mut out = separate(&two_element_example()).unwrap();
        out.interfaces[0].nodes.swap(4, 5);
        let err = out.verify().unwrap_err();
        assert!(err.to_string().contains("do not coincide"));
    }
}
