//! The two [`crate::walker::ElementVisitor`] implementations the public API
//! is built on: one that stops at the first matching matrix, one that
//! collects every supported matrix's descriptor.
//!
//! Grounded in the save/load split documented in
//! `examples/original_source/HSIView/MatHelper.c` (`load_first_3d_double_cube`
//! vs. a name-addressed load).

use std::ops::ControlFlow;

use crate::config::INITIAL_DESCRIPTOR_CAPACITY;
use crate::cube::{Cube, MatrixDescriptor};
use crate::matrix::MatrixOutcome;
use crate::walker::ElementVisitor;

/// Stops scanning at the first supported matrix of `rank` whose name also
/// matches, when a name is given: skip if rank differs; if a target name is
/// set, skip on name mismatch too.
pub struct LoadVisitor<'a> {
    name: Option<&'a str>,
    rank: u8,
    found: Option<(MatrixDescriptor, Cube)>,
}

impl<'a> LoadVisitor<'a> {
    pub fn by_name(name: &'a str, rank: u8) -> Self {
        LoadVisitor { name: Some(name), rank, found: None }
    }

    pub fn first_of_rank(rank: u8) -> Self {
        LoadVisitor { name: None, rank, found: None }
    }

    /// Consumes the visitor, returning the matched matrix if one was found.
    pub fn into_found(self) -> Option<(MatrixDescriptor, Cube)> {
        self.found
    }
}

impl<'a> ElementVisitor for LoadVisitor<'a> {
    fn visit_matrix(&mut self, outcome: MatrixOutcome) -> ControlFlow<()> {
        let MatrixOutcome::Supported { descriptor, cube } = outcome else {
            return ControlFlow::Continue(());
        };
        if cube.rank() != self.rank {
            return ControlFlow::Continue(());
        }
        if let Some(name) = self.name {
            if descriptor.name != name {
                return ControlFlow::Continue(());
            }
        }
        self.found = Some((descriptor, cube));
        ControlFlow::Break(())
    }
}

/// Collects the descriptor of every supported matrix, optionally filtered to
/// a single rank. Never stops the scan early.
pub struct ListVisitor {
    rank_filter: Option<u8>,
    descriptors: Vec<MatrixDescriptor>,
}

impl ListVisitor {
    pub fn new(rank_filter: Option<u8>) -> Self {
        ListVisitor { rank_filter, descriptors: Vec::with_capacity(INITIAL_DESCRIPTOR_CAPACITY) }
    }

    pub fn into_descriptors(self) -> Vec<MatrixDescriptor> {
        self.descriptors
    }
}

impl ElementVisitor for ListVisitor {
    fn visit_matrix(&mut self, outcome: MatrixOutcome) -> ControlFlow<()> {
        if let MatrixOutcome::Supported { descriptor, cube } = outcome {
            if self.rank_filter.map_or(true, |r| cube.rank() == r) {
                self.descriptors.push(descriptor);
            }
        }
        ControlFlow::Continue(())
    }
}
