//! Errors produced by the transformation engine.
//!
//! Every error names the algebraic property that failed (when the failure happened inside one)
//! and the nodes at fault. Nodes are mapped to spans of the rendered equation when a report is
//! built.

pub mod kind;

use ariadne::{Label, Report, ReportKind};
use chalk_error::{ErrorKind, EXPR};
use crate::{step::Property, tree::{NodeId, Rendered}};
use std::{fmt, ops::Range};

/// An error that occurred while transforming an equation.
#[derive(Debug)]
pub struct Error {
    /// The property that was being applied.
    pub property: Option<Property>,

    /// The nodes that caused the error, in the order of the labels of the error kind.
    pub nodes: Vec<NodeId>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given nodes and kind.
    pub fn new(nodes: Vec<NodeId>, kind: impl ErrorKind + 'static) -> Self {
        Self { property: None, nodes, kind: Box::new(kind) }
    }

    /// Attaches the property being applied, unless one is already attached.
    pub fn in_property(mut self, property: Property) -> Self {
        self.property.get_or_insert(property);
        self
    }

    /// Points the error at the given nodes, unless it already points somewhere.
    pub(crate) fn at(mut self, nodes: &[NodeId]) -> Self {
        if self.nodes.is_empty() {
            self.nodes.extend_from_slice(nodes);
        }
        self
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Returns true if this is a division by zero. Every other error means the transformation is
    /// not legal for the selection.
    pub fn is_division_by_zero(&self) -> bool {
        self.is::<kind::DivisionByZero>()
    }

    /// The message of the error, prefixed by the property that failed.
    pub fn message(&self) -> String {
        match self.property {
            Some(property) => format!("cannot apply {}: {}", property, self.kind.message()),
            None => self.kind.message(),
        }
    }

    /// Build a report from this error, pointing into the rendered equation.
    pub fn build_report<'a>(
        &self,
        src_id: &'a str,
        rendered: &Rendered,
    ) -> Report<(&'a str, Range<usize>)> {
        let spans = rendered.spans_of(&self.nodes);
        let offset = spans.first().map_or(0, |span| span.start);
        let mut builder = Report::build(ReportKind::Error, src_id, offset)
            .with_message(self.message())
            .with_labels(
                self.kind
                    .labels()
                    .into_iter()
                    .zip(spans)
                    .map(|(label, span)| {
                        Label::new((src_id, span))
                            .with_color(EXPR)
                            .with_message(label)
                    })
                    .collect::<Vec<_>>()
            );

        if let Some(help) = self.kind.help() {
            builder.set_help(help);
        }

        builder.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for Error {}
