//! Graphviz DOT export implementation.

use super::{ExportData, Exporter};
use petgraph::dot::{Config, Dot};
use std::io::{self, Write};

/// DOT exporter implementation.
///
/// Nodes are labeled with their display names; edges carry no label.
pub struct DotExporter;

impl Exporter for DotExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let dot = Dot::with_config(&data.graph, &[Config::EdgeNoLabel]);
        writeln!(writer, "{}", dot)
    }
}
