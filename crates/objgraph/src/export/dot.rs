//! DOT format export for Graphviz visualization.

use super::undirected_edges;
use crate::error::Result;
use crate::graph::{EdgeLabel, ObjectGraph, ObjectId};
use std::collections::HashMap;

/// Options for styling DOT export
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Edge colors by label (hex color codes)
    pub label_colors: HashMap<EdgeLabel, String>,
    /// Graph layout direction: LR, TB, RL, BT
    pub rankdir: String,
    /// Include the namespace in node labels
    pub show_namespace: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        let mut label_colors = HashMap::new();
        label_colors.insert(EdgeLabel::OFFSHOOT, "#9E9E9E".to_string());
        label_colors.insert(EdgeLabel::EXPOSED_BY, "#42A5F5".to_string());
        label_colors.insert(EdgeLabel::STORAGE, "#FFB300".to_string());

        DotOptions {
            label_colors,
            rankdir: "LR".to_string(),
            show_namespace: true,
        }
    }
}

/// Export graph to Graphviz DOT format
pub fn export_dot(graph: &ObjectGraph) -> Result<String> {
    export_dot_styled(graph, DotOptions::default())
}

/// Export graph to Graphviz DOT format with custom styling
pub fn export_dot_styled(graph: &ObjectGraph, options: DotOptions) -> Result<String> {
    let snapshot = graph.snapshot();
    let mut output = String::new();

    output.push_str("graph object_graph {\n");
    output.push_str(&format!("    rankdir={};\n", options.rankdir));
    output.push_str("    node [shape=box];\n\n");

    for id in snapshot.keys() {
        output.push_str(&format!(
            "    \"{}\" [label=\"{}\"];\n",
            escape_dot_label(&id.encode()),
            escape_dot_label(&node_label(id, options.show_namespace))
        ));
    }

    output.push('\n');

    for (src, dst, label) in undirected_edges(&snapshot) {
        let color = options
            .label_colors
            .get(label)
            .map(|c| format!(", color=\"{c}\""))
            .unwrap_or_default();

        output.push_str(&format!(
            "    \"{}\" -- \"{}\" [label=\"{}\"{}];\n",
            escape_dot_label(&src.encode()),
            escape_dot_label(&dst.encode()),
            escape_dot_label(label.as_str()),
            color
        ));
    }

    output.push_str("}\n");

    Ok(output)
}

fn node_label(id: &ObjectId, show_namespace: bool) -> String {
    let gk = id.group_kind();
    if show_namespace {
        format!("{gk}\n{}", id.object_key())
    } else {
        format!("{gk}\n{}", id.name())
    }
}

/// Escape special characters for DOT labels
fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
