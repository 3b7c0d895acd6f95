//! Render-model export for drawing collaborators.
//!
//! ```text
//! LeafGraph::render_model() → write_json() → web canvas / test fixtures
//!                           → write_dot()  → `neato -n2 -Tsvg`
//! ```
//!
//! Both writers take a snapshot, never the live graph, so the output is
//! always internally consistent.

use std::io::Write;

use crate::model::NodeStyle;
use crate::render::RenderModel;
use crate::Result;

/// Write the render model as pretty-printed JSON.
pub fn write_json(model: &RenderModel, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, model)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the render model as an undirected Graphviz graph with pinned
/// positions. Node widths/heights are converted from pixels to inches at
/// 72 dpi; the y axis is flipped because Graphviz grows upward.
pub fn write_dot(model: &RenderModel, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "// leafgraph render model")?;
    writeln!(writer, "// Nodes: {}", model.nodes.len())?;
    writeln!(
        writer,
        "// Edges: {} ({})",
        model.edges.len(),
        if model.edges_visible { "visible" } else { "hidden" }
    )?;
    writeln!(writer, "graph leafgraph {{")?;
    writeln!(writer, "  node [shape=box, fixedsize=true];")?;

    for node in &model.nodes {
        let highlight = if node.style == NodeStyle::Highlighted {
            ", penwidth=2, color=\"orange\""
        } else {
            ""
        };
        writeln!(
            writer,
            "  n{} [label=\"{}\", class=\"{}\", pos=\"{:.2},{:.2}!\", width={:.3}, height={:.3}{}];",
            node.id,
            escape(&node.label),
            node.style.tag(),
            node.position.x,
            -node.position.y,
            node.size.width / 72.0,
            node.size.height / 72.0,
            highlight,
        )?;
    }

    for edge in &model.edges {
        writeln!(writer, "  n{} -- n{};", edge.source, edge.target)?;
    }

    writeln!(writer, "}}")?;
    Ok(())
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LeafGraph;

    fn graph() -> LeafGraph {
        let mut graph = LeafGraph::new();
        graph.submit_observation("Oak", &["serrated", "green"]).unwrap();
        graph.toggle_edge_visibility();
        graph
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_write_dot() {
        let model = graph().render_model();
        let mut out = Vec::new();
        write_dot(&model, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("graph leafgraph {"));
        assert!(text.contains("label=\"Oak\", class=\"subject-default\""));
        assert!(text.contains("class=\"attribute-default\""));
        assert!(text.contains("n1 -- n2;"));
        assert!(text.contains("n1 -- n3;"));
        assert!(text.trim_end().ends_with('}'));
    }

    #[test]
    fn test_write_json_round_trips() {
        let model = graph().render_model();
        let mut out = Vec::new();
        write_json(&model, &mut out).unwrap();
        let back: RenderModel = serde_json::from_slice(&out).unwrap();
        assert_eq!(back.edges, model.edges);
        assert_eq!(back.nodes.len(), model.nodes.len());
        for (a, b) in back.nodes.iter().zip(&model.nodes) {
            assert_eq!((a.id, &a.label, a.kind, a.style), (b.id, &b.label, b.kind, b.style));
            assert!(a.position.distance(&b.position) < 1e-9);
        }
        assert!(String::from_utf8(out).unwrap().contains("\"style\": \"subject-default\""));
    }
}
