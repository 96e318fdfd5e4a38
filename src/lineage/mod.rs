//! Two-row lineage graph layout
//!
//! Upstream sources sit on the top row, spread evenly across the canvas;
//! the table itself sits centred on the bottom row. Nodes whose table
//! belongs to a known data product are boxed together under that product.

use crate::catalog::{DataProduct, LineageReport};
use serde::Serialize;

/// Canvas width in layout units
pub const CANVAS_WIDTH: f64 = 1000.0;

/// Canvas height in layout units
pub const CANVAS_HEIGHT: f64 = 800.0;

const GROUP_BOX_WIDTH: f64 = 200.0;
const GROUP_BOX_HEIGHT: f64 = 100.0;

/// Label put on edges backed by a recorded SQL process
pub const SQL_TRANSFORM_LABEL: &str = "SQL Transform";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Target,
    Source,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineageNode {
    /// Fully qualified name as reported by the backend
    pub id: String,

    /// Last `.` segment of the id
    pub label: String,

    pub role: NodeRole,
    pub x: f64,
    pub y: f64,

    /// Owning data product, if any component resolves to this table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineageEdge {
    pub source: String,
    pub target: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Container box drawn around nodes of one data product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductGroup {
    pub product_id: String,
    pub name: String,
    pub kind: String,
    pub node_ids: Vec<String>,

    /// Top-left corner
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Positioned lineage graph for one table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineageGraph {
    pub nodes: Vec<LineageNode>,
    pub edges: Vec<LineageEdge>,
    pub groups: Vec<ProductGroup>,
}

impl LineageGraph {
    /// Lay out `table` and its upstream sources
    pub fn layout(table: &str, report: &LineageReport, products: &[DataProduct]) -> Self {
        let spacing = CANVAS_HEIGHT / 3.0;
        let source_spacing = CANVAS_WIDTH / (report.sources.len() as f64 + 1.0);

        let mut nodes = Vec::with_capacity(report.sources.len() + 1);
        nodes.push(LineageNode {
            id: table.to_string(),
            label: short_name(table).to_string(),
            role: NodeRole::Target,
            x: CANVAS_WIDTH / 2.0,
            y: CANVAS_HEIGHT - spacing,
            product_id: owning_product(products, table).map(|p| p.id.clone()),
        });

        for (i, source) in report.sources.iter().enumerate() {
            let label = short_name(source);
            nodes.push(LineageNode {
                id: source.clone(),
                label: label.to_string(),
                role: NodeRole::Source,
                x: source_spacing * (i as f64 + 1.0),
                y: spacing,
                product_id: owning_product(products, label).map(|p| p.id.clone()),
            });
        }

        let edges = report
            .sources
            .iter()
            .map(|source| LineageEdge {
                source: source.clone(),
                target: table.to_string(),
                label: report
                    .processes
                    .iter()
                    .any(|p| p.sql.contains(source.as_str()))
                    .then(|| SQL_TRANSFORM_LABEL.to_string()),
            })
            .collect();

        let groups = group_by_product(&nodes, products);

        Self {
            nodes,
            edges,
            groups,
        }
    }

    pub fn target(&self) -> Option<&LineageNode> {
        self.nodes.iter().find(|n| n.role == NodeRole::Target)
    }

    pub fn sources(&self) -> impl Iterator<Item = &LineageNode> {
        self.nodes.iter().filter(|n| n.role == NodeRole::Source)
    }

    /// Edge arriving from `source`, if any
    pub fn edge_from(&self, source: &str) -> Option<&LineageEdge> {
        self.edges.iter().find(|e| e.source == source)
    }
}

fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn owning_product<'a>(products: &'a [DataProduct], table: &str) -> Option<&'a DataProduct> {
    products.iter().find(|p| p.owns_table(table))
}

/// Groups in order of first appearance
fn group_by_product(nodes: &[LineageNode], products: &[DataProduct]) -> Vec<ProductGroup> {
    let mut members: Vec<(&str, Vec<&LineageNode>)> = vec![];
    for node in nodes {
        let Some(product_id) = node.product_id.as_deref() else {
            continue;
        };
        match members.iter_mut().find(|(id, _)| *id == product_id) {
            Some((_, group)) => group.push(node),
            None => members.push((product_id, vec![node])),
        }
    }

    members
        .into_iter()
        .filter_map(|(product_id, group)| {
            let product = products.iter().find(|p| p.id == product_id)?;
            let count = group.len() as f64;
            let width = GROUP_BOX_WIDTH.max(count * GROUP_BOX_WIDTH * 0.8);
            let mean_x = group.iter().map(|n| n.x).sum::<f64>() / count;
            let mean_y = group.iter().map(|n| n.y).sum::<f64>() / count;

            Some(ProductGroup {
                product_id: product.id.clone(),
                name: product.name.clone(),
                kind: product.kind.clone(),
                node_ids: group.iter().map(|n| n.id.clone()).collect(),
                x: mean_x - width / 2.0,
                y: mean_y - GROUP_BOX_HEIGHT / 2.0,
                width,
                height: GROUP_BOX_HEIGHT,
            })
        })
        .collect()
}
