use serde::Serialize;

use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// Diplomacy graph – nodes and directed post edges for the force layout
// ---------------------------------------------------------------------------

/// The five countries whose diplomatic networks the chart shows. The source
/// table carries one column per country.
pub const DIPLOMACY_COUNTRIES: [&str; 5] =
    ["Canada", "China", "India", "Russia", "United States"];

/// Post types that qualify as an edge; any other cell value is ignored.
pub const QUALIFYING_POSTS: [&str; 3] = ["Embassy", "Consulate-General", "High Commission"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Country,
    City,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// Directed: `source` country maintains a post at `target` city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiplomacyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the graph from the city-per-row diplomacy table.
///
/// Nodes are the five countries plus every distinct city (first-appearance
/// order), whether or not the city has a qualifying edge. A row contributes
/// one edge per allowlisted country whose cell holds a qualifying post type.
/// The caller has already verified the `City` and country columns exist.
pub fn build_graph(table: &Table) -> DiplomacyGraph {
    let mut edges = Vec::new();
    let mut cities: Vec<String> = Vec::new();

    for record in &table.rows {
        let Some(city) = record.get("City").and_then(Value::as_str) else {
            continue;
        };
        if !cities.iter().any(|c| c == city) {
            cities.push(city.to_string());
        }
        for country in DIPLOMACY_COUNTRIES {
            let qualifies = record
                .get(country)
                .and_then(Value::as_str)
                .is_some_and(|post| QUALIFYING_POSTS.contains(&post));
            if qualifies {
                edges.push(GraphEdge {
                    source: country.to_string(),
                    target: city.to_string(),
                });
            }
        }
    }

    let mut nodes: Vec<GraphNode> = DIPLOMACY_COUNTRIES
        .iter()
        .map(|country| GraphNode {
            name: country.to_string(),
            kind: NodeKind::Country,
        })
        .collect();
    nodes.extend(cities.into_iter().map(|city| GraphNode {
        name: city,
        kind: NodeKind::City,
    }));

    DiplomacyGraph { nodes, edges }
}
