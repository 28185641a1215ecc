use serde::Serialize;

use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// Hierarchy node – nested revenue breakdown for the circle-packing chart
// ---------------------------------------------------------------------------

/// Columns the tourism table must carry before nesting.
pub const TOURISM_COLUMNS: [&str; 4] = [
    "Country",
    "Region",
    "Tourism Type",
    "Tourist Revenue (billion USD)",
];

/// One node of the tourism tree. Internal nodes carry children, leaves carry
/// a revenue value; a node never carries both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    fn branch(name: &str) -> Self {
        HierarchyNode {
            name: name.to_string(),
            value: None,
            children: Vec::new(),
        }
    }

    fn leaf(name: &str, value: f64) -> Self {
        HierarchyNode {
            name: name.to_string(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    fn child_mut(&mut self, name: &str) -> &mut HierarchyNode {
        let position = self.children.iter().position(|c| c.name == name);
        let index = match position {
            Some(i) => i,
            None => {
                self.children.push(HierarchyNode::branch(name));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Nest the flat tourism table three levels deep:
/// `World Tourism` → country → region → tourism-type leaf.
///
/// Every level keeps first-appearance order from the source. For duplicate
/// (country, region, type) triples only the first row's revenue is kept —
/// first-wins, not a sum. Rows whose revenue is not numeric are skipped
/// before grouping.
pub fn build_hierarchy(table: &Table) -> HierarchyNode {
    let mut root = HierarchyNode::branch("World Tourism");
    for record in &table.rows {
        let Some(country) = record.get("Country").and_then(Value::as_str) else {
            continue;
        };
        let Some(region) = record.get("Region").and_then(Value::as_str) else {
            continue;
        };
        let Some(tourism_type) = record.get("Tourism Type").and_then(Value::as_str) else {
            continue;
        };
        let Some(revenue) = record
            .get("Tourist Revenue (billion USD)")
            .and_then(Value::as_f64)
        else {
            continue;
        };

        let region_node = root.child_mut(country).child_mut(region);
        if !region_node.children.iter().any(|c| c.name == tourism_type) {
            region_node
                .children
                .push(HierarchyNode::leaf(tourism_type, revenue));
        }
    }
    root
}
