//! Fixed datasets for the live-update demo.

use crate::components::force_graph::{GraphData, GraphLink, GraphNode};

/// Labels drawn for nodes added by live updates.
pub const COUNTRIES: &[&str] = &[
	"Argentina", "Australia", "Austria", "Belgium", "Brazil", "Canada", "Chile", "China",
	"Colombia", "Denmark", "Egypt", "Finland", "France", "Germany", "Greece", "India",
	"Indonesia", "Ireland", "Italy", "Japan", "Kenya", "Mexico", "Morocco", "Netherlands",
	"Nigeria", "Norway", "Peru", "Poland", "Portugal", "South Africa", "South Korea", "Spain",
	"Sweden", "Switzerland", "Turkey", "Ukraine", "United Kingdom", "United States", "Uruguay",
	"Vietnam",
];

/// Seed graph: a wind turbine broken into its main assemblies.
pub fn turbine_data() -> GraphData {
	GraphData {
		nodes: vec![
			GraphNode::new("start", "Turbine"),
			GraphNode::new("rotor", "Rotor"),
			GraphNode::new("nacelle", "Nacelle"),
			GraphNode::new("blades", "Blades"),
			GraphNode::new("generator", "Generator"),
		],
		links: vec![
			GraphLink::new("start", "rotor", "drives"),
			GraphLink::new("start", "nacelle", "houses"),
			GraphLink::new("rotor", "blades", "holds"),
			GraphLink::new("nacelle", "generator", "contains"),
		],
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn seed_links_reference_seed_nodes() {
		let data = turbine_data();
		assert_eq!((data.nodes.len(), data.links.len()), (5, 4));
		for link in &data.links {
			assert!(data.contains_node(&link.source) && data.contains_node(&link.target));
		}
	}
}
