//! Ordinal color scale: palette colors handed out to keys in first-seen order.

use super::types::GraphData;

/// Used when no palette is supplied.
pub const DEFAULT_PALETTE: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

#[derive(Clone, Debug)]
pub struct OrdinalScale {
	range: &'static [&'static str],
	domain: Vec<String>,
}

impl OrdinalScale {
	pub fn new(range: &'static [&'static str]) -> Self {
		let range = if range.is_empty() {
			DEFAULT_PALETTE
		} else {
			range
		};
		Self {
			range,
			domain: Vec::new(),
		}
	}

	/// Color for `key`, extending the domain if the key is new. Colors wrap
	/// once the domain outgrows the range.
	pub fn color(&mut self, key: &str) -> &'static str {
		let i = match self.domain.iter().position(|k| k == key) {
			Some(i) => i,
			None => {
				self.domain.push(key.to_owned());
				self.domain.len() - 1
			}
		};
		self.range[i % self.range.len()]
	}

	pub fn domain(&self) -> &[String] {
		&self.domain
	}
}

/// Distinct node labels with their colors, in node order.
pub fn legend_entries(
	data: &GraphData,
	palette: &'static [&'static str],
) -> Vec<(String, &'static str)> {
	let mut scale = OrdinalScale::new(palette);
	for node in &data.nodes {
		scale.color(&node.label);
	}
	let domain = scale.domain().to_vec();
	domain
		.into_iter()
		.map(|label| {
			let color = scale.color(&label);
			(label, color)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::GraphNode;

	const TWO: &[&str] = &["#000", "#fff"];

	#[test]
	fn repeated_keys_keep_their_color() {
		let mut scale = OrdinalScale::new(TWO);
		assert_eq!(scale.color("a"), "#000");
		assert_eq!(scale.color("b"), "#fff");
		assert_eq!(scale.color("a"), "#000");
		assert_eq!(scale.domain(), ["a", "b"]);
	}

	#[test]
	fn colors_wrap_around() {
		let mut scale = OrdinalScale::new(TWO);
		scale.color("a");
		scale.color("b");
		assert_eq!(scale.color("c"), "#000");
	}

	#[test]
	fn empty_palette_falls_back() {
		let mut scale = OrdinalScale::new(&[]);
		assert_eq!(scale.color("x"), DEFAULT_PALETTE[0]);
	}

	#[test]
	fn legend_lists_each_label_once() {
		let data = GraphData {
			nodes: vec![
				GraphNode::new("1", "Peru"),
				GraphNode::new("2", "Chile"),
				GraphNode::new("3", "Peru"),
			],
			links: Vec::new(),
		};
		let legend = legend_entries(&data, TWO);
		assert_eq!(
			legend,
			vec![("Peru".to_string(), "#000"), ("Chile".to_string(), "#fff")]
		);
	}
}
