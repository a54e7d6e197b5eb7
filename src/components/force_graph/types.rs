use super::curve::Curve;

/// A vertex of the displayed graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	/// Unique within one graph.
	pub id: String,
	/// Display text; also the key for the node colour.
	pub label: String,
}

impl GraphNode {
	/// Node with the given id and label.
	pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
		}
	}
}

/// A directed, labelled edge between two node ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
	/// Id of the node the edge leaves.
	pub source: String,
	/// Id of the node the edge enters.
	pub target: String,
	/// Text drawn at the edge midpoint.
	pub label: String,
}

impl GraphLink {
	/// Edge from `source` to `target`.
	pub fn new(
		source: impl Into<String>,
		target: impl Into<String>,
		label: impl Into<String>,
	) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			label: label.into(),
		}
	}
}

/// Nodes plus the links between them. Every link should join two nodes
/// present in `nodes`; links that do not are skipped when drawing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphData {
	/// Vertices, in insertion order.
	pub nodes: Vec<GraphNode>,
	/// Directed edges, in insertion order.
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Whether a node with `id` exists.
	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}

	/// Appends `node` unless its id is already taken.
	pub fn push_node(&mut self, node: GraphNode) -> bool {
		if self.contains_node(&node.id) {
			return false;
		}
		self.nodes.push(node);
		true
	}

	/// Appends `link` if both endpoints are present.
	pub fn push_link(&mut self, link: GraphLink) -> bool {
		if !self.contains_node(&link.source) || !self.contains_node(&link.target) {
			return false;
		}
		self.links.push(link);
		true
	}
}

/// Direction ranks flow in on layered charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
	/// Roots on the left.
	#[default]
	LeftToRight,
	/// Roots on the right.
	RightToLeft,
	/// Roots at the top.
	TopToBottom,
	/// Roots at the bottom.
	BottomToTop,
}

impl Orientation {
	/// Every orientation, in menu order.
	pub const ALL: [Orientation; 4] = [
		Orientation::LeftToRight,
		Orientation::RightToLeft,
		Orientation::TopToBottom,
		Orientation::BottomToTop,
	];

	/// Two-letter code: `LR`, `RL`, `TB` or `BT`.
	pub fn code(self) -> &'static str {
		match self {
			Orientation::LeftToRight => "LR",
			Orientation::RightToLeft => "RL",
			Orientation::TopToBottom => "TB",
			Orientation::BottomToTop => "BT",
		}
	}

	/// Human readable name.
	pub fn label(self) -> &'static str {
		match self {
			Orientation::LeftToRight => "Left to Right",
			Orientation::RightToLeft => "Right to Left",
			Orientation::TopToBottom => "Top to Bottom",
			Orientation::BottomToTop => "Bottom to Top",
		}
	}

	/// Inverse of [`Orientation::code`].
	pub fn from_code(code: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|o| o.code() == code)
	}

	/// Whether ranks advance along the x axis.
	pub fn is_horizontal(self) -> bool {
		matches!(self, Orientation::LeftToRight | Orientation::RightToLeft)
	}
}

/// Canvas and page colours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
	/// Light text on a navy canvas.
	#[default]
	Dark,
	/// Dark text on a pale canvas.
	Light,
}

impl Theme {
	/// Every theme, in menu order.
	pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

	/// Lowercase name, as used by the theme menu.
	pub fn name(self) -> &'static str {
		match self {
			Theme::Dark => "dark",
			Theme::Light => "light",
		}
	}

	/// Inverse of [`Theme::name`].
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|t| t.name() == name)
	}

	/// Canvas fill colour.
	pub fn background(self) -> &'static str {
		match self {
			Theme::Dark => "#1a1a2e",
			Theme::Light => "#f5f6fa",
		}
	}

	/// RGB triple used for labels, with alpha applied by the renderer.
	pub fn ink(self) -> (u8, u8, u8) {
		match self {
			Theme::Dark => (255, 255, 255),
			Theme::Light => (44, 62, 80),
		}
	}
}

/// How node positions are driven.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
	/// Force simulation plus a pull towards each node's rank.
	#[default]
	Layered,
	/// Plain force simulation.
	Force,
}

/// Everything the canvas needs besides the graph itself.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphOptions {
	/// How positions are driven.
	pub layout: Layout,
	/// Rank direction for [`Layout::Layered`].
	pub orientation: Orientation,
	/// Edge interpolation.
	pub curve: Curve,
	/// Node colours, assigned to labels in order of first appearance.
	pub palette: &'static [&'static str],
	/// Canvas colours.
	pub theme: Theme,
	/// Whether the wheel zooms at all.
	pub enable_zoom: bool,
	/// Zoom around the cursor instead of the canvas center.
	pub pan_on_zoom: bool,
	/// Zoom to fit whenever the graph changes.
	pub auto_zoom: bool,
	/// Re-center whenever the graph changes. Ignored under `auto_zoom`.
	pub auto_center: bool,
	/// Show the label legend under the canvas.
	pub show_legend: bool,
	/// Fixed canvas size; `None` fits the parent element.
	pub view: Option<(f64, f64)>,
}

impl Default for GraphOptions {
	fn default() -> Self {
		Self {
			layout: Layout::default(),
			orientation: Orientation::default(),
			curve: Curve::Linear,
			palette: super::scale::DEFAULT_PALETTE,
			theme: Theme::default(),
			enable_zoom: true,
			pan_on_zoom: true,
			auto_zoom: false,
			auto_center: false,
			show_legend: false,
			view: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pair() -> GraphData {
		GraphData {
			nodes: vec![GraphNode::new("a", "A"), GraphNode::new("b", "B")],
			links: Vec::new(),
		}
	}

	#[test]
	fn push_node_rejects_duplicate_ids() {
		let mut data = pair();
		assert!(!data.push_node(GraphNode::new("a", "again")));
		assert!(data.push_node(GraphNode::new("c", "C")));
		assert_eq!(data.nodes.len(), 3);
	}

	#[test]
	fn push_link_requires_known_endpoints() {
		let mut data = pair();
		assert!(!data.push_link(GraphLink::new("a", "zzz", "x")));
		assert!(data.push_link(GraphLink::new("a", "b", "x")));
		assert_eq!(data.links.len(), 1);
	}

	#[test]
	fn orientation_codes_round_trip() {
		for o in Orientation::ALL {
			assert_eq!(Orientation::from_code(o.code()), Some(o));
		}
		assert_eq!(Orientation::from_code("XY"), None);
		assert!(Orientation::RightToLeft.is_horizontal());
		assert!(!Orientation::BottomToTop.is_horizontal());
	}

	#[test]
	fn theme_lookup_is_exact() {
		assert_eq!(Theme::from_name("light"), Some(Theme::Light));
		assert_eq!(Theme::from_name("Light"), None);
	}
}
