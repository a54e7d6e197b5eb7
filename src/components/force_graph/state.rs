use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::layout;
use super::scale::OrdinalScale;
use super::types::{GraphData, GraphOptions, Layout};

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 12.0;
/// Screen pixels a press may travel and still count as a click.
pub const CLICK_SLOP: f64 = 3.0;
const FIT_PADDING: f64 = 40.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
	/// Position in insertion order, used to index ranks and edges.
	pub slot: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeInfo {
	pub source: usize,
	pub target: usize,
	pub label: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	pub options: GraphOptions,
	scale: OrdinalScale,
	/// Simulation index of each node, in insertion order.
	nodes: Vec<DefaultNodeIdx>,
	ids: HashMap<String, usize>,
	edges: Vec<EdgeInfo>,
	ranks: Vec<usize>,
	max_rank: usize,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(data: &GraphData, options: GraphOptions, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
			scale: OrdinalScale::new(options.palette),
			options,
			nodes: Vec::new(),
			ids: HashMap::new(),
			edges: Vec::new(),
			ranks: Vec::new(),
			max_rank: 0,
		};
		state.sync(data);
		state.relayout();
		state
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edges(&self) -> &[EdgeInfo] {
		&self.edges
	}

	pub fn rank_of(&self, id: &str) -> Option<usize> {
		self.ids.get(id).map(|&slot| self.ranks[slot])
	}

	/// Brings the simulation in line with `data`. Unseen nodes and links are
	/// added in place; if a known node has disappeared the whole simulation
	/// is rebuilt. Returns whether anything changed.
	pub fn sync(&mut self, data: &GraphData) -> bool {
		let mut changed = false;
		let present: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		if self.ids.keys().any(|id| !present.contains(id.as_str())) {
			debug!("graph lost nodes, rebuilding simulation");
			self.graph = simulation();
			self.nodes.clear();
			self.ids.clear();
			self.edges.clear();
			self.hover = HoverState::default();
			self.drag = DragState::default();
			self.scale = OrdinalScale::new(self.options.palette);
			changed = true;
		}

		let mut added = Vec::new();
		for node in &data.nodes {
			if self.ids.contains_key(&node.id) {
				continue;
			}
			let slot = self.nodes.len();
			let color = self.scale.color(&node.label).to_owned();
			let idx = self.graph.add_node(NodeData {
				x: 0.0,
				y: 0.0,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color,
					slot,
				},
			});
			self.nodes.push(idx);
			self.ids.insert(node.id.clone(), slot);
			added.push(slot);
			changed = true;
		}

		let wanted: Vec<EdgeInfo> = data
			.links
			.iter()
			.filter_map(|link| {
				Some(EdgeInfo {
					source: *self.ids.get(&link.source)?,
					target: *self.ids.get(&link.target)?,
					label: link.label.clone(),
				})
			})
			.collect();
		if wanted != self.edges {
			let known: HashSet<(usize, usize)> =
				self.edges.iter().map(|e| (e.source, e.target)).collect();
			for e in &wanted {
				if !known.contains(&(e.source, e.target)) {
					self.graph
						.add_edge(self.nodes[e.source], self.nodes[e.target], EdgeData::default());
				}
			}
			self.edges = wanted;
			changed = true;
		}

		if changed {
			self.recompute_ranks();
			self.place_new_nodes(&added);
			self.animation_running = true;
		}
		changed
	}

	fn recompute_ranks(&mut self) {
		let pairs: Vec<(usize, usize)> = self.edges.iter().map(|e| (e.source, e.target)).collect();
		self.ranks = layout::ranks(self.nodes.len(), &pairs);
		self.max_rank = self.ranks.iter().copied().max().unwrap_or(0);
	}

	/// New nodes start next to a predecessor, one rank further along.
	fn place_new_nodes(&mut self, added: &[usize]) {
		if added.is_empty() {
			return;
		}
		let positions = self.positions();
		let mut seeds = HashMap::new();
		for &slot in added {
			let parent = self
				.edges
				.iter()
				.find(|e| e.target == slot && !added.contains(&e.source))
				.map(|e| positions[e.source]);
			let pos = match parent {
				Some((px, py)) => {
					let jitter = ((slot * 37) % 7) as f64 - 3.0;
					let (dx, dy) =
						layout::orient(self.options.orientation, layout::RANK_GAP, jitter * 12.0);
					(px + dx, py + dy)
				}
				None => layout::circle_position(slot, self.nodes.len()),
			};
			seeds.insert(self.nodes[slot], pos);
		}
		self.graph.visit_nodes_mut(|node| {
			if let Some(&(x, y)) = seeds.get(&node.index()) {
				node.data.x = x as f32;
				node.data.y = y as f32;
			}
		});
	}

	/// Re-seeds every unpinned node at its grid position (layered charts) or
	/// on a circle (force charts).
	pub fn relayout(&mut self) {
		let n = self.nodes.len();
		let mut seeds = HashMap::new();
		match self.options.layout {
			Layout::Layered => {
				let mut per_rank = vec![0usize; self.max_rank + 1];
				for &r in &self.ranks {
					per_rank[r] += 1;
				}
				let mut taken = vec![0usize; self.max_rank + 1];
				for slot in 0..n {
					let r = self.ranks[slot];
					let pos = layout::layered_position(
						self.options.orientation,
						r,
						self.max_rank,
						taken[r],
						per_rank[r],
					);
					taken[r] += 1;
					seeds.insert(self.nodes[slot], pos);
				}
			}
			Layout::Force => {
				for slot in 0..n {
					seeds.insert(self.nodes[slot], layout::circle_position(slot, n));
				}
			}
		}
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			if let Some(&(x, y)) = seeds.get(&node.index()) {
				node.data.x = x as f32;
				node.data.y = y as f32;
			}
		});
		self.animation_running = true;
	}

	pub fn apply_options(&mut self, options: GraphOptions) {
		let recolor = !std::ptr::eq(options.palette, self.options.palette);
		let relayout = options.orientation != self.options.orientation
			|| options.layout != self.options.layout;
		self.options = options;

		if recolor {
			let mut scale = OrdinalScale::new(self.options.palette);
			let mut colors = vec![String::new(); self.nodes.len()];
			self.graph.visit_nodes(|node| {
				let info = &node.data.user_data;
				colors[info.slot] = info.label.clone();
			});
			let colors: Vec<String> = colors.iter().map(|label| scale.color(label).to_owned()).collect();
			self.graph.visit_nodes_mut(|node| {
				let slot = node.data.user_data.slot;
				node.data.user_data.color = colors[slot].clone();
			});
			self.scale = scale;
		}
		if relayout {
			self.relayout();
		}
	}

	/// Node centers in graph space, indexed by insertion slot.
	pub fn positions(&self) -> Vec<(f64, f64)> {
		let mut out = vec![(0.0, 0.0); self.nodes.len()];
		self.graph.visit_nodes(|node| {
			out[node.data.user_data.slot] = (node.x() as f64, node.y() as f64);
		});
		out
	}

	pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
		self.positions().into_iter().fold(None, |acc, (x, y)| {
			Some(match acc {
				None => (x, y, x, y),
				Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
			})
		})
	}

	/// Scales and translates so every node fits inside the canvas.
	pub fn zoom_to_fit(&mut self) {
		let Some((x0, y0, x1, y1)) = self.bounds() else {
			return;
		};
		let (bw, bh) = (x1 - x0, y1 - y0);
		let (aw, ah) = (
			(self.width - 2.0 * FIT_PADDING).max(1.0),
			(self.height - 2.0 * FIT_PADDING).max(1.0),
		);
		let k = match (bw > f64::EPSILON, bh > f64::EPSILON) {
			(true, true) => (aw / bw).min(ah / bh),
			(true, false) => aw / bw,
			(false, true) => ah / bh,
			(false, false) => 1.0,
		};
		self.transform.k = k.clamp(0.1, 10.0);
		self.center();
	}

	/// Centers the graph's bounding box, keeping the zoom level.
	pub fn center(&mut self) {
		let Some((x0, y0, x1, y1)) = self.bounds() else {
			return;
		};
		let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		self.transform.x = self.width / 2.0 - cx * self.transform.k;
		self.transform.y = self.height / 2.0 - cy * self.transform.k;
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Starts a node drag or, off any node, a pan.
	pub fn press(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				..DragState::default()
			};
			let drag = &mut self.drag;
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					drag.node_start_x = node.x();
					drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		// Update hover state when not dragging
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			if (x - self.drag.start_x).hypot(y - self.drag.start_y) > CLICK_SLOP {
				self.drag.moved = true;
			}
			if !self.drag.moved {
				return;
			}
			let (dx, dy) = (
				(x - self.drag.start_x) / self.transform.k,
				(y - self.drag.start_y) / self.transform.k,
			);
			let (nx, ny) = (
				self.drag.node_start_x + dx as f32,
				self.drag.node_start_y + dy as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Ends the current gesture. Returns the node id when the gesture was a
	/// click on a node rather than a drag.
	pub fn release(&mut self) -> Option<String> {
		let clicked = if self.drag.active && !self.drag.moved {
			self.drag.node_idx.and_then(|idx| self.node_id(idx))
		} else {
			None
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn leave(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	/// Wheel zoom. With `pan_on_zoom` the point under the cursor stays put,
	/// otherwise the canvas center does.
	pub fn zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		if !self.options.enable_zoom {
			return;
		}
		let (ax, ay) = if self.options.pan_on_zoom {
			(x, y)
		} else {
			(self.width / 2.0, self.height / 2.0)
		};
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = ax - (ax - self.transform.x) * ratio;
		self.transform.y = ay - (ay - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for e in &self.edges {
				let (src, tgt) = (self.nodes[e.source], self.nodes[e.target]);
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn slot_index(&self, slot: usize) -> Option<DefaultNodeIdx> {
		self.nodes.get(slot).copied()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		if self.options.layout == Layout::Layered {
			let (ranks, max_rank, orientation) =
				(&self.ranks, self.max_rank, self.options.orientation);
			self.graph.visit_nodes_mut(|node| {
				if node.data.is_anchor {
					return;
				}
				let rank = ranks[node.data.user_data.slot];
				let (x, y) = layout::pull_towards_rank(
					orientation,
					(node.data.x as f64, node.data.y as f64),
					rank,
					max_rank,
				);
				node.data.x = x as f32;
				node.data.y = y as f32;
			});
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{GraphLink, GraphNode, Orientation};

	fn chain() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode::new("a", "Alpha"),
				GraphNode::new("b", "Beta"),
				GraphNode::new("c", "Gamma"),
			],
			links: vec![GraphLink::new("a", "b", "x"), GraphLink::new("b", "c", "y")],
		}
	}

	fn state() -> ForceGraphState {
		ForceGraphState::new(&chain(), GraphOptions::default(), 800.0, 600.0)
	}

	#[test]
	fn builds_ranks_from_links() {
		let s = state();
		assert_eq!(s.node_count(), 3);
		assert_eq!(s.rank_of("a"), Some(0));
		assert_eq!(s.rank_of("c"), Some(2));
		assert_eq!(s.edges().len(), 2);
	}

	#[test]
	fn layered_seed_respects_orientation() {
		let s = state();
		let p = s.positions();
		assert!(p[0].0 < p[1].0 && p[1].0 < p[2].0);

		let opts = GraphOptions {
			orientation: Orientation::BottomToTop,
			..GraphOptions::default()
		};
		let s = ForceGraphState::new(&chain(), opts, 800.0, 600.0);
		let p = s.positions();
		assert!(p[0].1 > p[1].1 && p[1].1 > p[2].1);
	}

	#[test]
	fn sync_adds_only_new_items() {
		let mut s = state();
		let before = s.positions();
		let mut data = chain();
		assert!(!s.sync(&data));

		data.nodes.push(GraphNode::new("d", "Delta"));
		data.links.push(GraphLink::new("c", "d", "on success"));
		assert!(s.sync(&data));
		assert_eq!(s.node_count(), 4);
		assert_eq!(s.edges().len(), 3);
		assert_eq!(s.rank_of("d"), Some(3));
		assert_eq!(&s.positions()[..3], &before[..]);
	}

	#[test]
	fn sync_rebuilds_when_nodes_vanish() {
		let mut s = state();
		let data = GraphData {
			nodes: vec![GraphNode::new("z", "Zeta")],
			links: Vec::new(),
		};
		assert!(s.sync(&data));
		assert_eq!(s.node_count(), 1);
		assert_eq!(s.rank_of("a"), None);
		assert!(s.edges().is_empty());
	}

	#[test]
	fn sync_to_empty_graph_clears_ranks() {
		let mut s = state();
		assert!(s.sync(&GraphData::default()));
		assert_eq!(s.node_count(), 0);
		assert!(s.edges().is_empty());
		assert_eq!(s.rank_of("a"), None);
		assert!(s.bounds().is_none());
	}

	#[test]
	fn zoom_to_fit_centers_the_bounds() {
		let mut s = state();
		s.transform = ViewTransform { x: 0.0, y: 0.0, k: 5.0 };
		s.zoom_to_fit();
		let (x0, y0, x1, y1) = s.bounds().unwrap();
		let (sx0, sy0) = s.graph_to_screen(x0, y0);
		let (sx1, sy1) = s.graph_to_screen(x1, y1);
		assert!(((sx0 + sx1) / 2.0 - 400.0).abs() < 1e-6);
		assert!(((sy0 + sy1) / 2.0 - 300.0).abs() < 1e-6);
		assert!(sx0 >= FIT_PADDING - 1e-6 && sx1 <= 800.0 - FIT_PADDING + 1e-6);
	}

	#[test]
	fn center_keeps_zoom() {
		let mut s = state();
		s.transform.k = 2.0;
		s.center();
		assert_eq!(s.transform.k, 2.0);
	}

	#[test]
	fn press_and_release_in_place_is_a_click() {
		let mut s = state();
		let (gx, gy) = s.positions()[1];
		let (sx, sy) = s.graph_to_screen(gx, gy);
		s.press(sx, sy);
		s.pointer_move(sx + 1.0, sy);
		assert_eq!(s.release(), Some("b".to_string()));
	}

	#[test]
	fn dragging_pins_the_node_and_is_not_a_click() {
		let mut s = state();
		let (gx, gy) = s.positions()[0];
		let (sx, sy) = s.graph_to_screen(gx, gy);
		s.press(sx, sy);
		s.pointer_move(sx + 30.0, sy);
		assert_eq!(s.release(), None);
		assert!((s.positions()[0].0 - (gx + 30.0)).abs() < 1e-3);
	}

	#[test]
	fn background_drag_pans() {
		let mut s = state();
		let start = s.transform.x;
		s.press(5.0, 5.0);
		s.pointer_move(25.0, 5.0);
		assert_eq!(s.release(), None);
		assert_eq!(s.transform.x, start + 20.0);
	}

	#[test]
	fn zoom_respects_flags() {
		let mut s = state();
		s.options.enable_zoom = false;
		s.zoom(10.0, 10.0, -1.0);
		assert_eq!(s.transform.k, 1.0);

		s.options.enable_zoom = true;
		s.options.pan_on_zoom = false;
		let (cx, cy) = (s.transform.x, s.transform.y);
		s.zoom(10.0, 10.0, -1.0);
		assert!((s.transform.k - 1.1).abs() < 1e-9);
		// transform origin sits at the canvas center, so it does not move
		assert!((s.transform.x - cx).abs() < 1e-9 && (s.transform.y - cy).abs() < 1e-9);
	}

	#[test]
	fn palette_change_recolors_nodes() {
		const MONO: &[&str] = &["#123456"];
		let mut s = state();
		s.apply_options(GraphOptions {
			palette: MONO,
			..GraphOptions::default()
		});
		s.graph.visit_nodes(|node| assert_eq!(node.data.user_data.color, "#123456"));
	}

	#[test]
	fn hover_collects_neighbors() {
		let mut s = state();
		let b = s.slot_index(1).unwrap();
		s.set_hover(Some(b));
		assert_eq!(s.hover.neighbors.len(), 2);
		assert!(s.is_highlighted(s.slot_index(0).unwrap()));
	}
}
