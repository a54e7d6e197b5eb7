use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use super::data::{COUNTRIES, turbine_data};
use crate::components::force_graph::{GraphData, GraphLink, GraphNode};

/// Label carried by every link added by live updates.
pub const LINK_LABEL: &str = "on success";
/// Chance that a live tick grows the graph.
pub const ADD_PROBABILITY: f64 = 0.7;
/// Time between live ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Random draws for one tick, split from [`SampleGraph::apply`] so a tick
/// can be replayed with chosen outcomes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickPlan {
	/// Label for the node, if one is added.
	pub label: String,
	/// Whether this tick adds a node.
	pub add: bool,
}

/// What a tick appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Growth {
	/// The appended node.
	pub node: GraphNode,
	/// `None` only when the graph was empty before the tick.
	pub link: Option<GraphLink>,
}

/// Demo graph that grows while live updates are on.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGraph {
	graph: GraphData,
	live: bool,
	labels: &'static [&'static str],
}

impl Default for SampleGraph {
	fn default() -> Self {
		Self::new(turbine_data())
	}
}

impl SampleGraph {
	/// Idle sample starting from `graph`, labelling new nodes with countries.
	pub fn new(graph: GraphData) -> Self {
		Self::with_labels(graph, COUNTRIES)
	}

	/// Idle sample drawing new labels from `labels`.
	pub fn with_labels(graph: GraphData, labels: &'static [&'static str]) -> Self {
		Self {
			graph,
			live: false,
			labels,
		}
	}

	/// Current graph.
	pub fn graph(&self) -> &GraphData {
		&self.graph
	}

	/// Whether ticks grow the graph.
	pub fn is_live(&self) -> bool {
		self.live
	}

	/// Turns live updates on or off.
	pub fn set_live(&mut self, live: bool) {
		self.live = live;
	}

	/// Draws a label and whether to add a node.
	pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> TickPlan {
		let label = self.labels.choose(rng).copied().unwrap_or("Unknown");
		TickPlan {
			label: label.to_owned(),
			add: rng.gen_bool(ADD_PROBABILITY),
		}
	}

	/// Carries out `plan`: a new node with a fresh id, linked from a node
	/// picked uniformly among those present before this call.
	pub fn apply<R: Rng + ?Sized>(&mut self, plan: TickPlan, rng: &mut R) -> Option<Growth> {
		if !plan.add {
			return None;
		}
		let source = self.graph.nodes.choose(rng).map(|n| n.id.clone());
		let node = GraphNode::new(self.fresh_id(rng), plan.label);
		if !self.graph.push_node(node.clone()) {
			return None;
		}

		let link = source
			.map(|source| GraphLink::new(source, node.id.clone(), LINK_LABEL))
			.filter(|link| self.graph.push_link(link.clone()));
		Some(Growth { node, link })
	}

	/// One timer tick. Idle graphs are left untouched.
	pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Growth> {
		if !self.live {
			return None;
		}
		let plan = self.plan(rng);
		self.apply(plan, rng)
	}

	fn fresh_id<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
		loop {
			let id = format!("n{:08x}", rng.next_u32());
			if !self.graph.contains_node(&id) {
				return id;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn rng() -> StdRng {
		StdRng::seed_from_u64(7)
	}

	fn add(label: &str) -> TickPlan {
		TickPlan {
			label: label.into(),
			add: true,
		}
	}

	#[test]
	fn idle_ticks_change_nothing() {
		let mut sample = SampleGraph::default();
		let before = sample.graph().clone();
		let mut rng = rng();
		for _ in 0..50 {
			assert_eq!(sample.tick(&mut rng), None);
		}
		assert_eq!(sample.graph(), &before);
	}

	#[test]
	fn forced_add_on_the_seed_graph() {
		let mut sample = SampleGraph::default();
		sample.set_live(true);
		assert_eq!(sample.graph().nodes.len(), 5);
		assert_eq!(sample.graph().links.len(), 4);

		let growth = sample.apply(add("Peru"), &mut rng()).unwrap();
		let graph = sample.graph();
		assert_eq!(graph.nodes.len(), 6);
		assert_eq!(graph.links.len(), 5);

		let link = growth.link.unwrap();
		assert_eq!(link.target, growth.node.id);
		assert_eq!(graph.links.last(), Some(&link));
		assert_eq!(graph.nodes.last(), Some(&growth.node));
		assert_eq!(growth.node.label, "Peru");
	}

	#[test]
	fn new_links_come_from_pre_existing_nodes() {
		let mut sample = SampleGraph::default();
		sample.set_live(true);
		let mut rng = rng();
		for _ in 0..200 {
			let before: Vec<String> = sample.graph().nodes.iter().map(|n| n.id.clone()).collect();
			let links_before = sample.graph().links.len();
			match sample.tick(&mut rng) {
				Some(growth) => {
					let link = growth.link.unwrap();
					assert!(before.contains(&link.source));
					assert_ne!(link.source, growth.node.id);
					assert!(!before.contains(&growth.node.id));
					assert_eq!(link.label, LINK_LABEL);
					assert_eq!(sample.graph().nodes.len(), before.len() + 1);
					assert_eq!(sample.graph().links.len(), links_before + 1);
				}
				None => {
					assert_eq!(sample.graph().nodes.len(), before.len());
					assert_eq!(sample.graph().links.len(), links_before);
				}
			}
		}
	}

	#[test]
	fn skipped_add_leaves_graph_alone() {
		let mut sample = SampleGraph::default();
		let plan = TickPlan {
			label: "Chile".into(),
			add: false,
		};
		assert_eq!(sample.apply(plan, &mut rng()), None);
		assert_eq!(sample.graph().nodes.len(), 5);
	}

	#[test]
	fn empty_graph_gets_a_lone_node() {
		let mut sample = SampleGraph::new(GraphData::default());
		let growth = sample.apply(add("Peru"), &mut rng()).unwrap();
		assert_eq!(growth.link, None);
		assert_eq!(sample.graph().nodes.len(), 1);
		assert!(sample.graph().links.is_empty());
	}

	#[test]
	fn ids_stay_unique() {
		let mut sample = SampleGraph::default();
		let mut rng = rng();
		for _ in 0..300 {
			sample.apply(add("x"), &mut rng);
		}
		let mut ids: Vec<&str> = sample.graph().nodes.iter().map(|n| n.id.as_str()).collect();
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), 305);
	}

	#[test]
	fn grown_links_always_join_known_nodes() {
		let mut sample = SampleGraph::new(GraphData::default());
		let mut rng = rng();
		for _ in 0..100 {
			sample.apply(add("x"), &mut rng);
		}
		let graph = sample.graph();
		assert_eq!(graph.nodes.len(), 100);
		assert_eq!(graph.links.len(), 99);
		assert!(
			graph
				.links
				.iter()
				.all(|l| graph.contains_node(&l.source) && graph.contains_node(&l.target))
		);
	}

	#[test]
	fn plan_draws_labels_from_the_list() {
		static ONLY: &[&str] = &["Atlantis"];
		let sample = SampleGraph::with_labels(GraphData::default(), ONLY);
		let mut rng = rng();
		let plans: Vec<TickPlan> = (0..100).map(|_| sample.plan(&mut rng)).collect();
		assert!(plans.iter().all(|p| p.label == "Atlantis"));
		let adds = plans.iter().filter(|p| p.add).count();
		assert!((40..=95).contains(&adds), "{adds} adds out of 100");
	}

	#[test]
	fn live_flag_flips_without_side_effects() {
		let mut sample = SampleGraph::default();
		let before = sample.graph().clone();
		sample.set_live(true);
		sample.set_live(false);
		assert!(!sample.is_live());
		assert_eq!(sample.graph(), &before);
	}
}
