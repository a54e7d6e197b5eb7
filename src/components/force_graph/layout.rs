//! Rank assignment and seed positions for layered charts.

use std::collections::VecDeque;
use std::f64::consts::PI;

use super::types::Orientation;

/// Distance between consecutive ranks along the orientation axis.
pub const RANK_GAP: f64 = 140.0;
/// Distance between siblings across the orientation axis.
pub const SLOT_GAP: f64 = 70.0;
/// Fraction of the remaining distance to its rank a node covers per tick.
pub const RANK_PULL: f64 = 0.08;

/// Longest-path layering: roots get rank 0, every other node sits one past
/// its deepest predecessor. Nodes on a cycle keep the rank reached through
/// their acyclic predecessors.
pub fn ranks(count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
	let mut indegree = vec![0usize; count];
	let mut out = vec![Vec::new(); count];
	for &(s, t) in edges {
		if s < count && t < count && s != t {
			out[s].push(t);
			indegree[t] += 1;
		}
	}

	let mut rank = vec![0; count];
	let mut queue: VecDeque<usize> = (0..count).filter(|&i| indegree[i] == 0).collect();
	while let Some(n) = queue.pop_front() {
		for &t in &out[n] {
			rank[t] = rank[t].max(rank[n] + 1);
			indegree[t] -= 1;
			if indegree[t] == 0 {
				queue.push_back(t);
			}
		}
	}
	rank
}

/// Signed distance of `rank` from the middle rank.
pub fn rank_offset(rank: usize, max_rank: usize) -> f64 {
	(rank as f64 - max_rank as f64 / 2.0) * RANK_GAP
}

/// Maps an (along, across) pair to canvas axes for `orientation`.
pub fn orient(orientation: Orientation, along: f64, across: f64) -> (f64, f64) {
	match orientation {
		Orientation::LeftToRight => (along, across),
		Orientation::RightToLeft => (-along, across),
		Orientation::TopToBottom => (across, along),
		Orientation::BottomToTop => (across, -along),
	}
}

/// Grid position of the `slot`-th of `slots` nodes sharing `rank`.
pub fn layered_position(
	orientation: Orientation,
	rank: usize,
	max_rank: usize,
	slot: usize,
	slots: usize,
) -> (f64, f64) {
	let across = (slot as f64 - slots.saturating_sub(1) as f64 / 2.0) * SLOT_GAP;
	orient(orientation, rank_offset(rank, max_rank), across)
}

pub fn circle_position(i: usize, n: usize) -> (f64, f64) {
	let angle = (i as f64) * 2.0 * PI / n.max(1) as f64;
	(100.0 * angle.cos(), 100.0 * angle.sin())
}

/// Moves `pos` part of the way to its rank line, leaving the other axis free.
pub fn pull_towards_rank(
	orientation: Orientation,
	pos: (f64, f64),
	rank: usize,
	max_rank: usize,
) -> (f64, f64) {
	let (tx, ty) = orient(orientation, rank_offset(rank, max_rank), 0.0);
	if orientation.is_horizontal() {
		(pos.0 + (tx - pos.0) * RANK_PULL, pos.1)
	} else {
		(pos.0, pos.1 + (ty - pos.1) * RANK_PULL)
	}
}

/// Points an edge path runs through: it leaves the source and enters the
/// target along the orientation axis.
pub fn edge_points(
	orientation: Orientation,
	source: (f64, f64),
	target: (f64, f64),
) -> [(f64, f64); 4] {
	if orientation.is_horizontal() {
		let off = (target.0 - source.0) / 3.0;
		[
			source,
			(source.0 + off, source.1),
			(target.0 - off, target.1),
			target,
		]
	} else {
		let off = (target.1 - source.1) / 3.0;
		[
			source,
			(source.0, source.1 + off),
			(target.0, target.1 - off),
			target,
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ranks_follow_longest_path() {
		// 0 -> 1 -> 3, 0 -> 2, 2 -> 3 via a longer route 2 -> 4 -> 3
		let edges = [(0, 1), (1, 3), (0, 2), (2, 4), (4, 3)];
		assert_eq!(ranks(5, &edges), vec![0, 1, 1, 3, 2]);
	}

	#[test]
	fn disconnected_nodes_are_roots() {
		assert_eq!(ranks(3, &[(0, 1)]), vec![0, 1, 0]);
	}

	#[test]
	fn cycles_and_bad_indices_do_not_hang() {
		let edges = [(0, 1), (1, 2), (2, 1), (7, 0), (2, 2)];
		let r = ranks(3, &edges);
		assert_eq!(r[0], 0);
		assert_eq!(r[1], 1);
	}

	#[test]
	fn orientation_flips_the_rank_axis() {
		assert_eq!(layered_position(Orientation::LeftToRight, 2, 2, 0, 1), (RANK_GAP, 0.0));
		assert_eq!(layered_position(Orientation::RightToLeft, 2, 2, 0, 1), (-RANK_GAP, 0.0));
		assert_eq!(layered_position(Orientation::TopToBottom, 0, 2, 0, 1), (0.0, -RANK_GAP));
		assert_eq!(layered_position(Orientation::BottomToTop, 0, 2, 0, 1), (0.0, RANK_GAP));
	}

	#[test]
	fn siblings_spread_around_the_axis() {
		let a = layered_position(Orientation::LeftToRight, 1, 2, 0, 2);
		let b = layered_position(Orientation::LeftToRight, 1, 2, 1, 2);
		assert_eq!(a, (0.0, -SLOT_GAP / 2.0));
		assert_eq!(b, (0.0, SLOT_GAP / 2.0));
	}

	#[test]
	fn pull_only_moves_along_the_rank_axis() {
		let (x, y) = pull_towards_rank(Orientation::TopToBottom, (50.0, 0.0), 2, 2);
		assert_eq!(x, 50.0);
		assert!((y - RANK_GAP * RANK_PULL).abs() < 1e-9);
	}

	#[test]
	fn edge_points_leave_along_the_axis() {
		let pts = edge_points(Orientation::LeftToRight, (0.0, 0.0), (90.0, 30.0));
		assert_eq!(pts[1], (30.0, 0.0));
		assert_eq!(pts[2], (60.0, 30.0));
		let pts = edge_points(Orientation::TopToBottom, (0.0, 0.0), (30.0, 90.0));
		assert_eq!(pts[1], (0.0, 30.0));
	}
}
