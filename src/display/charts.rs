//! Chart catalog shown in the chart-type picker.

use crate::components::force_graph::Layout;

/// Controls a chart exposes in the side panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartOption {
	/// Palette picker.
	ColorScheme,
	/// Legend checkbox.
	ShowLegend,
	/// Rank direction picker.
	Orientation,
	/// Edge interpolation picker.
	Curve,
	/// Zoom, fit and dimension controls.
	Zoom,
	/// Live-update checkbox.
	LiveUpdates,
}

/// One pickable chart.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartEntry {
	/// Menu text.
	pub name: &'static str,
	/// Unique key used to select the chart.
	pub selector: &'static str,
	/// Layout the canvas runs for this chart.
	pub layout: Layout,
	/// Controls shown while the chart is selected.
	pub options: &'static [ChartOption],
}

impl ChartEntry {
	/// Whether the side panel shows `option` for this chart.
	pub fn has_option(&self, option: ChartOption) -> bool {
		self.options.contains(&option)
	}
}

/// Named group of charts, rendered as an `<optgroup>`.
#[derive(Debug)]
pub struct ChartGroup {
	/// Group heading.
	pub name: &'static str,
	/// Charts in menu order.
	pub charts: &'static [ChartEntry],
}

/// Every chart the app offers.
pub static CHART_GROUPS: &[ChartGroup] = &[
	ChartGroup {
		name: "Layered Graphs",
		charts: &[
			ChartEntry {
				name: "Directed Graph",
				selector: "directed-graph",
				layout: Layout::Layered,
				options: &[
					ChartOption::ColorScheme,
					ChartOption::ShowLegend,
					ChartOption::Orientation,
					ChartOption::Curve,
					ChartOption::Zoom,
					ChartOption::LiveUpdates,
				],
			},
			ChartEntry {
				name: "Organization Chart",
				selector: "org-tree",
				layout: Layout::Layered,
				options: &[
					ChartOption::ColorScheme,
					ChartOption::Orientation,
					ChartOption::Curve,
					ChartOption::Zoom,
				],
			},
		],
	},
	ChartGroup {
		name: "Force Graphs",
		charts: &[ChartEntry {
			name: "Force Directed Graph",
			selector: "force-directed-graph",
			layout: Layout::Force,
			options: &[
				ChartOption::ColorScheme,
				ChartOption::ShowLegend,
				ChartOption::Curve,
				ChartOption::Zoom,
				ChartOption::LiveUpdates,
			],
		}],
	},
];

/// First entry, across all groups in order, whose selector matches.
pub fn find_chart(groups: &'static [ChartGroup], selector: &str) -> Option<&'static ChartEntry> {
	groups
		.iter()
		.flat_map(|g| g.charts.iter())
		.find(|c| c.selector == selector)
}

#[cfg(test)]
mod tests {
	use super::*;

	static DUPLICATES: &[ChartGroup] = &[
		ChartGroup {
			name: "first",
			charts: &[ChartEntry {
				name: "One",
				selector: "same",
				layout: Layout::Layered,
				options: &[],
			}],
		},
		ChartGroup {
			name: "second",
			charts: &[ChartEntry {
				name: "Two",
				selector: "same",
				layout: Layout::Force,
				options: &[],
			}],
		},
	];

	#[test]
	fn finds_entries_in_later_groups() {
		let chart = find_chart(CHART_GROUPS, "force-directed-graph").unwrap();
		assert_eq!(chart.layout, Layout::Force);
		assert!(!chart.has_option(ChartOption::Orientation));
	}

	#[test]
	fn first_match_wins() {
		assert_eq!(find_chart(DUPLICATES, "same").map(|c| c.name), Some("One"));
	}

	#[test]
	fn unknown_selector_finds_nothing() {
		assert!(find_chart(CHART_GROUPS, "pie-chart").is_none());
	}
}
