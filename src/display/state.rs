use log::debug;

use super::charts::{CHART_GROUPS, ChartEntry, find_chart};
use super::color_scheme::{ColorScheme, find_color_scheme};
use crate::components::force_graph::{Curve, GraphOptions, Layout, Orientation, Theme};
use crate::error::{Error, Result};

pub const DEFAULT_CHART: &str = "directed-graph";
pub const DEFAULT_COLOR_SCHEME: &str = "picnic";
pub const DEFAULT_CURVE: &str = "Bundle";
pub const DEFAULT_WIDTH: f64 = 700.0;
pub const DEFAULT_HEIGHT: f64 = 300.0;

/// Everything the control panel can change about the graph view.
///
/// Lookups by name (chart, color scheme, curve, theme, orientation) come in
/// two flavours: `try_*` reports a miss as an [`Error`], the plain setter
/// logs it and keeps the previous value.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
	/// Page and canvas colours.
	pub theme: Theme,
	/// Selector of the current chart.
	pub chart_type: String,
	/// Catalog entry for `chart_type`.
	pub chart: Option<&'static ChartEntry>,
	/// Width used when not fitting the container.
	pub width: f64,
	/// Height used when not fitting the container.
	pub height: f64,
	/// Fixed canvas size, `None` while fitting the container.
	pub view: Option<(f64, f64)>,
	/// Size the canvas to its parent element.
	pub fit_container: bool,
	/// Zoom to fit whenever the graph changes.
	pub auto_zoom: bool,
	/// Re-center whenever the graph changes.
	pub auto_center: bool,
	/// Zoom around the cursor.
	pub pan_on_zoom: bool,
	/// Wheel zoom on or off.
	pub enable_zoom: bool,
	/// Legend under the canvas.
	pub show_legend: bool,
	/// Rank direction on layered charts.
	pub orientation: Orientation,
	/// Name of the current curve, one of the curve names.
	pub curve_type: String,
	/// Curve resolved from `curve_type`.
	pub curve: Curve,
	/// Name of the current color scheme.
	pub selected_color_scheme: String,
	/// Preset resolved from `selected_color_scheme`.
	pub color_scheme: Option<&'static ColorScheme>,
}

impl Default for DisplayState {
	fn default() -> Self {
		let mut state = Self {
			theme: Theme::Dark,
			chart_type: String::new(),
			chart: None,
			width: DEFAULT_WIDTH,
			height: DEFAULT_HEIGHT,
			view: None,
			fit_container: true,
			auto_zoom: false,
			auto_center: false,
			pan_on_zoom: true,
			enable_zoom: true,
			show_legend: false,
			orientation: Orientation::LeftToRight,
			curve_type: "Linear".into(),
			curve: Curve::Linear,
			selected_color_scheme: String::new(),
			color_scheme: None,
		};
		state.set_color_scheme(DEFAULT_COLOR_SCHEME);
		state.set_interpolation_type(DEFAULT_CURVE);
		state.select_chart(DEFAULT_CHART);
		if !state.fit_container {
			state.apply_dimensions();
		}
		state
	}
}

fn ignore_miss(result: Result<()>) {
	if let Err(err) = result {
		debug!("keeping previous display setting: {err}");
	}
}

impl DisplayState {
	/// Switches to the preset named `name`.
	pub fn try_set_color_scheme(&mut self, name: &str) -> Result<()> {
		let scheme =
			find_color_scheme(name).ok_or_else(|| Error::UnknownColorScheme(name.to_owned()))?;
		self.selected_color_scheme = name.to_owned();
		self.color_scheme = Some(scheme);
		Ok(())
	}

	/// Like [`DisplayState::try_set_color_scheme`], ignoring unknown names.
	pub fn set_color_scheme(&mut self, name: &str) {
		ignore_miss(self.try_set_color_scheme(name));
	}

	/// Switches the edge curve to the one named `curve_type`.
	pub fn try_set_interpolation_type(&mut self, curve_type: &str) -> Result<()> {
		let curve =
			Curve::from_name(curve_type).ok_or_else(|| Error::UnknownCurve(curve_type.to_owned()))?;
		self.curve_type = curve_type.to_owned();
		self.curve = curve;
		Ok(())
	}

	/// Like [`DisplayState::try_set_interpolation_type`], ignoring unknown names.
	pub fn set_interpolation_type(&mut self, curve_type: &str) {
		ignore_miss(self.try_set_interpolation_type(curve_type));
	}

	/// Selects the first chart whose selector is `selector`.
	pub fn try_select_chart(&mut self, selector: &str) -> Result<()> {
		let chart = find_chart(CHART_GROUPS, selector)
			.ok_or_else(|| Error::UnknownChart(selector.to_owned()))?;
		self.chart_type = selector.to_owned();
		self.chart = Some(chart);
		Ok(())
	}

	/// Like [`DisplayState::try_select_chart`], ignoring unknown selectors.
	pub fn select_chart(&mut self, selector: &str) {
		ignore_miss(self.try_select_chart(selector));
	}

	/// Switches to the theme named `name` (`dark` or `light`).
	pub fn try_set_theme(&mut self, name: &str) -> Result<()> {
		self.theme = Theme::from_name(name).ok_or_else(|| Error::UnknownTheme(name.to_owned()))?;
		Ok(())
	}

	/// Like [`DisplayState::try_set_theme`], ignoring unknown names.
	pub fn set_theme(&mut self, name: &str) {
		ignore_miss(self.try_set_theme(name));
	}

	/// Switches the rank direction to `code` (`LR`, `RL`, `TB`, `BT`).
	pub fn try_set_orientation(&mut self, code: &str) -> Result<()> {
		self.orientation =
			Orientation::from_code(code).ok_or_else(|| Error::UnknownOrientation(code.to_owned()))?;
		Ok(())
	}

	/// Like [`DisplayState::try_set_orientation`], ignoring unknown codes.
	pub fn set_orientation(&mut self, code: &str) {
		ignore_miss(self.try_set_orientation(code));
	}

	/// Sets `enable_zoom`.
	pub fn toggle_enable_zoom(&mut self, enable_zoom: bool) {
		self.enable_zoom = enable_zoom;
	}

	/// Sets `pan_on_zoom`.
	pub fn toggle_pan_on_zoom(&mut self, pan_on_zoom: bool) {
		self.pan_on_zoom = pan_on_zoom;
	}

	/// Sets `show_legend`.
	pub fn toggle_show_legend(&mut self, show_legend: bool) {
		self.show_legend = show_legend;
	}

	/// Sets the fit flags together. Leaving fit mode pins the canvas to the
	/// stored width and height.
	pub fn toggle_fit_container(&mut self, fit_container: bool, auto_zoom: bool, auto_center: bool) {
		self.fit_container = fit_container;
		self.auto_zoom = auto_zoom;
		self.auto_center = auto_center;

		if self.fit_container {
			self.view = None;
		} else {
			self.apply_dimensions();
		}
	}

	/// Pins the canvas to the stored width and height.
	pub fn apply_dimensions(&mut self) {
		self.view = Some((self.width, self.height));
	}

	/// Stores new dimensions; they only take effect while not fitting the
	/// container. Non-finite or non-positive sizes are ignored.
	pub fn set_dimensions(&mut self, width: f64, height: f64) {
		if width.is_finite() && width > 0.0 {
			self.width = width;
		}
		if height.is_finite() && height > 0.0 {
			self.height = height;
		}
		if !self.fit_container {
			self.apply_dimensions();
		}
	}

	/// Layout of the selected chart.
	pub fn layout(&self) -> Layout {
		self.chart.map(|c| c.layout).unwrap_or_default()
	}

	/// What the canvas needs from these settings.
	pub fn graph_options(&self) -> GraphOptions {
		let defaults = GraphOptions::default();
		GraphOptions {
			layout: self.layout(),
			orientation: self.orientation,
			curve: self.curve,
			palette: self.color_scheme.map(|s| s.domain).unwrap_or(defaults.palette),
			theme: self.theme,
			enable_zoom: self.enable_zoom,
			pan_on_zoom: self.pan_on_zoom,
			auto_zoom: self.auto_zoom,
			auto_center: self.auto_center,
			show_legend: self.show_legend,
			view: self.view,
		}
	}
}
