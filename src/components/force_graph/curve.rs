//! Line interpolators for edge paths.
//!
//! Each curve turns a polyline into a list of path commands that can be
//! replayed on a canvas context. The math follows the usual d3-shape
//! definitions: basis/bundle B-splines, cardinal and centripetal Catmull-Rom
//! splines, natural cubic splines, monotone cubic Hermite splines and the
//! three step variants.

/// A point in graph coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	fn swapped(self) -> Self {
		Self::new(self.y, self.x)
	}

	fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// One canvas path command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
	/// Starts a subpath.
	MoveTo(Point),
	/// Straight segment to the point.
	LineTo(Point),
	/// Cubic bezier: two control points, then the end point.
	CubicTo(Point, Point, Point),
}

impl PathCmd {
	/// Where the pen sits after this command.
	pub fn end(&self) -> Point {
		match *self {
			PathCmd::MoveTo(p) | PathCmd::LineTo(p) | PathCmd::CubicTo(_, _, p) => p,
		}
	}

	fn swapped(self) -> Self {
		match self {
			PathCmd::MoveTo(p) => PathCmd::MoveTo(p.swapped()),
			PathCmd::LineTo(p) => PathCmd::LineTo(p.swapped()),
			PathCmd::CubicTo(a, b, c) => PathCmd::CubicTo(a.swapped(), b.swapped(), c.swapped()),
		}
	}
}

/// The ten interpolation names offered in the UI, in display order.
pub const CURVE_NAMES: [&str; 10] = [
	"Bundle",
	"Cardinal",
	"Catmull Rom",
	"Linear",
	"Monotone X",
	"Monotone Y",
	"Natural",
	"Step",
	"Step After",
	"Step Before",
];

/// Interpolation used to draw edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
	/// Basis spline straightened towards the chord.
	Bundle {
		/// 0 gives the straight chord, 1 the plain basis spline.
		beta: f64,
	},
	/// Cardinal spline through every point.
	Cardinal {
		/// 0 is Catmull-Rom-like, 1 gives straight segments.
		tension: f64,
	},
	/// Catmull-Rom spline with knot parameterisation `alpha`.
	CatmullRom {
		/// 0 uniform, 0.5 centripetal, 1 chordal.
		alpha: f64,
	},
	/// Straight segments.
	Linear,
	/// Monotone in x.
	MonotoneX,
	/// Monotone in y.
	MonotoneY,
	/// Natural cubic spline.
	Natural,
	/// Step at the midpoint between points.
	Step,
	/// Horizontal first, then vertical.
	StepAfter,
	/// Vertical first, then horizontal.
	StepBefore,
}

impl Curve {
	/// Preset for one of [`CURVE_NAMES`].
	pub fn from_name(name: &str) -> Option<Self> {
		Some(match name {
			"Bundle" => Curve::Bundle { beta: 1.0 },
			"Cardinal" => Curve::Cardinal { tension: 0.0 },
			"Catmull Rom" => Curve::CatmullRom { alpha: 0.5 },
			"Linear" => Curve::Linear,
			"Monotone X" => Curve::MonotoneX,
			"Monotone Y" => Curve::MonotoneY,
			"Natural" => Curve::Natural,
			"Step" => Curve::Step,
			"Step After" => Curve::StepAfter,
			"Step Before" => Curve::StepBefore,
			_ => return None,
		})
	}

	/// Path through `points`, starting with a `MoveTo` on the first one.
	pub fn path(&self, points: &[Point]) -> Vec<PathCmd> {
		match points {
			[] => Vec::new(),
			[p] => vec![PathCmd::MoveTo(*p)],
			[a, b] if !matches!(self, Curve::Step | Curve::StepAfter | Curve::StepBefore) => {
				vec![PathCmd::MoveTo(*a), PathCmd::LineTo(*b)]
			}
			_ => match *self {
				Curve::Bundle { beta } => bundle(points, beta),
				Curve::Cardinal { tension } => cardinal(points, tension),
				Curve::CatmullRom { alpha } => catmull_rom(points, alpha),
				Curve::Linear => linear(points),
				Curve::MonotoneX => monotone(points),
				Curve::MonotoneY => {
					let swapped: Vec<Point> = points.iter().map(|p| p.swapped()).collect();
					monotone(&swapped).into_iter().map(PathCmd::swapped).collect()
				}
				Curve::Natural => natural(points),
				Curve::Step => step(points, 0.5),
				Curve::StepAfter => step(points, 1.0),
				Curve::StepBefore => step(points, 0.0),
			},
		}
	}
}

/// Direction of the path at its end, as (from, to).
pub fn end_tangent(path: &[PathCmd]) -> Option<(Point, Point)> {
	let (last, rest) = path.split_last()?;
	let end = last.end();
	let from = match *last {
		PathCmd::CubicTo(_, c2, _) if c2 != end => c2,
		PathCmd::CubicTo(c1, _, _) if c1 != end => c1,
		_ => rest.last()?.end(),
	};
	(from != end).then_some((from, end))
}

fn linear(points: &[Point]) -> Vec<PathCmd> {
	let mut out = vec![PathCmd::MoveTo(points[0])];
	out.extend(points[1..].iter().map(|p| PathCmd::LineTo(*p)));
	out
}

fn step(points: &[Point], t: f64) -> Vec<PathCmd> {
	let mut out = vec![PathCmd::MoveTo(points[0])];
	for pair in points.windows(2) {
		let (prev, p) = (pair[0], pair[1]);
		if t <= 0.0 {
			out.push(PathCmd::LineTo(Point::new(prev.x, p.y)));
			out.push(PathCmd::LineTo(p));
		} else {
			let x = prev.x * (1.0 - t) + p.x * t;
			out.push(PathCmd::LineTo(Point::new(x, prev.y)));
			out.push(PathCmd::LineTo(Point::new(x, p.y)));
		}
	}
	if t > 0.0 && t < 1.0 {
		out.push(PathCmd::LineTo(points[points.len() - 1]));
	}
	out
}

fn basis_segment(a: Point, b: Point, c: Point) -> PathCmd {
	PathCmd::CubicTo(
		Point::new((2.0 * a.x + b.x) / 3.0, (2.0 * a.y + b.y) / 3.0),
		Point::new((a.x + 2.0 * b.x) / 3.0, (a.y + 2.0 * b.y) / 3.0),
		Point::new((a.x + 4.0 * b.x + c.x) / 6.0, (a.y + 4.0 * b.y + c.y) / 6.0),
	)
}

fn basis(points: &[Point]) -> Vec<PathCmd> {
	let n = points.len();
	let (p0, p1) = (points[0], points[1]);
	let mut out = vec![
		PathCmd::MoveTo(p0),
		PathCmd::LineTo(Point::new((5.0 * p0.x + p1.x) / 6.0, (5.0 * p0.y + p1.y) / 6.0)),
	];
	for w in points.windows(3) {
		out.push(basis_segment(w[0], w[1], w[2]));
	}
	out.push(basis_segment(points[n - 2], points[n - 1], points[n - 1]));
	out.push(PathCmd::LineTo(points[n - 1]));
	out
}

/// Basis spline over points pulled towards the straight chord by `1 - beta`.
fn bundle(points: &[Point], beta: f64) -> Vec<PathCmd> {
	let (first, last) = (points[0], points[points.len() - 1]);
	let j = (points.len() - 1) as f64;
	let straightened: Vec<Point> = points
		.iter()
		.enumerate()
		.map(|(i, p)| {
			let t = i as f64 / j;
			Point::new(
				beta * p.x + (1.0 - beta) * (first.x + t * (last.x - first.x)),
				beta * p.y + (1.0 - beta) * (first.y + t * (last.y - first.y)),
			)
		})
		.collect();
	basis(&straightened)
}

fn cardinal(points: &[Point], tension: f64) -> Vec<PathCmd> {
	let k = (1.0 - tension) / 6.0;
	let n = points.len();
	let mut out = vec![PathCmd::MoveTo(points[0])];
	for i in 0..n - 1 {
		let (a, b) = (points[i], points[i + 1]);
		let prev = if i > 0 { points[i - 1] } else { b };
		let next = points.get(i + 2).copied().unwrap_or(a);
		out.push(PathCmd::CubicTo(
			Point::new(a.x + k * (b.x - prev.x), a.y + k * (b.y - prev.y)),
			Point::new(b.x + k * (a.x - next.x), b.y + k * (a.y - next.y)),
			b,
		));
	}
	out
}

fn catmull_rom(points: &[Point], alpha: f64) -> Vec<PathCmd> {
	const EPSILON: f64 = 1e-12;
	let n = points.len();
	let mut out = vec![PathCmd::MoveTo(points[0])];
	for i in 0..n - 1 {
		let (a, b) = (points[i], points[i + 1]);
		let l12_2a = a.distance(b).powf(2.0 * alpha);
		let l12_a = l12_2a.sqrt();
		let mut c1 = a;
		let mut c2 = b;

		if let Some(prev) = i.checked_sub(1).map(|j| points[j]) {
			let l01_2a = prev.distance(a).powf(2.0 * alpha);
			let l01_a = l01_2a.sqrt();
			if l01_a > EPSILON {
				let m = 2.0 * l01_2a + 3.0 * l01_a * l12_a + l12_2a;
				let d = 3.0 * l01_a * (l01_a + l12_a);
				c1 = Point::new(
					(a.x * m - prev.x * l12_2a + b.x * l01_2a) / d,
					(a.y * m - prev.y * l12_2a + b.y * l01_2a) / d,
				);
			}
		}
		if let Some(&next) = points.get(i + 2) {
			let l23_2a = b.distance(next).powf(2.0 * alpha);
			let l23_a = l23_2a.sqrt();
			if l23_a > EPSILON {
				let m = 2.0 * l23_2a + 3.0 * l23_a * l12_a + l12_2a;
				let d = 3.0 * l23_a * (l23_a + l12_a);
				c2 = Point::new(
					(b.x * m + a.x * l23_2a - next.x * l12_2a) / d,
					(b.y * m + a.y * l23_2a - next.y * l12_2a) / d,
				);
			}
		}
		out.push(PathCmd::CubicTo(c1, c2, b));
	}
	out
}

/// Control points of a natural cubic spline through `x` (one coordinate).
fn natural_controls(x: &[f64]) -> (Vec<f64>, Vec<f64>) {
	let n = x.len() - 1;
	let mut a = vec![0.0; n];
	let mut b = vec![0.0; n];
	let mut r = vec![0.0; n];
	a[0] = 0.0;
	b[0] = 2.0;
	r[0] = x[0] + 2.0 * x[1];
	for i in 1..n - 1 {
		a[i] = 1.0;
		b[i] = 4.0;
		r[i] = 4.0 * x[i] + 2.0 * x[i + 1];
	}
	a[n - 1] = 2.0;
	b[n - 1] = 7.0;
	r[n - 1] = 8.0 * x[n - 1] + x[n];
	for i in 1..n {
		let m = a[i] / b[i - 1];
		b[i] -= m;
		r[i] -= m * r[i - 1];
	}
	a[n - 1] = r[n - 1] / b[n - 1];
	for i in (0..n - 1).rev() {
		a[i] = (r[i] - a[i + 1]) / b[i];
	}
	b[n - 1] = (x[n] + a[n - 1]) / 2.0;
	for i in 0..n - 1 {
		b[i] = 2.0 * x[i + 1] - a[i + 1];
	}
	(a, b)
}

fn natural(points: &[Point]) -> Vec<PathCmd> {
	let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
	let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
	let (ax, bx) = natural_controls(&xs);
	let (ay, by) = natural_controls(&ys);
	let mut out = vec![PathCmd::MoveTo(points[0])];
	for i in 0..points.len() - 1 {
		out.push(PathCmd::CubicTo(
			Point::new(ax[i], ay[i]),
			Point::new(bx[i], by[i]),
			points[i + 1],
		));
	}
	out
}

fn sign(v: f64) -> f64 {
	if v < 0.0 { -1.0 } else { 1.0 }
}

/// Tangent at `b` from its two neighbours, clamped to keep the curve monotone.
fn slope3(a: Point, b: Point, c: Point) -> f64 {
	let (h0, h1) = (b.x - a.x, c.x - b.x);
	let s0 = (b.y - a.y) / h0;
	let s1 = (c.y - b.y) / h1;
	let p = (s0 * h1 + s1 * h0) / (h0 + h1);
	let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
	if t.is_finite() { t } else { 0.0 }
}

/// End tangent from the segment slope and the neighbouring tangent.
fn slope2(a: Point, b: Point, t: f64) -> f64 {
	let h = b.x - a.x;
	if h != 0.0 {
		(3.0 * (b.y - a.y) / h - t) / 2.0
	} else {
		t
	}
}

fn monotone(points: &[Point]) -> Vec<PathCmd> {
	let mut pts: Vec<Point> = Vec::with_capacity(points.len());
	for p in points {
		if pts.last() != Some(p) {
			pts.push(*p);
		}
	}
	if pts.len() < 3 {
		return linear(&pts);
	}

	let n = pts.len();
	let mut tangents = vec![0.0; n];
	for i in 1..n - 1 {
		tangents[i] = slope3(pts[i - 1], pts[i], pts[i + 1]);
	}
	tangents[0] = slope2(pts[0], pts[1], tangents[1]);
	tangents[n - 1] = slope2(pts[n - 2], pts[n - 1], tangents[n - 2]);

	let mut out = vec![PathCmd::MoveTo(pts[0])];
	for i in 0..n - 1 {
		let (a, b) = (pts[i], pts[i + 1]);
		let dx = (b.x - a.x) / 3.0;
		if dx == 0.0 {
			out.push(PathCmd::LineTo(b));
			continue;
		}
		out.push(PathCmd::CubicTo(
			Point::new(a.x + dx, a.y + dx * tangents[i]),
			Point::new(b.x - dx, b.y - dx * tangents[i + 1]),
			b,
		));
	}
	out
}
