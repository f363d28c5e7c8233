//! Arc-length resampling of raw pointer input.

use kurbo::Point;

/// Arc-length distance between consecutive resampled points.
const SAMPLE_STEP: f64 = 1.0;
/// Minimum number of raw points required for spline fitting.
const MIN_SPLINE_POINTS: usize = 4;

/// Smooth a raw stroke by fitting natural cubic splines x(s) and y(s)
/// over the cumulative arc length s, then resampling at fixed arc-length
/// steps. The spline passes through every original sample, so short
/// strokes keep their drawn shape.
///
/// Strokes with fewer than four points, or with no extent at all, are
/// returned unchanged.
pub fn smooth(points: &[Point]) -> Vec<Point> {
    if points.len() < MIN_SPLINE_POINTS {
        return points.to_vec();
    }

    // Collapse consecutive coincident samples (rapid pointer input) so
    // the spline knots stay strictly increasing.
    let mut knots: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if knots.last() != Some(&p) {
            knots.push(p);
        }
    }
    if knots.len() < MIN_SPLINE_POINTS {
        return points.to_vec();
    }

    let mut arc = Vec::with_capacity(knots.len());
    let mut total = 0.0;
    arc.push(0.0);
    for w in knots.windows(2) {
        total += w[1].distance(w[0]);
        arc.push(total);
    }

    let xs: Vec<f64> = knots.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = knots.iter().map(|p| p.y).collect();
    let spline_x = CubicSpline::fit(&arc, &xs);
    let spline_y = CubicSpline::fit(&arc, &ys);

    let steps = (total / SAMPLE_STEP).floor() as usize;
    let mut out = Vec::with_capacity(steps + 2);
    for k in 0..=steps {
        let s = k as f64 * SAMPLE_STEP;
        out.push(Point::new(spline_x.eval(s), spline_y.eval(s)));
    }
    // Always land exactly on the final sample.
    if total - steps as f64 * SAMPLE_STEP > 1e-9 {
        out.push(Point::new(spline_x.eval(total), spline_y.eval(total)));
    }
    out
}

/// Natural cubic spline through (knot, value) samples.
///
/// Knots must be strictly increasing; `smooth` guarantees this by
/// collapsing coincident points first.
struct CubicSpline {
    knots: Vec<f64>,
    values: Vec<f64>,
    /// Second derivatives at the knots.
    second: Vec<f64>,
}

impl CubicSpline {
    /// Fit with natural boundary conditions (zero curvature at the ends).
    fn fit(knots: &[f64], values: &[f64]) -> Self {
        let n = knots.len();
        let mut second = vec![0.0; n];
        let mut work = vec![0.0; n];

        // Tridiagonal sweep over the interior knots.
        for i in 1..n - 1 {
            let sig = (knots[i] - knots[i - 1]) / (knots[i + 1] - knots[i - 1]);
            let p = sig * second[i - 1] + 2.0;
            second[i] = (sig - 1.0) / p;
            let slope_diff = (values[i + 1] - values[i]) / (knots[i + 1] - knots[i])
                - (values[i] - values[i - 1]) / (knots[i] - knots[i - 1]);
            work[i] = (6.0 * slope_diff / (knots[i + 1] - knots[i - 1]) - sig * work[i - 1]) / p;
        }

        second[n - 1] = 0.0;
        for i in (0..n - 1).rev() {
            second[i] = second[i] * second[i + 1] + work[i];
        }

        Self {
            knots: knots.to_vec(),
            values: values.to_vec(),
            second,
        }
    }

    /// Evaluate at `s`, clamped to the fitted range.
    fn eval(&self, s: f64) -> f64 {
        let n = self.knots.len();
        let s = s.clamp(self.knots[0], self.knots[n - 1]);

        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.knots[mid] > s {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let h = self.knots[hi] - self.knots[lo];
        let a = (self.knots[hi] - s) / h;
        let b = (s - self.knots[lo]) / h;
        a * self.values[lo]
            + b * self.values[hi]
            + ((a.powi(3) - a) * self.second[lo] + (b.powi(3) - b) * self.second[hi]) * h * h / 6.0
    }
}
