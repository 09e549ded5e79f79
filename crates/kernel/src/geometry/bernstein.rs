//! Bernstein polynomial basis.
//!
//! `B(n, i, u) = C(n, i) * u^i * (1 - u)^(n - i)` weights control point `i` of
//! a degree-`n` Bezier shape at parameter `u`. `0^0` is taken as `1`, which
//! makes the basis interpolate the first and last control points exactly.

/// Binomial coefficient `C(n, i)` as a float.
///
/// Computed multiplicatively so that degrees up to the grid bound stay finite
/// (a factorial of 171 already overflows `f64`).
pub fn binomial(n: usize, i: usize) -> f64 {
    assert!(i <= n, "binomial index {i} exceeds degree {n}");
    let k = i.min(n - i);
    let mut c = 1.0;
    for step in 0..k {
        c = c * (n - step) as f64 / (step + 1) as f64;
    }
    c.round()
}

/// Bernstein basis weight of control point `i` out of a degree-`n` shape at `u`.
///
/// Panics if `i > n`; that can only come from a bug in the caller.
pub fn bernstein(n: usize, i: usize, u: f64) -> f64 {
    assert!(i <= n, "basis index {i} exceeds degree {n}");
    binomial(n, i) * pow(u, i) * pow(1.0 - u, n - i)
}

fn pow(base: f64, exp: usize) -> f64 {
    // powi takes i32; degrees are bounded well below i32::MAX by the grid size.
    base.powi(exp as i32)
}

/// Basis weights for one degree sampled at `divisions + 1` evenly spaced
/// parameters, computed once per evaluation and reused across samples.
#[derive(Debug, Clone)]
pub struct BasisTable {
    degree: usize,
    divisions: usize,
    /// `weights[t * (degree + 1) + i] = B(degree, i, t / divisions)`
    weights: Vec<f64>,
}

impl BasisTable {
    pub fn new(degree: usize, divisions: usize) -> Self {
        assert!(divisions > 0, "basis table needs at least one division");
        let coefficients: Vec<f64> = (0..=degree).map(|i| binomial(degree, i)).collect();
        let mut weights = Vec::with_capacity((divisions + 1) * (degree + 1));
        for t in 0..=divisions {
            let u = Self::parameter(t, divisions);
            for (i, c) in coefficients.iter().enumerate() {
                weights.push(c * pow(u, i) * pow(1.0 - u, degree - i));
            }
        }
        Self {
            degree,
            divisions,
            weights,
        }
    }

    /// Parameter of sample `t`; exactly `0.0` and `1.0` at the ends.
    pub fn parameter(t: usize, divisions: usize) -> f64 {
        t as f64 / divisions as f64
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn divisions(&self) -> usize {
        self.divisions
    }

    /// All weights at sample `t`, indexed by control point.
    pub fn at(&self, t: usize) -> &[f64] {
        let stride = self.degree + 1;
        &self.weights[t * stride..(t + 1) * stride]
    }
}
