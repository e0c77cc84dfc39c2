//! Shared fixtures for the integration tests: classic two-dimensional
//! benchmark functions with analytic gradients, a wrapper that hides the
//! gradient, and a seeded random source.
//!
//! Every benchmark is generic over [`VectorLike`], so the same fixture runs
//! against `Vec<f64>`, fixed arrays, `ndarray` and `nalgebra` vectors.
#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_lbfgsb::prelude::*;

/// Solver settings used by the benchmark sweeps: a very tight relative
/// reduction test, no projected-gradient test, and a generous iteration cap.
pub fn tight_solver() -> LbfgsbSolver {
    LbfgsbSolver::with_settings(5, 1000, 10.0, 0.0)
        .expect("tight benchmark settings should be accepted")
}

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform point inside the box `[lower, upper]` (both finite).
pub fn sample_in_box(rng: &mut ChaCha8Rng, lower: &[f64], upper: &[f64]) -> Vec<f64> {
    lower.iter().zip(upper).map(|(l, u)| rng.random_range(*l..*u)).collect()
}

pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).fold(0.0_f64, |acc, (x, y)| acc.max((x - y).abs()))
}

fn pair<V: VectorLike>(g0: f64, g1: f64) -> ProblemResult<V> {
    Ok(V::from_slice(&[g0, g1])?)
}

/// `f(x, y) = (1 - x)² + 100 (y - x²)²`, minimum `f(1, 1) = 0`.
#[derive(Debug, Clone, Copy)]
pub struct Rosenbrock;

impl<V: VectorLike> Objective<V> for Rosenbrock {
    fn value(&self, p: &V) -> ProblemResult<f64> {
        let (x, y) = (p.get(0), p.get(1));
        Ok((1.0 - x).powi(2) + 100.0 * (y - x * x).powi(2))
    }

    fn gradient(&self, p: &V) -> ProblemResult<V> {
        let (x, y) = (p.get(0), p.get(1));
        pair(-2.0 * (1.0 - x) - 400.0 * x * (y - x * x), 200.0 * (y - x * x))
    }
}

/// `f(x, y) = (x + 2y - 7)² + (2x + y - 5)²`, minimum `f(1, 3) = 0`.
#[derive(Debug, Clone, Copy)]
pub struct Booth;

impl<V: VectorLike> Objective<V> for Booth {
    fn value(&self, p: &V) -> ProblemResult<f64> {
        let (x, y) = (p.get(0), p.get(1));
        Ok((x + 2.0 * y - 7.0).powi(2) + (2.0 * x + y - 5.0).powi(2))
    }

    fn gradient(&self, p: &V) -> ProblemResult<V> {
        let (x, y) = (p.get(0), p.get(1));
        let (a, b) = (x + 2.0 * y - 7.0, 2.0 * x + y - 5.0);
        pair(2.0 * a + 4.0 * b, 4.0 * a + 2.0 * b)
    }
}

/// `f(x, y) = 0.26 (x² + y²) - 0.48 x y`, minimum `f(0, 0) = 0`.
#[derive(Debug, Clone, Copy)]
pub struct Matyas;

impl<V: VectorLike> Objective<V> for Matyas {
    fn value(&self, p: &V) -> ProblemResult<f64> {
        let (x, y) = (p.get(0), p.get(1));
        Ok(0.26 * (x * x + y * y) - 0.48 * x * y)
    }

    fn gradient(&self, p: &V) -> ProblemResult<V> {
        let (x, y) = (p.get(0), p.get(1));
        pair(0.52 * x - 0.48 * y, 0.52 * y - 0.48 * x)
    }
}

/// `f(x, y) = (1.5 - x + xy)² + (2.25 - x + xy²)² + (2.625 - x + xy³)²`,
/// minimum `f(3, 0.5) = 0`.
#[derive(Debug, Clone, Copy)]
pub struct Beale;

impl<V: VectorLike> Objective<V> for Beale {
    fn value(&self, p: &V) -> ProblemResult<f64> {
        let (x, y) = (p.get(0), p.get(1));
        Ok((1.5 - x + x * y).powi(2)
            + (2.25 - x + x * y * y).powi(2)
            + (2.625 - x + x * y.powi(3)).powi(2))
    }

    fn gradient(&self, p: &V) -> ProblemResult<V> {
        let (x, y) = (p.get(0), p.get(1));
        let t1 = 1.5 - x + x * y;
        let t2 = 2.25 - x + x * y * y;
        let t3 = 2.625 - x + x * y.powi(3);
        pair(
            2.0 * t1 * (y - 1.0) + 2.0 * t2 * (y * y - 1.0) + 2.0 * t3 * (y.powi(3) - 1.0),
            2.0 * t1 * x + 4.0 * t2 * x * y + 6.0 * t3 * x * y * y,
        )
    }
}

/// Goldstein-Price function, minimum `f(0, -1) = 3`.
///
/// Written as `A(x, y) · B(x, y)`; the gradient follows the product rule.
#[derive(Debug, Clone, Copy)]
pub struct GoldsteinPrice;

impl GoldsteinPrice {
    /// `(A, ∂A/∂x, B, ∂B/∂x, ∂B/∂y)`; `A` is symmetric in its partials.
    fn factors(x: f64, y: f64) -> [f64; 5] {
        let s = x + y + 1.0;
        let p = 19.0 - 14.0 * x + 3.0 * x * x - 14.0 * y + 6.0 * x * y + 3.0 * y * y;
        let dp = -14.0 + 6.0 * x + 6.0 * y;
        let a = 1.0 + s * s * p;
        let a_x = 2.0 * s * p + s * s * dp;

        let t = 2.0 * x - 3.0 * y;
        let q = 18.0 - 32.0 * x + 12.0 * x * x + 48.0 * y - 36.0 * x * y + 27.0 * y * y;
        let b = 30.0 + t * t * q;
        let b_x = 4.0 * t * q + t * t * (-32.0 + 24.0 * x - 36.0 * y);
        let b_y = -6.0 * t * q + t * t * (48.0 - 36.0 * x + 54.0 * y);
        [a, a_x, b, b_x, b_y]
    }
}

impl<V: VectorLike> Objective<V> for GoldsteinPrice {
    fn value(&self, p: &V) -> ProblemResult<f64> {
        let [a, _, b, ..] = Self::factors(p.get(0), p.get(1));
        Ok(a * b)
    }

    fn gradient(&self, p: &V) -> ProblemResult<V> {
        let [a, a_x, b, b_x, b_y] = Self::factors(p.get(0), p.get(1));
        pair(a_x * b + a * b_x, a_x * b + a * b_y)
    }
}

/// `f(x) = Σ (i + 1) (x_i - c_i)²` in any dimension.
#[derive(Debug, Clone)]
pub struct WeightedQuadratic {
    pub center: Vec<f64>,
}

impl<V: VectorLike> Objective<V> for WeightedQuadratic {
    fn value(&self, x: &V) -> ProblemResult<f64> {
        let weighted = |(i, c): (usize, &f64)| (i + 1) as f64 * (x.get(i) - c).powi(2);
        Ok(self.center.iter().enumerate().map(weighted).sum())
    }

    fn gradient(&self, x: &V) -> ProblemResult<V> {
        let mut g = V::with_len(x.len())?;
        for (i, c) in self.center.iter().enumerate() {
            g.set(i, 2.0 * (i + 1) as f64 * (x.get(i) - c));
        }
        Ok(g)
    }
}

/// Forwards `value` only, so the problem falls back to finite differences.
#[derive(Debug, Clone)]
pub struct ValueOnly<F>(pub F);

impl<V: VectorLike, F: Objective<V>> Objective<V> for ValueOnly<F> {
    fn value(&self, x: &V) -> ProblemResult<f64> {
        self.0.value(x)
    }
}

/// One benchmark with its search box and known minimizer.
#[derive(Debug, Clone, Copy)]
pub struct Benchmark {
    pub name: &'static str,
    pub lower: [f64; 2],
    pub upper: [f64; 2],
    pub minimizer: [f64; 2],
}

pub const ROSENBROCK: Benchmark =
    Benchmark { name: "rosenbrock", lower: [-10.0; 2], upper: [10.0; 2], minimizer: [1.0, 1.0] };
pub const BOOTH: Benchmark =
    Benchmark { name: "booth", lower: [-10.0; 2], upper: [10.0; 2], minimizer: [1.0, 3.0] };
pub const MATYAS: Benchmark =
    Benchmark { name: "matyas", lower: [-10.0; 2], upper: [10.0; 2], minimizer: [0.0, 0.0] };
// Restricted boxes around the global minimizer.
pub const BEALE: Benchmark =
    Benchmark { name: "beale", lower: [0.0, -2.0], upper: [4.5, 1.0], minimizer: [3.0, 0.5] };
pub const GOLDSTEIN_PRICE: Benchmark = Benchmark {
    name: "goldstein-price",
    lower: [-2.0, -2.0],
    upper: [2.0, -0.75],
    minimizer: [0.0, -1.0],
};
