//! The intent field: a cubic lattice of scalars in `[-1, 1]`.
//!
//! Every mutation path (`fluctuate`, `apply_wave`, `nudge`) re-clamps the
//! touched cells, so the range invariant holds after any sequence of calls.

use rand::Rng;
use std::f64::consts::PI;

/// Probability that a cell is perturbed during one fluctuation pass.
pub const FLUCTUATION_CHANCE: f64 = 0.3;
/// Probability that a fluctuation pass also injects a wave.
pub const WAVE_CHANCE: f64 = 0.05;
/// Standard deviation scale of the probabilistic perturbation, relative to the rate.
const GAUSSIAN_SCALE: f64 = 0.3;

/// Draws a standard normal sample with the Box–Muller transform.
///
/// `u1` is floored at `f64::EPSILON` so a zero draw cannot produce `ln(0)`.
pub fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1 = rng.gen::<f64>().max(f64::EPSILON);
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).sin()
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntentField {
    pub size: usize,
    pub cells: Vec<f64>,
}

impl IntentField {
    /// A field with every cell set to `value` (clamped).
    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            size,
            cells: vec![value.clamp(-1.0, 1.0); size * size * size],
        }
    }

    /// A field of independent uniform samples in `[-1, 1]`.
    pub fn uniform<R: Rng>(size: usize, rng: &mut R) -> Self {
        let cells = (0..size * size * size)
            .map(|_| rng.gen::<f64>() * 2.0 - 1.0)
            .collect();
        Self { size, cells }
    }

    /// A fresh uniform field followed by one fluctuation pass.
    pub fn generate<R: Rng>(
        size: usize,
        fluctuation_rate: f64,
        probabilistic: bool,
        rng: &mut R,
    ) -> Self {
        let mut field = Self::uniform(size, rng);
        field.fluctuate(fluctuation_rate, probabilistic, rng);
        field
    }

    #[inline(always)]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.size + y) * self.size + x
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> f64 {
        self.cells[self.index(x, y, z)]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> (usize, usize, usize) {
        (
            rng.gen_range(0..self.size),
            rng.gen_range(0..self.size),
            rng.gen_range(0..self.size),
        )
    }

    /// Value of a uniformly chosen cell.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        let (x, y, z) = self.random_cell(rng);
        self.get(x, y, z)
    }

    /// Adds `delta` to one cell and re-clamps it.
    pub fn nudge(&mut self, x: usize, y: usize, z: usize, delta: f64) {
        let idx = self.index(x, y, z);
        self.cells[idx] = (self.cells[idx] + delta).clamp(-1.0, 1.0);
    }

    /// One fluctuation pass: per-cell perturbation, then a possible wave.
    ///
    /// With `fluctuation_rate == 0.0` the pass leaves every cell unchanged.
    pub fn fluctuate<R: Rng>(&mut self, fluctuation_rate: f64, probabilistic: bool, rng: &mut R) {
        for cell in self.cells.iter_mut() {
            if rng.gen::<f64>() < FLUCTUATION_CHANCE {
                let delta = if probabilistic {
                    standard_normal(rng) * fluctuation_rate * GAUSSIAN_SCALE
                } else {
                    (rng.gen::<f64>() * 2.0 - 1.0) * fluctuation_rate
                };
                *cell = (*cell + delta).clamp(-1.0, 1.0);
            }
        }

        if rng.gen::<f64>() < WAVE_CHANCE {
            self.inject_wave(fluctuation_rate, rng);
        }
    }

    /// Superimposes a wave with random origin, wavelength in `[5, 10)` and
    /// strength up to half the fluctuation rate.
    pub fn inject_wave<R: Rng>(&mut self, fluctuation_rate: f64, rng: &mut R) {
        let origin = self.random_cell(rng);
        let strength = rng.gen::<f64>() * 0.5 * fluctuation_rate;
        let wavelength = rng.gen::<f64>() * 5.0 + 5.0;
        self.apply_wave(origin, wavelength, strength);
    }

    /// Adds `sin(2π·d/λ)·strength·exp(-d/(2λ))` to every cell, `d` being the
    /// Euclidean distance to `origin`.
    pub fn apply_wave(&mut self, origin: (usize, usize, usize), wavelength: f64, strength: f64) {
        let (ox, oy, oz) = (origin.0 as f64, origin.1 as f64, origin.2 as f64);
        let n = self.size;
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    let dx = x as f64 - ox;
                    let dy = y as f64 - oy;
                    let dz = z as f64 - oz;
                    let distance = (dx * dx + dy * dy + dz * dz).sqrt();
                    let effect = (distance / wavelength * 2.0 * PI).sin()
                        * strength
                        * (-distance / (wavelength * 2.0)).exp();
                    let idx = self.index(x, y, z);
                    self.cells[idx] = (self.cells[idx] + effect).clamp(-1.0, 1.0);
                }
            }
        }
    }

    /// Mean per-cell binary entropy, treating `(v + 1) / 2` as a Bernoulli parameter.
    ///
    /// Cells at exactly -1 or 1 contribute zero. Returns 0 for an empty field.
    pub fn binary_entropy(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .cells
            .iter()
            .map(|&v| {
                let p = (v + 1.0) / 2.0;
                if p > 0.0 && p < 1.0 {
                    -(p * p.log2() + (1.0 - p) * (1.0 - p).log2())
                } else {
                    0.0
                }
            })
            .sum();
        total / self.cells.len() as f64
    }
}
