//! Seeded randomness for passenger scattering.
//!
//! Scatter points are derived from a run seed, a per-run draw counter and
//! the entity handle, so a replayed run drops passengers at the same spots.

use crate::state::{EntityHandle, Position};

/// Deterministic random source: the same seed always yields the same value.
pub trait RngOracle {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit(&self, seed: u64) -> f32 {
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform planar point within `radius` of `center`, keeping its height.
    fn point_around(&self, seed: u64, center: Position, radius: f32) -> Position {
        if radius <= 0.0 {
            return center;
        }
        let angle = self.unit(seed) * core::f32::consts::TAU;
        let distance = radius * self.unit(seed.rotate_left(32) ^ 0x9e37_79b9).sqrt();
        center.offset(distance * angle.cos(), distance * angle.sin())
    }
}

/// PCG-XSH-RR generator over a 64-bit state.
///
/// Stateless: every call steps once from the supplied seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the run seed, the draw counter and the entity into one seed.
pub fn compute_seed(run_seed: u64, draw: u64, entity: EntityHandle) -> u64 {
    let mut hash = run_seed;
    hash ^= draw.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (entity.0 as u64).wrapping_mul(0x517cc1b727220a95);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
