//! Waveform generators — sine tones and white noise rendered to 16-bit PCM.
//!
//! Sines are sampled directly from the analytic function with no
//! band-limiting. Scaled values are truncated toward zero when stored.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use super::pcm::{PcmBuffer, sample_count};
use crate::error::{AudioError, Result};

/// Peak amplitude used when scaling [-1, 1] to i16.
pub const FULL_SCALE: f64 = 32767.0;

/// Scale a unit-range sample to i16, truncating toward zero.
pub(crate) fn to_i16(unit: f64) -> i16 {
    (unit.clamp(-1.0, 1.0) * FULL_SCALE) as i16
}

/// Render a mono sine tone.
pub fn sine_wave(frequency: f64, duration_seconds: f64, sample_rate: u32) -> Result<PcmBuffer> {
    if !frequency.is_finite() {
        return Err(AudioError::invalid(
            "frequency",
            frequency,
            "must be a finite number",
        ));
    }
    let count = sample_count(duration_seconds, sample_rate)?;
    tracing::debug!(
        frequency,
        duration_seconds,
        sample_rate,
        count,
        "rendering sine"
    );

    let step = 2.0 * PI * frequency / sample_rate as f64;
    let samples = (0..count).map(|i| to_i16((step * i as f64).sin())).collect();
    Ok(PcmBuffer::mono(samples))
}

/// Render mono white noise, uniform in [-1, 1) before scaling.
pub fn white_noise(
    duration_seconds: f64,
    sample_rate: u32,
    source: &mut NoiseSource,
) -> Result<PcmBuffer> {
    let count = sample_count(duration_seconds, sample_rate)?;
    tracing::debug!(
        duration_seconds,
        sample_rate,
        count,
        seed = source.seed,
        "rendering white noise"
    );

    let samples = (0..count).map(|_| to_i16(source.next_unit())).collect();
    Ok(PcmBuffer::mono(samples))
}

/// Pseudo-random source for noise. Not cryptographic.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: Pcg64Mcg,
    seed: u64,
}

impl NoiseSource {
    /// Fresh, non-reproducible noise.
    pub fn entropy() -> Self {
        NoiseSource::seeded(rand::random::<u64>())
    }

    /// Reproducible noise for a given seed.
    pub fn seeded(seed: u64) -> Self {
        NoiseSource {
            rng: Pcg64Mcg::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next value in [-1, 1).
    fn next_unit(&mut self) -> f64 {
        2.0 * self.rng.random::<f64>() - 1.0
    }
}
