//! Mixer — sums two PCM buffers with independent dBFS gain.

use super::gain::dbfs_to_linear;
use super::pcm::PcmBuffer;
use crate::error::{AudioError, Result};

/// Mix `a` and `b` sample by sample.
///
/// The output is as long as the longer input; the shorter one reads as
/// silence past its end. Sums outside the i16 range are hard clipped.
pub fn mix(a: &PcmBuffer, b: &PcmBuffer, gain_a_db: f64, gain_b_db: f64) -> Result<PcmBuffer> {
    if a.channels != b.channels {
        return Err(AudioError::ChannelMismatch {
            expected: a.channels,
            found: b.channels,
        });
    }
    let gain_a = linear_gain("gainA", gain_a_db)?;
    let gain_b = linear_gain("gainB", gain_b_db)?;

    let len = a.len().max(b.len());
    let mut samples = vec![0i16; len];
    for (i, out) in samples.iter_mut().enumerate() {
        let sa = a.samples.get(i).copied().unwrap_or(0) as f64;
        let sb = b.samples.get(i).copied().unwrap_or(0) as f64;
        *out = clip(sa * gain_a + sb * gain_b);
    }

    Ok(PcmBuffer {
        samples,
        channels: a.channels,
    })
}

fn linear_gain(name: &'static str, db: f64) -> Result<f64> {
    if db.is_nan() {
        return Err(AudioError::invalid(name, db, "gain must be a number"));
    }
    Ok(dbfs_to_linear(db))
}

/// Hard clip into i16 range, then truncate toward zero.
fn clip(sample: f64) -> i16 {
    sample.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}
