//! Channel interleaver — joins two mono buffers into one stereo buffer.

use super::gain::dbfs_to_linear;
use super::pcm::PcmBuffer;
use crate::error::{AudioError, Result};

/// Interleave `left` and `right` as L0,R0,L1,R1,… with one shared gain.
///
/// Each scaled sample is floored, then held inside the i16 range.
pub fn interleave(left: &PcmBuffer, right: &PcmBuffer, gain_db: f64) -> Result<PcmBuffer> {
    for buf in [left, right] {
        if buf.channels != 1 {
            return Err(AudioError::ChannelMismatch {
                expected: 1,
                found: buf.channels,
            });
        }
    }
    if left.len() != right.len() {
        return Err(AudioError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    if gain_db.is_nan() {
        return Err(AudioError::invalid("volumeDbfs", gain_db, "gain must be a number"));
    }

    let gain = dbfs_to_linear(gain_db);
    let mut samples = vec![0i16; left.len() * 2];
    for (i, frame) in samples.chunks_exact_mut(2).enumerate() {
        frame[0] = apply_gain(left.samples[i], gain);
        frame[1] = apply_gain(right.samples[i], gain);
    }
    Ok(PcmBuffer::stereo_interleaved(samples))
}

fn apply_gain(sample: i16, gain: f64) -> i16 {
    let scaled = (sample as f64 * gain).floor();
    scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Split a stereo buffer back into its left and right channels.
pub fn deinterleave(stereo: &PcmBuffer) -> Result<(PcmBuffer, PcmBuffer)> {
    if stereo.channels != 2 {
        return Err(AudioError::ChannelMismatch {
            expected: 2,
            found: stereo.channels,
        });
    }
    Ok((stereo.channel(0)?, stereo.channel(1)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::sine_wave;

    #[test]
    fn doubles_length_and_alternates() {
        let left = PcmBuffer::mono(vec![1, 2, 3]);
        let right = PcmBuffer::mono(vec![-1, -2, -3]);
        let out = interleave(&left, &right, 0.0).unwrap();
        assert_eq!(out.channels, 2);
        assert_eq!(out.samples, vec![1, -1, 2, -2, 3, -3]);
        assert_eq!(out.byte_len(), 2 * (left.byte_len()));
    }

    #[test]
    fn gain_floors_toward_negative_infinity() {
        let left = PcmBuffer::mono(vec![3, -3]);
        let right = PcmBuffer::mono(vec![1, -1]);
        let out = interleave(&left, &right, -6.0).unwrap();
        // 3 * 0.501 = 1.50 -> 1, -3 * 0.501 = -1.50 -> -2
        assert_eq!(out.samples, vec![1, 0, -2, -1]);
    }

    #[test]
    fn same_gain_on_both_channels() {
        let tone = sine_wave(300.0, 0.05, 16000).unwrap();
        let out = interleave(&tone, &tone, -10.0).unwrap();
        let (l, r) = deinterleave(&out).unwrap();
        assert_eq!(l, r);
    }

    #[test]
    fn positive_gain_holds_range() {
        let loud = PcmBuffer::mono(vec![i16::MAX, i16::MIN]);
        let out = interleave(&loud, &loud, 12.0).unwrap();
        assert_eq!(out.samples, vec![i16::MAX, i16::MAX, i16::MIN, i16::MIN]);
    }

    #[test]
    fn empty_inputs() {
        let empty = PcmBuffer::mono(vec![]);
        let out = interleave(&empty, &empty, -6.0).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.channels, 2);
    }

    #[test]
    fn rejects_unequal_lengths() {
        let left = PcmBuffer::mono(vec![0; 4]);
        let right = PcmBuffer::mono(vec![0; 5]);
        assert!(matches!(
            interleave(&left, &right, 0.0),
            Err(AudioError::LengthMismatch { left: 4, right: 5 })
        ));
    }

    #[test]
    fn rejects_stereo_input() {
        let stereo = PcmBuffer::stereo_interleaved(vec![0; 4]);
        assert!(interleave(&stereo, &stereo, 0.0).is_err());
        assert!(deinterleave(&PcmBuffer::mono(vec![0; 4])).is_err());
    }
}
