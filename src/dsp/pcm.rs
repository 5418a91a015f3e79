//! PCM buffers — owned signed 16-bit sample storage.

use crate::error::{AudioError, Result};

/// A block of 16-bit PCM samples. Multi-channel buffers are interleaved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PcmBuffer {
    pub samples: Vec<i16>,
    pub channels: u16,
}

impl PcmBuffer {
    pub fn mono(samples: Vec<i16>) -> Self {
        PcmBuffer {
            samples,
            channels: 1,
        }
    }

    /// Wrap already interleaved L,R,L,R… samples.
    pub fn stereo_interleaved(samples: Vec<i16>) -> Self {
        PcmBuffer {
            samples,
            channels: 2,
        }
    }

    /// A mono buffer of `frames` zero samples.
    pub fn silence(frames: usize) -> Self {
        PcmBuffer::mono(vec![0; frames])
    }

    /// Total sample count across all channels.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        match self.channels {
            0 => 0,
            ch => self.samples.len() / ch as usize,
        }
    }

    pub fn byte_len(&self) -> usize {
        self.samples.len() * 2
    }

    /// Serialize as signed 16-bit little-endian bytes.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        for &sample in &self.samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        bytes
    }

    /// Read signed 16-bit little-endian bytes. A dangling odd byte is dropped.
    pub fn from_le_bytes(bytes: &[u8], channels: u16) -> Self {
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        PcmBuffer { samples, channels }
    }

    /// Copy into a zero-filled buffer of `len` samples. Never truncates.
    pub fn padded_to(&self, len: usize) -> Self {
        let mut samples = vec![0; len.max(self.samples.len())];
        samples[..self.samples.len()].copy_from_slice(&self.samples);
        PcmBuffer {
            samples,
            channels: self.channels,
        }
    }

    /// Extract one channel of an interleaved buffer as mono.
    pub fn channel(&self, index: u16) -> Result<PcmBuffer> {
        if index >= self.channels {
            return Err(AudioError::invalid(
                "channel",
                index,
                "index is past the buffer's channel count",
            ));
        }
        let samples = self
            .samples
            .iter()
            .skip(index as usize)
            .step_by(self.channels as usize)
            .copied()
            .collect();
        Ok(PcmBuffer::mono(samples))
    }
}

/// Number of samples covering `duration_seconds` at `sample_rate`.
///
/// Fractional samples are dropped. Zero and negative durations give an
/// empty buffer; NaN and infinities are rejected.
pub fn sample_count(duration_seconds: f64, sample_rate: u32) -> Result<usize> {
    if !duration_seconds.is_finite() {
        return Err(AudioError::invalid(
            "durationSeconds",
            duration_seconds,
            "must be a finite number",
        ));
    }
    if duration_seconds <= 0.0 {
        return Ok(0);
    }
    Ok((duration_seconds * sample_rate as f64).floor() as usize)
}
