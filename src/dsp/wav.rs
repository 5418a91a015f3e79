//! WAV encoder — wraps 16-bit PCM in a canonical 44-byte RIFF/WAVE header.

use super::pcm::PcmBuffer;
use crate::error::{AudioError, Result};

pub const HEADER_LEN: usize = 44;
const BITS_PER_SAMPLE: u16 = 16;

/// Largest payload whose RIFF size (`36 + data`) still fits in a u32.
pub const MAX_PAYLOAD_LEN: u64 = u32::MAX as u64 - 36;

/// Whether `frames` of 16-bit audio over `channels` fit in one WAV file.
pub fn payload_fits(frames: usize, channels: u16) -> bool {
    let bytes = (frames as u64)
        .saturating_mul(channels as u64)
        .saturating_mul(BITS_PER_SAMPLE as u64 / 8);
    bytes <= MAX_PAYLOAD_LEN
}

/// Encode raw little-endian PCM bytes as a WAV file.
///
/// Any payload, including an empty or odd-length one, produces a
/// structurally valid header. Payloads past [`MAX_PAYLOAD_LEN`] wrap the
/// size fields; check [`payload_fits`] first.
pub fn encode_wav(payload: &[u8], sample_rate: u32, channels: u16) -> Vec<u8> {
    let bytes_per_sample = BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate
        .wrapping_mul(channels as u32)
        .wrapping_mul(bytes_per_sample as u32);
    let block_align = channels.wrapping_mul(bytes_per_sample);
    let data_size = payload.len() as u32;
    let file_size = 36u32.wrapping_add(data_size);

    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    buf.extend_from_slice(payload);

    buf
}

/// Encode a `PcmBuffer`, taking the channel count from the buffer.
pub fn encode_pcm(pcm: &PcmBuffer, sample_rate: u32) -> Vec<u8> {
    encode_wav(&pcm.to_le_bytes(), sample_rate, pcm.channels)
}

/// Fields of a canonical 44-byte WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff_size: u32,
    pub format_tag: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_len: u32,
}

impl WavHeader {
    /// Read the header this module writes. Other chunk layouts are rejected.
    pub fn parse(wav: &[u8]) -> Result<Self> {
        if wav.len() < HEADER_LEN {
            return Err(AudioError::MalformedWav("shorter than 44-byte header"));
        }
        if &wav[0..4] != b"RIFF" || &wav[8..12] != b"WAVE" {
            return Err(AudioError::MalformedWav("missing RIFF/WAVE tags"));
        }
        if &wav[12..16] != b"fmt " || u32_at(wav, 16) != 16 {
            return Err(AudioError::MalformedWav("expected 16-byte fmt chunk"));
        }
        if &wav[36..40] != b"data" {
            return Err(AudioError::MalformedWav("missing data chunk"));
        }

        Ok(WavHeader {
            riff_size: u32_at(wav, 4),
            format_tag: u16_at(wav, 20),
            channels: u16_at(wav, 22),
            sample_rate: u32_at(wav, 24),
            byte_rate: u32_at(wav, 28),
            block_align: u16_at(wav, 32),
            bits_per_sample: u16_at(wav, 34),
            data_len: u32_at(wav, 40),
        })
    }

    /// Playback length implied by the header, in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.byte_rate == 0 {
            return 0.0;
        }
        self.data_len as f64 / self.byte_rate as f64
    }
}

/// Decode the sample payload of a WAV produced by [`encode_wav`].
pub fn decode_pcm(wav: &[u8]) -> Result<PcmBuffer> {
    let header = WavHeader::parse(wav)?;
    let end = HEADER_LEN + header.data_len as usize;
    if wav.len() < end {
        return Err(AudioError::MalformedWav("data chunk runs past end of buffer"));
    }
    Ok(PcmBuffer::from_le_bytes(&wav[HEADER_LEN..end], header.channels))
}

fn u16_at(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

fn u32_at(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn wav_header_valid() {
        let payload = vec![0u8; 100];
        let wav = encode_wav(&payload, 16000, 1);

        assert_eq!(wav.len(), 44 + 100);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");

        assert_eq!(u32_at(&wav, 4), 36 + 100);
        assert_eq!(u32_at(&wav, 16), 16);
        assert_eq!(u16_at(&wav, 20), 1);
        assert_eq!(u16_at(&wav, 22), 1);
        assert_eq!(u32_at(&wav, 24), 16000);
        assert_eq!(u32_at(&wav, 28), 32000);
        assert_eq!(u16_at(&wav, 32), 2);
        assert_eq!(u16_at(&wav, 34), 16);
        assert_eq!(u32_at(&wav, 40), 100);
    }

    #[test]
    fn stereo_rates() {
        let wav = encode_wav(&[0u8; 8], 44100, 2);
        let header = WavHeader::parse(&wav).unwrap();
        assert_eq!(header.channels, 2);
        assert_eq!(header.byte_rate, 44100 * 4);
        assert_eq!(header.block_align, 4);
    }

    #[test]
    fn empty_payload_is_header_only() {
        let wav = encode_wav(&[], 16000, 1);
        assert_eq!(wav.len(), 44);
        let header = WavHeader::parse(&wav).unwrap();
        assert_eq!(header.data_len, 0);
        assert_eq!(header.riff_size, 36);
    }

    #[test]
    fn zero_rate_and_channels_still_encode() {
        let wav = encode_wav(&[1, 2, 3], 0, 0);
        let header = WavHeader::parse(&wav).unwrap();
        assert_eq!(header.sample_rate, 0);
        assert_eq!(header.byte_rate, 0);
        assert_eq!(header.data_len, 3);
        assert_eq!(header.duration_seconds(), 0.0);
    }

    #[test]
    fn payload_copied_verbatim() {
        let pcm = PcmBuffer::mono(vec![0x0102, -2]);
        let wav = encode_pcm(&pcm, 8000);
        assert_eq!(&wav[44..], &[0x02, 0x01, 0xFE, 0xFF]);
        assert_eq!(decode_pcm(&wav).unwrap(), pcm);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(WavHeader::parse(b"RIFF").is_err());
        let mut wav = encode_wav(&[0; 4], 16000, 1);
        wav[8] = b'X';
        assert!(matches!(WavHeader::parse(&wav), Err(AudioError::MalformedWav(_))));
    }

    #[test]
    fn decode_rejects_truncated_data() {
        let mut wav = encode_wav(&[0; 10], 16000, 1);
        wav.truncate(50);
        assert!(decode_pcm(&wav).is_err());
    }

    #[test]
    fn payload_limit_boundary() {
        use crate::dsp::pcm::sample_count;

        // MAX_PAYLOAD_LEN is odd, so the last whole mono frame ends one byte short
        let last_mono = (MAX_PAYLOAD_LEN / 2) as usize;
        assert!(payload_fits(last_mono, 1));
        assert!(!payload_fits(last_mono + 1, 1));
        assert!(payload_fits(last_mono / 2, 2));
        assert!(!payload_fits(last_mono / 2 + 1, 2));

        // 120 minutes of stereo: fine at 16 kHz, too big at 192 kHz
        let frames = sample_count(7200.0, 16_000).unwrap();
        assert!(payload_fits(frames, 2));
        let frames = sample_count(7200.0, 192_000).unwrap();
        assert!(!payload_fits(frames, 2));
    }

    #[test]
    fn duration_from_header() {
        let pcm = PcmBuffer::silence(16000);
        let header = WavHeader::parse(&encode_pcm(&pcm, 16000)).unwrap();
        assert_eq!(header.duration_seconds(), 1.0);
    }

    #[test]
    fn hound_reads_output() {
        let pcm = PcmBuffer::stereo_interleaved(vec![100, -100, 2000, -2000, 32767, -32768]);
        let wav = encode_pcm(&pcm, 22050);

        let reader = hound::WavReader::new(Cursor::new(wav)).expect("hound rejected header");
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let decoded: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, pcm.samples);
    }
}
