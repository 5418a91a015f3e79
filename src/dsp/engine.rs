//! Audio Engine — renders binaural beats and subliminal tracks to WAV.
//!
//! Each engine owns its configuration; renders allocate their own buffers,
//! so one engine can be shared across threads without locking.

use serde::{Deserialize, Serialize};

use super::interleave::interleave;
use super::mixer::mix;
use super::oscillator::{NoiseSource, sine_wave, white_noise};
use super::pcm::{PcmBuffer, sample_count};
use super::wav::{encode_pcm, payload_fits};
use crate::config::EngineConfig;
use crate::error::{AudioError, Result};

/// Carrier tone that stands in for the affirmation text.
pub const SUBLIMINAL_CARRIER_HZ: f64 = 8000.0;
/// Low drone used by the `ambient-tone` masking option.
pub const AMBIENT_TONE_HZ: f64 = 40.0;

pub const DEFAULT_BINAURAL_VOLUME_DBFS: f64 = -6.0;
pub const DEFAULT_SUBLIMINAL_VOLUME_DBFS: f64 = -30.0;
pub const DEFAULT_MASKING_VOLUME_DBFS: f64 = -10.0;

fn default_binaural_volume() -> f64 {
    DEFAULT_BINAURAL_VOLUME_DBFS
}

fn default_subliminal_volume() -> f64 {
    DEFAULT_SUBLIMINAL_VOLUME_DBFS
}

fn default_masking_volume() -> f64 {
    DEFAULT_MASKING_VOLUME_DBFS
}

/// Parameters for a binaural beat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinauralBeatRequest {
    /// Left ear frequency in Hz.
    pub carrier_frequency: f64,
    /// Offset added for the right ear, in Hz.
    pub beat_frequency: f64,
    pub duration_minutes: f64,
    #[serde(default = "default_binaural_volume")]
    pub volume_dbfs: f64,
}

impl BinauralBeatRequest {
    pub fn new(carrier_frequency: f64, beat_frequency: f64, duration_minutes: f64) -> Self {
        BinauralBeatRequest {
            carrier_frequency,
            beat_frequency,
            duration_minutes,
            volume_dbfs: DEFAULT_BINAURAL_VOLUME_DBFS,
        }
    }
}

/// What sits underneath the subliminal carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskingType {
    AmbientTone,
    #[default]
    #[serde(other)]
    WhiteNoise,
}

impl MaskingType {
    /// Lenient parse: anything unrecognized falls back to white noise.
    pub fn parse(name: &str) -> Self {
        match name {
            "ambient-tone" => MaskingType::AmbientTone,
            _ => MaskingType::WhiteNoise,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaskingType::WhiteNoise => "white-noise",
            MaskingType::AmbientTone => "ambient-tone",
        }
    }
}

/// Parameters for a subliminal track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubliminalRequest {
    /// Accepted for the record; only a fixed carrier tone is rendered.
    pub affirmation_text: String,
    #[serde(default)]
    pub masking_type: MaskingType,
    pub duration_minutes: f64,
    #[serde(default = "default_subliminal_volume")]
    pub subliminal_volume_dbfs: f64,
    #[serde(default = "default_masking_volume")]
    pub masking_volume_dbfs: f64,
}

impl SubliminalRequest {
    pub fn new(
        affirmation_text: impl Into<String>,
        masking_type: MaskingType,
        duration_minutes: f64,
    ) -> Self {
        SubliminalRequest {
            affirmation_text: affirmation_text.into(),
            masking_type,
            duration_minutes,
            subliminal_volume_dbfs: DEFAULT_SUBLIMINAL_VOLUME_DBFS,
            masking_volume_dbfs: DEFAULT_MASKING_VOLUME_DBFS,
        }
    }
}

/// Either recipe, tagged by `kind` for JSON callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AudioRequest {
    Binaural(BinauralBeatRequest),
    Subliminal(SubliminalRequest),
}

impl AudioRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Stateless renderer bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct AudioEngine {
    config: EngineConfig,
}

impl AudioEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(AudioEngine { config })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render whichever recipe the request names.
    pub fn render(&self, request: &AudioRequest) -> Result<Vec<u8>> {
        match request {
            AudioRequest::Binaural(req) => self.generate_binaural_beat(req),
            AudioRequest::Subliminal(req) => self.generate_subliminal_audio(req),
        }
    }

    /// Stereo WAV: carrier in the left ear, carrier + beat in the right.
    pub fn generate_binaural_beat(&self, req: &BinauralBeatRequest) -> Result<Vec<u8>> {
        let duration_seconds = duration_seconds(req.duration_minutes)?;
        let rate = self.config.sample_rate;
        self.ensure_fits_wav(req.duration_minutes, duration_seconds, 2)?;

        let right_frequency = req.carrier_frequency + req.beat_frequency;
        let left = sine_wave(req.carrier_frequency, duration_seconds, rate)?;
        let right = sine_wave(right_frequency, duration_seconds, rate)?;
        let stereo = interleave(&left, &right, req.volume_dbfs)?;
        let wav = encode_pcm(&stereo, rate);

        tracing::info!(
            carrier_hz = req.carrier_frequency,
            beat_hz = req.beat_frequency,
            duration_seconds,
            sample_rate = rate,
            bytes = wav.len(),
            "rendered binaural beat"
        );
        Ok(wav)
    }

    /// Mono WAV: a fixed high carrier mixed under a masking sound.
    ///
    /// The affirmation text does not reach the signal; speech, if wanted,
    /// belongs to a separate text-to-speech step.
    pub fn generate_subliminal_audio(&self, req: &SubliminalRequest) -> Result<Vec<u8>> {
        let duration_seconds = duration_seconds(req.duration_minutes)?;
        let rate = self.config.sample_rate;
        self.ensure_fits_wav(req.duration_minutes, duration_seconds, 1)?;

        let masking = self.masking(req.masking_type, duration_seconds)?;
        let carrier = sine_wave(SUBLIMINAL_CARRIER_HZ, duration_seconds, rate)?;

        let len = masking.len().max(carrier.len());
        let mixed = mix(
            &carrier.padded_to(len),
            &masking.padded_to(len),
            req.subliminal_volume_dbfs,
            req.masking_volume_dbfs,
        )?;
        let wav = encode_pcm(&mixed, rate);

        tracing::info!(
            masking = req.masking_type.as_str(),
            affirmation_chars = req.affirmation_text.chars().count(),
            duration_seconds,
            sample_rate = rate,
            bytes = wav.len(),
            "rendered subliminal audio"
        );
        Ok(wav)
    }

    /// Only white noise touches the random source.
    fn masking(&self, masking_type: MaskingType, duration_seconds: f64) -> Result<PcmBuffer> {
        let rate = self.config.sample_rate;
        match masking_type {
            MaskingType::WhiteNoise => {
                let mut noise = match self.config.noise_seed {
                    Some(seed) => NoiseSource::seeded(seed),
                    None => NoiseSource::entropy(),
                };
                white_noise(duration_seconds, rate, &mut noise)
            }
            MaskingType::AmbientTone => sine_wave(AMBIENT_TONE_HZ, duration_seconds, rate),
        }
    }

    /// Reject renders whose payload would overflow the WAV size fields.
    fn ensure_fits_wav(
        &self,
        duration_minutes: f64,
        duration_seconds: f64,
        channels: u16,
    ) -> Result<()> {
        let frames = sample_count(duration_seconds, self.config.sample_rate)?;
        if !payload_fits(frames, channels) {
            return Err(AudioError::invalid(
                "durationMinutes",
                duration_minutes,
                "output would exceed the 4 GiB WAV size limit",
            ));
        }
        Ok(())
    }
}

fn duration_seconds(duration_minutes: f64) -> Result<f64> {
    if !duration_minutes.is_finite() {
        return Err(AudioError::invalid(
            "durationMinutes",
            duration_minutes,
            "must be a finite number",
        ));
    }
    if duration_minutes < 0.0 {
        return Err(AudioError::invalid(
            "durationMinutes",
            duration_minutes,
            "must not be negative",
        ));
    }
    Ok(duration_minutes * 60.0)
}
