pub mod config;
pub mod dsp;
pub mod error;

use wasm_bindgen::prelude::*;

pub use crate::config::EngineConfig;
pub use crate::dsp::engine::{
    AudioEngine, AudioRequest, BinauralBeatRequest, MaskingType, SubliminalRequest,
};
pub use crate::dsp::pcm::PcmBuffer;
pub use crate::error::{AudioError, Result};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the dreamscape_audio version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

fn to_js(e: AudioError) -> JsValue {
    JsValue::from_str(&format!("{e}"))
}

/// WASM-exposed: render a stereo binaural beat WAV at the default 16 kHz.
#[wasm_bindgen]
pub fn generate_binaural_beat(
    carrier_frequency: f64,
    beat_frequency: f64,
    duration_minutes: f64,
    volume_dbfs: Option<f64>,
) -> std::result::Result<Vec<u8>, JsValue> {
    let mut req =
        BinauralBeatRequest::new(carrier_frequency, beat_frequency, duration_minutes);
    if let Some(volume) = volume_dbfs {
        req.volume_dbfs = volume;
    }
    AudioEngine::default().generate_binaural_beat(&req).map_err(to_js)
}

/// WASM-exposed: render a mono subliminal WAV at the default 16 kHz.
/// Unknown masking types fall back to white noise.
#[wasm_bindgen]
pub fn generate_subliminal_audio(
    affirmation_text: &str,
    masking_type: &str,
    duration_minutes: f64,
    subliminal_volume_dbfs: Option<f64>,
    masking_volume_dbfs: Option<f64>,
) -> std::result::Result<Vec<u8>, JsValue> {
    let mut req = SubliminalRequest::new(
        affirmation_text,
        MaskingType::parse(masking_type),
        duration_minutes,
    );
    if let Some(volume) = subliminal_volume_dbfs {
        req.subliminal_volume_dbfs = volume;
    }
    if let Some(volume) = masking_volume_dbfs {
        req.masking_volume_dbfs = volume;
    }
    AudioEngine::default().generate_subliminal_audio(&req).map_err(to_js)
}

/// WASM-exposed: render a tagged request object, e.g.
/// `{ kind: "binaural", carrierFrequency: 200, beatFrequency: 10, durationMinutes: 5 }`.
/// `config` may override the sample rate or pin the noise seed.
#[wasm_bindgen]
pub fn render_audio_request(
    request: JsValue,
    config: JsValue,
) -> std::result::Result<Vec<u8>, JsValue> {
    let request: AudioRequest = serde_wasm_bindgen::from_value(request)?;
    let config: EngineConfig = if config.is_undefined() || config.is_null() {
        EngineConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    let engine = AudioEngine::new(config).map_err(to_js)?;
    engine.render(&request).map_err(to_js)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::wav::WavHeader;

    #[test]
    fn version_matches_manifest() {
        assert_eq!(core_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn binaural_binding_applies_volume() {
        let quiet = generate_binaural_beat(200.0, 10.0, 0.001, Some(-40.0)).unwrap();
        let loud = generate_binaural_beat(200.0, 10.0, 0.001, None).unwrap();
        assert_eq!(quiet.len(), loud.len());
        let peak = |wav: &[u8]| {
            PcmBuffer::from_le_bytes(&wav[44..], 2)
                .samples
                .iter()
                .map(|&s| (s as i32).abs())
                .max()
                .unwrap_or(0)
        };
        assert!(peak(&quiet[..]) < peak(&loud[..]));
    }

    #[test]
    fn subliminal_binding_is_mono_16k() {
        let wav =
            generate_subliminal_audio("I fly", "ambient-tone", 0.001, None, None).unwrap();
        let header = WavHeader::parse(&wav).unwrap();
        assert_eq!(header.channels, 1);
        assert_eq!(header.sample_rate, 16000);
    }
}
