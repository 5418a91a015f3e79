//! DSP Engine — procedural audio synthesis, mixing, and WAV packaging.
//!
//! Everything here is synchronous and allocation-per-call. Long renders
//! (tens of minutes at 16 kHz) should be moved off latency-sensitive
//! threads by the caller.

pub mod engine;
pub mod gain;
pub mod interleave;
pub mod mixer;
pub mod oscillator;
pub mod pcm;
pub mod wav;
