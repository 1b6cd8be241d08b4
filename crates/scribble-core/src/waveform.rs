//! Voice memo waveform downsampling.
//!
//! The recorder view draws a fixed number of bars for a memo of any length.
//! [`downsample`] reduces PCM16 samples to one normalized peak per bar.

use std::path::Path;

use serde::Serialize;

use crate::{Error, Result};

const FULL_SCALE: f32 = 32_768.0;

/// Decoded mono PCM16 audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMemoSamples {
    /// Samples of the first channel.
    pub samples: Vec<i16>,
    /// PCM sample rate in Hz.
    pub sample_rate_hz: u32,
}

impl VoiceMemoSamples {
    /// Duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate_hz == 0 {
            return 0;
        }
        let duration_ms = (self.samples.len() as u128)
            .saturating_mul(1_000)
            .saturating_div(u128::from(self.sample_rate_hz));
        u64::try_from(duration_ms).unwrap_or(u64::MAX)
    }
}

/// Waveform bars ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waveform {
    pub duration_ms: u64,
    pub bars: Vec<f32>,
}

/// Reduce `samples` to at most `bars` peak amplitudes in `0.0..=1.0`.
///
/// Samples are split into `bars` contiguous buckets of near-equal size and
/// each bucket contributes its absolute peak. With fewer samples than bars,
/// each sample becomes its own bar.
pub fn downsample(samples: &[i16], bars: usize) -> Result<Vec<f32>> {
    if bars == 0 {
        return Err(Error::InvalidInput(
            "Waveform bar count must be greater than zero".to_string(),
        ));
    }
    if samples.len() <= bars {
        return Ok(samples.iter().map(|&sample| normalize(sample)).collect());
    }

    let len = samples.len();
    Ok((0..bars)
        .map(|bar| {
            let start = bar * len / bars;
            let end = (bar + 1) * len / bars;
            samples[start..end]
                .iter()
                .map(|sample| sample.unsigned_abs())
                .max()
                .map_or(0.0, |peak| f32::from(peak) / FULL_SCALE)
        })
        .collect())
}

/// Read the first channel of a 16-bit integer WAV file.
pub fn read_wav_samples(path: &Path) -> Result<VoiceMemoSamples> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(Error::InvalidInput(format!(
            "Unsupported WAV format: {} bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let channels = usize::from(spec.channels.max(1));
    let samples = reader
        .samples::<i16>()
        .step_by(channels)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    tracing::debug!(
        samples = samples.len(),
        sample_rate_hz = spec.sample_rate,
        "Decoded voice memo"
    );

    Ok(VoiceMemoSamples {
        samples,
        sample_rate_hz: spec.sample_rate,
    })
}

/// Decode a WAV file and downsample it to `bars` bars.
pub fn waveform_from_wav(path: &Path, bars: usize) -> Result<Waveform> {
    let memo = read_wav_samples(path)?;
    Ok(Waveform {
        duration_ms: memo.duration_ms(),
        bars: downsample(&memo.samples, bars)?,
    })
}

fn normalize(sample: i16) -> f32 {
    f32::from(sample.unsigned_abs()) / FULL_SCALE
}
