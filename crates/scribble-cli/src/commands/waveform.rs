use std::path::Path;

use scribble_core::waveform::waveform_from_wav;

use crate::error::CliError;

const BAR_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn run_waveform(path: &Path, bars: usize, json: bool) -> Result<(), CliError> {
    let waveform = waveform_from_wav(path, bars)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&waveform)?);
    } else {
        println!("{}", render_bars(&waveform.bars));
        println!("{}ms", waveform.duration_ms);
    }

    Ok(())
}

/// Draw normalized peaks as block characters.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render_bars(bars: &[f32]) -> String {
    let top = (BAR_LEVELS.len() - 1) as f32;
    bars.iter()
        .map(|peak| {
            let level = (peak.clamp(0.0, 1.0) * top).round() as usize;
            BAR_LEVELS[level.min(BAR_LEVELS.len() - 1)]
        })
        .collect()
}
