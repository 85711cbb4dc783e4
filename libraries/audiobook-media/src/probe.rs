/// Playing time of audio files using lofty
use crate::error::{MediaError, Result};
use lofty::AudioFile;
use std::path::Path;

/// Read the playing time of an audio file, rounded to whole seconds
pub fn probe_duration(path: &Path) -> Result<u32> {
    if !path.exists() {
        return Err(MediaError::FileNotFound(path.display().to_string()));
    }

    let tagged_file = lofty::read_from_path(path)?;
    let duration = tagged_file.properties().duration();

    Ok(duration.as_secs_f64().round() as u32)
}
