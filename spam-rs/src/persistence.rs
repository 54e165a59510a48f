//! Detector persistence
//!
//! The fitted state is stored as JSON. Floats are written with enough
//! precision to be read back bit-for-bit.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{Result, SpamError};
use crate::model::{DetectorState, SpamDetector};

/// Serialize a fitted detector's state
pub fn to_writer<W: Write>(detector: &SpamDetector, writer: W) -> Result<()> {
    let state = detector.state().ok_or(SpamError::NotFitted)?;
    serde_json::to_writer(writer, state)?;
    Ok(())
}

/// Rebuild a detector from a serialized state
pub fn from_reader<R: Read>(reader: R) -> Result<SpamDetector> {
    let state: DetectorState = serde_json::from_reader(reader)?;
    SpamDetector::from_state(state)
}

/// Save a fitted detector to `path`.
///
/// The state is written to a temporary file in the target directory and then
/// renamed over `path`, so readers never see a partial file.
pub fn save_to_path(detector: &SpamDetector, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        to_writer(detector, &mut writer)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| SpamError::Io(e.error))?;
    info!("Detector saved to {}", path.display());
    Ok(())
}

/// Load a detector saved with [`save_to_path`]
pub fn load_from_path(path: &Path) -> Result<SpamDetector> {
    let file = File::open(path)?;
    let detector = from_reader(BufReader::new(file))?;
    info!("Detector loaded from {}", path.display());
    Ok(detector)
}
