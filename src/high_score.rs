/// Best-score persistence: a single decimal number in a plain file.
use std::fs;
use std::io;
use std::path::Path;

/// Read the saved best score.  A missing or garbled file counts as 0.
pub fn load(path: &Path) -> u32 {
    match fs::read_to_string(path) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable high score");
            0
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no saved high score");
            0
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "cannot read high score");
            0
        }
    }
}

pub fn save(path: &Path, score: u32) -> io::Result<()> {
    fs::write(path, score.to_string())?;
    tracing::info!(path = %path.display(), score, "saved high score");
    Ok(())
}
