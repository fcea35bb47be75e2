use std::{fs, io::ErrorKind, path::Path};

use anyhow::Context as _;

/// Reads the stored high score.
///
/// A missing file reads as 0; a present but unparsable file is an error
/// rather than a silent reset.
pub fn load_high_score(path: &Path) -> anyhow::Result<u64> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    text.trim()
        .parse()
        .with_context(|| format!("invalid high score in {}", path.display()))
}

/// Writes the high score as plain decimal text.
pub fn save_high_score(path: &Path, score: u64) -> anyhow::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    fs::write(path, format!("{score}\n"))
        .with_context(|| format!("failed to write {}", path.display()))
}
