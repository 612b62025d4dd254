use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

const MAX_NAME_ATTEMPTS: u32 = 100;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {path} is unusable: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("no free file name for {0} in the output directory")]
    NameExhausted(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates `dir` when missing and checks that files can be created in it.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let unusable = |reason: String| PersistError::OutputDir {
        path: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => return Err(unusable("not a directory".to_string())),
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| unusable(e.to_string()))?;
        }
        Err(err) => return Err(unusable(err.to_string())),
    }
    NamedTempFile::new_in(dir).map_err(|e| unusable(e.to_string()))?;
    Ok(())
}

/// Saves exports into one directory.
///
/// Content is staged in a temp file and moved into place, so a reader never
/// sees a partial image. An existing file is never replaced: the name gets a
/// `-1`, `-2`, ... suffix instead.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content)?;
        staged.as_file_mut().sync_all()?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let target = self.dir.join(numbered(filename, attempt));
            match staged.persist_noclobber(&target) {
                Ok(_) => {
                    critic_logging::critic_info!("saved {} bytes to {}", content.len(), target.display());
                    return Ok(target);
                }
                Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => staged = err.file,
                Err(err) => return Err(PersistError::Io(err.error)),
            }
        }
        Err(PersistError::NameExhausted(filename.to_string()))
    }
}

/// `card.png` -> `card-2.png` for attempt 2; attempt 0 keeps the name.
fn numbered(filename: &str, attempt: u32) -> String {
    if attempt == 0 {
        return filename.to_string();
    }
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{attempt}.{ext}"),
        _ => format!("{filename}-{attempt}"),
    }
}

#[cfg(test)]
mod tests {
    use super::numbered;

    #[test]
    fn suffix_goes_before_extension() {
        assert_eq!(numbered("card.png", 0), "card.png");
        assert_eq!(numbered("card.png", 2), "card-2.png");
        assert_eq!(numbered("noext", 1), "noext-1");
        assert_eq!(numbered(".hidden", 1), ".hidden-1");
    }
}
