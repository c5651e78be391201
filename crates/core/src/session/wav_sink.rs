use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write wav {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
}

/// Write a batch of samples as a 32-bit float mono PCM wave file.
///
/// Parent directories are created as needed; an existing file at `path` is
/// overwritten. The artifact is for debugging/archival and never affects
/// transcript correctness.
pub fn persist_batch(samples: &[f32], path: &Path, sample_rate: u32) -> Result<(), PersistError> {
    if let Some(folder) = path.parent() {
        if !folder.as_os_str().is_empty() && !folder.exists() {
            fs::create_dir_all(folder).map_err(|e| PersistError::CreateDir {
                path: folder.to_path_buf(),
                source: e,
            })?;
        }
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let write = || -> Result<(), hound::Error> {
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()
    };
    write().map_err(|e| PersistError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    log::info!("Saved batch to {}", path.display());
    Ok(())
}

/// Delete the parent directory of `path` recursively, if it exists.
///
/// Never returns an error: failures only degrade the cleanliness of the temp
/// area, so they are logged as warnings and execution continues.
pub fn cleanup_session(path: &Path) {
    let folder = match path.parent() {
        Some(folder) if !folder.as_os_str().is_empty() => folder,
        _ => {
            log::info!("Temporary folder for {} does not exist", path.display());
            return;
        }
    };

    if !folder.exists() {
        log::info!("Temporary folder '{}' does not exist", folder.display());
        return;
    }

    match fs::remove_dir_all(folder) {
        Ok(()) => log::info!("Temporary folder '{}' deleted successfully", folder.display()),
        Err(e) => log::warn!("Error deleting temporary folder '{}': {e}", folder.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_persist_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("deep").join("batch.wav");
        persist_batch(&[0.0, 0.5, -0.5], &path, 16000).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_persist_writes_readable_wav() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("batch.wav");
        let samples = vec![0.0f32, 0.25, -0.25, 1.0];
        persist_batch(&samples, &path, 16000).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 16000);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_format, hound::SampleFormat::Float);
        let read: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(read, samples);
    }

    #[test]
    fn test_persist_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("batch.wav");
        persist_batch(&[0.1f32; 100], &path, 16000).unwrap();
        persist_batch(&[0.2f32; 10], &path, 16000).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 10);
    }

    #[test]
    fn test_persist_respects_sample_rate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("batch.wav");
        persist_batch(&[0.0f32; 8], &path, 44100).unwrap();
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 44100);
    }

    #[test]
    fn test_cleanup_removes_parent_dir() {
        let tmp = TempDir::new().unwrap();
        let session_dir = tmp.path().join("session");
        let path = session_dir.join("batch.wav");
        persist_batch(&[0.0f32; 4], &path, 16000).unwrap();
        assert!(session_dir.exists());

        cleanup_session(&path);
        assert!(!session_dir.exists());
    }

    #[test]
    fn test_cleanup_missing_dir_is_silent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("never-created").join("batch.wav");
        // Must not panic or error
        cleanup_session(&path);
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session").join("batch.wav");
        persist_batch(&[0.0f32; 4], &path, 16000).unwrap();
        cleanup_session(&path);
        cleanup_session(&path);
    }
}
