//! Request-scoped temporary audio file.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Decoded audio bytes written to a uniquely named `.mp3` file under the
/// OS temp directory.
///
/// The file is removed when the guard drops, so it cannot outlive the
/// request that created it no matter how the handler exits.
pub struct TempAudio {
    path: PathBuf,
}

impl TempAudio {
    /// Writes `bytes` to a fresh temp file.
    ///
    /// The name carries the process id and a UUID, so files from
    /// concurrent requests and from other server processes sharing the
    /// temp dir never collide.
    pub fn create(bytes: &[u8]) -> io::Result<Self> {
        let path = std::env::temp_dir().join(format!(
            "voiceguard-{}-{}.mp3",
            std::process::id(),
            Uuid::new_v4()
        ));
        std::fs::write(&path, bytes)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempAudio {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!("failed to remove temp file {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_writes_bytes() {
        let temp = TempAudio::create(b"abc123").unwrap();
        assert_eq!(std::fs::read(temp.path()).unwrap(), b"abc123");
        assert_eq!(temp.path().extension().unwrap(), "mp3");
    }

    #[test]
    fn test_drop_removes_file() {
        let path = {
            let temp = TempAudio::create(b"payload").unwrap();
            temp.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_unique_names() {
        let a = TempAudio::create(b"x").unwrap();
        let b = TempAudio::create(b"x").unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_name_is_scoped_to_this_process() {
        let temp = TempAudio::create(b"x").unwrap();
        let name = temp.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(&format!("voiceguard-{}-", std::process::id())));
    }
}
