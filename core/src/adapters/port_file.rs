//! Port file publishing.
//!
//! The sharing backend builds its advertised frontend URL from a text file
//! holding only the dev server port. The launcher writes that file once the
//! port is known and removes it when the dev server exits.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// A text file containing a single port number.
#[derive(Debug, Clone)]
pub struct PortFile {
    path: PathBuf,
}

impl PortFile {
    /// Create a handle for the file at `path`. Nothing is written yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the port file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `port`, replacing any previous content.
    ///
    /// Writes to a temp file then renames, so readers never see a partial number.
    pub async fn write(&self, port: u16) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).await?;
            }
        }

        let temp_path = self.path.with_extension("tmp");

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(port.to_string().as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }

    /// Read the published port, if the file exists.
    pub async fn read(&self) -> Result<Option<u16>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => content
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| Error::Config(format!("Invalid port file {}: {}", self.path.display(), e))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Delete the file. A missing file is not an error.
    pub async fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}
