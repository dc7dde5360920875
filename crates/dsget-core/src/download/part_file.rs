//! Temp `.part` file that becomes the final file only on success.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const PART_SUFFIX: &str = ".part";

/// Open `<final>.part` for writing. Dropping without [`PartFile::finalize`] deletes it.
pub(crate) struct PartFile {
    file: Option<File>,
    temp_path: PathBuf,
    written: u64,
    renamed: bool,
}

impl PartFile {
    /// Creates (truncating) the temp file next to `final_path`.
    pub(crate) fn create(final_path: &Path) -> io::Result<Self> {
        let mut name = final_path.as_os_str().to_os_string();
        name.push(PART_SUFFIX);
        let temp_path = PathBuf::from(name);
        let file = File::create(&temp_path)?;
        Ok(Self {
            file: Some(file),
            temp_path,
            written: 0,
            renamed: false,
        })
    }

    /// Appends one chunk.
    pub(crate) fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "part file already closed"))?;
        file.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    pub(crate) fn written(&self) -> u64 {
        self.written
    }

    /// Flushes, closes and renames over `final_path`, replacing any existing file.
    pub(crate) fn finalize(mut self, final_path: &Path) -> io::Result<u64> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        std::fs::rename(&self.temp_path, final_path)?;
        self.renamed = true;
        Ok(self.written)
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        drop(self.file.take());
        if !self.renamed {
            if let Err(e) = std::fs::remove_file(&self.temp_path) {
                tracing::warn!("could not remove {}: {}", self.temp_path.display(), e);
            }
        }
    }
}
