//! Lazy screenshot handle.
//!
//! The store never decodes pixels. It hands out a descriptor (archive path,
//! member name, mtime) that rendering code resolves on demand; the mtime lets a
//! texture cache key on (path, member, mtime) and drop stale images.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::archive::{ArchiveReader, ScreenshotFormat};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScreenshotRef {
    pub archive: PathBuf,
    pub member: String,
    pub mtime: SystemTime,
}

impl ScreenshotRef {
    pub fn new(archive: &Path, member: &str, mtime: SystemTime) -> Self {
        Self {
            archive: archive.to_path_buf(),
            member: member.to_string(),
            mtime,
        }
    }

    pub fn format(&self) -> Option<ScreenshotFormat> {
        ScreenshotFormat::from_member(&self.member)
    }

    /// Encoded image bytes. Fails if the archive was replaced by one without
    /// this member since the handle was created.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        let archive = ArchiveReader::open(&self.archive)?;
        archive.read(&self.member)?.ok_or_else(|| {
            anyhow!(
                "screenshot member '{}' vanished from {}",
                self.member,
                self.archive.display()
            )
        })
    }
}
