//! Read side of slot archives.

use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use tar::Archive;

/// An opened slot archive. Member names are indexed on open; member bytes are
/// extracted on demand from the in-memory copy of the file.
pub struct ArchiveReader {
    path: PathBuf,
    data: Vec<u8>,
    members: Vec<String>,
}

impl ArchiveReader {
    /// Reads the file and validates the tar headers. Missing file or a corrupt
    /// container is an error.
    pub fn open(path: &Path) -> Result<Self> {
        let data =
            std::fs::read(path).with_context(|| format!("open archive {}", path.display()))?;
        Self::from_bytes(path.to_path_buf(), data)
    }

    pub fn from_bytes(path: PathBuf, data: Vec<u8>) -> Result<Self> {
        let mut members = Vec::new();
        {
            let mut archive = Archive::new(&data[..]);
            let entries = archive
                .entries()
                .with_context(|| format!("read archive entries {}", path.display()))?;
            for entry in entries {
                let entry =
                    entry.with_context(|| format!("corrupt archive {}", path.display()))?;
                let name = entry
                    .path()
                    .with_context(|| format!("bad member path in {}", path.display()))?
                    .to_string_lossy()
                    .into_owned();
                members.push(name);
            }
        }
        // пустой файл / нулевой блок — tar без записей, но не архив слота
        if members.is_empty() {
            return Err(anyhow!("empty archive {}", path.display()));
        }
        Ok(Self {
            path,
            data,
            members,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }

    /// Bytes of `member`, or None when the archive has no such member.
    pub fn read(&self, member: &str) -> Result<Option<Vec<u8>>> {
        if !self.contains(member) {
            return Ok(None);
        }
        let mut archive = Archive::new(&self.data[..]);
        for entry in archive.entries()? {
            let mut entry = entry?;
            if entry.path()?.to_string_lossy() != member {
                continue;
            }
            let mut buf = Vec::with_capacity(entry.header().size().unwrap_or(0) as usize);
            entry
                .read_to_end(&mut buf)
                .with_context(|| format!("read member '{}' of {}", member, self.path.display()))?;
            return Ok(Some(buf));
        }
        Ok(None)
    }

    /// Like `read`, but a missing member is an error.
    pub fn read_required(&self, member: &str) -> Result<Vec<u8>> {
        self.read(member)?.ok_or_else(|| {
            anyhow!(
                "member '{}' not found in {}",
                member,
                self.path.display()
            )
        })
    }

    /// First of `candidates` present in the archive.
    pub fn probe<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|c| self.contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{SaveRecord, ScreenshotFormat};

    fn reader_for(rec: &SaveRecord) -> ArchiveReader {
        ArchiveReader::from_bytes(PathBuf::from("mem"), rec.to_archive_bytes().unwrap()).unwrap()
    }

    #[test]
    fn reads_members_and_misses() {
        let r = reader_for(&SaveRecord::new(b"LOG".to_vec()).with_extra_info("name"));
        assert_eq!(r.read("log").unwrap().as_deref(), Some(&b"LOG"[..]));
        assert_eq!(r.read("extra_info").unwrap().as_deref(), Some(&b"name"[..]));
        assert!(r.read("json").unwrap().is_none());
        assert!(r.read_required("json").is_err());
    }

    #[test]
    fn probe_prefers_first_candidate() {
        let r = reader_for(
            &SaveRecord::new(vec![]).with_screenshot(ScreenshotFormat::Png, vec![1]),
        );
        assert_eq!(
            r.probe(&["screenshot.tga", "screenshot.png"]),
            Some("screenshot.png")
        );
        assert_eq!(r.probe(&["screenshot.tga"]), None);
    }

    #[test]
    fn garbage_is_rejected() {
        let junk = vec![0xABu8; 1024];
        assert!(ArchiveReader::from_bytes(PathBuf::from("junk"), junk).is_err());
    }

    #[test]
    fn empty_and_zero_block_are_rejected() {
        assert!(ArchiveReader::from_bytes(PathBuf::from("empty"), Vec::new()).is_err());
        assert!(ArchiveReader::from_bytes(PathBuf::from("zeros"), vec![0u8; 1024]).is_err());
    }

    #[test]
    fn missing_file_is_error() {
        let p = std::env::temp_dir().join("slotstore-definitely-missing-archive.save");
        assert!(ArchiveReader::open(&p).is_err());
    }
}
