//! In-memory save record and its archive serialization.

use anyhow::{anyhow, Context, Result};
use tar::{Builder, Header};

use crate::consts::{
    MEMBER_EXTRA_INFO, MEMBER_JSON, MEMBER_LOG, MEMBER_SCREENSHOT_PNG, MEMBER_SCREENSHOT_TGA,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenshotFormat {
    Tga,
    Png,
}

impl ScreenshotFormat {
    pub fn member_name(self) -> &'static str {
        match self {
            ScreenshotFormat::Tga => MEMBER_SCREENSHOT_TGA,
            ScreenshotFormat::Png => MEMBER_SCREENSHOT_PNG,
        }
    }

    pub fn from_member(name: &str) -> Option<Self> {
        match name {
            MEMBER_SCREENSHOT_TGA => Some(ScreenshotFormat::Tga),
            MEMBER_SCREENSHOT_PNG => Some(ScreenshotFormat::Png),
            _ => None,
        }
    }
}

/// Encoded screenshot bytes; decoding is the renderer's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotImage {
    pub format: ScreenshotFormat,
    pub bytes: Vec<u8>,
}

/// Everything that goes into one slot archive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveRecord {
    pub log: Vec<u8>,
    pub json: Option<serde_json::Value>,
    pub extra_info: Option<String>,
    pub screenshot: Option<ScreenshotImage>,
}

impl SaveRecord {
    pub fn new(log: impl Into<Vec<u8>>) -> Self {
        Self {
            log: log.into(),
            ..Self::default()
        }
    }

    pub fn with_json(mut self, json: serde_json::Value) -> Self {
        self.json = Some(json);
        self
    }

    pub fn with_extra_info<S: Into<String>>(mut self, text: S) -> Self {
        self.extra_info = Some(text.into());
        self
    }

    pub fn with_screenshot(mut self, format: ScreenshotFormat, bytes: impl Into<Vec<u8>>) -> Self {
        self.screenshot = Some(ScreenshotImage {
            format,
            bytes: bytes.into(),
        });
        self
    }

    /// Serialize into a complete tar archive.
    pub fn to_archive_bytes(&self) -> Result<Vec<u8>> {
        let mut builder = Builder::new(Vec::new());

        append_member(&mut builder, MEMBER_LOG, &self.log)?;

        if let Some(json) = &self.json {
            let bytes = serde_json::to_vec(json).context("serialize json member")?;
            append_member(&mut builder, MEMBER_JSON, &bytes)?;
        }
        if let Some(text) = &self.extra_info {
            append_member(&mut builder, MEMBER_EXTRA_INFO, text.as_bytes())?;
        }
        if let Some(shot) = &self.screenshot {
            append_member(&mut builder, shot.format.member_name(), &shot.bytes)?;
        }

        builder
            .into_inner()
            .map_err(|e| anyhow!("tar finish: {}", e))
    }
}

fn append_member(builder: &mut Builder<Vec<u8>>, name: &str, data: &[u8]) -> Result<()> {
    let mut header = Header::new_gnu();
    header
        .set_path(name)
        .map_err(|e| anyhow!("set path '{}': {}", name, e))?;
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(0);
    header.set_cksum();
    builder
        .append(&header, data)
        .map_err(|e| anyhow!("append '{}': {}", name, e))?;
    Ok(())
}
