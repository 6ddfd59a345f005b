//! Normalized clipboard content record
//!
//! [`ClipboardContent`] is the canonical, platform-independent view of one
//! clipboard observation. Every payload field is optional; a record with
//! every field absent and `has_image == false` is the canonical
//! "empty clipboard" value.
//!
//! Structural equality (`PartialEq`) compares full payloads and the capture
//! timestamp. Change detection does **not** use it: two observations of the
//! same clipboard differ in `ts_ms`, and comparing megabyte payloads on every
//! poll tick is wasteful. Duplicate suppression goes through
//! [`ClipboardContent::signature`] instead.
use serde::{Deserialize, Serialize};

use crate::clipboard::ContentSignature;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rich_text: Option<String>,

    /// Paths or URIs, in clipboard order. Representation is platform-defined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,

    #[serde(default)]
    pub has_image: bool,

    /// unix epoch millis
    pub ts_ms: i64,
}

impl ClipboardContent {
    pub fn empty(ts_ms: i64) -> Self {
        Self {
            ts_ms,
            ..Default::default()
        }
    }

    /// Empty record stamped with the current wall-clock time.
    pub fn empty_now() -> Self {
        Self::empty(chrono::Utc::now().timestamp_millis())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::empty_now().with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn with_rich_text(mut self, rtf: impl Into<String>) -> Self {
        self.rich_text = Some(rtf.into());
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = Some(files.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_image(mut self, has_image: bool) -> Self {
        self.has_image = has_image;
        self
    }

    /// True when no payload field is present (timestamp is ignored).
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.html.is_none()
            && self.rich_text.is_none()
            && self.files.is_none()
            && !self.has_image
    }

    pub fn file_count(&self) -> usize {
        self.files.as_ref().map_or(0, Vec::len)
    }

    /// Cheap fingerprint used for duplicate suppression.
    pub fn signature(&self) -> ContentSignature {
        ContentSignature::of(self)
    }
}
