use crate::clipboard::MimeType;
use serde::{Deserialize, Serialize};

/// Raw snapshot captured from a system clipboard, before normalization.
///
/// Platform readers produce one representation per format they managed to
/// read. Formats that could not be read are simply missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemClipboardSnapshot {
    pub ts_ms: i64,
    pub representations: Vec<ObservedClipboardRepresentation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedClipboardRepresentation {
    pub format_id: String,
    pub mime: Option<MimeType>,
    pub bytes: Vec<u8>,
}

impl ObservedClipboardRepresentation {
    pub fn new(format_id: impl Into<String>, mime: Option<MimeType>, bytes: Vec<u8>) -> Self {
        Self {
            format_id: format_id.into(),
            mime,
            bytes,
        }
    }

    pub fn size_bytes(&self) -> i64 {
        self.bytes.len() as i64
    }
}

impl SystemClipboardSnapshot {
    pub fn new(ts_ms: i64) -> Self {
        Self {
            ts_ms,
            representations: Vec::new(),
        }
    }

    /// Empty snapshot stamped with the current wall-clock time.
    pub fn empty_now() -> Self {
        Self::new(chrono::Utc::now().timestamp_millis())
    }

    /// Total byte size of all representations in this snapshot.
    pub fn total_size_bytes(&self) -> i64 {
        self.representations.iter().map(|r| r.size_bytes()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.representations.is_empty()
    }

    pub fn representation_count(&self) -> usize {
        self.representations.len()
    }

    pub fn with_representation(mut self, rep: ObservedClipboardRepresentation) -> Self {
        self.representations.push(rep);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_representation(ObservedClipboardRepresentation::new(
            "text",
            Some(MimeType::text_plain()),
            text.into().into_bytes(),
        ))
    }

    pub fn with_html(self, html: impl Into<String>) -> Self {
        self.with_representation(ObservedClipboardRepresentation::new(
            "html",
            Some(MimeType::text_html()),
            html.into().into_bytes(),
        ))
    }

    pub fn with_rtf(self, rtf: impl Into<String>) -> Self {
        self.with_representation(ObservedClipboardRepresentation::new(
            "rtf",
            Some(MimeType::text_rtf()),
            rtf.into().into_bytes(),
        ))
    }

    pub fn with_files<I, S>(self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = files
            .into_iter()
            .map(|f| f.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        self.with_representation(ObservedClipboardRepresentation::new(
            "files",
            Some(MimeType::uri_list()),
            joined.into_bytes(),
        ))
    }

    /// Marks image data as present. Bytes may be empty when the reader only
    /// probed for availability.
    pub fn with_image(self, bytes: Vec<u8>) -> Self {
        self.with_representation(ObservedClipboardRepresentation::new(
            "image",
            Some(MimeType::image_png()),
            bytes,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_append_in_order() {
        let snapshot = SystemClipboardSnapshot::new(7)
            .with_text("hi")
            .with_html("<b>hi</b>")
            .with_files(["/a", "/b"]);

        assert_eq!(snapshot.representation_count(), 3);
        assert_eq!(snapshot.representations[0].format_id, "text");
        assert_eq!(snapshot.representations[2].bytes, b"/a\n/b".to_vec());
        assert_eq!(snapshot.total_size_bytes(), 2 + 9 + 5);
    }

    #[test]
    fn empty_now_has_no_representations() {
        let snapshot = SystemClipboardSnapshot::empty_now();
        assert!(snapshot.is_empty());
        assert!(snapshot.ts_ms > 0);
    }
}
