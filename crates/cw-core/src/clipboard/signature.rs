//! Content signature
//!
//! A [`ContentSignature`] fingerprints the *shape* of a [`ClipboardContent`]
//! plus a bounded prefix of each payload. Hashing only a prefix keeps the
//! per-tick cost constant even when the clipboard holds megabytes of text.
//!
//! Layout fed to the hasher, in this fixed order:
//!
//! ```text
//! text | html | rich_text | image flag | file count | first N file entries
//! ```
//!
//! Each optional string field contributes `tag, present, byte length,
//! first SIGNATURE_PREFIX_LEN chars`. Two records that only differ after the
//! prefix (and have equal lengths) produce the same signature. This is an
//! accepted approximation: suppression is best-effort, not a guarantee.
use std::fmt;

use crate::clipboard::ClipboardContent;

/// Number of characters of each payload field that participate in the signature.
pub const SIGNATURE_PREFIX_LEN: usize = 64;

/// Number of leading file entries that participate in the signature.
const SIGNATURE_FILE_ENTRIES: usize = 4;

const TAG_TEXT: u8 = 0x01;
const TAG_HTML: u8 = 0x02;
const TAG_RICH_TEXT: u8 = 0x03;
const TAG_IMAGE: u8 = 0x04;
const TAG_FILE_COUNT: u8 = 0x05;
const TAG_FILE_ENTRY: u8 = 0x06;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentSignature([u8; 32]);

impl ContentSignature {
    pub fn of(content: &ClipboardContent) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"content-signature-v1|");

        feed_field(&mut hasher, TAG_TEXT, content.text.as_deref());
        feed_field(&mut hasher, TAG_HTML, content.html.as_deref());
        feed_field(&mut hasher, TAG_RICH_TEXT, content.rich_text.as_deref());

        hasher.update(&[TAG_IMAGE, u8::from(content.has_image)]);

        // `None` and `Some(vec![])` are distinct shapes.
        match &content.files {
            None => {
                hasher.update(&[TAG_FILE_COUNT, 0]);
            }
            Some(files) => {
                hasher.update(&[TAG_FILE_COUNT, 1]);
                hasher.update(&(files.len() as u64).to_le_bytes());
                for file in files.iter().take(SIGNATURE_FILE_ENTRIES) {
                    feed_field(&mut hasher, TAG_FILE_ENTRY, Some(file));
                }
            }
        }

        Self(*hasher.finalize().as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

fn feed_field(hasher: &mut blake3::Hasher, tag: u8, value: Option<&str>) {
    match value {
        None => {
            hasher.update(&[tag, 0]);
        }
        Some(value) => {
            hasher.update(&[tag, 1]);
            hasher.update(&(value.len() as u64).to_le_bytes());
            let prefix_end = value
                .char_indices()
                .nth(SIGNATURE_PREFIX_LEN)
                .map_or(value.len(), |(idx, _)| idx);
            hasher.update(value[..prefix_end].as_bytes());
        }
    }
}

impl fmt::Debug for ContentSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentSignature({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ContentSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_does_not_participate() {
        let a = ClipboardContent::empty(1).with_text("hello");
        let b = ClipboardContent::empty(999).with_text("hello");
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn different_text_differs() {
        let a = ClipboardContent::empty(0).with_text("a");
        let b = ClipboardContent::empty(0).with_text("b");
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn same_text_in_different_field_differs() {
        let text = ClipboardContent::empty(0).with_text("x");
        let html = ClipboardContent::empty(0).with_html("x");
        assert_ne!(text.signature(), html.signature());
    }

    #[test]
    fn difference_beyond_prefix_is_ignored() {
        let base = "a".repeat(SIGNATURE_PREFIX_LEN);
        let a = ClipboardContent::empty(0).with_text(format!("{base}1"));
        let b = ClipboardContent::empty(0).with_text(format!("{base}2"));
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn length_change_beyond_prefix_is_detected() {
        let base = "a".repeat(SIGNATURE_PREFIX_LEN);
        let a = ClipboardContent::empty(0).with_text(format!("{base}1"));
        let b = ClipboardContent::empty(0).with_text(format!("{base}12"));
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn prefix_respects_char_boundaries() {
        let long = "é".repeat(SIGNATURE_PREFIX_LEN * 2);
        let content = ClipboardContent::empty(0).with_text(long);
        // must not panic on a multi-byte boundary
        let _ = content.signature();
    }

    #[test]
    fn image_flag_and_file_order_matter() {
        let plain = ClipboardContent::empty(0);
        assert_ne!(plain.signature(), plain.clone().with_image(true).signature());

        let ab = ClipboardContent::empty(0).with_files(["/a", "/b"]);
        let ba = ClipboardContent::empty(0).with_files(["/b", "/a"]);
        assert_ne!(ab.signature(), ba.signature());
    }

    #[test]
    fn empty_file_list_differs_from_absent() {
        let none = ClipboardContent::empty(0);
        let empty = ClipboardContent::empty(0).with_files(Vec::<String>::new());
        assert_ne!(none.signature(), empty.signature());
    }

    #[test]
    fn hex_is_64_chars() {
        let sig = ClipboardContent::text("z").signature();
        assert_eq!(sig.to_hex().len(), 64);
        assert_eq!(sig.to_string(), sig.to_hex());
    }
}
