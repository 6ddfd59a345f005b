//! Raw snapshot -> [`ClipboardContent`] normalization.
//!
//! Best-effort and infallible: a representation that cannot be decoded only
//! leaves its field absent. The first usable representation of each kind
//! wins; later duplicates (e.g. `UTF8_STRING` after `text/plain`) are ignored.
use crate::clipboard::{ClipboardContent, ObservedClipboardRepresentation, SystemClipboardSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RepKind {
    PlainText,
    Html,
    RichText,
    FileList,
    Image,
    Unknown,
}

fn classify(rep: &ObservedClipboardRepresentation) -> RepKind {
    if let Some(mime) = &rep.mime {
        let essence = mime.essence();
        match essence.as_str() {
            "text/plain" => return RepKind::PlainText,
            "text/html" => return RepKind::Html,
            "text/rtf" | "application/rtf" => return RepKind::RichText,
            "text/uri-list" | "file/uri-list" => return RepKind::FileList,
            _ if mime.is_image() => return RepKind::Image,
            _ => {}
        }
    }

    // format_id fallback for readers that do not attach a mime
    match rep.format_id.to_ascii_lowercase().as_str() {
        "text" | "utf8_string" | "string" => RepKind::PlainText,
        "html" => RepKind::Html,
        "rtf" => RepKind::RichText,
        "files" => RepKind::FileList,
        "image" => RepKind::Image,
        _ => RepKind::Unknown,
    }
}

fn decode_utf8(rep: &ObservedClipboardRepresentation) -> Option<String> {
    match std::str::from_utf8(&rep.bytes) {
        Ok(text) => Some(text.to_owned()),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                format_id = %rep.format_id,
                size_bytes = rep.bytes.len(),
                error = %_err,
                "Dropping clipboard representation with invalid UTF-8"
            );
            None
        }
    }
}

fn parse_file_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

/// Normalize a raw clipboard snapshot into a [`ClipboardContent`].
pub fn normalize(snapshot: &SystemClipboardSnapshot) -> ClipboardContent {
    let mut content = ClipboardContent::empty(snapshot.ts_ms);

    for rep in &snapshot.representations {
        match classify(rep) {
            RepKind::PlainText if content.text.is_none() => content.text = decode_utf8(rep),
            RepKind::Html if content.html.is_none() => content.html = decode_utf8(rep),
            RepKind::RichText if content.rich_text.is_none() => {
                content.rich_text = decode_utf8(rep)
            }
            RepKind::FileList if content.files.is_none() => {
                content.files = decode_utf8(rep).map(|text| parse_file_list(&text))
            }
            RepKind::Image => content.has_image = true,
            _ => {}
        }
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MimeType;

    #[test]
    fn empty_snapshot_yields_empty_content_with_timestamp() {
        let content = normalize(&SystemClipboardSnapshot::new(1234));
        assert!(content.is_empty());
        assert_eq!(content.ts_ms, 1234);
    }

    #[test]
    fn maps_all_known_kinds() {
        let snapshot = SystemClipboardSnapshot::new(1)
            .with_text("plain")
            .with_html("<p>plain</p>")
            .with_rtf("{\\rtf1 plain}")
            .with_files(["file:///tmp/a.txt", "file:///tmp/b.txt"])
            .with_image(Vec::new());

        let content = normalize(&snapshot);

        assert_eq!(content.text.as_deref(), Some("plain"));
        assert_eq!(content.html.as_deref(), Some("<p>plain</p>"));
        assert_eq!(content.rich_text.as_deref(), Some("{\\rtf1 plain}"));
        assert_eq!(
            content.files,
            Some(vec![
                "file:///tmp/a.txt".to_string(),
                "file:///tmp/b.txt".to_string()
            ])
        );
        assert!(content.has_image);
    }

    #[test]
    fn invalid_utf8_leaves_field_absent_but_keeps_others() {
        let snapshot = SystemClipboardSnapshot::new(1)
            .with_representation(ObservedClipboardRepresentation::new(
                "text",
                Some(MimeType::text_plain()),
                vec![0xff, 0xfe, 0xfd],
            ))
            .with_html("<i>ok</i>");

        let content = normalize(&snapshot);

        assert!(content.text.is_none());
        assert_eq!(content.html.as_deref(), Some("<i>ok</i>"));
    }

    #[test]
    fn first_text_representation_wins() {
        let snapshot = SystemClipboardSnapshot::new(1)
            .with_text("first")
            .with_representation(ObservedClipboardRepresentation::new(
                "UTF8_STRING",
                None,
                b"second".to_vec(),
            ));

        assert_eq!(normalize(&snapshot).text.as_deref(), Some("first"));
    }

    #[test]
    fn uri_list_skips_comments_and_blank_lines() {
        let snapshot = SystemClipboardSnapshot::new(1).with_representation(
            ObservedClipboardRepresentation::new(
                "public.file-url",
                Some(MimeType("text/uri-list".into())),
                b"# comment\r\nfile:///a\r\n\r\nfile:///b\r\n".to_vec(),
            ),
        );

        assert_eq!(
            normalize(&snapshot).files,
            Some(vec!["file:///a".to_string(), "file:///b".to_string()])
        );
    }

    #[test]
    fn unknown_formats_are_ignored() {
        let snapshot = SystemClipboardSnapshot::new(1).with_representation(
            ObservedClipboardRepresentation::new("com.example.private", None, vec![1, 2, 3]),
        );

        assert!(normalize(&snapshot).is_empty());
    }

    #[test]
    fn mime_with_charset_parameter_is_recognized() {
        let snapshot = SystemClipboardSnapshot::new(1).with_representation(
            ObservedClipboardRepresentation::new(
                "public.utf8-plain-text",
                Some(MimeType("text/plain;charset=utf-8".into())),
                b"hello".to_vec(),
            ),
        );

        assert_eq!(normalize(&snapshot).text.as_deref(), Some("hello"));
    }
}
