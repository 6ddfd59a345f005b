use cw_core::{normalize, ClipboardContent, MimeType, ObservedClipboardRepresentation, SystemClipboardSnapshot};

fn snapshot() -> SystemClipboardSnapshot {
    SystemClipboardSnapshot::new(1_700_000_000_000)
}

#[test]
fn test_rich_copy_normalizes_every_field() {
    let raw = snapshot()
        .with_text("hello")
        .with_html("<b>hello</b>")
        .with_rtf("{\\rtf1 hello}")
        .with_files(["/tmp/a.txt", "/tmp/b.txt"])
        .with_image(vec![0x89, b'P', b'N', b'G']);

    let content = normalize(&raw);

    assert_eq!(content.text.as_deref(), Some("hello"));
    assert_eq!(content.html.as_deref(), Some("<b>hello</b>"));
    assert_eq!(content.rich_text.as_deref(), Some("{\\rtf1 hello}"));
    assert_eq!(content.file_count(), 2);
    assert!(content.has_image);
    assert_eq!(content.ts_ms, 1_700_000_000_000);
}

#[test]
fn test_same_clipboard_read_twice_has_same_signature() {
    let first = normalize(&SystemClipboardSnapshot::new(1).with_text("copy me"));
    let second = normalize(&SystemClipboardSnapshot::new(2).with_text("copy me"));

    assert_ne!(first, second);
    assert_eq!(first.signature(), second.signature());
}

#[test]
fn test_empty_snapshot_is_canonical_empty_record() {
    let content = normalize(&snapshot());

    assert!(content.is_empty());
    assert_eq!(content.signature(), ClipboardContent::empty(0).signature());
}

#[test]
fn test_invalid_text_does_not_hide_other_fields() {
    let raw = snapshot()
        .with_representation(ObservedClipboardRepresentation::new(
            "text",
            Some(MimeType::text_plain()),
            vec![0xff, 0xfe, 0xfd],
        ))
        .with_html("<p>still here</p>");

    let content = normalize(&raw);

    assert!(content.text.is_none());
    assert_eq!(content.html.as_deref(), Some("<p>still here</p>"));
    assert_ne!(content.signature(), ClipboardContent::empty(0).signature());
}

#[test]
fn test_unknown_formats_do_not_affect_signature() {
    let plain = normalize(&snapshot().with_text("x"));
    let with_private = normalize(&snapshot().with_text("x").with_representation(
        ObservedClipboardRepresentation::new(
            "com.example.private",
            Some(MimeType("application/x-private".into())),
            vec![1, 2, 3],
        ),
    ));

    assert_eq!(plain.signature(), with_private.signature());
}
