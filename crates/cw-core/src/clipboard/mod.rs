//! Clipboard domain models.
mod content;
mod mime;
mod normalize;
mod signature;
mod system;

pub use content::ClipboardContent;
pub use mime::MimeType;
pub use normalize::normalize;
pub use signature::{ContentSignature, SIGNATURE_PREFIX_LEN};
pub use system::{ObservedClipboardRepresentation, SystemClipboardSnapshot};
