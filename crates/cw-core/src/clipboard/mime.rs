use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MimeType(pub String);

impl MimeType {
    pub fn text_plain() -> Self {
        Self("text/plain".into())
    }
    pub fn text_html() -> Self {
        Self("text/html".into())
    }
    pub fn text_rtf() -> Self {
        Self("text/rtf".into())
    }
    pub fn uri_list() -> Self {
        Self("text/uri-list".into())
    }
    pub fn image_png() -> Self {
        Self("image/png".into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// MIME essence without parameters, lowercased (`text/plain;charset=utf-8` -> `text/plain`).
    pub fn essence(&self) -> String {
        self.0
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    pub fn is_image(&self) -> bool {
        self.essence().starts_with("image/")
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MimeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MimeType(s.to_string()))
    }
}
