use super::style::{Color, QrStyle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Whether an entry came from a scan or a generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Decoded from an image or camera frame
    Scanned,
    /// Rendered from user text. Entries saved without a kind are generations.
    #[default]
    Generated,
}

/// One persisted record of a past result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Decoded or source text
    pub text: String,
    /// `data:image/png;base64,...` image
    pub image: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Scan or generation
    #[serde(default)]
    pub kind: EntryKind,
    /// Foreground color of a generated code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Background color of a generated code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<Color>,
    /// Requested pixel width of a generated code
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "size_from_number_or_string"
    )]
    pub size: Option<u32>,
}

impl HistoryEntry {
    /// Entry for decoded text, shown with a placeholder image
    pub fn scanned(text: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: placeholder.into(),
            timestamp: Utc::now(),
            kind: EntryKind::Scanned,
            color: None,
            bg_color: None,
            size: None,
        }
    }

    /// Entry for a generated code along with the style that produced it
    pub fn generated(text: impl Into<String>, image: impl Into<String>, style: &QrStyle) -> Self {
        Self {
            text: text.into(),
            image: image.into(),
            timestamp: Utc::now(),
            kind: EntryKind::Generated,
            color: Some(style.foreground),
            bg_color: Some(style.background),
            size: Some(style.width),
        }
    }
}

// Older records stored the size selector value as a string.
fn size_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Number(u32),
        Text(String),
    }

    match Option::<Size>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Size::Number(n)) => Ok(Some(n)),
        Some(Size::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
