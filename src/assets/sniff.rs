use std::fmt;

/// Container format of an uploaded sticker, as classified from its leading bytes.
///
/// Serialized tags match the persisted item store (`"JPG"`, `"PNG"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ImageKind {
    /// JPEG (`FF D8 FF`).
    #[serde(rename = "JPG")]
    Jpeg,
    /// PNG (8-byte signature).
    #[serde(rename = "PNG")]
    Png,
    /// GIF87a / GIF89a (`GIF8`).
    #[serde(rename = "GIF")]
    Gif,
    /// RIFF container with a `WEBP` form type.
    #[serde(rename = "WEBP")]
    Webp,
    /// Anything else, including truncated buffers.
    #[serde(rename = "UNKNOWN", other)]
    Unknown,
}

impl ImageKind {
    /// Stable tag used in logs and the item store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "JPG",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::Webp => "WEBP",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Return `true` for formats that may carry multiple frames the engine animates.
    pub fn is_animated_container(self) -> bool {
        matches!(self, Self::Gif)
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const GIF_MAGIC: &[u8] = b"GIF8";
const RIFF_MAGIC: &[u8] = b"RIFF";
const WEBP_FORM: &[u8] = b"WEBP";

/// Classify `bytes` by magic number. Never fails; unrecognized input is [`ImageKind::Unknown`].
pub fn sniff(bytes: &[u8]) -> ImageKind {
    if bytes.starts_with(JPEG_MAGIC) {
        ImageKind::Jpeg
    } else if bytes.starts_with(PNG_MAGIC) {
        ImageKind::Png
    } else if bytes.starts_with(GIF_MAGIC) {
        ImageKind::Gif
    } else if bytes.len() >= 12 && bytes.starts_with(RIFF_MAGIC) && &bytes[8..12] == WEBP_FORM {
        ImageKind::Webp
    } else {
        ImageKind::Unknown
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sniff.rs"]
mod tests;
