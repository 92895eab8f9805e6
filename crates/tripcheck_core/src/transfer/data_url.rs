//! `data:` URL encoding for inline images.

use crate::repo::image_repo::{ImageBlob, DEFAULT_IMAGE_MIME};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATA_URL_MIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:(.*?);").expect("valid data url regex"));

/// Data URL decode failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataUrlError {
    /// No `,` separating header and payload.
    MissingPayload,
    InvalidBase64(base64::DecodeError),
}

impl Display for DataUrlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPayload => write!(f, "data url has no payload"),
            Self::InvalidBase64(err) => write!(f, "data url payload is not base64: {err}"),
        }
    }
}

impl Error for DataUrlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBase64(err) => Some(err),
            Self::MissingPayload => None,
        }
    }
}

/// Encodes a blob as `data:<mime>;base64,<payload>`.
pub fn encode_data_url(blob: &ImageBlob) -> String {
    format!("data:{};base64,{}", blob.mime, STANDARD.encode(&blob.bytes))
}

/// Decodes a `data:` URL back into a blob.
///
/// A header without a MIME type yields `image/png`.
pub fn decode_data_url(value: &str) -> Result<ImageBlob, DataUrlError> {
    let (header, payload) = value.split_once(',').ok_or(DataUrlError::MissingPayload)?;

    let mime = DATA_URL_MIME_RE
        .captures(header)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().trim())
        .filter(|mime| !mime.is_empty())
        .unwrap_or(DEFAULT_IMAGE_MIME);

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(DataUrlError::InvalidBase64)?;

    Ok(ImageBlob::new(mime, bytes))
}

#[cfg(test)]
mod tests {
    use super::{decode_data_url, encode_data_url, DataUrlError};
    use crate::repo::image_repo::ImageBlob;

    #[test]
    fn encodes_with_mime_header() {
        let blob = ImageBlob::new("image/jpeg", b"hi".to_vec());
        assert_eq!(encode_data_url(&blob), "data:image/jpeg;base64,aGk=");
    }

    #[test]
    fn decodes_declared_mime() {
        let blob = decode_data_url("data:image/webp;base64,aGk=").unwrap();
        assert_eq!(blob.mime, "image/webp");
        assert_eq!(blob.bytes, b"hi");
    }

    #[test]
    fn missing_mime_defaults_to_png() {
        assert_eq!(decode_data_url("data:;base64,aGk=").unwrap().mime, "image/png");
        assert_eq!(decode_data_url("garbage,aGk=").unwrap().mime, "image/png");
    }

    #[test]
    fn rejects_missing_payload_and_bad_base64() {
        assert_eq!(
            decode_data_url("data:image/png;base64"),
            Err(DataUrlError::MissingPayload)
        );
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(DataUrlError::InvalidBase64(_))
        ));
    }
}
