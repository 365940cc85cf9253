use super::{PersistenceError, PersistenceResult};
use crate::artifact::{CsvRows, ImageArtifact};
use base64::{Engine as _, engine::general_purpose::STANDARD};

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = "base64";
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

pub fn encode_rows(rows: &CsvRows) -> PersistenceResult<String> {
    Ok(serde_json::to_string(rows)?)
}

pub fn decode_rows(encoded: &str) -> PersistenceResult<CsvRows> {
    Ok(serde_json::from_str(encoded)?)
}

/// `data:<media-type>;base64,<payload>`
pub fn encode_data_url(media_type: &str, bytes: &[u8]) -> String {
    let media_type = if media_type.is_empty() {
        FALLBACK_MEDIA_TYPE
    } else {
        media_type
    };
    format!(
        "{DATA_URL_PREFIX}{media_type};{BASE64_MARKER},{}",
        STANDARD.encode(bytes)
    )
}

pub fn decode_data_url(encoded: &str, file_name: &str) -> PersistenceResult<ImageArtifact> {
    let (header, payload) = encoded
        .split_once(',')
        .ok_or_else(|| PersistenceError::InvalidData("data URL has no payload separator".into()))?;
    let meta = header.strip_prefix(DATA_URL_PREFIX).ok_or_else(|| {
        PersistenceError::InvalidData(format!("expected a data URL, got '{}'", truncate(header)))
    })?;

    let mut params = meta.split(';');
    let media_type = params.next().unwrap_or_default().trim();
    if !params.any(|p| p.trim() == BASE64_MARKER) {
        return Err(PersistenceError::InvalidData(
            "data URL payload is not base64 encoded".into(),
        ));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| PersistenceError::InvalidData(format!("invalid base64 payload: {e}")))?;

    Ok(ImageArtifact::new(file_name, media_type, bytes))
}

fn truncate(value: &str) -> &str {
    match value.char_indices().nth(32) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
