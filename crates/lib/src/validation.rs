//! # Request Validation
//!
//! Checks the shape and size of an incoming JSON body before any provider is
//! contacted. Checks run in a fixed order and the first failure wins.

use crate::{constants::DEFAULT_MEDIA_TYPE, errors::ValidationError, types::ImageSubmission};
use serde_json::{Map, Value};

const MISSING_IMAGE: &str = "Missing 'image' (base64)";
const MISSING_TRANSCRIPTION: &str = "Missing 'transcription' text";

/// Estimates the decoded byte length of a base64 string without decoding it.
///
/// `floor(len * 3 / 4)` minus the number of trailing `=` padding characters.
/// Exact for both padded and unpadded standard base64.
pub fn estimate_base64_bytes(encoded: &str) -> usize {
    let len = encoded.len();
    let padding = encoded
        .as_bytes()
        .iter()
        .rev()
        .take(2)
        .take_while(|&&b| b == b'=')
        .count();
    (len * 3 / 4).saturating_sub(padding)
}

/// Returns true for strings of the form `type/subtype`.
pub fn is_media_type(value: &str) -> bool {
    match value.split_once('/') {
        Some((kind, subtype)) => {
            !kind.is_empty()
                && !subtype.is_empty()
                && !subtype.contains('/')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Splits a `data:<mime>;base64,<payload>` URL into its media type and payload.
fn split_data_url(image: &str) -> Option<(&str, &str)> {
    let rest = image.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let media_type = header.strip_suffix(";base64")?;
    Some((media_type, payload))
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object().ok_or(ValidationError::InvalidBody)
}

fn optional_bool(
    body: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<bool>, ValidationError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ValidationError::InvalidType { field }),
    }
}

/// Validates an image submission body (`/transcribe` and `/process`).
pub fn validate_submission(
    body: &Value,
    max_image_bytes: usize,
) -> Result<ImageSubmission, ValidationError> {
    let body = as_object(body)?;

    // 1. image
    let image = match body.get("image") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim(),
        _ => {
            return Err(ValidationError::MissingField {
                field: "image",
                message: MISSING_IMAGE,
            })
        }
    };
    let (embedded_media_type, image_base64) = match split_data_url(image) {
        Some((media_type, payload)) => (Some(media_type), payload),
        None => (None, image),
    };
    if image_base64.is_empty() {
        return Err(ValidationError::MissingField {
            field: "image",
            message: MISSING_IMAGE,
        });
    }

    // 2. mediaType
    let media_type = match body.get("mediaType") {
        None | Some(Value::Null) => embedded_media_type
            .filter(|m| is_media_type(m))
            .unwrap_or(DEFAULT_MEDIA_TYPE)
            .to_string(),
        Some(Value::String(s)) if is_media_type(s) => s.clone(),
        Some(_) => return Err(ValidationError::InvalidMediaType),
    };

    // 3. analyze / runAnalysis
    let run_analysis = match optional_bool(body, "analyze")? {
        Some(flag) => flag,
        None => optional_bool(body, "runAnalysis")?.unwrap_or(true),
    };

    // 4. size estimate
    let estimated = estimate_base64_bytes(image_base64);
    if estimated > max_image_bytes {
        return Err(ValidationError::ImageTooLarge {
            estimated,
            limit: max_image_bytes,
        });
    }

    Ok(ImageSubmission {
        image_base64: image_base64.to_string(),
        media_type,
        run_analysis,
    })
}

/// Validates an `/analyze` body and returns the transcription text.
pub fn validate_analysis_request(body: &Value) -> Result<String, ValidationError> {
    let body = as_object(body)?;
    match body.get("transcription") {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(ValidationError::MissingField {
            field: "transcription",
            message: MISSING_TRANSCRIPTION,
        }),
    }
}
