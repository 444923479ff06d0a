//! Wire envelopes and payload flattening for the admin REST backend.
//!
//! Every endpoint wraps its result: `{ "data": ... }` for single records,
//! `{ "data": [...], "pagination": {...} }` for lists and
//! `{ "success": bool }` for deletes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use mb_core::error::ApiError;
use mb_core::ports::PageInfo;

#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct DeleteEnvelope {
    pub success: bool,
}

/// Flatten a draft/patch into multipart text fields.
///
/// `null` entries are skipped, strings go through verbatim and everything
/// else is rendered in its JSON form. Patches serialize sparsely, so an
/// unedited field never shows up here.
pub fn form_fields<T: Serialize>(payload: &T) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
    let map = match value {
        Value::Object(map) => map,
        _ => {
            return Err(ApiError::Decode(
                "payload did not serialize to an object".to_string(),
            ))
        }
    };
    let mut fields = Vec::with_capacity(map.len());
    for (name, value) in map {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            other => other.to_string(),
        };
        fields.push((name, text));
    }
    Ok(fields)
}

/// Decode a JSON body into `T`, mapping failures onto the error taxonomy.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mb_core::content::{HeroSlide, HeroSlidePatch, NewsItemDraft, PublishStatus};

    #[test]
    fn list_envelope_decodes_data_and_pagination() {
        let body = serde_json::json!({
            "data": [{
                "id": 1,
                "title": "Welcome",
                "subtitle": "",
                "description": "Your health first",
                "image": "https://cdn.example/1.png",
                "serial": "1",
                "status": "active"
            }],
            "pagination": {
                "current_page": 1,
                "per_page": 10,
                "total_count": 1,
                "total_page": 1
            }
        });
        let envelope: ListEnvelope<HeroSlide> =
            decode(serde_json::to_vec(&body).unwrap().as_slice()).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].status, PublishStatus::Active);
        assert_eq!(envelope.pagination.total_count, 1);
    }

    #[test]
    fn malformed_body_maps_to_a_decode_error() {
        let err = decode::<DeleteEnvelope>(b"not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn patch_flattens_to_only_its_set_fields() {
        let patch = HeroSlidePatch {
            serial: Some("2".into()),
            status: Some(PublishStatus::Active),
            ..HeroSlidePatch::default()
        };
        let mut fields = form_fields(&patch).unwrap();
        fields.sort();
        assert_eq!(
            fields,
            vec![
                ("serial".to_string(), "2".to_string()),
                ("status".to_string(), "active".to_string()),
            ]
        );
    }

    #[test]
    fn draft_flattening_skips_absent_optionals_and_renders_numbers() {
        let draft = NewsItemDraft {
            title: "Open day".into(),
            body: "Visit us".into(),
            ..NewsItemDraft::default()
        };
        let fields = form_fields(&draft).unwrap();
        assert!(fields.iter().any(|(n, v)| n == "title" && v == "Open day"));
        assert!(!fields.iter().any(|(n, _)| n == "published_on"));
        assert!(fields.iter().any(|(n, v)| n == "status" && v == "inactive"));
    }
}
