//! Identity documents used to verify transfers and new users

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// An uploaded national ID image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityDocument {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl IdentityDocument {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read an image from disk, guessing its MIME type from the extension
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let mime = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            Some("pdf") => "application/pdf",
            _ => "application/octet-stream",
        };
        Ok(Self::new(mime, bytes))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `data:<mime>;base64,<payload>` form expected by the scan endpoint
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// Fields extracted from a scanned identity document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedIdentity {
    pub document_number: String,
    pub country_full: String,
}

impl ScannedIdentity {
    /// Pull `documentNumber[0].value` and `countryFull[0].value` out of a scan
    /// result. Returns `None` when either is missing or blank.
    pub fn from_scan_data(data: &JsonValue) -> Option<Self> {
        let first_value = |field: &str| {
            data.get(field)?
                .get(0)?
                .get("value")?
                .as_str()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Some(Self {
            document_number: first_value("documentNumber")?,
            country_full: first_value("countryFull")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_url() {
        let doc = IdentityDocument::new("image/png", vec![1, 2, 3]);
        assert_eq!(doc.to_data_url(), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.JPG");
        std::fs::write(&path, b"jpeg").unwrap();

        let doc = IdentityDocument::from_path(&path).unwrap();
        assert_eq!(doc.mime_type, "image/jpeg");
        assert_eq!(doc.bytes, b"jpeg");
    }

    #[test]
    fn test_scan_extraction() {
        let data = json!({
            "documentNumber": [{"value": "LB1234567", "confidence": 0.98}],
            "countryFull": [{"value": "Lebanon"}]
        });
        let scanned = ScannedIdentity::from_scan_data(&data).unwrap();
        assert_eq!(scanned.document_number, "LB1234567");
        assert_eq!(scanned.country_full, "Lebanon");
    }

    #[test]
    fn test_scan_extraction_missing_field() {
        let data = json!({"documentNumber": [{"value": "LB1234567"}], "countryFull": []});
        assert!(ScannedIdentity::from_scan_data(&data).is_none());

        let data = json!({"documentNumber": [{"value": "  "}], "countryFull": [{"value": "Lebanon"}]});
        assert!(ScannedIdentity::from_scan_data(&data).is_none());
    }
}
