use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Content encoded into an issued QR image.
///
/// Field order is part of the format: the serialized object is the literal
/// QR content and must be parseable by [`ScannedQr::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    pub location_id: String,
    pub location_name: String,
    pub timestamp: String,
    pub qr_data: String,
}

impl QrPayload {
    pub fn to_qr_string(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// What the scanner could read out of a decoded QR text.
///
/// Every field is optional here: the server decides validity, the client only
/// needs the text to be a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedQr {
    pub location_id: Option<String>,
    pub location_name: Option<String>,
    pub timestamp: Option<String>,
    pub qr_data: Option<String>,
}

impl ScannedQr {
    pub fn parse(text: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(text.trim())
            .map_err(|_| AppError::Validation("Invalid QR Code format".into()))?;

        let obj = value
            .as_object()
            .ok_or_else(|| AppError::Validation("Invalid QR Code format".into()))?;

        Ok(Self {
            location_id: text_field(obj, "location_id"),
            location_name: text_field(obj, "location_name"),
            timestamp: text_field(obj, "timestamp"),
            qr_data: text_field(obj, "qr_data"),
        })
    }

    /// Rebuild the issuance payload when all four fields are present.
    pub fn into_payload(self) -> Option<QrPayload> {
        Some(QrPayload {
            location_id: self.location_id?,
            location_name: self.location_name?,
            timestamp: self.timestamp?,
            qr_data: self.qr_data?,
        })
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
