//! QR issuance: pick a location, get a server token for it, and turn the
//! result into something printable.

use super::ports::Notifier;
use crate::api::{AttendanceApi, normalize};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::models::location::Location;
use crate::models::qr::QrPayload;
use crate::utils::time::iso_millis;
use chrono::{DateTime, FixedOffset, Utc};
use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

const NO_PAYLOAD: &str = "Please generate QR code first";

/// Last generated QR, ready to be exported.
#[derive(Debug, Clone)]
pub struct IssuedQr {
    pub payload: QrPayload,
    /// Literal QR content.
    pub text: String,
    pub generated_at: DateTime<Utc>,
    /// Only set when the server announced an expiry.
    pub expires_at: Option<DateTime<FixedOffset>>,
}

impl IssuedQr {
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.expires_at
            .map(|exp| (exp.with_timezone(&Utc) - now).max(chrono::Duration::zero()))
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> Option<bool> {
        self.expires_at.map(|exp| exp.with_timezone(&Utc) <= now)
    }

    /// `QR_<location name>_<unix millis>.svg`
    pub fn default_file_name(&self) -> String {
        let name = if self.payload.location_name.trim().is_empty() {
            self.payload.location_id.clone()
        } else {
            self.payload
                .location_name
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("_")
        };
        format!("QR_{}_{}.svg", name, self.generated_at.timestamp_millis())
    }
}

pub struct QrIssuer {
    api: Arc<dyn AttendanceApi>,
    notifier: Arc<dyn Notifier>,
    allow_demo_locations: bool,
    locations: Vec<Location>,
    last: Option<IssuedQr>,
}

impl QrIssuer {
    pub fn new(
        api: Arc<dyn AttendanceApi>,
        notifier: Arc<dyn Notifier>,
        allow_demo_locations: bool,
    ) -> Self {
        Self {
            api,
            notifier,
            allow_demo_locations,
            locations: Vec::new(),
            last: None,
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn last(&self) -> Option<&IssuedQr> {
        self.last.as_ref()
    }

    /// Fetch the location list. With demo locations allowed, a failed fetch
    /// falls back to the built-in list instead of failing.
    pub async fn load_locations(&mut self) -> AppResult<&[Location]> {
        match self.api.locations().await {
            Ok(body) => {
                self.locations = normalize::locations(&body);
                debug!(count = self.locations.len(), "locations loaded");
            }
            Err(e) => {
                warn!(error = %e, "failed to load locations");
                self.notifier.error("Failed to load locations");
                if !self.allow_demo_locations {
                    return Err(e);
                }
                self.locations = Location::demo_list();
            }
        }
        Ok(&self.locations)
    }

    /// Ask the server for a QR token bound to `location_id` and compose the
    /// payload that gets encoded.
    pub async fn generate(&mut self, location_id: &str) -> AppResult<&IssuedQr> {
        let location_id = location_id.trim();
        if location_id.is_empty() {
            self.notifier.error("Please select a location");
            return Err(AppError::InvalidInput("Please select a location".into()));
        }

        let generated = match self.api.generate_qr(location_id).await {
            Ok(g) => g,
            Err(e) => {
                self.notifier
                    .error(&e.message_or("Failed to generate QR Code"));
                return Err(e);
            }
        };

        let location_name = self
            .locations
            .iter()
            .find(|l| l.id.to_string() == location_id)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| "Unknown Location".to_string());

        let generated_at = Utc::now();
        let payload = QrPayload {
            location_id: location_id.to_string(),
            location_name,
            timestamp: iso_millis(generated_at),
            qr_data: generated.qr_data,
        };
        let text = payload.to_qr_string()?;

        let expires_at = generated
            .expires_at
            .as_deref()
            .and_then(normalize::parse_timestamp);

        debug!(location_id, "QR payload composed");
        self.notifier.success("QR Code generated successfully!");

        Ok(&*self.last.insert(IssuedQr {
            payload,
            text,
            generated_at,
            expires_at,
        }))
    }

    fn require_last(&self) -> AppResult<&IssuedQr> {
        self.last.as_ref().ok_or_else(|| {
            self.notifier.error(NO_PAYLOAD);
            AppError::InvalidInput(NO_PAYLOAD.into())
        })
    }

    /// Serialized payload, as it would be copied to the clipboard.
    pub fn payload_text(&self) -> AppResult<&str> {
        Ok(self.require_last()?.text.as_str())
    }

    /// Terminal rendering of the QR image.
    pub fn render_terminal(&self) -> AppResult<String> {
        let code = encode(&self.require_last()?.text)?;
        Ok(code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .quiet_zone(true)
            .build())
    }

    /// Write the QR image as SVG. A directory gets the default file name.
    pub fn save_svg(&self, target: &Path, force: bool) -> AppResult<PathBuf> {
        let issued = self.require_last()?;

        let path = if target.is_dir() {
            target.join(issued.default_file_name())
        } else {
            target.to_path_buf()
        };
        ensure_writable(&path, force)?;

        let image = encode(&issued.text)?
            .render::<svg::Color>()
            .min_dimensions(300, 300)
            .build();
        fs::write(&path, image)?;

        self.notifier
            .success(&format!("QR Code saved to {}", path.display()));
        Ok(path)
    }
}

fn encode(text: &str) -> AppResult<QrCode> {
    Ok(QrCode::with_error_correction_level(
        text.as_bytes(),
        EcLevel::H,
    )?)
}
