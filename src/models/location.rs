use serde::{Deserialize, Serialize};

use super::id::RecordId;

/// Physical place where a QR code can be issued and scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    pub fn new(id: &str, name: &str, address: Option<&str>) -> Self {
        Self {
            id: RecordId::from(id),
            name: name.to_string(),
            address: address.map(str::to_string),
        }
    }

    /// Built-in demo locations, only used when test mode is enabled.
    pub fn demo_list() -> Vec<Location> {
        vec![
            Location::new(
                "LOC001",
                "Office Building A",
                Some("Jl. Sudirman No. 123, Jakarta"),
            ),
            Location::new(
                "LOC002",
                "Office Building B",
                Some("Jl. Gatot Subroto No. 45, Bandung"),
            ),
            Location::new(
                "LOC003",
                "Warehouse",
                Some("Jl. Raya Industri No. 67, Surabaya"),
            ),
        ]
    }
}
