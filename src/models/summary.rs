use serde::Serialize;
use serde_json::Value;

/// Monthly aggregate. The body is kept opaque: its fields are defined by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub month: String,
    pub data: Value,
}
