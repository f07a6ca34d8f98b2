use serde::Deserialize;

/// MyMemory `/get` response envelope.
///
/// `responseStatus` is a number on success but a string (`"403"`) on some
/// quota errors, so it is kept as a raw value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponse {
    pub response_data: Option<MyMemoryData>,
    #[serde(default)]
    pub response_status: serde_json::Value,
    pub response_details: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryData {
    pub translated_text: Option<String>,
}

impl MyMemoryResponse {
    /// Status code carried inside the envelope, defaulting to 200 when absent.
    pub fn status(&self) -> u16 {
        match &self.response_status {
            serde_json::Value::Number(n) => n.as_u64().map_or(0, |n| n as u16),
            serde_json::Value::String(s) => s.parse().unwrap_or(0),
            serde_json::Value::Null => 200,
            _ => 0,
        }
    }
}
