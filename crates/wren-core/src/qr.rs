use std::sync::Arc;

/// One QR challenge as observed on the page: the raw payload plus a
/// display-ready rendering. One instance per poll, not retained.
#[derive(Debug, Clone, PartialEq)]
pub struct QrPayload {
    /// Raw challenge data encoded in the QR code.
    pub data: String,
    /// Terminal-friendly rendering of the same challenge.
    pub rendered: String,
}

impl QrPayload {
    pub fn new(data: impl Into<String>, rendered: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            rendered: rendered.into(),
        }
    }
}

/// Observer invoked with each QR payload as it becomes available.
/// Shared with the refresh task, hence `Arc`.
pub type QrCallback = Arc<dyn Fn(&QrPayload) + Send + Sync>;
