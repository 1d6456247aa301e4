// Form submission payloads
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Deserializer};

/// A file picked by the user (browse or drag-and-drop).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileUpload {
    pub file_name: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Base64 on the wire.
    #[serde(rename = "content", deserialize_with = "bytes_from_base64")]
    pub bytes: Bytes,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// `data:<mime>;base64,<payload>` rendering of the file.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

/// Multipart body assembled from the enabled controls of a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSubmission {
    pub fields: Vec<(String, String)>,
    pub file: Option<(String, FileUpload)>,
}

impl FormSubmission {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }
}

fn default_content_type() -> String {
    "application/octet-stream".to_string()
}

fn bytes_from_base64<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoded.as_bytes())
        .map(Bytes::from)
        .map_err(serde::de::Error::custom)
}
