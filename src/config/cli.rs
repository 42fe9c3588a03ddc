use crate::utils::error::{MixError, Result};
use serde_json::Value;
use std::fs;
use std::io::Read;

/// Where the CLI reads its JSON request from.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestSource {
    Inline(String),
    File(String),
    Stdin,
}

impl RequestSource {
    pub fn new(input: Option<String>, json: Option<String>) -> Self {
        match (json, input) {
            (Some(body), _) => RequestSource::Inline(body),
            (None, Some(path)) => RequestSource::File(path),
            (None, None) => RequestSource::Stdin,
        }
    }

    pub fn read_to_string(&self) -> Result<String> {
        match self {
            RequestSource::Inline(body) => Ok(body.clone()),
            RequestSource::File(path) => Ok(fs::read_to_string(path)?),
            RequestSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }

    /// 空白輸入視為 `{}`，全部使用預設值
    pub fn read_payload(&self) -> Result<Value> {
        parse_payload(&self.read_to_string()?)
    }
}

pub fn parse_payload(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(body).map_err(MixError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_inline_takes_precedence() {
        let source = RequestSource::new(Some("a.json".to_string()), Some("{}".to_string()));
        assert_eq!(source, RequestSource::Inline("{}".to_string()));
        assert_eq!(RequestSource::new(None, None), RequestSource::Stdin);
    }

    #[test]
    fn test_read_payload_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(br#"{"num_guias": 2}"#).unwrap();

        let source = RequestSource::File(temp_file.path().to_string_lossy().into_owned());
        assert_eq!(source.read_payload().unwrap(), json!({"num_guias": 2}));
    }

    #[test]
    fn test_blank_body_is_empty_object() {
        assert_eq!(parse_payload("  \n").unwrap(), json!({}));
        assert!(matches!(
            parse_payload("{not json"),
            Err(MixError::SerializationError(_))
        ));
    }
}
