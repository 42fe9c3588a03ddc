use crate::config::toml_config::DefaultsConfig;
use crate::core::engine::CalculationEngine;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub defaults_path: Option<String>,
}

impl LambdaConfig {
    pub fn from_env() -> Self {
        Self {
            defaults_path: env::var("LAB_MIX_DEFAULTS").ok().filter(|p| !p.is_empty()),
        }
    }

    pub fn build_engine(&self) -> Result<CalculationEngine> {
        let defaults = DefaultsConfig::load(self.defaults_path.as_deref())?;
        Ok(CalculationEngine::new(defaults))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub operation: String,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub status_code: u16,
    pub body: Value,
}

/// 成功回 200；計算只會因請求內容失敗 (型別、運算、名稱)，一律回 400
pub async fn handle_request(engine: &CalculationEngine, request: Request) -> Response {
    match engine.evaluate_named(&request.operation, &request.payload) {
        Ok(body) => Response {
            status_code: 200,
            body,
        },
        Err(e) => {
            tracing::error!(operation = %request.operation, "Calculation failed: {}", e);
            Response {
                status_code: 400,
                body: CalculationEngine::error_body(&e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_handle_request_success() {
        let engine = CalculationEngine::default();
        let request: Request = serde_json::from_value(json!({
            "operation": "medios",
            "payload": { "tipo_medio": "germinacion", "volumen_preparar": 1000 }
        }))
        .unwrap();

        let response = tokio_test::block_on(handle_request(&engine, request));
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body["ms_g"], json!(2.4));
    }

    #[test]
    fn test_handle_request_invalid_input() {
        let engine = CalculationEngine::default();
        let request: Request = serde_json::from_value(json!({
            "operation": "pcr_inicial",
            "payload": { "num_reacciones": "veinte" }
        }))
        .unwrap();

        let response = tokio_test::block_on(handle_request(&engine, request));
        assert_eq!(response.status_code, 400);
        assert!(response.body["error"].is_string());
    }

    #[test]
    fn test_unknown_operation_is_bad_request() {
        let engine = CalculationEngine::default();
        let request: Request =
            serde_json::from_value(json!({ "operation": "pcr_final", "payload": {} })).unwrap();

        let response = tokio_test::block_on(handle_request(&engine, request));
        assert_eq!(response.status_code, 400);
        assert!(response.body["error"].is_string());
    }

    #[test]
    fn test_missing_payload_defaults_to_empty_object() {
        let engine = CalculationEngine::default();
        let request: Request = serde_json::from_value(json!({ "operation": "lv2" })).unwrap();

        let response = tokio_test::block_on(handle_request(&engine, request));
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body["num_guias"], json!(1));
    }
}
