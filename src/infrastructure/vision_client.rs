//! Google Cloud Vision 客户端 - 基础设施层
//!
//! 持有唯一的 HTTP 客户端和凭证，只暴露"识别文字"的能力

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::infrastructure::OcrBackend;
use crate::models::TextAnnotation;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;
use tracing::debug;

/// Vision `images:annotate` 响应
#[derive(Debug, Default, Deserialize)]
struct AnnotateBatchResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    full_text_annotation: Option<TextAnnotation>,
    #[serde(default)]
    error: Option<ResponseStatus>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseStatus {
    #[serde(default)]
    code: Option<u64>,
    #[serde(default)]
    message: Option<String>,
}

/// Cloud Vision 客户端
pub struct VisionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl VisionClient {
    /// 创建新的 Vision 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed(&config.vision_endpoint, e))?;

        Ok(Self {
            http,
            endpoint: config.vision_endpoint.clone(),
            api_key: config.vision_api_key.clone(),
        })
    }

    /// 构建 TEXT_DETECTION 请求体
    fn build_request(image: &[u8]) -> JsonValue {
        json!({
            "requests": [{
                "image": { "content": STANDARD.encode(image) },
                "features": [{ "type": "TEXT_DETECTION" }]
            }]
        })
    }

    /// 解析响应体
    ///
    /// 没有 `fullTextAnnotation` 表示图片里没有文字，返回空结果
    fn parse_response(endpoint: &str, body: JsonValue) -> AppResult<TextAnnotation> {
        let batch: AnnotateBatchResponse = serde_json::from_value(body)?;
        let response = batch
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::EmptyResponse {
                endpoint: endpoint.to_string(),
            })?;

        if let Some(status) = response.error {
            return Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                code: status.code,
                message: status.message,
            }
            .into());
        }

        Ok(response.full_text_annotation.unwrap_or_default())
    }
}

#[async_trait]
impl OcrBackend for VisionClient {
    fn name(&self) -> &str {
        "google-cloud-vision"
    }

    async fn detect_text(&self, image: &[u8]) -> AppResult<TextAnnotation> {
        debug!("调用 Vision API，图片大小: {} 字节", image.len());

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::build_request(image))
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&self.endpoint, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(&self.endpoint, e))?;

        if !status.is_success() {
            // 错误响应不一定是 JSON（例如网关返回的 HTML）
            let message = serde_json::from_str::<JsonValue>(&text)
                .ok()
                .and_then(|body| {
                    body.pointer("/error/message")
                        .and_then(|v| v.as_str())
                        .map(str::to_string)
                })
                .or_else(|| Some(text.chars().take(200).collect()));
            return Err(ApiError::BadResponse {
                endpoint: self.endpoint.clone(),
                code: Some(u64::from(status.as_u16())),
                message,
            }
            .into());
        }

        let body: JsonValue = serde_json::from_str(&text)?;
        let annotation = Self::parse_response(&self.endpoint, body)?;
        debug!("Vision API 返回 {} 个单词", annotation.word_count());
        Ok(annotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vertex;

    const ENDPOINT: &str = "https://vision.test/v1/images:annotate";

    #[test]
    fn test_request_body_contains_base64_image() {
        let body = VisionClient::build_request(b"abc");
        assert_eq!(body["requests"][0]["image"]["content"], "YWJj");
        assert_eq!(body["requests"][0]["features"][0]["type"], "TEXT_DETECTION");
    }

    #[test]
    fn test_parse_full_text_annotation() {
        let body = json!({
            "responses": [{
                "fullTextAnnotation": {
                    "text": "Quelle capitale\n",
                    "pages": [{
                        "blocks": [{
                            "paragraphs": [{
                                "words": [{
                                    "boundingBox": { "vertices": [
                                        {"x": 10}, {"x": 60}, {"x": 60, "y": 20}, {"x": 10, "y": 20}
                                    ]},
                                    "symbols": [{"text": "Q"}, {"text": "u"}, {"text": "i"}]
                                }]
                            }]
                        }]
                    }]
                }
            }]
        });

        let annotation = VisionClient::parse_response(ENDPOINT, body).unwrap();
        assert_eq!(annotation.word_count(), 1);
        let word = &annotation.pages[0].blocks[0].paragraphs[0].words[0];
        assert_eq!(word.text(), "Qui");
        assert_eq!(word.bounding_box.top_left(), Some(Vertex::new(10, 0)));
        assert_eq!(word.bounding_box.bottom_left(), Some(Vertex::new(10, 20)));
    }

    #[test]
    fn test_parse_no_text_is_empty() {
        let annotation = VisionClient::parse_response(ENDPOINT, json!({"responses": [{}]})).unwrap();
        assert_eq!(annotation.word_count(), 0);
    }

    #[test]
    fn test_parse_per_image_error() {
        let body = json!({
            "responses": [{ "error": { "code": 7, "message": "PERMISSION_DENIED" } }]
        });
        let err = VisionClient::parse_response(ENDPOINT, body).unwrap_err();
        assert!(matches!(
            err,
            AppError::Api(ApiError::BadResponse { code: Some(7), ref message, .. })
                if message.as_deref() == Some("PERMISSION_DENIED")
        ));
    }

    #[test]
    fn test_parse_empty_batch() {
        let err = VisionClient::parse_response(ENDPOINT, json!({"responses": []})).unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::EmptyResponse { .. })));
    }

    #[test]
    fn test_client_builds_from_config() {
        let config = Config {
            vision_api_key: "key".to_string(),
            ..Config::default()
        };
        let client = VisionClient::new(&config).unwrap();
        assert_eq!(client.name(), "google-cloud-vision");
        assert_eq!(client.endpoint, config.vision_endpoint);
    }
}
