//! Google Cloud Text-to-Speech REST client.

use crate::core::Synthesizer;
use crate::utils::error::{Result, TtsError};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `?key=` 查詢參數
    ApiKey(String),
    /// `Authorization: Bearer` (例如 `gcloud auth print-access-token`)
    AccessToken(String),
    None,
}

impl Credentials {
    /// API key 優先於 access token
    pub fn from_options(api_key: Option<&str>, access_token: Option<&str>) -> Self {
        let non_empty = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);

        match (non_empty(api_key), non_empty(access_token)) {
            (Some(key), _) => Credentials::ApiKey(key),
            (None, Some(token)) => Credentials::AccessToken(token),
            (None, None) => Credentials::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Credentials::None)
    }
}

#[derive(Debug, Clone)]
pub struct GoogleTtsConfig {
    pub endpoint: String,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl Default for GoogleTtsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials: Credentials::None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    ssml_gender: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// 共用單一 `reqwest::Client` (內建連線池)，可安全地在多個工作間共用
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsConfig,
}

impl GoogleTtsClient {
    pub fn new(config: GoogleTtsConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn build_request<'a>(text: &'a str, language_code: &'a str) -> SynthesizeRequest<'a> {
        // 聲音性別與編碼固定，不開放設定
        SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code,
                ssml_gender: "NEUTRAL",
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        }
    }
}

#[async_trait]
impl Synthesizer for GoogleTtsClient {
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(TtsError::SynthesisError {
                message: format!("empty text for language {}", language_code),
            });
        }

        let body = Self::build_request(text, language_code);
        let mut request = self.client.post(&self.config.endpoint).json(&body);
        request = match &self.config.credentials {
            Credentials::ApiKey(key) => request.query(&[("key", key)]),
            Credentials::AccessToken(token) => request.bearer_auth(token),
            Credentials::None => request,
        };

        tracing::debug!("Requesting {} speech for {:?}", language_code, text);
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&raw)
                .map(|b| format!("{} {}", b.error.status, b.error.message).trim().to_string())
                .unwrap_or(raw);
            return Err(TtsError::SynthesisError {
                message: format!("HTTP {} for {}: {}", status.as_u16(), language_code, detail),
            });
        }

        let payload: SynthesizeResponse = response.json().await?;
        let audio = BASE64.decode(payload.audio_content.as_bytes())?;

        if audio.is_empty() {
            return Err(TtsError::SynthesisError {
                message: format!("no audio content returned for {}", language_code),
            });
        }

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer, credentials: Credentials) -> GoogleTtsClient {
        GoogleTtsClient::new(GoogleTtsConfig {
            endpoint: server.url("/v1/text:synthesize"),
            credentials,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_sends_neutral_mp3_request_with_api_key() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/text:synthesize")
                .query_param("key", "test-key")
                .json_body(serde_json::json!({
                    "input": {"text": "犬"},
                    "voice": {"languageCode": "ja-JP", "ssmlGender": "NEUTRAL"},
                    "audioConfig": {"audioEncoding": "MP3"}
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"audioContent": BASE64.encode(b"ID3-inu")}));
        });

        let client = client_for(&server, Credentials::ApiKey("test-key".to_string()));
        let audio = client.synthesize("犬", "ja-JP").await.unwrap();

        api_mock.assert();
        assert_eq!(audio, b"ID3-inu");
    }

    #[tokio::test]
    async fn test_uses_bearer_token() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/text:synthesize")
                .header("authorization", "Bearer ya29.token");
            then.status(200)
                .json_body(serde_json::json!({"audioContent": BASE64.encode(b"ID3-dog")}));
        });

        let client = client_for(&server, Credentials::AccessToken("ya29.token".to_string()));
        let audio = client.synthesize("dog", "en-US").await.unwrap();

        api_mock.assert();
        assert_eq!(audio, b"ID3-dog");
    }

    #[tokio::test]
    async fn test_api_error_becomes_synthesis_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/text:synthesize");
            then.status(429).json_body(serde_json::json!({
                "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
            }));
        });

        let client = client_for(&server, Credentials::None);
        let err = client.synthesize("dog", "en-US").await.unwrap_err();

        match err {
            TtsError::SynthesisError { message } => {
                assert!(message.contains("429"));
                assert!(message.contains("Quota exceeded"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_base64_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/text:synthesize");
            then.status(200)
                .json_body(serde_json::json!({"audioContent": "not base64!!"}));
        });

        let client = client_for(&server, Credentials::None);
        let err = client.synthesize("dog", "en-US").await.unwrap_err();

        assert!(matches!(err, TtsError::AudioDecodeError(_)));
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_locally() {
        let client = GoogleTtsClient::new(GoogleTtsConfig::default()).unwrap();

        let err = client.synthesize("  ", "ja-JP").await.unwrap_err();

        assert!(matches!(err, TtsError::SynthesisError { .. }));
    }

    #[test]
    fn test_credentials_prefer_api_key() {
        assert_eq!(
            Credentials::from_options(Some("k"), Some("t")),
            Credentials::ApiKey("k".to_string())
        );
        assert_eq!(
            Credentials::from_options(Some(" "), Some("t")),
            Credentials::AccessToken("t".to_string())
        );
        assert!(Credentials::from_options(None, None).is_none());
    }
}
