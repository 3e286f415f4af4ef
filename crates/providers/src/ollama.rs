//! Ollama backend (`/api/generate`, non-streaming).

use std::time::Duration;

use {
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
    tracing::{debug, warn},
};

use crate::model::LlmProvider;

pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OllamaProvider {
    pub fn new(base_url: &str, model: String, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            temperature: 0.0,
        })
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        debug!(model = %self.model, prompt_len = prompt.len(), "ollama generate");
        let resp = self
            .client
            .post(self.generate_url())
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
                options: Some(GenerateOptions {
                    temperature: self.temperature,
                }),
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, body = %body, "ollama generate failed");
            anyhow::bail!("Ollama error {status}: {body}");
        }

        let parsed: GenerateResponse = resp.json().await?;
        Ok(parsed.response)
    }

    async fn generate_raw(&self, prompt: &str) -> anyhow::Result<String> {
        let body = self
            .client
            .post(self.generate_url())
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
                options: None,
            })
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, mockito::Matcher, serde_json::json};

    fn provider(url: &str) -> OllamaProvider {
        OllamaProvider::new(url, "llama3.1".into(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn complete_sends_temperature_and_returns_response_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::Json(json!({
                "model": "llama3.1",
                "prompt": "Where is Puri?",
                "stream": false,
                "options": {"temperature": 0.0},
            })))
            .with_status(200)
            .with_body(r#"{"model":"llama3.1","response":"On the Odisha coast.","done":true}"#)
            .create_async()
            .await;

        let answer = provider(&server.url()).complete("Where is Puri?").await.unwrap();
        mock.assert_async().await;
        assert_eq!(answer, "On the Odisha coast.");
    }

    #[tokio::test]
    async fn complete_surfaces_http_errors_with_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(404)
            .with_body(r#"{"error":"model 'llama3.1' not found"}"#)
            .create_async()
            .await;

        let err = provider(&server.url()).complete("hi").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("404"), "{msg}");
        assert!(msg.contains("not found"), "{msg}");
    }

    #[tokio::test]
    async fn generate_raw_passes_body_through() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"model":"llama3.1","response":"hello","done":true,"eval_count":3}"#;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::Json(json!({
                "model": "llama3.1",
                "prompt": "say hello",
                "stream": false,
            })))
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let raw = provider(&format!("{}/", server.url()))
            .generate_raw("say hello")
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(raw, body);
    }

    #[test]
    fn temperature_is_configurable() {
        let p = provider("http://ollama:11434").with_temperature(0.7);
        assert_eq!(p.temperature, 0.7);
        assert_eq!(p.id(), "llama3.1");
        assert_eq!(p.generate_url(), "http://ollama:11434/api/generate");
    }
}
