//! OpenAI-compatible embeddings provider (`/v1/embeddings`).
//!
//! Works against api.openai.com as well as self-hosted servers that speak the
//! same protocol, e.g. Hugging Face text-embeddings-inference serving
//! `sentence-transformers/all-MiniLM-L6-v2`. The API key is optional because
//! most self-hosted servers do not check one.

use std::time::Duration;

use {
    async_trait::async_trait,
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

use crate::embeddings::EmbeddingProvider;

pub struct OpenAiEmbeddingProvider {
    client: reqwest::Client,
    api_key: Option<Secret<String>>,
    endpoint: String,
    model: String,
    dims: usize,
}

/// Resolve the embeddings URL from a configured base.
///
/// Accepts a bare host (`http://tei:8080`), a versioned root
/// (`https://api.openai.com/v1`) or the full endpoint.
fn embeddings_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/embeddings") {
        return base.to_string();
    }
    let versioned = base
        .rsplit_once('/')
        .and_then(|(_, last)| last.strip_prefix('v'))
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
    if versioned {
        format!("{base}/embeddings")
    } else {
        format!("{base}/v1/embeddings")
    }
}

impl OpenAiEmbeddingProvider {
    pub fn new(base_url: &str, model: String, dims: usize) -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .build()?,
            api_key: None,
            endpoint: embeddings_url(base_url),
            model,
            dims,
        })
    }

    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("empty embedding response"))
    }

    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
            });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let mut resp = request
            .send()
            .await?
            .error_for_status()?
            .json::<EmbeddingResponse>()
            .await?;

        if resp.data.len() != texts.len() {
            anyhow::bail!(
                "embedding server returned {} vectors for {} inputs",
                resp.data.len(),
                texts.len()
            );
        }
        // `data` is documented as ordered, but `index` is authoritative when present.
        resp.data.sort_by_key(|d| d.index.unwrap_or(usize::MAX));
        Ok(resp.data.into_iter().map(|d| d.embedding).collect())
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, mockito::Matcher};

    #[test]
    fn url_resolution() {
        for (base, expected) in [
            ("https://api.openai.com", "https://api.openai.com/v1/embeddings"),
            ("https://api.openai.com/v1", "https://api.openai.com/v1/embeddings"),
            ("http://tei:8080/v1/", "http://tei:8080/v1/embeddings"),
            ("http://tei:8080/v1/embeddings", "http://tei:8080/v1/embeddings"),
            ("http://gateway/openai/v2", "http://gateway/openai/v2/embeddings"),
            ("http://host/video", "http://host/video/v1/embeddings"),
        ] {
            assert_eq!(embeddings_url(base), expected, "{base}");
        }
    }

    #[tokio::test]
    async fn sends_bearer_token_when_configured() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/embeddings")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJsonString(
                r#"{"model":"text-embedding-3-small"}"#.into(),
            ))
            .with_status(200)
            .with_body(r#"{"data":[{"index":0,"embedding":[0.5,0.5]}]}"#)
            .create_async()
            .await;

        let provider = OpenAiEmbeddingProvider::new(&server.url(), "text-embedding-3-small".into(), 2)
            .unwrap()
            .with_api_key(Secret::new("sk-test".into()));
        let v = provider.embed("coast").await.unwrap();

        mock.assert_async().await;
        assert_eq!(v, vec![0.5, 0.5]);
    }

    #[tokio::test]
    async fn omits_auth_header_without_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/embeddings")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"data":[{"embedding":[1.0]}]}"#)
            .create_async()
            .await;

        let provider = OpenAiEmbeddingProvider::new(&server.url(), "all-MiniLM-L6-v2".into(), 1)
            .unwrap();
        provider.embed("x").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn reorders_by_index() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/embeddings")
            .with_status(200)
            .with_body(
                r#"{"data":[{"index":1,"embedding":[2.0]},{"index":0,"embedding":[1.0]}]}"#,
            )
            .create_async()
            .await;

        let provider = OpenAiEmbeddingProvider::new(&server.url(), "m".into(), 1).unwrap();
        let out = provider
            .embed_batch(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(out, vec![vec![1.0], vec![2.0]]);
    }
}
