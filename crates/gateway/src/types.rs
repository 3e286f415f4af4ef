//! Request parameters and response bodies for the HTTP endpoints.

use serde::{Deserialize, Serialize};

/// Query string of `POST /embedToModel`.
#[derive(Debug, Deserialize)]
pub struct EmbedParams {
    pub file_path: String,
    #[serde(default)]
    pub force: bool,
}

/// Query string of `POST /askEmbeddedModel`.
#[derive(Debug, Deserialize)]
pub struct AskEmbeddedParams {
    pub query: String,
    pub file_path: String,
}

#[derive(Debug, Deserialize)]
pub struct AskModelParams {
    pub query: String,
}

/// Query string of `GET /AskModel`.
#[derive(Debug, Deserialize)]
pub struct RawGenerateParams {
    pub prompt: String,
}

/// JSON body of `POST /query`.
#[derive(Debug, Deserialize)]
pub struct QueryBody {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A fragment handed to the model as context.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceFragment {
    pub source: String,
    pub page_content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskEmbeddedResponse {
    pub answer: String,
    pub sources: Vec<SourceFragment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}
