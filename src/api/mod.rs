use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`.
#[derive(Serialize, Debug)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

/// The fields of a non-streamed generate reply that the client reads.
#[derive(Deserialize, Debug)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
    /// Nanoseconds the server spent on the request.
    #[serde(default)]
    pub total_duration: Option<u64>,
    #[serde(default)]
    pub eval_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_disables_streaming() {
        let request = GenerateRequest {
            model: "llama3.2",
            prompt: "Hello",
            stream: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"model": "llama3.2", "prompt": "Hello", "stream": false})
        );
    }

    #[test]
    fn response_tolerates_missing_metadata() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"response":"Hi there!"}"#).unwrap();
        assert_eq!(parsed.response, "Hi there!");
        assert!(parsed.done.is_none());
    }

    #[test]
    fn response_requires_text_field() {
        assert!(serde_json::from_str::<GenerateResponse>(r#"{"done":true}"#).is_err());
    }
}
