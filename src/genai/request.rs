use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodingMethod {
    Greedy,
    Sample,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LengthPenalty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decay_factor: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
}

/// Which optional fields the service should echo back with each result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReturnOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_text: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_tokens: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_logprobs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_ranks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n_tokens: Option<u32>,
}

/// Generation knobs sent verbatim to the service.
///
/// Unset fields are left out of the request so the service defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoding_method: Option<DecodingMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_penalty: Option<LengthPenalty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Milliseconds the service may spend generating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typical_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncate_input_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beam_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_options: Option<ReturnOptions>,
}

impl GenerateParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stream_enabled(&self) -> bool {
        self.stream == Some(true)
    }

    pub fn decoding_method(mut self, method: DecodingMethod) -> Self {
        self.decoding_method = Some(method);
        self
    }

    pub fn max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = Some(max_new_tokens);
        self
    }

    pub fn min_new_tokens(mut self, min_new_tokens: u32) -> Self {
        self.min_new_tokens = Some(min_new_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = Some(stop_sequences);
        self
    }

    pub fn add_stop_sequence(mut self, stop_sequence: impl Into<String>) -> Self {
        let sequences = self.stop_sequences.get_or_insert_with(Vec::new);
        sequences.push(stop_sequence.into());
        self
    }

    pub fn return_options(mut self, options: ReturnOptions) -> Self {
        self.return_options = Some(options);
        self
    }
}

/// Body of a generate call.
#[derive(Debug, Serialize)]
pub(crate) struct Request<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<&'a str>,
    pub inputs: &'a [String],
    pub parameters: GenerateParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_fields_are_omitted() {
        let params = GenerateParams::new().max_new_tokens(20);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({ "max_new_tokens": 20 })
        );
    }

    #[test]
    fn rejects_unknown_parameter() {
        let result: Result<GenerateParams, _> =
            serde_json::from_value(json!({ "max_new_tokens": 5, "max_tokens": 5 }));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("max_tokens"));
    }

    #[test]
    fn builder_setters_chain() {
        let params = GenerateParams::new()
            .decoding_method(DecodingMethod::Sample)
            .temperature(0.5)
            .add_stop_sequence("\n\n")
            .add_stop_sequence("Human:")
            .stream(true);

        assert!(params.stream_enabled());
        assert_eq!(
            params.stop_sequences,
            Some(vec!["\n\n".to_string(), "Human:".to_string()])
        );
        assert_eq!(
            serde_json::to_value(&params).unwrap()["decoding_method"],
            "sample"
        );
    }

    #[test]
    fn stream_disabled_by_default() {
        assert!(!GenerateParams::default().stream_enabled());
        assert!(!GenerateParams::new().stream(false).stream_enabled());
    }

    #[test]
    fn request_omits_missing_model() {
        let inputs = vec!["Hello".to_string()];
        let request = Request {
            model_id: None,
            inputs: &inputs,
            parameters: GenerateParams::default(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "inputs": ["Hello"], "parameters": {} })
        );
    }
}
