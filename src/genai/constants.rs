pub const API_BASE: &str = "https://bam-api.res.ibm.com/v1";
pub const GENERATE_ENDPOINT: &str = "/generate";
pub const API_KEY_ENV_VAR: &str = "GENAI_KEY";
pub const API_ENDPOINT_ENV_VAR: &str = "GENAI_API";
