use dotenv::dotenv;
use genai_adapter::{Credentials, GenerateParams, GenerationAdapter, genai::DecodingMethod};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("genai_adapter=info")),
        )
        .init();

    let llm = GenerationAdapter::builder()
        .model("google/flan-ul2")
        .params(
            GenerateParams::new()
                .decoding_method(DecodingMethod::Greedy)
                .max_new_tokens(100)
                .min_new_tokens(10),
        )
        .credentials(Credentials::from_env()?)
        .build()?;

    let stop = vec!["\n\n".to_string()];
    let answer = llm
        .complete("What is a molecule?", Some(&stop[..]), None)
        .await?;

    println!("Assistant:\n{answer}");

    Ok(())
}
