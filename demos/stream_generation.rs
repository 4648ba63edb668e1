use std::io::{self, Write};

use dotenv::dotenv;
use futures::StreamExt;
use genai_adapter::{Credentials, GenerateParams, GenerateResult, GenerationAdapter, RunManager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("genai_adapter=warn")
        .init();

    let llm = GenerationAdapter::builder()
        .model("google/flan-t5-xxl")
        .params(GenerateParams::new().max_new_tokens(200).temperature(0.7).stream(true))
        .credentials(Credentials::from_env()?)
        .build()?;

    let on_token = |_: &str, response: &GenerateResult| {
        if let Some(reason) = response.stop_reason.as_deref().filter(|r| *r != "NOT_FINISHED") {
            eprintln!("\n[stop reason: {reason}]");
        }
    };
    let run_manager: &dyn RunManager = &on_token;

    let mut chunks = llm.stream_complete(
        "Explain the process of photosynthesis step by step.",
        None,
        Some(run_manager),
    );

    while let Some(chunk) = chunks.next().await {
        print!("{}", chunk?.text);
        io::stdout().flush()?;
    }
    println!();

    Ok(())
}
