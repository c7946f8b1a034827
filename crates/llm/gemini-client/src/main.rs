//! Manual smoke check: `cargo run -p gemini-client -- "your prompt"` with GEMINI_API_KEY set.

use gemini_client::{GeminiClient, DEFAULT_MODEL};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY environment variable not set"))?;

    let client = match std::env::var("GEMINI_BASE_URL") {
        Ok(base_url) => GeminiClient::with_base_url(api_key, base_url),
        Err(_) => GeminiClient::new(api_key),
    };
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

    let prompt = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let prompt = if prompt.is_empty() {
        "Hello, how are you?".to_string()
    } else {
        prompt
    };

    let response = client.generate_content(&model, &prompt).await?;
    println!("Response: {}", response);

    Ok(())
}
