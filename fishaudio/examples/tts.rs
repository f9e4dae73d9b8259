//! Speech synthesis example.
//!
//! Run with:
//! ```bash
//! export FISH_API_KEY="your-api-key"
//! cargo run -p ttskit-fishaudio --example tts -- <reference-id> "Hello there"
//! ```

use std::env;

use ttskit_fishaudio::{AudioFormat, Client, TtsRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = env::var("FISH_API_KEY").map_err(|_| "FISH_API_KEY environment variable not set")?;

    let mut args = env::args().skip(1);
    let reference_id = args.next().ok_or("usage: tts <reference-id> <text>")?;
    let text = args.collect::<Vec<_>>().join(" ");

    let client = Client::new(api_key)?;

    let req = TtsRequest::new(text, reference_id).format(AudioFormat::Mp3);
    let audio = client.tts().convert(&req).await?;

    std::fs::write("output.mp3", &audio)?;
    println!("Saved {} bytes to output.mp3", audio.len());

    Ok(())
}
