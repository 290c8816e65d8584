//! Generates the hero carousel photos once and stores them as a JSON array of
//! `data:` URLs.

use anyhow::Context;
use autogen::configuration::Settings;
use autogen::image_generation::ImageClient;
use autogen::telemetry::{get_subscriber, init_subscriber};

const PROMPTS: [&str; 3] = [
    "A professional photograph of a silver 2011 Lexus CT200h hatchback driving car. The car has 'Autogen' driving school signs and branding on the doors and a roof sign. High quality, realistic, parked on a modern suburban street.",
    "A silver 2011 Lexus hatchback with 'Autogen' driving school decals on the side. The car is shown from a 45-degree front angle. Bright daylight, professional automotive photography.",
    "A silver 2011 Lexus hatchback driving on a road, featuring 'Autogen' driving school signage. The car is a 2011 model hatchback. Sharp focus, realistic textures.",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("generate-images".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = Settings::get()
        .context("Failed to read configuration.")?
        .image_generation;
    let api_key = config
        .api_key
        .clone()
        .context("APP_IMAGE_GENERATION__API_KEY is not set")?;
    let client = ImageClient::new(
        config.base_url.clone(),
        api_key,
        config.model.clone(),
        config.timeout(),
    );

    let mut image_urls = Vec::new();
    for (index, prompt) in PROMPTS.iter().enumerate() {
        tracing::info!(image = index + 1, total = PROMPTS.len(), "Generating image");
        let urls = client
            .generate(prompt, &config.aspect_ratio)
            .await
            .with_context(|| format!("Failed to generate image {}", index + 1))?;
        image_urls.extend(urls);
    }

    let json = serde_json::to_string(&image_urls)?;
    tokio::fs::write(&config.output_path, json)
        .await
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;

    tracing::info!(
        count = image_urls.len(),
        path = %config.output_path.display(),
        "Images generated and saved"
    );

    Ok(())
}
