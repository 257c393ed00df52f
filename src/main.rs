use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pin_compositor::{
    composition::{PinEngine, PinRequest},
    config::Config,
    palette,
    providers::Providers,
    styles::DEFAULT_STYLE,
};

#[derive(Parser)]
#[command(
    name = "pin-compositor",
    version,
    about = "Compose vertical marketing pins with generated backgrounds and fitted typography",
    long_about = "Pin-Compositor renders 2:3 marketing pins: it synthesizes a background prompt, acquires an image with retries and fallbacks, applies editorial filters and lays out the headline in one of several styles."
)]
struct Cli {
    /// Pin title, used as the headline unless a design brief provides one
    #[arg(short, long, required_unless_present_any = ["list_styles", "viral_hook"])]
    title: Option<String>,

    /// Subtitle text
    #[arg(short, long, default_value = "")]
    description: String,

    /// Output image path (.png, or .jpg/.jpeg for JPEG)
    #[arg(short, long, required_unless_present_any = ["list_styles", "viral_hook"])]
    output: Option<PathBuf>,

    /// Topical niche steering prompts and palettes
    #[arg(short, long, default_value = "Wealth")]
    niche: String,

    /// Pin style to render
    #[arg(short, long, default_value = DEFAULT_STYLE)]
    style: String,

    /// Trending aesthetic (poetcore, vamp_romantic, cherry_coded, expedition, funhaus)
    #[arg(short, long)]
    aesthetic: Option<String>,

    /// Use this image as the background when it downloads cleanly
    #[arg(long)]
    base_image_url: Option<String>,

    /// Print a viral hook for this product instead of rendering
    #[arg(long, value_name = "PRODUCT")]
    viral_hook: Option<String>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List available styles and aesthetics, then exit
    #[arg(long)]
    list_styles: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the default level
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    info!("Starting Pin-Compositor v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    let providers = Providers::from_config(&config.providers)?;
    let engine = PinEngine::new(config, providers)?;

    if cli.list_styles {
        for name in engine.registry().available_styles() {
            if let Some(summary) = engine.registry().describe(&name) {
                println!("{summary}");
            }
        }
        let aesthetics: Vec<String> = palette::aesthetic_keys().map(str::to_lowercase).collect();
        println!("\naesthetics: {}", aesthetics.join(", "));
        return Ok(());
    }

    if let Some(product) = &cli.viral_hook {
        let hook = engine
            .prompts()
            .viral_hook(product, &cli.niche, cli.aesthetic.as_deref())
            .await;
        println!("{hook}");
        return Ok(());
    }

    let (Some(title), Some(output)) = (cli.title, cli.output) else {
        bail!("--title and --output are required to render a pin");
    };

    info!("Title: {}", title);
    info!("Output: {:?}", output);
    info!("Style: {} | Niche: {}", cli.style, cli.niche);

    let mut request = PinRequest::new(title, cli.description, output)
        .niche(cli.niche)
        .style(cli.style);
    if let Some(aesthetic) = cli.aesthetic {
        request = request.aesthetic(aesthetic);
    }
    if let Some(url) = cli.base_image_url {
        request = request.base_image_url(url);
    }

    let written = engine.render_pin(&request).await?;
    info!("Pin complete! Output saved to: {:?}", written);
    Ok(())
}
