// Minimal offline run: every style rendered without any network service

use pin_compositor::{
    canvas::{PIN_HEIGHT, PIN_WIDTH},
    composition::{PinEngine, PinRequest},
    config::Config,
    providers::Providers,
    styles::StyleConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::WARN).init();

    println!("📌 Testing Pin-Compositor Core Functionality");

    // Test 1: Configuration
    println!("\n1. Testing Configuration...");
    let mut config = Config::default();
    config.style = StyleConfig::default().set("cta", "READ MORE").set("reflection", true);
    config.validate()?;
    println!("   Canvas: {}x{} @ quality {}", PIN_WIDTH, PIN_HEIGHT, config.output.jpeg_quality);

    // Test 2: Offline engine
    println!("\n2. Testing Offline Engine...");
    let engine = PinEngine::new(config, Providers::offline())?;
    let available = engine.registry().available_styles();
    println!("   Available styles: {:?}", available);

    // Test 3: Render each style
    println!("\n3. Rendering every style...");
    let out_dir = std::env::temp_dir().join("pin-compositor-minimal");
    for name in &available {
        let request = PinRequest::new(
            "Earn $3,800 a month with faceless pins",
            "Zero experience needed",
            out_dir.join(format!("{name}.png")),
        )
        .niche("AI Automation")
        .style(name.as_str());

        match engine.render_pin(&request).await {
            Ok(path) => println!("   ✅ {} -> {}", name, path.display()),
            Err(e) => {
                println!("   ❌ {} failed: {}", name, e.user_message());
                return Err(e.into());
            }
        }
    }

    // Test 4: Viral hook fallback
    println!("\n4. Testing Viral Hook...");
    let hook = engine.prompts().viral_hook("Pinterest Automation", "Wealth", None).await;
    println!("   Hook: {}", hook);

    println!("\n🎉 All renders completed. Output in {}", out_dir.display());
    Ok(())
}
