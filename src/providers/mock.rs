//! Scripted in-memory providers for tests

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;
use image::{ImageOutputFormat, RgbImage};

use crate::error::{ProviderError, ProviderResult};

use super::{ImageDownloader, ImageGenerator, ImageRequest, ProviderResponse, StockImageSource, TextGenerator};

/// Encode an image as PNG bytes, the way a provider would send it
pub fn png_bytes(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageOutputFormat::Png)
        .expect("encoding an in-memory PNG cannot fail");
    bytes.into_inner()
}

pub fn status(code: u16) -> ProviderResult<ProviderResponse> {
    Ok(ProviderResponse { status: code, bytes: Vec::new() })
}

pub fn image_ok(image: &RgbImage) -> ProviderResult<ProviderResponse> {
    Ok(ProviderResponse::ok(png_bytes(image)))
}

pub fn timeout(provider: &str) -> ProviderResult<ProviderResponse> {
    Err(ProviderError::Timeout { provider: provider.to_string() })
}

/// Replays a fixed script of responses; answers 500 once the script runs out
#[derive(Default)]
pub struct ScriptedImages {
    script: Mutex<VecDeque<ProviderResult<ProviderResponse>>>,
    calls: Mutex<Vec<(String, u64)>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedImages {
    pub fn new(script: Vec<ProviderResult<ProviderResponse>>) -> Self {
        Self { script: Mutex::new(script.into()), ..Default::default() }
    }

    /// Prompts of every generation request received
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// (model, seed) of every request received
    pub fn calls(&self) -> Vec<(String, u64)> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self) -> ProviderResult<ProviderResponse> {
        self.script.lock().unwrap().pop_front().unwrap_or_else(|| status(500))
    }
}

#[async_trait]
impl ImageGenerator for ScriptedImages {
    fn name(&self) -> &str {
        "scripted-generator"
    }

    async fn generate(&self, request: &ImageRequest<'_>) -> ProviderResult<ProviderResponse> {
        self.calls.lock().unwrap().push((request.model.to_string(), request.seed));
        self.prompts.lock().unwrap().push(request.prompt.to_string());
        self.next()
    }
}

#[async_trait]
impl StockImageSource for ScriptedImages {
    fn name(&self) -> &str {
        "scripted-stock"
    }

    async fn random_image(&self, _width: u32, _height: u32, seed: u64) -> ProviderResult<ProviderResponse> {
        self.calls.lock().unwrap().push(("stock".to_string(), seed));
        self.next()
    }
}

#[async_trait]
impl ImageDownloader for ScriptedImages {
    async fn download(&self, url: &str) -> ProviderResult<ProviderResponse> {
        self.calls.lock().unwrap().push((url.to_string(), 0));
        self.next()
    }
}

/// Text generator replaying canned completions
#[derive(Default)]
pub struct ScriptedText {
    script: Mutex<VecDeque<ProviderResult<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedText {
    pub fn new(script: Vec<ProviderResult<String>>) -> Self {
        Self { script: Mutex::new(script.into()), prompts: Mutex::new(Vec::new()) }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn failing() -> Self {
        Self::new(vec![Err(ProviderError::Timeout { provider: "scripted-text".to_string() })])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedText {
    fn name(&self) -> &str {
        "scripted-text"
    }

    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(ProviderError::Status { provider: "scripted-text".to_string(), status: 503 })
        })
    }
}
