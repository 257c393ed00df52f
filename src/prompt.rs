//! # Prompt Synthesizer
//!
//! Builds background-generation prompts from a niche, a subject and an
//! optional aesthetic, then asks the text service to polish them. Refinement
//! is best effort: any failure returns the deterministic base template.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    error::{ProviderError, ProviderResult},
    palette,
    providers::TextGenerator,
};

/// Default pop-culture reference for mashup pins
pub const DEFAULT_MASHUP_TREND: &str = "Spiderman";

/// Hooks longer than this are treated as a rambling completion and discarded
const MAX_HOOK_CHARS: usize = 120;

pub struct PromptSynthesizer {
    text: Option<Arc<dyn TextGenerator>>,
}

impl PromptSynthesizer {
    /// Create a synthesizer; `None` runs purely on templates
    pub fn new(text: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { text }
    }

    /// The deterministic prompt template, before any refinement
    pub fn base_prompt(
        niche: &str,
        subject: &str,
        aesthetic_key: Option<&str>,
        creative_style: Option<&str>,
    ) -> String {
        let style = creative_style
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("editorial");

        let mut prompt = format!(
            "Hyper-realistic {style} photograph for the {niche} niche: {subject}. \
             Shot on a 35mm lens at f/1.8, golden-hour rim lighting, soft volumetric haze, \
             shallow depth of field, rich textures, 8k detail, no text, no letters, no watermark",
            niche = niche.trim(),
            subject = subject.trim().trim_end_matches('.'),
        );

        if let Some(aesthetic) = aesthetic_key.and_then(palette::aesthetic) {
            prompt.push_str(&format!(
                ", styled in a {} aesthetic: {}",
                aesthetic.key.to_lowercase().replace('_', " "),
                aesthetic.description
            ));
        }

        prompt
    }

    /// Build a background prompt, refined by the text service when available
    pub async fn synthesize(
        &self,
        niche: &str,
        subject: &str,
        aesthetic_key: Option<&str>,
        creative_style: Option<&str>,
    ) -> String {
        let base = Self::base_prompt(niche, subject, aesthetic_key, creative_style);

        match self.refine(&base).await {
            Ok(refined) => {
                debug!("Refined prompt: {}", refined);
                refined
            }
            Err(ProviderError::MissingCredential { .. }) => base,
            Err(e) => {
                warn!("Prompt refinement failed, using base template: {}", e);
                base
            }
        }
    }

    async fn refine(&self, base: &str) -> ProviderResult<String> {
        let text = self.text.as_ref().ok_or_else(|| ProviderError::MissingCredential {
            provider: "text".to_string(),
        })?;

        let instruction = format!(
            "Refine the following image prompt into a single hyper-realistic, award-winning \
             image generation prompt. Keep it under 80 words, describe only visuals, and never \
             include text, letters or logos in the scene. Reply with the prompt only.\n\n{base}"
        );

        let reply = text.generate(&instruction).await?;
        let cleaned = clean_completion(&reply);
        if cleaned.is_empty() {
            return Err(ProviderError::MalformedResponse {
                provider: text.name().to_string(),
                reason: "empty refinement".to_string(),
            });
        }
        Ok(cleaned)
    }

    /// A short, mysterious headline for a product
    pub async fn viral_hook(&self, product: &str, niche: &str, trend: Option<&str>) -> String {
        let fallback = fallback_hook(product, niche);
        let Some(text) = self.text.as_ref() else {
            return fallback;
        };

        let mut instruction = format!(
            "Write a 7-word viral hook for a product called '{product}' in the {niche} niche. \
             Make it sound mysterious and elite."
        );
        if let Some(trend) = trend.filter(|t| !t.trim().is_empty()) {
            instruction.push_str(&format!(" Align it with the {trend} aesthetic trend."));
        }
        instruction.push_str(" Reply with the hook only.");

        match text.generate(&instruction).await {
            Ok(reply) => {
                let hook = clean_completion(&reply);
                let hook = hook.lines().next().unwrap_or_default().trim().to_string();
                if hook.is_empty() || hook.chars().count() > MAX_HOOK_CHARS {
                    warn!("Discarding unusable hook completion ({} chars)", hook.chars().count());
                    fallback
                } else {
                    hook
                }
            }
            Err(e) => {
                warn!("Hook generation failed, using template: {}", e);
                fallback
            }
        }
    }

    /// Opening line pairing a pop-culture icon with the product
    pub fn mashup_idea(trend: Option<&str>) -> String {
        let trend = trend
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_MASHUP_TREND);
        format!("How {trend} would solve this: ")
    }
}

/// Hook used when no text service is reachable
pub fn fallback_hook(product: &str, niche: &str) -> String {
    format!("The Hidden {} Strategy Behind {}", niche.trim(), product.trim())
}

/// Strip fences, wrapping quotes and surrounding whitespace from a completion
fn clean_completion(reply: &str) -> String {
    let trimmed = reply.trim();
    let unfenced = trimmed
        .strip_prefix("```")
        .map(|rest| rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    unfenced.replace('"', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::ScriptedText;

    #[tokio::test]
    async fn test_no_credential_returns_base_template() {
        let synth = PromptSynthesizer::new(None);
        let prompt = synth.synthesize("AI Automation", "Secret Hack", None, None).await;

        assert_eq!(prompt, PromptSynthesizer::base_prompt("AI Automation", "Secret Hack", None, None));
        assert!(prompt.contains("AI Automation"));
        assert!(prompt.contains("Secret Hack"));
    }

    #[tokio::test]
    async fn test_no_credential_hook_fallback() {
        let synth = PromptSynthesizer::new(None);
        let hook = synth.viral_hook("Secret Hack", "AI Automation", None).await;

        assert_eq!(hook, "The Hidden AI Automation Strategy Behind Secret Hack");
    }

    #[tokio::test]
    async fn test_refinement_used_when_available() {
        let text = Arc::new(ScriptedText::replying("```text\n\"A lone desk under aurora light\"\n```"));
        let synth = PromptSynthesizer::new(Some(text.clone()));

        let prompt = synth.synthesize("Wealth", "freedom", None, Some("cinematic")).await;
        assert_eq!(prompt, "A lone desk under aurora light");

        let sent = text.prompts();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Hyper-realistic cinematic photograph for the Wealth niche"));
    }

    #[tokio::test]
    async fn test_refinement_failure_is_swallowed() {
        let synth = PromptSynthesizer::new(Some(Arc::new(ScriptedText::failing())));
        let prompt = synth.synthesize("Health", "morning routine", Some("POETCORE"), None).await;

        assert_eq!(prompt, PromptSynthesizer::base_prompt("Health", "morning routine", Some("POETCORE"), None));
        assert!(prompt.contains("fountain pens"));
    }

    #[tokio::test]
    async fn test_hook_is_cleaned() {
        let synth = PromptSynthesizer::new(Some(Arc::new(ScriptedText::replying(
            "\"Unlock The Vault Elite Founders Never Mention\"\nSecond line",
        ))));
        let hook = synth.viral_hook("Vault", "Wealth", Some("FUNHAUS")).await;
        assert_eq!(hook, "Unlock The Vault Elite Founders Never Mention");
    }

    #[test]
    fn test_unknown_aesthetic_adds_nothing() {
        let plain = PromptSynthesizer::base_prompt("Health", "tea", None, None);
        let unknown = PromptSynthesizer::base_prompt("Health", "tea", Some("NONE"), None);
        assert_eq!(plain, unknown);
    }

    #[test]
    fn test_mashup_idea() {
        assert_eq!(PromptSynthesizer::mashup_idea(None), "How Spiderman would solve this: ");
        assert_eq!(PromptSynthesizer::mashup_idea(Some("Batman")), "How Batman would solve this: ");
    }
}
