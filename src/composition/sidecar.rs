use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::brief::DesignBrief;

/// SEO record written beside a brief-driven pin
#[derive(Debug, Clone, PartialEq)]
pub struct SeoSidecar {
    pub title: String,
    pub headline: String,
    pub seo_description: String,
    pub hashtags: Vec<String>,
    pub alt_text: String,
    pub audience: String,
    pub tone: String,
    pub generated_at: DateTime<Utc>,
}

impl SeoSidecar {
    pub fn from_brief(title: &str, brief: &DesignBrief, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: title.trim().to_string(),
            headline: brief.headline.clone(),
            seo_description: brief.seo_description.clone(),
            hashtags: brief.hashtags.clone(),
            alt_text: brief.alt_text.clone(),
            audience: brief.audience.clone(),
            tone: brief.tone.to_string(),
            generated_at,
        }
    }

    /// Plain-text rendering, one field per line
    pub fn render(&self) -> String {
        format!(
            "Title: {}\nHeadline: {}\nDescription: {}\nHashtags: {}\nAlt Text: {}\nAudience: {}\nTone: {}\nGenerated: {}\n",
            self.title,
            self.headline,
            self.seo_description,
            self.hashtags.join(" "),
            self.alt_text,
            self.audience,
            self.tone,
            self.generated_at.to_rfc3339(),
        )
    }
}

/// `<dir>/<stem>_seo.txt` for an asset at `<dir>/<stem>.<ext>`
pub fn sidecar_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pin".to_string());
    output.with_file_name(format!("{stem}_seo.txt"))
}
