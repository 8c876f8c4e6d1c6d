//! Generated site content and the per-subdomain config file payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::request::CreationRequest;

const DEFAULT_TAGLINE: &str = "Professional tools and resources for educators";
const DEFAULT_WELCOME: &str =
    "<p>This subdomain provides specialized tools and resources. Content coming soon!</p>";

/// Theme colors used by the deployed site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary_color: String,
    pub secondary_color: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary_color: "#3498db".to_string(),
            secondary_color: "#2ecc71".to_string(),
        }
    }
}

/// Content applied to the template during the files/config steps.
///
/// A content generator may supply all of this; when generation is skipped or
/// fails, [`GeneratedContent::fallback`] provides deterministic defaults so
/// the saga can always finish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub welcome_title: String,
    pub hero_tagline: String,
    pub welcome_content: String,
    pub theme: ThemeColors,
}

/// Capitalize the first character, e.g. `art` → `Art`.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl GeneratedContent {
    /// Defaults derived from the request: focus over name for the title,
    /// description over the stock tagline.
    #[must_use]
    pub fn fallback(request: &CreationRequest) -> Self {
        let title = request
            .focus
            .as_deref()
            .filter(|f| !f.is_empty())
            .map_or_else(|| capitalize(&request.name), ToString::to_string);
        let tagline = request
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .map_or_else(|| DEFAULT_TAGLINE.to_string(), ToString::to_string);

        Self {
            welcome_title: title,
            hero_tagline: tagline,
            welcome_content: DEFAULT_WELCOME.to_string(),
            theme: ThemeColors::default(),
        }
    }
}

/// Payload of the `config.json` written into each subdomain's document tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub subdomain_name: String,
    pub full_domain: String,
    pub display_name: String,
    pub description: String,
    pub primary_lms: String,
    pub theme: ThemeColors,
    pub database_name: String,
    pub created_at: DateTime<Utc>,
    pub content_generated: bool,
}
