//! Site settings — held per admin session; saving is simulated

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub site_name: String,
    pub site_description: String,
    pub site_url: String,
    pub logo_url: String,
    pub favicon_url: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub google_analytics_id: String,
    pub meta_keywords: String,
    pub enable_dark_mode: bool,
    pub default_theme: Theme,
    pub show_cookie_banner: bool,
    pub enable_search_suggestions: bool,
    pub tools_per_page: u32,
    pub featured_tools_count: u32,
    pub enable_social_sharing: bool,
    pub enable_newsletter: bool,
    pub footer_text: String,
    pub custom_css: String,
    pub custom_js: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "AI Tools".into(),
            site_description: "Discover 400+ useful AI tools for daily tasks across various categories".into(),
            site_url: "https://www.aitools-example.com".into(),
            logo_url: "/logo.svg".into(),
            favicon_url: "/favicon.ico".into(),
            primary_color: "#0ea5e9".into(),
            secondary_color: "#8b5cf6".into(),
            google_analytics_id: "UA-XXXXXXXXX-X".into(),
            meta_keywords: "ai tools, artificial intelligence, productivity tools, writing tools, design tools".into(),
            enable_dark_mode: true,
            default_theme: Theme::System,
            show_cookie_banner: true,
            enable_search_suggestions: true,
            tools_per_page: 12,
            featured_tools_count: 6,
            enable_social_sharing: true,
            enable_newsletter: false,
            footer_text: "© 2023 AI Tools. All rights reserved.".into(),
            custom_css: String::new(),
            custom_js: String::new(),
        }
    }
}

impl SiteSettings {
    /// Current settings with `patch` merged in, validated as a whole
    pub fn patched(&self, patch: SiteSettingsPatch) -> Result<SiteSettings, SettingsError> {
        let mut updated = self.clone();
        patch.apply(&mut updated);
        updated.validate()?;
        Ok(updated)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.site_name.trim().is_empty() {
            return Err(SettingsError::EmptySiteName);
        }
        if !(1..=100).contains(&self.tools_per_page) {
            return Err(SettingsError::ToolsPerPage(self.tools_per_page));
        }
        if !(1..=50).contains(&self.featured_tools_count) {
            return Err(SettingsError::FeaturedCount(self.featured_tools_count));
        }
        for color in [&self.primary_color, &self.secondary_color] {
            if !is_hex_color(color) {
                return Err(SettingsError::InvalidColor(color.clone()));
            }
        }
        Ok(())
    }
}

/// Partial update from the settings form; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteSettingsPatch {
    pub site_name: Option<String>,
    pub site_description: Option<String>,
    pub site_url: Option<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub google_analytics_id: Option<String>,
    pub meta_keywords: Option<String>,
    pub enable_dark_mode: Option<bool>,
    pub default_theme: Option<Theme>,
    pub show_cookie_banner: Option<bool>,
    pub enable_search_suggestions: Option<bool>,
    pub tools_per_page: Option<u32>,
    pub featured_tools_count: Option<u32>,
    pub enable_social_sharing: Option<bool>,
    pub enable_newsletter: Option<bool>,
    pub footer_text: Option<String>,
    pub custom_css: Option<String>,
    pub custom_js: Option<String>,
}

impl SiteSettingsPatch {
    fn apply(self, settings: &mut SiteSettings) {
        if let Some(v) = self.site_name {
            settings.site_name = v;
        }
        if let Some(v) = self.site_description {
            settings.site_description = v;
        }
        if let Some(v) = self.site_url {
            settings.site_url = v;
        }
        if let Some(v) = self.logo_url {
            settings.logo_url = v;
        }
        if let Some(v) = self.favicon_url {
            settings.favicon_url = v;
        }
        if let Some(v) = self.primary_color {
            settings.primary_color = v;
        }
        if let Some(v) = self.secondary_color {
            settings.secondary_color = v;
        }
        if let Some(v) = self.google_analytics_id {
            settings.google_analytics_id = v;
        }
        if let Some(v) = self.meta_keywords {
            settings.meta_keywords = v;
        }
        if let Some(v) = self.enable_dark_mode {
            settings.enable_dark_mode = v;
        }
        if let Some(v) = self.default_theme {
            settings.default_theme = v;
        }
        if let Some(v) = self.show_cookie_banner {
            settings.show_cookie_banner = v;
        }
        if let Some(v) = self.enable_search_suggestions {
            settings.enable_search_suggestions = v;
        }
        if let Some(v) = self.tools_per_page {
            settings.tools_per_page = v;
        }
        if let Some(v) = self.featured_tools_count {
            settings.featured_tools_count = v;
        }
        if let Some(v) = self.enable_social_sharing {
            settings.enable_social_sharing = v;
        }
        if let Some(v) = self.enable_newsletter {
            settings.enable_newsletter = v;
        }
        if let Some(v) = self.footer_text {
            settings.footer_text = v;
        }
        if let Some(v) = self.custom_css {
            settings.custom_css = v;
        }
        if let Some(v) = self.custom_js {
            settings.custom_js = v;
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
