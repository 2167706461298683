//! Tool record schema
//!
//! One typed record replaces the per-page mock object shapes. Optional
//! fields carry explicit serde defaults so partial seed entries still load.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed set of category tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Writing,
    Design,
    Productivity,
    FileConversion,
    Education,
    Finance,
    ResumeBuilding,
    ImageEditing,
    VoiceTools,
    PdfTools,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Writing,
        Category::Design,
        Category::Productivity,
        Category::FileConversion,
        Category::Education,
        Category::Finance,
        Category::ResumeBuilding,
        Category::ImageEditing,
        Category::VoiceTools,
        Category::PdfTools,
    ];

    /// Wire value, also used for text matching
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Writing => "writing",
            Category::Design => "design",
            Category::Productivity => "productivity",
            Category::FileConversion => "file-conversion",
            Category::Education => "education",
            Category::Finance => "finance",
            Category::ResumeBuilding => "resume-building",
            Category::ImageEditing => "image-editing",
            Category::VoiceTools => "voice-tools",
            Category::PdfTools => "pdf-tools",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Writing => "Writing",
            Category::Design => "Design",
            Category::Productivity => "Productivity",
            Category::FileConversion => "File Conversion",
            Category::Education => "Education",
            Category::Finance => "Finance",
            Category::ResumeBuilding => "Resume Building",
            Category::ImageEditing => "Image Editing",
            Category::VoiceTools => "Voice Tools",
            Category::PdfTools => "PDF Tools",
        }
    }

    /// Look up a category by its wire value
    pub fn from_slug(slug: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == slug)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Active,
    Inactive,
}

impl ToolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Active => "active",
            ToolStatus::Inactive => "inactive",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<ToolStatus> {
        match value {
            "active" => Some(ToolStatus::Active),
            "inactive" => Some(ToolStatus::Inactive),
            _ => None,
        }
    }

    pub fn flipped(self) -> ToolStatus {
        match self {
            ToolStatus::Active => ToolStatus::Inactive,
            ToolStatus::Inactive => ToolStatus::Active,
        }
    }
}

/// What a tool page asks the user for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    File,
    Image,
    Audio,
    Video,
    Form,
    None,
}

impl InputKind {
    /// Upload-style inputs are satisfied by a file name rather than text
    pub fn is_upload(&self) -> bool {
        matches!(
            self,
            InputKind::File | InputKind::Image | InputKind::Audio | InputKind::Video
        )
    }
}

/// What a tool page produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    #[default]
    Text,
    Code,
    File,
    Image,
    Audio,
    Video,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdPosition {
    Top,
    Middle,
    Bottom,
    Sidebar,
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default = "default_status")]
    pub status: ToolStatus,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub usage: u64,
    pub last_updated: NaiveDate,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub input_kind: InputKind,
    #[serde(default)]
    pub output_kind: OutputKind,
    #[serde(default)]
    pub input_placeholder: Option<String>,
    #[serde(default)]
    pub output_placeholder: Option<String>,
    #[serde(default = "default_ad_positions")]
    pub ad_positions: Vec<AdPosition>,
}

impl ToolRecord {
    /// Minimal record with every optional field at its default
    pub fn new(
        id: &str,
        name: &str,
        description: &str,
        category: Category,
        status: ToolStatus,
        last_updated: NaiveDate,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
            status,
            views: 0,
            usage: 0,
            last_updated,
            icon: None,
            instructions: None,
            example: None,
            input_kind: InputKind::default(),
            output_kind: OutputKind::default(),
            input_placeholder: None,
            output_placeholder: None,
            ad_positions: default_ad_positions(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ToolStatus::Active
    }
}

fn default_status() -> ToolStatus {
    ToolStatus::Active
}

pub fn default_ad_positions() -> Vec<AdPosition> {
    vec![AdPosition::Top, AdPosition::Middle, AdPosition::Bottom]
}
