//! Catalog Store — ordered, validated sequence of tool records
//!
//! Insertion order is the display order everywhere. Every operation that
//! changes the catalog returns a new value; the caller decides which copy
//! (shared seed or admin session) it replaces.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::CatalogError;
use crate::model::{AdPosition, Category, InputKind, OutputKind, ToolRecord, ToolStatus};

/// In-memory tool catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    tools: Vec<ToolRecord>,
}

impl Catalog {
    /// Validate records and build a catalog
    pub fn load(records: Vec<ToolRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            validate_slug(&record.id)?;
            if record.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(record.id.clone()));
            }
            if !seen.insert(record.id.as_str()) {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }
        debug!("Loaded catalog with {} tools", records.len());
        Ok(Self { tools: records })
    }

    pub fn as_slice(&self) -> &[ToolRecord] {
        &self.tools
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ToolRecord> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ToolRecord> {
        self.tools.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Identifiers in catalog order
    pub fn ids(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.id.clone()).collect()
    }

    /// Append a new record built from a draft
    pub fn create(&self, draft: ToolDraft, today: NaiveDate) -> Result<(Catalog, ToolRecord), CatalogError> {
        let record = draft.into_record(today)?;
        if self.contains(&record.id) {
            return Err(CatalogError::DuplicateId(record.id));
        }
        let mut tools = self.tools.clone();
        tools.push(record.clone());
        Ok((Catalog { tools }, record))
    }

    /// Apply a patch to an existing record. The id never changes.
    pub fn update(
        &self,
        id: &str,
        patch: ToolPatch,
        today: NaiveDate,
    ) -> Result<(Catalog, ToolRecord), CatalogError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(CatalogError::EmptyName(id.to_string()));
            }
        }

        let mut tools = self.tools.clone();
        let record = tools
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        patch.apply(record);
        record.last_updated = today;
        let updated = record.clone();
        Ok((Catalog { tools }, updated))
    }

    /// Remove every record whose id is in `ids`. Unknown ids are ignored.
    pub fn without<S: AsRef<str>>(&self, ids: &[S]) -> Catalog {
        let tools = self
            .tools
            .iter()
            .filter(|t| !ids.iter().any(|id| id.as_ref() == t.id))
            .cloned()
            .collect();
        Catalog { tools }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ToolRecord;
    type IntoIter = std::slice::Iter<'a, ToolRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.iter()
    }
}

/// Flip one record's status. Unknown ids return the catalog unchanged.
pub fn toggle_status(catalog: &Catalog, id: &str) -> Catalog {
    let tools = catalog
        .tools
        .iter()
        .map(|t| {
            if t.id == id {
                ToolRecord {
                    status: t.status.flipped(),
                    ..t.clone()
                }
            } else {
                t.clone()
            }
        })
        .collect();
    Catalog { tools }
}

/// Fields accepted when creating a tool from the admin form
#[derive(Debug, Clone, Deserialize)]
pub struct ToolDraft {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    pub category: Category,
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
    #[serde(default)]
    pub ad_positions: Option<Vec<AdPosition>>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl ToolDraft {
    fn into_record(self, today: NaiveDate) -> Result<ToolRecord, CatalogError> {
        let slug = match self.slug.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => generate_slug(&self.name),
        };
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName(slug));
        }
        validate_slug(&slug)?;

        let status = if self.active {
            ToolStatus::Active
        } else {
            ToolStatus::Inactive
        };
        let mut record = ToolRecord::new(
            &slug,
            self.name.trim(),
            &self.description,
            self.category,
            status,
            today,
        );
        record.icon = self.icon;
        record.instructions = self.instructions;
        record.example = self.example;
        record.input_kind = self.input_kind;
        record.output_kind = self.output_kind;
        record.input_placeholder = self.input_placeholder;
        record.output_placeholder = self.output_placeholder;
        if let Some(positions) = self.ad_positions {
            record.ad_positions = positions;
        }
        Ok(record)
    }
}

/// Partial update from the admin edit form
///
/// A missing field keeps its value. The optional text fields also accept an
/// explicit `null`, which clears them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub status: Option<ToolStatus>,
    #[serde(default, deserialize_with = "present")]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub instructions: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub example: Option<Option<String>>,
    pub input_kind: Option<InputKind>,
    pub output_kind: Option<OutputKind>,
    #[serde(default, deserialize_with = "present")]
    pub input_placeholder: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub output_placeholder: Option<Option<String>>,
    pub ad_positions: Option<Vec<AdPosition>>,
}

/// Marks a field as present so `null` is told apart from absent
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ToolPatch {
    fn apply(self, record: &mut ToolRecord) {
        if let Some(name) = self.name {
            record.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(icon) = self.icon {
            record.icon = icon;
        }
        if let Some(instructions) = self.instructions {
            record.instructions = instructions;
        }
        if let Some(example) = self.example {
            record.example = example;
        }
        if let Some(kind) = self.input_kind {
            record.input_kind = kind;
        }
        if let Some(kind) = self.output_kind {
            record.output_kind = kind;
        }
        if let Some(placeholder) = self.input_placeholder {
            record.input_placeholder = placeholder;
        }
        if let Some(placeholder) = self.output_placeholder {
            record.output_placeholder = placeholder;
        }
        if let Some(positions) = self.ad_positions {
            record.ad_positions = positions;
        }
    }
}

/// Derive a URL slug from a display name
///
/// Lowercases, drops anything that is not a word character, whitespace or
/// hyphen, turns whitespace runs into a hyphen and collapses repeated hyphens.
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.trim().to_lowercase().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_hyphen = true;
        } else if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        }
    }
    slug
}

/// Check that an id is a non-empty lowercase slug with single hyphens
pub fn validate_slug(id: &str) -> Result<(), CatalogError> {
    if id.is_empty() {
        return Err(CatalogError::EmptyId);
    }
    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid_chars || id.starts_with('-') || id.ends_with('-') || id.contains("--") {
        return Err(CatalogError::InvalidSlug(id.to_string()));
    }
    Ok(())
}
