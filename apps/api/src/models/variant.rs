use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::resume::Section;

/// Per-section visibility override carried by a variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSectionSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A filter or limit directive applied during resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Rule {
    IncludeTags(Vec<String>),
    ExcludeTags(Vec<String>),
    MaxBullets(usize),
    /// Accepted but inert: resolution passes the document through unchanged.
    SectionOrder(Vec<String>),
    DateRange(DateRange),
}

impl Rule {
    pub const KINDS: [&'static str; 5] = [
        "include_tags",
        "exclude_tags",
        "max_bullets",
        "section_order",
        "date_range",
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            Rule::IncludeTags(_) => "include_tags",
            Rule::ExcludeTags(_) => "exclude_tags",
            Rule::MaxBullets(_) => "max_bullets",
            Rule::SectionOrder(_) => "section_order",
            Rule::DateRange(_) => "date_range",
        }
    }
}

/// A path-addressed field mutation applied after all rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Override {
    Set { path: String, value: Value },
    Add { path: String, value: Value },
    Remove {
        path: String,
        #[serde(default)]
        value: Value,
    },
}

impl Override {
    pub const OPERATIONS: [&'static str; 3] = ["set", "add", "remove"];

    pub fn path(&self) -> &str {
        match self {
            Override::Set { path, .. } | Override::Add { path, .. } | Override::Remove { path, .. } => {
                path
            }
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            Override::Set { .. } => "set",
            Override::Add { .. } => "add",
            Override::Remove { .. } => "remove",
        }
    }
}

/// A validated variant: pure specification, never resolved content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSpec {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub section_settings: BTreeMap<Section, VariantSectionSetting>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub overrides: Vec<Override>,
}

/// Sections hidden unless a variant explicitly turns them on.
const OPT_IN_SECTIONS: [Section; 2] = [Section::Summary, Section::KeyAchievements];

impl VariantSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            section_settings: BTreeMap::new(),
            rules: Vec::new(),
            overrides: Vec::new(),
        }
    }

    /// Visibility of every section after applying defaults to the explicit settings.
    /// This is the only place section defaults for variants are decided.
    pub fn effective_section_settings(&self) -> BTreeMap<Section, bool> {
        Section::ALL
            .iter()
            .map(|section| {
                let default_enabled = !OPT_IN_SECTIONS.contains(section);
                let enabled = self
                    .section_settings
                    .get(section)
                    .and_then(|s| s.enabled)
                    .unwrap_or(default_enabled);
                (*section, enabled)
            })
            .collect()
    }
}

/// Variant as received from a caller, before rules and overrides are checked.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariantSpec {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub section_settings: BTreeMap<Section, VariantSectionSetting>,
    #[serde(default)]
    pub rules: Vec<Value>,
    #[serde(default)]
    pub overrides: Vec<Value>,
}
