use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Named resume sections. Declaration order is the tie-breaker for display ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Headline,
    Summary,
    KeyAchievements,
    Experience,
    Education,
    Awards,
    Certifications,
    Skills,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Headline,
        Section::Summary,
        Section::KeyAchievements,
        Section::Experience,
        Section::Education,
        Section::Awards,
        Section::Certifications,
        Section::Skills,
    ];

    /// Field name of the section in the serialized document.
    pub fn field_name(&self) -> &'static str {
        match self {
            Section::Headline => "headline",
            Section::Summary => "summary",
            Section::KeyAchievements => "keyAchievements",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Awards => "awards",
            Section::Certifications => "certifications",
            Section::Skills => "skills",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSetting {
    pub enabled: bool,
    pub order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub website: String,
    pub linkedin: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Opaque experience identifier. Any string the master carries is accepted;
/// `Resume::add_experience` mints fresh ones from v4 UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads a resume date leniently: `YYYY-MM-DD`, or `YYYY-MM` taken as the first of
/// the month. Anything else (`"Present"`, free text) yields `None`.
pub fn parse_resume_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: EntryId,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    /// Stored as written; see `parse_resume_date`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// `None` or a non-date such as `"Present"` means the position is current.
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ExperienceEntry {
    /// Adds a tag unless the entry already carries it. Returns true when the tag was added.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.tags.iter().any(|t| *t == tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Drops duplicate tags, keeping the first occurrence of each.
    pub fn normalize_tags(&mut self) {
        let mut seen: Vec<String> = Vec::with_capacity(self.tags.len());
        self.tags.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(t.clone());
                true
            }
        });
    }

    pub fn start_day(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(parse_resume_date)
    }

    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }
}

/// Experience fields supplied by the editor before an identifier is assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceDraft {
    pub company: String,
    pub title: String,
    pub location: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub bullets: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AwardEntry {
    pub title: String,
    pub issuer: String,
    pub date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub date_issued: Option<String>,
    pub date_expires: Option<String>,
    pub credential_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
}

/// The master resume, and also the shape of every resolved variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub name: String,
    pub headline: String,
    pub contact: Contact,
    pub summary: Vec<String>,
    pub key_achievements: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub awards: Vec<AwardEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub skills: Skills,
    pub section_settings: BTreeMap<Section, SectionSetting>,
    /// Custom top-level fields, typically introduced by overrides.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for Resume {
    fn default() -> Self {
        Self {
            name: String::new(),
            headline: String::new(),
            contact: Contact::default(),
            summary: Vec::new(),
            key_achievements: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
            awards: Vec::new(),
            certifications: Vec::new(),
            skills: Skills::default(),
            section_settings: default_section_settings(),
            extra: BTreeMap::new(),
        }
    }
}

/// Default section map for a new master. Headline is not part of the map.
pub fn default_section_settings() -> BTreeMap<Section, SectionSetting> {
    Section::ALL
        .iter()
        .filter(|s| **s != Section::Headline)
        .enumerate()
        .map(|(i, s)| {
            (
                *s,
                SectionSetting {
                    enabled: true,
                    order: i as i32,
                },
            )
        })
        .collect()
}

impl Resume {
    /// Appends a new experience entry with a freshly generated identifier.
    /// Identifiers are random v4 UUIDs, so a deleted id is never handed out again.
    pub fn add_experience(&mut self, draft: ExperienceDraft) -> EntryId {
        let id = EntryId::generate();
        let mut entry = ExperienceEntry {
            id: id.clone(),
            company: draft.company,
            title: draft.title,
            location: draft.location,
            start_date: draft.start_date,
            end_date: draft.end_date,
            bullets: draft.bullets,
            tags: draft.tags,
        };
        entry.normalize_tags();
        self.experience.push(entry);
        id
    }

    pub fn remove_experience(&mut self, id: &str) -> bool {
        let before = self.experience.len();
        self.experience.retain(|e| e.id.as_str() != id);
        self.experience.len() != before
    }

    pub fn experience_by_id(&self, id: &str) -> Option<&ExperienceEntry> {
        self.experience.iter().find(|e| e.id.as_str() == id)
    }

    /// Enabled sections sorted by their `order`, ties broken by declaration order.
    pub fn ordered_sections(&self) -> Vec<Section> {
        let mut sections: Vec<(Section, SectionSetting)> = self
            .section_settings
            .iter()
            .filter(|(_, setting)| setting.enabled)
            .map(|(s, setting)| (*s, *setting))
            .collect();
        sections.sort_by_key(|(s, setting)| (setting.order, *s));
        sections.into_iter().map(|(s, _)| s).collect()
    }

    /// Re-establishes per-entry invariants after the document was rebuilt from JSON.
    pub fn normalize(&mut self) {
        for entry in &mut self.experience {
            entry.normalize_tags();
        }
    }

    /// Resets a section to its empty form. Headline becomes `""`.
    pub fn clear_section(&mut self, section: Section) {
        match section {
            Section::Headline => self.headline.clear(),
            Section::Summary => self.summary.clear(),
            Section::KeyAchievements => self.key_achievements.clear(),
            Section::Experience => self.experience.clear(),
            Section::Education => self.education.clear(),
            Section::Awards => self.awards.clear(),
            Section::Certifications => self.certifications.clear(),
            Section::Skills => self.skills = Skills::default(),
        }
    }
}
