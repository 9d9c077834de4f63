//! Diff Engine: summarizes what a variant changed relative to the master.
//!
//! This is a sanity-check report for humans, not a structural diff: it looks at
//! experience identity, list lengths, and a few scalar fields.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::resume::{EntryId, Resume, Section};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum DiffChange {
    ExperienceAdded {
        id: EntryId,
        company: String,
        title: String,
    },
    ExperienceRemoved {
        id: EntryId,
        company: String,
        title: String,
    },
    BulletCount {
        id: EntryId,
        company: String,
        master: usize,
        resolved: usize,
    },
    ListLength {
        field: String,
        master: usize,
        resolved: usize,
    },
    HeadlineChanged {
        master: String,
        resolved: String,
    },
    SectionVisibility {
        section: Section,
        enabled: bool,
    },
}

impl DiffChange {
    pub fn describe(&self) -> String {
        match self {
            DiffChange::ExperienceAdded { company, title, .. } => {
                format!("Experience: {title} at {company}")
            }
            DiffChange::ExperienceRemoved { company, title, .. } => {
                format!("Experience: {title} at {company}")
            }
            DiffChange::BulletCount {
                company,
                master,
                resolved,
                ..
            } => format!("Bullets at {company}: {master} → {resolved}"),
            DiffChange::ListLength {
                field,
                master,
                resolved,
            } => format!("{field}: {master} → {resolved} items"),
            DiffChange::HeadlineChanged { master, resolved } => {
                format!("headline: \"{master}\" → \"{resolved}\"")
            }
            DiffChange::SectionVisibility { section, enabled } => format!(
                "{} section {}",
                section.field_name(),
                if *enabled { "shown" } else { "hidden" }
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<String>,
    pub changes: Vec<DiffChange>,
}

impl DiffReport {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    fn push(&mut self, change: DiffChange) {
        let text = change.describe();
        match change {
            DiffChange::ExperienceAdded { .. } => self.added.push(text),
            DiffChange::ExperienceRemoved { .. } => self.removed.push(text),
            _ => self.modified.push(text),
        }
        self.changes.push(change);
    }
}

pub fn generate_diff(master: &Resume, resolved: &Resume) -> DiffReport {
    let mut report = DiffReport::default();

    let master_ids: HashSet<&EntryId> = master.experience.iter().map(|e| &e.id).collect();
    let resolved_ids: HashSet<&EntryId> = resolved.experience.iter().map(|e| &e.id).collect();

    for entry in resolved.experience.iter().filter(|e| !master_ids.contains(&e.id)) {
        report.push(DiffChange::ExperienceAdded {
            id: entry.id.clone(),
            company: entry.company.clone(),
            title: entry.title.clone(),
        });
    }
    for entry in master.experience.iter().filter(|e| !resolved_ids.contains(&e.id)) {
        report.push(DiffChange::ExperienceRemoved {
            id: entry.id.clone(),
            company: entry.company.clone(),
            title: entry.title.clone(),
        });
    }

    if master.headline != resolved.headline {
        report.push(DiffChange::HeadlineChanged {
            master: master.headline.clone(),
            resolved: resolved.headline.clone(),
        });
    }

    let lengths = [
        ("summary", master.summary.len(), resolved.summary.len()),
        (
            "keyAchievements",
            master.key_achievements.len(),
            resolved.key_achievements.len(),
        ),
        (
            "skills.primary",
            master.skills.primary.len(),
            resolved.skills.primary.len(),
        ),
        (
            "skills.secondary",
            master.skills.secondary.len(),
            resolved.skills.secondary.len(),
        ),
        ("education", master.education.len(), resolved.education.len()),
        ("awards", master.awards.len(), resolved.awards.len()),
        (
            "certifications",
            master.certifications.len(),
            resolved.certifications.len(),
        ),
    ];
    for (field, before, after) in lengths {
        if before != after {
            report.push(DiffChange::ListLength {
                field: field.to_string(),
                master: before,
                resolved: after,
            });
        }
    }

    for (section, setting) in &resolved.section_settings {
        let was_enabled = master
            .section_settings
            .get(section)
            .map(|s| s.enabled)
            .unwrap_or(true);
        if was_enabled != setting.enabled {
            report.push(DiffChange::SectionVisibility {
                section: *section,
                enabled: setting.enabled,
            });
        }
    }

    for entry in &resolved.experience {
        if let Some(original) = master.experience_by_id(entry.id.as_str()) {
            if original.bullets.len() != entry.bullets.len() {
                report.push(DiffChange::BulletCount {
                    id: entry.id.clone(),
                    company: entry.company.clone(),
                    master: original.bullets.len(),
                    resolved: entry.bullets.len(),
                });
            }
        }
    }

    report
}
