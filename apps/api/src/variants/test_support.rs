//! Shared resume fixtures for variant tests.

use chrono::NaiveDate;

use crate::models::resume::{EntryId, ExperienceEntry, Resume, Skills};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Entry whose bullets read "<company> bullet 1", "<company> bullet 2", ...
pub fn make_entry(company: &str, tags: &[&str], bullets: usize, start: &str) -> ExperienceEntry {
    ExperienceEntry {
        id: EntryId::generate(),
        company: company.to_string(),
        title: "Manager".to_string(),
        location: "Remote".to_string(),
        start_date: Some(start.to_string()),
        end_date: None,
        bullets: (1..=bullets)
            .map(|i| format!("{company} bullet {i}"))
            .collect(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn make_resume(experience: Vec<ExperienceEntry>) -> Resume {
    Resume {
        name: "Jordan Reyes".to_string(),
        headline: "Security Program Manager".to_string(),
        summary: vec![
            "Twelve years in security programs".to_string(),
            "Built audit functions from scratch".to_string(),
        ],
        key_achievements: vec!["Cut audit findings by 60%".to_string()],
        experience,
        skills: Skills {
            primary: vec!["Risk Management".to_string()],
            secondary: vec!["Python".to_string()],
        },
        ..Resume::default()
    }
}

/// The two-entry master used by the end-to-end scenarios.
pub fn grc_partner_master() -> Resume {
    make_resume(vec![
        make_entry("Acme", &["GRC"], 3, "2019-03-01"),
        make_entry("Globex", &["Partner"], 3, "2021-07-01"),
    ])
}
