//! Rule Evaluator: applies one filter/limit rule to an owned document.
//!
//! Rules only ever narrow the document. Each call consumes the document it is given
//! and hands back the result, so the caller's master is never reachable from here.

use tracing::debug;

use crate::models::resume::{ExperienceEntry, Resume};
use crate::models::variant::{DateRange, Rule};

pub fn apply_rule(mut doc: Resume, rule: &Rule) -> Resume {
    match rule {
        Rule::IncludeTags(tags) => {
            doc.experience.retain(|entry| entry.has_any_tag(tags));
        }
        Rule::ExcludeTags(tags) => {
            doc.experience.retain(|entry| !entry.has_any_tag(tags));
        }
        Rule::MaxBullets(n) => {
            for entry in &mut doc.experience {
                entry.bullets.truncate(*n);
            }
            doc.summary.truncate(*n);
            doc.key_achievements.truncate(*n);
        }
        Rule::SectionOrder(sections) => {
            // Inert: display order comes from sectionSettings, not from this rule.
            debug!(
                "section_order rule ({} sections) left document unchanged",
                sections.len()
            );
        }
        Rule::DateRange(range) => {
            doc.experience
                .retain(|entry| starts_within(entry, range));
        }
    }
    doc
}

/// Only the start date is checked; entries running past `end` are kept.
/// A missing or unreadable start date fails the check.
fn starts_within(entry: &ExperienceEntry, range: &DateRange) -> bool {
    entry
        .start_day()
        .map(|d| range.contains(d))
        .unwrap_or(false)
}

/// Folds every rule over the document in list order.
pub fn apply_rules(doc: Resume, rules: &[Rule]) -> Resume {
    rules.iter().fold(doc, |doc, rule| {
        let before = doc.experience.len();
        let doc = apply_rule(doc, rule);
        debug!(
            "Rule {} kept {}/{} experience entries",
            rule.kind(),
            doc.experience.len(),
            before
        );
        doc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::test_support::{date, make_entry, make_resume};

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_include_tags_is_logical_or() {
        let resume = make_resume(vec![
            make_entry("Acme", &["GRC"], 3, "2020-01-01"),
            make_entry("Globex", &["Partner"], 3, "2021-01-01"),
            make_entry("Initech", &["Cloud"], 3, "2022-01-01"),
        ]);
        let out = apply_rule(resume, &Rule::IncludeTags(tags(&["GRC", "Partner"])));
        let companies: Vec<_> = out.experience.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(companies, vec!["Acme", "Globex"]);
    }

    #[test]
    fn test_include_tags_drops_untagged_entries() {
        let resume = make_resume(vec![
            make_entry("Acme", &[], 2, "2020-01-01"),
            make_entry("Globex", &["GRC"], 2, "2021-01-01"),
        ]);
        let out = apply_rule(resume, &Rule::IncludeTags(tags(&["GRC"])));
        assert_eq!(out.experience.len(), 1);
        assert_eq!(out.experience[0].company, "Globex");
    }

    #[test]
    fn test_include_tags_is_case_sensitive() {
        let resume = make_resume(vec![make_entry("Acme", &["grc"], 1, "2020-01-01")]);
        let out = apply_rule(resume, &Rule::IncludeTags(tags(&["GRC"])));
        assert!(out.experience.is_empty());
    }

    #[test]
    fn test_exclude_tags_keeps_disjoint_and_untagged() {
        let resume = make_resume(vec![
            make_entry("Acme", &["GRC", "Audit"], 2, "2020-01-01"),
            make_entry("Globex", &["Partner"], 2, "2021-01-01"),
            make_entry("Initech", &[], 2, "2022-01-01"),
        ]);
        let out = apply_rule(resume, &Rule::ExcludeTags(tags(&["Audit"])));
        let companies: Vec<_> = out.experience.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(companies, vec!["Globex", "Initech"]);
    }

    #[test]
    fn test_max_bullets_is_prefix() {
        let mut resume = make_resume(vec![make_entry("Acme", &["GRC"], 3, "2020-01-01")]);
        resume.summary = tags(&["s1", "s2", "s3"]);
        resume.key_achievements = tags(&["k1"]);
        let out = apply_rule(resume, &Rule::MaxBullets(2));
        assert_eq!(
            out.experience[0].bullets,
            vec!["Acme bullet 1".to_string(), "Acme bullet 2".to_string()]
        );
        assert_eq!(out.summary, tags(&["s1", "s2"]));
        assert_eq!(out.key_achievements, tags(&["k1"]));
    }

    #[test]
    fn test_max_bullets_zero_empties_lists() {
        let mut resume = make_resume(vec![make_entry("Acme", &["GRC"], 3, "2020-01-01")]);
        resume.summary = tags(&["s1"]);
        let out = apply_rule(resume, &Rule::MaxBullets(0));
        assert!(out.experience[0].bullets.is_empty());
        assert!(out.summary.is_empty());
        assert_eq!(out.experience.len(), 1);
    }

    #[test]
    fn test_section_order_is_inert() {
        let resume = make_resume(vec![make_entry("Acme", &["GRC"], 3, "2020-01-01")]);
        let expected = resume.clone();
        let out = apply_rule(
            resume,
            &Rule::SectionOrder(tags(&["skills", "experience", "education"])),
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_date_range_checks_start_only() {
        let mut resume = make_resume(vec![
            make_entry("Before", &[], 1, "2018-06-01"),
            make_entry("Inside", &[], 1, "2020-01-01"),
            make_entry("Edge", &[], 1, "2021-12-31"),
            make_entry("After", &[], 1, "2022-01-01"),
        ]);
        // ends long after the window but started inside it
        resume.experience[1].end_date = Some("2025-01-01".into());
        resume.experience.push({
            let mut e = make_entry("Undated", &[], 1, "2020-01-01");
            e.start_date = None;
            e
        });
        let out = apply_rule(
            resume,
            &Rule::DateRange(DateRange {
                start: date("2019-01-01"),
                end: date("2021-12-31"),
            }),
        );
        let companies: Vec<_> = out.experience.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(companies, vec!["Inside", "Edge"]);
    }

    #[test]
    fn test_date_range_reads_month_dates() {
        let mut resume = make_resume(vec![
            make_entry("Monthly", &[], 1, "2020-01-01"),
            make_entry("Freeform", &[], 1, "2020-01-01"),
            make_entry("Early", &[], 1, "2020-01-01"),
        ]);
        resume.experience[0].start_date = Some("2019-03".into());
        resume.experience[0].end_date = Some("Present".into());
        resume.experience[1].start_date = Some("Spring 2020".into());
        resume.experience[2].start_date = Some("2018-12".into());
        let out = apply_rule(
            resume,
            &Rule::DateRange(DateRange {
                start: date("2019-01-01"),
                end: date("2021-12-31"),
            }),
        );
        let companies: Vec<_> = out.experience.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(companies, vec!["Monthly"]);
    }

    #[test]
    fn test_sequential_include_rules_intersect() {
        let resume = make_resume(vec![
            make_entry("Acme", &["A"], 1, "2020-01-01"),
            make_entry("Globex", &["B"], 1, "2021-01-01"),
        ]);
        let sequential = apply_rules(
            resume.clone(),
            &[
                Rule::IncludeTags(tags(&["A"])),
                Rule::IncludeTags(tags(&["B"])),
            ],
        );
        assert!(sequential.experience.is_empty());

        let union = apply_rules(resume, &[Rule::IncludeTags(tags(&["A", "B"]))]);
        assert_eq!(union.experience.len(), 2);
    }

    #[test]
    fn test_max_bullets_after_filter_only_touches_survivors() {
        let resume = make_resume(vec![
            make_entry("Acme", &["GRC"], 3, "2020-01-01"),
            make_entry("Globex", &["Partner"], 3, "2021-01-01"),
        ]);
        let out = apply_rules(
            resume,
            &[Rule::IncludeTags(tags(&["GRC"])), Rule::MaxBullets(1)],
        );
        assert_eq!(out.experience.len(), 1);
        assert_eq!(out.experience[0].bullets.len(), 1);
    }
}
