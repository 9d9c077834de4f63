//! Resolution Pipeline: derives a variant document from the master.
//!
//! Stages run unconditionally and in this order:
//! 1. section projection
//! 2. custom content (reserved, pass-through)
//! 3. rules, in list order
//! 4. overrides, in list order
//!
//! The pipeline starts from one deep clone of the master and threads that owned
//! value through every stage. On error the partially resolved value is dropped, so
//! callers only ever see a complete result or an error.

use tracing::debug;

use crate::models::resume::{Resume, Section, SectionSetting};
use crate::models::variant::{RawVariantSpec, VariantSpec};
use crate::variants::errors::ResolveError;
use crate::variants::overrides::apply_overrides;
use crate::variants::rules::apply_rules;
use crate::variants::validation::validate_variant;

pub fn resolve_variant(master: &Resume, variant: &VariantSpec) -> Result<Resume, ResolveError> {
    let doc = master.clone();
    let doc = project_sections(doc, variant);
    let doc = apply_custom_content(doc);
    let doc = apply_rules(doc, &variant.rules);
    let doc = apply_overrides(doc, &variant.overrides)?;

    debug!(
        "Resolved variant '{}' ({}): {} rules, {} overrides, {}/{} experience entries kept",
        variant.name,
        variant.id,
        variant.rules.len(),
        variant.overrides.len(),
        doc.experience.len(),
        master.experience.len()
    );
    Ok(doc)
}

/// Validates a raw variant, then resolves it. Specification errors abort before any
/// stage runs.
pub fn resolve_raw_variant(
    master: &Resume,
    raw: RawVariantSpec,
) -> Result<(VariantSpec, Resume), ResolveError> {
    let variant = validate_variant(raw)?;
    let resolved = resolve_variant(master, &variant)?;
    Ok((variant, resolved))
}

/// Resolves each variant independently against the same master.
pub fn resolve_batch(
    master: &Resume,
    variants: &[VariantSpec],
) -> Vec<Result<Resume, ResolveError>> {
    variants
        .iter()
        .map(|variant| resolve_variant(master, variant))
        .collect()
}

/// Clears disabled sections and marks them hidden in `sectionSettings`. A section
/// the variant turns on explicitly is marked visible; every other flag and `order`
/// is left as the master has it. Headline has no entry in the settings map, so
/// disabling it only blanks the text.
fn project_sections(mut doc: Resume, variant: &VariantSpec) -> Resume {
    let fallback_order = doc.section_settings.len() as i32;
    for (section, enabled) in variant.effective_section_settings() {
        let explicit = variant
            .section_settings
            .get(&section)
            .and_then(|s| s.enabled)
            .is_some();
        if !enabled {
            doc.clear_section(section);
        }
        if section == Section::Headline || (enabled && !explicit) {
            continue;
        }
        doc.section_settings
            .entry(section)
            .and_modify(|s| s.enabled = enabled)
            .or_insert(SectionSetting {
                enabled,
                order: fallback_order,
            });
    }
    doc
}

/// Reserved extension point. Custom content is expressed through overrides today.
fn apply_custom_content(doc: Resume) -> Resume {
    doc
}
