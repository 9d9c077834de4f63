//! Axum route handlers for the Variants API.
//!
//! Every request carries the master and variant inline; nothing is stored.
//! Resolution is CPU-bound and runs inside `tokio::task::spawn_blocking`.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{default_section_settings, Resume, Section, SectionSetting};
use crate::models::variant::{RawVariantSpec, VariantSpec};
use crate::state::AppState;
use crate::variants::diff::{generate_diff, DiffReport};
use crate::variants::errors::SpecError;
use crate::variants::pipeline::{resolve_batch, resolve_raw_variant};
use crate::variants::validation::validate_variant;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub variant: RawVariantSpec,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: Vec<SpecError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub master: Resume,
    pub variant: RawVariantSpec,
    #[serde(default)]
    pub include_diff: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub variant_id: Uuid,
    pub resolved: Resume,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffReport>,
}

#[derive(Debug, Deserialize)]
pub struct BatchResolveRequest {
    pub master: Resume,
    pub variants: Vec<RawVariantSpec>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub variant_id: Option<Uuid>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Resume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchResolveResponse {
    pub results: Vec<BatchItem>,
}

#[derive(Debug, Deserialize)]
pub struct DiffRequest {
    pub master: Resume,
    pub resolved: Resume,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/variants/validate
///
/// Checks rules and overrides without resolving. Always 200; errors are in the body.
pub async fn handle_validate(
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, AppError> {
    let response = match validate_variant(request.variant) {
        Ok(_) => ValidateResponse {
            valid: true,
            errors: Vec::new(),
        },
        Err(errors) => ValidateResponse {
            valid: false,
            errors: errors.0,
        },
    };
    Ok(Json(response))
}

/// POST /api/v1/variants/resolve
///
/// Resolves one variant against the supplied master, optionally with a diff.
pub async fn handle_resolve(
    Json(request): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    let ResolveRequest {
        master,
        variant,
        include_diff,
    } = request;

    let response = tokio::task::spawn_blocking(move || {
        let (variant, resolved) = resolve_raw_variant(&master, variant)?;
        let diff = include_diff.then(|| generate_diff(&master, &resolved));
        Ok::<_, AppError>(ResolveResponse {
            variant_id: variant.id,
            resolved,
            diff,
        })
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("resolve task failed: {e}")))??;

    info!("Resolved variant {}", response.variant_id);
    Ok(Json(response))
}

/// POST /api/v1/variants/resolve/batch
///
/// Resolves many variants against one master. A failing variant does not fail the
/// batch; its error is reported in place of the document.
pub async fn handle_resolve_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchResolveRequest>,
) -> Result<Json<BatchResolveResponse>, AppError> {
    let limit = state.config.max_batch_variants;
    if request.variants.len() > limit {
        return Err(AppError::Validation(format!(
            "batch contains {} variants; the limit is {limit}",
            request.variants.len()
        )));
    }

    // Validation is cheap; invalid variants keep their slot with an error.
    let mut slots: Vec<Option<BatchItem>> = Vec::with_capacity(request.variants.len());
    let mut valid: Vec<VariantSpec> = Vec::new();
    for raw in request.variants {
        match validate_batch_item(raw) {
            Ok(variant) => {
                slots.push(None);
                valid.push(variant);
            }
            Err(item) => slots.push(Some(item)),
        }
    }

    let master = request.master;
    let (valid, outcomes) = tokio::task::spawn_blocking(move || {
        let outcomes = resolve_batch(&master, &valid);
        (valid, outcomes)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("batch task failed: {e}")))?;

    let mut resolved = valid
        .into_iter()
        .zip(outcomes)
        .map(|(variant, outcome)| match outcome {
            Ok(doc) => BatchItem {
                variant_id: Some(variant.id),
                name: variant.name,
                resolved: Some(doc),
                error: None,
            },
            Err(e) => BatchItem {
                variant_id: Some(variant.id),
                name: variant.name,
                resolved: None,
                error: Some(e.to_string()),
            },
        });
    let results: Vec<BatchItem> = slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| resolved.next()))
        .collect();

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    info!(
        "Batch resolved {} variants ({} failed)",
        results.len(),
        failed
    );
    Ok(Json(BatchResolveResponse { results }))
}

fn validate_batch_item(raw: RawVariantSpec) -> Result<VariantSpec, BatchItem> {
    let name = raw.name.clone();
    let requested_id = raw.id;
    validate_variant(raw).map_err(|errors| BatchItem {
        variant_id: requested_id,
        name,
        resolved: None,
        error: Some(
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        ),
    })
}

/// POST /api/v1/variants/diff
pub async fn handle_diff(Json(request): Json<DiffRequest>) -> Json<DiffReport> {
    Json(generate_diff(&request.master, &request.resolved))
}

/// GET /api/v1/resumes/sections/defaults
pub async fn handle_default_sections() -> Json<BTreeMap<Section, SectionSetting>> {
    Json(default_section_settings())
}
