use crate::infra::{execute_plan, AppState, PlannerState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use shopper_ai::error::AppError;
use shopper_ai::workflows::catalog::CatalogCsvImporter;
use shopper_ai::workflows::shopping::{
    CatalogResearcher, CategoryCatalog, GoalPlan, MockResearcher, SelectedItemView,
    ShoppingPlanOutcome,
};

#[derive(Debug, Deserialize)]
pub(crate) struct ShoppingPlanRequest {
    /// Free-text shopping request, restated in the report header.
    pub(crate) goal: String,
    /// Structured decomposition from an external analyzer; falls back to the
    /// built-in trek demo plan when absent.
    #[serde(default)]
    pub(crate) plan: Option<GoalPlan>,
    /// Already-researched catalog; wins over `catalog_csv`.
    #[serde(default)]
    pub(crate) catalog: Option<CategoryCatalog>,
    /// CSV catalog export to hydrate candidates from.
    #[serde(default)]
    pub(crate) catalog_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShoppingPlanResponse {
    pub(crate) goal: String,
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) catalog_source: CatalogSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) budget_limit: Option<u64>,
    pub(crate) prefer_sustainable: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) exclusions: Vec<String>,
    pub(crate) selected_items: Vec<SelectedItemView>,
    pub(crate) total_price: u64,
    pub(crate) budget_adherence: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) notes: Vec<String>,
    pub(crate) report: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CatalogSource {
    Provided,
    Csv,
    Mock,
}

pub(crate) fn router(planner: PlannerState) -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/shopping/plan",
            axum::routing::post(shopping_plan_endpoint),
        )
        .layer(Extension(planner))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn shopping_plan_endpoint(
    Extension(planner): Extension<PlannerState>,
    Json(payload): Json<ShoppingPlanRequest>,
) -> Result<Json<ShoppingPlanResponse>, AppError> {
    let ShoppingPlanRequest {
        goal,
        plan,
        catalog,
        catalog_csv,
    } = payload;

    let plan = plan.unwrap_or_else(GoalPlan::standard_trek);

    let (outcome, catalog_source) = match (catalog, catalog_csv) {
        (Some(catalog), _) => (
            execute_plan(plan, CatalogResearcher::new(catalog), &planner.lexicon, &goal)?,
            CatalogSource::Provided,
        ),
        (None, Some(csv)) => {
            let imported = CatalogCsvImporter::from_reader(Cursor::new(csv.into_bytes()))?;
            (
                execute_plan(plan, CatalogResearcher::new(imported), &planner.lexicon, &goal)?,
                CatalogSource::Csv,
            )
        }
        (None, None) => (
            execute_plan(plan, MockResearcher, &planner.lexicon, &goal)?,
            CatalogSource::Mock,
        ),
    };

    Ok(Json(to_response(goal, catalog_source, outcome)))
}

fn to_response(
    goal: String,
    catalog_source: CatalogSource,
    outcome: ShoppingPlanOutcome,
) -> ShoppingPlanResponse {
    let ShoppingPlanOutcome {
        constraints,
        selection,
        report,
        ..
    } = outcome;

    ShoppingPlanResponse {
        goal,
        generated_at: Utc::now(),
        catalog_source,
        budget_limit: constraints.budget_limit,
        prefer_sustainable: constraints.prefer_sustainable,
        exclusions: constraints.exclusions,
        selected_items: selection.item_views(),
        total_price: selection.total_price,
        budget_adherence: selection.budget_adherence,
        notes: selection.notes,
        report,
    }
}
