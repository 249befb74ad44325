//! HTTP JSON API serving one in-memory design session.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    export,
    mission::{
        Coordinates, HabitatConfig, HabitatType, HabitatTypeInfo, InputRange, MissionState, Zone,
        ZoneId, CREW_SIZE_RANGE, DIAMETER_RANGE, DURATION_RANGE, HEIGHT_RANGE,
    },
    summary::MissionSummary,
    surface::{CanvasClick, SiteError},
    wizard::{MissionWizard, Navigation, StepView, WizardStep},
    zones::{AllocationError, PlacementResult, ZoneTemplate, ZONE_TEMPLATES},
};

pub struct WebServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<MissionWizard>>,
}

impl AppState {
    pub fn new(wizard: MissionWizard) -> Self {
        Self {
            session: Arc::new(Mutex::new(wizard)),
        }
    }

    fn session(&self) -> MutexGuard<'_, MissionWizard> {
        // Handlers never panic while holding the lock, so poisoning is a bug.
        self.session.lock().expect("session lock poisoned")
    }
}

#[derive(Debug)]
pub enum ApiError {
    Allocation(AllocationError),
    Site(SiteError),
    Import(anyhow::Error),
}

impl From<AllocationError> for ApiError {
    fn from(value: AllocationError) -> Self {
        ApiError::Allocation(value)
    }
}

impl From<SiteError> for ApiError {
    fn from(value: SiteError) -> Self {
        ApiError::Site(value)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Allocation(_) | ApiError::Site(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Import(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Allocation(err) => err.to_string(),
            ApiError::Site(err) => err.to_string(),
            ApiError::Import(err) => format!("{err:#}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Serialize)]
pub struct SessionView {
    pub step: WizardStep,
    pub steps: Vec<StepView>,
    pub mission: MissionState,
}

impl SessionView {
    fn from_wizard(wizard: &MissionWizard) -> Self {
        Self {
            step: wizard.current_step(),
            steps: wizard.steps(),
            mission: wizard.state().clone(),
        }
    }
}

#[derive(Serialize)]
struct NavigationView {
    step: WizardStep,
    exit: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InputContracts {
    crew_size: InputRange,
    duration: InputRange,
    diameter: InputRange,
    height: InputRange,
}

#[derive(Serialize)]
struct Catalog {
    zones: &'static [ZoneTemplate],
    habitats: Vec<HabitatTypeInfo>,
    inputs: InputContracts,
}

#[derive(Deserialize)]
struct AddZoneRequest {
    #[serde(default)]
    template: String,
}

#[derive(Deserialize)]
struct ResizeZoneRequest {
    area: f64,
}

#[derive(Serialize)]
struct SummaryView {
    summary: MissionSummary,
    share_text: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/session", get(session))
        .route("/api/step/next", post(next_step))
        .route("/api/step/back", post(previous_step))
        .route("/api/coordinates", put(set_coordinates))
        .route("/api/coordinates/click", post(click_coordinates))
        .route("/api/coordinates/confirm", post(confirm_coordinates))
        .route("/api/habitat", put(set_habitat))
        .route("/api/templates", get(templates))
        .route("/api/zones", post(add_zone))
        .route("/api/zones/:id", patch(resize_zone).delete(remove_zone))
        .route("/api/placement", get(placement))
        .route("/api/summary", get(summary))
        .route("/api/export", get(export_design))
        .route("/api/import", post(import_design))
        .with_state(state)
}

pub async fn run(config: WebServerConfig, wizard: MissionWizard) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;
    let app = router(AppState::new(wizard));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "mission designer API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down mission designer API");
}

async fn session(State(state): State<AppState>) -> Json<SessionView> {
    Json(SessionView::from_wizard(&state.session()))
}

fn navigation_view(navigation: Navigation, wizard: &MissionWizard) -> NavigationView {
    NavigationView {
        step: wizard.current_step(),
        exit: navigation == Navigation::Exit,
    }
}

async fn next_step(State(state): State<AppState>) -> Json<NavigationView> {
    let mut wizard = state.session();
    let navigation = wizard.next();
    Json(navigation_view(navigation, &wizard))
}

async fn previous_step(State(state): State<AppState>) -> Json<NavigationView> {
    let mut wizard = state.session();
    let navigation = wizard.back();
    Json(navigation_view(navigation, &wizard))
}

async fn set_coordinates(
    State(state): State<AppState>,
    Json(coordinates): Json<Coordinates>,
) -> Json<Coordinates> {
    let mut wizard = state.session();
    wizard.set_coordinates(coordinates);
    Json(wizard.state().coordinates)
}

async fn click_coordinates(
    State(state): State<AppState>,
    Json(click): Json<CanvasClick>,
) -> Json<Coordinates> {
    Json(state.session().select_site(click))
}

async fn confirm_coordinates(State(state): State<AppState>) -> Result<Json<Coordinates>, ApiError> {
    let wizard = state.session();
    wizard.confirm_site()?;
    Ok(Json(wizard.state().coordinates))
}

async fn set_habitat(
    State(state): State<AppState>,
    Json(habitat): Json<HabitatConfig>,
) -> Json<HabitatConfig> {
    let mut wizard = state.session();
    wizard.set_habitat(habitat);
    Json(wizard.state().habitat.clone())
}

async fn templates() -> Json<Catalog> {
    Json(Catalog {
        zones: &ZONE_TEMPLATES,
        habitats: HabitatType::ALL.iter().map(|kind| kind.info()).collect(),
        inputs: InputContracts {
            crew_size: CREW_SIZE_RANGE,
            duration: DURATION_RANGE,
            diameter: DIAMETER_RANGE,
            height: HEIGHT_RANGE,
        },
    })
}

async fn add_zone(
    State(state): State<AppState>,
    Json(request): Json<AddZoneRequest>,
) -> Result<(StatusCode, Json<Vec<Zone>>), ApiError> {
    let mut wizard = state.session();
    let zones = wizard.add_zone(&request.template)?.to_vec();
    Ok((StatusCode::CREATED, Json(zones)))
}

async fn resize_zone(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ResizeZoneRequest>,
) -> Json<Vec<Zone>> {
    let mut wizard = state.session();
    Json(wizard.update_zone_area(&ZoneId::new(id), request.area).to_vec())
}

async fn remove_zone(State(state): State<AppState>, Path(id): Path<String>) -> Json<Vec<Zone>> {
    let mut wizard = state.session();
    Json(wizard.remove_zone(&ZoneId::new(id)).to_vec())
}

async fn placement(State(state): State<AppState>) -> Json<Vec<PlacementResult>> {
    Json(state.session().placement())
}

async fn summary(State(state): State<AppState>) -> Json<SummaryView> {
    let wizard = state.session();
    Json(SummaryView {
        summary: wizard.summary(),
        share_text: wizard.share_text(),
    })
}

async fn export_design(State(state): State<AppState>) -> Json<MissionState> {
    Json(state.session().state().clone())
}

async fn import_design(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<SessionView>, ApiError> {
    let mission = export::from_json(&body).map_err(ApiError::Import)?;
    let mut wizard = state.session();
    wizard.replace_state(mission);
    Ok(Json(SessionView::from_wizard(&wizard)))
}
