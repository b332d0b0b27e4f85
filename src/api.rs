use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{Datelike, Month, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::advisory::{
    calendar::Activities, parse_month, ClimateZoneDef, ClimateZoneKey, CropCategory,
    CropRecommendation, CurrentRecommendations, Difficulty, ElevationZone, GrowthStage,
    MonthlyActivity, PlantingAdvice, PlantingWindow, SeasonalTiming,
};
use crate::db::{AlertRecord, AlertSeverity, AlertType, NotificationSettings, WidgetConfig, WidgetType};
use crate::fetcher::WeatherReading;
use crate::services::advisory_service::{ClimateClassification, CropSuitability, ElevationAdvice};
use crate::services::{AdvisoryService, AlertService, WidgetService};

#[derive(Clone)]
pub struct AppState {
    pub advisory_service: AdvisoryService,
    pub alert_service: AlertService,
    pub widget_service: WidgetService,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub unread: usize,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub marked: usize,
}

#[derive(Deserialize, ToSchema)]
pub struct EnabledRequest {
    pub enabled: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct PositionRequest {
    pub position: usize,
}

#[derive(Debug, Deserialize)]
pub struct TopCropsQuery {
    #[serde(default = "default_top_n")]
    pub n: usize,
}

fn default_top_n() -> usize {
    5
}

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub avg_temp_c: f64,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub month: Option<String>,
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health))
        // elevation
        .route("/elevation/zones", get(get_elevation_zones))
        .route("/elevation/{meters}", get(get_elevation_advice))
        .route("/elevation/{meters}/top", get(get_top_crops))
        .route("/elevation/{meters}/category/{category}", get(get_crops_by_category))
        .route("/elevation/{meters}/suitable/{crop}", get(get_crop_suitability))
        // climate
        .route("/climate/zones", get(get_climate_zones))
        .route("/climate/classify", get(classify_climate))
        .route("/climate/{zone}/calendar", get(get_monthly_calendar))
        .route("/climate/{zone}/recommendations", get(get_current_recommendations))
        .route("/crops", get(get_scheduled_crops))
        .route("/crops/{crop}/schedule/{zone}", get(get_seasonal_timing))
        // alerts
        .route("/alerts", get(get_alert_history).delete(clear_alert_history))
        .route("/alerts/unread-count", get(get_unread_count))
        .route("/alerts/read-all", post(mark_all_read))
        .route("/alerts/evaluate", post(evaluate_reading))
        .route("/alerts/{id}/read", post(mark_alert_read))
        // settings
        .route("/settings", get(get_settings).put(put_settings))
        // widgets
        .route("/widgets", get(get_widgets).put(put_widgets))
        .route("/widgets/reset", post(reset_widgets))
        .route("/widgets/{id}/enabled", put(set_widget_enabled))
        .route("/widgets/{id}/position", put(move_widget))
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}

fn parse_zone(zone: &str) -> Result<ClimateZoneKey, StatusCode> {
    ClimateZoneKey::parse(zone).ok_or_else(|| {
        warn!("Unknown climate zone '{}'", zone);
        StatusCode::BAD_REQUEST
    })
}

fn current_month() -> Month {
    Month::try_from(Utc::now().month() as u8).unwrap_or(Month::January)
}

#[utoipa::path(get, path = "/api/v1/health", responses((status = 200, description = "Success", body = HealthResponse)))]
#[instrument(skip(_state))]
async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

#[utoipa::path(get, path = "/api/v1/elevation/zones", responses((status = 200, description = "Success", body = Vec<ElevationZone>)))]
#[instrument(skip(state))]
async fn get_elevation_zones(State(state): State<AppState>) -> Json<Vec<ElevationZone>> {
    Json(state.advisory_service.elevation_zones())
}

#[utoipa::path(
    get,
    path = "/api/v1/elevation/{meters}",
    params(("meters" = f64, Path, description = "Elevation in meters")),
    responses((status = 200, description = "Success", body = ElevationAdvice))
)]
#[instrument(skip(state))]
async fn get_elevation_advice(
    State(state): State<AppState>,
    Path(meters): Path<f64>,
) -> Json<ElevationAdvice> {
    let advice = state.advisory_service.recommend_crops(meters);
    info!("Elevation {} m falls in zone {}", meters, advice.zone);
    Json(advice)
}

#[utoipa::path(
    get,
    path = "/api/v1/elevation/{meters}/top",
    params(
        ("meters" = f64, Path, description = "Elevation in meters"),
        ("n" = Option<usize>, Query, description = "How many crops to return (default 5)")
    ),
    responses((status = 200, description = "Success", body = Vec<CropRecommendation>))
)]
#[instrument(skip(state))]
async fn get_top_crops(
    State(state): State<AppState>,
    Path(meters): Path<f64>,
    Query(query): Query<TopCropsQuery>,
) -> Json<Vec<CropRecommendation>> {
    Json(state.advisory_service.top_crops(meters, query.n))
}

#[utoipa::path(
    get,
    path = "/api/v1/elevation/{meters}/category/{category}",
    params(
        ("meters" = f64, Path, description = "Elevation in meters"),
        ("category" = CropCategory, Path, description = "Crop category")
    ),
    responses((status = 200, description = "Success", body = Vec<CropRecommendation>), (status = 400, description = "Unknown category"))
)]
#[instrument(skip(state))]
async fn get_crops_by_category(
    State(state): State<AppState>,
    Path((meters, category)): Path<(f64, String)>,
) -> Result<Json<Vec<CropRecommendation>>, StatusCode> {
    let category = CropCategory::parse(&category).ok_or_else(|| {
        warn!("Unknown crop category '{}'", category);
        StatusCode::BAD_REQUEST
    })?;
    Ok(Json(state.advisory_service.crops_by_category(meters, category)))
}

#[utoipa::path(
    get,
    path = "/api/v1/elevation/{meters}/suitable/{crop}",
    params(
        ("meters" = f64, Path, description = "Elevation in meters"),
        ("crop" = String, Path, description = "Crop name, case-insensitive")
    ),
    responses((status = 200, description = "Success", body = CropSuitability))
)]
#[instrument(skip(state))]
async fn get_crop_suitability(
    State(state): State<AppState>,
    Path((meters, crop)): Path<(f64, String)>,
) -> Json<CropSuitability> {
    Json(state.advisory_service.crop_suitability(&crop, meters))
}

#[utoipa::path(get, path = "/api/v1/climate/zones", responses((status = 200, description = "Success", body = Vec<ClimateZoneDef>)))]
#[instrument(skip(state))]
async fn get_climate_zones(State(state): State<AppState>) -> Json<Vec<ClimateZoneDef>> {
    Json(state.advisory_service.climate_zones())
}

#[utoipa::path(
    get,
    path = "/api/v1/climate/classify",
    params(("avg_temp_c" = f64, Query, description = "Average temperature in °C")),
    responses((status = 200, description = "Success", body = ClimateClassification))
)]
#[instrument(skip(state))]
async fn classify_climate(
    State(state): State<AppState>,
    Query(query): Query<ClassifyQuery>,
) -> Json<ClimateClassification> {
    Json(state.advisory_service.classify_climate(query.avg_temp_c))
}

#[utoipa::path(
    get,
    path = "/api/v1/climate/{zone}/calendar",
    params(("zone" = ClimateZoneKey, Path, description = "Climate zone key")),
    responses((status = 200, description = "Success", body = Vec<MonthlyActivity>), (status = 400, description = "Unknown zone"))
)]
#[instrument(skip(state))]
async fn get_monthly_calendar(
    State(state): State<AppState>,
    Path(zone): Path<String>,
) -> Result<Json<Vec<MonthlyActivity>>, StatusCode> {
    let zone = parse_zone(&zone)?;
    Ok(Json(state.advisory_service.monthly_calendar(zone)))
}

#[utoipa::path(
    get,
    path = "/api/v1/climate/{zone}/recommendations",
    params(
        ("zone" = ClimateZoneKey, Path, description = "Climate zone key"),
        ("month" = Option<String>, Query, description = "Month name; defaults to the current month")
    ),
    responses((status = 200, description = "Success", body = CurrentRecommendations), (status = 400, description = "Unknown zone or month"))
)]
#[instrument(skip(state))]
async fn get_current_recommendations(
    State(state): State<AppState>,
    Path(zone): Path<String>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<CurrentRecommendations>, StatusCode> {
    let zone = parse_zone(&zone)?;
    let month = match query.month.as_deref() {
        Some(name) => parse_month(name).ok_or_else(|| {
            warn!("Unknown month '{}'", name);
            StatusCode::BAD_REQUEST
        })?,
        None => current_month(),
    };

    debug!("Recommendations for {} in {}", month.name(), zone);
    Ok(Json(state.advisory_service.current_recommendations(month, zone)))
}

#[utoipa::path(get, path = "/api/v1/crops", responses((status = 200, description = "Success", body = Vec<String>)))]
#[instrument(skip(state))]
async fn get_scheduled_crops(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.advisory_service.scheduled_crops())
}

#[utoipa::path(
    get,
    path = "/api/v1/crops/{crop}/schedule/{zone}",
    params(
        ("crop" = String, Path, description = "Crop name, case-insensitive"),
        ("zone" = ClimateZoneKey, Path, description = "Climate zone key")
    ),
    responses((status = 200, description = "Success", body = SeasonalTiming), (status = 404, description = "No schedule for this crop and zone"))
)]
#[instrument(skip(state))]
async fn get_seasonal_timing(
    State(state): State<AppState>,
    Path((crop, zone)): Path<(String, String)>,
) -> Result<Json<SeasonalTiming>, StatusCode> {
    let zone = parse_zone(&zone)?;
    state
        .advisory_service
        .seasonal_timing(&crop, zone)
        .map(Json)
        .ok_or_else(|| {
            debug!("No schedule for {} in {}", crop, zone);
            StatusCode::NOT_FOUND
        })
}

#[utoipa::path(get, path = "/api/v1/alerts", responses((status = 200, description = "Success", body = Vec<AlertRecord>)))]
#[instrument(skip(state))]
async fn get_alert_history(State(state): State<AppState>) -> Json<Vec<AlertRecord>> {
    let history = state.alert_service.get_alert_history().await;
    info!("Retrieved {} alerts from history", history.len());
    Json(history)
}

#[utoipa::path(delete, path = "/api/v1/alerts", responses((status = 204, description = "History cleared"), (status = 500, description = "Store write failed")))]
#[instrument(skip(state))]
async fn clear_alert_history(State(state): State<AppState>) -> StatusCode {
    match state.alert_service.clear_alert_history().await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => {
            error!("Failed to clear alert history: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[utoipa::path(get, path = "/api/v1/alerts/unread-count", responses((status = 200, description = "Success", body = UnreadCountResponse)))]
#[instrument(skip(state))]
async fn get_unread_count(State(state): State<AppState>) -> Json<UnreadCountResponse> {
    Json(UnreadCountResponse {
        unread: state.alert_service.unread_count().await,
    })
}

#[utoipa::path(post, path = "/api/v1/alerts/read-all", responses((status = 200, description = "Success", body = MarkAllReadResponse)))]
#[instrument(skip(state))]
async fn mark_all_read(State(state): State<AppState>) -> Result<Json<MarkAllReadResponse>, StatusCode> {
    let marked = state.alert_service.mark_all_read().await.map_err(|e| {
        error!("Failed to mark alerts read: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(MarkAllReadResponse { marked }))
}

#[utoipa::path(
    post,
    path = "/api/v1/alerts/{id}/read",
    params(("id" = Uuid, Path, description = "Alert id")),
    responses((status = 204, description = "Marked read"), (status = 404, description = "Alert not found"))
)]
#[instrument(skip(state))]
async fn mark_alert_read(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    match state.alert_service.mark_alert_read(id).await {
        Ok(true) => StatusCode::NO_CONTENT,
        Ok(false) => {
            warn!("Alert {} not found", id);
            StatusCode::NOT_FOUND
        }
        Err(e) => {
            error!("Failed to mark alert {} read: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/alerts/evaluate",
    request_body = WeatherReading,
    responses((status = 200, description = "Alerts fired by this reading", body = Vec<AlertRecord>))
)]
#[instrument(skip(state, reading))]
async fn evaluate_reading(
    State(state): State<AppState>,
    Json(reading): Json<WeatherReading>,
) -> Json<Vec<AlertRecord>> {
    let city = reading.city.clone();
    debug!("Evaluating submitted reading for {}", city);
    Json(state.alert_service.evaluate_conditions(&reading, &city).await)
}

#[utoipa::path(get, path = "/api/v1/settings", responses((status = 200, description = "Success", body = NotificationSettings)))]
#[instrument(skip(state))]
async fn get_settings(State(state): State<AppState>) -> Json<NotificationSettings> {
    Json(state.alert_service.get_settings().await)
}

#[utoipa::path(
    put,
    path = "/api/v1/settings",
    request_body = NotificationSettings,
    responses((status = 200, description = "Success", body = NotificationSettings), (status = 500, description = "Store write failed"))
)]
#[instrument(skip(state))]
async fn put_settings(
    State(state): State<AppState>,
    Json(settings): Json<NotificationSettings>,
) -> Result<Json<NotificationSettings>, StatusCode> {
    state
        .alert_service
        .save_settings(&settings)
        .await
        .map_err(|e| {
            error!("Failed to save notification settings: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(settings))
}

#[utoipa::path(get, path = "/api/v1/widgets", responses((status = 200, description = "Success", body = Vec<WidgetConfig>)))]
#[instrument(skip(state))]
async fn get_widgets(State(state): State<AppState>) -> Json<Vec<WidgetConfig>> {
    Json(state.widget_service.get_layout().await)
}

#[utoipa::path(
    put,
    path = "/api/v1/widgets",
    request_body = Vec<WidgetConfig>,
    responses((status = 200, description = "Success", body = Vec<WidgetConfig>), (status = 500, description = "Store write failed"))
)]
#[instrument(skip(state, layout))]
async fn put_widgets(
    State(state): State<AppState>,
    Json(layout): Json<Vec<WidgetConfig>>,
) -> Result<Json<Vec<WidgetConfig>>, StatusCode> {
    let layout = state.widget_service.save_layout(layout).await.map_err(|e| {
        error!("Failed to save widget layout: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(layout))
}

#[utoipa::path(post, path = "/api/v1/widgets/reset", responses((status = 200, description = "Success", body = Vec<WidgetConfig>), (status = 500, description = "Store write failed")))]
#[instrument(skip(state))]
async fn reset_widgets(State(state): State<AppState>) -> Result<Json<Vec<WidgetConfig>>, StatusCode> {
    let layout = state.widget_service.reset_layout().await.map_err(|e| {
        error!("Failed to reset widget layout: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(layout))
}

#[utoipa::path(
    put,
    path = "/api/v1/widgets/{id}/enabled",
    params(("id" = String, Path, description = "Widget id")),
    request_body = EnabledRequest,
    responses((status = 200, description = "Success", body = Vec<WidgetConfig>), (status = 404, description = "Widget not found"))
)]
#[instrument(skip(state, body))]
async fn set_widget_enabled(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<EnabledRequest>,
) -> Result<Json<Vec<WidgetConfig>>, StatusCode> {
    state
        .widget_service
        .set_widget_enabled(&id, body.enabled)
        .await
        .map_err(|e| {
            error!("Failed to update widget {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map(Json)
        .ok_or_else(|| {
            warn!("Widget {} not found", id);
            StatusCode::NOT_FOUND
        })
}

#[utoipa::path(
    put,
    path = "/api/v1/widgets/{id}/position",
    params(("id" = String, Path, description = "Widget id")),
    request_body = PositionRequest,
    responses((status = 200, description = "Success", body = Vec<WidgetConfig>), (status = 404, description = "Widget not found"))
)]
#[instrument(skip(state, body))]
async fn move_widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<PositionRequest>,
) -> Result<Json<Vec<WidgetConfig>>, StatusCode> {
    state
        .widget_service
        .move_widget(&id, body.position)
        .await
        .map_err(|e| {
            error!("Failed to move widget {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map(Json)
        .ok_or_else(|| {
            warn!("Widget {} not found", id);
            StatusCode::NOT_FOUND
        })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        get_elevation_zones,
        get_elevation_advice,
        get_top_crops,
        get_crops_by_category,
        get_crop_suitability,
        get_climate_zones,
        classify_climate,
        get_monthly_calendar,
        get_current_recommendations,
        get_scheduled_crops,
        get_seasonal_timing,
        get_alert_history,
        clear_alert_history,
        get_unread_count,
        mark_all_read,
        mark_alert_read,
        evaluate_reading,
        get_settings,
        put_settings,
        get_widgets,
        put_widgets,
        reset_widgets,
        set_widget_enabled,
        move_widget,
    ),
    components(schemas(
        HealthResponse,
        UnreadCountResponse,
        MarkAllReadResponse,
        EnabledRequest,
        PositionRequest,
        ElevationAdvice,
        ElevationZone,
        CropRecommendation,
        CropCategory,
        Difficulty,
        CropSuitability,
        ClimateClassification,
        ClimateZoneDef,
        ClimateZoneKey,
        MonthlyActivity,
        Activities,
        CurrentRecommendations,
        PlantingAdvice,
        SeasonalTiming,
        PlantingWindow,
        GrowthStage,
        AlertRecord,
        AlertType,
        AlertSeverity,
        NotificationSettings,
        WidgetConfig,
        WidgetType,
        WeatherReading,
    )),
    info(title = "Field Weather Service", description = "Crop advisory tables and severe-weather alerts")
)]
pub struct ApiDoc;

pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
