use axum::{
    extract::{Json, Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    app_state::AppState,
    catalog,
    error::{ApiError, CatalogError},
    models::{image_file_name, FacetSet, FilterSelection, Record},
};

// --- Router ---

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/filter-options",
            get(initial_filter_options_handler).post(filter_options_handler),
        )
        .route("/api/search", post(search_handler))
        .route("/api/status", get(status_handler))
        .route("/api/images/:id/download", get(download_handler))
        .with_state(app_state)
}

// --- Handlers ---

/// Instantánea inicial de filtros. Si el inventario no se puede leer se
/// devuelven las facetas por defecto en lugar de un error.
#[axum::debug_handler]
async fn initial_filter_options_handler(State(state): State<AppState>) -> Json<FacetSet> {
    match state.catalog.records().await {
        Ok(records) => Json(catalog::narrow_facets(&records, &FilterSelection::default())),
        Err(e) => {
            warn!("Usando opciones de filtro por defecto: {}", e);
            Json(FacetSet::fallback())
        }
    }
}

#[axum::debug_handler]
async fn filter_options_handler(
    State(state): State<AppState>,
    Json(selection): Json<FilterSelection>,
) -> Result<Json<FacetSet>, ApiError> {
    let records = state.catalog.records().await.map_err(|e| {
        error!("Error obteniendo opciones de filtro: {}", e);
        e.into_api_error("Failed to get filtered options")
    })?;
    Ok(Json(catalog::narrow_facets(&records, &selection)))
}

#[axum::debug_handler]
async fn search_handler(
    State(state): State<AppState>,
    Json(selection): Json<FilterSelection>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.catalog.records().await.map_err(|e| {
        error!("Error buscando imágenes: {}", e);
        e.into_api_error("Failed to search images")
    })?;
    let results = catalog::search(&records, &selection);
    info!("Búsqueda: {} de {} registros", results.len(), records.len());
    Ok(Json(results))
}

#[axum::debug_handler]
async fn status_handler(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let records = state.catalog.records().await.map_err(|e| {
        error!("Error en el health check del inventario: {}", e);
        e.into_api_error("Failed to read catalog")
    })?;
    Ok(Json(json!({
        "status": "ok",
        "records": records.len(),
        "source": state.catalog.path().display().to_string(),
    })))
}

/// Descarga el fichero de imagen de un registro como adjunto.
#[axum::debug_handler]
async fn download_handler(
    State(state): State<AppState>,
    Path(id): Path<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let generic = "Failed to download image";
    let records = state.catalog.records().await.map_err(|e| {
        error!("Error leyendo el inventario para la descarga: {}", e);
        e.into_api_error(generic)
    })?;

    let record = records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| CatalogError::ImageNotFound(id).into_api_error(generic))?;

    let disk_name = image_file_name(&record.full_path)
        .filter(|name| *name != "." && *name != "..")
        .ok_or_else(|| CatalogError::ImageNotFound(id).into_api_error(generic))?;
    let file_path = state.config.images_dir.join(disk_name);

    let bytes = tokio::fs::read(&file_path).await.map_err(|e| {
        warn!("No se pudo leer la imagen {}: {}", file_path.display(), e);
        CatalogError::MissingImageFile(file_path.clone()).into_api_error(generic)
    })?;

    let content_type = mime_guess::from_path(&file_path)
        .first_or_octet_stream()
        .to_string();
    let download_name = if record.file_name.is_empty() {
        disk_name
    } else {
        record.file_name.as_str()
    };
    let disposition = format!("attachment; filename=\"{}\"", download_name.replace('"', ""));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
