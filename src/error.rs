//! Errores del catálogo y su traducción a respuestas HTTP.

use std::path::PathBuf;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no se pudo leer el inventario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no existe ningún registro con id {0}")]
    ImageNotFound(usize),

    #[error("el fichero de imagen no está disponible: {0}")]
    MissingImageFile(PathBuf),
}

/// Respuesta de error que devuelven los handlers: estado + `{"error": "..."}`.
pub type ApiError = (StatusCode, Json<Value>);

impl CatalogError {
    /// Traduce el error a una respuesta genérica. Los detalles (rutas, causa de
    /// E/S) no se exponen al cliente; quedan en el log.
    pub fn into_api_error(self, generic_message: &str) -> ApiError {
        match self {
            CatalogError::Io { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": generic_message })),
            ),
            CatalogError::ImageNotFound(_) | CatalogError::MissingImageFile(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Imagen no encontrada." })),
            ),
        }
    }
}
