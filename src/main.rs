// Módulos de la aplicación
mod api;
mod app_state;
mod catalog;
mod config;
mod error;
mod loader;
mod models;
mod source;

use crate::app_state::AppState;
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Cargar .env e inicializar logging
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 2. Cargar configuración
    let cfg = config::AppConfig::from_env()?;
    if !cfg.csv_path.is_file() {
        warn!(
            "No se encuentra el inventario en {}; las búsquedas fallarán hasta que exista.",
            cfg.csv_path.display()
        );
    }

    // 3. Crear estado compartido de la aplicación
    let app_state = AppState::from_config(cfg);

    // 4. Configurar el router de la API, las imágenes y el frontend estático
    let app = Router::new()
        .merge(api::create_router(app_state.clone()))
        .nest_service("/images", ServeDir::new(&app_state.config.images_dir))
        .fallback_service(ServeDir::new(&app_state.config.frontend_dir))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // 5. Iniciar el servidor
    let server_addr = &app_state.config.server_addr;
    let listener = tokio::net::TcpListener::bind(server_addr).await?;
    let server_url = format!("http://{}", server_addr);
    info!("🚀 Servidor escuchando en {}", &server_url);
    info!("Inventario: {}", app_state.config.csv_path.display());

    if app_state.config.open_browser && webbrowser::open(&server_url).is_err() {
        info!("No se pudo abrir el navegador. Por favor, accede a {} manualmente.", server_url);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Señal de apagado recibida, iniciando cierre del servidor.");
        })
        .await?;

    info!("✅ Servidor cerrado correctamente.");
    Ok(())
}
