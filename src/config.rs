//! Carga y gestión de configuración de la aplicación (fichero de inventario,
//! directorios estáticos y servidor).

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:3322";
const DEFAULT_CSV_PATH: &str = "public/data/inventario_imagenes.csv";
const DEFAULT_IMAGES_DIR: &str = "public/images";
const DEFAULT_FRONTEND_DIR: &str = "frontend";

/// Configuración completa de la aplicación.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_addr: String,
    /// Fichero CSV con el inventario de imágenes.
    pub csv_path: PathBuf,
    pub images_dir: PathBuf,
    pub frontend_dir: PathBuf,
    /// Cachear los registros parseados mientras el mtime del CSV no cambie.
    pub cache_records: bool,
    pub open_browser: bool,
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno (usando .env si existe).
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de variables.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let csv_path = lookup("CATALOG_CSV_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH));
        let images_dir = lookup("IMAGES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR));
        let frontend_dir = lookup("FRONTEND_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FRONTEND_DIR));

        let cache_records = parse_flag("CATALOG_CACHE", lookup("CATALOG_CACHE"))?;
        let open_browser = parse_flag("OPEN_BROWSER", lookup("OPEN_BROWSER"))?;

        Ok(Self {
            server_addr,
            csv_path,
            images_dir,
            frontend_dir,
            cache_records,
            open_browser,
        })
    }
}

fn parse_flag(name: &str, raw: Option<String>) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(false);
    };
    match raw.trim().to_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" | "si" | "sí" => Ok(true),
        other => Err(anyhow!("Valor no válido para {name}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = config_with(&[]).unwrap();
        assert_eq!(cfg.server_addr, DEFAULT_SERVER_ADDR);
        assert_eq!(cfg.csv_path, PathBuf::from(DEFAULT_CSV_PATH));
        assert_eq!(cfg.images_dir, PathBuf::from(DEFAULT_IMAGES_DIR));
        assert!(!cfg.cache_records);
        assert!(!cfg.open_browser);
    }

    #[test]
    fn overrides_are_honored() {
        let cfg = config_with(&[
            ("SERVER_ADDR", "0.0.0.0:8080"),
            ("CATALOG_CSV_PATH", "/tmp/inventario.csv"),
            ("CATALOG_CACHE", "true"),
        ])
        .unwrap();
        assert_eq!(cfg.server_addr, "0.0.0.0:8080");
        assert_eq!(cfg.csv_path, PathBuf::from("/tmp/inventario.csv"));
        assert!(cfg.cache_records);
    }

    #[test]
    fn invalid_flag_is_rejected() {
        let err = config_with(&[("OPEN_BROWSER", "quizas")]).unwrap_err();
        assert!(err.to_string().contains("OPEN_BROWSER"));
    }
}
