//! Acceso al fichero de inventario. Por defecto se relee y reparsea en cada
//! petición; opcionalmente se cachean los registros mientras el mtime del
//! fichero no cambie.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::SystemTime,
};

use tracing::debug;

use crate::{error::CatalogError, loader, models::Record};

struct CachedRecords {
    modified: SystemTime,
    records: Arc<Vec<Record>>,
}

pub struct CatalogSource {
    path: PathBuf,
    cache_enabled: bool,
    cache: Mutex<Option<CachedRecords>>,
}

impl CatalogSource {
    pub fn new(path: impl Into<PathBuf>, cache_enabled: bool) -> Self {
        Self {
            path: path.into(),
            cache_enabled,
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Devuelve todos los registros del inventario.
    pub async fn records(&self) -> Result<Arc<Vec<Record>>, CatalogError> {
        if !self.cache_enabled {
            return Ok(Arc::new(loader::read_records(&self.path).await?));
        }

        let modified = tokio::fs::metadata(&self.path)
            .await
            .and_then(|m| m.modified())
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;

        if let Some(records) = self.cached(modified) {
            debug!("Inventario servido desde caché ({} registros)", records.len());
            return Ok(records);
        }

        let records = Arc::new(loader::read_records(&self.path).await?);
        if let Ok(mut cache) = self.cache.lock() {
            *cache = Some(CachedRecords {
                modified,
                records: records.clone(),
            });
        }
        Ok(records)
    }

    fn cached(&self, modified: SystemTime) -> Option<Arc<Vec<Record>>> {
        let cache = self.cache.lock().ok()?;
        cache
            .as_ref()
            .filter(|c| c.modified == modified)
            .map(|c| c.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "ruta,tema,s1,s2,s3,s4,s5,archivo,escenario";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn uncached_source_rereads_on_every_call() {
        let file = write_csv(&["a.png,,,,,,,a.png,SSP245"]);
        let source = CatalogSource::new(file.path(), false);
        assert_eq!(source.records().await.unwrap().len(), 1);

        let mut handle = std::fs::OpenOptions::new().append(true).open(file.path()).unwrap();
        writeln!(handle, "b.png,,,,,,,b.png,SSP370").unwrap();
        assert_eq!(source.records().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn cached_source_reuses_records_while_mtime_is_unchanged() {
        let file = write_csv(&["a.png,,,,,,,a.png,SSP245"]);
        let source = CatalogSource::new(file.path(), true);
        let first = source.records().await.unwrap();
        let second = source.records().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn cached_source_reloads_when_mtime_changes() {
        let file = write_csv(&["a.png,,,,,,,a.png,SSP245"]);
        let source = CatalogSource::new(file.path(), true);
        assert_eq!(source.records().await.unwrap().len(), 1);

        std::fs::write(
            file.path(),
            format!("{HEADER}\na.png,,,,,,,a.png,SSP245\nb.png,,,,,,,b.png,SSP370\n"),
        )
        .unwrap();
        let later = SystemTime::now() + std::time::Duration::from_secs(60);
        std::fs::File::options()
            .write(true)
            .open(file.path())
            .unwrap()
            .set_modified(later)
            .unwrap();

        assert_eq!(source.records().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_reported_in_both_modes() {
        for cache in [false, true] {
            let source = CatalogSource::new("/no/existe.csv", cache);
            assert!(matches!(
                source.records().await,
                Err(CatalogError::Io { .. })
            ));
        }
    }
}
