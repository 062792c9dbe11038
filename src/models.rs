//! Modelos de dominio: registros del inventario, selección de filtros y
//! facetas disponibles.

use serde::{Deserialize, Serialize, Serializer};

/// Marcador canónico para valores ausentes (`NaN`, `nan`, `null` o vacío).
pub const MISSING_VALUE: &str = "NO ESPECIFICA";

const SENTINELS: [&str; 3] = ["NaN", "nan", "null"];

/// Indica si un valor crudo del CSV representa "sin especificar".
pub fn is_missing(raw: &str) -> bool {
    let value = raw.trim();
    value.is_empty() || SENTINELS.contains(&value)
}

/// Valor que se muestra como opción de faceta para un valor crudo.
pub fn facet_value(raw: &str) -> &str {
    if is_missing(raw) {
        MISSING_VALUE
    } else {
        raw
    }
}

/// Nombre del fichero de imagen: último segmento de la ruta (Windows o POSIX).
pub fn image_file_name(full_path: &str) -> Option<&str> {
    full_path
        .rsplit(|c| c == '\\' || c == '/')
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// URL pública de una imagen a partir de su ruta completa.
pub fn image_url(full_path: &str) -> String {
    match image_file_name(full_path) {
        Some(name) => format!("/images/{name}"),
        None => "/placeholder-image.svg".to_string(),
    }
}

/// Una fila del inventario: metadatos de una imagen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Posición de la fila (1-based) en el fichero; no se persiste.
    #[serde(serialize_with = "id_as_string")]
    pub id: usize,
    #[serde(rename = "ruta_completa")]
    pub full_path: String,
    #[serde(rename = "tema_principal")]
    pub main_topic: String,
    #[serde(rename = "subcarpeta_1")]
    pub subfolder_1: String,
    #[serde(rename = "subcarpeta_2")]
    pub subfolder_2: String,
    #[serde(rename = "subcarpeta_3")]
    pub subfolder_3: String,
    #[serde(rename = "subcarpeta_4")]
    pub subfolder_4: String,
    #[serde(rename = "subcarpeta_5")]
    pub subfolder_5: String,
    #[serde(rename = "nombre_archivo")]
    pub file_name: String,
    #[serde(rename = "escenario")]
    pub scenario: String,
    #[serde(rename = "periodo")]
    pub period: String,
    #[serde(rename = "escala")]
    pub scale: String,
    pub sector: String,
    pub sub_sector: String,
    #[serde(rename = "componente")]
    pub component: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "atributo")]
    pub attribute: String,
    #[serde(rename = "diferenciador", skip_serializing_if = "Option::is_none")]
    pub differentiator: Option<String>,
    #[serde(rename = "url_imagen")]
    pub image_url: String,
}

fn id_as_string<S: Serializer>(id: &usize, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}

/// Selección parcial de filtros más el texto libre opcional.
/// Un campo ausente o vacío significa "sin restricción".
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FilterSelection {
    #[serde(rename = "escenario", default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    #[serde(rename = "periodo", default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(rename = "escala", default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_sector: Option<String>,
    #[serde(rename = "componente", default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(rename = "tipo", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "atributo", default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(rename = "searchText", default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
}

impl FilterSelection {
    /// Valor seleccionado para un campo, ignorando cadenas vacías.
    pub fn get(&self, field: FacetField) -> Option<&str> {
        let value = match field {
            FacetField::Scenario => &self.scenario,
            FacetField::Period => &self.period,
            FacetField::Scale => &self.scale,
            FacetField::Sector => &self.sector,
            FacetField::SubSector => &self.sub_sector,
            FacetField::Component => &self.component,
            FacetField::Kind => &self.kind,
            FacetField::Attribute => &self.attribute,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn query(&self) -> Option<&str> {
        self.search_text.as_deref().filter(|q| !q.is_empty())
    }
}

/// Campos sobre los que se puede filtrar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetField {
    Scenario,
    Period,
    Scale,
    Sector,
    SubSector,
    Component,
    Kind,
    Attribute,
}

impl FacetField {
    pub const ALL: [FacetField; 8] = [
        FacetField::Scenario,
        FacetField::Period,
        FacetField::Scale,
        FacetField::Sector,
        FacetField::SubSector,
        FacetField::Component,
        FacetField::Kind,
        FacetField::Attribute,
    ];

    /// Valor crudo del campo en un registro.
    pub fn value_of(self, record: &Record) -> &str {
        match self {
            FacetField::Scenario => &record.scenario,
            FacetField::Period => &record.period,
            FacetField::Scale => &record.scale,
            FacetField::Sector => &record.sector,
            FacetField::SubSector => &record.sub_sector,
            FacetField::Component => &record.component,
            FacetField::Kind => &record.kind,
            FacetField::Attribute => &record.attribute,
        }
    }
}

/// Opciones disponibles por campo, ordenadas y sin duplicados.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetSet {
    #[serde(rename = "escenarios")]
    pub scenarios: Vec<String>,
    #[serde(rename = "periodos")]
    pub periods: Vec<String>,
    #[serde(rename = "escalas")]
    pub scales: Vec<String>,
    #[serde(rename = "sectores")]
    pub sectors: Vec<String>,
    #[serde(rename = "subSectores")]
    pub sub_sectors: Vec<String>,
    #[serde(rename = "componentes")]
    pub components: Vec<String>,
    #[serde(rename = "tipos")]
    pub kinds: Vec<String>,
    #[serde(rename = "atributos")]
    pub attributes: Vec<String>,
}

impl FacetSet {
    pub fn get_mut(&mut self, field: FacetField) -> &mut Vec<String> {
        match field {
            FacetField::Scenario => &mut self.scenarios,
            FacetField::Period => &mut self.periods,
            FacetField::Scale => &mut self.scales,
            FacetField::Sector => &mut self.sectors,
            FacetField::SubSector => &mut self.sub_sectors,
            FacetField::Component => &mut self.components,
            FacetField::Kind => &mut self.kinds,
            FacetField::Attribute => &mut self.attributes,
        }
    }

    /// Facetas de respaldo cuando el inventario no se puede leer.
    pub fn fallback() -> Self {
        let mut facets = FacetSet::default();
        for (field, values) in DEFAULT_FACETS {
            *facets.get_mut(field) = values.iter().map(|v| v.to_string()).collect();
        }
        facets
    }
}

#[cfg(test)]
impl FacetSet {
    pub fn get(&self, field: FacetField) -> &[String] {
        match field {
            FacetField::Scenario => &self.scenarios,
            FacetField::Period => &self.periods,
            FacetField::Scale => &self.scales,
            FacetField::Sector => &self.sectors,
            FacetField::SubSector => &self.sub_sectors,
            FacetField::Component => &self.components,
            FacetField::Kind => &self.kinds,
            FacetField::Attribute => &self.attributes,
        }
    }
}

/// Dominio conocido de cada campo. Solo se usa como respaldo en la carga
/// inicial; los datos no se validan contra estas listas.
pub const DEFAULT_FACETS: [(FacetField, &[&str]); 8] = [
    (FacetField::Scenario, &["REFERENCIA", "SSP245", "SSP370"]),
    (
        FacetField::Period,
        &["1990-2021", "2021-2040", "2041-2060", "2061-2080", "2081-2100"],
    ),
    (FacetField::Scale, &["Territorial", "Sectorial"]),
    (FacetField::Sector, &["Hidrocarburos", "Minería", "Energía"]),
    (
        FacetField::SubSector,
        &["Producción", "Transporte", "Exploración", "Generación"],
    ),
    (
        FacetField::Component,
        &["Biotico", "Habitat_Humano", "Infraestructura", "Salud_humana"],
    ),
    (
        FacetField::Kind,
        &[
            "AMENAZA",
            "VULNERABILIDAD",
            "CAPACIDAD_ADAPTATIVA",
            "SENSIBILIDAD",
            "RIESGO",
            "INDICADOR",
            "DELTA",
        ],
    ),
    (FacetField::Attribute, &[MISSING_VALUE]),
];
