//! Motor de facetas y búsqueda sobre el inventario en memoria.
//!
//! Todas las funciones son puras: dependen solo de los registros y de la
//! selección recibida. Las usan tanto la instantánea inicial de filtros como
//! las peticiones en vivo.

use std::collections::BTreeSet;

use crate::models::{
    facet_value, is_missing, FacetField, FacetSet, FilterSelection, Record, MISSING_VALUE,
};

/// Compara el valor crudo de un campo con el valor seleccionado. Solo en
/// `atributo` el marcador de ausencia casa con valores vacíos o centinela;
/// el resto de campos exige igualdad exacta.
fn field_matches(field: FacetField, raw: &str, selected: &str) -> bool {
    if field == FacetField::Attribute && selected == MISSING_VALUE {
        is_missing(raw)
    } else {
        raw == selected
    }
}

/// Indica si el registro cumple todas las restricciones de campo de la
/// selección. El texto libre no interviene aquí.
pub fn matches_filters(record: &Record, selection: &FilterSelection) -> bool {
    FacetField::ALL.iter().all(|&field| match selection.get(field) {
        Some(selected) => field_matches(field, field.value_of(record), selected),
        None => true,
    })
}

/// Búsqueda de texto libre, sin distinguir mayúsculas, sobre nombre de
/// archivo, componente, tipo, atributo, escenario y periodo.
pub fn matches_query(record: &Record, query: &str) -> bool {
    let haystack = [
        record.file_name.as_str(),
        record.component.as_str(),
        record.kind.as_str(),
        record.attribute.as_str(),
        record.scenario.as_str(),
        record.period.as_str(),
    ]
    .join(" ")
    .to_lowercase();
    haystack.contains(&query.to_lowercase())
}

/// Predicado completo de búsqueda: texto libre (si lo hay) y filtros.
pub fn matches(record: &Record, selection: &FilterSelection) -> bool {
    if let Some(query) = selection.query() {
        if !matches_query(record, query) {
            return false;
        }
    }
    matches_filters(record, selection)
}

/// Registros que cumplen la selección, en el orden original del fichero.
pub fn search(records: &[Record], selection: &FilterSelection) -> Vec<Record> {
    records
        .iter()
        .filter(|r| matches(r, selection))
        .cloned()
        .collect()
}

/// Valores disponibles por campo dados los filtros actuales.
///
/// Se aplica la selección completa, incluido el propio campo: una vez elegido
/// un valor, su lista queda reducida a ese valor.
pub fn narrow_facets(records: &[Record], selection: &FilterSelection) -> FacetSet {
    let filtered: Vec<&Record> = records
        .iter()
        .filter(|r| matches_filters(r, selection))
        .collect();

    let mut facets = FacetSet::default();
    for field in FacetField::ALL {
        let values: BTreeSet<&str> = filtered
            .iter()
            .map(|r| facet_value(field.value_of(r)))
            .collect();
        *facets.get_mut(field) = values.into_iter().map(str::to_string).collect();
    }
    facets
}
