//! Lectura del inventario CSV y conversión a registros tipados.
//!
//! Las columnas se asocian por POSICIÓN, no por el nombre de la cabecera:
//!
//! | col | campo            | col | campo        |
//! |-----|------------------|-----|--------------|
//! | 0   | ruta_completa    | 9   | periodo      |
//! | 1   | tema_principal   | 10  | escala       |
//! | 2-6 | subcarpeta_1..5  | 11  | sector       |
//! | 7   | nombre_archivo   | 12  | sub_sector   |
//! | 8   | escenario        | 13  | componente   |
//! |     |                  | 14  | tipo         |
//! |     |                  | 15  | atributo     |
//! |     |                  | 16  | diferenciador|
//!
//! Las filas cortas no se rechazan: las columnas que faltan quedan vacías.

use std::path::Path;

use tracing::debug;

use crate::{
    error::CatalogError,
    models::{image_url, Record},
};

/// Número de columnas del esquema conocido.
pub const COLUMN_COUNT: usize = 17;

/// Lee y parsea el fichero completo.
pub async fn read_records(path: &Path) -> Result<Vec<Record>, CatalogError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let records = parse_records(&text);
    debug!("Inventario {} cargado: {} registros", path.display(), records.len());
    Ok(records)
}

/// Parsea el texto completo del CSV. La primera línea es la cabecera y se descarta.
pub fn parse_records(text: &str) -> Vec<Record> {
    text.trim()
        .lines()
        .skip(1)
        .enumerate()
        .map(|(index, line)| record_from_cells(index + 1, &split_line(line)))
        .collect()
}

/// Divide una línea por comas respetando comillas dobles. Las comillas solo
/// conmutan el modo "dentro de comillas" y no se copian al valor; no hay
/// comillas escapadas.
pub fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::with_capacity(COLUMN_COUNT);
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    cells.push(current);
    cells
}

/// Recorta espacios y una comilla inicial/final sobrante.
fn clean_value(raw: &str) -> String {
    let value = raw.trim();
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.to_string()
}

fn record_from_cells(id: usize, cells: &[String]) -> Record {
    let cell = |i: usize| cells.get(i).map(|c| clean_value(c)).unwrap_or_default();
    let full_path = cell(0);
    let differentiator = Some(cell(16)).filter(|d| !d.is_empty());

    Record {
        id,
        image_url: image_url(&full_path),
        full_path,
        main_topic: cell(1),
        subfolder_1: cell(2),
        subfolder_2: cell(3),
        subfolder_3: cell(4),
        subfolder_4: cell(5),
        subfolder_5: cell(6),
        file_name: cell(7),
        scenario: cell(8),
        period: cell(9),
        scale: cell(10),
        sector: cell(11),
        sub_sector: cell(12),
        component: cell(13),
        kind: cell(14),
        attribute: cell(15),
        differentiator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "ruta_completa,tema_principal,subcarpeta_1,subcarpeta_2,subcarpeta_3,subcarpeta_4,subcarpeta_5,nombre_archivo,escenario,periodo,escala,sector,sub_sector,componente,tipo,atributo,diferenciador";

    #[test]
    fn quoted_commas_are_kept_inside_the_field() {
        let cells = split_line(r#"a,"b,c",d"#);
        assert_eq!(cells, vec!["a", "b,c", "d"]);
    }

    #[test]
    fn empty_cells_are_preserved() {
        assert_eq!(split_line("a,,b,"), vec!["a", "", "b", ""]);
    }

    #[test]
    fn full_row_binds_columns_by_position() {
        let text = format!(
            "{HEADER}\nC:\\img\\a.png,Riesgo,s1,s2,s3,s4,s5,a.png,SSP245,2021-2040,Territorial,Minería,Producción,Biotico,AMENAZA,Calor,extra\n"
        );
        let records = parse_records(&text);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, 1);
        assert_eq!(r.full_path, "C:\\img\\a.png");
        assert_eq!(r.main_topic, "Riesgo");
        assert_eq!(r.subfolder_5, "s5");
        assert_eq!(r.file_name, "a.png");
        assert_eq!(r.scenario, "SSP245");
        assert_eq!(r.period, "2021-2040");
        assert_eq!(r.scale, "Territorial");
        assert_eq!(r.sector, "Minería");
        assert_eq!(r.sub_sector, "Producción");
        assert_eq!(r.component, "Biotico");
        assert_eq!(r.kind, "AMENAZA");
        assert_eq!(r.attribute, "Calor");
        assert_eq!(r.differentiator.as_deref(), Some("extra"));
        assert_eq!(r.image_url, "/images/a.png");
    }

    #[test]
    fn header_names_are_not_used_for_binding() {
        let text = "x,y,z\np,t,,,,,,f.png,REFERENCIA\n";
        let records = parse_records(text);
        assert_eq!(records[0].file_name, "f.png");
        assert_eq!(records[0].scenario, "REFERENCIA");
    }

    #[test]
    fn short_rows_default_missing_fields_to_empty() {
        let text = format!("{HEADER}\nruta/b.png,tema,,,,,,b.png,REFERENCIA\n");
        let records = parse_records(&text);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.scenario, "REFERENCIA");
        assert_eq!(r.period, "");
        assert_eq!(r.kind, "");
        assert_eq!(r.attribute, "");
        assert_eq!(r.differentiator, None);
    }

    #[test]
    fn ids_follow_row_order_and_crlf_is_tolerated() {
        let text = format!("{HEADER}\r\nuno.png\r\ndos.png\r\ntres.png\r\n");
        let ids: Vec<usize> = parse_records(&text).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let names: Vec<String> = parse_records(&text)
            .into_iter()
            .map(|r| r.full_path)
            .collect();
        assert_eq!(names, vec!["uno.png", "dos.png", "tres.png"]);
    }

    #[test]
    fn values_are_trimmed_and_stray_quotes_stripped() {
        let text = format!("{HEADER}\n  a.png  ,\" tema \"\n");
        let r = &parse_records(&text)[0];
        assert_eq!(r.full_path, "a.png");
        assert_eq!(r.main_topic, "tema");
    }

    #[test]
    fn header_only_file_has_no_records() {
        assert!(parse_records(HEADER).is_empty());
        assert!(parse_records("").is_empty());
    }

    #[tokio::test]
    async fn unreadable_file_is_an_io_error() {
        let err = read_records(Path::new("/no/existe/inventario.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
