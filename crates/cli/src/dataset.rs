//! Loading row files for the CLI.
//!
//! A dataset is a YAML or JSON list of objects. A file holding several named
//! lists (like the admin seed catalog) works too when a table name is given.

use std::path::{Path, PathBuf};

use serde_json::Value;
use souq_core::LocalizedText;
use souq_core::table::{CellValue, Column, Record, RecordError};
use thiserror::Error;

/// Errors from reading a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("row {index}: {source}")]
    Row {
        index: usize,
        #[source]
        source: RecordError,
    },
    #[error("no table named {0:?} in the file")]
    MissingTable(String),
    #[error("expected a list of rows{0}")]
    NotAList(&'static str),
}

/// Read the rows of `path`, taking the list under `table` when the file
/// holds several.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or does not hold a
/// list of objects.
pub fn load(path: &Path, table: Option<&str>) -> Result<Vec<Record>, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let value: Value = if is_json {
        serde_json::from_str(&text)?
    } else {
        serde_yaml::from_str(&text)?
    };
    let rows = parse(value, table)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Loaded dataset");
    Ok(rows)
}

/// Turn a parsed document into records.
///
/// # Errors
///
/// As [`load`], minus I/O.
pub fn parse(value: Value, table: Option<&str>) -> Result<Vec<Record>, DatasetError> {
    let list = match (value, table) {
        (Value::Array(items), None) => items,
        (Value::Object(mut tables), Some(name)) => match tables.remove(name) {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(DatasetError::NotAList(" under the table name")),
            None => return Err(DatasetError::MissingTable(name.to_string())),
        },
        (Value::Object(_), None) => {
            return Err(DatasetError::NotAList("; pass --table to pick one"));
        }
        _ => return Err(DatasetError::NotAList("")),
    };

    list.into_iter()
        .enumerate()
        .map(|(index, item)| {
            Record::try_from(item).map_err(|source| DatasetError::Row { index, source })
        })
        .collect()
}

/// One column per key, in first-seen order.
///
/// A column whose non-empty cells are all numbers is typed as a number
/// column so it right-aligns and sorts numerically.
#[must_use]
pub fn columns(rows: &[Record]) -> Vec<Column<String>> {
    let mut keys: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }

    keys.into_iter()
        .map(|key| {
            let column = Column::new(key.to_string(), LocalizedText::new(key, key));
            let cells: Vec<&CellValue> = rows
                .iter()
                .filter_map(|row| row.get(key))
                .filter(|cell| !cell.is_null())
                .collect();
            if !cells.is_empty() && cells.iter().all(|cell| matches!(cell, CellValue::Number(_))) {
                column.kind(souq_core::table::ColumnType::Number)
            } else {
                column
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;
    use souq_core::table::ColumnType;

    #[test]
    fn test_parse_list() {
        let rows = parse(json!([{"name": "Ajwa", "price": 85}, {"name": "Sukkari"}]), None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("price"), None);
    }

    #[test]
    fn test_parse_named_table() {
        let doc = json!({"products": [{"sku": "DT-1"}], "orders": []});
        assert_eq!(parse(doc.clone(), Some("products")).unwrap().len(), 1);
        assert!(matches!(
            parse(doc.clone(), Some("plans")),
            Err(DatasetError::MissingTable(_))
        ));
        assert!(matches!(parse(doc, None), Err(DatasetError::NotAList(_))));
    }

    #[test]
    fn test_rows_must_be_objects() {
        let err = parse(json!([{"a": 1}, 2]), None).unwrap_err();
        assert!(matches!(err, DatasetError::Row { index: 1, .. }));
    }

    #[test]
    fn test_columns_first_seen_and_typed() {
        let rows = parse(
            json!([{"name": "Ajwa", "price": 85}, {"price": null, "city": "Riyadh", "name": "x"}]),
            None,
        )
        .unwrap();
        let columns = columns(&rows);
        let keys: Vec<&str> = columns.iter().map(Column::key).collect();
        assert_eq!(keys, vec!["name", "price", "city"]);
        assert_eq!(columns[1].kind, Some(ColumnType::Number));
        assert_eq!(columns[0].kind, None);
    }

    #[test]
    fn test_load_yaml_file() {
        let path = std::env::temp_dir().join(format!("souq-cli-{}.yaml", std::process::id()));
        std::fs::write(&path, "- { name: Cardamom, stock: 300 }\n").unwrap();
        let rows = load(&path, None).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(rows[0].get("stock"), Some(&CellValue::Number(300.0)));
    }
}
