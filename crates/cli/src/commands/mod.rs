//! CLI subcommands.

pub mod table;
pub mod values;

use thiserror::Error;

/// Errors from command arguments that clap cannot check on its own.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown column {key:?} (columns: {known})")]
    UnknownColumn { key: String, known: String },
}

/// Fail unless `key` names one of `known`.
pub(crate) fn check_column(key: &str, known: &[String]) -> Result<(), CommandError> {
    if known.iter().any(|k| k == key) {
        Ok(())
    } else {
        Err(CommandError::UnknownColumn {
            key: key.to_string(),
            known: known.join(", "),
        })
    }
}

/// Parse a `key=value` argument.
pub(crate) fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("status=active").unwrap(),
            ("status".to_string(), "active".to_string())
        );
        assert_eq!(parse_pair("note=a=b").unwrap().1, "a=b");
        assert_eq!(parse_pair("sku=").unwrap().1, "");
        assert!(parse_pair("status").is_err());
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn test_check_column() {
        let known = vec!["name".to_string(), "price".to_string()];
        assert!(check_column("price", &known).is_ok());
        let err = check_column("colour", &known).unwrap_err();
        assert_eq!(err.to_string(), r#"unknown column "colour" (columns: name, price)"#);
    }
}
