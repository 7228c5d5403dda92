use serde::Deserialize;
use serde_json::Value;

use super::source::FetchError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ValuesPayload {
    Envelope {
        #[serde(default)]
        values: Vec<Vec<Value>>,
    },
    Bare(Vec<Vec<Value>>),
}

/// Decodes a sheet values response (`{"values": [[...]]}`) or a bare array of rows.
///
/// A sheet with no data omits `values` entirely, which decodes to zero rows.
pub(super) fn parse_values(raw: &str) -> Result<Vec<Vec<String>>, FetchError> {
    let payload: ValuesPayload = serde_json::from_str(raw).map_err(FetchError::Decode)?;
    let values = match payload {
        ValuesPayload::Envelope { values } | ValuesPayload::Bare(values) => values,
    };

    Ok(values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

fn cell_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decodes_envelope_with_ragged_rows() {
        let raw = r#"{
            "range": "Main!A1:N500",
            "majorDimension": "ROWS",
            "values": [["Node", "Parent"], ["A"], ["B", "A", "desc"]]
        }"#;
        let rows = parse_values(raw).unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["Node".to_owned(), "Parent".to_owned()],
                vec!["A".to_owned()],
                vec!["B".to_owned(), "A".to_owned(), "desc".to_owned()],
            ]
        );
    }

    #[test]
    fn decodes_bare_array_and_scalars() {
        let rows = parse_values(r#"[["id", 3, true, null]]"#).unwrap();
        assert_eq!(rows, vec![vec!["id", "3", "true", ""]]);
    }

    #[test]
    fn empty_sheet_has_no_rows() {
        let rows = parse_values(r#"{"range": "Main!A1:N500", "majorDimension": "ROWS"}"#).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_values("not json"), Err(FetchError::Decode(_))));
        assert!(matches!(parse_values(r#"{"values": 4}"#), Err(FetchError::Decode(_))));
    }
}
