//! JSON snapshot reader

use std::io::Read;

use serde::Deserialize;
use serde_json::Value;

use super::record::RawRecord;
use crate::error::{LensError, LensResult};

/// Accepted top-level shapes: a bare array, or `{ "transactions": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    List(Vec<Value>),
    Wrapped { transactions: Vec<Value> },
}

/// Read every element of a JSON snapshot
///
/// Each element is decoded on its own, so one malformed element is reported
/// without discarding the rest.
pub fn read_records<R: Read>(reader: R) -> LensResult<Vec<Result<RawRecord, String>>> {
    let snapshot: Snapshot = serde_json::from_reader(reader).map_err(|e| {
        LensError::Json(format!(
            "expected an array of transactions or an object with a 'transactions' array: {}",
            e
        ))
    })?;

    let values = match snapshot {
        Snapshot::List(values) => values,
        Snapshot::Wrapped { transactions } => transactions,
    };

    Ok(values
        .into_iter()
        .map(|value| {
            serde_json::from_value::<RawRecord>(value).map_err(|e| format!("malformed record: {}", e))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::record::RawAmount;

    #[test]
    fn test_bare_array_with_mixed_id_types() {
        let data = r#"[
            {"id": 1, "accountId": 3, "amount": 12.5, "type": "OUT", "date": "2024-01-20"},
            {"id": "2", "accountId": "3", "amount": "7.25", "type": "IN", "date": "2024-01-21T08:00:00Z"}
        ]"#;
        let rows = read_records(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        let first = rows[0].clone().unwrap();
        assert_eq!(first.id.unwrap().as_str(), "1");
        assert_eq!(first.amount, Some(RawAmount::Number(12.5)));

        let second = rows[1].clone().unwrap();
        assert_eq!(second.amount, Some(RawAmount::Text("7.25".into())));
    }

    #[test]
    fn test_wrapped_object() {
        let data = r#"{"transactions": [{"id": 1}]}"#;
        let rows = read_records(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_malformed_element_is_isolated() {
        let data = r#"[{"id": {"nested": true}}, {"id": 5}]"#;
        let rows = read_records(data.as_bytes()).unwrap();
        assert!(rows[0].is_err());
        assert!(rows[1].is_ok());
    }

    #[test]
    fn test_not_a_snapshot() {
        assert!(read_records("42".as_bytes()).is_err());
        assert!(read_records("not json".as_bytes()).is_err());
    }
}
