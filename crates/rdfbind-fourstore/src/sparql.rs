//! SPARQL 1.1 Query Results JSON parsing.

use std::collections::HashMap;

use rdfbind_datasource::{BindingSet, BindingValue};
use serde::Deserialize;

use crate::error::{FourStoreError, Result};

#[derive(Deserialize)]
struct SparqlSelectResponse {
    head: SparqlHead,
    results: SparqlSelectResults,
}

#[derive(Deserialize)]
struct SparqlHead {
    #[serde(default)]
    vars: Vec<String>,
}

#[derive(Deserialize)]
struct SparqlSelectResults {
    bindings: Vec<HashMap<String, SparqlSelectBinding>>,
}

#[derive(Deserialize)]
struct SparqlSelectBinding {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    datatype: Option<String>,
    #[serde(rename = "xml:lang")]
    language: Option<String>,
}

impl SparqlSelectBinding {
    fn into_value(self) -> Result<BindingValue> {
        match self.kind.as_str() {
            "uri" => Ok(BindingValue::Uri(self.value)),
            "bnode" => Ok(BindingValue::BlankNode(self.value)),
            // 4store still emits the pre-1.1 "typed-literal" form
            "literal" | "typed-literal" => Ok(BindingValue::Literal {
                value: self.value,
                datatype: self.datatype,
                language: self.language,
            }),
            other => Err(FourStoreError::ParseError {
                reason: format!("Unknown binding type '{other}'"),
            }),
        }
    }
}

/// Variables and rows of a SELECT response.
pub(crate) fn parse_select_json(json: &str) -> Result<(Vec<String>, Vec<BindingSet>)> {
    let response: SparqlSelectResponse =
        serde_json::from_str(json).map_err(|e| FourStoreError::ParseError {
            reason: format!("Failed to parse SELECT response: {e}"),
        })?;

    let rows = response
        .results
        .bindings
        .into_iter()
        .map(|binding| {
            binding
                .into_iter()
                .map(|(var, value)| value.into_value().map(|value| (var, value)))
                .collect::<Result<BindingSet>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((response.head.vars, rows))
}

#[derive(Deserialize)]
struct SparqlAskResponse {
    boolean: bool,
}

pub(crate) fn parse_ask_json(json: &str) -> Result<bool> {
    let response: SparqlAskResponse =
        serde_json::from_str(json).map_err(|e| FourStoreError::ParseError {
            reason: format!("Failed to parse ASK response: {e}"),
        })?;

    Ok(response.boolean)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn parses_all_binding_kinds() {
        let json = r#"{
            "head": {"vars": ["s", "label", "n", "b"]},
            "results": {"bindings": [{
                "s": {"type": "uri", "value": "http://example.org/s"},
                "label": {"type": "literal", "value": "chat", "xml:lang": "fr"},
                "n": {"type": "typed-literal", "value": "3",
                      "datatype": "http://www.w3.org/2001/XMLSchema#integer"},
                "b": {"type": "bnode", "value": "b0"}
            }]}
        }"#;

        let (vars, rows) = parse_select_json(json).unwrap();
        assert_eq!(vars, vec!["s", "label", "n", "b"]);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(
            row.get("s"),
            Some(&BindingValue::Uri("http://example.org/s".to_string()))
        );
        assert_eq!(row.get("label").unwrap().to_string(), "\"chat\"@fr");
        assert_eq!(row.get_str("n"), Some("3"));
        assert_eq!(
            row.get("b"),
            Some(&BindingValue::BlankNode("b0".to_string()))
        );
    }

    #[test]
    fn unbound_variables_are_absent() {
        let json = r#"{"head": {"vars": ["s", "o"]},
            "results": {"bindings": [{"s": {"type": "uri", "value": "http://example.org/s"}}]}}"#;
        let (_, rows) = parse_select_json(json).unwrap();
        assert!(rows[0].get("o").is_none());
    }

    #[test]
    fn rejects_unknown_binding_type() {
        let json = r#"{"head": {"vars": ["s"]},
            "results": {"bindings": [{"s": {"type": "mystery", "value": "x"}}]}}"#;
        assert!(matches!(
            parse_select_json(json),
            Err(FourStoreError::ParseError { .. })
        ));
    }

    #[test]
    fn parses_ask() {
        assert!(parse_ask_json(r#"{"head": {}, "boolean": true}"#).unwrap());
        assert!(!parse_ask_json(r#"{"boolean": false}"#).unwrap());
        assert!(parse_ask_json("<html/>").is_err());
    }
}
