use std::{collections::HashMap, fmt};

use oxigraph::model::Term;

/// Value bound to a variable in a SPARQL SELECT row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingValue {
    /// URI/IRI value
    Uri(String),
    /// Literal value with optional datatype and language tag
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
    /// Blank node
    BlankNode(String),
}

impl BindingValue {
    /// Get the string value regardless of type
    pub fn as_str(&self) -> &str {
        match self {
            Self::Uri(s) | Self::BlankNode(s) => s,
            Self::Literal { value, .. } => value,
        }
    }

    pub fn plain_literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }
}

impl From<&Term> for BindingValue {
    fn from(term: &Term) -> Self {
        match term {
            Term::NamedNode(node) => Self::Uri(node.as_str().to_string()),
            Term::BlankNode(node) => Self::BlankNode(node.as_str().to_string()),
            Term::Literal(literal) => Self::Literal {
                value: literal.value().to_string(),
                datatype: Some(literal.datatype().as_str().to_string()),
                language: literal.language().map(str::to_string),
            },
            #[allow(unreachable_patterns)]
            other => Self::plain_literal(other.to_string()),
        }
    }
}

impl fmt::Display for BindingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(uri) => write!(f, "<{uri}>"),
            Self::BlankNode(id) => write!(f, "_:{id}"),
            Self::Literal {
                value,
                language: Some(language),
                ..
            } => write!(f, "\"{value}\"@{language}"),
            Self::Literal {
                value,
                datatype: Some(datatype),
                ..
            } if datatype != XSD_STRING => write!(f, "\"{value}\"^^<{datatype}>"),
            Self::Literal { value, .. } => write!(f, "\"{value}\""),
        }
    }
}

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// One row of a SPARQL SELECT result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSet {
    pub bindings: HashMap<String, BindingValue>,
}

impl BindingSet {
    /// Get a binding value by variable name
    pub fn get(&self, var: &str) -> Option<&BindingValue> {
        self.bindings.get(var)
    }

    /// Get a binding value as a string
    pub fn get_str(&self, var: &str) -> Option<&str> {
        self.bindings.get(var).map(BindingValue::as_str)
    }

    pub fn insert(&mut self, var: impl Into<String>, value: BindingValue) {
        self.bindings.insert(var.into(), value);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, BindingValue)> for BindingSet {
    fn from_iter<I: IntoIterator<Item = (K, BindingValue)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use oxigraph::model::{Literal, NamedNode};

    use super::*;

    #[test]
    fn literal_term_keeps_language() {
        let term = Term::from(Literal::new_language_tagged_literal_unchecked("chat", "fr"));
        let value = BindingValue::from(&term);
        assert_eq!(value.as_str(), "chat");
        assert_eq!(value.to_string(), "\"chat\"@fr");
    }

    #[test]
    fn display_omits_xsd_string_datatype() {
        let term = Term::from(Literal::new_simple_literal("plain"));
        assert_eq!(BindingValue::from(&term).to_string(), "\"plain\"");
    }

    #[test]
    fn named_node_becomes_uri() {
        let term = Term::from(NamedNode::new_unchecked("http://example.org/a"));
        let value = BindingValue::from(&term);
        assert_eq!(value, BindingValue::Uri("http://example.org/a".to_string()));
        assert_eq!(value.to_string(), "<http://example.org/a>");
    }

    #[test]
    fn binding_set_lookup() {
        let row: BindingSet = [("s", BindingValue::Uri("http://example.org/s".to_string()))]
            .into_iter()
            .collect();
        assert_eq!(row.get_str("s"), Some("http://example.org/s"));
        assert!(row.get("missing").is_none());
        assert_eq!(row.len(), 1);
    }
}
