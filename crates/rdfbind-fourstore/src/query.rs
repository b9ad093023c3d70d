use oxigraph::model::NamedNode;

/// Substring of 4store's HTML 404 page.
///
/// An append to a graph that does not exist yet fails with this page in the
/// error body; it is the only signal 4store gives for a missing graph.
pub const GRAPH_NOT_FOUND_MARKER: &str = "<h1>Not found";

/// CONSTRUCT query standing in for `DESCRIBE <uri>`.
///
/// 4store's query engine (rasqal) has no DESCRIBE, so a resource is
/// described as every triple it is the subject of.
pub fn describe_query(uri: &NamedNode) -> String {
    format!(
        "construct {{ ?s ?p ?o }}  where {{ ?s ?p ?o. filter(?s = <{}>) }} ",
        uri.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_filters_on_exact_subject() {
        let uri = NamedNode::new_unchecked("http://example.org/people#alice");
        assert_eq!(
            describe_query(&uri),
            "construct { ?s ?p ?o }  where { ?s ?p ?o. filter(?s = <http://example.org/people#alice>) } "
        );
    }
}
