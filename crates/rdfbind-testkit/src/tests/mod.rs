#![allow(clippy::unwrap_used)]


use std::io::Write;

use tempfile::{Builder, NamedTempFile, TempPath};

pub(crate) const ALICE_TTL: &str = r#"
@prefix foaf: <http://xmlns.com/foaf/0.1/> .
<http://example.org/alice> a foaf:Person ;
    foaf:name "Alice" ;
    foaf:knows <http://example.org/bob> .
"#;

pub(crate) const BOB_NT: &str =
    "<http://example.org/bob> <http://xmlns.com/foaf/0.1/name> \"Bob\" .\n";

/// Write `content` to a temporary file ending in `suffix`.
pub(crate) fn fixture(suffix: &str, content: &str) -> TempPath {
    let mut file: NamedTempFile = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.into_temp_path()
}

pub(crate) fn path_str(path: &TempPath) -> String {
    path.display().to_string()
}
