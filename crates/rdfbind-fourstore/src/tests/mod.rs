
pub(super) fn require_fourstore() -> bool {
    if std::env::var("RUN_FOURSTORE_TESTS").ok().as_deref() == Some("1") {
        true
    } else {
        eprintln!("Skipping 4store tests (set RUN_FOURSTORE_TESTS=1)");
        false
    }
}

pub(super) fn fourstore_url() -> String {
    std::env::var("FOURSTORE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}
