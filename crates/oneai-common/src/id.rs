pub fn new_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// Short human-readable id such as `pane-3f9a1c2b`.
pub fn prefixed_id(prefix: &str) -> String {
    format!("{prefix}-{}", new_correlation_id())
}
