//! Content types advertised on every API declaration.

/// Request bodies the REST layer accepts.
pub const CONSUMES: [&str; 4] = [
    "application/json",
    "application/x-www-form-urlencoded",
    "application/xml",
    "text/xml",
];

/// Response bodies the REST layer can produce, JSONP included.
pub const PRODUCES: [&str; 5] = [
    "application/json",
    "application/xml",
    "text/xml",
    "application/javascript",
    "text/javascript",
];

/// Owned copy of [`CONSUMES`].
pub fn consumes() -> Vec<String> {
    CONSUMES.iter().map(|media| media.to_string()).collect()
}

/// Owned copy of [`PRODUCES`].
pub fn produces() -> Vec<String> {
    PRODUCES.iter().map(|media| media.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jsonp_types_are_always_produced() {
        let produced = produces();
        assert!(produced.contains(&"application/javascript".to_string()));
        assert!(produced.contains(&"text/javascript".to_string()));
        assert!(!consumes().contains(&"text/javascript".to_string()));
    }
}
