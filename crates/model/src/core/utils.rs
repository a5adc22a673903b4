use chrono::{DateTime, Utc};

/// Separator used by catalog paths (`/zone/home/user/...`).
pub const PATH_SEPARATOR: char = '/';

/// Returns the parent of an absolute catalog path.
///
/// The root collection is its own parent.
pub fn parent_path(path: &str) -> &str {
    let trimmed = trim_trailing_separator(path);
    match trimmed.rfind(PATH_SEPARATOR) {
        Some(0) | None => "/",
        Some(idx) => &trimmed[..idx],
    }
}

/// Returns the last path segment, or an empty string for the root.
pub fn leaf_name(path: &str) -> &str {
    let trimmed = trim_trailing_separator(path);
    match trimmed.rfind(PATH_SEPARATOR) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Joins a parent collection path and a child name.
pub fn join_path(parent: &str, name: &str) -> String {
    let parent = trim_trailing_separator(parent);
    if parent == "/" || parent.is_empty() {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// The zone owning an absolute path is its first segment.
pub fn zone_from_path(path: &str) -> Option<&str> {
    path.strip_prefix(PATH_SEPARATOR)?
        .split(PATH_SEPARATOR)
        .next()
        .filter(|zone| !zone.is_empty())
}

/// Parses the catalog's timestamp representation: zero-padded seconds since
/// the Unix epoch, e.g. `01375192390`.
pub fn parse_catalog_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let secs = raw.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp(secs, 0)
}

fn trim_trailing_separator(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches(PATH_SEPARATOR)
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_and_leaf() {
        assert_eq!(parent_path("/tempZone/home/rods"), "/tempZone/home");
        assert_eq!(parent_path("/tempZone/home/rods/"), "/tempZone/home");
        assert_eq!(parent_path("/tempZone"), "/");
        assert_eq!(parent_path("/"), "/");
        assert_eq!(leaf_name("/tempZone/home/rods"), "rods");
        assert_eq!(leaf_name("/"), "");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/tempZone/home", "rods"), "/tempZone/home/rods");
        assert_eq!(join_path("/", "tempZone"), "/tempZone");
        assert_eq!(join_path("/tempZone/", "home"), "/tempZone/home");
    }

    #[test]
    fn test_zone_from_path() {
        assert_eq!(zone_from_path("/tempZone/home/rods"), Some("tempZone"));
        assert_eq!(zone_from_path("/otherZone"), Some("otherZone"));
        assert_eq!(zone_from_path("/"), None);
        assert_eq!(zone_from_path("relative/path"), None);
    }

    #[test]
    fn test_parse_catalog_timestamp() {
        let ts = parse_catalog_timestamp("01375192390").unwrap();
        assert_eq!(ts.timestamp(), 1_375_192_390);
        assert!(parse_catalog_timestamp("not-a-time").is_none());
    }
}
