//! Fixed parish table and region-name normalization.

/// A fixed reference coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// The fourteen parishes of Jamaica, keyed by normalized name
const PARISHES: [(&str, Coordinates); 14] = [
    ("kingston", Coordinates::new(17.9714, -76.7931)),
    ("st_andrew", Coordinates::new(18.0179, -76.8099)),
    ("st_thomas", Coordinates::new(17.9811, -76.3625)),
    ("portland", Coordinates::new(18.1080, -76.4598)),
    ("st_mary", Coordinates::new(18.3686, -76.9568)),
    ("st_ann", Coordinates::new(18.4386, -77.2006)),
    ("trelawny", Coordinates::new(18.3532, -77.6114)),
    ("st_james", Coordinates::new(18.4762, -77.9189)),
    ("hanover", Coordinates::new(18.4107, -78.1336)),
    ("westmoreland", Coordinates::new(18.2515, -78.1360)),
    ("st_elizabeth", Coordinates::new(17.9979, -77.7505)),
    ("manchester", Coordinates::new(18.0407, -77.5082)),
    ("clarendon", Coordinates::new(17.9590, -77.2386)),
    ("st_catherine", Coordinates::new(18.0027, -77.0000)),
];

/// Normalize a region name for lookup and comparison
///
/// Lowercases, drops periods, and joins whitespace-separated words with `_`,
/// so "St. James", "st james" and "ST_JAMES" all become "st_james".
pub fn normalize_region(name: &str) -> String {
    name.to_lowercase()
        .replace('.', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Look up the reference coordinate of a region
///
/// Returns `None` for names outside the parish table; callers treat that as
/// "distance unknown".
pub fn resolve_region(name: &str) -> Option<Coordinates> {
    let key = normalize_region(name);
    PARISHES
        .iter()
        .find(|(parish, _)| *parish == key)
        .map(|(_, coords)| *coords)
}

/// All known regions in table order
pub fn regions() -> impl Iterator<Item = (&'static str, Coordinates)> {
    PARISHES.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_region() {
        assert_eq!(normalize_region("Kingston"), "kingston");
        assert_eq!(normalize_region("St Andrew"), "st_andrew");
        assert_eq!(normalize_region("  St.   James "), "st_james");
        assert_eq!(normalize_region("st_elizabeth"), "st_elizabeth");
        assert_eq!(normalize_region(""), "");
    }

    #[test]
    fn test_resolve_known_region() {
        let coords = resolve_region("KINGSTON").unwrap();
        assert_eq!(coords, Coordinates::new(17.9714, -76.7931));

        assert!(resolve_region("St. Catherine").is_some());
    }

    // Periods are dropped on purpose: "St. James" must resolve to its parish
    // instead of falling through to the unknown-region distance of 0.
    #[test]
    fn test_abbreviated_saint_resolves() {
        assert_eq!(resolve_region("St. James"), resolve_region("St James"));
        assert!(resolve_region("St. James").is_some());
        assert_ne!(resolve_region("St. James"), resolve_region("Kingston"));
    }

    #[test]
    fn test_resolve_unknown_region() {
        assert!(resolve_region("Atlantis").is_none());
        assert!(resolve_region("").is_none());
    }

    #[test]
    fn test_region_table_is_complete() {
        assert_eq!(regions().count(), 14);
        assert!(regions().all(|(name, _)| resolve_region(name).is_some()));
    }
}
