//! Name helpers: case-insensitive strings and annotation simple names.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// A string compared, hashed and ordered without regard to ASCII case.
///
/// The original spelling is preserved for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uncased(String);

impl Uncased {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl PartialEq for Uncased {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Uncased {}

impl Hash for Uncased {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl PartialOrd for Uncased {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uncased {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.0.bytes().map(|b| b.to_ascii_lowercase());
        let b = other.0.bytes().map(|b| b.to_ascii_lowercase());
        a.cmp(b)
    }
}

impl fmt::Display for Uncased {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uncased {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Uncased {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Last path segment of an annotation identity (`units::Unit` -> `Unit`).
pub fn simple_name(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Compares two identifiers ignoring case and underscores, so the member
/// `max_speed` matches the enum constant `MaxSpeed`.
pub(crate) fn loosely_eq(a: &str, b: &str) -> bool {
    let a = a.chars().filter(|c| *c != '_');
    let b = b.chars().filter(|c| *c != '_');
    a.map(|c| c.to_ascii_lowercase())
        .eq(b.map(|c| c.to_ascii_lowercase()))
}

/// Whether `candidate` names the has-flag companion of `member`.
///
/// Case and underscores are ignored, so `has_mileage`, `hasMileage` and
/// `HASMILEAGE` all match the member `mileage`.
pub(crate) fn is_flag_for(candidate: &str, member: &str) -> bool {
    let mut candidate = candidate.chars().filter(|c| *c != '_');
    let expected = "has".chars().chain(member.chars().filter(|c| *c != '_'));

    for e in expected {
        match candidate.next() {
            Some(c) if c.eq_ignore_ascii_case(&e) => {}
            _ => return false,
        }
    }

    candidate.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncased_equality_and_order() {
        assert_eq!(Uncased::from("Color"), Uncased::from("COLOR"));
        assert!(Uncased::from("alpha") < Uncased::from("Beta"));
        assert_eq!(Uncased::from("MiXeD").to_string(), "MiXeD");
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("units::Unit"), "Unit");
        assert_eq!(simple_name("Unit"), "Unit");
    }

    #[test]
    fn test_flag_names() {
        assert!(is_flag_for("has_mileage", "mileage"));
        assert!(is_flag_for("hasMileage", "mileage"));
        assert!(is_flag_for("HAS_OWNER_NAME", "owner_name"));
        assert!(!is_flag_for("has_mileage_km", "mileage"));
        assert!(!is_flag_for("mileage", "mileage"));
    }

    #[test]
    fn test_loose_equality() {
        assert!(loosely_eq("max_speed", "MaxSpeed"));
        assert!(loosely_eq("pts", "PTS"));
        assert!(!loosely_eq("speed", "MaxSpeed"));
    }
}
