use serde::{Deserialize, Serialize};

const LINE_ITEM_SEGMENT: &str = "/LineItem/";
const CALCULATED_LINE_ITEM_SEGMENT: &str = "/CalculatedLineItem/";

/// Opaque platform-assigned global identifier, e.g. `gid://shopify/Order/42`.
///
/// The value is never validated; the platform is the authority on what a
/// well-formed id looks like. Only the namespace segment is ever inspected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gid(String);

impl Gid {
    /// Wraps a raw identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is blank.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns the resource type segment (`Order`, `LineItem`, ...), if any.
    pub fn resource_type(&self) -> Option<&str> {
        let mut segments = self.0.rsplit('/');
        segments.next()?;
        segments.next().filter(|s| !s.is_empty())
    }

    /// Returns the trailing segment of the identifier.
    pub fn tail(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Rewrites a line item id into the calculated (edit session) namespace.
    pub fn to_calculated_line_item(&self) -> Gid {
        Gid(calculated_line_item_id(&self.0))
    }
}

impl std::fmt::Display for Gid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Gid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Gid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Gid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Translates a committed-order line item id into the calculated line item
/// namespace used inside an edit session.
///
/// Ids already in the calculated namespace, and ids in any other namespace,
/// are returned unchanged, so the transform is idempotent.
pub fn calculated_line_item_id(id: &str) -> String {
    if id.contains(CALCULATED_LINE_ITEM_SEGMENT) {
        return id.to_string();
    }
    if id.contains(LINE_ITEM_SEGMENT) {
        return id.replacen(LINE_ITEM_SEGMENT, CALCULATED_LINE_ITEM_SEGMENT, 1);
    }
    id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_item_id_is_rewritten_into_calculated_namespace() {
        assert_eq!(
            calculated_line_item_id("gid://X/LineItem/5"),
            "gid://X/CalculatedLineItem/5"
        );
    }

    #[test]
    fn calculated_line_item_id_passes_through() {
        assert_eq!(
            calculated_line_item_id("gid://shopify/CalculatedLineItem/77"),
            "gid://shopify/CalculatedLineItem/77"
        );
    }

    #[test]
    fn rewrite_is_idempotent() {
        let once = calculated_line_item_id("gid://shopify/LineItem/9");
        let twice = calculated_line_item_id(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn foreign_namespace_passes_through() {
        assert_eq!(
            calculated_line_item_id("gid://shopify/ProductVariant/3"),
            "gid://shopify/ProductVariant/3"
        );
        assert_eq!(calculated_line_item_id("12345"), "12345");
    }

    #[test]
    fn gid_rewrite_matches_free_function() {
        let gid = Gid::new("gid://shopify/LineItem/12");
        assert_eq!(
            gid.to_calculated_line_item().as_str(),
            "gid://shopify/CalculatedLineItem/12"
        );
    }

    #[test]
    fn resource_type_and_tail() {
        let gid = Gid::new("gid://shopify/Order/1001");
        assert_eq!(gid.resource_type(), Some("Order"));
        assert_eq!(gid.tail(), "1001");

        let bare = Gid::new("1001");
        assert_eq!(bare.resource_type(), None);
        assert_eq!(bare.tail(), "1001");
    }

    #[test]
    fn blank_ids() {
        assert!(Gid::new("").is_blank());
        assert!(Gid::new("   ").is_blank());
        assert!(!Gid::new("gid://shopify/Order/1").is_blank());
    }

    #[test]
    fn gid_serializes_as_plain_string() {
        let gid = Gid::new("gid://shopify/Order/1");
        let json = serde_json::to_string(&gid).unwrap();
        assert_eq!(json, "\"gid://shopify/Order/1\"");
        let back: Gid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, gid);
    }
}
