//! # Request Parameters
//!
//! Ordered string mapping as received at the boundary. Reserved keys
//! drive projection, ordering and pagination; every other key is a filter.

/// Comma-separated projection
pub const COLUMNS_KEY: &str = "columns";

/// Maximum number of rows
pub const LIMIT_KEY: &str = "limit";

/// Number of rows to skip
pub const OFFSET_KEY: &str = "offset";

/// `column` or `column ASC|DESC`
pub const ORDER_BY_KEY: &str = "order_by";

/// Keys never treated as filters (matched exactly)
pub const RESERVED_KEYS: [&str; 4] = [COLUMNS_KEY, LIMIT_KEY, OFFSET_KEY, ORDER_BY_KEY];

/// Ordered key/value pairs.
///
/// A repeated key keeps its first position and takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    pairs: Vec<(String, String)>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn columns(&self) -> Option<&str> {
        self.non_empty(COLUMNS_KEY)
    }

    pub fn limit(&self) -> Option<&str> {
        self.non_empty(LIMIT_KEY)
    }

    pub fn offset(&self) -> Option<&str> {
        self.non_empty(OFFSET_KEY)
    }

    pub fn order_by(&self) -> Option<&str> {
        self.non_empty(ORDER_BY_KEY)
    }

    /// Non-reserved pairs, in request order
    pub fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(k, _)| !RESERVED_KEYS.contains(k))
    }

    // An empty reserved value is treated as absent.
    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RawParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl From<Vec<(String, String)>> for RawParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_key_last_value_wins_first_position_kept() {
        let params: RawParams = vec![
            ("status".to_string(), "a".to_string()),
            ("name".to_string(), "x".to_string()),
            ("status".to_string(), "b".to_string()),
        ]
        .into();

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("status", "b"), ("name", "x")]);
    }

    #[test]
    fn test_reserved_keys_are_not_filters() {
        let params = RawParams::new()
            .with("columns", "id")
            .with("limit", "5")
            .with("offset", "1")
            .with("order_by", "id")
            .with("status", "active");

        let filters: Vec<_> = params.filters().collect();
        assert_eq!(filters, vec![("status", "active")]);
    }

    #[test]
    fn test_reserved_match_is_exact() {
        let params = RawParams::new().with("LIMIT", "5");
        assert_eq!(params.limit(), None);
        assert_eq!(params.filters().count(), 1);
    }

    #[test]
    fn test_empty_reserved_value_is_absent() {
        let params = RawParams::new().with("limit", "").with("columns", "");
        assert_eq!(params.limit(), None);
        assert_eq!(params.columns(), None);
        assert_eq!(params.filters().count(), 0);
    }
}
