/// A flat, ordered key/value row destined for the result sink.
///
/// Column order is significant: the first appended row fixes the CSV header,
/// and every later row must match it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow {
    columns: Vec<(String, String)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Duplicate column names are a caller bug and panic in
    /// debug builds.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        debug_assert!(
            !self.columns.iter().any(|(k, _)| *k == key),
            "duplicate result column: {key}"
        );
        self.columns.push((key, value.into()));
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn values(&self) -> Vec<&str> {
        self.columns.iter().map(|(_, v)| v.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_preserves_insertion_order() {
        let mut row = ResultRow::new();
        row.push("user_id", "abc");
        row.push("q1", "4");
        row.push("q2", "1");
        assert_eq!(row.headers(), vec!["user_id", "q1", "q2"]);
        assert_eq!(row.values(), vec!["abc", "4", "1"]);
        assert_eq!(row.get("q2"), Some("1"));
    }
}
