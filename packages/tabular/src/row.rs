//! A single parsed record.

/// Mapping from header name to cell value, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Sets the value for `key`. An existing key keeps its position and
    /// takes the new value.
    pub fn insert(&mut self, key: String, value: String) {
        if let Some(cell) = self.cells.iter_mut().find(|(k, _)| *k == key) {
            cell.1 = value;
        } else {
            self.cells.push((key, value));
        }
    }

    /// Returns the value stored under exactly `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Resolves a value by candidate header spellings. See
    /// [`get_field`](crate::get_field).
    #[must_use]
    pub fn get(&self, candidates: &[&str]) -> Option<&str> {
        crate::get_field(self, candidates)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = Self::new();
        for (k, v) in iter {
            row.insert(k.into(), v.into());
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut row = Row::new();
        row.insert("a".into(), "1".into());
        row.insert("b".into(), "2".into());
        row.insert("a".into(), "3".into());
        assert_eq!(row.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn value_is_exact_match() {
        let row: Row = [("Country", "France")].into_iter().collect();
        assert_eq!(row.value("Country"), Some("France"));
        assert_eq!(row.value("country"), None);
    }
}
