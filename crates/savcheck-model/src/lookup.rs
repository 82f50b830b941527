use std::collections::HashMap;

/// Case-normalized column name lookup.
///
/// Configured column names arrive in whatever casing the operator typed, so
/// every membership test against a table goes through this set. The first
/// spelling seen for a name wins for display purposes.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveSet {
    map: HashMap<String, String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            map.entry(name.to_ascii_uppercase())
                .or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    /// Return the stored spelling for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.to_ascii_uppercase())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::CaseInsensitiveSet;

    #[test]
    fn matches_any_casing() {
        let set = CaseInsensitiveSet::new(["Sbjnum", "ID", "status"]);
        assert!(set.contains("SBJNUM"));
        assert!(set.contains("id"));
        assert!(set.contains("Status"));
        assert!(!set.contains("NOME"));
        assert_eq!(set.get("STATUS"), Some("status"));
    }

    #[test]
    fn first_spelling_wins() {
        let set = CaseInsensitiveSet::new(["Id", "ID"]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("id"), Some("Id"));
    }
}
