use super::Location;

/// In-memory navigation history with browser-like push/replace/back/forward
/// semantics.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    /// Start a history whose only entry carries `search` (a leading `?` is
    /// accepted).
    #[must_use]
    pub fn new(search: &str) -> Self {
        Self {
            entries: vec![normalize(search)],
            index: 0,
        }
    }

    /// The current entry rendered as a relative URL (`?q=...`), or an empty
    /// string when the query string is empty.
    #[must_use]
    pub fn href(&self) -> String {
        let current = &self.entries[self.index];
        if current.is_empty() {
            String::new()
        } else {
            format!("?{current}")
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> bool {
        self.traverse(-1)
    }

    pub fn forward(&mut self) -> bool {
        self.traverse(1)
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl Location for MemoryHistory {
    fn search(&self) -> Option<String> {
        Some(self.entries[self.index].clone())
    }

    fn push(&mut self, search: String) {
        self.entries.truncate(self.index + 1);
        self.entries.push(normalize(&search));
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, search: String) {
        self.entries[self.index] = normalize(&search);
    }

    fn traverse(&mut self, delta: isize) -> bool {
        let Some(target) = self.index.checked_add_signed(delta) else {
            return false;
        };
        if target >= self.entries.len() || target == self.index {
            return false;
        }
        self.index = target;
        true
    }
}

fn normalize(search: &str) -> String {
    search.strip_prefix('?').unwrap_or(search).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_truncates_forward_entries() {
        let mut history = MemoryHistory::new("?q=a");
        history.push("q=b".into());
        history.push("q=c".into());
        assert!(history.back());
        assert!(history.back());
        assert_eq!(history.href(), "?q=a");

        history.push("q=d".into());
        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
        assert_eq!(history.href(), "?q=d");
    }

    #[test]
    fn replace_rewrites_current_entry_only() {
        let mut history = MemoryHistory::new("");
        history.push("q=a".into());
        history.replace("q=ab".into());
        assert_eq!(history.len(), 2);
        assert!(history.back());
        assert_eq!(history.search().as_deref(), Some(""));
        assert!(history.forward());
        assert_eq!(history.search().as_deref(), Some("q=ab"));
    }

    #[test]
    fn traversal_outside_bounds_is_ignored() {
        let mut history = MemoryHistory::default();
        assert!(!history.back());
        assert!(!history.forward());
        assert!(!history.traverse(0));
        assert_eq!(history.index(), 0);
        assert_eq!(history.href(), "");
    }
}
