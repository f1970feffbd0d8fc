use crate::models::Repository;
use std::collections::HashSet;

/// Repository ids picked for export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<u64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the id is selected afterwards
    pub fn toggle(&mut self, id: u64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn insert(&mut self, id: u64) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: u64) -> bool {
        self.ids.remove(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn select_all(&mut self, repos: &[Repository]) {
        self.ids.extend(repos.iter().map(|r| r.id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected records, in the order they appear in `repos`
    pub fn pick<'a>(&self, repos: &'a [Repository]) -> Vec<&'a Repository> {
        repos.iter().filter(|r| self.ids.contains(&r.id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::repo;

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        assert!(selection.toggle(4));
        assert!(selection.contains(4));
        assert!(!selection.toggle(4));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_pick_follows_result_order() {
        let repos = vec![repo(1, "a/a"), repo(2, "b/b"), repo(3, "c/c")];
        let mut selection = Selection::new();
        selection.insert(3);
        selection.insert(1);
        // ids that are not on the page are simply not picked
        selection.insert(99);

        let picked: Vec<_> = selection.pick(&repos).iter().map(|r| r.id).collect();
        assert_eq!(picked, vec![1, 3]);
    }

    #[test]
    fn test_select_all_and_clear() {
        let repos = vec![repo(1, "a/a"), repo(2, "b/b")];
        let mut selection = Selection::new();
        selection.select_all(&repos);
        assert_eq!(selection.len(), 2);

        selection.clear();
        assert!(selection.is_empty());
        assert!(selection.pick(&repos).is_empty());
    }
}
