use std::collections::HashSet;

use crate::catalog::WordRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
    Unknown,
}

/// Categories picked for the next round.
///
/// Kept in catalog order no matter which order they were clicked in, so
/// toggling any category off and on again gives back the same selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    names: Vec<String>,
}

impl CategorySelection {
    pub fn toggle(&mut self, repo: &WordRepository, name: &str) -> Toggled {
        if let Some(pos) = self.names.iter().position(|n| n == name) {
            self.names.remove(pos);
            return Toggled::Removed;
        }

        let Some(rank) = catalog_rank(repo, name) else {
            return Toggled::Unknown;
        };

        let insert_at = self
            .names
            .iter()
            .take_while(|n| catalog_rank(repo, n).is_some_and(|r| r < rank))
            .count();
        self.names.insert(insert_at, name.to_string());
        Toggled::Added
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Every word of the selected categories, in order, each word once.
    pub fn snapshot_pool(&self, repo: &WordRepository) -> Vec<String> {
        let mut seen = HashSet::new();
        self.names
            .iter()
            .filter_map(|name| repo.words(name))
            .flatten()
            .filter(|word| seen.insert(word.as_str()))
            .cloned()
            .collect()
    }
}

fn catalog_rank(repo: &WordRepository, name: &str) -> Option<usize> {
    repo.category_names().position(|n| n == name)
}
