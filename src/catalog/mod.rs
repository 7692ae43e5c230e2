use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

static CATALOG_DIR: Dir = include_dir!("src/catalog");

/// Name of the catalog shipped inside the binary.
pub const BUNDLED_CATALOG: &str = "party";

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

#[derive(Deserialize)]
struct CatalogFile {
    name: String,
    categories: Vec<Category>,
}

/// Read-only mapping from category name to its ordered word list.
///
/// Categories keep the order they were declared in, which is also the order
/// they are listed on screen and concatenated into a round's pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordRepository {
    name: String,
    categories: Vec<Category>,
}

impl WordRepository {
    /// The word lists compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let file_name = format!("{BUNDLED_CATALOG}.json");
        let file = CATALOG_DIR
            .get_file(&file_name)
            .ok_or_else(|| Error::InvalidCatalog(format!("{file_name} is not bundled")))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| Error::InvalidCatalog(format!("{file_name} is not utf-8")))?;
        Self::from_json(contents)
    }

    /// A catalog file when one is given, the bundled lists otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::CatalogFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::build(file.name, file.categories)
    }

    /// Build a repository from in-memory lists, mostly for fixtures.
    pub fn from_categories<I, N, W>(name: &str, categories: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, Vec<W>)>,
        N: Into<String>,
        W: Into<String>,
    {
        let categories = categories
            .into_iter()
            .map(|(name, words)| Category {
                name: name.into(),
                words: words.into_iter().map(Into::into).collect(),
            })
            .collect();
        Self::build(name.to_string(), categories)
    }

    fn build(name: String, categories: Vec<Category>) -> Result<Self> {
        let mut names = HashSet::new();
        let mut cleaned = Vec::with_capacity(categories.len());

        for category in categories {
            let category_name = category.name.trim().to_string();
            if category_name.is_empty() {
                return Err(Error::InvalidCatalog("category with an empty name".into()));
            }
            if !names.insert(category_name.clone()) {
                return Err(Error::InvalidCatalog(format!(
                    "category {category_name} is declared twice"
                )));
            }

            let words = category
                .words
                .into_iter()
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect();

            cleaned.push(Category {
                name: category_name,
                words,
            });
        }

        Ok(Self {
            name,
            categories: cleaned,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category names in declaration order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.name == category)
    }

    pub fn words(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.words.as_slice())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
