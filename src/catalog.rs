//! Bundled sample library: books, readers and their choseos.

use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    models::{Book, Choseo, Reader},
    resources::SharedResource,
};

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

static CATALOG: LazyLock<SharedResource<Catalog>> =
    LazyLock::new(|| SharedResource::new("catalog"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub books: Vec<Book>,
    pub readers: Vec<Reader>,
    pub choseos: Vec<Choseo>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse catalog")
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn choseo(&self, id: &str) -> Option<&Choseo> {
        self.choseos.iter().find(|choseo| choseo.id == id)
    }

    pub fn choseos_for_book(&self, book_id: &str) -> Vec<&Choseo> {
        self.choseos
            .iter()
            .filter(|choseo| choseo.book_id == book_id)
            .collect()
    }
}

/// The shared bundled catalog, parsed on first use.
pub async fn catalog() -> Result<Arc<Catalog>> {
    CATALOG.get_or_load(|| async { Catalog::bundled() }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_parses() {
        let catalog = Catalog::bundled().unwrap();
        assert!(!catalog.books.is_empty());
        assert!(catalog
            .choseos
            .iter()
            .all(|choseo| catalog.book(&choseo.book_id).is_some()));
        assert!(catalog
            .choseos
            .iter()
            .all(|choseo| catalog.readers.contains(&choseo.reader)));
    }

    #[test]
    fn lookups() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.book("demian").unwrap().title, "데미안");
        assert!(catalog.book("missing").is_none());
        assert_eq!(catalog.choseos_for_book("demian").len(), 5);
        assert_eq!(catalog.choseo("choseo-2").unwrap().likes, 48);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = Catalog::from_json("{\"books\": 3}").unwrap_err();
        assert!(err.to_string().contains("Failed to parse catalog"));
    }

    #[tokio::test]
    async fn shared_catalog_is_loaded_once() {
        let first = catalog().await.unwrap();
        let second = catalog().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
