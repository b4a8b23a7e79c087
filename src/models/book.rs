use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub total_pages: u32,
    #[serde(default)]
    pub current_page: u32,
}

impl Book {
    /// Fraction of the book read, in [0, 1]. Books without a page count report 0.
    pub fn progress(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        (self.current_page.min(self.total_pages) as f64) / self.total_pages as f64
    }

    pub fn is_finished(&self) -> bool {
        self.total_pages > 0 && self.current_page >= self.total_pages
    }
}
