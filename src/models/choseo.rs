//! Choseo (초서) data models: a highlighted quote paired with the reader's reflection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reader {
    pub id: String,
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Choseo {
    pub id: String,
    pub book_id: String,
    pub reader: Reader,
    /// The highlighted passage. Only this text takes part in overlap scoring.
    pub quote: String,
    #[serde(default)]
    pub reflection: String,
    #[serde(default)]
    pub likes: u32,
    pub created_at: DateTime<Utc>,
}
