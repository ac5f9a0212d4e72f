use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type NewsId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: NewsId,
    pub title: String,
    #[serde(alias = "content")]
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
    pub published_at: DateTime<Utc>, // assigned on creation
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsInput {
    pub id: Option<NewsId>,
    pub title: String,
    #[serde(alias = "content")]
    pub body: String,
    pub image: Option<String>,
}
