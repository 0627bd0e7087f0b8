use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Product, Seo};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub q: String,
    pub a_md: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundupProduct {
    #[serde(flatten)]
    pub product: Product,
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
}

/// A "best of" article served under `/best/{slug}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundupArticle {
    pub slug: String,
    pub title: String,
    pub intro_md: String,
    pub products: Vec<RoundupProduct>,
    pub buying_guide_md: String,
    pub faqs: Vec<Faq>,
    pub conclusion_md: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
