use std::cmp::Ordering;
use std::sync::Arc;

use crate::application::ports::Clock;
use crate::domain::{
    Faq, Page, PageRequest, Product, RoundupArticle, RoundupProduct, SearchParams, Seo,
    SortOrder,
};

pub const DEFAULT_SEARCH_PAGE_SIZE: usize = 12;
const ROUNDUP_SIZE: usize = 6;

/// Read-only product catalog behind search, product pages and roundups.
pub struct CatalogService {
    products: Vec<Product>,
    categories: Vec<String>,
    clock: Arc<dyn Clock>,
}

impl CatalogService {
    pub fn new(products: Vec<Product>, categories: Vec<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            products,
            categories,
            clock,
        }
    }

    pub fn featured(&self, limit: usize) -> Vec<Product> {
        let mut items = self.products.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit);
        items
    }

    pub fn search(&self, params: &SearchParams) -> Page<Product> {
        let needle = params.q.as_deref().unwrap_or("").to_lowercase();

        let mut items: Vec<Product> = self
            .products
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.brand
                        .as_deref()
                        .is_some_and(|b| b.to_lowercase().contains(&needle))
            })
            .filter(|p| {
                params
                    .category
                    .as_deref()
                    .map_or(true, |c| p.category.as_deref() == Some(c))
            })
            .filter(|p| params.min_rating.map_or(true, |min| p.rating >= min))
            .filter(|p| params.price_min.map_or(true, |min| p.price.unwrap_or(0.0) >= min))
            .filter(|p| params.price_max.map_or(true, |max| p.price.unwrap_or(0.0) <= max))
            .cloned()
            .collect();

        sort_products(&mut items, params.sort.unwrap_or_default());

        PageRequest::new(params.page, params.size, DEFAULT_SEARCH_PAGE_SIZE).slice(&items)
    }

    pub fn by_slug(&self, slug: &str) -> Option<Product> {
        self.products.iter().find(|p| p.slug == slug).cloned()
    }

    pub fn categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    pub fn roundup(&self, slug: &str) -> RoundupArticle {
        RoundupArticle {
            slug: slug.to_string(),
            title: "Best Sample Gadgets (2025)".to_string(),
            intro_md: "Looking for the **best gadgets** right now? We tested dozens and picked \
                       the top options for most people. Below you’ll find our short list, \
                       mini-reviews, and a buying guide."
                .to_string(),
            products: self.top_rated(ROUNDUP_SIZE),
            buying_guide_md: "### How to choose\n\
                              - **Budget:** Set a realistic budget.\n\
                              - **Priorities:** Battery, display, features.\n\
                              - **Warranty:** Prefer 2 years where possible."
                .to_string(),
            faqs: vec![
                Faq {
                    q: "How did you test?".to_string(),
                    a_md: "We run battery, build, and daily-use tests for at least one week \
                           per device."
                        .to_string(),
                },
                Faq {
                    q: "How often is this list updated?".to_string(),
                    a_md: "Monthly or when a standout model launches.".to_string(),
                },
            ],
            conclusion_md: "If you want the safest bet, choose our **Best Overall** pick. Tight \
                            budget? The **Best Value** pick delivers most of the experience for \
                            less."
                .to_string(),
            updated_at: self.clock.now(),
            seo: Some(Seo {
                meta_title: Some("Best Sample Gadgets (2025) • ReviewHub".to_string()),
                meta_description: Some(
                    "Top picks, mini-reviews, buying guide, and FAQs.".to_string(),
                ),
            }),
            category: Some("Roundups".to_string()),
        }
    }

    fn top_rated(&self, n: usize) -> Vec<RoundupProduct> {
        let mut ranked = self.products.clone();
        sort_products(&mut ranked, SortOrder::RatingDesc);

        ranked
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(i, product)| {
                let blurb = match i {
                    0 => "Best overall balance of features and value.",
                    1 => "Great performance at a mid-range price.",
                    _ => "Solid pick for most buyers.",
                };
                RoundupProduct {
                    product,
                    rank: i as u32 + 1,
                    blurb: Some(blurb.to_string()),
                    verdict: Some("A dependable choice with strong fundamentals.".to_string()),
                }
            })
            .collect()
    }
}

// Stable sort keeps catalog order among equal keys.
fn sort_products(items: &mut [Product], order: SortOrder) {
    let price = |p: &Product| p.price.unwrap_or(0.0);
    match order {
        SortOrder::Relevance => {
            items.sort_by(|a, b| b.votes.unwrap_or(0).cmp(&a.votes.unwrap_or(0)))
        }
        SortOrder::RatingDesc => items.sort_by(|a, b| cmp_f64(b.rating, a.rating)),
        SortOrder::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::PriceAsc => items.sort_by(|a, b| cmp_f64(price(a), price(b))),
        SortOrder::PriceDesc => items.sort_by(|a, b| cmp_f64(price(b), price(a))),
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
