use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::{Product, ProductReview, Seo};

pub const FIXTURE_PRODUCT_COUNT: usize = 36;

const CATEGORIES: [&str; 4] = ["Phones", "Laptops", "Audio", "Wearables"];
const BRANDS: [&str; 4] = ["Acme", "Globex", "Soylent", "Initech"];
const COLORS: [&str; 3] = ["Black", "Silver", "Blue"];

pub fn fixture_categories() -> Vec<String> {
    CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Deterministic sample catalog. Product `n` was published `n - 1` hours
/// before `published`.
pub fn fixture_products(published: DateTime<Utc>) -> Vec<Product> {
    (0..FIXTURE_PRODUCT_COUNT)
        .map(|i| fixture_product(i, published))
        .collect()
}

fn fixture_product(i: usize, published: DateTime<Utc>) -> Product {
    let n = i + 1;
    let slug = format!("sample-product-{}", n);
    let rating = (3.0 + ((i * 7) % 21) as f64 / 10.0).min(5.0);
    let created_at = published - Duration::hours(i as i64);

    let mut specs = BTreeMap::new();
    specs.insert("Weight".to_string(), json!(format!("{} g", 150 + i)));
    specs.insert("Color".to_string(), json!(COLORS[i % COLORS.len()]));
    specs.insert("Warranty".to_string(), json!("2 years"));

    Product {
        id: n.to_string(),
        title: format!("Sample Product {}", n),
        brand: Some(BRANDS[i % BRANDS.len()].to_string()),
        price: Some(19.0 + ((i % 10) * 5) as f64),
        currency: Some("€".to_string()),
        image: format!("https://picsum.photos/seed/{}/600/400", slug),
        rating: (rating * 10.0).round() / 10.0,
        votes: Some(50 + ((i * 13) % 200) as u32),
        highlight: Some("Excellent battery life and solid build quality.".to_string()),
        badges: (i % 7 == 0).then(|| vec!["Best Value".to_string()]),
        specs: Some(specs),
        review: Some(ProductReview {
            summary: "A balanced pick for most buyers.".to_string(),
            pros: vec!["Battery life".into(), "Display".into(), "Price".into()],
            cons: vec![
                "Average camera in low light".into(),
                "Limited color options".into(),
            ],
            body_md: "## Verdict\nA dependable choice with strong fundamentals. If you value \
                      battery and display over camera, this is for you.\n\n### Performance\n\
                      Snappy for daily tasks, casual gaming is fine."
                .to_string(),
            author: Some("Editorial Team".to_string()),
            updated_at: Some(created_at),
        }),
        seo: Some(Seo {
            meta_title: Some(format!("Review: Sample Product {}", n)),
            meta_description: Some(
                "Read our hands-on review with pros/cons and verdict.".to_string(),
            ),
        }),
        created_at,
        category: Some(CATEGORIES[i % CATEGORIES.len()].to_string()),
        slug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_stay_within_three_and_five() {
        let products = fixture_products(Utc::now());
        assert_eq!(products.len(), FIXTURE_PRODUCT_COUNT);
        assert!(products.iter().all(|p| (3.0..=5.0).contains(&p.rating)));
    }

    #[test]
    fn slugs_are_unique() {
        let products = fixture_products(Utc::now());
        let mut slugs: Vec<&str> = products.iter().map(|p| p.slug.as_str()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), FIXTURE_PRODUCT_COUNT);
    }
}
