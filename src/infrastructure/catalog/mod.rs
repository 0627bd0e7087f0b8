mod fixtures;

pub use fixtures::{FIXTURE_PRODUCT_COUNT, fixture_categories, fixture_products};
