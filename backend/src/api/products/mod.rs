//! Product listing endpoint.

mod load_products;
pub use load_products::load_products;

mod daily_products;
pub use daily_products::daily_products;
