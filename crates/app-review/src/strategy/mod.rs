//! Store URL strategies.

mod url_strategy;

pub use url_strategy::{
    app_store_url, play_store_market_url, play_store_web_url, write_review_location, UrlStrategy,
};
