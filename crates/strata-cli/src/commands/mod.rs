pub mod config;
pub mod curated;
pub mod dispatch;
pub mod schema;
pub mod score;
pub mod shared;
pub mod synthesize;
pub mod tier;
