pub mod feed;
pub mod github;
pub mod health;
pub mod live_feed;
