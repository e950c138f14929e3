//! Live RSS feed assembled from GitHub directory listings.

pub mod channel;
pub mod naming;

pub use channel::{build_channel, build_feed_items, write_rss, FeedItem, WriteRssError};
pub use naming::{meeting_title, ordinal_suffix, parse_meeting_date};
