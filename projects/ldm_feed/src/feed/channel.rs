use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use interfaces_github_contents::index::ContentEntry;
use rss::{validation::Validate, Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use thiserror::Error;

use super::naming::{meeting_title, parse_meeting_date};
use crate::config::FeedConfiguration;

pub const CHANNEL_TITLE: &str = "C# LDMs";
pub const CHANNEL_DESCRIPTION: &str = "Notes from the C# Language Design Meetings";
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

const GENERATOR: &str = concat!("ldm-feed ", env!("CARGO_PKG_VERSION"));
const INDENT_SIZE: usize = 2;

/// One meeting-notes file as a syndication entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    /// Source file name, used as a non-permalink guid.
    pub id: String,
    pub link: Option<String>,
    pub published: NaiveDate,
}

impl FeedItem {
    /// `None` when the entry name is not a dated meeting file.
    pub fn from_entry(entry: &ContentEntry) -> Option<Self> {
        let published = parse_meeting_date(&entry.name)?;
        Some(Self {
            title: meeting_title(published),
            id: entry.name.clone(),
            link: entry.html_url.clone(),
            published,
        })
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published.and_time(NaiveTime::MIN).and_utc()
    }

    fn into_rss_item(self) -> Item {
        let pub_date = self.published_at().to_rfc2822();
        ItemBuilder::default()
            .title(Some(self.title))
            .link(self.link)
            .guid(GuidBuilder::default().value(self.id).permalink(false).build())
            .pub_date(Some(pub_date))
            .build()
    }
}

/// Matching entries, newest first, at most `count` of them.
///
/// The sort is stable: entries sharing a date keep their listing order.
pub fn build_feed_items<'a, I>(entries: I, count: usize) -> Vec<FeedItem>
where
    I: IntoIterator<Item = &'a ContentEntry>,
{
    let mut items: Vec<FeedItem> = entries.into_iter().filter_map(FeedItem::from_entry).collect();
    items.sort_by(|a, b| b.published.cmp(&a.published));
    items.truncate(count);
    items
}

pub fn build_channel(items: Vec<FeedItem>, config: &FeedConfiguration, built_at: DateTime<Utc>) -> Channel {
    ChannelBuilder::default()
        .title(CHANNEL_TITLE)
        .link(config.home_page.as_str())
        .description(CHANNEL_DESCRIPTION)
        .generator(GENERATOR.to_string())
        .last_build_date(built_at.to_rfc2822())
        .items(items.into_iter().map(FeedItem::into_rss_item).collect::<Vec<_>>())
        .build()
}

#[derive(Debug, Error)]
pub enum WriteRssError {
    #[error("ValidateChannel: {source}")]
    ValidateChannel {
        source: rss::validation::ValidationError,
    },

    #[error("WriteChannel: {source}")]
    WriteChannel {
        source: rss::Error,
    },
}

/// Validates `channel` and renders it as indented UTF-8 RSS 2.0.
pub fn write_rss(channel: &Channel) -> Result<Vec<u8>, WriteRssError> {
    channel
        .validate()
        .map_err(|source| WriteRssError::ValidateChannel { source })?;

    channel
        .pretty_write_to(Vec::new(), b' ', INDENT_SIZE)
        .map_err(|source| WriteRssError::WriteChannel { source })
}
