/// CSV export of the minute feed.
pub mod export;
