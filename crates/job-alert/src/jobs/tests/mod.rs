mod common;
mod home_feeds;
mod validation;
