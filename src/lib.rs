// Trendwatch: trend scoring and organic-vs-paid detection for social posts
//
// This is the library root. The scoring engine lives in `scoring`; the
// other modules feed it posts and present what it finds.

pub mod config;
pub mod models;
pub mod output;
pub mod scoring;
pub mod sources;
pub mod status;
