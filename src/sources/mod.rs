// Post sources: Threads and Instagram fetchers, plus the demo generator.
//
// Each submodule produces normalized `Post` records behind the `PostSource`
// trait. `for_platform` picks the right one for the current configuration.

pub mod client;
pub mod demo;
pub mod instagram;
pub mod normalize;
pub mod threads;
pub mod traits;

use anyhow::Result;
use tracing::warn;

use crate::config::Config;
use crate::models::Platform;

use self::demo::DemoSource;
use self::instagram::InstagramSource;
use self::threads::ThreadsSource;
use self::traits::PostSource;

/// Build the source for one platform.
///
/// Demo data is used when `demo` is set, or when the credentials the
/// platform needs are missing.
pub fn for_platform(
    platform: Platform,
    config: &Config,
    demo: bool,
    seed: Option<u64>,
) -> Result<Box<dyn PostSource>> {
    if demo {
        return Ok(Box::new(DemoSource::new(platform, seed)));
    }

    match platform {
        Platform::Threads => {
            if let Err(e) = config.require_meta() {
                warn!(error = %e, "Threads credentials missing, using demo data");
                return Ok(Box::new(DemoSource::new(platform, seed)));
            }
            Ok(Box::new(ThreadsSource::new(
                &config.threads_api_url,
                &config.meta_access_token,
            )?))
        }
        Platform::Instagram => {
            if let Err(e) = config.require_instagram() {
                warn!(error = %e, "Instagram credentials missing, using demo data");
                return Ok(Box::new(DemoSource::new(platform, seed)));
            }
            Ok(Box::new(InstagramSource::new(
                &config.graph_api_url,
                &config.meta_access_token,
                &config.instagram_business_account_id,
            )?))
        }
    }
}
