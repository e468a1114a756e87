#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Progress reporting to an external leaderboard service.
//!
//! Wave milestones are pushed over HTTP as fire-and-forget notifications:
//! each report is sent from a detached thread, failures are logged and
//! swallowed, and the simulation never blocks on or learns about the
//! outcome. Deployments without a service configured use the [`NullSink`].

use std::thread;
use std::time::Duration;

use lane_defence_core::Wave;
use reqwest::blocking::Client;
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, warn};

/// Timeout applied to each report request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Errors raised while constructing a progress sink.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The configured base URL could not be parsed.
    #[error("invalid progress endpoint `{endpoint}`")]
    InvalidEndpoint {
        /// The rejected URL text.
        endpoint: String,
        /// Parser diagnostics.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build progress client")]
    Client(#[from] reqwest::Error),
}

/// Destination for wave milestone reports.
pub trait ProgressSink {
    /// Records that `username` reached `wave`. Must never block the caller
    /// on network completion.
    fn report_wave(&self, username: &str, wave: Wave);
}

/// Sink used when no progress service is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report_wave(&self, _username: &str, _wave: Wave) {}
}

/// Sink that posts milestones to the leaderboard HTTP service.
#[derive(Clone, Debug)]
pub struct HttpSink {
    base: Url,
    client: Client,
}

impl HttpSink {
    /// Creates a sink posting to the service rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ProgressError> {
        let base = Url::parse(base_url).map_err(|source| ProgressError::InvalidEndpoint {
            endpoint: base_url.to_owned(),
            source,
        })?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { base, client })
    }
}

impl ProgressSink for HttpSink {
    fn report_wave(&self, username: &str, wave: Wave) {
        let path = format!(
            "api/gameProgress/updateProgress/{username}/{wave}",
            wave = wave.get()
        );
        let url = match self.base.join(&path) {
            Ok(url) => url,
            Err(error) => {
                warn!(%error, username, wave = wave.get(), "skipping malformed progress url");
                return;
            }
        };
        let request = self.client.post(url).json(&serde_json::json!({
            "username": username,
            "wave": wave.get(),
        }));
        let spawned = thread::Builder::new()
            .name("progress-report".into())
            .spawn(move || match request.send() {
                Ok(response) if response.status().is_success() => {
                    debug!(status = %response.status(), "progress report accepted");
                }
                Ok(response) => {
                    warn!(status = %response.status(), "progress report rejected");
                }
                Err(error) => {
                    warn!(%error, "progress report failed");
                }
            });
        if let Err(error) = spawned {
            warn!(%error, "could not spawn progress report thread");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sink_accepts_reports_silently() {
        NullSink.report_wave("guest", Wave::new(3));
    }

    #[test]
    fn malformed_base_urls_are_rejected_at_construction() {
        let error = HttpSink::new("not a url").unwrap_err();
        assert!(matches!(error, ProgressError::InvalidEndpoint { .. }));
    }

    #[test]
    fn well_formed_base_urls_construct_a_sink() {
        assert!(HttpSink::new("http://localhost:4000/").is_ok());
    }
}
