use std::time::Duration;

use tracing::debug;

use crate::dataset::RawCountry;
use crate::error::FetchError;

/// Upstream country listing.
///
/// Implementations must bound their own blocking time; the cache treats a
/// timeout like any other fetch failure.
pub trait CountrySource: Send + Sync {
    fn fetch(&self) -> Result<Vec<RawCountry>, FetchError>;
}

/// Blocking HTTP source over `ureq`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    agent: ureq::Agent,
    url: String,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout(timeout)
            .user_agent(concat!("atlasquiz/", env!("CARGO_PKG_VERSION")))
            .build();
        HttpSource { agent, url: url.to_string() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CountrySource for HttpSource {
    fn fetch(&self) -> Result<Vec<RawCountry>, FetchError> {
        debug!(url = %self.url, "fetching country listing");
        let response = self.agent.get(&self.url).set("Accept", "application/json").call().map_err(fetch_error_from_ureq)?;

        let listing: Vec<RawCountry> = response.into_json().map_err(|e| FetchError::Malformed(e.to_string()))?;
        if listing.is_empty() {
            return Err(FetchError::Malformed("empty country listing".to_string()));
        }
        Ok(listing)
    }
}

fn fetch_error_from_ureq(err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::Status(status, _) => FetchError::Status(status),
        ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
    }
}

/// A source that is never reachable. Used for offline play, where only the
/// fallback store can supply data.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

impl CountrySource for OfflineSource {
    fn fetch(&self) -> Result<Vec<RawCountry>, FetchError> {
        Err(FetchError::Transport("offline mode".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_source_always_fails() {
        assert!(matches!(OfflineSource.fetch(), Err(FetchError::Transport(_))));
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        // Nothing listens on the local discard port.
        let source = HttpSource::new("http://127.0.0.1:9/all", Duration::from_millis(200));
        assert!(matches!(source.fetch(), Err(FetchError::Transport(_))));
        assert_eq!(source.url(), "http://127.0.0.1:9/all");
    }

    #[test]
    fn silent_server_times_out_as_transport_error() {
        use std::net::TcpListener;
        use std::time::Instant;

        // Accepts the connection, then never answers.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/all", listener.local_addr().unwrap());
        let server = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            std::thread::sleep(Duration::from_secs(2));
            drop(stream);
        });

        let started = Instant::now();
        let result = HttpSource::new(&url, Duration::from_millis(300)).fetch();
        let elapsed = started.elapsed();

        assert!(matches!(result, Err(FetchError::Transport(_))), "got {result:?}");
        assert!(elapsed < Duration::from_secs(1), "fetch took {elapsed:?}");
        server.join().unwrap();
    }
}
