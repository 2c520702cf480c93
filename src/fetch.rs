//! One-shot retrieval of the user directory.

use reqwest::Client;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::FetchError;
use crate::models::Record;

/// Build the HTTP client from configuration.
pub fn build_client(config: &Config) -> Result<Client, FetchError> {
    let client = Client::builder()
        .user_agent(&config.http.user_agent)
        .timeout(config.http_timeout())
        .build()?;
    Ok(client)
}

/// GET the endpoint and parse the body as a record array.
pub async fn fetch_records(client: &Client, endpoint: &str) -> Result<Vec<Record>, FetchError> {
    debug!("Requesting user directory from {}", endpoint);

    let body = client
        .get(endpoint)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let records = parse_records(&body)?;
    info!("Fetched {} records from {}", records.len(), endpoint);
    Ok(records)
}

/// Parse a response body into records.
pub fn parse_records(body: &str) -> Result<Vec<Record>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

/// Handle to the single in-flight fetch.
///
/// The response crosses back into the event loop through a channel, so the
/// loop keeps polling input while the request runs. Dropping the loader
/// aborts the task; a completion racing the drop is discarded with it.
pub struct Loader {
    handle: JoinHandle<()>,
    rx: mpsc::Receiver<Result<Vec<Record>, FetchError>>,
}

impl Loader {
    pub fn spawn(client: Client, endpoint: String) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let result = fetch_records(&client, &endpoint).await;
            // The receiver may already be gone on teardown.
            let _ = tx.send(result).await;
        });
        Self { handle, rx }
    }

    /// Non-blocking check for the response; `None` while still in flight.
    pub fn poll(&mut self) -> Option<Result<Vec<Record>, FetchError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(FetchError::Interrupted)),
        }
    }

    /// Await the response. Used by the non-interactive path.
    pub async fn join(mut self) -> Result<Vec<Record>, FetchError> {
        self.rx.recv().await.unwrap_or(Err(FetchError::Interrupted))
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
