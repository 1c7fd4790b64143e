use crate::model::Target;
use futures::StreamExt;
use reqwest::header::COOKIE;
use reqwest::Client;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, error, warn};

/// Sends POST requests to `target` until `end` and returns how many completed.
///
/// A request counts once its response body has been read to the end; the status
/// code is not inspected. Send and read failures are logged and the loop carries
/// on. A request that cannot be built stops this worker, returning what it has.
pub async fn worker(rank: usize, client: Client, target: Arc<Target>, end: Instant) -> u64 {
    let mut count = 0;

    while Instant::now() < end {
        let request = client
            .post(&target.url)
            .header(COOKIE, target.cookie.as_str())
            .body(target.body.clone())
            .build();

        let request = match request {
            Ok(req) => req,
            Err(e) => {
                error!(rank, "error creating request: {e}");
                return count;
            }
        };

        let response = match client.execute(request).await {
            Ok(res) => res,
            Err(e) => {
                warn!(rank, "error sending request: {e}");
                continue;
            }
        };

        let mut stream = response.bytes_stream();
        let mut drained = true;
        while let Some(chunk) = stream.next().await {
            if let Err(e) = chunk {
                warn!(rank, "error reading response body: {e}");
                drained = false;
                break;
            }
        }

        if drained {
            count += 1;
        }
    }

    debug!(rank, count, "worker finished");
    count
}
