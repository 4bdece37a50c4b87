use serde_json::Value;

use crate::fetch::{Fetcher, RequestOptions};

/// Fetch `url` and decode the JSON body, yielding `None` on any failure.
///
/// A non-2xx status, a transport error and an undecodable body are all
/// logged and treated the same way.
pub async fn safe_fetch(fetcher: &Fetcher, url: &str, options: &RequestOptions) -> Option<Value> {
    match fetcher.fetch_json(url, options).await {
        Ok(value) => Some(value),
        Err(failure) => {
            tracing::error!(kind = %failure.kind, url = %url, "Network Error: {}", failure.message);
            None
        }
    }
}
