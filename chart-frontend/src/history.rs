use thiserror::Error;
use ts_core::{decode_history, Candle, DecodeError};

#[cfg(target_arch = "wasm32")]
use app_shell::ShellConfig;
#[cfg(target_arch = "wasm32")]
use gloo_net::http::Request;
#[cfg(target_arch = "wasm32")]
use ts_core::Interval;
#[cfg(target_arch = "wasm32")]
use web_sys::RequestCache;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("http error: {0}")]
    Http(#[from] gloo_net::Error),
    #[error("history endpoint returned HTTP {0}")]
    Status(u16),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Turn a finished response into candles. Non-2xx statuses fail before the
/// body is looked at.
pub fn read_history(status: u16, body: &str) -> Result<Vec<Candle>, HistoryError> {
    if !(200..300).contains(&status) {
        return Err(HistoryError::Status(status));
    }
    Ok(decode_history(body)?)
}

/// Fetch the full history of the configured pair for one interval. Always
/// bypasses the HTTP cache.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_history(
    config: &ShellConfig,
    interval: Interval,
) -> Result<Vec<Candle>, HistoryError> {
    let url = config.history_url(interval);
    log::debug!("history: GET {url}");
    let resp = Request::get(&url)
        .cache(RequestCache::NoStore)
        .send()
        .await?;
    let status = resp.status();
    let body = resp.text().await?;
    read_history(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_2xx_is_status_error() {
        let err = read_history(503, "[]").unwrap_err();
        assert!(matches!(err, HistoryError::Status(503)));
        assert_eq!(err.to_string(), "history endpoint returned HTTP 503");
    }

    #[test]
    fn ok_body_decodes() {
        let candles =
            read_history(200, r#"[{"time":"120500","open":"1","high":"2","low":"0.5","close":"1"}]"#)
                .unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].time, 120);
    }

    #[test]
    fn malformed_body_is_decode_error() {
        assert!(matches!(
            read_history(200, "<html>"),
            Err(HistoryError::Decode(_))
        ));
    }
}
