use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::thread;
use std::time::Duration;

use super::{parse_holidays, HolidayError, HolidaySource};
use crate::models::holiday::HolidaySet;
use crate::models::settings::Settings;

const MAX_RESPONSE_BYTES: u64 = 1024 * 1024;
const RETRY_DELAY: Duration = Duration::from_millis(400);

/// Fetches the holiday map over HTTP with a blocking client.
pub struct HolidayFetcher {
    client: Client,
    url: String,
    max_response_bytes: u64,
    max_retries: usize,
    retry_delay: Duration,
}

impl HolidayFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, HolidayError> {
        let url = url.into();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(HolidayError::InvalidUrl(url));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url,
            max_response_bytes: MAX_RESPONSE_BYTES,
            max_retries: 2,
            retry_delay: RETRY_DELAY,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, HolidayError> {
        Ok(Self::new(
            settings.holidays_url.trim(),
            Duration::from_secs(settings.http_timeout_secs),
        )?
        .with_retries(settings.fetch_retries))
    }

    pub fn with_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn fetch(&self) -> Result<HolidaySet, HolidayError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once() {
                Ok(holidays) => {
                    log::info!("Fetched {} holidays from {}", holidays.len(), self.url);
                    return Ok(holidays);
                }
                // The same payload comes back on retry.
                Err(err @ (HolidayError::Decode(_) | HolidayError::TooLarge { .. })) => {
                    return Err(err)
                }
                Err(err) if attempt < self.max_retries => {
                    log::warn!(
                        "Holiday fetch attempt {} failed for {}: {}",
                        attempt + 1,
                        self.url,
                        err
                    );
                    attempt += 1;
                    thread::sleep(self.retry_delay);
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn fetch_once(&self) -> Result<HolidaySet, HolidayError> {
        let response = self.client.get(&self.url).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(HolidayError::Status(status.as_u16()));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_response_bytes {
                return Err(HolidayError::TooLarge {
                    size: content_length,
                    limit: self.max_response_bytes,
                });
            }
        }

        let bytes = response.bytes()?;
        if bytes.len() as u64 > self.max_response_bytes {
            return Err(HolidayError::TooLarge {
                size: bytes.len() as u64,
                limit: self.max_response_bytes,
            });
        }

        let body = std::str::from_utf8(&bytes)
            .map_err(|e| HolidayError::Decode(format!("response is not valid UTF-8: {}", e)))?;

        parse_holidays(body)
    }
}

impl HolidaySource for HolidayFetcher {
    fn fetch_holidays(&self) -> Result<HolidaySet, HolidayError> {
        self.fetch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_url() {
        let result = HolidayFetcher::new("file:///tmp/date.json", Duration::from_secs(1));
        assert!(matches!(result, Err(HolidayError::InvalidUrl(_))));
    }

    #[test]
    fn test_from_settings_uses_configured_url() {
        let settings = Settings {
            holidays_url: " https://example.com/date.json ".to_string(),
            fetch_retries: 0,
            ..Default::default()
        };
        let fetcher = HolidayFetcher::from_settings(&settings).unwrap();
        assert_eq!(fetcher.url(), "https://example.com/date.json");
        assert_eq!(fetcher.max_retries, 0);
        assert_eq!(fetcher.retry_delay, RETRY_DELAY);
    }

    #[test]
    fn test_retry_delay_keeps_sub_millisecond_precision() {
        let fetcher = HolidayFetcher::new("https://example.com/date.json", Duration::from_secs(1))
            .unwrap()
            .with_retry_delay(Duration::from_micros(1500));
        assert_eq!(fetcher.retry_delay, Duration::from_micros(1500));

        let fetcher = fetcher.with_retry_delay(Duration::from_nanos(999));
        assert_eq!(fetcher.retry_delay, Duration::from_nanos(999));
    }
}
