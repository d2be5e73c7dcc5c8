//! Tour page download

use std::thread;
use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::{Configuration, Deadline};
use crate::error::{AttemptError, FetchError};

/// A single GET attempt
pub trait Transport {
    /// Fetch `url` and return the body as text
    fn get(&self, url: &str, timeout: Duration) -> Result<String, AttemptError>;
}

/// Blocking HTTP transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<String, AttemptError> {
        let request = self
            .client
            .get(url)
            .timeout(timeout)
            .build()
            .map_err(AttemptError::Request)?;

        let response = self.client.execute(request).map_err(AttemptError::Send)?;

        if response.status() != StatusCode::OK {
            return Err(AttemptError::Status(response.status().as_u16()));
        }

        response.text().map_err(AttemptError::Body)
    }
}

/// Page downloader with a fixed retry policy
pub struct Fetcher<T>
where
    T: Transport,
{
    transport: T,
    timeout: Duration,
    attempts: u32,
    retry_interval: Duration,
}

impl<T> Fetcher<T>
where
    T: Transport,
{
    pub fn new(transport: T, config: &Configuration) -> Self {
        Self {
            transport,
            timeout: config.http_timeout(),
            attempts: config.attempts(),
            retry_interval: config.retry_interval(),
        }
    }

    /// Download the page, sleeping between failed attempts
    pub fn fetch(&self, url: &str, deadline: &Deadline) -> Result<String, FetchError> {
        self.fetch_with_pause(url, deadline, thread::sleep)
    }

    /// Same as [`Fetcher::fetch`], with the pause between attempts provided by the caller
    pub fn fetch_with_pause<P>(
        &self,
        url: &str,
        deadline: &Deadline,
        mut pause: P,
    ) -> Result<String, FetchError>
    where
        P: FnMut(Duration),
    {
        let mut last: Option<AttemptError> = None;

        for attempt in 0..self.attempts {
            if attempt > 0 {
                info!("Retry attempt {}/{}", attempt + 1, self.attempts);

                match deadline.clamp(self.retry_interval) {
                    Some(wait) => pause(wait),
                    None => return Err(FetchError::DeadlineExceeded { attempts: attempt, last }),
                }
            }

            let timeout = match deadline.clamp(self.timeout) {
                Some(t) => t,
                None => return Err(FetchError::DeadlineExceeded { attempts: attempt, last }),
            };

            match self.transport.get(url, timeout) {
                Ok(body) => {
                    debug!("Downloaded {} bytes from {}", body.len(), url);
                    return Ok(body);
                }
                Err(e) => {
                    debug!("Attempt {} on {} failed: {}", attempt + 1, url, e);
                    last = Some(e);
                }
            }
        }

        match last {
            Some(last) => Err(FetchError::Exhausted {
                attempts: self.attempts,
                last,
            }),
            None => Err(FetchError::DeadlineExceeded {
                attempts: self.attempts,
                last: None,
            }),
        }
    }
}
