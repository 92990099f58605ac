//! Recommendation Fetcher: one GET against the course recommendation endpoint.
//!
//! The fetcher reports failures as [`FetchError`] after logging them; it never
//! retries and never panics. Turning a failure into an empty list is the
//! panel's decision (see `logic::update`).

use log::{debug, error};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

use super::state::CourseRecommendation;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const RECOMMENDATION_PATH: &str = "/pathway/getCourseRecommendation";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error! Status: {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// `encodeURIComponent`'s reserved set: everything but ASCII alphanumerics and
/// `- _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query component the way browsers' `encodeURIComponent`
/// does: unreserved ASCII passes through, every other UTF-8 byte becomes `%XX`.
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

pub fn recommendation_url(base_url: &str, dept_id: u8, job_title: &str) -> String {
    format!(
        "{}{}?deptId={}&jobTitle={}",
        base_url.trim_end_matches('/'),
        RECOMMENDATION_PATH,
        dept_id,
        encode_uri_component(job_title)
    )
}

pub struct RecommendationFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl RecommendationFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch recommendations for a department and career goal.
    ///
    /// No timeout and no retry: the call resolves when the endpoint answers
    /// or the transport gives up.
    pub async fn fetch(
        &self,
        dept_id: u8,
        job_title: &str,
    ) -> Result<Vec<CourseRecommendation>, FetchError> {
        let url = recommendation_url(&self.base_url, dept_id, job_title);
        debug!("GET {}", url);

        let result = self.get_courses(&url).await;
        match &result {
            Ok(courses) => debug!("received {} course recommendation(s)", courses.len()),
            Err(err) => error!("Error fetching course recommendations: {}", err),
        }
        result
    }

    async fn get_courses(&self, url: &str) -> Result<Vec<CourseRecommendation>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.json::<Vec<CourseRecommendation>>().await?)
    }
}
