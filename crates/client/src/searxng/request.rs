//! SearXNG search request types and validation.

use serde::{Deserialize, Serialize};

use crate::searxng::SearxngError;

/// Time range filter accepted by SearXNG.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Month,
    Year,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }
}

impl std::str::FromStr for TimeRange {
    type Err = SearxngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(TimeRange::Day),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            other => Err(SearxngError::InvalidTimeRange(other.to_string())),
        }
    }
}

/// Safe search filtering levels, sent as `0`, `1`, `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafeSearch {
    #[default]
    Off,
    Moderate,
    Strict,
}

impl SafeSearch {
    pub fn as_param(&self) -> &'static str {
        match self {
            SafeSearch::Off => "0",
            SafeSearch::Moderate => "1",
            SafeSearch::Strict => "2",
        }
    }
}

impl std::str::FromStr for SafeSearch {
    type Err = SearxngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(SafeSearch::Off),
            "1" => Ok(SafeSearch::Moderate),
            "2" => Ok(SafeSearch::Strict),
            other => Err(SearxngError::InvalidSafeSearch(other.to_string())),
        }
    }
}

/// Search request parameters for the SearXNG `/search` endpoint.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Search query (required).
    pub query: String,

    /// Result page, starting at 1 (default 1).
    pub pageno: Option<u32>,

    /// Restrict results to the past day, month, or year.
    pub time_range: Option<TimeRange>,

    /// Language code such as "en"; "all" or unset means no filter.
    pub language: Option<String>,

    /// Safe search level (default off).
    pub safesearch: Option<SafeSearch>,
}

impl SearchRequest {
    /// Validate the search request parameters.
    pub fn validate(&self) -> Result<(), SearxngError> {
        if self.query.trim().is_empty() {
            return Err(SearxngError::InvalidQuery("query cannot be empty".to_string()));
        }

        if self.pageno == Some(0) {
            return Err(SearxngError::InvalidPage);
        }

        Ok(())
    }

    /// Get the effective page number (default 1).
    pub fn get_pageno(&self) -> u32 {
        self.pageno.unwrap_or(1)
    }

    /// Get the effective safesearch setting (default Off).
    pub fn get_safesearch(&self) -> SafeSearch {
        self.safesearch.unwrap_or_default()
    }

    /// Query string pairs in the order SearXNG documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("q", self.query.clone()),
            ("format", "json".to_string()),
            ("pageno", self.get_pageno().to_string()),
        ];

        if let Some(time_range) = self.time_range {
            pairs.push(("time_range", time_range.as_str().to_string()));
        }

        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty() && *l != "all") {
            pairs.push(("language", language.to_string()));
        }

        pairs.push(("safesearch", self.get_safesearch().as_param().to_string()));

        pairs
    }
}
