use serde::Deserialize;

use crate::error::Error;
use crate::metric::Metric;

/// Limits on a single search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Give up after this many cities have been expanded. `None` searches
    /// until the goal is found or the frontier runs dry.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    pub fn with_max_expansions(max_expansions: usize) -> Self {
        SearchConfig {
            max_expansions: Some(max_expansions),
        }
    }
}

/// A route request as sent from JavaScript.
#[derive(Clone, Debug, Deserialize)]
pub struct RouteParams {
    pub start_city: String,
    pub end_city: String,
    pub metric: String,
    pub max_expansions: Option<usize>,
}

impl RouteParams {
    pub fn metric(&self) -> Result<Metric, Error> {
        self.metric.parse()
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_expansions: self.max_expansions,
        }
    }
}
