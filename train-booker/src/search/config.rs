//! Configuration for the search service.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cache::CacheConfig;
use crate::source::{LiveConfig, SyntheticConfig};

/// Which source answers queries that don't ask for mock data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// Everything is synthetic; no external data is used.
    #[default]
    Synthetic,
    /// The transit routing API, behind a cache.
    Live,
    /// A routing response recorded to disk.
    Fixture,
}

/// Error returned when parsing an unknown source name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown offer source {0:?} (expected synthetic, live or fixture)")]
pub struct UnknownSourceKind(String);

impl FromStr for SourceKind {
    type Err = UnknownSourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "synthetic" | "mock" => Ok(SourceKind::Synthetic),
            "live" => Ok(SourceKind::Live),
            "fixture" => Ok(SourceKind::Fixture),
            _ => Err(UnknownSourceKind(s.to_string())),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Synthetic => "synthetic",
            SourceKind::Live => "live",
            SourceKind::Fixture => "fixture",
        })
    }
}

/// Configuration parameters for train search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Source for queries that don't request mock data.
    pub source: SourceKind,

    /// Synthetic generation; also used for mock queries under any source.
    pub synthetic: SyntheticConfig,

    /// Routing API access, used when `source` is `Live`.
    pub live: LiveConfig,

    /// Cache in front of the routing API.
    pub cache: CacheConfig,

    /// Recorded response, used when `source` is `Fixture`.
    pub fixture_path: Option<PathBuf>,
}

impl SearchConfig {
    /// Synthetic-only configuration.
    pub fn synthetic(synthetic: SyntheticConfig) -> Self {
        Self {
            synthetic,
            ..Self::default()
        }
    }

    /// Configuration that queries the routing API.
    pub fn live(live: LiveConfig) -> Self {
        Self {
            source: SourceKind::Live,
            live,
            ..Self::default()
        }
    }

    /// Configuration that replays a recorded response.
    pub fn fixture(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SourceKind::Fixture,
            fixture_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Replace the synthetic settings.
    pub fn with_synthetic(mut self, synthetic: SyntheticConfig) -> Self {
        self.synthetic = synthetic;
        self
    }

    /// Replace the cache settings.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Synthetic,
            synthetic: SyntheticConfig::default(),
            live: LiveConfig::new(""),
            cache: CacheConfig::default(),
            fixture_path: None,
        }
    }
}
