//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. Every option can also be supplied through an environment
//! variable, which is how the service is usually configured when deployed.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use clap::{Args, Parser, ValueEnum};

use super::constants::*;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the User-Agent and upstream proxy are chosen for each request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RotationMode {
    /// Process-wide atomic counter, advanced once per request
    RoundRobin,
    /// Independent random draw per request
    Random,
}

/// Body format returned by a relay service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayFormat {
    /// The relay answers with the page itself
    Raw,
    /// The relay answers with a JSON object holding the page in the named field
    Json(String),
}

/// A third-party relay endpoint.
///
/// Written on the command line as `format|template`, e.g.
/// `raw|https://api.allorigins.win/raw?url={url}` or
/// `json:contents|https://api.allorigins.win/get?url={url}`.
/// A bare template without a `|` is treated as `raw`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelaySpec {
    pub format: RelayFormat,
    pub template: String,
}

impl FromStr for RelaySpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (format, template) = match s.split_once('|') {
            Some((format, template)) => (format.trim(), template.trim()),
            None => ("raw", s.trim()),
        };

        let format = match format {
            "raw" => RelayFormat::Raw,
            other => match other.strip_prefix("json:") {
                Some(field) if !field.is_empty() => RelayFormat::Json(field.to_string()),
                _ => return Err(format!("unknown relay format '{other}'")),
            },
        };

        if !template.contains(RELAY_URL_PLACEHOLDER) {
            return Err(format!(
                "relay template '{template}' must contain {RELAY_URL_PLACEHOLDER}"
            ));
        }
        url::Url::parse(&template.replace(RELAY_URL_PLACEHOLDER, "x"))
            .map_err(|e| format!("relay template '{template}' is not a valid URL: {e}"))?;

        Ok(Self {
            format,
            template: template.to_string(),
        })
    }
}

impl fmt::Display for RelaySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.format {
            RelayFormat::Raw => write!(f, "raw|{}", self.template),
            RelayFormat::Json(field) => write!(f, "json:{field}|{}", self.template),
        }
    }
}

/// Size caps applied by the extractor.
///
/// Every collection and every text blob in an extracted document is bounded
/// by one of these values.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct ExtractionLimits {
    /// Maximum characters of cleaned body text
    #[arg(long, env = "SCRAPE_MAX_TEXT_CHARS", default_value_t = MAX_TEXT_CHARS)]
    pub max_text_chars: usize,

    /// Maximum characters of sanitized HTML
    #[arg(long, env = "SCRAPE_MAX_HTML_CHARS", default_value_t = MAX_HTML_CHARS)]
    pub max_html_chars: usize,

    /// Maximum number of links
    #[arg(long, env = "SCRAPE_MAX_LINKS", default_value_t = MAX_LINKS)]
    pub max_links: usize,

    /// Maximum characters of a link's text
    #[arg(long, default_value_t = MAX_LINK_TEXT_CHARS)]
    pub max_link_text_chars: usize,

    /// Maximum number of images
    #[arg(long, env = "SCRAPE_MAX_IMAGES", default_value_t = MAX_IMAGES)]
    pub max_images: usize,

    /// Maximum number of headings
    #[arg(long, default_value_t = MAX_HEADINGS)]
    pub max_headings: usize,

    /// Maximum number of paragraphs
    #[arg(long, default_value_t = MAX_PARAGRAPHS)]
    pub max_paragraphs: usize,

    /// Paragraphs at or below this many characters are dropped
    #[arg(long, default_value_t = MIN_PARAGRAPH_CHARS)]
    pub min_paragraph_chars: usize,

    /// Maximum number of lists
    #[arg(long, default_value_t = MAX_LISTS)]
    pub max_lists: usize,

    /// Maximum number of items kept per list
    #[arg(long, default_value_t = MAX_LIST_ITEMS)]
    pub max_list_items: usize,

    /// Maximum number of tables
    #[arg(long, default_value_t = MAX_TABLES)]
    pub max_tables: usize,

    /// Maximum number of rows kept per table
    #[arg(long, default_value_t = MAX_TABLE_ROWS)]
    pub max_table_rows: usize,

    /// Maximum number of cells kept per table row
    #[arg(long, default_value_t = MAX_TABLE_CELLS)]
    pub max_table_cells: usize,

    /// Maximum characters of a single extracted text item (heading, paragraph, cell, ...)
    #[arg(long, default_value_t = MAX_ITEM_TEXT_CHARS)]
    pub max_item_text_chars: usize,

    /// Maximum number of meta keywords
    #[arg(long, default_value_t = MAX_KEYWORDS)]
    pub max_keywords: usize,

    /// Maximum number of metadata entries
    #[arg(long, default_value_t = MAX_METADATA_ENTRIES)]
    pub max_metadata_entries: usize,

    /// Maximum characters of a metadata value
    #[arg(long, default_value_t = MAX_METADATA_VALUE_CHARS)]
    pub max_metadata_value_chars: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_text_chars: MAX_TEXT_CHARS,
            max_html_chars: MAX_HTML_CHARS,
            max_links: MAX_LINKS,
            max_link_text_chars: MAX_LINK_TEXT_CHARS,
            max_images: MAX_IMAGES,
            max_headings: MAX_HEADINGS,
            max_paragraphs: MAX_PARAGRAPHS,
            min_paragraph_chars: MIN_PARAGRAPH_CHARS,
            max_lists: MAX_LISTS,
            max_list_items: MAX_LIST_ITEMS,
            max_tables: MAX_TABLES,
            max_table_rows: MAX_TABLE_ROWS,
            max_table_cells: MAX_TABLE_CELLS,
            max_item_text_chars: MAX_ITEM_TEXT_CHARS,
            max_keywords: MAX_KEYWORDS,
            max_metadata_entries: MAX_METADATA_ENTRIES,
            max_metadata_value_chars: MAX_METADATA_VALUE_CHARS,
        }
    }
}

fn default_user_agents() -> Vec<String> {
    DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
}

/// Service configuration.
///
/// Parsed from the command line (and environment) by the binary, or
/// constructed programmatically by library users.
///
/// # Examples
///
/// ```no_run
/// use page_scrape::Config;
///
/// let config = Config {
///     expose_technical_errors: true,
///     attempt_delay_ms: 0,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "page_scrape", version, about)]
pub struct Config {
    /// Address the HTTP endpoint listens on
    #[arg(long, env = "SCRAPE_BIND", default_value = DEFAULT_BIND_ADDR)]
    pub bind: SocketAddr,

    /// Log level
    #[arg(long, value_enum, env = "SCRAPE_LOG_LEVEL", default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, env = "SCRAPE_LOG_FORMAT", default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Direct fetch timeout in seconds
    #[arg(long, default_value_t = DIRECT_TIMEOUT_SECS)]
    pub direct_timeout_secs: u64,

    /// Upstream proxy fetch timeout in seconds
    #[arg(long, default_value_t = PROXY_TIMEOUT_SECS)]
    pub proxy_timeout_secs: u64,

    /// Relay fetch timeout in seconds
    #[arg(long, default_value_t = RELAY_TIMEOUT_SECS)]
    pub relay_timeout_secs: u64,

    /// Minimal-header fallback timeout in seconds
    #[arg(long, default_value_t = SIMPLE_TIMEOUT_SECS)]
    pub simple_timeout_secs: u64,

    /// Deadline for the whole strategy chain in seconds
    #[arg(long, env = "SCRAPE_OVERALL_TIMEOUT_SECS", default_value_t = OVERALL_TIMEOUT_SECS)]
    pub overall_timeout_secs: u64,

    /// Pause between strategy attempts in milliseconds
    #[arg(long, default_value_t = ATTEMPT_DELAY_MS)]
    pub attempt_delay_ms: u64,

    /// Relay endpoints, tried in order (format|template)
    #[arg(long = "relay", env = "SCRAPE_RELAYS", value_delimiter = ',', default_value = DEFAULT_RELAY)]
    pub relays: Vec<RelaySpec>,

    /// Upstream forward proxies (e.g. http://10.0.0.1:3128), rotated per request
    #[arg(long = "proxy", env = "SCRAPE_PROXIES", value_delimiter = ',')]
    pub proxies: Vec<String>,

    /// Browser User-Agent strings, rotated per request
    #[arg(long = "user-agent", default_values_t = default_user_agents())]
    pub user_agents: Vec<String>,

    /// How User-Agent and proxy are picked per request
    #[arg(long, value_enum, default_value_t = RotationMode::RoundRobin)]
    pub rotation: RotationMode,

    /// Include technical error detail in failure responses
    #[arg(long, env = "SCRAPE_EXPOSE_ERRORS")]
    pub expose_technical_errors: bool,

    #[command(flatten)]
    pub limits: ExtractionLimits,
}

impl Config {
    pub fn direct_timeout(&self) -> Duration {
        Duration::from_secs(self.direct_timeout_secs)
    }

    pub fn proxy_timeout(&self) -> Duration {
        Duration::from_secs(self.proxy_timeout_secs)
    }

    pub fn relay_timeout(&self) -> Duration {
        Duration::from_secs(self.relay_timeout_secs)
    }

    pub fn simple_timeout(&self) -> Duration {
        Duration::from_secs(self.simple_timeout_secs)
    }

    pub fn overall_timeout(&self) -> Duration {
        Duration::from_secs(self.overall_timeout_secs)
    }

    pub fn attempt_delay(&self) -> Duration {
        Duration::from_millis(self.attempt_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            direct_timeout_secs: DIRECT_TIMEOUT_SECS,
            proxy_timeout_secs: PROXY_TIMEOUT_SECS,
            relay_timeout_secs: RELAY_TIMEOUT_SECS,
            simple_timeout_secs: SIMPLE_TIMEOUT_SECS,
            overall_timeout_secs: OVERALL_TIMEOUT_SECS,
            attempt_delay_ms: ATTEMPT_DELAY_MS,
            relays: DEFAULT_RELAY.parse().map(|relay| vec![relay]).unwrap_or_default(),
            proxies: Vec::new(),
            user_agents: default_user_agents(),
            rotation: RotationMode::RoundRobin,
            expose_technical_errors: false,
            limits: ExtractionLimits::default(),
        }
    }
}
