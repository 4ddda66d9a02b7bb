use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(200);
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1_000);
pub const DEFAULT_HOP_TIMEOUT: Duration = Duration::from_millis(3_000);
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_HOPS: u8 = 30;
pub const DEFAULT_MAX_CONCURRENCY: usize = 256;

pub const PUBLIC_IP_ENDPOINTS: &[&str] = &[
    "https://api.ipify.org",
    "https://checkip.amazonaws.com",
    "https://ifconfig.me/ip",
    "https://icanhazip.com",
];

pub const CONNECTIVITY_URL: &str = "https://www.google.com";

/// Settings shared by every subcommand.
///
/// Built once from the command line and handed down by reference,
/// never stored in a global.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hides the banner printed at startup.
    pub no_banner: bool,
    /// `0` prints everything, `1` drops headers and decoration, `2` prints bare results.
    pub quiet: u8,
    /// Raises the log filter to `debug`.
    pub verbose: bool,
    /// Default timeout for HTTP based diagnostics.
    pub http_timeout: Duration,
    /// Append every diagnostic outcome to this file.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            verbose: false,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            log_file: None,
        }
    }
}
