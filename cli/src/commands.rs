pub mod dns;
pub mod info;
pub mod internet;
pub mod ping;
pub mod scan;
pub mod subnet;
pub mod trace;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use netdiag_common::{
    config::{self, Config},
    network::ports::PortRange,
    sink::{DiagnosticSink, FileSink, TracingSink},
};

#[derive(Parser)]
#[command(name = "netdiag")]
#[command(version, about = "Everyday network diagnostics from the terminal.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output; repeat for bare results only
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append every diagnostic outcome to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show adapters, addresses and traffic counters of this device
    #[command(alias = "i")]
    Info,
    /// Check whether a host answers ICMP echo requests
    #[command(alias = "p")]
    Ping {
        host: String,
        /// Number of probes to send
        #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
        /// Per-probe timeout in milliseconds
        #[arg(short, long, default_value_t = millis(config::DEFAULT_PROBE_TIMEOUT), value_parser = clap::value_parser!(u64).range(1..))]
        timeout: u64,
    },
    /// Trace the route to a host
    #[command(alias = "t")]
    Trace {
        host: String,
        /// Stop after this many hops
        #[arg(short = 'm', long, default_value_t = config::DEFAULT_MAX_HOPS)]
        max_hops: u8,
        /// Per-hop timeout in milliseconds
        #[arg(short, long, default_value_t = millis(config::DEFAULT_HOP_TIMEOUT), value_parser = clap::value_parser!(u64).range(1..))]
        timeout: u64,
    },
    /// Find open TCP ports on a host
    #[command(alias = "s")]
    Scan {
        host: String,
        /// Port or inclusive range, e.g. 22 or 1-1024
        #[arg(short, long, default_value_t = PortRange::default())]
        ports: PortRange,
        /// Maximum number of connection attempts in flight
        #[arg(short, long, default_value_t = config::DEFAULT_MAX_CONCURRENCY, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        concurrency: usize,
        /// Connect timeout in milliseconds
        #[arg(short, long, default_value_t = millis(config::DEFAULT_CONNECT_TIMEOUT), value_parser = clap::value_parser!(u64).range(1..))]
        timeout: u64,
    },
    /// Forward or reverse DNS lookup
    #[command(alias = "d")]
    Dns {
        /// Host name, or an IP address for a reverse lookup
        target: String,
        /// Lookup timeout in milliseconds
        #[arg(short, long, default_value_t = 5_000, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: u64,
    },
    /// Network and broadcast address of a subnet
    Subnet {
        /// Address, optionally with /prefix
        address: String,
        /// Dotted mask or prefix length, when not given with the address
        mask: Option<String>,
    },
    /// Discover this device's public IP address
    PublicIp {
        /// Echo service to query; repeat to set the fallback order
        #[arg(short, long = "endpoint", value_name = "URL")]
        endpoints: Vec<String>,
    },
    /// Check whether the internet is reachable over HTTP
    Connectivity {
        #[arg(short, long, default_value = config::CONNECTIVITY_URL)]
        url: String,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            no_banner: self.no_banner,
            quiet: self.quiet.min(2),
            verbose: self.verbose,
            log_file: self.log_file.clone(),
            ..Config::default()
        }
    }
}

/// The sink every command records its outcome to.
pub fn open_sink(cfg: &Config) -> anyhow::Result<Box<dyn DiagnosticSink>> {
    match &cfg.log_file {
        Some(path) => {
            let sink = FileSink::open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            Ok(Box::new(sink))
        }
        None => Ok(Box::new(TracingSink)),
    }
}

fn millis(duration: std::time::Duration) -> u64 {
    duration.as_millis() as u64
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
