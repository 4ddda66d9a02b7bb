mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, Commands, dns, info, internet, ping, scan, subnet, trace};
use netdiag_common::{config::Config, sink::DiagnosticSink};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg: Config = commands.to_config();

    logging::init_logging(cfg.verbose);
    print::banner(cfg.no_banner, cfg.quiet);

    let sink: Box<dyn DiagnosticSink> = commands::open_sink(&cfg)?;
    let sink: &dyn DiagnosticSink = sink.as_ref();

    match commands.command {
        Commands::Info => info::info(&cfg, sink),
        Commands::Ping {
            host,
            count,
            timeout,
        } => ping::ping(&host, count, Duration::from_millis(timeout), &cfg, sink).await,
        Commands::Trace {
            host,
            max_hops,
            timeout,
        } => trace::trace(&host, max_hops, Duration::from_millis(timeout), &cfg, sink).await,
        Commands::Scan {
            host,
            ports,
            concurrency,
            timeout,
        } => {
            let connect_timeout = Duration::from_millis(timeout);
            scan::scan(&host, ports, concurrency, connect_timeout, &cfg, sink).await
        }
        Commands::Dns { target, timeout } => {
            dns::dns(&target, Duration::from_millis(timeout), &cfg, sink).await
        }
        Commands::Subnet { address, mask } => subnet::subnet(&address, mask.as_deref(), &cfg, sink),
        Commands::PublicIp { endpoints } => internet::public_ip(&endpoints, &cfg, sink).await,
        Commands::Connectivity { url } => internet::connectivity(&url, &cfg, sink).await,
    }
}
