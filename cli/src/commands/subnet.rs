use std::net::IpAddr;

use crate::mprint;
use crate::terminal::{format, print};
use netdiag_common::{
    config::Config,
    error::{DiagError, DiagResult},
    network::subnet::{self, SubnetBounds},
    sink::{DiagnosticSink, Severity, record_outcome},
};

pub fn subnet(
    address: &str,
    mask: Option<&str>,
    cfg: &Config,
    sink: &dyn DiagnosticSink,
) -> anyhow::Result<()> {
    let bounds: SubnetBounds = match parse(address, mask) {
        Ok(bounds) => bounds,
        Err(e) => {
            record_outcome(sink, Severity::Error, &format!("subnet {address}: {e}"));
            return Err(e.into());
        }
    };

    match cfg.quiet {
        2 => {
            mprint!(&bounds.network.to_string());
            mprint!(&bounds.broadcast.to_string());
        }
        _ => {
            print::header("subnet", cfg.quiet);
            let fields = print::Fields::new(&["Network", "Broadcast"]);
            fields.line("Network", format::ip_colored(&bounds.network));
            fields.line("Broadcast", format::ip_colored(&bounds.broadcast));
        }
    }

    record_outcome(
        sink,
        Severity::Info,
        &format!(
            "subnet {address}: network {} broadcast {}",
            bounds.network, bounds.broadcast
        ),
    );
    Ok(())
}

fn parse(address: &str, mask: Option<&str>) -> DiagResult<SubnetBounds> {
    match mask {
        None => subnet::parse_cidr(address),
        Some(mask) => {
            let addr: IpAddr = address
                .trim()
                .parse()
                .map_err(|e| DiagError::invalid(format!("invalid address '{address}': {e}")))?;
            let mask: IpAddr = subnet::parse_mask(&addr, mask.trim())?;
            subnet::compute_bounds(addr, mask)
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
