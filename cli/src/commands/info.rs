use colored::*;

use crate::mprint;
use crate::terminal::{colors, format, network_fmt, print};
use netdiag_common::{
    config::Config,
    models::{AdapterInfo, InterfaceStats},
    sink::{DiagnosticSink, Severity, record_outcome},
};
use netdiag_core::adapters::{
    AdapterInventory, SystemInventory, local_ip_addresses, mac_addresses,
};

pub fn info(cfg: &Config, sink: &dyn DiagnosticSink) -> anyhow::Result<()> {
    let inventory = SystemInventory;
    let adapters: Vec<AdapterInfo> = inventory.list_adapters();
    let stats: Vec<InterfaceStats> = inventory.interface_statistics();

    if adapters.is_empty() {
        print::no_results("no network adapters found", cfg.quiet);
        record_outcome(sink, Severity::Warning, "info: no network adapters found");
        return Ok(());
    }

    print::header("network adapters", cfg.quiet);
    for (idx, adapter) in adapters.iter().enumerate() {
        match cfg.quiet {
            2 => print_bare(adapter),
            _ => {
                let adapter_stats = stats.iter().find(|s| s.name == adapter.name);
                network_fmt::print_adapter(adapter, adapter_stats, idx);
                if idx + 1 != adapters.len() {
                    mprint!();
                }
            }
        }
    }

    let macs = mac_addresses(&adapters);
    let ips = local_ip_addresses(&adapters);

    if cfg.quiet == 0 {
        print::header("summary", cfg.quiet);
        let fields = print::Fields::new(&["Adapters", "Addresses", "MACs"]);
        fields.line("Adapters", adapters.len());
        fields.line("Addresses", ips.len());
        fields.line(
            "MACs",
            macs.iter()
                .map(|mac| mac.to_string())
                .collect::<Vec<String>>()
                .join(", ")
                .color(colors::MAC_ADDR),
        );
    }

    record_outcome(
        sink,
        Severity::Info,
        &format!(
            "info: {} adapters, {} addresses, {} MAC addresses",
            adapters.len(),
            ips.len(),
            macs.len()
        ),
    );
    Ok(())
}

fn print_bare(adapter: &AdapterInfo) {
    let addrs: String = adapter
        .ips
        .iter()
        .map(|net| format!("{}", format::ip_colored(&net.ip())))
        .collect::<Vec<String>>()
        .join(" ");
    mprint!(&format!("{} {}", adapter.name, addrs));
}
