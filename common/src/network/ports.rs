//! # Port Range Model
//!
//! Parses and represents the inclusive TCP port ranges accepted by the scanner:
//! * A single port (e.g., `443`).
//! * A range (e.g., `1-1024`).

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{DiagError, DiagResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> DiagResult<Self> {
        if start > end {
            return Err(DiagError::invalid(format!(
                "port range start {start} is greater than end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    /// Always false, a range holds at least one port.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self { start: 1, end: 1024 }
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start == self.end {
            true => write!(f, "{}", self.start),
            false => write!(f, "{}-{}", self.start, self.end),
        }
    }
}

impl FromStr for PortRange {
    type Err = DiagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((start_str, end_str)) = s.split_once('-') else {
            let port = parse_port(s)?;
            return PortRange::new(port, port);
        };

        let start = parse_port(start_str)?;
        let end = parse_port(end_str)?;
        PortRange::new(start, end)
    }
}

fn parse_port(s: &str) -> DiagResult<u16> {
    s.trim()
        .parse::<u16>()
        .map_err(|e| DiagError::invalid(format!("invalid port '{s}': {e}")))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
