//! End-to-end tests against the real network stack.
//!
//! Everything here runs on loopback unless marked `#[ignore]`; ignored tests
//! need raw-socket privileges or internet access.

mod diagnostics;
mod scanner;
