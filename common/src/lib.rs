//! # Netdiag Common
//!
//! Shared models, errors and configuration used by every crate of the workspace.
//!
//! Nothing in here performs network I/O. The probing engines live in `netdiag-core`;
//! this crate only holds what both the engines and the terminal front-end need to agree on.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod network;
pub mod sink;
