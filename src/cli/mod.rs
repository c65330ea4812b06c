//! CLI module for the Rackforge tool.
//!
//! This module provides the command-line interface for managing
//! Rackforge resources.

mod commands;
mod output;

pub use commands::{
    Cli, Commands, ConfigCommands, HostAddArgs, HostCommands, LoadBalancerCommands,
    LocationCommands, OutputFormat, PageArgs, SshKeyCommands, SslCommands,
};
pub use output::{validate_field_mask, Listable, OutputFormatter};
