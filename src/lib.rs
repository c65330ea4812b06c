// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Rackforge CLI
//!
//! A command-line client for the Rackforge dedicated hosting API.
//!
//! ## Overview
//!
//! Rackforge exposes dedicated servers, SSH keys, SSL certificates, load
//! balancers and the provisioning catalog over a REST API; this crate maps
//! subcommands onto those endpoints:
//!
//! - List, inspect and power-manage dedicated servers
//! - Order new dedicated servers, including full drive, RAID-layout and
//!   partition configuration from repeatable flags or a JSON input file
//! - Manage account SSH keys and custom SSL certificates
//! - Browse locations, server models and compatible drive models
//!
//! ## Drive configuration
//!
//! The one non-trivial subsystem is the [`storage`] module: it turns flat,
//! repeatable `--drive-slot`, `--layout` and `--partition` flag values into
//! the nested drives structure of a create request, merging newly supplied
//! RAID layouts with layouts pre-seeded from `--input` and cross-referencing
//! partitions against the merged layout set before anything is sent.
//!
//! ## Modules
//!
//! - [`api`]: Rackforge API client and wire types
//! - [`storage`]: drive slot / layout / partition configuration builder
//! - [`config`]: profile settings and JSON input pre-seeding
//! - [`cli`]: command-line interface
//!
//! ## Example
//!
//! ```sh
//! rackforge host add \
//!     --server-model 119 --location 2 --hostname web-01 \
//!     --drive-slot 1=441 --drive-slot 2=441 \
//!     --layout slot=1,slot=2,raid=1 \
//!     --partition slot=1,slot=2,target=/boot,size=500,fs=ext4 \
//!     --partition slot=1,slot=2,target=/,fill=true,fs=ext4
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod storage;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::{ApiClient, DedicatedServerCreateInput, DriveSlot, HostLayout, LayoutPartition};
pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{read_input_json, Profile, Settings};
pub use error::{RackforgeError, Result, StorageError};
pub use storage::{
    apply_partitions, merge_layouts, parse_drive_slots, parse_layouts, parse_partitions,
    populate_storage, TokenPolicy,
};
