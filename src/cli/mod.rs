// Copyright 2026 SmartLog Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI module for the `smartlog` binary.
//!
//! SmartLog has no runtime control surface; the CLI only inspects the
//! configuration a process would start with.
//!
//! ## Usage
//!
//! ```bash
//! smartlog config show [--json]   # Effective configuration
//! smartlog config defaults        # Built-in defaults
//! smartlog config validate        # Exit 1 on suspicious settings
//! ```

pub mod config_cmd;

pub use config_cmd::{run_defaults, run_show, run_validate};
