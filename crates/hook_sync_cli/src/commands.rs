//! Command modules for the HookSync CLI.
//!
//! Each submodule handles one group of commands:
//!
//! - `apply_cmd`: Planning and applying a declared webhook
//! - `read_cmd`: Reading and importing existing webhooks
//! - `destroy_cmd`: Deleting every tracked webhook

pub mod apply_cmd;
pub mod destroy_cmd;
pub mod read_cmd;
