//! # mirror-kit
//!
//! Helpers to set up a GitHub to GitLab repository mirror
//!
//! ## Usage
//!
//! ```txt
//! Usage: mirror-kit [OPTIONS] [COMMAND]
//!
//! Commands:
//!   mirror-url  Print the SSH remote of a Gitlab project URL as MIRROR_URL
//!   ssh-key     Copy the deploy private key to the clipboard with OSC 52
//!   workflow    Print the GitHub Actions workflow mirroring the repository
//!   help        Print this message or the help of the given subcommand(s)
//!
//! Options:
//!   -c, --config <CONFIG>  Custom configuration file path
//!       --show-config-path Show the current config path
//!       --host <HOST>      Gitlab host (default: gitlab.com)
//!   -v, --verbose...       Verbose mode (-v, -vv)
//!   -h, --help             Print help
//!   -V, --version          Print version
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![deny(
    missing_docs,
    clippy::all,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![warn(clippy::multiple_crate_versions)]

pub(crate) mod cli;
pub mod clipboard;
pub(crate) mod config;
pub mod errors;
pub mod gitlab;
pub mod key;
pub mod osc52;
pub mod workflow;

pub use cli::{run, MirrorKitCli, MirrorKitCommand};
pub use config::{ConfigData, MirrorKitConfig};
pub use errors::{MirrorKitError, MirrorKitErrorKind};
pub use gitlab::{extract_project_path, to_ssh_url, ProjectPath};
pub use osc52::{emit_clipboard, encode_osc52};
