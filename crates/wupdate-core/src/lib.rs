//! # wupdate-core
//!
//! Host collaborators for the wupdate update-scripting language.
//!
//! The script engine in `wupdate-script` never touches the operating system
//! directly. Every side effect goes through one of the traits defined here, so
//! the engine can be driven against the real machine or against in-memory
//! doubles in tests.
//!
//! ## Modules
//!
//! - [`fs`] - Directory and file creation ([`fs::FileSystem`])
//! - [`download`] - HTTP artifact downloads ([`download::Downloader`])
//! - [`console`] - Line-oriented standard input/output ([`console::Console`])
//! - [`launcher`] - Hand-off to an external updater binary
//! - [`config`] - Persistent settings in `~/.wupdate/config.json`
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use wupdate_core::config::UpdateConfig;
//! use wupdate_core::download::{Downloader, HttpDownloader};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = UpdateConfig::load();
//!     let downloader = HttpDownloader::new(&config).expect("client");
//!     let bytes = downloader
//!         .download("https://example.com/pkg.tar.gz", Path::new("/tmp/pkg.tar.gz"))
//!         .await
//!         .expect("download");
//!     println!("fetched {} bytes", bytes);
//! }
//! ```

pub mod config;
pub mod console;
pub mod download;
pub mod fs;
pub mod launcher;
