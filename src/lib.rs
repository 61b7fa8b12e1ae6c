//! A small blocking Rust client for the National Park Service (NPS) data API.
//!
//! Every call builds a query string (always carrying `api_key` and `limit=100`),
//! issues one HTTP GET and returns the parsed JSON body as a [`serde_json::Value`].
//! No retries, caching or pagination are performed.
//!
//! ## Quick start
//! - Configure the key via the `NPS_API_KEY` environment variable or a `.npsrc`
//!   file (supported in the current directory and in your home directory),
//!   or pass it directly with [`Client::with_api_key`].
//! - Call one of the endpoint methods with a set of [`Filters`].
//!
//! ```no_run
//! use nps_client::{Client, Filters};
//!
//! fn main() -> nps_client::Result<()> {
//!     let client = Client::from_env()?;
//!     let parks = client.parks(&Filters::new().state_code("ME"))?;
//!     for park in parks["data"].as_array().into_iter().flatten() {
//!         println!("{}", park["fullName"]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! For full usage and configuration details, see the crate README.

#![forbid(unsafe_code)]

mod client;
mod config;
mod endpoint;
mod error;
mod query;
mod util;

pub use client::{Client, ClientConfig, DEFAULT_TIMEOUT, DEFAULT_URL};
pub use endpoint::{Endpoint, Filters};
pub use error::{Error, Result};
pub use query::{LIMIT, ParamValue, Params, params};
