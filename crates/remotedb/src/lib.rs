//! Remote HTTP authorization module for RADIUS
//!
//! This crate implements a RADIUS authorization module that looks up users
//! in a remote HTTP database. For each request carrying a User-Name, the
//! module issues one bounded `GET {base}/authenticate?login={user}&mac={mac}`
//! against the configured service, expects a JSON object with `password` and
//! `vlan` string fields, and writes four attributes into the request:
//! NT-Password into the control list, and the Tunnel-Private-Group-Id /
//! Tunnel-Medium-Type / Tunnel-Type VLAN triple into the reply list.
//!
//! # Example
//!
//! ```rust,no_run
//! use remotedb::{RemoteDbConfig, RemoteDbModule};
//! use remotedb_core::{Attribute, AttributeType, AuthorizeModule, RequestContext};
//!
//! #[tokio::main(flavor = "multi_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteDbConfig::from_file("remotedb.json")?;
//!     let module = RemoteDbModule::new(config)?;
//!
//!     let mut request = RequestContext::new();
//!     request.attributes.add(
//!         Attribute::string(AttributeType::UserName, "alice")?
//!     );
//!
//!     let outcome = module.authorize(&mut request);
//!     println!("{:?}: {} reply attributes", outcome, request.reply.len());
//!     Ok(())
//! }
//! ```

pub mod authorize;
pub mod client;
pub mod config;

pub use authorize::RemoteDbModule;
pub use client::{RemoteDbClient, RemoteDbError, UserEntry};
pub use config::{ConfigError, RemoteDbConfig};
