//! Host-facing types for the remotedb authorization module
//!
//! This crate provides the small slice of the RADIUS attribute world the
//! remotedb module needs: an attribute pair type, the attribute list with
//! set/append semantics, and the request context and module trait through
//! which the host server drives authorization.
//!
//! # Example
//!
//! ```rust
//! use remotedb_core::{Attribute, AttributeType, RequestContext};
//!
//! let mut request = RequestContext::new();
//! request.attributes.add(
//!     Attribute::string(AttributeType::UserName, "alice").unwrap()
//! );
//! assert_eq!(request.username().as_deref(), Some("alice"));
//! ```

pub mod attributes;
pub mod request;

pub use attributes::{
    Attribute, AttributeError, AttributeType, TUNNEL_MEDIUM_IEEE_802, TUNNEL_TYPE_VLAN,
};
pub use request::{AttributeList, AuthorizeModule, AuthorizeOutcome, RequestContext};
