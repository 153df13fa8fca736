mod attribute;
mod types;

pub use attribute::{Attribute, AttributeError};
pub use types::{AttributeType, TUNNEL_MEDIUM_IEEE_802, TUNNEL_TYPE_VLAN};
