//! Request context shared between the host server and authorization modules.
//!
//! The host owns the real request; this is the minimal owned view a module
//! needs: the inbound attribute list to read from, and the control and reply
//! lists to write into.

use crate::attributes::{Attribute, AttributeType};

/// Ordered list of attributes with both append and replace semantics.
///
/// RADIUS attribute lists may legitimately carry duplicates (e.g. several
/// Reply-Message attributes), so `add` never deduplicates. Control items
/// usually want "last write wins", which is what `set` provides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    attributes: Vec<Attribute>,
}

impl AttributeList {
    pub fn new() -> Self {
        AttributeList::default()
    }

    /// Append an attribute, keeping any existing attributes of the same type
    pub fn add(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Replace the first attribute of the same type, or append if absent
    pub fn set(&mut self, attribute: Attribute) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.attr_type == attribute.attr_type)
        {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    /// Find the first attribute of the given type
    pub fn find(&self, attr_type: impl Into<u16>) -> Option<&Attribute> {
        let attr_type = attr_type.into();
        self.attributes.iter().find(|a| a.attr_type == attr_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// One authentication request as seen by an authorization module.
///
/// `attributes` holds what the NAS sent; `control` holds server-side items
/// that parameterize later authentication steps; `reply` collects attributes
/// destined for the Access-Accept.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Inbound request attributes
    pub attributes: AttributeList,
    /// Server-side control items (never sent on the wire)
    pub control: AttributeList,
    /// Attributes for the response
    pub reply: AttributeList,
}

impl RequestContext {
    pub fn new() -> Self {
        RequestContext::default()
    }

    /// User-Name from the request, if present and valid UTF-8
    pub fn username(&self) -> Option<String> {
        self.attributes
            .find(AttributeType::UserName)
            .and_then(|attr| attr.as_string().ok())
    }

    /// Calling-Station-Id from the request, if present and valid UTF-8
    pub fn calling_station_id(&self) -> Option<String> {
        self.attributes
            .find(AttributeType::CallingStationId)
            .and_then(|attr| attr.as_string().ok())
    }
}

/// Outcome of an authorization module invocation.
///
/// Exactly one of these is returned per request. The request context is
/// mutated only on `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizeOutcome {
    /// The module produced attributes for this request
    Success,
    /// The module has nothing to say about this request (distinct from failure)
    NotApplicable,
    /// The lookup failed; the host should deny the request
    Failure,
}

/// Authorization module trait
///
/// Implement this trait to inject attributes into a request before
/// authentication runs. Modules must be safe for concurrent invocation;
/// any per-request state belongs in the `RequestContext`.
pub trait AuthorizeModule: Send + Sync {
    fn authorize(&self, request: &mut RequestContext) -> AuthorizeOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_duplicates() {
        let mut list = AttributeList::new();
        list.add(Attribute::string(AttributeType::TunnelPrivateGroupId, "7").unwrap());
        list.add(Attribute::string(AttributeType::TunnelPrivateGroupId, "12").unwrap());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_set_replaces_existing() {
        let mut list = AttributeList::new();
        list.set(Attribute::string(AttributeType::NtPassword, "old").unwrap());
        list.set(Attribute::string(AttributeType::NtPassword, "new").unwrap());
        assert_eq!(list.len(), 1);
        assert_eq!(
            list.find(AttributeType::NtPassword).unwrap().as_string().unwrap(),
            "new"
        );
    }

    #[test]
    fn test_set_inserts_when_absent() {
        let mut list = AttributeList::new();
        list.set(Attribute::string(AttributeType::NtPassword, "value").unwrap());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_username_helpers() {
        let mut request = RequestContext::new();
        assert_eq!(request.username(), None);
        assert_eq!(request.calling_station_id(), None);

        request
            .attributes
            .add(Attribute::string(AttributeType::UserName, "alice").unwrap());
        request
            .attributes
            .add(Attribute::string(AttributeType::CallingStationId, "AA:BB").unwrap());

        assert_eq!(request.username().as_deref(), Some("alice"));
        assert_eq!(request.calling_station_id().as_deref(), Some("AA:BB"));
    }

    #[test]
    fn test_find_missing() {
        let list = AttributeList::new();
        assert!(list.find(AttributeType::UserName).is_none());
        assert!(list.is_empty());
    }
}
