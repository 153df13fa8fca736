//! Remote database authorization module
//!
//! This module provides RADIUS authorization against a remote HTTP user
//! database: the user's NT password hash lands in the control list and the
//! VLAN assignment in the reply list as RFC 2868 tunnel attributes.

use crate::client::{RemoteDbClient, RemoteDbError};
use crate::config::RemoteDbConfig;
use remotedb_core::{
    Attribute, AttributeError, AttributeType, AuthorizeModule, AuthorizeOutcome, RequestContext,
    TUNNEL_MEDIUM_IEEE_802, TUNNEL_TYPE_VLAN,
};
use tracing::{debug, error};

/// Remote database authorization module
///
/// Stateless across requests: each invocation reads the shared immutable
/// configuration, performs one bounded HTTP lookup, and either mutates the
/// request or leaves it untouched. No retries are performed; a failed lookup
/// is a final failure for that request.
pub struct RemoteDbModule {
    client: RemoteDbClient,
}

impl RemoteDbModule {
    /// Create a new remote database module from a validated configuration
    pub fn new(config: RemoteDbConfig) -> Result<Self, RemoteDbError> {
        let client = RemoteDbClient::new(config)?;
        Ok(RemoteDbModule { client })
    }

    async fn lookup(&self, request: &mut RequestContext, username: &str) -> AuthorizeOutcome {
        let mac = request.calling_station_id().unwrap_or_default();

        debug!(
            username = %username,
            mac = %mac,
            "Searching remote database"
        );

        match self.client.fetch(username, &mac).await {
            Ok(entry) => match build_answer(request, &entry.password, &entry.vlan) {
                Ok(()) => AuthorizeOutcome::Success,
                Err(e) => {
                    error!(
                        username = %username,
                        error = %e,
                        "Rejecting remote database entry"
                    );
                    AuthorizeOutcome::Failure
                }
            },
            Err(e) => {
                error!(
                    uri = %self.client.lookup_uri(username, &mac),
                    error = %e,
                    "Remote database lookup failed"
                );
                if e.is_connect_or_timeout() {
                    error!("Could not connect to the remote database or the operation timed out");
                }
                AuthorizeOutcome::Failure
            }
        }
    }
}

impl AuthorizeModule for RemoteDbModule {
    fn authorize(&self, request: &mut RequestContext) -> AuthorizeOutcome {
        // Without a username there is nothing to look up
        let Some(username) = request.username() else {
            debug!("No User-Name in request, nothing to do");
            return AuthorizeOutcome::NotApplicable;
        };

        // The HTTP lookup is async, so we need to use block_in_place
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(self.lookup(request, &username))
        })
    }
}

/// Write the lookup result into the request
///
/// Exactly four attribute writes: NT-Password is set (replacing any prior
/// value) in the control list, and the three VLAN tunnel attributes are
/// appended to the reply list. All four attributes are constructed before
/// the first write, so an over-long `password` or `vlan` (beyond the
/// 253-byte attribute cap) fails the whole answer and leaves the request
/// untouched.
fn build_answer(
    request: &mut RequestContext,
    password: &str,
    vlan: &str,
) -> Result<(), AttributeError> {
    debug!(vlan = %vlan, "Building answer from remote database entry");

    let password = Attribute::string(AttributeType::NtPassword, password)?;
    let group_id = Attribute::string(AttributeType::TunnelPrivateGroupId, vlan)?;
    let medium = Attribute::integer(AttributeType::TunnelMediumType, TUNNEL_MEDIUM_IEEE_802)?;
    let tunnel_type = Attribute::integer(AttributeType::TunnelType, TUNNEL_TYPE_VLAN)?;

    request.control.set(password);
    request.reply.add(group_id);
    request.reply.add(medium);
    request.reply.add(tunnel_type);
    Ok(())
}
