/// Attribute types used by the remotedb module.
///
/// Types 1-255 are wire attributes from RFC 2865 and RFC 2868. Types above
/// 255 are internal control items in the style of server-side dictionaries;
/// they parameterize later authentication steps and are never encoded into
/// a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum AttributeType {
    /// User-Name (1) - RFC 2865
    UserName = 1,
    /// Calling-Station-Id (31) - RFC 2865
    CallingStationId = 31,
    /// Tunnel-Type (64) - RFC 2868
    TunnelType = 64,
    /// Tunnel-Medium-Type (65) - RFC 2868
    TunnelMediumType = 65,
    /// Tunnel-Private-Group-Id (81) - RFC 2868
    TunnelPrivateGroupId = 81,
    /// NT-Password (internal) - control item consumed by MS-CHAP/NTLM
    /// authentication, not a wire attribute
    NtPassword = 1004,
}

/// Tunnel-Type value for VLAN encapsulation (RFC 3580 Section 3.31)
pub const TUNNEL_TYPE_VLAN: u32 = 13;

/// Tunnel-Medium-Type value for IEEE-802 media (RFC 3580 Section 3.31)
pub const TUNNEL_MEDIUM_IEEE_802: u32 = 6;

impl AttributeType {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(AttributeType::UserName),
            31 => Some(AttributeType::CallingStationId),
            64 => Some(AttributeType::TunnelType),
            65 => Some(AttributeType::TunnelMediumType),
            81 => Some(AttributeType::TunnelPrivateGroupId),
            1004 => Some(AttributeType::NtPassword),
            _ => None,
        }
    }

    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

impl From<AttributeType> for u16 {
    fn from(value: AttributeType) -> u16 {
        value as u16
    }
}
