use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttributeError {
    #[error("Attribute value too long: {0} bytes (max {})", Attribute::MAX_VALUE_LENGTH)]
    ValueTooLong(usize),
    #[error("Expected 4 bytes for integer value, got {0}")]
    NotAnInteger(usize),
    #[error("Attribute value is not valid UTF-8")]
    NotAString(#[from] std::string::FromUtf8Error),
}

/// A single attribute pair.
///
/// Wire attributes (type <= 255) follow the RFC 2865 type/length/value layout;
/// types above 255 are internal control items that never appear on the wire
/// but share the same value representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute type. Values above 255 are internal-only.
    pub attr_type: u16,
    /// Attribute value (0-253 bytes)
    pub value: Vec<u8>,
}

impl Attribute {
    /// Maximum value length for a wire attribute (253 bytes, RFC 2865)
    pub const MAX_VALUE_LENGTH: usize = 253;

    pub fn new(attr_type: u16, value: Vec<u8>) -> Result<Self, AttributeError> {
        if value.len() > Self::MAX_VALUE_LENGTH {
            return Err(AttributeError::ValueTooLong(value.len()));
        }
        Ok(Attribute { attr_type, value })
    }

    /// Create a string attribute
    pub fn string(attr_type: impl Into<u16>, value: impl Into<String>) -> Result<Self, AttributeError> {
        Self::new(attr_type.into(), value.into().into_bytes())
    }

    /// Create an integer attribute (32-bit big-endian)
    pub fn integer(attr_type: impl Into<u16>, value: u32) -> Result<Self, AttributeError> {
        Self::new(attr_type.into(), value.to_be_bytes().to_vec())
    }

    /// Try to interpret the value as a string
    pub fn as_string(&self) -> Result<String, AttributeError> {
        Ok(String::from_utf8(self.value.clone())?)
    }

    /// Try to interpret the value as an integer (32-bit big-endian)
    pub fn as_integer(&self) -> Result<u32, AttributeError> {
        if self.value.len() != 4 {
            return Err(AttributeError::NotAnInteger(self.value.len()));
        }
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.value);
        Ok(u32::from_be_bytes(bytes))
    }
}
