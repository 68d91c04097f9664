//! Key material for the keystream RNG.
//!
//! Two paths reach [`Key`]: a binary key of exactly 16, 24, or 32 bytes
//! (selecting AES-128/192/256), or a passkey string used as-is. Passkeys are
//! not key-derived; it is the caller's responsibility to size a binary key
//! correctly.

use crate::error::{Error, Result};

/// Key material passed to the keystream RNG.
#[derive(Debug, Clone)]
pub enum Key {
    Aes128([u8; 16]),
    Aes192([u8; 24]),
    Aes256([u8; 32]),
}

impl Key {
    /// Build a key from raw bytes. Fails unless the length is exactly 16, 24,
    /// or 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            16 => Ok(Key::Aes128(bytes.try_into().unwrap())),
            24 => Ok(Key::Aes192(bytes.try_into().unwrap())),
            32 => Ok(Key::Aes256(bytes.try_into().unwrap())),
            n => Err(Error::BadKeySize(n)),
        }
    }

    /// Build a key from a passkey string, used as-is. The caller must supply
    /// a string whose byte length is 16, 24, or 32 for this to succeed.
    pub fn from_passkey(passkey: &str) -> Result<Self> {
        Self::from_bytes(passkey.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Key::Aes128(k) => k,
            Key::Aes192(k) => k,
            Key::Aes256(k) => k,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_aes_key_sizes() {
        assert!(matches!(Key::from_bytes(&[0u8; 16]), Ok(Key::Aes128(_))));
        assert!(matches!(Key::from_bytes(&[0u8; 24]), Ok(Key::Aes192(_))));
        assert!(matches!(Key::from_bytes(&[0u8; 32]), Ok(Key::Aes256(_))));
    }

    #[test]
    fn rejects_other_sizes() {
        assert!(matches!(
            Key::from_bytes(&[0u8; 20]),
            Err(Error::BadKeySize(20))
        ));
    }

    #[test]
    fn passkey_used_as_is() {
        // the scenario-2 passkey from the spec: 32 ASCII bytes, selects AES-256
        let passkey = "I am probably a secretive secret";
        assert_eq!(passkey.len(), 32);
        assert!(matches!(Key::from_passkey(passkey), Ok(Key::Aes256(_))));

        let too_short = "short key";
        assert!(matches!(
            Key::from_passkey(too_short),
            Err(Error::BadKeySize(9))
        ));
    }
}
