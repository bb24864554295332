//! KoinMudra network definitions

use crate::{Error, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Network type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Production network
    #[serde(rename = "main")]
    Mainnet,
    /// Public test network
    #[serde(rename = "test")]
    Testnet,
    /// Regression test (local development)
    Regtest,
    /// In-process unit tests
    #[serde(rename = "unittest")]
    UnitTest,
}

impl NetworkType {
    /// Every supported network, in registry order
    pub const ALL: [NetworkType; 4] = [
        NetworkType::Mainnet,
        NetworkType::Testnet,
        NetworkType::Regtest,
        NetworkType::UnitTest,
    ];

    /// Canonical network id string
    pub const fn name(self) -> &'static str {
        match self {
            NetworkType::Mainnet => "main",
            NetworkType::Testnet => "test",
            NetworkType::Regtest => "regtest",
            NetworkType::UnitTest => "unittest",
        }
    }

    /// Whether this is a testing network (anything but main)
    pub const fn is_test_network(self) -> bool {
        !matches!(self, NetworkType::Mainnet)
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "main" | "mainnet" => Ok(NetworkType::Mainnet),
            "test" | "testnet" => Ok(NetworkType::Testnet),
            "regtest" => Ok(NetworkType::Regtest),
            "unittest" => Ok(NetworkType::UnitTest),
            other => Err(Error::InvalidNetwork(other.to_string())),
        }
    }
}

/// Four-byte marker prefixed to every peer-protocol message.
///
/// The bytes are rarely used upper ASCII, not valid as UTF-8, and produce a
/// large 4-byte integer at any alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageStart(pub [u8; 4]);

impl MessageStart {
    /// Raw marker bytes
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for MessageStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for MessageStart {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_names_round_trip() {
        for network in NetworkType::ALL {
            assert_eq!(network.name().parse::<NetworkType>().unwrap(), network);
        }
    }

    #[test]
    fn test_network_aliases() {
        assert_eq!("mainnet".parse::<NetworkType>().unwrap(), NetworkType::Mainnet);
        assert_eq!("testnet".parse::<NetworkType>().unwrap(), NetworkType::Testnet);
    }

    #[test]
    fn test_unknown_network_rejected() {
        let err = "signet".parse::<NetworkType>().unwrap_err();
        assert!(matches!(err, Error::InvalidNetwork(ref name) if name == "signet"));
    }

    #[test]
    fn test_network_serde_uses_canonical_names() {
        let json = serde_json::to_string(&NetworkType::Testnet).unwrap();
        assert_eq!(json, "\"test\"");
        let parsed: NetworkType = serde_json::from_str("\"unittest\"").unwrap();
        assert_eq!(parsed, NetworkType::UnitTest);
    }

    #[test]
    fn test_message_start_display() {
        let marker = MessageStart([0x20, 0xdc, 0x33, 0xcb]);
        assert_eq!(marker.to_string(), "20dc33cb");
    }
}
