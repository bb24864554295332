//! Base58 address and key prefixes

use serde::Serialize;

/// Kinds of base58-encoded data that carry a network prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base58Type {
    /// Pay-to-pubkey-hash address
    PubkeyAddress,
    /// Pay-to-script-hash address
    ScriptAddress,
    /// WIF private key
    SecretKey,
    /// BIP32 extended public key
    ExtPublicKey,
    /// BIP32 extended private key
    ExtSecretKey,
    /// BIP44 coin type
    ExtCoinType,
}

impl Base58Type {
    /// Every prefix kind
    pub const ALL: [Base58Type; 6] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
        Base58Type::ExtCoinType,
    ];
}

/// Per-network prefix bytes, one sequence per [`Base58Type`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    /// Pubkey address prefix
    #[serde(with = "hex::serde")]
    pub pubkey_address: Vec<u8>,
    /// Script address prefix
    #[serde(with = "hex::serde")]
    pub script_address: Vec<u8>,
    /// Secret key prefix
    #[serde(with = "hex::serde")]
    pub secret_key: Vec<u8>,
    /// Extended public key prefix
    #[serde(with = "hex::serde")]
    pub ext_public_key: Vec<u8>,
    /// Extended secret key prefix
    #[serde(with = "hex::serde")]
    pub ext_secret_key: Vec<u8>,
    /// BIP44 coin type bytes
    #[serde(with = "hex::serde")]
    pub ext_coin_type: Vec<u8>,
}

impl Base58Prefixes {
    /// Prefix bytes for `kind`
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
            Base58Type::ExtCoinType => &self.ext_coin_type,
        }
    }
}

impl std::ops::Index<Base58Type> for Base58Prefixes {
    type Output = [u8];

    fn index(&self, kind: Base58Type) -> &[u8] {
        self.get(kind)
    }
}
