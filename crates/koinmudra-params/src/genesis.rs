//! Genesis block construction and verification
//!
//! Every network's genesis block is rebuilt from its declared inputs at
//! start-up and compared against pinned literals. A mismatch means the node
//! could never share a chain with its peers, so callers treat it as fatal.

use crate::hash::{parse_hash, BlockHasher};
use crate::network::NetworkType;
use crate::{Error, Result};
use bitcoin::block::{Header, Version as BlockVersion};
use bitcoin::blockdata::script::{Builder, PushBytesBuf};
use bitcoin::consensus::encode;
use bitcoin::hashes::Hash;
use bitcoin::opcodes::all::OP_CHECKSIG;
use bitcoin::transaction::Version;
use bitcoin::{
    absolute, merkle_tree, Amount, Block, BlockHash, CompactTarget, OutPoint, Sequence,
    Transaction, TxIn, TxMerkleNode, TxOut, Witness,
};
use serde::{Serialize, Serializer};

/// Leading constant in the genesis coinbase script (0x1d00ffff)
pub const GENESIS_SCRIPT_BITS: i64 = 486_604_799;

/// Extra-nonce pushed after [`GENESIS_SCRIPT_BITS`], as script-number bytes
pub const GENESIS_EXTRA_NONCE: [u8; 1] = [4];

/// Genesis block version
pub const GENESIS_VERSION: BlockVersion = BlockVersion::ONE;

/// Declared inputs of a genesis block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenesisInputs {
    /// Arbitrary coinbase message, usually a newspaper headline
    #[serde(serialize_with = "serialize_push")]
    pub coinbase_message: PushBytesBuf,
    /// Public key the (unspendable) reward output pays to
    #[serde(serialize_with = "serialize_push")]
    pub reward_pubkey: PushBytesBuf,
    /// Reward value; zero by convention
    pub reward: Amount,
    /// Block timestamp
    pub time: u32,
    /// Compact difficulty target
    pub bits: CompactTarget,
    /// Proof-of-work nonce
    pub nonce: u32,
}

impl GenesisInputs {
    /// Inputs with a zero reward.
    ///
    /// Fails if the message or key cannot be pushed as a single script element.
    pub fn new(
        coinbase_message: impl Into<Vec<u8>>,
        reward_pubkey: impl Into<Vec<u8>>,
        time: u32,
        bits: u32,
        nonce: u32,
    ) -> Result<Self> {
        Ok(Self {
            coinbase_message: push_bytes(coinbase_message.into())?,
            reward_pubkey: push_bytes(reward_pubkey.into())?,
            reward: Amount::ZERO,
            time,
            bits: CompactTarget::from_consensus(bits),
            nonce,
        })
    }

    /// The single coinbase transaction these inputs describe
    pub fn coinbase_transaction(&self) -> Transaction {
        let script_sig = Builder::new()
            .push_int(GENESIS_SCRIPT_BITS)
            .push_slice(GENESIS_EXTRA_NONCE)
            .push_slice(&self.coinbase_message)
            .into_script();
        let script_pubkey = Builder::new()
            .push_slice(&self.reward_pubkey)
            .push_opcode(OP_CHECKSIG)
            .into_script();

        Transaction {
            version: Version::ONE,
            lock_time: absolute::LockTime::ZERO,
            input: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig,
                sequence: Sequence::MAX,
                witness: Witness::new(),
            }],
            output: vec![TxOut {
                value: self.reward,
                script_pubkey,
            }],
        }
    }
}

fn push_bytes(data: Vec<u8>) -> Result<PushBytesBuf> {
    let len = data.len();
    PushBytesBuf::try_from(data).map_err(|_| Error::PushTooLarge(len))
}

fn serialize_push<S: Serializer>(data: &PushBytesBuf, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(data.as_bytes()))
}

/// A constructed genesis block with its derived hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genesis {
    block: Block,
    hash: BlockHash,
}

impl Genesis {
    /// Block hash
    pub fn hash(&self) -> BlockHash {
        self.hash
    }

    /// Merkle root from the header
    pub fn merkle_root(&self) -> TxMerkleNode {
        self.block.header.merkle_root
    }

    /// Block header
    pub fn header(&self) -> &Header {
        &self.block.header
    }

    /// Full block
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// The coinbase transaction
    pub fn coinbase(&self) -> &Transaction {
        &self.block.txdata[0]
    }
}

/// Build a coinbase-only genesis block from its declared inputs
pub fn build_genesis<H: BlockHasher + ?Sized>(inputs: &GenesisInputs, hasher: &H) -> Genesis {
    let txdata = vec![inputs.coinbase_transaction()];
    let header = Header {
        version: GENESIS_VERSION,
        prev_blockhash: BlockHash::all_zeros(),
        merkle_root: merkle_root(&txdata),
        time: inputs.time,
        bits: inputs.bits,
        nonce: inputs.nonce,
    };
    let hash = hasher.hash_header(&encode::serialize(&header));

    Genesis {
        block: Block { header, txdata },
        hash,
    }
}

fn merkle_root(txdata: &[Transaction]) -> TxMerkleNode {
    let leaves = txdata.iter().map(|tx| tx.compute_txid().to_raw_hash());
    merkle_tree::calculate_root(leaves)
        .map(TxMerkleNode::from_raw_hash)
        .unwrap_or_else(TxMerkleNode::all_zeros)
}

/// Genesis inputs together with the values they must reproduce
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinnedGenesis {
    /// Declared inputs
    pub inputs: GenesisInputs,
    /// Expected block hash
    pub hash: BlockHash,
    /// Expected merkle root
    pub merkle_root: TxMerkleNode,
}

impl PinnedGenesis {
    /// Pin `inputs` to the given display-order hex literals
    pub fn new(inputs: GenesisInputs, hash: &str, merkle_root: &str) -> Result<Self> {
        Ok(Self {
            inputs,
            hash: parse_hash(hash)?,
            merkle_root: parse_hash(merkle_root)?,
        })
    }

    /// Rebuild the block and check it against the pinned values
    pub fn verify<H: BlockHasher + ?Sized>(
        &self,
        network: NetworkType,
        hasher: &H,
    ) -> Result<Genesis> {
        let genesis = build_genesis(&self.inputs, hasher);

        if genesis.merkle_root() != self.merkle_root {
            tracing::error!(
                %network,
                expected = %self.merkle_root,
                actual = %genesis.merkle_root(),
                "Genesis merkle root mismatch"
            );
            return Err(Error::GenesisMismatch {
                network,
                field: "merkle root",
                expected: self.merkle_root.to_raw_hash(),
                actual: genesis.merkle_root().to_raw_hash(),
            });
        }

        if genesis.hash() != self.hash {
            tracing::error!(
                %network,
                expected = %self.hash,
                actual = %genesis.hash(),
                "Genesis hash mismatch"
            );
            return Err(Error::GenesisMismatch {
                network,
                field: "hash",
                expected: self.hash.to_raw_hash(),
                actual: genesis.hash().to_raw_hash(),
            });
        }

        tracing::debug!(%network, hash = %genesis.hash(), "Genesis block verified");
        Ok(genesis)
    }
}
