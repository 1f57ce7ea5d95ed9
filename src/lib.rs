#![deny(clippy::all)]
//! A Merkle tree over a fixed number of items, stored as one flat hash buffer,
//! with domain-separated leaf/node hashing and inclusion proofs.

#[cfg(feature = "napi")]
#[macro_use]
extern crate napi_derive;

mod domain;
#[cfg(feature = "napi")]
mod interfaces;

pub use domain::{
    concat::{Chunk, Concatenator, LengthPrefixedConcat, UnifiedConcat},
    error::{MerkleError, Result},
    hash::{
        sha256::{DoubleSha256, Sha256},
        FnHasher, HashFunction,
    },
    options::{DomainSalts, TreeOptions, LEAF_SALT, NODE_SALT},
    proof::{Proof, ProofStep},
    scheme::HashingScheme,
    tree::{fixed::FixedSizeTree, tree_height, tree_size, Layer, MerkleTree},
};
