use napi::bindgen_prelude::Uint8Array;

use super::{to_hash, to_napi_error};
use crate::domain::{
  concat::UnifiedConcat,
  hash::sha256::Sha256,
  options::{DomainSalts, LEAF_SALT, NODE_SALT},
  proof::{Proof, ProofStep},
  scheme::HashingScheme,
  tree::tree_height,
};

/// JavaScript-facing inclusion proof over SHA-256, verified with the salts of
/// the tree that produced it.
#[napi(js_name = "MerkleProof")]
pub struct MerkleProofJs {
  leaf: Option<[u8; 32]>,
  salts: DomainSalts,
  inner: Proof<[u8; 32]>,
}

#[napi]
impl MerkleProofJs {
  /// Each step is a 33-byte array:
  ///   * byte 0 => 0x01 if the sibling is on the left, 0x00 otherwise
  ///   * bytes 1..=32 => the sibling hash
  /// The last step is the sentinel carrying the claimed root.
  /// Salts default to the standard leaf/node salts.
  #[napi(constructor)]
  pub fn new(
    steps: Vec<Uint8Array>,
    leaf_salt: Option<u32>,
    node_salt: Option<u32>,
  ) -> napi::Result<Self> {
    let salts = DomainSalts::new(leaf_salt.unwrap_or(LEAF_SALT), node_salt.unwrap_or(NODE_SALT))
      .map_err(to_napi_error)?;
    let mut converted = Vec::with_capacity(steps.len());
    for js_step in steps {
      if js_step.len() != 33 {
        return Err(napi::Error::from_reason(
          "Uint8Array.data must be 33 bytes long",
        ));
      }
      converted.push(ProofStep::new(to_hash(&js_step[1..])?, js_step[0] != 0));
    }

    Ok(Self {
      leaf: None,
      salts,
      inner: Proof::new(converted),
    })
  }

  pub fn new_inner(leaf: [u8; 32], inner: Proof<[u8; 32]>, salts: DomainSalts) -> Self {
    Self {
      leaf: Some(leaf),
      salts,
      inner,
    }
  }

  fn scheme(&self) -> HashingScheme<Sha256> {
    HashingScheme::with_concat(Sha256, UnifiedConcat, self.salts)
  }

  pub fn inner(&self) -> &Proof<[u8; 32]> {
    &self.inner
  }

  /// Leaf hash the proof starts from, when it was produced by a tree.
  #[napi]
  pub fn leaf_hash(&self) -> Option<Uint8Array> {
    self.leaf.map(|l| l.to_vec().into())
  }

  #[napi]
  pub fn step_count(&self) -> u32 {
    self.inner.len() as u32
  }

  /// The root written into the proof by the prover. Do not verify against it.
  #[napi]
  pub fn claimed_root(&self) -> Option<Uint8Array> {
    self.inner.claimed_root().map(|r| r.to_vec().into())
  }

  /// Recompute the root for `data` as a member of a tree of `leaf_count`
  /// leaves. `None` when the proof length does not fit that tree.
  #[napi]
  pub fn compute_root(&self, data: Uint8Array, leaf_count: u32) -> Option<Uint8Array> {
    self
      .inner
      .compute_root(&self.scheme(), &data, tree_height(leaf_count as usize))
      .map(|r| r.to_vec().into())
  }

  #[napi]
  pub fn compute_root_hex(&self, data: Uint8Array, leaf_count: u32) -> Option<String> {
    self
      .inner
      .compute_root(&self.scheme(), &data, tree_height(leaf_count as usize))
      .map(|r| format!("0x{}", hex::encode(r)))
  }

  /// Verify `data` against a trusted 32-byte `root` of a tree of
  /// `leaf_count` leaves.
  #[napi]
  pub fn verify(&self, data: Uint8Array, root: Uint8Array, leaf_count: u32) -> napi::Result<bool> {
    let root = to_hash(&root)?;
    Ok(
      self
        .inner
        .verify(&self.scheme(), &data, &root, tree_height(leaf_count as usize)),
    )
  }

  #[napi]
  pub fn proof_hashes(&self) -> Vec<Uint8Array> {
    self.encoded_steps().map(|s| s.into()).collect()
  }

  #[napi]
  pub fn proof_hashes_hex(&self) -> Vec<String> {
    self
      .encoded_steps()
      .map(|s| format!("0x{}", hex::encode(s)))
      .collect()
  }

  fn encoded_steps(&self) -> impl Iterator<Item = Vec<u8>> + '_ {
    self.inner.steps.iter().map(|step| {
      let mut combined = Vec::with_capacity(33);
      combined.push(u8::from(step.sibling_on_left));
      combined.extend_from_slice(&step.hash);
      combined
    })
  }
}
