use napi::bindgen_prelude::Uint8Array;

use super::{options::MerkleTreeOptionsJs, proof::MerkleProofJs, to_hash, to_napi_error};
use crate::domain::{
  concat::UnifiedConcat,
  hash::sha256::Sha256,
  options::TreeOptions,
  tree::MerkleTree,
};

#[napi(js_name = "MerkleTree")]
pub struct MerkleTreeJs {
  inner: MerkleTree<Sha256>,
}

#[napi]
impl MerkleTreeJs {
  /// Empty tree for `leaf_count` leaves; call `build` before querying it.
  #[napi(constructor)]
  pub fn new(leaf_count: u32) -> napi::Result<Self> {
    let inner = MerkleTree::try_new(Sha256, leaf_count as usize).map_err(to_napi_error)?;
    Ok(Self { inner })
  }

  #[napi(factory)]
  pub fn with_options(leaf_count: u32, options: &MerkleTreeOptionsJs) -> napi::Result<Self> {
    let options = TreeOptions::try_from(options)?;
    let inner = MerkleTree::with_options(Sha256, UnifiedConcat, leaf_count as usize, options)
      .map_err(to_napi_error)?;
    Ok(Self { inner })
  }

  #[napi(factory)]
  pub fn from_leaves(leaves: Vec<Uint8Array>) -> napi::Result<Self> {
    let inner = MerkleTree::from_items(Sha256, leaves.iter().map(|l| l.to_vec()))
      .map_err(to_napi_error)?;
    Ok(Self { inner })
  }

  #[napi]
  pub fn build(&mut self, leaves: Vec<Uint8Array>) -> napi::Result<()> {
    self
      .inner
      .build(leaves.iter().map(|l| l.to_vec()))
      .map_err(to_napi_error)?;
    Ok(())
  }

  #[napi]
  pub fn root(&self) -> Uint8Array {
    self.inner.root().to_vec().into()
  }

  #[napi]
  pub fn root_hex(&self) -> String {
    self.inner.root_hex()
  }

  #[napi]
  pub fn height(&self) -> u32 {
    self.inner.height() as u32
  }

  #[napi]
  pub fn size(&self) -> u32 {
    self.inner.size() as u32
  }

  #[napi]
  pub fn leaf_count(&self) -> u32 {
    self.inner.leaf_count() as u32
  }

  #[napi]
  pub fn has(&self, data: Uint8Array) -> bool {
    self.inner.has(&data)
  }

  #[napi]
  pub fn leaf_index_lookup(&self, data: Uint8Array) -> Option<u32> {
    self.inner.find_leaf(&data).map(|i| i as u32)
  }

  #[napi]
  pub fn get_proof(&self, data: Uint8Array) -> Option<MerkleProofJs> {
    self
      .inner
      .get_proof(&data)
      .map(|(leaf, proof)| MerkleProofJs::new_inner(leaf, proof, self.inner.scheme().salts()))
  }

  /// Verify with this tree's salts against a trusted 32-byte `root`.
  #[napi]
  pub fn verify_proof(
    &self,
    data: Uint8Array,
    proof: &MerkleProofJs,
    root: Uint8Array,
  ) -> napi::Result<bool> {
    let root = to_hash(&root)?;
    Ok(self.inner.verify_proof(&data, proof.inner(), &root))
  }

  #[napi]
  pub fn dump(&self) -> String {
    self.inner.to_string()
  }
}
