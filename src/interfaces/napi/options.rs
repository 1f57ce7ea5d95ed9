use crate::domain::options::{DomainSalts, TreeOptions, LEAF_SALT, NODE_SALT};

#[napi(js_name = "MerkleTreeOptions")]
#[derive(Clone)]
pub struct MerkleTreeOptionsJs {
  pub leaf_salt: u32,
  pub node_salt: u32,
  pub strict: bool,
}

impl Default for MerkleTreeOptionsJs {
  fn default() -> Self {
    Self {
      leaf_salt: LEAF_SALT,
      node_salt: NODE_SALT,
      strict: false,
    }
  }
}

#[napi]
impl MerkleTreeOptionsJs {
  #[napi(constructor)]
  pub fn new() -> Self {
    Self::default()
  }
}

impl TryFrom<&MerkleTreeOptionsJs> for TreeOptions {
  type Error = napi::Error;

  fn try_from(value: &MerkleTreeOptionsJs) -> napi::Result<Self> {
    let salts = DomainSalts::new(value.leaf_salt, value.node_salt).map_err(super::to_napi_error)?;
    Ok(TreeOptions::default().with_salts(salts).strict(value.strict))
  }
}
