pub mod options;
pub mod proof;
pub mod tree;

/// Install the `env_logger` backend so `RUST_LOG` controls the crate's logs.
#[napi]
pub fn init() {
  let _ = env_logger::try_init();
}

pub(crate) fn to_hash(bytes: &[u8]) -> napi::Result<[u8; 32]> {
  bytes.try_into().map_err(|_| {
    napi::Error::from_reason(format!("Expected a 32-byte hash, got {} bytes", bytes.len()))
  })
}

pub(crate) fn to_napi_error(err: crate::domain::error::MerkleError) -> napi::Error {
  napi::Error::from_reason(err.to_string())
}
