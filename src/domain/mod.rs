pub mod concat;
pub mod error;
pub mod hash;
pub mod options;
pub mod proof;
pub mod scheme;
pub mod tree;
