pub mod http_store;
#[cfg(test)]
pub mod mock_store;
pub mod types;

pub use http_store::HttpWardrobeStore;
pub use types::{Clothing, ClothingId, ClothingPatch, WardrobeStore};
