//! Revocation store module.

mod r#trait;
pub use r#trait::RevocationStore;

mod memory;
pub use memory::InMemoryRevocationStore;

mod mock;
pub use mock::MockRevocationStore;
