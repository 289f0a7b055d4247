//! Front-end state shared by the gallery clients: persisted auth token,
//! storage backends and the session tying them to the HTTP client.

pub mod config;
pub mod session;
pub mod storage;
pub mod store;

pub use config::AuthConfig;
pub use session::{Session, SessionError};
pub use storage::{KeyValueStorage, MemoryStorage, StoreError};
pub use store::{PersistentStore, SubscriptionId};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
