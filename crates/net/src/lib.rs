//! EduLog Network Library
//!
//! HTTP clients for the collaborators EduLog talks to.
//!
//! # Architecture
//!
//! - **Roster**: GET the class list from the sheet web app
//! - **Sync**: best-effort POST of a saved record row to the same web app
//! - **Relay**: chat-completion call that rewrites a note, with bounded retry
//!
//! # Usage
//!
//! ```ignore
//! let classes = RosterClient::new().fetch(&settings.endpoint_url).await?;
//!
//! let relay = RelayClient::new(RelayConfig::from(&config.relay));
//! let text = relay.polish(&note, &settings.api_key, |p| println!("{}", p)).await;
//! ```

pub mod error;
pub mod protocol;
pub mod relay;
pub mod retry;
pub mod roster;
pub mod sync;

#[cfg(any(test, feature = "test-support"))]
pub mod test_server;

pub use error::{Error, Result};
pub use protocol::SyncRow;
pub use relay::{RelayClient, RelayConfig, RelayProgress, INVALID_KEY_MESSAGE, MISSING_KEY_MESSAGE};
pub use retry::RetryPolicy;
pub use roster::RosterClient;
pub use sync::{SyncClient, SyncJob, SyncOutcome};
