//! Identity resolution: which Snowflake account and user a run connects as.
//!
//! The resolver never touches the filesystem or the terminal directly. It is
//! handed a [`ProfileSource`], a [`ProfileCache`] and a [`SecretProvider`].

pub mod cache;
pub mod error;
pub mod profiles;
pub mod resolver;
pub mod secret;

pub use cache::{FileProfileCache, MemoryProfileCache, ProfileCache, PROFILE_CACHE_FILE};
pub use error::IdentityError;
pub use profiles::{ProfileSource, ProfileStore, StoredProfile, YamlProfileSource};
pub use resolver::{AuthMode, AuthRequest, IdentityResolver, ResolvedIdentity};
pub use secret::{FixedSecret, SecretProvider, TerminalSecretProvider};
