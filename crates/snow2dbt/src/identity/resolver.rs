//! Turns an auth request into exactly one session identity.

use super::cache::ProfileCache;
use super::error::IdentityError;
use super::profiles::{ProfileSource, ProfileStore, StoredProfile};
use super::secret::SecretProvider;
use snow2dbt_catalog::SessionIdentity;
use std::str::FromStr;
use tracing::info;

/// How credentials are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// From dbt `profiles.yml` (`dbt` is accepted as an alias)
    Profile,
    /// Explicit account and username, password prompted
    Standard,
}

impl FromStr for AuthMode {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "profile" | "dbt" => Ok(AuthMode::Profile),
            "standard" => Ok(AuthMode::Standard),
            _ => Err(IdentityError::UnknownAuthMode(s.to_string())),
        }
    }
}

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    pub mode: AuthMode,
    /// Explicit profile name (profile mode)
    pub profile: Option<String>,
    pub account: Option<String>,
    pub username: Option<String>,
}

impl AuthRequest {
    pub fn profile(name: Option<String>) -> Self {
        Self {
            mode: AuthMode::Profile,
            profile: name,
            account: None,
            username: None,
        }
    }

    pub fn standard(account: Option<String>, username: Option<String>) -> Self {
        Self {
            mode: AuthMode::Standard,
            profile: None,
            account,
            username,
        }
    }
}

/// The identity plus where it came from, for logging.
#[derive(Debug, Clone)]
pub struct ResolvedIdentity {
    pub identity: SessionIdentity,
    /// `(1-based index, name)` when resolved from a profile
    pub profile: Option<(usize, String)>,
}

/// Picks credentials for a run. Owns no state; everything is injected.
pub struct IdentityResolver<'a> {
    profiles: &'a dyn ProfileSource,
    cache: &'a dyn ProfileCache,
    secrets: &'a dyn SecretProvider,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(
        profiles: &'a dyn ProfileSource,
        cache: &'a dyn ProfileCache,
        secrets: &'a dyn SecretProvider,
    ) -> Self {
        Self {
            profiles,
            cache,
            secrets,
        }
    }

    pub fn resolve(&self, request: &AuthRequest) -> Result<ResolvedIdentity, IdentityError> {
        match request.mode {
            AuthMode::Profile => self.resolve_profile(request.profile.as_deref()),
            AuthMode::Standard => self.resolve_standard(request),
        }
    }

    fn resolve_profile(&self, name: Option<&str>) -> Result<ResolvedIdentity, IdentityError> {
        let store = self.profiles.load()?;
        let (index, profile) = match name {
            Some(name) => store
                .iter()
                .enumerate()
                .find(|(_, p)| p.name == name)
                .map(|(i, p)| (i + 1, p))
                .ok_or_else(|| IdentityError::UnknownProfile {
                    name: name.to_string(),
                    available: store.names(),
                })?,
            None => {
                let index = self.default_index(&store)?;
                (index, checked_index(&store, index)?)
            }
        };

        let identity = profile.identity()?;
        info!(
            "Using profile {} - {} with username {} on account {}",
            index, profile.name, identity.username, identity.account
        );
        Ok(ResolvedIdentity {
            identity,
            profile: Some((index, profile.name.clone())),
        })
    }

    fn resolve_standard(&self, request: &AuthRequest) -> Result<ResolvedIdentity, IdentityError> {
        let account = non_empty(request.account.as_deref())
            .ok_or(IdentityError::MissingCredential("account"))?;
        let username = non_empty(request.username.as_deref())
            .ok_or(IdentityError::MissingCredential("username"))?;

        let secret = self
            .secrets
            .prompt(&format!("Password for {}@{}: ", username, account))?;
        info!("Using username {} on account {}", username, account);
        Ok(ResolvedIdentity {
            identity: SessionIdentity::new(account, username, secret),
            profile: None,
        })
    }

    /// The cached default index, or 1 when nothing is cached.
    pub fn default_index(&self, store: &ProfileStore) -> Result<usize, IdentityError> {
        let index = self.cache.get()?.unwrap_or(1);
        checked_index(store, index)?;
        Ok(index)
    }

    /// Validate `index` against the store and persist it as the default.
    pub fn select_default(&self, index: usize) -> Result<StoredProfile, IdentityError> {
        let store = self.profiles.load()?;
        let profile = checked_index(&store, index)?.clone();
        self.cache.set(index)?;
        info!(
            "Using profile {} - {} with username {} on account {}",
            index,
            profile.name,
            profile.user.as_deref().unwrap_or("<unset>"),
            profile.account.as_deref().unwrap_or("<unset>")
        );
        Ok(profile)
    }

    /// Forget the persisted default. Absent cache is not an error.
    pub fn clear_default(&self) -> Result<(), IdentityError> {
        self.cache.clear()?;
        info!("Identity cache has been cleared");
        Ok(())
    }

    pub fn load_profiles(&self) -> Result<ProfileStore, IdentityError> {
        self.profiles.load()
    }
}

fn checked_index(store: &ProfileStore, index: usize) -> Result<&StoredProfile, IdentityError> {
    store
        .by_index(index)
        .ok_or_else(|| IdentityError::InvalidCacheIndex {
            value: index.to_string(),
            reason: format!("expected a number between 1 and {}", store.len()),
        })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::cache::MemoryProfileCache;
    use crate::identity::secret::FixedSecret;
    use snow2dbt_catalog::Secret;

    fn store() -> ProfileStore {
        let profile = |name: &str, account: &str, user: &str| {
            StoredProfile::new(
                name,
                Some(account.to_string()),
                Some(user.to_string()),
                Some(Secret::new(format!("{}-pw", name))),
            )
        };
        ProfileStore::new(vec![
            profile("first", "acme-1", "ONE"),
            profile("second", "acme-2", "TWO"),
        ])
    }

    #[test]
    fn test_auth_mode_parsing() {
        assert_eq!("profile".parse::<AuthMode>().unwrap(), AuthMode::Profile);
        assert_eq!("dbt".parse::<AuthMode>().unwrap(), AuthMode::Profile);
        assert_eq!("Standard".parse::<AuthMode>().unwrap(), AuthMode::Standard);
        assert!(matches!(
            "oauth".parse::<AuthMode>(),
            Err(IdentityError::UnknownAuthMode(ref m)) if m == "oauth"
        ));
    }

    #[test]
    fn test_no_cache_defaults_to_first_profile() {
        let (store, cache, secret) = (store(), MemoryProfileCache::new(), FixedSecret::new("x"));
        let resolver = IdentityResolver::new(&store, &cache, &secret);

        let resolved = resolver.resolve(&AuthRequest::profile(None)).unwrap();
        assert_eq!(resolved.identity.account, "acme-1");
        assert_eq!(resolved.profile, Some((1, "first".to_string())));
    }

    #[test]
    fn test_explicit_profile_wins_over_cache() {
        let (store, cache, secret) = (store(), MemoryProfileCache::with_index(1), FixedSecret::new("x"));
        let resolver = IdentityResolver::new(&store, &cache, &secret);

        let resolved = resolver
            .resolve(&AuthRequest::profile(Some("second".to_string())))
            .unwrap();
        assert_eq!(resolved.identity.username, "TWO");
        assert_eq!(resolved.identity.secret.expose(), "second-pw");
    }

    #[test]
    fn test_unknown_profile_lists_available() {
        let (store, cache, secret) = (store(), MemoryProfileCache::new(), FixedSecret::new("x"));
        let resolver = IdentityResolver::new(&store, &cache, &secret);

        let err = resolver
            .resolve(&AuthRequest::profile(Some("third".to_string())))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Profile 'third' not found (available: first, second)"
        );
    }

    #[test]
    fn test_out_of_range_cache_is_rejected() {
        for index in [0, 3] {
            let (store, cache, secret) =
                (store(), MemoryProfileCache::with_index(index), FixedSecret::new("x"));
            let resolver = IdentityResolver::new(&store, &cache, &secret);
            let err = resolver.resolve(&AuthRequest::profile(None)).unwrap_err();
            assert!(matches!(err, IdentityError::InvalidCacheIndex { .. }));
        }
    }

    #[test]
    fn test_select_then_clear() {
        let (store, cache, secret) = (store(), MemoryProfileCache::new(), FixedSecret::new("x"));
        let resolver = IdentityResolver::new(&store, &cache, &secret);

        resolver.select_default(2).unwrap();
        let resolved = resolver.resolve(&AuthRequest::profile(None)).unwrap();
        assert_eq!(resolved.identity.account, "acme-2");

        resolver.clear_default().unwrap();
        let resolved = resolver.resolve(&AuthRequest::profile(None)).unwrap();
        assert_eq!(resolved.identity.account, "acme-1");
    }

    #[test]
    fn test_select_out_of_range_leaves_cache_alone() {
        let (store, cache, secret) = (store(), MemoryProfileCache::with_index(2), FixedSecret::new("x"));
        let resolver = IdentityResolver::new(&store, &cache, &secret);

        assert!(resolver.select_default(5).is_err());
        assert_eq!(cache.get().unwrap(), Some(2));
    }

    #[test]
    fn test_standard_mode_prompts_for_secret() {
        let (store, cache, secret) = (store(), MemoryProfileCache::new(), FixedSecret::new("typed"));
        let resolver = IdentityResolver::new(&store, &cache, &secret);

        let resolved = resolver
            .resolve(&AuthRequest::standard(
                Some("acme-eu".to_string()),
                Some("LOADER".to_string()),
            ))
            .unwrap();
        assert_eq!(resolved.identity.account, "acme-eu");
        assert_eq!(resolved.identity.secret.expose(), "typed");
        assert!(resolved.profile.is_none());
    }

    #[test]
    fn test_standard_mode_requires_account_and_username() {
        let (store, cache, secret) = (store(), MemoryProfileCache::new(), FixedSecret::new("x"));
        let resolver = IdentityResolver::new(&store, &cache, &secret);

        let err = resolver
            .resolve(&AuthRequest::standard(None, Some("LOADER".to_string())))
            .unwrap_err();
        assert!(matches!(err, IdentityError::MissingCredential("account")));

        let err = resolver
            .resolve(&AuthRequest::standard(Some("acme".to_string()), Some("  ".to_string())))
            .unwrap_err();
        assert!(matches!(err, IdentityError::MissingCredential("username")));
    }
}
