//! dbt `profiles.yml` as an ordered profile store.

use super::error::IdentityError;
use serde_yaml::{Mapping, Value};
use snow2dbt_catalog::{Secret, SessionIdentity};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// dbt reserves this top-level key for global settings.
const RESERVED_CONFIG_KEY: &str = "config";

/// One profile's `outputs.dev` block. Fields are checked only when the
/// profile is actually used, so listing still works with a half-filled file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProfile {
    pub name: String,
    pub account: Option<String>,
    pub user: Option<String>,
    password: Option<Secret>,
}

impl StoredProfile {
    pub fn new(
        name: impl Into<String>,
        account: Option<String>,
        user: Option<String>,
        password: Option<Secret>,
    ) -> Self {
        Self {
            name: name.into(),
            account,
            user,
            password,
        }
    }

    /// The credentials of this profile, or the first missing field.
    pub fn identity(&self) -> Result<SessionIdentity, IdentityError> {
        let missing = |field| IdentityError::MalformedProfile {
            profile: self.name.clone(),
            field,
        };
        let account = self.account.clone().ok_or_else(|| missing("account"))?;
        let user = self.user.clone().ok_or_else(|| missing("user"))?;
        let password = self.password.clone().ok_or_else(|| missing("password"))?;
        Ok(SessionIdentity::new(account, user, password))
    }
}

/// Profiles in file order. Position 1 is the implicit default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStore {
    profiles: Vec<StoredProfile>,
}

impl ProfileStore {
    pub fn new(profiles: Vec<StoredProfile>) -> Self {
        Self { profiles }
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, String> {
        let doc: Value = serde_yaml::from_str(contents).map_err(|e| e.to_string())?;
        let mapping = match doc {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            _ => return Err("top level is not a mapping".to_string()),
        };

        let mut profiles = Vec::with_capacity(mapping.len());
        for (key, value) in &mapping {
            let Some(name) = scalar(key) else {
                return Err(format!("profile name {:?} is not a string", key));
            };
            if name == RESERVED_CONFIG_KEY {
                continue;
            }
            let dev = &value["outputs"]["dev"];
            profiles.push(StoredProfile {
                name,
                account: scalar(&dev["account"]),
                user: scalar(&dev["user"]),
                password: scalar(&dev["password"]).map(Secret::new),
            });
        }
        Ok(Self { profiles })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredProfile> {
        self.profiles.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name.clone()).collect()
    }

    pub fn by_name(&self, name: &str) -> Option<&StoredProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// 1-based positional lookup.
    pub fn by_index(&self, index: usize) -> Option<&StoredProfile> {
        index.checked_sub(1).and_then(|i| self.profiles.get(i))
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Where profiles come from.
pub trait ProfileSource {
    fn load(&self) -> Result<ProfileStore, IdentityError>;
}

impl ProfileSource for ProfileStore {
    fn load(&self) -> Result<ProfileStore, IdentityError> {
        Ok(self.clone())
    }
}

/// A `profiles.yml` on disk.
#[derive(Debug, Clone)]
pub struct YamlProfileSource {
    path: PathBuf,
}

impl YamlProfileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, reason: impl Into<String>) -> IdentityError {
        IdentityError::ProfileStoreUnavailable {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }
}

impl ProfileSource for YamlProfileSource {
    fn load(&self) -> Result<ProfileStore, IdentityError> {
        debug!("Scanning {} for dbt profiles", self.path.display());
        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| self.unavailable(e.to_string()))?;
        info!("profiles.yml file has been found {}", self.path.display());

        let store = ProfileStore::from_yaml_str(&contents).map_err(|e| self.unavailable(e))?;
        if store.is_empty() {
            return Err(self.unavailable("no profiles defined"));
        }
        Ok(store)
    }
}
