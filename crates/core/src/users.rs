//! User to clinic resolution.
//!
//! [`CacheService`] owns the per-user clinic lists and the registry recording every per-user key,
//! so all of them can be invalidated together. [`UserResolverService`] answers questions about an
//! authenticated user: which clinics their group covers, their roles and their group level.

use crate::cache::{CacheEntryOptions, MemoryCache};
use crate::clinics::{Clinic, ClinicService};
use crate::codes::{CodeFile, CodeService};
use crate::config::AdminConfig;
use crate::constants::USER_ROLE;
use crate::groups::GroupHierarchy;
use crate::lookup::{Lookup, NotFound};
use crate::repository::Repository;
use crate::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The authenticated identity and its claims.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPrincipal {
    pub id: String,
    pub user_name: String,
    pub display_name: Option<String>,
    pub group_code: String,
    pub roles: Vec<String>,
}

impl UserPrincipal {
    /// The display name, falling back to the login name.
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.user_name)
    }

    pub fn is_in_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

/// Looks users up by login name.
pub trait UserDirectory: Send + Sync {
    fn find_by_name(&self, user_name: &str) -> Option<UserPrincipal>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Vec<UserPrincipal>,
}

impl InMemoryUserDirectory {
    pub fn new(users: Vec<UserPrincipal>) -> Self {
        Self { users }
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn find_by_name(&self, user_name: &str) -> Option<UserPrincipal> {
        self.users
            .iter()
            .find(|u| u.user_name.eq_ignore_ascii_case(user_name))
            .cloned()
    }
}

/// Organisational level derived from the length of a user's GroupCode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupLevel {
    Initial,
    Manager,
    SectionManager,
    Director,
    Division,
}

impl GroupLevel {
    pub fn code(&self) -> &'static str {
        match self {
            GroupLevel::Initial => "1",
            GroupLevel::Manager => "2",
            GroupLevel::SectionManager => "3",
            GroupLevel::Director => "4",
            GroupLevel::Division => "5",
        }
    }
}

impl std::fmt::Display for GroupLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CacheService {
    config: AdminConfig,
    code_service: CodeService,
    user_clinics: MemoryCache<Vec<Clinic>>,
    registry: MemoryCache<Vec<String>>,
}

impl CacheService {
    pub fn new(
        config: AdminConfig,
        code_service: CodeService,
        user_clinics: MemoryCache<Vec<Clinic>>,
        registry: MemoryCache<Vec<String>>,
    ) -> Self {
        Self {
            config,
            code_service,
            user_clinics,
            registry,
        }
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub fn code_service(&self) -> &CodeService {
        &self.code_service
    }

    /// Adds every code file in `repository`, returning how many were cached.
    pub fn create_code_cache(&self, repository: &impl Repository<CodeFile>) -> AdminResult<usize> {
        let code_files = repository.get_all()?;
        for code_file in &code_files {
            self.code_service.add(code_file)?;
        }
        tracing::info!(code_files = code_files.len(), "created code cache");
        Ok(code_files.len())
    }

    /// Replaces every code file in `repository`, returning how many were refreshed.
    pub fn rebuild_code_cache(&self, repository: &impl Repository<CodeFile>) -> AdminResult<usize> {
        let code_files = repository.get_all()?;
        for code_file in &code_files {
            self.code_service.update(code_file)?;
        }
        tracing::info!(code_files = code_files.len(), "rebuilt code cache");
        Ok(code_files.len())
    }

    /// Stores `clinics` under `user_clinic_key` and records the key in the registry.
    pub fn add_user_clinic(&self, user_clinic_key: &str, clinics: Vec<Clinic>) {
        self.registry.alter(
            self.config.user_clinic_keys(),
            CacheEntryOptions::pinned(),
            |current| {
                let mut keys = current.unwrap_or_default();
                if !keys.iter().any(|k| k == user_clinic_key) {
                    keys.push(user_clinic_key.to_string());
                }
                Some(keys)
            },
        );
        tracing::debug!(key = user_clinic_key, clinics = clinics.len(), "cached user clinics");
        self.user_clinics
            .set_with(user_clinic_key, clinics, CacheEntryOptions::pinned());
    }

    pub fn user_clinics(&self, user_clinic_key: &str) -> Option<Vec<Clinic>> {
        self.user_clinics.try_get(user_clinic_key)
    }

    pub fn user_clinic_keys(&self) -> Vec<String> {
        self.registry
            .try_get(self.config.user_clinic_keys())
            .unwrap_or_default()
    }

    /// Drops every per-user clinic list and the registry itself, returning how many lists were
    /// removed.
    pub fn clear_user_clinics(&self) -> usize {
        let keys = self
            .registry
            .remove(self.config.user_clinic_keys())
            .unwrap_or_default();
        let removed = keys
            .iter()
            .filter(|key| self.user_clinics.remove(key).is_some())
            .count();
        tracing::info!(removed, "cleared user clinics");
        removed
    }
}

/// A user together with the clinics their group covers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUser {
    pub principal: UserPrincipal,
    pub clinics: Vec<Clinic>,
}

#[derive(Clone)]
pub struct UserResolverService {
    hierarchy: Arc<GroupHierarchy>,
    clinic_service: ClinicService,
    cache_service: CacheService,
    directory: Arc<dyn UserDirectory>,
}

impl UserResolverService {
    pub fn new(
        hierarchy: Arc<GroupHierarchy>,
        clinic_service: ClinicService,
        cache_service: CacheService,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            hierarchy,
            clinic_service,
            cache_service,
            directory,
        }
    }

    pub fn set_group_clinics(&self, group_code: &str, clinics: &mut Vec<Clinic>) -> AdminResult<()> {
        self.hierarchy
            .set_group_clinics(group_code, &self.clinic_service, clinics)
    }

    fn user_key(&self, user_id: &str) -> String {
        format!(
            "{}{}",
            self.cache_service.config().user_clinic_key_prefix(),
            user_id
        )
    }

    /// Clinics covered by `group_code`, cached per user until the registry is cleared.
    pub fn user_clinics(&self, user_id: &str, group_code: &str) -> AdminResult<Vec<Clinic>> {
        let key = self.user_key(user_id);
        if let Some(clinics) = self.cache_service.user_clinics(&key) {
            return Ok(clinics);
        }

        let mut clinics = Vec::new();
        self.set_group_clinics(group_code, &mut clinics)?;
        self.cache_service.add_user_clinic(&key, clinics.clone());
        Ok(clinics)
    }

    pub fn resolve_user(&self, user_name: &str) -> AdminResult<Lookup<ResolvedUser>> {
        let Some(principal) = self.directory.find_by_name(user_name) else {
            return Ok(Err(NotFound::new(format!("{user_name} 找不到使用者"))));
        };
        let clinics = self.user_clinics(&principal.id, &principal.group_code)?;
        Ok(Ok(ResolvedUser { principal, clinics }))
    }

    pub fn clinic_codes(&self, user: &UserPrincipal) -> AdminResult<Vec<String>> {
        Ok(self
            .clinic_code_names(user)?
            .into_iter()
            .map(|(code, _)| code)
            .collect())
    }

    /// `(code, name)` pairs of the user's clinics, in resolution order.
    pub fn clinic_code_names(&self, user: &UserPrincipal) -> AdminResult<Vec<(String, String)>> {
        Ok(self
            .user_clinics(&user.id, &user.group_code)?
            .into_iter()
            .map(|clinic| (clinic.code, clinic.name))
            .collect())
    }

    pub fn roles(&self, user: &UserPrincipal) -> Vec<String> {
        user.roles.clone()
    }

    /// Buckets the user's GroupCode length against the configured thresholds.
    ///
    /// Returns `None` when the code is shorter than every threshold.
    pub fn user_group_level(&self, user: &UserPrincipal) -> AdminResult<Option<GroupLevel>> {
        let thresholds = self
            .cache_service
            .config()
            .group_level_thresholds()
            .ok_or(AdminError::GroupLevelThresholdsNotConfigured)?;

        let length = user.group_code.chars().count();
        let level = if length >= thresholds.clinic() {
            if user.is_in_role(USER_ROLE) {
                Some(GroupLevel::Initial)
            } else {
                Some(GroupLevel::Manager)
            }
        } else if length >= thresholds.area() {
            Some(GroupLevel::SectionManager)
        } else if length >= thresholds.section() {
            Some(GroupLevel::Director)
        } else if length >= thresholds.division() {
            Some(GroupLevel::Division)
        } else {
            None
        };
        Ok(level)
    }

    /// Display name of the user logging in with `email`.
    ///
    /// Empty input gives an empty name; an unknown user gives `None`.
    pub fn display_name(&self, email: &str) -> Option<String> {
        if email.is_empty() {
            return Some(String::new());
        }
        self.directory
            .find_by_name(email)
            .map(|user| user.display_name().to_string())
    }

    /// Display name for `user_name` if the user is known, otherwise the input unchanged.
    pub fn user_name(&self, user_name: &str) -> String {
        if user_name.is_empty() {
            return String::new();
        }
        self.directory
            .find_by_name(user_name)
            .map(|user| user.display_name().to_string())
            .unwrap_or_else(|| user_name.to_string())
    }
}
