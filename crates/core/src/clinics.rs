//! Clinic cache.
//!
//! One entry per clinic under `Clinic_<CODE>`. Decrypted credentials are computed once when the
//! cache is built and live only in memory.

use crate::cache::{CacheEntryOptions, MemoryCache};
use crate::constants::CLINIC_KEY_PREFIX;
use crate::crypto::{encode_base64, CredentialDecryptor};
use crate::lookup::{Lookup, NotFound};
use crate::repository::{Entity, Repository};
use crate::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clinic {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub database: Option<String>,
    pub database_user: Option<String>,
    #[serde(with = "crate::crypto::base64_bytes")]
    pub encrypt_database_password: Option<Vec<u8>>,
    /// Plaintext (or base64 in degraded mode) credential. Never persisted.
    #[serde(skip)]
    pub database_password: Option<String>,
}

impl Entity for Clinic {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

pub fn clinic_key(code: &str) -> String {
    format!("{CLINIC_KEY_PREFIX}{}", code.to_uppercase())
}

#[derive(Clone, Default)]
pub struct ClinicService {
    cache: MemoryCache<Clinic>,
    decryptor: Option<Arc<dyn CredentialDecryptor>>,
}

impl std::fmt::Debug for ClinicService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClinicService")
            .field("clinics", &self.cache.len())
            .field("decryptor", &self.decryptor.is_some())
            .finish()
    }
}

impl ClinicService {
    pub fn new(cache: MemoryCache<Clinic>) -> Self {
        Self {
            cache,
            decryptor: None,
        }
    }

    pub fn with_decryptor(mut self, decryptor: Arc<dyn CredentialDecryptor>) -> Self {
        self.decryptor = Some(decryptor);
        self
    }

    pub fn add(&self, clinic: Clinic) {
        let key = clinic_key(&clinic.code);
        tracing::debug!(%key, "cached clinic");
        self.cache.set_with(key, clinic, CacheEntryOptions::pinned());
    }

    pub fn update(&self, clinic: Clinic) {
        self.remove(&clinic.code);
        self.add(clinic);
    }

    pub fn remove(&self, code: &str) {
        if self.cache.remove(&clinic_key(code)).is_some() {
            tracing::debug!(code, "removed clinic");
        }
    }

    pub fn get(&self, code: &str) -> Lookup<Clinic> {
        self.cache
            .try_get(&clinic_key(code))
            .ok_or_else(|| NotFound::new(format!("{code} 找不到機構資料")))
    }

    /// Loads every clinic from `repository`, resolving credentials, and caches it.
    ///
    /// Returns the number of clinics cached.
    pub fn create_clinic_cache(&self, repository: &impl Repository<Clinic>) -> AdminResult<usize> {
        let clinics = repository.get_all()?;
        let count = clinics.len();
        for mut clinic in clinics {
            clinic.database_password = self.resolve_password(&clinic)?;
            self.add(clinic);
        }
        tracing::info!(clinics = count, "built clinic cache");
        Ok(count)
    }

    fn resolve_password(&self, clinic: &Clinic) -> AdminResult<Option<String>> {
        let bytes = match clinic.encrypt_database_password.as_deref() {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Ok(None),
        };

        match &self.decryptor {
            Some(decryptor) => decryptor
                .decrypt_string(bytes)
                .map(Some)
                .map_err(|source| AdminError::Decrypt {
                    clinic: clinic.code.clone(),
                    source,
                }),
            None => {
                tracing::warn!(
                    clinic = %clinic.code,
                    "no credential decryptor configured, keeping password base64-encoded"
                );
                Ok(Some(encode_base64(bytes)))
            }
        }
    }
}
