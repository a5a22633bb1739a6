//! Backing-store seam.
//!
//! The services never talk to a database directly. They read rows through [`Repository`], which a
//! deployment implements over its real store. [`InMemoryRepository`] backs tests and the CLI, and
//! [`SeedData`] fills one from a YAML seed file.

use crate::address::Address;
use crate::clinics::Clinic;
use crate::codes::CodeFile;
use crate::groups::Group;
use crate::users::{InMemoryUserDirectory, UserPrincipal};
use crate::{AdminError, AdminResult};
use serde::Deserialize;
use std::path::Path;

/// A row with a business or surrogate key.
pub trait Entity {
    type Id: PartialEq + ?Sized;

    fn id(&self) -> &Self::Id;
}

/// Read access to a collection of entities.
pub trait Repository<T: Entity> {
    fn get_all(&self) -> AdminResult<Vec<T>>;

    fn find(&self, id: &T::Id) -> AdminResult<Option<T>>;
}

/// A repository over an owned `Vec`, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository<T> {
    items: Vec<T>,
}

impl<T> InMemoryRepository<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Entity + Clone> Repository<T> for InMemoryRepository<T> {
    fn get_all(&self) -> AdminResult<Vec<T>> {
        Ok(self.items.clone())
    }

    fn find(&self, id: &T::Id) -> AdminResult<Option<T>> {
        Ok(self.items.iter().find(|item| item.id() == id).cloned())
    }
}

/// Reference data loaded from a YAML seed file.
///
/// ```yaml
/// code_files:
///   - id: 1
///     item_type: County
///     code_details:
///       - { item_code: "00", description: "00 台北市" }
/// clinics:
///   - { id: 1, code: "0001", name: "Test 2" }
/// groups:
///   - { code: "01", name: "North" }
///   - { code: "0101", parent_code: "01", clinic_code: "0001" }
/// addresses:
///   - { id: 1, zip: "235", county: "新北市", realm: "中和區", street: "中正路" }
/// users:
///   - { id: "u1", user_name: "amy@example.com", group_code: "01", roles: [Admin] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub code_files: Vec<CodeFile>,
    pub clinics: Vec<Clinic>,
    pub groups: Vec<Group>,
    pub addresses: Vec<Address>,
    pub users: Vec<UserPrincipal>,
}

impl SeedData {
    pub fn from_yaml_str(contents: &str) -> AdminResult<Self> {
        serde_yaml::from_str(contents).map_err(AdminError::YamlDeserialization)
    }

    pub fn load(path: &Path) -> AdminResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(AdminError::SeedRead)?;
        let seed = Self::from_yaml_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            code_files = seed.code_files.len(),
            clinics = seed.clinics.len(),
            groups = seed.groups.len(),
            addresses = seed.addresses.len(),
            users = seed.users.len(),
            "loaded seed data"
        );
        Ok(seed)
    }

    pub fn code_file_repository(&self) -> InMemoryRepository<CodeFile> {
        InMemoryRepository::new(self.code_files.clone())
    }

    pub fn clinic_repository(&self) -> InMemoryRepository<Clinic> {
        InMemoryRepository::new(self.clinics.clone())
    }

    pub fn group_repository(&self) -> InMemoryRepository<Group> {
        InMemoryRepository::new(self.groups.clone())
    }

    pub fn address_repository(&self) -> InMemoryRepository<Address> {
        InMemoryRepository::new(self.addresses.clone())
    }

    pub fn user_directory(&self) -> InMemoryUserDirectory {
        InMemoryUserDirectory::new(self.users.clone())
    }
}
