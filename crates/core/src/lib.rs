//! # Clinic Admin Core
//!
//! In-memory cache layer for the clinic administration backend.
//!
//! This crate holds reference data close to the request path:
//! - Lookup codes keyed by item type, parent code and item code ([`CodeService`])
//! - Clinics keyed by business code ([`ClinicService`])
//! - Group tree resolution from a user's GroupCode to clinics ([`UserResolverService`])
//! - Address aggregates indexed by zip, county and realm ([`AddressService`])
//!
//! **No storage concerns**: rows are read through the [`repository::Repository`] seam; the crate
//! never writes back to a backing store.
//!
//! Queries return a [`lookup::Lookup`] when a miss is an expected outcome. Data-setup mistakes
//! (duplicate item codes, cyclic groups, missing configuration) surface as [`AdminError`].

pub mod address;
pub mod cache;
pub mod clinics;
pub mod codes;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod groups;
pub mod lookup;
pub mod repository;
pub mod users;

pub use address::{Address, AddressQueryResult, AddressService};
pub use cache::{CacheEntryOptions, CachePriority, MemoryCache};
pub use clinics::{Clinic, ClinicService};
pub use codes::{Code, CodeDetail, CodeFile, CodeService};
pub use config::{AdminConfig, GroupLevelThresholds};
pub use error::{AdminError, AdminResult};
pub use groups::{Group, GroupHierarchy};
pub use lookup::{Lookup, NotFound};
pub use repository::{InMemoryRepository, Repository, SeedData};
pub use users::{
    CacheService, GroupLevel, InMemoryUserDirectory, UserDirectory, UserPrincipal,
    UserResolverService,
};
