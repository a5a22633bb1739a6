//! Address index.
//!
//! Three independent indices (zip, county, realm) each map a keyword to an
//! [`AddressQueryResult`] aggregating every zip, county, realm and street seen alongside it.
//! Streets are the leaf granularity: the other three values only leave an aggregate once its
//! last street is gone.

use crate::cache::{CacheEntryOptions, MemoryCache};
use crate::lookup::{Lookup, NotFound};
use crate::repository::{Entity, Repository};
use crate::AdminResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub id: i64,
    pub zip: String,
    pub county: String,
    pub realm: String,
    pub street: String,
}

impl Entity for Address {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

/// Distinct values associated with one index keyword, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressQueryResult {
    pub zips: Vec<String>,
    pub counties: Vec<String>,
    pub realms: Vec<String>,
    pub streets: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressIndex {
    Zip,
    County,
    Realm,
}

impl AddressIndex {
    pub fn name(&self) -> &'static str {
        match self {
            AddressIndex::Zip => "Zip",
            AddressIndex::County => "County",
            AddressIndex::Realm => "Realm",
        }
    }

    fn key(&self, keyword: &str) -> String {
        format!("{}_{keyword}", self.name())
    }

    fn keyword<'a>(&self, address: &'a Address) -> &'a str {
        match self {
            AddressIndex::Zip => &address.zip,
            AddressIndex::County => &address.county,
            AddressIndex::Realm => &address.realm,
        }
    }
}

const INDICES: [AddressIndex; 3] = [AddressIndex::Zip, AddressIndex::County, AddressIndex::Realm];

fn add_item(items: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !items.iter().any(|item| item == value) {
        items.push(value.to_string());
    }
}

fn remove_item(items: &mut Vec<String>, value: &str) {
    if !value.is_empty() {
        items.retain(|item| item != value);
    }
}

impl AddressQueryResult {
    fn compose(&mut self, address: &Address) {
        add_item(&mut self.zips, &address.zip);
        add_item(&mut self.counties, &address.county);
        add_item(&mut self.realms, &address.realm);
        add_item(&mut self.streets, &address.street);
    }

    fn detach(&mut self, address: &Address) {
        remove_item(&mut self.streets, &address.street);
        if self.streets.is_empty() {
            remove_item(&mut self.zips, &address.zip);
            remove_item(&mut self.counties, &address.county);
            remove_item(&mut self.realms, &address.realm);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddressService {
    cache: MemoryCache<AddressQueryResult>,
}

impl AddressService {
    pub fn new(cache: MemoryCache<AddressQueryResult>) -> Self {
        Self { cache }
    }

    /// Builds a service over a fresh cache indexing every address in `repository`.
    pub fn create(repository: &impl Repository<Address>) -> AdminResult<Self> {
        let service = Self::default();
        let addresses = repository.get_all()?;
        for address in &addresses {
            service.add(address);
        }
        tracing::info!(addresses = addresses.len(), "built address index");
        Ok(service)
    }

    pub fn get_by_zip(&self, zip: &str) -> Lookup<AddressQueryResult> {
        self.get(AddressIndex::Zip, zip)
    }

    pub fn get_by_county(&self, county: &str) -> Lookup<AddressQueryResult> {
        self.get(AddressIndex::County, county)
    }

    pub fn get_by_realm(&self, realm: &str) -> Lookup<AddressQueryResult> {
        self.get(AddressIndex::Realm, realm)
    }

    pub fn get(&self, index: AddressIndex, keyword: &str) -> Lookup<AddressQueryResult> {
        self.cache.try_get(&index.key(keyword)).ok_or_else(|| {
            NotFound::new(format!("查詢 {} 的值: {keyword} 並未找到", index.name()))
        })
    }

    pub fn add(&self, address: &Address) {
        for index in INDICES {
            let keyword = index.keyword(address);
            if keyword.is_empty() {
                continue;
            }
            self.cache
                .alter(index.key(keyword), CacheEntryOptions::pinned(), |current| {
                    let mut result = current.unwrap_or_default();
                    result.compose(address);
                    Some(result)
                });
        }
        tracing::debug!(zip = %address.zip, street = %address.street, "indexed address");
    }

    pub fn remove(&self, address: &Address) {
        for index in INDICES {
            let keyword = index.keyword(address);
            if keyword.is_empty() {
                continue;
            }
            self.cache
                .alter(index.key(keyword), CacheEntryOptions::pinned(), |current| {
                    let mut result = current?;
                    result.detach(address);
                    if result.counties.is_empty() && result.zips.is_empty() {
                        None
                    } else {
                        Some(result)
                    }
                });
        }
        tracing::debug!(zip = %address.zip, street = %address.street, "removed address");
    }
}
