//! Lookup code cache.
//!
//! Reference codes arrive as a [`CodeFile`] header (category) owning many [`CodeDetail`] rows.
//! The service flattens them into [`Code`] entries and caches them twice:
//!
//! - the whole category under `ITEMTYPE.PARENTCODE.`
//! - each code under `ITEMTYPE.PARENTCODE.ITEMCODE`
//!
//! Every key component is upper-cased, so lookups are case-insensitive. Missing components
//! serialise to an empty segment.

use crate::cache::{CacheEntryOptions, MemoryCache};
use crate::constants::CODE_KEY_SEPARATOR;
use crate::lookup::{Lookup, NotFound};
use crate::repository::{Entity, Repository};
use crate::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A flattened lookup entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    pub item_type: String,
    pub parent_type: Option<String>,
    pub parent_code: Option<String>,
    pub item_code: String,
    pub description: String,
}

/// Backing-store header grouping the codes of one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeFile {
    pub id: i64,
    pub item_type: String,
    pub type_name: String,
    pub description: String,
    pub parent_type: Option<String>,
    pub parent_code: Option<String>,
    pub remark: Option<String>,
    pub code_details: Vec<CodeDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeDetail {
    pub id: i64,
    pub code_file_id: i64,
    pub item_code: String,
    pub description: String,
    pub is_banned: bool,
}

impl Entity for CodeFile {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl CodeFile {
    /// Flattens every detail row into a [`Code`].
    pub fn to_codes(&self) -> Vec<Code> {
        self.code_details
            .iter()
            .map(|detail| Code {
                item_type: self.item_type.clone(),
                parent_type: self.parent_type.clone(),
                parent_code: self.parent_code.clone(),
                item_code: detail.item_code.clone(),
                description: detail.description.clone(),
            })
            .collect()
    }
}

/// Builds the normalised cache key `ITEMTYPE.PARENTCODE.ITEMCODE`.
pub fn code_key(item_type: &str, parent_code: Option<&str>, item_code: &str) -> String {
    [item_type, parent_code.unwrap_or(""), item_code]
        .iter()
        .map(|part| part.to_uppercase())
        .collect::<Vec<_>>()
        .join(CODE_KEY_SEPARATOR)
}

fn not_found(key: &str) -> NotFound {
    NotFound::new(format!(
        "依據條件 item type.parent code.item code: {key} 無法找到對應的代碼"
    ))
}

#[derive(Debug, Clone, Default)]
pub struct CodeService {
    cache: MemoryCache<Vec<Code>>,
}

impl CodeService {
    pub fn new(cache: MemoryCache<Vec<Code>>) -> Self {
        Self { cache }
    }

    /// Builds a service over a fresh cache holding every code file in `repository`.
    pub fn create(repository: &impl Repository<CodeFile>) -> AdminResult<Self> {
        let service = Self::default();
        let code_files = repository.get_all()?;
        for code_file in &code_files {
            service.add(code_file)?;
        }
        tracing::info!(code_files = code_files.len(), "built code cache");
        Ok(service)
    }

    /// Caches the category list and every individual code of `code_file`.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::DuplicateItemCode` if two details share an item code (compared after
    /// normalisation), and `AdminError::InvalidInput` if a detail has a blank item code (its key
    /// would collide with the category key). Nothing is cached when an error is returned.
    pub fn add(&self, code_file: &CodeFile) -> AdminResult<()> {
        let parent_code = code_file.parent_code.as_deref();
        let codes = code_file.to_codes();

        let mut seen = HashSet::new();
        for code in &codes {
            if code.item_code.trim().is_empty() {
                return Err(AdminError::InvalidInput(format!(
                    "code file {} contains a detail with an empty item code",
                    code_file.item_type
                )));
            }
            if !seen.insert(code.item_code.to_uppercase()) {
                return Err(AdminError::DuplicateItemCode {
                    item_type: code_file.item_type.clone(),
                    parent_code: parent_code.unwrap_or_default().to_string(),
                    item_code: code.item_code.clone(),
                });
            }
        }

        for code in &codes {
            self.cache.set_with(
                code_key(&code_file.item_type, parent_code, &code.item_code),
                vec![code.clone()],
                CacheEntryOptions::pinned(),
            );
        }
        let category_key = code_key(&code_file.item_type, parent_code, "");
        tracing::debug!(key = %category_key, codes = codes.len(), "cached code file");
        self.cache
            .set_with(category_key, codes, CacheEntryOptions::pinned());

        Ok(())
    }

    /// Removes a category and every per-code entry it referenced. Absent categories are a no-op.
    pub fn remove(&self, item_type: &str, parent_code: Option<&str>) {
        let category_key = code_key(item_type, parent_code, "");
        if let Some(codes) = self.cache.remove(&category_key) {
            for code in &codes {
                self.cache
                    .remove(&code_key(item_type, parent_code, &code.item_code));
            }
            tracing::debug!(key = %category_key, codes = codes.len(), "removed code file");
        }
    }

    pub fn remove_code_file(&self, code_file: &CodeFile) {
        self.remove(&code_file.item_type, code_file.parent_code.as_deref());
    }

    /// Replaces the cached category wholesale with `code_file`.
    pub fn update(&self, code_file: &CodeFile) -> AdminResult<()> {
        self.remove_code_file(code_file);
        self.add(code_file)
    }

    /// Looks up the description of a single code.
    ///
    /// The outer result reports a corrupt cache entry (more than one code under a per-code key);
    /// the inner lookup reports whether the code exists.
    pub fn get_description(
        &self,
        item_type: &str,
        item_code: &str,
        parent_code: Option<&str>,
    ) -> AdminResult<Lookup<String>> {
        let key = code_key(item_type, parent_code, item_code);
        match self.cache.try_get(&key) {
            Some(codes) => match codes.as_slice() {
                [code] => Ok(Ok(code.description.clone())),
                _ => Err(AdminError::AmbiguousCode {
                    count: codes.len(),
                    key,
                }),
            },
            None => Ok(Err(not_found(&key))),
        }
    }

    /// All codes of a category, sorted by item code.
    pub fn get_code_details(&self, item_type: &str, parent_code: Option<&str>) -> Lookup<Vec<Code>> {
        let key = code_key(item_type, parent_code, "");
        let mut codes = self.cache.try_get(&key).ok_or_else(|| not_found(&key))?;
        codes.sort_by(|a, b| a.item_code.cmp(&b.item_code));
        Ok(codes)
    }

    /// All codes of a category as an item code → description map.
    pub fn get_details(
        &self,
        item_type: &str,
        parent_code: Option<&str>,
    ) -> Lookup<BTreeMap<String, String>> {
        self.get_code_details(item_type, parent_code).map(|codes| {
            codes
                .into_iter()
                .map(|code| (code.item_code, code.description))
                .collect()
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;

    pub(crate) fn code_file(item_type: &str, parent_code: Option<&str>, details: &[(&str, &str)]) -> CodeFile {
        CodeFile {
            item_type: item_type.into(),
            parent_code: parent_code.map(Into::into),
            code_details: details
                .iter()
                .map(|(code, description)| CodeDetail {
                    item_code: (*code).into(),
                    description: (*description).into(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn county_service() -> CodeService {
        let service = CodeService::default();
        service
            .add(&code_file(
                "County",
                None,
                &[("01", "01 新北市"), ("00", "00 台北市")],
            ))
            .unwrap();
        service
    }

    #[test]
    fn test_code_key_uppercases_components() {
        assert_eq!(code_key("county", None, ""), "COUNTY..");
        assert_eq!(code_key("Realm", Some("ab"), "x1"), "REALM.AB.X1");
    }

    #[test]
    fn test_get_description_found() {
        let service = county_service();
        let description = service.get_description("County", "01", None).unwrap();
        assert_eq!(description.as_deref(), Ok("01 新北市"));
    }

    #[test]
    fn test_get_description_is_case_insensitive() {
        let service = county_service();
        let upper = service.get_description("COUNTY", "00", None).unwrap();
        let lower = service.get_description("county", "00", None).unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.as_deref(), Ok("00 台北市"));
    }

    #[test]
    fn test_get_description_not_found_names_key() {
        let service = county_service();
        let miss = service
            .get_description("County", "02", None)
            .unwrap()
            .expect_err("02 is not cached");
        assert!(miss.message().contains("COUNTY..02"));
    }

    #[test]
    fn test_get_description_with_parent_code() {
        let service = CodeService::default();
        service
            .add(&code_file("Realm", Some("01"), &[("235", "中和區")]))
            .unwrap();

        assert_eq!(
            service.get_description("realm", "235", Some("01")).unwrap().as_deref(),
            Ok("中和區")
        );
        assert!(service.get_description("Realm", "235", None).unwrap().is_err());
    }

    #[test]
    fn test_add_rejects_duplicate_item_codes() {
        let service = CodeService::default();
        let err = service
            .add(&code_file("County", None, &[("00", "a"), ("00", "b")]))
            .expect_err("duplicates must fail");
        assert!(matches!(err, AdminError::DuplicateItemCode { item_code, .. } if item_code == "00"));
        // Nothing was cached.
        assert!(service.get_code_details("County", None).is_err());
    }

    #[test]
    fn test_add_rejects_empty_item_code() {
        let service = CodeService::default();
        let err = service
            .add(&code_file("County", None, &[("", "blank")]))
            .expect_err("blank item code must fail");
        assert!(matches!(err, AdminError::InvalidInput(_)));
    }

    #[test]
    fn test_get_description_ambiguous_entry_is_fatal() {
        let cache = MemoryCache::new();
        let service = CodeService::new(cache.clone());
        let code = Code {
            item_type: "County".into(),
            parent_type: None,
            parent_code: None,
            item_code: "00".into(),
            description: "x".into(),
        };
        cache.set("COUNTY..00", vec![code.clone(), code]);

        let err = service
            .get_description("County", "00", None)
            .expect_err("two codes under one key");
        assert!(matches!(err, AdminError::AmbiguousCode { count: 2, .. }));
    }

    #[test]
    fn test_get_code_details_sorted() {
        let service = county_service();
        let codes = service.get_code_details("county", None).unwrap();
        let item_codes: Vec<_> = codes.iter().map(|c| c.item_code.as_str()).collect();
        assert_eq!(item_codes, vec!["00", "01"]);
    }

    #[test]
    fn test_get_details_map() {
        let service = county_service();
        let details = service.get_details("County", None).unwrap();
        assert_eq!(details.get("00").map(String::as_str), Some("00 台北市"));
        assert_eq!(details.len(), 2);
        assert!(service.get_details("Unknown", None).is_err());
    }

    #[test]
    fn test_remove_clears_category_and_items() {
        let service = county_service();
        service.remove("County", None);

        assert!(service.get_code_details("County", None).is_err());
        assert!(service.get_description("County", "00", None).unwrap().is_err());

        // Removing again is a no-op.
        service.remove("County", None);
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let service = county_service();
        service
            .update(&code_file("County", None, &[("02", "02 桃園市")]))
            .unwrap();

        let codes = service.get_code_details("County", None).unwrap();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].item_code, "02");
        assert!(service.get_description("County", "00", None).unwrap().is_err());
        assert!(service.get_description("County", "01", None).unwrap().is_err());
    }

    #[test]
    fn test_create_from_repository() {
        let repository = InMemoryRepository::new(vec![
            code_file("County", None, &[("00", "00 台北市")]),
            code_file("Realm", Some("00"), &[("100", "中正區")]),
        ]);
        let service = CodeService::create(&repository).unwrap();
        assert!(service.get_code_details("County", None).is_ok());
        assert_eq!(
            service.get_description("Realm", "100", Some("00")).unwrap().as_deref(),
            Ok("中正區")
        );
    }

    struct FailingRepository;

    impl Repository<CodeFile> for FailingRepository {
        fn get_all(&self) -> AdminResult<Vec<CodeFile>> {
            Err(AdminError::Repository("database offline".into()))
        }

        fn find(&self, _id: &i64) -> AdminResult<Option<CodeFile>> {
            Err(AdminError::Repository("database offline".into()))
        }
    }

    #[test]
    fn test_create_propagates_repository_failure() {
        let err = CodeService::create(&FailingRepository).expect_err("should fail");
        assert!(matches!(err, AdminError::Repository(_)));
    }
}
