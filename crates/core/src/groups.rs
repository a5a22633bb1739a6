//! Organisational group tree.
//!
//! Groups reference their parent by code. Interior groups own child groups; leaf groups map to
//! exactly one clinic. Resolving a group to clinics walks the subtree depth first, in the order
//! children were loaded.

use crate::clinics::{Clinic, ClinicService};
use crate::repository::{Entity, Repository};
use crate::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub code: String,
    pub name: String,
    pub parent_code: Option<String>,
    pub clinic_code: Option<String>,
}

impl Entity for Group {
    type Id = str;

    fn id(&self) -> &str {
        &self.code
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupHierarchy {
    groups: HashMap<String, Group>,
    children: HashMap<String, Vec<String>>,
}

impl GroupHierarchy {
    pub fn from_groups(groups: Vec<Group>) -> AdminResult<Self> {
        let mut hierarchy = Self::default();
        for group in groups {
            if hierarchy.groups.contains_key(&group.code) {
                return Err(AdminError::InvalidInput(format!(
                    "duplicate group code {}",
                    group.code
                )));
            }
            if let Some(parent) = group.parent_code.as_deref().filter(|p| !p.is_empty()) {
                hierarchy
                    .children
                    .entry(parent.to_string())
                    .or_default()
                    .push(group.code.clone());
            }
            hierarchy.groups.insert(group.code.clone(), group);
        }
        Ok(hierarchy)
    }

    pub fn load(repository: &impl Repository<Group>) -> AdminResult<Self> {
        let hierarchy = Self::from_groups(repository.get_all()?)?;
        tracing::info!(groups = hierarchy.len(), "loaded group hierarchy");
        Ok(hierarchy)
    }

    pub fn get(&self, code: &str) -> Option<&Group> {
        self.groups.get(code)
    }

    pub fn children(&self, code: &str) -> &[String] {
        self.children.get(code).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Appends every clinic under `group_code` to `clinics`, skipping clinics already present
    /// (by id).
    ///
    /// An empty `group_code` is a no-op.
    ///
    /// # Errors
    ///
    /// - `AdminError::UnknownGroup` if `group_code` or any descendant is not in the hierarchy.
    /// - `AdminError::GroupCycle` if the walk reaches a group already on the current path.
    pub fn set_group_clinics(
        &self,
        group_code: &str,
        clinic_service: &ClinicService,
        clinics: &mut Vec<Clinic>,
    ) -> AdminResult<()> {
        if group_code.is_empty() {
            return Ok(());
        }
        let mut path = Vec::new();
        self.walk(group_code, clinic_service, clinics, &mut path)
    }

    fn walk(
        &self,
        group_code: &str,
        clinic_service: &ClinicService,
        clinics: &mut Vec<Clinic>,
        path: &mut Vec<String>,
    ) -> AdminResult<()> {
        if path.iter().any(|code| code == group_code) {
            let mut cycle = path.clone();
            cycle.push(group_code.to_string());
            return Err(AdminError::GroupCycle { path: cycle });
        }
        let group = self
            .groups
            .get(group_code)
            .ok_or_else(|| AdminError::UnknownGroup(group_code.to_string()))?;

        let children = self.children(group_code);
        if children.is_empty() {
            self.collect_leaf(group, clinic_service, clinics);
            return Ok(());
        }

        path.push(group_code.to_string());
        for child in children {
            self.walk(child, clinic_service, clinics, path)?;
        }
        path.pop();
        Ok(())
    }

    fn collect_leaf(&self, group: &Group, clinic_service: &ClinicService, clinics: &mut Vec<Clinic>) {
        let Some(clinic_code) = group.clinic_code.as_deref().filter(|c| !c.is_empty()) else {
            tracing::warn!(group = %group.code, "leaf group has no clinic code");
            return;
        };
        match clinic_service.get(clinic_code) {
            Ok(clinic) => {
                if !clinics.iter().any(|c| c.id == clinic.id) {
                    clinics.push(clinic);
                }
            }
            Err(miss) => {
                tracing::warn!(group = %group.code, clinic = clinic_code, "{}", miss);
            }
        }
    }
}
