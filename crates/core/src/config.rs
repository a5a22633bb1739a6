//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the services. Nothing
//! in this crate reads environment variables while serving a request.

use crate::constants::{DEFAULT_USER_CLINIC_KEYS, DEFAULT_USER_CLINIC_KEY_PREFIX};
use crate::{AdminError, AdminResult};

/// Minimum GroupCode lengths for the four deepest organisational levels.
///
/// A GroupCode at least `clinic` long is a clinic-level account, at least `area` long an area
/// manager, at least `section` long a section head and at least `division` long a division
/// head. Thresholds must be strictly descending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupLevelThresholds {
    clinic: usize,
    area: usize,
    section: usize,
    division: usize,
}

impl GroupLevelThresholds {
    /// Thresholds keyed on GroupCode lengths 8/6/4/2.
    pub const LENGTH_8_6_4_2: Self = Self {
        clinic: 8,
        area: 6,
        section: 4,
        division: 2,
    };

    /// Thresholds keyed on GroupCode lengths 10/8/6/2.
    pub const LENGTH_10_8_6_2: Self = Self {
        clinic: 10,
        area: 8,
        section: 6,
        division: 2,
    };

    pub fn new(clinic: usize, area: usize, section: usize, division: usize) -> AdminResult<Self> {
        if division == 0 {
            return Err(AdminError::InvalidConfig(
                "group level thresholds must be positive".into(),
            ));
        }
        if !(clinic > area && area > section && section > division) {
            return Err(AdminError::InvalidConfig(format!(
                "group level thresholds must be strictly descending, got {clinic},{area},{section},{division}"
            )));
        }
        Ok(Self {
            clinic,
            area,
            section,
            division,
        })
    }

    /// Parses `"8,6,4,2"` style input.
    pub fn parse(value: &str) -> AdminResult<Self> {
        let parts = value
            .split(',')
            .map(|p| {
                p.trim().parse::<usize>().map_err(|_| {
                    AdminError::InvalidConfig(format!("invalid group level threshold: {p:?}"))
                })
            })
            .collect::<AdminResult<Vec<usize>>>()?;

        match parts.as_slice() {
            [clinic, area, section, division] => Self::new(*clinic, *area, *section, *division),
            _ => Err(AdminError::InvalidConfig(format!(
                "expected four group level thresholds, got {}",
                parts.len()
            ))),
        }
    }

    pub fn clinic(&self) -> usize {
        self.clinic
    }

    pub fn area(&self) -> usize {
        self.area
    }

    pub fn section(&self) -> usize {
        self.section
    }

    pub fn division(&self) -> usize {
        self.division
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct AdminConfig {
    user_clinic_keys: String,
    user_clinic_key_prefix: String,
    group_level_thresholds: Option<GroupLevelThresholds>,
}

impl AdminConfig {
    pub fn new(
        user_clinic_keys: String,
        user_clinic_key_prefix: String,
        group_level_thresholds: Option<GroupLevelThresholds>,
    ) -> AdminResult<Self> {
        if user_clinic_keys.trim().is_empty() {
            return Err(AdminError::InvalidConfig(
                "user_clinic_keys cannot be empty".into(),
            ));
        }
        if user_clinic_key_prefix.trim().is_empty() {
            return Err(AdminError::InvalidConfig(
                "user_clinic_key_prefix cannot be empty".into(),
            ));
        }
        // A per-user key must never collide with the registry key itself.
        if user_clinic_keys.starts_with(&user_clinic_key_prefix) {
            return Err(AdminError::InvalidConfig(
                "user_clinic_keys must not start with user_clinic_key_prefix".into(),
            ));
        }

        Ok(Self {
            user_clinic_keys,
            user_clinic_key_prefix,
            group_level_thresholds,
        })
    }

    /// Build a config from optional raw values, as read by a binary from its environment.
    ///
    /// Missing or blank values fall back to the defaults in [`crate::constants`]; the
    /// thresholds have no default and stay unset when absent.
    pub fn from_env_values(
        user_clinic_keys: Option<String>,
        user_clinic_key_prefix: Option<String>,
        group_level_thresholds: Option<String>,
    ) -> AdminResult<Self> {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let thresholds = non_blank(group_level_thresholds)
            .map(|v| GroupLevelThresholds::parse(&v))
            .transpose()?;

        Self::new(
            non_blank(user_clinic_keys).unwrap_or_else(|| DEFAULT_USER_CLINIC_KEYS.into()),
            non_blank(user_clinic_key_prefix)
                .unwrap_or_else(|| DEFAULT_USER_CLINIC_KEY_PREFIX.into()),
            thresholds,
        )
    }

    pub fn user_clinic_keys(&self) -> &str {
        &self.user_clinic_keys
    }

    pub fn user_clinic_key_prefix(&self) -> &str {
        &self.user_clinic_key_prefix
    }

    pub fn group_level_thresholds(&self) -> Option<GroupLevelThresholds> {
        self.group_level_thresholds
    }

    pub fn with_group_level_thresholds(mut self, thresholds: GroupLevelThresholds) -> Self {
        self.group_level_thresholds = Some(thresholds);
        self
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            user_clinic_keys: DEFAULT_USER_CLINIC_KEYS.into(),
            user_clinic_key_prefix: DEFAULT_USER_CLINIC_KEY_PREFIX.into(),
            group_level_thresholds: None,
        }
    }
}
