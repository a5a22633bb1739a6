//! Constants used throughout the admin core crate.
//!
//! Cache key prefixes and default configuration values live here so that every service derives
//! keys the same way.

/// Default registry key listing every per-user clinic cache key.
pub const DEFAULT_USER_CLINIC_KEYS: &str = "UserClinicKeys";

/// Default prefix for per-user clinic cache keys.
pub const DEFAULT_USER_CLINIC_KEY_PREFIX: &str = "UserClinics_";

/// Prefix of clinic cache keys (`Clinic_<CODE>`).
pub const CLINIC_KEY_PREFIX: &str = "Clinic_";

/// Separator between code key components (`ITEMTYPE.PARENTCODE.ITEMCODE`).
pub const CODE_KEY_SEPARATOR: &str = ".";

/// Role name marking the lowest-level user within a clinic group.
pub const USER_ROLE: &str = "User";

/// Environment variable naming the registry key.
pub const ENV_USER_CLINIC_KEYS: &str = "ADMIN_USER_CLINIC_KEYS";

/// Environment variable naming the per-user key prefix.
pub const ENV_USER_CLINIC_KEY_PREFIX: &str = "ADMIN_USER_CLINIC_KEY_PREFIX";

/// Environment variable holding comma-separated group level thresholds, e.g. `8,6,4,2`.
pub const ENV_GROUP_LEVEL_THRESHOLDS: &str = "ADMIN_GROUP_LEVEL_THRESHOLDS";
