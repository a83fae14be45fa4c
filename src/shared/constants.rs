/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 50;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Regular user role
pub const ROLE_USER: &str = "user";

/// Admin role
#[allow(dead_code)]
pub const ROLE_ADMIN: &str = "admin";
