//! Host credentials for uprev.
//!
//! A [`HostRule`] is the canonical authentication record for one
//! platform/endpoint pair. Rules are registered with a [`CredentialStore`]
//! and looked up again by platform and host when talking to a platform API.

mod platform;
mod rule;
mod store;

pub use platform::{platform_info, platforms, PlatformInfo};
pub use rule::{host_of, HostQuery, HostRule};
pub use store::{CredentialStore, HostRuleError, HostRules};
