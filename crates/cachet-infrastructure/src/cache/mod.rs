//! Cache providers
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CacheProvider`] | One configured [`Cache`](cachet_domain::Cache) and its backend lifecycle |
//! | [`CacheManager`] | Named registry of providers with collective shutdown |

pub mod manager;
pub mod provider;

pub use manager::CacheManager;
pub use provider::CacheProvider;
