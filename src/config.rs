//! Configuration for model extraction and model caches.
//!
//! Both structs use the builder pattern via `typed-builder`; every field has
//! a documented default, so `Config::builder().build()` is always valid.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use typed_builder::TypedBuilder;

/// Whether members become properties unless excluded, or only when included.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Inclusion {
    /// Only members carrying an inclusion marker or property metadata.
    OptIn,
    /// Every eligible member except those carrying an exclusion marker.
    #[default]
    OptOut,
}

/// Configuration for a [`ModelFactory`](crate::engine::ModelFactory).
///
/// # Examples
///
/// ```
/// use specular::config::{FactoryConfig, Inclusion};
///
/// let config = FactoryConfig::builder()
///     .default_inclusion(Inclusion::OptIn)
///     .include_functions(false)
///     .build();
/// ```
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct FactoryConfig {
    /// Inclusion policy for types that don't choose one with `model(inclusion = ..)`
    #[builder(default)]
    pub default_inclusion: Inclusion,

    /// Initial capacity of a model's property map
    #[builder(default = 16)]
    pub property_capacity: usize,

    /// Initial capacity of attribute containers
    #[builder(default = 8)]
    pub attribute_capacity: usize,

    /// Whether functions marked `factory` become factory variants
    #[builder(default = true)]
    pub include_functions: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Configuration for a [`ModelCache`](crate::cache::ModelCache).
///
/// Usage tracking is off by default. With it on, every successful lookup
/// counts a hit against the entry, and [`ModelCache::optimize`] can prune
/// rarely used entries.
///
/// [`ModelCache::optimize`]: crate::cache::ModelCache::optimize
///
/// # Examples
///
/// ```
/// use specular::config::CacheConfig;
///
/// let config = CacheConfig::builder()
///     .track_usage(true)
///     .removal_threshold(Some(2))
///     .optimization_hit_threshold(Some(1000))
///     .build();
/// ```
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct CacheConfig {
    /// Initial capacity of the backing store
    #[builder(default = 8)]
    pub capacity: usize,

    /// Count hits per entry
    #[builder(default = false)]
    pub track_usage: bool,

    /// Entries with fewer hits than this are culled by an optimize pass
    #[builder(default = None)]
    pub removal_threshold: Option<u64>,

    /// Run an optimize pass automatically after this many hits
    #[builder(default = None)]
    pub optimization_hit_threshold: Option<u64>,
}

impl CacheConfig {
    /// A usage-tracking configuration with the given removal threshold.
    pub fn usage_aware(removal_threshold: u64) -> Self {
        Self::builder()
            .track_usage(true)
            .removal_threshold(Some(removal_threshold))
            .build()
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
