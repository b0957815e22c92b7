// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Graph construction options.

use crate::index_map::CachedMaps;

/// Default tolerance below which a dihedral transition counts as smooth.
pub const DEFAULT_SMOOTH_TOLERANCE_DEG: f64 = 3.0;

/// Options used when building an [`Aag`](crate::Aag).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AagConfig {
    /// Classify near-tangent transitions as smooth rather than convex or
    /// concave.
    pub allow_smooth: bool,
    /// Angular tolerance for smooth transitions, in radians.
    pub smooth_tolerance: f64,
    /// Index caches to build together with the graph.
    pub cached_maps: CachedMaps,
}

impl Default for AagConfig {
    fn default() -> Self {
        Self {
            allow_smooth: false,
            smooth_tolerance: DEFAULT_SMOOTH_TOLERANCE_DEG.to_radians(),
            cached_maps: CachedMaps::NONE,
        }
    }
}

impl AagConfig {
    /// Enables smooth classification with the given tolerance in radians.
    pub fn with_smooth(mut self, tolerance: f64) -> Self {
        self.allow_smooth = true;
        self.smooth_tolerance = tolerance;
        self
    }

    pub fn with_cached_maps(mut self, cached_maps: CachedMaps) -> Self {
        self.cached_maps = cached_maps;
        self
    }

    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset or unparsable.
    ///
    /// - `AAG_ALLOW_SMOOTH`: `true`/`false`/`1`/`0`
    /// - `AAG_SMOOTH_TOLERANCE_DEG`: tolerance in degrees
    /// - `AAG_CACHED_MAPS`: comma-separated cache names, see [`CachedMaps::parse_list`]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            allow_smooth: std::env::var("AAG_ALLOW_SMOOTH")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.allow_smooth),
            smooth_tolerance: std::env::var("AAG_SMOOTH_TOLERANCE_DEG")
                .ok()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|deg| deg.is_finite() && *deg >= 0.0)
                .map(f64::to_radians)
                .unwrap_or(defaults.smooth_tolerance),
            cached_maps: std::env::var("AAG_CACHED_MAPS")
                .map(|v| CachedMaps::parse_list(&v))
                .unwrap_or(defaults.cached_maps),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
