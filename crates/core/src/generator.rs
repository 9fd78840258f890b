//! Hue-sweep palette generation.
//!
//! For each hue 0..360 in ascending order the generator converts
//! (hue, saturation, lightness) to a hex color, resolves a name through the
//! dictionary, then the cache, then the remote resolver, and keeps the first
//! hue that produced each name. A resolver failure skips only that hue.
//!
//! The resolver call and the cache write are the run's suspension points;
//! the [`CancelToken`] is checked around each of them.

use crate::cache::NameCache;
use crate::cancel::CancelToken;
use crate::color::{hsl_to_hex, HexColor};
use crate::config::Config;
use crate::dictionary::NameDictionary;
use crate::error::SwatchError;
use crate::palette::{NameSource, Palette, Swatch};
use crate::params::SwatchParams;
use crate::resolver::{ColorApiResolver, NameResolver};
use crate::store::FileStore;
use serde::Serialize;
use std::sync::Arc;

/// Number of integer hues swept per run.
pub const HUE_COUNT: u16 = 360;

/// Lifecycle of a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Idle,
    Sweeping,
    Settled,
    /// Superseded before settling. Absorbing.
    Cancelled,
}

/// A resolved name plus the RGB display string to show with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub name: String,
    pub rgb: String,
    pub source: NameSource,
}

/// A hue whose name could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveFailure {
    pub hue: u16,
    pub hex: HexColor,
    pub message: String,
}

/// Progress reported while a run sweeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepEvent {
    /// A new, non-duplicate swatch was discovered.
    Swatch(Swatch),
    /// A remote lookup failed; the hue was skipped.
    Failed(ResolveFailure),
}

/// Result of one sweep.
///
/// When `state` is `Cancelled` the palette is partial and belongs to a
/// superseded run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub palette: Palette,
    pub failures: Vec<ResolveFailure>,
    pub state: RunState,
}

/// Drives the three-tier name resolution over a full hue sweep.
pub struct PaletteGenerator {
    dictionary: Arc<NameDictionary>,
    cache: Arc<NameCache>,
    resolver: Arc<dyn NameResolver>,
}

impl PaletteGenerator {
    pub fn new(
        dictionary: Arc<NameDictionary>,
        cache: Arc<NameCache>,
        resolver: Arc<dyn NameResolver>,
    ) -> Self {
        Self {
            dictionary,
            cache,
            resolver,
        }
    }

    /// Wires up the dictionary, file-backed cache, and HTTP resolver that
    /// `config` describes.
    pub fn from_config(config: &Config) -> Result<Self, SwatchError> {
        let dictionary = match &config.dictionary_path {
            Some(path) => NameDictionary::load(path)?,
            None => NameDictionary::builtin(),
        };
        let cache = NameCache::load(FileStore::new(&config.cache_path));
        let resolver = ColorApiResolver::new(config.endpoint.clone(), config.timeout());
        Ok(Self::new(
            Arc::new(dictionary),
            Arc::new(cache),
            Arc::new(resolver),
        ))
    }

    pub fn cache(&self) -> &NameCache {
        &self.cache
    }

    /// Resolves a name: dictionary first, then cache, then the resolver.
    ///
    /// A remote result is written into the cache before returning. Failing
    /// to persist it is logged, not returned; the name is still usable.
    pub fn lookup(&self, hex: HexColor) -> Result<Lookup, SwatchError> {
        if let Some(name) = self.dictionary.get(&hex) {
            log::debug!("{hex}: dictionary hit '{name}'");
            return Ok(Lookup {
                name: name.to_string(),
                rgb: hex.rgb().to_string(),
                source: NameSource::Dictionary,
            });
        }
        if let Some(name) = self.cache.get(&hex) {
            log::debug!("{hex}: cache hit '{name}'");
            return Ok(Lookup {
                name,
                rgb: hex.rgb().to_string(),
                source: NameSource::Cache,
            });
        }

        let resolution = self.resolver.resolve(&hex)?;
        if let Err(e) = self.cache.put(hex, &resolution.name) {
            log::warn!("{hex}: could not persist cached name: {e}");
        }
        Ok(Lookup {
            name: resolution.name,
            rgb: resolution.rgb,
            source: NameSource::Remote,
        })
    }

    /// Sweeps every hue for `params`, reporting progress through `on_event`.
    ///
    /// Once `token` is cancelled no further events are emitted and the
    /// sweep stops; a cache write already under way is allowed to finish.
    pub fn generate<F>(&self, params: SwatchParams, token: &CancelToken, mut on_event: F) -> RunOutcome
    where
        F: FnMut(SweepEvent),
    {
        let (saturation, lightness) = params.fractions();
        let mut palette = Palette::new();
        let mut failures = Vec::new();
        log::info!(
            "sweeping {HUE_COUNT} hues at saturation {}%, lightness {}%",
            params.saturation(),
            params.lightness()
        );

        for hue in 0..HUE_COUNT {
            if token.is_cancelled() {
                return cancelled(palette, failures, hue);
            }
            let hex = hsl_to_hex(hue, saturation, lightness);
            let result = self.lookup(hex);
            if token.is_cancelled() {
                return cancelled(palette, failures, hue);
            }

            let lookup = match result {
                Ok(lookup) => lookup,
                Err(e) => {
                    log::error!("failed to fetch name for {hex}: {e}");
                    let failure = ResolveFailure {
                        hue,
                        hex,
                        message: e.to_string(),
                    };
                    on_event(SweepEvent::Failed(failure.clone()));
                    failures.push(failure);
                    continue;
                }
            };

            if palette.contains(&lookup.name) {
                log::debug!("{hex} (hue {hue}) repeats '{}'", lookup.name);
                continue;
            }
            let swatch = Swatch {
                name: lookup.name,
                rgb: lookup.rgb,
                hex,
                hue,
                source: lookup.source,
            };
            palette.insert(swatch.clone());
            on_event(SweepEvent::Swatch(swatch));
        }

        log::info!(
            "sweep settled: {} swatches, {} failed hues",
            palette.len(),
            failures.len()
        );
        RunOutcome {
            palette,
            failures,
            state: RunState::Settled,
        }
    }
}

fn cancelled(palette: Palette, failures: Vec<ResolveFailure>, hue: u16) -> RunOutcome {
    log::info!("sweep cancelled at hue {hue}");
    RunOutcome {
        palette,
        failures,
        state: RunState::Cancelled,
    }
}
