#![deny(unsafe_code)]
//! Core pipeline for swatch, a named-color palette generator.
//!
//! Sweeps hue 0..360 at a fixed saturation/lightness, converts each hue to a
//! hex color (`color`), names it through a static dictionary (`dictionary`),
//! a persisted cache (`cache`, `store`) and a remote lookup (`resolver`),
//! and keeps one swatch per name (`palette`, `generator`). `session` wraps
//! the generator with cancellation for interactive front ends.

pub mod cache;
pub mod cancel;
pub mod color;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod generator;
pub mod palette;
pub mod params;
pub mod resolver;
pub mod session;
pub mod store;

pub use cache::NameCache;
pub use cancel::CancelToken;
pub use color::{hex_to_rgb, hsl_to_hex, HexColor, Rgb};
pub use config::Config;
pub use dictionary::NameDictionary;
pub use error::SwatchError;
pub use generator::{Lookup, PaletteGenerator, ResolveFailure, RunOutcome, RunState, SweepEvent};
pub use palette::{NameSource, Palette, Swatch};
pub use params::SwatchParams;
pub use resolver::{ColorApiResolver, NameResolver, Resolution};
pub use session::{Session, SessionView};
pub use store::{DurableStore, FileStore, MemoryStore};
