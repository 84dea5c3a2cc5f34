#![deny(missing_docs)]
#![doc = "Core types, configuration and error surface shared by the PIC design toolkit."]

pub mod canonical;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod provenance;
mod types;

pub use canonical::{
    from_json_slice, stable_hash_string, to_canonical_json_bytes, to_canonical_json_pretty,
};
pub use config::{
    DomainConfig, GeometryDefaults, LiveConfig, PackingConfig, PathStyle, PhysicsConfig,
    SimConfig,
};
pub use errors::{ErrorInfo, PicError};
pub use geometry::{BBox, Vec2};
pub use provenance::{RunProvenance, SchemaVersion};
pub use types::{ParameterName, ParameterSet};

/// Floor applied to every flux-derived denominator.
pub const POWER_FLOOR: f64 = 1e-12;
