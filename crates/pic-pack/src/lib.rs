//! Sweep expansion, component labelling and bounded tile packing.

mod label;
mod library;
mod manifest;
mod pack;
mod plan;

pub use label::{default_precision, format_quantized, LabelField, LabelKey};
pub use library::{build_library, Library};
pub use manifest::{LayoutManifest, SweepEntry, SweepReport};
pub use pack::{pack, PackedLayout, Placement, Tile};
pub use plan::{SweepAxis, SweepPlan, SweepStrategy};
