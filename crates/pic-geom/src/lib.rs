#![deny(missing_docs)]

//! Deterministic geometry builders producing ordered shape lists.
//!
//! Shapes are painted in list order: where two shapes overlap, the one
//! later in the list (higher `z_order`) decides the material.

mod bend;
mod component;
mod coupler;
mod ring;
mod shape;

pub use bend::{build_flat_bend, FLAT_BEND_CHAMFER};
pub use component::{Component, ComponentKind, Port};
pub use coupler::{build_directional_coupler, S_BEND_SEGMENTS};
pub use ring::{build_ring_bus, ring_bus_component};
pub use shape::{Material, PlacedShape, Shape, ShapeList};
