use std::cmp::Ordering;

use pic_core::{BBox, ErrorInfo, PicError, Vec2};
use pic_geom::{Component, ShapeList};
use serde::{Deserialize, Serialize};
use tracing::debug;

// Absorbs float noise from translating boxes onto shared edges.
const EDGE_EPS: f64 = 1e-9;

/// Component placed inside a tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// The placed component, in its own coordinates.
    pub component: Component,
    /// Translation from component to tile coordinates.
    pub offset: Vec2,
    /// Component bounds in tile coordinates.
    pub bbox: BBox,
}

impl Placement {
    /// Component shapes in tile coordinates.
    pub fn shapes(&self) -> ShapeList {
        self.component.shapes.translated(self.offset)
    }
}

/// One bounded packing region; its lower-left corner is the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Tile index, in creation order.
    pub index: usize,
    /// Placements in packing order.
    pub placements: Vec<Placement>,
}

/// Components packed into one or more bounded tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedLayout {
    /// Bound on each tile's width and height.
    pub max_tile_size: Vec2,
    /// Minimum clearance between neighbouring components.
    pub spacing: f64,
    /// Tiles in creation order.
    pub tiles: Vec<Tile>,
}

impl PackedLayout {
    /// Total number of placed components.
    pub fn len(&self) -> usize {
        self.tiles.iter().map(|tile| tile.placements.len()).sum()
    }

    /// True when nothing was packed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every placement, tile by tile.
    pub fn placements(&self) -> impl Iterator<Item = (&Tile, &Placement)> {
        self.tiles
            .iter()
            .flat_map(|tile| tile.placements.iter().map(move |p| (tile, p)))
    }

    /// Re-checks the packing invariants.
    ///
    /// Each placement grown by half the spacing must lie inside its tile, and
    /// no two grown placements may overlap, so neighbours are at least
    /// `spacing` apart.
    pub fn verify(&self) -> Result<(), PicError> {
        let bounds = BBox::new(Vec2::ZERO, self.max_tile_size).expand(EDGE_EPS);
        let half = self.spacing / 2.0 - EDGE_EPS;
        for tile in &self.tiles {
            for (i, a) in tile.placements.iter().enumerate() {
                let grown = a.bbox.expand(half);
                if !bounds.contains_box(&grown) {
                    return Err(PicError::Packing(
                        ErrorInfo::new("out-of-tile", "placement leaves its tile")
                            .with_context("label", &a.component.label)
                            .with_context("tile", tile.index),
                    ));
                }
                for b in &tile.placements[i + 1..] {
                    if grown.overlaps(&b.bbox.expand(half)) {
                        return Err(PicError::Packing(
                            ErrorInfo::new("overlap", "placements closer than the spacing")
                                .with_context("first", &a.component.label)
                                .with_context("second", &b.component.label)
                                .with_context("tile", tile.index),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

struct Cursor {
    tile: Tile,
    x: f64,
    shelf_y: f64,
    shelf_height: f64,
}

impl Cursor {
    fn new(index: usize) -> Self {
        Self {
            tile: Tile {
                index,
                placements: Vec::new(),
            },
            x: 0.0,
            shelf_y: 0.0,
            shelf_height: 0.0,
        }
    }
}

/// Packs components into tiles of at most `max_tile_size` with shelf packing.
///
/// Footprints are the component bounds plus `spacing` on each axis. Items
/// are taken in descending footprint height, ties kept in input order, and
/// laid left to right on shelves; a full shelf opens the next one above,
/// a full tile opens a new tile. The result depends only on the input order.
pub fn pack(
    components: Vec<Component>,
    max_tile_size: Vec2,
    spacing: f64,
) -> Result<PackedLayout, PicError> {
    if !(max_tile_size.is_finite() && max_tile_size.x > 0.0 && max_tile_size.y > 0.0) {
        return Err(PicError::Packing(
            ErrorInfo::new("invalid-tile", "tile size must be finite and positive")
                .with_context("width", max_tile_size.x)
                .with_context("height", max_tile_size.y),
        ));
    }
    if !(spacing.is_finite() && spacing >= 0.0) {
        return Err(PicError::Packing(
            ErrorInfo::new("invalid-spacing", "spacing must be finite and non-negative")
                .with_context("spacing", spacing),
        ));
    }

    let mut order = Vec::with_capacity(components.len());
    for (idx, component) in components.into_iter().enumerate() {
        let footprint = component.bbox().size() + Vec2::new(spacing, spacing);
        if footprint.x > max_tile_size.x || footprint.y > max_tile_size.y {
            return Err(PicError::Packing(
                ErrorInfo::new("component-too-large", "component plus spacing exceeds the tile")
                    .with_context("label", &component.label)
                    .with_context("footprint", format!("{}x{}", footprint.x, footprint.y))
                    .with_context("max_tile_size", format!("{}x{}", max_tile_size.x, max_tile_size.y)),
            ));
        }
        order.push((idx, footprint, component));
    }
    order.sort_by(|a, b| match b.1.y.total_cmp(&a.1.y) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });

    let mut tiles = Vec::new();
    let mut cursor = Cursor::new(0);
    for (_, footprint, component) in order {
        if cursor.x + footprint.x > max_tile_size.x {
            cursor.shelf_y += cursor.shelf_height;
            cursor.x = 0.0;
            cursor.shelf_height = 0.0;
        }
        if cursor.shelf_y + footprint.y > max_tile_size.y {
            let next = Cursor::new(cursor.tile.index + 1);
            tiles.push(std::mem::replace(&mut cursor, next).tile);
        }
        let bbox = component.bbox();
        let target = Vec2::new(cursor.x, cursor.shelf_y) + Vec2::new(spacing, spacing) * 0.5;
        let offset = target - bbox.min;
        debug!(
            label = %component.label,
            tile = cursor.tile.index,
            x = target.x,
            y = target.y,
            "placed component"
        );
        cursor.tile.placements.push(Placement {
            bbox: bbox.translate(offset),
            offset,
            component,
        });
        cursor.x += footprint.x;
        cursor.shelf_height = cursor.shelf_height.max(footprint.y);
    }
    if !cursor.tile.placements.is_empty() {
        tiles.push(cursor.tile);
    }

    Ok(PackedLayout {
        max_tile_size,
        spacing,
        tiles,
    })
}
