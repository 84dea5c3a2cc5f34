use pic_core::{BBox, PhysicsConfig, Vec2};
use serde::{Deserialize, Serialize};

/// Material painted by a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// High-index waveguide core.
    Core,
    /// Low-index cladding; also the simulation background.
    Cladding,
}

impl Material {
    /// Effective refractive index under the given optical constants.
    pub fn refractive_index(&self, physics: &PhysicsConfig) -> f64 {
        match self {
            Material::Core => physics.n_core,
            Material::Cladding => physics.n_clad,
        }
    }
}

/// Planar shape primitive in component coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Disk of the given radius.
    Cylinder {
        /// Disk centre.
        center: Vec2,
        /// Disk radius.
        radius: f64,
    },
    /// Axis-aligned rectangle.
    Block {
        /// Rectangle centre.
        center: Vec2,
        /// Full width and height.
        size: Vec2,
    },
    /// Simple polygon given by its vertices in order.
    Polygon {
        /// Vertex ring, implicitly closed.
        vertices: Vec<Vec2>,
    },
}

impl Shape {
    /// Tight axis-aligned bounds of the shape.
    pub fn bbox(&self) -> BBox {
        match self {
            Shape::Cylinder { center, radius } => {
                BBox::from_center(*center, Vec2::new(2.0 * radius, 2.0 * radius))
            }
            Shape::Block { center, size } => BBox::from_center(*center, *size),
            Shape::Polygon { vertices } => BBox::from_points(vertices.iter().copied())
                .unwrap_or_else(|| BBox::new(Vec2::ZERO, Vec2::ZERO)),
        }
    }

    /// True when `point` lies inside the shape or on its boundary.
    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            Shape::Cylinder { center, radius } => {
                let d = point - *center;
                d.x * d.x + d.y * d.y <= radius * radius
            }
            Shape::Block { center, size } => BBox::from_center(*center, *size).contains(point),
            Shape::Polygon { vertices } => polygon_contains(vertices, point),
        }
    }

    /// Shape shifted by `offset`.
    pub fn translated(&self, offset: Vec2) -> Shape {
        match self {
            Shape::Cylinder { center, radius } => Shape::Cylinder {
                center: *center + offset,
                radius: *radius,
            },
            Shape::Block { center, size } => Shape::Block {
                center: *center + offset,
                size: *size,
            },
            Shape::Polygon { vertices } => Shape::Polygon {
                vertices: vertices.iter().map(|v| *v + offset).collect(),
            },
        }
    }
}

// Even-odd ray cast towards +x.
fn polygon_contains(vertices: &[Vec2], point: Vec2) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (a, b) = (vertices[i], vertices[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shape tagged with its material and paint priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedShape {
    /// Geometry of the primitive.
    pub shape: Shape,
    /// Material painted inside the primitive.
    pub material: Material,
    /// Paint priority; higher values override lower ones where they overlap.
    pub z_order: u32,
}

/// Ordered shape sequence where the later shape wins inside overlaps.
///
/// `z_order` always equals the list position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeList {
    shapes: Vec<PlacedShape>,
}

impl ShapeList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a shape on top of everything emitted so far.
    pub fn push(&mut self, shape: Shape, material: Material) {
        let z_order = self.shapes.len() as u32;
        self.shapes.push(PlacedShape {
            shape,
            material,
            z_order,
        });
    }

    /// Shapes in paint order.
    pub fn as_slice(&self) -> &[PlacedShape] {
        &self.shapes
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True when nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Union of all shape bounds; `None` when the list is empty.
    pub fn bbox(&self) -> Option<BBox> {
        let mut iter = self.shapes.iter().map(|placed| placed.shape.bbox());
        let first = iter.next()?;
        Some(iter.fold(first, |acc, bbox| acc.union(&bbox)))
    }

    /// Material at `point`, resolved by the last shape containing it.
    /// `None` means the background shows through.
    pub fn material_at(&self, point: Vec2) -> Option<Material> {
        self.shapes
            .iter()
            .rev()
            .find(|placed| placed.shape.contains(point))
            .map(|placed| placed.material)
    }

    /// Copy of the list shifted by `offset`.
    pub fn translated(&self, offset: Vec2) -> ShapeList {
        ShapeList {
            shapes: self
                .shapes
                .iter()
                .map(|placed| PlacedShape {
                    shape: placed.shape.translated(offset),
                    material: placed.material,
                    z_order: placed.z_order,
                })
                .collect(),
        }
    }
}
