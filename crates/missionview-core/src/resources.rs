//! Rendering resources shared by every rebuilt scene.
//!
//! Geometries, materials, lights, and the ground plane are allocated once when
//! the builder is created. Scene nodes hold `Arc` handles into this set, so a
//! rebuild only allocates the scene container and its per-marker nodes.

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Quat, Vec3};
use image::{Rgba, RgbaImage};
use palette::{LinSrgb, Srgb};

use crate::config::SceneConfig;
use crate::scene::{LineKind, MarkerKind, NodeTransform};

/// Shape of a unit geometry. Nodes scale it into place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Radius 1, centered on the origin.
    Sphere {
        width_segments: u32,
        height_segments: u32,
    },
    /// Radius 1, height 1, centered on the origin, axis along local Z.
    Cylinder { radial_segments: u32 },
    /// 1 x 1 in the local XY plane.
    Plane,
    /// Segment list; vertices live on each `LineSet`.
    Lines,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub name: &'static str,
    pub primitive: Primitive,
}

/// Surface appearance of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: &'static str,
    pub color: Srgb<u8>,
    pub opacity: f32,
    pub texture: Option<Arc<RgbaImage>>,
    /// Texture repeats across the surface, per axis.
    pub texture_repeat: [f32; 2],
}

impl Material {
    fn solid(name: &'static str, color: Srgb<u8>) -> Self {
        Self {
            name,
            color,
            opacity: 1.0,
            texture: None,
            texture_repeat: [1.0, 1.0],
        }
    }

    /// Linear RGBA for shader uniforms.
    pub fn linear_rgba(&self) -> [f32; 4] {
        let linear: LinSrgb<f32> = self.color.into_format::<f32>().into_linear();
        [linear.red, linear.green, linear.blue, self.opacity]
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient {
        color: Srgb<u8>,
        intensity: f32,
    },
    /// Parallel light travelling along `direction`.
    Directional {
        color: Srgb<u8>,
        intensity: f32,
        direction: Vec3,
        cast_shadow: bool,
    },
}

impl Light {
    pub fn intensity(&self) -> f32 {
        match self {
            Self::Ambient { intensity, .. } | Self::Directional { intensity, .. } => *intensity,
        }
    }
}

/// The flat, textured ground under the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundPlane {
    pub geometry: Arc<Geometry>,
    pub material: Arc<Material>,
    pub transform: NodeTransform,
    pub receive_shadow: bool,
}

/// Materials, one per marker kind and line kind.
#[derive(Debug, Clone)]
pub struct MaterialSet {
    pub home: Arc<Material>,
    pub point_of_interest: Arc<Material>,
    pub search_grid_point: Arc<Material>,
    pub waypoint: Arc<Material>,
    pub stationary_obstacle: Arc<Material>,
    pub moving_obstacle: Arc<Material>,
    pub telemetry: Arc<Material>,
    pub search_grid_line: Arc<Material>,
    pub waypoint_line: Arc<Material>,
}

impl MaterialSet {
    fn new(config: &SceneConfig) -> Self {
        let colors = &config.colors;
        let obstacle = |name, color| {
            Arc::new(Material {
                opacity: 0.8,
                ..Material::solid(name, color)
            })
        };
        Self {
            home: Arc::new(Material::solid("home", colors.home)),
            point_of_interest: Arc::new(Material::solid(
                "point_of_interest",
                colors.point_of_interest,
            )),
            search_grid_point: Arc::new(Material::solid("search_grid", colors.search_grid)),
            waypoint: Arc::new(Material {
                opacity: 0.5,
                ..Material::solid("waypoint", colors.waypoint)
            }),
            stationary_obstacle: obstacle("stationary_obstacle", colors.stationary_obstacle),
            moving_obstacle: obstacle("moving_obstacle", colors.moving_obstacle),
            telemetry: Arc::new(Material::solid("telemetry", colors.telemetry)),
            search_grid_line: Arc::new(Material::solid("search_grid_line", colors.search_grid)),
            waypoint_line: Arc::new(Material::solid("waypoint_line", colors.waypoint)),
        }
    }

    pub fn for_marker(&self, kind: &MarkerKind) -> &Arc<Material> {
        match kind {
            MarkerKind::Home => &self.home,
            MarkerKind::PointOfInterest(_) => &self.point_of_interest,
            MarkerKind::SearchGridPoint => &self.search_grid_point,
            MarkerKind::Waypoint => &self.waypoint,
            MarkerKind::StationaryObstacle => &self.stationary_obstacle,
            MarkerKind::MovingObstacle => &self.moving_obstacle,
            MarkerKind::Telemetry => &self.telemetry,
        }
    }

    pub fn for_line(&self, kind: LineKind) -> &Arc<Material> {
        match kind {
            LineKind::SearchGrid => &self.search_grid_line,
            LineKind::WaypointPath => &self.waypoint_line,
        }
    }
}

/// Everything allocated once per builder.
#[derive(Debug, Clone)]
pub struct SceneResources {
    pub sphere: Arc<Geometry>,
    pub cylinder: Arc<Geometry>,
    pub plane: Arc<Geometry>,
    pub lines: Arc<Geometry>,
    pub materials: MaterialSet,
    pub ambient_light: Arc<Light>,
    pub sun_light: Arc<Light>,
    pub ground: Arc<GroundPlane>,
}

impl SceneResources {
    pub fn new(config: &SceneConfig) -> Self {
        let sphere = Arc::new(Geometry {
            name: "sphere",
            primitive: Primitive::Sphere {
                width_segments: 32,
                height_segments: 16,
            },
        });
        let cylinder = Arc::new(Geometry {
            name: "cylinder",
            primitive: Primitive::Cylinder {
                radial_segments: 32,
            },
        });
        let plane = Arc::new(Geometry {
            name: "plane",
            primitive: Primitive::Plane,
        });
        let lines = Arc::new(Geometry {
            name: "lines",
            primitive: Primitive::Lines,
        });

        let ambient_light = Arc::new(Light::Ambient {
            color: config.colors.ambient_light,
            intensity: config.ambient_intensity,
        });
        let sun_light = Arc::new(Light::Directional {
            color: config.colors.sun_light,
            intensity: config.sun_intensity,
            direction: Vec3::from_array(config.sun_direction)
                .try_normalize()
                .unwrap_or(Vec3::NEG_Y),
            cast_shadow: config.shadows,
        });

        let repeat = config.ground_size / config.ground_tile_feet;
        let ground_material = Arc::new(Material {
            texture: Some(Arc::new(ground_texture(config))),
            texture_repeat: [repeat, repeat],
            ..Material::solid("ground", config.colors.ground)
        });
        let ground = Arc::new(GroundPlane {
            geometry: Arc::clone(&plane),
            material: ground_material,
            // Lay the XY plane flat onto XZ, facing up.
            transform: NodeTransform {
                translation: Vec3::ZERO,
                rotation: Quat::from_rotation_x(-FRAC_PI_2),
                scale: Vec3::new(config.ground_size, config.ground_size, 1.0),
            },
            receive_shadow: config.shadows,
        });

        tracing::debug!(
            ground_size = config.ground_size,
            texture_size = config.ground_texture_size,
            "allocated scene resources"
        );

        Self {
            sphere,
            cylinder,
            plane,
            lines,
            materials: MaterialSet::new(config),
            ambient_light,
            sun_light,
            ground,
        }
    }
}

/// One ground tile: solid fill with a one-pixel grid line on two edges, so
/// repeated tiles draw a continuous grid.
fn ground_texture(config: &SceneConfig) -> RgbaImage {
    let size = config.ground_texture_size.max(1);
    let fill = config.colors.ground;
    let line = config.colors.ground_grid;
    RgbaImage::from_fn(size, size, |x, y| {
        let c = if x == 0 || y == 0 { line } else { fill };
        Rgba([c.red, c.green, c.blue, 0xff])
    })
}
