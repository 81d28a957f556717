//! Renderer-agnostic scene graph.
//!
//! A `Scene` is built in full by [`MissionSceneBuilder`](crate::MissionSceneBuilder)
//! and never mutated afterwards. Nodes reference shared geometries and
//! materials from [`SceneResources`].

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use crate::resources::{Geometry, GroundPlane, Light, Material, SceneResources};

/// What a marker represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Home,
    /// A named point of interest.
    PointOfInterest(String),
    SearchGridPoint,
    Waypoint,
    StationaryObstacle,
    MovingObstacle,
    Telemetry,
}

impl MarkerKind {
    /// Short label for UI lists and logs.
    pub fn label(&self) -> &str {
        match self {
            Self::Home => "home",
            Self::PointOfInterest(name) => name,
            Self::SearchGridPoint => "search_grid",
            Self::Waypoint => "waypoint",
            Self::StationaryObstacle => "stationary_obstacle",
            Self::MovingObstacle => "moving_obstacle",
            Self::Telemetry => "telemetry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl NodeTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation_scale(translation: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            scale,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A single placed mesh.
#[derive(Debug, Clone)]
pub struct Marker {
    pub kind: MarkerKind,
    pub geometry: Arc<Geometry>,
    pub material: Arc<Material>,
    pub transform: NodeTransform,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Closed loop around the search area.
    SearchGrid,
    /// Open path through the mission waypoints.
    WaypointPath,
}

/// Line segments stored as vertex pairs, ready for a line-list draw.
#[derive(Debug, Clone)]
pub struct LineSet {
    pub kind: LineKind,
    pub geometry: Arc<Geometry>,
    pub material: Arc<Material>,
    vertices: Vec<[f32; 3]>,
}

impl LineSet {
    pub(crate) fn new(kind: LineKind, resources: &SceneResources) -> Self {
        Self {
            kind,
            geometry: Arc::clone(&resources.lines),
            material: Arc::clone(resources.materials.for_line(kind)),
            vertices: Vec::new(),
        }
    }

    /// Connect consecutive points; with `closed`, also connect last to first.
    pub(crate) fn connect(&mut self, points: &[Vec3], closed: bool) {
        if closed {
            for (i, start) in points.iter().enumerate() {
                let end = points[(i + 1) % points.len()];
                self.push_segment(*start, end);
            }
        } else {
            for pair in points.windows(2) {
                self.push_segment(pair[0], pair[1]);
            }
        }
    }

    fn push_segment(&mut self, start: Vec3, end: Vec3) {
        self.vertices.push(start.to_array());
        self.vertices.push(end.to_array());
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.vertices
            .chunks_exact(2)
            .map(|pair| (Vec3::from_array(pair[0]), Vec3::from_array(pair[1])))
    }

    /// Flat vertex list, two vertices per segment.
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Vertex data as bytes for a GPU vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    fn include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }
}

/// Structural summary of a scene. Two scenes built from the same inputs
/// have equal stats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub lights: usize,
    pub home: usize,
    pub points_of_interest: usize,
    pub search_grid_points: usize,
    pub waypoints: usize,
    pub stationary_obstacles: usize,
    pub moving_obstacles: usize,
    pub telemetry: usize,
    pub search_grid_segments: usize,
    pub waypoint_segments: usize,
}

impl SceneStats {
    pub fn markers(&self) -> usize {
        self.home
            + self.points_of_interest
            + self.search_grid_points
            + self.waypoints
            + self.stationary_obstacles
            + self.moving_obstacles
            + self.telemetry
    }
}

/// A complete, immutable scene.
#[derive(Debug, Clone)]
pub struct Scene {
    generation: u64,
    lights: Vec<Arc<Light>>,
    ground: Arc<GroundPlane>,
    markers: Vec<Marker>,
    lines: Vec<LineSet>,
}

impl Scene {
    /// Ground and lights only.
    pub(crate) fn minimal(generation: u64, resources: &SceneResources) -> Self {
        Self {
            generation,
            lights: vec![
                Arc::clone(&resources.ambient_light),
                Arc::clone(&resources.sun_light),
            ],
            ground: Arc::clone(&resources.ground),
            markers: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub(crate) fn push_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub(crate) fn push_lines(&mut self, lines: LineSet) {
        self.lines.push(lines);
    }

    /// Rebuild counter; distinguishes scenes built from identical inputs.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn lights(&self) -> &[Arc<Light>] {
        &self.lights
    }

    pub fn ground(&self) -> &GroundPlane {
        &self.ground
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn lines(&self) -> &[LineSet] {
        &self.lines
    }

    pub fn line_set(&self, kind: LineKind) -> Option<&LineSet> {
        self.lines.iter().find(|l| l.kind == kind)
    }

    pub fn is_minimal(&self) -> bool {
        self.markers.is_empty() && self.lines.is_empty()
    }

    pub fn stats(&self) -> SceneStats {
        let mut stats = SceneStats {
            lights: self.lights.len(),
            ..Default::default()
        };
        for marker in &self.markers {
            let slot = match marker.kind {
                MarkerKind::Home => &mut stats.home,
                MarkerKind::PointOfInterest(_) => &mut stats.points_of_interest,
                MarkerKind::SearchGridPoint => &mut stats.search_grid_points,
                MarkerKind::Waypoint => &mut stats.waypoints,
                MarkerKind::StationaryObstacle => &mut stats.stationary_obstacles,
                MarkerKind::MovingObstacle => &mut stats.moving_obstacles,
                MarkerKind::Telemetry => &mut stats.telemetry,
            };
            *slot += 1;
        }
        for lines in &self.lines {
            match lines.kind {
                LineKind::SearchGrid => stats.search_grid_segments += lines.segment_count(),
                LineKind::WaypointPath => stats.waypoint_segments += lines.segment_count(),
            }
        }
        stats
    }

    /// Bounds of all marker positions, for camera framing.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut points = self.markers.iter().map(|m| m.transform.translation);
        let first = points.next()?;
        let mut aabb = Aabb {
            min: first,
            max: first,
        };
        points.for_each(|p| aabb.include(p));
        Some(aabb)
    }
}
