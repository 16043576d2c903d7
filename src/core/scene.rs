use super::clock::FrameTime;
use super::constants::CAMERA_Z_WIDE;
use super::geometry::MeshKind;
use super::theme::Theme;
use super::viewport::{Environment, Projection};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3, // Euler XYZ, radians
    pub scale: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let Vec3 { x, y, z } = self.rotation;
        let rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Base geometry of an object; the unit mesh is scaled by `size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub mesh: MeshKind,
    pub size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialSlot {
    Primary,
    Secondary,
    Accent,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneObject {
    pub geometry: Geometry,
    pub material: MaterialSlot,
    pub transform: Transform,
}

impl SceneObject {
    pub fn model(&self) -> Mat4 {
        self.transform.matrix() * Mat4::from_scale(Vec3::splat(self.geometry.size))
    }
}

/// Perspective camera mounted on a parallax rig.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub projection: Projection,
    pub position: Vec3,
    pub rig_offset: Vec2,
}

impl Camera {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            position: Vec3::new(0.0, 0.0, CAMERA_Z_WIDE),
            rig_offset: Vec2::ZERO,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.position + self.rig_offset.extend(0.0)
    }

    /// The camera looks straight down -Z; scrolling moves it, it never tilts.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye(), Vec3::NEG_Z, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Projection::default())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DirectionalLight {
    pub direction: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Lighting {
    pub ambient: [f32; 3],
    pub ambient_intensity: f32,
    pub key: DirectionalLight,
    pub back: DirectionalLight,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshInstance {
    pub mesh: MeshKind,
    pub model: Mat4,
    pub color: [f32; 4],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleBatch {
    pub model: Mat4,
    pub positions: Vec<Vec3>,
    pub color: [f32; 4],
    pub size: f32,
}

/// Everything the surface needs to present one frame. Reused across ticks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub view_projection: Mat4,
    pub projection_scale: Vec2,
    pub meshes: Vec<MeshInstance>,
    pub particles: ParticleBatch,
    pub lighting: Lighting,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.particles.positions.clear();
    }

    pub fn set_camera(&mut self, camera: &Camera) {
        let projection = camera.projection.matrix();
        self.view_projection = projection * camera.view_matrix();
        self.projection_scale = Vec2::new(projection.x_axis.x, projection.y_axis.y);
    }
}

/// State the lifecycle manager lends a driver for one hook call.
pub struct SceneContext<'a> {
    pub env: &'a Environment,
    pub theme: Theme,
    pub camera: &'a mut Camera,
}

/// What a decorative scene must provide to be hosted by the lifecycle
/// manager. The manager owns the surface, clock, observers and loop; the
/// driver owns its objects.
pub trait SceneDriver {
    /// Called once per attach, after the camera exists.
    fn setup_scene(&mut self, ctx: &mut SceneContext<'_>);

    /// Called once per tick, before the frame is presented.
    fn update(&mut self, ctx: &mut SceneContext<'_>, time: FrameTime);

    /// Called after the manager has recomputed viewport, projection and surface size.
    fn on_resize(&mut self, _ctx: &mut SceneContext<'_>) {}

    fn on_theme_change(&mut self, _theme: Theme) {}

    fn on_scroll(&mut self, _scroll_y: f64, _env: &Environment) {}

    fn on_pointer_move(&mut self, _pointer: Vec2) {}

    /// Append this frame's geometry to `out`. Camera fields are already set.
    fn draw(&self, out: &mut DrawList);

    /// Drop every scene object. Called on detach, before the surface goes.
    fn teardown(&mut self) {}
}
