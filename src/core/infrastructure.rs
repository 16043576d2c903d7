// Reference scene: three scroll-linked sections (data sources, a processing
// pipeline, a destination store) over a drifting particle field.

use super::clock::FrameTime;
use super::constants::*;
use super::geometry::MeshKind;
use super::palette::{hex_to_linear, palette_for};
use super::scene::{
    DirectionalLight, DrawList, Geometry, Lighting, Material, MaterialSlot, MeshInstance,
    SceneContext, SceneDriver, SceneObject, Transform,
};
use super::theme::Theme;
use super::transition::{lerp, smoothstep, EntryAnimation};
use super::viewport::{DeviceClass, Environment};
use fnv::FnvHashMap;
use glam::{Mat4, Vec2, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Sources,
    Pipeline,
    Destination,
}

/// Animation role of an object inside its section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Source,
    Hub,
    Node,
    Core,
    Orbiter,
}

pub type RoleMap = FnvHashMap<Role, SmallVec<[SceneObject; 8]>>;

#[derive(Clone, Debug)]
pub struct Section {
    pub kind: SectionKind,
    pub transform: Transform,
    pub rest_y: f32,
    pub objects: RoleMap,
    pub entry: EntryAnimation,
    pub visibility: f32,
}

impl Section {
    fn new(kind: SectionKind, index: usize, spacing: f32) -> Self {
        let rest_y = -spacing * index as f32;
        Self {
            kind,
            transform: Transform::at(Vec3::new(0.0, rest_y, 0.0)),
            rest_y,
            objects: RoleMap::default(),
            entry: EntryAnimation::Idle,
            visibility: 1.0,
        }
    }

    fn add(&mut self, role: Role, object: SceneObject) {
        self.objects.entry(role).or_default().push(object);
    }

    pub fn role(&self, role: Role) -> &[SceneObject] {
        self.objects.get(&role).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn object_count(&self) -> usize {
        self.objects.values().map(|v| v.len()).sum()
    }

    fn objects_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.values_mut().flat_map(|v| v.iter_mut())
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    pub base: Vec<Vec3>,
    pub positions: Vec<Vec3>,
    pub rotation_y: f32,
    pub size: f32,
}

#[derive(Clone, Copy, Debug)]
struct Materials {
    primary: Material,
    secondary: Material,
    accent: Material,
    particles: Material,
    ambient_light: [f32; 3],
    key_light: [f32; 3],
    back_light: [f32; 3],
}

impl Materials {
    fn for_theme(theme: Theme) -> Self {
        let p = palette_for(theme);
        let solid = |hex| Material {
            color: hex_to_linear(hex),
            opacity: 1.0,
        };
        Self {
            primary: solid(p.primary),
            secondary: solid(p.secondary),
            accent: solid(p.accent),
            particles: Material {
                color: hex_to_linear(p.particles),
                opacity: PARTICLE_OPACITY,
            },
            ambient_light: hex_to_linear(p.ambient_light),
            key_light: hex_to_linear(p.directional_light),
            back_light: hex_to_linear(p.back_light),
        }
    }

    fn get(&self, slot: MaterialSlot) -> Material {
        match slot {
            MaterialSlot::Primary => self.primary,
            MaterialSlot::Secondary => self.secondary,
            MaterialSlot::Accent => self.accent,
        }
    }
}

pub struct InfrastructureScene {
    rng: StdRng,
    theme: Theme,
    materials: Materials,
    sections: Vec<Section>,
    particles: ParticleField,
    spacing: f32,
    scroll_y: f64,
    current_section: usize,
    pending_entry: Option<usize>,
    entries_started: u32,
    pointer: Vec2,
}

impl InfrastructureScene {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            theme: Theme::Light,
            materials: Materials::for_theme(Theme::Light),
            sections: Vec::new(),
            particles: ParticleField::default(),
            spacing: SECTION_SPACING_WIDE,
            scroll_y: 0.0,
            current_section: 0,
            pending_entry: None,
            entries_started: 0,
            pointer: Vec2::ZERO,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn current_section(&self) -> usize {
        self.current_section
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Entry animations started since setup.
    pub fn entries_started(&self) -> u32 {
        self.entries_started
    }

    pub fn material(&self, slot: MaterialSlot) -> Material {
        self.materials.get(slot)
    }

    pub fn particle_material(&self) -> Material {
        self.materials.particles
    }

    pub fn back_light(&self) -> [f32; 3] {
        self.materials.back_light
    }

    fn build_sources(&mut self, device: DeviceClass) -> Section {
        let mut section = Section::new(SectionKind::Sources, 0, self.spacing);
        for _ in 0..device.pick(SOURCE_CUBES) {
            let size = SOURCE_CUBE_MIN_SIZE + self.rng.gen::<f32>() * SOURCE_CUBE_SIZE_SPAN;
            let position = Vec3::new(
                (self.rng.gen::<f32>() - 0.5) * 2.0,
                self.rng.gen::<f32>() - 0.5,
                (self.rng.gen::<f32>() - 0.5) * 2.0,
            );
            section.add(
                Role::Source,
                object(MeshKind::Cube, size, MaterialSlot::Primary, position),
            );
        }
        section
    }

    fn build_pipeline(&mut self, device: DeviceClass) -> Section {
        let mut section = Section::new(SectionKind::Pipeline, 1, self.spacing);
        section.add(
            Role::Hub,
            object(MeshKind::Octahedron, PIPELINE_HUB_RADIUS, MaterialSlot::Secondary, Vec3::ZERO),
        );
        let count = device.pick(PIPELINE_NODES);
        let ring = device.pick(PIPELINE_NODE_RING);
        for i in 0..count {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let position = Vec3::new(angle.cos() * ring, 0.0, angle.sin() * ring);
            let node = object(
                MeshKind::Octahedron,
                PIPELINE_NODE_RADIUS,
                MaterialSlot::Secondary,
                position,
            );
            section.add(Role::Node, node);
        }
        section
    }

    fn build_destination(&mut self, device: DeviceClass) -> Section {
        let mut section = Section::new(SectionKind::Destination, 2, self.spacing);
        let core = object(
            MeshKind::Icosahedron,
            DESTINATION_CORE_RADIUS,
            MaterialSlot::Accent,
            Vec3::ZERO,
        );
        section.add(Role::Core, core);
        let count = device.pick(ORBITERS);
        let radius = device.pick(ORBIT_RADIUS);
        for i in 0..count {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let position = Vec3::new(angle.cos() * radius, angle.sin() * 0.5, angle.sin() * radius);
            section.add(
                Role::Orbiter,
                object(MeshKind::Cube, ORBITER_SIZE, MaterialSlot::Accent, position),
            );
        }
        section
    }

    fn build_particles(&mut self, device: DeviceClass) {
        let count = device.pick(PARTICLES);
        let depth = self.spacing * self.sections.len() as f32;
        let base: Vec<Vec3> = (0..count)
            .map(|_| {
                Vec3::new(
                    (self.rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD,
                    self.spacing * 0.5 - self.rng.gen::<f32>() * depth,
                    (self.rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD,
                )
            })
            .collect();
        self.particles = ParticleField {
            positions: base.clone(),
            base,
            rotation_y: 0.0,
            size: device.pick(PARTICLE_SIZE),
        };
    }

    fn layout_offsets(&mut self, device: DeviceClass) {
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.transform.position.x = match device {
                DeviceClass::Narrow => 0.0,
                DeviceClass::Wide if i % 2 == 0 => SECTION_OFFSET_X,
                DeviceClass::Wide => -SECTION_OFFSET_X,
            };
        }
    }

    fn section_index_for(&self, scroll_y: f64, viewport_height: f64) -> usize {
        (scroll_y.max(0.0) / viewport_height).round() as usize
    }
}

fn object(mesh: MeshKind, size: f32, material: MaterialSlot, position: Vec3) -> SceneObject {
    SceneObject {
        geometry: Geometry { mesh, size },
        material,
        transform: Transform::at(position),
    }
}

fn rotation_speed(env: &Environment) -> f32 {
    if env.reduced_motion {
        0.0
    } else if env.device_class().is_narrow() {
        ROTATION_SPEED_NARROW
    } else {
        ROTATION_SPEED_WIDE
    }
}

/// 1 when the camera rests on the section, easing to 0 a section away.
pub fn section_visibility(camera_y: f32, rest_y: f32, spacing: f32) -> f32 {
    let distance = (camera_y - rest_y).abs() / spacing;
    1.0 - smoothstep(VISIBILITY_NEAR, VISIBILITY_FAR, distance)
}

impl SceneDriver for InfrastructureScene {
    fn setup_scene(&mut self, ctx: &mut SceneContext<'_>) {
        let device = ctx.env.device_class();
        self.theme = ctx.theme;
        self.materials = Materials::for_theme(ctx.theme);
        self.scroll_y = 0.0;
        self.current_section = 0;
        self.pending_entry = None;
        self.entries_started = 0;
        self.pointer = Vec2::ZERO;
        self.spacing = device.pick((SECTION_SPACING_NARROW, SECTION_SPACING_WIDE));
        ctx.camera.position.z = device.pick((CAMERA_Z_NARROW, CAMERA_Z_WIDE));

        self.sections.clear();
        let sources = self.build_sources(device);
        let pipeline = self.build_pipeline(device);
        let destination = self.build_destination(device);
        self.sections.extend([sources, pipeline, destination]);
        self.layout_offsets(device);
        self.build_particles(device);
        log::debug!(
            "[scene] setup sections={} particles={} device={:?}",
            self.sections.len(),
            self.particles.base.len(),
            device
        );
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>, time: FrameTime) {
        let env = ctx.env;
        let device = env.device_class();
        let motion = !env.reduced_motion;
        let dt = time.delta;

        ctx.camera.position.y = -(self.scroll_y / env.viewport.height) as f32 * self.spacing;

        if !device.is_narrow() {
            let target = Vec2::new(self.pointer.x, -self.pointer.y) * PARALLAX_STRENGTH;
            let rate = (PARALLAX_SMOOTHING_PER_SEC * dt).min(1.0);
            ctx.camera.rig_offset += (target - ctx.camera.rig_offset) * rate;
        }

        if let Some(index) = self.pending_entry.take() {
            if motion {
                if let Some(section) = self.sections.get_mut(index) {
                    section.entry.trigger(
                        time.elapsed,
                        section.transform.rotation,
                        Vec3::new(ENTRY_TURN_X, ENTRY_TURN_Y, 0.0),
                        ENTRY_DURATION_SEC,
                    );
                    self.entries_started += 1;
                }
            }
        }

        let speed = rotation_speed(env);
        let orbit_radius = device.pick(ORBIT_RADIUS);
        let camera_y = ctx.camera.position.y;
        for section in self.sections.iter_mut() {
            section.transform.rotation.y += dt * speed;
            if !motion {
                section.entry = EntryAnimation::Idle;
            } else if let Some(rotation) = section.entry.advance(time.elapsed) {
                section.transform.rotation.x = rotation.x;
                section.transform.rotation.y = rotation.y;
            }
            for child in section.objects_mut() {
                child.transform.rotation.x += dt * speed * CHILD_SPIN_X_FACTOR;
                child.transform.rotation.y += dt * speed;
            }
            if motion {
                if let Some(orbiters) = section.objects.get_mut(&Role::Orbiter) {
                    for (i, orbiter) in orbiters.iter_mut().enumerate() {
                        let angle = time.elapsed * ORBIT_ANGULAR_SPEED + (i + 1) as f32;
                        orbiter.transform.position.x = angle.cos() * orbit_radius;
                        orbiter.transform.position.z = angle.sin() * orbit_radius;
                    }
                }
            }
            section.visibility = section_visibility(camera_y, section.rest_y, self.spacing);
        }

        if motion {
            let field = &mut self.particles;
            for (i, (pos, base)) in field.positions.iter_mut().zip(&field.base).enumerate() {
                pos.y = base.y + (time.elapsed + i as f32).sin() * PARTICLE_DRIFT_AMPLITUDE;
            }
            field.rotation_y = time.elapsed * PARTICLE_FIELD_SPIN;
        }
    }

    fn on_resize(&mut self, ctx: &mut SceneContext<'_>) {
        if self.sections.is_empty() {
            return;
        }
        self.layout_offsets(ctx.env.device_class());
    }

    fn on_theme_change(&mut self, theme: Theme) {
        self.theme = theme;
        self.materials = Materials::for_theme(theme);
    }

    fn on_scroll(&mut self, scroll_y: f64, env: &Environment) {
        self.scroll_y = scroll_y.max(0.0);
        let next = self.section_index_for(self.scroll_y, env.viewport.height);
        if next != self.current_section && next < self.sections.len() {
            self.current_section = next;
            if !env.reduced_motion {
                self.pending_entry = Some(next);
            }
        }
    }

    fn on_pointer_move(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    fn draw(&self, out: &mut DrawList) {
        for section in &self.sections {
            let v = section.visibility;
            let mut placed = section.transform;
            placed.position.z += lerp(HIDDEN_DEPTH_OFFSET, 0.0, v);
            placed.scale *= lerp(HIDDEN_SCALE, 1.0, v);
            let group = placed.matrix();
            let opacity = lerp(HIDDEN_OPACITY, 1.0, v);
            for objects in section.objects.values() {
                for obj in objects {
                    let material = self.materials.get(obj.material);
                    let [r, g, b] = material.color;
                    out.meshes.push(MeshInstance {
                        mesh: obj.geometry.mesh,
                        model: group * obj.model(),
                        color: [r, g, b, material.opacity * opacity],
                    });
                }
            }
        }

        let [r, g, b] = self.materials.particles.color;
        out.particles.model = Mat4::from_rotation_y(self.particles.rotation_y);
        out.particles.positions.extend_from_slice(&self.particles.positions);
        out.particles.color = [r, g, b, self.materials.particles.opacity];
        out.particles.size = self.particles.size;

        out.lighting = Lighting {
            ambient: self.materials.ambient_light,
            ambient_intensity: AMBIENT_INTENSITY,
            key: DirectionalLight {
                direction: KEY_LIGHT_DIRECTION,
                color: self.materials.key_light,
                intensity: KEY_LIGHT_INTENSITY,
            },
            back: DirectionalLight {
                direction: BACK_LIGHT_DIRECTION,
                color: self.materials.back_light,
                intensity: BACK_LIGHT_INTENSITY,
            },
        };
    }

    fn teardown(&mut self) {
        self.sections.clear();
        self.particles = ParticleField::default();
        self.pending_entry = None;
    }
}
