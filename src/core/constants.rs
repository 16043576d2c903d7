// Shared lifecycle and scene tuning constants. Pure values only so the host
// tests can include this file next to the modules that use it.

// Viewport classification and projection
pub const NARROW_BREAKPOINT_PX: f64 = 768.0; // below this width the layout is "narrow"
pub const FOV_NARROW_DEG: f32 = 45.0;
pub const FOV_WIDE_DEG: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_Z_WIDE: f32 = 6.0;
pub const CAMERA_Z_NARROW: f32 = 7.0;

// Surface
pub const MAX_PIXEL_RATIO: f64 = 2.0; // caps memory and fill-rate on dense displays

// Scheduler
pub const RESIZE_DEBOUNCE_MS: i32 = 100;
pub const MAX_FRAME_DELTA_SEC: f32 = 0.25; // clamp after a backgrounded tab resumes

// Section layout
pub const SECTION_SPACING_WIDE: f32 = 4.0;
pub const SECTION_SPACING_NARROW: f32 = 3.5;
pub const SECTION_OFFSET_X: f32 = 2.0; // alternating left/right offset on wide viewports

// Section contents (narrow, wide)
pub const SOURCE_CUBES: (usize, usize) = (3, 5);
pub const SOURCE_CUBE_MIN_SIZE: f32 = 0.2;
pub const SOURCE_CUBE_SIZE_SPAN: f32 = 0.3;
pub const PIPELINE_NODES: (usize, usize) = (2, 3);
pub const PIPELINE_NODE_RING: (f32, f32) = (1.2, 1.5);
pub const PIPELINE_HUB_RADIUS: f32 = 1.0;
pub const PIPELINE_NODE_RADIUS: f32 = 0.3;
pub const ORBITERS: (usize, usize) = (4, 8);
pub const ORBIT_RADIUS: (f32, f32) = (1.5, 1.8);
pub const ORBITER_SIZE: f32 = 0.15;
pub const DESTINATION_CORE_RADIUS: f32 = 1.0;
pub const ORBIT_ANGULAR_SPEED: f32 = 0.3;

// Particle field (narrow, wide)
pub const PARTICLES: (usize, usize) = (150, 300);
pub const PARTICLE_SIZE: (f32, f32) = (0.04, 0.03);
pub const PARTICLE_SPREAD: f32 = 10.0;
pub const PARTICLE_OPACITY: f32 = 0.8;
pub const PARTICLE_DRIFT_AMPLITUDE: f32 = 0.06;
pub const PARTICLE_FIELD_SPIN: f32 = 0.05;

// Motion
pub const ROTATION_SPEED_WIDE: f32 = 0.1;
pub const ROTATION_SPEED_NARROW: f32 = 0.05;
pub const CHILD_SPIN_X_FACTOR: f32 = 1.5;
pub const PARALLAX_STRENGTH: f32 = 0.5;
pub const PARALLAX_SMOOTHING_PER_SEC: f32 = 5.0;

// One-shot entry animation
pub const ENTRY_DURATION_SEC: f32 = 1.0;
pub const ENTRY_TURN_X: f32 = std::f32::consts::TAU;
pub const ENTRY_TURN_Y: f32 = std::f32::consts::PI;

// Section visibility (distance measured in section spacings)
pub const VISIBILITY_NEAR: f32 = 0.25;
pub const VISIBILITY_FAR: f32 = 1.25;
pub const HIDDEN_OPACITY: f32 = 0.25;
pub const HIDDEN_SCALE: f32 = 0.75;
pub const HIDDEN_DEPTH_OFFSET: f32 = -1.5;

// Lights
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const KEY_LIGHT_INTENSITY: f32 = 1.0;
pub const BACK_LIGHT_INTENSITY: f32 = 0.5;
pub const KEY_LIGHT_DIRECTION: [f32; 3] = [1.0, 1.0, 2.0];
pub const BACK_LIGHT_DIRECTION: [f32; 3] = [-1.0, -1.0, -1.0];
