use super::constants::{
    CAMERA_FAR, CAMERA_NEAR, FOV_NARROW_DEG, FOV_WIDE_DEG, MAX_PIXEL_RATIO, NARROW_BREAKPOINT_PX,
};
use glam::{Mat4, Vec2};

/// Logical (CSS pixel) size of the area the scene covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    /// Prefer the host element's box; fall back to the window on any axis the
    /// host has zero extent.
    pub fn from_host_or_window(host: (f64, f64), window: (f64, f64)) -> Self {
        let pick = |h: f64, w: f64| if h > 0.0 && h.is_finite() { h } else { w };
        Self::new(pick(host.0, window.0), pick(host.1, window.1))
    }

    pub fn aspect(&self) -> f32 {
        (self.width / self.height) as f32
    }

    /// Pointer offset from the viewport center, roughly in [-0.5, 0.5].
    pub fn normalized_pointer(&self, client_x: f64, client_y: f64) -> Vec2 {
        Vec2::new(
            (client_x / self.width - 0.5) as f32,
            (client_y / self.height - 0.5) as f32,
        )
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

#[inline]
fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() {
        v.max(1.0)
    } else {
        1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Narrow,
    Wide,
}

impl DeviceClass {
    pub fn from_width(window_width: f64) -> Self {
        if window_width < NARROW_BREAKPOINT_PX {
            DeviceClass::Narrow
        } else {
            DeviceClass::Wide
        }
    }

    pub fn is_narrow(self) -> bool {
        self == DeviceClass::Narrow
    }

    /// Pick the narrow or wide variant of a `(narrow, wide)` tuning pair.
    pub fn pick<T: Copy>(self, pair: (T, T)) -> T {
        match self {
            DeviceClass::Narrow => pair.0,
            DeviceClass::Wide => pair.1,
        }
    }
}

/// Wider field of view on narrow screens so the scene is not cropped.
pub fn field_of_view_deg(window_width: f64) -> f32 {
    match DeviceClass::from_width(window_width) {
        DeviceClass::Narrow => FOV_NARROW_DEG,
        DeviceClass::Wide => FOV_WIDE_DEG,
    }
}

pub fn clamp_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Backing-store size of the drawable surface in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl SurfaceSize {
    pub fn for_viewport(viewport: ViewportSize, device_pixel_ratio: f64) -> Self {
        let ratio = clamp_pixel_ratio(device_pixel_ratio);
        Self {
            width: ((viewport.width * ratio).round() as u32).max(1),
            height: ((viewport.height * ratio).round() as u32).max(1),
            pixel_ratio: ratio,
        }
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::for_viewport(ViewportSize::default(), 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn for_viewport(viewport: ViewportSize, window_width: f64) -> Self {
        Self {
            fov_deg: field_of_view_deg(window_width),
            aspect: viewport.aspect(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }

    pub fn update(&mut self, viewport: ViewportSize, window_width: f64) {
        self.fov_deg = field_of_view_deg(window_width);
        self.aspect = viewport.aspect();
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::for_viewport(ViewportSize::default(), NARROW_BREAKPOINT_PX)
    }
}

/// Everything the host environment reports that the lifecycle depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    pub viewport: ViewportSize,
    pub window_width: f64,
    pub device_pixel_ratio: f64,
    pub reduced_motion: bool,
}

impl Environment {
    pub fn device_class(&self) -> DeviceClass {
        DeviceClass::from_width(self.window_width)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            viewport: ViewportSize::default(),
            window_width: NARROW_BREAKPOINT_PX,
            device_pixel_ratio: 1.0,
            reduced_motion: false,
        }
    }
}
