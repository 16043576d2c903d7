// Host-side tests for viewport measurement, projection, and pixel density.

mod common;

use common::core::viewport::*;

#[test]
fn field_of_view_switches_at_768px() {
    let mut width = 0.0;
    while width <= 2000.0 {
        let fov = field_of_view_deg(width);
        if width < 768.0 {
            assert_eq!(fov, 45.0, "width {width}");
        } else {
            assert_eq!(fov, 35.0, "width {width}");
        }
        width += 17.0;
    }
    assert_eq!(field_of_view_deg(767.9), 45.0);
    assert_eq!(field_of_view_deg(768.0), 35.0);
}

#[test]
fn pixel_ratio_is_capped_at_two() {
    assert_eq!(clamp_pixel_ratio(1.0), 1.0);
    assert_eq!(clamp_pixel_ratio(1.5), 1.5);
    assert_eq!(clamp_pixel_ratio(3.0), 2.0);
    assert_eq!(clamp_pixel_ratio(0.0), 1.0);
    assert_eq!(clamp_pixel_ratio(-2.0), 1.0);
    assert_eq!(clamp_pixel_ratio(f64::NAN), 1.0);
}

#[test]
fn surface_size_is_viewport_times_density() {
    let viewport = ViewportSize::new(1200.0, 400.0);
    for dpr in [0.5, 1.0, 1.25, 2.0, 3.0] {
        let size = SurfaceSize::for_viewport(viewport, dpr);
        let d = clamp_pixel_ratio(dpr);
        assert!(d <= 2.0);
        assert_eq!(size.width, (1200.0 * d).round() as u32);
        assert_eq!(size.height, (400.0 * d).round() as u32);
    }
}

#[test]
fn surface_size_is_never_zero() {
    let size = SurfaceSize::for_viewport(ViewportSize::new(0.0, 0.0), 0.5);
    assert!(size.width >= 1 && size.height >= 1);
}

#[test]
fn host_box_falls_back_to_window_per_axis() {
    let v = ViewportSize::from_host_or_window((0.0, 500.0), (1024.0, 768.0));
    assert_eq!((v.width, v.height), (1024.0, 500.0));
    let v = ViewportSize::from_host_or_window((640.0, 0.0), (1024.0, 768.0));
    assert_eq!((v.width, v.height), (640.0, 768.0));
    let v = ViewportSize::from_host_or_window((0.0, 0.0), (0.0, 0.0));
    assert_eq!((v.width, v.height), (1.0, 1.0));
}

#[test]
fn projection_tracks_aspect_and_breakpoint() {
    let mut p = Projection::for_viewport(ViewportSize::new(1200.0, 800.0), 1200.0);
    assert!((p.aspect - 1.5).abs() < 1e-6);
    assert_eq!(p.fov_deg, 35.0);
    assert_eq!((p.near, p.far), (0.1, 100.0));

    p.update(ViewportSize::new(1200.0, 400.0), 1200.0);
    assert!((p.aspect - 3.0).abs() < 1e-6);

    p.update(ViewportSize::new(400.0, 800.0), 400.0);
    assert_eq!(p.fov_deg, 45.0);
    assert!((p.aspect - 0.5).abs() < 1e-6);
}

#[test]
fn pointer_is_centered_on_the_viewport() {
    let v = ViewportSize::new(800.0, 600.0);
    assert_eq!(v.normalized_pointer(400.0, 300.0), glam::Vec2::ZERO);
    let corner = v.normalized_pointer(0.0, 600.0);
    assert_eq!((corner.x, corner.y), (-0.5, 0.5));
}

#[test]
fn device_class_picks_tuning_pairs() {
    assert_eq!(DeviceClass::from_width(375.0), DeviceClass::Narrow);
    assert_eq!(DeviceClass::from_width(1440.0), DeviceClass::Wide);
    assert_eq!(DeviceClass::Narrow.pick((3, 5)), 3);
    assert_eq!(DeviceClass::Wide.pick((3, 5)), 5);
}
