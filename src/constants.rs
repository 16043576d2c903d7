/// DOM-facing names for the scene element and the theme controls.
///
/// Scene tuning lives in `core::constants`; these are the strings the page
/// markup and browser APIs agree on.
pub const ELEMENT_TAG: &str = "data-infrastructure-scene";

// Theme option buttons: `<button class="theme-option" data-theme="auto|light|dark">`
pub const THEME_OPTION_SELECTOR: &str = ".theme-option";
pub const THEME_OPTION_ACTIVE_CLASS: &str = "active";

// Fired once the body is parsed; theme options are wired no earlier.
pub const DOM_READY_EVENT: &str = "DOMContentLoaded";

pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Root attributes whose mutation can change the resolved theme
pub const THEME_OBSERVED_ATTRIBUTES: [&str; 2] = ["data-theme", "class"];

/// Shadow-root contents: a fixed full-viewport layer under page content
/// that never takes pointer input.
pub const SHADOW_MARKUP: &str = r#"<style>
:host {
  display: block;
  position: fixed;
  top: 0;
  left: 0;
  width: 100%;
  height: 100vh;
  pointer-events: none;
  z-index: 0;
}
canvas {
  display: block;
  width: 100%;
  height: 100%;
  outline: none;
}
</style>
<canvas></canvas>"#;
