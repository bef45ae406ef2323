/// Smallest scale the viewer can reach by zooming out.
pub const MIN_SCALE: f32 = 0.5;

/// Largest scale the viewer can reach by zooming in.
pub const MAX_SCALE: f32 = 4.0;

/// Scale multiplier applied per discrete zoom-in wheel event.
pub const ZOOM_IN_FACTOR: f32 = 1.2;

/// Scale multiplier applied per discrete zoom-out wheel event.
pub const ZOOM_OUT_FACTOR: f32 = 0.8;

/// How long the usage instructions stay on screen after opening, in seconds.
pub const INSTRUCTIONS_SECS: f32 = 3.0;

/// Source prefix that marks an image as site-relative and worth probing.
pub const DEFAULT_IMAGE_PREFIX: &str = "images/";

/// Project subpath the site is published under.
pub const DEFAULT_PROJECT_SUBPATH: &str = "/PAM4Receiver/";

/// Alt-text prefix for images whose every path variation failed.
pub const BROKEN_ALT_PREFIX: &str = "IMAGE NOT FOUND: ";

/// Key under which the visit counter is persisted.
pub const VISIT_COUNT_KEY: &str = "visitCount";
