pub const DEFAULT_RESOLUTION: f64 = 0.05;

pub const DEFAULT_OCCUPIED_THRESH: f32 = 0.65;
pub const DEFAULT_FREE_THRESH: f32 = 0.196;

/// Fractional cell distance under which a world coordinate snaps onto the
/// nearest cell boundary in `world_to_grid`.
pub const BOUNDARY_EPSILON: f64 = 1e-9;
