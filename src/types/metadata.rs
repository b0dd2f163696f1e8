use glam::DVec2;

/// Descriptive view of a grid map. Built on demand from the map's own fields,
/// never stored alongside them.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMetadata {
    pub name: String,
    pub description: String,
    pub resolution: f64,
    pub origin: DVec2,
}
