use foundation::Viewport;
use tour::{Scene, TileUrlTemplate};

use crate::renderer::{InfoMarker, LinkMarker, SceneSpec};

/// Translates a graph node into renderer primitives: templated tile
/// source, geometry levels, limited initial view, and one marker per
/// hotspot in authoring order. Pure; renderer calls happen elsewhere.
pub fn build_scene_spec(
    tiles: &TileUrlTemplate,
    scene: &Scene,
    viewport: Viewport,
    pin_first_level: bool,
) -> SceneSpec {
    let limits = scene.view_limits();
    SceneSpec {
        scene_id: scene.id.clone(),
        source_template: tiles.source_template(&scene.id),
        preview_url: tiles.preview_url(&scene.id),
        levels: scene.geometry_levels.clone(),
        initial_view: limits.clamp(scene.initial_view.pose(), viewport),
        limits,
        pin_first_level,
        link_markers: scene
            .link_hotspots
            .iter()
            .map(|h| LinkMarker {
                yaw: h.yaw,
                pitch: h.pitch,
                rotation: h.rotation,
                target_scene_id: h.target_scene_id.clone(),
            })
            .collect(),
        info_markers: scene
            .info_hotspots
            .iter()
            .map(|h| InfoMarker {
                yaw: h.yaw,
                pitch: h.pitch,
                text: h.text.clone(),
            })
            .collect(),
    }
}
