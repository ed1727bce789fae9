use foundation::{ViewLimits, ViewPose, deg};
use serde::{Deserialize, Serialize};

/// Fixed angular bounds for the traditional view limiter, applied to every
/// scene: 100° vertical, 120° horizontal.
pub fn scene_view_bounds() -> (f64, f64) {
    (deg(100.0), deg(120.0))
}

/// One level of a scene's multi-resolution tile pyramid.
///
/// Authored data, never mutated after loading. `fallback_only` marks a
/// low-resolution level that is only used while better tiles stream in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryLevel {
    pub tile_size: u32,
    pub size: u32,
    #[serde(default)]
    pub fallback_only: bool,
}

/// Camera pose when a scene becomes active. Radians.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialView {
    pub yaw: f64,
    pub pitch: f64,
    pub fov: f64,
}

impl InitialView {
    pub fn pose(&self) -> ViewPose {
        ViewPose::new(self.yaw, self.pitch, self.fov)
    }
}

/// A navigable edge: clicking it activates `target_scene_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkHotspot {
    pub yaw: f64,
    pub pitch: f64,
    #[serde(default)]
    pub rotation: f64,
    pub target_scene_id: String,
}

/// A non-navigable annotation displayed at a fixed anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoHotspot {
    pub yaw: f64,
    pub pitch: f64,
    pub text: String,
}

/// One panoramic node: image pyramid, camera pose, hotspot edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub name: String,
    pub geometry_levels: Vec<GeometryLevel>,
    /// Reference resolution for view-angle limiting (cube face size, px).
    pub face_size: u32,
    pub initial_view: InitialView,
    #[serde(default)]
    pub link_hotspots: Vec<LinkHotspot>,
    #[serde(default)]
    pub info_hotspots: Vec<InfoHotspot>,
}

impl Scene {
    /// The limiter for this scene, parameterized by its face size and the
    /// fixed angular bounds.
    pub fn view_limits(&self) -> ViewLimits {
        let (max_vfov, max_hfov) = scene_view_bounds();
        ViewLimits::traditional(self.face_size, max_vfov, max_hfov)
    }
}

#[cfg(test)]
mod tests {
    use super::{GeometryLevel, Scene};
    use pretty_assertions::assert_eq;

    #[test]
    fn scene_deserializes_from_authored_json() {
        let json = r#"{
            "id": "lobby",
            "name": "Lobby",
            "geometryLevels": [
                { "tileSize": 256, "size": 256, "fallbackOnly": true },
                { "tileSize": 512, "size": 512 }
            ],
            "faceSize": 1024,
            "initialView": { "yaw": 0.1, "pitch": 0.0, "fov": 1.4 },
            "linkHotspots": [
                { "yaw": 0.5, "pitch": -0.1, "rotation": 0.0, "targetSceneId": "suite" }
            ],
            "infoHotspots": [
                { "yaw": -0.4, "pitch": 0.2, "text": "Reception desk" }
            ]
        }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.id, "lobby");
        assert_eq!(
            scene.geometry_levels[0],
            GeometryLevel {
                tile_size: 256,
                size: 256,
                fallback_only: true
            }
        );
        assert!(!scene.geometry_levels[1].fallback_only);
        assert_eq!(scene.link_hotspots[0].target_scene_id, "suite");
        assert_eq!(scene.info_hotspots[0].text, "Reception desk");
    }

    #[test]
    fn hotspot_sequences_default_to_empty() {
        let json = r#"{
            "id": "s",
            "name": "S",
            "geometryLevels": [],
            "faceSize": 512,
            "initialView": { "yaw": 0.0, "pitch": 0.0, "fov": 1.0 }
        }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        assert!(scene.link_hotspots.is_empty());
        assert!(scene.info_hotspots.is_empty());
    }

    #[test]
    fn view_limits_use_face_size() {
        let json = r#"{
            "id": "s",
            "name": "S",
            "geometryLevels": [],
            "faceSize": 2048,
            "initialView": { "yaw": 0.0, "pitch": 0.0, "fov": 1.0 }
        }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.view_limits().max_resolution, 2048);
    }
}
