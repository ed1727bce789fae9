use serde::{Deserialize, Serialize};

/// Cube face index used in tile paths.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CubeFace {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl CubeFace {
    /// Single-letter face code as it appears in tile paths.
    pub fn letter(self) -> char {
        match self {
            CubeFace::Front => 'f',
            CubeFace::Back => 'b',
            CubeFace::Left => 'l',
            CubeFace::Right => 'r',
            CubeFace::Up => 'u',
            CubeFace::Down => 'd',
        }
    }
}

/// Coordinates of one tile within a scene's pyramid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TileAddress {
    pub z: u32,
    pub face: CubeFace,
    pub y: u32,
    pub x: u32,
}

/// Templated tile addressing.
///
/// This URL scheme is a compatibility contract with the asset pipeline:
/// placeholders `{sceneId}`, `{z}`, `{f}`, `{y}`, `{x}` are substituted
/// textually and everything else in the template is preserved byte-exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileUrlTemplate {
    pub tile: String,
    pub preview: String,
}

impl Default for TileUrlTemplate {
    fn default() -> Self {
        Self {
            tile: "tiles/{sceneId}/{z}/{f}/{y}/{x}.jpg".to_string(),
            preview: "tiles/{sceneId}/preview.jpg".to_string(),
        }
    }
}

impl TileUrlTemplate {
    /// Per-scene source template with the tile-coordinate placeholders
    /// left intact for the renderer to fill per tile.
    pub fn source_template(&self, scene_id: &str) -> String {
        self.tile.replace("{sceneId}", scene_id)
    }

    /// Fully resolved URL for one tile.
    pub fn tile_url(&self, scene_id: &str, addr: TileAddress) -> String {
        self.source_template(scene_id)
            .replace("{z}", &addr.z.to_string())
            .replace("{f}", &addr.face.letter().to_string())
            .replace("{y}", &addr.y.to_string())
            .replace("{x}", &addr.x.to_string())
    }

    /// Preview/thumbnail image URL for a scene.
    pub fn preview_url(&self, scene_id: &str) -> String {
        self.preview.replace("{sceneId}", scene_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{CubeFace, TileAddress, TileUrlTemplate};
    use pretty_assertions::assert_eq;

    #[test]
    fn default_template_resolves_tile_paths() {
        let t = TileUrlTemplate::default();
        let addr = TileAddress {
            z: 2,
            face: CubeFace::Back,
            y: 1,
            x: 3,
        };
        assert_eq!(t.tile_url("lobby", addr), "tiles/lobby/2/b/1/3.jpg");
        assert_eq!(t.preview_url("lobby"), "tiles/lobby/preview.jpg");
    }

    #[test]
    fn source_template_keeps_tile_placeholders() {
        let t = TileUrlTemplate::default();
        assert_eq!(t.source_template("suite"), "tiles/suite/{z}/{f}/{y}/{x}.jpg");
    }

    #[test]
    fn custom_template_is_preserved_outside_placeholders() {
        let t = TileUrlTemplate {
            tile: "https://cdn.example/pano/{sceneId}/l{z}_{f}_{y}x{x}".to_string(),
            preview: "https://cdn.example/pano/{sceneId}/thumb".to_string(),
        };
        let addr = TileAddress {
            z: 0,
            face: CubeFace::Up,
            y: 0,
            x: 0,
        };
        assert_eq!(
            t.tile_url("s1", addr),
            "https://cdn.example/pano/s1/l0_u_0x0"
        );
    }

    #[test]
    fn all_faces_have_distinct_letters() {
        let faces = [
            CubeFace::Front,
            CubeFace::Back,
            CubeFace::Left,
            CubeFace::Right,
            CubeFace::Up,
            CubeFace::Down,
        ];
        let mut letters: Vec<char> = faces.iter().map(|f| f.letter()).collect();
        letters.sort_unstable();
        letters.dedup();
        assert_eq!(letters.len(), faces.len());
    }
}
