use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scene::Scene;
use crate::tiles::TileUrlTemplate;

/// One bookable unit exposed to the surrounding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub scene_ids: Vec<String>,
    pub primary_scene_id: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Static tour configuration: tours plus the full scene graph keyed by
/// scene id. Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourCatalog {
    pub tours: BTreeMap<String, TourInfo>,
    pub scenes: BTreeMap<String, Scene>,
    #[serde(default)]
    pub tiles: TileUrlTemplate,
}

/// A hotspot or caller referenced a scene id that does not resolve within
/// the tour. At runtime this is a defect in authoring data, not a
/// recoverable condition; callers decide whether to swallow or surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneResolutionError {
    pub tour_id: String,
    pub scene_id: String,
}

impl std::fmt::Display for SceneResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scene '{}' does not resolve within tour '{}'",
            self.scene_id, self.tour_id
        )
    }
}

impl std::error::Error for SceneResolutionError {}

/// Authoring-data defects found by [`TourCatalog::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UnknownTour(String),
    /// A tour lists a scene id missing from the scene graph.
    MissingScene { tour_id: String, scene_id: String },
    /// A scene's own `id` field disagrees with its key in the graph.
    MismatchedSceneId { key: String, id: String },
    PrimaryNotInTour { tour_id: String, scene_id: String },
    DanglingHotspotTarget { scene_id: String, target: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::UnknownTour(id) => write!(f, "unknown tour '{id}'"),
            CatalogError::MissingScene { tour_id, scene_id } => {
                write!(f, "tour '{tour_id}' lists unknown scene '{scene_id}'")
            }
            CatalogError::MismatchedSceneId { key, id } => {
                write!(f, "scene keyed '{key}' declares id '{id}'")
            }
            CatalogError::PrimaryNotInTour { tour_id, scene_id } => {
                write!(
                    f,
                    "tour '{tour_id}' primary scene '{scene_id}' is not in its scene list"
                )
            }
            CatalogError::DanglingHotspotTarget { scene_id, target } => {
                write!(
                    f,
                    "scene '{scene_id}' link hotspot targets unknown scene '{target}'"
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl TourCatalog {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve a tour into a borrowed view; `UnknownTour` if absent.
    pub fn tour(&self, tour_id: &str) -> Result<TourView<'_>, CatalogError> {
        let info = self
            .tours
            .get(tour_id)
            .ok_or_else(|| CatalogError::UnknownTour(tour_id.to_string()))?;
        Ok(TourView {
            catalog: self,
            tour_id: tour_id.to_string(),
            info,
        })
    }

    /// Checks every invariant the runtime relies on, collecting all defects
    /// so content authors see the full picture in one pass.
    pub fn validate(&self) -> Result<(), Vec<CatalogError>> {
        let mut errors = Vec::new();

        for (key, scene) in &self.scenes {
            if &scene.id != key {
                errors.push(CatalogError::MismatchedSceneId {
                    key: key.clone(),
                    id: scene.id.clone(),
                });
            }
        }

        for (tour_id, info) in &self.tours {
            for scene_id in &info.scene_ids {
                if !self.scenes.contains_key(scene_id) {
                    errors.push(CatalogError::MissingScene {
                        tour_id: tour_id.clone(),
                        scene_id: scene_id.clone(),
                    });
                }
            }
            if !info.scene_ids.contains(&info.primary_scene_id) {
                errors.push(CatalogError::PrimaryNotInTour {
                    tour_id: tour_id.clone(),
                    scene_id: info.primary_scene_id.clone(),
                });
            }

            // Hotspot targets must resolve within the same tour.
            for scene_id in &info.scene_ids {
                let Some(scene) = self.scenes.get(scene_id) else {
                    continue;
                };
                for hotspot in &scene.link_hotspots {
                    if !info.scene_ids.contains(&hotspot.target_scene_id) {
                        errors.push(CatalogError::DanglingHotspotTarget {
                            scene_id: scene_id.clone(),
                            target: hotspot.target_scene_id.clone(),
                        });
                    }
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Read-only view of one tour within a catalog.
#[derive(Debug, Clone)]
pub struct TourView<'a> {
    catalog: &'a TourCatalog,
    tour_id: String,
    info: &'a TourInfo,
}

impl<'a> TourView<'a> {
    pub fn tour_id(&self) -> &str {
        &self.tour_id
    }

    pub fn info(&self) -> &TourInfo {
        self.info
    }

    pub fn tiles(&self) -> &TileUrlTemplate {
        &self.catalog.tiles
    }

    pub fn primary_scene_id(&self) -> &str {
        &self.info.primary_scene_id
    }

    /// Pure, synchronous scene lookup scoped to this tour.
    pub fn lookup(&self, scene_id: &str) -> Result<&'a Scene, SceneResolutionError> {
        if !self.info.scene_ids.iter().any(|s| s == scene_id) {
            return Err(SceneResolutionError {
                tour_id: self.tour_id.clone(),
                scene_id: scene_id.to_string(),
            });
        }
        self.catalog
            .scenes
            .get(scene_id)
            .ok_or_else(|| SceneResolutionError {
                tour_id: self.tour_id.clone(),
                scene_id: scene_id.to_string(),
            })
    }

    pub fn scenes(&self) -> impl Iterator<Item = &'a Scene> + '_ {
        self.info
            .scene_ids
            .iter()
            .filter_map(|id| self.catalog.scenes.get(id))
    }
}
