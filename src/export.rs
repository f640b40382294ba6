//! Scene serialization: the adjacency-map contract and the re-importable
//! scene snapshot.
//!
//! This module only turns grids into JSON text and back; writing the result
//! to disk is the editor layer's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::{Cell, CellId, GridError, HexGridModel};

/// Failures while loading a scene file.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The text was not valid scene JSON.
    #[error("malformed scene file: {0}")]
    Json(#[from] serde_json::Error),
    /// The cell list violated a grid invariant (duplicate id or position).
    #[error("inconsistent scene: {0}")]
    Grid(#[from] GridError),
}

/// One cell as stored in a scene file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneCell {
    /// Unique cell id.
    pub id: CellId,
    /// Axial column coordinate.
    pub q: i32,
    /// Axial row coordinate.
    pub r: i32,
}

/// A saved editing session: the placed cells plus their adjacency map.
///
/// The adjacency block is derived state, rewritten on every save; it is
/// carried so downstream consumers of the file never have to recompute it.
/// The cell list is what import actually uses — adjacency alone cannot
/// recover coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Placed cells in placement order.
    pub cells: Vec<SceneCell>,
    /// Each cell's id mapped to its placed neighbors' ids, in fixed
    /// direction order.
    pub adjacency: BTreeMap<CellId, Vec<CellId>>,
}

impl Scene {
    /// Snapshots a grid for saving.
    pub fn from_model(model: &HexGridModel) -> Self {
        Self {
            cells: model
                .cells()
                .iter()
                .map(|c| SceneCell {
                    id: c.id,
                    q: c.q,
                    r: c.r,
                })
                .collect(),
            adjacency: model.adjacency(),
        }
    }

    /// Rebuilds a grid from a loaded scene, validating id and coordinate
    /// uniqueness. The stored adjacency block is ignored in favour of
    /// recomputing from the cells.
    pub fn into_model(self) -> Result<HexGridModel, SceneError> {
        let cells = self.cells.into_iter().map(|c| Cell {
            id: c.id,
            q: c.q,
            r: c.r,
        });
        Ok(HexGridModel::from_cells(cells)?)
    }

    /// Parses scene JSON text.
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes the scene as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Serializes just the adjacency map, the canonical export contract:
/// `{ "<cell_id>": [<neighbor_id>, ...], ... }` with string-encoded id keys
/// and missing neighbors omitted rather than null-padded.
pub fn adjacency_json(model: &HexGridModel) -> serde_json::Result<String> {
    serde_json::to_string(&model.adjacency())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── adjacency contract ──────────────────────────────────────────

    #[test]
    fn single_neighbor_pair() {
        let mut grid = HexGridModel::new();
        grid.place_cell(1, 0).unwrap();
        assert_eq!(adjacency_json(&grid).unwrap(), r#"{"0":[1],"1":[0]}"#);
    }

    #[test]
    fn direction_order_is_preserved_in_values() {
        let mut grid = HexGridModel::new();
        grid.place_cell(1, 0).unwrap();
        grid.place_cell(-1, 0).unwrap();
        assert_eq!(
            adjacency_json(&grid).unwrap(),
            r#"{"0":[1,2],"1":[0],"2":[0]}"#
        );
    }

    #[test]
    fn deleted_cells_leave_no_dangling_ids() {
        let mut grid = HexGridModel::new();
        grid.place_cell(1, 0).unwrap();
        grid.place_cell(-1, 0).unwrap();
        grid.delete_cell(1).unwrap();
        assert_eq!(adjacency_json(&grid).unwrap(), r#"{"0":[2],"2":[0]}"#);
    }

    #[test]
    fn isolated_cell_exports_an_empty_list() {
        let grid = HexGridModel::new();
        assert_eq!(adjacency_json(&grid).unwrap(), r#"{"0":[]}"#);
    }

    // ── scene round trip ────────────────────────────────────────────

    #[test]
    fn scene_round_trip_restores_the_grid() {
        let mut grid = HexGridModel::new();
        grid.place_cell(1, 0).unwrap();
        grid.place_cell(0, 1).unwrap();
        grid.reassign_id(2, 40).unwrap();

        let json = Scene::from_model(&grid).to_json().unwrap();
        let restored = Scene::from_json(&json).unwrap().into_model().unwrap();

        assert_eq!(restored.cells(), grid.cells());
        assert_eq!(restored.adjacency(), grid.adjacency());
    }

    #[test]
    fn imported_counter_resumes_above_loaded_ids() {
        let scene = Scene {
            cells: vec![
                SceneCell { id: 0, q: 0, r: 0 },
                SceneCell { id: 40, q: 1, r: 0 },
            ],
            adjacency: BTreeMap::new(),
        };
        let mut grid = scene.into_model().unwrap();
        assert_eq!(grid.place_cell(0, 1).unwrap().id, 41);
    }

    #[test]
    fn duplicate_ids_fail_to_import() {
        let scene = Scene {
            cells: vec![
                SceneCell { id: 5, q: 0, r: 0 },
                SceneCell { id: 5, q: 1, r: 0 },
            ],
            adjacency: BTreeMap::new(),
        };
        assert!(matches!(
            scene.into_model(),
            Err(SceneError::Grid(GridError::DuplicateId(5)))
        ));
    }

    #[test]
    fn duplicate_coordinates_fail_to_import() {
        let scene = Scene {
            cells: vec![
                SceneCell { id: 0, q: 2, r: -1 },
                SceneCell { id: 1, q: 2, r: -1 },
            ],
            adjacency: BTreeMap::new(),
        };
        assert!(matches!(
            scene.into_model(),
            Err(SceneError::Grid(GridError::PositionOccupied { q: 2, r: -1 }))
        ));
    }

    #[test]
    fn largest_possible_id_fails_to_import() {
        // Schema-valid but unusable: the counter could never advance past it.
        let scene = Scene {
            cells: vec![SceneCell {
                id: CellId::MAX,
                q: 0,
                r: 0,
            }],
            adjacency: BTreeMap::new(),
        };
        assert!(matches!(
            scene.into_model(),
            Err(SceneError::Grid(GridError::InvalidId(_)))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            Scene::from_json("{ not json"),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn stored_adjacency_is_ignored_on_import() {
        // A stale or hand-edited adjacency block must not leak through.
        let scene = Scene {
            cells: vec![
                SceneCell { id: 0, q: 0, r: 0 },
                SceneCell { id: 1, q: 1, r: 0 },
            ],
            adjacency: BTreeMap::from([(0, vec![99])]),
        };
        let grid = scene.into_model().unwrap();
        assert_eq!(grid.adjacency()[&0], vec![1]);
    }
}
