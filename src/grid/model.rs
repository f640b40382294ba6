//! The grid model: placed cells, id management, neighbor queries, and the
//! derived adjacency map.

use std::collections::BTreeMap;

use bevy::math::Vec2;
use thiserror::Error;

use super::geometry::HexLayout;

/// Unique identifier of a placed cell.
pub type CellId = u64;

/// The six axial offsets to a cell's neighbors, in the fixed enumeration
/// order used for placement search and adjacency export: right, left,
/// bottom-right, top-left, top-right, bottom-left.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 6] =
    [(1, 0), (-1, 0), (0, 1), (0, -1), (1, -1), (-1, 1)];

/// One placed hexagon.
///
/// `id` is unique among currently placed cells; `(q, r)` uniquely identifies
/// a grid position. The pixel position is never stored: it is re-derived
/// from `(q, r)` via [`HexLayout::axial_to_pixel`] on every redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unique cell id, auto-assigned at placement, user-reassignable.
    pub id: CellId,
    /// Axial column coordinate.
    pub q: i32,
    /// Axial row coordinate.
    pub r: i32,
}

/// Recoverable failures of grid operations.
///
/// None of these leave the model in an inconsistent state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Placement target already holds a cell.
    #[error("position ({q}, {r}) is already occupied")]
    PositionOccupied {
        /// Axial column of the occupied position.
        q: i32,
        /// Axial row of the occupied position.
        r: i32,
    },
    /// No cell with the given id exists.
    #[error("no cell with id {0}")]
    NotFound(CellId),
    /// Another cell already holds the requested id.
    #[error("id {0} is already taken by another cell")]
    DuplicateId(CellId),
    /// The requested id is not a non-negative integer.
    #[error("{0:?} is not a valid cell id")]
    InvalidId(String),
}

/// Parses user-entered text into a [`CellId`].
///
/// Ids are non-negative integers; anything else (empty, signed, fractional,
/// non-numeric) is [`GridError::InvalidId`].
pub fn parse_id(text: &str) -> Result<CellId, GridError> {
    text.trim()
        .parse::<CellId>()
        .map_err(|_| GridError::InvalidId(text.to_string()))
}

/// The set of placed cells on an unbounded axial grid.
///
/// Owns its cells exclusively; callers refer to them only by id or
/// coordinate. Constructed once per editing session — there is no
/// process-wide grid. Insertion order is preserved for iteration but
/// carries no other meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexGridModel {
    cells: Vec<Cell>,
    /// Lower bound for the next auto-assigned id. Placement scans upward
    /// from here past any id taken by deletion-survivors or manual
    /// reassignment.
    next_id: CellId,
}

impl Default for HexGridModel {
    fn default() -> Self {
        Self::new()
    }
}

impl HexGridModel {
    /// A fresh session grid, seeded with the single starting cell
    /// (id 0 at the axial origin).
    pub fn new() -> Self {
        Self {
            cells: vec![Cell { id: 0, q: 0, r: 0 }],
            next_id: 1,
        }
    }

    /// A grid with no cells, used when rebuilding from an imported scene.
    pub fn empty() -> Self {
        Self {
            cells: Vec::new(),
            next_id: 0,
        }
    }

    /// All placed cells in placement order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The six neighbor coordinates of `(q, r)`, in fixed direction order.
    pub fn neighbor_coords(q: i32, r: i32) -> [(i32, i32); 6] {
        NEIGHBOR_OFFSETS.map(|(dq, dr)| (q + dq, r + dr))
    }

    /// The cell at `(q, r)`, if any. Linear scan; grids stay small enough
    /// that indexing by coordinate isn't worth the bookkeeping.
    pub fn find_cell(&self, q: i32, r: i32) -> Option<&Cell> {
        self.cells.iter().find(|c| c.q == q && c.r == r)
    }

    /// The cell with the given id, if any.
    pub fn cell_by_id(&self, id: CellId) -> Option<&Cell> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// Places a new cell at `(q, r)` with the smallest free id at or above
    /// the internal counter.
    ///
    /// Fails with [`GridError::PositionOccupied`] if a cell is already
    /// there. Does not require adjacency to an existing cell — the editor
    /// restricts placement to open neighbor slots, but the model leaves
    /// that choice to the caller.
    pub fn place_cell(&mut self, q: i32, r: i32) -> Result<Cell, GridError> {
        if self.find_cell(q, r).is_some() {
            return Err(GridError::PositionOccupied { q, r });
        }
        // Skip ids freed by deletion or claimed via reassign_id, so
        // auto-assignment can never collide with a manually-set id.
        let mut id = self.next_id;
        while self.cell_by_id(id).is_some() {
            id += 1;
        }
        self.next_id = id + 1;
        let cell = Cell { id, q, r };
        self.cells.push(cell);
        Ok(cell)
    }

    /// Removes the cell with the given id.
    ///
    /// Fails with [`GridError::NotFound`] if absent. Never cascades:
    /// former neighbors are untouched and the grid is allowed to become
    /// disconnected.
    pub fn delete_cell(&mut self, id: CellId) -> Result<Cell, GridError> {
        let idx = self
            .cells
            .iter()
            .position(|c| c.id == id)
            .ok_or(GridError::NotFound(id))?;
        Ok(self.cells.remove(idx))
    }

    /// Changes a cell's id in place.
    ///
    /// Fails with [`GridError::DuplicateId`] if another cell holds
    /// `new_id`, or [`GridError::NotFound`] if `old_id` is absent. The
    /// auto-assignment counter is left alone; [`Self::place_cell`] scans
    /// past taken ids, so a manual id can never be handed out twice.
    pub fn reassign_id(&mut self, old_id: CellId, new_id: CellId) -> Result<(), GridError> {
        if old_id != new_id && self.cell_by_id(new_id).is_some() {
            return Err(GridError::DuplicateId(new_id));
        }
        let cell = self
            .cells
            .iter_mut()
            .find(|c| c.id == old_id)
            .ok_or(GridError::NotFound(old_id))?;
        cell.id = new_id;
        Ok(())
    }

    /// The derived adjacency map: every cell's id to the ids of its
    /// currently-placed neighbors, in fixed direction order, absent
    /// neighbors dropped.
    ///
    /// Recomputed from scratch on every call; it is never maintained
    /// incrementally, so it cannot drift from the cell set.
    pub fn adjacency(&self) -> BTreeMap<CellId, Vec<CellId>> {
        self.cells
            .iter()
            .map(|cell| {
                let neighbors = Self::neighbor_coords(cell.q, cell.r)
                    .into_iter()
                    .filter_map(|(q, r)| self.find_cell(q, r))
                    .map(|n| n.id)
                    .collect();
                (cell.id, neighbors)
            })
            .collect()
    }

    /// Every unoccupied coordinate adjacent to at least one placed cell,
    /// deduplicated, in placement-scan order. These are the positions the
    /// editor offers for the next placement.
    pub fn open_slots(&self) -> Vec<(i32, i32)> {
        let mut seen = std::collections::HashSet::new();
        let mut slots = Vec::new();
        for cell in &self.cells {
            for (q, r) in Self::neighbor_coords(cell.q, cell.r) {
                if self.find_cell(q, r).is_none() && seen.insert((q, r)) {
                    slots.push((q, r));
                }
            }
        }
        slots
    }

    /// The cell whose hexagon contains the given pixel point, if any.
    ///
    /// Exact polygon containment against each cell's outline. In a valid
    /// non-overlapping tiling at most one cell matches, so the first hit
    /// wins.
    pub fn hit_test(&self, point: Vec2, layout: &HexLayout, offset: Vec2) -> Option<&Cell> {
        self.cells.iter().find(|cell| {
            let center = layout.axial_to_pixel(cell.q, cell.r, offset);
            layout.contains(center, point)
        })
    }

    /// Rebuilds a session grid from imported cells.
    ///
    /// Rejects duplicate ids ([`GridError::DuplicateId`]), duplicate
    /// coordinates ([`GridError::PositionOccupied`]), and ids with no
    /// successor ([`GridError::InvalidId`] — the counter must be able to
    /// resume above the highest imported id).
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Result<Self, GridError> {
        let mut model = Self::empty();
        for cell in cells {
            if model.cell_by_id(cell.id).is_some() {
                return Err(GridError::DuplicateId(cell.id));
            }
            if model.find_cell(cell.q, cell.r).is_some() {
                return Err(GridError::PositionOccupied {
                    q: cell.q,
                    r: cell.r,
                });
            }
            let next = cell
                .id
                .checked_add(1)
                .ok_or_else(|| GridError::InvalidId(cell.id.to_string()))?;
            model.next_id = model.next_id.max(next);
            model.cells.push(cell);
        }
        Ok(model)
    }
}
