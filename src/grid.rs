//! The pure hex-grid core: axial geometry and the session grid model.
//!
//! Nothing in this module tree touches the ECS, the window, or the
//! filesystem. The editor layer translates pointer events into calls here
//! and redraws from the returned state; see [`crate::editor`].

mod geometry;
mod model;

pub use geometry::{HexLayout, HexOrientation};
pub use model::{Cell, CellId, GridError, HexGridModel, NEIGHBOR_OFFSETS, parse_id};
