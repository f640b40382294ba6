#![warn(missing_docs)]
//! Interactive hexagonal-grid editor.
//!
//! The grid itself — axial coordinates, placement, neighbor lookup, id
//! management, adjacency export — lives in the pure [`grid`] and [`export`]
//! modules. The [`editor`] module wraps that core in a Bevy application:
//! click an open slot to place a hex, click a hex to select it, right-click
//! to delete, middle-drag to pan, Ctrl+S to export.

pub mod editor;
pub mod export;
pub mod grid;

use bevy::prelude::*;

/// Application-wide editor state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum EditorState {
    /// Normal editing — pointer input mutates the grid.
    #[default]
    Editing,
    /// Debug inspector overlay active (Tab to toggle).
    Debugging,
}
