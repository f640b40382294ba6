//! The interactive editor: input adapter + renderer around the pure grid
//! core.
//!
//! All grid semantics live in [`crate::grid`]; this plugin only translates
//! pointer/keyboard events into model calls and redraws from model state
//! every frame.

mod entities;
mod systems;

pub use entities::{GridLayout, GridModel, Selection};

use std::path::PathBuf;

use bevy::prelude::*;

use crate::EditorState;
use entities::{IdEntry, PanState, SaveScene};

/// Per-session configuration for the editor.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct EditorConfig {
    /// Center-to-corner hexagon radius in pixels.
    pub hex_size: f32,
    /// Use the flat-top layout instead of the default pointy-top.
    pub flat_top: bool,
    /// Scene file to load at startup, if any.
    pub load_path: Option<PathBuf>,
    /// Destination for the adjacency export; the re-importable scene
    /// snapshot is written alongside it.
    pub save_path: PathBuf,
    /// Outline color for placed cells.
    pub outline_color: Color,
    /// Outline color for the selected cell.
    pub highlight_color: Color,
    /// Outline color for open placement slots.
    pub slot_color: Color,
    /// Background clear color.
    pub clear_color: Color,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hex_size: 40.0,
            flat_top: false,
            load_path: None,
            save_path: PathBuf::from("hexgrid.json"),
            outline_color: Color::srgb(0.85, 0.85, 0.9),
            highlight_color: Color::srgb(1.0, 0.8, 0.2),
            slot_color: Color::srgb(0.25, 0.3, 0.35),
            clear_color: Color::srgb(0.02, 0.02, 0.04),
        }
    }
}

/// Hex-grid editor: click-to-place/select/delete, pan, renumber, export.
pub struct EditorPlugin(pub EditorConfig);

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<EditorConfig>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .init_resource::<Selection>()
            .init_resource::<PanState>()
            .init_resource::<IdEntry>()
            .add_message::<SaveScene>()
            .add_systems(Startup, systems::setup_session)
            .add_systems(
                Update,
                (
                    systems::handle_pointer,
                    systems::pan_view,
                    systems::save_hotkey,
                )
                    .run_if(in_state(EditorState::Editing)),
            )
            .add_systems(
                Update,
                (
                    systems::draw_grid,
                    systems::draw_cell_labels,
                    systems::side_panel,
                    systems::save_scene.after(systems::side_panel),
                ),
            );
    }
}
