use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::grid::{CellId, HexGridModel, HexLayout};

/// The session's grid model. One instance per editing session, owned by the
/// ECS as a resource; systems are the only mutators.
#[derive(Resource)]
pub struct GridModel(pub HexGridModel);

/// The hex layout in effect for this session (orientation + size).
#[derive(Resource)]
pub struct GridLayout(pub HexLayout);

/// Currently selected cell, if any.
#[derive(Resource, Default)]
pub struct Selection {
    /// Id of the selected cell. Cleared when that cell is deleted.
    pub current: Option<CellId>,
}

/// Accumulated view pan, in pixels.
///
/// Applied as the offset argument to every `axial_to_pixel` call; cell
/// pixel positions are re-derived each frame and never cached across pan
/// changes.
#[derive(Resource, Default)]
pub struct PanState {
    /// Current pan offset added to all derived pixel positions.
    pub offset: Vec2,
}

/// State of the id-renumbering text box in the side panel.
#[derive(Resource, Default)]
pub struct IdEntry {
    /// Text currently in the box.
    pub text: String,
    /// Last rejection message, shown inline until the next attempt.
    pub error: Option<String>,
}

/// Fired by Ctrl+S or the side panel's save button; consumed by
/// [`super::systems::save_scene`].
#[derive(Message)]
pub struct SaveScene;

/// Bundled model-editing state for the pointer handler.
#[derive(SystemParam)]
pub struct EditorInput<'w> {
    /// Mouse button state.
    pub buttons: Res<'w, ButtonInput<MouseButton>>,
    /// The grid being edited.
    pub model: ResMut<'w, GridModel>,
    /// Session layout.
    pub layout: Res<'w, GridLayout>,
    /// Current pan offset.
    pub pan: Res<'w, PanState>,
    /// Current selection.
    pub selection: ResMut<'w, Selection>,
}
