use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy_egui::egui;

use super::EditorConfig;
use super::entities::{
    EditorInput, GridLayout, GridModel, IdEntry, PanState, SaveScene, Selection,
};
use crate::export::{Scene, adjacency_json};
use crate::grid::{CellId, HexGridModel, HexLayout, HexOrientation, parse_id};

/// Spawns the 2D camera and builds the session grid, loading a scene file
/// when one was given on the command line.
pub fn setup_session(mut commands: Commands, cfg: Res<EditorConfig>) {
    commands.spawn((Name::new("EditorCamera"), Camera2d));

    let layout = HexLayout {
        orientation: if cfg.flat_top {
            HexOrientation::FlatTop
        } else {
            HexOrientation::PointyTop
        },
        hex_size: cfg.hex_size,
    };

    let model = match &cfg.load_path {
        Some(path) => match load_scene(path) {
            Ok(model) => {
                info!("loaded {} cells from {}", model.cells().len(), path.display());
                model
            }
            Err(err) => {
                error!("could not load {}: {err}; starting fresh", path.display());
                HexGridModel::new()
            }
        },
        None => HexGridModel::new(),
    };

    commands.insert_resource(GridLayout(layout));
    commands.insert_resource(GridModel(model));
}

fn load_scene(path: &std::path::Path) -> Result<HexGridModel, BevyError> {
    let text = std::fs::read_to_string(path)?;
    Ok(Scene::from_json(&text)?.into_model()?)
}

/// What a pointer press over the canvas should do to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickAction {
    /// Select the cell under the cursor.
    Select(CellId),
    /// Place a new cell on the open slot under the cursor.
    Place(i32, i32),
    /// Delete the cell under the cursor.
    Delete(CellId),
}

/// Routes a press to a grid action, or to nothing when egui has captured
/// the pointer (a press on the side panel must not fall through to the
/// world behind it).
///
/// Both cell and slot targeting use exact polygon containment, so clicks
/// near a corner land in the hexagon that actually contains them.
fn resolve_click(
    model: &HexGridModel,
    layout: &HexLayout,
    offset: Vec2,
    point: Vec2,
    delete: bool,
    ui_captured: bool,
) -> Option<ClickAction> {
    if ui_captured {
        return None;
    }
    let hit = model.hit_test(point, layout, offset).map(|c| c.id);
    if delete {
        return hit.map(ClickAction::Delete);
    }
    if let Some(id) = hit {
        return Some(ClickAction::Select(id));
    }
    // Not on a cell: try the open neighbor slots, in placement-scan order.
    model
        .open_slots()
        .into_iter()
        .find(|&(q, r)| layout.contains(layout.axial_to_pixel(q, r, offset), point))
        .map(|(q, r)| ClickAction::Place(q, r))
}

/// Translates clicks into model calls: left selects a cell or places one on
/// an open neighbor slot, right deletes. Presses the UI claims are ignored.
pub fn handle_pointer(
    mut input: EditorInput,
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
) {
    let left = input.buttons.just_pressed(MouseButton::Left);
    let right = input.buttons.just_pressed(MouseButton::Right);
    if !left && !right {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_tf)) = camera_q.single() else {
        return;
    };
    let Ok(point) = camera.viewport_to_world_2d(cam_tf, cursor) else {
        return;
    };
    let ui_captured = egui_ctx
        .single_mut()
        .map(|mut ctx| ctx.get_mut().wants_pointer_input())
        .unwrap_or(false);

    let layout = input.layout.0;
    let offset = input.pan.offset;

    match resolve_click(&input.model.0, &layout, offset, point, right, ui_captured) {
        Some(ClickAction::Select(id)) => input.selection.current = Some(id),
        Some(ClickAction::Delete(id)) => match input.model.0.delete_cell(id) {
            Ok(cell) => {
                info!("deleted cell {id} at ({}, {})", cell.q, cell.r);
                if input.selection.current == Some(id) {
                    input.selection.current = None;
                }
            }
            Err(err) => warn!("delete failed: {err}"),
        },
        Some(ClickAction::Place(q, r)) => match input.model.0.place_cell(q, r) {
            Ok(cell) => {
                info!("placed cell {} at ({q}, {r})", cell.id);
                input.selection.current = Some(cell.id);
            }
            Err(err) => warn!("place failed: {err}"),
        },
        None => {}
    }
}

/// Middle-button drag pans the view by accumulating into [`PanState`].
pub fn pan_view(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    mut pan: ResMut<PanState>,
) {
    let mut delta = Vec2::ZERO;
    for ev in motion.read() {
        delta += ev.delta;
    }
    if buttons.pressed(MouseButton::Middle) && delta != Vec2::ZERO {
        // Screen-space y runs downward, world y upward.
        pan.offset += Vec2::new(delta.x, -delta.y);
    }
}

/// Redraws every cell outline, the selection highlight, and the open
/// placement slots. Pixel positions come from `axial_to_pixel` with the
/// live pan offset each frame.
pub fn draw_grid(
    mut gizmos: Gizmos,
    model: Res<GridModel>,
    layout: Res<GridLayout>,
    pan: Res<PanState>,
    selection: Res<Selection>,
    cfg: Res<EditorConfig>,
) {
    for cell in model.0.cells() {
        let center = layout.0.axial_to_pixel(cell.q, cell.r, pan.offset);
        let color = if selection.current == Some(cell.id) {
            cfg.highlight_color
        } else {
            cfg.outline_color
        };
        gizmos.linestrip_2d(closed_outline(&layout.0, center), color);
    }
    for (q, r) in model.0.open_slots() {
        let center = layout.0.axial_to_pixel(q, r, pan.offset);
        gizmos.linestrip_2d(closed_outline(&layout.0, center), cfg.slot_color);
    }
}

fn closed_outline(layout: &HexLayout, center: Vec2) -> impl Iterator<Item = Vec2> {
    let corners = layout.corners(center);
    corners.into_iter().chain(std::iter::once(corners[0]))
}

/// Draws each cell's id at its center as a screen-projected egui label.
pub fn draw_cell_labels(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    model: Res<GridModel>,
    layout: Res<GridLayout>,
    pan: Res<PanState>,
    mut ready: Local<bool>,
) {
    // Egui fonts aren't available until after the first Context::run() in the render pass.
    if !*ready {
        *ready = true;
        return;
    }
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());

    for cell in model.0.cells() {
        let center = layout.0.axial_to_pixel(cell.q, cell.r, pan.offset);
        if let Ok(viewport) = camera.world_to_viewport(cam_gt, center.extend(0.0)) {
            painter.text(
                egui::pos2(viewport.x, viewport.y),
                egui::Align2::CENTER_CENTER,
                cell.id.to_string(),
                egui::FontId::proportional(13.0),
                egui::Color32::WHITE,
            );
        }
    }
}

/// Side panel: selection details with the movable-neighbor list, the id
/// renumbering box, and the save button.
pub fn side_panel(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    mut model: ResMut<GridModel>,
    mut selection: ResMut<Selection>,
    mut id_entry: ResMut<IdEntry>,
    mut save: MessageWriter<SaveScene>,
    mut ready: Local<bool>,
) {
    if !*ready {
        *ready = true;
        return;
    }
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    egui::Window::new("Grid")
        .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
        .resizable(false)
        .show(ctx.get_mut(), |ui| {
            ui.label(format!("{} cells placed", model.0.cells().len()));
            ui.separator();

            let Some(id) = selection.current else {
                ui.label("Click a hex to select it.");
                return;
            };
            let Some(cell) = model.0.cell_by_id(id).copied() else {
                return;
            };

            ui.label(format!("Selected hex id: {id}"));
            ui.label(format!("Position: ({}, {})", cell.q, cell.r));
            for (q, r) in HexGridModel::neighbor_coords(cell.q, cell.r) {
                if let Some(neighbor) = model.0.find_cell(q, r) {
                    ui.label(format!("Movable to hex id: {}", neighbor.id));
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("New id:");
                ui.text_edit_singleline(&mut id_entry.text);
                if ui.button("Renumber").clicked() {
                    apply_renumber(&mut model.0, &mut selection, &mut id_entry, id);
                }
            });
            if let Some(err) = &id_entry.error {
                ui.colored_label(egui::Color32::LIGHT_RED, err);
            }
            ui.separator();

            if ui.button("Save scene").clicked() {
                save.write(SaveScene);
            }
        });
}

/// Applies the renumber box to the selected cell and keeps the selection
/// pointing at it under its new id. Failures land in the entry's inline
/// error without touching the selection.
fn apply_renumber(
    model: &mut HexGridModel,
    selection: &mut Selection,
    entry: &mut IdEntry,
    id: CellId,
) {
    let outcome =
        parse_id(&entry.text).and_then(|new_id| model.reassign_id(id, new_id).map(|()| new_id));
    match outcome {
        Ok(new_id) => {
            selection.current = Some(new_id);
            entry.text.clear();
            entry.error = None;
        }
        Err(err) => entry.error = Some(err.to_string()),
    }
}

/// Ctrl+S requests a save.
pub fn save_hotkey(keys: Res<ButtonInput<KeyCode>>, mut save: MessageWriter<SaveScene>) {
    let ctrl = keys.pressed(KeyCode::ControlLeft) || keys.pressed(KeyCode::ControlRight);
    if ctrl && keys.just_pressed(KeyCode::KeyS) {
        save.write(SaveScene);
    }
}

/// Writes the adjacency export to the configured path, plus a scene
/// snapshot alongside it for later re-import.
///
/// The adjacency map is the grid's external contract; the scene file exists
/// because adjacency alone cannot recover coordinates.
pub fn save_scene(
    mut requests: MessageReader<SaveScene>,
    model: Res<GridModel>,
    cfg: Res<EditorConfig>,
) {
    if requests.read().next().is_none() {
        return;
    }
    match write_exports(&model.0, &cfg.save_path) {
        Ok(scene_path) => info!(
            "saved {} cells to {} (scene: {})",
            model.0.cells().len(),
            cfg.save_path.display(),
            scene_path.display()
        ),
        Err(err) => error!("save failed: {err}"),
    }
}

fn write_exports(
    model: &HexGridModel,
    path: &std::path::Path,
) -> Result<std::path::PathBuf, BevyError> {
    std::fs::write(path, adjacency_json(model)?)?;
    let scene_path = path.with_extension("scene.json");
    std::fs::write(&scene_path, Scene::from_model(model).to_json()?)?;
    Ok(scene_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── click routing ───────────────────────────────────────────────

    #[test]
    fn captured_pointer_never_reaches_the_grid() {
        let model = HexGridModel::new();
        let layout = HexLayout::default();
        let center = layout.axial_to_pixel(0, 0, Vec2::ZERO);
        // Same press, UI capture on: neither select nor delete goes through.
        assert_eq!(
            resolve_click(&model, &layout, Vec2::ZERO, center, false, true),
            None
        );
        assert_eq!(
            resolve_click(&model, &layout, Vec2::ZERO, center, true, true),
            None
        );
        assert_eq!(
            resolve_click(&model, &layout, Vec2::ZERO, center, false, false),
            Some(ClickAction::Select(0))
        );
    }

    #[test]
    fn captured_pointer_does_not_place_on_a_hidden_slot() {
        let model = HexGridModel::new();
        let layout = HexLayout::default();
        let slot = layout.axial_to_pixel(1, 0, Vec2::ZERO);
        assert_eq!(
            resolve_click(&model, &layout, Vec2::ZERO, slot, false, false),
            Some(ClickAction::Place(1, 0))
        );
        // A panel over the slot claims the press.
        assert_eq!(
            resolve_click(&model, &layout, Vec2::ZERO, slot, false, true),
            None
        );
    }

    #[test]
    fn delete_press_targets_the_cell_under_the_cursor() {
        let mut model = HexGridModel::new();
        model.place_cell(1, 0).unwrap();
        let layout = HexLayout::default();
        let offset = Vec2::new(30.0, -12.0);
        let center = layout.axial_to_pixel(1, 0, offset);
        assert_eq!(
            resolve_click(&model, &layout, offset, center, true, false),
            Some(ClickAction::Delete(1))
        );
        // Off the grid a delete press does nothing.
        let far = Vec2::new(10_000.0, 10_000.0);
        assert_eq!(resolve_click(&model, &layout, offset, far, true, false), None);
    }

    // ── renumbering ─────────────────────────────────────────────────

    #[test]
    fn renumber_moves_the_selection_to_the_new_id() {
        let mut model = HexGridModel::new();
        let mut selection = Selection { current: Some(0) };
        let mut entry = IdEntry {
            text: "7".into(),
            error: None,
        };
        apply_renumber(&mut model, &mut selection, &mut entry, 0);
        assert_eq!(selection.current, Some(7));
        assert_eq!(model.cell_by_id(7).map(|c| (c.q, c.r)), Some((0, 0)));
        assert!(entry.error.is_none());
        assert!(entry.text.is_empty());
    }

    #[test]
    fn failed_renumber_keeps_the_selection_and_reports() {
        let mut model = HexGridModel::new();
        model.place_cell(1, 0).unwrap();
        let mut selection = Selection { current: Some(1) };
        let mut entry = IdEntry {
            text: "0".into(),
            error: None,
        };
        apply_renumber(&mut model, &mut selection, &mut entry, 1);
        assert_eq!(selection.current, Some(1));
        assert!(entry.error.is_some());

        entry.text = "abc".into();
        apply_renumber(&mut model, &mut selection, &mut entry, 1);
        assert_eq!(selection.current, Some(1));
        assert!(entry.error.is_some());
        assert_eq!(model.cell_by_id(1).map(|c| (c.q, c.r)), Some((1, 0)));
    }
}
