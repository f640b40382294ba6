//! Binary entry point: window + plugin wiring and the native CLI.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use hex_maker::EditorState;
use hex_maker::editor::{EditorConfig, EditorPlugin};

#[cfg(feature = "native")]
#[derive(clap::Parser, Debug)]
#[command(about = "Interactive hexagonal grid editor")]
struct Args {
    /// Center-to-corner hexagon radius in pixels.
    #[arg(long, default_value_t = 40.0)]
    hex_size: f32,
    /// Use the flat-top layout instead of pointy-top.
    #[arg(long)]
    flat_top: bool,
    /// Scene file to load at startup.
    #[arg(long)]
    load: Option<std::path::PathBuf>,
    /// Destination for the adjacency export (the scene snapshot lands
    /// alongside it).
    #[arg(long, default_value = "hexgrid.json")]
    save: std::path::PathBuf,
}

#[cfg(feature = "native")]
fn editor_config() -> EditorConfig {
    use clap::Parser;
    let args = Args::parse();
    EditorConfig {
        hex_size: args.hex_size,
        flat_top: args.flat_top,
        load_path: args.load,
        save_path: args.save,
        ..EditorConfig::default()
    }
}

#[cfg(not(feature = "native"))]
fn editor_config() -> EditorConfig {
    EditorConfig::default()
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Maker".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<EditorState>()
    .init_state::<EditorState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(EditorPlugin(editor_config()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(EditorState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins((
        bevy::remote::RemotePlugin::default(),
        bevy::remote::http::RemoteHttpPlugin::default(),
    ));

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<EditorState>>,
    mut next: ResMut<NextState<EditorState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            EditorState::Editing => EditorState::Debugging,
            EditorState::Debugging => EditorState::Editing,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
