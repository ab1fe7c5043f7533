//! Decorative background: stage camera, chip model, mount/unmount lifecycle.

mod chip;
pub(crate) mod geometry;
pub(crate) mod materials;

use bevy::prelude::*;

pub use chip::{
    build_chip, expected_allocations, mount_chip, unmount_chip, ChipRoot, HeroScene,
    SceneAllocations, SceneSeed, FIN_COUNT, MARKER_COUNT,
};

/// Whether the animated background is mounted. `Off` is the reduced-motion
/// mode toggled from the nav bar or with `M`.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneState {
    #[default]
    Running,
    Off,
}

impl SceneState {
    pub fn toggled(self) -> Self {
        match self {
            SceneState::Running => SceneState::Off,
            SceneState::Off => SceneState::Running,
        }
    }
}

/// Camera shared by the background and the page UI.
#[derive(Component)]
pub struct StageCamera;

pub fn scene_plugin(app: &mut App) {
    app.add_systems(Startup, setup_stage)
        .add_systems(OnEnter(SceneState::Running), mount_chip)
        .add_systems(OnExit(SceneState::Running), unmount_chip)
        .add_systems(Update, toggle_motion_system);
}

pub fn setup_stage(mut commands: Commands) {
    commands.spawn((
        Name::new("stage camera"),
        StageCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 4.5, 7.5).looking_at(Vec3::new(0.0, -0.3, 0.0), Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 250.0,
    });
}

fn toggle_motion_system(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<SceneState>>,
    mut next: ResMut<NextState<SceneState>>,
) {
    if keys.just_pressed(KeyCode::KeyM) {
        next.set(state.get().toggled());
    }
}
