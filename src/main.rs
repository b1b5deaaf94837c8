use anyhow::Result;
use glam::{Quat, Vec3};
use log::{info, warn};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use character_rig::engine::assets::{
    AssetHandle, AssetId, ClipEntry, ClipName, Equipment, NodeTransform, PendingAssets, Skeleton,
};
use character_rig::engine::game_loop::FrameClock;
use character_rig::engine::input::{InputManager, KeyBindings};
use character_rig::game::characters::{CameraBasis, Character, CharacterStats, TickReport};

/// Clip durations (seconds) for the procedural demo character
const DEMO_CLIPS: [(ClipName, f32); 9] = [
    (ClipName::Idle, 2.0),
    (ClipName::Walk, 1.0),
    (ClipName::Run, 0.7),
    (ClipName::Attack, 0.9),
    (ClipName::Block, 0.6),
    (ClipName::Death, 1.8),
    (ClipName::Slash, 0.8),
    (ClipName::Jump, 1.1),
    (ClipName::PowerUp, 1.5),
];

/// Stand-in for the asynchronous asset loader: a small humanoid hierarchy,
/// every clip and a sword, delivered into the readiness gate.
fn demo_assets() -> Result<PendingAssets> {
    let mut skeleton = Skeleton::new("Armature");
    let root = skeleton.root();
    let hips = skeleton
        .add_node(root, "mixamorig:Hips", NodeTransform::from_translation(Vec3::new(0.0, 1.0, 0.0)))
        .ok_or_else(|| anyhow::anyhow!("Failed to add hips"))?;
    let spine = skeleton
        .add_node(hips, "mixamorig:Spine", NodeTransform::from_translation(Vec3::new(0.0, 0.3, 0.0)))
        .ok_or_else(|| anyhow::anyhow!("Failed to add spine"))?;
    let arm = skeleton
        .add_node(
            spine,
            "mixamorig:RightArm",
            NodeTransform {
                translation: Vec3::new(-0.2, 0.2, 0.0),
                rotation: Quat::from_rotation_z(-0.3),
                scale: Vec3::ONE,
            },
        )
        .ok_or_else(|| anyhow::anyhow!("Failed to add arm"))?;
    skeleton
        .add_node(arm, "mixamorig:RightHand", NodeTransform::from_translation(Vec3::new(-0.5, 0.0, 0.0)))
        .ok_or_else(|| anyhow::anyhow!("Failed to add hand"))?;

    let mut pending = PendingAssets::new();
    for (name, duration) in DEMO_CLIPS {
        let handle = AssetHandle::new(AssetId::from_name(name.as_str()));
        pending.add_clip(ClipEntry::new(name, duration).with_handle(handle))?;
    }
    pending.set_skeleton(skeleton);
    pending.set_equipment(Equipment {
        name: "Sword".to_string(),
        handle: AssetHandle::new(AssetId::from_name("sword.glb")),
    });

    Ok(pending)
}

/// Tick once unless paused. Press edges are consumed either way, so nothing
/// pressed during a pause fires on resume.
fn run_frame(
    character: &mut Character,
    input: &mut InputManager,
    clock: &mut FrameClock,
    camera: &CameraBasis,
) -> Option<TickReport> {
    let report = clock
        .begin_frame()
        .map(|dt| character.tick(input.snapshot(), camera, dt));
    input.end_frame();
    report
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting character rig demo...");

    let loaded = demo_assets()?.finish()?;
    let mut character = Character::new(loaded, CharacterStats::default())?;
    let mut input = InputManager::new(KeyBindings::default());
    let mut clock = FrameClock::new();
    let camera = CameraBasis::from_yaw(0.0);
    let mut last_animation = character.active_animation();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Character Rig")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created; WASD to move, Shift to run, J/K or mouse to attack/block, X to die, P to pause");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.physical_key == PhysicalKey::Code(KeyCode::KeyP)
                        && event.state == ElementState::Pressed
                        && !event.repeat
                    {
                        clock.toggle_pause();
                    }
                    if event.physical_key == PhysicalKey::Code(KeyCode::KeyX)
                        && event.state == ElementState::Pressed
                    {
                        if let Err(err) = character.die() {
                            warn!("{err}");
                        }
                    }
                    input.process_keyboard_event(&event);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input.process_mouse_button(state, button);
                }
                WindowEvent::Focused(false) => {
                    // Releases never arrive for keys held while unfocused
                    input.reset();
                }
                WindowEvent::RedrawRequested => {
                    if let Some(report) =
                        run_frame(&mut character, &mut input, &mut clock, &camera)
                    {
                        if report.active_animation != last_animation {
                            info!(
                                "{} -> {} at ({:.2}, {:.2}, {:.2}), yaw {:.2}",
                                last_animation,
                                report.active_animation,
                                report.position.x,
                                report.position.y,
                                report.position.z,
                                report.yaw
                            );
                            last_animation = report.active_animation;
                        }

                        if clock.frame_count() % 600 == 0 {
                            info!("FPS: {:.1}", clock.fps());
                        }
                    }
                    window.request_redraw();
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!(
                    "Final state {:?} after {} frames",
                    character.state(),
                    clock.frame_count()
                );
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
