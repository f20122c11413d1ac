use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetRegistry;
use engine::audio::{RodioAudio, SilentAudio, SoundPlayer};
use engine::game_loop::{GameLoop, TICK_RATE};
use engine::input::InputManager;
use engine::renderer::Renderer;
use game::characters::stats::{ARENA_HEIGHT, ARENA_WIDTH};
use game::menu::MenuAction;
use game::scene::{Scene, WINDOW_TITLE};
use game::session::GameSession;
use game::wave::WaveSpawner;
use game::Resources;

/// Knight versus skeleton waves
#[derive(Parser, Debug)]
#[command(name = "knight-arena", version, about)]
struct Args {
    /// Directory holding `images/` and `sounds/`
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Run without opening an audio device
    #[arg(long)]
    mute: bool,

    /// Seed for enemy placement
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    info!("Starting Knight Arena...");

    let registry = AssetRegistry::scan(&args.assets)
        .with_context(|| format!("Failed to index assets in {}", args.assets.display()))?;

    let mut audio: Box<dyn SoundPlayer> = if args.mute {
        info!("Audio muted");
        Box::new(SilentAudio)
    } else {
        match RodioAudio::new(&registry) {
            Ok(audio) => Box::new(audio),
            Err(e) => {
                warn!("{}, continuing without sound", e);
                Box::new(SilentAudio)
            }
        }
    };

    let spawner = match args.seed {
        Some(seed) => WaveSpawner::with_seed(seed),
        None => WaveSpawner::new(),
    };
    let mut session = GameSession::new(&registry, spawner);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                ARENA_WIDTH as f64,
                ARENA_HEIGHT as f64,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
    ))?;
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut title = String::new();

    event_loop.set_control_flow(ControlFlow::Poll);

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!(
                        "Close requested after {:.1}s of play over {} frames, shutting down...",
                        game_loop.tick_count() as f64 / TICK_RATE as f64,
                        game_loop.frame_count()
                    );
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                }
                WindowEvent::Focused(focused) => {
                    if focused {
                        game_loop.resume();
                    } else {
                        input.reset();
                        game_loop.pause();
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let position = Vec2::new(position.x as f32, position.y as f32);
                    input.process_cursor_moved(renderer.screen_to_arena(position));
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input.process_mouse_button(button, state);
                }
                WindowEvent::RedrawRequested => {
                    let ticks = game_loop.begin_frame();
                    let mut res = Resources::new(&registry, audio.as_mut());

                    for click in input.take_clicks() {
                        if session.click(click, &mut res) == Some(MenuAction::Exit) {
                            info!("Exit selected, shutting down...");
                            elwt.exit();
                            return;
                        }
                    }

                    for _ in 0..ticks {
                        session.update(input.player(), &mut res);
                    }

                    let scene = Scene::build(&session, &registry);
                    if scene.title != title {
                        window.set_title(&scene.title);
                        title = scene.title;
                    }

                    if let Err(e) = renderer.render(&scene.commands, &registry) {
                        error!("Render error: {}", e);
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
