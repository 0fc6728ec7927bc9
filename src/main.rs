//! Arena Strike entry point
//!
//! Runs a headless scripted session against the simulation and logs what
//! happened. Usage: `arena-strike [settings.json] [seconds]`.

use std::path::Path;

use glam::DVec2;

use arena_strike::Settings;
use arena_strike::renderer::hud::HudState;
use arena_strike::renderer::{Draw, DrawList};
use arena_strike::sim::{GameState, PlayerConfig, PlayerInput, tick};

/// Frame rate of the scripted session
const FRAME_RATE: f64 = 60.0;
const DEFAULT_SESSION_SECONDS: f64 = 30.0;
/// Step applied by the sensitivity up/down keys
const SENSITIVITY_STEP: f64 = 0.05;

/// FPS from the timestamps of the last 60 frames
struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % 60;

        // Oldest entry is the one we will overwrite next
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (59.0 / elapsed).round() as u32;
            }
        }
    }
}

/// Key presses the script can make on a given frame
#[derive(Debug, Clone, Copy, Default)]
struct ScriptedFrame {
    input: PlayerInput,
    sensitivity_up: bool,
    sensitivity_down: bool,
}

/// Sweep the view back and forth while firing, strafe now and then,
/// zoom in for a few seconds and nudge sensitivity once each way.
fn scripted_frame(frame: u64) -> ScriptedFrame {
    let seconds = frame as f64 / FRAME_RATE;
    let sweep = if (seconds / 4.0).floor() as u64 % 2 == 0 { 6.0 } else { -6.0 };
    let zoom_press = frame == (10.0 * FRAME_RATE) as u64 || frame == (14.0 * FRAME_RATE) as u64;

    ScriptedFrame {
        input: PlayerInput {
            forward: seconds % 5.0 < 1.0,
            left: seconds % 7.0 < 0.5,
            right: (3.5..4.0).contains(&(seconds % 7.0)),
            back: false,
            mouse_delta: DVec2::new(sweep, 0.0),
            fire: true,
            zoom: zoom_press,
        },
        sensitivity_up: frame == (5.0 * FRAME_RATE) as u64,
        sensitivity_down: frame == (20.0 * FRAME_RATE) as u64,
    }
}

fn load_settings(path: Option<&Path>) -> Settings {
    let Some(path) = path else {
        log::info!("No settings file given, using defaults");
        return Settings::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => Settings::from_json_or_default(&json),
        Err(e) => {
            log::warn!("Could not read {} ({}), using defaults", path.display(), e);
            Settings::default()
        }
    }
}

fn save_settings(settings: &Settings, path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    match settings.to_json() {
        Ok(json) => match std::fs::write(path, json) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
        },
        Err(e) => log::warn!("Could not serialize settings: {}", e),
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Arena Strike (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(std::path::PathBuf::from);
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_SESSION_SECONDS);

    let mut settings = load_settings(settings_path.as_deref());
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Run seed {}", seed);

    let mut state = GameState::new(seed, PlayerConfig::from(&settings));
    let mut fps = FpsCounter::new();
    let mut draw_list = DrawList::new();

    let dt = 1.0 / FRAME_RATE;
    let frames = (seconds * FRAME_RATE).round() as u64;
    let mut hits = 0u32;
    let mut deaths = 0u32;
    let mut peak_enemies = 0usize;
    let mut peak_draw_calls = 0usize;

    for frame in 0..frames {
        // Clock starts at one frame so the first shot is not blocked by cooldown at t=0
        let now = (frame + 1) as f64 * dt;
        let script = scripted_frame(frame);

        if script.sensitivity_up || script.sensitivity_down {
            let delta = if script.sensitivity_up { SENSITIVITY_STEP } else { -SENSITIVITY_STEP };
            settings.adjust_mouse_sensitivity(delta);
            state.player.set_mouse_sensitivity(settings.mouse_sensitivity);
            log::info!("Mouse sensitivity: {:.2}", settings.mouse_sensitivity);
            save_settings(&settings, settings_path.as_deref());
        }

        let report = tick(&mut state, &script.input, dt, now);
        if report.hit_position.is_some() {
            hits += 1;
        }
        if report.player_died {
            deaths += 1;
        }
        peak_enemies = peak_enemies.max(state.enemies.enemies.len());

        draw_list.clear();
        state.draw(&mut draw_list);
        peak_draw_calls = peak_draw_calls.max(draw_list.commands.len());

        fps.record(now);
        if settings.show_fps && frame % (5 * FRAME_RATE as u64) == 0 {
            let hud = HudState::from_player(&state.player, now);
            log::debug!(
                "t={:.1}s fps={} health={} ({}) enemies={}",
                now,
                fps.fps,
                hud.fraction_label,
                hud.percentage_label,
                state.enemies.living_count()
            );
            if let Some(countdown) = hud.respawn_countdown {
                log::debug!("Respawning in {}s", countdown);
            }
        }
    }

    let hud = HudState::from_player(&state.player, frames as f64 * dt);
    log::info!(
        "Session over after {:.1}s ({} ticks): {} hits, {} deaths, peak {} enemies, peak {} draw calls",
        seconds,
        state.ticks,
        hits,
        deaths,
        peak_enemies,
        peak_draw_calls
    );
    log::info!(
        "Final health {} ({}), {} enemies alive, {} particles",
        hud.fraction_label,
        hud.percentage_label,
        state.enemies.living_count(),
        state.particles.len()
    );
}
