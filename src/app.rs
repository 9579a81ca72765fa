use glam::Vec2;

use crate::config::Config;
use crate::error::Result;
use crate::game::combat::CombatReport;
use crate::game::{FrameInput, Session, SessionState};
use crate::platform::{DisplayList, InputEvent, Key, Platform};
use crate::ui;

pub struct App {
    pub should_quit: bool,
    pub session: Session,
    totals: CombatReport,
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            session: Session::new(config.seed),
            totals: CombatReport::default(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Combat outcomes summed over every simulated frame.
    pub fn totals(&self) -> &CombatReport {
        &self.totals
    }

    pub fn on_event(&mut self, event: InputEvent, pointer: Vec2) {
        match event {
            InputEvent::Quit => self.should_quit = true,
            InputEvent::KeyDown(key) => self.on_key(key, pointer),
            InputEvent::MouseButtonDown(pos) => {
                self.session.fire(pos);
            }
        }
    }

    fn on_key(&mut self, key: Key, pointer: Vec2) {
        match key {
            Key::Char('q') => self.should_quit = true,
            Key::Escape | Key::Char('p') => {
                if self.session.state() != SessionState::GameOver {
                    self.session.toggle_pause();
                }
            }
            Key::Space => {
                self.session.fire(pointer);
            }
            _ => {}
        }
    }

    pub fn on_frame(&mut self, input: &FrameInput, dt: f32) {
        if let Some(report) = self.session.update(input, dt) {
            self.totals.absorb(report);
        }
    }
}

/// The frame loop: clock, input, simulation, render. Returns once the player
/// quits.
pub fn run<P: Platform>(platform: &mut P, app: &mut App) -> Result<()> {
    let started = platform.now();
    let mut frame = DisplayList::default();
    while !app.should_quit {
        let dt = platform.tick(app.config().fps);

        for event in platform.poll_events()? {
            app.on_event(event, platform.pointer_position());
            if app.should_quit {
                break;
            }
        }
        if app.should_quit {
            break;
        }

        let input = FrameInput {
            keys: platform.held_keys(),
            pointer: platform.pointer_position(),
        };
        app.on_frame(&input, dt);

        ui::render(&mut frame, &app.session, platform.fps());
        platform.present(&frame)?;
    }
    let waves = &app.session.world().waves;
    let totals = app.totals();
    log::info!(
        "quit on wave {} after {:.1}s ({} frames): {} enemies spawned, {} destroyed, {} hits taken",
        waves.wave(),
        platform.now() - started,
        app.session.frames(),
        waves.spawned_enemies(),
        totals.enemies_destroyed,
        totals.player_hits
    );
    Ok(())
}
