//! Screen flow for the terminal host: menu, best-score screen, and the play
//! scene with its pause overlay.

use super::scene::PlayScene;
use crate::rules::engine::RulesEngine;
use crate::rules::run::RunPhase;
use crate::utils::persistence::KeyValueStore;
use rand::Rng;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Score,
    Play,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Score,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [Self::Play, Self::Score, Self::Exit];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Score => "Score",
            Self::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseItem {
    Continue,
    Exit,
}

impl PauseItem {
    pub const ALL: [PauseItem; 2] = [Self::Continue, Self::Exit];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Continue => "Continue",
            Self::Exit => "Exit",
        }
    }
}

/// Device-independent input delivered by the terminal loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput {
    Flap,
    Up,
    Down,
    Select,
    /// Pause during play, leave secondary screens otherwise.
    Back,
}

pub struct App<S, R> {
    pub screen: Screen,
    pub menu_index: usize,
    pub pause_index: usize,
    pub should_quit: bool,
    scene: PlayScene<S, R>,
}

impl<S: KeyValueStore, R: Rng> App<S, R> {
    pub fn new(engine: RulesEngine<S>, rng: R) -> Self {
        Self {
            screen: Screen::Menu,
            menu_index: 0,
            pause_index: 0,
            should_quit: false,
            scene: PlayScene::new(engine, rng),
        }
    }

    pub fn scene(&self) -> &PlayScene<S, R> {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut PlayScene<S, R> {
        &mut self.scene
    }

    pub fn best_score(&self) -> u32 {
        self.scene.engine().best().current()
    }

    pub fn update(&mut self, dt: Duration) {
        if self.screen == Screen::Play {
            self.scene.update(dt);
        }
    }

    pub fn handle_input(&mut self, input: HostInput) {
        match self.screen {
            Screen::Menu => self.handle_menu_input(input),
            Screen::Score => {
                if matches!(input, HostInput::Back | HostInput::Select) {
                    self.screen = Screen::Menu;
                }
            }
            Screen::Play => self.handle_play_input(input),
        }
    }

    fn handle_menu_input(&mut self, input: HostInput) {
        let count = MenuItem::ALL.len();
        match input {
            HostInput::Up => self.menu_index = (self.menu_index + count - 1) % count,
            HostInput::Down => self.menu_index = (self.menu_index + 1) % count,
            HostInput::Select | HostInput::Flap => match MenuItem::ALL[self.menu_index] {
                MenuItem::Play => {
                    self.scene.restart();
                    self.screen = Screen::Play;
                }
                MenuItem::Score => self.screen = Screen::Score,
                MenuItem::Exit => self.should_quit = true,
            },
            HostInput::Back => self.should_quit = true,
        }
    }

    fn handle_play_input(&mut self, input: HostInput) {
        if self.scene.is_pause_overlay_shown() {
            let count = PauseItem::ALL.len();
            match input {
                HostInput::Up => self.pause_index = (self.pause_index + count - 1) % count,
                HostInput::Down => self.pause_index = (self.pause_index + 1) % count,
                HostInput::Back => self.scene.resume(),
                HostInput::Select | HostInput::Flap => match PauseItem::ALL[self.pause_index] {
                    PauseItem::Continue => self.scene.resume(),
                    PauseItem::Exit => {
                        info!("left run from pause menu");
                        self.screen = Screen::Menu;
                    }
                },
            }
            return;
        }

        match input {
            HostInput::Flap | HostInput::Up | HostInput::Select => self.scene.flap(),
            HostInput::Back => {
                if self.scene.engine().phase() == RunPhase::Running {
                    self.pause_index = 0;
                    self.scene.pause();
                }
            }
            HostInput::Down => {}
        }
    }
}
