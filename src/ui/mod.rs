//! Terminal rendering for every screen.

pub mod menu_scene;
pub mod play_scene;

use flappy::host::{App, Screen};
use flappy::KeyValueStore;
use rand::Rng;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Width in world units of a terminal whose full height shows `world_height`.
pub fn viewport_world_width(cols: u16, rows: u16, world_height: f64) -> f64 {
    if rows == 0 {
        return 0.0;
    }
    f64::from(cols) * world_height / f64::from(rows) / CELL_ASPECT
}

pub fn draw<S: KeyValueStore, R: Rng>(frame: &mut Frame, app: &App<S, R>) {
    let area = frame.size();
    match app.screen {
        Screen::Menu => menu_scene::render_menu(frame, area, app.menu_index),
        Screen::Score => menu_scene::render_score(frame, area, app.best_score()),
        Screen::Play => {
            play_scene::render_play(frame, area, app.scene());
            if app.scene().is_pause_overlay_shown() {
                menu_scene::render_pause(frame, area, app.pause_index);
            }
        }
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}
