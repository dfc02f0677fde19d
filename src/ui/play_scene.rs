//! Rendering for the play screen: scaled world, HUD and countdown.

use super::centered_rect;
use flappy::host::physics::pipe_bounds;
use flappy::host::PlayScene;
use flappy::KeyValueStore;
use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the play screen.
pub fn render_play<S: KeyValueStore, R: Rng>(
    frame: &mut Frame,
    area: Rect,
    scene: &PlayScene<S, R>,
) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Flappy ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Play area (left) | info panel (right)
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(22)])
        .split(inner);

    // Play area (top) + status bar (bottom 2 lines)
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(h_chunks[0]);

    render_world(frame, v_chunks[0], scene);
    render_status_bar(frame, v_chunks[1], scene);
    render_info_panel(frame, h_chunks[1], scene);

    if let Some(n) = scene.countdown() {
        let rect = centered_rect(14, 3, v_chunks[0]);
        frame.render_widget(Clear, rect);
        let text = Paragraph::new(format!("Fly in {}", n))
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(text, rect);
    }
}

/// Draw the bird and pipes, sampling the world at each cell center.
fn render_world<S: KeyValueStore, R: Rng>(
    frame: &mut Frame,
    area: Rect,
    scene: &PlayScene<S, R>,
) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let config = scene.engine().config();
    let world = scene.world();
    let x_scale = config.screen_width / width as f64;
    let y_scale = config.screen_height / height as f64;

    let bird = world.bird.bounds();
    let pipes: Vec<_> = world
        .pipes
        .iter()
        .map(|p| pipe_bounds(p, world.pipe_height()))
        .collect();

    let bird_char = if world.bird.velocity_y < -100.0 {
        "▲"
    } else if world.bird.velocity_y > 200.0 {
        "▼"
    } else {
        "►"
    };
    let bird_style = Style::default()
        .fg(if scene.is_bird_hit() {
            Color::Red
        } else {
            Color::Yellow
        })
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let wy = (row as f64 + 0.5) * y_scale;
        let mut spans = Vec::with_capacity(width);
        for col in 0..width {
            let wx = (col as f64 + 0.5) * x_scale;
            let in_bird = wx >= bird.left()
                && wx < bird.right()
                && wy >= bird.top()
                && wy < bird.bottom();
            if in_bird {
                spans.push(Span::styled(bird_char, bird_style));
                continue;
            }
            let in_pipe = pipes.iter().any(|p| {
                wx >= p.left() && wx < p.right() && wy >= p.top() && wy < p.bottom()
            });
            if in_pipe {
                spans.push(Span::styled("█", Style::default().fg(Color::Green)));
            } else {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar<S: KeyValueStore, R: Rng>(
    frame: &mut Frame,
    area: Rect,
    scene: &PlayScene<S, R>,
) {
    let text = if scene.engine().phase().is_game_over() {
        Line::from(Span::styled(
            "Crashed! Restarting...",
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(vec![
            Span::styled("[Space]", Style::default().fg(Color::White)),
            Span::styled(" Flap  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Esc]", Style::default().fg(Color::White)),
            Span::styled(" Pause  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Q]", Style::default().fg(Color::White)),
            Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
        ])
    };
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn render_info_panel<S: KeyValueStore, R: Rng>(
    frame: &mut Frame,
    area: Rect,
    scene: &PlayScene<S, R>,
) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let engine = scene.engine();
    let lines = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Gray)),
            Span::styled(
                engine.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best Score: ", Style::default().fg(Color::Gray)),
            Span::styled(
                engine.best_score_at_start().to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Difficulty: ", Style::default().fg(Color::Gray)),
            Span::styled(engine.tier().name(), Style::default().fg(Color::Cyan)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
