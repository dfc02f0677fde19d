//! Rendering for the menu, best-score screen and pause overlay.

use super::centered_rect;
use flappy::host::{MenuItem, PauseItem};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn option_lines(labels: &[&'static str], selected: usize) -> Vec<Line<'static>> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i == selected {
                Line::from(Span::styled(
                    format!("> {} <", label),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    label.to_string(),
                    Style::default().fg(Color::Gray),
                ))
            }
        })
        .collect()
}

pub fn render_menu(frame: &mut Frame, area: Rect, selected: usize) {
    frame.render_widget(Clear, area);
    let rect = centered_rect(30, 9, area);

    let labels: Vec<&'static str> = MenuItem::ALL.iter().map(|item| item.label()).collect();
    let mut lines = vec![Line::from("")];
    lines.extend(option_lines(&labels, selected));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ choose  Enter select",
        Style::default().fg(Color::DarkGray),
    )));

    let menu = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Flappy ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(menu, rect);
}

pub fn render_score(frame: &mut Frame, area: Rect, best: u32) {
    frame.render_widget(Clear, area);
    let rect = centered_rect(30, 7, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Best Score: {}", best),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Esc back",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let score = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Score ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(score, rect);
}

pub fn render_pause(frame: &mut Frame, area: Rect, selected: usize) {
    let rect = centered_rect(24, 6, area);
    frame.render_widget(Clear, rect);

    let labels: Vec<&'static str> = PauseItem::ALL.iter().map(|item| item.label()).collect();
    let mut lines = vec![Line::from("")];
    lines.extend(option_lines(&labels, selected));

    let overlay = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Paused ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(overlay, rect);
}
