//! Screen dispatch plus the two full-screen notices (connecting, disconnected).

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

use crate::client::state::{ClientApp, ClientState};

use super::{quiz, results};

const TITLE: &str = " TRIVIA QUIZ ";

pub fn render(frame: &mut Frame, app: &ClientApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.state {
        ClientState::Connecting => {
            let player = app.config.username.as_deref().unwrap_or("anonymous");
            let body = vec![
                Line::from(format!("Reaching {}", app.server_addr())).fg(Color::Yellow),
                Line::from(format!("playing as {}", player)).fg(Color::DarkGray),
            ];
            render_notice(frame, area, Color::Cyan, body);
        }
        ClientState::Playing { .. } => quiz::render(frame, area, app),
        ClientState::Completed { .. } => results::render(frame, area, app),
        ClientState::Disconnected { message } => {
            let body = vec![
                Line::from(message.as_str()).fg(Color::Red).bold(),
                Line::from(""),
                Line::from("[Q] / [Enter] exit").fg(Color::DarkGray),
            ];
            render_notice(frame, area, Color::Red, body);
        }
    }
}

/// Bordered box centred on screen, sized to its body.
fn render_notice(frame: &mut Frame, area: Rect, accent: Color, body: Vec<Line<'_>>) {
    let height = body.len() as u16 + 4;
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, panel, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(56),
        Constraint::Fill(1),
    ])
    .areas(row);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .padding(Padding::vertical(1))
        .title(Line::from(TITLE).bold().centered());

    let widget = Paragraph::new(body)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, panel);
}
