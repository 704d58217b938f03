//! Completion screen for the client.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::client::state::{ClientApp, ClientState};
use crate::engine::ScoreReport;

/// Render the final report.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientState::Completed {
        report,
        deck_length,
    } = &app.state
    else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Percentage(25),
        Constraint::Length(6),  // Score summary
        Constraint::Length(6),  // Details
        Constraint::Length(2),  // Controls
        Constraint::Min(0),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], report);
    render_details(frame, chunks[2], report, *deck_length);
    render_controls(frame, chunks[3]);
}

fn grade_color(accuracy: u32) -> Color {
    match accuracy {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, report: &ScoreReport) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({}%)",
                report.score, report.answered, report.accuracy
            ),
            Style::default().fg(grade_color(report.accuracy)).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, area);
}

fn render_details(frame: &mut Frame, area: Rect, report: &ScoreReport, deck_length: usize) {
    let skipped = deck_length.saturating_sub(report.answered);
    let lines = vec![
        Line::from(format!("Points: {}", report.points)),
        Line::from(format!("Best streak: {}", report.best_streak)),
        Line::from(format!("Answered {} of {} questions", report.answered, deck_length)),
        Line::from(Span::styled(
            if skipped > 0 {
                format!("{} left unanswered", skipped)
            } else {
                "Every question answered".to_string()
            },
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("r play again  ·  p back to questions  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
