//! Question screen for the client.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::client::state::{ClientApp, ClientState, Status, StatusLevel};
use crate::models::{QuestionView, Reveal, Snapshot};

/// Render the current question.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let ClientState::Playing {
        question,
        snapshot,
        selected,
    } = &app.state
    else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Progress
        Constraint::Length(6), // Prompt
        Constraint::Min(6),    // Choices
        Constraint::Length(4), // Explanation
        Constraint::Length(1), // Status
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], question, snapshot);
    render_prompt(frame, chunks[1], &question.prompt);
    render_choices(frame, chunks[2], question, *selected);
    if let Some(reveal) = &question.reveal {
        render_explanation(frame, chunks[3], reveal);
    }
    if let Some(status) = &app.status {
        render_status(frame, chunks[4], status);
    }
    render_controls(frame, chunks[5]);
}

fn render_progress(frame: &mut Frame, area: Rect, question: &QuestionView, snapshot: &Snapshot) {
    let lines = vec![
        Line::from(Span::styled(
            format!("Question {} of {}", snapshot.position, snapshot.deck_length),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(vec![
            Span::styled(
                format!(
                    "{} · {}",
                    question.category.label(),
                    question.difficulty.label()
                ),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("   "),
            Span::styled(
                format!(
                    "Score {}/{}  ({}%)",
                    snapshot.score, snapshot.answered, snapshot.accuracy
                ),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_prompt(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn choice_label(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

fn render_choices(frame: &mut Frame, area: Rect, question: &QuestionView, selected: usize) {
    let lines: Vec<Line> = question
        .choices
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let is_selected = i == selected;
            let prefix = if is_selected { "> " } else { "  " };

            let (style, marker) = match &question.reveal {
                Some(reveal) if i == reveal.correct_choice => {
                    (Style::default().fg(Color::Green).bold(), " ✓")
                }
                Some(reveal) if i == reveal.selected => {
                    (Style::default().fg(Color::Red).bold(), " ✗")
                }
                Some(_) => (Style::default().fg(Color::DarkGray), ""),
                None if is_selected => (Style::default().fg(Color::Yellow).bold(), ""),
                None => (Style::default().fg(Color::White), ""),
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("{}) ", choice_label(i)), style),
                Span::styled(choice.clone(), style),
                Span::styled(marker, style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Choices ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_explanation(frame: &mut Frame, area: Rect, reveal: &Reveal) {
    let Some(explanation) = &reveal.explanation else {
        return;
    };

    let widget = Paragraph::new(explanation.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Why ")
                .title_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, status: &Status) {
    let color = match status.level {
        StatusLevel::Info => Color::Cyan,
        StatusLevel::Success => Color::Green,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    };

    let widget = Paragraph::new(status.text.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).bold());

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "j/k select  ·  Enter answer  ·  n/→ next  ·  p/← previous  ·  r reset  ·  q quit",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_labels() {
        assert_eq!(choice_label(0), 'A');
        assert_eq!(choice_label(3), 'D');
    }
}
