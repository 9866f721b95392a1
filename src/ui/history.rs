use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::models::HistoryEntry;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, history: &[HistoryEntry], scroll: usize) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0], history.len());
    render_entries(frame, chunks[1], history, scroll);
    render_controls(frame, chunks[2]);
}

fn render_title(frame: &mut Frame, area: Rect, count: usize) {
    let content = vec![
        Line::from(Span::styled(
            "PAST QUESTIONS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            format!("{count} day(s)"),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_entries(frame: &mut Frame, area: Rect, history: &[HistoryEntry], scroll: usize) {
    let lines: Vec<Line> = if history.is_empty() {
        vec![Line::from("No questions yet".fg(Color::DarkGray))]
    } else {
        history
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!(" {}  ", entry.date.format("%Y-%m-%d")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        truncate_question(&entry.question_text),
                        Style::default().fg(Color::Gray),
                    ),
                ])
            })
            .collect()
    };

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  h back  ·  r reload  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "x".repeat(QUESTION_PREVIEW_LENGTH + 10);
        let truncated = truncate_question(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
    }
}
