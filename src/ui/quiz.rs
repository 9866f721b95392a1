use chrono::NaiveDate;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::session::{AnswerMark, QuizSession, SessionState};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, session: &QuizSession, cursor: usize, today: NaiveDate) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_header(frame, chunks[0], today);
    render_question_text(frame, chunks[1], &session.question().text);
    render_options(frame, chunks[2], session, cursor);
    render_outcome(frame, chunks[3], session);
    render_controls(frame, chunks[4], session.is_locked());
}

fn render_header(frame: &mut Frame, area: Rect, today: NaiveDate) {
    let title = format!("DAILY QUIZ · {}", today.format("%B %d, %Y"));
    let widget = Paragraph::new(title)
        .fg(Color::Cyan)
        .bold()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn option_label(index: usize) -> char {
    OPTION_LABELS.get(index).copied().unwrap_or('?')
}

fn mark_style(mark: AnswerMark, locked: bool, under_cursor: bool) -> Style {
    match mark {
        AnswerMark::Correct => Style::default().fg(Color::Green).bold(),
        AnswerMark::ChosenWrong => Style::default().fg(Color::Red).bold(),
        AnswerMark::Other if locked => Style::default().fg(Color::DarkGray),
        AnswerMark::Other if under_cursor => Style::default().fg(Color::Cyan).bold(),
        AnswerMark::Other => Style::default().fg(Color::Gray),
    }
}

fn render_options(frame: &mut Frame, area: Rect, session: &QuizSession, cursor: usize) {
    let locked = session.is_locked();
    let marks = session.marks();
    let mut lines: Vec<Line> = Vec::with_capacity(marks.len() * 2);

    for (index, (answer, mark)) in marks.into_iter().enumerate() {
        let under_cursor = !locked && index == cursor;
        let style = mark_style(mark, locked, under_cursor);
        let marker = match mark {
            AnswerMark::Correct => "+",
            AnswerMark::ChosenWrong => "-",
            AnswerMark::Other if under_cursor => ">",
            AnswerMark::Other => " ",
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}) ", option_label(index)), style),
            Span::styled(answer, style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_outcome(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let line = match (session.state(), session.is_correct()) {
        (SessionState::Answered, Some(true)) => "Correct!".fg(Color::Green).bold(),
        (SessionState::Answered, _) => "Incorrect".fg(Color::Red).bold(),
        (SessionState::Revealed, _) => {
            let answer = session.revealed_answer().unwrap_or_default();
            Span::from(format!("Answer: {answer}")).fg(Color::Cyan).bold()
        }
        (SessionState::Unanswered, _) => Span::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_controls(frame: &mut Frame, area: Rect, locked: bool) {
    let help = if locked {
        "r reload  ·  h history  ·  q quit"
    } else {
        "j/k navigate  ·  enter select  ·  s show answer  ·  r reload  ·  h history  ·  q quit"
    };
    let widget = Paragraph::new(help)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
