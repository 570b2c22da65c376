use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::summary::ResultsSummary;

const QUESTION_PREVIEW_LENGTH: usize = 70;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(summary) = app.summary() else {
        return;
    };

    let tips_height = if summary.needs_review() { 3 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(tips_height),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], &summary);
    render_review(frame, chunks[1], &summary, app.results_scroll());
    if summary.needs_review() {
        render_tips(frame, chunks[2]);
    }
    render_controls(frame, chunks[3]);
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: &ResultsSummary) {
    let content = vec![
        Line::from(Span::styled(
            "QUIZ RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}", summary.score, summary.total),
            Style::default()
                .fg(get_grade_color(summary.percentage))
                .bold(),
        )),
        Line::from(Span::styled(
            format!("You scored {:.1}%", summary.percentage),
            Style::default().fg(Color::Gray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_review(frame: &mut Frame, area: Rect, summary: &ResultsSummary, scroll: usize) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Areas to focus",
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
    ];

    if summary.is_perfect() {
        lines.push(Line::from(Span::styled(
            "Perfect score! Keep up the great work!",
            Style::default().fg(Color::Green),
        )));
    } else {
        lines.push(Line::from("Review these topics:".fg(Color::Gray)));
        for missed in summary.missed.iter().skip(scroll) {
            lines.push(Line::from(vec![
                Span::styled(" - ", Style::default().fg(Color::Red)),
                Span::styled(
                    format!("{:2}. ", missed.index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&missed.prompt),
                    Style::default().fg(Color::Gray),
                ),
            ]));
            if let Some(answer) = &missed.correct_answer {
                lines.push(Line::from(Span::styled(
                    format!("       Correct answer: {}", answer),
                    Style::default().fg(Color::Green),
                )));
            }
        }
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_tips(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(vec![
        Line::from(" - Review the content carefully and try to understand key concepts"),
        Line::from(" - Take notes of questions you found challenging"),
    ])
    .fg(Color::Yellow)
    .block(Block::default().padding(Padding::horizontal(1)));
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
    let widget = Paragraph::new("j/k scroll  ·  r try again  ·  q quit")
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
        let long = "x".repeat(80);
        let out = truncate_question(&long);
        assert_eq!(out.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_grade_color() {
        assert_eq!(get_grade_color(100.0), Color::Green);
        assert_eq!(get_grade_color(66.7), Color::Yellow);
        assert_eq!(get_grade_color(10.0), Color::Red);
    }
}
