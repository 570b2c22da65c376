use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0]);
    render_input(frame, chunks[1], app.input());
    render_counter(frame, chunks[2], app);
    render_notice(frame, chunks[3], app);
    render_controls(frame, chunks[4], app.can_generate());
}

fn render_title(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(vec![
        Line::from(Span::styled(
            "MCQ GENERATOR & QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Paste or type a passage to build a quiz from".fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_input(frame: &mut Frame, area: Rect, input: &str) {
    let text = if input.is_empty() {
        Text::from("Enter your text here to generate MCQs...".fg(Color::DarkGray))
    } else {
        let mut text = Text::from(input);
        if let Some(last) = text.lines.last_mut() {
            last.push_span(Span::styled("_", Style::default().fg(Color::Yellow)));
        }
        text
    };

    let widget = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_counter(frame: &mut Frame, area: Rect, app: &App) {
    let count = app.input().chars().count();
    let color = if count >= app.min_chars() {
        Color::Green
    } else {
        Color::DarkGray
    };
    let widget = Paragraph::new(format!(
        "{} characters (minimum {})",
        count,
        app.min_chars()
    ))
    .fg(color);
    frame.render_widget(widget, area);
}

fn render_notice(frame: &mut Frame, area: Rect, app: &App) {
    let Some(notice) = app.notice() else {
        return;
    };

    let widget = Paragraph::new(vec![
        Line::from(Span::styled(
            notice.title.as_str(),
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(Span::styled(
            notice.detail.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Color::Red)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, can_generate: bool) {
    let enter = if can_generate {
        Span::styled("enter generate", Style::default().fg(Color::Green).bold())
    } else {
        Span::styled("enter generate", Style::default().fg(Color::DarkGray))
    };

    let widget = Paragraph::new(Line::from(vec![
        enter,
        Span::styled(
            "  ·  alt+enter newline  ·  ctrl+u clear  ·  esc quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
