use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::AnswerOption;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let Some(question) = session.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_status(frame, chunks[0], app);
    render_progress(frame, chunks[1], session.progress_ratio());
    render_question_text(frame, chunks[2], &question.prompt);
    render_options(
        frame,
        chunks[3],
        &question.options,
        app.cursor(),
        session.answered(),
        session.selected_index(),
    );
    render_controls(frame, chunks[4], question.options.len());
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let position = Paragraph::new(format!(
        "Question {} of {}",
        session.current_index() + 1,
        session.total()
    ))
    .fg(Color::DarkGray);
    let score = Paragraph::new(format!("Score: {}", session.score()))
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);

    frame.render_widget(position, halves[0]);
    frame.render_widget(score, halves[1]);
}

fn render_progress(frame: &mut Frame, area: Rect, ratio: f64) {
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .label("")
        .ratio(ratio.clamp(0.0, 1.0));
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold()
        .block(Block::default().padding(Padding::vertical(1)));
    frame.render_widget(widget, area);
}

fn option_label(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[AnswerOption],
    cursor: usize,
    answered: bool,
    selected: Option<usize>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_cursor = !answered && index == cursor;
        let is_selected = selected == Some(index);

        let style = match (answered, option.is_correct, is_selected) {
            (true, true, _) => Style::default().fg(Color::Green).bold(),
            (true, false, true) => Style::default().fg(Color::Red).bold(),
            (true, false, false) => Style::default().fg(Color::DarkGray),
            (false, _, _) if is_cursor => Style::default().fg(Color::Cyan).bold(),
            (false, _, _) => Style::default().fg(Color::Gray),
        };

        let marker = if is_cursor || is_selected { ">" } else { " " };
        let verdict = match (answered, option.is_correct, is_selected) {
            (true, true, _) => "  ✓",
            (true, false, true) => "  ✗",
            _ => "",
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(option.label.as_str(), style),
            Span::styled(verdict, style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, option_count: usize) {
    let last = option_label(option_count.saturating_sub(1)).to_ascii_lowercase();
    let widget = Paragraph::new(format!(
        "j/k navigate  ·  enter select  ·  a-{} answer  ·  q quit",
        last
    ))
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
