//! Rendering of the TrueGuard screen
//!
//! Pure functions from the presentation model to ratatui widgets; no domain
//! state lives here.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::presentation::model::{PresentationModel, ReadyModel};
use crate::reply::ReplyTab;
use crate::signals::catalog::SignalKind;
use crate::signals::classifier::{classify, NO_SIGNALS_LABEL};
use crate::signals::highlight::resolved_spans;

/// Draw one frame
pub fn draw(frame: &mut Frame, input: &str, has_photo: bool, model: &PresentationModel) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(outer[0]);

    draw_input_panel(frame, columns[0], input, has_photo);
    draw_result_panel(frame, columns[1], model);
    draw_footer(frame, outer[1], model);
}

/// Style for one signal category, keyed by its catalog style key so new
/// catalog entries fall back to a neutral emphasis without a code change
fn signal_style(kind: SignalKind) -> Style {
    match kind.category().highlight_class {
        "hl-urgency" => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        "hl-secrecy" => Style::default().fg(Color::Magenta),
        "hl-money" => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        "hl-code" => Style::default().fg(Color::Cyan),
        _ => Style::default().add_modifier(Modifier::UNDERLINED),
    }
}

/// Convert one line of chat text into a styled line, matched spans emphasized
pub fn highlight_line(text: &str) -> Line<'static> {
    let spans = resolved_spans(text);
    if spans.is_empty() {
        return Line::from(text.to_string());
    }

    let mut out = Vec::new();
    let mut last_end = 0;

    for span in spans {
        // Add any gap before this span
        if span.range.start > last_end {
            out.push(Span::raw(text[last_end..span.range.start].to_string()));
        }
        out.push(Span::styled(
            text[span.range.clone()].to_string(),
            signal_style(span.kind),
        ));
        last_end = span.range.end;
    }

    // Add any remaining text
    if last_end < text.len() {
        out.push(Span::raw(text[last_end..].to_string()));
    }

    Line::from(out)
}

/// Chip row for the currently detected signals
fn chips_line(text: &str) -> Line<'static> {
    let result = classify(text);
    if result.is_empty() {
        return Line::from(Span::styled(
            NO_SIGNALS_LABEL,
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut spans = Vec::new();
    for kind in result.kinds() {
        spans.push(Span::styled(
            format!(" {} ", kind.category().label),
            signal_style(*kind).add_modifier(Modifier::REVERSED),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn draw_input_panel(frame: &mut Frame, area: Rect, input: &str, has_photo: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let title = if has_photo {
        "Чат мәтіні (+фото)"
    } else {
        "Чат мәтіні"
    };

    let lines: Vec<Line> = input.split('\n').map(highlight_line).collect();
    let editor = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(editor, chunks[0]);

    frame.render_widget(Paragraph::new(chips_line(input)), chunks[1]);
}

fn draw_result_panel(frame: &mut Frame, area: Rect, model: &PresentationModel) {
    let block = Block::default().borders(Borders::ALL).title("Нәтиже");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match model {
        PresentationModel::Empty => {
            let hint = Paragraph::new("Мәтінді енгізіп, Ctrl+S басыңыз")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(hint, inner);
        }
        PresentationModel::Loading { status } => {
            let loading =
                Paragraph::new(*status).style(Style::default().fg(Color::Yellow));
            frame.render_widget(loading, inner);
        }
        PresentationModel::Error { message, .. } => {
            let error = Paragraph::new(message.clone())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false });
            frame.render_widget(error, inner);
        }
        PresentationModel::Ready(ready) => draw_ready(frame, inner, ready),
    }
}

fn draw_ready(frame: &mut Frame, area: Rect, ready: &ReadyModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Length(2), // meters
            Constraint::Min(3),    // reasons
            Constraint::Length(3), // coach
            Constraint::Length(6), // reply / gate
        ])
        .split(area);

    draw_header(frame, chunks[0], ready);
    draw_meters(frame, chunks[1], ready);
    draw_reasons(frame, chunks[2], ready);
    draw_coach(frame, chunks[3], ready);
    if ready.gate_open {
        draw_gate(frame, chunks[4], ready);
    } else {
        draw_reply(frame, chunks[4], ready);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, ready: &ReadyModel) {
    let color = tier_color(ready.tier_color);
    let mut second = format!("Түрі: {}", ready.scam_type);
    if ready.from_cache {
        second.push_str("  (кэштен)");
    }

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Қауіп: "),
            Span::styled(
                format!("{} / 100  ", ready.animated_risk),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(ready.tier_label, Style::default().fg(color)),
        ]),
        Line::from(second),
    ]);
    frame.render_widget(header, area);
}

fn draw_meters(frame: &mut Frame, area: Rect, ready: &ReadyModel) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    draw_meter(
        frame,
        rows[0],
        "Манипуляция",
        ready.animated_manipulation,
        Color::Magenta,
    );
    draw_meter(
        frame,
        rows[1],
        "Осалдық",
        ready.animated_vulnerability,
        Color::Blue,
    );
}

fn draw_meter(frame: &mut Frame, area: Rect, label: &str, value: u8, color: Color) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(10)])
        .split(area);

    frame.render_widget(Paragraph::new(label.to_string()), cols[0]);

    let gauge = Gauge::default()
        .ratio(f64::from(value) / 100.0)
        .label(format!("{}%", value))
        .gauge_style(Style::default().fg(color));
    frame.render_widget(gauge, cols[1]);
}

fn draw_reasons(frame: &mut Frame, area: Rect, ready: &ReadyModel) {
    let items: Vec<ListItem> = ready
        .reasons
        .iter()
        .map(|r| ListItem::new(format!("• {}", r)))
        .collect();
    let list =
        List::new(items).block(Block::default().borders(Borders::ALL).title("Дәлелдер"));
    frame.render_widget(list, area);
}

fn draw_coach(frame: &mut Frame, area: Rect, ready: &ReadyModel) {
    let coach = Paragraph::new(ready.coach_note.clone())
        .block(Block::default().borders(Borders::ALL).title("Кеңес"))
        .wrap(Wrap { trim: false });
    frame.render_widget(coach, area);
}

fn draw_reply(frame: &mut Frame, area: Rect, ready: &ReadyModel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Қауіпсіз жауап");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    frame.render_widget(Paragraph::new(tabs_line(ready)), chunks[0]);

    let reply = Paragraph::new(ready.reply_text.clone()).wrap(Wrap { trim: false });
    frame.render_widget(reply, chunks[1]);
}

fn tabs_line(ready: &ReadyModel) -> Line<'static> {
    let mut spans = Vec::new();
    for tab in ReplyTab::all() {
        let style = if tab == ready.tab {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
    }
    Line::from(spans)
}

fn draw_gate(frame: &mut Frame, area: Rect, ready: &ReadyModel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title("⚠ ТОҚТА");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let checkbox = if ready.gate_acknowledged { "x" } else { " " };
    let proceed_style = if ready.gate_acknowledged {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let warning = Paragraph::new(vec![
        Line::from(Span::styled(
            "Жоғары қауіп! Жауапты қолданар алдында ойланыңыз.",
            Style::default().fg(Color::Red),
        )),
        Line::from(format!("[{}] Тәуекелді түсінемін — Ctrl+K", checkbox)),
        Line::from(Span::styled("Жалғастыру — Ctrl+G", proceed_style)),
    ])
    .wrap(Wrap { trim: false });
    frame.render_widget(warning, inner);
}

fn draw_footer(frame: &mut Frame, area: Rect, model: &PresentationModel) {
    let status = match model {
        PresentationModel::Empty => "",
        PresentationModel::Loading { status } => *status,
        PresentationModel::Error { status, .. } => *status,
        PresentationModel::Ready(ready) => ready.status,
    };

    let footer = Line::from(vec![
        Span::styled(status.to_string(), Style::default().fg(Color::Green)),
        Span::raw("  Ctrl+S талдау · Tab жауап · Ctrl+R тазалау · Ctrl+Q шығу"),
    ]);
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Parse a `#rrggbb` tier color into a terminal color
fn tier_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        let channels = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        );
        if let (Ok(r), Ok(g), Ok(b)) = channels {
            return Color::Rgb(r, g, b);
        }
    }
    Color::White
}
