//! TUI rendering using ratatui.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap};

use launchpad_core::wizard::{Phase, Step, TOTAL_STEPS};

use super::app::{App, Focus, choice_rows, text_fields};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Render the current screen.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // main content
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    match app.wizard.phase() {
        Phase::Form(step) => render_form(f, app, step, chunks[0]),
        Phase::Submitting => render_loading(f, app, chunks[0]),
        Phase::Results => render_results(f, app, chunks[0]),
    }

    render_status_bar(f, app, chunks[1]);

    if let Some(notice) = app.wizard.notice() {
        render_notice(f, notice);
    }
}

fn render_form(f: &mut Frame, app: &App, step: Step, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // progress
            Constraint::Min(5),    // step body
            Constraint::Length(1), // buttons
        ])
        .split(area);

    render_progress(f, step, chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", step.title()));

    if step.is_interstitial() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                step.title(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        let body = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(body, chunks[1]);
    } else {
        let inner = block.inner(chunks[1]);
        f.render_widget(block, chunks[1]);
        render_step_widgets(f, app, step, inner);
    }

    render_buttons(f, app, step, chunks[2]);
}

fn render_progress(f: &mut Frame, step: Step, area: Rect) {
    let position = step.index();
    let ratio = position as f64 / (TOTAL_STEPS - 1) as f64;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Launchpad "))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(ratio)
        .label(format!("{}/{TOTAL_STEPS}", position + 1));
    f.render_widget(gauge, area);
}

fn render_step_widgets(f: &mut Frame, app: &App, step: Step, area: Rect) {
    let rows = choice_rows(step, app.wizard.record());
    let fields = text_fields(step);

    let mut constraints = Vec::new();
    if !rows.is_empty() {
        constraints.push(Constraint::Length(rows.len() as u16 + 1));
    }
    constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let mut next_chunk = 0;

    if !rows.is_empty() {
        let focused = match app.focus() {
            Some(Focus::Choice(i)) => Some(i),
            _ => None,
        };
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let mark = match (row.radio, row.checked) {
                    (true, true) => "(•)",
                    (true, false) => "( )",
                    (false, true) => "[x]",
                    (false, false) => "[ ]",
                };
                let style = if row.enabled {
                    Style::default()
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{mark} "), Style::default().fg(Color::Cyan)),
                    Span::styled(row.label, style),
                ]))
            })
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default().with_selected(focused);
        f.render_stateful_widget(list, chunks[next_chunk], &mut state);
        next_chunk += 1;
    }

    for &field in fields {
        let value = field.value(app.wizard.record());
        let focused = app.focus() == Some(Focus::Text(field));

        let content = if value.is_empty() {
            Span::styled(
                field.placeholder(step).unwrap_or(""),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::raw(value)
        };
        let mut line = vec![content];
        if focused {
            line.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        }

        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let mut block = Block::default().borders(Borders::ALL).border_style(border);
        if let Some(label) = field.label() {
            block = block.title(format!(" {label} "));
        }

        f.render_widget(Paragraph::new(Line::from(line)).block(block), chunks[next_chunk]);
        next_chunk += 1;
    }
}

fn render_buttons(f: &mut Frame, app: &App, step: Step, area: Rect) {
    let next_label = match step {
        Step::LAST => "Enter: Launch It →",
        s if s.is_interstitial() => "Enter: Next",
        _ => "Enter: Next →",
    };
    let next_style = if app.wizard.can_advance() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = Vec::new();
    if step != Step::FIRST {
        spans.push(Span::raw(" Esc: ← Previous   "));
    }
    spans.push(Span::styled(next_label, next_style));

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        area,
    );
}

fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let frame = SPINNER[app.ticks % SPINNER.len()];
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{frame} Launching your idea…"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, area);
}

fn render_results(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(area);

    let items: Vec<ListItem> = (0..3)
        .map(|i| ListItem::new(format!("Marketing strategy {}", i + 1)))
        .collect();
    let selector = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Rocket Ship "))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
    let mut state = ListState::default().with_selected(Some(app.wizard.active_plan()));
    f.render_stateful_widget(selector, chunks[0], &mut state);

    let body = match app.wizard.active_plan_text() {
        Some(text) => Paragraph::new(text).wrap(Wrap { trim: false }),
        None => Paragraph::new(Span::styled(
            "No content yet.",
            Style::default().fg(Color::DarkGray),
        )),
    };
    let title = format!(" Marketing strategy {} ", app.wizard.active_plan() + 1);
    f.render_widget(
        body.block(Block::default().borders(Borders::ALL).title(title)),
        chunks[1],
    );
}

fn render_notice(f: &mut Frame, notice: &str) {
    let area = centered_rect(60, 7, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(notice),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: OK",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let popup = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        );
    f.render_widget(popup, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (screen, keys) = match app.wizard.phase() {
        Phase::Form(_) => ("Wizard", "  ↑/↓:focus  Space:select  Ctrl-C:quit"),
        Phase::Submitting => ("Launching", "  Ctrl-C:quit"),
        Phase::Results => ("Results", "  1-3:strategy  e:export  q:quit"),
    };

    let status_msg = app.status_message.as_deref().unwrap_or("");

    let bar = Line::from(vec![
        Span::styled(
            format!(" {screen} "),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(status_msg, Style::default().fg(Color::Green)),
        Span::raw(keys),
    ]);

    f.render_widget(Paragraph::new(bar), area);
}

// -- Helpers --

/// A `width_pct`% wide, `height`-row tall rect centered in `area`.
fn centered_rect(width_pct: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_pct) / 2),
            Constraint::Percentage(width_pct),
            Constraint::Percentage((100 - width_pct) / 2),
        ])
        .split(vertical[1])[1]
}
