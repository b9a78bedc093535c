use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};
use crate::app::{App, DialogMode};
use crate::dashboard::DashboardState;
use crate::poller::CycleSnapshot;
use crate::status::{classify, format_percent, model_tone};
use super::dialogs::{draw_details_dialog, draw_help_dialog};
use super::theme::{self, CatppuccinTheme as Theme};

pub fn draw(f: &mut Frame, app: &App) {
    match app.dashboard.state() {
        DashboardState::Loading => draw_loading(f, app),
        _ => draw_dashboard(f, app),
    }

    // Draw dialogs on top
    match app.dialog_mode {
        DialogMode::Help => draw_help_dialog(f, app),
        DialogMode::Details => draw_details_dialog(f, app),
        DialogMode::None => {}
    }
}

pub(super) fn panel_block<'a>(title: &'a str, color: Color, bg: Color) -> Block<'a> {
    Block::default()
        .title(vec![
            Span::styled("╭─ ", Style::default().fg(color)),
            Span::styled(title, Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD)),
            Span::styled(" ─╮", Style::default().fg(color)),
        ])
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(bg))
}

fn draw_loading(f: &mut Frame, app: &App) {
    let bg = theme::background(&app.config.display.theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("◌ Waiting for first update", Style::default()
            .fg(Theme::LAVENDER)
            .add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(
            format!("Connecting to {}", app.config.api.base_url),
            Style::default().fg(Theme::SUBTEXT0).add_modifier(Modifier::ITALIC),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(panel_block("Loading", Theme::MAUVE, bg));

    f.render_widget(paragraph, chunks[1]);
    draw_footer(f, chunks[2], app);
}

fn draw_dashboard(f: &mut Frame, app: &App) {
    let error = app.dashboard.error();

    let mut constraints = vec![Constraint::Length(3)]; // Header
    if error.is_some() {
        constraints.push(Constraint::Length(3)); // Error banner
    }
    constraints.push(Constraint::Length(5)); // Cards
    constraints.push(Constraint::Min(10)); // Chart + status
    constraints.push(Constraint::Length(3)); // Footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let mut idx = 0;
    draw_header(f, chunks[idx], app);
    idx += 1;

    if let Some(message) = error {
        draw_error_banner(f, chunks[idx], message);
        idx += 1;
    }

    let snapshot = app.dashboard.state().snapshot();
    draw_cards(f, chunks[idx], app, snapshot);
    idx += 1;

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[idx]);
    draw_chart(f, main[0], app);
    draw_status_panel(f, main[1], app, snapshot);
    idx += 1;

    draw_footer(f, chunks[idx], app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let title = vec![
        Line::from(vec![
            Span::raw("  "),
            Span::styled("◆", Style::default().fg(Theme::MAUVE)),
            Span::raw(" "),
            Span::styled("ScaleWatch", Style::default()
                .fg(Theme::LAVENDER)
                .add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled("◆", Style::default().fg(Theme::MAUVE)),
            Span::raw("  "),
            Span::styled(
                format!("Predictive Autoscaler · {}", app.config.api.base_url),
                Style::default().fg(Theme::SUBTEXT0).add_modifier(Modifier::ITALIC),
            ),
        ]),
    ];

    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::MAUVE))
            .style(Style::default().bg(theme::background(&app.config.display.theme))));

    f.render_widget(header, area);
}

fn draw_error_banner(f: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(" ✖ ", Style::default()
            .fg(Theme::CRUST)
            .bg(Theme::RED)
            .add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(message, Style::default().fg(Theme::RED)),
    ]))
    .block(Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Theme::RED))
        .style(Style::default().bg(Theme::CRUST)));

    f.render_widget(banner, area);
}

fn draw_cards(f: &mut Frame, area: Rect, app: &App, snapshot: Option<&CycleSnapshot>) {
    let bg = theme::background(&app.config.display.theme);
    let show_memory = app.config.display.show_memory_card;
    let count = if show_memory { 4 } else { 3 };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); count as usize])
        .split(area);

    let cpu = snapshot.map(|s| s.metrics.cpu_usage);
    draw_card(
        f,
        chunks[0],
        "Current CPU",
        format_percent(cpu),
        cpu.map(Theme::cpu_color).unwrap_or(Theme::SUBTEXT0),
        Theme::BLUE,
        bg,
    );

    let predicted = snapshot.map(|s| s.prediction.predicted_cpu);
    draw_card(
        f,
        chunks[1],
        "Predicted CPU",
        format_percent(predicted),
        predicted.map(Theme::cpu_color).unwrap_or(Theme::SUBTEXT0),
        Theme::GREEN,
        bg,
    );

    let (decision_text, decision_color) = match snapshot {
        Some(s) => {
            let view = classify(&s.status.scaling_decision);
            (
                format!("{} {}", view.glyph.symbol(), s.status.scaling_decision.display_label()),
                Theme::tone_color(view.tone),
            )
        }
        None => ("N/A".to_string(), Theme::SUBTEXT0),
    };
    draw_card(f, chunks[2], "Scaling Status", decision_text, decision_color, Theme::MAUVE, bg);

    if show_memory {
        let memory = snapshot.map(|s| s.metrics.memory_usage);
        draw_card(
            f,
            chunks[3],
            "Memory",
            format_percent(memory),
            memory.map(Theme::memory_color).unwrap_or(Theme::SUBTEXT0),
            Theme::TEAL,
            bg,
        );
    }
}

fn draw_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    value_color: Color,
    border_color: Color,
    bg: Color,
) {
    let card = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(value, Style::default()
            .fg(value_color)
            .add_modifier(Modifier::BOLD))),
    ])
    .alignment(Alignment::Center)
    .block(panel_block(title, border_color, bg));

    f.render_widget(card, area);
}

fn draw_chart(f: &mut Frame, area: Rect, app: &App) {
    let bg = theme::background(&app.config.display.theme);
    let window = app.dashboard.window();
    let (current, predicted) = window.chart_series();

    let datasets = vec![
        Dataset::default()
            .name("Current CPU")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Theme::CURRENT_SERIES))
            .data(&current),
        Dataset::default()
            .name("Predicted CPU")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Theme::PREDICTED_SERIES))
            .data(&predicted),
    ];

    let labels = window.labels();
    let x_labels: Vec<Span> = match (labels.first(), labels.last()) {
        (Some(first), Some(last)) => vec![
            Span::styled(first.clone(), Style::default().fg(Theme::SUBTEXT0)),
            Span::styled(last.clone(), Style::default().fg(Theme::SUBTEXT0)),
        ],
        _ => Vec::new(),
    };
    let x_max = window.len().saturating_sub(1).max(1) as f64;

    let chart = Chart::new(datasets)
        .block(panel_block("CPU Usage Over Time", Theme::BLUE, bg))
        .x_axis(Axis::default()
            .title(Span::styled("Time", Style::default().fg(Theme::SUBTEXT1)))
            .style(Style::default().fg(Theme::OVERLAY0))
            .bounds([0.0, x_max])
            .labels(x_labels))
        .y_axis(Axis::default()
            .title(Span::styled("CPU %", Style::default().fg(Theme::SUBTEXT1)))
            .style(Style::default().fg(Theme::OVERLAY0))
            .bounds([0.0, 100.0])
            .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]));

    f.render_widget(chart, area);
}

fn draw_status_panel(f: &mut Frame, area: Rect, app: &App, snapshot: Option<&CycleSnapshot>) {
    let bg = theme::background(&app.config.display.theme);

    let lines = match snapshot {
        Some(snapshot) => {
            let status = &snapshot.status;
            let view = classify(&status.scaling_decision);
            let tone_color = Theme::tone_color(view.tone);
            let model_color = Theme::tone_color(model_tone(&status.model_status));

            vec![
                Line::from(Span::styled("Current Status", Style::default().fg(Theme::SUBTEXT0))),
                Line::from(vec![
                    Span::styled(format!("{} ", view.glyph.symbol()), Style::default().fg(tone_color)),
                    Span::styled(status.scaling_decision.display_label(), Style::default()
                        .fg(tone_color)
                        .add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(view.description, Style::default()
                    .fg(Theme::SUBTEXT1)
                    .add_modifier(Modifier::ITALIC))),
                Line::from(""),
                metric_line("CPU Usage", format_percent(Some(status.current_metrics.cpu_usage)), Theme::TEXT),
                metric_line("Memory Usage", format_percent(Some(status.current_metrics.memory_usage)), Theme::TEXT),
                metric_line("Last Prediction", format_percent(status.last_prediction), Theme::TEXT),
                metric_line("Model Status", status.model_status.as_str().to_uppercase(), model_color),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Last updated: {}", status.timestamp.format("%Y-%m-%d %H:%M:%S")),
                    Style::default().fg(Theme::OVERLAY0),
                )),
            ]
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled("No status available", Style::default()
                .fg(Theme::SUBTEXT0)
                .add_modifier(Modifier::ITALIC))),
        ],
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel_block("System Status", Theme::MAUVE, bg));

    f.render_widget(paragraph, area);
}

fn metric_line(label: &'static str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<16}", label), Style::default().fg(Theme::SUBTEXT0)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let status_text = if app.paused {
        Span::styled(" ⏸ PAUSED ", Style::default()
            .fg(Theme::CRUST)
            .bg(Theme::YELLOW)
            .add_modifier(Modifier::BOLD))
    } else {
        Span::styled(" ▶ POLLING ", Style::default()
            .fg(Theme::CRUST)
            .bg(Theme::GREEN)
            .add_modifier(Modifier::BOLD))
    };

    let stats = app.dashboard.stats();
    let last_update = app.dashboard.last_update()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let mut spans = vec![
        Span::raw("  "),
        status_text,
        Span::raw("  "),
        Span::styled("[q]", Style::default().fg(Theme::MAUVE).add_modifier(Modifier::BOLD)),
        Span::styled(" Quit  ", Style::default().fg(Theme::TEXT)),
        Span::styled("[p]", Style::default().fg(Theme::PINK).add_modifier(Modifier::BOLD)),
        Span::styled(" Pause  ", Style::default().fg(Theme::TEXT)),
        Span::styled("[r]", Style::default().fg(Theme::SKY).add_modifier(Modifier::BOLD)),
        Span::styled(" Refresh  ", Style::default().fg(Theme::TEXT)),
        Span::styled("[?]", Style::default().fg(Theme::LAVENDER).add_modifier(Modifier::BOLD)),
        Span::styled(" Help", Style::default().fg(Theme::TEXT)),
        Span::raw("  │  "),
        Span::styled(format!("Updated {}", last_update), Style::default().fg(Theme::SUBTEXT1)),
        Span::raw("  │  "),
        Span::styled(
            format!("ok {} · err {} · stale {}", stats.applied, stats.failed, stats.stale),
            Style::default().fg(Theme::SUBTEXT0),
        ),
    ];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(msg.clone(), Style::default().fg(Theme::PEACH)));
    }

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::SURFACE1))
            .style(Style::default().bg(theme::background(&app.config.display.theme))));

    f.render_widget(footer, area);
}
