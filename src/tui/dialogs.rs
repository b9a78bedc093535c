use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use crate::app::App;
use crate::status::format_percent;
use super::theme::CatppuccinTheme as Theme;
use super::ui::panel_block;

pub fn draw_help_dialog(f: &mut Frame, _app: &App) {
    let area = centered_rect(50, 50, f.area());

    let bindings = [
        ("q / Esc", "Quit"),
        ("p / Space", "Pause or resume polling"),
        ("r", "Refresh now"),
        ("i", "Cycle details"),
        ("?", "This help"),
    ];

    let mut text = vec![Line::from("")];
    for (keys, action) in bindings {
        text.push(Line::from(vec![
            Span::styled(format!("{:>10}  ", keys), Style::default()
                .fg(Theme::MAUVE)
                .add_modifier(Modifier::BOLD)),
            Span::styled(action, Style::default().fg(Theme::TEXT)),
        ]));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled("[ESC] Close", Style::default()
        .fg(Theme::SUBTEXT1)
        .add_modifier(Modifier::ITALIC))));

    let paragraph = Paragraph::new(text)
        .block(panel_block("Help", Theme::LAVENDER, Theme::CRUST))
        .alignment(Alignment::Left);

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

pub fn draw_details_dialog(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 60, f.area());
    let dashboard = &app.dashboard;

    let mut text = vec![Line::from("")];

    match dashboard.state().snapshot() {
        Some(snapshot) => {
            let prediction = &snapshot.prediction;
            let horizon = prediction.prediction_horizon.clone()
                .unwrap_or_else(|| "N/A".to_string());
            let predicted_at = prediction.timestamp
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "N/A".to_string());
            let available = snapshot.metrics.memory_available
                .map(|b| format!("{} MB", b / 1024 / 1024))
                .unwrap_or_else(|| "N/A".to_string());

            text.push(detail_line("Sampled at", snapshot.metrics.timestamp.format("%H:%M:%S").to_string()));
            text.push(detail_line("Memory available", available));
            text.push(detail_line("Predicted at", predicted_at));
            text.push(detail_line("Horizon", horizon));
            text.push(detail_line("CPU at prediction", format_percent(prediction.current_cpu)));
            text.push(detail_line("Predicted CPU", format_percent(Some(prediction.predicted_cpu))));
        }
        None => {
            text.push(Line::from(Span::styled("No cycle data available", Style::default().fg(Theme::RED))));
        }
    }

    let stats = dashboard.stats();
    text.push(Line::from(""));
    text.push(detail_line("Last cycle", dashboard.last_applied().to_string()));
    text.push(detail_line(
        "Window",
        format!("{}/{}", dashboard.window().len(), dashboard.window().capacity()),
    ));
    text.push(detail_line(
        "Cycles",
        format!("{} ok · {} failed · {} stale", stats.applied, stats.failed, stats.stale),
    ));
    text.push(Line::from(""));
    text.push(Line::from(Span::styled("[ESC] Close", Style::default()
        .fg(Theme::SUBTEXT1)
        .add_modifier(Modifier::ITALIC))));

    let paragraph = Paragraph::new(text)
        .block(panel_block("Cycle Details", Theme::BLUE, Theme::CRUST));

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn detail_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<20}", label), Style::default()
            .fg(Theme::SUBTEXT1)
            .add_modifier(Modifier::BOLD)),
        Span::styled(value, Style::default().fg(Theme::TEXT)),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
