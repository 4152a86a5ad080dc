use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Span, Spans},
    widgets::{BarChart, Block, Borders, Paragraph, Sparkline},
    Frame,
};

use crate::analytics::{top_projects, AnalyticsSummary};
use crate::models::{DailyMetric, Project};

const TOP_PROJECTS: usize = 5;

pub enum AnalyticsAction {
    Back,
}

pub struct AnalyticsState {
    summary: AnalyticsSummary,
    metrics: Vec<DailyMetric>,
    top: Vec<(String, u64)>,
}

impl AnalyticsState {
    pub fn new(summary: AnalyticsSummary, metrics: Vec<DailyMetric>, projects: &[Project]) -> Self {
        let top = top_projects(projects, TOP_PROJECTS)
            .into_iter()
            .map(|p| (p.title.clone(), p.views))
            .collect();
        Self {
            summary,
            metrics,
            top,
        }
    }
}

pub fn render_analytics<B: Backend>(frame: &mut Frame<B>, state: &mut AnalyticsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(4),
                Constraint::Length(8),
                Constraint::Min(8),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(frame.size());

    let label = Style::default().fg(Color::Cyan);
    let summary = &state.summary;
    let growth_color = if summary.views_growth >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    let header = Paragraph::new(vec![
        Spans::from(vec![
            Span::styled("Project views: ", label),
            Span::raw(summary.total_views.to_string()),
            Span::styled("  GitHub views: ", label),
            Span::raw(summary.total_github_views.to_string()),
            Span::styled("  Purchases: ", label),
            Span::raw(summary.total_purchases.to_string()),
            Span::styled("  Revenue: ", label),
            Span::raw(format!("₹{}", summary.total_revenue)),
        ]),
        Spans::from(vec![
            Span::styled("Views today: ", label),
            Span::raw(summary.views_today.to_string()),
            Span::styled(
                format!("  ({:+.1}% vs yesterday)", summary.views_growth),
                Style::default().fg(growth_color),
            ),
        ]),
    ])
    .block(Block::default().title("Analytics").borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let views: Vec<u64> = state.metrics.iter().map(|m| m.views).collect();
    let range = match (state.metrics.first(), state.metrics.last()) {
        (Some(first), Some(last)) => format!("Daily views  {} to {}", first.date, last.date),
        _ => "Daily views".to_string(),
    };
    let sparkline = Sparkline::default()
        .block(Block::default().title(range).borders(Borders::ALL))
        .data(&views)
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(sparkline, chunks[1]);

    let bars: Vec<(&str, u64)> = state
        .top
        .iter()
        .map(|(title, views)| (title.as_str(), *views))
        .collect();
    let chart = BarChart::default()
        .block(Block::default().title("Top projects by views").borders(Borders::ALL))
        .data(&bars)
        .bar_width(12)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(Style::default().fg(Color::White).bg(Color::Blue));
    frame.render_widget(chart, chunks[2]);

    let buttons = Paragraph::new("<Esc> Back")
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[3]);
}

pub fn handle_input(_state: &mut AnalyticsState, key: KeyCode) -> Option<AnalyticsAction> {
    match key {
        KeyCode::Esc | KeyCode::Char('q') => Some(AnalyticsAction::Back),
        _ => None,
    }
}
