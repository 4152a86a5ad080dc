use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::error::ReviewError;
use crate::models::{Inquiry, InquiryStatus, ServiceTier};
use crate::review::{SubmissionFilter, SubmissionsReview};
use crate::store::Storage;
use crate::ui::components::popup::centered_rect;

pub enum SubmissionsAction {
    Back,
}

fn status_color(status: InquiryStatus) -> Color {
    match status {
        InquiryStatus::Pending => Color::Yellow,
        InquiryStatus::Reviewed => Color::Blue,
        InquiryStatus::Responded => Color::Green,
        InquiryStatus::Rejected => Color::Red,
    }
}

/// `None`, then each option in order, then back to `None`.
fn cycle_filter<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let i = all.iter().position(|v| *v == value).unwrap_or(all.len());
            all.get(i + 1).copied()
        }
    }
}

pub struct SubmissionsState<S: Storage> {
    review: SubmissionsReview<S>,
    filter: SubmissionFilter,
    table_state: TableState,
    searching: bool,
    show_detail: bool,
}

impl<S: Storage> SubmissionsState<S> {
    pub fn new(review: SubmissionsReview<S>) -> Self {
        let mut state = Self {
            review,
            filter: SubmissionFilter::default(),
            table_state: TableState::default(),
            searching: false,
            show_detail: false,
        };
        state.clamp_selection();
        state
    }

    pub fn filter(&self) -> &SubmissionFilter {
        &self.filter
    }

    pub fn visible(&self) -> Vec<&Inquiry> {
        self.review.filter(&self.filter)
    }

    pub fn selected_inquiry(&self) -> Option<&Inquiry> {
        let index = self.table_state.selected()?;
        self.visible().get(index).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        let selected = match self.table_state.selected() {
            _ if len == 0 => None,
            Some(i) if i < len => Some(i),
            Some(_) => Some(len - 1),
            None => Some(0),
        };
        self.table_state.select(selected);
    }

    fn move_selection(&mut self, forward: bool) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let i = self.table_state.selected().unwrap_or(0);
        let i = if forward { (i + 1) % len } else { (i + len - 1) % len };
        self.table_state.select(Some(i));
    }

    fn set_selected_status(&mut self, status: InquiryStatus) -> Result<(), ReviewError> {
        let Some(id) = self.selected_inquiry().map(|i| i.id.clone()) else {
            return Ok(());
        };
        self.review.update_status(&id, status)?;
        self.clamp_selection();
        Ok(())
    }
}

pub fn render_submissions<B: Backend, S: Storage>(frame: &mut Frame<B>, state: &mut SubmissionsState<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(frame.size());

    let stats = state.review.stats();
    let label = Style::default().fg(Color::Cyan);
    let header = Paragraph::new(Spans::from(vec![
        Span::styled("Total: ", label),
        Span::raw(stats.total.to_string()),
        Span::styled("  Pending: ", label),
        Span::raw(stats.pending.to_string()),
        Span::styled("  Reviewed: ", label),
        Span::raw(stats.reviewed.to_string()),
        Span::styled("  Responded: ", label),
        Span::raw(stats.responded.to_string()),
        Span::styled("  Rejected: ", label),
        Span::raw(stats.rejected.to_string()),
        Span::styled("  Pipeline value: ", label),
        Span::raw(format!("₹{}", stats.total_value)),
    ]))
    .block(Block::default().title("Project Submissions").borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    let search = if state.searching {
        format!("{}|", state.filter.search)
    } else {
        state.filter.search.clone()
    };
    let filters = Paragraph::new(Spans::from(vec![
        Span::styled("Search: ", label),
        Span::raw(search),
        Span::styled("  Status: ", label),
        Span::raw(state.filter.status.map_or("all", |s| s.label())),
        Span::styled("  Service: ", label),
        Span::raw(state.filter.service.map_or("all", |s| s.name())),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(filters, chunks[1]);

    let header_cells = ["Name", "Project", "Service", "Budget", "Status", "Submitted"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let table_header = Row::new(header_cells).height(1).bottom_margin(1);

    let visible = state.review.filter(&state.filter);
    let rows = visible.iter().map(|inquiry| {
        Row::new(vec![
            Cell::from(inquiry.details.name.clone()),
            Cell::from(inquiry.details.project_title.clone()),
            Cell::from(inquiry.details.selected_service.name()),
            Cell::from(inquiry.estimated_value.clone()),
            Cell::from(inquiry.status.label())
                .style(Style::default().fg(status_color(inquiry.status))),
            Cell::from(inquiry.submitted_at.format("%Y-%m-%d").to_string()),
        ])
    });

    let title = format!("Inquiries ({} shown)", visible.len());
    let table = Table::new(rows)
        .header(table_header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .widths(&[
            Constraint::Percentage(16),
            Constraint::Percentage(22),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(10),
            Constraint::Percentage(12),
        ]);
    frame.render_stateful_widget(table, chunks[2], &mut state.table_state);

    let buttons_text = if state.searching {
        "Type to search | Enter/Esc - Done"
    } else {
        "</> Search | <F> Status filter | <V> Service filter | <X> Clear | <Enter> Details | <1-4> Mark pending/reviewed/responded/rejected | <Esc> Back"
    };
    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[3]);

    if state.show_detail {
        if let Some(inquiry) = state.selected_inquiry() {
            render_detail(frame, inquiry);
        }
    }
}

fn render_detail<B: Backend>(frame: &mut Frame<B>, inquiry: &Inquiry) {
    let area = centered_rect(80, 80, frame.size());
    let details = &inquiry.details;
    let label = Style::default().fg(Color::Cyan);
    let row = |name: &'static str, value: String| {
        Spans::from(vec![Span::styled(format!("{}: ", name), label), Span::raw(value)])
    };
    let join = |labels: Vec<&'static str>| labels.join(", ");

    let lines = vec![
        row("Name", details.name.clone()),
        row("Email", details.email.clone()),
        row("Company", details.company.clone()),
        row("Phone", details.phone.clone()),
        row("Service", details.selected_service.name().to_string()),
        Spans::from(""),
        row("Project", details.project_title.clone()),
        row(
            "Type",
            details.project_type.map(|t| t.to_string()).unwrap_or_default(),
        ),
        row("Description", details.project_description.clone()),
        row("Audience", details.target_audience.clone()),
        row(
            "Features",
            join(details.key_features.iter().map(|f| f.label()).collect()),
        ),
        row(
            "Technologies",
            join(details.technologies.iter().map(|t| t.label()).collect()),
        ),
        row(
            "Integrations",
            join(details.integrations.iter().map(|i| i.label()).collect()),
        ),
        row(
            "Platforms",
            join(details.platforms.iter().map(|p| p.label()).collect()),
        ),
        Spans::from(""),
        row("Budget", inquiry.estimated_value.clone()),
        row(
            "Timeline",
            details.timeline.map(|t| t.to_string()).unwrap_or_default(),
        ),
        row(
            "Deadline",
            details
                .deadline
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ),
        row("Urgency", details.urgency.to_string()),
        row("Contact via", details.communication_preference.to_string()),
        row("Requirements", details.additional_requirements.clone()),
        row("References", details.reference_links.clone()),
        Spans::from(""),
        row("Status", inquiry.status.to_string()),
        row(
            "Submitted",
            inquiry.submitted_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        ),
    ];

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!("Inquiry {}  (Enter/Esc - Close)", inquiry.id))
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

pub fn handle_input<S: Storage>(
    state: &mut SubmissionsState<S>,
    key: KeyCode,
) -> Result<Option<SubmissionsAction>, ReviewError> {
    if state.searching {
        match key {
            KeyCode::Enter | KeyCode::Esc => state.searching = false,
            KeyCode::Char(c) => state.filter.search.push(c),
            KeyCode::Backspace => {
                state.filter.search.pop();
            }
            _ => {}
        }
        state.clamp_selection();
        return Ok(None);
    }

    if state.show_detail {
        if matches!(key, KeyCode::Enter | KeyCode::Esc) {
            state.show_detail = false;
        }
        return Ok(None);
    }

    match key {
        KeyCode::Esc | KeyCode::Char('q') => return Ok(Some(SubmissionsAction::Back)),
        KeyCode::Char('/') => state.searching = true,
        KeyCode::Char('f') => {
            state.filter.status = cycle_filter(InquiryStatus::ALL, state.filter.status);
            state.clamp_selection();
        }
        KeyCode::Char('v') => {
            state.filter.service = cycle_filter(ServiceTier::ALL, state.filter.service);
            state.clamp_selection();
        }
        KeyCode::Char('x') => {
            state.filter = SubmissionFilter::default();
            state.clamp_selection();
        }
        KeyCode::Enter if state.selected_inquiry().is_some() => state.show_detail = true,
        KeyCode::Char('1') => state.set_selected_status(InquiryStatus::Pending)?,
        KeyCode::Char('2') => state.set_selected_status(InquiryStatus::Reviewed)?,
        KeyCode::Char('3') => state.set_selected_status(InquiryStatus::Responded)?,
        KeyCode::Char('4') => state.set_selected_status(InquiryStatus::Rejected)?,
        KeyCode::Down => state.move_selection(true),
        KeyCode::Up => state.move_selection(false),
        _ => {}
    }

    Ok(None)
}
