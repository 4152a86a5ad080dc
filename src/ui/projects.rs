use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::catalog::CatalogStats;
use crate::models::Project;
use crate::ui::components::popup::render_confirmation;

// Represents the state of the admin dashboard's project list
pub struct ProjectsState {
    projects: Vec<Project>,
    stats: CatalogStats,
    submissions: usize,
    list_state: ListState,
    show_delete_confirmation: bool,
}

impl ProjectsState {
    pub fn new(projects: Vec<Project>, stats: CatalogStats, submissions: usize) -> Self {
        let mut list_state = ListState::default();
        if !projects.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            projects,
            stats,
            submissions,
            list_state,
            show_delete_confirmation: false,
        }
    }

    pub fn next(&mut self) {
        if self.projects.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.projects.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.projects.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) | None => self.projects.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.list_state.selected().and_then(|i| self.projects.get(i))
    }

    pub fn selected_project_id(&self) -> Option<String> {
        self.selected_project().map(|p| p.id.clone())
    }
}

pub enum ProjectAction {
    Quit,
    Logout,
    NewProject,
    EditProject(String),
    DeleteProject(String),
    ViewProject(String),
    Submissions,
    Analytics,
    Settings,
    HireMe,
}

pub fn render_projects<B: Backend>(frame: &mut Frame<B>, state: &mut ProjectsState) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(size);

    let stats = Paragraph::new(Spans::from(vec![
        Span::styled("Projects: ", Style::default().fg(Color::Cyan)),
        Span::raw(state.stats.total_projects.to_string()),
        Span::styled("  Total views: ", Style::default().fg(Color::Cyan)),
        Span::raw(state.stats.total_views.to_string()),
        Span::styled("  Avg views: ", Style::default().fg(Color::Cyan)),
        Span::raw(state.stats.average_views.to_string()),
        Span::styled("  Inquiries: ", Style::default().fg(Color::Cyan)),
        Span::raw(state.submissions.to_string()),
    ]))
    .block(Block::default().title("Admin Dashboard").borders(Borders::ALL));
    frame.render_widget(stats, chunks[0]);

    let items: Vec<ListItem> = state
        .projects
        .iter()
        .map(|project| {
            ListItem::new(vec![
                Spans::from(vec![
                    Span::styled(&project.title, Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("  [{} views]", project.views)),
                ]),
                Spans::from(Span::styled(
                    format!("  {}", project.technologies.join(", ")),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let projects_list = List::new(items)
        .block(Block::default().title("Projects").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(projects_list, chunks[1], &mut state.list_state);

    let buttons_text = if state.selected_project().is_some() {
        "<N> New | <E> Edit | <D> Delete | <Enter> View | <I> Inquiries | <A> Analytics | <H> Hire form | <S> Settings | <L> Logout | <Q> Quit"
    } else {
        "<N> New | <I> Inquiries | <A> Analytics | <H> Hire form | <S> Settings | <L> Logout | <Q> Quit"
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(buttons, chunks[2]);

    if state.show_delete_confirmation {
        render_confirmation(
            frame,
            "Confirm Delete",
            &["Are you sure you want to delete this project?"],
        );
    }
}

pub fn handle_input(state: &mut ProjectsState, key: KeyCode) -> Option<ProjectAction> {
    if state.show_delete_confirmation {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                state.toggle_delete_confirmation();
                return state.selected_project_id().map(ProjectAction::DeleteProject);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                state.toggle_delete_confirmation();
            }
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(ProjectAction::Quit),
        KeyCode::Char('l') => return Some(ProjectAction::Logout),
        KeyCode::Char('n') => return Some(ProjectAction::NewProject),
        KeyCode::Char('i') => return Some(ProjectAction::Submissions),
        KeyCode::Char('a') => return Some(ProjectAction::Analytics),
        KeyCode::Char('s') => return Some(ProjectAction::Settings),
        KeyCode::Char('h') => return Some(ProjectAction::HireMe),
        KeyCode::Char('e') => return state.selected_project_id().map(ProjectAction::EditProject),
        KeyCode::Enter => return state.selected_project_id().map(ProjectAction::ViewProject),
        KeyCode::Char('d') => {
            if state.selected_project().is_some() {
                state.toggle_delete_confirmation();
            }
        }
        KeyCode::Down => state.next(),
        KeyCode::Up => state.previous(),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            long_description: String::new(),
            image: String::new(),
            additional_images: Vec::new(),
            technologies: Vec::new(),
            github_url: String::new(),
            live_url: String::new(),
            views: 0,
        }
    }

    fn state() -> ProjectsState {
        let stats = CatalogStats {
            total_projects: 2,
            total_views: 0,
            average_views: 0,
        };
        ProjectsState::new(vec![project("a"), project("b")], stats, 0)
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut state = state();
        state.next();

        assert!(handle_input(&mut state, KeyCode::Char('d')).is_none());
        match handle_input(&mut state, KeyCode::Char('y')) {
            Some(ProjectAction::DeleteProject(id)) => assert_eq!(id, "b"),
            _ => panic!("expected delete of the selected project"),
        }
    }

    #[test]
    fn declining_confirmation_keeps_project() {
        let mut state = state();
        handle_input(&mut state, KeyCode::Char('d'));

        assert!(handle_input(&mut state, KeyCode::Char('n')).is_none());
        assert!(matches!(handle_input(&mut state, KeyCode::Char('q')), Some(ProjectAction::Quit)));
    }

    #[test]
    fn selection_wraps_around() {
        let mut state = state();
        state.previous();
        assert_eq!(state.selected_project_id().as_deref(), Some("b"));
        state.next();
        assert_eq!(state.selected_project_id().as_deref(), Some("a"));
    }
}
