use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::models::Project;
use crate::purchases::{Package, PACKAGES};
use crate::ui::components::popup::{centered_rect, help_bar, title_bar};

pub enum ProjectDetailAction {
    Back,
    Purchase(&'static Package),
}

pub struct ProjectDetailState {
    project: Option<Project>,
    show_packages: bool,
    package_list: ListState,
    message: Option<String>,
}

impl ProjectDetailState {
    /// `None` renders the not-found view.
    pub fn new(project: Option<Project>) -> Self {
        let mut package_list = ListState::default();
        let recommended = PACKAGES.iter().position(|p| p.recommended).unwrap_or(0);
        package_list.select(Some(recommended));

        Self {
            project,
            show_packages: false,
            package_list,
            message: None,
        }
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    fn selected_package(&self) -> &'static Package {
        &PACKAGES[self.package_list.selected().unwrap_or(0)]
    }

    fn move_selection(&mut self, forward: bool) {
        let len = PACKAGES.len();
        let i = self.package_list.selected().unwrap_or(0);
        let i = if forward { (i + 1) % len } else { (i + len - 1) % len };
        self.package_list.select(Some(i));
    }
}

pub fn render_project_detail<B: Backend>(f: &mut Frame<B>, state: &mut ProjectDetailState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let Some(project) = &state.project else {
        f.render_widget(title_bar("Project not found"), chunks[0]);
        let body = Paragraph::new("The project you're looking for doesn't exist.")
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(body, chunks[1]);
        f.render_widget(help_bar("Esc - Back to projects"), chunks[2]);
        return;
    };

    f.render_widget(title_bar(&project.title), chunks[0]);

    let label = Style::default().fg(Color::Cyan);
    let mut lines = vec![
        Spans::from(Span::styled(
            project.description.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Spans::from(""),
    ];
    if !project.long_description.is_empty() {
        lines.push(Spans::from(project.long_description.clone()));
        lines.push(Spans::from(""));
    }
    lines.push(Spans::from(vec![
        Span::styled("Technologies: ", label),
        Span::raw(project.technologies.join(", ")),
    ]));
    lines.push(Spans::from(vec![
        Span::styled("GitHub: ", label),
        Span::raw(project.github_url.clone()),
    ]));
    lines.push(Spans::from(vec![
        Span::styled("Live demo: ", label),
        Span::raw(project.live_url.clone()),
    ]));
    lines.push(Spans::from(vec![
        Span::styled("Views: ", label),
        Span::raw(project.views.to_string()),
    ]));
    if let Some(message) = &state.message {
        lines.push(Spans::from(""));
        lines.push(Spans::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Green),
        )));
    }

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });
    f.render_widget(body, chunks[1]);

    f.render_widget(help_bar("B - Buy source code | Esc - Back"), chunks[2]);

    if state.show_packages {
        render_packages(f, state);
    }
}

fn render_packages<B: Backend>(f: &mut Frame<B>, state: &mut ProjectDetailState) {
    let area = centered_rect(70, 60, f.size());

    let items: Vec<ListItem> = PACKAGES
        .iter()
        .map(|package| {
            let mut header = vec![
                Span::styled(package.name, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {} ", package.price)),
                Span::styled(
                    package.original_price,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                ),
                Span::styled(format!("  {}", package.savings), Style::default().fg(Color::Green)),
            ];
            if package.recommended {
                header.push(Span::styled("  Most popular", Style::default().fg(Color::Yellow)));
            }
            ListItem::new(vec![
                Spans::from(header),
                Spans::from(format!("  {}", package.description)),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Choose a package  (Enter - Buy, Esc - Close)"),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state.package_list);
}

pub fn handle_input(state: &mut ProjectDetailState, key: KeyCode) -> Option<ProjectDetailAction> {
    if state.show_packages {
        match key {
            KeyCode::Esc => state.show_packages = false,
            KeyCode::Up => state.move_selection(false),
            KeyCode::Down => state.move_selection(true),
            KeyCode::Enter => {
                state.show_packages = false;
                return Some(ProjectDetailAction::Purchase(state.selected_package()));
            }
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Esc | KeyCode::Char('q') => return Some(ProjectDetailAction::Back),
        KeyCode::Char('b') | KeyCode::Char('B') if state.project.is_some() => {
            state.message = None;
            state.show_packages = true;
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_picker_starts_on_recommended() {
        let mut state = ProjectDetailState::new(Some(crate::catalog::default_projects().remove(0)));

        handle_input(&mut state, KeyCode::Char('b'));
        match handle_input(&mut state, KeyCode::Enter) {
            Some(ProjectDetailAction::Purchase(package)) => assert_eq!(package.id, "pro"),
            _ => panic!("expected a purchase"),
        }
    }

    #[test]
    fn missing_project_only_goes_back() {
        let mut state = ProjectDetailState::new(None);

        assert!(handle_input(&mut state, KeyCode::Char('b')).is_none());
        assert!(!state.show_packages);
        assert!(matches!(handle_input(&mut state, KeyCode::Esc), Some(ProjectDetailAction::Back)));
    }
}
