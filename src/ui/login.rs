use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::components::popup::{centered_rect, help_bar, title_bar};

pub enum LoginAction {
    Submit(String),
    Quit,
}

#[derive(Default)]
pub struct LoginState {
    password: String,
    error: Option<String>,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.password.clear();
    }

    pub fn masked(&self) -> String {
        "*".repeat(self.password.chars().count())
    }
}

pub fn render_login<B: Backend>(f: &mut Frame<B>, state: &mut LoginState) {
    let area = centered_rect(60, 50, f.size());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    f.render_widget(title_bar("Admin Portal"), chunks[0]);

    let mut lines = vec![
        Spans::from(vec![
            Span::styled("Password: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{}|", state.masked())),
        ]),
        Spans::from(""),
    ];
    if let Some(error) = &state.error {
        lines.push(Spans::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let form = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Login"));
    f.render_widget(form, chunks[1]);

    f.render_widget(help_bar("Enter - Log in | Esc - Quit"), chunks[3]);
}

pub fn handle_input(state: &mut LoginState, key: KeyCode) -> Option<LoginAction> {
    match key {
        KeyCode::Esc => return Some(LoginAction::Quit),
        KeyCode::Enter => {
            let password = std::mem::take(&mut state.password);
            return Some(LoginAction::Submit(password));
        }
        KeyCode::Char(c) => {
            state.error = None;
            state.password.push(c);
        }
        KeyCode::Backspace => {
            state.password.pop();
        }
        _ => {}
    }
    None
}
