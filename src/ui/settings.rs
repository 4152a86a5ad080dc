use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::auth::{generate_password, MIN_PASSWORD_LEN};
use crate::ui::components::popup::{field_line, help_bar, render_confirmation, title_bar};

pub enum SettingsAction {
    Back,
    ChangePassword {
        current: String,
        new: String,
        confirm: String,
    },
    ResetPassword,
}

const LABELS: [&str; 3] = ["Current Password", "New Password", "Confirm New Password"];

#[derive(Default)]
pub struct SettingsState {
    values: [String; 3],
    current: usize,
    editing: bool,
    show_passwords: bool,
    confirm_reset: bool,
    message: Option<Result<String, String>>,
}

impl SettingsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.values = Default::default();
        self.message = Some(Ok(message.into()));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.message = Some(Err(message.into()));
    }

    fn display_value(&self, index: usize) -> String {
        let value = if self.show_passwords {
            self.values[index].clone()
        } else {
            "*".repeat(self.values[index].chars().count())
        };
        if self.editing && index == self.current {
            format!("{}|", value)
        } else {
            value
        }
    }

    /// Put a random password into both new-password fields.
    pub fn fill_generated(&mut self) {
        let password = generate_password();
        self.values[1] = password.clone();
        self.values[2] = password;
        self.show_passwords = true;
        self.message = None;
    }
}

pub fn render_settings<B: Backend>(f: &mut Frame<B>, state: &mut SettingsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(6),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    f.render_widget(title_bar("Admin Settings"), chunks[0]);

    let items: Vec<ListItem> = LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            ListItem::new(field_line(
                label,
                state.display_value(i),
                i == state.current,
                state.editing,
                None,
            ))
        })
        .collect();
    let form = List::new(items).block(Block::default().borders(Borders::ALL).title("Change Password"));
    f.render_widget(form, chunks[1]);

    let mut lines = Vec::new();
    match &state.message {
        Some(Ok(message)) => lines.push(Spans::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Green),
        ))),
        Some(Err(message)) => lines.push(Spans::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))),
        None => {}
    }
    lines.push(Spans::from(""));
    lines.push(Spans::from(format!(
        "Use at least {} characters and mix letters, numbers and symbols.",
        MIN_PASSWORD_LEN
    )));
    lines.push(Spans::from(
        "The password is stored in plain text in the data file.",
    ));
    let notes = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Security"))
        .wrap(Wrap { trim: true });
    f.render_widget(notes, chunks[2]);

    let help_text = if state.editing {
        "Type password | Enter/Esc - Done"
    } else {
        "Enter - Edit | Up/Down - Field | S - Save | G - Generate | V - Show/Hide | R - Reset to default | Esc - Back"
    };
    f.render_widget(help_bar(help_text), chunks[3]);

    if state.confirm_reset {
        render_confirmation(
            f,
            "Reset Password",
            &["Reset the admin password to the default?"],
        );
    }
}

pub fn handle_input(state: &mut SettingsState, key: KeyCode) -> Option<SettingsAction> {
    if state.confirm_reset {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                state.confirm_reset = false;
                return Some(SettingsAction::ResetPassword);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.confirm_reset = false,
            _ => {}
        }
        return None;
    }

    if state.editing {
        match key {
            KeyCode::Enter | KeyCode::Esc => state.editing = false,
            KeyCode::Char(c) => {
                state.message = None;
                state.values[state.current].push(c);
            }
            KeyCode::Backspace => {
                state.values[state.current].pop();
            }
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Esc => return Some(SettingsAction::Back),
        KeyCode::Enter => state.editing = true,
        KeyCode::Up => state.current = (state.current + LABELS.len() - 1) % LABELS.len(),
        KeyCode::Down | KeyCode::Tab => state.current = (state.current + 1) % LABELS.len(),
        KeyCode::Char('g') | KeyCode::Char('G') => state.fill_generated(),
        KeyCode::Char('v') | KeyCode::Char('V') => state.show_passwords = !state.show_passwords,
        KeyCode::Char('r') | KeyCode::Char('R') => state.confirm_reset = true,
        KeyCode::Char('s') | KeyCode::Char('S') => {
            let [current, new, confirm] = state.values.clone();
            return Some(SettingsAction::ChangePassword {
                current,
                new,
                confirm,
            });
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_fills_both_new_fields() {
        let mut state = SettingsState::new();
        handle_input(&mut state, KeyCode::Char('g'));

        assert_eq!(state.values[1].len(), 12);
        assert_eq!(state.values[1], state.values[2]);
        assert!(state.values[0].is_empty());
    }

    #[test]
    fn save_sends_all_three_fields() {
        let mut state = SettingsState::new();
        for (i, text) in ["admin123", "hunter22", "hunter22"].iter().enumerate() {
            state.current = i;
            handle_input(&mut state, KeyCode::Enter);
            for c in text.chars() {
                handle_input(&mut state, KeyCode::Char(c));
            }
            handle_input(&mut state, KeyCode::Enter);
        }

        match handle_input(&mut state, KeyCode::Char('s')) {
            Some(SettingsAction::ChangePassword { current, new, confirm }) => {
                assert_eq!(current, "admin123");
                assert_eq!(new, "hunter22");
                assert_eq!(confirm, "hunter22");
            }
            _ => panic!("expected a password change"),
        }
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut state = SettingsState::new();

        assert!(handle_input(&mut state, KeyCode::Char('r')).is_none());
        assert!(handle_input(&mut state, KeyCode::Char('n')).is_none());
        assert!(handle_input(&mut state, KeyCode::Char('r')).is_none());
        assert!(matches!(
            handle_input(&mut state, KeyCode::Char('y')),
            Some(SettingsAction::ResetPassword)
        ));
    }
}
