use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::catalog::{parse_list, ProjectForm};
use crate::error::FieldErrors;
use crate::models::Project;
use crate::ui::components::popup::{field_line, help_bar, title_bar};

pub enum ProjectWizardAction {
    Cancel,
    Save { id: Option<String>, form: ProjectForm },
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum ProjectField {
    Title,
    Description,
    LongDescription,
    Image,
    AdditionalImages,
    Technologies,
    GithubUrl,
    LiveUrl,
}

impl ProjectField {
    const ALL: [ProjectField; 8] = [
        ProjectField::Title,
        ProjectField::Description,
        ProjectField::LongDescription,
        ProjectField::Image,
        ProjectField::AdditionalImages,
        ProjectField::Technologies,
        ProjectField::GithubUrl,
        ProjectField::LiveUrl,
    ];

    fn label(self) -> &'static str {
        match self {
            ProjectField::Title => "Title *",
            ProjectField::Description => "Description *",
            ProjectField::LongDescription => "Long Description",
            ProjectField::Image => "Image URL",
            ProjectField::AdditionalImages => "Additional Images (comma separated)",
            ProjectField::Technologies => "Technologies (comma separated)",
            ProjectField::GithubUrl => "GitHub URL *",
            ProjectField::LiveUrl => "Live URL *",
        }
    }

    fn key(self) -> &'static str {
        match self {
            ProjectField::Title => "title",
            ProjectField::Description => "description",
            ProjectField::LongDescription => "longDescription",
            ProjectField::Image => "image",
            ProjectField::AdditionalImages => "additionalImages",
            ProjectField::Technologies => "technologies",
            ProjectField::GithubUrl => "githubUrl",
            ProjectField::LiveUrl => "liveUrl",
        }
    }
}

pub struct ProjectWizardState {
    project_id: Option<String>,
    values: [String; 8],
    current: usize,
    editing: bool,
    errors: FieldErrors,
}

impl ProjectWizardState {
    pub fn new() -> Self {
        Self {
            project_id: None,
            values: Default::default(),
            current: 0,
            editing: false,
            errors: FieldErrors::new(),
        }
    }

    pub fn from_existing(project: &Project) -> Self {
        let mut state = Self::new();
        state.project_id = Some(project.id.clone());
        state.values = [
            project.title.clone(),
            project.description.clone(),
            project.long_description.clone(),
            project.image.clone(),
            project.additional_images.join(", "),
            project.technologies.join(", "),
            project.github_url.clone(),
            project.live_url.clone(),
        ];
        state
    }

    pub fn current_field(&self) -> ProjectField {
        ProjectField::ALL[self.current]
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current = (self.current + 1) % ProjectField::ALL.len();
    }

    pub fn previous_field(&mut self) {
        self.current = (self.current + ProjectField::ALL.len() - 1) % ProjectField::ALL.len();
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let field = self.current_field();
        let value = &mut self.values[self.current];
        match key {
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => return,
        }
        self.errors.clear(field.key());
    }

    pub fn to_form(&self) -> ProjectForm {
        ProjectForm {
            title: self.values[0].clone(),
            description: self.values[1].clone(),
            long_description: self.values[2].clone(),
            image: self.values[3].clone(),
            additional_images: parse_list(&self.values[4]),
            technologies: parse_list(&self.values[5]),
            github_url: self.values[6].clone(),
            live_url: self.values[7].clone(),
        }
    }
}

impl Default for ProjectWizardState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_project_wizard<B: Backend>(f: &mut Frame<B>, state: &mut ProjectWizardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title_text = if state.project_id.is_none() {
        "Add New Project"
    } else {
        "Edit Project"
    };
    f.render_widget(title_bar(title_text), chunks[0]);

    render_form(f, state, chunks[1]);

    let help_text = if state.editing {
        "Enter - Save field | Esc - Stop editing"
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Save project | Esc - Cancel"
    };
    f.render_widget(help_bar(help_text), chunks[2]);
}

fn render_form<B: Backend>(f: &mut Frame<B>, state: &mut ProjectWizardState, area: Rect) {
    let items: Vec<ListItem> = ProjectField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == state.current;
            let value = if focused && state.editing {
                format!("{}|", state.values[i])
            } else {
                state.values[i].clone()
            };
            ListItem::new(field_line(
                field.label(),
                value,
                focused,
                state.editing,
                state.errors.get(field.key()),
            ))
        })
        .collect();

    let form_list =
        List::new(items).block(Block::default().borders(Borders::ALL).title("Project Details"));

    f.render_widget(form_list, area);
}

pub fn handle_input(state: &mut ProjectWizardState, key: KeyCode) -> Option<ProjectWizardAction> {
    match key {
        KeyCode::Esc => {
            if state.editing {
                state.toggle_editing();
            } else {
                return Some(ProjectWizardAction::Cancel);
            }
        }
        KeyCode::Enter => state.toggle_editing(),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down | KeyCode::Tab if !state.editing => state.next_field(),
        KeyCode::Char('s') | KeyCode::Char('S') if !state.editing => {
            let form = state.to_form();
            let errors = form.validate();
            if errors.is_empty() {
                return Some(ProjectWizardAction::Save {
                    id: state.project_id.clone(),
                    form,
                });
            }
            state.set_errors(errors);
        }
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }

    None
}
