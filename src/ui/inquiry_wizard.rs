use std::time::Instant;

use chrono::Local;
use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::error::WizardError;
use crate::models::{
    BudgetRange, BudgetType, CommunicationPreference, InquiryDetails, Integration, KeyFeature,
    Platform, ProjectType, ServiceTier, Technology, Timeline, Urgency,
};
use crate::store::Storage;
use crate::ui::components::date_input::DateInputState;
use crate::ui::components::popup::{field_line, help_bar};
use crate::wizard::{FieldChange, InquiryWizard, WizardStep};

pub enum InquiryAction {
    Closed,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum InputKind {
    Text,
    Choice,
    MultiSelect,
    Date,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InquiryField {
    Name,
    Email,
    Company,
    Phone,
    Service,
    ProjectTitle,
    ProjectType,
    ProjectDescription,
    TargetAudience,
    KeyFeatures,
    Technologies,
    Integrations,
    Platforms,
    BudgetType,
    BudgetRange,
    CustomBudget,
    Timeline,
    Deadline,
    Urgency,
    AdditionalRequirements,
    CommunicationPreference,
    ReferenceLinks,
}

impl InquiryField {
    fn label(self) -> &'static str {
        match self {
            InquiryField::Name => "Full Name *",
            InquiryField::Email => "Email Address *",
            InquiryField::Company => "Company",
            InquiryField::Phone => "Phone",
            InquiryField::Service => "Service",
            InquiryField::ProjectTitle => "Project Title *",
            InquiryField::ProjectType => "Project Type *",
            InquiryField::ProjectDescription => "Project Description *",
            InquiryField::TargetAudience => "Target Audience",
            InquiryField::KeyFeatures => "Key Features",
            InquiryField::Technologies => "Preferred Technologies",
            InquiryField::Integrations => "Integrations",
            InquiryField::Platforms => "Target Platforms",
            InquiryField::BudgetType => "Budget Type",
            InquiryField::BudgetRange => "Budget Range *",
            InquiryField::CustomBudget => "Custom Budget *",
            InquiryField::Timeline => "Timeline *",
            InquiryField::Deadline => "Deadline *",
            InquiryField::Urgency => "Urgency",
            InquiryField::AdditionalRequirements => "Additional Requirements",
            InquiryField::CommunicationPreference => "Preferred Communication",
            InquiryField::ReferenceLinks => "Reference Links",
        }
    }

    /// Key used for this field's validation message.
    fn key(self) -> &'static str {
        match self {
            InquiryField::Name => "name",
            InquiryField::Email => "email",
            InquiryField::Company => "company",
            InquiryField::Phone => "phone",
            InquiryField::Service => "selectedService",
            InquiryField::ProjectTitle => "projectTitle",
            InquiryField::ProjectType => "projectType",
            InquiryField::ProjectDescription => "projectDescription",
            InquiryField::TargetAudience => "targetAudience",
            InquiryField::KeyFeatures => "keyFeatures",
            InquiryField::Technologies => "technologies",
            InquiryField::Integrations => "integrations",
            InquiryField::Platforms => "platforms",
            InquiryField::BudgetType => "budgetType",
            InquiryField::BudgetRange => "budgetRange",
            InquiryField::CustomBudget => "customBudget",
            InquiryField::Timeline => "timeline",
            InquiryField::Deadline => "deadline",
            InquiryField::Urgency => "urgency",
            InquiryField::AdditionalRequirements => "additionalRequirements",
            InquiryField::CommunicationPreference => "communicationPreference",
            InquiryField::ReferenceLinks => "referenceLinks",
        }
    }

    fn kind(self) -> InputKind {
        match self {
            InquiryField::Service
            | InquiryField::ProjectType
            | InquiryField::BudgetType
            | InquiryField::BudgetRange
            | InquiryField::Timeline
            | InquiryField::Urgency
            | InquiryField::CommunicationPreference => InputKind::Choice,
            InquiryField::KeyFeatures
            | InquiryField::Technologies
            | InquiryField::Integrations
            | InquiryField::Platforms => InputKind::MultiSelect,
            InquiryField::Deadline => InputKind::Date,
            _ => InputKind::Text,
        }
    }
}

/// Fields shown on `step`. The budget step swaps range and custom amount
/// depending on the budget type.
fn fields_for(step: WizardStep, draft: &InquiryDetails) -> Vec<InquiryField> {
    match step {
        WizardStep::Personal => vec![
            InquiryField::Name,
            InquiryField::Email,
            InquiryField::Company,
            InquiryField::Phone,
            InquiryField::Service,
        ],
        WizardStep::ProjectDetails => vec![
            InquiryField::ProjectTitle,
            InquiryField::ProjectType,
            InquiryField::ProjectDescription,
            InquiryField::TargetAudience,
            InquiryField::KeyFeatures,
            InquiryField::Technologies,
            InquiryField::Integrations,
            InquiryField::Platforms,
        ],
        WizardStep::BudgetTimeline => {
            let amount = match draft.budget_type {
                BudgetType::Fixed => InquiryField::BudgetRange,
                BudgetType::Custom => InquiryField::CustomBudget,
            };
            vec![
                InquiryField::BudgetType,
                amount,
                InquiryField::Timeline,
                InquiryField::Deadline,
                InquiryField::Urgency,
            ]
        }
        WizardStep::ReviewSubmit => vec![
            InquiryField::AdditionalRequirements,
            InquiryField::CommunicationPreference,
            InquiryField::ReferenceLinks,
        ],
        WizardStep::Submitted => Vec::new(),
    }
}

fn text_value(draft: &InquiryDetails, field: InquiryField) -> &str {
    match field {
        InquiryField::Name => &draft.name,
        InquiryField::Email => &draft.email,
        InquiryField::Company => &draft.company,
        InquiryField::Phone => &draft.phone,
        InquiryField::ProjectTitle => &draft.project_title,
        InquiryField::ProjectDescription => &draft.project_description,
        InquiryField::TargetAudience => &draft.target_audience,
        InquiryField::CustomBudget => &draft.custom_budget,
        InquiryField::AdditionalRequirements => &draft.additional_requirements,
        InquiryField::ReferenceLinks => &draft.reference_links,
        _ => "",
    }
}

fn text_change(field: InquiryField, value: String) -> Option<FieldChange> {
    let change = match field {
        InquiryField::Name => FieldChange::Name(value),
        InquiryField::Email => FieldChange::Email(value),
        InquiryField::Company => FieldChange::Company(value),
        InquiryField::Phone => FieldChange::Phone(value),
        InquiryField::ProjectTitle => FieldChange::ProjectTitle(value),
        InquiryField::ProjectDescription => FieldChange::ProjectDescription(value),
        InquiryField::TargetAudience => FieldChange::TargetAudience(value),
        InquiryField::CustomBudget => FieldChange::CustomBudget(value),
        InquiryField::AdditionalRequirements => FieldChange::AdditionalRequirements(value),
        InquiryField::ReferenceLinks => FieldChange::ReferenceLinks(value),
        _ => return None,
    };
    Some(change)
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let i = all.iter().position(|v| *v == current).unwrap_or(0);
    let i = if forward { (i + 1) % len } else { (i + len - 1) % len };
    all[i]
}

/// Like [`cycle`], with "not selected" as an extra stop before the first option.
fn cycle_optional<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let len = all.len() + 1;
    let i = current
        .and_then(|c| all.iter().position(|v| *v == c))
        .map_or(0, |i| i + 1);
    let i = if forward { (i + 1) % len } else { (i + len - 1) % len };
    if i == 0 { None } else { Some(all[i - 1]) }
}

fn choice_value(draft: &InquiryDetails, field: InquiryField) -> String {
    fn or_unset<T: std::fmt::Display>(value: Option<T>) -> String {
        value.map_or_else(|| "Select...".to_string(), |v| v.to_string())
    }

    match field {
        InquiryField::Service => draft.selected_service.name().to_string(),
        InquiryField::ProjectType => or_unset(draft.project_type),
        InquiryField::BudgetType => draft.budget_type.to_string(),
        InquiryField::BudgetRange => or_unset(draft.budget_range),
        InquiryField::Timeline => or_unset(draft.timeline),
        InquiryField::Urgency => draft.urgency.to_string(),
        InquiryField::CommunicationPreference => draft.communication_preference.to_string(),
        _ => String::new(),
    }
}

fn choice_change(draft: &InquiryDetails, field: InquiryField, forward: bool) -> Option<FieldChange> {
    let change = match field {
        InquiryField::Service => {
            FieldChange::SelectedService(cycle(ServiceTier::ALL, draft.selected_service, forward))
        }
        InquiryField::ProjectType => {
            FieldChange::ProjectType(cycle_optional(ProjectType::ALL, draft.project_type, forward))
        }
        InquiryField::BudgetType => {
            FieldChange::BudgetType(cycle(BudgetType::ALL, draft.budget_type, forward))
        }
        InquiryField::BudgetRange => {
            FieldChange::BudgetRange(cycle_optional(BudgetRange::ALL, draft.budget_range, forward))
        }
        InquiryField::Timeline => {
            FieldChange::Timeline(cycle_optional(Timeline::ALL, draft.timeline, forward))
        }
        InquiryField::Urgency => FieldChange::Urgency(cycle(Urgency::ALL, draft.urgency, forward)),
        InquiryField::CommunicationPreference => FieldChange::CommunicationPreference(cycle(
            CommunicationPreference::ALL,
            draft.communication_preference,
            forward,
        )),
        _ => return None,
    };
    Some(change)
}

fn option_count(field: InquiryField) -> usize {
    match field {
        InquiryField::KeyFeatures => KeyFeature::ALL.len(),
        InquiryField::Technologies => Technology::ALL.len(),
        InquiryField::Integrations => Integration::ALL.len(),
        InquiryField::Platforms => Platform::ALL.len(),
        _ => 0,
    }
}

/// Label and checked state of option `index` of a multi-select field.
fn option_at(draft: &InquiryDetails, field: InquiryField, index: usize) -> Option<(&'static str, bool)> {
    match field {
        InquiryField::KeyFeatures => KeyFeature::ALL
            .get(index)
            .map(|v| (v.label(), draft.key_features.contains(v))),
        InquiryField::Technologies => Technology::ALL
            .get(index)
            .map(|v| (v.label(), draft.technologies.contains(v))),
        InquiryField::Integrations => Integration::ALL
            .get(index)
            .map(|v| (v.label(), draft.integrations.contains(v))),
        InquiryField::Platforms => Platform::ALL
            .get(index)
            .map(|v| (v.label(), draft.platforms.contains(v))),
        _ => None,
    }
}

fn toggle_change(field: InquiryField, index: usize) -> Option<FieldChange> {
    match field {
        InquiryField::KeyFeatures => KeyFeature::ALL
            .get(index)
            .map(|v| FieldChange::ToggleKeyFeature(*v)),
        InquiryField::Technologies => Technology::ALL
            .get(index)
            .map(|v| FieldChange::ToggleTechnology(*v)),
        InquiryField::Integrations => Integration::ALL
            .get(index)
            .map(|v| FieldChange::ToggleIntegration(*v)),
        InquiryField::Platforms => Platform::ALL
            .get(index)
            .map(|v| FieldChange::TogglePlatform(*v)),
        _ => None,
    }
}

fn selected_labels(draft: &InquiryDetails, field: InquiryField) -> String {
    let labels: Vec<&str> = (0..option_count(field))
        .filter_map(|i| option_at(draft, field, i))
        .filter(|(_, checked)| *checked)
        .map(|(label, _)| label)
        .collect();
    if labels.is_empty() {
        "None".to_string()
    } else {
        labels.join(", ")
    }
}

pub struct InquiryWizardState<S: Storage> {
    wizard: InquiryWizard<S>,
    focus: usize,
    editing: bool,
    option_cursor: usize,
    deadline: DateInputState,
    message: Option<String>,
}

impl<S: Storage> InquiryWizardState<S> {
    pub fn new(store: S) -> Self {
        let today = Local::now().date_naive();
        Self {
            wizard: InquiryWizard::new(store),
            focus: 0,
            editing: false,
            option_cursor: 0,
            deadline: DateInputState::new(None, today).with_min(today),
            message: None,
        }
    }

    pub fn wizard(&self) -> &InquiryWizard<S> {
        &self.wizard
    }

    fn fields(&self) -> Vec<InquiryField> {
        fields_for(self.wizard.step(), self.wizard.draft())
    }

    fn focused_field(&self) -> Option<InquiryField> {
        self.fields().get(self.focus).copied()
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.fields().len();
        if len == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
        self.option_cursor = 0;
    }

    fn reset_view(&mut self) {
        self.focus = 0;
        self.editing = false;
        self.option_cursor = 0;
    }

    /// Let the wizard's confirmation timer run. Returns true when it started over.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.wizard.tick(now) {
            return false;
        }
        self.reset_view();
        self.deadline.set(None);
        self.message = None;
        true
    }

    fn edit_text(&mut self, field: InquiryField, key: KeyCode) {
        let mut value = text_value(self.wizard.draft(), field).to_string();
        match key {
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => return,
        }
        if let Some(change) = text_change(field, value) {
            self.wizard.apply(change);
        }
    }

    fn go_next(&mut self) {
        match self.wizard.next() {
            Ok(_) => {
                self.reset_view();
                self.message = None;
            }
            Err(WizardError::Validation(_)) => {
                self.message = Some("Please fill in the required fields".to_string());
            }
            Err(_) => {
                self.message = Some("Press S to submit your inquiry".to_string());
            }
        }
    }

    fn go_previous(&mut self) {
        if self.wizard.previous().is_ok() {
            self.reset_view();
            self.message = None;
        }
    }

    fn submit(&mut self) -> Result<(), WizardError> {
        match self.wizard.submit() {
            Ok(_) => {
                self.reset_view();
                self.message = None;
                Ok(())
            }
            Err(WizardError::Validation(_)) | Err(WizardError::InvalidTransition { .. }) => {
                self.message = Some("Please fill in the required fields".to_string());
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

pub fn render_inquiry_wizard<B: Backend, S: Storage>(f: &mut Frame<B>, state: &mut InquiryWizardState<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let step = state.wizard.step();
    if step == WizardStep::Submitted {
        render_submitted(f, state, chunks[1]);
        f.render_widget(help_bar("Starting a new inquiry shortly | Esc - Close"), chunks[2]);
        return;
    }

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Hire Me  Step {} of 4: {}", step.number(), step.title())),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(f64::from(step.number()) / 4.0);
    f.render_widget(gauge, chunks[0]);

    if step == WizardStep::ReviewSubmit {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(chunks[1]);
        render_summary(f, state.wizard.draft(), halves[0]);
        render_fields(f, state, halves[1]);
    } else {
        render_fields(f, state, chunks[1]);
    }

    let help_text = if state.editing {
        "Type to edit | Enter/Esc - Done"
    } else if step == WizardStep::ReviewSubmit {
        "Tab/Arrows - Field | Left/Right - Change | Enter - Edit | S - Submit | P - Back | Esc - Cancel"
    } else {
        "Tab/Arrows - Field | Left/Right - Change | Space - Toggle | Enter - Edit | N - Next | P - Back | Esc - Cancel"
    };
    let help = match &state.message {
        Some(message) => Paragraph::new(Spans::from(vec![
            Span::styled(format!("{}  ", message), Style::default().fg(Color::Red)),
            Span::raw(help_text),
        ]))
        .block(Block::default().borders(Borders::ALL)),
        None => help_bar(help_text),
    };
    f.render_widget(help, chunks[2]);
}

fn render_fields<B: Backend, S: Storage>(f: &mut Frame<B>, state: &InquiryWizardState<S>, area: Rect) {
    let draft = state.wizard.draft();
    let errors = state.wizard.errors();

    let items: Vec<ListItem> = state
        .fields()
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == state.focus;
            let editing = focused && state.editing;
            let value = match field.kind() {
                InputKind::Text if editing => format!("{}|", text_value(draft, field)),
                InputKind::Text => text_value(draft, field).to_string(),
                InputKind::Choice if focused => format!("< {} >", choice_value(draft, field)),
                InputKind::Choice => choice_value(draft, field),
                InputKind::MultiSelect => selected_labels(draft, field),
                InputKind::Date => state.deadline.get_display_string(),
            };

            let mut lines = vec![field_line(field.label(), value, focused, editing, errors.get(field.key()))];
            if focused && field.kind() == InputKind::MultiSelect {
                if let Some((label, checked)) = option_at(draft, field, state.option_cursor) {
                    let mark = if checked { "[x]" } else { "[ ]" };
                    lines.push(Spans::from(Span::styled(
                        format!(
                            "    < {} {} >  ({}/{})",
                            mark,
                            label,
                            state.option_cursor + 1,
                            option_count(field)
                        ),
                        Style::default().fg(Color::Yellow),
                    )));
                }
            }
            if focused && field == InquiryField::Service {
                let service = draft.selected_service;
                lines.push(Spans::from(Span::styled(
                    format!("    {} | {}", service.price(), service.duration()),
                    Style::default().fg(Color::Gray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Details"));
    f.render_widget(list, area);
}

fn render_summary<B: Backend>(f: &mut Frame<B>, draft: &InquiryDetails, area: Rect) {
    let label = Style::default().fg(Color::Cyan);
    let row = |name: &'static str, value: String| {
        Spans::from(vec![Span::styled(format!("{}: ", name), label), Span::raw(value)])
    };

    let lines = vec![
        row("Name", draft.name.clone()),
        row("Email", draft.email.clone()),
        row("Company", draft.company.clone()),
        row("Service", draft.selected_service.name().to_string()),
        row("Project", draft.project_title.clone()),
        row(
            "Type",
            draft.project_type.map(|t| t.to_string()).unwrap_or_default(),
        ),
        row("Budget", draft.estimated_value()),
        row(
            "Timeline",
            draft.timeline.map(|t| t.to_string()).unwrap_or_default(),
        ),
        row(
            "Deadline",
            draft
                .deadline
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ),
        row("Urgency", draft.urgency.to_string()),
        row("Features", selected_labels(draft, InquiryField::KeyFeatures)),
        row("Technologies", selected_labels(draft, InquiryField::Technologies)),
    ];

    let summary = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Summary"))
        .wrap(Wrap { trim: true });
    f.render_widget(summary, area);
}

fn render_submitted<B: Backend, S: Storage>(f: &mut Frame<B>, state: &InquiryWizardState<S>, area: Rect) {
    let mut lines = vec![
        Spans::from(Span::styled(
            "Inquiry Submitted Successfully!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Spans::from(""),
        Spans::from("Thank you for your interest. I'll review your project details and get back to you within 24 hours."),
    ];
    if let Some(inquiry) = state.wizard.last_submission() {
        lines.push(Spans::from(""));
        lines.push(Spans::from(format!("Reference: {}", inquiry.id)));
    }

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(body, area);
}

pub fn handle_input<S: Storage>(
    state: &mut InquiryWizardState<S>,
    key: KeyCode,
) -> Result<Option<InquiryAction>, WizardError> {
    if state.wizard.step() == WizardStep::Submitted {
        if key == KeyCode::Esc {
            return Ok(Some(InquiryAction::Closed));
        }
        return Ok(None);
    }

    let Some(field) = state.focused_field() else {
        return Ok(None);
    };

    if state.editing {
        match (field.kind(), key) {
            (_, KeyCode::Enter) | (_, KeyCode::Esc) => {
                state.editing = false;
                if field.kind() == InputKind::Date {
                    state.deadline.toggle_editing();
                }
            }
            (InputKind::Date, key) => {
                if state.deadline.handle_input(key) {
                    state.wizard.apply(FieldChange::Deadline(state.deadline.date));
                }
            }
            (_, key) => state.edit_text(field, key),
        }
        return Ok(None);
    }

    match key {
        KeyCode::Esc => {
            state.wizard.cancel();
            tracing::debug!("inquiry draft discarded");
            return Ok(Some(InquiryAction::Closed));
        }
        KeyCode::Up | KeyCode::BackTab => state.move_focus(false),
        KeyCode::Down | KeyCode::Tab => state.move_focus(true),
        KeyCode::Char('n') | KeyCode::Char('N') => state.go_next(),
        KeyCode::Char('p') | KeyCode::Char('P') => state.go_previous(),
        KeyCode::Char('s') | KeyCode::Char('S') if state.wizard.step() == WizardStep::ReviewSubmit => {
            state.submit()?;
        }
        KeyCode::Enter => match field.kind() {
            InputKind::Text => state.editing = true,
            InputKind::Date => {
                state.editing = true;
                state.deadline.toggle_editing();
            }
            _ => {}
        },
        KeyCode::Left | KeyCode::Right => {
            let forward = key == KeyCode::Right;
            match field.kind() {
                InputKind::Choice => {
                    if let Some(change) = choice_change(state.wizard.draft(), field, forward) {
                        state.wizard.apply(change);
                    }
                }
                InputKind::MultiSelect => {
                    let len = option_count(field);
                    state.option_cursor = if forward {
                        (state.option_cursor + 1) % len
                    } else {
                        (state.option_cursor + len - 1) % len
                    };
                }
                _ => {}
            }
        }
        KeyCode::Char(' ') if field.kind() == InputKind::MultiSelect => {
            if let Some(change) = toggle_change(field, state.option_cursor) {
                state.wizard.apply(change);
            }
        }
        _ => {}
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::InquiryStatus;
    use crate::review::SubmissionsReview;
    use crate::store::MemoryStore;
    use crate::wizard::RESET_DELAY;

    fn press<S: Storage>(state: &mut InquiryWizardState<S>, key: KeyCode) {
        handle_input(state, key).unwrap();
    }

    fn type_into<S: Storage>(state: &mut InquiryWizardState<S>, text: &str) {
        press(state, KeyCode::Enter);
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
        press(state, KeyCode::Enter);
    }

    #[test]
    fn choice_cycles_through_unset() {
        assert_eq!(cycle_optional(Timeline::ALL, None, true), Some(Timeline::Asap));
        assert_eq!(cycle_optional(Timeline::ALL, Some(Timeline::Asap), false), None);
        assert_eq!(cycle_optional(Timeline::ALL, None, false), Some(Timeline::Flexible));
    }

    #[test]
    fn next_with_empty_name_stays_on_first_step() {
        let store = MemoryStore::new();
        let mut state = InquiryWizardState::new(&store);

        press(&mut state, KeyCode::Char('n'));

        assert_eq!(state.wizard().step(), WizardStep::Personal);
        assert!(state.wizard().errors().contains("name"));
        assert!(state.message.is_some());
    }

    #[test]
    fn keyboard_walkthrough_submits_inquiry() {
        let store = MemoryStore::new();
        let mut state = InquiryWizardState::new(&store);

        type_into(&mut state, "Asha");
        press(&mut state, KeyCode::Down);
        type_into(&mut state, "asha@example.com");
        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.wizard().step(), WizardStep::ProjectDetails);

        type_into(&mut state, "Shop");
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::Down);
        type_into(&mut state, "Online store");
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Char(' '));
        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.wizard().step(), WizardStep::BudgetTimeline);

        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);
        for c in "2099".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.wizard().step(), WizardStep::ReviewSubmit);

        press(&mut state, KeyCode::Char('s'));
        assert_eq!(state.wizard().step(), WizardStep::Submitted);

        let review = SubmissionsReview::open(&store).unwrap();
        let inquiry = &review.inquiries()[0];
        assert_eq!(inquiry.status, InquiryStatus::Pending);
        assert_eq!(inquiry.details.project_type, Some(ProjectType::EcommerceWebsite));
        assert!(inquiry.details.key_features.contains(&KeyFeature::UserAuthentication));
        assert_eq!(inquiry.estimated_value, BudgetRange::FiftyThousandToOneLakh.label());

        let later = Instant::now() + RESET_DELAY + Duration::from_millis(10);
        assert!(state.tick(later));
        assert_eq!(state.wizard().step(), WizardStep::Personal);
        assert_eq!(state.wizard().draft(), &InquiryDetails::default());
    }

    #[test]
    fn escape_discards_the_draft() {
        let store = MemoryStore::new();
        let mut state = InquiryWizardState::new(&store);
        type_into(&mut state, "Asha");

        assert!(matches!(
            handle_input(&mut state, KeyCode::Esc).unwrap(),
            Some(InquiryAction::Closed)
        ));
        assert_eq!(state.wizard().draft().name, "");
        assert!(store.is_empty());
    }
}
