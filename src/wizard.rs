//! Four-step "hire me" inquiry wizard.
//!
//! The draft is a plain value; every edit goes through [`apply_field_change`].
//! `Next` only lets the user past a step whose required fields are filled.
//! `Submit` checks the review step alone, so a field cleared after going back
//! is not caught.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use chrono::{NaiveDate, Utc};
use regex::Regex;

use crate::error::{FieldErrors, WizardError};
use crate::models::{
    BudgetRange, BudgetType, CommunicationPreference, Inquiry, InquiryDetails, InquiryStatus,
    Integration, KeyFeature, Platform, ProjectType, ServiceTier, Technology, Timeline, Urgency,
};
use crate::store::{Storage, StorageExt, keys};

/// How long the confirmation stays up before the wizard starts over.
pub const RESET_DELAY: Duration = Duration::from_secs(4);

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Personal,
    ProjectDetails,
    BudgetTimeline,
    ReviewSubmit,
    Submitted,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Personal => 1,
            WizardStep::ProjectDetails => 2,
            WizardStep::BudgetTimeline => 3,
            WizardStep::ReviewSubmit => 4,
            WizardStep::Submitted => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Personal => "Personal Information",
            WizardStep::ProjectDetails => "Project Details",
            WizardStep::BudgetTimeline => "Budget & Timeline",
            WizardStep::ReviewSubmit => "Review & Submit",
            WizardStep::Submitted => "Submitted",
        }
    }

    fn following(self) -> Option<WizardStep> {
        match self {
            WizardStep::Personal => Some(WizardStep::ProjectDetails),
            WizardStep::ProjectDetails => Some(WizardStep::BudgetTimeline),
            WizardStep::BudgetTimeline => Some(WizardStep::ReviewSubmit),
            WizardStep::ReviewSubmit | WizardStep::Submitted => None,
        }
    }

    fn preceding(self) -> Option<WizardStep> {
        match self {
            WizardStep::ProjectDetails => Some(WizardStep::Personal),
            WizardStep::BudgetTimeline => Some(WizardStep::ProjectDetails),
            WizardStep::ReviewSubmit => Some(WizardStep::BudgetTimeline),
            WizardStep::Personal | WizardStep::Submitted => None,
        }
    }
}

/// A single edit to the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Name(String),
    Email(String),
    Company(String),
    Phone(String),
    SelectedService(ServiceTier),

    ProjectTitle(String),
    ProjectType(Option<ProjectType>),
    ProjectDescription(String),
    TargetAudience(String),
    ToggleKeyFeature(KeyFeature),
    ToggleTechnology(Technology),
    ToggleIntegration(Integration),
    TogglePlatform(Platform),

    BudgetType(BudgetType),
    BudgetRange(Option<BudgetRange>),
    CustomBudget(String),
    Timeline(Option<Timeline>),
    Deadline(Option<NaiveDate>),
    Urgency(Urgency),

    AdditionalRequirements(String),
    CommunicationPreference(CommunicationPreference),
    ReferenceLinks(String),
}

impl FieldChange {
    /// Stored name of the field this change touches.
    pub fn field(&self) -> &'static str {
        match self {
            FieldChange::Name(_) => "name",
            FieldChange::Email(_) => "email",
            FieldChange::Company(_) => "company",
            FieldChange::Phone(_) => "phone",
            FieldChange::SelectedService(_) => "selectedService",
            FieldChange::ProjectTitle(_) => "projectTitle",
            FieldChange::ProjectType(_) => "projectType",
            FieldChange::ProjectDescription(_) => "projectDescription",
            FieldChange::TargetAudience(_) => "targetAudience",
            FieldChange::ToggleKeyFeature(_) => "keyFeatures",
            FieldChange::ToggleTechnology(_) => "technologies",
            FieldChange::ToggleIntegration(_) => "integrations",
            FieldChange::TogglePlatform(_) => "platforms",
            FieldChange::BudgetType(_) => "budgetType",
            FieldChange::BudgetRange(_) => "budgetRange",
            FieldChange::CustomBudget(_) => "customBudget",
            FieldChange::Timeline(_) => "timeline",
            FieldChange::Deadline(_) => "deadline",
            FieldChange::Urgency(_) => "urgency",
            FieldChange::AdditionalRequirements(_) => "additionalRequirements",
            FieldChange::CommunicationPreference(_) => "communicationPreference",
            FieldChange::ReferenceLinks(_) => "referenceLinks",
        }
    }
}

fn toggle<T: Ord>(set: &mut std::collections::BTreeSet<T>, item: T) {
    if !set.remove(&item) {
        set.insert(item);
    }
}

/// Pure reducer: the draft with one change applied.
pub fn apply_field_change(mut draft: InquiryDetails, change: FieldChange) -> InquiryDetails {
    match change {
        FieldChange::Name(v) => draft.name = v,
        FieldChange::Email(v) => draft.email = v,
        FieldChange::Company(v) => draft.company = v,
        FieldChange::Phone(v) => draft.phone = v,
        FieldChange::SelectedService(v) => draft.selected_service = v,
        FieldChange::ProjectTitle(v) => draft.project_title = v,
        FieldChange::ProjectType(v) => draft.project_type = v,
        FieldChange::ProjectDescription(v) => draft.project_description = v,
        FieldChange::TargetAudience(v) => draft.target_audience = v,
        FieldChange::ToggleKeyFeature(v) => toggle(&mut draft.key_features, v),
        FieldChange::ToggleTechnology(v) => toggle(&mut draft.technologies, v),
        FieldChange::ToggleIntegration(v) => toggle(&mut draft.integrations, v),
        FieldChange::TogglePlatform(v) => toggle(&mut draft.platforms, v),
        FieldChange::BudgetType(v) => draft.budget_type = v,
        FieldChange::BudgetRange(v) => draft.budget_range = v,
        FieldChange::CustomBudget(v) => draft.custom_budget = v,
        FieldChange::Timeline(v) => draft.timeline = v,
        FieldChange::Deadline(v) => draft.deadline = v,
        FieldChange::Urgency(v) => draft.urgency = v,
        FieldChange::AdditionalRequirements(v) => draft.additional_requirements = v,
        FieldChange::CommunicationPreference(v) => draft.communication_preference = v,
        FieldChange::ReferenceLinks(v) => draft.reference_links = v,
    }
    draft
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Required-field check for one step. Steps 4 and 5 require nothing.
pub fn validate_step(draft: &InquiryDetails, step: WizardStep) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match step {
        WizardStep::Personal => {
            if draft.name.trim().is_empty() {
                errors.insert("name", "Name is required");
            }
            if draft.email.trim().is_empty() {
                errors.insert("email", "Email is required");
            } else if !is_valid_email(&draft.email) {
                errors.insert("email", "Invalid email format");
            }
        }
        WizardStep::ProjectDetails => {
            if draft.project_title.trim().is_empty() {
                errors.insert("projectTitle", "Project title is required");
            }
            if draft.project_type.is_none() {
                errors.insert("projectType", "Project type is required");
            }
            if draft.project_description.trim().is_empty() {
                errors.insert("projectDescription", "Project description is required");
            }
        }
        WizardStep::BudgetTimeline => {
            match draft.budget_type {
                BudgetType::Fixed if draft.budget_range.is_none() => {
                    errors.insert("budgetRange", "Budget range is required");
                }
                BudgetType::Custom if draft.custom_budget.trim().is_empty() => {
                    errors.insert("customBudget", "Custom budget is required");
                }
                _ => {}
            }
            if draft.timeline.is_none() {
                errors.insert("timeline", "Timeline is required");
            }
            if draft.deadline.is_none() {
                errors.insert("deadline", "Deadline is required");
            }
        }
        WizardStep::ReviewSubmit | WizardStep::Submitted => {}
    }

    errors
}

pub struct InquiryWizard<S: Storage> {
    store: S,
    step: WizardStep,
    draft: InquiryDetails,
    errors: FieldErrors,
    submitted_at: Option<Instant>,
    last_submission: Option<Inquiry>,
}

impl<S: Storage> InquiryWizard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            step: WizardStep::Personal,
            draft: InquiryDetails::default(),
            errors: FieldErrors::new(),
            submitted_at: None,
            last_submission: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &InquiryDetails {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The inquiry created by the most recent successful submit.
    pub fn last_submission(&self) -> Option<&Inquiry> {
        self.last_submission.as_ref()
    }

    /// Apply an edit and drop any error reported for that field.
    pub fn apply(&mut self, change: FieldChange) {
        self.errors.clear(change.field());
        let draft = std::mem::take(&mut self.draft);
        self.draft = apply_field_change(draft, change);
    }

    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        let following = self.step.following().ok_or(WizardError::InvalidTransition {
            action: "go to the next step",
            step: self.step.title(),
        })?;

        self.errors = validate_step(&self.draft, self.step);
        if !self.errors.is_empty() {
            tracing::debug!(step = self.step.number(), errors = %self.errors, "step incomplete");
            return Err(WizardError::Validation(self.errors.clone()));
        }

        self.step = following;
        Ok(self.step)
    }

    pub fn previous(&mut self) -> Result<WizardStep, WizardError> {
        let preceding = self.step.preceding().ok_or(WizardError::InvalidTransition {
            action: "go back",
            step: self.step.title(),
        })?;
        self.step = preceding;
        Ok(self.step)
    }

    /// Store the draft as a new pending inquiry.
    pub fn submit(&mut self) -> Result<&Inquiry, WizardError> {
        self.submit_at(Instant::now())
    }

    pub fn submit_at(&mut self, now: Instant) -> Result<&Inquiry, WizardError> {
        if self.step != WizardStep::ReviewSubmit {
            return Err(WizardError::InvalidTransition {
                action: "submit",
                step: self.step.title(),
            });
        }

        // Only the current step is re-checked.
        self.errors = validate_step(&self.draft, self.step);
        if !self.errors.is_empty() {
            return Err(WizardError::Validation(self.errors.clone()));
        }

        let mut inquiries: Vec<Inquiry> = self
            .store
            .read_for_update(keys::INQUIRIES)?
            .unwrap_or_default();
        let submitted_at = Utc::now();
        let mut millis = submitted_at.timestamp_millis();
        while inquiries.iter().any(|i| i.id == millis.to_string()) {
            millis += 1;
        }

        let inquiry = Inquiry {
            id: millis.to_string(),
            estimated_value: self.draft.estimated_value(),
            details: self.draft.clone(),
            submitted_at,
            status: InquiryStatus::Pending,
        };
        inquiries.push(inquiry.clone());
        self.store.write(keys::INQUIRIES, &inquiries)?;
        tracing::info!(id = %inquiry.id, service = %inquiry.details.selected_service, "inquiry submitted");

        self.step = WizardStep::Submitted;
        self.submitted_at = Some(now);
        Ok(self.last_submission.insert(inquiry))
    }

    /// Throw the draft away without saving anything.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Advance timers. Returns true when the confirmation has expired and the
    /// wizard went back to an empty first step.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.submitted_at {
            Some(at) if self.step == WizardStep::Submitted && now.duration_since(at) >= RESET_DELAY => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    fn reset(&mut self) {
        self.step = WizardStep::Personal;
        self.draft = InquiryDetails::default();
        self.errors = FieldErrors::new();
        self.submitted_at = None;
    }
}
