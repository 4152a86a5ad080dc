mod analytics;
mod inquiry;
mod project;
mod purchase;

pub use analytics::DailyMetric;
pub use inquiry::{
    BudgetRange, BudgetType, CommunicationPreference, Inquiry, InquiryDetails, InquiryStatus, Integration,
    KeyFeature, Platform, ProjectType, ServiceTier, Technology, Timeline, Urgency,
};
pub use project::Project;
pub use purchase::Purchase;
