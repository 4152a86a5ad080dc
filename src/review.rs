//! Admin review of submitted inquiries.

use crate::error::ReviewError;
use crate::models::{BudgetType, Inquiry, InquiryStatus, ServiceTier};
use crate::store::{Storage, StorageExt, keys};

/// Search and filter settings. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    pub search: String,
    pub status: Option<InquiryStatus>,
    pub service: Option<ServiceTier>,
}

impl SubmissionFilter {
    pub fn matches(&self, inquiry: &Inquiry) -> bool {
        let needle = self.search.to_lowercase();
        let details = &inquiry.details;
        let matches_search = [
            details.name.as_str(),
            details.email.as_str(),
            details.project_title.as_str(),
            details.company.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle));

        let matches_status = self.status.is_none_or(|s| s == inquiry.status);
        let matches_service = self.service.is_none_or(|s| s == details.selected_service);

        matches_search && matches_status && matches_service
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionStats {
    pub total: usize,
    pub pending: usize,
    pub reviewed: usize,
    pub responded: usize,
    pub rejected: usize,
    /// Sum of the upper bounds of fixed budget ranges, in rupees.
    pub total_value: u64,
}

/// Upper bound of a range label such as `₹50,000 - ₹1,00,000`.
/// Anything without a parsable second half counts as zero.
pub fn budget_upper_bound(range: &str) -> u64 {
    range
        .split(" - ")
        .nth(1)
        .map(|upper| upper.replace(['₹', ','], ""))
        .and_then(|digits| {
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            digits[..end].parse().ok()
        })
        .unwrap_or(0)
}

pub struct SubmissionsReview<S: Storage> {
    store: S,
    inquiries: Vec<Inquiry>,
}

impl<S: Storage> SubmissionsReview<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            inquiries: Vec::new(),
        }
    }

    pub fn open(store: S) -> Result<Self, ReviewError> {
        let mut review = Self::new(store);
        review.load()?;
        Ok(review)
    }

    pub fn load(&mut self) -> Result<&[Inquiry], ReviewError> {
        self.inquiries = self.store.read(keys::INQUIRIES)?.unwrap_or_default();
        Ok(&self.inquiries)
    }

    pub fn inquiries(&self) -> &[Inquiry] {
        &self.inquiries
    }

    pub fn find(&self, id: &str) -> Option<&Inquiry> {
        self.inquiries.iter().find(|i| i.id == id)
    }

    /// Matching inquiries in stored order.
    pub fn filter(&self, filter: &SubmissionFilter) -> Vec<&Inquiry> {
        self.inquiries.iter().filter(|i| filter.matches(i)).collect()
    }

    pub fn update_status(&mut self, id: &str, status: InquiryStatus) -> Result<(), ReviewError> {
        let inquiry = self
            .inquiries
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ReviewError::NotFound(id.to_string()))?;
        inquiry.status = status;
        tracing::info!(id, status = %status, "inquiry status changed");

        self.store.write(keys::INQUIRIES, &self.inquiries)?;
        Ok(())
    }

    pub fn stats(&self) -> SubmissionStats {
        let mut stats = SubmissionStats {
            total: self.inquiries.len(),
            ..SubmissionStats::default()
        };

        for inquiry in &self.inquiries {
            match inquiry.status {
                InquiryStatus::Pending => stats.pending += 1,
                InquiryStatus::Reviewed => stats.reviewed += 1,
                InquiryStatus::Responded => stats.responded += 1,
                InquiryStatus::Rejected => stats.rejected += 1,
            }

            if inquiry.details.budget_type == BudgetType::Fixed {
                if let Some(range) = inquiry.details.budget_range {
                    stats.total_value += budget_upper_bound(range.label());
                }
            }
        }

        stats
    }
}
