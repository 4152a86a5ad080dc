//! Mock traffic dashboard.
//!
//! A month of daily rows is generated once, stored, and then left alone.

use chrono::{Duration, Local, NaiveDate};
use rand::Rng;

use crate::error::StoreError;
use crate::models::{DailyMetric, Project};
use crate::store::{Storage, StorageExt, keys};

pub const HISTORY_DAYS: i64 = 31;
/// Average package price used to turn purchase counts into revenue.
pub const AVERAGE_PURCHASE_PRICE: u64 = 8999;

pub fn day_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// `HISTORY_DAYS` rows, oldest first, ending on `today`.
pub fn generate_daily_metrics<R: Rng>(today: NaiveDate, rng: &mut R) -> Vec<DailyMetric> {
    (0..HISTORY_DAYS)
        .rev()
        .map(|days_ago| DailyMetric {
            date: day_label(today - Duration::days(days_ago)),
            views: rng.gen_range(10..60),
            github_views: rng.gen_range(5..35),
            purchases: rng.gen_range(0..3),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticsSummary {
    pub total_views: u64,
    pub total_github_views: u64,
    pub total_purchases: u64,
    pub total_revenue: u64,
    pub views_today: u64,
    pub views_growth: f64,
}

pub struct AnalyticsDashboard<S: Storage> {
    store: S,
    metrics: Vec<DailyMetric>,
}

impl<S: Storage> AnalyticsDashboard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            metrics: Vec::new(),
        }
    }

    pub fn open(store: S) -> Result<Self, StoreError> {
        let mut dashboard = Self::new(store);
        dashboard.load_or_generate()?;
        Ok(dashboard)
    }

    pub fn load_or_generate(&mut self) -> Result<&[DailyMetric], StoreError> {
        self.metrics = match self.store.read::<Vec<DailyMetric>>(keys::ANALYTICS)? {
            Some(metrics) => metrics,
            None => {
                let today = Local::now().date_naive();
                let metrics = generate_daily_metrics(today, &mut rand::thread_rng());
                self.store.write(keys::ANALYTICS, &metrics)?;
                tracing::info!(days = metrics.len(), "generated analytics history");
                metrics
            }
        };
        Ok(&self.metrics)
    }

    pub fn metrics(&self) -> &[DailyMetric] {
        &self.metrics
    }

    /// Totals across the stored history; views come from the projects.
    pub fn summary(&self, projects: &[Project]) -> AnalyticsSummary {
        let total_purchases: u64 = self.metrics.iter().map(|m| m.purchases).sum();
        let views_today = self.metrics.last().map(|m| m.views).unwrap_or(0);
        let yesterday = match self.metrics.len() {
            n if n >= 2 => self.metrics[n - 2].views,
            _ => 0,
        };
        let baseline = if yesterday == 0 { 1 } else { yesterday };

        AnalyticsSummary {
            total_views: projects.iter().map(|p| p.views).sum(),
            total_github_views: self.metrics.iter().map(|m| m.github_views).sum(),
            total_purchases,
            total_revenue: total_purchases * AVERAGE_PURCHASE_PRICE,
            views_today,
            views_growth: (views_today as f64 - baseline as f64) / baseline as f64 * 100.0,
        }
    }
}

/// The `limit` most viewed projects, most viewed first.
pub fn top_projects(projects: &[Project], limit: usize) -> Vec<&Project> {
    let mut ranked: Vec<&Project> = projects.iter().collect();
    ranked.sort_by(|a, b| b.views.cmp(&a.views));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::store::MemoryStore;

    fn metric(views: u64, github_views: u64, purchases: u64) -> DailyMetric {
        DailyMetric {
            date: "Jan 1".to_string(),
            views,
            github_views,
            purchases,
        }
    }

    fn project(id: &str, views: u64) -> Project {
        Project {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            long_description: String::new(),
            image: String::new(),
            additional_images: Vec::new(),
            technologies: Vec::new(),
            github_url: String::new(),
            live_url: String::new(),
            views,
        }
    }

    #[test]
    fn generated_history_covers_a_month_in_range() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let rows = generate_daily_metrics(today, &mut StdRng::seed_from_u64(7));

        assert_eq!(rows.len(), 31);
        assert_eq!(rows[0].date, "Mar 1");
        assert_eq!(rows[30].date, "Mar 31");
        for row in &rows {
            assert!((10..60).contains(&row.views));
            assert!((5..35).contains(&row.github_views));
            assert!(row.purchases < 3);
        }
    }

    #[test]
    fn history_is_generated_only_once() {
        let store = MemoryStore::new();
        let first = AnalyticsDashboard::open(&store).unwrap().metrics().to_vec();
        let second = AnalyticsDashboard::open(&store).unwrap().metrics().to_vec();

        assert_eq!(first, second);
    }

    #[test]
    fn summary_computes_revenue_and_growth() {
        let store = MemoryStore::new();
        store
            .write(keys::ANALYTICS, &vec![metric(20, 5, 1), metric(40, 10, 2), metric(50, 1, 0)])
            .unwrap();
        let dashboard = AnalyticsDashboard::open(&store).unwrap();

        let summary = dashboard.summary(&[project("a", 3), project("b", 4)]);

        assert_eq!(summary.total_views, 7);
        assert_eq!(summary.total_github_views, 16);
        assert_eq!(summary.total_purchases, 3);
        assert_eq!(summary.total_revenue, 3 * 8999);
        assert_eq!(summary.views_today, 50);
        assert!((summary.views_growth - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn top_projects_sorts_by_views() {
        let projects = vec![project("a", 1), project("b", 9), project("c", 5)];
        let ids: Vec<&str> = top_projects(&projects, 2).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
