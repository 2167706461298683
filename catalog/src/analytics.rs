//! Analytics — usage series and dashboard aggregates
//!
//! Series are seeded mock data. Time ranges are applied relative to the
//! latest data point so the seeded history stays meaningful.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{Category, ToolRecord};
use crate::query::{query, ToolQuery};
use crate::store::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsagePoint {
    pub date: NaiveDate,
    pub usage: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryUsage {
    pub category: Category,
    pub usage: u64,
    /// Percentage change against the previous period
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTool {
    pub name: String,
    pub category: Category,
    pub usage: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7days")]
    Last7Days,
    #[default]
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "90days")]
    Last90Days,
    #[serde(rename = "year")]
    LastYear,
    #[serde(rename = "all")]
    AllTime,
}

impl TimeRange {
    pub fn parse(value: &str) -> Option<TimeRange> {
        match value {
            "today" => Some(TimeRange::Today),
            "7days" => Some(TimeRange::Last7Days),
            "30days" => Some(TimeRange::Last30Days),
            "90days" => Some(TimeRange::Last90Days),
            "year" => Some(TimeRange::LastYear),
            "all" => Some(TimeRange::AllTime),
            _ => None,
        }
    }

    /// Number of days covered, `None` for all time
    fn days(&self) -> Option<i64> {
        match self {
            TimeRange::Today => Some(1),
            TimeRange::Last7Days => Some(7),
            TimeRange::Last30Days => Some(30),
            TimeRange::Last90Days => Some(90),
            TimeRange::LastYear => Some(365),
            TimeRange::AllTime => None,
        }
    }
}

/// Seeded analytics source
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsData {
    pub daily_usage: Vec<UsagePoint>,
    pub category_usage: Vec<CategoryUsage>,
    pub top_tools: Vec<TopTool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub daily_usage: Vec<UsagePoint>,
    pub total_usage: u64,
    pub percentage_change: f64,
    pub category_usage: Vec<CategoryUsage>,
    pub top_tools: Vec<TopTool>,
}

impl AnalyticsData {
    pub fn report(&self, range: TimeRange) -> AnalyticsReport {
        let series = filter_range(&self.daily_usage, range);
        AnalyticsReport {
            range,
            total_usage: series.iter().map(|p| p.usage).sum(),
            percentage_change: percentage_change(&series),
            daily_usage: series,
            category_usage: self.category_usage.clone(),
            top_tools: self.top_tools.clone(),
        }
    }
}

/// Points within `range` of the latest date, in their original order
pub fn filter_range(points: &[UsagePoint], range: TimeRange) -> Vec<UsagePoint> {
    let Some(days) = range.days() else {
        return points.to_vec();
    };
    let Some(latest) = points.iter().map(|p| p.date).max() else {
        return Vec::new();
    };
    let cutoff = latest - Duration::days(days - 1);
    points.iter().filter(|p| p.date >= cutoff).copied().collect()
}

/// Change from the first to the last point, in percent
pub fn percentage_change(points: &[UsagePoint]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 && first.usage > 0 => {
            (last.usage as f64 - first.usage as f64) / first.usage as f64 * 100.0
        }
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularTool {
    pub id: String,
    pub name: String,
    pub usage: u64,
}

/// Admin home figures computed from a catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_tools: usize,
    pub active_tools: usize,
    pub total_views: u64,
    pub total_usage: u64,
    pub popular_tools: Vec<PopularTool>,
    pub recent_tools: Vec<ToolRecord>,
    pub daily_usage: Vec<UsagePoint>,
}

pub fn dashboard_summary(
    catalog: &Catalog,
    analytics: &AnalyticsData,
    popular_count: usize,
    recent_count: usize,
) -> DashboardSummary {
    let recent = query(
        catalog.as_slice(),
        &ToolQuery::default().with_limit(recent_count),
    );

    DashboardSummary {
        total_tools: catalog.len(),
        active_tools: catalog.iter().filter(|t| t.is_active()).count(),
        total_views: catalog.iter().map(|t| t.views).sum(),
        total_usage: catalog.iter().map(|t| t.usage).sum(),
        popular_tools: most_used(catalog.iter(), popular_count)
            .into_iter()
            .map(|t| PopularTool {
                id: t.id.clone(),
                name: t.name.clone(),
                usage: t.usage,
            })
            .collect(),
        recent_tools: recent.items,
        daily_usage: analytics.daily_usage.clone(),
    }
}

/// Highest usage first; ties keep input order
pub fn most_used<'a, I>(tools: I, count: usize) -> Vec<&'a ToolRecord>
where
    I: IntoIterator<Item = &'a ToolRecord>,
{
    let mut ranked: Vec<&ToolRecord> = tools.into_iter().collect();
    ranked.sort_by(|a, b| b.usage.cmp(&a.usage));
    ranked.truncate(count);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ToolStatus;

    fn point(day: u32, usage: u64) -> UsagePoint {
        UsagePoint {
            date: NaiveDate::from_ymd_opt(2023, 5, day).unwrap(),
            usage,
        }
    }

    fn series() -> Vec<UsagePoint> {
        (1..=15).map(|d| point(d, 1000 + d as u64 * 100)).collect()
    }

    #[test]
    fn test_time_range_parse() {
        assert_eq!(TimeRange::parse("7days"), Some(TimeRange::Last7Days));
        assert_eq!(TimeRange::parse("all"), Some(TimeRange::AllTime));
        assert_eq!(TimeRange::parse("fortnight"), None);
        assert_eq!(TimeRange::default(), TimeRange::Last30Days);
    }

    #[test]
    fn test_filter_range_relative_to_latest() {
        let points = series();
        let week = filter_range(&points, TimeRange::Last7Days);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, NaiveDate::from_ymd_opt(2023, 5, 9).unwrap());

        let today = filter_range(&points, TimeRange::Today);
        assert_eq!(today, vec![point(15, 2500)]);

        assert_eq!(filter_range(&points, TimeRange::Last30Days).len(), 15);
        assert_eq!(filter_range(&points, TimeRange::AllTime), points);
        assert!(filter_range(&[], TimeRange::Last7Days).is_empty());
    }

    #[test]
    fn test_percentage_change() {
        let change = percentage_change(&[point(1, 200), point(2, 300)]);
        assert!((change - 50.0).abs() < f64::EPSILON);

        let drop = percentage_change(&[point(1, 400), point(2, 100)]);
        assert!((drop + 75.0).abs() < f64::EPSILON);

        assert_eq!(percentage_change(&[point(1, 100)]), 0.0);
        assert_eq!(percentage_change(&[point(1, 0), point(2, 50)]), 0.0);
    }

    #[test]
    fn test_report_totals_follow_range() {
        let data = AnalyticsData {
            daily_usage: series(),
            ..Default::default()
        };
        let report = data.report(TimeRange::Last7Days);
        let expected: u64 = (9..=15).map(|d| 1000 + d * 100).sum();
        assert_eq!(report.total_usage, expected);
        assert_eq!(report.daily_usage.len(), 7);
    }

    #[test]
    fn test_dashboard_summary() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 10).unwrap();
        let mut a = ToolRecord::new("a", "A", "", Category::Writing, ToolStatus::Active, date);
        a.views = 10;
        a.usage = 5;
        let mut b = ToolRecord::new("b", "B", "", Category::Design, ToolStatus::Inactive, date);
        b.views = 20;
        b.usage = 50;
        let mut c = ToolRecord::new("c", "C", "", Category::Finance, ToolStatus::Active, date);
        c.usage = 5;
        let catalog = Catalog::load(vec![a, b, c]).unwrap();

        let summary = dashboard_summary(&catalog, &AnalyticsData::default(), 2, 2);
        assert_eq!(summary.total_tools, 3);
        assert_eq!(summary.active_tools, 2);
        assert_eq!(summary.total_views, 30);
        assert_eq!(summary.total_usage, 60);
        let popular: Vec<_> = summary.popular_tools.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(popular, vec!["b", "a"]);
        let recent: Vec<_> = summary.recent_tools.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(recent, vec!["a", "b"]);
    }

    #[test]
    fn test_most_used_keeps_input_order_on_ties() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 10).unwrap();
        let tools: Vec<ToolRecord> = [("x", 7), ("y", 9), ("z", 7), ("w", 1)]
            .into_iter()
            .map(|(id, usage)| {
                let mut t = ToolRecord::new(id, id, "", Category::Writing, ToolStatus::Active, date);
                t.usage = usage;
                t
            })
            .collect();

        let ids: Vec<_> = most_used(&tools, 3).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "x", "z"]);
        assert_eq!(most_used(&tools, 10).len(), 4);
        assert!(most_used(&tools[..0], 3).is_empty());
    }
}
