use chrono::NaiveDateTime;

use crate::models::BudgetSummary;

/// `$N.NN` with no thousands separators. A negative amount puts the sign
/// ahead of the dollar mark (`-$3.50`, never `$-3.50`), which is how an
/// overspent remaining budget shows up.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${:.2}", sign, amount.abs())
}

pub fn format_date(date: &NaiveDateTime) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Display strings for the three summary cards.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryLabels {
    pub total_spent: String,
    pub monthly_budget: String,
    pub remaining_budget: String,
}

impl SummaryLabels {
    pub fn from_summary(summary: Option<&BudgetSummary>) -> Self {
        let Some(summary) = summary else {
            return Self {
                total_spent: format_currency(0.0),
                monthly_budget: "Not set".to_string(),
                remaining_budget: "N/A".to_string(),
            };
        };

        let monthly_budget = match summary.budget_limit() {
            Some(budget) => format_currency(budget),
            None => "Not set".to_string(),
        };
        // A remaining budget of exactly zero is a real value and reads `$0.00`.
        let remaining_budget = match summary.remaining_budget {
            Some(remaining) => format_currency(remaining),
            None => "N/A".to_string(),
        };

        Self {
            total_spent: format_currency(summary.total_spent),
            monthly_budget,
            remaining_budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn currency_uses_two_decimals() {
        assert_eq!(format_currency(5.0), "$5.00");
        assert_eq!(format_currency(1234.5), "$1234.50");
        assert_eq!(format_currency(-3.5), "-$3.50");
    }

    #[test]
    fn date_is_month_day_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        assert_eq!(format_date(&date), "3/7/2024");
    }

    #[test]
    fn labels_without_budget() {
        let summary = BudgetSummary {
            total_spent: 42.0,
            monthly_budget: None,
            remaining_budget: None,
        };
        let labels = SummaryLabels::from_summary(Some(&summary));
        assert_eq!(labels.total_spent, "$42.00");
        assert_eq!(labels.monthly_budget, "Not set");
        assert_eq!(labels.remaining_budget, "N/A");
    }

    #[test]
    fn zero_budget_reads_as_not_set() {
        let summary = BudgetSummary {
            total_spent: 10.0,
            monthly_budget: Some(0.0),
            remaining_budget: None,
        };
        let labels = SummaryLabels::from_summary(Some(&summary));
        assert_eq!(labels.monthly_budget, "Not set");
    }

    #[test]
    fn labels_with_budget_and_nothing_left() {
        let summary = BudgetSummary {
            total_spent: 100.0,
            monthly_budget: Some(100.0),
            remaining_budget: Some(0.0),
        };
        let labels = SummaryLabels::from_summary(Some(&summary));
        assert_eq!(labels.monthly_budget, "$100.00");
        assert_eq!(labels.remaining_budget, "$0.00");
    }

    #[test]
    fn labels_before_first_load() {
        let labels = SummaryLabels::from_summary(None);
        assert_eq!(labels.total_spent, "$0.00");
        assert_eq!(labels.monthly_budget, "Not set");
    }

    #[test]
    fn overspent_remaining_leads_with_the_sign() {
        let summary = BudgetSummary {
            total_spent: 103.5,
            monthly_budget: Some(100.0),
            remaining_budget: Some(-3.5),
        };
        let labels = SummaryLabels::from_summary(Some(&summary));
        assert_eq!(labels.total_spent, "$103.50");
        assert_eq!(labels.remaining_budget, "-$3.50");
    }
}
