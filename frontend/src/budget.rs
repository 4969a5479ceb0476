//! Client-side checks that run before an expense or budget is submitted.
//!
//! The guard reads a summary fetched just before the add, so two tabs adding
//! at once can both pass it. The server is the only real enforcement.

use crate::error::ValidationError;
use crate::models::BudgetSummary;

pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ValidationError::InvalidAmount),
    }
}

/// A budget of zero is allowed and switches the guard off.
pub fn parse_budget(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(budget) if budget.is_finite() && budget >= 0.0 => Ok(budget),
        _ => Err(ValidationError::InvalidBudget),
    }
}

pub fn check_budget(summary: &BudgetSummary, amount: f64) -> Result<(), ValidationError> {
    let Some(budget) = summary.budget_limit() else {
        return Ok(());
    };

    let new_total = summary.total_spent + amount;
    if new_total > budget {
        return Err(ValidationError::OverBudget {
            overage: new_total - budget,
            current_total: summary.total_spent,
            budget,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total_spent: f64, monthly_budget: Option<f64>) -> BudgetSummary {
        BudgetSummary {
            total_spent,
            monthly_budget,
            remaining_budget: monthly_budget.map(|b| b - total_spent),
        }
    }

    #[test]
    fn within_budget_is_allowed() {
        assert_eq!(check_budget(&summary(90.0, Some(100.0)), 5.0), Ok(()));
    }

    #[test]
    fn landing_exactly_on_budget_is_allowed() {
        assert_eq!(check_budget(&summary(90.0, Some(100.0)), 10.0), Ok(()));
    }

    #[test]
    fn over_budget_reports_overage() {
        let err = check_budget(&summary(90.0, Some(100.0)), 15.0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OverBudget {
                overage: 5.0,
                current_total: 90.0,
                budget: 100.0,
            }
        );
        assert!(err.to_string().contains("by $5.00"));
    }

    #[test]
    fn zero_budget_disables_guard() {
        assert_eq!(check_budget(&summary(90.0, Some(0.0)), 1_000_000.0), Ok(()));
    }

    #[test]
    fn unset_budget_disables_guard() {
        assert_eq!(check_budget(&summary(500.0, None), 1.0), Ok(()));
    }

    #[test]
    fn amount_must_be_positive_number() {
        assert_eq!(parse_amount(" 12.50 "), Ok(12.5));
        assert_eq!(parse_amount("0"), Err(ValidationError::InvalidAmount));
        assert_eq!(parse_amount("-3"), Err(ValidationError::InvalidAmount));
        assert_eq!(parse_amount("abc"), Err(ValidationError::InvalidAmount));
        assert_eq!(parse_amount(""), Err(ValidationError::InvalidAmount));
        assert_eq!(parse_amount("NaN"), Err(ValidationError::InvalidAmount));
    }

    #[test]
    fn budget_accepts_zero_but_not_negative() {
        assert_eq!(parse_budget("0"), Ok(0.0));
        assert_eq!(parse_budget("250"), Ok(250.0));
        assert_eq!(parse_budget("-1"), Err(ValidationError::InvalidBudget));
        assert_eq!(parse_budget("inf"), Err(ValidationError::InvalidBudget));
    }
}
