use std::rc::Rc;

use yew::Reducible;

use crate::models::{BudgetSummary, Expense};
use crate::pagination::{clamp_page, paginate, shift_page, PageView};
use crate::session::DEFAULT_DISPLAY_NAME;

/// The top-level panel on screen. Exactly one is visible at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Login,
    Signup,
    Dashboard,
}

impl Panel {
    pub fn initial(has_session: bool) -> Self {
        if has_session {
            Panel::Dashboard
        } else {
            Panel::Login
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    /// Newest first. Always a full replacement of the last fetch.
    pub expenses: Vec<Expense>,
    pub page: usize,
    pub summary: Option<BudgetSummary>,
    pub display_name: String,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_NAME.to_string())
    }
}

impl DashboardState {
    pub fn new(display_name: String) -> Self {
        Self {
            expenses: Vec::new(),
            page: 1,
            summary: None,
            display_name,
        }
    }

    pub fn page_view(&self) -> PageView<'_> {
        paginate(&self.expenses, self.page)
    }
}

pub enum DashboardAction {
    ExpensesLoaded(Vec<Expense>),
    SummaryLoaded(BudgetSummary),
    ChangePage(isize),
    DisplayNameChanged(String),
    Reset,
}

/// Stable sort, so records sharing a timestamp keep the server's order.
pub fn newest_first(mut expenses: Vec<Expense>) -> Vec<Expense> {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
    expenses
}

impl Reducible for DashboardState {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DashboardAction::ExpensesLoaded(expenses) => {
                next.expenses = newest_first(expenses);
                next.page = clamp_page(next.page, next.expenses.len());
            }
            DashboardAction::SummaryLoaded(summary) => next.summary = Some(summary),
            DashboardAction::ChangePage(delta) => {
                next.page = clamp_page(shift_page(next.page, delta), next.expenses.len());
            }
            DashboardAction::DisplayNameChanged(name) => next.display_name = name,
            DashboardAction::Reset => next = DashboardState::default(),
        }
        Rc::new(next)
    }
}
