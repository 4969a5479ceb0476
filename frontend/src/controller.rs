//! The dashboard's user flows, kept apart from the components that trigger
//! them.

use tracing::{error, info, warn};
use yew::Callback;

use crate::api::ExpenseApi;
use crate::budget::{check_budget, parse_amount, parse_budget};
use crate::error::{ApiError, AppError, ValidationError};
use crate::models::{LoginResponse, NewExpense, SignupRequest};
use crate::state::DashboardAction;
use crate::tasks::{spawn_keyed, SharedTasks, TaskPurpose};

/// Fetches expenses and the summary side by side and hands both over once
/// both have answered. Nothing is handed over if the session ended while
/// the requests were out.
pub async fn refresh_dashboard<A: ExpenseApi>(api: &A, dispatch: &Callback<DashboardAction>) {
    let (expenses, summary) = futures::join!(api.fetch_expenses(), api.fetch_summary());
    if !api.session().has_session() {
        info!("dashboard refresh dropped, session ended");
        return;
    }
    match expenses {
        Ok(expenses) => {
            info!("loaded {} expenses", expenses.len());
            dispatch.emit(DashboardAction::ExpensesLoaded(expenses));
        }
        Err(err) => error!("load expenses error: {}", err),
    }
    match summary {
        Ok(summary) => dispatch.emit(DashboardAction::SummaryLoaded(summary)),
        Err(err) => error!("load summary error: {}", err),
    }
}

/// Runs [`refresh_dashboard`] in the background, superseding a dashboard
/// load still in flight.
pub fn load_dashboard<A>(api: &A, tasks: &SharedTasks, dispatch: Callback<DashboardAction>)
where
    A: ExpenseApi + Clone + 'static,
{
    let api = api.clone();
    spawn_keyed(tasks, TaskPurpose::DashboardLoad, async move {
        refresh_dashboard(&api, &dispatch).await;
    });
}

pub fn load_summary<A>(api: &A, tasks: &SharedTasks, dispatch: Callback<DashboardAction>)
where
    A: ExpenseApi + Clone + 'static,
{
    let api = api.clone();
    spawn_keyed(tasks, TaskPurpose::SummaryLoad, async move {
        match api.fetch_summary().await {
            Ok(summary) => dispatch.emit(DashboardAction::SummaryLoaded(summary)),
            Err(err) => error!("load summary error: {}", err),
        }
    });
}

/// Refreshes the stored display name from `/users/me`. Failures leave the
/// current name in place.
pub fn load_user_info<A>(api: &A, tasks: &SharedTasks, dispatch: Callback<DashboardAction>)
where
    A: ExpenseApi + Clone + 'static,
{
    let api = api.clone();
    spawn_keyed(tasks, TaskPurpose::UserInfo, async move {
        match api.fetch_current_user().await {
            Ok(user) => {
                api.session().set_display_name(&user.username);
                dispatch.emit(DashboardAction::DisplayNameChanged(user.username));
            }
            Err(err) => error!("load user info error: {}", err),
        }
    });
}

pub async fn login<A: ExpenseApi>(
    api: &A,
    email: &str,
    password: &str,
) -> Result<LoginResponse, AppError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields.into());
    }
    let login = api.login(email, password).await?;
    api.session().set_session(&login.access_token, &login.username);
    info!("logged in as {}", login.username);
    Ok(login)
}

pub fn login_failure_message(err: &AppError) -> String {
    match err {
        AppError::Validation(err) => err.to_string(),
        AppError::Api(ApiError::Status { .. }) => {
            "Login failed. Please check your credentials.".to_string()
        }
        AppError::Api(_) => "An error occurred during login.".to_string(),
    }
}

pub async fn signup<A: ExpenseApi>(api: &A, request: SignupRequest) -> Result<(), AppError> {
    if request.email.trim().is_empty()
        || request.username.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(ValidationError::MissingFields.into());
    }
    api.signup(&request).await?;
    info!("signed up {}", request.username);
    Ok(())
}

pub fn signup_failure_message(err: &AppError) -> String {
    match err {
        AppError::Validation(err) => err.to_string(),
        AppError::Api(ApiError::Status { body, .. }) => format!("Signup failed: {}", body),
        AppError::Api(_) => "An error occurred during signup.".to_string(),
    }
}

/// Stops every background load and forgets the session. The caller resets
/// the view.
pub fn logout<A: ExpenseApi>(api: &A, tasks: &SharedTasks) {
    tasks.borrow_mut().cancel_all();
    api.session().clear_session();
    info!("logged out");
}

/// Validates the amount, runs the budget guard against a fresh summary and
/// posts the expense.
///
/// A summary the server refuses to hand out skips the guard; a summary
/// request that never completes aborts the add.
pub async fn add_expense<A: ExpenseApi>(
    api: &A,
    amount: &str,
    description: &str,
    category: &str,
) -> Result<(), AppError> {
    let amount = parse_amount(amount)?;

    match api.fetch_summary().await {
        Ok(summary) => check_budget(&summary, amount)?,
        Err(err @ ApiError::Status { .. }) => warn!("budget check skipped: {}", err),
        Err(err) => return Err(err.into()),
    }

    api.add_expense(&NewExpense {
        amount,
        description: description.trim().to_string(),
        category: category.trim().to_string(),
    })
    .await?;
    Ok(())
}

/// Adds the expense and, once the server has it, reloads the dashboard.
///
/// Resolves to `Ok(false)` when the user logged out before the flow
/// finished; the caller then reports nothing.
pub async fn add_expense_and_refresh<A: ExpenseApi>(
    api: &A,
    dispatch: &Callback<DashboardAction>,
    amount: &str,
    description: &str,
    category: &str,
) -> Result<bool, AppError> {
    add_expense(api, amount, description, category).await?;
    if !api.session().has_session() {
        info!("expense added after logout, dashboard left alone");
        return Ok(false);
    }
    refresh_dashboard(api, dispatch).await;
    Ok(api.session().has_session())
}

pub fn add_expense_failure_message(err: &AppError) -> String {
    match err {
        AppError::Validation(err) => err.to_string(),
        AppError::Api(_) => "Error adding expense. Please try again.".to_string(),
    }
}

/// Resolves to `Ok(false)` when the user logged out while the update was
/// out.
pub async fn update_budget<A: ExpenseApi>(api: &A, budget: &str) -> Result<bool, AppError> {
    let budget = parse_budget(budget)?;
    api.update_budget(budget).await?;
    info!("monthly budget set to {}", budget);
    Ok(api.session().has_session())
}

pub fn update_budget_failure_message(err: &AppError) -> String {
    match err {
        AppError::Validation(err) => err.to_string(),
        AppError::Api(ApiError::Status { body, .. }) => {
            format!("Failed to update budget: {}", body)
        }
        AppError::Api(_) => "An error occurred while updating budget.".to_string(),
    }
}
