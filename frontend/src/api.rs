//! HTTP client for the expense API.
//!
//! One request per call, no retries. Authenticated calls attach the stored
//! token as a bearer credential; nothing here refreshes an expired token.

use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use tracing::{error, warn};
use web_sys::UrlSearchParams;

use crate::error::ApiError;
use crate::models::{
    BudgetSummary, BudgetUpdate, CurrentUser, Expense, LoginResponse, NewExpense, SignupRequest,
};
use crate::session::{KeyValueStore, LocalStorage, Session};

/// The calls the dashboard makes against the server, plus the session
/// those calls authenticate with.
#[async_trait(?Send)]
pub trait ExpenseApi {
    type Store: KeyValueStore;

    fn session(&self) -> &Session<Self::Store>;

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;
    async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError>;
    async fn fetch_current_user(&self) -> Result<CurrentUser, ApiError>;
    async fn fetch_expenses(&self) -> Result<Vec<Expense>, ApiError>;
    async fn add_expense(&self, expense: &NewExpense) -> Result<(), ApiError>;
    async fn fetch_summary(&self) -> Result<BudgetSummary, ApiError>;
    async fn update_budget(&self, budget: f64) -> Result<(), ApiError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: Rc<str>,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: Rc::from(base_url),
            session: Session::new(LocalStorage),
        }
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }
}

#[async_trait(?Send)]
impl ExpenseApi for ApiClient {
    type Store = LocalStorage;

    fn session(&self) -> &Session {
        &self.session
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let form = UrlSearchParams::new().map_err(|e| ApiError::Browser(format!("{:?}", e)))?;
        form.append("username", email);
        form.append("password", password);

        let resp = Request::post(&self.url("/token"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(form)?
            .send()
            .await?;
        let resp = ensure_ok(resp, "login").await?;
        Ok(resp.json::<LoginResponse>().await?)
    }

    async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError> {
        let resp = Request::post(&self.url("/users/"))
            .json(request)?
            .send()
            .await?;
        ensure_ok(resp, "signup").await?;
        Ok(())
    }

    async fn fetch_current_user(&self) -> Result<CurrentUser, ApiError> {
        let resp = self
            .authorized(Request::get(&self.url("/users/me")))
            .send()
            .await?;
        let resp = ensure_ok(resp, "fetch current user").await?;
        Ok(resp.json::<CurrentUser>().await?)
    }

    async fn fetch_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        let resp = self
            .authorized(Request::get(&self.url("/expenses/")))
            .send()
            .await?;
        let resp = ensure_ok(resp, "load expenses").await?;
        Ok(resp.json::<Vec<Expense>>().await?)
    }

    /// Only a failed round trip is an error. A rejected add is logged and
    /// otherwise treated as accepted.
    async fn add_expense(&self, expense: &NewExpense) -> Result<(), ApiError> {
        let resp = self
            .authorized(Request::post(&self.url("/expenses/")))
            .json(expense)?
            .send()
            .await?;
        if !resp.ok() {
            let body = resp.text().await.unwrap_or_default();
            warn!("add expense answered {}: {}", resp.status(), body);
        }
        Ok(())
    }

    async fn fetch_summary(&self) -> Result<BudgetSummary, ApiError> {
        let resp = self
            .authorized(Request::get(&self.url("/expenses/summary")))
            .send()
            .await?;
        let resp = ensure_ok(resp, "load summary").await?;
        Ok(resp.json::<BudgetSummary>().await?)
    }

    async fn update_budget(&self, budget: f64) -> Result<(), ApiError> {
        let resp = self
            .authorized(Request::put(&self.url("/users/budget")))
            .json(&BudgetUpdate { budget })?
            .send()
            .await?;
        ensure_ok(resp, "update budget").await?;
        Ok(())
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url, path)
}

async fn ensure_ok(resp: Response, action: &str) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    error!("{} failed with status {}: {}", action, status, body);
    Err(ApiError::Status { status, body })
}

#[cfg(test)]
pub(crate) mod test_api {
    use std::cell::RefCell;

    use async_trait::async_trait;

    use super::ExpenseApi;
    use crate::error::ApiError;
    use crate::models::{
        BudgetSummary, CurrentUser, Expense, LoginResponse, NewExpense, SignupRequest,
    };
    use crate::session::test_store::MemoryStore;
    use crate::session::Session;

    #[derive(Clone, Debug)]
    pub enum SummaryReply {
        Answer(BudgetSummary),
        Rejected,
        Unreachable,
    }

    /// Answers from fixed data and records which calls were made, in order.
    #[derive(Debug)]
    pub struct RecordingApi {
        pub store: MemoryStore,
        pub summary: SummaryReply,
        pub expenses: Vec<Expense>,
        /// Clears the session inside the next write, as if the user logged
        /// out while it was in flight.
        pub logout_during_write: bool,
        session: Session<MemoryStore>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl RecordingApi {
        pub fn signed_in(summary: SummaryReply) -> Self {
            let store = MemoryStore::default();
            let session = Session::new(store.clone());
            session.set_session("token-1", "ana");
            Self {
                store,
                summary,
                expenses: Vec::new(),
                logout_during_write: false,
                session,
                calls: RefCell::default(),
            }
        }

        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.borrow_mut().push(call);
        }

        fn write(&self, call: &'static str) {
            self.record(call);
            if self.logout_during_write {
                self.session.clear_session();
            }
        }
    }

    #[async_trait(?Send)]
    impl ExpenseApi for RecordingApi {
        type Store = MemoryStore;

        fn session(&self) -> &Session<MemoryStore> {
            &self.session
        }

        async fn login(&self, email: &str, _password: &str) -> Result<LoginResponse, ApiError> {
            self.record("login");
            Ok(LoginResponse {
                access_token: "token-2".to_string(),
                username: email.to_string(),
            })
        }

        async fn signup(&self, _request: &SignupRequest) -> Result<(), ApiError> {
            self.record("signup");
            Ok(())
        }

        async fn fetch_current_user(&self) -> Result<CurrentUser, ApiError> {
            self.record("fetch_current_user");
            Ok(CurrentUser {
                username: "ana".to_string(),
            })
        }

        async fn fetch_expenses(&self) -> Result<Vec<Expense>, ApiError> {
            self.record("fetch_expenses");
            Ok(self.expenses.clone())
        }

        async fn add_expense(&self, _expense: &NewExpense) -> Result<(), ApiError> {
            self.write("add_expense");
            Ok(())
        }

        async fn fetch_summary(&self) -> Result<BudgetSummary, ApiError> {
            self.record("fetch_summary");
            match &self.summary {
                SummaryReply::Answer(summary) => Ok(summary.clone()),
                SummaryReply::Rejected => Err(ApiError::Status {
                    status: 401,
                    body: "Not authenticated".to_string(),
                }),
                SummaryReply::Unreachable => Err(ApiError::Transport(
                    gloo_net::Error::GlooError("failed to fetch".to_string()),
                )),
            }
        }

        async fn update_budget(&self, _budget: f64) -> Result<(), ApiError> {
            self.write("update_budget");
            Ok(())
        }
    }
}
