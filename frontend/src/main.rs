mod api;
mod budget;
mod config;
mod controller;
mod error;
mod format;
mod logging;
mod models;
mod notify;
mod pagination;
mod session;
mod state;
mod tasks;

use tracing::error;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, InputEvent};
use yew::prelude::*;

use crate::api::{ApiClient, ExpenseApi};
use crate::config::Config;
use crate::format::{format_currency, format_date, SummaryLabels};
use crate::models::{LoginResponse, SignupRequest};
use crate::notify::alert;
use crate::pagination::row_key;
use crate::state::{DashboardAction, DashboardState, Panel};
use crate::tasks::TaskRegistry;

#[derive(Clone, Copy, PartialEq)]
enum StatIcon {
    CreditCard,
    Wallet,
    Target,
}

fn bind_input(handle: &UseStateHandle<String>) -> Callback<InputEvent> {
    let handle = handle.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        handle.set(input.value());
    })
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: Config,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let api = use_state(|| ApiClient::new(&props.config.api_base_url));
    let panel = use_state(|| Panel::initial(api.session().has_session()));
    let dashboard = use_reducer(|| DashboardState::new(api.session().current_display_name()));
    let tasks = use_mut_ref(TaskRegistry::default);

    let dispatch = {
        let dashboard = dashboard.clone();
        Callback::from(move |action: DashboardAction| dashboard.dispatch(action))
    };

    // resume a persisted session
    {
        let api = (*api).clone();
        let tasks = tasks.clone();
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |_| {
                if api.session().has_session() {
                    controller::load_dashboard(&api, &tasks, dispatch.clone());
                    controller::load_user_info(&api, &tasks, dispatch);
                }
                || ()
            },
            (),
        );
    }

    let show_login = {
        let panel = panel.clone();
        Callback::from(move |_: ()| panel.set(Panel::Login))
    };

    let show_signup = {
        let panel = panel.clone();
        Callback::from(move |_: ()| panel.set(Panel::Signup))
    };

    let on_logged_in = {
        let api = (*api).clone();
        let tasks = tasks.clone();
        let dispatch = dispatch.clone();
        let panel = panel.clone();
        Callback::from(move |login: LoginResponse| {
            panel.set(Panel::Dashboard);
            dispatch.emit(DashboardAction::DisplayNameChanged(login.username));
            controller::load_dashboard(&api, &tasks, dispatch.clone());
            controller::load_user_info(&api, &tasks, dispatch.clone());
        })
    };

    let on_logout = {
        let api = (*api).clone();
        let tasks = tasks.clone();
        let dispatch = dispatch.clone();
        let panel = panel.clone();
        Callback::from(move |_: ()| {
            controller::logout(&api, &tasks);
            dispatch.emit(DashboardAction::Reset);
            panel.set(Panel::Login);
        })
    };

    let on_refresh_summary = {
        let api = (*api).clone();
        let tasks = tasks.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |_: ()| controller::load_summary(&api, &tasks, dispatch.clone()))
    };

    let on_change_page = {
        let dispatch = dispatch.clone();
        Callback::from(move |delta: isize| dispatch.emit(DashboardAction::ChangePage(delta)))
    };

    match *panel {
        Panel::Login => html! {
            <LoginPanel api={(*api).clone()} on_logged_in={on_logged_in} on_show_signup={show_signup} />
        },
        Panel::Signup => html! {
            <SignupPanel api={(*api).clone()} on_signed_up={show_login.clone()} on_show_login={show_login} />
        },
        Panel::Dashboard => html! {
            <div class="min-h-screen flex flex-col bg-background">
                <Header display_name={dashboard.display_name.clone()} on_logout={on_logout} />
                <main class="flex-1 overflow-y-auto">
                    <DashboardPanel
                        api={(*api).clone()}
                        state={dashboard.clone()}
                        on_change_page={on_change_page}
                        dispatch={dispatch}
                        on_budget_updated={on_refresh_summary}
                    />
                </main>
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    display_name: String,
    on_logout: Callback<()>,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };

    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <div class="flex items-center gap-3">
                <div class="w-10 h-10 bg-[#173E63] rounded-full flex items-center justify-center text-white">
                    { icon_wallet() }
                </div>
                <span class="text-[#173E63] text-2xl font-black tracking-tight">{"Expense Tracker"}</span>
            </div>
            <div class="flex items-center gap-4">
                <span class="text-sm text-[#173E63]">
                    {"Welcome, "}<span class="font-bold">{ props.display_name.clone() }</span>
                </span>
                <button onclick={on_logout} class="flex items-center gap-2 px-4 py-2 rounded-xl hover:bg-white/40 transition-colors text-[13px] font-medium text-[#173E63]">
                    { icon_log_out() }
                    <span>{"Log Out"}</span>
                </button>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct LoginPanelProps {
    api: ApiClient,
    on_logged_in: Callback<LoginResponse>,
    on_show_signup: Callback<()>,
}

#[function_component(LoginPanel)]
fn login_panel(props: &LoginPanelProps) -> Html {
    let email = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let loading = use_state(|| false);

    let on_submit = {
        let api = props.api.clone();
        let email = email.clone();
        let password = password.clone();
        let loading = loading.clone();
        let on_logged_in = props.on_logged_in.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let email_val = (*email).clone();
            let password_val = (*password).clone();
            let loading = loading.clone();
            let on_logged_in = on_logged_in.clone();

            loading.set(true);
            spawn_local(async move {
                match controller::login(&api, &email_val, &password_val).await {
                    Ok(login) => on_logged_in.emit(login),
                    Err(err) => {
                        error!("login error: {}", err);
                        alert(&controller::login_failure_message(&err));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_show_signup = {
        let on_show_signup = props.on_show_signup.clone();
        Callback::from(move |_| on_show_signup.emit(()))
    };

    auth_card(
        "Welcome back",
        "Sign in to track your spending.",
        html! {
            <form class="space-y-4" onsubmit={on_submit}>
                { text_field("Email", "email", &email) }
                { text_field("Password", "password", &password) }
                <button
                    type="submit"
                    class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                    disabled={*loading}
                >
                    { if *loading { "Please wait..." } else { "Login" } }
                </button>
            </form>
        },
        html! {
            <>
                {"No account?"}
                <button class="ml-2 text-primary font-semibold" onclick={on_show_signup}>{"Sign up"}</button>
            </>
        },
    )
}

#[derive(Properties, PartialEq)]
struct SignupPanelProps {
    api: ApiClient,
    on_signed_up: Callback<()>,
    on_show_login: Callback<()>,
}

#[function_component(SignupPanel)]
fn signup_panel(props: &SignupPanelProps) -> Html {
    let email = use_state(|| "".to_string());
    let username = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let loading = use_state(|| false);

    let on_submit = {
        let api = props.api.clone();
        let email = email.clone();
        let username = username.clone();
        let password = password.clone();
        let loading = loading.clone();
        let on_signed_up = props.on_signed_up.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let request = SignupRequest {
                email: (*email).clone(),
                username: (*username).clone(),
                password: (*password).clone(),
            };
            let loading = loading.clone();
            let on_signed_up = on_signed_up.clone();

            loading.set(true);
            spawn_local(async move {
                match controller::signup(&api, request).await {
                    Ok(()) => {
                        alert("Signup successful! Please login.");
                        on_signed_up.emit(());
                    }
                    Err(err) => {
                        error!("signup error: {}", err);
                        alert(&controller::signup_failure_message(&err));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_show_login = {
        let on_show_login = props.on_show_login.clone();
        Callback::from(move |_| on_show_login.emit(()))
    };

    auth_card(
        "Create account",
        "Start managing your expenses.",
        html! {
            <form class="space-y-4" onsubmit={on_submit}>
                { text_field("Email", "email", &email) }
                { text_field("Username", "text", &username) }
                { text_field("Password", "password", &password) }
                <button
                    type="submit"
                    class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                    disabled={*loading}
                >
                    { if *loading { "Please wait..." } else { "Sign up" } }
                </button>
            </form>
        },
        html! {
            <>
                {"Already have an account?"}
                <button class="ml-2 text-primary font-semibold" onclick={on_show_login}>{"Login"}</button>
            </>
        },
    )
}

fn auth_card(title: &'static str, subtitle: &'static str, form: Html, footer: Html) -> Html {
    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                    <p class="text-sm text-muted-foreground mt-2">{ subtitle }</p>
                </div>
                { form }
                <div class="mt-6 text-center text-sm text-muted-foreground">
                    { footer }
                </div>
            </div>
        </div>
    }
}

fn text_field(label: &'static str, kind: &'static str, handle: &UseStateHandle<String>) -> Html {
    html! {
        <div class="space-y-1">
            <label class="text-sm font-medium text-foreground">{ label }</label>
            <input
                type={kind}
                class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                value={(**handle).clone()}
                oninput={bind_input(handle)}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct DashboardPanelProps {
    api: ApiClient,
    state: UseReducerHandle<DashboardState>,
    on_change_page: Callback<isize>,
    dispatch: Callback<DashboardAction>,
    on_budget_updated: Callback<()>,
}

#[function_component(DashboardPanel)]
fn dashboard_panel(props: &DashboardPanelProps) -> Html {
    let form_amount = use_state(|| "".to_string());
    let form_description = use_state(|| "".to_string());
    let form_category = use_state(|| "".to_string());
    let form_budget = use_state(|| "".to_string());
    let saving = use_state(|| false);
    let saving_budget = use_state(|| false);

    let on_add = {
        let api = props.api.clone();
        let form_amount = form_amount.clone();
        let form_description = form_description.clone();
        let form_category = form_category.clone();
        let saving = saving.clone();
        let dispatch = props.dispatch.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let form_amount = form_amount.clone();
            let form_description = form_description.clone();
            let form_category = form_category.clone();
            let saving = saving.clone();
            let dispatch = dispatch.clone();

            saving.set(true);
            spawn_local(async move {
                let result = controller::add_expense_and_refresh(
                    &api,
                    &dispatch,
                    &form_amount,
                    &form_description,
                    &form_category,
                )
                .await;
                match result {
                    Ok(true) => {
                        form_amount.set("".to_string());
                        form_description.set("".to_string());
                        form_category.set("".to_string());
                        alert("Expense added successfully!");
                    }
                    Ok(false) => {}
                    Err(err) => {
                        error!("add expense error: {}", err);
                        alert(&controller::add_expense_failure_message(&err));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_set_budget = {
        let api = props.api.clone();
        let form_budget = form_budget.clone();
        let saving_budget = saving_budget.clone();
        let on_budget_updated = props.on_budget_updated.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let form_budget = form_budget.clone();
            let saving_budget = saving_budget.clone();
            let on_budget_updated = on_budget_updated.clone();

            saving_budget.set(true);
            spawn_local(async move {
                match controller::update_budget(&api, &form_budget).await {
                    Ok(true) => {
                        alert("Budget updated successfully!");
                        on_budget_updated.emit(());
                        form_budget.set("".to_string());
                    }
                    Ok(false) => {}
                    Err(err) => {
                        error!("budget update error: {}", err);
                        alert(&controller::update_budget_failure_message(&err));
                    }
                }
                saving_budget.set(false);
            });
        })
    };

    let on_prev = {
        let on_change_page = props.on_change_page.clone();
        Callback::from(move |_| on_change_page.emit(-1))
    };
    let on_next = {
        let on_change_page = props.on_change_page.clone();
        Callback::from(move |_| on_change_page.emit(1))
    };

    let labels = SummaryLabels::from_summary(props.state.summary.as_ref());
    let view = props.state.page_view();

    page_shell(
        "Dashboard",
        html! {
            <>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                <StatCard title="Total Spent" value={labels.total_spent} icon={StatIcon::CreditCard} />
                <StatCard title="Monthly Budget" value={labels.monthly_budget} icon={StatIcon::Target} />
                <StatCard title="Remaining Budget" value={labels.remaining_budget} icon={StatIcon::Wallet} />
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                <form class="bg-card rounded-[10px] p-6 border border-border lg:col-span-2" onsubmit={on_add}>
                    <h3 class="font-bold text-foreground text-lg mb-3">{"Add Expense"}</h3>
                    <div class="grid grid-cols-1 md:grid-cols-4 gap-3">
                        <input type="number" step="0.01" placeholder="Amount ($)" value={(*form_amount).clone()} oninput={bind_input(&form_amount)} class="p-2 border rounded" />
                        <input placeholder="Description" value={(*form_description).clone()} oninput={bind_input(&form_description)} class="p-2 border rounded" />
                        <input placeholder="Category" value={(*form_category).clone()} oninput={bind_input(&form_category)} class="p-2 border rounded" />
                        <button type="submit" class="flex items-center justify-center gap-2 bg-primary text-primary-foreground px-4 rounded-xl font-bold text-sm hover:opacity-90 transition-all" disabled={*saving}>
                            { icon_plus() }
                            { if *saving { "Saving..." } else { "Add" } }
                        </button>
                    </div>
                </form>

                <form class="bg-card rounded-[10px] p-6 border border-border" onsubmit={on_set_budget}>
                    <h3 class="font-bold text-foreground text-lg mb-3">{"Monthly Budget"}</h3>
                    <div class="flex gap-2">
                        <input type="number" step="0.01" placeholder="Budget ($)" value={(*form_budget).clone()} oninput={bind_input(&form_budget)} class="p-2 border rounded flex-1" />
                        <button type="submit" class="bg-accent text-white px-4 rounded bg-[#1D617A]" disabled={*saving_budget}>
                            { if *saving_budget { "Saving..." } else { "Set" } }
                        </button>
                    </div>
                </form>
            </div>

            <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                <div class="p-6 flex justify-between items-center border-b border-border">
                    <h3 class="font-bold text-foreground text-lg">{"Expenses"}</h3>
                </div>
                <div class="overflow-x-auto">
                    <table class="w-full text-left border-collapse">
                        <thead>
                            <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                <th class="px-8 py-4 font-bold">{"Date"}</th>
                                <th class="px-8 py-4 font-bold">{"Description"}</th>
                                <th class="px-8 py-4 font-bold">{"Category"}</th>
                                <th class="px-8 py-4 font-bold text-right">{"Amount"}</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            if view.is_empty() {
                                <tr><td colspan="4" class="px-8 py-6 text-sm text-muted-foreground text-center">{"No expenses found"}</td></tr>
                            } else {
                                { for view.rows.iter().enumerate().map(|(index, expense)| html! {
                                    <tr key={row_key(index, expense)} class="text-sm hover:bg-muted/30 transition-colors">
                                        <td class="px-8 py-4 text-muted-foreground">{ format_date(&expense.date) }</td>
                                        <td class="px-8 py-4 text-foreground">{ &expense.description }</td>
                                        <td class="px-8 py-4">
                                            <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ &expense.category }</span>
                                        </td>
                                        <td class="px-8 py-4 text-right font-semibold text-foreground">{ format_currency(expense.amount) }</td>
                                    </tr>
                                }) }
                            }
                        </tbody>
                    </table>
                </div>
                <div class="p-4 flex items-center justify-between border-t border-border text-sm">
                    <button class="px-4 py-2 rounded-xl border border-border disabled:opacity-40" onclick={on_prev} disabled={!view.has_prev}>{"Previous"}</button>
                    <span class="text-muted-foreground">{ view.label() }</span>
                    <button class="px-4 py-2 rounded-xl border border-border disabled:opacity-40" onclick={on_next} disabled={!view.has_next}>{"Next"}</button>
                </div>
            </div>
            </>
        },
    )
}

fn page_shell(title: &'static str, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    title: &'static str,
    value: String,
    icon: StatIcon,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ props.title }</p>
                <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight">{ props.value.clone() }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::CreditCard => icon_credit_card(),
                        StatIcon::Wallet => icon_wallet(),
                        StatIcon::Target => icon_target(),
                    }
                }
            </div>
        </div>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
fn icon_target() -> Html {
    icon_base("M12 12m-9 0a9 9 0 1018 0 9 9 0 10-18 0")
}
fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}

fn main() {
    let config = match Config::from_build_env() {
        Ok(config) => {
            logging::init(config.log_level);
            config
        }
        Err(err) => {
            let config = Config::default();
            logging::init(config.log_level);
            error!("{}, using defaults", err);
            config
        }
    };

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
