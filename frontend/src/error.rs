//! Error types shared by the API client and the dashboard flows.

use crate::format::format_currency;

/// Failures talking to the expense API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed, or its body could not be decoded.
    #[error("Transport error: {0}")]
    Transport(#[from] gloo_net::Error),

    /// The server answered with a non-success status.
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The browser refused to build part of the request.
    #[error("Browser error: {0}")]
    Browser(String),
}

/// Input rejected before anything is sent.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Please enter a valid amount greater than zero.")]
    InvalidAmount,

    #[error("Please enter a valid budget amount.")]
    InvalidBudget,

    #[error(
        "Cannot add expense: Would exceed monthly budget by {}\n\nCurrent total: {}\nBudget: {}",
        dollars(.overage),
        dollars(.current_total),
        dollars(.budget)
    )]
    OverBudget {
        overage: f64,
        current_total: f64,
        budget: f64,
    },
}

fn dollars(amount: &f64) -> String {
    format_currency(*amount)
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
