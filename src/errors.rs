//! # Error Types Module
//!
//! This module defines the error types used across the household planner:
//! failures of the AI collaborator, per-item restock failures, and
//! operation-level failures reported by the household state machine.

/// Failures talking to the AI collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum AiError {
    /// The call did not finish within its time budget
    Timeout(String),
    /// The service answered with a non-success status
    Http { status: u16, body: String },
    /// Transport level failure (DNS, connection reset, ...)
    Network(String),
    /// The service answered but the text was empty
    EmptyResponse,
    /// The response envelope did not have the expected shape
    UnexpectedResponse(String),
    /// No decodable JSON could be extracted from the response text
    MalformedJson(String),
    /// An extracted recipe is missing required fields
    IncompleteRecipe(Vec<String>),
    /// The request itself cannot be sent (e.g. no images supplied)
    InvalidRequest(String),
    /// Too many consecutive failures, calls are short-circuited
    CircuitOpen,
    /// Provider configuration is missing or unusable
    NotConfigured(String),
}

impl AiError {
    /// Whether a retry of the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            AiError::Network(_) | AiError::Timeout(_) => true,
            AiError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiError::Timeout(msg) => write!(f, "Timeout error: {msg}"),
            AiError::Http { status, body } => write!(f, "HTTP error {status}: {body}"),
            AiError::Network(msg) => write!(f, "Network error: {msg}"),
            AiError::EmptyResponse => write!(f, "Empty response from AI service"),
            AiError::UnexpectedResponse(msg) => write!(f, "Unexpected response: {msg}"),
            AiError::MalformedJson(msg) => write!(f, "Malformed JSON: {msg}"),
            AiError::IncompleteRecipe(fields) => {
                write!(f, "Recipe is missing fields: {}", fields.join(", "))
            }
            AiError::InvalidRequest(msg) => write!(f, "Invalid request: {msg}"),
            AiError::CircuitOpen => write!(f, "AI service temporarily unavailable (circuit open)"),
            AiError::NotConfigured(msg) => write!(f, "AI provider not configured: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiError::Timeout(err.to_string())
        } else {
            AiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AiError {
    fn from(err: serde_json::Error) -> Self {
        AiError::MalformedJson(err.to_string())
    }
}

/// A single purchased item that could not be folded back into inventory
///
/// These are collected per item during a restock; the rest of the batch
/// still gets applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconciliationError {
    /// Purchased unit cannot be converted into the matched inventory item's unit
    ConversionFailed {
        name: String,
        from: String,
        to: String,
    },
    /// The recorded shortfall quantity of the item is not a parseable quantity
    ShortfallUnparsable { name: String },
    /// Purchased unit cannot be converted into the shortfall's unit
    SurplusConversionFailed {
        name: String,
        from: String,
        to: String,
    },
}

impl std::fmt::Display for ReconciliationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconciliationError::ConversionFailed { name, from, to } => {
                write!(f, "Cannot convert {name} from '{from}' to inventory unit '{to}'")
            }
            ReconciliationError::ShortfallUnparsable { name } => {
                write!(f, "Shortfall quantity of {name} is not parseable")
            }
            ReconciliationError::SurplusConversionFailed { name, from, to } => {
                write!(f, "Cannot convert purchased {name} from '{from}' to shortfall unit '{to}'")
            }
        }
    }
}

impl std::error::Error for ReconciliationError {}

/// Operation-level failures of the household state
#[derive(Debug, Clone, PartialEq)]
pub enum HouseholdError {
    /// No meal plan week at this index
    WeekOutOfRange(usize),
    /// Plan generation requested but every weekday already has entries
    PlanFull,
    /// The only remaining week cannot be deleted
    LastWeek,
    /// No week with this id
    WeekNotFound(String),
    RecipeNotFound(String),
    InventoryItemNotFound(String),
    /// No shopping-list item at this index
    ShoppingItemNotFound(usize),
    /// Stock quantities must be finite and not negative
    InvalidQuantity(f64),
    /// The AI collaborator failed; nothing was committed
    Ai(AiError),
}

impl std::fmt::Display for HouseholdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HouseholdError::WeekOutOfRange(index) => write!(f, "No meal plan week at index {index}"),
            HouseholdError::PlanFull => write!(f, "Every day of the week already has a plan"),
            HouseholdError::LastWeek => write!(f, "Cannot delete the last remaining week"),
            HouseholdError::WeekNotFound(id) => write!(f, "Week not found: {id}"),
            HouseholdError::RecipeNotFound(id) => write!(f, "Recipe not found: {id}"),
            HouseholdError::InventoryItemNotFound(id) => write!(f, "Inventory item not found: {id}"),
            HouseholdError::ShoppingItemNotFound(index) => {
                write!(f, "No shopping list item at index {index}")
            }
            HouseholdError::InvalidQuantity(quantity) => write!(f, "Invalid stock quantity: {quantity}"),
            HouseholdError::Ai(err) => write!(f, "AI collaborator failed: {err}"),
        }
    }
}

impl std::error::Error for HouseholdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HouseholdError::Ai(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AiError> for HouseholdError {
    fn from(err: AiError) -> Self {
        HouseholdError::Ai(err)
    }
}
