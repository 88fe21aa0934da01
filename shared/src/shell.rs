//! Input/display shell for the conditions form
//!
//! Owns the form state and shows exactly one of four view states: idle,
//! loading, error or results. The network call itself belongs to the caller;
//! the shell hands out a [`Submission`] and is told the outcome afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ConditionsError, CropSuggestion, FarmConditions, FarmField};

pub const IDLE_MESSAGE: &str = "Your personalized crop suggestions will appear here.";
pub const LOADING_MESSAGE: &str = "Consulting with AI Agronomist...";
pub const ERROR_TITLE: &str = "An Error Occurred";
pub const ERROR_MESSAGE: &str =
    "Failed to get recommendations. The AI model might be busy. Please try again in a moment.";
pub const EMPTY_MESSAGE: &str = "No recommendations found for the given conditions.";

/// Milliseconds between the entrance animations of consecutive cards
pub const CARD_STAGGER_MS: u32 = 100;

/// Identifies one submission; completions for older tickets are ignored
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Ticket(pub u64);

/// A submission accepted by the shell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    pub ticket: Ticket,
    pub conditions: FarmConditions,
}

/// Reasons a shell operation is refused
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("A recommendation request is already in progress")]
    Busy,

    #[error(transparent)]
    Conditions(#[from] ConditionsError),
}

/// Coarse view state, without payload
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Error,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ViewState {
    Idle,
    Loading(Ticket),
    Error,
    Results(Vec<CropSuggestion>),
}

/// One rendered recommendation card
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionCard {
    pub index: usize,
    pub crop_name: String,
    pub reason: String,
    pub image_url: String,
    pub animation_delay_ms: u32,
}

impl SuggestionCard {
    fn new(index: usize, suggestion: &CropSuggestion) -> Self {
        Self {
            index,
            crop_name: suggestion.crop_name.clone(),
            reason: suggestion.reason.clone(),
            image_url: suggestion.image_url(),
            animation_delay_ms: (index as u32).saturating_mul(CARD_STAGGER_MS),
        }
    }
}

/// Render model of the results panel
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum View {
    Idle { message: String },
    Loading { message: String },
    Error { title: String, message: String },
    NoRecommendations { message: String },
    Results { cards: Vec<SuggestionCard> },
}

/// Form state plus the recommendation view state machine
#[derive(Debug, Clone)]
pub struct Shell {
    conditions: FarmConditions,
    state: ViewState,
    last_ticket: u64,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    /// Start idle with the default form values
    pub fn new() -> Self {
        Self::with_conditions(FarmConditions::default())
    }

    pub fn with_conditions(conditions: FarmConditions) -> Self {
        Self {
            conditions,
            state: ViewState::Idle,
            last_ticket: 0,
        }
    }

    pub fn conditions(&self) -> &FarmConditions {
        &self.conditions
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            ViewState::Idle => Phase::Idle,
            ViewState::Loading(_) => Phase::Loading,
            ViewState::Error => Phase::Error,
            ViewState::Results(_) => Phase::Results,
        }
    }

    /// True while a request is in flight; the submit button is disabled
    pub fn is_busy(&self) -> bool {
        matches!(self.state, ViewState::Loading(_))
    }

    /// Suggestions from the last successful request
    pub fn suggestions(&self) -> &[CropSuggestion] {
        match &self.state {
            ViewState::Results(suggestions) => suggestions,
            _ => &[],
        }
    }

    /// Apply one form edit. Other fields are left untouched.
    pub fn update_field(&mut self, field: FarmField, value: &str) -> Result<(), ShellError> {
        self.conditions.set(field, value)?;
        Ok(())
    }

    /// Apply one form edit, keyed by the control's `name` attribute
    pub fn update_field_by_name(&mut self, name: &str, value: &str) -> Result<(), ShellError> {
        let field: FarmField = name.parse()?;
        self.update_field(field, value)
    }

    /// Begin a request for the current conditions and enter the loading state
    pub fn submit(&mut self) -> Result<Submission, ShellError> {
        if self.is_busy() {
            return Err(ShellError::Busy);
        }
        self.conditions.check()?;

        self.last_ticket += 1;
        let ticket = Ticket(self.last_ticket);
        self.state = ViewState::Loading(ticket);
        tracing::debug!(ticket = ticket.0, "Submitted farm conditions");

        Ok(Submission {
            ticket,
            conditions: self.conditions.clone(),
        })
    }

    /// Record a successful response. Returns false if the ticket is stale.
    pub fn complete_success(&mut self, ticket: Ticket, suggestions: Vec<CropSuggestion>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        tracing::debug!(
            ticket = ticket.0,
            count = suggestions.len(),
            "Received crop suggestions"
        );
        self.state = ViewState::Results(suggestions);
        true
    }

    /// Record a failed request. The detail is logged, never displayed.
    /// Returns false if the ticket is stale.
    pub fn complete_failure(&mut self, ticket: Ticket, detail: &str) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        tracing::error!(ticket = ticket.0, detail, "Recommendation request failed");
        self.state = ViewState::Error;
        true
    }

    fn accepts(&self, ticket: Ticket) -> bool {
        match self.state {
            ViewState::Loading(current) if current == ticket => true,
            _ => {
                tracing::warn!(ticket = ticket.0, "Ignoring superseded completion");
                false
            }
        }
    }

    pub fn view(&self) -> View {
        match &self.state {
            ViewState::Idle => View::Idle {
                message: IDLE_MESSAGE.to_string(),
            },
            ViewState::Loading(_) => View::Loading {
                message: LOADING_MESSAGE.to_string(),
            },
            ViewState::Error => View::Error {
                title: ERROR_TITLE.to_string(),
                message: ERROR_MESSAGE.to_string(),
            },
            ViewState::Results(suggestions) if suggestions.is_empty() => {
                View::NoRecommendations {
                    message: EMPTY_MESSAGE.to_string(),
                }
            }
            ViewState::Results(suggestions) => View::Results {
                cards: suggestions
                    .iter()
                    .enumerate()
                    .map(|(index, suggestion)| SuggestionCard::new(index, suggestion))
                    .collect(),
            },
        }
    }
}
