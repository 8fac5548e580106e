//! Conversation scenarios implementation
//!
//! Multi-step conversations that collect form fields one message at a time:
//! joining an event and submitting a new event.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{VolunteerPayError, Result};
use crate::utils::helpers::{normalize_answer, parse_event_date, BLANK_MARKER};
use super::context::ConversationContext;

pub const JOIN_EVENT: &str = "join_event";
pub const CREATE_EVENT: &str = "create_event";

/// Represents a conversation scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Initial step when starting this scenario
    pub initial_step: String,
    /// All possible steps in this scenario
    pub steps: HashMap<String, ScenarioStep>,
    /// Maximum duration for this scenario (in seconds)
    pub max_duration: Option<u64>,
}

/// Represents a step within a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioStep {
    /// Step identifier
    pub id: String,
    /// Context data key the answer is stored under
    pub field: String,
    /// Question sent to the user
    pub prompt: String,
    /// Possible next steps from this step
    pub next_steps: Vec<String>,
    /// Validation rules for user input
    pub validation: Option<StepValidation>,
    /// Whether the blank marker is accepted
    pub skippable: bool,
}

/// Validation rules for a scenario step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepValidation {
    /// Input type expected
    pub input_type: InputType,
    /// Maximum length (for text inputs)
    pub max_length: Option<usize>,
    /// Custom validation message
    pub error_message: Option<String>,
}

/// Types of input expected in a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputType {
    Text,
    Number,
    DateTime,
}

/// What the conversation does after an accepted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Ask the next question
    Prompt(String),
    /// All answers collected
    Completed,
}

/// Scenario manager for handling all conversation scenarios
#[derive(Debug, Clone)]
pub struct ScenarioManager {
    scenarios: HashMap<String, Scenario>,
}

impl ScenarioManager {
    /// Create a new scenario manager with default scenarios
    pub fn new() -> Self {
        let mut manager = Self {
            scenarios: HashMap::new(),
        };

        manager.register_scenario(create_join_event_scenario());
        manager.register_scenario(create_event_creation_scenario());
        manager
    }

    /// Register a new scenario
    pub fn register_scenario(&mut self, scenario: Scenario) {
        self.scenarios.insert(scenario.id.clone(), scenario);
    }

    /// Get a scenario by ID
    pub fn get_scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.get(id)
    }

    /// Start a scenario for a user and return the first question
    pub fn start_scenario(&self, context: &mut ConversationContext, scenario_id: &str) -> Result<String> {
        let scenario = self.get_scenario(scenario_id)
            .ok_or_else(|| VolunteerPayError::InvalidInput(format!("Unknown scenario: {}", scenario_id)))?;

        context.start_scenario(scenario_id, &scenario.initial_step)?;

        if let Some(max_duration) = scenario.max_duration {
            let expiry = chrono::Utc::now() + chrono::Duration::seconds(max_duration as i64);
            context.set_expiry(expiry);
        }

        Ok(self.get_current_step(context)?.prompt.clone())
    }

    /// Move to the next step in a scenario
    pub fn next_step(&self, context: &mut ConversationContext, next_step: &str) -> Result<()> {
        let current_step = self.get_current_step(context)?;

        if !current_step.next_steps.iter().any(|s| s == next_step) {
            return Err(VolunteerPayError::InvalidStateTransition {
                from: current_step.id.clone(),
                to: next_step.to_string(),
            });
        }

        context.next_step(next_step)
    }

    /// Validate user input for the current step
    pub fn validate_input(&self, context: &ConversationContext, input: &str) -> Result<()> {
        let step = self.get_current_step(context)?;
        let input = input.trim();

        if input.is_empty() {
            return Err(VolunteerPayError::InvalidInput(format!(
                "Please send a value, or {} to leave it blank",
                BLANK_MARKER
            )));
        }
        if input == BLANK_MARKER {
            return if step.skippable {
                Ok(())
            } else {
                Err(VolunteerPayError::InvalidInput("This field cannot be left blank".to_string()))
            };
        }

        match &step.validation {
            Some(validation) => validate_input_against_rules(input, validation),
            None => Ok(()),
        }
    }

    /// Validate and record an answer, then advance the conversation
    pub fn apply_input(&self, context: &mut ConversationContext, input: &str) -> Result<StepOutcome> {
        self.validate_input(context, input)?;

        let step = self.get_current_step(context)?.clone();
        context.set_data(&step.field, normalize_answer(input))?;

        match step.next_steps.first() {
            Some(next) => {
                self.next_step(context, next)?;
                Ok(StepOutcome::Prompt(self.get_current_step(context)?.prompt.clone()))
            }
            None => Ok(StepOutcome::Completed),
        }
    }

    /// Get the current step information
    pub fn get_current_step(&self, context: &ConversationContext) -> Result<&ScenarioStep> {
        let scenario_id = context.scenario.as_ref()
            .ok_or_else(|| VolunteerPayError::InvalidInput("No active scenario".to_string()))?;

        let step_id = context.step.as_ref()
            .ok_or_else(|| VolunteerPayError::InvalidInput("No active step".to_string()))?;

        let scenario = self.get_scenario(scenario_id)
            .ok_or_else(|| VolunteerPayError::InvalidInput(format!("Unknown scenario: {}", scenario_id)))?;

        scenario.steps.get(step_id)
            .ok_or_else(|| VolunteerPayError::InvalidInput(format!("Unknown step: {}", step_id)))
    }
}

impl Default for ScenarioManager {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_input_against_rules(input: &str, validation: &StepValidation) -> Result<()> {
    if let Some(max_length) = validation.max_length {
        if input.chars().count() > max_length {
            return Err(VolunteerPayError::InvalidInput(
                format!("Input too long (maximum {} characters)", max_length)
            ));
        }
    }

    let valid = match validation.input_type {
        InputType::Text => true,
        InputType::Number => input.parse::<i32>().is_ok(),
        InputType::DateTime => parse_event_date(input).is_some(),
    };

    if valid {
        Ok(())
    } else {
        Err(VolunteerPayError::InvalidInput(
            validation.error_message.clone()
                .unwrap_or_else(|| "Input format is invalid".to_string())
        ))
    }
}

/// Build a linear scenario where each step leads to the following one
fn linear_scenario(id: &str, name: &str, max_duration: u64, steps: Vec<ScenarioStep>) -> Scenario {
    let initial_step = steps.first().map(|s| s.id.clone()).unwrap_or_default();
    let next_ids: Vec<Option<String>> = steps.iter().skip(1).map(|s| Some(s.id.clone())).chain(std::iter::once(None)).collect();

    let steps = steps
        .into_iter()
        .zip(next_ids)
        .map(|(mut step, next)| {
            step.next_steps = next.into_iter().collect();
            (step.id.clone(), step)
        })
        .collect();

    Scenario {
        id: id.to_string(),
        name: name.to_string(),
        initial_step,
        steps,
        max_duration: Some(max_duration),
    }
}

fn text_step(id: &str, field: &str, prompt: &str, max_length: usize) -> ScenarioStep {
    ScenarioStep {
        id: id.to_string(),
        field: field.to_string(),
        prompt: prompt.to_string(),
        next_steps: vec![],
        validation: Some(StepValidation {
            input_type: InputType::Text,
            max_length: Some(max_length),
            error_message: None,
        }),
        skippable: true,
    }
}

/// Create the join event scenario
fn create_join_event_scenario() -> Scenario {
    linear_scenario(JOIN_EVENT, "Join Event", 1800, vec![
        text_step("name_input", "name", "What is your name?", 100),
        text_step("contact_input", "contact_number", "What is your contact number?", 50),
    ])
}

/// Create the event creation scenario
fn create_event_creation_scenario() -> Scenario {
    let mut date = text_step(
        "date_input",
        "date",
        "When does it take place? Use YYYY-MM-DDTHH:MM, e.g. 2024-07-01T09:30.",
        32,
    );
    date.validation = Some(StepValidation {
        input_type: InputType::DateTime,
        max_length: None,
        error_message: Some("Please provide a valid date and time (YYYY-MM-DDTHH:MM)".to_string()),
    });

    let mut strength = text_step(
        "participant_strength_input",
        "participant_strength",
        "How many participants do you need?",
        10,
    );
    strength.validation = Some(StepValidation {
        input_type: InputType::Number,
        max_length: None,
        error_message: Some("Please provide a whole number".to_string()),
    });

    linear_scenario(CREATE_EVENT, "Event Creation", 3600, vec![
        text_step("activity_input", "activity", "What is the activity?", 200),
        date,
        strength,
        text_step("organisation_name_input", "organisation_name", "Which organisation is running it?", 200),
        text_step("description_input", "description", "Describe the event.", 2000),
        text_step("guarantor_input", "guarantor", "Who is the guarantor?", 200),
        text_step("guarantor_contact_input", "guarantor_contact", "How can the guarantor be reached?", 200),
    ])
}
