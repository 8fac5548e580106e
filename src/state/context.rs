//! Conversation context management
//!
//! This module handles user conversation context, tracking current scenarios,
//! steps, and associated data for each user's interaction with the bot.

use std::collections::HashMap;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc, Duration};

use crate::Settings;
use crate::ServiceFactory;
use crate::middleware::AuthMiddleware;
use crate::utils::errors::{VolunteerPayError, Result};
use crate::state::{scenarios::ScenarioManager, storage::StateStorage};

/// Application-wide context shared with every handler
#[derive(Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub services: Arc<ServiceFactory>,
    pub scenario_manager: Arc<ScenarioManager>,
    pub state_storage: Arc<StateStorage>,
    pub auth: AuthMiddleware,
}

impl AppContext {
    pub fn new(settings: Settings, services: ServiceFactory, state_storage: StateStorage) -> Self {
        let auth = AuthMiddleware::new(&settings.bot.admin_ids);
        Self {
            settings,
            services: Arc::new(services),
            scenario_manager: Arc::new(ScenarioManager::new()),
            state_storage: Arc::new(state_storage),
            auth,
        }
    }
}

/// User conversation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    /// User ID this context belongs to
    pub user_id: i64,
    /// Current scenario the user is in
    pub scenario: Option<String>,
    /// Current step within the scenario
    pub step: Option<String>,
    /// Scenario-specific data
    pub data: HashMap<String, serde_json::Value>,
    /// When this context expires (for cleanup)
    pub expires_at: Option<DateTime<Utc>>,
    /// When this context was last updated
    pub updated_at: DateTime<Utc>,
}

impl ConversationContext {
    /// Create a new conversation context for a user
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            scenario: None,
            step: None,
            data: HashMap::new(),
            expires_at: None,
            updated_at: Utc::now(),
        }
    }

    /// Start a new scenario
    pub fn start_scenario(&mut self, scenario: &str, initial_step: &str) -> Result<()> {
        self.scenario = Some(scenario.to_string());
        self.step = Some(initial_step.to_string());
        self.data.clear();
        self.updated_at = Utc::now();
        self.expires_at = Some(Utc::now() + Duration::hours(24));
        Ok(())
    }

    /// Move to the next step in the current scenario
    pub fn next_step(&mut self, step: &str) -> Result<()> {
        if self.scenario.is_none() {
            return Err(VolunteerPayError::InvalidStateTransition {
                from: "no_scenario".to_string(),
                to: step.to_string(),
            });
        }

        self.step = Some(step.to_string());
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Set data for the current context
    pub fn set_data<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)?;
        self.data.insert(key.to_string(), json_value);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Get data from the current context
    pub fn get_data<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        if let Some(value) = self.data.get(key) {
            let result: T = serde_json::from_value(value.clone())?;
            Ok(Some(result))
        } else {
            Ok(None)
        }
    }

    /// Get string data (convenience method)
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_data::<String>(key).unwrap_or(None)
    }

    /// String data, empty when missing
    pub fn string_or_blank(&self, key: &str) -> String {
        self.get_string(key).unwrap_or_default()
    }

    /// Check if context has expired
    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            Utc::now() > expires_at
        } else {
            false
        }
    }

    /// Set custom expiry time
    pub fn set_expiry(&mut self, expires_at: DateTime<Utc>) {
        self.expires_at = Some(expires_at);
        self.updated_at = Utc::now();
    }

    /// Check if user is in a specific scenario
    pub fn is_in_scenario(&self, scenario: &str) -> bool {
        self.scenario.as_deref() == Some(scenario)
    }

    /// Check if user is at a specific step
    pub fn is_at_step(&self, step: &str) -> bool {
        self.step.as_deref() == Some(step)
    }

    /// Whether any scenario is running
    pub fn is_active(&self) -> bool {
        self.scenario.is_some()
    }
}
