//! Progression engine operations.
//!
//! Wraps the `/ProgressionEngine/*` endpoints: weight suggestions based on a
//! user's last performance, and the per-exercise rules driving them.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{ProgressionRule, ProgressionSuggestion, SuggestWeightRequest, UserProgression};

/// Facade over the ProgressionEngine service. Stateless view of the client.
#[derive(Debug, Clone, Copy)]
pub struct ProgressionEngine<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn progression_engine(&self) -> ProgressionEngine<'_> {
        ProgressionEngine { client: self }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionEnvelope {
    pub suggestion: ProgressionSuggestion,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleEnvelope {
    pub rule: ProgressionRule,
}

#[derive(Serialize)]
struct ExerciseBody<'a> {
    exercise: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProgressionBody<'a> {
    user: &'a str,
    exercise: &'a str,
    new_weight: f64,
}

#[derive(Serialize)]
struct UserExerciseBody<'a> {
    user: &'a str,
    exercise: &'a str,
}

impl ProgressionEngine<'_> {
    pub async fn suggest_weight(
        &self,
        input: &SuggestWeightRequest,
    ) -> Result<SuggestionEnvelope, ApiError> {
        self.client.execute("/ProgressionEngine/suggestWeight", input).await
    }

    pub async fn update_progression(
        &self,
        user: &str,
        exercise: &str,
        new_weight: f64,
    ) -> Result<(), ApiError> {
        self.client
            .execute_unit(
                "/ProgressionEngine/updateProgression",
                &UpdateProgressionBody {
                    user,
                    exercise,
                    new_weight,
                },
            )
            .await
    }

    pub async fn get_progression_rule(&self, exercise: &str) -> Result<RuleEnvelope, ApiError> {
        self.client
            .execute("/ProgressionEngine/getProgressionRule", &ExerciseBody { exercise })
            .await
    }

    pub async fn create_progression_rule(&self, rule: &ProgressionRule) -> Result<(), ApiError> {
        self.client.execute_unit("/ProgressionEngine/createProgressionRule", rule).await
    }

    /// Administrative query; returns the progressions bare, not enveloped.
    pub async fn user_progression(
        &self,
        user: &str,
        exercise: &str,
    ) -> Result<Vec<UserProgression>, ApiError> {
        self.client
            .execute(
                "/ProgressionEngine/_getUserProgression",
                &UserExerciseBody { user, exercise },
            )
            .await
    }

    /// Administrative bulk query over every stored rule.
    pub async fn all_progression_rules(&self) -> Result<Vec<ProgressionRule>, ApiError> {
        self.client
            .execute("/ProgressionEngine/_getAllProgressionRules", &json!({}))
            .await
    }

    /// Administrative bulk query over every user progression.
    pub async fn all_user_progressions(&self) -> Result<Vec<UserProgression>, ApiError> {
        self.client
            .execute("/ProgressionEngine/_getAllUserProgressions", &json!({}))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_progression_body_uses_camel_case() {
        let body = UpdateProgressionBody {
            user: "alice",
            exercise: "squat",
            new_weight: 102.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["user"], "alice");
        assert_eq!(json["exercise"], "squat");
        assert_eq!(json["newWeight"], 102.5);
    }

    #[test]
    fn rule_serializes_as_its_own_payload() {
        let rule = ProgressionRule {
            exercise: "deadlift".to_string(),
            increment: 5.0,
            deload_threshold: 3.0,
            target_sessions: 2,
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["deloadThreshold"], 3.0);
        assert_eq!(json["targetSessions"], 2);
    }
}
