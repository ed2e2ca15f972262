//! Exercise catalog operations.
//!
//! Wraps the `/ExerciseCatalog/*` endpoints. The `all_exercises`,
//! `exercises_by_muscle_group` and `exercises_by_equipment` calls map to the
//! underscore-prefixed administrative endpoints; they flow through the same
//! pipeline as everything else.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{AddExerciseRequest, Exercise, SearchExercisesRequest};

/// Facade over the ExerciseCatalog service. Stateless view of the client.
#[derive(Debug, Clone, Copy)]
pub struct ExerciseCatalog<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn exercise_catalog(&self) -> ExerciseCatalog<'_> {
        ExerciseCatalog { client: self }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCreated {
    pub exercise_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseList {
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseEnvelope {
    pub exercise: Exercise,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseIds {
    pub exercise_ids: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExerciseIdBody<'a> {
    exercise_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendBody<'a> {
    muscle_group: &'a str,
    limit: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MovementPatternBody<'a> {
    movement_pattern: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MuscleGroupBody<'a> {
    muscle_group: &'a str,
}

#[derive(Serialize)]
struct EquipmentBody<'a> {
    equipment: &'a str,
}

impl ExerciseCatalog<'_> {
    pub async fn add_exercise(&self, input: &AddExerciseRequest) -> Result<ExerciseCreated, ApiError> {
        self.client.execute("/ExerciseCatalog/addExercise", input).await
    }

    pub async fn search_exercises(
        &self,
        input: &SearchExercisesRequest,
    ) -> Result<ExerciseList, ApiError> {
        self.client.execute("/ExerciseCatalog/searchExercises", input).await
    }

    pub async fn get_exercise(&self, exercise_id: &str) -> Result<ExerciseEnvelope, ApiError> {
        self.client
            .execute("/ExerciseCatalog/getExercise", &ExerciseIdBody { exercise_id })
            .await
    }

    pub async fn recommend_exercises(
        &self,
        muscle_group: &str,
        limit: u32,
    ) -> Result<ExerciseIds, ApiError> {
        self.client
            .execute(
                "/ExerciseCatalog/recommendExercises",
                &RecommendBody { muscle_group, limit },
            )
            .await
    }

    pub async fn exercises_by_movement_pattern(
        &self,
        movement_pattern: &str,
    ) -> Result<ExerciseIds, ApiError> {
        self.client
            .execute(
                "/ExerciseCatalog/getExercisesByMovementPattern",
                &MovementPatternBody { movement_pattern },
            )
            .await
    }

    /// Administrative bulk query over the whole catalog.
    pub async fn all_exercises(&self) -> Result<ExerciseList, ApiError> {
        self.client.execute("/ExerciseCatalog/_getAllExercises", &json!({})).await
    }

    /// Administrative query; returns the exercises bare, not enveloped.
    pub async fn exercises_by_muscle_group(
        &self,
        muscle_group: &str,
    ) -> Result<Vec<Exercise>, ApiError> {
        self.client
            .execute(
                "/ExerciseCatalog/_getExercisesByMuscleGroup",
                &MuscleGroupBody { muscle_group },
            )
            .await
    }

    /// Administrative query; returns the exercises bare, not enveloped.
    pub async fn exercises_by_equipment(&self, equipment: &str) -> Result<Vec<Exercise>, ApiError> {
        self.client
            .execute(
                "/ExerciseCatalog/_getExercisesByEquipment",
                &EquipmentBody { equipment },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_body_uses_camel_case() {
        let body = RecommendBody {
            muscle_group: "chest",
            limit: 3,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["muscleGroup"], "chest");
        assert_eq!(json["limit"], 3);
    }

    #[test]
    fn exercise_id_body_uses_camel_case() {
        let json = serde_json::to_value(&ExerciseIdBody { exercise_id: "e1" }).unwrap();
        assert_eq!(json["exerciseId"], "e1");
    }

    #[test]
    fn search_request_serializes_null_criteria() {
        let input = SearchExercisesRequest {
            query: None,
            muscle_group: Some("back".to_string()),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["query"], serde_json::Value::Null);
        assert_eq!(json["muscleGroup"], "back");
    }
}
