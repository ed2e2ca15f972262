//! Workout tracking operations.
//!
//! Wraps the `/WorkoutTracking/*` endpoints: live sessions, logged sets, and
//! the tracking-side view of weekly volume. `update_volume` and
//! `check_balance` mirror the planner's operations on this service's own
//! store; the request shapes are shared with the planner module.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::planner::{ImbalanceReport, UpdateVolumeBody, UserWeekBody};
use crate::types::{ExerciseRecord, RecordExerciseRequest, StartSessionRequest, WorkoutSession};

/// Facade over the WorkoutTracking service. Stateless view of the client.
#[derive(Debug, Clone, Copy)]
pub struct WorkoutTracking<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn workout_tracking(&self) -> WorkoutTracking<'_> {
        WorkoutTracking { client: self }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStarted {
    pub session_id: String,
}

/// `weight` is null when the user has never logged this exercise.
#[derive(Debug, Clone, Deserialize)]
pub struct LastWeight {
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutHistory {
    pub records: Vec<ExerciseRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeReport {
    pub volumes: Vec<MuscleVolume>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MuscleVolume {
    pub muscle_group: String,
    pub volume: f64,
}

#[derive(Serialize)]
struct UserExerciseBody<'a> {
    user: &'a str,
    exercise: &'a str,
}

#[derive(Serialize)]
struct HistoryBody<'a> {
    user: &'a str,
    exercise: &'a str,
    limit: u32,
}

#[derive(Serialize)]
struct UserBody<'a> {
    user: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionIdBody<'a> {
    session_id: &'a str,
}

impl WorkoutTracking<'_> {
    pub async fn start_session(&self, input: &StartSessionRequest) -> Result<SessionStarted, ApiError> {
        self.client.execute("/WorkoutTracking/startSession", input).await
    }

    pub async fn record_exercise(&self, input: &RecordExerciseRequest) -> Result<(), ApiError> {
        self.client.execute_unit("/WorkoutTracking/recordExercise", input).await
    }

    pub async fn get_last_weight(&self, user: &str, exercise: &str) -> Result<LastWeight, ApiError> {
        self.client
            .execute("/WorkoutTracking/getLastWeight", &UserExerciseBody { user, exercise })
            .await
    }

    pub async fn get_workout_history(
        &self,
        user: &str,
        exercise: &str,
        limit: u32,
    ) -> Result<WorkoutHistory, ApiError> {
        self.client
            .execute(
                "/WorkoutTracking/getWorkoutHistory",
                &HistoryBody { user, exercise, limit },
            )
            .await
    }

    /// `week_start` is omitted from the body when `None`; the backend picks
    /// the current week.
    pub async fn update_volume(
        &self,
        user: &str,
        exercise: &str,
        sets: u32,
        reps: u32,
        weight: f64,
        week_start: Option<&str>,
    ) -> Result<(), ApiError> {
        self.client
            .execute_unit(
                "/WorkoutTracking/updateVolume",
                &UpdateVolumeBody {
                    user,
                    exercise,
                    sets,
                    reps,
                    weight,
                    week_start,
                },
            )
            .await
    }

    pub async fn check_balance(&self, user: &str, week_start: &str) -> Result<ImbalanceReport, ApiError> {
        self.client
            .execute("/WorkoutTracking/checkBalance", &UserWeekBody { user, week_start })
            .await
    }

    pub async fn get_weekly_volume(&self, user: &str, week_start: &str) -> Result<VolumeReport, ApiError> {
        self.client
            .execute("/WorkoutTracking/getWeeklyVolume", &UserWeekBody { user, week_start })
            .await
    }

    /// Administrative query; returns the sessions bare, not enveloped.
    pub async fn user_sessions(&self, user: &str) -> Result<Vec<WorkoutSession>, ApiError> {
        self.client
            .execute("/WorkoutTracking/_getUserSessions", &UserBody { user })
            .await
    }

    /// Administrative query; returns the records bare, not enveloped.
    pub async fn session_records(&self, session_id: &str) -> Result<Vec<ExerciseRecord>, ApiError> {
        self.client
            .execute("/WorkoutTracking/_getSessionRecords", &SessionIdBody { session_id })
            .await
    }

    /// Administrative query; returns the records bare, not enveloped.
    pub async fn user_records(&self, user: &str) -> Result<Vec<ExerciseRecord>, ApiError> {
        self.client
            .execute("/WorkoutTracking/_getUserRecords", &UserBody { user })
            .await
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<(), ApiError> {
        self.client
            .execute_unit("/WorkoutTracking/deleteSession", &SessionIdBody { session_id })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_body_carries_the_limit() {
        let body = HistoryBody {
            user: "alice",
            exercise: "squat",
            limit: 10,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["limit"], 10);
    }

    #[test]
    fn session_id_body_uses_camel_case() {
        let json = serde_json::to_value(&SessionIdBody { session_id: "s1" }).unwrap();
        assert_eq!(json["sessionId"], "s1");
    }

    #[test]
    fn last_weight_deserializes_null() {
        let last: LastWeight = serde_json::from_str(r#"{"weight":null}"#).unwrap();
        assert!(last.weight.is_none());
    }
}
