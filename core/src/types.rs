//! Domain DTOs for the PlateMate API.
//!
//! # Design
//! These types mirror the backend's wire schema (camelCase JSON) but are
//! defined independently of the mock-server crate; integration tests catch
//! schema drift. Ids are opaque strings minted by the backend.
//!
//! Optionality follows the backend's reading of each field. A field the
//! backend distinguishes as present-but-null serializes an explicit `null`;
//! a field the backend treats as simply absent is omitted from the body
//! (`skip_serializing_if`). The client passes caller intent through without
//! normalizing between the two.

use serde::{Deserialize, Serialize};

/// A catalog exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub exercise_id: String,
    pub name: String,
    pub muscle_groups: Vec<String>,
    pub movement_pattern: String,
    pub equipment: Option<String>,
    pub instructions: Option<String>,
}

/// A registered user, embedding their current preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub preferences: UserPreferences,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub default_increment: f64,
    pub units: String,
    pub notifications: bool,
}

/// Partial preferences update. Omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_increment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
}

/// What the progression engine recommends for the next session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionSuggestion {
    pub new_weight: f64,
    pub reason: String,
    pub action: ProgressionAction,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProgressionAction {
    Increase,
    Maintain,
    Deload,
}

/// Per-exercise progression parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionRule {
    pub exercise: String,
    pub increment: f64,
    pub deload_threshold: f64,
    pub target_sessions: u32,
}

/// A user's progression state on one exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProgression {
    pub user: String,
    pub exercise: String,
    pub current_weight: f64,
    pub sessions_at_weight: u32,
    pub last_progression: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    pub template_id: String,
    pub name: String,
    pub exercises: Vec<String>,
    pub muscle_groups: Vec<String>,
}

/// A workout session. `name` is absent, not null, when the user gave none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub session_id: String,
    pub user: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One logged exercise within a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecord {
    pub session_id: String,
    pub exercise: String,
    pub weight: f64,
    pub sets: u32,
    pub reps: u32,
    pub notes: Option<String>,
    pub recorded_at: String,
}

/// Aggregated training volume for one muscle group in one week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyVolume {
    pub user: String,
    pub muscle_group: String,
    pub week_start: String,
    pub volume: f64,
}

// --- Request payloads ---

/// Request payload for adding a catalog exercise. `equipment` and
/// `instructions` are nullable on the wire, so `None` serializes as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExerciseRequest {
    pub name: String,
    pub muscle_groups: Vec<String>,
    pub movement_pattern: String,
    pub equipment: Option<String>,
    pub instructions: Option<String>,
}

/// Search filter; both criteria are nullable rather than omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchExercisesRequest {
    pub query: Option<String>,
    pub muscle_group: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    pub user_id: String,
    pub preferences: PreferencesPatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestWeightRequest {
    pub user: String,
    pub exercise: String,
    pub last_weight: f64,
    pub last_sets: u32,
    pub last_reps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordExerciseRequest {
    pub session_id: String,
    pub exercise: String,
    pub weight: f64,
    pub sets: u32,
    pub reps: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    pub user: String,
    pub name: String,
    pub exercises: Vec<String>,
}

/// `name` is omitted, not null, when the caller supplies none.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub user: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
