//! Routine planning operations.
//!
//! Wraps the `/RoutinePlanner/*` endpoints: workout templates, suggested
//! workouts, and weekly volume tracking with balance checks.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{CreateTemplateRequest, WeeklyVolume, WorkoutTemplate};

/// Facade over the RoutinePlanner service. Stateless view of the client.
#[derive(Debug, Clone, Copy)]
pub struct RoutinePlanner<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn routine_planner(&self) -> RoutinePlanner<'_> {
        RoutinePlanner { client: self }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCreated {
    pub template_id: String,
}

/// `template` is null when no workout fits the requested day.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestedWorkout {
    pub template: Option<WorkoutTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImbalanceReport {
    pub imbalance: Vec<String>,
}

#[derive(Serialize)]
struct UserDateBody<'a> {
    user: &'a str,
    date: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateVolumeBody<'a> {
    pub(crate) user: &'a str,
    pub(crate) exercise: &'a str,
    pub(crate) sets: u32,
    pub(crate) reps: u32,
    pub(crate) weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) week_start: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserWeekBody<'a> {
    pub(crate) user: &'a str,
    pub(crate) week_start: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateIdBody<'a> {
    template_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetDefaultBody<'a> {
    user: &'a str,
    template_id: &'a str,
}

#[derive(Serialize)]
struct UserBody<'a> {
    user: &'a str,
}

impl RoutinePlanner<'_> {
    pub async fn create_template(
        &self,
        input: &CreateTemplateRequest,
    ) -> Result<TemplateCreated, ApiError> {
        self.client.execute("/RoutinePlanner/createTemplate", input).await
    }

    pub async fn get_suggested_workout(
        &self,
        user: &str,
        date: &str,
    ) -> Result<SuggestedWorkout, ApiError> {
        self.client
            .execute("/RoutinePlanner/getSuggestedWorkout", &UserDateBody { user, date })
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
                "/RoutinePlanner/updateVolume",
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
            .execute("/RoutinePlanner/checkBalance", &UserWeekBody { user, week_start })
            .await
    }

    /// Returns the template bare, not enveloped.
    pub async fn get_template(&self, template_id: &str) -> Result<WorkoutTemplate, ApiError> {
        self.client
            .execute("/RoutinePlanner/getTemplate", &TemplateIdBody { template_id })
            .await
    }

    pub async fn set_default_template(&self, user: &str, template_id: &str) -> Result<(), ApiError> {
        self.client
            .execute_unit(
                "/RoutinePlanner/setDefaultTemplate",
                &SetDefaultBody { user, template_id },
            )
            .await
    }

    /// Administrative query; returns the templates bare, not enveloped.
    pub async fn user_templates(&self, user: &str) -> Result<Vec<WorkoutTemplate>, ApiError> {
        self.client
            .execute("/RoutinePlanner/_getUserTemplates", &UserBody { user })
            .await
    }

    /// Administrative query; returns the volume rows bare, not enveloped.
    pub async fn weekly_volume(&self, user: &str, week_start: &str) -> Result<Vec<WeeklyVolume>, ApiError> {
        self.client
            .execute("/RoutinePlanner/_getWeeklyVolume", &UserWeekBody { user, week_start })
            .await
    }
}
