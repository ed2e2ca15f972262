//! Typed async client for the PlateMate fitness-tracking backend.
//!
//! # Overview
//! Every backend operation is a POST of a JSON payload to
//! `/api/{Service}/{operation}`; the response is a JSON envelope that either
//! matches the operation's declared result shape or carries an `error` string
//! (regardless of HTTP status). This crate maps each operation to one typed
//! async method and funnels every call through a single request pipeline.
//!
//! # Design
//! - [`ApiClient`] holds the transport handle and base URL; it is stateless
//!   between calls and cheap to clone.
//! - One facade per backend service (exercise catalog, user management,
//!   progression engine, routine planner, workout tracking) groups the
//!   operations; facades hold no behavior beyond building the payload and
//!   delegating to [`ApiClient::execute`].
//! - All failures converge on [`ApiError`], which keeps the network / HTTP
//!   status / backend-reported distinction inspectable.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod catalog;
pub mod client;
pub mod error;
pub mod planner;
pub mod progression;
pub mod tracking;
pub mod types;
pub mod users;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    AddExerciseRequest, CreateTemplateRequest, CreateUserRequest, Exercise, ExerciseRecord,
    PreferencesPatch, ProgressionAction, ProgressionRule, ProgressionSuggestion,
    RecordExerciseRequest, SearchExercisesRequest, StartSessionRequest, SuggestWeightRequest,
    UpdatePreferencesRequest, User, UserPreferences, UserProgression, WeeklyVolume,
    WorkoutSession, WorkoutTemplate,
};
