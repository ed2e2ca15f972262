//! In-memory PlateMate backend for integration testing.
//!
//! # Design
//! Every operation is a POST to `/api/{Service}/{operation}`, mirroring the
//! real backend's wire contract: a JSON body in, a JSON envelope out, with
//! domain rejections reported as `{ "error": string }` under HTTP 200 and
//! only unknown endpoints answered with a non-2xx status. A single dispatch
//! handler routes on the (service, operation) pair; state lives in one
//! `RwLock`ed store. The domain logic here is a deliberately thin stand-in —
//! just enough behavior for client lifecycle tests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const MOCK_TIMESTAMP: &str = "1970-01-01T00:00:00Z";
const DEFAULT_WEEK: &str = "current";

// --- Wire schema ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub exercise_id: String,
    pub name: String,
    pub muscle_groups: Vec<String>,
    pub movement_pattern: String,
    pub equipment: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub preferences: Preferences,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub default_increment: f64,
    pub units: String,
    pub notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_increment: 2.5,
            units: "kg".to_string(),
            notifications: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionRule {
    pub exercise: String,
    pub increment: f64,
    pub deload_threshold: f64,
    pub target_sessions: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgression {
    pub user: String,
    pub exercise: String,
    pub current_weight: f64,
    pub sessions_at_weight: u32,
    pub last_progression: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub template_id: String,
    pub name: String,
    pub exercises: Vec<String>,
    pub muscle_groups: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    pub user: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub session_id: String,
    pub exercise: String,
    pub weight: f64,
    pub sets: u32,
    pub reps: u32,
    pub notes: Option<String>,
    pub recorded_at: String,
}

// --- Store ---

#[derive(Default)]
pub struct Store {
    exercises: HashMap<String, Exercise>,
    users: HashMap<String, User>,
    preferences: HashMap<String, Preferences>,
    user_preferences: HashMap<String, String>,
    rules: HashMap<String, ProgressionRule>,
    progressions: HashMap<(String, String), UserProgression>,
    templates: HashMap<String, Template>,
    template_owners: HashMap<String, String>,
    default_templates: HashMap<String, String>,
    volumes: HashMap<(String, String, String), f64>,
    sessions: HashMap<String, Session>,
    records: Vec<Record>,
}

impl Store {
    fn exercise_by_name(&self, name: &str) -> Option<&Exercise> {
        self.exercises.values().find(|e| e.name == name)
    }

    /// Muscle groups credited for an exercise; an uncataloged exercise counts
    /// against a group named after itself.
    fn muscle_groups_for(&self, exercise: &str) -> Vec<String> {
        match self.exercise_by_name(exercise) {
            Some(e) => e.muscle_groups.clone(),
            None => vec![exercise.to_string()],
        }
    }

    fn session_user(&self, session_id: &str) -> Option<&str> {
        self.sessions.get(session_id).map(|s| s.user.as_str())
    }
}

pub type Db = Arc<RwLock<Store>>;

// --- Router ---

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/{service}/{operation}", post(dispatch))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn dispatch(
    State(db): State<Db>,
    Path((service, operation)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> Response {
    let mut store = db.write().await;
    match route(&mut store, &service, &operation, payload) {
        Some(Ok(body)) => Json(body).into_response(),
        Some(Err(message)) => Json(json!({ "error": message })).into_response(),
        None => (StatusCode::NOT_FOUND, "unknown endpoint").into_response(),
    }
}

type OpResult = Result<Value, String>;

/// `None` means the endpoint does not exist; `Some(Err)` is a domain
/// rejection reported in-band.
fn route(store: &mut Store, service: &str, operation: &str, payload: Value) -> Option<OpResult> {
    let result = match (service, operation) {
        ("ExerciseCatalog", "addExercise") => add_exercise(store, payload),
        ("ExerciseCatalog", "searchExercises") => search_exercises(store, payload),
        ("ExerciseCatalog", "getExercise") => get_exercise(store, payload),
        ("ExerciseCatalog", "recommendExercises") => recommend_exercises(store, payload),
        ("ExerciseCatalog", "getExercisesByMovementPattern") => {
            exercises_by_movement_pattern(store, payload)
        }
        ("ExerciseCatalog", "_getAllExercises") => all_exercises(store),
        ("ExerciseCatalog", "_getExercisesByMuscleGroup") => {
            exercises_by_muscle_group(store, payload)
        }
        ("ExerciseCatalog", "_getExercisesByEquipment") => exercises_by_equipment(store, payload),

        ("UserManagement", "createUser") => create_user(store, payload),
        ("UserManagement", "getUser") => get_user(store, payload),
        ("UserManagement", "getUserPreferencesId") => preferences_id_for_user(store, payload),
        ("UserManagement", "createDefaultPreferences") => {
            create_default_preferences(store, payload)
        }
        ("UserManagement", "updatePreferences") => update_preferences(store, payload),
        ("UserManagement", "updatePreferencesById") => update_preferences_by_id(store, payload),
        ("UserManagement", "getPreferences") => get_preferences(store, payload),
        ("UserManagement", "getPreferencesByUser") => preferences_id_for_user(store, payload),
        ("UserManagement", "_getAllUsers") => all_users(store),

        ("ProgressionEngine", "suggestWeight") => suggest_weight(store, payload),
        ("ProgressionEngine", "updateProgression") => update_progression(store, payload),
        ("ProgressionEngine", "getProgressionRule") => get_progression_rule(store, payload),
        ("ProgressionEngine", "createProgressionRule") => create_progression_rule(store, payload),
        ("ProgressionEngine", "_getUserProgression") => user_progression(store, payload),
        ("ProgressionEngine", "_getAllProgressionRules") => all_progression_rules(store),
        ("ProgressionEngine", "_getAllUserProgressions") => all_user_progressions(store),

        ("RoutinePlanner", "createTemplate") => create_template(store, payload),
        ("RoutinePlanner", "getSuggestedWorkout") => get_suggested_workout(store, payload),
        ("RoutinePlanner", "updateVolume") => update_volume(store, payload),
        ("RoutinePlanner", "checkBalance") => check_balance(store, payload),
        ("RoutinePlanner", "getTemplate") => get_template(store, payload),
        ("RoutinePlanner", "setDefaultTemplate") => set_default_template(store, payload),
        ("RoutinePlanner", "_getUserTemplates") => user_templates(store, payload),
        ("RoutinePlanner", "_getWeeklyVolume") => weekly_volume_rows(store, payload),

        ("WorkoutTracking", "startSession") => start_session(store, payload),
        ("WorkoutTracking", "recordExercise") => record_exercise(store, payload),
        ("WorkoutTracking", "getLastWeight") => get_last_weight(store, payload),
        ("WorkoutTracking", "getWorkoutHistory") => get_workout_history(store, payload),
        ("WorkoutTracking", "updateVolume") => update_volume(store, payload),
        ("WorkoutTracking", "checkBalance") => check_balance(store, payload),
        ("WorkoutTracking", "getWeeklyVolume") => weekly_volume_report(store, payload),
        ("WorkoutTracking", "_getUserSessions") => user_sessions(store, payload),
        ("WorkoutTracking", "_getSessionRecords") => session_records(store, payload),
        ("WorkoutTracking", "_getUserRecords") => user_records(store, payload),
        ("WorkoutTracking", "deleteSession") => delete_session(store, payload),

        _ => return None,
    };
    Some(result)
}

fn parse<T: DeserializeOwned>(payload: Value) -> Result<T, String> {
    serde_json::from_value(payload).map_err(|e| format!("invalid request: {e}"))
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// --- ExerciseCatalog ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddExerciseRequest {
    name: String,
    muscle_groups: Vec<String>,
    movement_pattern: String,
    equipment: Option<String>,
    instructions: Option<String>,
}

fn add_exercise(store: &mut Store, payload: Value) -> OpResult {
    let req: AddExerciseRequest = parse(payload)?;
    if store.exercise_by_name(&req.name).is_some() {
        return Err(format!("exercise already exists: {}", req.name));
    }
    let exercise = Exercise {
        exercise_id: new_id(),
        name: req.name,
        muscle_groups: req.muscle_groups,
        movement_pattern: req.movement_pattern,
        equipment: req.equipment,
        instructions: req.instructions,
    };
    let id = exercise.exercise_id.clone();
    store.exercises.insert(id.clone(), exercise);
    Ok(json!({ "exerciseId": id }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchExercisesRequest {
    query: Option<String>,
    muscle_group: Option<String>,
}

fn search_exercises(store: &mut Store, payload: Value) -> OpResult {
    let req: SearchExercisesRequest = parse(payload)?;
    let query = req.query.map(|q| q.to_lowercase());
    let exercises: Vec<&Exercise> = store
        .exercises
        .values()
        .filter(|e| match &query {
            Some(q) => e.name.to_lowercase().contains(q),
            None => true,
        })
        .filter(|e| match &req.muscle_group {
            Some(group) => e.muscle_groups.contains(group),
            None => true,
        })
        .collect();
    Ok(json!({ "exercises": exercises }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExerciseIdRequest {
    exercise_id: String,
}

fn get_exercise(store: &mut Store, payload: Value) -> OpResult {
    let req: ExerciseIdRequest = parse(payload)?;
    match store.exercises.get(&req.exercise_id) {
        Some(exercise) => Ok(json!({ "exercise": exercise })),
        None => Err(format!("exercise not found: {}", req.exercise_id)),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendRequest {
    muscle_group: String,
    limit: usize,
}

fn recommend_exercises(store: &mut Store, payload: Value) -> OpResult {
    let req: RecommendRequest = parse(payload)?;
    let ids: Vec<&str> = store
        .exercises
        .values()
        .filter(|e| e.muscle_groups.contains(&req.muscle_group))
        .map(|e| e.exercise_id.as_str())
        .take(req.limit)
        .collect();
    Ok(json!({ "exerciseIds": ids }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovementPatternRequest {
    movement_pattern: String,
}

fn exercises_by_movement_pattern(store: &mut Store, payload: Value) -> OpResult {
    let req: MovementPatternRequest = parse(payload)?;
    let ids: Vec<&str> = store
        .exercises
        .values()
        .filter(|e| e.movement_pattern == req.movement_pattern)
        .map(|e| e.exercise_id.as_str())
        .collect();
    Ok(json!({ "exerciseIds": ids }))
}

fn all_exercises(store: &mut Store) -> OpResult {
    let exercises: Vec<&Exercise> = store.exercises.values().collect();
    Ok(json!({ "exercises": exercises }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MuscleGroupRequest {
    muscle_group: String,
}

fn exercises_by_muscle_group(store: &mut Store, payload: Value) -> OpResult {
    let req: MuscleGroupRequest = parse(payload)?;
    let exercises: Vec<&Exercise> = store
        .exercises
        .values()
        .filter(|e| e.muscle_groups.contains(&req.muscle_group))
        .collect();
    Ok(json!(exercises))
}

#[derive(Deserialize)]
struct EquipmentRequest {
    equipment: String,
}

fn exercises_by_equipment(store: &mut Store, payload: Value) -> OpResult {
    let req: EquipmentRequest = parse(payload)?;
    let exercises: Vec<&Exercise> = store
        .exercises
        .values()
        .filter(|e| e.equipment.as_deref() == Some(req.equipment.as_str()))
        .collect();
    Ok(json!(exercises))
}

// --- UserManagement ---

#[derive(Deserialize)]
struct CreateUserRequest {
    username: String,
    email: String,
}

fn create_user(store: &mut Store, payload: Value) -> OpResult {
    let req: CreateUserRequest = parse(payload)?;
    if store.users.values().any(|u| u.email == req.email) {
        return Err("email taken".to_string());
    }
    let user = User {
        user_id: new_id(),
        username: req.username,
        email: req.email,
        preferences: Preferences::default(),
    };
    let id = user.user_id.clone();
    store.users.insert(id.clone(), user);
    Ok(json!({ "userId": id }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserIdRequest {
    user_id: String,
}

fn get_user(store: &mut Store, payload: Value) -> OpResult {
    let req: UserIdRequest = parse(payload)?;
    match store.users.get(&req.user_id) {
        Some(user) => Ok(json!({ "user": user })),
        None => Err(format!("user not found: {}", req.user_id)),
    }
}

fn preferences_id_for_user(store: &mut Store, payload: Value) -> OpResult {
    let req: UserIdRequest = parse(payload)?;
    match store.user_preferences.get(&req.user_id) {
        Some(id) => Ok(json!({ "preferencesId": id })),
        None => Err(format!("no preferences for user: {}", req.user_id)),
    }
}

fn create_default_preferences(store: &mut Store, payload: Value) -> OpResult {
    let req: UserIdRequest = parse(payload)?;
    if !store.users.contains_key(&req.user_id) {
        return Err(format!("user not found: {}", req.user_id));
    }
    if let Some(existing) = store.user_preferences.get(&req.user_id) {
        return Ok(json!({ "preferencesId": existing }));
    }
    let id = new_id();
    store.preferences.insert(id.clone(), Preferences::default());
    store.user_preferences.insert(req.user_id, id.clone());
    Ok(json!({ "preferencesId": id }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferencesPatch {
    default_increment: Option<f64>,
    units: Option<String>,
    notifications: Option<bool>,
}

impl PreferencesPatch {
    fn apply(&self, target: &mut Preferences) {
        if let Some(increment) = self.default_increment {
            target.default_increment = increment;
        }
        if let Some(units) = &self.units {
            target.units = units.clone();
        }
        if let Some(notifications) = self.notifications {
            target.notifications = notifications;
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePreferencesRequest {
    user_id: String,
    preferences: PreferencesPatch,
}

fn update_preferences(store: &mut Store, payload: Value) -> OpResult {
    let req: UpdatePreferencesRequest = parse(payload)?;
    if let Some(id) = store.user_preferences.get(&req.user_id).cloned() {
        if let Some(record) = store.preferences.get_mut(&id) {
            req.preferences.apply(record);
        }
    }
    match store.users.get_mut(&req.user_id) {
        Some(user) => {
            req.preferences.apply(&mut user.preferences);
            Ok(json!({}))
        }
        None => Err(format!("user not found: {}", req.user_id)),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePreferencesByIdRequest {
    preferences_id: String,
    preferences: PreferencesPatch,
}

fn update_preferences_by_id(store: &mut Store, payload: Value) -> OpResult {
    let req: UpdatePreferencesByIdRequest = parse(payload)?;
    match store.preferences.get_mut(&req.preferences_id) {
        Some(record) => {
            req.preferences.apply(record);
            Ok(json!({}))
        }
        None => Err(format!("preferences not found: {}", req.preferences_id)),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferencesIdRequest {
    preferences_id: String,
}

fn get_preferences(store: &mut Store, payload: Value) -> OpResult {
    let req: PreferencesIdRequest = parse(payload)?;
    match store.preferences.get(&req.preferences_id) {
        Some(record) => Ok(json!(record)),
        None => Err(format!("preferences not found: {}", req.preferences_id)),
    }
}

fn all_users(store: &mut Store) -> OpResult {
    let users: Vec<&User> = store.users.values().collect();
    Ok(json!(users))
}

// --- ProgressionEngine ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestWeightRequest {
    #[allow(dead_code)]
    user: String,
    exercise: String,
    last_weight: f64,
    #[allow(dead_code)]
    last_sets: u32,
    last_reps: u32,
}

fn suggest_weight(store: &mut Store, payload: Value) -> OpResult {
    let req: SuggestWeightRequest = parse(payload)?;
    let (increment, deload_floor) = match store.rules.get(&req.exercise) {
        Some(rule) => (rule.increment, rule.deload_threshold),
        None => (2.5, 5.0),
    };
    let (new_weight, action, reason) = if f64::from(req.last_reps) < deload_floor {
        (req.last_weight * 0.9, "deload", "rep count below deload threshold")
    } else if req.last_reps >= 8 {
        (req.last_weight + increment, "increase", "target reps reached")
    } else {
        (req.last_weight, "maintain", "building toward target reps")
    };
    Ok(json!({
        "suggestion": { "newWeight": new_weight, "reason": reason, "action": action }
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProgressionRequest {
    user: String,
    exercise: String,
    new_weight: f64,
}

fn update_progression(store: &mut Store, payload: Value) -> OpResult {
    let req: UpdateProgressionRequest = parse(payload)?;
    let key = (req.user.clone(), req.exercise.clone());
    store.progressions.insert(
        key,
        UserProgression {
            user: req.user,
            exercise: req.exercise,
            current_weight: req.new_weight,
            sessions_at_weight: 0,
            last_progression: MOCK_TIMESTAMP.to_string(),
        },
    );
    Ok(json!({}))
}

#[derive(Deserialize)]
struct ExerciseRequest {
    exercise: String,
}

fn get_progression_rule(store: &mut Store, payload: Value) -> OpResult {
    let req: ExerciseRequest = parse(payload)?;
    match store.rules.get(&req.exercise) {
        Some(rule) => Ok(json!({ "rule": rule })),
        None => Err(format!("no progression rule for: {}", req.exercise)),
    }
}

fn create_progression_rule(store: &mut Store, payload: Value) -> OpResult {
    let rule: ProgressionRule = parse(payload)?;
    store.rules.insert(rule.exercise.clone(), rule);
    Ok(json!({}))
}

#[derive(Deserialize)]
struct UserExerciseRequest {
    user: String,
    exercise: String,
}

fn user_progression(store: &mut Store, payload: Value) -> OpResult {
    let req: UserExerciseRequest = parse(payload)?;
    let rows: Vec<&UserProgression> = store
        .progressions
        .get(&(req.user, req.exercise))
        .into_iter()
        .collect();
    Ok(json!(rows))
}

fn all_progression_rules(store: &mut Store) -> OpResult {
    let rules: Vec<&ProgressionRule> = store.rules.values().collect();
    Ok(json!(rules))
}

fn all_user_progressions(store: &mut Store) -> OpResult {
    let rows: Vec<&UserProgression> = store.progressions.values().collect();
    Ok(json!(rows))
}

// --- RoutinePlanner ---

#[derive(Deserialize)]
struct CreateTemplateRequest {
    user: String,
    name: String,
    exercises: Vec<String>,
}

fn create_template(store: &mut Store, payload: Value) -> OpResult {
    let req: CreateTemplateRequest = parse(payload)?;
    let mut muscle_groups: Vec<String> = Vec::new();
    for exercise in &req.exercises {
        for group in store.muscle_groups_for(exercise) {
            if !muscle_groups.contains(&group) {
                muscle_groups.push(group);
            }
        }
    }
    let template = Template {
        template_id: new_id(),
        name: req.name,
        exercises: req.exercises,
        muscle_groups,
    };
    let id = template.template_id.clone();
    store.templates.insert(id.clone(), template);
    store.template_owners.insert(id.clone(), req.user);
    Ok(json!({ "templateId": id }))
}

#[derive(Deserialize)]
struct UserDateRequest {
    user: String,
    #[allow(dead_code)]
    date: String,
}

fn get_suggested_workout(store: &mut Store, payload: Value) -> OpResult {
    let req: UserDateRequest = parse(payload)?;
    let template = store
        .default_templates
        .get(&req.user)
        .and_then(|id| store.templates.get(id));
    Ok(json!({ "template": template }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateVolumeRequest {
    user: String,
    exercise: String,
    sets: u32,
    reps: u32,
    weight: f64,
    week_start: Option<String>,
}

fn update_volume(store: &mut Store, payload: Value) -> OpResult {
    let req: UpdateVolumeRequest = parse(payload)?;
    let week = req.week_start.unwrap_or_else(|| DEFAULT_WEEK.to_string());
    let added = f64::from(req.sets) * f64::from(req.reps) * req.weight;
    for group in store.muscle_groups_for(&req.exercise) {
        let key = (req.user.clone(), group, week.clone());
        *store.volumes.entry(key).or_insert(0.0) += added;
    }
    Ok(json!({}))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWeekRequest {
    user: String,
    week_start: String,
}

/// Flags muscle groups trained at less than half the week's peak volume.
fn check_balance(store: &mut Store, payload: Value) -> OpResult {
    let req: UserWeekRequest = parse(payload)?;
    let week: Vec<(&str, f64)> = store
        .volumes
        .iter()
        .filter(|((user, _, start), _)| *user == req.user && *start == req.week_start)
        .map(|((_, group, _), volume)| (group.as_str(), *volume))
        .collect();
    let peak = week.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let mut imbalance: Vec<&str> = week
        .iter()
        .filter(|(_, volume)| *volume < peak / 2.0)
        .map(|(group, _)| *group)
        .collect();
    imbalance.sort_unstable();
    Ok(json!({ "imbalance": imbalance }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateIdRequest {
    template_id: String,
}

fn get_template(store: &mut Store, payload: Value) -> OpResult {
    let req: TemplateIdRequest = parse(payload)?;
    match store.templates.get(&req.template_id) {
        Some(template) => Ok(json!(template)),
        None => Err(format!("template not found: {}", req.template_id)),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetDefaultTemplateRequest {
    user: String,
    template_id: String,
}

fn set_default_template(store: &mut Store, payload: Value) -> OpResult {
    let req: SetDefaultTemplateRequest = parse(payload)?;
    if !store.templates.contains_key(&req.template_id) {
        return Err(format!("template not found: {}", req.template_id));
    }
    store.default_templates.insert(req.user, req.template_id);
    Ok(json!({}))
}

#[derive(Deserialize)]
struct UserRequest {
    user: String,
}

fn user_templates(store: &mut Store, payload: Value) -> OpResult {
    let req: UserRequest = parse(payload)?;
    let templates: Vec<&Template> = store
        .templates
        .iter()
        .filter(|(id, _)| store.template_owners.get(*id) == Some(&req.user))
        .map(|(_, template)| template)
        .collect();
    Ok(json!(templates))
}

fn weekly_volume_rows(store: &mut Store, payload: Value) -> OpResult {
    let req: UserWeekRequest = parse(payload)?;
    let rows: Vec<Value> = store
        .volumes
        .iter()
        .filter(|((user, _, start), _)| *user == req.user && *start == req.week_start)
        .map(|((user, group, start), volume)| {
            json!({ "user": user, "muscleGroup": group, "weekStart": start, "volume": volume })
        })
        .collect();
    Ok(json!(rows))
}

// --- WorkoutTracking ---

#[derive(Deserialize)]
struct StartSessionRequest {
    user: String,
    date: String,
    name: Option<String>,
}

fn start_session(store: &mut Store, payload: Value) -> OpResult {
    let req: StartSessionRequest = parse(payload)?;
    let session = Session {
        session_id: new_id(),
        user: req.user,
        date: req.date,
        name: req.name,
    };
    let id = session.session_id.clone();
    store.sessions.insert(id.clone(), session);
    Ok(json!({ "sessionId": id }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordExerciseRequest {
    session_id: String,
    exercise: String,
    weight: f64,
    sets: u32,
    reps: u32,
    notes: Option<String>,
}

fn record_exercise(store: &mut Store, payload: Value) -> OpResult {
    let req: RecordExerciseRequest = parse(payload)?;
    if !store.sessions.contains_key(&req.session_id) {
        return Err(format!("session not found: {}", req.session_id));
    }
    store.records.push(Record {
        session_id: req.session_id,
        exercise: req.exercise,
        weight: req.weight,
        sets: req.sets,
        reps: req.reps,
        notes: req.notes,
        recorded_at: MOCK_TIMESTAMP.to_string(),
    });
    Ok(json!({}))
}

fn get_last_weight(store: &mut Store, payload: Value) -> OpResult {
    let req: UserExerciseRequest = parse(payload)?;
    let weight = store
        .records
        .iter()
        .rev()
        .find(|r| {
            r.exercise == req.exercise && store.session_user(&r.session_id) == Some(req.user.as_str())
        })
        .map(|r| r.weight);
    Ok(json!({ "weight": weight }))
}

#[derive(Deserialize)]
struct WorkoutHistoryRequest {
    user: String,
    exercise: String,
    limit: usize,
}

fn get_workout_history(store: &mut Store, payload: Value) -> OpResult {
    let req: WorkoutHistoryRequest = parse(payload)?;
    let matching: Vec<&Record> = store
        .records
        .iter()
        .filter(|r| {
            r.exercise == req.exercise && store.session_user(&r.session_id) == Some(req.user.as_str())
        })
        .collect();
    let skip = matching.len().saturating_sub(req.limit);
    Ok(json!({ "records": &matching[skip..] }))
}

fn weekly_volume_report(store: &mut Store, payload: Value) -> OpResult {
    let req: UserWeekRequest = parse(payload)?;
    let volumes: Vec<Value> = store
        .volumes
        .iter()
        .filter(|((user, _, start), _)| *user == req.user && *start == req.week_start)
        .map(|((_, group, _), volume)| json!({ "muscleGroup": group, "volume": volume }))
        .collect();
    Ok(json!({ "volumes": volumes }))
}

fn user_sessions(store: &mut Store, payload: Value) -> OpResult {
    let req: UserRequest = parse(payload)?;
    let sessions: Vec<&Session> = store
        .sessions
        .values()
        .filter(|s| s.user == req.user)
        .collect();
    Ok(json!(sessions))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionIdRequest {
    session_id: String,
}

fn session_records(store: &mut Store, payload: Value) -> OpResult {
    let req: SessionIdRequest = parse(payload)?;
    let records: Vec<&Record> = store
        .records
        .iter()
        .filter(|r| r.session_id == req.session_id)
        .collect();
    Ok(json!(records))
}

fn user_records(store: &mut Store, payload: Value) -> OpResult {
    let req: UserRequest = parse(payload)?;
    let records: Vec<&Record> = store
        .records
        .iter()
        .filter(|r| store.session_user(&r.session_id) == Some(req.user.as_str()))
        .collect();
    Ok(json!(records))
}

fn delete_session(store: &mut Store, payload: Value) -> OpResult {
    let req: SessionIdRequest = parse(payload)?;
    if store.sessions.remove(&req.session_id).is_none() {
        return Err(format!("session not found: {}", req.session_id));
    }
    store.records.retain(|r| r.session_id != req.session_id);
    Ok(json!({}))
}
