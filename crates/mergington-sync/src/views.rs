//! Output shape of an activity as handed to callers.
//!
//! Everything here is read from the activity's own document; building a view
//! never touches the store. Callers are expected to have refreshed stale
//! activities first (see [`ActivityService`](crate::services::ActivityService)).

use mergington_shared::constants::TIME_FORMAT;
use mergington_shared::{Activity, CategoryReference, TeacherReference};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub days: Vec<String>,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: String,
    pub label: String,
    pub background_color: String,
    pub text_color: String,
    pub description: Option<String>,
    /// Snapshots do not carry the flag; always `true`.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherView {
    pub username: String,
    pub display_name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityView {
    pub name: String,
    pub description: String,
    /// Human-readable summary, e.g. `Tuesday, Thursday, 15:30 - 17:00`.
    pub schedule: String,
    pub schedule_details: ScheduleView,
    pub max_participants: u32,
    pub participants: Vec<String>,
    pub participant_count: usize,
    pub category: Option<String>,
    pub category_details: Option<CategoryView>,
    pub assigned_teachers: Vec<String>,
    pub assigned_teacher_details: Vec<TeacherView>,
    pub can_teachers_register_students: bool,
    pub difficulty_level: Option<String>,
}

impl From<&CategoryReference> for CategoryView {
    fn from(reference: &CategoryReference) -> Self {
        Self {
            id: reference.id().to_string(),
            label: reference.label().to_string(),
            background_color: reference.background_color().to_string(),
            text_color: reference.text_color().to_string(),
            description: reference.description().map(str::to_string),
            active: true,
        }
    }
}

impl From<&TeacherReference> for TeacherView {
    fn from(reference: &TeacherReference) -> Self {
        Self {
            username: reference.username().to_string(),
            display_name: reference.display_name().to_string(),
            role: reference.role().as_str().to_lowercase(),
        }
    }
}

impl From<&Activity> for ActivityView {
    fn from(activity: &Activity) -> Self {
        let details = activity.schedule_details();
        let start = details.start_time().format(TIME_FORMAT).to_string();
        let end = details.end_time().format(TIME_FORMAT).to_string();

        Self {
            name: activity.name().to_string(),
            description: activity.description().to_string(),
            schedule: format!("{}, {start} - {end}", details.days().join(", ")),
            schedule_details: ScheduleView {
                days: details.days().to_vec(),
                start_time: start,
                end_time: end,
            },
            max_participants: activity.max_participants(),
            participants: activity
                .participant_emails()
                .iter()
                .map(|e| e.as_str().to_string())
                .collect(),
            participant_count: activity.participant_emails().len(),
            category: activity.category_id().map(str::to_string),
            category_details: activity.category().map(CategoryView::from),
            assigned_teachers: activity.assigned_teacher_usernames().to_vec(),
            assigned_teacher_details: activity.assigned_teachers().iter().map(TeacherView::from).collect(),
            can_teachers_register_students: activity.can_teachers_register_students(),
            difficulty_level: activity.difficulty_level().map(|d| d.display_name().to_string()),
        }
    }
}
