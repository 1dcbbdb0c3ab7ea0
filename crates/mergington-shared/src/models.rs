//! Records persisted by the entity store.
//!
//! [`Teacher`] and [`Category`] are sources of truth and keep plain public
//! fields, like the rest of the store's row types. [`Activity`] keeps its
//! fields private because it pairs every foreign key with an embedded
//! snapshot, and the two halves must only move together.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::references::{CategoryReference, TeacherReference};
use crate::types::{require_hex_color, require_non_blank, DifficultyLevel, Email, Role, ScheduleDetails};

// ---------------------------------------------------------------------------
// Teacher
// ---------------------------------------------------------------------------

/// A staff account. The primary key is `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub username: String,
    pub display_name: String,
    /// Opaque credential. Never embedded, never serialized.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub role: Role,
}

impl Teacher {
    /// Missing role defaults to [`Role::Teacher`].
    pub fn new(username: &str, display_name: &str, password: &str, role: Option<Role>) -> Result<Self> {
        Ok(Self {
            username: require_non_blank(username, "username")?,
            display_name: require_non_blank(display_name, "displayName")?,
            password: password.to_string(),
            role: role.unwrap_or_default(),
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Display metadata for a kind of activity. The primary key is the
/// lower-cased `id` code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub label: String,
    pub background_color: String,
    pub text_color: String,
    pub description: Option<String>,
    /// Soft-disable flag. Inactive categories stay referenced.
    pub active: bool,
}

impl Category {
    pub fn new(
        id: &str,
        label: &str,
        background_color: &str,
        text_color: &str,
        description: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: require_non_blank(id, "id")?.to_lowercase(),
            label: require_non_blank(label, "label")?,
            background_color: require_hex_color(background_color, "backgroundColor")?,
            text_color: require_hex_color(text_color, "textColor")?,
            description,
            active: true,
        })
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Normalise a category code the way [`Category::new`] stores it.
/// Blank input yields `None`.
pub fn normalize_category_id(code: &str) -> Option<String> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

/// An extracurricular activity. The primary key is `name`.
///
/// Each relationship is stored twice: as a key (`category_id`,
/// `assigned_teacher_usernames`) and as an embedded snapshot (`category`,
/// `assigned_teachers`). The key half is edited freely; the embedded half is
/// derived data and is only written through the `embed_*` / `clear_*`
/// methods, which the sync engine uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    name: String,
    description: String,
    schedule_details: ScheduleDetails,
    max_participants: u32,
    #[serde(default)]
    participant_emails: Vec<Email>,
    #[serde(default)]
    category_id: Option<String>,
    #[serde(default)]
    category: Option<CategoryReference>,
    #[serde(default)]
    assigned_teacher_usernames: Vec<String>,
    #[serde(default)]
    assigned_teachers: Vec<TeacherReference>,
    #[serde(default = "default_true")]
    can_teachers_register_students: bool,
    #[serde(default)]
    difficulty_level: Option<DifficultyLevel>,
}

fn default_true() -> bool {
    true
}

impl Activity {
    /// Key-only constructor: the category is referenced by id and nothing is
    /// embedded yet, so the new activity reads as stale until resynced.
    pub fn new(
        name: &str,
        description: &str,
        schedule_details: ScheduleDetails,
        max_participants: u32,
        category_id: Option<&str>,
    ) -> Result<Self> {
        if max_participants == 0 {
            return Err(ValidationError::ZeroCapacity);
        }
        Ok(Self {
            name: require_non_blank(name, "name")?,
            description: require_non_blank(description, "description")?,
            schedule_details,
            max_participants,
            participant_emails: Vec::new(),
            category_id: category_id.and_then(normalize_category_id),
            category: None,
            assigned_teacher_usernames: Vec::new(),
            assigned_teachers: Vec::new(),
            can_teachers_register_students: true,
            difficulty_level: None,
        })
    }

    pub fn with_participants(mut self, emails: Vec<Email>) -> Result<Self> {
        for (i, email) in emails.iter().enumerate() {
            if emails[..i].contains(email) {
                return Err(ValidationError::DuplicateParticipant(email.to_string()));
            }
        }
        if emails.len() > self.max_participants as usize {
            return Err(ValidationError::OverCapacity {
                count: emails.len(),
                max: self.max_participants,
            });
        }
        self.participant_emails = emails;
        Ok(self)
    }

    pub fn with_difficulty(mut self, level: Option<DifficultyLevel>) -> Self {
        self.difficulty_level = level;
        self
    }

    pub fn with_teacher_registration(mut self, allowed: bool) -> Self {
        self.can_teachers_register_students = allowed;
        self
    }

    // -- accessors --

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schedule_details(&self) -> &ScheduleDetails {
        &self.schedule_details
    }

    pub fn max_participants(&self) -> u32 {
        self.max_participants
    }

    pub fn participant_emails(&self) -> &[Email] {
        &self.participant_emails
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }

    pub fn category(&self) -> Option<&CategoryReference> {
        self.category.as_ref()
    }

    pub fn assigned_teacher_usernames(&self) -> &[String] {
        &self.assigned_teacher_usernames
    }

    pub fn assigned_teachers(&self) -> &[TeacherReference] {
        &self.assigned_teachers
    }

    pub fn can_teachers_register_students(&self) -> bool {
        self.can_teachers_register_students
    }

    pub fn difficulty_level(&self) -> Option<DifficultyLevel> {
        self.difficulty_level
    }

    pub fn is_teacher_assigned(&self, username: &str) -> bool {
        self.assigned_teacher_usernames.iter().any(|u| u == username)
    }

    // -- key half --

    /// Add a teacher by key only. Returns `false` if already assigned.
    pub fn assign_teacher(&mut self, username: &str) -> bool {
        let username = username.trim();
        if username.is_empty() || self.is_teacher_assigned(username) {
            return false;
        }
        self.assigned_teacher_usernames.push(username.to_string());
        true
    }

    /// Point at a different category. An embedded snapshot that no longer
    /// matches the key is dropped.
    pub fn set_category_id(&mut self, category_id: Option<&str>) {
        self.category_id = category_id.and_then(normalize_category_id);
        let matches = match (&self.category_id, &self.category) {
            (Some(id), Some(embedded)) => embedded.id() == id,
            _ => false,
        };
        if !matches {
            self.category = None;
        }
    }

    // -- embedded half --

    /// Store `reference` as the category snapshot and align the key with it.
    pub fn embed_category(&mut self, reference: CategoryReference) {
        self.category_id = Some(reference.id().to_string());
        self.category = Some(reference);
    }

    /// Drop both the category key and its snapshot.
    pub fn clear_category(&mut self) {
        self.category_id = None;
        self.category = None;
    }

    /// Replace the snapshot for `reference.username()`, assigning the key
    /// first if needed.
    pub fn embed_teacher(&mut self, reference: TeacherReference) {
        self.assign_teacher(reference.username());
        self.assigned_teachers
            .retain(|existing| existing.username() != reference.username());
        self.assigned_teachers.push(reference);
    }

    /// Replace the whole snapshot list. References to usernames that are not
    /// assigned, and repeats of a username, are discarded.
    pub fn replace_teacher_references(&mut self, references: Vec<TeacherReference>) {
        let mut kept: Vec<TeacherReference> = Vec::with_capacity(references.len());
        for reference in references {
            if self.is_teacher_assigned(reference.username()) && !kept.contains(&reference) {
                kept.push(reference);
            }
        }
        self.assigned_teachers = kept;
    }

    /// Strip `username` from both the keys and the snapshots. Returns `true`
    /// if anything was removed.
    pub fn remove_teacher(&mut self, username: &str) -> bool {
        let before = self.assigned_teacher_usernames.len() + self.assigned_teachers.len();
        self.assigned_teacher_usernames.retain(|u| u != username);
        self.assigned_teachers.retain(|t| t.username() != username);
        before != self.assigned_teacher_usernames.len() + self.assigned_teachers.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::references::{build_category_reference, build_teacher_reference};

    fn schedule() -> ScheduleDetails {
        ScheduleDetails::new(
            vec!["Tuesday".into(), "Thursday".into()],
            NaiveTime::from_hms_opt(15, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn chess() -> Activity {
        Activity::new("Chess Club", "Strategy", schedule(), 12, Some(" Academic ")).unwrap()
    }

    fn teacher_ref(username: &str, display_name: &str) -> TeacherReference {
        build_teacher_reference(&Teacher::new(username, display_name, "", None).unwrap()).unwrap()
    }

    fn category_ref(id: &str) -> CategoryReference {
        build_category_reference(&Category::new(id, "Label", "#000000", "#ffffff", None).unwrap())
            .unwrap()
    }

    #[test]
    fn teacher_defaults_to_teacher_role() {
        let t = Teacher::new(" maria ", "Maria Rodriguez", "pw", None).unwrap();
        assert_eq!(t.username, "maria");
        assert_eq!(t.role, Role::Teacher);
        assert!(!t.is_admin());
    }

    #[test]
    fn teacher_password_is_not_serialized() {
        let t = Teacher::new("paulo", "Paulo Silva", "hunter2", Some(Role::Admin)).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn category_id_is_lower_cased() {
        let c = Category::new(" Sports ", "Sports", "#28a745", "#ffffff", None).unwrap();
        assert_eq!(c.id, "sports");
        assert!(c.active);
    }

    #[test]
    fn category_rejects_bad_color() {
        let err = Category::new("sports", "Sports", "green", "#ffffff", None).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidColor { field: "backgroundColor", .. }));
    }

    #[test]
    fn key_only_activity_has_nothing_embedded() {
        let a = chess();
        assert_eq!(a.category_id(), Some("academic"));
        assert!(a.category().is_none());
        assert!(a.assigned_teachers().is_empty());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = Activity::new("Chess Club", "Strategy", schedule(), 0, None).unwrap_err();
        assert_eq!(err, ValidationError::ZeroCapacity);
    }

    #[test]
    fn participants_over_capacity_are_rejected() {
        let a = Activity::new("Tiny", "Small", schedule(), 1, None).unwrap();
        let emails = vec![
            Email::parse("a@mergington.edu").unwrap(),
            Email::parse("b@mergington.edu").unwrap(),
        ];
        assert!(matches!(a.with_participants(emails), Err(ValidationError::OverCapacity { .. })));
    }

    #[test]
    fn duplicate_participants_are_rejected() {
        let email = Email::parse("a@mergington.edu").unwrap();
        let err = chess().with_participants(vec![email.clone(), email]).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateParticipant(_)));
    }

    #[test]
    fn embed_teacher_replaces_existing_snapshot() {
        let mut a = chess();
        a.assign_teacher("jose");
        a.embed_teacher(teacher_ref("jose", "Jose"));
        a.embed_teacher(teacher_ref("jose", "Prof. Jose Chen"));
        assert_eq!(a.assigned_teacher_usernames(), ["jose".to_string()]);
        assert_eq!(a.assigned_teachers().len(), 1);
        assert_eq!(a.assigned_teachers()[0].display_name(), "Prof. Jose Chen");
    }

    #[test]
    fn embed_teacher_assigns_missing_key() {
        let mut a = chess();
        a.embed_teacher(teacher_ref("maria", "Maria Rodriguez"));
        assert!(a.is_teacher_assigned("maria"));
    }

    #[test]
    fn replace_teacher_references_drops_unassigned_and_repeats() {
        let mut a = chess();
        a.assign_teacher("jose");
        a.replace_teacher_references(vec![
            teacher_ref("jose", "A"),
            teacher_ref("jose", "B"),
            teacher_ref("ghost", "Ghost"),
        ]);
        assert_eq!(a.assigned_teachers().len(), 1);
        assert_eq!(a.assigned_teachers()[0].display_name(), "A");
    }

    #[test]
    fn remove_teacher_strips_both_halves() {
        let mut a = chess();
        a.embed_teacher(teacher_ref("jose", "Prof. Jose Chen"));
        assert!(a.remove_teacher("jose"));
        assert!(a.assigned_teacher_usernames().is_empty());
        assert!(a.assigned_teachers().is_empty());
        assert!(!a.remove_teacher("jose"));
    }

    #[test]
    fn changing_category_id_drops_mismatched_snapshot() {
        let mut a = chess();
        a.embed_category(category_ref("academic"));
        a.set_category_id(Some("academic"));
        assert!(a.category().is_some());
        a.set_category_id(Some("arts"));
        assert_eq!(a.category_id(), Some("arts"));
        assert!(a.category().is_none());
    }

    #[test]
    fn clear_category_drops_both_halves() {
        let mut a = chess();
        a.embed_category(category_ref("academic"));
        a.clear_category();
        assert!(a.category_id().is_none());
        assert!(a.category().is_none());
    }

    #[test]
    fn document_round_trips_through_json() {
        let mut a = chess().with_difficulty(Some(DifficultyLevel::Beginner));
        a.embed_teacher(teacher_ref("jose", "Prof. Jose Chen"));
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"assignedTeacherUsernames\":[\"jose\"]"));
        let back: Activity = serde_json::from_str(&json).unwrap();
        assert_eq!(back.assigned_teachers()[0].display_name(), "Prof. Jose Chen");
        assert_eq!(back.difficulty_level(), Some(DifficultyLevel::Beginner));
        assert!(back.can_teachers_register_students());
    }
}
