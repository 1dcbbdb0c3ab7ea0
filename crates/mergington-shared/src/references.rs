//! Embedded references: point-in-time copies of a source entity's display
//! fields, stored inside the activity that points at it.
//!
//! [`build_teacher_reference`] and [`build_category_reference`] are the only
//! places a source entity is turned into its denormalized shape. Both
//! re-validate the source, since a stored row may predate the current rules.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::models::{Category, Teacher};
use crate::types::{require_hex_color, require_non_blank, Role};

/// Snapshot of a [`Teacher`]. Equality is by `username` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherReference {
    username: String,
    display_name: String,
    role: Role,
}

impl TeacherReference {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Field-by-field comparison, unlike `==` which only looks at the key.
    pub fn same_snapshot(&self, other: &Self) -> bool {
        self.username == other.username
            && self.display_name == other.display_name
            && self.role == other.role
    }
}

impl PartialEq for TeacherReference {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
    }
}

impl Eq for TeacherReference {}

impl std::hash::Hash for TeacherReference {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.username.hash(state);
    }
}

/// Snapshot of a [`Category`]. Equality is by `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReference {
    id: String,
    label: String,
    background_color: String,
    text_color: String,
    description: Option<String>,
}

impl CategoryReference {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn text_color(&self) -> &str {
        &self.text_color
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn same_snapshot(&self, other: &Self) -> bool {
        self.id == other.id
            && self.label == other.label
            && self.background_color == other.background_color
            && self.text_color == other.text_color
            && self.description == other.description
    }
}

impl PartialEq for CategoryReference {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CategoryReference {}

impl std::hash::Hash for CategoryReference {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

pub fn build_teacher_reference(teacher: &Teacher) -> Result<TeacherReference> {
    Ok(TeacherReference {
        username: require_non_blank(&teacher.username, "username")?,
        display_name: require_non_blank(&teacher.display_name, "displayName")?,
        role: teacher.role,
    })
}

pub fn build_category_reference(category: &Category) -> Result<CategoryReference> {
    let id = require_non_blank(&category.id, "id")?.to_lowercase();
    Ok(CategoryReference {
        id,
        label: require_non_blank(&category.label, "label")?,
        background_color: require_hex_color(&category.background_color, "backgroundColor")?,
        text_color: require_hex_color(&category.text_color, "textColor")?,
        description: category.description.clone(),
    })
}

impl TryFrom<&Teacher> for TeacherReference {
    type Error = ValidationError;

    fn try_from(teacher: &Teacher) -> Result<Self> {
        build_teacher_reference(teacher)
    }
}

impl TryFrom<&Category> for CategoryReference {
    type Error = ValidationError;

    fn try_from(category: &Category) -> Result<Self> {
        build_category_reference(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jose() -> Teacher {
        Teacher::new("jose", "Prof. Jose Chen", "secret", None).unwrap()
    }

    fn academic() -> Category {
        Category::new("Academic", "Acadêmico", "#007bff", "#ffffff", Some("Study".into())).unwrap()
    }

    #[test]
    fn teacher_reference_copies_display_fields() {
        let r = build_teacher_reference(&jose()).unwrap();
        assert_eq!(r.username(), "jose");
        assert_eq!(r.display_name(), "Prof. Jose Chen");
        assert_eq!(r.role(), Role::Teacher);
    }

    #[test]
    fn teacher_reference_never_carries_the_password() {
        let json = serde_json::to_value(build_teacher_reference(&jose()).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "username": "jose",
                "displayName": "Prof. Jose Chen",
                "role": "TEACHER",
            })
        );
    }

    #[test]
    fn corrupt_teacher_is_rejected() {
        let mut teacher = jose();
        teacher.display_name = "  ".into();
        assert_eq!(
            build_teacher_reference(&teacher).unwrap_err(),
            ValidationError::Empty { field: "displayName" }
        );
    }

    #[test]
    fn category_reference_copies_display_fields() {
        let r = build_category_reference(&academic()).unwrap();
        assert_eq!(r.id(), "academic");
        assert_eq!(r.label(), "Acadêmico");
        assert_eq!(r.background_color(), "#007bff");
        assert_eq!(r.text_color(), "#ffffff");
        assert_eq!(r.description(), Some("Study"));
    }

    #[test]
    fn corrupt_category_color_is_rejected() {
        let mut category = academic();
        category.text_color = "white".into();
        assert!(matches!(
            build_category_reference(&category),
            Err(ValidationError::InvalidColor { field: "textColor", .. })
        ));
    }

    #[test]
    fn equality_is_by_key() {
        let a = build_teacher_reference(&jose()).unwrap();
        let mut renamed = jose();
        renamed.display_name = "Jose Chen".into();
        let b = build_teacher_reference(&renamed).unwrap();
        assert_eq!(a, b);
        assert!(!a.same_snapshot(&b));
    }
}
