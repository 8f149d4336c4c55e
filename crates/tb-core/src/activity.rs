//! Activities - the project/activity pairings time is booked against.

use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// A named project+activity pairing a user books time against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier, assigned by the store. Zero until stored.
    #[serde(default)]
    pub id: i64,

    /// Owner of the activity.
    pub user: String,

    /// Display name of the project.
    pub project_name: String,

    /// Short identifier of the project, e.g. a cost center code.
    pub project_id: String,

    /// Display name of the activity within the project.
    pub activity_name: String,

    /// Short identifier of the activity.
    pub activity_id: String,

    /// Retired activities are hidden from pickers; existing bookings keep
    /// referring to them.
    #[serde(default)]
    pub hidden: bool,
}

impl Activity {
    /// Creates a new activity after validation. All fields must be non-empty.
    pub fn new(
        user: impl Into<String>,
        project_name: impl Into<String>,
        project_id: impl Into<String>,
        activity_name: impl Into<String>,
        activity_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let activity = Self {
            id: 0,
            user: user.into(),
            project_name: project_name.into(),
            project_id: project_id.into(),
            activity_name: activity_name.into(),
            activity_id: activity_id.into(),
            hidden: false,
        };
        for (value, field) in [
            (&activity.user, "user"),
            (&activity.project_name, "project name"),
            (&activity.project_id, "project id"),
            (&activity.activity_name, "activity name"),
            (&activity.activity_id, "activity id"),
        ] {
            if value.is_empty() {
                return Err(ValidationError::Empty { field });
            }
        }
        Ok(activity)
    }
}
