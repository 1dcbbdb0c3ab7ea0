//! Read-path check for activities whose embedded data is missing.

use mergington_shared::Activity;

/// Whether `activity` should be resynced before it is handed to a caller.
///
/// Only catches embedded data that is absent while its key is present: a
/// category id with no category snapshot, or assigned usernames with no
/// teacher snapshots at all. A snapshot that exists but is out of date is not
/// detected here; teacher and category saves push those changes, and
/// [`SyncEngine::resync_all`](crate::SyncEngine::resync_all) repairs the rest.
pub fn needs_sync(activity: &Activity) -> bool {
    let category_missing = activity.category_id().is_some() && activity.category().is_none();
    let teachers_missing = !activity.assigned_teacher_usernames().is_empty()
        && activity.assigned_teachers().is_empty();
    category_missing || teachers_missing
}
