use std::collections::BTreeMap;

use chrono::NaiveTime;
use mergington_shared::constants::DIFFICULTY_ALL_LEVELS;
use mergington_shared::types::parse_time;
use mergington_shared::{normalize_category_id, Activity, DifficultyLevel};
use mergington_store::{ActivityStore, CategoryStore, TeacherStore};
use tracing::{debug, info, warn};

use crate::engine::SyncEngine;
use crate::error::{ServiceError, ServiceResult, SyncError};
use crate::staleness::needs_sync;
use crate::views::ActivityView;

/// Optional narrowing for [`ActivityService::get_activities`]. Times are
/// `HH:MM` strings; a missing bound is open.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub category: Option<String>,
    /// A difficulty code or display name, or `"all"` for activities without
    /// a difficulty level.
    pub difficulty: Option<String>,
}

enum DifficultyFilter {
    Unrated,
    Level(DifficultyLevel),
}

impl DifficultyFilter {
    fn parse(value: &str) -> ServiceResult<Option<Self>> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        if value.eq_ignore_ascii_case(DIFFICULTY_ALL_LEVELS) {
            return Ok(Some(Self::Unrated));
        }
        DifficultyLevel::parse(value)
            .map(|level| Some(Self::Level(level)))
            .ok_or_else(|| ServiceError::InvalidArgument(format!("unknown difficulty level {value:?}")))
    }

    fn matches(&self, activity: &Activity) -> bool {
        match self {
            Self::Unrated => activity.difficulty_level().is_none(),
            Self::Level(level) => activity.difficulty_level() == Some(*level),
        }
    }
}

pub struct ActivityService<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S> ActivityService<'s, S>
where
    S: ActivityStore + TeacherStore + CategoryStore + ?Sized,
{
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Activities matching `filter`, refreshed where stale, keyed by name.
    pub fn get_activities(&self, filter: &ActivityFilter) -> ServiceResult<BTreeMap<String, ActivityView>> {
        let day = filter.day.as_deref().map(str::trim).filter(|d| !d.is_empty());
        let start = optional_time(filter.start_time.as_deref())?;
        let end = optional_time(filter.end_time.as_deref())?;
        let category = filter.category.as_deref().and_then(normalize_category_id);
        let difficulty = match filter.difficulty.as_deref() {
            Some(value) => DifficultyFilter::parse(value)?,
            None => None,
        };

        let candidates = match (day, start.is_some() || end.is_some()) {
            (Some(day), true) => self.store.list_activities_by_day_and_time_range(
                day,
                start.unwrap_or(NaiveTime::MIN),
                end.unwrap_or_else(end_of_day),
            )?,
            (Some(day), false) => self.store.list_activities_by_day(day)?,
            (None, true) => self
                .store
                .list_activities_by_time_range(start.unwrap_or(NaiveTime::MIN), end.unwrap_or_else(end_of_day))?,
            (None, false) => self.store.list_activities()?,
        };

        let mut views = BTreeMap::new();
        for candidate in candidates {
            let Some(activity) = self.refresh(candidate)? else {
                continue;
            };
            if category.as_deref().is_some_and(|id| activity.category_id() != Some(id)) {
                continue;
            }
            if difficulty.as_ref().is_some_and(|d| !d.matches(&activity)) {
                continue;
            }
            views.insert(activity.name().to_string(), ActivityView::from(&activity));
        }
        Ok(views)
    }

    pub fn get_activity(&self, name: &str) -> ServiceResult<Option<ActivityView>> {
        let Some(activity) = self.store.get_activity(name)? else {
            return Ok(None);
        };
        Ok(self.refresh(activity)?.as_ref().map(ActivityView::from))
    }

    /// Every distinct meeting day, sorted.
    pub fn available_days(&self) -> ServiceResult<Vec<String>> {
        Ok(self.store.list_activity_days()?)
    }

    /// Persist a new activity by key, then embed whatever its keys point at.
    pub fn create_activity(&self, activity: Activity) -> ServiceResult<ActivityView> {
        if self.store.activity_exists(activity.name())? {
            return Err(ServiceError::InvalidArgument(format!(
                "activity {:?} already exists",
                activity.name()
            )));
        }
        self.store.save_activity(&activity)?;
        info!(activity = %activity.name(), "created activity");

        let created = self
            .refresh(activity.clone())?
            .unwrap_or(activity);
        Ok(ActivityView::from(&created))
    }

    /// Resync `activity` if its embedded data is missing and return the
    /// stored result. `None` means it was deleted in the meantime.
    ///
    /// A source record that fails validation leaves the activity as it was;
    /// callers see the stale copy rather than an error.
    fn refresh(&self, activity: Activity) -> ServiceResult<Option<Activity>> {
        if !needs_sync(&activity) {
            return Ok(Some(activity));
        }
        debug!(activity = %activity.name(), "stale activity on read, resyncing");
        match SyncEngine::over(self.store).resync_activity(activity.name()) {
            Ok(_) => Ok(self.store.get_activity(activity.name())?),
            Err(SyncError::Validation(e)) => {
                warn!(activity = %activity.name(), error = %e, "resync skipped, serving stale copy");
                Ok(Some(activity))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn optional_time(value: Option<&str>) -> ServiceResult<Option<NaiveTime>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_time(v).map(Some).map_err(|source| ServiceError::InvalidTime {
            value: v.to_string(),
            source,
        }),
        None => Ok(None),
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}
