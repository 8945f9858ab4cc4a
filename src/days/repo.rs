use anyhow::Context;

use super::repo_types::{props, DayRecord};
use crate::error::AppError;
use crate::state::AppState;

/// Looks up the record keyed `key`. More than one row for a key is refused.
pub async fn find_day(st: &AppState, key: &str) -> Result<Option<DayRecord>, AppError> {
    let rows = st
        .store
        .find_by_title(&st.config.daily_table, props::DAY, key)
        .await
        .with_context(|| format!("find day {key}"))?;
    match rows.as_slice() {
        [] => Ok(None),
        [row] => Ok(Some(DayRecord::from_row(row))),
        _ => {
            tracing::warn!(day = key, rows = rows.len(), "duplicate day records");
            Err(AppError::DuplicateDay(key.to_string()))
        }
    }
}

/// All records tagged with week `tag`.
pub async fn week_days(st: &AppState, tag: &str) -> anyhow::Result<Vec<DayRecord>> {
    let rows = st
        .store
        .find_by_tag(&st.config.daily_table, props::WEEK, tag)
        .await
        .with_context(|| format!("find week {tag}"))?;
    Ok(rows.iter().map(DayRecord::from_row).collect())
}

/// The week-tag vocabulary of the daily table.
pub async fn week_tags(st: &AppState) -> anyhow::Result<Vec<String>> {
    st.store
        .tag_options(&st.config.daily_table, props::WEEK)
        .await
        .context("list week tags")
}

pub async fn recent_days(st: &AppState, limit: usize) -> anyhow::Result<Vec<DayRecord>> {
    let rows = st
        .store
        .recent(&st.config.daily_table, limit)
        .await
        .context("list recent days")?;
    Ok(rows.iter().map(DayRecord::from_row).collect())
}
