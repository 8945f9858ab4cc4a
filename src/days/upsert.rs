use anyhow::Context;
use tracing::info;

use super::key::day_key;
use super::repo::{find_day, week_tags};
use super::repo_types::DayRecord;
use super::week::match_week_tag;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug)]
pub struct Upserted<T> {
    /// The record as written.
    pub record: DayRecord,
    pub created: bool,
    pub outcome: T,
}

/// Locates or creates today's record, lets `apply` merge into it, and writes
/// the result back.
///
/// Writes for one day are serialized through [`DayLocks`](super::locks::DayLocks).
/// When `apply` fails nothing is written.
pub async fn upsert_today<T, F>(st: &AppState, apply: F) -> Result<Upserted<T>, AppError>
where
    F: FnOnce(&mut DayRecord) -> Result<T, AppError> + Send,
{
    let key = day_key(st.today());
    let _guard = st.locks.acquire(&key).await;

    let (before, created) = match find_day(st, &key).await? {
        Some(existing) => (existing, false),
        None => {
            let tags = week_tags(st).await?;
            let week = match_week_tag(st.today(), &tags);
            (DayRecord::fresh(key.clone(), week, st.config.calorie_budget), true)
        }
    };

    let mut record = before.clone();
    let outcome = apply(&mut record)?;

    let table = &st.config.daily_table;
    let row = match &record.id {
        None => st
            .store
            .create(table, record.to_properties())
            .await
            .with_context(|| format!("create day {key}"))?,
        Some(id) => st
            .store
            .update(id, record.changes_since(&before))
            .await
            .with_context(|| format!("update day {key}"))?,
    };
    record.id = Some(row.id);

    info!(day = %key, created, "day record written");
    Ok(Upserted {
        record,
        created,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::days::repo_types::props;
    use crate::store::{MemoryStore, Properties, PropertyValue};
    use std::sync::Arc;
    use time::macros::date;

    fn store_with_weeks() -> Arc<MemoryStore> {
        Arc::new(
            MemoryStore::new().with_tag_options("daily", props::WEEK, &["[MARCH] 3-9", "[MARCH & APR] 31-6"]),
        )
    }

    #[tokio::test]
    async fn creates_missing_day_with_week_tag() {
        let store = store_with_weeks();
        let st = AppState::fake_with(Arc::clone(&store), date!(2024 - 03 - 05));

        let up = upsert_today(&st, |rec| {
            rec.steps += 100.0;
            Ok(())
        })
        .await
        .unwrap();

        assert!(up.created);
        let rows = store.rows("daily");
        assert_eq!(rows.len(), 1);
        let rec = DayRecord::from_row(&rows[0]);
        assert_eq!(rec.day, "2024 / 03 / 05");
        assert_eq!(rec.week, vec!["[MARCH] 3-9".to_string()]);
        assert_eq!(rec.steps, 100.0);
        assert_eq!(rec.deficit, 1800.0);
    }

    #[tokio::test]
    async fn created_record_is_found_again_by_key() {
        let st = AppState::fake(date!(2024 - 03 - 05));

        let up = upsert_today(&st, |rec| {
            rec.steps += 10.0;
            Ok(())
        })
        .await
        .unwrap();

        let found = find_day(&st, "2024 / 03 / 05").await.unwrap().unwrap();
        assert_eq!(found.id, up.record.id);
        assert!(found.week.is_empty());
        assert_eq!(found.steps, 10.0);
        assert_eq!(found.deficit, 1800.0);
    }

    #[tokio::test]
    async fn unmatched_day_gets_empty_week_set() {
        let store = store_with_weeks();
        let st = AppState::fake_with(Arc::clone(&store), date!(2024 - 03 - 20));

        upsert_today(&st, |_| Ok(())).await.unwrap();

        let rec = DayRecord::from_row(&store.rows("daily")[0]);
        assert!(rec.week.is_empty());
    }

    #[tokio::test]
    async fn updates_existing_day_in_place() {
        let store = store_with_weeks();
        let st = AppState::fake_with(Arc::clone(&store), date!(2024 - 03 - 05));

        upsert_today(&st, |rec| {
            rec.steps += 100.0;
            Ok(())
        })
        .await
        .unwrap();
        let up = upsert_today(&st, |rec| {
            rec.steps += 50.0;
            Ok(rec.steps)
        })
        .await
        .unwrap();

        assert!(!up.created);
        assert_eq!(up.outcome, 150.0);
        assert_eq!(store.rows("daily").len(), 1);
        assert_eq!(DayRecord::from_row(&store.rows("daily")[0]).steps, 150.0);
    }

    #[tokio::test]
    async fn failed_apply_writes_nothing() {
        let store = store_with_weeks();
        let st = AppState::fake_with(Arc::clone(&store), date!(2024 - 03 - 05));

        let err = upsert_today(&st, |_| -> Result<(), AppError> {
            Err(AppError::not_found("nope"))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.rows("daily").is_empty());
    }

    #[tokio::test]
    async fn duplicate_rows_for_a_day_are_refused() {
        let store = store_with_weeks();
        let title = Properties::from([(
            props::DAY.to_string(),
            PropertyValue::Title("2024 / 03 / 05".into()),
        )]);
        store.seed("daily", title.clone());
        store.seed("daily", title);
        let st = AppState::fake_with(Arc::clone(&store), date!(2024 - 03 - 05));

        let err = upsert_today(&st, |rec| {
            rec.steps += 1.0;
            Ok(())
        })
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::DuplicateDay(_)));
        assert!(store.rows("daily").iter().all(|r| r.number(props::STEPS) == 0.0));
    }

    #[tokio::test]
    async fn concurrent_writes_to_an_empty_day_both_persist() {
        let store = store_with_weeks();
        let st = AppState::fake_with(Arc::clone(&store), date!(2024 - 03 - 05));

        let tasks: Vec<_> = (0..2)
            .map(|_| {
                let st = st.clone();
                tokio::spawn(async move {
                    upsert_today(&st, |rec| {
                        rec.steps += 1000.0;
                        Ok(())
                    })
                    .await
                })
            })
            .collect();
        for t in tasks {
            t.await.unwrap().unwrap();
        }

        let rows = store.rows("daily");
        assert_eq!(rows.len(), 1);
        assert_eq!(DayRecord::from_row(&rows[0]).steps, 2000.0);
    }
}
