use tracing::{error, info, warn};

use super::repo::{archive_food, create_food, foods_by_ids, get_food};
use super::repo_types::{FoodItem, NewFood};
use crate::days::{day_key, repo::find_day, upsert_today, DayRecord};
use crate::error::AppError;
use crate::nutrition::services::{add_macros, remove_macros, MacroChange};
use crate::state::AppState;

/// Creates the food row and books it onto today's record.
///
/// If the day cannot be written the food row is archived again so it does
/// not linger unlinked.
pub async fn log_food(st: &AppState, food: NewFood) -> Result<(FoodItem, MacroChange), AppError> {
    let key = day_key(st.today());
    let item = create_food(st, &food, &key).await?;

    let food_id = item.id.clone();
    let macros = item.macros;
    let booked = upsert_today(st, move |rec| {
        rec.foods.push(food_id);
        Ok(add_macros(rec, macros))
    })
    .await;

    match booked {
        Ok(up) => {
            info!(food_id = %item.id, day = %key, calories = macros.calories, "food logged");
            Ok((item, up.outcome))
        }
        Err(e) => {
            if let Err(undo) = archive_food(st, &item.id).await {
                error!(food_id = %item.id, error = %undo, "failed to archive orphaned food");
            } else {
                warn!(food_id = %item.id, "day update failed; food archived");
            }
            Err(e)
        }
    }
}

/// Unlinks a food from today's record, takes its macros back off the totals
/// and archives the food row.
pub async fn delete_food(st: &AppState, food_id: &str) -> Result<(FoodItem, MacroChange), AppError> {
    let item = get_food(st, food_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("food {food_id} not found")))?;

    let macros = item.macros;
    let id = item.id.clone();
    let up = upsert_today(st, move |rec| {
        if !rec.foods.contains(&id) {
            return Err(AppError::not_found(format!("food {id} is not logged today")));
        }
        rec.foods.retain(|f| f != &id);
        Ok(remove_macros(rec, macros))
    })
    .await?;

    if let Err(e) = archive_food(st, food_id).await {
        warn!(food_id, error = %e, "food unlinked but not archived");
    }
    info!(food_id, day = %up.record.day, "food deleted");
    Ok((item, up.outcome))
}

/// Today's record (empty when not yet created) and its foods.
pub async fn today_with_foods(st: &AppState) -> Result<(DayRecord, Vec<FoodItem>), AppError> {
    let key = day_key(st.today());
    let day = find_day(st, &key).await?.unwrap_or_else(|| DayRecord {
        day: key,
        ..DayRecord::default()
    });
    let foods = foods_by_ids(st, &day.foods).await?;
    Ok((day, foods))
}
