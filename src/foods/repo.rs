use anyhow::Context;

use super::repo_types::{FoodItem, NewFood};
use crate::state::AppState;

pub async fn create_food(st: &AppState, food: &NewFood, day: &str) -> anyhow::Result<FoodItem> {
    let row = st
        .store
        .create(&st.config.food_table, food.to_properties(day))
        .await
        .with_context(|| format!("create food {}", food.name))?;
    Ok(FoodItem::from(&row))
}

pub async fn get_food(st: &AppState, food_id: &str) -> anyhow::Result<Option<FoodItem>> {
    let row = st
        .store
        .get(food_id)
        .await
        .with_context(|| format!("get food {food_id}"))?;
    Ok(row.as_ref().map(FoodItem::from))
}

/// Loads foods in `ids` order, skipping ids whose rows are gone.
pub async fn foods_by_ids(st: &AppState, ids: &[String]) -> anyhow::Result<Vec<FoodItem>> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(food) = get_food(st, id).await? {
            out.push(food);
        }
    }
    Ok(out)
}

pub async fn archive_food(st: &AppState, food_id: &str) -> anyhow::Result<()> {
    st.store
        .archive(food_id)
        .await
        .with_context(|| format!("archive food {food_id}"))
}
