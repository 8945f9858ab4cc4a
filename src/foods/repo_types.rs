use serde::Serialize;

use crate::days::Macros;
use crate::store::{Properties, PropertyValue, Row};

/// Property names of the food table.
pub mod props {
    pub const NAME: &str = "Name";
    pub const PROTEIN: &str = "Protein";
    pub const CARBS: &str = "Carbs";
    pub const FATS: &str = "Fats";
    pub const CALORIES: &str = "Calories";
    pub const SERVING_SIZE: &str = "Serving Size";
    pub const SERVING_UNIT: &str = "Serving Unit";
    pub const CREATED: &str = "Created";
}

/// A logged food, as stored in the food table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub macros: Macros,
    pub serving_size: Option<f64>,
    pub serving_unit: Option<String>,
    /// Day key the food was logged on.
    pub created: String,
}

/// A food about to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFood {
    pub name: String,
    pub macros: Macros,
    pub serving_size: Option<f64>,
    pub serving_unit: Option<String>,
}

impl NewFood {
    pub fn to_properties(&self, created: &str) -> Properties {
        use props::*;
        use PropertyValue::*;

        let mut out: Properties = [
            (NAME, Title(self.name.clone())),
            (PROTEIN, Number(Some(self.macros.protein))),
            (CARBS, Number(Some(self.macros.carbs))),
            (FATS, Number(Some(self.macros.fats))),
            (CALORIES, Number(Some(self.macros.calories))),
            (CREATED, RichText(created.to_string())),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
        if let Some(size) = self.serving_size {
            out.insert(SERVING_SIZE.into(), Number(Some(size)));
        }
        if let Some(unit) = &self.serving_unit {
            out.insert(SERVING_UNIT.into(), RichText(unit.clone()));
        }
        out
    }
}

impl From<&Row> for FoodItem {
    fn from(row: &Row) -> Self {
        use props::*;
        Self {
            id: row.id.clone(),
            name: row.text(NAME),
            macros: Macros {
                protein: row.number(PROTEIN),
                carbs: row.number(CARBS),
                fats: row.number(FATS),
                calories: row.number(CALORIES),
            },
            serving_size: row.opt_number(SERVING_SIZE),
            serving_unit: row.opt_text(SERVING_UNIT),
            created: row.text(CREATED),
        }
    }
}
