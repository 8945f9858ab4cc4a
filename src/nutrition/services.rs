use crate::days::{DayRecord, Macros};

/// Effect of one macro write on a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroChange {
    pub previous: Macros,
    pub delta: Macros,
    pub total: Macros,
    pub previous_deficit: f64,
    pub deficit: f64,
}

/// Adds `delta` to the day's totals; eaten calories come off the deficit.
pub fn add_macros(rec: &mut DayRecord, delta: Macros) -> MacroChange {
    let previous = rec.macros;
    let previous_deficit = rec.deficit;

    rec.macros = Macros {
        protein: previous.protein + delta.protein,
        carbs: previous.carbs + delta.carbs,
        fats: previous.fats + delta.fats,
        calories: previous.calories + delta.calories,
    };
    rec.deficit -= delta.calories;

    MacroChange {
        previous,
        delta,
        total: rec.macros,
        previous_deficit,
        deficit: rec.deficit,
    }
}

/// Takes `delta` back off the day's totals. Totals never drop below zero;
/// the deficit gets the full calories back.
pub fn remove_macros(rec: &mut DayRecord, delta: Macros) -> MacroChange {
    let previous = rec.macros;
    let previous_deficit = rec.deficit;

    rec.macros = Macros {
        protein: (previous.protein - delta.protein).max(0.0),
        carbs: (previous.carbs - delta.carbs).max(0.0),
        fats: (previous.fats - delta.fats).max(0.0),
        calories: (previous.calories - delta.calories).max(0.0),
    };
    rec.deficit += delta.calories;

    MacroChange {
        previous,
        delta,
        total: rec.macros,
        previous_deficit,
        deficit: rec.deficit,
    }
}
