use serde::{Deserialize, Serialize};

use crate::catalog::dto::Dish;

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub dish_id: i64,
    pub planned_date: String,
    pub meal_slot: String,
}

#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanEntry {
    pub id: i64,
    pub dish_id: i64,
    pub planned_date: String,
    pub meal_slot: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanEntryWithDish {
    pub id: i64,
    pub dish_id: i64,
    pub planned_date: String,
    pub meal_slot: String,
    pub dish: Dish,
}
