use crate::error::ApiError;

use super::dto::{MacroGoals, ProfileUpdate, UserProfile};

// Calorie split across macros, converted to grams of the calorie goal.
const PROTEIN_CALORIE_SHARE: f64 = 0.30;
const CARBS_CALORIE_SHARE: f64 = 0.40;
const FATS_CALORIE_SHARE: f64 = 0.30;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

const BMR_FLOOR_KCAL: f64 = 1000.0;

pub fn activity_factor(level: &str) -> Option<f64> {
    match level {
        "sedentary" => Some(1.2),
        "light" => Some(1.375),
        "moderate" => Some(1.55),
        "active" => Some(1.725),
        _ => None,
    }
}

fn sex_term(sex: &str) -> Option<f64> {
    match sex {
        "male" => Some(5.0),
        "female" => Some(-161.0),
        _ => None,
    }
}

/// Mifflin-St Jeor resting expenditure in kcal/day, floored so implausible
/// inputs still yield a usable calorie goal.
pub fn bmr_kcal(weight_kg: f64, height_cm: f64, age: i64, sex: &str) -> Option<f64> {
    let term = sex_term(sex)?;
    let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64 + term;
    Some(bmr.max(BMR_FLOOR_KCAL))
}

/// Daily goals, recomputed from the stored profile on every read and never
/// cached: calorie goal = BMR scaled by the activity factor, macro goals as
/// fixed calorie shares of that goal expressed in grams.
pub fn derive_goals(profile: &UserProfile) -> Result<MacroGoals, ApiError> {
    let factor = activity_factor(&profile.activity_level).ok_or_else(|| {
        ApiError::Validation(format!(
            "unknown activity level '{}'",
            profile.activity_level
        ))
    })?;
    let bmr = bmr_kcal(profile.weight_kg, profile.height_cm, profile.age, &profile.sex)
        .ok_or_else(|| ApiError::Validation(format!("unknown sex '{}'", profile.sex)))?;

    let calories = (bmr * factor).round() as i64;
    Ok(MacroGoals {
        calories,
        protein_g: (calories as f64 * PROTEIN_CALORIE_SHARE / KCAL_PER_G_PROTEIN).round() as i64,
        carbs_g: (calories as f64 * CARBS_CALORIE_SHARE / KCAL_PER_G_CARBS).round() as i64,
        fats_g: (calories as f64 * FATS_CALORIE_SHARE / KCAL_PER_G_FAT).round() as i64,
    })
}

pub fn validate_update(update: &ProfileUpdate) -> Result<(), ApiError> {
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("name must not be empty".into()));
        }
    }
    if let Some(age) = update.age {
        if !(1..=130).contains(&age) {
            return Err(ApiError::Validation("age must be between 1 and 130".into()));
        }
    }
    if let Some(weight) = update.weight_kg {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ApiError::Validation("weight_kg must be positive".into()));
        }
    }
    if let Some(height) = update.height_cm {
        if !height.is_finite() || height <= 0.0 {
            return Err(ApiError::Validation("height_cm must be positive".into()));
        }
    }
    if let Some(sex) = &update.sex {
        if sex_term(sex).is_none() {
            return Err(ApiError::Validation(format!(
                "unknown sex '{sex}', expected male or female"
            )));
        }
    }
    if let Some(level) = &update.activity_level {
        if activity_factor(level).is_none() {
            return Err(ApiError::Validation(format!(
                "unknown activity level '{level}', expected sedentary, light, moderate or active"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(weight_kg: f64, height_cm: f64, age: i64, activity_level: &str) -> UserProfile {
        UserProfile {
            name: "User".into(),
            age,
            weight_kg,
            height_cm,
            sex: "male".into(),
            activity_level: activity_level.into(),
        }
    }

    #[test]
    fn default_profile_goals_are_exact() {
        // Seeded defaults: 70 kg, 175 cm, 25 y, male, moderate.
        let goals = derive_goals(&profile(70.0, 175.0, 25, "moderate")).unwrap();
        assert_eq!(goals.calories, 2594);
        assert_eq!(goals.protein_g, 195);
        assert_eq!(goals.carbs_g, 259);
        assert_eq!(goals.fats_g, 86);
    }

    #[test]
    fn pinned_profile_goals_are_exact() {
        let goals = derive_goals(&profile(80.0, 180.0, 30, "moderate")).unwrap();
        assert_eq!(goals.calories, 2759);
        assert_eq!(goals.protein_g, 207);
        assert_eq!(goals.carbs_g, 276);
        assert_eq!(goals.fats_g, 92);
    }

    #[test]
    fn female_term_lowers_the_bmr() {
        let male = bmr_kcal(70.0, 175.0, 25, "male").unwrap();
        let female = bmr_kcal(70.0, 175.0, 25, "female").unwrap();
        assert_eq!(male - female, 166.0);
    }

    #[test]
    fn goals_grow_with_activity_level() {
        let levels = ["sedentary", "light", "moderate", "active"];
        let mut previous: Option<MacroGoals> = None;
        for level in levels {
            let goals = derive_goals(&profile(70.0, 175.0, 25, level)).unwrap();
            if let Some(prev) = previous {
                assert!(goals.calories > prev.calories, "{level} should raise calories");
                assert!(goals.protein_g >= prev.protein_g);
                assert!(goals.carbs_g >= prev.carbs_g);
                assert!(goals.fats_g >= prev.fats_g);
            }
            previous = Some(goals);
        }
    }

    #[test]
    fn bmr_is_floored_for_implausible_inputs() {
        let bmr = bmr_kcal(20.0, 100.0, 90, "female").unwrap();
        assert_eq!(bmr, 1000.0);
    }

    #[test]
    fn unknown_sex_or_activity_is_rejected() {
        assert!(bmr_kcal(70.0, 175.0, 25, "other").is_none());
        assert!(activity_factor("extreme").is_none());

        let p = UserProfile {
            activity_level: "extreme".into(),
            ..profile(70.0, 175.0, 25, "moderate")
        };
        assert!(derive_goals(&p).is_err());
    }

    #[test]
    fn update_validation_checks_ranges_and_enums() {
        let ok = ProfileUpdate { weight_kg: Some(82.5), ..Default::default() };
        assert!(validate_update(&ok).is_ok());

        let bad_age = ProfileUpdate { age: Some(0), ..Default::default() };
        assert!(validate_update(&bad_age).is_err());

        let bad_weight = ProfileUpdate { weight_kg: Some(-3.0), ..Default::default() };
        assert!(validate_update(&bad_weight).is_err());

        let bad_sex = ProfileUpdate { sex: Some("Male".into()), ..Default::default() };
        assert!(validate_update(&bad_sex).is_err(), "values are lowercase literals");

        let bad_level = ProfileUpdate {
            activity_level: Some("couch".into()),
            ..Default::default()
        };
        assert!(validate_update(&bad_level).is_err());
    }
}
