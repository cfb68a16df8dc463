use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use smartkitchen::ai::testing::{FailingRecommender, SlowExtractor, SlowRecommender};
use smartkitchen::app::build_app;
use smartkitchen::config::{AiConfig, AppConfig};
use smartkitchen::{plan, AppState};

mod common;

async fn request(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn root_reports_platform_identity() {
    let app = build_app(common::test_state().await);
    let (status, body) = request(app, "GET", "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Healthy");
    assert_eq!(body["platform"], "Smart Kitchen OS");
}

#[tokio::test]
async fn liveness_endpoint_answers() {
    let app = build_app(common::test_state().await);
    let (status, body) = request(app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up and running");
}

#[tokio::test]
async fn default_profile_comes_with_derived_goals() {
    let app = build_app(common::test_state().await);
    let (status, body) = request(app, "GET", "/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 25);
    assert_eq!(body["goals"]["calories"], 2594);
    assert_eq!(body["goals"]["protein_g"], 195);
    assert_eq!(body["goals"]["carbs_g"], 259);
    assert_eq!(body["goals"]["fats_g"], 86);
}

#[tokio::test]
async fn profile_update_re_derives_goals_and_validates() {
    let state = common::test_state().await;

    let (status, body) = send_json(
        build_app(state.clone()),
        "PUT",
        "/profile",
        json!({"age": 30, "weight_kg": 80.0, "height_cm": 180.0}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weight_kg"], 80.0);
    assert_eq!(body["goals"]["calories"], 2759);

    let (status, body) = send_json(
        build_app(state),
        "PUT",
        "/profile",
        json!({"sex": "Martian"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn extract_endpoint_saves_and_returns_the_dish() {
    let state = common::test_state().await;
    let (status, body) = request(
        build_app(state.clone()),
        "POST",
        "/extract-recipe?text_input=Shakshuka",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Shakshuka");
    assert_eq!(body["nutrition"]["calories"], 500);

    let (status, listing) = request(build_app(state), "GET", "/recipes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn cms_edit_wholly_replaces_the_dish() {
    let state = common::test_state().await;
    let dish = common::seed_dish(
        &state,
        &common::recipe(
            "Chili",
            550,
            vec![("Beans", 400.0, "g", "Pantry"), ("Beef", 250.0, "g", "Meat")],
        ),
    )
    .await;

    let (status, body) = send_json(
        build_app(state.clone()),
        "PUT",
        &format!("/cms/recipes/{}", dish.id),
        json!({
            "name": "Veggie Chili",
            "cuisine": "Tex-Mex",
            "meal_types": ["Lunch"],
            "ingredients": [{"name": "Beans", "quantity": 500.0, "unit": "g", "category": "Pantry"}],
            "prep_steps": ["Simmer everything"],
            "nutrition": {"calories": 420, "protein": "18g", "carbs": "60g", "fats": "8g"}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Veggie Chili");

    // Nothing of the old payload survives the replace.
    let (_, stored) = request(build_app(state), "GET", &format!("/recipes/{}", dish.id)).await;
    assert_eq!(stored["cuisine"], "Tex-Mex");
    assert_eq!(stored["ingredients"].as_array().unwrap().len(), 1);
    assert_eq!(stored["prep_steps"], json!(["Simmer everything"]));
    assert_eq!(stored["nutrition"]["calories"], 420);
    assert_eq!(stored["nutrition"]["protein_g"], 18.0);
}

#[tokio::test]
async fn regenerate_discards_manual_edits() {
    let state = common::test_state().await;
    let dish = common::seed_dish(
        &state,
        &common::recipe("Shakshuka", 500, vec![("Egg", 3.0, "pcs", "Dairy")]),
    )
    .await;

    // Manual edit first.
    let (status, _) = send_json(
        build_app(state.clone()),
        "PUT",
        &format!("/cms/recipes/{}", dish.id),
        json!({
            "name": "Shakshuka",
            "description": "My tweaked version",
            "ingredients": [{"name": "Egg", "quantity": 4.0, "unit": "pcs", "category": "Dairy"}],
            "prep_steps": ["Poach the eggs gently"],
            "nutrition": {"calories": 999, "protein": "50g", "carbs": "1g", "fats": "1g"}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Regenerate re-extracts from the stored name and overwrites the edit.
    let (status, body) = request(
        build_app(state.clone()),
        "POST",
        &format!("/cms/recipes/{}/regenerate", dish.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Shakshuka");
    assert_eq!(body["nutrition"]["calories"], 500, "stub extractor payload wins");
    assert_eq!(body["description"], "Stub recipe for Shakshuka");
    assert_eq!(body["prep_steps"], json!(["Prepare", "Serve"]));

    let (status, body) = request(build_app(state), "POST", "/cms/recipes/999/regenerate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn unknown_recipe_is_a_404() {
    let app = build_app(common::test_state().await);
    let (status, body) = request(app, "GET", "/recipes/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn scheduling_validates_date_slot_and_dish() {
    let state = common::test_state().await;

    let (status, body) = send_json(
        build_app(state.clone()),
        "POST",
        "/meal-planner",
        json!({"dish_id": 1, "planned_date": "2025-6-1", "meal_slot": "Dinner"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");

    let (status, body) = send_json(
        build_app(state.clone()),
        "POST",
        "/meal-planner",
        json!({"dish_id": 1, "planned_date": "2025-06-01", "meal_slot": "brunch"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");

    let (status, body) = send_json(
        build_app(state),
        "POST",
        "/meal-planner",
        json!({"dish_id": 999, "planned_date": "2025-06-01", "meal_slot": "Dinner"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn planned_dish_delete_conflicts_until_unscheduled() {
    let state = common::test_state().await;
    let dish = common::seed_dish(
        &state,
        &common::recipe("Tagine", 640, vec![("Lamb", 300.0, "g", "Meat")]),
    )
    .await;
    plan::repo::upsert_entry(&state.db, dish.id, "2025-06-02", "Dinner")
        .await
        .unwrap();

    let (status, body) = request(
        build_app(state.clone()),
        "DELETE",
        &format!("/cms/recipe/{}", dish.id),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let entry = plan::repo::find_slot(&state.db, "2025-06-02", "Dinner")
        .await
        .unwrap()
        .unwrap();
    let (status, _) = request(
        build_app(state.clone()),
        "DELETE",
        &format!("/meal-planner/{}", entry.id),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(
        build_app(state),
        "DELETE",
        &format!("/cms/recipe/{}", dish.id),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn pantry_purchase_round_trips_through_the_api() {
    let state = common::test_state().await;
    let (status, body) = request(
        build_app(state.clone()),
        "POST",
        "/pantry/purchase?item_name=Milk&quantity=2.0&unit=L",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 2.0);
    assert_eq!(body["low_stock"], false);

    let (_, items) = request(build_app(state), "GET", "/pantry").await;
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["name"], "Milk");
}

#[tokio::test]
async fn date_bounds_must_come_paired() {
    let state = common::test_state().await;

    let (status, body) = request(
        build_app(state.clone()),
        "GET",
        "/shopping-list?date_from=2025-06-01",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");

    let (status, body) = request(
        build_app(state),
        "GET",
        "/meal-planner?date_to=2025-06-07",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn health_stats_answers_per_date() {
    let state = common::test_state().await;

    let (status, body) = request(
        build_app(state.clone()),
        "GET",
        "/health-stats/2025-06-02",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2025-06-02");
    assert_eq!(body["remaining_calories"], 2594);

    let (status, body) = request(build_app(state), "GET", "/health-stats/2025-6-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn recommendation_round_trips_into_an_import() {
    let state = common::test_state().await;
    let (status, body) = request(
        build_app(state.clone()),
        "GET",
        "/recommend-me?slot=Dinner&date=2025-06-02",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let suggestion = body["recommendation"].as_str().unwrap().to_string();
    assert_eq!(suggestion, "Grilled Salmon: high protein, low carb");

    let (status, outcome) = send_json(
        build_app(state),
        "POST",
        "/meal-planner/import",
        json!({
            "suggestion": suggestion,
            "planned_date": "2025-06-02",
            "meal_slot": "Dinner"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["dish"]["name"], "Grilled Salmon");
    assert_eq!(outcome["entry"]["meal_slot"], "Dinner");
    assert_eq!(outcome["stats"]["remaining_calories"], 2594 - 500);
}

#[tokio::test]
async fn unresponsive_collaborators_map_to_gateway_timeout() {
    let base = common::test_state().await;
    // Zero budget: the deadline elapses before a slow collaborator answers.
    let config = Arc::new(AppConfig {
        database_url: base.config.database_url.clone(),
        ai: AiConfig {
            timeout_secs: 0,
            ..base.config.ai.clone()
        },
    });
    let state = AppState::from_parts(
        base.db.clone(),
        config,
        Arc::new(SlowExtractor),
        Arc::new(SlowRecommender),
    );

    let (status, body) = request(
        build_app(state.clone()),
        "GET",
        "/recommend-me?slot=Dinner&date=2025-06-02",
    )
    .await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "upstream_timeout");
    assert_eq!(body["message"], "recommendation did not answer in time");

    let (status, body) = request(
        build_app(state.clone()),
        "POST",
        "/extract-recipe?text_input=Shakshuka",
    )
    .await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "upstream_timeout");
    assert_eq!(body["message"], "extraction did not answer in time");

    // Nothing was persisted on the timed-out extraction.
    let (_, listing) = request(build_app(state), "GET", "/recipes").await;
    assert!(listing.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn recommendation_failure_maps_to_bad_gateway() {
    let base = common::test_state().await;
    let state = AppState::from_parts(
        base.db.clone(),
        base.config.clone(),
        base.extractor.clone(),
        Arc::new(FailingRecommender),
    );

    let (status, body) = request(
        build_app(state),
        "GET",
        "/recommend-me?slot=Dinner&date=2025-06-02",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "recommendation_failed");
}
