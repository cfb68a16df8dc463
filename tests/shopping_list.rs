use smartkitchen::catalog::repo::adjust_pantry;
use smartkitchen::plan;
use smartkitchen::shopping::services::shopping_list;

mod common;

#[tokio::test]
async fn demand_is_consolidated_and_net_of_pantry() {
    let state = common::test_state().await;
    let curry = common::seed_dish(
        &state,
        &common::recipe(
            "Curry",
            600,
            vec![("Onion", 2.0, "pcs", "Produce"), ("Rice", 200.0, "g", "Pantry")],
        ),
    )
    .await;
    let soup = common::seed_dish(
        &state,
        &common::recipe(
            "Soup",
            350,
            vec![("Onion", 3.0, "pcs", "Produce"), ("Carrot", 2.0, "pcs", "Produce")],
        ),
    )
    .await;

    plan::repo::upsert_entry(&state.db, curry.id, "2025-06-02", "Lunch")
        .await
        .unwrap();
    plan::repo::upsert_entry(&state.db, soup.id, "2025-06-02", "Dinner")
        .await
        .unwrap();

    // 5 onions needed, 1 on hand; rice fully covered.
    adjust_pantry(&state.db, "Onion", 1.0, "pcs").await.unwrap();
    adjust_pantry(&state.db, "Rice", 500.0, "g").await.unwrap();

    let list = shopping_list(&state.db, "2025-06-02", "2025-06-02")
        .await
        .unwrap();
    let names: Vec<&str> = list.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Carrot", "Onion"]);

    let onion = list.iter().find(|i| i.name == "Onion").unwrap();
    assert_eq!(onion.quantity, 4.0);
    assert_eq!(onion.unit, "pcs");
    assert_eq!(onion.category, "Produce");
}

#[tokio::test]
async fn only_entries_inside_the_window_count() {
    let state = common::test_state().await;
    let near = common::seed_dish(
        &state,
        &common::recipe("Near", 400, vec![("Tomato", 4.0, "pcs", "Produce")]),
    )
    .await;
    let far = common::seed_dish(
        &state,
        &common::recipe("Far", 400, vec![("Basil", 1.0, "bunch", "Produce")]),
    )
    .await;

    plan::repo::upsert_entry(&state.db, near.id, "2025-06-02", "Dinner")
        .await
        .unwrap();
    plan::repo::upsert_entry(&state.db, far.id, "2025-06-09", "Dinner")
        .await
        .unwrap();

    let list = shopping_list(&state.db, "2025-06-01", "2025-06-07")
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "Tomato");
}

#[tokio::test]
async fn the_same_dish_in_two_cells_doubles_its_demand() {
    let state = common::test_state().await;
    let dish = common::seed_dish(
        &state,
        &common::recipe("Omelette", 300, vec![("Egg", 3.0, "pcs", "Dairy")]),
    )
    .await;

    plan::repo::upsert_entry(&state.db, dish.id, "2025-06-02", "Breakfast")
        .await
        .unwrap();
    plan::repo::upsert_entry(&state.db, dish.id, "2025-06-03", "Breakfast")
        .await
        .unwrap();

    let list = shopping_list(&state.db, "2025-06-02", "2025-06-03")
        .await
        .unwrap();
    assert_eq!(list[0].quantity, 6.0);
}

#[tokio::test]
async fn generating_the_list_does_not_consume_pantry() {
    let state = common::test_state().await;
    let dish = common::seed_dish(
        &state,
        &common::recipe("Salad", 250, vec![("Lettuce", 2.0, "heads", "Produce")]),
    )
    .await;
    plan::repo::upsert_entry(&state.db, dish.id, "2025-06-02", "Lunch")
        .await
        .unwrap();
    adjust_pantry(&state.db, "Lettuce", 0.5, "heads").await.unwrap();

    let first = shopping_list(&state.db, "2025-06-02", "2025-06-02")
        .await
        .unwrap();
    let second = shopping_list(&state.db, "2025-06-02", "2025-06-02")
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0].quantity, 1.5);
}
