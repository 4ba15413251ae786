use serde_json::{Value, json};
use theatrum_core::storage::keys;
use theatrum_core::{
    BookingEngine, BookingError, BookingStage, BookingStore, CheckoutSummary, ConcessionCounter,
    ConcessionOrder, KeyValueStore, MemoryStore, Money, SeatSelection, UpsellStage, menu,
    remove_concession, remove_upsell,
};

fn stored_json(kv: &MemoryStore, key: &str) -> Value {
    serde_json::from_str(&kv.get_item(key).unwrap()).unwrap()
}

fn independent_total(kv: &MemoryStore) -> i64 {
    let store = BookingStore::new(kv);
    let unit = store
        .ticket_unit_price()
        .unwrap_or(Money::from_dollars(12.0))
        .cents();
    let tickets = i64::from(store.ticket_qty()) * unit;
    let food: i64 = store
        .concession_order()
        .iter()
        .map(|(_, item)| i64::from(item.quantity) * item.unit_price.cents())
        .sum();
    let upsells: i64 = store.upsell_cart().entries().iter().map(|e| e.price.cents()).sum();
    tickets + food + upsells
}

#[test]
fn forty_dollar_booking() {
    let kv = MemoryStore::new();
    let engine = BookingEngine::new(kv.clone());

    let mut quantity = engine.quantity_stage();
    quantity.increment();
    quantity.proceed();

    let mut seats = engine.seat_selection();
    seats.toggle("1A").unwrap();
    seats.toggle("1B").unwrap();
    assert_eq!(seats.confirm(engine.booking()).unwrap(), vec!["1A", "1B"]);

    let popcorn = menu()
        .into_iter()
        .find(|m| m.name == "Classic Popcorn")
        .unwrap();
    for _ in 0..2 {
        let mut order = engine.concessions();
        let mut counter = ConcessionCounter::default();
        counter.increment();
        counter.add_to(&mut order, &popcorn, None).unwrap();
        assert_eq!(counter.count(), 0);
        engine.booking().set_concession_order(&order);
    }
    assert_eq!(
        stored_json(&kv, keys::FOOD_ORDER),
        json!({"Classic Popcorn||Default": {"name": "Classic Popcorn", "size": null, "qty": 2, "price": 6}})
    );

    let mut upsells = engine.upsell_stage();
    assert_eq!(upsells.base_total(), Money::from_dollars(36.0));
    engine.add_upsell(&mut upsells, "cookie").unwrap();

    let summary = engine.checkout();
    assert_eq!(summary.grand_total().to_string(), "$40.00");
    assert_eq!(summary.grand_total().cents(), independent_total(&kv));
}

#[test]
fn legacy_bare_number_is_migrated_in_place() {
    let kv = MemoryStore::with_entries([(keys::FOOD_ORDER, r#"{"Nachos||Large": 3}"#)]);
    let order = BookingStore::new(&kv).concession_order();
    let item = order.get("Nachos||Large").unwrap();
    assert_eq!(item.name, "Nachos");
    assert_eq!(item.size.as_deref(), Some("Large"));
    assert_eq!(item.quantity, 3);
    assert!(item.unit_price.is_zero());
    assert_eq!(
        stored_json(&kv, keys::FOOD_ORDER),
        json!({"Nachos||Large": {"name": "Nachos", "size": "Large", "qty": 3, "price": 0}})
    );
}

#[test]
fn every_legacy_shape_normalizes_to_non_negative_values() {
    let shapes = [
        json!(3),
        json!(-2),
        json!(2.7),
        json!("5"),
        json!("abc"),
        json!(null),
        json!(true),
        json!([1, 2]),
        json!({}),
        json!({"qty": "-1", "price": -4}),
        json!({"qty": 2, "price": "7.25"}),
        json!({"name": "", "qty": 1}),
        json!({"name": "Soda", "size": "Default", "qty": 1, "price": 3}),
    ];
    for shape in shapes {
        let raw = json!({ "Soda||Small": shape });
        let order = ConcessionOrder::normalize(&raw);
        for (_, item) in order.iter() {
            assert!(item.unit_price.cents() >= 0, "{shape}");
            assert!(!item.name.is_empty(), "{shape}");
        }
    }
}

#[test]
fn normalization_is_idempotent() {
    let raw = json!({
        "Nachos||Large": 3,
        "Nachos||Default": {"qty": "2", "price": 9},
        "Soda": "1",
        "Popcorn||Default": {"name": "Popcorn", "size": null, "qty": 1, "price": 6},
        "popcorn-legacy": {"name": "Popcorn", "qty": 2, "price": 6.5}
    });
    let once = ConcessionOrder::normalize(&raw);
    let twice = ConcessionOrder::normalize(&serde_json::to_value(&once).unwrap());
    assert_eq!(once, twice);
    let popcorn = once.get("Popcorn||Default").unwrap();
    assert_eq!(popcorn.quantity, 3);
}

#[test]
fn repeated_adds_accumulate_with_latest_price_and_sizes_stay_apart() {
    let mut order = ConcessionOrder::new();
    order
        .add("Fountain Drink", Some("Small"), 2, Money::from_dollars(4.0))
        .unwrap();
    order
        .add("Fountain Drink", Some("Small"), 3, Money::from_dollars(4.5))
        .unwrap();
    order
        .add("Fountain Drink", Some("Large"), 1, Money::from_dollars(6.0))
        .unwrap();
    let small = order.get("Fountain Drink||Small").unwrap();
    assert_eq!(small.quantity, 5);
    assert_eq!(small.unit_price, Money::from_dollars(4.5));
    assert_eq!(order.len(), 2);
    assert_eq!(
        order.add("Fountain Drink", None, 0, Money::ZERO).unwrap_err(),
        BookingError::EmptyConcessionQuantity
    );
}

#[test]
fn seat_confirmation_only_persists_exact_counts() {
    let kv = MemoryStore::with_entries([(keys::TICKET_QTY, "3")]);
    let store = BookingStore::new(&kv);
    let mut seats = SeatSelection::load(store);
    for label in ["2A", "2B"] {
        seats.toggle(label).unwrap();
    }
    assert!(seats.confirm(store).is_err());
    assert!(kv.get_item(keys::SELECTED_SEATS).is_none());
    seats.toggle("2C").unwrap();
    assert_eq!(seats.confirm(store).unwrap(), vec!["2A", "2B", "2C"]);
}

#[test]
fn checkout_removals_and_finalize_reset() {
    let kv = MemoryStore::with_entries([
        (keys::TICKET_QTY, "1"),
        (keys::TICKET_UNIT_PRICE, "10"),
        (keys::SELECTED_SEATS, r#"["4F"]"#),
        (
            keys::FOOD_ORDER,
            r#"{"Loaded Nachos||Default":{"name":"Loaded Nachos","size":null,"qty":1,"price":9},"Fountain Drink||Small":{"name":"Fountain Drink","size":"Small","qty":2,"price":4}}"#,
        ),
        (
            keys::UPSELL_CART,
            r#"[{"item":"candy","price":3.5},{"item":"cookie","price":4},{"item":"candy","price":3.5}]"#,
        ),
    ]);
    let store = BookingStore::new(&kv);
    assert_eq!(CheckoutSummary::load(store).grand_total().cents(), independent_total(&kv));

    assert!(remove_concession(store, "Loaded Nachos||Default"));
    assert_eq!(remove_upsell(store, "candy"), 2);
    let summary = CheckoutSummary::load(store);
    assert_eq!(summary.concessions.len(), 1);
    assert_eq!(summary.upsells.len(), 1);
    assert_eq!(summary.grand_total(), Money::from_dollars(22.0));
    assert_eq!(summary.grand_total().cents(), independent_total(&kv));

    let outcome = theatrum_core::finalize(store);
    assert_eq!(outcome.next, BookingStage::Home);
    assert!(kv.is_empty());

    let fresh = CheckoutSummary::load(store);
    assert_eq!(fresh.ticket_qty, 0);
    assert!(fresh.concessions.is_empty());
    assert!(fresh.upsells.is_empty());
    assert_eq!(SeatSelection::load(store).desired(), 1);
    assert_eq!(UpsellStage::load(store).base_total(), Money::ZERO);
}
