//! Booking sessions replayed against an in-memory store, each followed by
//! the invariant checks the site relies on.
use anyhow::{Context, Result, anyhow, bail, ensure};
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use serde_json::Value;

use theatrum_core::tickets::fallback_unit_price;
use theatrum_core::{
    BookingEngine, BookingError, BookingStage, BookingStore, CheckoutSummary, ConcessionCounter,
    ConcessionOrder, KeyValueStore, MemoryStore, Money, QuantityStage, SeatCell, SeatSelection,
    ToggleOutcome, UpsellStage, canonical_key, keys, menu, parse_price, parse_qty,
    remove_concession, remove_upsell, ticket_types, upsell_offers,
};

/// One logic check. The generator is seeded per iteration.
pub type BookingCheck = fn(&mut ChaCha20Rng) -> Result<()>;

/// Grand total recomputed straight from the stored JSON, without going
/// through the checkout summary.
pub fn independent_total(kv: &dyn KeyValueStore) -> Result<Money> {
    let qty = kv.get_item(keys::TICKET_QTY).map_or(0, |t| parse_qty(&t));
    let unit = kv
        .get_item(keys::TICKET_UNIT_PRICE)
        .map(|t| parse_price(&t))
        .filter(|p| !p.is_zero())
        .unwrap_or_else(fallback_unit_price);

    let mut total = unit * qty;
    if let Some(raw) = kv.get_item(keys::FOOD_ORDER) {
        let order: Value = serde_json::from_str(&raw).context("stored concession order")?;
        let entries = order
            .as_object()
            .ok_or_else(|| anyhow!("concession order is not an object after read-repair"))?;
        for (key, entry) in entries {
            let qty = entry
                .get("qty")
                .and_then(Value::as_u64)
                .ok_or_else(|| anyhow!("{key} has no integer qty"))?;
            let price = entry.get("price").and_then(Value::as_f64).unwrap_or(0.0);
            total += Money::from_dollars(price) * u32::try_from(qty)?;
        }
    }
    if let Some(raw) = kv.get_item(keys::UPSELL_CART) {
        let cart: Vec<Value> = serde_json::from_str(&raw).context("stored upsell cart")?;
        for entry in cart {
            let price = entry.get("price").and_then(Value::as_f64).unwrap_or(0.0);
            total += Money::from_dollars(price);
        }
    }
    Ok(total)
}

/// Checkout total must match the independent recompute for whatever is
/// stored right now.
pub fn assert_total_identity(kv: &dyn KeyValueStore) -> Result<Money> {
    let summary = CheckoutSummary::load(BookingStore::new(kv));
    let expected = independent_total(kv)?;
    ensure!(
        summary.grand_total() == expected,
        "checkout shows {} but stored state adds up to {expected}",
        summary.grand_total()
    );
    Ok(expected)
}

/// Reading the order twice must not change it, in memory or in storage.
pub fn assert_normalization_idempotent(kv: &dyn KeyValueStore) -> Result<()> {
    let booking = BookingStore::new(kv);
    let first = booking.concession_order();
    let stored = kv.get_item(keys::FOOD_ORDER);
    let second = booking.concession_order();
    ensure!(first == second, "second normalization changed the order");
    ensure!(
        kv.get_item(keys::FOOD_ORDER) == stored,
        "second read rewrote canonical storage"
    );
    let reparsed = ConcessionOrder::normalize(&serde_json::to_value(&first)?);
    ensure!(reparsed == first, "canonical order does not normalize to itself");
    Ok(())
}

fn seat_labels(selection: &SeatSelection) -> Vec<String> {
    selection
        .map()
        .rows()
        .iter()
        .flatten()
        .filter_map(|cell| match cell {
            SeatCell::Seat { label, .. } => Some(label.clone()),
            SeatCell::Aisle => None,
        })
        .collect()
}

fn menu_item(name: &str) -> Result<theatrum_core::MenuItem> {
    menu()
        .into_iter()
        .find(|m| m.name == name)
        .ok_or_else(|| anyhow!("menu has no {name}"))
}

pub fn smoke(_rng: &mut ChaCha20Rng) -> Result<()> {
    let kv = MemoryStore::new();
    let booking = BookingStore::new(&kv);
    ensure!(
        CheckoutSummary::load(booking).grand_total().is_zero(),
        "empty store should total $0.00"
    );
    let stage = QuantityStage::load(booking);
    ensure!(stage.selection().quantity == 1, "quantity should default to 1");
    ensure!(
        SeatSelection::load(booking).desired() == 1,
        "seat page should expect one seat by default"
    );
    ensure!(
        BookingStage::Home.next() == BookingStage::Tickets,
        "booking starts at ticket selection"
    );
    Ok(())
}

/// Two tickets, two seats, two popcorns and a cookie come to $40.00.
pub fn happy_path(_rng: &mut ChaCha20Rng) -> Result<()> {
    let engine = BookingEngine::new(MemoryStore::new());

    let mut quantity = engine.quantity_stage();
    quantity.increment();
    let tickets = quantity.proceed();
    ensure!(tickets.quantity == 2 && tickets.unit_price == Money::from_dollars(12.0));

    let mut seats = engine.seat_selection();
    seats.toggle("1A")?;
    seats.toggle("1B")?;
    seats.confirm(engine.booking())?;

    let popcorn = menu_item("Classic Popcorn")?;
    engine.add_concession(&popcorn, None, 1)?;
    engine.add_concession(&popcorn, None, 1)?;
    let order = engine.concessions();
    let entry = order
        .get(&canonical_key("Classic Popcorn", None))
        .ok_or_else(|| anyhow!("popcorn missing from order"))?;
    ensure!(
        entry.quantity == 2 && entry.unit_price == Money::from_dollars(6.0) && entry.size.is_none(),
        "unexpected popcorn entry {entry:?}"
    );

    let mut upsells = engine.upsell_stage();
    engine.add_upsell(&mut upsells, "cookie")?;

    let total = assert_total_identity(engine.storage())?;
    ensure!(total.to_string() == "$40.00", "expected $40.00, got {total}");
    Ok(())
}

/// Legacy bare values are repaired once and stored in object form.
pub fn legacy_migration(rng: &mut ChaCha20Rng) -> Result<()> {
    let kv = MemoryStore::with_entries([(keys::FOOD_ORDER, r#"{"Nachos||Large": 3}"#)]);
    let order = BookingStore::new(&kv).concession_order();
    let nachos = order
        .get("Nachos||Large")
        .ok_or_else(|| anyhow!("legacy entry lost"))?;
    ensure!(nachos.name == "Nachos" && nachos.size.as_deref() == Some("Large"));
    ensure!(nachos.quantity == 3 && nachos.unit_price.is_zero());
    let stored: Value = serde_json::from_str(&kv.get_item(keys::FOOD_ORDER).unwrap_or_default())?;
    ensure!(
        stored["Nachos||Large"]["qty"] == 3,
        "storage was not rewritten to object form: {stored}"
    );

    // Random legacy shapes never go negative and settle after one pass.
    let shapes = [
        Value::from(rng.gen_range(-5..20)),
        Value::from(format!("{}", rng.gen_range(0..9))),
        Value::from("lots"),
        Value::Null,
        serde_json::json!({ "qty": rng.gen_range(-3..6), "price": "4.5" }),
        serde_json::json!({ "name": "Candy", "price": -2 }),
    ];
    let mut raw = serde_json::Map::new();
    for (i, shape) in shapes.iter().enumerate() {
        let key = if rng.gen_bool(0.5) {
            format!("Snack {i}||Default")
        } else {
            format!("Snack {i}")
        };
        raw.insert(key, shape.clone());
    }
    let kv = MemoryStore::with_entries([(keys::FOOD_ORDER, Value::Object(raw).to_string())]);
    let order = BookingStore::new(&kv).concession_order();
    for (key, item) in order.iter() {
        ensure!(
            item.unit_price.cents() >= 0,
            "{key} normalized to a negative price"
        );
    }
    assert_normalization_idempotent(&kv)
}

/// Confirmation persists only an exact seat count.
pub fn seat_guard(rng: &mut ChaCha20Rng) -> Result<()> {
    let desired = rng.gen_range(1..=10_u32);
    let kv = MemoryStore::with_entries([(keys::TICKET_QTY, desired.to_string())]);
    let booking = BookingStore::new(&kv);
    let mut selection = SeatSelection::load(booking);
    let labels = seat_labels(&selection);
    let picked: Vec<String> = labels
        .choose_multiple(rng, usize::try_from(desired + 1)?)
        .cloned()
        .collect();

    let (within, extra) = picked.split_at(picked.len() - 1);
    for label in &within[..within.len() - 1] {
        selection.toggle(label)?;
    }
    match selection.confirm(booking) {
        Err(BookingError::SeatCountMismatch { expected, selected }) => {
            ensure!(expected == desired && selected == desired - 1);
        }
        other => bail!("short selection should be rejected, got {other:?}"),
    }
    ensure!(
        kv.get_item(keys::SELECTED_SEATS).is_none(),
        "rejected confirmation persisted seats"
    );

    selection.toggle(&within[within.len() - 1])?;
    ensure!(
        selection.toggle(&extra[0])? == ToggleOutcome::Blocked,
        "selection past the ticket count should be blocked"
    );
    let confirmed = selection.confirm(booking)?;
    ensure!(booking.seats() == confirmed, "persisted seats differ from confirmed");
    ensure!(confirmed.len() == usize::try_from(desired)?);
    Ok(())
}

/// Removing a concession drops one key; removing an upsell drops every
/// entry with that name.
pub fn checkout_removal(_rng: &mut ChaCha20Rng) -> Result<()> {
    let kv = MemoryStore::with_entries([
        (keys::TICKET_QTY, "1"),
        (keys::TICKET_UNIT_PRICE, "12"),
        (
            keys::FOOD_ORDER,
            r#"{"Fountain Drink||Large":{"name":"Fountain Drink","size":"Large","qty":1,"price":6},"Fountain Drink||Small":{"name":"Fountain Drink","size":"Small","qty":2,"price":4}}"#,
        ),
        (
            keys::UPSELL_CART,
            r#"[{"item":"cookie","price":4},{"item":"candy","price":3.5},{"item":"cookie","price":4}]"#,
        ),
    ]);
    let booking = BookingStore::new(&kv);

    ensure!(remove_concession(booking, "Fountain Drink||Large"));
    let order = booking.concession_order();
    ensure!(order.len() == 1 && order.get("Fountain Drink||Small").is_some());

    ensure!(remove_upsell(booking, "cookie") == 2);
    let cart = booking.upsell_cart();
    ensure!(cart.entries().len() == 1 && cart.entries()[0].item == "candy");

    let total = assert_total_identity(&kv)?;
    ensure!(total.to_string() == "$23.50", "expected $23.50, got {total}");
    Ok(())
}

/// After finalize every page starts from scratch.
pub fn finalize_reset(rng: &mut ChaCha20Rng) -> Result<()> {
    let engine = BookingEngine::new(MemoryStore::new());
    play_random_session(rng, engine.storage())?;
    let outcome = engine.finalize();
    ensure!(outcome.next == BookingStage::Home);
    ensure!(engine.storage().is_empty(), "finalize left {:?}", engine.storage().snapshot());

    let summary = engine.checkout();
    ensure!(summary.ticket_qty == 0 && summary.seats.is_empty());
    ensure!(summary.concessions.is_empty() && summary.upsells.is_empty());
    ensure!(engine.quantity_stage().selection().quantity == 1);
    Ok(())
}

/// The same upsell stored at two prices is grouped but flagged, and the
/// total keeps both real prices.
pub fn upsell_price_drift(_rng: &mut ChaCha20Rng) -> Result<()> {
    let kv = MemoryStore::with_entries([(
        keys::UPSELL_CART,
        r#"[{"item":"cookie","price":4},{"item":"cookie","price":5}]"#,
    )]);
    let summary = CheckoutSummary::load(BookingStore::new(&kv));
    let [line] = summary.upsells.as_slice() else {
        bail!("expected one grouped line, got {}", summary.upsells.len());
    };
    ensure!(line.count == 2 && line.mixed_prices, "price drift not flagged: {line:?}");
    ensure!(line.line_total == Money::from_dollars(9.0));
    ensure!(summary.upsell_subtotal() == Money::from_dollars(9.0));
    Ok(())
}

/// A seeded random pass through every stage, checked at the end.
pub fn random_session(rng: &mut ChaCha20Rng) -> Result<()> {
    let kv = MemoryStore::new();
    play_random_session(rng, &kv)?;
    assert_normalization_idempotent(&kv)?;
    assert_total_identity(&kv)?;
    Ok(())
}

fn play_random_session(rng: &mut ChaCha20Rng, kv: &dyn KeyValueStore) -> Result<()> {
    let booking = BookingStore::new(kv);

    let mut quantity = QuantityStage::load(booking);
    for _ in 0..rng.gen_range(0..8) {
        quantity.increment();
    }
    for _ in 0..rng.gen_range(0..3) {
        quantity.decrement();
    }
    if let Some(kind) = ticket_types().choose(rng) {
        quantity.change_ticket_type(kind.id);
    }
    let tickets = quantity.proceed();

    let mut seats = SeatSelection::load(booking);
    let labels = seat_labels(&seats);
    for label in labels.choose_multiple(rng, usize::try_from(tickets.quantity)?) {
        seats.toggle(label)?;
    }
    seats.confirm(booking)?;

    if rng.gen_bool(0.3) {
        // Something outside the booking flow wrote a legacy value.
        let mut raw: serde_json::Map<String, Value> = kv
            .get_item(keys::FOOD_ORDER)
            .and_then(|t| serde_json::from_str(&t).ok())
            .unwrap_or_default();
        raw.insert("Loaded Nachos||Default".to_string(), Value::from(rng.gen_range(1..4)));
        kv.set_item(keys::FOOD_ORDER, &Value::Object(raw).to_string())?;
    }

    let items = menu();
    for _ in 0..rng.gen_range(0..5) {
        let Some(item) = items.choose(rng) else { break };
        let size = item.sizes.choose(rng).map(|s| s.label);
        let mut counter = ConcessionCounter::default();
        for _ in 0..rng.gen_range(0..4) {
            counter.increment();
        }
        let mut order = booking.concession_order();
        let before = order.clone();
        match counter.add_to(&mut order, item, size) {
            Ok(_) => booking.set_concession_order(&order),
            Err(BookingError::EmptyConcessionQuantity) => {
                ensure!(order == before, "rejected add changed the order");
            }
            Err(err) => return Err(err.into()),
        }
    }

    let mut upsells = UpsellStage::load(booking);
    for offer in upsell_offers() {
        if rng.gen_bool(0.4) {
            upsells.activate(booking, offer.id)?;
            ensure!(
                upsells.activate(booking, offer.id).is_err(),
                "{} could be added twice on one visit",
                offer.id
            );
        }
    }
    ensure!(
        upsells.running_total() == independent_total(kv)?,
        "upsell page total drifted from stored state"
    );
    Ok(())
}
