use futures::executor::block_on;
use theatrum_core::{BookingStage, MemoryStore, keys};
use theatrum_web::pages::{
    PageProps,
    checkout::CheckoutPage,
    food::FoodPage,
    home::HomePage,
    not_found::{NotFound, Props as NotFoundProps},
    seats::SeatsPage,
    tickets::TicketsPage,
    upsell::UpsellPage,
};
use theatrum_web::storage::SharedStore;
use yew::{Callback, LocalServerRenderer};

const POPCORN_ORDER: &str = r#"{"Classic Popcorn||Default":{"name":"Classic Popcorn","size":null,"qty":2,"price":6},"Fountain Drink||Large":{"name":"Fountain Drink","size":"Large","qty":0,"price":6}}"#;

fn props(store: SharedStore) -> PageProps {
    PageProps {
        store,
        on_notice: Callback::noop(),
        on_navigate: Callback::noop(),
    }
}

fn booked_store() -> SharedStore {
    SharedStore::from(MemoryStore::with_entries([
        (keys::TICKET_QTY, "2"),
        (keys::TICKET_UNIT_PRICE, "12"),
        (keys::TICKET_TYPE, "standard"),
        (keys::SELECTED_SEATS, r#"["1A","1B"]"#),
        (keys::FOOD_ORDER, POPCORN_ORDER),
        (keys::UPSELL_CART, r#"[{"item":"cookie","price":4}]"#),
    ]))
}

#[test]
fn home_page_lists_the_catalog_without_a_picker() {
    let html = block_on(LocalServerRenderer::<HomePage>::with_props(props(SharedStore::memory())).render());
    assert!(html.contains("moviesGrid"));
    assert!(html.contains("Oppenheimer"));
    assert!(html.contains("DUNE: PART TWO"));
    assert!(html.contains(BookingStage::Home.title()));
    assert!(!html.contains("proceedPayment"));
}

#[test]
fn tickets_page_resumes_the_stored_selection() {
    let store = SharedStore::from(MemoryStore::with_entries([
        (keys::TICKET_QTY, "4"),
        (keys::TICKET_TYPE, "child"),
    ]));
    let html = block_on(LocalServerRenderer::<TicketsPage>::with_props(props(store.clone())).render());
    assert!(html.contains("Select Tickets"));
    assert!(html.contains("ticket-count"));
    assert!(html.contains("$9.00"));
    assert!(html.contains("$36.00"));
    assert!(html.contains("proceed-to-seats"));
    // Mounting persists the resolved price for later pages.
    assert_eq!(store.kv().get_item(keys::TICKET_UNIT_PRICE).as_deref(), Some("9"));
}

#[test]
fn tickets_page_defaults_to_one_standard_ticket() {
    let store = SharedStore::memory();
    let html = block_on(LocalServerRenderer::<TicketsPage>::with_props(props(store.clone())).render());
    assert!(html.contains("$12.00"));
    assert_eq!(store.kv().get_item(keys::TICKET_TYPE).as_deref(), Some("standard"));
}

#[test]
fn seats_page_renders_the_grid_for_the_ticket_count() {
    let store = SharedStore::from(MemoryStore::with_entries([(keys::TICKET_QTY, "3")]));
    let html = block_on(LocalServerRenderer::<SeatsPage>::with_props(props(store)).render());
    assert!(html.contains("Choose Your Seats"));
    assert!(html.contains("data-seat=\"1A\""));
    assert!(html.contains("data-seat=\"6I\""));
    assert!(html.contains("seat-spacer"));
    assert!(html.contains("selected-qty"));
    assert!(html.contains("confirm-seats"));
    assert!(!html.contains("data-selected=\"true\""));
}

#[test]
fn food_page_renders_a_card_per_menu_item() {
    let html = block_on(LocalServerRenderer::<FoodPage>::with_props(props(SharedStore::memory())).render());
    assert!(html.contains("Classic Popcorn"));
    assert!(html.contains("Fountain Drink"));
    assert!(html.contains("size-select"));
    assert!(html.contains("review-order"));
}

#[test]
fn upsell_page_starts_from_tickets_plus_snacks() {
    let store = SharedStore::from(MemoryStore::with_entries([
        (keys::TICKET_QTY, "2"),
        (keys::TICKET_UNIT_PRICE, "12"),
        (keys::FOOD_ORDER, POPCORN_ORDER),
    ]));
    let html = block_on(LocalServerRenderer::<UpsellPage>::with_props(props(store)).render());
    assert!(html.contains("Treat Yourself"));
    assert!(html.contains("order-total"));
    assert!(html.contains("$36.00"));
    assert!(!html.contains("Added"));
}

#[test]
fn checkout_page_summarizes_the_booking() {
    let html = block_on(LocalServerRenderer::<CheckoutPage>::with_props(props(booked_store())).render());
    assert!(html.contains("Checkout"));
    assert!(html.contains("1A, 1B"));
    assert!(html.contains("Classic Popcorn"));
    assert!(!html.contains("Fountain Drink"));
    assert!(html.contains("cookie"));
    assert!(html.contains("$40.00"));
    assert!(html.contains("finalize-purchase"));
}

#[test]
fn checkout_page_shows_placeholders_for_empty_lists() {
    let html = block_on(LocalServerRenderer::<CheckoutPage>::with_props(props(SharedStore::memory())).render());
    assert!(html.contains("No snacks selected."));
    assert!(html.contains("No upsells."));
    assert!(html.contains("$0.00"));
}

#[test]
fn not_found_offers_a_way_home() {
    let html = block_on(
        LocalServerRenderer::<NotFound>::with_props(NotFoundProps {
            on_go_home: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("Page not found"));
    assert!(html.contains("Back to Movies"));
}
