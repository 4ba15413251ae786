use theatrum_core::tickets::{MAX_TICKETS, MIN_TICKETS};
use theatrum_core::{BookingStage, QuantityStage, ticket_types};
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::pages::{PageProps, back_button};

const STAGE: BookingStage = BookingStage::Tickets;

#[function_component(TicketsPage)]
pub fn tickets_page(props: &PageProps) -> Html {
    // Loading persists the resolved type and price even if nothing changes.
    let selection = {
        let store = props.store.clone();
        use_state(move || QuantityStage::load(store.booking()).selection().clone())
    };

    let on_increment = {
        let store = props.store.clone();
        let selection = selection.clone();
        Callback::from(move |_| {
            let mut stage = QuantityStage::resume(store.booking(), (*selection).clone());
            stage.increment();
            selection.set(stage.selection().clone());
        })
    };
    let on_decrement = {
        let store = props.store.clone();
        let selection = selection.clone();
        Callback::from(move |_| {
            let mut stage = QuantityStage::resume(store.booking(), (*selection).clone());
            stage.decrement();
            selection.set(stage.selection().clone());
        })
    };
    let on_type = {
        let store = props.store.clone();
        let selection = selection.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            else {
                return;
            };
            let mut stage = QuantityStage::resume(store.booking(), (*selection).clone());
            stage.change_ticket_type(&select.value());
            selection.set(stage.selection().clone());
        })
    };
    let on_proceed = {
        let store = props.store.clone();
        let selection = selection.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| {
            let chosen = QuantityStage::resume(store.booking(), (*selection).clone()).proceed();
            log::debug!("{} ticket(s) at {}", chosen.quantity, chosen.unit_price);
            on_navigate.emit(STAGE.next());
        })
    };

    html! {
        <section class="page tickets-page" aria-labelledby="tickets-title">
            <h1 id="tickets-title">{ STAGE.title() }</h1>
            <div class="ticket-type">
                <label for="ticket-type">{ "Ticket type" }</label>
                <select id="ticket-type" onchange={on_type}>
                    { for ticket_types().into_iter().map(|t| html! {
                        <option value={t.id} selected={selection.ticket_type == t.id}>
                            { format!("{} - {}", t.label, t.price) }
                        </option>
                    }) }
                </select>
            </div>
            <div class="qty-controls" role="group" aria-label="Number of tickets">
                <button
                    id="decrement"
                    type="button"
                    aria-label="Fewer tickets"
                    disabled={selection.quantity <= MIN_TICKETS}
                    onclick={on_decrement}
                >{ "−" }</button>
                <span id="ticket-count" aria-live="polite">{ selection.quantity }</span>
                <button
                    id="increment"
                    type="button"
                    aria-label="More tickets"
                    disabled={selection.quantity >= MAX_TICKETS}
                    onclick={on_increment}
                >{ "+" }</button>
            </div>
            <p class="ticket-price">
                { "Price per ticket: " }
                <span id="ticket-unit-price">{ selection.unit_price.to_string() }</span>
            </p>
            <p class="ticket-subtotal">
                { "Subtotal: " }
                <span id="ticket-subtotal">{ selection.subtotal().to_string() }</span>
            </p>
            <div class="page-actions">
                { back_button(STAGE, &props.on_navigate) }
                <button id="proceed-to-seats" type="button" class="btn-primary" onclick={on_proceed}>
                    { "Choose Seats" }
                </button>
            </div>
        </section>
    }
}
