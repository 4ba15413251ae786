use theatrum_core::checkout::{NO_SNACKS, NO_UPSELLS};
use theatrum_core::{BookingStage, CheckoutSummary, finalize, remove_concession, remove_upsell};
use yew::prelude::*;

use crate::pages::{PageProps, back_button};

const STAGE: BookingStage = BookingStage::Checkout;

#[function_component(CheckoutPage)]
pub fn checkout_page(props: &PageProps) -> Html {
    // Bumped after each removal; the summary is re-read from storage on render.
    let revision = use_state(|| 0_u32);
    let summary = CheckoutSummary::load(props.store.booking());

    let remove_snack = |key: String| {
        let store = props.store.clone();
        let revision = revision.clone();
        Callback::from(move |_: MouseEvent| {
            if remove_concession(store.booking(), &key) {
                revision.set(*revision + 1);
            }
        })
    };
    let remove_extra = |item: String| {
        let store = props.store.clone();
        let revision = revision.clone();
        Callback::from(move |_: MouseEvent| {
            if remove_upsell(store.booking(), &item) > 0 {
                revision.set(*revision + 1);
            }
        })
    };
    let on_finalize = {
        let store = props.store.clone();
        let on_notice = props.on_notice.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| {
            let outcome = finalize(store.booking());
            on_notice.emit(outcome.notice);
            on_navigate.emit(outcome.next);
        })
    };

    let food_list = if summary.concessions.is_empty() {
        html! { <li class="empty">{ NO_SNACKS }</li> }
    } else {
        summary
            .concessions
            .iter()
            .map(|line| {
                html! {
                    <li key={line.key.clone()} data-key={line.key.clone()}>
                        <span>{ line.label() }</span>
                        <button
                            type="button"
                            class="remove-line"
                            aria-label={format!("Remove {}", line.item.label())}
                            onclick={remove_snack(line.key.clone())}
                        >{ "Remove" }</button>
                    </li>
                }
            })
            .collect::<Html>()
    };
    let upsell_list = if summary.upsells.is_empty() {
        html! { <li class="empty">{ NO_UPSELLS }</li> }
    } else {
        summary
            .upsells
            .iter()
            .map(|line| {
                html! {
                    <li key={line.item.clone()} data-item={line.item.clone()}>
                        <span>{ line.label() }</span>
                        <button
                            type="button"
                            class="remove-line"
                            aria-label={format!("Remove {}", line.item)}
                            onclick={remove_extra(line.item.clone())}
                        >{ "Remove" }</button>
                    </li>
                }
            })
            .collect::<Html>()
    };

    html! {
        <section class="page checkout-page" aria-labelledby="checkout-title">
            <h1 id="checkout-title">{ STAGE.title() }</h1>
            <dl class="checkout-tickets">
                <dt>{ "Tickets" }</dt>
                <dd id="checkout-ticket-qty">{ summary.ticket_qty }</dd>
                <dt>{ "Seats" }</dt>
                <dd id="checkout-seats">{ summary.seat_text() }</dd>
                <dt>{ "Price per ticket" }</dt>
                <dd id="checkout-ticket-price">{ summary.ticket_unit_price.to_string() }</dd>
            </dl>
            <h2>{ "Snacks" }</h2>
            <ul id="checkout-food-list">{ food_list }</ul>
            <h2>{ "Extras" }</h2>
            <ul id="checkout-upsell-list">{ upsell_list }</ul>
            <p class="checkout-total">
                { "Total: " }
                <span id="checkout-total">{ summary.grand_total().to_string() }</span>
            </p>
            <div class="page-actions">
                { back_button(STAGE, &props.on_navigate) }
                <button id="finalize-purchase" type="button" class="btn-primary" onclick={on_finalize}>
                    { "Complete Purchase" }
                </button>
            </div>
        </section>
    }
}
