use theatrum_core::{BookingStage, UpsellStage};
use yew::prelude::*;

use crate::pages::{PageProps, back_button};

const STAGE: BookingStage = BookingStage::Upsells;

#[function_component(UpsellPage)]
pub fn upsell_page(props: &PageProps) -> Html {
    // The base total is fixed when the page mounts.
    let stage = {
        let store = props.store.clone();
        use_state(move || UpsellStage::load(store.booking()))
    };

    let activate = {
        let store = props.store.clone();
        let stage = stage.clone();
        let on_notice = props.on_notice.clone();
        move |offer_id: &'static str| {
            let store = store.clone();
            let stage = stage.clone();
            let on_notice = on_notice.clone();
            Callback::from(move |_: MouseEvent| {
                let mut next = (*stage).clone();
                match next.activate(store.booking(), offer_id) {
                    Ok(total) => {
                        log::debug!("upsell {offer_id} added, total now {total}");
                        stage.set(next);
                    }
                    Err(err) => on_notice.emit(err.notice()),
                }
            })
        }
    };
    let on_complete = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(STAGE.next()))
    };

    html! {
        <section class="page upsell-page" aria-labelledby="upsell-title">
            <h1 id="upsell-title">{ STAGE.title() }</h1>
            <ul class="upsell-list">
                { for stage.offers().iter().map(|offer| {
                    let added = stage.is_activated(offer.id);
                    let label = if added { "Added" } else { "Add" };
                    html! {
                        <li class="upsell-offer" data-offer={offer.id}>
                            <span class="upsell-name">{ offer.item }</span>
                            <span class="upsell-price">{ offer.price.to_string() }</span>
                            <button
                                type="button"
                                class={classes!("upsell-btn", added.then_some("added"))}
                                disabled={added}
                                onclick={activate(offer.id)}
                            >{ label }</button>
                        </li>
                    }
                }) }
            </ul>
            <p class="order-total">
                { "Order total: " }
                <span id="order-total" aria-live="polite">{ stage.running_total().to_string() }</span>
            </p>
            <div class="page-actions">
                { back_button(STAGE, &props.on_navigate) }
                <button id="complete-purchase" type="button" class="btn-primary" onclick={on_complete}>
                    { "Continue to Checkout" }
                </button>
            </div>
        </section>
    }
}
