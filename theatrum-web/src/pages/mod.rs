use theatrum_core::{BookingStage, Notice};
use yew::prelude::*;

use crate::router::Route;
use crate::storage::SharedStore;

pub mod checkout;
pub mod food;
pub mod home;
pub mod not_found;
pub mod seats;
pub mod tickets;
pub mod upsell;

/// What every booking page receives: the durable store, the toast and the
/// way to the next page.
#[derive(Properties, PartialEq, Clone)]
pub struct PageProps {
    pub store: SharedStore,
    pub on_notice: Callback<Notice>,
    pub on_navigate: Callback<BookingStage>,
}

/// Page for `route`. Each page reads its state from `store` when mounted.
#[must_use]
pub fn render_page(
    route: &Route,
    store: &SharedStore,
    on_notice: &Callback<Notice>,
    on_navigate: &Callback<BookingStage>,
) -> Html {
    let props = PageProps {
        store: store.clone(),
        on_notice: on_notice.clone(),
        on_navigate: on_navigate.clone(),
    };
    match route {
        Route::Home => html! { <home::HomePage ..props /> },
        Route::Tickets => html! { <tickets::TicketsPage ..props /> },
        Route::Seats => html! { <seats::SeatsPage ..props /> },
        Route::Food => html! { <food::FoodPage ..props /> },
        Route::Upsell => html! { <upsell::UpsellPage ..props /> },
        Route::Checkout => html! { <checkout::CheckoutPage ..props /> },
        Route::NotFound => {
            let go_home = on_navigate.reform(|()| BookingStage::Home);
            html! { <not_found::NotFound on_go_home={go_home} /> }
        }
    }
}

/// Back button to the previous booking stage, if there is one.
pub(crate) fn back_button(stage: BookingStage, on_navigate: &Callback<BookingStage>) -> Html {
    stage.previous().map_or_else(Html::default, |previous| {
        let onclick = on_navigate.reform(move |_: MouseEvent| previous);
        html! {
            <button type="button" class="btn-secondary back-btn" {onclick}>{ "Back" }</button>
        }
    })
}
