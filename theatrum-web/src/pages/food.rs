use theatrum_core::{BookingStage, menu};
use yew::prelude::*;

use crate::components::concession_card::ConcessionCard;
use crate::pages::{PageProps, back_button};

const STAGE: BookingStage = BookingStage::Concessions;

#[function_component(FoodPage)]
pub fn food_page(props: &PageProps) -> Html {
    let items = use_memo((), |_| menu());

    let on_review = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(STAGE.next()))
    };

    html! {
        <section class="page food-page" aria-labelledby="food-title">
            <h1 id="food-title">{ STAGE.title() }</h1>
            <div id="concession-list" class="concession-grid">
                { for items.iter().map(|item| html! {
                    <ConcessionCard
                        key={item.name}
                        item={item.clone()}
                        store={props.store.clone()}
                        on_notice={props.on_notice.clone()}
                    />
                }) }
            </div>
            <div class="page-actions">
                { back_button(STAGE, &props.on_navigate) }
                <button id="review-order" type="button" class="btn-primary" onclick={on_review}>
                    { "Review Order" }
                </button>
            </div>
        </section>
    }
}
