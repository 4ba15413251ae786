use theatrum_core::{ConcessionCounter, MenuItem, Notice};
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::storage::SharedStore;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub item: MenuItem,
    pub store: SharedStore,
    pub on_notice: Callback<Notice>,
}

/// One menu item with its own counter. Nothing is stored until "Add".
#[function_component(ConcessionCard)]
pub fn concession_card(props: &Props) -> Html {
    let counter = use_state(ConcessionCounter::default);
    let size = {
        let default_size = props.item.default_size();
        use_state(move || default_size)
    };

    let on_inc = {
        let counter = counter.clone();
        Callback::from(move |_| {
            let mut next = *counter;
            next.increment();
            counter.set(next);
        })
    };
    let on_dec = {
        let counter = counter.clone();
        Callback::from(move |_| {
            let mut next = *counter;
            next.decrement();
            counter.set(next);
        })
    };
    let on_size = {
        let size = size.clone();
        let item = props.item.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            {
                let value = select.value();
                let chosen = item.sizes.iter().find(|s| s.label == value).map(|s| s.label);
                size.set(chosen);
            }
        })
    };
    let on_add = {
        let counter = counter.clone();
        let size = size.clone();
        let item = props.item.clone();
        let store = props.store.clone();
        let on_notice = props.on_notice.clone();
        Callback::from(move |_| {
            let booking = store.booking();
            let mut order = booking.concession_order();
            let mut next = *counter;
            match next.add_to(&mut order, &item, *size) {
                Ok(added) => {
                    booking.set_concession_order(&order);
                    counter.set(next);
                    on_notice.emit(added.added_notice());
                }
                Err(err) => on_notice.emit(err.notice()),
            }
        })
    };

    let item = &props.item;
    let price = item.price_for(*size);

    html! {
        <div class="concession-card" data-item={item.name}>
            <h3>{ item.name }</h3>
            <p class="concession-price">{ price.to_string() }</p>
            if !item.sizes.is_empty() {
                <select class="size-select" aria-label={format!("{} size", item.name)} onchange={on_size}>
                    { for item.sizes.iter().map(|opt| html! {
                        <option value={opt.label} selected={*size == Some(opt.label)}>
                            { format!("{} - {}", opt.label, opt.price) }
                        </option>
                    }) }
                </select>
            }
            <div class="qty-controls">
                <button type="button" class="qty-decrease" aria-label="Decrease" onclick={on_dec}>{ "−" }</button>
                <span class="snack-qty">{ counter.count() }</span>
                <button type="button" class="qty-increase" aria-label="Increase" onclick={on_inc}>{ "+" }</button>
            </div>
            <button type="button" class="btn-primary add-snack" onclick={on_add}>{ "Add to Order" }</button>
        </div>
    }
}
