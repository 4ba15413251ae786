use theatrum_core::catalog::LOCATIONS;
use theatrum_core::{Notice, ShowtimePicker, ShowtimeSelection};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::modal::Modal;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub picker: ShowtimePicker,
    /// Every edit produces the updated picker; the owner stores it.
    pub on_change: Callback<ShowtimePicker>,
    pub on_confirm: Callback<ShowtimeSelection>,
    pub on_error: Callback<Notice>,
    pub on_close: Callback<()>,
}

fn event_value(e: &Event) -> Option<String> {
    let target = e.target()?;
    target
        .clone()
        .dyn_into::<HtmlSelectElement>()
        .map(|s| s.value())
        .or_else(|_| target.dyn_into::<HtmlInputElement>().map(|i| i.value()))
        .ok()
}

/// Emit an edited copy of the picker when the field value changes.
fn edit(
    picker: &ShowtimePicker,
    on_change: &Callback<ShowtimePicker>,
    apply: fn(&mut ShowtimePicker, &str),
) -> Callback<Event> {
    let picker = picker.clone();
    let on_change = on_change.clone();
    Callback::from(move |e: Event| {
        if let Some(value) = event_value(&e) {
            let mut next = picker.clone();
            apply(&mut next, &value);
            on_change.emit(next);
        }
    })
}

#[function_component(ShowtimeModal)]
pub fn showtime_modal(props: &Props) -> Html {
    let picker = &props.picker;

    let on_date = edit(picker, &props.on_change, |p, v| p.set_date(v));
    let on_location = edit(picker, &props.on_change, |p, v| {
        p.set_location(v);
    });
    let on_format = edit(picker, &props.on_change, |p, v| {
        p.set_format(v);
    });
    let on_proceed = {
        let picker = picker.clone();
        let on_confirm = props.on_confirm.clone();
        let on_error = props.on_error.clone();
        Callback::from(move |_| match picker.proceed() {
            Ok(selection) => on_confirm.emit(selection),
            Err(err) => on_error.emit(err.notice()),
        })
    };
    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <Modal title={picker.title()} on_close={props.on_close.clone()} class={classes!("booking-modal")}>
            <div id="bookingRoot" class="booking-form">
                <label for="bookingDate">{ "Date" }</label>
                <input id="bookingDate" type="date" value={picker.date().to_string()} onchange={on_date} />

                <label for="bookingLocation">{ "Location" }</label>
                <select id="bookingLocation" onchange={on_location}>
                    { for LOCATIONS.iter().map(|loc| html! {
                        <option value={*loc} selected={picker.location() == *loc}>{ *loc }</option>
                    }) }
                </select>

                <label for="bookingFormat">{ "Format" }</label>
                <select id="bookingFormat" onchange={on_format}>
                    { for picker.formats().into_iter().map(|f| html! {
                        <option value={f} selected={picker.format() == f}>{ f }</option>
                    }) }
                </select>

                <div id="timesContainer" class="times" role="group" aria-label="Showtimes">
                    { for picker.times().iter().map(|t| {
                        let time = *t;
                        let onclick = {
                            let picker = picker.clone();
                            let on_change = props.on_change.clone();
                            Callback::from(move |_| {
                                let mut next = picker.clone();
                                if next.select_time(time) {
                                    on_change.emit(next);
                                }
                            })
                        };
                        let active = picker.selected_time() == Some(time);
                        html! {
                            <button
                                type="button"
                                class={classes!("time-btn", active.then_some("active"))}
                                data-time={time}
                                aria-pressed={active.to_string()}
                                {onclick}
                            >
                                { time }
                            </button>
                        }
                    }) }
                </div>

                <div class="modal-actions">
                    <button type="button" class="btn-secondary" data-close="true" onclick={on_cancel}>{ "Cancel" }</button>
                    <button id="proceedPayment" type="button" class="btn-primary" onclick={on_proceed}>
                        { "Proceed to Tickets" }
                    </button>
                </div>
            </div>
        </Modal>
    }
}
