use theatrum_core::{BookingStage, SeatCell, SeatSelection, ToggleOutcome};
use yew::prelude::*;

use crate::pages::{PageProps, back_button};

const STAGE: BookingStage = BookingStage::Seats;

#[function_component(SeatsPage)]
pub fn seats_page(props: &PageProps) -> Html {
    let selection = {
        let store = props.store.clone();
        use_state(move || SeatSelection::load(store.booking()))
    };

    let toggle = {
        let selection = selection.clone();
        let on_notice = props.on_notice.clone();
        move |label: String| {
            let selection = selection.clone();
            let on_notice = on_notice.clone();
            Callback::from(move |_: MouseEvent| {
                let mut next = (*selection).clone();
                match next.toggle(&label) {
                    // A full selection ignores further clicks.
                    Ok(ToggleOutcome::Blocked) => {}
                    Ok(_) => selection.set(next),
                    Err(err) => on_notice.emit(err.notice()),
                }
            })
        }
    };
    let on_confirm = {
        let store = props.store.clone();
        let selection = selection.clone();
        let on_notice = props.on_notice.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| match selection.confirm(store.booking()) {
            Ok(labels) => {
                log::debug!("seats confirmed: {}", labels.join(", "));
                on_navigate.emit(STAGE.next());
            }
            Err(err) => on_notice.emit(err.notice()),
        })
    };

    let rows = selection.map().rows().iter().map(|row| {
        let cells = row.iter().map(|cell| match cell {
            SeatCell::Seat { label, .. } => {
                let selected = selection.is_selected(label);
                html! {
                    <button
                        type="button"
                        class={classes!("seat", selected.then_some("selected"))}
                        data-seat={label.clone()}
                        data-selected={selected.to_string()}
                        aria-pressed={selected.to_string()}
                        onclick={toggle(label.clone())}
                    >{ label.clone() }</button>
                }
            }
            SeatCell::Aisle => html! { <span class="seat-spacer" aria-hidden="true"></span> },
        });
        html! { <div class="seat-row">{ for cells }</div> }
    });

    html! {
        <section class="page seats-page" aria-labelledby="seats-title">
            <h1 id="seats-title">{ STAGE.title() }</h1>
            <div class="screen" aria-hidden="true">{ "SCREEN" }</div>
            <div id="seat-map" class="seat-map">{ for rows }</div>
            <p class="seat-status" aria-live="polite">
                { "Selected " }
                <span id="selected-count">{ selection.selected_count() }</span>
                { " of " }
                <span id="selected-qty">{ selection.desired() }</span>
            </p>
            <div class="page-actions">
                { back_button(STAGE, &props.on_navigate) }
                <button id="confirm-seats" type="button" class="btn-primary" onclick={on_confirm}>
                    { "Confirm Seats" }
                </button>
            </div>
        </section>
    }
}
