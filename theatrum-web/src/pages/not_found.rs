use yew::prelude::*;

/// Shown for any path outside the booking flow.
#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_go_home: Callback<()>,
}

#[function_component(NotFound)]
pub fn not_found(props: &Props) -> Html {
    let go_home = {
        let cb = props.on_go_home.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <section class="panel not-found" aria-live="assertive">
            <h1>{ "Page not found" }</h1>
            <p>{ "That screen isn't showing here. Head back to see what's playing." }</p>
            <button type="button" class="btn-primary" onclick={go_home}>
                { "Back to Movies" }
            </button>
        </section>
    }
}
