use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <p>{ "© Theatrum Cinemas. Demo site: no real payments are taken." }</p>
        </footer>
    }
}
