use theatrum_core::BookingStage;
use yew::prelude::*;

/// Stages linked from the header navigation.
const NAV_STAGES: [(BookingStage, &str); 3] = [
    (BookingStage::Home, "Movies"),
    (BookingStage::Concessions, "Food & Drinks"),
    (BookingStage::Checkout, "My Order"),
];

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// "Sign In", "Guest" or "Account".
    pub account_label: AttrValue,
    #[prop_or_default]
    pub active: Option<BookingStage>,
    pub on_open_auth: Callback<()>,
    pub on_navigate: Callback<BookingStage>,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let open_auth = {
        let cb = p.on_open_auth.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let go_home = {
        let cb = p.on_navigate.clone();
        Callback::from(move |_| cb.emit(BookingStage::Home))
    };

    html! {
        <header role="banner" class="site-header">
            <a href="#main" class="sr-only">{ "Skip to content" }</a>
            <div class="header-content">
                <button type="button" class="brand" onclick={go_home}>{ "THEATRUM" }</button>
                <nav aria-label="Primary" class="header-nav">
                    { for NAV_STAGES.iter().map(|(stage, label)| {
                        let stage = *stage;
                        let onclick = {
                            let cb = p.on_navigate.clone();
                            Callback::from(move |_| cb.emit(stage))
                        };
                        let class = classes!("nav-link", (p.active == Some(stage)).then_some("active"));
                        html! {
                            <button type="button" {class} {onclick}>{ *label }</button>
                        }
                    }) }
                </nav>
                <div class="header-right">
                    <button id="openAuth" type="button" class="btn-secondary" onclick={open_auth}>
                        { p.account_label.clone() }
                    </button>
                </div>
            </div>
        </header>
    }
}
