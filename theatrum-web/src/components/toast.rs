use theatrum_core::Notice;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub notice: Option<Notice>,
}

/// The single notification slot. Always in the DOM so screen readers pick up
/// changes through the live region.
#[function_component(Toast)]
pub fn toast(p: &Props) -> Html {
    let (kind, icon, message, visible) = p.notice.as_ref().map_or(
        ("info", "•", String::new(), false),
        |n| (n.kind.as_str(), n.kind.icon(), n.message.clone(), true),
    );
    let class = classes!("app-toast", visible.then_some("show"));

    html! {
        <div id="app-toast" {class} data-type={kind} role="status" aria-live="polite">
            <span class="app-toast-icon">{ icon }</span>
            <span id="app-toast-message">{ message }</span>
        </div>
    }
}
