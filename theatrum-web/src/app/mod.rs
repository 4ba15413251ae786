use theatrum_core::{AuthService, BookingStage};
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

use crate::components::auth_modal::AuthModal;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::toast::Toast;
use crate::router::Route;
use crate::storage::Stores;

pub mod state;
pub mod test_bridge;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner() -> Html {
    let stores = use_memo((), |_| Stores::browser());
    let route = use_route::<Route>().unwrap_or(Route::NotFound);
    let navigator = use_navigator();
    let on_navigate = Callback::from(move |target: Route| match navigator.as_ref() {
        Some(nav) => nav.push(&target),
        None => crate::dom::console_error("navigation requested outside a router"),
    });

    html! {
        <AppShell stores={(*stores).clone()} {route} {on_navigate} />
    }
}

#[derive(Properties, PartialEq)]
pub struct AppShellProps {
    pub stores: Stores,
    pub route: Route,
    pub on_navigate: Callback<Route>,
}

/// Header, current page, footer, toast and auth modal. Routing is supplied
/// by the caller so the shell also renders without a browser history.
#[function_component(AppShell)]
pub fn app_shell(props: &AppShellProps) -> Html {
    let app_state = state::use_app_state();
    test_bridge::use_test_bridge(&props.stores, &props.on_navigate);

    let on_notice = app_state.notice_callback();
    let on_stage = {
        let navigate = props.on_navigate.clone();
        Callback::from(move |stage: BookingStage| navigate.emit(Route::from_stage(stage)))
    };
    let on_open_auth = {
        let auth_open = app_state.auth_open.clone();
        Callback::from(move |()| auth_open.set(true))
    };
    let on_close_auth = {
        let auth_open = app_state.auth_open.clone();
        Callback::from(move |()| auth_open.set(false))
    };

    let account_label =
        AuthService::new(props.stores.local.kv(), props.stores.session.kv()).account_label();
    let page = crate::pages::render_page(
        &props.route,
        &props.stores.local,
        &on_notice,
        &on_stage,
    );

    html! {
        <>
            <Header
                account_label={AttrValue::from(account_label)}
                active={props.route.to_stage()}
                on_open_auth={on_open_auth}
                on_navigate={on_stage}
            />
            <main id="main" role="main">
                { page }
            </main>
            <Footer />
            <Toast notice={app_state.current_notice()} />
            if *app_state.auth_open {
                <AuthModal
                    stores={props.stores.clone()}
                    on_close={on_close_auth}
                    on_notice={on_notice}
                />
            }
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use theatrum_core::{MemoryStore, keys};
    use yew::LocalServerRenderer;

    fn render(stores: Stores, route: Route) -> String {
        let props = AppShellProps {
            stores,
            route,
            on_navigate: Callback::noop(),
        };
        block_on(LocalServerRenderer::<AppShell>::with_props(props).render())
    }

    #[test]
    fn shell_wraps_the_routed_page() {
        let html = render(Stores::memory(), Route::Seats);
        assert!(html.contains("role=\"banner\""));
        assert!(html.contains("id=\"main\""));
        assert!(html.contains("Choose Your Seats"));
        assert!(html.contains("id=\"app-toast\""));
        assert!(!html.contains("auth-modal"));
    }

    #[test]
    fn header_reflects_the_session() {
        let session = MemoryStore::with_entries([(
            keys::SESSION,
            r#"{"email":"guest@theatrum.local","ts":1}"#,
        )]);
        let stores = Stores {
            local: session.into(),
            session: crate::storage::SharedStore::memory(),
        };
        let html = render(stores, Route::Home);
        assert!(html.contains("Guest"));
        assert!(!html.contains("Sign In"));

        let html = render(Stores::memory(), Route::Home);
        assert!(html.contains("Sign In"));
    }

    #[test]
    fn unknown_route_renders_not_found() {
        let html = render(Stores::memory(), Route::NotFound);
        assert!(html.contains("Page not found"));
    }
}
