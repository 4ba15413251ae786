use futures::executor::block_on;
use theatrum_core::{
    AuthService, AuthStep, MovieQuery, Notice, ShowtimePicker, Slide, menu, movies,
};
use theatrum_web::components::auth_modal::{AuthModal, Props as AuthProps};
use theatrum_web::components::concession_card::{ConcessionCard, Props as CardProps};
use theatrum_web::components::footer::Footer;
use theatrum_web::components::header::{Header, Props as HeaderProps};
use theatrum_web::components::hero_carousel::{HeroCarouselView, Props as CarouselProps};
use theatrum_web::components::modal::{Modal, Props as ModalProps};
use theatrum_web::components::movie_grid::{MovieGrid, Props as GridProps};
use theatrum_web::components::showtime_modal::{Props as ShowtimeProps, ShowtimeModal};
use theatrum_web::components::toast::{Props as ToastProps, Toast};
use theatrum_web::storage::{SharedStore, Stores};
use yew::html::ChildrenRenderer;
use yew::{AttrValue, Callback, Classes, LocalServerRenderer, html};

fn auth_props(stores: Stores, step: AuthStep) -> AuthProps {
    AuthProps {
        stores,
        on_close: Callback::noop(),
        on_notice: Callback::noop(),
        initial_step: step,
    }
}

fn render_auth(stores: Stores, step: AuthStep) -> String {
    block_on(LocalServerRenderer::<AuthModal>::with_props(auth_props(stores, step)).render())
}

#[test]
fn header_renders_navigation_and_account_button() {
    let props = HeaderProps {
        account_label: AttrValue::from("Sign In"),
        active: None,
        on_open_auth: Callback::noop(),
        on_navigate: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Header>::with_props(props).render());
    assert!(html.contains("THEATRUM"));
    assert!(html.contains("openAuth"));
    assert!(html.contains("Sign In"));
    assert!(html.contains("My Order"));
}

#[test]
fn footer_renders_copy() {
    let html = block_on(LocalServerRenderer::<Footer>::new().render());
    assert!(html.contains("<footer"));
}

#[test]
fn toast_is_always_present_and_only_shown_with_a_notice() {
    let hidden = block_on(LocalServerRenderer::<Toast>::with_props(ToastProps { notice: None }).render());
    assert!(hidden.contains("app-toast"));
    assert!(!hidden.contains("show"));

    let shown = block_on(
        LocalServerRenderer::<Toast>::with_props(ToastProps {
            notice: Some(Notice::error("Please select exactly 2 seats.")),
        })
        .render(),
    );
    assert!(shown.contains("show"));
    assert!(shown.contains("data-type=\"error\""));
    assert!(shown.contains("Please select exactly 2 seats."));
}

#[test]
fn modal_renders_title_and_children() {
    let props = ModalProps {
        title: AttrValue::from("Demo dialog"),
        on_close: Callback::noop(),
        class: Classes::from("demo-modal"),
        description: Some(AttrValue::from("Short description")),
        children: ChildrenRenderer::new(vec![html! { <p>{ "Body copy" }</p> }]),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(props).render());
    assert!(html.contains("Demo dialog"));
    assert!(html.contains("demo-modal"));
    assert!(html.contains("Short description"));
    assert!(html.contains("Body copy"));
}

#[test]
fn hero_carousel_starts_on_the_first_slide() {
    let slides = vec![
        Slide::image("assets/a.jpg", "FIRST FEATURE", "NOW PLAYING", "GET TICKETS"),
        Slide::image("assets/b.jpg", "SECOND FEATURE", "IN IMAX", "BOOK SEATS"),
    ];
    let props = CarouselProps {
        slides,
        on_cta: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<HeroCarouselView>::with_props(props).render());
    assert!(html.contains("FIRST FEATURE"));
    assert!(html.contains("GET TICKETS"));
    assert!(!html.contains("SECOND FEATURE"));
    assert!(html.contains("Slide 2"));
}

#[test]
fn movie_grid_filters_by_genre() {
    let mut query = MovieQuery::default();
    query.set_genre("Comedy");
    let props = GridProps {
        movies: movies(),
        query,
        on_query: Callback::noop(),
        on_book: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<MovieGrid>::with_props(props).render());
    assert!(html.contains("data-title=\"Barbie\""));
    assert!(!html.contains("data-title=\"Oppenheimer\""));
    assert!(html.contains("sortSelect"));
}

#[test]
fn movie_grid_shows_empty_state_when_nothing_matches() {
    let query = MovieQuery {
        text: "zzzz".to_string(),
        ..MovieQuery::default()
    };
    let props = GridProps {
        movies: movies(),
        query,
        on_query: Callback::noop(),
        on_book: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<MovieGrid>::with_props(props).render());
    assert!(html.contains("No movies match your search."));
}

#[test]
fn showtime_modal_marks_the_preselected_time() {
    let catalog = movies();
    let barbie = catalog.iter().find(|m| m.title == "Barbie").unwrap();
    let props = ShowtimeProps {
        picker: ShowtimePicker::open(barbie, Some("4:00 PM"), "2024-05-01"),
        on_change: Callback::noop(),
        on_confirm: Callback::noop(),
        on_error: Callback::noop(),
        on_close: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ShowtimeModal>::with_props(props).render());
    assert!(html.contains("Barbie"));
    assert!(html.contains("timesContainer"));
    assert!(html.contains("2024-05-01"));
    assert!(html.contains("proceedPayment"));
    assert!(html.contains("active"));
}

#[test]
fn concession_card_offers_sizes_only_when_the_item_has_them() {
    let items = menu();
    let render = |name: &str| {
        let item = items.iter().find(|m| m.name == name).unwrap().clone();
        block_on(
            LocalServerRenderer::<ConcessionCard>::with_props(CardProps {
                item,
                store: SharedStore::memory(),
                on_notice: Callback::noop(),
            })
            .render(),
        )
    };
    let drink = render("Fountain Drink");
    assert!(drink.contains("size-select"));
    assert!(drink.contains("Medium"));
    let popcorn = render("Classic Popcorn");
    assert!(!popcorn.contains("size-select"));
    assert!(popcorn.contains("$6.00"));
    assert!(popcorn.contains("Add to Order"));
}

#[test]
fn auth_modal_opens_on_the_choice_panel() {
    let html = render_auth(Stores::memory(), AuthStep::Choice);
    assert!(html.contains("auth-modal"));
    assert!(html.contains("Welcome to Theatrum"));
    assert!(html.contains("data-next=\"login\""));
    assert!(html.contains("data-next=\"guest\""));
}

#[test]
fn auth_modal_renders_each_form() {
    assert!(render_auth(Stores::memory(), AuthStep::Login).contains("loginForm"));
    assert!(render_auth(Stores::memory(), AuthStep::Signup).contains("signupForm"));
    let verify = render_auth(Stores::memory(), AuthStep::Verify);
    assert!(verify.contains("verifyForm"));
    assert!(verify.contains("resendCode"));
}

#[test]
fn auth_modal_offers_sign_out_for_an_active_session() {
    let stores = Stores::memory();
    AuthService::new(stores.local.kv(), stores.session.kv()).continue_as_guest(1_700_000_000_000);
    let html = render_auth(stores, AuthStep::Choice);
    assert!(html.contains("Signed in as guest@theatrum.local"));
    assert!(html.contains("Sign Out"));
    assert!(!html.contains("data-next=\"signup\""));
}
