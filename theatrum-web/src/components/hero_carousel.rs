use std::cell::RefCell;
use std::rc::Rc;

use theatrum_core::{FADE_DELAY_MS, FadeTicket, HeroCarousel, Slide, SlideMedia};
use yew::prelude::*;

use crate::dom;
use crate::paths;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Slides to rotate; the built-in hero slides when empty.
    #[prop_or_default]
    pub slides: Vec<Slide>,
    /// Called with the current slide when its call-to-action is pressed.
    pub on_cta: Callback<Slide>,
}

fn media_view(media: &SlideMedia, label: String, fading: bool) -> Html {
    let class = classes!("hero-media", fading.then_some("fading"));
    let src = paths::slide_src(media);
    match media {
        SlideMedia::Image(_) => html! { <img {class} {src} alt={label} /> },
        SlideMedia::Video(_) => html! {
            <iframe
                {class}
                {src}
                title={label}
                frameborder="0"
                allow="autoplay; encrypted-media; picture-in-picture"
                allowfullscreen=true
            />
        },
    }
}

#[function_component(HeroCarouselView)]
pub fn hero_carousel(props: &Props) -> Html {
    let carousel = {
        let slides = props.slides.clone();
        use_mut_ref(move || HeroCarousel::new(slides).unwrap_or_default())
    };
    let refresh = use_force_update();

    // Swap the media once the fade-out has had time to play. A later slide
    // change issues a newer ticket and this one becomes a no-op.
    let schedule_fade = {
        let carousel = carousel.clone();
        let refresh = refresh.clone();
        move |ticket: FadeTicket| {
            refresh.force_update();
            let carousel: Rc<RefCell<HeroCarousel>> = carousel.clone();
            let refresh = refresh.clone();
            dom::run_after(FADE_DELAY_MS, move || {
                if carousel.borrow_mut().complete_fade(ticket) {
                    refresh.force_update();
                }
            });
        }
    };

    let on_prev = {
        let carousel = carousel.clone();
        let schedule_fade = schedule_fade.clone();
        Callback::from(move |_| {
            let ticket = carousel.borrow_mut().previous();
            schedule_fade(ticket);
        })
    };
    let on_next = {
        let carousel = carousel.clone();
        let schedule_fade = schedule_fade.clone();
        Callback::from(move |_| {
            let ticket = carousel.borrow_mut().next();
            schedule_fade(ticket);
        })
    };
    let on_cta = {
        let carousel = carousel.clone();
        let cb = props.on_cta.clone();
        Callback::from(move |_| {
            let slide = carousel.borrow().current().clone();
            cb.emit(slide);
        })
    };

    let view = carousel.borrow();
    let slide = view.current();
    let dots = view.dots();
    let media = media_view(view.displayed_media(), slide.media_label(), view.is_fading());

    html! {
        <section class="hero" aria-roledescription="carousel" aria-label="Featured films">
            <div class="hero-media-frame">{ media }</div>
            <div class="hero-content">
                <h1 class="hero-title">{ slide.title.clone() }</h1>
                <p class="hero-subtitle">{ slide.subtitle.clone() }</p>
                <button type="button" class="btn-primary hero-cta" data-action="open-booking" onclick={on_cta}>
                    { slide.cta.clone() }
                </button>
            </div>
            <button type="button" class="hero-nav prev" aria-label="Previous slide" onclick={on_prev}>{ "‹" }</button>
            <button type="button" class="hero-nav next" aria-label="Next slide" onclick={on_next}>{ "›" }</button>
            <div class="hero-dots" role="tablist">
                { for dots.into_iter().enumerate().map(|(index, active)| {
                    let onclick = {
                        let carousel = carousel.clone();
                        let schedule_fade = schedule_fade.clone();
                        Callback::from(move |_| {
                            let ticket = carousel.borrow_mut().go_to(index);
                            if let Some(ticket) = ticket {
                                schedule_fade(ticket);
                            }
                        })
                    };
                    html! {
                        <button
                            type="button"
                            class={classes!("dot", active.then_some("active"))}
                            role="tab"
                            aria-selected={active.to_string()}
                            aria-label={format!("Slide {}", index + 1)}
                            {onclick}
                        />
                    }
                }) }
            </div>
        </section>
    }
}
