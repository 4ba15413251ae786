use theatrum_core::{
    BookingStage, Movie, MovieQuery, ShowtimePicker, ShowtimeSelection, Slide, movies,
    resolve_movie,
};
use yew::prelude::*;

use crate::components::hero_carousel::HeroCarouselView;
use crate::components::movie_grid::{BookRequest, MovieGrid};
use crate::components::showtime_modal::ShowtimeModal;
use crate::dom;
use crate::pages::PageProps;

/// Picker for the movie a visitor asked to book. Slide titles are upper-case
/// marketing copy, so titles match without regard to case before falling
/// back to the first visible movie.
pub(crate) fn picker_for(
    catalog: &[Movie],
    query: &MovieQuery,
    title: &str,
    time: Option<&str>,
    date: &str,
) -> Option<ShowtimePicker> {
    let visible = query.apply(catalog);
    let exact = catalog
        .iter()
        .find(|m| m.title.eq_ignore_ascii_case(title))
        .map_or(title, |m| m.title);
    resolve_movie(catalog, &visible, exact).map(|movie| ShowtimePicker::open(movie, time, date))
}

#[function_component(HomePage)]
pub fn home_page(props: &PageProps) -> Html {
    let catalog = use_memo((), |_| movies());
    let query = use_state(MovieQuery::default);
    let picker = use_state(|| None::<ShowtimePicker>);

    let open_picker = {
        let catalog = catalog.clone();
        let query = query.clone();
        let picker = picker.clone();
        move |title: &str, time: Option<&str>| {
            picker.set(picker_for(&catalog, &query, title, time, &dom::today_iso()));
        }
    };

    let on_book = {
        let open_picker = open_picker.clone();
        Callback::from(move |req: BookRequest| open_picker(&req.title, req.time.as_deref()))
    };
    let on_cta = Callback::from(move |slide: Slide| open_picker(&slide.title, None));
    let on_query = {
        let query = query.clone();
        Callback::from(move |next: MovieQuery| query.set(next))
    };
    let on_picker_change = {
        let picker = picker.clone();
        Callback::from(move |next: ShowtimePicker| picker.set(Some(next)))
    };
    let on_picker_close = {
        let picker = picker.clone();
        Callback::from(move |()| picker.set(None))
    };
    let on_confirm = {
        let picker = picker.clone();
        let on_notice = props.on_notice.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |selection: ShowtimeSelection| {
            log::info!("showtime chosen: {}", selection.confirmation().replace('\n', " | "));
            on_notice.emit(theatrum_core::Notice::info(selection.confirmation()));
            picker.set(None);
            on_navigate.emit(BookingStage::Home.next());
        })
    };

    html! {
        <div class="page home-page">
            <HeroCarouselView on_cta={on_cta} />
            <h2 class="section-title">{ BookingStage::Home.title() }</h2>
            <MovieGrid
                movies={(*catalog).clone()}
                query={(*query).clone()}
                on_query={on_query}
                on_book={on_book}
            />
            if let Some(current) = (*picker).clone() {
                <ShowtimeModal
                    picker={current}
                    on_change={on_picker_change}
                    on_confirm={on_confirm}
                    on_error={props.on_notice.clone()}
                    on_close={on_picker_close}
                />
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_titles_find_their_movie_regardless_of_case() {
        let catalog = movies();
        let picker = picker_for(&catalog, &MovieQuery::default(), "OPPENHEIMER", None, "2024-05-01")
            .unwrap();
        assert_eq!(picker.movie().title, "Oppenheimer");
        assert_eq!(picker.date(), "2024-05-01");
    }

    #[test]
    fn unknown_titles_fall_back_to_the_first_visible_movie() {
        let catalog = movies();
        let mut query = MovieQuery::default();
        query.set_genre("Comedy");
        let picker = picker_for(&catalog, &query, "SONIC THE HEDGEHOG 2", Some("1:30 PM"), "")
            .unwrap();
        assert_eq!(picker.movie().title, "Barbie");
        assert_eq!(picker.selected_time(), Some("1:30 PM"));
    }
}
