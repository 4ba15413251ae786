use std::str::FromStr;

use theatrum_core::catalog::genres;
use theatrum_core::{Movie, MovieQuery, SortOrder};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::paths;

/// A request to open the showtime picker: title plus an optional time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRequest {
    pub title: String,
    pub time: Option<String>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub movies: Vec<Movie>,
    pub query: MovieQuery,
    pub on_query: Callback<MovieQuery>,
    pub on_book: Callback<BookRequest>,
}

fn book_callback(on_book: &Callback<BookRequest>, title: &str, time: Option<&str>) -> Callback<MouseEvent> {
    let on_book = on_book.clone();
    let request = BookRequest {
        title: title.to_string(),
        time: time.map(str::to_string),
    };
    Callback::from(move |_| on_book.emit(request.clone()))
}

fn movie_card(movie: &Movie, on_book: &Callback<BookRequest>) -> Html {
    html! {
        <div class="movie-card" data-title={movie.title}>
            <div class="movie-poster">
                <img src={paths::media_src(movie.poster)} alt={movie.title} />
                <div class="movie-overlay">
                    <button type="button" class="btn-primary" data-action="book" onclick={book_callback(on_book, movie.title, None)}>
                        { "Book Now" }
                    </button>
                </div>
                <div class="format-badges">
                    { for movie.formats.iter().map(|f| html! {
                        <span class={classes!("format-badge", f.to_lowercase())}>{ *f }</span>
                    }) }
                </div>
            </div>
            <div class="movie-info">
                <h3>{ movie.title }</h3>
                <div class="movie-meta">
                    <span class="rating">{ format!("★ {}", movie.rating) }</span>
                    <div class="genre-tags">
                        { for movie.genres.iter().map(|g| html! { <span class="genre-tag">{ *g }</span> }) }
                    </div>
                </div>
                <div class="showtimes">
                    { for movie.card_times().iter().map(|t| html! {
                        <button type="button" class="showtime-btn" data-action="book" data-time={*t}
                            onclick={book_callback(on_book, movie.title, Some(*t))}>
                            { *t }
                        </button>
                    }) }
                </div>
            </div>
        </div>
    }
}

/// Genre filter, search box, sort select and the resulting cards.
#[function_component(MovieGrid)]
pub fn movie_grid(props: &Props) -> Html {
    let visible = props.query.apply(&props.movies);
    let active_genre = props.query.genre.clone().unwrap_or_else(|| "all".to_string());

    let genre_button = |value: &str, label: &str| {
        let onclick = {
            let on_query = props.on_query.clone();
            let query = props.query.clone();
            let value = value.to_string();
            Callback::from(move |_| {
                let mut next = query.clone();
                next.set_genre(&value);
                on_query.emit(next);
            })
        };
        let class = classes!("filter-btn", (active_genre == value).then_some("active"));
        html! {
            <button type="button" {class} data-genre={value.to_string()} {onclick}>{ label.to_string() }</button>
        }
    };

    let on_search = {
        let on_query = props.on_query.clone();
        let query = props.query.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            {
                let mut next = query.clone();
                next.text = input.value();
                on_query.emit(next);
            }
        })
    };
    let on_sort = {
        let on_query = props.on_query.clone();
        let query = props.query.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            {
                match SortOrder::from_str(&select.value()) {
                    Ok(sort) => {
                        let mut next = query.clone();
                        next.sort = sort;
                        on_query.emit(next);
                    }
                    Err(err) => log::debug!("{err}"),
                }
            }
        })
    };

    let sort_option = |sort: SortOrder, label: &str| {
        html! {
            <option value={sort.as_str()} selected={props.query.sort == sort}>{ label.to_string() }</option>
        }
    };

    html! {
        <section class="movies" aria-label="Now showing">
            <div class="movie-controls">
                <div class="genre-filters">
                    { genre_button("all", "All") }
                    { for genres(&props.movies).into_iter().map(|g| genre_button(g, g)) }
                </div>
                <input
                    id="globalSearch"
                    type="search"
                    placeholder="Search movies or genres"
                    value={props.query.text.clone()}
                    oninput={on_search}
                />
                <select id="sortSelect" onchange={on_sort} aria-label="Sort movies">
                    { sort_option(SortOrder::Title, "Title") }
                    { sort_option(SortOrder::Rating, "Rating") }
                    { sort_option(SortOrder::Release, "Release date") }
                </select>
            </div>
            <div id="moviesGrid" class="movies-grid">
                if visible.is_empty() {
                    <p class="empty-state">{ "No movies match your search." }</p>
                } else {
                    { for visible.iter().map(|m| movie_card(m, &props.on_book)) }
                }
            </div>
        </section>
    }
}
