//! Movie catalog, grid filtering and the showtime picker.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::BookingError;

/// How many showtimes a grid card shows before "more" lives in the picker.
pub const CARD_SHOWTIMES: usize = 3;
pub const DEFAULT_FORMAT: &str = "STANDARD";
pub const LOCATIONS: [&str; 3] = ["Theatrum Downtown", "Theatrum Riverside", "Theatrum Uptown"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub title: &'static str,
    pub genres: Vec<&'static str>,
    pub rating: f32,
    /// ISO `YYYY-MM-DD`; compares correctly as text.
    pub release_date: &'static str,
    pub poster: &'static str,
    pub formats: Vec<&'static str>,
    pub times: Vec<&'static str>,
}

impl Movie {
    #[must_use]
    pub fn card_times(&self) -> &[&'static str] {
        &self.times[..self.times.len().min(CARD_SHOWTIMES)]
    }

    fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.genres.join(" ").to_lowercase().contains(needle)
    }
}

#[must_use]
pub fn movies() -> Vec<Movie> {
    vec![
        Movie {
            title: "Dune: Part Two",
            genres: vec!["Sci-Fi", "Adventure", "Drama"],
            rating: 8.7,
            release_date: "2024-03-01",
            poster: "https://images.pexels.com/photos/7991579/pexels-photo-7991579.jpeg",
            formats: vec!["IMAX", "3D", "DOLBY"],
            times: vec!["12:30 PM", "2:00 PM", "5:30 PM", "9:00 PM"],
        },
        Movie {
            title: "Oppenheimer",
            genres: vec!["Drama", "Biography", "History"],
            rating: 8.5,
            release_date: "2023-07-21",
            poster: "https://images.pexels.com/photos/4668513/pexels-photo-4668513.jpeg",
            formats: vec!["70MM", "IMAX"],
            times: vec!["1:00 PM", "4:30 PM", "8:00 PM"],
        },
        Movie {
            title: "The Batman",
            genres: vec!["Action", "Crime", "Thriller"],
            rating: 8.2,
            release_date: "2022-03-04",
            poster: "https://images.pexels.com/photos/7991388/pexels-photo-7991388.jpeg",
            formats: vec!["DOLBY", "4DX"],
            times: vec!["3:00 PM", "6:30 PM", "10:00 PM"],
        },
        Movie {
            title: "Barbie",
            genres: vec!["Comedy", "Fantasy", "Adventure"],
            rating: 7.9,
            release_date: "2023-07-21",
            poster: "https://images.pexels.com/photos/8263336/pexels-photo-8263336.jpeg",
            formats: vec![DEFAULT_FORMAT],
            times: vec!["11:45 AM", "1:30 PM", "4:00 PM", "7:30 PM"],
        },
        Movie {
            title: "A Quiet Place: Day One",
            genres: vec!["Horror", "Thriller", "Sci-Fi"],
            rating: 7.8,
            release_date: "2024-06-28",
            poster: "https://images.pexels.com/photos/6896424/pexels-photo-6896424.jpeg",
            formats: vec!["3D", "DOLBY"],
            times: vec!["12:15 PM", "3:30 PM", "7:00 PM", "10:30 PM"],
        },
    ]
}

/// Distinct genres across `movies`, sorted, for the filter buttons.
#[must_use]
pub fn genres(movies: &[Movie]) -> Vec<&'static str> {
    let mut all: Vec<&'static str> = movies.iter().flat_map(|m| m.genres.iter().copied()).collect();
    all.sort_unstable();
    all.dedup();
    all
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Title,
    /// Highest first.
    Rating,
    /// Newest first.
    Release,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Rating => "rating",
            Self::Release => "release",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "rating" => Ok(Self::Rating),
            "release" => Ok(Self::Release),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Grid controls: genre button, search box and sort select.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieQuery {
    /// `None` means all genres.
    pub genre: Option<String>,
    pub text: String,
    pub sort: SortOrder,
}

impl MovieQuery {
    /// Genre button value; `all` clears the filter.
    pub fn set_genre(&mut self, genre: &str) {
        self.genre = (genre != "all").then(|| genre.to_string());
    }

    /// Matching movies in display order.
    #[must_use]
    pub fn apply<'m>(&self, movies: &'m [Movie]) -> Vec<&'m Movie> {
        let needle = self.text.to_lowercase();
        let mut list: Vec<&Movie> = movies
            .iter()
            .filter(|m| m.matches_text(&needle))
            .filter(|m| {
                self.genre
                    .as_deref()
                    .is_none_or(|g| m.genres.iter().any(|genre| *genre == g))
            })
            .collect();
        list.sort_by(|a, b| compare(self.sort, a, b));
        list
    }
}

fn compare(sort: SortOrder, a: &Movie, b: &Movie) -> Ordering {
    match sort {
        SortOrder::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortOrder::Rating => b.rating.total_cmp(&a.rating),
        SortOrder::Release => b.release_date.cmp(a.release_date),
    }
}

/// Movie to book for `title`: exact match, else the first visible movie, else
/// the first in the catalog.
#[must_use]
pub fn resolve_movie<'m>(
    catalog: &'m [Movie],
    visible: &[&'m Movie],
    title: &str,
) -> Option<&'m Movie> {
    catalog
        .iter()
        .find(|m| m.title == title)
        .or_else(|| visible.first().copied())
        .or_else(|| catalog.first())
}

/// What the picker confirms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowtimeSelection {
    pub movie: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub format: String,
}

impl ShowtimeSelection {
    #[must_use]
    pub fn confirmation(&self) -> String {
        format!(
            "Tickets for {}\n{} • {}\n{} • {}",
            self.movie, self.date, self.time, self.location, self.format
        )
    }
}

/// Showtime modal state.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowtimePicker {
    movie: Movie,
    date: String,
    location: String,
    format: String,
    selected_time: Option<String>,
}

impl ShowtimePicker {
    /// Open for `movie` on `date`. A preselected time only sticks if the
    /// movie actually plays then.
    #[must_use]
    pub fn open(movie: &Movie, preselected: Option<&str>, date: impl Into<String>) -> Self {
        let mut picker = Self {
            movie: movie.clone(),
            date: date.into(),
            location: LOCATIONS[0].to_string(),
            format: String::new(),
            selected_time: None,
        };
        picker.format = picker.formats()[0].to_string();
        if let Some(time) = preselected {
            picker.select_time(time);
        }
        picker
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("Select your showtime — {}", self.movie.title)
    }

    #[must_use]
    pub const fn movie(&self) -> &Movie {
        &self.movie
    }

    /// Formats on offer, `STANDARD` when the movie lists none.
    #[must_use]
    pub fn formats(&self) -> Vec<&'static str> {
        if self.movie.formats.is_empty() {
            vec![DEFAULT_FORMAT]
        } else {
            self.movie.formats.clone()
        }
    }

    #[must_use]
    pub fn times(&self) -> &[&'static str] {
        &self.movie.times
    }

    #[must_use]
    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Make `time` the single active time. Unknown times are ignored.
    pub fn select_time(&mut self, time: &str) -> bool {
        let known = self.movie.times.iter().any(|t| *t == time);
        if known {
            self.selected_time = Some(time.to_string());
        }
        known
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub fn set_location(&mut self, location: &str) -> bool {
        let known = LOCATIONS.iter().any(|l| *l == location);
        if known {
            self.location = location.to_string();
        }
        known
    }

    pub fn set_format(&mut self, format: &str) -> bool {
        let known = self.formats().iter().any(|f| *f == format);
        if known {
            self.format = format.to_string();
        }
        known
    }

    /// # Errors
    ///
    /// Returns [`BookingError::NoShowtimeSelected`] when no time is active.
    pub fn proceed(&self) -> Result<ShowtimeSelection, BookingError> {
        let time = self
            .selected_time
            .clone()
            .ok_or(BookingError::NoShowtimeSelected)?;
        Ok(ShowtimeSelection {
            movie: self.movie.title.to_string(),
            date: self.date.clone(),
            time,
            location: self.location.clone(),
            format: self.format.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(list: &[&Movie]) -> Vec<&'static str> {
        list.iter().map(|m| m.title).collect()
    }

    #[test]
    fn default_query_sorts_by_title() {
        let catalog = movies();
        let list = MovieQuery::default().apply(&catalog);
        assert_eq!(
            titles(&list),
            vec![
                "A Quiet Place: Day One",
                "Barbie",
                "Dune: Part Two",
                "Oppenheimer",
                "The Batman"
            ]
        );
    }

    #[test]
    fn genre_and_text_filters_combine() {
        let catalog = movies();
        let mut query = MovieQuery::default();
        query.set_genre("Sci-Fi");
        query.sort = SortOrder::Rating;
        assert_eq!(
            titles(&query.apply(&catalog)),
            vec!["Dune: Part Two", "A Quiet Place: Day One"]
        );
        query.text = "QUIET".into();
        assert_eq!(titles(&query.apply(&catalog)), vec!["A Quiet Place: Day One"]);
        query.set_genre("all");
        query.text = "thriller".into();
        query.sort = SortOrder::Release;
        assert_eq!(
            titles(&query.apply(&catalog)),
            vec!["A Quiet Place: Day One", "The Batman"]
        );
    }

    #[test]
    fn genres_are_distinct_and_sorted() {
        let list = genres(&movies());
        assert_eq!(list.first(), Some(&"Action"));
        assert_eq!(list.iter().filter(|g| **g == "Sci-Fi").count(), 1);
    }

    #[test]
    fn unknown_title_falls_back_to_first_visible() {
        let catalog = movies();
        let visible = MovieQuery::default().apply(&catalog);
        let movie = resolve_movie(&catalog, &visible, "Nope").unwrap();
        assert_eq!(movie.title, "A Quiet Place: Day One");
        let movie = resolve_movie(&catalog, &[], "Nope").unwrap();
        assert_eq!(movie.title, "Dune: Part Two");
    }

    #[test]
    fn picker_requires_a_time() {
        let catalog = movies();
        let mut picker = ShowtimePicker::open(&catalog[1], Some("9:99 PM"), "2024-05-01");
        assert_eq!(picker.format(), "70MM");
        assert_eq!(picker.selected_time(), None);
        assert_eq!(picker.proceed(), Err(BookingError::NoShowtimeSelected));
        assert!(picker.select_time("4:30 PM"));
        assert!(picker.set_format("IMAX"));
        assert!(!picker.set_format("4DX"));
        let selection = picker.proceed().unwrap();
        assert_eq!(
            selection.confirmation(),
            "Tickets for Oppenheimer\n2024-05-01 • 4:30 PM\nTheatrum Downtown • IMAX"
        );
    }

    #[test]
    fn preselected_time_is_active_on_open() {
        let catalog = movies();
        let picker = ShowtimePicker::open(&catalog[0], Some("5:30 PM"), "2024-05-01");
        assert_eq!(picker.selected_time(), Some("5:30 PM"));
        assert_eq!(catalog[0].card_times().len(), 3);
    }
}
