//! Hero carousel: slide rotation with a deferred media fade.
use serde::{Deserialize, Serialize};

use crate::notice::{Ticket, TicketClock};

/// Delay between fading the old media out and swapping in the new one.
pub const FADE_DELAY_MS: u32 = 150;

/// Completing a fade ticket swaps the displayed media.
pub type FadeTicket = Ticket;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "src", rename_all = "lowercase")]
pub enum SlideMedia {
    /// Asset path relative to the site base.
    Image(String),
    /// Third-party embed URL.
    Video(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub media: SlideMedia,
    pub title: String,
    pub subtitle: String,
    pub cta: String,
}

impl Slide {
    #[must_use]
    pub fn image(path: &str, title: &str, subtitle: &str, cta: &str) -> Self {
        Self {
            media: SlideMedia::Image(path.to_string()),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            cta: cta.to_string(),
        }
    }

    /// Accessible label for the media element.
    #[must_use]
    pub fn media_label(&self) -> String {
        format!("{} Banner", self.title)
    }
}

#[must_use]
pub fn hero_slides() -> Vec<Slide> {
    vec![
        Slide::image(
            "assets/dune2-poster.jpg",
            "DUNE: PART TWO",
            "THEATRES ONLY NOW PLAYING",
            "GET TICKETS",
        ),
        Slide::image(
            "assets/opp-poster.jpg",
            "OPPENHEIMER",
            "EXPERIENCE IN 70MM",
            "BOOK SEATS",
        ),
        Slide::image(
            "assets/sonic2-poster.jpg",
            "SONIC THE HEDGEHOG 2",
            "UltraAVX",
            "VIEW SHOWTIMES",
        ),
        Slide::image(
            "assets/deadpool&wolverine-poster.jpg",
            "DEADPOOL & WOLVERINE",
            "EXPERIENCE IN IMAX",
            "GET TICKETS",
        ),
    ]
}

/// Carousel state. Text follows `current` immediately; the media element keeps
/// showing `displayed` until the pending fade completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroCarousel {
    slides: Vec<Slide>,
    current: usize,
    displayed: usize,
    fade: TicketClock,
}

impl Default for HeroCarousel {
    fn default() -> Self {
        Self {
            slides: hero_slides(),
            current: 0,
            displayed: 0,
            fade: TicketClock::default(),
        }
    }
}

impl HeroCarousel {
    /// `None` when there is nothing to rotate.
    #[must_use]
    pub fn new(slides: Vec<Slide>) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        Some(Self {
            slides,
            current: 0,
            displayed: 0,
            fade: TicketClock::default(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> &Slide {
        &self.slides[self.current]
    }

    /// Media currently on screen; lags `current` while fading.
    #[must_use]
    pub fn displayed_media(&self) -> &SlideMedia {
        &self.slides[self.displayed].media
    }

    #[must_use]
    pub const fn is_fading(&self) -> bool {
        self.fade.is_pending()
    }

    pub fn next(&mut self) -> FadeTicket {
        let target = (self.current + 1) % self.slides.len();
        self.show(target)
    }

    pub fn previous(&mut self) -> FadeTicket {
        let len = self.slides.len();
        let target = (self.current + len - 1) % len;
        self.show(target)
    }

    /// Jump to a dot. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> Option<FadeTicket> {
        (index < self.slides.len()).then(|| self.show(index))
    }

    /// Finish a fade. A ticket superseded by a later slide change does nothing.
    pub fn complete_fade(&mut self, ticket: FadeTicket) -> bool {
        let fresh = self.fade.complete(ticket);
        if fresh {
            self.displayed = self.current;
        }
        fresh
    }

    /// One flag per slide; exactly one is set.
    #[must_use]
    pub fn dots(&self) -> Vec<bool> {
        (0..self.slides.len()).map(|i| i == self.current).collect()
    }

    fn show(&mut self, index: usize) -> FadeTicket {
        self.current = index;
        self.fade.issue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_both_ways() {
        let mut carousel = HeroCarousel::default();
        assert_eq!(carousel.len(), 4);
        carousel.previous();
        assert_eq!(carousel.current_index(), 3);
        carousel.next();
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.go_to(9), None);
        assert!(carousel.go_to(2).is_some());
        assert_eq!(carousel.dots(), vec![false, false, true, false]);
    }

    #[test]
    fn text_moves_immediately_but_media_waits_for_fade() {
        let mut carousel = HeroCarousel::default();
        let ticket = carousel.next();
        assert_eq!(carousel.current().title, "OPPENHEIMER");
        assert_eq!(
            carousel.displayed_media(),
            &SlideMedia::Image("assets/dune2-poster.jpg".into())
        );
        assert!(carousel.is_fading());
        assert!(carousel.complete_fade(ticket));
        assert_eq!(
            carousel.displayed_media(),
            &SlideMedia::Image("assets/opp-poster.jpg".into())
        );
    }

    #[test]
    fn rapid_changes_leave_only_the_last_fade_live() {
        let mut carousel = HeroCarousel::default();
        let first = carousel.next();
        let second = carousel.next();
        assert!(!carousel.complete_fade(first));
        assert_eq!(carousel.displayed_media(), &carousel.slides[0].media);
        assert!(carousel.complete_fade(second));
        assert_eq!(carousel.displayed_media(), &carousel.slides[2].media);
        assert!(!carousel.is_fading());
    }

    #[test]
    fn empty_slide_list_is_rejected() {
        assert!(HeroCarousel::new(Vec::new()).is_none());
        let video = Slide {
            media: SlideMedia::Video("https://www.youtube.com/embed/Way9Dexny3w".into()),
            title: "DUNE".into(),
            subtitle: "TRAILER".into(),
            cta: "WATCH".into(),
        };
        let carousel = HeroCarousel::new(vec![video]).unwrap();
        assert_eq!(carousel.dots(), vec![true]);
        assert_eq!(carousel.current().media_label(), "DUNE Banner");
    }
}
