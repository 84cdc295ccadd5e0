//! Image carousel with infinite looping, swipe and optional autoplay.
//!
//! Slides are laid out with a clone of the first slide appended. Moving past
//! the last real slide animates onto the clone; when that transition ends
//! the position snaps back to the first slide without animation.

use std::time::Duration;

use serde::Deserialize;
use storefront_core::attributes::{parse_flag, parse_json_list, parse_positive_or};
use storefront_core::settings::CarouselSettings;
use tokio::time::Instant;

use crate::html::escape_html;

pub const SLIDE_TRANSITION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Slide {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug)]
pub struct Carousel {
    slides: Vec<Slide>,
    /// Track position; `slides.len()` is the clone of slide 0.
    position: usize,
    transitioning: bool,
    /// Whether the last move animated (a snap does not).
    animated: bool,
    autoplay: Option<Duration>,
    next_tick: Option<Instant>,
    swipe_threshold: f32,
    touch_start: Option<f32>,
}

impl Carousel {
    /// Builds from `data-slides`, `data-autoplay` and `data-speed`.
    /// Malformed slides leave the carousel hidden.
    #[must_use]
    pub fn from_attributes(
        slides: Option<&str>,
        autoplay: Option<&str>,
        speed: Option<&str>,
        settings: &CarouselSettings,
        now: Instant,
    ) -> Self {
        let slides: Vec<Slide> = parse_json_list(slides, "data-slides");
        let autoplay = parse_flag(autoplay)
            .then(|| Duration::from_millis(parse_positive_or(speed, settings.speed_ms)));
        Self::new(slides, autoplay, settings, now)
    }

    #[must_use]
    pub fn new(
        slides: Vec<Slide>,
        autoplay: Option<Duration>,
        settings: &CarouselSettings,
        now: Instant,
    ) -> Self {
        let autoplay = autoplay.filter(|_| !slides.is_empty());
        #[allow(clippy::cast_precision_loss)]
        let swipe_threshold = settings.swipe_threshold_px as f32;
        Self {
            slides,
            position: 0,
            transitioning: false,
            animated: false,
            next_tick: autoplay.map(|speed| now + speed),
            autoplay,
            swipe_threshold,
            touch_start: None,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.slides.is_empty()
    }

    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Track position, including the trailing clone.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Real slide currently in view.
    #[must_use]
    pub fn current_slide(&self) -> usize {
        if self.position == self.slides.len() {
            0
        } else {
            self.position
        }
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Horizontal offset of the track, in percent of the viewport.
    #[must_use]
    pub fn offset_percent(&self) -> usize {
        self.position * 100
    }

    /// Moves one slide. Ignored while a transition runs or when hidden.
    /// Returns whether the carousel moved.
    pub fn go(&mut self, direction: Direction, now: Instant) -> bool {
        if self.transitioning || self.slides.is_empty() {
            return false;
        }
        let total = self.slides.len();
        self.position = match direction {
            // From slide 0 the track jumps to the clone, then animates back
            // onto the last real slide.
            Direction::Previous if self.position == 0 => total - 1,
            Direction::Previous => self.position - 1,
            Direction::Next if self.position >= total => 0,
            Direction::Next => self.position + 1,
        };
        self.transitioning = true;
        self.animated = true;
        self.restart_autoplay(now);
        true
    }

    /// Transition-end handler: re-enables input and snaps off the clone.
    pub fn transition_end(&mut self) {
        self.transitioning = false;
        if self.position == self.slides.len() {
            self.position = 0;
            self.animated = false;
        }
    }

    /// `ArrowLeft` / `ArrowRight`; other keys are ignored.
    pub fn key(&mut self, key: &str, now: Instant) -> bool {
        match key {
            "ArrowLeft" => self.go(Direction::Previous, now),
            "ArrowRight" => self.go(Direction::Next, now),
            _ => false,
        }
    }

    pub fn touch_start(&mut self, x: f32) {
        self.touch_start = Some(x);
    }

    /// Completes a swipe. A rightward drag beyond the threshold goes back,
    /// leftward goes forward.
    pub fn touch_end(&mut self, x: f32, now: Instant) -> bool {
        let Some(start) = self.touch_start.take() else {
            return false;
        };
        let delta = x - start;
        if delta.abs() <= self.swipe_threshold {
            return false;
        }
        let direction = if delta > 0.0 {
            Direction::Previous
        } else {
            Direction::Next
        };
        self.go(direction, now)
    }

    /// Autoplay: advances when the interval has elapsed. Returns whether
    /// the carousel moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        let (Some(speed), Some(due)) = (self.autoplay, self.next_tick) else {
            return false;
        };
        if now < due {
            return false;
        }
        self.next_tick = Some(due + speed);
        self.go(Direction::Next, now)
    }

    #[must_use]
    pub fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    fn restart_autoplay(&mut self, now: Instant) {
        if let Some(speed) = self.autoplay {
            self.next_tick = Some(now + speed);
        }
    }

    #[must_use]
    pub fn render_html(&self) -> String {
        if self.is_hidden() {
            return String::new();
        }
        let slides: String = self
            .slides
            .iter()
            .chain(self.slides.first())
            .map(render_slide)
            .collect();
        let transition = if self.animated {
            format!("transform {}ms ease", SLIDE_TRANSITION.as_millis())
        } else {
            "none".to_string()
        };
        let disabled = if self.transitioning { " disabled" } else { "" };
        format!(
            concat!(
                "<div class=\"carousel-container\" tabindex=\"0\">",
                "<div class=\"slides\" style=\"transform:translateX(-{offset}%);transition:{transition}\">{slides}</div>",
                "<button class=\"nav-button prev\" aria-label=\"Previous Slide\"{disabled}>&#10094;</button>",
                "<button class=\"nav-button next\" aria-label=\"Next Slide\"{disabled}>&#10095;</button>",
                "</div>"
            ),
            offset = self.offset_percent(),
            transition = transition,
            slides = slides,
            disabled = disabled,
        )
    }
}

fn render_slide(slide: &Slide) -> String {
    let image = slide
        .image
        .as_deref()
        .filter(|src| !src.is_empty())
        .map(|src| {
            format!(
                "<img src=\"{}\" alt=\"{}\" loading=\"lazy\" decoding=\"async\" />",
                escape_html(src),
                escape_html(slide.alt.as_deref().unwrap_or("Slide"))
            )
        })
        .unwrap_or_default();
    match slide.link.as_deref().filter(|link| !link.is_empty()) {
        Some(link) => format!(
            "<div class=\"slide\"><a href=\"{}\">{image}</a></div>",
            escape_html(link)
        ),
        None => format!("<div class=\"slide\">{image}</div>"),
    }
}

#[cfg(test)]
#[path = "carousel_test.rs"]
mod tests;
