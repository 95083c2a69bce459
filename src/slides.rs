//! Slide state machine.
//!
//! Slides are addressed by 1-based position; position 0 is the blank
//! placeholder in front of the first image, so the first slide still has a
//! "previous" neighbour to animate from. Only the previous/active/next window
//! around the current position is uncollapsed.

use std::ops::RangeInclusive;

use tracing::{debug, trace};

use crate::source::ImageRecord;
use crate::strip::{self, StripLayout};

/// Navigation state of one gallery instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideState {
    pub current_index: usize,
    pub total_loaded: usize,
    /// Pagination cursor: the last page requested from the image source.
    pub page: u32,
}

impl Default for SlideState {
    fn default() -> Self {
        Self {
            current_index: 1,
            total_loaded: 0,
            page: 1,
        }
    }
}

/// Position marker of a slide relative to the active window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Previous,
    Active,
    Next,
    Collapsed,
}

impl Marker {
    pub fn for_position(position: usize, active: usize) -> Self {
        if position + 1 == active {
            Marker::Previous
        } else if position == active {
            Marker::Active
        } else if position == active + 1 {
            Marker::Next
        } else {
            Marker::Collapsed
        }
    }

    pub fn in_window(&self) -> bool {
        !matches!(self, Marker::Collapsed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    Eager,
    Lazy,
}

impl Loading {
    pub fn for_marker(marker: Marker) -> Self {
        if marker.in_window() {
            Loading::Eager
        } else {
            Loading::Lazy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Loading::Eager => "eager",
            Loading::Lazy => "lazy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub record: ImageRecord,
    pub marker: Marker,
    pub loading: Loading,
    pub thumb_active: bool,
}

impl From<ImageRecord> for Slide {
    fn from(record: ImageRecord) -> Self {
        Self {
            record,
            marker: Marker::Collapsed,
            loading: Loading::Lazy,
            thumb_active: false,
        }
    }
}

/// Outcome of a requested move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The window moved; `touched` lists the positions whose markers changed.
    Moved {
        from: usize,
        to: usize,
        touched: Vec<usize>,
    },
    /// Destination below the first slide; nothing changed.
    Clamped,
    /// Destination past the loaded slides or equal to the current one.
    Rejected,
}

impl Transition {
    pub fn accepted(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

/// Index-addressed view of a gallery: slide records with their markers, the
/// thumbnail strip position, and the pagination bookkeeping.
#[derive(Debug, Clone)]
pub struct SlideTrack {
    state: SlideState,
    slides: Vec<Slide>,
    blank: Marker,
    preload_range: usize,
    fetching: bool,
    layout: Option<StripLayout>,
    strip_offset: f64,
}

impl SlideTrack {
    pub fn new(preload_range: usize) -> Self {
        Self {
            state: SlideState::default(),
            slides: Vec::new(),
            blank: Marker::Previous,
            preload_range,
            fetching: false,
            layout: None,
            strip_offset: 0.0,
        }
    }

    pub fn state(&self) -> SlideState {
        self.state
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Slide at a 1-based position.
    pub fn slide(&self, position: usize) -> Option<&Slide> {
        position.checked_sub(1).and_then(|i| self.slides.get(i))
    }

    pub fn blank_marker(&self) -> Marker {
        self.blank
    }

    pub fn strip_offset(&self) -> f64 {
        self.strip_offset
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Make `position` the active slide before any image is loaded.
    ///
    /// Used for the configured start slide; the position is clamped once the
    /// first page arrives.
    pub fn set_start(&mut self, position: usize) {
        if self.slides.is_empty() {
            self.state.current_index = position.max(1);
            self.blank = Marker::for_position(0, self.state.current_index);
        }
    }

    /// Append a page of records, marking each by its distance to the
    /// current slide. Returns the positions that were added.
    pub fn append(&mut self, records: Vec<ImageRecord>) -> RangeInclusive<usize> {
        let first = self.slides.len() + 1;
        let was_empty = self.slides.is_empty();
        self.slides.extend(records.into_iter().map(Slide::from));
        self.state.total_loaded = self.slides.len();

        if was_empty && self.state.current_index > self.state.total_loaded {
            self.state.current_index = self.state.total_loaded.max(1);
            self.blank = Marker::for_position(0, self.state.current_index);
        }
        let active = self.state.current_index;
        for position in first..=self.state.total_loaded {
            let slide = &mut self.slides[position - 1];
            slide.marker = Marker::for_position(position, active);
            slide.loading = Loading::for_marker(slide.marker);
            slide.thumb_active = position == active;
        }
        self.refresh_strip();
        trace!(first, total = self.state.total_loaded, "slides appended");
        first..=self.state.total_loaded
    }

    pub fn advance(&mut self) -> Transition {
        self.goto(self.state.current_index + 1)
    }

    pub fn retreat(&mut self) -> Transition {
        self.goto(self.state.current_index.saturating_sub(1))
    }

    pub fn jump_to(&mut self, destination: usize) -> Transition {
        self.goto(destination)
    }

    fn goto(&mut self, destination: usize) -> Transition {
        let current = self.state.current_index;
        if destination < 1 {
            return Transition::Clamped;
        }
        if destination > self.state.total_loaded || destination == current {
            trace!(destination, current, "transition rejected");
            return Transition::Rejected;
        }

        let mut touched = Vec::with_capacity(6);
        for position in window(current) {
            if self.set_marker(position, Marker::Collapsed) {
                touched.push(position);
            }
        }
        for position in window(destination) {
            let marker = Marker::for_position(position, destination);
            if self.set_marker(position, marker) && !touched.contains(&position) {
                touched.push(position);
            }
            if let Some(slide) = position.checked_sub(1).and_then(|i| self.slides.get_mut(i)) {
                slide.loading = Loading::Eager;
            }
        }

        if let Some(old) = self.slides.get_mut(current - 1) {
            old.thumb_active = false;
        }
        if let Some(new) = self.slides.get_mut(destination - 1) {
            new.thumb_active = true;
        }

        self.state.current_index = destination;
        self.refresh_strip();
        touched.sort_unstable();
        debug!(from = current, to = destination, "slide moved");
        Transition::Moved {
            from: current,
            to: destination,
            touched,
        }
    }

    /// Returns `false` when there is no slide at `position`.
    fn set_marker(&mut self, position: usize, marker: Marker) -> bool {
        if position == 0 {
            self.blank = marker;
            return true;
        }
        match self.slides.get_mut(position - 1) {
            Some(slide) => {
                slide.marker = marker;
                true
            }
            None => false,
        }
    }

    /// Whether the viewer is close enough to the end to ask for another page.
    pub fn preload_due(&self) -> bool {
        !self.fetching
            && self.state.total_loaded > 0
            && self.state.total_loaded - self.state.current_index < self.preload_range
    }

    /// Claim the next page for fetching, if a preload is due.
    pub fn begin_preload(&mut self) -> Option<u32> {
        if !self.preload_due() {
            return None;
        }
        self.fetching = true;
        self.state.page += 1;
        debug!(
            page = self.state.page,
            current = self.state.current_index,
            total = self.state.total_loaded,
            "preload triggered"
        );
        Some(self.state.page)
    }

    /// Append a preloaded page. An empty page leaves the track untouched.
    pub fn finish_preload(&mut self, records: Vec<ImageRecord>) -> Option<RangeInclusive<usize>> {
        self.fetching = false;
        if records.is_empty() {
            return None;
        }
        Some(self.append(records))
    }

    /// Forget the in-flight preload after a failure.
    pub fn abandon_preload(&mut self) {
        self.fetching = false;
    }

    /// Record new strip measurements and reposition the thumbnails.
    pub fn set_layout(&mut self, layout: StripLayout) {
        self.layout = Some(layout);
        self.refresh_strip();
    }

    fn refresh_strip(&mut self) {
        if let Some(layout) = self.layout {
            self.strip_offset = strip::offset(
                layout,
                self.state.total_loaded,
                self.state.current_index - 1,
            );
        }
    }
}

fn window(center: usize) -> RangeInclusive<usize> {
    center.saturating_sub(1)..=center + 1
}
