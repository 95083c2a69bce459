use maud::Markup;

use crate::config::GalleryConfig;
use crate::events::GallerySnapshot;
use crate::markup::{self, Fragments};
use crate::slides::SlideTrack;

/// Rendered content of one target container.
///
/// Slide and thumbnail items are kept individually so a move only re-renders
/// the items whose markers changed and a new page only appends.
#[derive(Debug, Clone)]
pub struct Document {
    target: String,
    classes: Vec<String>,
    slides: Vec<Markup>,
    thumbs: Vec<Markup>,
    mounted: bool,
    ready: bool,
    detached: bool,
}

impl Document {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            classes: Vec::new(),
            slides: Vec::new(),
            thumbs: Vec::new(),
            mounted: false,
            ready: false,
            detached: false,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns `false` when the class was already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if class.is_empty() || self.classes.iter().any(|c| c == class) {
            return false;
        }
        self.classes.push(class.to_owned());
        true
    }

    /// Inject the container shell and the first page of items.
    pub fn mount(&mut self, fragments: Fragments) {
        self.slides = fragments.slides;
        self.thumbs = fragments.thumbs;
        self.mounted = true;
    }

    pub fn mark_ready(&mut self, ready_class: &str) {
        self.ready = true;
        self.add_class(ready_class);
    }

    pub fn append(&mut self, fragments: Fragments) {
        self.slides.extend(fragments.slides);
        self.thumbs.extend(fragments.thumbs);
    }

    /// Re-render the items at `positions` from the track's current markers.
    pub fn refresh(&mut self, cfg: &GalleryConfig, track: &SlideTrack, positions: &[usize]) {
        let hooks = &cfg.css_class_hooks;
        for &position in positions {
            let Some(slide) = track.slide(position) else {
                continue;
            };
            let i = position - 1;
            if let Some(item) = self.slides.get_mut(i) {
                *item = markup::slide_item(hooks, &slide.record, slide.marker, slide.loading);
            }
            if let Some(item) = self.thumbs.get_mut(i) {
                *item = markup::thumb_item(hooks, &slide.record, position, slide.thumb_active);
            }
        }
    }

    /// Drop all content; the container no longer belongs to a gallery.
    pub fn detach(&mut self) {
        self.slides.clear();
        self.thumbs.clear();
        self.mounted = false;
        self.ready = false;
        self.detached = true;
    }

    pub fn inner_html(&self, cfg: &GalleryConfig, track: &SlideTrack) -> String {
        if !self.mounted {
            return String::new();
        }
        markup::container(cfg, track, &self.slides, &self.thumbs).into_string()
    }

    pub fn snapshot(&self, cfg: &GalleryConfig, track: &SlideTrack) -> GallerySnapshot {
        GallerySnapshot {
            target: self.target.clone(),
            classes: self.classes.clone(),
            state: track.state(),
            html: self.inner_html(cfg, track),
            ready: self.ready,
            detached: self.detached,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{RenderOptions, render};
    use crate::source::ImageRecord;

    fn records(n: usize) -> Vec<ImageRecord> {
        (1..=n)
            .map(|i| ImageRecord {
                image: format!("https://img/{i}_b.jpg"),
                thumb: format!("https://img/{i}_s.jpg"),
                title: format!("photo {i}"),
            })
            .collect()
    }

    #[test]
    fn refresh_matches_a_fresh_render() {
        let cfg = GalleryConfig::default();
        let mut track = SlideTrack::new(0);
        let recs = records(5);
        track.append(recs.clone());
        let mut doc = Document::new("#g");
        doc.mount(render(&recs, 1, &RenderOptions::new(&cfg)));

        if let crate::slides::Transition::Moved { touched, .. } = track.jump_to(2) {
            doc.refresh(&cfg, &track, &touched);
        }
        let fresh = render(&recs, 2, &RenderOptions::new(&cfg));
        let joined = |items: &[Markup]| items.iter().map(|m| m.0.as_str()).collect::<String>();
        assert_eq!(joined(&doc.slides), fresh.slide_markup());
        assert_eq!(joined(&doc.thumbs), fresh.thumb_markup());
    }

    #[test]
    fn classes_are_not_duplicated() {
        let mut doc = Document::new("#g");
        assert!(doc.add_class("fg"));
        assert!(!doc.add_class("fg"));
        assert!(!doc.add_class(""));
        assert_eq!(doc.classes, ["fg"]);
    }

    #[test]
    fn detached_document_is_empty() {
        let cfg = GalleryConfig::default();
        let track = SlideTrack::new(0);
        let mut doc = Document::new("#g");
        doc.mount(Fragments::default());
        assert!(!doc.inner_html(&cfg, &track).is_empty());
        doc.detach();
        let snap = doc.snapshot(&cfg, &track);
        assert!(snap.html.is_empty());
        assert!(snap.detached);
    }
}
