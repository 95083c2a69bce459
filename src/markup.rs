//! HTML templates for the carousel.
//!
//! Everything here is a pure function of its arguments so the same input
//! always yields byte-identical markup.

use maud::{Markup, html};

use crate::config::{ClassHooks, GalleryConfig};
use crate::slides::{Loading, Marker, SlideTrack};
use crate::source::ImageRecord;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub hooks: &'a ClassHooks,
    pub thumbnails: bool,
    /// Position of the first image being rendered (1-based).
    pub first_position: usize,
}

impl<'a> RenderOptions<'a> {
    pub fn new(cfg: &'a GalleryConfig) -> Self {
        Self {
            hooks: &cfg.css_class_hooks,
            thumbnails: cfg.enable_thumbnails,
            first_position: 1,
        }
    }

    pub fn starting_at(self, first_position: usize) -> Self {
        Self {
            first_position,
            ..self
        }
    }
}

/// Slide and thumbnail items, one entry per image, in input order.
#[derive(Debug, Clone, Default)]
pub struct Fragments {
    pub slides: Vec<Markup>,
    pub thumbs: Vec<Markup>,
}

impl Fragments {
    pub fn slide_markup(&self) -> String {
        join(&self.slides)
    }

    pub fn thumb_markup(&self) -> String {
        join(&self.thumbs)
    }
}

fn join(items: &[Markup]) -> String {
    items.iter().map(|m| m.0.as_str()).collect()
}

/// Build list items for `images` with `active` as the current slide.
pub fn render(images: &[ImageRecord], active: usize, options: &RenderOptions<'_>) -> Fragments {
    let mut out = Fragments::default();
    for (offset, record) in images.iter().enumerate() {
        let position = options.first_position + offset;
        let marker = Marker::for_position(position, active);
        out.slides.push(slide_item(
            options.hooks,
            record,
            marker,
            Loading::for_marker(marker),
        ));
        if options.thumbnails {
            out.thumbs
                .push(thumb_item(options.hooks, record, position, position == active));
        }
    }
    out
}

pub fn marker_class(hooks: &ClassHooks, marker: Marker) -> &str {
    match marker {
        Marker::Previous => &hooks.previous_item,
        Marker::Active => &hooks.active,
        Marker::Next => &hooks.next_item,
        Marker::Collapsed => &hooks.collapsed_item,
    }
}

pub fn slide_item(
    hooks: &ClassHooks,
    record: &ImageRecord,
    marker: Marker,
    loading: Loading,
) -> Markup {
    let class = format!("{} {}", hooks.gallery_item, marker_class(hooks, marker));
    html! {
        li class=(class) data-title=(record.title) {
            img class=(hooks.gallery_image) src=(record.image) alt=(record.title) loading=(loading.as_str());
        }
    }
}

pub fn thumb_item(hooks: &ClassHooks, record: &ImageRecord, position: usize, active: bool) -> Markup {
    let class = if active {
        format!("{} {}", hooks.nav_item, hooks.nav_active_item)
    } else {
        hooks.nav_item.clone()
    };
    html! {
        li class=(class) data-index=(position) {
            img class=(hooks.nav_image) src=(record.thumb) alt=(record.title);
        }
    }
}

/// Inner markup of a mounted container: slide list, navigation buttons and
/// the thumbnail strip.
pub fn container(
    cfg: &GalleryConfig,
    track: &SlideTrack,
    slides: &[Markup],
    thumbs: &[Markup],
) -> Markup {
    let hooks = &cfg.css_class_hooks;
    let state = track.state();
    let blank = format!(
        "{} {} {}",
        hooks.gallery_item,
        marker_class(hooks, track.blank_marker()),
        hooks.blank_item
    );
    let prev_disabled = state.current_index <= 1;
    let next_disabled = state.current_index >= state.total_loaded;
    let speed = cfg.animation_speed.as_millis() as u64;

    html! {
        div class=(hooks.gallery_wrapper) data-animation-speed=(speed) {
            ul class=(hooks.gallery_list) {
                li class=(blank) {}
                @for slide in slides { (slide) }
            }
        }
        span class=(button_class(&hooks.prev_button, hooks, prev_disabled)) {}
        span class=(button_class(&hooks.next_button, hooks, next_disabled)) {}
        @if cfg.enable_navigation {
            div class=(hooks.nav_wrapper) {
                ul class=(hooks.nav_list) style=(format!("left: {}px", px(track.strip_offset()))) {
                    @for thumb in thumbs { (thumb) }
                }
            }
        }
    }
}

fn button_class(base: &str, hooks: &ClassHooks, disabled: bool) -> String {
    if disabled {
        format!("{base} {}", hooks.button_disabled)
    } else {
        base.to_owned()
    }
}

fn px(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images() -> Vec<ImageRecord> {
        (1..=4)
            .map(|i| ImageRecord {
                image: format!("https://farm1.staticflickr.com/s/{i}_x_b.jpg"),
                thumb: format!("https://farm1.staticflickr.com/s/{i}_x_s.jpg"),
                title: format!("cat {i}"),
            })
            .collect()
    }

    #[test]
    fn first_render_marks_window_and_lazy_loads_the_rest() {
        let cfg = GalleryConfig::default();
        let out = render(&images(), 1, &RenderOptions::new(&cfg));
        assert_eq!(out.slides.len(), 4);
        assert_eq!(
            out.slides[0].0,
            r#"<li class="fg-galley-item fg-active" data-title="cat 1"><img class="fg-picture" src="https://farm1.staticflickr.com/s/1_x_b.jpg" alt="cat 1" loading="eager"></li>"#
        );
        assert!(out.slides[1].0.contains("fg-item-next"));
        assert!(out.slides[1].0.contains(r#"loading="eager""#));
        assert!(out.slides[2].0.contains("fg-collapsed"));
        assert!(out.slides[3].0.contains(r#"loading="lazy""#));
        assert_eq!(
            out.thumbs[0].0,
            r#"<li class="fg-nav-item fg-nav-item-active" data-index="1"><img class="fg-nav-image" src="https://farm1.staticflickr.com/s/1_x_s.jpg" alt="cat 1"></li>"#
        );
        assert_eq!(out.thumbs[1].0.matches("fg-nav-item-active").count(), 0);
    }

    #[test]
    fn render_is_pure() {
        let cfg = GalleryConfig::default();
        let opts = RenderOptions::new(&cfg);
        let a = render(&images(), 2, &opts);
        let b = render(&images(), 2, &opts);
        assert_eq!(a.slide_markup(), b.slide_markup());
        assert_eq!(a.thumb_markup(), b.thumb_markup());
        assert!(a.slides[0].0.contains("fg-item-prev"));
    }

    #[test]
    fn appended_items_continue_positions() {
        let cfg = GalleryConfig::default();
        let out = render(&images()[..2], 3, &RenderOptions::new(&cfg).starting_at(4));
        assert!(out.slides[0].0.contains("fg-item-next"));
        assert!(out.slides[1].0.contains("fg-collapsed"));
        assert!(out.thumbs[1].0.contains(r#"data-index="5""#));
    }

    #[test]
    fn thumbnails_can_be_disabled() {
        let cfg = GalleryConfig {
            enable_thumbnails: false,
            ..GalleryConfig::default()
        };
        let out = render(&images(), 1, &RenderOptions::new(&cfg));
        assert!(out.thumbs.is_empty());
        assert_eq!(out.thumb_markup(), "");
    }

    #[test]
    fn titles_are_escaped() {
        let cfg = GalleryConfig::default();
        let img = ImageRecord {
            image: "https://x/1.jpg".into(),
            thumb: "https://x/1_s.jpg".into(),
            title: r#"<b>"tom" & jerry</b>"#.into(),
        };
        let out = render(&[img], 1, &RenderOptions::new(&cfg));
        assert!(out.slides[0].0.contains("&lt;b&gt;&quot;tom&quot; &amp; jerry&lt;/b&gt;"));
    }

    #[test]
    fn container_disables_buttons_at_the_ends() {
        let cfg = GalleryConfig::default();
        let mut track = SlideTrack::new(0);
        track.append(images()[..1].to_vec());
        let out = container(&cfg, &track, &[], &[]).into_string();
        assert!(out.contains(r#"<span class="fg-btn-prev fg-btn-disabled"></span>"#));
        assert!(out.contains(r#"<span class="fg-btn-next fg-btn-disabled"></span>"#));
        assert!(out.contains(r#"<li class="fg-galley-item fg-item-prev fg-blanc"></li>"#));
        assert!(out.contains(r#"style="left: 0px""#));
        assert!(out.contains(r#"data-animation-speed="250""#));
    }

    #[test]
    fn container_without_navigation_has_no_strip() {
        let cfg = GalleryConfig {
            enable_navigation: false,
            ..GalleryConfig::default()
        };
        let track = SlideTrack::new(0);
        let out = container(&cfg, &track, &[], &[]).into_string();
        assert!(!out.contains("fg-nav-wrapper"));
    }
}
