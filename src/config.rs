use std::path::Path;
use std::time::Duration;

use anyhow::{Result, ensure};
use serde::Deserialize;

/// CSS class names used as markup hooks.
///
/// Defaults match the stock gallery stylesheet, including
/// its `galley` spelling, so existing themes keep working.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ClassHooks {
    pub gallery_wrapper: String,
    pub gallery_list: String,
    pub gallery_item: String,
    pub active: String,
    pub previous_item: String,
    pub next_item: String,
    pub collapsed_item: String,
    /// Placeholder slide sitting before the first real image.
    pub blank_item: String,
    pub gallery_image: String,
    pub nav_wrapper: String,
    pub nav_list: String,
    pub nav_item: String,
    pub nav_active_item: String,
    pub nav_image: String,
    pub prev_button: String,
    pub next_button: String,
    pub button_disabled: String,
}

impl Default for ClassHooks {
    fn default() -> Self {
        Self {
            gallery_wrapper: "fg-galley-wrapper".into(),
            gallery_list: "fg-galley-list".into(),
            gallery_item: "fg-galley-item".into(),
            active: "fg-active".into(),
            previous_item: "fg-item-prev".into(),
            next_item: "fg-item-next".into(),
            collapsed_item: "fg-collapsed".into(),
            blank_item: "fg-blanc".into(),
            gallery_image: "fg-picture".into(),
            nav_wrapper: "fg-nav-wrapper".into(),
            nav_list: "fg-nav-list".into(),
            nav_item: "fg-nav-item".into(),
            nav_active_item: "fg-nav-item-active".into(),
            nav_image: "fg-nav-image".into(),
            prev_button: "fg-btn-prev".into(),
            next_button: "fg-btn-next".into(),
            button_disabled: "fg-btn-disabled".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GalleryConfig {
    /// REST endpoint of the photo search API.
    pub api_base_url: String,
    /// Flickr API key sent with every search.
    pub api_key: String,
    /// Comma separated tag filter.
    pub tags: String,
    /// Selector naming the containers a gallery is mounted into.
    pub container_selector: String,
    /// Images requested per page.
    pub page_size: u32,
    /// Distance from the end of the loaded slides at which the next page is
    /// requested. Zero disables preloading.
    pub preload_range: usize,
    pub enable_thumbnails: bool,
    pub enable_navigation: bool,
    /// Slide made active after the first page arrives (1-based).
    pub start_slide: usize,
    /// Slide transition duration handed to the stylesheet.
    #[serde(with = "humantime_serde")]
    pub animation_speed: Duration,
    /// Class added to a container as soon as a gallery is mounted.
    pub decoration_class: String,
    /// Class added once the first page is rendered.
    pub ready_class: String,
    pub css_class_hooks: ClassHooks,
}

impl GalleryConfig {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(!self.api_key.trim().is_empty(), "api-key must be set");
        ensure!(
            !self.api_base_url.trim().is_empty(),
            "api-base-url must not be empty"
        );
        ensure!(self.page_size > 0, "page-size must be greater than zero");
        ensure!(
            self.page_size <= 500,
            "page-size must not exceed 500 (flickr per_page limit)"
        );
        ensure!(self.start_slide >= 1, "start-slide is 1-based");
        ensure!(
            !self.container_selector.trim().is_empty(),
            "container-selector must not be empty"
        );
        Ok(self)
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.flickr.com/services/rest/".into(),
            api_key: String::new(),
            tags: "cats".into(),
            container_selector: ".flicker-gallery".into(),
            page_size: 15,
            preload_range: 5,
            enable_thumbnails: true,
            enable_navigation: true,
            start_slide: 1,
            animation_speed: Duration::from_millis(250),
            decoration_class: "fg".into(),
            ready_class: "fg-ready".into(),
            css_class_hooks: ClassHooks::default(),
        }
    }
}
