use std::time::Duration;

use flickr_gallery_slider::config::{ClassHooks, GalleryConfig};

#[test]
fn empty_document_takes_defaults() {
    let cfg: GalleryConfig = serde_yaml::from_str("{}").unwrap();
    assert_eq!(cfg.api_base_url, "https://api.flickr.com/services/rest/");
    assert_eq!(cfg.tags, "cats");
    assert_eq!(cfg.container_selector, ".flicker-gallery");
    assert_eq!(cfg.page_size, 15);
    assert_eq!(cfg.preload_range, 5);
    assert!(cfg.enable_thumbnails);
    assert!(cfg.enable_navigation);
    assert_eq!(cfg.start_slide, 1);
    assert_eq!(cfg.animation_speed, Duration::from_millis(250));
    assert_eq!(cfg.css_class_hooks, ClassHooks::default());
}

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
api-key: "d730e1b0b4851487"
tags: dogs,puppies
page-size: 30
preload-range: 2
enable-thumbnails: false
animation-speed: 1s
css-class-hooks:
  active: is-active
  nav-active-item: thumb-on
"#;
    let cfg: GalleryConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.api_key, "d730e1b0b4851487");
    assert_eq!(cfg.tags, "dogs,puppies");
    assert_eq!(cfg.page_size, 30);
    assert_eq!(cfg.preload_range, 2);
    assert!(!cfg.enable_thumbnails);
    assert_eq!(cfg.animation_speed, Duration::from_secs(1));
    assert_eq!(cfg.css_class_hooks.active, "is-active");
    assert_eq!(cfg.css_class_hooks.nav_active_item, "thumb-on");
    assert_eq!(cfg.css_class_hooks.collapsed_item, "fg-collapsed");
}

#[test]
fn unknown_keys_are_ignored() {
    let yaml = r#"
tags: birds
slide-number: 4
selectors:
  galleryList: legacy
"#;
    let cfg: GalleryConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.tags, "birds");
}

#[test]
fn validation_requires_api_key() {
    let err = GalleryConfig::default().validated().unwrap_err();
    assert!(err.to_string().contains("api-key"));
}

#[test]
fn validation_rejects_zero_page_size() {
    let cfg = GalleryConfig {
        api_key: "k".into(),
        page_size: 0,
        ..GalleryConfig::default()
    };
    assert!(cfg.validated().is_err());
}

#[test]
fn validated_config_passes_through() {
    let cfg = GalleryConfig {
        api_key: "k".into(),
        ..GalleryConfig::default()
    };
    let cfg = cfg.validated().unwrap();
    assert_eq!(cfg.page_size, 15);
}

#[test]
fn loads_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gallery.yaml");
    std::fs::write(&path, "api-key: abc\ncontainer-selector: \"#photos\"\n").unwrap();
    let cfg = GalleryConfig::from_yaml_file(&path).unwrap();
    assert_eq!(cfg.api_key, "abc");
    assert_eq!(cfg.container_selector, "#photos");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GalleryConfig::from_yaml_file(dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, flickr_gallery_slider::Error::Io(_)));
}
