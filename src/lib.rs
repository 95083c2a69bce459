//! Paginated Flickr gallery carousel.
//!
//! A [`Slider`] mounts one gallery per target container. Each gallery loads a
//! page of photos for the configured tags, renders slide and thumbnail markup,
//! and fetches the next page when the viewer nears the end of what is loaded.

pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod markup;
pub mod slider;
pub mod slides;
pub mod source;
pub mod strip;
pub mod tasks {
    pub mod gallery;
}

pub use config::{ClassHooks, GalleryConfig};
pub use error::{Error, SourceError};
pub use events::{GalleryCommand, GalleryNotice, GallerySnapshot};
pub use slider::{GalleryHandle, Slider};
pub use slides::{SlideState, SlideTrack, Transition};
pub use source::{FlickrSource, ImageRecord, ImageSource};
pub use strip::StripLayout;
