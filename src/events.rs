use crate::slides::SlideState;
use crate::strip::StripLayout;

/// User input routed to one gallery instance.
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryCommand {
    Previous,
    Next,
    /// Activate a slide directly, e.g. from a thumbnail click (1-based).
    JumpTo(usize),
    /// The viewport or strip was resized and re-measured.
    Resize(StripLayout),
    AddClass(String),
}

/// Side channel for things the host may want to surface, such as an error
/// banner when a page fails to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryNotice {
    /// First page rendered.
    Ready { target: String, total: usize },
    FetchFailed {
        target: String,
        page: u32,
        message: String,
    },
    /// A page came back empty; the gallery stops growing here.
    EndOfData { target: String, page: u32 },
    Detached { target: String },
}

/// Current state of a target container.
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySnapshot {
    pub target: String,
    pub classes: Vec<String>,
    pub state: SlideState,
    /// Inner markup of the container. Empty until the first page arrives and
    /// after the gallery is detached.
    pub html: String,
    pub ready: bool,
    pub detached: bool,
}

impl GallerySnapshot {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
