//! Carousel controller: mounts one gallery per target container and routes
//! user input to it.

use std::sync::Arc;

use tokio::sync::mpsc::{self, Sender, UnboundedSender};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::GalleryConfig;
use crate::error::{Error, Result};
use crate::events::{GalleryCommand, GalleryNotice, GallerySnapshot};
use crate::slides::SlideState;
use crate::source::ImageSource;
use crate::strip::StripLayout;
use crate::tasks::gallery::{self, GalleryContext};

const COMMAND_QUEUE: usize = 32;

/// Handle to a mounted gallery.
#[derive(Debug, Clone)]
pub struct GalleryHandle {
    id: u64,
    target: String,
    commands: Sender<GalleryCommand>,
    snapshots: watch::Receiver<GallerySnapshot>,
}

impl GalleryHandle {
    pub fn target(&self) -> &str {
        &self.target
    }

    async fn send(&self, cmd: GalleryCommand) -> Result<()> {
        self.commands
            .send(cmd)
            .await
            .map_err(|_| Error::Closed(self.target.clone()))
    }

    pub async fn previous(&self) -> Result<()> {
        self.send(GalleryCommand::Previous).await
    }

    pub async fn next(&self) -> Result<()> {
        self.send(GalleryCommand::Next).await
    }

    /// Activate a slide directly, as a thumbnail click does (1-based).
    pub async fn jump_to(&self, position: usize) -> Result<()> {
        self.send(GalleryCommand::JumpTo(position)).await
    }

    /// Report new strip measurements after a viewport resize.
    pub async fn resize(&self, layout: StripLayout) -> Result<()> {
        self.send(GalleryCommand::Resize(layout)).await
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn state(&self) -> SlideState {
        self.snapshots.borrow().state
    }

    pub fn subscribe(&self) -> watch::Receiver<GallerySnapshot> {
        self.snapshots.clone()
    }

    /// Wait until a published snapshot satisfies `f`.
    pub async fn wait_for(&self, f: impl FnMut(&GallerySnapshot) -> bool) -> Result<GallerySnapshot> {
        let mut rx = self.snapshots.clone();
        let snap = rx
            .wait_for(f)
            .await
            .map_err(|_| Error::Closed(self.target.clone()))?;
        Ok((*snap).clone())
    }
}

struct Mounted {
    handle: GalleryHandle,
    cancel: CancellationToken,
    task: JoinHandle<anyhow::Result<()>>,
}

/// Owns the configuration and every gallery created from it.
pub struct Slider {
    cfg: Arc<GalleryConfig>,
    source: Arc<dyn ImageSource>,
    notices: Option<UnboundedSender<GalleryNotice>>,
    mounted: Vec<Mounted>,
    next_id: u64,
}

impl Slider {
    pub fn new(cfg: GalleryConfig, source: Arc<dyn ImageSource>) -> Self {
        Self {
            cfg: Arc::new(cfg),
            source,
            notices: None,
            mounted: Vec::new(),
            next_id: 0,
        }
    }

    /// Deliver [`GalleryNotice`]s (load failures, end of data) to `tx`.
    pub fn with_notices(mut self, tx: UnboundedSender<GalleryNotice>) -> Self {
        self.notices = Some(tx);
        self
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.cfg
    }

    pub fn galleries(&self) -> impl Iterator<Item = &GalleryHandle> {
        self.mounted.iter().map(|m| &m.handle)
    }

    /// Mount a gallery into `target` and start loading its first page.
    ///
    /// Must be called from within a tokio runtime.
    pub fn create(&mut self, target: impl Into<String>) -> GalleryHandle {
        let target = target.into();
        let id = self.next_id;
        self.next_id += 1;

        let initial = GallerySnapshot {
            target: target.clone(),
            classes: vec![self.cfg.decoration_class.clone()],
            state: SlideState::default(),
            html: String::new(),
            ready: false,
            detached: false,
        };
        let (snap_tx, snap_rx) = watch::channel(initial);
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE);
        let cancel = CancellationToken::new();

        let ctx = GalleryContext {
            target: target.clone(),
            cfg: Arc::clone(&self.cfg),
            source: Arc::clone(&self.source),
            snapshots: snap_tx,
            notices: self.notices.clone(),
        };
        let task = tokio::spawn(gallery::run(ctx, cmd_rx, cancel.clone()));
        info!(gallery = %target, id, "gallery created");

        let handle = GalleryHandle {
            id,
            target,
            commands: cmd_tx,
            snapshots: snap_rx,
        };
        self.mounted.push(Mounted {
            handle: handle.clone(),
            cancel,
            task,
        });
        handle
    }

    /// Mount one gallery per target, in order.
    pub fn create_all<I, T>(&mut self, targets: I) -> Vec<GalleryHandle>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        targets.into_iter().map(|t| self.create(t)).collect()
    }

    /// Detach a gallery and wait for its task to finish. Results of a fetch
    /// still in flight are discarded.
    pub async fn destroy(&mut self, handle: &GalleryHandle) {
        let Some(pos) = self.mounted.iter().position(|m| m.handle.id == handle.id) else {
            debug!(gallery = %handle.target, "destroy: gallery not mounted");
            return;
        };
        let mounted = self.mounted.remove(pos);
        Self::shutdown(mounted).await;
    }

    pub async fn destroy_all(&mut self) {
        for mounted in std::mem::take(&mut self.mounted) {
            Self::shutdown(mounted).await;
        }
    }

    async fn shutdown(mounted: Mounted) {
        mounted.cancel.cancel();
        match mounted.task.await {
            Ok(Ok(())) => info!(gallery = %mounted.handle.target, "gallery destroyed"),
            Ok(Err(err)) => warn!(gallery = %mounted.handle.target, error = %err, "gallery task failed"),
            Err(err) => warn!(gallery = %mounted.handle.target, error = %err, "gallery task panicked"),
        }
    }

    /// Add a decoration class to every mounted container.
    pub async fn add_decoration_class(&self, class: &str) -> Result<()> {
        for m in &self.mounted {
            m.handle
                .send(GalleryCommand::AddClass(class.to_owned()))
                .await?;
        }
        Ok(())
    }
}

impl Drop for Slider {
    fn drop(&mut self) {
        for m in &self.mounted {
            m.cancel.cancel();
        }
    }
}
