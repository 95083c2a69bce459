use std::sync::Arc;

use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{Receiver, UnboundedSender};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::GalleryConfig;
use crate::document::Document;
use crate::error::SourceError;
use crate::events::{GalleryCommand, GalleryNotice, GallerySnapshot};
use crate::markup::{self, RenderOptions};
use crate::slides::{SlideTrack, Transition};
use crate::source::{ImageRecord, ImageSource};

type FetchResult = (u32, Result<Vec<ImageRecord>, SourceError>);

/// Everything one gallery instance needs to run.
pub struct GalleryContext {
    pub target: String,
    pub cfg: Arc<GalleryConfig>,
    pub source: Arc<dyn ImageSource>,
    pub snapshots: watch::Sender<GallerySnapshot>,
    pub notices: Option<UnboundedSender<GalleryNotice>>,
}

impl GalleryContext {
    fn notify(&self, notice: GalleryNotice) {
        if let Some(tx) = &self.notices {
            let _ = tx.send(notice);
        }
    }
}

struct Instance {
    ctx: GalleryContext,
    doc: Document,
    track: SlideTrack,
    fetches: JoinSet<FetchResult>,
}

impl Instance {
    fn new(ctx: GalleryContext) -> Self {
        let mut doc = Document::new(ctx.target.clone());
        doc.add_class(&ctx.cfg.decoration_class);
        let mut track = SlideTrack::new(ctx.cfg.preload_range);
        track.set_start(ctx.cfg.start_slide);
        Self {
            ctx,
            doc,
            track,
            fetches: JoinSet::new(),
        }
    }

    fn publish(&self) {
        self.ctx
            .snapshots
            .send_replace(self.doc.snapshot(&self.ctx.cfg, &self.track));
    }

    fn spawn_fetch(&mut self, page: u32) {
        let source = Arc::clone(&self.ctx.source);
        let tags = self.ctx.cfg.tags.clone();
        let page_size = self.ctx.cfg.page_size;
        self.fetches.spawn(async move {
            let res = source.fetch_page(&tags, page, page_size).await;
            (page, res)
        });
    }

    fn on_fetched(&mut self, page: u32, res: Result<Vec<ImageRecord>, SourceError>) {
        let first_page = !self.doc.is_mounted();
        match res {
            Ok(records) if first_page => self.mount(records),
            Ok(records) if records.is_empty() => {
                self.track.finish_preload(records);
                info!(page, "no more photos");
                self.ctx.notify(GalleryNotice::EndOfData {
                    target: self.ctx.target.clone(),
                    page,
                });
            }
            Ok(records) => {
                let active = self.track.state().current_index;
                if let Some(added) = self.track.finish_preload(records.clone()) {
                    let opts = RenderOptions::new(&self.ctx.cfg).starting_at(*added.start());
                    self.doc.append(markup::render(&records, active, &opts));
                    debug!(page, total = self.track.state().total_loaded, "page appended");
                }
            }
            Err(err) => {
                self.track.abandon_preload();
                warn!(page, error = %err, "failed to load photo page");
                self.ctx.notify(GalleryNotice::FetchFailed {
                    target: self.ctx.target.clone(),
                    page,
                    message: err.to_string(),
                });
            }
        }
        self.publish();
    }

    fn mount(&mut self, records: Vec<ImageRecord>) {
        let added = self.track.append(records.clone());
        let active = self.track.state().current_index;
        let opts = RenderOptions::new(&self.ctx.cfg).starting_at(*added.start());
        self.doc.mount(markup::render(&records, active, &opts));
        self.doc.mark_ready(&self.ctx.cfg.ready_class);
        let total = self.track.state().total_loaded;
        info!(total, "gallery ready");
        self.ctx.notify(GalleryNotice::Ready {
            target: self.ctx.target.clone(),
            total,
        });
    }

    fn on_command(&mut self, cmd: GalleryCommand) {
        let transition = match cmd {
            GalleryCommand::Previous => self.track.retreat(),
            GalleryCommand::Next => self.track.advance(),
            GalleryCommand::JumpTo(n) => self.track.jump_to(n),
            GalleryCommand::Resize(layout) => {
                self.track.set_layout(layout);
                self.publish();
                return;
            }
            GalleryCommand::AddClass(class) => {
                if self.doc.add_class(&class) {
                    self.publish();
                }
                return;
            }
        };

        if let Transition::Moved { touched, .. } = transition {
            self.doc.refresh(&self.ctx.cfg, &self.track, &touched);
            if let Some(page) = self.track.begin_preload() {
                self.spawn_fetch(page);
            }
            self.publish();
        }
    }

    fn detach(&mut self) {
        self.fetches.abort_all();
        self.doc.detach();
        self.publish();
        self.ctx.notify(GalleryNotice::Detached {
            target: self.ctx.target.clone(),
        });
    }
}

/// Drives one gallery: loads the first page, applies user commands, and
/// appends preloaded pages until cancelled.
#[instrument(skip_all, fields(gallery = %ctx.target))]
pub async fn run(
    ctx: GalleryContext,
    mut commands: Receiver<GalleryCommand>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut inst = Instance::new(ctx);
    inst.publish();
    let first_page = inst.track.state().page;
    inst.spawn_fetch(first_page);

    loop {
        select! {
            biased;

            _ = cancel.cancelled() => {
                debug!("cancel received; detaching gallery");
                break;
            }

            Some(joined) = inst.fetches.join_next() => {
                match joined {
                    Ok((page, res)) => inst.on_fetched(page, res),
                    Err(err) => {
                        inst.track.abandon_preload();
                        warn!(error = %err, "photo fetch task failed");
                    }
                }
            }

            cmd = commands.recv() => match cmd {
                Some(cmd) => inst.on_command(cmd),
                None => {
                    debug!("command channel closed; detaching gallery");
                    break;
                }
            }
        }
    }

    inst.detach();
    Ok(())
}
