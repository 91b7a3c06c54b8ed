// Running a render as a cancellable task
//
// Work is split into slices (row chunks, colour bands, contour levels). Between
// slices the task checks its cancel token and reports progress down a channel.
// The host polls the channel; nothing in here calls back into the host.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, info};

use crate::halley::grid::{GridBuilder, IterationGrid};
use crate::halley::{render, HalleyFractal, RenderError, RenderOutput};

#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag : Arc<AtomicBool>
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn check(&self) -> Result<(), RenderError> {
        if self.is_cancelled() {
            Err(RenderError::Cancelled)
        } else {
            Ok(())
        }
    }
}

// Sends percentages 0-100 that never go backwards. A dropped receiver is fine,
// the render just carries on without anyone watching.
#[derive(Debug, Default)]
pub struct ProgressReporter {
    sender : Option<Sender<u8>>,
    last : Cell<Option<u8>>
}

impl ProgressReporter {
    pub fn new(sender : Sender<u8>) -> ProgressReporter {
        ProgressReporter { sender: Some(sender), last: Cell::new(None) }
    }

    // Reporter that nobody listens to
    pub fn silent() -> ProgressReporter {
        ProgressReporter::default()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<u8> {
        self.last.get()
    }

    pub fn report(&self, percent : u8) {
        let percent = percent.min(100);
        if let Some(last) = self.last.get() {
            if percent <= last {
                return;
            }
        }
        self.last.set(Some(percent));
        if let Some(sender) = &self.sender {
            let _ = sender.send(percent);
        }
    }

    // Report `done` out of `total` scaled into the range start..end
    pub fn report_span(&self, span : (u8, u8), done : usize, total : usize) {
        let (start, end) = span;
        if total == 0 {
            self.report(end);
            return;
        }
        let width = (end - start) as usize;
        let done = done.min(total);
        self.report(start + ((width * done) / total) as u8);
    }

    pub fn complete(&self) {
        self.report(100);
    }
}

pub fn build_grid(
    fractal : &HalleyFractal,
    cancel : &CancelToken,
    progress : &ProgressReporter,
    span : (u8, u8)
) -> Result<IterationGrid, RenderError> {
    drive_grid(fractal.grid_builder(), cancel, progress, span)
}

// Run the remaining chunks of a builder, mapping its progress into span. The
// token is checked before every chunk, including the first.
pub fn drive_grid(
    mut builder : GridBuilder<'_>,
    cancel : &CancelToken,
    progress : &ProgressReporter,
    span : (u8, u8)
) -> Result<IterationGrid, RenderError> {
    progress.report_span(span, builder.progress() as usize, 100);
    while !builder.is_complete() {
        cancel.check()?;
        let percent = builder.step();
        progress.report_span(span, percent as usize, 100);
    }
    Ok(builder.finish())
}

// A render running on its own worker thread. Dropping the handle does not
// stop the work, call cancel() to abandon it.
pub struct RenderTask {
    cancel : CancelToken,
    progress : Receiver<u8>,
    handle : JoinHandle<Result<RenderOutput, RenderError>>
}

impl RenderTask {
    pub fn spawn(fractal : HalleyFractal) -> RenderTask {
        RenderTask::spawn_with_cancel(fractal, CancelToken::new())
    }

    // Share a token with the host, e.g. one token cancelling a batch of renders
    pub fn spawn_with_cancel(fractal : HalleyFractal, cancel : CancelToken) -> RenderTask {
        let (sender, receiver) = mpsc::channel();
        let worker_cancel = cancel.clone();
        let handle = thread::spawn(move || {
            let progress = ProgressReporter::new(sender);
            let result = render(&fractal, &worker_cancel, &progress);
            match &result {
                Ok(_) => debug!("Render of {} finished", fractal.function.name),
                Err(err) => info!("Render of {} stopped: {}", fractal.function.name, err)
            }
            result
        });
        RenderTask { cancel, progress: receiver, handle }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn progress(&self) -> &Receiver<u8> {
        &self.progress
    }

    pub fn join(self) -> Result<RenderOutput, RenderError> {
        self.handle.join().unwrap_or(Err(RenderError::WorkerPanicked))
    }
}
