//! Interactive session state: one live sweep at a time.
//!
//! A [`Session`] holds what a front end displays (palette, loading flag,
//! run state, the latest failure notice) and restarts the sweep whenever
//! the parameters change. Each sweep runs on its own worker thread with its
//! own [`CancelToken`]. A superseded worker may keep running until its next
//! suspension point, but every view mutation it attempts is checked against
//! its token while holding the view lock, and superseding a run cancels the
//! old token under that same lock, so stale results can never land.

use crate::cancel::CancelToken;
use crate::error::SwatchError;
use crate::generator::{PaletteGenerator, RunState, SweepEvent};
use crate::palette::Palette;
use crate::params::SwatchParams;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

/// What a front end renders.
#[derive(Debug, Clone, Default)]
pub struct SessionView {
    pub params: Option<SwatchParams>,
    pub palette: Palette,
    pub loading: bool,
    pub state: RunState,
    /// Latest resolver failure, until dismissed or replaced.
    pub notice: Option<String>,
    /// Incremented every time a run starts.
    pub generation: u64,
}

#[derive(Default)]
struct Runs {
    current: Option<CancelToken>,
    workers: Vec<JoinHandle<()>>,
}

/// Owns the view and the worker running the current sweep.
pub struct Session {
    generator: Arc<PaletteGenerator>,
    view: Arc<Mutex<SessionView>>,
    runs: Mutex<Runs>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Session {
    pub fn new(generator: Arc<PaletteGenerator>) -> Self {
        Self {
            generator,
            view: Arc::new(Mutex::new(SessionView::default())),
            runs: Mutex::new(Runs::default()),
        }
    }

    /// Cancels any running sweep and starts a fresh one for `params`.
    ///
    /// The palette is cleared immediately; it is never carried over between
    /// parameter sets.
    pub fn set_params(&self, params: SwatchParams) -> Result<(), SwatchError> {
        let mut runs = lock(&self.runs);
        let token = CancelToken::new();
        let generation = {
            let mut view = lock(&self.view);
            if let Some(previous) = runs.current.replace(token.clone()) {
                previous.cancel();
            }
            view.params = Some(params);
            view.palette.clear();
            view.loading = true;
            view.state = RunState::Sweeping;
            view.generation += 1;
            view.generation
        };

        reap_finished(&mut runs.workers);

        let generator = Arc::clone(&self.generator);
        let view = Arc::clone(&self.view);
        let worker_token = token.clone();
        let spawned = thread::Builder::new()
            .name(format!("swatch-sweep-{generation}"))
            .spawn(move || run_sweep(&generator, &view, params, &worker_token, generation));
        match spawned {
            Ok(handle) => {
                runs.workers.push(handle);
                Ok(())
            }
            Err(e) => {
                log::error!("failed to start sweep worker: {e}");
                self.abandon_start(&mut runs, &token);
                Err(e.into())
            }
        }
    }

    /// Rolls the view back out of `Sweeping` for a run whose worker never started.
    fn abandon_start(&self, runs: &mut Runs, token: &CancelToken) {
        runs.current = None;
        let mut view = lock(&self.view);
        token.cancel();
        view.loading = false;
        view.state = RunState::Cancelled;
    }

    /// Cancels the running sweep without starting another.
    pub fn cancel(&self) {
        let mut runs = lock(&self.runs);
        if let Some(token) = runs.current.take() {
            let mut view = lock(&self.view);
            token.cancel();
            if view.state == RunState::Sweeping {
                view.state = RunState::Cancelled;
                view.loading = false;
            }
        }
    }

    /// A copy of the current view.
    pub fn snapshot(&self) -> SessionView {
        lock(&self.view).clone()
    }

    /// Clears the failure notice.
    pub fn dismiss_notice(&self) {
        lock(&self.view).notice = None;
    }

    /// Blocks until every worker started so far, current or superseded, has exited.
    pub fn wait(&self) {
        let workers = std::mem::take(&mut lock(&self.runs).workers);
        workers.into_iter().for_each(join_worker);
    }
}

fn join_worker(worker: JoinHandle<()>) {
    if worker.join().is_err() {
        log::error!("sweep worker panicked");
    }
}

/// Joins workers that have already exited so handles do not pile up.
fn reap_finished(workers: &mut Vec<JoinHandle<()>>) {
    let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(workers)
        .into_iter()
        .partition(|worker| worker.is_finished());
    *workers = running;
    finished.into_iter().for_each(join_worker);
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(token) = lock(&self.runs).current.take() {
            token.cancel();
        }
    }
}

fn run_sweep(
    generator: &PaletteGenerator,
    view: &Mutex<SessionView>,
    params: SwatchParams,
    token: &CancelToken,
    generation: u64,
) {
    let outcome = generator.generate(params, token, |event| {
        let mut view = lock(view);
        if token.is_cancelled() {
            return;
        }
        match event {
            SweepEvent::Swatch(swatch) => {
                view.palette.insert(swatch);
            }
            SweepEvent::Failed(failure) => {
                view.notice = Some(format!(
                    "failed to fetch name for {}: {}",
                    failure.hex, failure.message
                ));
            }
        }
    });

    let mut view = lock(view);
    if token.is_cancelled() {
        log::debug!("run {generation} superseded, leaving view untouched");
        return;
    }
    view.loading = false;
    view.state = outcome.state;
}
