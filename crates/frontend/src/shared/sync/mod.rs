//! Синхронизация списка записей с сервером.
//!
//! A [`ListSynchronizer`] owns the rows of one page: it fetches the list,
//! rebuilds row editors from the fetch, runs the periodic refresh and
//! drives per-row saves. Every refresh takes a ticket when it is issued;
//! a response is applied only if no later-issued refresh was applied
//! before it, so an old slow response never overwrites a newer one.

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::error::ApiError;
use super::row_editor::{Editable, FieldError, RowEditor, SaveState};
use super::scheduler::Scheduler;

type IdOf<S> = <<S as ListSource>::Record as Editable>::Id;

/// Where a list comes from and where edited rows go
#[async_trait(?Send)]
pub trait ListSource {
    type Record: Editable;

    async fn fetch(&self) -> Result<Vec<Self::Record>, ApiError>;

    /// Send the full draft of one row. Lists without inline editing keep
    /// the default.
    async fn save(&self, _draft: &Self::Record) -> Result<(), ApiError> {
        Err(ApiError::Rejected("Список доступен только для чтения".to_string()))
    }
}

/// What a refresh does with rows the admin is working on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Rebuild every row from the fetch (explicit reload, after a save)
    Replace,
    /// Keep rows with unsaved edits or a save in flight (timer ticks)
    KeepEdited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A later-issued refresh already landed, the response was dropped
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Row missing or already saving
    Ignored,
}

/// Rows as currently shown
pub struct ViewState<R: Editable> {
    rows: Vec<RowEditor<R>>,
    loaded: bool,
    last_error: Option<String>,
}

impl<R: Editable> Default for ViewState<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            loaded: false,
            last_error: None,
        }
    }
}

impl<R: Editable> ViewState<R> {
    pub fn rows(&self) -> &[RowEditor<R>] {
        &self.rows
    }

    pub fn row(&self, id: &R::Id) -> Option<&RowEditor<R>> {
        self.rows.iter().find(|row| &row.id() == id)
    }

    fn row_mut(&mut self, id: &R::Id) -> Option<&mut RowEditor<R>> {
        self.rows.iter_mut().find(|row| &row.id() == id)
    }

    /// Records as last fetched, in server order
    pub fn records(&self) -> impl Iterator<Item = &R> {
        self.rows.iter().map(|row| row.record())
    }

    /// At least one fetch has been applied
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Build the editors for a fetched list.
///
/// Rebuilt editors get a fresh generation; a `Saved` acknowledgement
/// survives the rebuild so the admin still sees it. A row with a save in
/// flight is never rebuilt.
pub fn reconcile<R: Editable>(
    previous: Vec<RowEditor<R>>,
    fetched: Vec<R>,
    policy: RefreshPolicy,
    next_generation: &mut u64,
) -> Vec<RowEditor<R>> {
    let mut previous: HashMap<R::Id, RowEditor<R>> =
        previous.into_iter().map(|row| (row.id(), row)).collect();

    fetched
        .into_iter()
        .map(|record| match previous.remove(&record.id()) {
            Some(old) if old.state() == SaveState::Saving => old,
            Some(old) if policy == RefreshPolicy::KeepEdited && old.is_busy() => old,
            old => {
                *next_generation += 1;
                let mut row = RowEditor::new(record, *next_generation);
                if let Some(old) = old {
                    row.keep_acknowledgement_of(&old);
                }
                row
            }
        })
        .collect()
}

struct SyncCore<R: Editable> {
    issued: u64,
    applied: u64,
    next_generation: u64,
    view: ViewState<R>,
}

impl<R: Editable> SyncCore<R> {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn apply(&mut self, ticket: u64, fetched: Vec<R>, policy: RefreshPolicy) -> bool {
        if ticket <= self.applied {
            return false;
        }
        self.applied = ticket;
        let previous = std::mem::take(&mut self.view.rows);
        self.view.rows = reconcile(previous, fetched, policy, &mut self.next_generation);
        self.view.loaded = true;
        self.view.last_error = None;
        true
    }

    fn fail(&mut self, ticket: u64, error: &ApiError) -> bool {
        if ticket <= self.applied {
            return false;
        }
        self.view.last_error = Some(error.to_string());
        true
    }
}

struct Inner<S: ListSource> {
    source: S,
    scheduler: Rc<dyn Scheduler>,
    save_ack: Duration,
    core: RefCell<SyncCore<S::Record>>,
    // последний запланированный сброс "Сохранено" по строке
    ack_tickets: RefCell<HashMap<IdOf<S>, u64>>,
    listener: RefCell<Option<Rc<dyn Fn()>>>,
}

/// Shared handle; clones drive the same list
pub struct ListSynchronizer<S: ListSource> {
    inner: Rc<Inner<S>>,
}

impl<S: ListSource> Clone for ListSynchronizer<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: ListSource + 'static> ListSynchronizer<S> {
    pub fn new(source: S, scheduler: Rc<dyn Scheduler>, save_ack: Duration) -> Self {
        Self {
            inner: Rc::new(Inner {
                source,
                scheduler,
                save_ack,
                core: RefCell::new(SyncCore {
                    issued: 0,
                    applied: 0,
                    next_generation: 0,
                    view: ViewState::default(),
                }),
                ack_tickets: RefCell::new(HashMap::new()),
                listener: RefCell::new(None),
            }),
        }
    }

    /// Called after every visible change (no borrow is held at that point)
    pub fn on_change(&self, listener: impl Fn() + 'static) {
        *self.inner.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn source(&self) -> &S {
        &self.inner.source
    }

    pub fn with_view<T>(&self, f: impl FnOnce(&ViewState<S::Record>) -> T) -> T {
        f(&self.inner.core.borrow().view)
    }

    fn notify(&self) {
        let listener = self.inner.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }

    pub async fn refresh(&self) -> Result<RefreshOutcome, ApiError> {
        self.refresh_with(RefreshPolicy::Replace).await
    }

    pub async fn refresh_with(&self, policy: RefreshPolicy) -> Result<RefreshOutcome, ApiError> {
        let ticket = self.inner.core.borrow_mut().issue();

        match self.inner.source.fetch().await {
            Ok(records) => {
                let applied = self.inner.core.borrow_mut().apply(ticket, records, policy);
                if applied {
                    self.notify();
                    Ok(RefreshOutcome::Applied)
                } else {
                    log::debug!("Refresh #{} is stale, dropped", ticket);
                    Ok(RefreshOutcome::Stale)
                }
            }
            Err(e) => {
                log::error!("Refresh #{} failed: {}", ticket, e);
                let shown = self.inner.core.borrow_mut().fail(ticket, &e);
                if shown {
                    self.notify();
                }
                Err(e)
            }
        }
    }

    /// Refresh every `interval` until the handle is stopped or the session
    /// expires. Ticks keep rows the admin is editing.
    pub fn start_auto_refresh(&self, interval: Duration) -> AutoRefresh {
        let handle = AutoRefresh::new();
        let running = handle.clone();
        let sync = self.clone();

        self.inner.scheduler.spawn(Box::pin(async move {
            loop {
                sync.inner.scheduler.sleep(interval).await;
                if !running.is_active() {
                    break;
                }
                if let Err(e) = sync.refresh_with(RefreshPolicy::KeepEdited).await {
                    if e.is_auth_expired() {
                        running.stop();
                        break;
                    }
                }
            }
            log::debug!("Auto-refresh stopped");
        }));

        handle
    }

    /// Apply an edit to the row's draft
    pub fn edit(&self, id: &IdOf<S>, field: &str, value: String) -> Result<(), FieldError> {
        let result = {
            let mut core = self.inner.core.borrow_mut();
            match core.view.row_mut(id) {
                Some(row) => row.edit(field, value),
                None => Err(FieldError::MissingRow(format!("{:?}", id))),
            }
        };
        if result.is_ok() {
            self.notify();
        }
        result
    }

    /// Save the row's full draft.
    ///
    /// On success the list is reloaded and the row shows `Saved` for the
    /// acknowledgement period. On failure the draft stays for a retry.
    /// Dropping the future mid-save returns the row to `Idle`.
    pub async fn save_row(&self, id: &IdOf<S>) -> Result<SaveOutcome, ApiError> {
        let draft = {
            let mut core = self.inner.core.borrow_mut();
            core.view.row_mut(id).and_then(|row| row.begin_save())
        };
        let Some(draft) = draft else {
            return Ok(SaveOutcome::Ignored);
        };
        self.notify();

        let guard = SavingGuard {
            sync: self.clone(),
            id: id.clone(),
            armed: true,
        };
        let result = self.inner.source.save(&draft).await;
        guard.finish(result.is_ok());

        match result {
            Ok(()) => {
                if let Err(e) = self.refresh().await {
                    log::warn!("Reload after saving {:?} failed: {}", id, e);
                }
                self.schedule_acknowledge(id.clone());
                Ok(SaveOutcome::Saved)
            }
            Err(e) => {
                log::error!("Saving {:?} failed: {}", id, e);
                Err(e)
            }
        }
    }

    pub fn acknowledge(&self, id: &IdOf<S>) {
        {
            let mut core = self.inner.core.borrow_mut();
            if let Some(row) = core.view.row_mut(id) {
                row.acknowledge();
            }
        }
        self.notify();
    }

    /// Only the timer of the latest save of a row clears its acknowledgement
    fn schedule_acknowledge(&self, id: IdOf<S>) {
        let ticket = {
            let mut tickets = self.inner.ack_tickets.borrow_mut();
            let ticket = tickets.entry(id.clone()).or_insert(0);
            *ticket += 1;
            *ticket
        };
        let sync = self.clone();
        let delay = self.inner.save_ack;
        self.inner.scheduler.spawn(Box::pin(async move {
            sync.inner.scheduler.sleep(delay).await;
            let latest = sync.inner.ack_tickets.borrow().get(&id) == Some(&ticket);
            if latest {
                sync.acknowledge(&id);
            }
        }));
    }

    fn finish_row(&self, id: &IdOf<S>, succeeded: bool) {
        if let Ok(mut core) = self.inner.core.try_borrow_mut() {
            if let Some(row) = core.view.row_mut(id) {
                row.finish_save(succeeded);
            }
        }
        self.notify();
    }
}

/// Leaves `Saving` even when the save future is dropped half-way
struct SavingGuard<S: ListSource + 'static> {
    sync: ListSynchronizer<S>,
    id: IdOf<S>,
    armed: bool,
}

impl<S: ListSource + 'static> SavingGuard<S> {
    fn finish(mut self, succeeded: bool) {
        self.armed = false;
        self.sync.finish_row(&self.id, succeeded);
    }
}

impl<S: ListSource + 'static> Drop for SavingGuard<S> {
    fn drop(&mut self) {
        if self.armed {
            log::warn!("Save of {:?} abandoned", self.id);
            self.sync.finish_row(&self.id, false);
        }
    }
}

/// Handle of a running auto-refresh loop
#[derive(Debug, Clone)]
pub struct AutoRefresh {
    active: Arc<AtomicBool>,
}

impl AutoRefresh {
    fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// The loop exits at its next wake-up
    pub fn stop(&self) {
        self.active.store(false, Ordering::Relaxed);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::row_editor::tests::Dish;
    use crate::shared::testing::TokioScheduler;
    use std::collections::VecDeque;
    use tokio::task::LocalSet;

    #[derive(Default)]
    struct Kitchen {
        dishes: Vec<Dish>,
        fetch_delays: VecDeque<Duration>,
        fetch_failures: VecDeque<ApiError>,
        save_delay: Duration,
        save_failure: Option<ApiError>,
        fetches: usize,
        saved: Vec<Dish>,
    }

    #[derive(Clone, Default)]
    struct FakeSource {
        kitchen: Rc<RefCell<Kitchen>>,
    }

    impl FakeSource {
        fn with(dishes: Vec<Dish>) -> Self {
            let source = Self::default();
            source.kitchen.borrow_mut().dishes = dishes;
            source
        }

        fn fetches(&self) -> usize {
            self.kitchen.borrow().fetches
        }
    }

    #[async_trait(?Send)]
    impl ListSource for FakeSource {
        type Record = Dish;

        async fn fetch(&self) -> Result<Vec<Dish>, ApiError> {
            let (delay, failure, snapshot) = {
                let mut k = self.kitchen.borrow_mut();
                k.fetches += 1;
                (
                    k.fetch_delays.pop_front().unwrap_or_default(),
                    k.fetch_failures.pop_front(),
                    k.dishes.clone(),
                )
            };
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            match failure {
                Some(e) => Err(e),
                None => Ok(snapshot),
            }
        }

        async fn save(&self, draft: &Dish) -> Result<(), ApiError> {
            let (delay, failure) = {
                let k = self.kitchen.borrow();
                (k.save_delay, k.save_failure.clone())
            };
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if let Some(e) = failure {
                return Err(e);
            }
            let mut k = self.kitchen.borrow_mut();
            k.saved.push(draft.clone());
            if let Some(dish) = k.dishes.iter_mut().find(|d| d.id == draft.id) {
                *dish = draft.clone();
            }
            Ok(())
        }
    }

    fn menu() -> Vec<Dish> {
        vec![Dish::new(1, "Борщ", "350"), Dish::new(2, "Плов", "420")]
    }

    fn synchronizer(source: &FakeSource) -> ListSynchronizer<FakeSource> {
        ListSynchronizer::new(
            source.clone(),
            Rc::new(TokioScheduler),
            Duration::from_secs(2),
        )
    }

    fn names(sync: &ListSynchronizer<FakeSource>) -> Vec<String> {
        sync.with_view(|v| v.records().map(|d| d.name.clone()).collect())
    }

    #[tokio::test]
    async fn test_refresh_builds_rows_and_notifies() {
        let source = FakeSource::with(menu());
        let sync = synchronizer(&source);
        let changes = Rc::new(RefCell::new(0));
        let counter = changes.clone();
        sync.on_change(move || *counter.borrow_mut() += 1);

        assert!(!sync.with_view(|v| v.is_loaded()));
        assert_eq!(sync.refresh().await, Ok(RefreshOutcome::Applied));

        assert!(sync.with_view(|v| v.is_loaded()));
        assert_eq!(names(&sync), vec!["Борщ", "Плов"]);
        assert_eq!(*changes.borrow(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_issued_refresh_wins() {
        let source = FakeSource::with(vec![Dish::new(1, "Старое меню", "100")]);
        {
            let mut k = source.kitchen.borrow_mut();
            k.fetch_delays.push_back(Duration::from_millis(500));
            k.fetch_delays.push_back(Duration::from_millis(100));
        }
        let sync = synchronizer(&source);

        let slow = sync.refresh();
        let fast = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            source.kitchen.borrow_mut().dishes = vec![Dish::new(1, "Новое меню", "100")];
            sync.refresh().await
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(fast, Ok(RefreshOutcome::Applied));
        assert_eq!(slow, Ok(RefreshOutcome::Stale));
        assert_eq!(names(&sync), vec!["Новое меню"]);
    }

    #[tokio::test]
    async fn test_refresh_rebuilds_drafts() {
        let source = FakeSource::with(menu());
        let sync = synchronizer(&source);
        sync.refresh().await.unwrap();
        let before = sync.with_view(|v| v.row(&1).unwrap().generation());

        sync.edit(&1, "price", "999".into()).unwrap();
        sync.refresh().await.unwrap();

        sync.with_view(|v| {
            let row = v.row(&1).unwrap();
            assert_eq!(row.draft().price, "350");
            assert!(!row.is_dirty());
            assert_ne!(row.generation(), before);
        });
    }

    #[tokio::test]
    async fn test_timer_refresh_keeps_edited_rows() {
        let source = FakeSource::with(menu());
        let sync = synchronizer(&source);
        sync.refresh().await.unwrap();
        sync.edit(&1, "name", "Борщ украинский".into()).unwrap();

        source.kitchen.borrow_mut().dishes = vec![
            Dish::new(1, "Борщ", "360"),
            Dish::new(2, "Плов с бараниной", "420"),
        ];
        sync.refresh_with(RefreshPolicy::KeepEdited).await.unwrap();

        sync.with_view(|v| {
            assert_eq!(v.row(&1).unwrap().draft().name, "Борщ украинский");
            assert!(v.row(&1).unwrap().is_dirty());
            assert_eq!(v.row(&2).unwrap().record().name, "Плов с бараниной");
        });
    }

    #[tokio::test]
    async fn test_rows_removed_on_server_disappear() {
        let source = FakeSource::with(menu());
        let sync = synchronizer(&source);
        sync.refresh().await.unwrap();

        source.kitchen.borrow_mut().dishes.remove(0);
        sync.refresh_with(RefreshPolicy::KeepEdited).await.unwrap();

        assert_eq!(names(&sync), vec!["Плов"]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_rows() {
        let source = FakeSource::with(menu());
        let sync = synchronizer(&source);
        sync.refresh().await.unwrap();

        source
            .kitchen
            .borrow_mut()
            .fetch_failures
            .push_back(ApiError::Network("offline".into()));
        assert_eq!(sync.refresh().await, Err(ApiError::Network("offline".into())));

        assert_eq!(names(&sync), vec!["Борщ", "Плов"]);
        assert!(sync.with_view(|v| v.last_error().is_some()));

        sync.refresh().await.unwrap();
        assert!(sync.with_view(|v| v.last_error().is_none()));
    }

    #[tokio::test]
    async fn test_edit_of_unknown_row() {
        let source = FakeSource::with(menu());
        let sync = synchronizer(&source);
        sync.refresh().await.unwrap();

        assert_eq!(
            sync.edit(&7, "name", "Суп".into()),
            Err(FieldError::MissingRow("7".into()))
        );
        assert_eq!(sync.save_row(&7).await, Ok(SaveOutcome::Ignored));
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_reloads_and_acknowledges() {
        LocalSet::new()
            .run_until(async {
                let source = FakeSource::with(menu());
                let sync = synchronizer(&source);
                sync.refresh().await.unwrap();

                sync.edit(&2, "price", "450".into()).unwrap();
                assert_eq!(sync.save_row(&2).await, Ok(SaveOutcome::Saved));

                assert_eq!(source.kitchen.borrow().saved, vec![Dish::new(2, "Плов", "450")]);
                assert_eq!(source.fetches(), 2);
                sync.with_view(|v| {
                    let row = v.row(&2).unwrap();
                    assert_eq!(row.state(), SaveState::Saved);
                    assert_eq!(row.record().price, "450");
                    assert!(!row.is_dirty());
                });

                tokio::time::sleep(Duration::from_millis(2100)).await;
                assert_eq!(
                    sync.with_view(|v| v.row(&2).unwrap().state()),
                    SaveState::Idle
                );
            })
            .await;
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft() {
        let source = FakeSource::with(menu());
        source.kitchen.borrow_mut().save_failure = Some(ApiError::Rejected("Цена не число".into()));
        let sync = synchronizer(&source);
        sync.refresh().await.unwrap();

        sync.edit(&1, "price", "abc".into()).unwrap();
        let result = sync.save_row(&1).await;

        assert_eq!(result, Err(ApiError::Rejected("Цена не число".into())));
        assert_eq!(source.fetches(), 1);
        sync.with_view(|v| {
            let row = v.row(&1).unwrap();
            assert_eq!(row.state(), SaveState::Idle);
            assert!(row.is_dirty());
            assert_eq!(row.draft().price, "abc");
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_reload_during_save_keeps_row_saving() {
        LocalSet::new()
            .run_until(async {
                let source = FakeSource::with(menu());
                source.kitchen.borrow_mut().save_delay = Duration::from_millis(500);
                let sync = synchronizer(&source);
                sync.refresh().await.unwrap();
                sync.edit(&1, "price", "380".into()).unwrap();

                let first = sync.save_row(&1);
                let meanwhile = async {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    sync.refresh().await.unwrap();
                    let state = sync.with_view(|v| v.row(&1).unwrap().state());
                    (state, sync.save_row(&1).await)
                };
                let (first, (state, second)) = tokio::join!(first, meanwhile);

                assert_eq!(state, SaveState::Saving);
                assert_eq!(second, Ok(SaveOutcome::Ignored));
                assert_eq!(first, Ok(SaveOutcome::Saved));
                assert_eq!(source.kitchen.borrow().saved.len(), 1);
                assert_eq!(
                    sync.with_view(|v| v.row(&1).unwrap().state()),
                    SaveState::Saved
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_save_restarts_acknowledgement() {
        LocalSet::new()
            .run_until(async {
                let source = FakeSource::with(menu());
                let sync = synchronizer(&source);
                sync.refresh().await.unwrap();

                sync.edit(&2, "price", "450".into()).unwrap();
                sync.save_row(&2).await.unwrap();
                tokio::time::sleep(Duration::from_millis(1500)).await;

                sync.edit(&2, "price", "470".into()).unwrap();
                sync.save_row(&2).await.unwrap();

                // первый таймер срабатывает на 2000 мс и ничего не сбрасывает
                tokio::time::sleep(Duration::from_millis(600)).await;
                assert_eq!(
                    sync.with_view(|v| v.row(&2).unwrap().state()),
                    SaveState::Saved
                );

                tokio::time::sleep(Duration::from_millis(1500)).await;
                assert_eq!(
                    sync.with_view(|v| v.row(&2).unwrap().state()),
                    SaveState::Idle
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_save_returns_to_idle() {
        let source = FakeSource::with(menu());
        source.kitchen.borrow_mut().save_delay = Duration::from_secs(5);
        let sync = synchronizer(&source);
        sync.refresh().await.unwrap();
        sync.edit(&1, "name", "Борщ".into()).unwrap();

        let timed_out = tokio::time::timeout(Duration::from_millis(100), sync.save_row(&1)).await;

        assert!(timed_out.is_err());
        sync.with_view(|v| {
            let row = v.row(&1).unwrap();
            assert_eq!(row.state(), SaveState::Idle);
            assert!(row.is_dirty());
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_refresh_ticks_until_stopped() {
        LocalSet::new()
            .run_until(async {
                let source = FakeSource::with(menu());
                let sync = synchronizer(&source);
                let handle = sync.start_auto_refresh(Duration::from_secs(30));

                tokio::time::sleep(Duration::from_secs(95)).await;
                assert_eq!(source.fetches(), 3);
                assert!(sync.with_view(|v| v.is_loaded()));

                handle.stop();
                tokio::time::sleep(Duration::from_secs(60)).await;
                assert_eq!(source.fetches(), 3);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_refresh_stops_when_session_expires() {
        LocalSet::new()
            .run_until(async {
                let source = FakeSource::with(menu());
                source.kitchen.borrow_mut().fetch_failures.push_back(ApiError::AuthExpired);
                let sync = synchronizer(&source);
                let handle = sync.start_auto_refresh(Duration::from_secs(30));

                tokio::time::sleep(Duration::from_secs(95)).await;
                assert_eq!(source.fetches(), 1);
                assert!(!handle.is_active());
            })
            .await;
    }

    #[test]
    fn test_reconcile_keeps_saved_acknowledgement() {
        let mut generation = 0;
        let mut rows = reconcile(Vec::new(), menu(), RefreshPolicy::Replace, &mut generation);
        rows[0].begin_save();
        rows[0].finish_save(true);

        let rows = reconcile(rows, menu(), RefreshPolicy::Replace, &mut generation);
        assert_eq!(rows[0].state(), SaveState::Saved);
        assert_eq!(rows[1].state(), SaveState::Idle);
        assert_eq!(generation, 4);
    }
}
