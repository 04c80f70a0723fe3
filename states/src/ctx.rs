use std::any::{Any, TypeId, type_name};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::runtime::{UpdateChannel, Waker};
use crate::{
    Command, CommandSnapshot, Compute, Dep, State, StateError, StateSyncStatus, Updater,
};

/// Upper bound on compute passes per `run_computed` call. A chain of computes
/// deeper than this indicates a dependency cycle.
const MAX_COMPUTE_PASSES: usize = 16;

pub(crate) enum Entry {
    State(Box<dyn State>),
    Compute {
        value: Box<dyn Compute>,
        status: StateSyncStatus,
    },
}

impl Entry {
    pub(crate) fn as_any(&self) -> &dyn Any {
        match self {
            Self::State(state) => state.as_any(),
            Self::Compute { value, .. } => value.as_any(),
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        match self {
            Self::State(state) => state.as_any_mut(),
            Self::Compute { value, .. } => value.as_any_mut(),
        }
    }
}

/// Owner of all states, computes and commands of the application.
///
/// Lives on the UI thread. Commands run as tokio tasks and talk back through
/// [`Updater`]s; their changes are applied by [`StateCtx::sync_computes`].
pub struct StateCtx {
    entries: BTreeMap<TypeId, Entry>,
    names: BTreeMap<TypeId, &'static str>,
    // dependency -> computes that read it
    dependents: BTreeMap<TypeId, Vec<TypeId>>,
    commands: BTreeMap<TypeId, Arc<dyn Command>>,
    queue: Vec<(TypeId, &'static str)>,
    channel: UpdateChannel,
    waker: Option<Waker>,
    tasks: JoinSet<()>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("entries", &self.names.values().collect::<Vec<_>>())
            .field("commands", &self.commands.len())
            .field("queued", &self.queue.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            names: BTreeMap::new(),
            dependents: BTreeMap::new(),
            commands: BTreeMap::new(),
            queue: Vec::new(),
            channel: UpdateChannel::default(),
            waker: None,
            tasks: JoinSet::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        self.names.insert(id, type_name::<T>());
        self.entries.insert(id, Entry::State(Box::new(state)));
    }

    /// Records a compute. It starts dirty so the next `run_computed` fills it.
    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        for dep in compute.deps().iter() {
            let dependents = self.dependents.entry(*dep).or_default();
            if !dependents.contains(&id) {
                dependents.push(id);
            }
        }
        self.names.insert(id, type_name::<T>());
        self.entries.insert(
            id,
            Entry::Compute {
                value: Box::new(compute),
                status: StateSyncStatus::Dirty,
            },
        );
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Arc::new(command));
    }

    /// Installs a callback fired whenever an updater queues a change.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.channel.sender(), self.waker.clone())
    }

    pub fn try_state<T: State>(&self) -> Result<&T, StateError> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.as_any().downcast_ref::<T>())
            .ok_or_else(StateError::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was not added with [`StateCtx::add_state`].
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|_| panic!("state {} is not registered", type_name::<T>()))
    }

    /// Mutable access to a state. Dependents are marked dirty up front, so
    /// prefer [`StateCtx::update`] when the write is conditional.
    ///
    /// # Panics
    /// Panics if `T` was not added with [`StateCtx::add_state`].
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.mark_dependents_dirty(id);
        self.entries
            .get_mut(&id)
            .and_then(|entry| entry.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("state {} is not registered", type_name::<T>()))
    }

    /// Applies `f` to a state and marks its dependents dirty.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    /// Latest value of a compute, `None` if it was never recorded.
    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.as_any().downcast_ref::<T>())
    }

    pub fn try_cached<T: Compute>(&self) -> Result<&T, StateError> {
        self.cached::<T>()
            .ok_or_else(StateError::compute_not_found::<T>)
    }

    pub fn status_of(&self, id: &TypeId) -> Option<StateSyncStatus> {
        match self.entries.get(id)? {
            Entry::State(_) => None,
            Entry::Compute { status, .. } => Some(*status),
        }
    }

    pub fn mark_dirty(&mut self, id: &TypeId) {
        if let Some(Entry::Compute { status, .. }) = self.entries.get_mut(id) {
            *status = StateSyncStatus::Dirty;
        }
    }

    pub fn mark_clean(&mut self, id: &TypeId) {
        if let Some(Entry::Compute { status, .. }) = self.entries.get_mut(id) {
            *status = StateSyncStatus::Clean;
        }
    }

    fn mark_dependents_dirty(&mut self, id: TypeId) {
        let Some(dependents) = self.dependents.get(&id) else {
            return;
        };
        for dependent in dependents {
            if let Some(Entry::Compute { status, .. }) = self.entries.get_mut(dependent) {
                *status = StateSyncStatus::Dirty;
            }
        }
    }

    /// Applies every queued update and reaps finished command tasks.
    ///
    /// Returns the number of updates applied.
    pub fn sync_computes(&mut self) -> usize {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(err) = joined
                && err.is_panic()
            {
                log::error!("StateCtx: command task panicked: {err}");
            }
        }

        let updates: Vec<_> = self.channel.drain().collect();
        let mut applied = 0;
        for update in updates {
            let Some(entry) = self.entries.get_mut(&update.target) else {
                log::warn!(
                    "StateCtx: dropping update for unregistered {}",
                    update.type_name
                );
                continue;
            };
            if (update.apply)(entry.as_any_mut()) {
                self.mark_dependents_dirty(update.target);
                applied += 1;
            }
        }
        applied
    }

    /// Re-runs dirty computes until nothing is dirty.
    pub fn run_computed(&mut self) {
        let updater = self.updater();
        for _ in 0..MAX_COMPUTE_PASSES {
            let dirty: Vec<TypeId> = self
                .entries
                .iter()
                .filter_map(|(id, entry)| match entry {
                    Entry::Compute {
                        status: StateSyncStatus::Dirty | StateSyncStatus::Init,
                        ..
                    } => Some(*id),
                    _ => None,
                })
                .collect();
            if dirty.is_empty() {
                return;
            }

            for id in &dirty {
                self.mark_clean(id);
            }
            for id in &dirty {
                if let Some(Entry::Compute { value, .. }) = self.entries.get(id) {
                    value.compute(Dep::new(&self.entries), updater.clone());
                }
            }
            self.sync_computes();
        }
        log::warn!("StateCtx: computes still dirty after {MAX_COMPUTE_PASSES} passes");
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, entry) in &self.entries {
            match entry {
                Entry::State(state) => {
                    if let Some(cloned) = state.clone_boxed() {
                        snap.insert_state(*id, cloned);
                    }
                }
                Entry::Compute { value, .. } => {
                    if let Some(cloned) = value.clone_boxed() {
                        snap.insert_compute(*id, cloned);
                    }
                }
            }
        }
        snap
    }

    pub fn enqueue_command<T: Command>(&mut self) {
        self.queue.push((TypeId::of::<T>(), type_name::<T>()));
    }

    /// Spawns every queued command on the current tokio runtime.
    ///
    /// Each command gets its own snapshot taken at flush time.
    pub fn flush_commands(&mut self) {
        let queue = std::mem::take(&mut self.queue);
        if queue.is_empty() {
            return;
        }
        if tokio::runtime::Handle::try_current().is_err() {
            log::error!(
                "StateCtx: no tokio runtime entered, dropping {} command(s)",
                queue.len()
            );
            return;
        }

        for (id, name) in queue {
            let Some(command) = self.commands.get(&id).cloned() else {
                log::error!("StateCtx: {}", StateError::CommandNotFound { type_name: name });
                continue;
            };
            log::debug!("StateCtx: running {name}");
            let future = command.run(self.snapshot(), self.updater(), self.cancel.child_token());
            self.tasks.spawn(future);
        }
    }

    /// Enqueues and immediately flushes a command.
    pub fn dispatch<T: Command>(&mut self) {
        self.enqueue_command::<T>();
        self.flush_commands();
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_set_mut(&mut self) -> &mut JoinSet<()> {
        &mut self.tasks
    }

    /// Cancels outstanding commands and waits for them to finish.
    pub async fn shutdown(&mut self) {
        self.cancel.cancel();
        self.tasks.shutdown().await;
        self.sync_computes();
    }
}
