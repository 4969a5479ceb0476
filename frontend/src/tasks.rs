//! Background loads keyed by what they fetch. Starting a load for a purpose
//! aborts the one already in flight for it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};
use tracing::debug;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskPurpose {
    DashboardLoad,
    SummaryLoad,
    UserInfo,
}

#[derive(Debug, Default)]
pub struct TaskRegistry {
    handles: HashMap<TaskPurpose, AbortHandle>,
}

pub type SharedTasks = Rc<RefCell<TaskRegistry>>;

impl TaskRegistry {
    /// Wraps `task` so it can be aborted, superseding any earlier task with
    /// the same purpose.
    pub fn register<F: Future>(&mut self, purpose: TaskPurpose, task: F) -> Abortable<F> {
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.handles.insert(purpose, handle) {
            if !previous.is_aborted() {
                debug!("superseding in-flight {:?}", purpose);
            }
            previous.abort();
        }
        Abortable::new(task, registration)
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

pub fn spawn_keyed<F>(tasks: &SharedTasks, purpose: TaskPurpose, task: F)
where
    F: Future<Output = ()> + 'static,
{
    let task = tasks.borrow_mut().register(purpose, task);
    spawn_local(async move {
        if task.await.is_err() {
            debug!("{:?} cancelled before completion", purpose);
        }
    });
}
