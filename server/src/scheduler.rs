//! The delay scheduler.
//!
//! A single worker thread runs the tasks one at a time once they are due,
//! in the order of their due instants and FIFO among equal ones.

use std::{
    cmp::Ordering,
    collections::BinaryHeap,
    io,
    mem,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use log::{debug, error};
use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::{clock::Clock, error::Error};

type Task = Box<dyn FnOnce() + Send + 'static>;

struct Entry {
    due: Instant,
    sequence: u64,
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.sequence == other.sequence
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reversed, so the max-heap pops the earliest entry.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Default)]
struct Queue {
    entries: BinaryHeap<Entry>,
    next_sequence: u64,
    closed: bool,
}

struct Shared {
    queue: Mutex<Queue>,
    condvar: Condvar,
    clock: Arc<dyn Clock>,
}

/// Runs callbacks no earlier than requested.
pub struct Scheduler {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    /// Starts the worker thread.
    ///
    /// # Errors
    /// `io::Error` if the thread cannot be spawned.
    pub fn new(clock: Arc<dyn Clock>) -> io::Result<Self> {
        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue::default()),
            condvar: Condvar::new(),
            clock,
        });

        let worker = {
            let shared = shared.clone();
            thread::Builder::new()
                .name("dhcp-delay".to_owned())
                .spawn(move || work(&shared))?
        };

        Ok(Scheduler {
            shared,
            worker: Mutex::new(Some(worker)),
        })
    }

    /// Queues `task` to run once `delay` has passed and returns immediately.
    ///
    /// # Errors
    /// `Error::SchedulerClosed` after `close`.
    pub fn schedule<F>(&self, delay: Duration, task: F) -> Result<(), Error>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut queue = self.shared.queue.lock();
        if queue.closed {
            return Err(Error::SchedulerClosed);
        }

        let due = self.shared.clock.now() + delay;
        let sequence = queue.next_sequence;
        queue.next_sequence += 1;
        queue.entries.push(Entry {
            due,
            sequence,
            task: Box::new(task),
        });
        drop(queue);

        self.shared.condvar.notify_one();
        Ok(())
    }

    /// The number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.shared.queue.lock().entries.len()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.queue.lock().closed
    }

    /// Stops the worker and discards the pending tasks.
    ///
    /// Waits for a running task to finish unless called from that task.
    pub fn close(&self) {
        let discarded = {
            let mut queue = self.shared.queue.lock();
            queue.closed = true;
            mem::take(&mut queue.entries)
        };
        self.shared.condvar.notify_all();
        if !discarded.is_empty() {
            debug!("Discarded {} pending delayed tasks", discarded.len());
        }
        drop(discarded);

        let worker = self.worker.lock().take();
        if let Some(worker) = worker {
            if worker.thread().id() == thread::current().id() {
                return;
            }
            if worker.join().is_err() {
                error!("The delay worker has terminated abnormally");
            }
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.close();
    }
}

fn work(shared: &Shared) {
    let mut queue = shared.queue.lock();
    loop {
        if queue.closed {
            break;
        }

        let due = match queue.entries.peek() {
            Some(entry) => entry.due,
            None => {
                shared.condvar.wait(&mut queue);
                continue;
            }
        };
        if due > shared.clock.now() {
            let wait = shared.clock.wait_hint(due);
            shared.condvar.wait_for(&mut queue, wait);
            continue;
        }

        if let Some(entry) = queue.entries.pop() {
            MutexGuard::unlocked(&mut queue, || run(entry.task));
        }
    }
    debug!("The delay worker has stopped");
}

fn run(task: Task) {
    if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
        error!("A delayed task has panicked");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use super::*;
    use crate::clock::{ManualClock, SystemClock};

    fn wait_until<F: Fn() -> bool>(condition: F) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        condition()
    }

    #[test]
    fn runs_no_earlier_than_requested() {
        let clock = Arc::new(ManualClock::new());
        let scheduler = Scheduler::new(clock.clone()).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        let task_counter = counter.clone();
        scheduler
            .schedule(Duration::from_secs(1), move || {
                task_counter.fetch_add(1, AtomicOrdering::SeqCst);
            })
            .unwrap();

        thread::sleep(Duration::from_millis(50));
        assert_eq!(counter.load(AtomicOrdering::SeqCst), 0);

        clock.advance(Duration::from_millis(999));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(counter.load(AtomicOrdering::SeqCst), 0);

        clock.advance(Duration::from_millis(1));
        assert!(wait_until(|| counter.load(AtomicOrdering::SeqCst) == 1));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn runs_in_due_order_and_fifo_among_equals() {
        let clock = Arc::new(ManualClock::new());
        let scheduler = Scheduler::new(clock.clone()).unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, delay) in [(1, 3), (2, 1), (3, 2), (4, 1)].iter().cloned() {
            let order = order.clone();
            scheduler
                .schedule(Duration::from_secs(delay), move || order.lock().push(label))
                .unwrap();
        }

        clock.advance(Duration::from_secs(5));
        assert!(wait_until(|| order.lock().len() == 4));
        assert_eq!(*order.lock(), vec![2, 4, 3, 1]);
    }

    #[test]
    fn zero_delay_runs_on_the_system_clock() {
        let scheduler = Scheduler::new(Arc::new(SystemClock)).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        let task_counter = counter.clone();
        scheduler
            .schedule(Duration::from_secs(0), move || {
                task_counter.fetch_add(1, AtomicOrdering::SeqCst);
            })
            .unwrap();
        assert!(wait_until(|| counter.load(AtomicOrdering::SeqCst) == 1));
    }

    #[test]
    fn close_discards_pending_tasks() {
        let clock = Arc::new(ManualClock::new());
        let scheduler = Scheduler::new(clock.clone()).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        let task_counter = counter.clone();
        scheduler
            .schedule(Duration::from_secs(1), move || {
                task_counter.fetch_add(1, AtomicOrdering::SeqCst);
            })
            .unwrap();
        scheduler.close();
        assert!(scheduler.is_closed());
        assert_eq!(scheduler.pending(), 0);

        clock.advance(Duration::from_secs(2));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(counter.load(AtomicOrdering::SeqCst), 0);
    }

    #[test]
    fn refuses_tasks_after_close() {
        let scheduler = Scheduler::new(Arc::new(SystemClock)).unwrap();
        scheduler.close();
        scheduler.close();
        match scheduler.schedule(Duration::from_secs(0), || {}) {
            Err(Error::SchedulerClosed) => {}
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn survives_a_panicking_task() {
        let scheduler = Scheduler::new(Arc::new(SystemClock)).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler
            .schedule(Duration::from_secs(0), || panic!("Task failure"))
            .unwrap();
        let task_counter = counter.clone();
        scheduler
            .schedule(Duration::from_millis(1), move || {
                task_counter.fetch_add(1, AtomicOrdering::SeqCst);
            })
            .unwrap();
        assert!(wait_until(|| counter.load(AtomicOrdering::SeqCst) == 1));
    }

    #[test]
    fn a_task_may_close_its_scheduler() {
        let scheduler = Arc::new(Scheduler::new(Arc::new(SystemClock)).unwrap());
        let counter = Arc::new(AtomicUsize::new(0));

        let inner = scheduler.clone();
        let task_counter = counter.clone();
        scheduler
            .schedule(Duration::from_secs(0), move || {
                inner.close();
                task_counter.fetch_add(1, AtomicOrdering::SeqCst);
            })
            .unwrap();
        assert!(wait_until(|| counter.load(AtomicOrdering::SeqCst) == 1));
        assert!(scheduler.is_closed());
    }
}
