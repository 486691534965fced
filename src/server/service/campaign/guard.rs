//! Single-slot run guard for the DM campaign.
//!
//! At most one campaign may run per process. The guard is a shared flag with an
//! atomic check-and-set; a successful acquisition returns a `CampaignPermit` that
//! clears the flag when dropped, so the slot is released exactly once on every exit
//! path, including a panic unwinding through the run task.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Process-wide campaign run flag. Clones share the same flag.
#[derive(Clone, Default)]
pub struct CampaignGuard {
    running: Arc<AtomicBool>,
}

impl CampaignGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot if it is free.
    ///
    /// Never waits: returns `None` immediately when a run already holds the slot.
    pub fn try_acquire(&self) -> Option<CampaignPermit> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CampaignPermit {
                guard: self.clone(),
            })
    }

    /// Clears the flag. Only a permit's drop calls this, once per acquisition.
    fn release(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Proof of holding the campaign slot; releases it on drop.
#[must_use = "dropping the permit releases the campaign guard"]
pub struct CampaignPermit {
    guard: CampaignGuard,
}

impl Drop for CampaignPermit {
    fn drop(&mut self) {
        self.guard.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the initial state of a guard.
    ///
    /// Verifies that a newly created guard reports no run in progress.
    ///
    /// Expected: not running
    #[test]
    fn test_starts_released() {
        assert!(!CampaignGuard::new().is_running());
    }

    /// Tests acquiring an already held guard.
    ///
    /// Verifies that while the first permit is alive the flag stays set and any
    /// further acquisition is refused immediately.
    ///
    /// Expected: first Some, second None, flag set
    #[test]
    fn test_second_acquire_fails_while_held() {
        let guard = CampaignGuard::new();

        let permit = guard.try_acquire();
        assert!(permit.is_some());
        assert!(guard.is_running());
        assert!(guard.try_acquire().is_none());
    }

    /// Tests releasing the guard by dropping the permit.
    ///
    /// Verifies that the slot is freed for the next run once the permit goes out
    /// of scope.
    ///
    /// Expected: reacquire succeeds after drop
    #[test]
    fn test_drop_releases() {
        let guard = CampaignGuard::new();

        let permit = guard.try_acquire().unwrap();
        drop(permit);

        assert!(!guard.is_running());
        assert!(guard.try_acquire().is_some());
    }

    /// Tests that clones of a guard share one slot.
    ///
    /// Verifies that a permit taken through one clone blocks and is released for
    /// every other clone, as the bot and each spawned run hold separate clones.
    ///
    /// Expected: clone sees the run, and sees it end after the drop
    #[test]
    fn test_clones_share_slot() {
        let guard = CampaignGuard::new();
        let clone = guard.clone();

        let permit = clone.try_acquire().unwrap();
        assert!(guard.is_running());
        assert!(guard.try_acquire().is_none());

        drop(permit);

        assert!(!guard.is_running());
        assert!(!clone.is_running());
    }

    /// Tests that a panic while holding the permit still releases it.
    ///
    /// Verifies that unwinding through the holder drops the permit and clears the
    /// flag, so a crashed run cannot block later runs.
    ///
    /// Expected: flag cleared after the panicking thread unwinds
    #[test]
    fn test_panic_releases() {
        let guard = CampaignGuard::new();
        let shared = guard.clone();

        let result = std::thread::spawn(move || {
            let _permit = shared.try_acquire().unwrap();
            panic!("run failed");
        })
        .join();

        assert!(result.is_err());
        assert!(!guard.is_running());
    }

    /// Tests mutual exclusion between racing acquirers.
    ///
    /// Verifies that two tasks on separate worker threads, released together by a
    /// barrier, never both obtain the slot.
    ///
    /// Expected: exactly one success per round
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_acquire_has_one_winner() {
        for _ in 0..100 {
            let guard = CampaignGuard::new();
            let barrier = Arc::new(tokio::sync::Barrier::new(2));

            let contenders: Vec<_> = (0..2)
                .map(|_| {
                    let guard = guard.clone();
                    let barrier = barrier.clone();
                    tokio::spawn(async move {
                        barrier.wait().await;
                        guard.try_acquire()
                    })
                })
                .collect();

            let mut permits = Vec::new();
            for contender in contenders {
                permits.push(contender.await.unwrap());
            }

            assert_eq!(permits.iter().filter(|p| p.is_some()).count(), 1);
            drop(permits);
            assert!(!guard.is_running());
        }
    }
}
