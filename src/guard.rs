//! Keeps the timing-critical part of a read from being preempted.
//!
//! Pulse widths are measured by counting polling iterations, so anything that steals the core
//! for a few microseconds shifts the measured widths and flips bits. The whole physical read runs
//! inside [`PreemptionGuard::with`]. The guarded region is a closure, so the guard is released on
//! every exit path, including early timeouts.

/// Runs a closure with preemption disabled on the executing core.
pub trait PreemptionGuard {
    fn with<R>(&mut self, f: impl FnOnce() -> R) -> R;
}

/// Does nothing. Use this where the read already has a core or thread to itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGuard;

impl PreemptionGuard for NoGuard {
    #[inline]
    fn with<R>(&mut self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

/// Uses the global [`critical_section`] implementation provided by the platform.
#[cfg(feature = "critical-section")]
#[derive(Clone, Copy, Debug, Default)]
pub struct CriticalSection;

#[cfg(feature = "critical-section")]
impl PreemptionGuard for CriticalSection {
    #[inline]
    fn with<R>(&mut self, f: impl FnOnce() -> R) -> R {
        critical_section::with(|_| f())
    }
}

/// Platform hooks that bracket a region with interrupts disabled.
pub trait Interrupts {
    fn enter(&mut self);
    fn exit(&mut self);
}

/// Adapts an [`Interrupts`] pair into a [`PreemptionGuard`].
#[derive(Debug)]
pub struct InterruptControl<TInterrupts> {
    interrupts: TInterrupts,
}

impl<TInterrupts: Interrupts> InterruptControl<TInterrupts> {
    pub fn new(interrupts: TInterrupts) -> InterruptControl<TInterrupts> {
        InterruptControl { interrupts }
    }

    pub fn into_inner(self) -> TInterrupts {
        self.interrupts
    }
}

impl<TInterrupts: Interrupts> PreemptionGuard for InterruptControl<TInterrupts> {
    fn with<R>(&mut self, f: impl FnOnce() -> R) -> R {
        self.interrupts.enter();
        let result = f();
        self.interrupts.exit();
        result
    }
}
