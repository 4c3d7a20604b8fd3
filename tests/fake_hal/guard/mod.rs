use simple_dht::guard::PreemptionGuard;
use std::cell::Cell;
use std::rc::Rc;

/// Records how often the guarded region is entered and left. The `active` flag is shared with
/// the fake line so it can tell whether it was touched outside the guard.
#[derive(Clone, Debug, Default)]
pub struct CountingGuard {
    entered: Rc<Cell<u32>>,
    exited: Rc<Cell<u32>>,
    active: Rc<Cell<bool>>,
}

impl CountingGuard {
    pub fn new() -> CountingGuard {
        CountingGuard::default()
    }

    pub fn entered(&self) -> u32 {
        self.entered.get()
    }

    pub fn exited(&self) -> u32 {
        self.exited.get()
    }

    pub fn active_flag(&self) -> Rc<Cell<bool>> {
        self.active.clone()
    }
}

impl PreemptionGuard for CountingGuard {
    fn with<R>(&mut self, f: impl FnOnce() -> R) -> R {
        assert!(!self.active.get(), "guard entered twice");
        self.entered.set(self.entered.get() + 1);
        self.active.set(true);
        let result = f();
        self.active.set(false);
        self.exited.set(self.exited.get() + 1);
        result
    }
}
