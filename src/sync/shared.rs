//! ISR-safe driver wrapper using critical sections.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::driver::ksz::Ksz8851;

/// ISR-safe slot holding a [`Ksz8851`].
///
/// The slot starts empty so it can live in a `static`; install the driver
/// once its platform exists. All access goes through
/// `critical_section::with()`, disabling interrupts for the duration of the
/// closure.
///
/// # Example
///
/// ```ignore
/// static ETH: SharedKsz8851<Board> = SharedKsz8851::new();
///
/// ETH.install(Ksz8851::new(board, config));
/// ETH.with(|eth| eth.init()).unwrap()?;
///
/// #[interrupt]
/// fn EXTI0() {
///     ETH.with(|eth| {
///         if let Ok(status) = eth.interrupt_status() {
///             eth.clear_interrupts(status).ok();
///         }
///     });
/// }
/// ```
pub struct SharedKsz8851<P> {
    slot: Mutex<RefCell<Option<Ksz8851<P>>>>,
}

impl<P> SharedKsz8851<P> {
    /// Create an empty slot (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    /// Put a driver in the slot, returning the one it replaces.
    pub fn install(&self, driver: Ksz8851<P>) -> Option<Ksz8851<P>> {
        critical_section::with(|cs| self.slot.borrow(cs).replace(Some(driver)))
    }

    /// Remove the driver from the slot.
    pub fn take(&self) -> Option<Ksz8851<P>> {
        critical_section::with(|cs| self.slot.borrow(cs).take())
    }

    /// A driver is installed
    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.slot.borrow(cs).borrow().is_some())
    }

    /// Execute a closure with exclusive access to the driver.
    ///
    /// Returns `None` when no driver is installed.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Ksz8851<P>) -> R,
    {
        critical_section::with(|cs| self.slot.borrow_ref_mut(cs).as_mut().map(f))
    }

    /// Like [`with`](Self::with), but also returns `None` if the driver is
    /// already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Ksz8851<P>) -> R,
    {
        critical_section::with(|cs| {
            let mut slot = self.slot.borrow(cs).try_borrow_mut().ok()?;
            slot.as_mut().map(f)
        })
    }
}

impl<P> Default for SharedKsz8851<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::bringup::State;
    use crate::driver::config::DriverConfig;
    use crate::testing::SimChip;

    fn driver() -> Ksz8851<SimChip> {
        Ksz8851::new(
            SimChip::new(),
            DriverConfig::new().with_interface(SimChip::interface()),
        )
    }

    #[test]
    fn empty_slot() {
        let shared: SharedKsz8851<SimChip> = SharedKsz8851::new();
        assert!(!shared.is_installed());
        assert_eq!(shared.with(|eth| eth.state()), None);
    }

    #[test]
    fn install_then_use() {
        let shared = SharedKsz8851::new();
        assert!(shared.install(driver()).is_none());

        let result = shared.with(|eth| eth.init().map(|report| report.is_complete()));
        assert_eq!(result, Some(Ok(true)));
        assert_eq!(shared.with(|eth| eth.state()), Some(State::Ready));
    }

    #[test]
    fn try_with_rejects_reentry() {
        let shared = SharedKsz8851::new();
        shared.install(driver());

        let nested = shared.with(|_| shared.try_with(|eth| eth.state()));
        assert_eq!(nested, Some(None));
        assert_eq!(shared.try_with(|eth| eth.state()), Some(State::Created));
    }

    #[test]
    fn install_returns_previous_driver() {
        let shared = SharedKsz8851::new();
        shared.install(driver());
        shared.with(|eth| eth.init()).unwrap().unwrap();

        let previous = shared.install(driver()).unwrap();
        assert_eq!(previous.state(), State::Ready);
        assert_eq!(shared.with(|eth| eth.state()), Some(State::Created));
    }

    #[test]
    fn take_empties_slot() {
        let shared = SharedKsz8851::new();
        shared.install(driver());

        let eth = shared.take().unwrap();
        assert_eq!(eth.state(), State::Created);
        assert!(!shared.is_installed());
    }

    #[test]
    fn static_slot() {
        static ETH: SharedKsz8851<SimChip> = SharedKsz8851::new();
        ETH.install(driver());
        assert!(ETH.is_installed());
        ETH.take();
    }
}
