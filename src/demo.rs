//! Frame driver shared by the two demo variants.

use core::convert::Infallible;

use crate::error::Error;

/// A scrollable demo: initialized once, then stepped forever.
///
/// The terminal and graph variants implement this so the choice between
/// them is a value, not a build configuration.
pub trait ScrollDemo {
    /// Allocate-once setup: paint backgrounds, arm scroll regions, draw
    /// static captions and composite everything a first time.
    fn init(&mut self) -> Result<(), Error>;

    /// One run-to-completion update step.
    fn tick(&mut self) -> Result<(), Error>;

    /// Init once, then tick until the process dies. Only drawing failures
    /// escape; there is no failed-tick recovery path.
    fn run(&mut self) -> Result<Infallible, Error> {
        self.init()?;
        loop {
            self.tick()?;
        }
    }
}
