//! What the module consumes from the host game
//!
//! The host owns the bomb: the serial code, the roster of modules and
//! which of them are solved, and the pass/strike bookkeeping. The
//! module never pushes events to the host beyond pass/strike; everything
//! else is polled through this trait once per tick.

/// Host-side collaborator interface.
pub trait BombHost {
    /// Alphanumeric device identifier, at least 6 characters
    fn serial_number(&self) -> String;

    /// Names of every solvable module on the device (including this one)
    fn solvable_modules(&self) -> Vec<String>;

    /// Names of the modules solved so far
    fn solved_modules(&self) -> Vec<String>;

    /// Externally configurable exclusion list. `default_ignore` is what
    /// the module suggests when the host has no configuration of its
    /// own; at minimum it contains the module's own name.
    fn ignored_modules(&self, own_name: &str, default_ignore: &[&str]) -> Vec<String>;

    /// Report terminal success
    fn handle_pass(&mut self);

    /// Report one failed submission attempt
    fn handle_strike(&mut self);
}
