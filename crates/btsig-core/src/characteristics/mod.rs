//! The built-in characteristic table.
//!
//! One module per SIG service family. Each contributes its units through
//! `register`; [`builtin`] collects the whole table for the registry.

mod automation;
mod device_info;
mod environment;
mod fitness;
mod generic;
mod health;
mod heart_rate;
mod time;
mod user_data;

use crate::unit::Unit;

/// All built-in units, in registration order.
pub(crate) fn builtin() -> Vec<Unit> {
    let mut units = Vec::new();
    generic::register(&mut units);
    device_info::register(&mut units);
    time::register(&mut units);
    health::register(&mut units);
    heart_rate::register(&mut units);
    fitness::register(&mut units);
    user_data::register(&mut units);
    environment::register(&mut units);
    automation::register(&mut units);
    units
}
