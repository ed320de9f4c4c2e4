//! iCalendar core models (RFC 5545).
//!
//! This module defines the data structures for iCalendar content:
//! - Round-trip fidelity: unknown properties and parameters are preserved
//! - Deterministic serialization: properties carry sort-order tokens
//! - Type safety: temporal granularity and rule parts are closed enums

mod capability;
mod component;
mod duration;
mod parameter;
mod property;
mod rrule;
mod temporal;
mod value;

pub use capability::{
    AsComponent, DaylightSavingTime, Describable, Displayable, Locatable, Personal, Primary,
    Repeatable, StandardTime, VAlarm, VEvent, VFreeBusy, VJournal, VTimeZone, VTodo,
};
pub use component::{Component, ComponentKind, ICalendar};
pub use duration::Duration;
pub use parameter::Parameter;
pub use property::{ContentLine, Property, names};
pub(crate) use rrule::RulePart;
pub use rrule::{ByRule, ByRuleKind, Frequency, RRule, Terminator, Weekday, WeekdayNum};
pub use temporal::{DateTimeType, Temporal, UtcOffset};
pub use value::{Period, Value};
