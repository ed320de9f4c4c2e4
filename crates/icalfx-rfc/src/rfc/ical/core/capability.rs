//! Typed component wrappers and the capability traits they implement.
//!
//! Each wrapper is a [`Component`] of a fixed kind. The traits group the
//! properties RFC 5545 §3.6 allows per kind and add fluent builders for them,
//! so `VEvent::new().with_summary(..)` compiles while `VAlarm::new().with_rrule(..)`
//! does not.

use std::ops::{Deref, DerefMut};

use chrono::{SubsecRound, Utc};

use super::property::names;
use super::{Component, ComponentKind, Duration, Parameter, Property, RRule, Temporal, UtcOffset};
use crate::error::{RfcError, RfcResult};

/// Access to the wrapped component.
pub trait AsComponent {
    fn component(&self) -> &Component;
    fn component_mut(&mut self) -> &mut Component;
}

macro_rules! typed_component {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(Component);

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self(Component::new($kind))
            }

            #[must_use]
            pub fn into_inner(self) -> Component {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsComponent for $name {
            fn component(&self) -> &Component {
                &self.0
            }

            fn component_mut(&mut self) -> &mut Component {
                &mut self.0
            }
        }

        impl Deref for $name {
            type Target = Component;

            fn deref(&self) -> &Component {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Component {
                &mut self.0
            }
        }

        impl From<$name> for Component {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<Component> for $name {
            type Error = RfcError;

            fn try_from(component: Component) -> RfcResult<Self> {
                if component.kind() == $kind {
                    Ok(Self(component))
                } else {
                    Err(RfcError::ValidationError(format!(
                        "expected {}, found {}",
                        $kind,
                        component.name()
                    )))
                }
            }
        }
    };
}

typed_component!(
    /// VEVENT (RFC 5545 §3.6.1).
    VEvent,
    ComponentKind::Event
);
typed_component!(
    /// VTODO (RFC 5545 §3.6.2).
    VTodo,
    ComponentKind::Todo
);
typed_component!(
    /// VJOURNAL (RFC 5545 §3.6.3).
    VJournal,
    ComponentKind::Journal
);
typed_component!(
    /// VFREEBUSY (RFC 5545 §3.6.4).
    VFreeBusy,
    ComponentKind::FreeBusy
);
typed_component!(
    /// VALARM (RFC 5545 §3.6.6).
    VAlarm,
    ComponentKind::Alarm
);
typed_component!(
    /// VTIMEZONE (RFC 5545 §3.6.5).
    VTimeZone,
    ComponentKind::Timezone
);
typed_component!(StandardTime, ComponentKind::Standard);
typed_component!(DaylightSavingTime, ComponentKind::Daylight);

/// DTSTART and COMMENT.
pub trait Primary: AsComponent + Sized {
    #[must_use]
    fn with_dtstart(mut self, start: Temporal) -> Self {
        self.component_mut()
            .set_property(Property::temporal(names::DTSTART, start));
        self
    }

    #[must_use]
    fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.component_mut()
            .add_property(Property::text(names::COMMENT, comment));
        self
    }

    fn comments(&self) -> Vec<&str> {
        self.component()
            .get_properties(names::COMMENT)
            .into_iter()
            .filter_map(Property::as_text)
            .collect()
    }
}

/// UID, DTSTAMP, ORGANIZER, ATTENDEE and URL.
pub trait Personal: AsComponent + Sized {
    #[must_use]
    fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.component_mut()
            .set_property(Property::text(names::UID, uid));
        self
    }

    /// Sets a random (v4) UUID as UID.
    #[must_use]
    fn with_generated_uid(self) -> Self {
        self.with_uid(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    fn with_dtstamp(mut self, stamp: Temporal) -> Self {
        self.component_mut()
            .set_property(Property::temporal(names::DTSTAMP, stamp));
        self
    }

    /// Sets DTSTAMP to the current UTC time, truncated to seconds.
    #[must_use]
    fn with_dtstamp_now(self) -> Self {
        self.with_dtstamp(Temporal::Utc(Utc::now().trunc_subsecs(0)))
    }

    #[must_use]
    fn with_organizer(mut self, address: impl Into<String>) -> Self {
        self.component_mut()
            .set_property(Property::cal_address(names::ORGANIZER, address));
        self
    }

    #[must_use]
    fn with_attendee(mut self, address: impl Into<String>, cn: Option<&str>) -> Self {
        let mut prop = Property::cal_address(names::ATTENDEE, address);
        if let Some(cn) = cn {
            prop.add_param(Parameter::cn(cn));
        }
        self.component_mut().add_property(prop);
        self
    }

    #[must_use]
    fn with_url(mut self, url: impl Into<String>) -> Self {
        self.component_mut()
            .set_property(Property::uri(names::URL, url));
        self
    }

    fn organizer(&self) -> Option<&str> {
        self.component().get_property(names::ORGANIZER)?.as_text()
    }

    fn attendees(&self) -> Vec<&str> {
        self.component()
            .get_properties(names::ATTENDEE)
            .into_iter()
            .filter_map(Property::as_text)
            .collect()
    }
}

/// RRULE and RDATE.
pub trait Repeatable: AsComponent + Sized {
    #[must_use]
    fn with_rrule(mut self, rrule: RRule) -> Self {
        self.component_mut()
            .set_property(Property::recur(names::RRULE, rrule));
        self
    }

    #[must_use]
    fn with_rdates(mut self, dates: Vec<Temporal>) -> Self {
        self.component_mut()
            .add_property(Property::temporal_list(names::RDATE, dates));
        self
    }

    #[must_use]
    fn with_rdate(self, date: Temporal) -> Self {
        self.with_rdates(vec![date])
    }
}

/// CATEGORIES, CLASS, STATUS, EXDATE, RECURRENCE-ID, SEQUENCE and ATTACH.
pub trait Displayable: AsComponent + Sized {
    #[must_use]
    fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.component_mut()
            .add_property(Property::text_list(names::CATEGORIES, categories));
        self
    }

    #[must_use]
    fn with_class(mut self, class: impl Into<String>) -> Self {
        self.component_mut()
            .set_property(Property::text(names::CLASS, class));
        self
    }

    #[must_use]
    fn with_status(mut self, status: impl Into<String>) -> Self {
        self.component_mut()
            .set_property(Property::text(names::STATUS, status));
        self
    }

    #[must_use]
    fn with_exdates(mut self, dates: Vec<Temporal>) -> Self {
        self.component_mut()
            .add_property(Property::temporal_list(names::EXDATE, dates));
        self
    }

    #[must_use]
    fn with_exdate(self, date: Temporal) -> Self {
        self.with_exdates(vec![date])
    }

    #[must_use]
    fn with_recurrence_id(mut self, id: Temporal) -> Self {
        self.component_mut()
            .set_property(Property::temporal(names::RECURRENCE_ID, id));
        self
    }

    #[must_use]
    fn with_sequence(mut self, sequence: i32) -> Self {
        self.component_mut()
            .set_property(Property::integer(names::SEQUENCE, sequence));
        self
    }

    #[must_use]
    fn with_attach(mut self, uri: impl Into<String>) -> Self {
        self.component_mut()
            .add_property(Property::uri(names::ATTACH, uri));
        self
    }

    fn categories(&self) -> Vec<&str> {
        self.component()
            .get_properties(names::CATEGORIES)
            .into_iter()
            .filter_map(Property::as_text_list)
            .flatten()
            .map(String::as_str)
            .collect()
    }

    fn status(&self) -> Option<&str> {
        self.component().get_property(names::STATUS)?.as_text()
    }

    fn sequence(&self) -> Option<i32> {
        self.component().get_property(names::SEQUENCE)?.as_integer()
    }
}

/// SUMMARY and DESCRIPTION.
pub trait Describable: AsComponent + Sized {
    #[must_use]
    fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.component_mut()
            .set_property(Property::text(names::SUMMARY, summary));
        self
    }

    #[must_use]
    fn with_description(mut self, description: impl Into<String>) -> Self {
        self.component_mut()
            .set_property(Property::text(names::DESCRIPTION, description));
        self
    }
}

/// LOCATION, DURATION, PRIORITY and VALARM children.
pub trait Locatable: AsComponent + Sized {
    #[must_use]
    fn with_location(mut self, location: impl Into<String>) -> Self {
        self.component_mut()
            .set_property(Property::text(names::LOCATION, location));
        self
    }

    #[must_use]
    fn with_duration(mut self, duration: Duration) -> Self {
        self.component_mut()
            .set_property(Property::duration(names::DURATION, duration));
        self
    }

    #[must_use]
    fn with_priority(mut self, priority: i32) -> Self {
        self.component_mut()
            .set_property(Property::integer(names::PRIORITY, priority));
        self
    }

    #[must_use]
    fn with_alarm(mut self, alarm: VAlarm) -> Self {
        self.component_mut().add_child(alarm.into_inner());
        self
    }

    fn location(&self) -> Option<&str> {
        self.component().get_property(names::LOCATION)?.as_text()
    }

    fn priority(&self) -> Option<i32> {
        self.component().get_property(names::PRIORITY)?.as_integer()
    }
}

impl Primary for VEvent {}
impl Personal for VEvent {}
impl Repeatable for VEvent {}
impl Displayable for VEvent {}
impl Describable for VEvent {}
impl Locatable for VEvent {}

impl Primary for VTodo {}
impl Personal for VTodo {}
impl Repeatable for VTodo {}
impl Displayable for VTodo {}
impl Describable for VTodo {}
impl Locatable for VTodo {}

impl Primary for VJournal {}
impl Personal for VJournal {}
impl Repeatable for VJournal {}
impl Displayable for VJournal {}
impl Describable for VJournal {}

impl Primary for VFreeBusy {}
impl Personal for VFreeBusy {}

impl Describable for VAlarm {}

impl Primary for StandardTime {}
impl Repeatable for StandardTime {}

impl Primary for DaylightSavingTime {}
impl Repeatable for DaylightSavingTime {}

impl VEvent {
    #[must_use]
    pub fn with_dtend(mut self, end: Temporal) -> Self {
        self.0.set_property(Property::temporal(names::DTEND, end));
        self
    }

    /// Sets TRANSP to `TRANSPARENT` or `OPAQUE`.
    #[must_use]
    pub fn with_transparent(mut self, transparent: bool) -> Self {
        let value = if transparent { "TRANSPARENT" } else { "OPAQUE" };
        self.0.set_property(Property::text(names::TRANSP, value));
        self
    }
}

impl VTodo {
    #[must_use]
    pub fn with_due(mut self, due: Temporal) -> Self {
        self.0.set_property(Property::temporal(names::DUE, due));
        self
    }

    #[must_use]
    pub fn with_completed(mut self, completed: Temporal) -> Self {
        self.0
            .set_property(Property::temporal(names::COMPLETED, completed));
        self
    }

    #[must_use]
    pub fn with_percent_complete(mut self, percent: i32) -> Self {
        self.0
            .set_property(Property::integer(names::PERCENT_COMPLETE, percent));
        self
    }
}

impl VFreeBusy {
    #[must_use]
    pub fn with_dtend(mut self, end: Temporal) -> Self {
        self.0.set_property(Property::temporal(names::DTEND, end));
        self
    }
}

impl VAlarm {
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.0.set_property(Property::text(names::ACTION, action));
        self
    }

    /// Sets a TRIGGER relative to the start of the parent.
    #[must_use]
    pub fn with_trigger(mut self, offset: Duration) -> Self {
        self.0
            .set_property(Property::duration(names::TRIGGER, offset));
        self
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: i32, every: Duration) -> Self {
        self.0.set_property(Property::integer(names::REPEAT, repeat));
        self.0
            .set_property(Property::duration(names::DURATION, every));
        self
    }
}

impl VTimeZone {
    #[must_use]
    pub fn with_tzid(mut self, tzid: impl Into<String>) -> Self {
        self.0.set_property(Property::text(names::TZID, tzid));
        self
    }

    #[must_use]
    pub fn with_standard(mut self, observance: StandardTime) -> Self {
        self.0.add_child(observance.into_inner());
        self
    }

    #[must_use]
    pub fn with_daylight(mut self, observance: DaylightSavingTime) -> Self {
        self.0.add_child(observance.into_inner());
        self
    }
}

macro_rules! observance_builders {
    ($name:ident) => {
        impl $name {
            #[must_use]
            pub fn with_offsets(mut self, from: UtcOffset, to: UtcOffset) -> Self {
                self.0
                    .set_property(Property::utc_offset(names::TZOFFSETFROM, from));
                self.0
                    .set_property(Property::utc_offset(names::TZOFFSETTO, to));
                self
            }

            #[must_use]
            pub fn with_tzname(mut self, tzname: impl Into<String>) -> Self {
                self.0.add_property(Property::text(names::TZNAME, tzname));
                self
            }
        }
    };
}

observance_builders!(StandardTime);
observance_builders!(DaylightSavingTime);
