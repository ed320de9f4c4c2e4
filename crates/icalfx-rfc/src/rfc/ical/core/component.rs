//! iCalendar component types (RFC 5545 §3.4-3.6).

use std::cell::{Ref, RefCell};
use std::fmt;
use std::str::FromStr;

use super::property::names;
use super::{Property, RRule, Temporal};
use crate::rfc::ical::build::{self, ContentOptions};
use crate::rfc::ical::expand::{RecurrenceCache, RecurrenceLimits, Recurrences};
use crate::rfc::ical::parse::{self, ParseError, ParseResult};
use crate::rfc::ical::validation;

/// Distance between the sort-order tokens of consecutively added properties.
const SORT_ORDER_STEP: u32 = 100;

/// Component kind for iCalendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    Event,
    Todo,
    Journal,
    FreeBusy,
    Timezone,
    /// VALARM component (nested within VEVENT/VTODO).
    Alarm,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
    /// Unknown/X-component.
    Unknown,
}

impl ComponentKind {
    /// Returns the string name for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Todo => "VTODO",
            Self::Journal => "VJOURNAL",
            Self::FreeBusy => "VFREEBUSY",
            Self::Timezone => "VTIMEZONE",
            Self::Alarm => "VALARM",
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
            Self::Unknown => "X-UNKNOWN",
        }
    }

    /// Parses a component kind from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "VCALENDAR" => Self::Calendar,
            "VEVENT" => Self::Event,
            "VTODO" => Self::Todo,
            "VJOURNAL" => Self::Journal,
            "VFREEBUSY" => Self::FreeBusy,
            "VTIMEZONE" => Self::Timezone,
            "VALARM" => Self::Alarm,
            "STANDARD" => Self::Standard,
            "DAYLIGHT" => Self::Daylight,
            _ => Self::Unknown,
        }
    }

    /// Returns whether this is a schedulable component (VEVENT, VTODO, VJOURNAL).
    #[must_use]
    pub const fn is_schedulable(self) -> bool {
        matches!(self, Self::Event | Self::Todo | Self::Journal)
    }

    /// Properties that may appear at most once in this kind of component
    /// (RFC 5545 §3.6).
    #[must_use]
    pub const fn once_only_properties(self) -> &'static [&'static str] {
        match self {
            Self::Calendar => &[names::PRODID, names::VERSION, names::CALSCALE, names::METHOD],
            Self::Event => &[
                names::DTSTAMP,
                names::UID,
                names::DTSTART,
                names::CLASS,
                names::CREATED,
                names::DESCRIPTION,
                names::GEO,
                names::LAST_MODIFIED,
                names::LOCATION,
                names::ORGANIZER,
                names::PRIORITY,
                names::SEQUENCE,
                names::STATUS,
                names::SUMMARY,
                names::TRANSP,
                names::URL,
                names::RECURRENCE_ID,
                names::RRULE,
                names::DTEND,
                names::DURATION,
            ],
            Self::Todo => &[
                names::DTSTAMP,
                names::UID,
                names::CLASS,
                names::COMPLETED,
                names::CREATED,
                names::DESCRIPTION,
                names::DTSTART,
                names::GEO,
                names::LAST_MODIFIED,
                names::LOCATION,
                names::ORGANIZER,
                names::PERCENT_COMPLETE,
                names::PRIORITY,
                names::RECURRENCE_ID,
                names::SEQUENCE,
                names::STATUS,
                names::SUMMARY,
                names::URL,
                names::RRULE,
                names::DUE,
                names::DURATION,
            ],
            Self::Journal => &[
                names::DTSTAMP,
                names::UID,
                names::CLASS,
                names::CREATED,
                names::DTSTART,
                names::LAST_MODIFIED,
                names::ORGANIZER,
                names::RECURRENCE_ID,
                names::SEQUENCE,
                names::STATUS,
                names::SUMMARY,
                names::URL,
                names::RRULE,
            ],
            Self::FreeBusy => &[
                names::DTSTAMP,
                names::UID,
                names::CONTACT,
                names::DTSTART,
                names::DTEND,
                names::ORGANIZER,
                names::URL,
            ],
            Self::Timezone => &[names::TZID, names::LAST_MODIFIED, names::TZURL],
            Self::Standard | Self::Daylight => &[
                names::DTSTART,
                names::TZOFFSETTO,
                names::TZOFFSETFROM,
                names::RRULE,
            ],
            Self::Alarm => &[
                names::ACTION,
                names::TRIGGER,
                names::DURATION,
                names::REPEAT,
                names::DESCRIPTION,
                names::SUMMARY,
            ],
            Self::Unknown => &[],
        }
    }

    #[must_use]
    pub fn allows_only_once(self, property: &str) -> bool {
        self.once_only_properties()
            .iter()
            .any(|name| name.eq_ignore_ascii_case(property))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An iCalendar component.
///
/// Components hold properties and nested sub-components. For example, a
/// VCALENDAR contains VEVENTs, which may contain VALARMs.
///
/// Each component owns a lazily filled recurrence cache. Every property
/// mutation clears it. Clones start with an empty cache, and equality
/// ignores it.
#[derive(Debug)]
pub struct Component {
    kind: ComponentKind,
    /// Original component name (preserved for X-components).
    name: String,
    properties: Vec<Property>,
    pub children: Vec<Component>,
    next_order: u32,
    recurrences: RefCell<RecurrenceCache>,
}

impl Component {
    /// Creates a new component with the given kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self::with_name(kind, kind.as_str())
    }

    /// Creates a new component with a custom name (for X-components).
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_uppercase();
        Self::with_name(ComponentKind::parse(&name), name)
    }

    fn with_name(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            properties: Vec::new(),
            children: Vec::new(),
            next_order: 0,
            recurrences: RefCell::new(RecurrenceCache::default()),
        }
    }

    #[must_use]
    pub fn calendar() -> Self {
        Self::new(ComponentKind::Calendar)
    }

    #[must_use]
    pub fn event() -> Self {
        Self::new(ComponentKind::Event)
    }

    #[must_use]
    pub fn todo() -> Self {
        Self::new(ComponentKind::Todo)
    }

    #[must_use]
    pub fn journal() -> Self {
        Self::new(ComponentKind::Journal)
    }

    #[must_use]
    pub fn freebusy() -> Self {
        Self::new(ComponentKind::FreeBusy)
    }

    #[must_use]
    pub fn timezone() -> Self {
        Self::new(ComponentKind::Timezone)
    }

    #[must_use]
    pub fn alarm() -> Self {
        Self::new(ComponentKind::Alarm)
    }

    #[must_use]
    pub fn standard() -> Self {
        Self::new(ComponentKind::Standard)
    }

    #[must_use]
    pub fn daylight() -> Self {
        Self::new(ComponentKind::Daylight)
    }

    /// Parses a single component of any kind.
    ///
    /// ## Errors
    /// Returns an error on malformed structure or property values.
    pub fn parse(text: &str) -> ParseResult<Self> {
        parse::parse_component(text)
    }

    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Properties in insertion order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Properties in serialization order: by sort-order token, ties in
    /// insertion order.
    #[must_use]
    pub fn ordered_properties(&self) -> Vec<&Property> {
        let mut ordered: Vec<&Property> = self.properties.iter().collect();
        ordered.sort_by_key(|p| p.sort_order().unwrap_or(u32::MAX));
        ordered
    }

    /// Adds a property, keeping any existing properties of the same name.
    pub fn add_property(&mut self, mut prop: Property) {
        prop.assign_sort_order(self.take_sort_order());
        self.properties.push(prop);
        self.invalidate_recurrences();
    }

    /// Replaces every property named like `prop` with `prop`, at the position
    /// of the first one.
    pub fn set_property(&mut self, mut prop: Property) {
        match self.properties.iter().position(|p| p.name == prop.name) {
            Some(index) => {
                if let Some(order) = self.properties[index].sort_order() {
                    prop.assign_sort_order(order);
                }
                let name = prop.name.clone();
                self.properties[index] = prop;
                let mut seen = 0_usize;
                self.properties.retain(|p| {
                    if p.name != name {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
                self.invalidate_recurrences();
            }
            None => self.add_property(prop),
        }
    }

    /// Removes and returns every property with the given name.
    pub fn remove_properties(&mut self, name: &str) -> Vec<Property> {
        let name_upper = name.to_ascii_uppercase();
        let (removed, kept) = std::mem::take(&mut self.properties)
            .into_iter()
            .partition(|p| p.name == name_upper);
        self.properties = kept;
        self.invalidate_recurrences();
        removed
    }

    /// Adds a property read from content, applying the cardinality rules.
    ///
    /// A repeated once-only property is dropped, keeping the first.
    pub(crate) fn push_parsed_property(&mut self, prop: Property) {
        if self.kind.allows_only_once(&prop.name) && self.get_property(&prop.name).is_some() {
            tracing::warn!(
                component = %self.name,
                property = %prop.name,
                "Dropping repeated once-only property"
            );
            return;
        }
        self.add_property(prop);
    }

    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == name_upper)
    }

    /// Returns all properties with the given name.
    #[must_use]
    pub fn get_properties(&self, name: &str) -> Vec<&Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties
            .iter()
            .filter(|p| p.name == name_upper)
            .collect()
    }

    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.get_property(names::UID)?.as_text()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.get_property(names::SUMMARY)?.as_text()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.get_property(names::DESCRIPTION)?.as_text()
    }

    /// The start value, if DTSTART holds a date or date-time.
    #[must_use]
    pub fn dtstart(&self) -> Option<&Temporal> {
        self.get_property(names::DTSTART)?.as_temporal()
    }

    #[must_use]
    pub fn dtend(&self) -> Option<&Temporal> {
        self.get_property(names::DTEND)?.as_temporal()
    }

    #[must_use]
    pub fn due(&self) -> Option<&Temporal> {
        self.get_property(names::DUE)?.as_temporal()
    }

    #[must_use]
    pub fn duration(&self) -> Option<&super::Duration> {
        self.get_property(names::DURATION)?.as_duration()
    }

    #[must_use]
    pub fn rrule(&self) -> Option<&RRule> {
        self.get_property(names::RRULE)?.as_recur()
    }

    /// All EXDATE values across every EXDATE property.
    #[must_use]
    pub fn exdates(&self) -> Vec<&Temporal> {
        self.get_properties(names::EXDATE)
            .into_iter()
            .filter_map(Property::as_temporal_list)
            .flatten()
            .collect()
    }

    /// All RDATE values across every RDATE property. Periods contribute
    /// their start.
    #[must_use]
    pub fn rdates(&self) -> Vec<&Temporal> {
        self.get_properties(names::RDATE)
            .into_iter()
            .flat_map(|p| -> Vec<&Temporal> {
                if let Some(list) = p.as_temporal_list() {
                    list.iter().collect()
                } else if let Some(periods) = p.value.as_period_list() {
                    periods.iter().map(super::Period::start).collect()
                } else {
                    Vec::new()
                }
            })
            .collect()
    }

    /// Whether `TRANSP:TRANSPARENT` marks this component as not blocking time.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.get_property(names::TRANSP)
            .and_then(Property::as_text)
            .is_some_and(|v| v.eq_ignore_ascii_case("TRANSPARENT"))
    }

    /// Returns children of a specific kind.
    #[must_use]
    pub fn children_of_kind(&self, kind: ComponentKind) -> Vec<&Self> {
        self.children.iter().filter(|c| c.kind == kind).collect()
    }

    #[must_use]
    pub fn events(&self) -> Vec<&Self> {
        self.children_of_kind(ComponentKind::Event)
    }

    #[must_use]
    pub fn todos(&self) -> Vec<&Self> {
        self.children_of_kind(ComponentKind::Todo)
    }

    #[must_use]
    pub fn timezones(&self) -> Vec<&Self> {
        self.children_of_kind(ComponentKind::Timezone)
    }

    #[must_use]
    pub fn journals(&self) -> Vec<&Self> {
        self.children_of_kind(ComponentKind::Journal)
    }

    #[must_use]
    pub fn freebusy_children(&self) -> Vec<&Self> {
        self.children_of_kind(ComponentKind::FreeBusy)
    }

    #[must_use]
    pub fn alarms(&self) -> Vec<&Self> {
        self.children_of_kind(ComponentKind::Alarm)
    }

    /// Serializes with CRLF line endings.
    #[must_use]
    pub fn to_content(&self) -> String {
        self.to_content_with(&ContentOptions::default())
    }

    #[must_use]
    pub fn to_content_with(&self, options: &ContentOptions) -> String {
        build::serialize_component(self, options)
    }

    /// Collects every validation issue of this component and its children.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        validation::validate_component(self)
    }

    /// Overwrites `target` with a deep copy of this component.
    pub fn copy_into(&self, target: &mut Self) {
        target.kind = self.kind;
        target.name.clone_from(&self.name);
        target.properties.clone_from(&self.properties);
        target.children.clone_from(&self.children);
        target.next_order = self.next_order;
        target.invalidate_recurrences();
    }

    /// Replaces the safety bounds used when expanding this component's rule.
    pub fn set_recurrence_limits(&mut self, limits: RecurrenceLimits) {
        self.recurrences.get_mut().set_limits(limits);
    }

    /// Occurrences from the first one onward.
    #[must_use]
    pub fn recurrences(&self) -> Recurrences<'_> {
        Recurrences::new(self, None)
    }

    /// Occurrences at or after `from`, in ascending order.
    #[must_use]
    pub fn stream_recurrences(&self, from: &Temporal) -> Recurrences<'_> {
        Recurrences::new(self, Some(from.clone()))
    }

    /// Occurrences in `[from, to)`.
    pub fn stream_between<'a>(
        &'a self,
        from: &Temporal,
        to: &'a Temporal,
    ) -> impl Iterator<Item = Temporal> + use<'a> {
        self.stream_recurrences(from).take_while(move |t| t < to)
    }

    /// The latest occurrence strictly before `before`.
    #[must_use]
    pub fn previous_value(&self, before: &Temporal) -> Option<Temporal> {
        self.recurrences.borrow_mut().previous_value(self, before)
    }

    /// Read access to the recurrence cache and its counters.
    ///
    /// ## Panics
    /// Panics if called while an occurrence is being computed.
    #[must_use]
    pub fn recurrence_cache(&self) -> Ref<'_, RecurrenceCache> {
        self.recurrences.borrow()
    }

    pub(crate) const fn recurrence_cell(&self) -> &RefCell<RecurrenceCache> {
        &self.recurrences
    }

    fn take_sort_order(&mut self) -> u32 {
        let order = self.next_order;
        self.next_order = self.next_order.saturating_add(SORT_ORDER_STEP);
        order
    }

    fn invalidate_recurrences(&mut self) {
        self.recurrences.get_mut().invalidate();
    }

    fn property_names(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for prop in &self.properties {
            if !seen.contains(&prop.name.as_str()) {
                seen.push(&prop.name);
            }
        }
        seen
    }
}

impl Clone for Component {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            name: self.name.clone(),
            properties: self.properties.clone(),
            children: self.children.clone(),
            next_order: self.next_order,
            recurrences: RefCell::new(self.recurrences.borrow().fresh()),
        }
    }
}

/// Structural equality. Properties are compared per name, so the relative
/// order of different names does not matter, while repeated names must
/// match in order.
impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind
            || self.name != other.name
            || self.properties.len() != other.properties.len()
            || self.children != other.children
        {
            return false;
        }
        self.property_names().into_iter().all(|name| {
            self.properties
                .iter()
                .filter(|p| p.name == name)
                .eq(other.properties.iter().filter(|p| p.name == name))
        })
    }
}

impl FromStr for Component {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Top-level iCalendar object.
///
/// A wrapper around a VCALENDAR component with helpers for common
/// operations.
#[derive(Debug, Clone, PartialEq)]
pub struct ICalendar {
    pub root: Component,
}

impl ICalendar {
    /// Creates a new empty iCalendar with the required properties.
    #[must_use]
    pub fn new(prodid: impl Into<String>) -> Self {
        let mut root = Component::calendar();
        root.add_property(Property::text(names::VERSION, "2.0"));
        root.add_property(Property::text(names::PRODID, prodid));
        Self { root }
    }

    /// Parses a VCALENDAR document.
    ///
    /// ## Errors
    /// Returns an error if the root is not VCALENDAR or the content is malformed.
    pub fn parse(text: &str) -> ParseResult<Self> {
        parse::parse(text)
    }

    #[must_use]
    pub fn prodid(&self) -> Option<&str> {
        self.root.get_property(names::PRODID)?.as_text()
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.root.get_property(names::VERSION)?.as_text()
    }

    /// Returns the CALSCALE value (defaults to "GREGORIAN").
    #[must_use]
    pub fn calscale(&self) -> &str {
        self.root
            .get_property(names::CALSCALE)
            .and_then(Property::as_text)
            .unwrap_or("GREGORIAN")
    }

    pub fn add_component(&mut self, component: impl Into<Component>) {
        self.root.add_child(component.into());
    }

    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.root.events()
    }

    #[must_use]
    pub fn todos(&self) -> Vec<&Component> {
        self.root.todos()
    }

    #[must_use]
    pub fn timezones(&self) -> Vec<&Component> {
        self.root.timezones()
    }

    #[must_use]
    pub fn journals(&self) -> Vec<&Component> {
        self.root.journals()
    }

    #[must_use]
    pub fn freebusy(&self) -> Vec<&Component> {
        self.root.freebusy_children()
    }

    /// Returns all unique UIDs in this calendar.
    #[must_use]
    pub fn uids(&self) -> Vec<&str> {
        let mut uids: Vec<&str> = self.root.children.iter().filter_map(Component::uid).collect();
        uids.sort_unstable();
        uids.dedup();
        uids
    }

    /// The first top-level component with the given UID.
    #[must_use]
    pub fn find_by_uid(&self, uid: &str) -> Option<&Component> {
        self.root.children.iter().find(|c| c.uid() == Some(uid))
    }

    #[must_use]
    pub fn to_content(&self) -> String {
        self.root.to_content()
    }

    #[must_use]
    pub fn to_content_with(&self, options: &ContentOptions) -> String {
        self.root.to_content_with(options)
    }

    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.root.errors()
    }
}

impl Default for ICalendar {
    fn default() -> Self {
        Self::new("-//icalfx//icalfx//EN")
    }
}

impl FromStr for ICalendar {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_kind_parse() {
        assert_eq!(ComponentKind::parse("VEVENT"), ComponentKind::Event);
        assert_eq!(ComponentKind::parse("vtodo"), ComponentKind::Todo);
        assert_eq!(ComponentKind::parse("X-CUSTOM"), ComponentKind::Unknown);
    }

    #[test]
    fn description_repeats_only_in_journals() {
        assert!(ComponentKind::Event.allows_only_once("DESCRIPTION"));
        assert!(!ComponentKind::Journal.allows_only_once("DESCRIPTION"));
        assert!(!ComponentKind::Event.allows_only_once("ATTENDEE"));
    }

    #[test]
    fn icalendar_new() {
        let ical = ICalendar::new("-//Test//Test//EN");
        assert_eq!(ical.version(), Some("2.0"));
        assert_eq!(ical.prodid(), Some("-//Test//Test//EN"));
        assert_eq!(ical.calscale(), "GREGORIAN");
    }

    #[test]
    fn icalendar_uids_and_lookup() {
        let mut ical = ICalendar::default();

        let mut event1 = Component::event();
        event1.add_property(Property::text("UID", "event1"));
        ical.add_component(event1);

        let mut event2 = Component::event();
        event2.add_property(Property::text("UID", "event2"));
        ical.add_component(event2);

        assert_eq!(ical.events().len(), 2);
        assert_eq!(ical.uids(), vec!["event1", "event2"]);
        assert!(ical.find_by_uid("event2").is_some());
        assert!(ical.find_by_uid("missing").is_none());
    }

    #[test]
    fn sort_order_steps_and_overrides() {
        let mut event = Component::event();
        event.add_property(Property::text("UID", "a"));
        event.add_property(Property::text("SUMMARY", "b"));
        event.add_property(Property::text("COMMENT", "c").with_sort_order(50));

        let order: Vec<&str> = event
            .ordered_properties()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(order, vec!["UID", "COMMENT", "SUMMARY"]);
        assert_eq!(event.properties()[1].sort_order(), Some(100));
    }

    #[test]
    fn set_property_replaces_all_of_a_name() {
        let mut event = Component::event();
        event.add_property(Property::text("COMMENT", "one"));
        event.add_property(Property::text("SUMMARY", "s"));
        event.add_property(Property::text("COMMENT", "two"));
        event.set_property(Property::text("COMMENT", "three"));

        let comments = event.get_properties("COMMENT");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].as_text(), Some("three"));
        assert_eq!(event.ordered_properties()[0].name, "COMMENT");
    }

    #[test]
    fn equality_ignores_cross_name_order() {
        let mut a = Component::event();
        a.add_property(Property::text("UID", "x"));
        a.add_property(Property::text("COMMENT", "1"));
        a.add_property(Property::text("COMMENT", "2"));

        let mut b = Component::event();
        b.add_property(Property::text("COMMENT", "1"));
        b.add_property(Property::text("UID", "x"));
        b.add_property(Property::text("COMMENT", "2"));
        assert_eq!(a, b);

        let mut c = Component::event();
        c.add_property(Property::text("COMMENT", "2"));
        c.add_property(Property::text("UID", "x"));
        c.add_property(Property::text("COMMENT", "1"));
        assert_ne!(a, c);
    }

    #[test]
    fn copy_into_is_deep() {
        let mut source = Component::event();
        source.add_property(Property::text("UID", "copy"));
        source.add_child(Component::alarm());

        let mut target = Component::todo();
        source.copy_into(&mut target);
        assert_eq!(source, target);

        target.add_property(Property::text("SUMMARY", "changed"));
        assert_ne!(source, target);
        assert!(source.summary().is_none());
    }

    #[test]
    fn transparency() {
        let mut event = Component::event();
        assert!(!event.is_transparent());
        event.add_property(Property::text("TRANSP", "TRANSPARENT"));
        assert!(event.is_transparent());
    }
}
