//! Test fixtures for iCalendar parsing, serialization and expansion.
//!
//! Documents are written in canonical form (CRLF endings, properties in
//! the order they serialize), mostly following RFC 5545 Appendix A and the
//! examples of §3.8.5.3.

/// Minimal VEVENT with UTC start and end (RFC 5545 §4 example).
pub const VEVENT_MINIMAL: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Calendar 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:19970610T172345Z-AF23B2@example.com\r\n\
DTSTAMP:19970610T172345Z\r\n\
DTSTART:19970714T170000Z\r\n\
DTEND:19970715T040000Z\r\n\
SUMMARY:Bastille Day Party\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// Zoned biweekly event with a VTIMEZONE, an EXDATE and an RDATE.
pub const VEVENT_RECURRING: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//RDU Software//NONSGML HandCal//EN\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:America/New_York\r\n\
BEGIN:STANDARD\r\n\
DTSTART:19981025T020000\r\n\
TZOFFSETFROM:-0400\r\n\
TZOFFSETTO:-0500\r\n\
TZNAME:EST\r\n\
END:STANDARD\r\n\
BEGIN:DAYLIGHT\r\n\
DTSTART:19990404T020000\r\n\
TZOFFSETFROM:-0500\r\n\
TZOFFSETTO:-0400\r\n\
TZNAME:EDT\r\n\
END:DAYLIGHT\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:biweekly-staff@example.com\r\n\
DTSTAMP:19970901T130000Z\r\n\
DTSTART;TZID=America/New_York:19970901T090000\r\n\
DURATION:PT1H\r\n\
RRULE:FREQ=WEEKLY;INTERVAL=2;UNTIL=19971224T000000Z;WKST=SU;BYDAY=MO,WE,FR\r\n\
EXDATE;TZID=America/New_York:19970903T090000\r\n\
RDATE;TZID=America/New_York:19970902T090000\r\n\
SUMMARY:Staff meeting\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// VTODO with a DATE due value and list-valued categories.
pub const VTODO_BASIC: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//ABC Corporation//NONSGML My Product//EN\r\n\
BEGIN:VTODO\r\n\
UID:20070313T123432Z-456553@example.com\r\n\
DTSTAMP:20070313T123432Z\r\n\
DUE;VALUE=DATE:20070501\r\n\
SUMMARY:Submit Quebec Income Tax Return for 2006\r\n\
CLASS:CONFIDENTIAL\r\n\
CATEGORIES:FAMILY,FINANCE\r\n\
STATUS:NEEDS-ACTION\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";

/// VJOURNAL with escaped text and an embedded newline.
pub const VJOURNAL_BASIC: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//ABC Corporation//NONSGML My Product//EN\r\n\
BEGIN:VJOURNAL\r\n\
UID:19970901T130000Z-123405@example.com\r\n\
DTSTAMP:19970901T130000Z\r\n\
DTSTART;VALUE=DATE:19970317\r\n\
SUMMARY:Staff meeting minutes\r\n\
DESCRIPTION:Joe\\, Lisa\\, and Bob attended.\\nAurora plans reviewed.\r\n\
END:VJOURNAL\r\n\
END:VCALENDAR\r\n";

/// VFREEBUSY with busy periods in both period forms.
pub const VFREEBUSY_BASIC: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//RDU Software//NONSGML HandCal//EN\r\n\
BEGIN:VFREEBUSY\r\n\
UID:19970901T115957Z-76A912@example.com\r\n\
DTSTAMP:19970901T120000Z\r\n\
ORGANIZER:mailto:jsmith@example.com\r\n\
DTSTART:19980313T141711Z\r\n\
DTEND:19980410T141711Z\r\n\
FREEBUSY:19980314T233000Z/19980315T003000Z\r\n\
FREEBUSY:19980316T153000Z/PT1H30M,19980318T030000Z/19980318T040000Z\r\n\
END:VFREEBUSY\r\n\
END:VCALENDAR\r\n";

/// VEVENT with a display alarm relative to its end.
pub const VEVENT_WITH_ALARM: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Calendar 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:alarm-test@example.com\r\n\
DTSTAMP:20260101T000000Z\r\n\
DTSTART:20260115T140000Z\r\n\
DTEND:20260115T150000Z\r\n\
SUMMARY:Quarterly review\r\n\
BEGIN:VALARM\r\n\
TRIGGER;RELATED=END:-PT15M\r\n\
ACTION:DISPLAY\r\n\
DESCRIPTION:Reminder\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// VEVENT with quoted parameters, extension properties and an unknown
/// sub-component.
pub const VEVENT_WITH_EXTENSIONS: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Calendar 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:extensions@example.com\r\n\
DTSTAMP:20260101T000000Z\r\n\
DTSTART:20260201T100000\r\n\
ORGANIZER;CN=\"Doe, Jane\":mailto:jane@example.com\r\n\
ATTENDEE;ROLE=REQ-PARTICIPANT;RSVP=TRUE:mailto:bob@example.com\r\n\
GEO:37.386013;-122.082932\r\n\
X-WR-CUSTOM;X-PARAM=one:some value\r\n\
BEGIN:X-VENDOR-BLOCK\r\n\
X-VENDOR-KEY:42\r\n\
END:X-VENDOR-BLOCK\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// All canonical documents.
pub const CANONICAL: &[&str] = &[
    VEVENT_MINIMAL,
    VEVENT_RECURRING,
    VTODO_BASIC,
    VJOURNAL_BASIC,
    VFREEBUSY_BASIC,
    VEVENT_WITH_ALARM,
    VEVENT_WITH_EXTENSIONS,
];
