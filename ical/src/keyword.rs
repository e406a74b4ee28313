// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords defined in iCalendar RFC 5545.

pub const KW_BEGIN: &str = "BEGIN";
pub const KW_END: &str = "END";

// Section 3.6 - Calendar Components
pub const KW_VCALENDAR: &str = "VCALENDAR";
pub const KW_VEVENT: &str = "VEVENT";
pub const KW_VTODO: &str = "VTODO";
pub const KW_VJOURNAL: &str = "VJOURNAL";
pub const KW_VFREEBUSY: &str = "VFREEBUSY";
pub const KW_VTIMEZONE: &str = "VTIMEZONE";
pub const KW_DAYLIGHT: &str = "DAYLIGHT";
pub const KW_STANDARD: &str = "STANDARD";
pub const KW_VALARM: &str = "VALARM";

// Section 3.8 - Component Properties
pub const KW_DTSTART: &str = "DTSTART";
pub const KW_PRIORITY: &str = "PRIORITY";
pub const KW_SEQUENCE: &str = "SEQUENCE";
pub const KW_SUMMARY: &str = "SUMMARY";
pub const KW_TZID: &str = "TZID";
pub const KW_UID: &str = "UID";
