// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, io};

use calparse_ical::{Event, ParseReport, Timezone};
use colored::{Color, Colorize};

use crate::table::{Table, TableColumn};

#[derive(Debug)]
pub struct CalendarFormatter {
    columns: Vec<EventColumn>,
}

impl CalendarFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![EventColumn::Summary, EventColumn::Start, EventColumn::Tzid],
        }
    }

    pub fn write_to(&self, w: &mut impl io::Write, report: &ParseReport) -> io::Result<()> {
        let calendar = &report.calendar;
        match calendar.timezone().and_then(Timezone::tzid) {
            Some(tzid) => writeln!(w, "{} {}", "Timezone:".bold(), tzid)?,
            None => writeln!(w, "{} {}", "Timezone:".bold(), "none".dimmed())?,
        }

        if !calendar.events().is_empty() {
            writeln!(w)?;
            Table::new(&self.columns, calendar.events()).write_to(w)?;
            writeln!(w)?;
        }

        writeln!(w, "{} {}", "Total items:".bold(), report.total_items())?;

        for diagnostic in &report.diagnostics {
            writeln!(w, "{} {}", "Warning:".yellow().bold(), diagnostic.to_string().yellow())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum EventColumn {
    Summary,
    Start,
    Tzid,
}

impl TableColumn<Event> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Summary => "Summary",
            EventColumn::Start => "Start",
            EventColumn::Tzid => "TZID",
        }
        .into()
    }

    fn format<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        let value = match self {
            EventColumn::Summary => event.summary(),
            EventColumn::Start => event.dtstart(),
            EventColumn::Tzid => event.tzid(),
        };
        value.unwrap_or("-").into()
    }

    fn color(&self, event: &Event) -> Option<Color> {
        match self {
            EventColumn::Summary if event.summary().is_none() => Some(Color::BrightBlack),
            _ => None,
        }
    }
}
