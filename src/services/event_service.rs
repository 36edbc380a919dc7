use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::db::EventRepository;
use crate::error::AppError;
use crate::models::{
    Event, EventFields, NewEventRequest, PageQuery, Schedule, TimedEvent, TimedPage,
    TimelessPage, UpdateEventRequest,
};
use crate::services::ScheduleScope;
use crate::time::{date_to_storage, parse_date, parse_timestamp, render_timestamp, to_storage};

/// Items per page for both day listings.
pub const PAGE_SIZE: i64 = 2;

/// Entry point for event operations. Every operation first resolves the
/// caller's schedule through [`EventService::for_user`].
#[derive(Clone)]
pub struct EventService {
    scope: ScheduleScope,
    events: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(scope: ScheduleScope, events: Arc<dyn EventRepository>) -> Self {
        Self { scope, events }
    }

    pub async fn for_user(&self, user_id: i64) -> Result<ScheduleEvents, AppError> {
        let schedule = self.scope.resolve(user_id).await?;
        Ok(ScheduleEvents {
            schedule,
            events: self.events.clone(),
        })
    }
}

/// Event operations bound to one resolved schedule.
pub struct ScheduleEvents {
    schedule: Schedule,
    events: Arc<dyn EventRepository>,
}

impl ScheduleEvents {
    pub async fn load_events(&self) -> Result<Vec<Event>, AppError> {
        let events = self.events.fetch_events(self.schedule.id).await?;
        debug!("loaded {} events for schedule {}", events.len(), self.schedule.id);
        Ok(events)
    }

    pub async fn add_event(&self, req: NewEventRequest) -> Result<Event, AppError> {
        let (start_time, end_time) =
            normalize_range(supplied(&req.start_time), supplied(&req.end_time))?;
        let fields = EventFields {
            content: req.content,
            date: normalize_date(&req.date)?,
            start_time,
            end_time,
        };

        let event = self.events.insert_event(self.schedule.id, &fields).await?;
        info!("created event {} in schedule {}", event.id, self.schedule.id);
        Ok(event)
    }

    /// Events on the given day that have no start time.
    pub async fn load_timeless_events(&self, query: PageQuery) -> Result<TimelessPage, AppError> {
        let date = normalize_date(&query.date)?;

        let (events, total) = self
            .events
            .page_timeless_events(self.schedule.id, &date, PAGE_SIZE, page_offset(query.page))
            .await?;
        debug!("timeless events on {}: {} of {}", date, events.len(), total);

        Ok(TimelessPage {
            events_without_time: events,
            events_without_time_total_pages: total_pages(total),
        })
    }

    /// Events on the given day that have a start time, ordered by start then
    /// end, with both rendered for display.
    pub async fn load_timed_events(&self, query: PageQuery) -> Result<TimedPage, AppError> {
        let date = normalize_date(&query.date)?;

        let (events, total) = self
            .events
            .page_timed_events(self.schedule.id, &date, PAGE_SIZE, page_offset(query.page))
            .await?;
        debug!("timed events on {}: {} of {}", date, events.len(), total);

        let parsed = events
            .into_iter()
            .map(to_timed_event)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TimedPage {
            parsed_events_with_time: parsed,
            events_with_time_total_pages: total_pages(total),
        })
    }

    /// Replaces content, date and times. Times are kept only when both start
    /// and end are given; otherwise the event becomes timeless.
    pub async fn edit_event(&self, event_id: i64, req: UpdateEventRequest) -> Result<Event, AppError> {
        let (start_time, end_time) =
            match (supplied(&req.start_time), supplied(&req.end_time)) {
                (Some(start), Some(end)) => normalize_range(Some(start), Some(end))?,
                _ => (None, None),
            };
        let fields = EventFields {
            content: req.content,
            date: normalize_date(&req.date)?,
            start_time,
            end_time,
        };

        if !self.events.update_event(self.schedule.id, event_id, &fields).await? {
            return Err(AppError::EventNotFound);
        }
        info!("edited event {} in schedule {}", event_id, self.schedule.id);

        self.events
            .find_event(event_id)
            .await?
            .ok_or(AppError::EventNotFound)
    }

    /// Deletes an event of the schedule and returns it as it was.
    pub async fn delete_event(&self, event_id: i64) -> Result<Event, AppError> {
        let event = self
            .events
            .find_event_in_schedule(self.schedule.id, event_id)
            .await?
            .ok_or(AppError::EventNotFound)?;

        if !self.events.delete_event(self.schedule.id, event.id).await? {
            return Err(AppError::EventNotFound);
        }
        info!("deleted event {} from schedule {}", event.id, self.schedule.id);

        Ok(event)
    }
}

/// Treats empty strings like absent values.
fn supplied(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, AppError> {
    parse_timestamp(raw).ok_or_else(|| AppError::InvalidTime(raw.to_string()))
}

fn normalize_date(raw: &str) -> Result<String, AppError> {
    parse_date(raw)
        .map(|date| date_to_storage(&date))
        .ok_or_else(|| AppError::InvalidDate(raw.to_string()))
}

/// Parses both ends to column form. An end whose rendering equals the
/// start's rendering is dropped, so same-second ranges collapse.
fn normalize_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(Option<String>, Option<String>), AppError> {
    let start = start.map(parse_time).transpose()?;
    let mut end = end.map(parse_time).transpose()?;

    if start.as_ref().map(render_timestamp) == end.as_ref().map(render_timestamp) {
        end = None;
    }

    Ok((start.as_ref().map(to_storage), end.as_ref().map(to_storage)))
}

fn page_offset(page: Option<u32>) -> i64 {
    match page {
        Some(page) if page > 0 => (i64::from(page) - 1) * PAGE_SIZE,
        _ => 0,
    }
}

fn total_pages(total: i64) -> u64 {
    (total.max(0) as u64).div_ceil(PAGE_SIZE as u64)
}

fn render_stored(raw: Option<String>) -> Result<Option<String>, AppError> {
    raw.map(|value| match parse_timestamp(&value) {
        Some(dt) => Ok(render_timestamp(&dt)),
        None => {
            error!("unreadable stored timestamp: {}", value);
            Err(AppError::InternalServerError)
        }
    })
    .transpose()
}

fn to_timed_event(event: Event) -> Result<TimedEvent, AppError> {
    Ok(TimedEvent {
        id: event.id,
        content: event.content,
        date: event.date,
        start_time: render_stored(event.start_time)?,
        end_time: render_stored(event.end_time)?,
        created_at: event.created_at,
        updated_at: event.updated_at,
    })
}
