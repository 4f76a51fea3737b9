//! Calendar events, planned actions and the lists that hold them.

use std::fmt;

use log::warn;

use crate::codec::{AttributeKey, NodeReader, NodeWriter, Record};
use crate::error::{DecodeError, EncodeError};
use crate::model::Timestamp;

crate::attribute_keys! {
    pub enum EventKey {
        Name = "name",
        Calendar = "calendar",
        StartDate = "startDate",
        EndDate = "endDate",
        Location = "location",
        Url = "url",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Title of the calendar the event belongs to.
    pub calendar: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub location: Option<String>,
    pub url: Option<String>,
}

impl Record for Event {
    const TYPE_TAG: &'static str = "Event";
    type Key = EventKey;

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn encode_attributes(&self, node: &mut NodeWriter<'_, EventKey>) -> Result<(), EncodeError> {
        node.write_opt_string(EventKey::Name, self.name.as_deref());
        node.write_opt_string(EventKey::Calendar, self.calendar.as_deref());
        node.write_opt_timestamp(EventKey::StartDate, self.start_date.as_ref());
        node.write_opt_timestamp(EventKey::EndDate, self.end_date.as_ref());
        node.write_opt_string(EventKey::Location, self.location.as_deref());
        node.write_opt_string(EventKey::Url, self.url.as_deref());
        Ok(())
    }

    fn decode_attributes(node: &NodeReader<'_, EventKey>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: node.read_id()?,
            name: node.read_opt_string(EventKey::Name)?,
            calendar: node.read_opt_string(EventKey::Calendar)?,
            start_date: node.read_opt_timestamp(EventKey::StartDate)?,
            end_date: node.read_opt_timestamp(EventKey::EndDate)?,
            location: node.read_opt_string(EventKey::Location)?,
            url: node.read_opt_string(EventKey::Url)?,
        })
    }
}

/// schema.org `ActionStatusType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionStatus {
    Active,
    Completed,
    Failed,
    Potential,
}

impl ActionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Active => "ActiveAction",
            ActionStatus::Completed => "CompletedAction",
            ActionStatus::Failed => "FailedAction",
            ActionStatus::Potential => "PotentialAction",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ActiveAction" => Some(ActionStatus::Active),
            "CompletedAction" => Some(ActionStatus::Completed),
            "FailedAction" => Some(ActionStatus::Failed),
            "PotentialAction" => Some(ActionStatus::Potential),
            _ => None,
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

crate::attribute_keys! {
    pub enum PlanActionKey {
        Name = "name",
        Description = "description",
        ScheduledTime = "scheduledTime",
        Status = "actionStatus",
        Priority = "priority",
        Url = "url",
    }
}

/// A task, such as a reminder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanAction {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub scheduled_time: Option<Timestamp>,
    pub status: Option<ActionStatus>,
    pub priority: Option<i64>,
    pub url: Option<String>,
}

impl Record for PlanAction {
    const TYPE_TAG: &'static str = "PlanAction";
    type Key = PlanActionKey;

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn encode_attributes(
        &self,
        node: &mut NodeWriter<'_, PlanActionKey>,
    ) -> Result<(), EncodeError> {
        node.write_opt_string(PlanActionKey::Name, self.name.as_deref());
        node.write_opt_string(PlanActionKey::Description, self.description.as_deref());
        node.write_opt_timestamp(PlanActionKey::ScheduledTime, self.scheduled_time.as_ref());
        node.write_opt_string(PlanActionKey::Status, self.status.map(ActionStatus::as_str));
        node.write_opt_i64(PlanActionKey::Priority, self.priority);
        node.write_opt_string(PlanActionKey::Url, self.url.as_deref());
        Ok(())
    }

    fn decode_attributes(node: &NodeReader<'_, PlanActionKey>) -> Result<Self, DecodeError> {
        // Unknown statuses are dropped rather than rejected.
        let status = match node.read_opt_string(PlanActionKey::Status)? {
            Some(text) => {
                let status = ActionStatus::parse(&text);
                if status.is_none() {
                    warn!(
                        "ignoring unknown {} {:?} at {}",
                        PlanActionKey::Status.as_str(),
                        text,
                        node.path()
                    );
                }
                status
            }
            None => None,
        };
        Ok(Self {
            id: node.read_id()?,
            name: node.read_opt_string(PlanActionKey::Name)?,
            description: node.read_opt_string(PlanActionKey::Description)?,
            scheduled_time: node.read_opt_timestamp(PlanActionKey::ScheduledTime)?,
            status,
            priority: node.read_opt_i64(PlanActionKey::Priority)?,
            url: node.read_opt_string(PlanActionKey::Url)?,
        })
    }
}

crate::attribute_keys! {
    pub enum ItemListKey {
        Name = "name",
        Url = "url",
        NumberOfItems = "numberOfItems",
    }
}

/// A named list, such as a reminders list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemList {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub number_of_items: Option<i64>,
}

impl Record for ItemList {
    const TYPE_TAG: &'static str = "ItemList";
    type Key = ItemListKey;

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn encode_attributes(&self, node: &mut NodeWriter<'_, ItemListKey>) -> Result<(), EncodeError> {
        node.write_opt_string(ItemListKey::Name, self.name.as_deref());
        node.write_opt_string(ItemListKey::Url, self.url.as_deref());
        node.write_opt_i64(ItemListKey::NumberOfItems, self.number_of_items);
        Ok(())
    }

    fn decode_attributes(node: &NodeReader<'_, ItemListKey>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: node.read_id()?,
            name: node.read_opt_string(ItemListKey::Name)?,
            url: node.read_opt_string(ItemListKey::Url)?,
            number_of_items: node.read_opt_i64(ItemListKey::NumberOfItems)?,
        })
    }
}
