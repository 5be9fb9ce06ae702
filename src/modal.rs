use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::models::TaskInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalField {
    Desc,
    Date,
}

/// Edit buffer of the add-task modal. Dropped when the modal closes.
#[derive(Debug, Clone)]
pub struct AddTaskModal {
    pub desc: String,
    pub date: String,
    pub field: ModalField,
    /// Set when the date buffer does not parse.
    pub date_error: bool,
}

impl AddTaskModal {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            desc: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            field: ModalField::Desc,
            date_error: false,
        }
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            ModalField::Desc => ModalField::Date,
            ModalField::Date => ModalField::Desc,
        };
    }

    fn buffer(&mut self) -> &mut String {
        match self.field {
            ModalField::Desc => &mut self.desc,
            ModalField::Date => &mut self.date,
        }
    }

    pub fn push(&mut self, c: char) {
        self.date_error = false;
        self.buffer().push(c);
    }

    pub fn pop(&mut self) {
        self.date_error = false;
        self.buffer().pop();
    }

    /// Builds the `{desc, date}` pair: the chosen day at the current time of
    /// day. Returns `None` and flags the date when it does not parse.
    ///
    /// The description is passed through untouched; it is validated by the
    /// screen that receives it.
    pub fn confirm(&mut self, now: DateTime<Local>) -> Option<TaskInput> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .ok()
            .and_then(|day| day_at(day, &now));
        match date {
            Some(date) => Some(TaskInput {
                desc: self.desc.clone(),
                date,
            }),
            None => {
                self.date_error = true;
                self.field = ModalField::Date;
                None
            }
        }
    }
}

/// `day` at the local time of day of `now`, in UTC.
pub fn day_at(day: NaiveDate, now: &DateTime<Local>) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&day.and_time(now.time()))
        .earliest()
        .map(|d| d.with_timezone(&Utc))
}
