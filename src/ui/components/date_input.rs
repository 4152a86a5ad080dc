use chrono::{Datelike, NaiveDate};
use crossterm::event::KeyCode;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

/// Keyboard entry for an optional date, one part at a time.
///
/// Typing a full part (4 digits for the year, 2 otherwise) commits it.
/// Dates before `min` are refused.
pub struct DateInputState {
    pub date: Option<NaiveDate>,
    pub min: Option<NaiveDate>,
    pub editing: bool,
    pub date_part: DatePart,
    pending: String,
    cursor: NaiveDate,
}

impl DateInputState {
    pub fn new(date: Option<NaiveDate>, fallback: NaiveDate) -> Self {
        Self {
            date,
            min: None,
            editing: false,
            date_part: DatePart::Year,
            pending: String::new(),
            cursor: date.unwrap_or(fallback),
        }
    }

    pub fn with_min(mut self, min: NaiveDate) -> Self {
        self.min = Some(min);
        self
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.editing {
            self.date_part = DatePart::Year;
            self.pending.clear();
        }
    }

    pub fn set(&mut self, date: Option<NaiveDate>) {
        self.date = date;
        if let Some(date) = date {
            self.cursor = date;
        }
    }

    fn next_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Month,
            DatePart::Month => DatePart::Day,
            DatePart::Day => DatePart::Year,
        };
        self.pending.clear();
    }

    fn previous_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Day,
            DatePart::Month => DatePart::Year,
            DatePart::Day => DatePart::Month,
        };
        self.pending.clear();
    }

    /// Handle one key. Returns true when the committed date changed.
    pub fn handle_input(&mut self, key: KeyCode) -> bool {
        if !self.editing {
            return false;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.pending.push(c);
                let width = if self.date_part == DatePart::Year { 4 } else { 2 };
                if self.pending.len() < width {
                    return false;
                }

                let candidate = self.pending.parse::<u32>().ok().and_then(|n| {
                    let (y, m, d) = (self.cursor.year(), self.cursor.month(), self.cursor.day());
                    match self.date_part {
                        DatePart::Year => NaiveDate::from_ymd_opt(n as i32, m, d.min(28)),
                        DatePart::Month => NaiveDate::from_ymd_opt(y, n, d.min(28)),
                        DatePart::Day => NaiveDate::from_ymd_opt(y, m, n),
                    }
                });
                self.pending.clear();

                match candidate {
                    Some(date) if self.min.is_none_or(|min| date >= min) => {
                        self.cursor = date;
                        self.date = Some(date);
                        self.next_part();
                        true
                    }
                    _ => false,
                }
            }
            KeyCode::Backspace => {
                self.pending.pop();
                false
            }
            KeyCode::Delete => {
                self.pending.clear();
                let changed = self.date.is_some();
                self.date = None;
                changed
            }
            KeyCode::Right => {
                self.next_part();
                false
            }
            KeyCode::Left => {
                self.previous_part();
                false
            }
            _ => false,
        }
    }

    pub fn get_display_string(&self) -> String {
        if !self.editing {
            return self
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "Not set".to_string());
        }

        let year = format!("{:04}", self.cursor.year());
        let month = format!("{:02}", self.cursor.month());
        let day = format!("{:02}", self.cursor.day());
        let marker = if self.pending.is_empty() {
            match self.date_part {
                DatePart::Year => "[YYYY]".to_string(),
                DatePart::Month => "[MM]".to_string(),
                DatePart::Day => "[DD]".to_string(),
            }
        } else {
            format!("[{}]", self.pending)
        };

        match self.date_part {
            DatePart::Year => format!("{}{}-{}-{}", year, marker, month, day),
            DatePart::Month => format!("{}-{}{}-{}", year, month, marker, day),
            DatePart::Day => format!("{}-{}-{}{}", year, month, day, marker),
        }
    }
}
