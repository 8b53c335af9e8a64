//! Client-side validation for team membership and survey scheduling.

use chrono::NaiveTime;
use thiserror::Error;

use super::types::{DayOfWeek, QuestionFrequency, QuestionSchedule, TeamMember};

/// Why a new member cannot be submitted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberError {
	#[error("Incorrect email format.")]
	InvalidEmail,
	#[error("The email is already registered as a team member.")]
	AlreadyMember,
}

/// Why a schedule cannot be submitted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
	#[error("Incorrect time format, expected HH:mm.")]
	InvalidTime,
	#[error("Day of month must be between 1 and 28.")]
	DayOfMonthOutOfRange,
}

/// Last day of the month a monthly schedule may use.
pub const MAX_DAY_OF_MONTH: u8 = 28;

/// Loose structural email check: one `@`, a non-empty local part and a
/// dotted domain without whitespace.
pub fn is_valid_email(email: &str) -> bool {
	if email.chars().any(char::is_whitespace) {
		return false;
	}
	let Some((local, domain)) = email.split_once('@') else {
		return false;
	};
	if local.is_empty() || domain.contains('@') {
		return false;
	}
	let labels: Vec<&str> = domain.split('.').collect();
	labels.len() >= 2
		&& labels.iter().all(|l| {
			!l.is_empty()
				&& !l.starts_with('-')
				&& !l.ends_with('-')
				&& l.chars().all(|c| c.is_alphanumeric() || c == '-')
		})
		&& labels.last().is_some_and(|tld| tld.len() >= 2)
}

/// Check a candidate member against the format rule and the current list.
pub fn validate_new_member(email: &str, members: &[TeamMember]) -> Result<(), MemberError> {
	if !is_valid_email(email) {
		return Err(MemberError::InvalidEmail);
	}
	if members.iter().any(|m| m.email == email) {
		return Err(MemberError::AlreadyMember);
	}
	Ok(())
}

/// Parse an `HH:mm` time as produced by `<input type="time">`.
pub fn parse_sending_time(value: &str) -> Result<NaiveTime, ScheduleError> {
	NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| ScheduleError::InvalidTime)
}

/// Raw schedule form values before validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleForm {
	pub time: String,
	pub frequency: QuestionFrequency,
	pub day_of_week: DayOfWeek,
	pub day_of_month: String,
}

impl ScheduleForm {
	pub fn from_schedule(schedule: &QuestionSchedule) -> Self {
		Self {
			time: schedule.question_sending_time.clone(),
			frequency: schedule.question_frequency,
			day_of_week: schedule.question_day_of_week.unwrap_or_default(),
			day_of_month: schedule.question_day_of_month.unwrap_or(1).to_string(),
		}
	}

	/// Validate the time field alone.
	pub fn time_error(&self) -> Option<ScheduleError> {
		parse_sending_time(&self.time).err()
	}

	/// Validate the day-of-month field alone. Only monthly schedules use it.
	pub fn day_of_month_error(&self) -> Option<ScheduleError> {
		if self.frequency != QuestionFrequency::Monthly {
			return None;
		}
		self.parsed_day_of_month().err()
	}

	fn parsed_day_of_month(&self) -> Result<u8, ScheduleError> {
		self.day_of_month
			.trim()
			.parse::<u8>()
			.ok()
			.filter(|d| (1..=MAX_DAY_OF_MONTH).contains(d))
			.ok_or(ScheduleError::DayOfMonthOutOfRange)
	}

	/// Build the request body, keeping only the day field the frequency uses.
	pub fn to_schedule(&self) -> Result<QuestionSchedule, ScheduleError> {
		let time = parse_sending_time(&self.time)?;
		let (day_of_week, day_of_month) = match self.frequency {
			QuestionFrequency::Daily => (None, None),
			QuestionFrequency::Weekly => (Some(self.day_of_week), None),
			QuestionFrequency::Monthly => (None, Some(self.parsed_day_of_month()?)),
		};
		Ok(QuestionSchedule {
			question_sending_time: time.format("%H:%M").to_string(),
			question_frequency: self.frequency,
			question_day_of_week: day_of_week,
			question_day_of_month: day_of_month,
		})
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn member(email: &str) -> TeamMember {
		TeamMember {
			id: 1,
			email: email.into(),
		}
	}

	fn form(time: &str, frequency: QuestionFrequency, day_of_month: &str) -> ScheduleForm {
		ScheduleForm {
			time: time.into(),
			frequency,
			day_of_week: DayOfWeek::Wednesday,
			day_of_month: day_of_month.into(),
		}
	}

	#[test]
	fn email_format() {
		assert!(is_valid_email("ana@example.com"));
		assert!(is_valid_email("first.last+tag@sub.example.org"));
		assert!(!is_valid_email(""));
		assert!(!is_valid_email("ana"));
		assert!(!is_valid_email("ana@localhost"));
		assert!(!is_valid_email("ana@@example.com"));
		assert!(!is_valid_email("ana @example.com"));
		assert!(!is_valid_email("@example.com"));
		assert!(!is_valid_email("ana@example.c"));
	}

	#[test]
	fn new_member_rejects_duplicates_after_format() {
		let members = vec![member("ana@example.com")];
		assert_eq!(
			validate_new_member("ana@example.com", &members),
			Err(MemberError::AlreadyMember)
		);
		assert_eq!(
			validate_new_member("not-an-email", &members),
			Err(MemberError::InvalidEmail)
		);
		assert_eq!(validate_new_member("bo@example.com", &members), Ok(()));
	}

	#[test]
	fn daily_schedule_drops_day_fields() {
		let schedule = form(" 09:05 ", QuestionFrequency::Daily, "31").to_schedule().unwrap();
		assert_eq!(
			schedule,
			QuestionSchedule {
				question_sending_time: "09:05".into(),
				question_frequency: QuestionFrequency::Daily,
				question_day_of_week: None,
				question_day_of_month: None,
			}
		);
	}

	#[test]
	fn weekly_schedule_keeps_weekday() {
		let schedule = form("18:00", QuestionFrequency::Weekly, "").to_schedule().unwrap();
		assert_eq!(schedule.question_day_of_week, Some(DayOfWeek::Wednesday));
		assert_eq!(schedule.question_day_of_month, None);
	}

	#[test]
	fn monthly_schedule_bounds_day_of_month() {
		assert_eq!(
			form("08:00", QuestionFrequency::Monthly, "28").to_schedule().unwrap().question_day_of_month,
			Some(28)
		);
		for bad in ["0", "29", "x", ""] {
			assert_eq!(
				form("08:00", QuestionFrequency::Monthly, bad).to_schedule(),
				Err(ScheduleError::DayOfMonthOutOfRange)
			);
		}
	}

	#[test]
	fn field_errors_are_independent() {
		let f = form("25:00", QuestionFrequency::Monthly, "12");
		assert_eq!(f.time_error(), Some(ScheduleError::InvalidTime));
		assert_eq!(f.day_of_month_error(), None);

		let f = form("07:45", QuestionFrequency::Monthly, "40");
		assert_eq!(f.time_error(), None);
		assert_eq!(f.day_of_month_error(), Some(ScheduleError::DayOfMonthOutOfRange));

		let f = form("07:45", QuestionFrequency::Weekly, "40");
		assert_eq!(f.day_of_month_error(), None);
	}
}
