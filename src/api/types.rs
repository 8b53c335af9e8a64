//! Wire types exchanged with the REST API.

use serde::{Deserialize, Serialize};

/// Identifier of a human factor.
pub type FactorId = i64;

/// A human factor as returned by `GET humanfactor`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorNode {
	pub id: FactorId,
	pub title: String,
	/// `None` while the factor has not been measured yet.
	#[serde(default)]
	pub score: Option<f64>,
	#[serde(default)]
	pub affects_to: Vec<FactorId>,
}

/// A recommended action from `GET teams/actions`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Action {
	pub title: String,
	#[serde(default)]
	pub description: String,
	pub score: f64,
}

/// A member of the admin's team.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TeamMember {
	pub id: i64,
	pub email: String,
}

/// How often survey questions are sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionFrequency {
	#[default]
	Daily,
	Weekly,
	Monthly,
}

impl QuestionFrequency {
	/// All variants in display order.
	pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

	/// Wire name, as used by form `<select>` values.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Daily => "DAILY",
			Self::Weekly => "WEEKLY",
			Self::Monthly => "MONTHLY",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Daily => "Daily",
			Self::Weekly => "Weekly",
			Self::Monthly => "Monthly",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|f| f.as_str() == value)
	}
}

/// Day of the week questions are sent on for weekly schedules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
	#[default]
	Monday,
	Tuesday,
	Wednesday,
	Thursday,
	Friday,
	Saturday,
	Sunday,
}

impl DayOfWeek {
	pub const ALL: [Self; 7] = [
		Self::Monday,
		Self::Tuesday,
		Self::Wednesday,
		Self::Thursday,
		Self::Friday,
		Self::Saturday,
		Self::Sunday,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Monday => "MONDAY",
			Self::Tuesday => "TUESDAY",
			Self::Wednesday => "WEDNESDAY",
			Self::Thursday => "THURSDAY",
			Self::Friday => "FRIDAY",
			Self::Saturday => "SATURDAY",
			Self::Sunday => "SUNDAY",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Monday => "Monday",
			Self::Tuesday => "Tuesday",
			Self::Wednesday => "Wednesday",
			Self::Thursday => "Thursday",
			Self::Friday => "Friday",
			Self::Saturday => "Saturday",
			Self::Sunday => "Sunday",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|d| d.as_str() == value)
	}
}

/// Team returned by `GET teams`, `POST teams` and `PUT teams/time`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
	#[serde(default)]
	pub members: Vec<TeamMember>,
	#[serde(default)]
	pub question_sending_time: String,
	#[serde(default)]
	pub question_frequency: Option<QuestionFrequency>,
	#[serde(default)]
	pub question_day_of_week: Option<DayOfWeek>,
	#[serde(default)]
	pub question_day_of_month: Option<u8>,
}

impl Team {
	/// Current schedule, filling unset fields with the server defaults.
	pub fn schedule(&self) -> QuestionSchedule {
		QuestionSchedule {
			question_sending_time: self.question_sending_time.clone(),
			question_frequency: self.question_frequency.unwrap_or_default(),
			question_day_of_week: Some(self.question_day_of_week.unwrap_or_default()),
			question_day_of_month: Some(
				self.question_day_of_month
					.filter(|d| (1..=28).contains(d))
					.unwrap_or(1),
			),
		}
	}
}

/// Body of `PUT teams/time`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSchedule {
	/// Local time formatted as `HH:mm`.
	pub question_sending_time: String,
	pub question_frequency: QuestionFrequency,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub question_day_of_week: Option<DayOfWeek>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub question_day_of_month: Option<u8>,
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn factor_node_accepts_null_score_and_extra_fields() {
		let json = r#"[
			{"id": 1, "title": "A", "score": 0.8, "affectsTo": [2], "cluster": "x"},
			{"id": 2, "title": "B", "score": null, "affectsTo": []}
		]"#;
		let nodes: Vec<FactorNode> = serde_json::from_str(json).unwrap();
		assert_eq!(nodes[0].affects_to, vec![2]);
		assert_eq!(nodes[0].score, Some(0.8));
		assert_eq!(nodes[1].score, None);
	}

	#[test]
	fn team_schedule_uses_server_defaults() {
		let team: Team = serde_json::from_str(
			r#"{"members": [], "questionSendingTime": "09:30", "questionDayOfMonth": 0}"#,
		)
		.unwrap();
		let schedule = team.schedule();
		assert_eq!(schedule.question_frequency, QuestionFrequency::Daily);
		assert_eq!(schedule.question_day_of_week, Some(DayOfWeek::Monday));
		assert_eq!(schedule.question_day_of_month, Some(1));
		assert_eq!(schedule.question_sending_time, "09:30");
	}

	#[test]
	fn schedule_serializes_camel_case_and_skips_unset_days() {
		let schedule = QuestionSchedule {
			question_sending_time: "10:00".into(),
			question_frequency: QuestionFrequency::Weekly,
			question_day_of_week: Some(DayOfWeek::Friday),
			question_day_of_month: None,
		};
		let value = serde_json::to_value(&schedule).unwrap();
		assert_eq!(
			value,
			serde_json::json!({
				"questionSendingTime": "10:00",
				"questionFrequency": "WEEKLY",
				"questionDayOfWeek": "FRIDAY"
			})
		);
	}
}
