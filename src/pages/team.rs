use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{LoadStatus, Mounted};
use crate::api::team::{MemberError, ScheduleError, ScheduleForm, validate_new_member};
use crate::api::{AuthService, DayOfWeek, QuestionFrequency, Team, TeamMember};

const ADD_TO_SLACK_IMG: &str = "https://platform.slack-edge.com/img/add_to_slack.png";
const ADD_TO_SLACK_SRCSET: &str = "https://platform.slack-edge.com/img/add_to_slack.png 1x, https://platform.slack-edge.com/img/add_to_slack@2x.png 2x";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IntegrationStatus {
	Loading,
	Completed,
	NotCompleted,
}

/// Team membership, Slack integration and question schedule settings.
#[component]
pub fn TeamScreen() -> impl IntoView {
	let auth = expect_context::<AuthService>();
	let mounted = Mounted::track();

	let members = RwSignal::new(Vec::<TeamMember>::new());
	let members_status = RwSignal::new(LoadStatus::Loading);
	let retrieve_error = RwSignal::new(false);
	let integration = RwSignal::new(IntegrationStatus::Loading);
	let schedule = RwSignal::new(ScheduleForm::from_schedule(&Team::default().schedule()));

	{
		let (auth, mounted) = (auth.clone(), mounted.clone());
		spawn_local(async move {
			let result = auth.get::<Team>("teams").await;
			if !mounted.get() {
				return;
			}
			match result {
				Ok(team) => {
					schedule.set(ScheduleForm::from_schedule(&team.schedule()));
					members.set(team.members);
				}
				Err(err) => {
					log::error!("failed to load team: {}", err);
					retrieve_error.set(true);
				}
			}
			members_status.set(LoadStatus::Loaded);
		});
	}

	{
		let (auth, mounted) = (auth.clone(), mounted.clone());
		spawn_local(async move {
			let status = match auth.get::<bool>("user/integration").await {
				Ok(true) => IntegrationStatus::Completed,
				Ok(false) => IntegrationStatus::NotCompleted,
				Err(err) => {
					log::warn!("integration status unavailable: {}", err);
					IntegrationStatus::NotCompleted
				}
			};
			if mounted.get() {
				integration.set(status);
			}
		});
	}

	let slack_install = auth.config().url("slack/install");

	view! {
		<div class="TeamScreen page">
			<MembersPanel
				members=members
				members_status=members_status
				retrieve_error=retrieve_error
				mounted=mounted.clone()
			/>
			<div
				class="individual"
				style=move || {
					if integration.get() == IntegrationStatus::Loading { "min-height: 130px;" } else { "" }
				}
			>
				<div class="individual-left">
					<h2>"Slack integration"</h2>
					{move || match integration.get() {
						IntegrationStatus::Loading => {
							view! {
								<p style="visibility: hidden;">
									"Placeholder for Slack integration message"
								</p>
							}
								.into_any()
						}
						IntegrationStatus::NotCompleted => {
							view! {
								<p>
									<b>"Slack integration has not been completed."</b>
									" Slack is necessary to send the human-factor questions to team members. Click the button to add the Slack App to your workspace. This button will redirect you to another page that generates a secured \"Add to Slack\" button."
								</p>
							}
								.into_any()
						}
						IntegrationStatus::Completed => {
							view! { <p>"Slack integration has been completed."</p> }.into_any()
						}
					}}
				</div>
				<div class="individual-middle"></div>
				<div class="individual-right">
					<Show when=move || integration.get() == IntegrationStatus::NotCompleted>
						<a class="centered" href=slack_install.clone()>
							<img
								alt="Add to Slack"
								height="40"
								width="139"
								src=ADD_TO_SLACK_IMG
								srcset=ADD_TO_SLACK_SRCSET
							/>
						</a>
					</Show>
				</div>
			</div>
			<SchedulePanel schedule=schedule mounted=mounted />
		</div>
	}
}

#[component]
fn MembersPanel(
	members: RwSignal<Vec<TeamMember>>,
	members_status: RwSignal<LoadStatus>,
	retrieve_error: RwSignal<bool>,
	mounted: Mounted,
) -> impl IntoView {
	let auth = expect_context::<AuthService>();
	let new_email = RwSignal::new(String::new());
	let validation = RwSignal::new(None::<MemberError>);
	let creation_error = RwSignal::new(false);
	let removal_error = RwSignal::new(false);

	let add_member = {
		let (auth, mounted) = (auth.clone(), mounted.clone());
		move |_| {
			let email = new_email.get_untracked().trim().to_string();
			if let Err(err) = members.with_untracked(|m| validate_new_member(&email, m)) {
				validation.set(Some(err));
				return;
			}
			validation.set(None);
			creation_error.set(false);

			let (auth, mounted) = (auth.clone(), mounted.clone());
			spawn_local(async move {
				let result = auth.post_text::<Team>("teams", &email).await;
				if !mounted.get() {
					return;
				}
				match result {
					Ok(team) => {
						members.set(team.members);
						new_email.set(String::new());
					}
					Err(err) => {
						log::error!("failed to add {}: {}", email, err);
						creation_error.set(true);
					}
				}
			});
		}
	};

	let remove_member = move |email: String| {
		removal_error.set(false);
		let (auth, mounted) = (auth.clone(), mounted.clone());
		spawn_local(async move {
			let result = auth.delete(&format!("teams/{}", email)).await;
			if !mounted.get() {
				return;
			}
			match result {
				Ok(()) => members.update(|m| m.retain(|member| member.email != email)),
				Err(err) => {
					log::error!("failed to remove {}: {}", email, err);
					removal_error.set(true);
				}
			}
		});
	};

	view! {
		<div class="TeamScreen-members individual">
			<h2>"Team members"</h2>

			<Show when=move || retrieve_error.get()>
				<div class="TeamScreen-members-error">"Team retrieve error."</div>
			</Show>
			<Show when=move || validation.get() == Some(MemberError::AlreadyMember)>
				<div class="TeamScreen-members-error">
					{MemberError::AlreadyMember.to_string()}
				</div>
			</Show>
			<Show when=move || creation_error.get()>
				<div class="TeamScreen-members-error">
					"An unexpected error occurred on member creation."
				</div>
			</Show>
			<Show when=move || removal_error.get()>
				<div class="TeamScreen-members-error">
					"An unexpected error occurred on member removal."
				</div>
			</Show>
			<Show when=move || validation.get() == Some(MemberError::InvalidEmail)>
				<div class="TeamScreen-members-newMember-form-errorMessage">
					{MemberError::InvalidEmail.to_string()}
				</div>
			</Show>

			<Show when=move || {
				members_status.get() == LoadStatus::Loaded && !retrieve_error.get()
					&& members.with(Vec::is_empty)
			}>
				<div class="TeamScreen-members-noMembersMessage">
					"Your team has no members yet."
				</div>
			</Show>

			<div class="TeamScreen-members-list">
				{move || {
					members
						.get()
						.into_iter()
						.map(|member| {
							let remove_member = remove_member.clone();
							let email = member.email.clone();
							view! {
								<div class="TeamMember">
									<div class="TeamMember-email">{member.email}</div>
									<div class="TeamMember-remove">
										<button
											class="TeamMember-remove-button"
											aria-label="Remove member"
											on:click=move |_| remove_member(email.clone())
										>
											"Remove"
										</button>
									</div>
								</div>
							}
						})
						.collect_view()
				}}
			</div>

			<div class="TeamScreen-members-newMember-form">
				<input
					class="TeamScreen-members-newMember-form-input"
					type="text"
					placeholder="Email"
					autocomplete="email"
					aria-label="New member email"
					prop:value=move || new_email.get()
					on:input=move |ev| new_email.set(event_target_value(&ev))
				/>
				<button class="TeamScreen-members-newMember-form-button" on:click=add_member>
					"Add team member"
				</button>
			</div>
		</div>
	}
}

#[component]
fn SchedulePanel(schedule: RwSignal<ScheduleForm>, mounted: Mounted) -> impl IntoView {
	let auth = expect_context::<AuthService>();
	let time_error = RwSignal::new(None::<ScheduleError>);
	let day_error = RwSignal::new(None::<ScheduleError>);
	let save_error = RwSignal::new(false);
	let saved = RwSignal::new(false);

	let save = move |_| {
		let form = schedule.get_untracked();
		time_error.set(form.time_error());
		day_error.set(form.day_of_month_error());
		save_error.set(false);
		saved.set(false);
		let Ok(body) = form.to_schedule() else {
			return;
		};

		let (auth, mounted) = (auth.clone(), mounted.clone());
		spawn_local(async move {
			let result = auth.put_json::<_, Team>("teams/time", &body).await;
			if !mounted.get() {
				return;
			}
			match result {
				Ok(team) => {
					schedule.set(ScheduleForm::from_schedule(&team.schedule()));
					saved.set(true);
				}
				Err(err) => {
					log::error!("failed to update question schedule: {}", err);
					save_error.set(true);
				}
			}
		});
	};

	let frequency = move || schedule.with(|f| f.frequency);

	view! {
		<div class="individual">
			<div class="individual-left">
				<h2>"Question sending time"</h2>
				<p>
					"Set when the questions for human-factor measurement are sent to the team. Questions will be sent only once per scheduled day."
				</p>
				<Show when=move || time_error.get().is_some()>
					<div class="TeamScreen-members-error">
						{move || time_error.get().map(|e| e.to_string())}
					</div>
				</Show>
				<Show when=move || day_error.get().is_some()>
					<div class="TeamScreen-members-error">
						{move || day_error.get().map(|e| e.to_string())}
					</div>
				</Show>
				<Show when=move || save_error.get()>
					<div class="TeamScreen-members-error">
						"An unexpected error occurred while saving the schedule."
					</div>
				</Show>
				<Show when=move || saved.get()>
					<div class="TeamScreen-schedule-saved">"Schedule saved."</div>
				</Show>
			</div>
			<div class="individual-middle"></div>
			<div class="individual-right">
				<div class="centered TeamScreen-schedule-form">
					<input
						type="time"
						id="questionTime"
						name="questionTime"
						prop:value=move || schedule.with(|f| f.time.clone())
						on:input=move |ev| schedule.update(|f| f.time = event_target_value(&ev))
					/>
					<select
						name="questionFrequency"
						prop:value=move || frequency().as_str()
						on:change=move |ev| {
							if let Some(value) = QuestionFrequency::parse(&event_target_value(&ev)) {
								schedule.update(|f| f.frequency = value);
							}
						}
					>
						{QuestionFrequency::ALL
							.into_iter()
							.map(|f| view! { <option value=f.as_str()>{f.label()}</option> })
							.collect_view()}
					</select>
					<Show when=move || frequency() == QuestionFrequency::Weekly>
						<select
							name="questionDayOfWeek"
							prop:value=move || schedule.with(|f| f.day_of_week.as_str())
							on:change=move |ev| {
								if let Some(value) = DayOfWeek::parse(&event_target_value(&ev)) {
									schedule.update(|f| f.day_of_week = value);
								}
							}
						>
							{DayOfWeek::ALL
								.into_iter()
								.map(|d| view! { <option value=d.as_str()>{d.label()}</option> })
								.collect_view()}
						</select>
					</Show>
					<Show when=move || frequency() == QuestionFrequency::Monthly>
						<input
							type="number"
							name="questionDayOfMonth"
							min="1"
							max="28"
							prop:value=move || schedule.with(|f| f.day_of_month.clone())
							on:input=move |ev| {
								schedule.update(|f| f.day_of_month = event_target_value(&ev))
							}
						/>
					</Show>
					<button class="TeamScreen-schedule-save" on:click=save>
						"Save schedule"
					</button>
				</div>
			</div>
		</div>
	}
}
