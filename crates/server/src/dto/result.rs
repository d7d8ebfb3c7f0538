use meetgrid::feed::WalkSource;
use meetgrid::search::{Action, ActionKind, MeetingResult, PersonOutcome};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status")]
pub enum MeetResponseDto {
    Ok {
        platform_id: String,
        meeting_time: String,
        fairness_s: u32,
        people: Vec<PersonOutcomeDto>,
    },
    Cap {
        label: String,
    },
    None,
}

impl From<MeetingResult> for MeetResponseDto {
    fn from(result: MeetingResult) -> Self {
        match result {
            MeetingResult::Ok {
                platform_id,
                meeting_time,
                people,
            } => {
                let fairness_s = people
                    .iter()
                    .map(|p| p.elapsed.as_seconds())
                    .max()
                    .unwrap_or(0)
                    .saturating_sub(people.iter().map(|p| p.elapsed.as_seconds()).min().unwrap_or(0));
                Self::Ok {
                    platform_id: platform_id.to_string(),
                    meeting_time: meeting_time.to_hms_string(),
                    fairness_s,
                    people: people.into_iter().map(PersonOutcomeDto::from).collect(),
                }
            }
            MeetingResult::Cap { label } => Self::Cap {
                label: label.to_string(),
            },
            MeetingResult::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonOutcomeDto {
    pub label: String,
    pub elapsed_s: u32,
    pub arrival_abs: String,
    pub steps: Vec<ActionDto>,
}

impl From<PersonOutcome> for PersonOutcomeDto {
    fn from(outcome: PersonOutcome) -> Self {
        Self {
            label: outcome.label.to_string(),
            elapsed_s: outcome.elapsed.as_seconds(),
            arrival_abs: outcome.arrival_abs.to_hms_string(),
            steps: outcome.steps.into_iter().map(ActionDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind")]
pub enum ActionDto {
    Start {
        to_platform_id: String,
        arrival_abs: String,
    },
    Walk {
        source: String,
        from_platform_id: Option<String>,
        to_platform_id: String,
        departure_abs: String,
        arrival_abs: String,
    },
    Ride {
        trip_id: String,
        route_id: String,
        headsign: Option<String>,
        from_platform_id: Option<String>,
        to_platform_id: String,
        departure_abs: String,
        arrival_abs: String,
        wait_s: u32,
        ride_s: u32,
    },
}

impl From<Action> for ActionDto {
    fn from(action: Action) -> Self {
        match action.kind {
            ActionKind::Start => Self::Start {
                to_platform_id: action.to_platform_id.to_string(),
                arrival_abs: action.arrival_abs.to_hms_string(),
            },
            ActionKind::Walk { source } => Self::Walk {
                source: walk_source_str(source).to_string(),
                from_platform_id: action.from_platform_id.map(|id| id.to_string()),
                to_platform_id: action.to_platform_id.to_string(),
                departure_abs: action.departure_abs.to_hms_string(),
                arrival_abs: action.arrival_abs.to_hms_string(),
            },
            ActionKind::Ride {
                trip_id,
                route_id,
                headsign,
                wait_s,
                ride_s,
            } => Self::Ride {
                trip_id: trip_id.to_string(),
                route_id: route_id.to_string(),
                headsign: headsign.map(|value| value.to_string()),
                from_platform_id: action.from_platform_id.map(|id| id.to_string()),
                to_platform_id: action.to_platform_id.to_string(),
                departure_abs: action.departure_abs.to_hms_string(),
                arrival_abs: action.arrival_abs.to_hms_string(),
                wait_s,
                ride_s,
            },
        }
    }
}

fn walk_source_str(source: WalkSource) -> &'static str {
    match source {
        WalkSource::Pathways => "pathways",
        WalkSource::Transfers => "transfers",
        WalkSource::Geo => "geo",
    }
}
