use serde::Deserialize;

const START_RULE_MARKER: &str = "StartScheduledRule";
const STOP_RULE_MARKER: &str = "StopScheduledRule";

/// The scheduled-event payload. Only `resources` is consumed.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleEvent {
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduleAction {
    Start,
    Stop,
    Unknown,
}

impl ScheduleAction {
    /// Substring match against the triggering rule identifiers. Start is
    /// checked across all entries before Stop.
    pub fn classify<S: AsRef<str>>(resources: &[S]) -> ScheduleAction {
        let contains = |marker: &str| {
            resources
                .iter()
                .any(|resource| resource.as_ref().contains(marker))
        };
        if contains(START_RULE_MARKER) {
            ScheduleAction::Start
        } else if contains(STOP_RULE_MARKER) {
            ScheduleAction::Stop
        } else {
            ScheduleAction::Unknown
        }
    }
}

impl From<&ScheduleEvent> for ScheduleAction {
    fn from(event: &ScheduleEvent) -> Self {
        ScheduleAction::classify(event.resources.as_slice())
    }
}
