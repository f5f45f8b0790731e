/// Popup session state and its transitions

use crate::error::ScrapeError;
use std::rc::Rc;
use yew::Reducible;

pub const SCRAPING_MESSAGE: &str = "Scraping page content...";
pub const SUBMITTING_MESSAGE: &str = "Analyzing with AI and adding to Notion...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub status: Status,
    pub message: String,
}

/// One step of an analyze run
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Start,
    Submitting,
    Succeeded(String),
    Failed(ScrapeError),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// A new run may only start outside Loading.
    pub fn can_trigger(&self) -> bool {
        !self.is_loading()
    }

    /// Next state for `action`, or `None` when the action does not apply.
    ///
    /// Start is the only way into Loading, and every other action requires
    /// Loading, so two non-Loading states are never adjacent.
    pub fn apply(&self, action: Action) -> Option<SessionState> {
        match (self.status, action) {
            (Status::Loading, Action::Start) => None,
            (_, Action::Start) => Some(SessionState {
                status: Status::Loading,
                message: SCRAPING_MESSAGE.to_string(),
            }),
            (Status::Loading, Action::Submitting) => Some(SessionState {
                status: Status::Loading,
                message: SUBMITTING_MESSAGE.to_string(),
            }),
            (Status::Loading, Action::Succeeded(message)) => Some(SessionState {
                status: Status::Success,
                message,
            }),
            (Status::Loading, Action::Failed(err)) => Some(SessionState {
                status: Status::Error,
                message: err.to_string(),
            }),
            (_, action) => {
                log::debug!("Ignoring {:?} while {:?}", action, self.status);
                None
            }
        }
    }
}

impl Reducible for SessionState {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Action) -> Rc<Self> {
        match self.apply(action) {
            Some(next) => Rc::new(next),
            None => self,
        }
    }
}
