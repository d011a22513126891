//! Profile setup flow.
//!
//! The setup wizard is a fixed sequence of steps, each with a gate that must
//! pass before moving on. Saving a profile walks the whole sequence so a
//! client cannot skip a step the wizard would have enforced.

use crate::models::{PlayStyle, UpdateProfileRequest};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    Identity,
    Games,
    Style,
    Availability,
    Bio,
    Contacts,
    Done,
}

impl SetupStep {
    pub const SEQUENCE: [SetupStep; 7] = [
        SetupStep::Identity,
        SetupStep::Games,
        SetupStep::Style,
        SetupStep::Availability,
        SetupStep::Bio,
        SetupStep::Contacts,
        SetupStep::Done,
    ];

    pub fn first() -> Self {
        SetupStep::Identity
    }

    pub fn next(self) -> Self {
        match self {
            SetupStep::Identity => SetupStep::Games,
            SetupStep::Games => SetupStep::Style,
            SetupStep::Style => SetupStep::Availability,
            SetupStep::Availability => SetupStep::Bio,
            SetupStep::Bio => SetupStep::Contacts,
            SetupStep::Contacts | SetupStep::Done => SetupStep::Done,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            SetupStep::Identity | SetupStep::Games => SetupStep::Identity,
            SetupStep::Style => SetupStep::Games,
            SetupStep::Availability => SetupStep::Style,
            SetupStep::Bio => SetupStep::Availability,
            SetupStep::Contacts => SetupStep::Bio,
            SetupStep::Done => SetupStep::Contacts,
        }
    }

    /// Whether `draft` satisfies this step's gate.
    pub fn can_proceed(self, draft: &UpdateProfileRequest) -> bool {
        match self {
            SetupStep::Identity => draft.username.trim().chars().count() >= 2,
            SetupStep::Games => !draft.games.is_empty(),
            SetupStep::Style => draft.play_style != PlayStyle::default(),
            SetupStep::Availability => !draft.availability.is_empty(),
            SetupStep::Bio | SetupStep::Contacts | SetupStep::Done => true,
        }
    }

    /// Advance from this step if its gate passes, otherwise stay.
    pub fn advance(self, draft: &UpdateProfileRequest) -> Self {
        if self.can_proceed(draft) {
            self.next()
        } else {
            self
        }
    }
}

/// Walk the wizard from the first step and return the step it stops on.
/// `Done` means the draft is complete.
pub fn walk(draft: &UpdateProfileRequest) -> SetupStep {
    let mut step = SetupStep::first();
    loop {
        let next = step.advance(draft);
        if next == step {
            return step;
        }
        step = next;
    }
}

/// First step whose gate fails, if any
pub fn first_incomplete_step(draft: &UpdateProfileRequest) -> Option<SetupStep> {
    match walk(draft) {
        SetupStep::Done => None,
        step => Some(step),
    }
}
