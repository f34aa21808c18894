#![allow(dead_code)]

use calnote_core::{DateKey, SessionError, SessionUi};
use std::collections::{BTreeSet, VecDeque};

/// UI double that records every collaborator call.
#[derive(Default)]
pub struct RecordingUi {
    pub marks: Vec<BTreeSet<DateKey>>,
    pub prompts: Vec<String>,
    pub answers: VecDeque<Option<String>>,
    pub errors: Vec<String>,
}

impl RecordingUi {
    pub fn answering(answers: impl IntoIterator<Item = Option<&'static str>>) -> Self {
        Self {
            answers: answers
                .into_iter()
                .map(|answer| answer.map(str::to_string))
                .collect(),
            ..Self::default()
        }
    }

    pub fn last_marks(&self) -> BTreeSet<DateKey> {
        self.marks.last().cloned().unwrap_or_default()
    }
}

impl SessionUi for RecordingUi {
    fn mark_dates(&mut self, dates: &BTreeSet<DateKey>) {
        self.marks.push(dates.clone());
    }

    fn prompt_tag_name(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().flatten()
    }

    fn report_error(&mut self, error: &SessionError) {
        self.errors.push(error.to_string());
    }
}

pub fn day(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}
