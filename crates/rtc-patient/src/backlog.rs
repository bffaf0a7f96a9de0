//! `Backlog` — patients waiting for their first session.

use std::collections::VecDeque;

use crate::{Patient, PatientState};

/// FIFO queue: insertion order is arrival order and admission takes the front.
#[derive(Clone, Debug, Default)]
pub struct Backlog {
    queue: VecDeque<Patient>,
}

impl Backlog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a patient at the tail.
    ///
    /// # Panics
    /// Panics in debug mode if the patient is not `Waiting`.
    pub fn push(&mut self, patient: Patient) {
        debug_assert_eq!(patient.state, PatientState::Waiting);
        self.queue.push_back(patient);
    }

    pub fn extend(&mut self, patients: impl IntoIterator<Item = Patient>) {
        for patient in patients {
            self.push(patient);
        }
    }

    /// Remove and return the longest-waiting patient.
    pub fn pop_front(&mut self) -> Option<Patient> {
        self.queue.pop_front()
    }

    pub fn front(&self) -> Option<&Patient> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.queue.iter()
    }
}
