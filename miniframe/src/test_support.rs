//! Shared fixtures for unit tests across modules (not part of the public API).
//!
//! `WalkModel` is the one-dimensional walk from spec scenario S1: a single
//! actor at `pos` trying to reach `target` on `[-5, 5]` in at most six steps.

#![cfg(test)]

use crate::model::{Model, Sente};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WalkStatus {
    pub pos: i32,
    pub target: i32,
    pub step: u32,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct WalkModel {
    pub target: i32,
}

impl Default for WalkModel {
    fn default() -> Self {
        Self { target: 2 }
    }
}

impl WalkModel {
    pub(crate) fn initial(&self) -> WalkStatus {
        WalkStatus {
            pos: 0,
            target: self.target,
            step: 0,
        }
    }
}

impl Model for WalkModel {
    type Status = WalkStatus;
    type Transition = i32;

    const NUM_ACTORS: usize = 1;
    const MAX_TRANSITIONS: usize = 3;
    const SIMULTANEOUS_PLAY: bool = false;

    fn is_same(&self, a: &Self::Status, b: &Self::Status) -> bool {
        a == b
    }

    fn get_sente(&self, _status: &Self::Status) -> Sente {
        Sente::Actor(0)
    }

    fn get_transitions(&self, status: &Self::Status) -> Vec<Self::Transition> {
        if self.is_end(status) {
            return Vec::new();
        }
        [-1, 0, 1]
            .into_iter()
            .filter(|d| (status.pos + d).abs() <= 5)
            .collect()
    }

    fn get_values(&self, status: &Self::Status) -> Vec<f64> {
        vec![-(status.pos - status.target).abs() as f64]
    }

    fn step(&self, status: &Self::Status, transition: &Self::Transition) -> Self::Status {
        WalkStatus {
            pos: (status.pos + transition).clamp(-5, 5),
            target: status.target,
            step: status.step + 1,
        }
    }

    fn is_end(&self, status: &Self::Status) -> bool {
        status.pos == status.target || status.step >= 6
    }

    fn is_disposable(&self, _candidate: &Self::Status, _current: &Self::Status) -> bool {
        true
    }
}
