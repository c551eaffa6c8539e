//! Caller-owned editing session: backup canvas, original object, undo/redo

use std::collections::VecDeque;

use log::debug;

use crate::color::Color;
use crate::display::PixelSurface;
use crate::error::Result;
use crate::ops::{dispatch, KernelState, Operation};
use crate::pipeline::{self, Wireframe};
use crate::scene::SceneObject;

/// Maximum number of undo steps kept
const HISTORY_LIMIT: usize = 64;

#[derive(Debug, Clone)]
pub struct Session {
    /// Clean canvas that scene redraws start from
    backup: PixelSurface,
    /// Object as first loaded, restored by `reset`
    original: SceneObject,
    /// Wireframe color of the last load, reused by `reset`
    wire_color: Color,
    current: KernelState,
    undo: VecDeque<KernelState>,
    redo: Vec<KernelState>,
}

impl Session {
    /// Start from a state; its surface becomes the backup canvas
    pub fn new(state: KernelState) -> Self {
        Self {
            backup: state.surface.clone(),
            original: state.object.clone(),
            wire_color: Color::BLACK,
            current: state,
            undo: VecDeque::new(),
            redo: Vec::new(),
        }
    }

    pub fn state(&self) -> &KernelState {
        &self.current
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.current.surface
    }

    pub fn original(&self) -> &SceneObject {
        &self.original
    }

    /// Run an operation and push the previous state on the undo stack.
    ///
    /// Scene redraws start from the backup canvas so successive transforms
    /// do not pile up. Loading an object makes it the new reset target.
    pub fn apply(&mut self, op: &Operation) -> Result<&KernelState> {
        let next = if op.redraws_scene() && self.backup_fits() {
            let input = KernelState {
                surface: self.backup.clone(),
                ..self.current.clone()
            };
            dispatch(&input, op)?
        } else {
            dispatch(&self.current, op)?
        };

        if let Operation::LoadObject { color, .. } = op {
            self.original = next.object.clone();
            self.wire_color = *color;
        }
        self.push_history(next);
        Ok(&self.current)
    }

    fn backup_fits(&self) -> bool {
        self.backup.width() == self.current.surface.width()
            && self.backup.height() == self.current.surface.height()
    }

    fn push_history(&mut self, next: KernelState) {
        let prev = std::mem::replace(&mut self.current, next);
        self.undo.push_back(prev);
        if self.undo.len() > HISTORY_LIMIT {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Step back; false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.undo.pop_back() {
            Some(prev) => {
                let cur = std::mem::replace(&mut self.current, prev);
                self.redo.push(cur);
                debug!("undo ({} left)", self.undo.len());
                true
            },
            None => false,
        }
    }

    /// Step forward again; false when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(next) => {
                let cur = std::mem::replace(&mut self.current, next);
                self.undo.push_back(cur);
                debug!("redo ({} left)", self.redo.len());
                true
            },
            None => false,
        }
    }

    /// Restore the original object, redrawn on the backup canvas in the
    /// color it was loaded with
    pub fn reset(&mut self) -> &KernelState {
        let style = Wireframe {
            viewport: self.current.viewport(),
            color: self.wire_color,
        };
        let (surface, object) = pipeline::reset(&self.backup, &self.original, &style);
        let next = KernelState {
            surface,
            object,
            ..self.current.clone()
        };
        self.push_history(next);
        &self.current
    }

    /// Make the current surface the new clean canvas
    pub fn commit_backup(&mut self) {
        self.backup = self.current.surface.clone();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
