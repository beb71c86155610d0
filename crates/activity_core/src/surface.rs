//! Ordered tile list rearranged one item at a time by pointer drags.

use std::collections::HashMap;

use shared::domain::{Step, StepId};
use tracing::debug;

/// Vertical extent of a rendered tile in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBounds {
    pub top: f32,
    pub height: f32,
}

impl TileBounds {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// Geometry supplied by whatever draws the tiles.
pub trait TileLayout {
    /// Bounds of the tile currently displayed at `index`, or `None` when it
    /// has not been laid out.
    fn bounds(&self, index: usize, id: StepId) -> Option<TileBounds>;
}

impl TileLayout for HashMap<StepId, TileBounds> {
    fn bounds(&self, _index: usize, id: StepId) -> Option<TileBounds> {
        self.get(&id).copied()
    }
}

/// Equal-height tiles stacked from `origin_y` with `gap` between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformTileLayout {
    pub origin_y: f32,
    pub tile_height: f32,
    pub gap: f32,
}

impl UniformTileLayout {
    pub fn new(origin_y: f32, tile_height: f32, gap: f32) -> Self {
        Self {
            origin_y,
            tile_height,
            gap,
        }
    }
}

impl TileLayout for UniformTileLayout {
    fn bounds(&self, index: usize, _id: StepId) -> Option<TileBounds> {
        let top = self.origin_y + index as f32 * (self.tile_height + self.gap);
        Some(TileBounds::new(top, self.tile_height))
    }
}

#[derive(Debug, Default)]
pub struct ReorderSurface {
    tiles: Vec<Step>,
    active: Option<StepId>,
}

impl ReorderSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents and drops any drag in progress.
    pub fn render(&mut self, items: Vec<Step>) {
        self.tiles = items;
        self.active = None;
    }

    pub fn tiles(&self) -> &[Step] {
        &self.tiles
    }

    pub fn active(&self) -> Option<StepId> {
        self.active
    }

    pub fn contains(&self, id: StepId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn current_order(&self) -> Vec<StepId> {
        self.tiles.iter().map(|step| step.id).collect()
    }

    /// Marks `id` as the dragged tile. Returns `false` without changing
    /// anything when the tile is unknown or another drag is active.
    pub fn begin_drag(&mut self, id: StepId) -> bool {
        if !self.contains(id) {
            debug!(step_id = id.0, "reorder: drag start on unknown tile ignored");
            return false;
        }
        if let Some(active) = self.active {
            debug!(
                step_id = id.0,
                active_step_id = active.0,
                "reorder: drag start ignored while another tile is active"
            );
            return false;
        }
        self.active = Some(id);
        true
    }

    pub fn end_drag(&mut self, id: StepId) -> bool {
        if self.active != Some(id) {
            debug!(step_id = id.0, "reorder: drag end for inactive tile ignored");
            return false;
        }
        self.active = None;
        true
    }

    /// Moves the active tile in front of the topmost non-active tile whose
    /// vertical center lies below `pointer_y`, or to the end when there is
    /// none. Returns whether the order changed.
    pub fn drag_over<L>(&mut self, pointer_y: f32, layout: &L) -> bool
    where
        L: TileLayout + ?Sized,
    {
        if self.active.is_none() {
            return false;
        }
        let target = self.insertion_target(pointer_y, layout);
        self.move_active_before(target)
    }

    /// The tile the active tile should be inserted before; `None` means the
    /// end of the list.
    pub fn insertion_target<L>(&self, pointer_y: f32, layout: &L) -> Option<StepId>
    where
        L: TileLayout + ?Sized,
    {
        let mut closest_offset = f32::NEG_INFINITY;
        let mut closest = None;
        for (index, step) in self.tiles.iter().enumerate() {
            if Some(step.id) == self.active {
                continue;
            }
            let Some(bounds) = layout.bounds(index, step.id) else {
                continue;
            };
            let offset = pointer_y - bounds.top - bounds.height / 2.0;
            if offset < 0.0 && offset > closest_offset {
                closest_offset = offset;
                closest = Some(step.id);
            }
        }
        closest
    }

    pub fn move_active_before(&mut self, target: Option<StepId>) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if target == Some(active) {
            return false;
        }
        let Some(from) = self.position_of(active) else {
            self.active = None;
            return false;
        };
        if let Some(target) = target {
            if !self.contains(target) {
                debug!(step_id = target.0, "reorder: drop target not on surface");
                return false;
            }
        }

        let moving = self.tiles.remove(from);
        let to = match target {
            Some(target) => self.position_of(target).unwrap_or(self.tiles.len()),
            None => self.tiles.len(),
        };
        self.tiles.insert(to, moving);
        to != from
    }

    fn position_of(&self, id: StepId) -> Option<usize> {
        self.tiles.iter().position(|step| step.id == id)
    }
}

#[cfg(test)]
#[path = "tests/surface_tests.rs"]
mod tests;
