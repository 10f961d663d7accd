//! Level solidity.
//!
//! Water only needs to ask whether a single level cell is solid. Levels here
//! describe their terrain as a list of solid rects; anything else that can
//! answer the question may implement [`Solidity`].

use bevy::math::IVec2;
use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use super::Rect;

pub trait Solidity {
    fn solid(&self, x: i32, y: i32) -> bool;
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolidMap {
    rects: Vec<Rect>,
}

impl SolidMap {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn add(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.rects.push(rect);
        }
    }

    /// Removes every solid rect that intersects `rect`, returning how many went.
    pub fn remove(&mut self, rect: &Rect) -> usize {
        let before = self.rects.len();
        self.rects.retain(|r| !r.intersects(rect));
        before - self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl Solidity for SolidMap {
    fn solid(&self, x: i32, y: i32) -> bool {
        let p = IVec2::new(x, y);
        self.rects.iter().any(|r| r.contains_point(p))
    }
}
