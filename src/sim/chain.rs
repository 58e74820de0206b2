//! Segment chain geometry
//!
//! The slime body is a list of segments, head first. Each segment remembers
//! where it last settled (`at`) and where the current discrete step takes it
//! (`to`), so a renderer can lerp between the two while the step timer runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::RIGHT;
use crate::consts::{FOLLOW_SPACING, POSITION_EPSILON};

/// One body unit of the slime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Last settled position
    pub at: Vec2,
    /// Target position of the current step
    pub to: Vec2,
    /// Unit direction of travel
    pub direction: Vec2,
}

impl Segment {
    pub fn new(at: Vec2, to: Vec2, direction: Vec2) -> Self {
        Self { at, to, direction }
    }

    #[inline]
    pub fn reverse_direction(&self) -> Vec2 {
        -self.direction
    }

    /// Position between `at` and `to` for a progress fraction in [0, 1]
    #[inline]
    pub fn visual_position(&self, progress: f32) -> Vec2 {
        self.at.lerp(self.to, progress)
    }
}

/// Result of a discrete step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Head landed on a free cell
    Clear,
    /// Head landed on the body segment at `segment`
    SelfCollision { segment: usize },
}

/// Ordered body segments, head at index 0
///
/// Never empty: every constructor produces at least the head.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentChain {
    segments: Vec<Segment>,
}

impl SegmentChain {
    /// Chain for the discrete modes: a head at `start` heading +X, already
    /// aimed one stride ahead.
    pub fn new_discrete(start: Vec2, stride: f32) -> Self {
        Self {
            segments: vec![Segment::new(start, start + RIGHT * stride, RIGHT)],
        }
    }

    /// Chain for continuous movement: a head resting at `start`
    pub fn new_continuous(start: Vec2) -> Self {
        Self {
            segments: vec![Segment::new(start, start, RIGHT)],
        }
    }

    /// Build a chain from explicit segments (head first). `None` if empty.
    pub fn from_segments(segments: Vec<Segment>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Point the head's `to` one stride along its direction.
    ///
    /// Continuous movement leaves `to == at`; a discrete step taken from
    /// there would land the new head on the old one.
    pub fn aim(&mut self, stride: f32) {
        let head = &mut self.segments[0];
        head.to = head.at + head.direction * stride;
    }

    /// Move the whole chain one stride.
    ///
    /// The new head starts where the old head was heading and the tail is
    /// dropped, so every other segment keeps its `at`/`to` untouched. The
    /// first trailing segment sharing the new head's `at` is reported.
    pub fn advance(&mut self, direction: Vec2, stride: f32) -> Step {
        let at = self.head().to;
        let head = Segment::new(at, at + direction * stride, direction);

        self.segments.insert(0, head);
        self.segments.pop();

        match self
            .segments
            .iter()
            .skip(1)
            .position(|s| s.at.abs_diff_eq(head.at, POSITION_EPSILON))
        {
            Some(i) => Step::SelfCollision { segment: i + 1 },
            None => Step::Clear,
        }
    }

    /// Slide the head by `displacement` and let the body follow.
    ///
    /// Each trailing segment farther than [`FOLLOW_SPACING`] from the one in
    /// front is pulled along the line between them until it sits exactly at
    /// that spacing. Closer segments stay put.
    pub fn advance_continuous(&mut self, displacement: Vec2) {
        let head = &mut self.segments[0];
        head.at += displacement;
        head.to = head.at;
        if let Some(direction) = displacement.try_normalize() {
            head.direction = direction;
        }

        for i in 1..self.segments.len() {
            let leader = self.segments[i - 1].at;
            let segment = &mut self.segments[i];
            let offset = leader - segment.at;
            if offset.length() > FOLLOW_SPACING {
                let direction = offset.normalize();
                segment.at = leader - direction * FOLLOW_SPACING;
                segment.to = segment.at;
                segment.direction = direction;
            }
        }
    }

    /// Append a segment one stride behind the tail (discrete modes)
    pub fn grow_discrete(&mut self, stride: f32) {
        let tail = *self.tail();
        let at = tail.at + tail.reverse_direction() * stride;
        self.segments.push(Segment::new(at, tail.at, tail.direction));
    }

    /// Append a segment on top of the tail; it peels away as the body moves
    pub fn grow_continuous(&mut self) {
        let tail = *self.tail();
        self.segments.push(Segment::new(tail.at, tail.at, tail.direction));
    }

    /// Interpolated head position, used for both drawing and collision
    pub fn visual_head_position(&self, progress: f32) -> Vec2 {
        self.head().visual_position(progress)
    }

    /// Interpolated position of every segment, head first
    pub fn visual_positions(&self, progress: f32) -> impl Iterator<Item = Vec2> + '_ {
        self.segments.iter().map(move |s| s.visual_position(progress))
    }
}
