//! Patch interpreter.
//!
//! A pure function from (shots, ops, constraints) to a new shot sequence.
//! Every op resolves its idx references through a position index rebuilt
//! from the current working sequence, so ids consumed by earlier ops are no
//! longer addressable and adjacency is checked against actual positions.

use shotsplit_core::{Constraints, Op, Shot, ShotKind, Tags};
use shotsplit_error::{ApplyError, ApplyErrorKind, ApplyResult};
use shotsplit_segment::split_sentences_verbatim;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// idx -> position in the working sequence.
///
/// When an idx occurs more than once (a split's right half can collide
/// with the following shot), the first position wins.
#[derive(Debug)]
struct PositionIndex {
    by_idx: HashMap<usize, usize>,
}

impl PositionIndex {
    fn build(shots: &[Shot]) -> Self {
        let mut by_idx = HashMap::with_capacity(shots.len());
        for (position, shot) in shots.iter().enumerate() {
            by_idx.entry(shot.idx).or_insert(position);
        }
        Self { by_idx }
    }

    fn locate(&self, op: &'static str, idx: usize) -> ApplyResult<usize> {
        self.by_idx
            .get(&idx)
            .copied()
            .ok_or_else(|| ApplyError::new(ApplyErrorKind::IdxNotFound { op, idx }))
    }
}

#[derive(Debug)]
struct WorkingSet<'c> {
    shots: Vec<Shot>,
    constraints: &'c Constraints,
}

impl<'c> WorkingSet<'c> {
    fn index(&self) -> PositionIndex {
        PositionIndex::build(&self.shots)
    }

    fn forbids_scene_breaks(&self) -> bool {
        *self.constraints.forbid_cross_scene_break()
    }

    fn apply(&mut self, op: &Op) -> ApplyResult<()> {
        match op {
            Op::Merge { start_idx, end_idx } => self.merge(*start_idx, *end_idx),
            Op::Split { idx, marker } => self.split(*idx, marker),
            Op::MoveTail {
                from_idx,
                to_idx,
                sentence_count,
            } => self.move_tail(*from_idx, *to_idx, *sentence_count),
            Op::Tag { idx, tags } => self.tag(*idx, tags),
        }
    }

    fn merge(&mut self, start: usize, end: usize) -> ApplyResult<()> {
        if start > end {
            return Err(ApplyError::new(ApplyErrorKind::InvalidRange { start, end }));
        }

        let index = self.index();
        let first = index.locate("merge", start)?;
        let last = index.locate("merge", end)?;
        if last < first {
            return Err(ApplyError::new(ApplyErrorKind::InvalidRange { start, end }));
        }
        if last - first != end - start {
            return Err(ApplyError::new(ApplyErrorKind::NonContiguous { start, end }));
        }

        let span = &self.shots[first..=last];
        if self.forbids_scene_breaks() && span.iter().any(Shot::is_scene_break) {
            return Err(ApplyError::new(ApplyErrorKind::SceneBreak { op: "merge" }));
        }

        let text: String = span.iter().map(|s| s.text.as_str()).collect();
        let merged = Shot::new(start, ShotKind::Mixed, text);
        self.shots.splice(first..=last, std::iter::once(merged));
        Ok(())
    }

    fn split(&mut self, idx: usize, marker: &str) -> ApplyResult<()> {
        let position = self.index().locate("split", idx)?;
        let shot = &self.shots[position];

        let found = shot.text.find(marker).ok_or_else(|| {
            ApplyError::new(ApplyErrorKind::MarkerNotFound {
                idx,
                marker: marker.to_string(),
            })
        })?;
        let (left, right) = shot.text.split_at(found + marker.len());
        if left.trim().is_empty() || right.trim().is_empty() {
            return Err(ApplyError::new(ApplyErrorKind::EmptyShot { op: "split" }));
        }

        let left = Shot {
            idx,
            kind: shot.kind,
            text: left.to_string(),
            tags: shot.tags.clone(),
        };
        let right = Shot {
            idx: idx + 1,
            kind: shot.kind,
            text: right.to_string(),
            tags: shot.tags.clone(),
        };
        self.shots.splice(position..=position, [left, right]);
        Ok(())
    }

    fn move_tail(&mut self, from: usize, to: usize, count: usize) -> ApplyResult<()> {
        if from.checked_add(1) != Some(to) {
            return Err(ApplyError::new(ApplyErrorKind::NotAdjacent { from, to }));
        }

        let index = self.index();
        let source = index.locate("move_tail", from)?;
        let target = index.locate("move_tail", to)?;
        if target != source + 1 {
            return Err(ApplyError::new(ApplyErrorKind::NotAdjacent { from, to }));
        }

        if self.forbids_scene_breaks()
            && (self.shots[source].is_scene_break() || self.shots[target].is_scene_break())
        {
            return Err(ApplyError::new(ApplyErrorKind::SceneBreak { op: "move_tail" }));
        }

        let sentences = split_sentences_verbatim(&self.shots[source].text);
        let available = sentences.len();
        if count == 0 || count >= available {
            return Err(ApplyError::new(ApplyErrorKind::SentenceCount {
                requested: count,
                available,
            }));
        }

        let head = sentences[..available - count].concat();
        let tail = sentences[available - count..].concat();
        if head.trim().is_empty() || tail.trim().is_empty() {
            return Err(ApplyError::new(ApplyErrorKind::EmptyShot { op: "move_tail" }));
        }

        let destination = format!("{}{}", tail, self.shots[target].text);
        self.shots[source].text = head;
        self.shots[target].text = destination;
        Ok(())
    }

    fn tag(&mut self, idx: usize, tags: &Tags) -> ApplyResult<()> {
        let position = self.index().locate("tag", idx)?;
        self.shots[position]
            .tags
            .get_or_insert_with(Tags::new)
            .extend(tags.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    fn into_renumbered(self) -> Vec<Shot> {
        let mut shots = self.shots;
        for (position, shot) in shots.iter_mut().enumerate() {
            shot.idx = position;
        }
        shots
    }
}

/// Apply `ops` in order to a copy of `base_shots`.
///
/// Each op consumes the previous op's output. The result is renumbered
/// `0..M-1`; `base_shots` is left untouched.
///
/// # Errors
///
/// Fails closed on the first op that cannot be applied; no partial result
/// is returned.
///
/// # Examples
///
/// ```
/// use shotsplit_core::{Constraints, Op, Shot, ShotKind};
/// use shotsplit_refine::apply_patch;
///
/// let base = vec![Shot::new(0, ShotKind::Mixed, "前半。后半。")];
/// let ops = vec![Op::Split { idx: 0, marker: "前半。".to_string() }];
///
/// let shots = apply_patch(&base, &ops, &Constraints::default()).unwrap();
/// assert_eq!(shots[0].text, "前半。");
/// assert_eq!(shots[1].text, "后半。");
/// assert_eq!((shots[0].idx, shots[1].idx), (0, 1));
/// ```
#[instrument(skip_all, fields(shots = base_shots.len(), ops = ops.len()))]
pub fn apply_patch(
    base_shots: &[Shot],
    ops: &[Op],
    constraints: &Constraints,
) -> ApplyResult<Vec<Shot>> {
    let mut working = WorkingSet {
        shots: base_shots.to_vec(),
        constraints,
    };

    for (position, op) in ops.iter().enumerate() {
        debug!(position, op = op.name(), "Applying op");
        working.apply(op)?;
    }

    Ok(working.into_renumbered())
}
