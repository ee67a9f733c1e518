//! Event types and sinks for observing rig recomputes.
//!
//! [`CloneEvent`]s are emitted by [`crate::rig::Rig::recompute_with_events`] and
//! [`crate::rig::Rig::recompute_all_with_events`]. Sinks can collect them, forward
//! them to a closure, fan them out, or ignore them.

/// Describes events emitted while recomputing a cloner.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum CloneEvent {
    /// Emitted before any element of a cloner is composed.
    RecomputeStarted {
        cloner: String,
        /// Number of elements the cloner will produce.
        element_count: usize,
        /// Number of effectors in the linkage after pruning.
        effector_count: usize,
    },

    /// Emitted when dangling effector names were removed from a linkage.
    LinkagePruned {
        cloner: String,
        /// Names that no longer refer to an effector.
        removed: Vec<String>,
    },

    /// Emitted after an enabled effector was applied to every element.
    EffectorApplied {
        cloner: String,
        effector: String,
        /// Field that weighted the effector, if one was resolved.
        field: Option<String>,
    },

    /// Emitted for a linked effector that is disabled.
    EffectorSkipped { cloner: String, effector: String },

    /// Emitted when an effector references a field that is unknown or has no
    /// source. The effector runs at full strength.
    FieldMissing {
        cloner: String,
        effector: String,
        field: String,
    },

    /// Emitted once all effectors of a cloner were applied.
    RecomputeFinished { cloner: String, element_count: usize },

    /// Non-fatal warning generated during a recompute.
    Warning {
        /// Context string (e.g. cloner or effector name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of a [`CloneEvent`], used by sinks to filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloneEventKind {
    RecomputeStarted,
    LinkagePruned,
    EffectorApplied,
    EffectorSkipped,
    FieldMissing,
    RecomputeFinished,
    Warning,
}

impl CloneEvent {
    pub fn kind(&self) -> CloneEventKind {
        match self {
            CloneEvent::RecomputeStarted { .. } => CloneEventKind::RecomputeStarted,
            CloneEvent::LinkagePruned { .. } => CloneEventKind::LinkagePruned,
            CloneEvent::EffectorApplied { .. } => CloneEventKind::EffectorApplied,
            CloneEvent::EffectorSkipped { .. } => CloneEventKind::EffectorSkipped,
            CloneEvent::FieldMissing { .. } => CloneEventKind::FieldMissing,
            CloneEvent::RecomputeFinished { .. } => CloneEventKind::RecomputeFinished,
            CloneEvent::Warning { .. } => CloneEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`CloneEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: CloneEvent);

    /// Whether the sink is interested in events of `kind`. Producers skip
    /// building events nobody wants.
    fn wants(&self, _kind: CloneEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = CloneEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: CloneEvent) {}

    #[inline]
    fn wants(&self, _kind: CloneEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(CloneEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(CloneEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(CloneEvent),
{
    #[inline]
    fn send(&mut self, event: CloneEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally only some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<CloneEvent>,
    only: Option<Vec<CloneEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects only the listed event kinds.
    pub fn filtered(kinds: impl IntoIterator<Item = CloneEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<CloneEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[CloneEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: CloneEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: CloneEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: CloneEventKind) -> bool {
        self.only.as_ref().is_none_or(|only| only.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: CloneEvent) {
        let kind = event.kind();
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: CloneEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> CloneEvent {
        CloneEvent::Warning {
            context: context.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(warning("b"));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.count(CloneEventKind::Warning), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn filtered_sink_drops_unwanted_kinds() {
        let mut sink = VecSink::filtered([CloneEventKind::LinkagePruned]);
        assert!(!sink.wants(CloneEventKind::Warning));
        sink.send(warning("a"));
        sink.send(CloneEvent::LinkagePruned {
            cloner: "Grid".into(),
            removed: vec!["Random".into()],
        });
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.as_slice()[0].kind(), CloneEventKind::LinkagePruned);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(CloneEventKind::RecomputeStarted));
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![
            VecSink::new(),
            VecSink::new(),
            VecSink::filtered([CloneEventKind::RecomputeFinished]),
        ]);
        multi.send(warning("ctx"));
        assert_eq!(multi.len(), 3);
        assert_eq!(multi.sinks[0].len(), 1);
        assert_eq!(multi.sinks[1].len(), 1);
        assert!(multi.sinks[2].is_empty());
        assert!(matches!(
            multi.sinks[0].as_slice()[0],
            CloneEvent::Warning { .. }
        ));
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        drop(sink);
        assert_eq!(count, 1);
    }
}
