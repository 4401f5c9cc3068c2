use std::fmt::Debug;
use std::rc::Rc;

use crate::pointer::{PointerEvent, PointerEventKind};

#[derive(Clone)]
pub struct PointerStreamFilter(pub Rc<dyn Fn(&PointerEvent) -> bool>);

impl PointerStreamFilter {
    pub fn new(filter: impl Fn(&PointerEvent) -> bool + 'static) -> Self {
        Self(Rc::new(filter))
    }
}

impl Debug for PointerStreamFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PointerStreamFilter")
    }
}

#[derive(Debug, Clone, Default)]
pub struct PointerStreamConfig {
    /// Event kinds to include in the stream. Empty means every kind.
    pub types: Vec<PointerEventKind>,

    /// If true, the event will be consumed by the stream and
    /// not propagated to streams registered after it
    pub consume: bool,

    /// If specified, only events matching all of the filters will be included
    pub filter: Option<Vec<PointerStreamFilter>>,
}

impl PointerStreamConfig {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of(types: &[PointerEventKind]) -> Self {
        Self {
            types: types.to_vec(),
            ..Default::default()
        }
    }
}

/// A registered stream and its handler
pub(crate) struct PointerStream {
    pub(crate) config: PointerStreamConfig,
    pub(crate) handler: Rc<dyn Fn(&PointerEvent)>,
}

impl PointerStream {
    pub(crate) fn new(config: PointerStreamConfig, handler: Rc<dyn Fn(&PointerEvent)>) -> Self {
        Self { config, handler }
    }

    pub(crate) fn matches_event(&self, event: &PointerEvent) -> bool {
        if !self.config.types.is_empty() && !self.config.types.contains(&event.kind) {
            return false;
        }

        if let Some(filters) = &self.config.filter {
            if !filters.iter().all(|filter| (filter.0)(event)) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::PointerSource;

    #[test]
    fn test_matches_event() {
        let stream = PointerStream::new(
            PointerStreamConfig {
                types: vec![PointerEventKind::Down, PointerEventKind::Move],
                filter: Some(vec![PointerStreamFilter::new(|event| {
                    event.source == PointerSource::Mouse
                })]),
                ..Default::default()
            },
            Rc::new(|_| {}),
        );

        assert!(stream.matches_event(&PointerEvent::mouse(PointerEventKind::Down, 1.0, 2.0)));
        assert!(!stream.matches_event(&PointerEvent::mouse(PointerEventKind::Up, 1.0, 2.0)));
        assert!(!stream.matches_event(&PointerEvent::touch(PointerEventKind::Move, 1.0, 2.0)));
    }
}
