//! Event Targets
//!
//! Per-node listener registry and the two-phase dispatch algorithm.
//!
//! Each node lazily owns an [`EventListeners`] with one map for capture-phase
//! and one for bubble-phase listeners, keyed by event type. Dispatch never
//! iterates those maps directly: it first copies every relevant bucket into a
//! snapshot, so listeners may add or remove listeners (or restructure the
//! tree) while the event is in flight. A descriptor removed mid-dispatch is
//! flagged and skipped when the snapshot reaches it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::hooks::HookAction;
use crate::{DomResult, Environment, Event, EventInit, NodeId};

type Handler = dyn Fn(&mut Environment, &mut Event) -> DomResult<()>;

/// A listener callback; identity is the shared allocation
///
/// Clones compare equal, so the same `EventListener` passed to
/// `remove_event_listener` finds the registration made with it.
#[derive(Clone)]
pub struct EventListener(Rc<Handler>);

impl EventListener {
    /// Wrap a callback
    pub fn new(handler: impl Fn(&mut Environment, &mut Event) -> DomResult<()> + 'static) -> Self {
        Self(Rc::new(handler))
    }

    /// Same registration identity
    pub fn same(&self, other: &EventListener) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }

    fn call(&self, env: &mut Environment, event: &mut Event) -> DomResult<()> {
        (self.0)(env, event)
    }
}

impl PartialEq for EventListener {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventListener({:p})", Rc::as_ptr(&self.0))
    }
}

/// Options for `add_event_listener`/`remove_event_listener`
///
/// A bare `bool` converts into `capture`.
#[derive(Debug, Clone, Default)]
pub struct ListenerOptions {
    pub capture: bool,
    pub once: bool,
    pub passive: bool,
    pub signal: Option<AbortSignal>,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self {
            capture: true,
            ..Self::default()
        }
    }

    pub fn once() -> Self {
        Self {
            once: true,
            ..Self::default()
        }
    }

    pub fn passive() -> Self {
        Self {
            passive: true,
            ..Self::default()
        }
    }

    pub fn with_signal(mut self, signal: &AbortSignal) -> Self {
        self.signal = Some(signal.clone());
        self
    }
}

impl From<bool> for ListenerOptions {
    fn from(capture: bool) -> Self {
        Self {
            capture,
            ..Self::default()
        }
    }
}

/// Stored record for one registered listener
pub(crate) struct ListenerDescriptor {
    target: NodeId,
    event_type: String,
    handler: EventListener,
    capture: bool,
    once: bool,
    passive: bool,
    signal: Option<AbortSignal>,
    removed: Cell<bool>,
}

impl fmt::Debug for ListenerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerDescriptor")
            .field("target", &self.target)
            .field("event_type", &self.event_type)
            .field("capture", &self.capture)
            .field("once", &self.once)
            .field("passive", &self.passive)
            .field("removed", &self.removed.get())
            .finish()
    }
}

type Bucket = Vec<Rc<ListenerDescriptor>>;

/// Capture and bubble listener maps of one node
#[derive(Debug, Default)]
pub(crate) struct EventListeners {
    capture: HashMap<String, Bucket>,
    bubble: HashMap<String, Bucket>,
}

impl EventListeners {
    fn phase(&self, capture: bool) -> &HashMap<String, Bucket> {
        if capture { &self.capture } else { &self.bubble }
    }

    fn phase_mut(&mut self, capture: bool) -> &mut HashMap<String, Bucket> {
        if capture { &mut self.capture } else { &mut self.bubble }
    }

    fn snapshot(&self, event_type: &str, capture: bool) -> Option<Bucket> {
        self.phase(capture)
            .get(event_type)
            .filter(|bucket| bucket.iter().any(|d| !d.removed.get()))
            .cloned()
    }

    fn take(&mut self, event_type: &str, capture: bool, handler: &EventListener) -> Option<Rc<ListenerDescriptor>> {
        let map = self.phase_mut(capture);
        let bucket = map.get_mut(event_type)?;
        let index = bucket
            .iter()
            .position(|d| !d.removed.get() && d.handler.same(handler))?;
        let descriptor = bucket.remove(index);
        if bucket.is_empty() {
            map.remove(event_type);
        }
        Some(descriptor)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.capture.is_empty() && self.bubble.is_empty()
    }

    /// Number of live registrations for a type and phase
    fn count(&self, event_type: &str, capture: bool) -> usize {
        self.phase(capture)
            .get(event_type)
            .map_or(0, |bucket| bucket.iter().filter(|d| !d.removed.get()).count())
    }
}

#[derive(Default)]
struct SignalState {
    aborted: Cell<bool>,
    followers: RefCell<Vec<Weak<ListenerDescriptor>>>,
}

/// Cancellation token that unregisters listeners when aborted
#[derive(Clone, Default)]
pub struct AbortSignal(Rc<SignalState>);

impl AbortSignal {
    /// Has the owning controller aborted
    pub fn aborted(&self) -> bool {
        self.0.aborted.get()
    }

    /// Listeners still governed by this signal
    pub fn listener_count(&self) -> usize {
        self.0
            .followers
            .borrow()
            .iter()
            .filter(|d| d.strong_count() > 0)
            .count()
    }

    fn follow(&self, descriptor: &Rc<ListenerDescriptor>) {
        self.0.followers.borrow_mut().push(Rc::downgrade(descriptor));
    }

    fn unfollow(&self, descriptor: &Rc<ListenerDescriptor>) {
        self.0
            .followers
            .borrow_mut()
            .retain(|d| d.strong_count() > 0 && !std::ptr::eq(d.as_ptr(), Rc::as_ptr(descriptor)));
    }

    /// Mark aborted and hand back the descriptors still registered
    fn abort(&self) -> Vec<Rc<ListenerDescriptor>> {
        if self.0.aborted.replace(true) {
            return Vec::new();
        }
        let followers = std::mem::take(&mut *self.0.followers.borrow_mut());
        followers.iter().filter_map(Weak::upgrade).collect()
    }
}

impl fmt::Debug for AbortSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbortSignal")
            .field("aborted", &self.aborted())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Owner of an [`AbortSignal`]
#[derive(Debug, Default)]
pub struct AbortController {
    signal: AbortSignal,
}

impl AbortController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self) -> &AbortSignal {
        &self.signal
    }

    /// Abort: every listener registered with the signal is unregistered
    ///
    /// Removal goes through `env` like any other, so the host sees
    /// `on_removed_event_listener` and the node drops the handler. Aborting
    /// twice is a no-op.
    pub fn abort(&self, env: &mut Environment) {
        for descriptor in self.signal.abort() {
            let removal = env.forget_listener(
                descriptor.target,
                &descriptor.event_type,
                &descriptor.handler,
                descriptor.capture,
            );
            if let Err(err) = removal {
                tracing::debug!("Abort skipped listener on {:?}: {}", descriptor.target, err);
            }
            descriptor.removed.set(true);
        }
    }
}

/// Snapshot of one node's listeners for one phase
struct PhaseBucket {
    node: NodeId,
    listeners: Bucket,
}

impl Environment {
    /// Create an event (the environment-level factory)
    pub fn create_event(&self, event_type: &str, init: EventInit) -> Event {
        Event::new(event_type, init)
    }

    /// Register `listener` for `event_type` on `target`
    ///
    /// Registering the same listener twice for the same type and phase is a
    /// no-op. A listener whose signal is already aborted is not added.
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        event_type: &str,
        listener: &EventListener,
        options: impl Into<ListenerOptions>,
    ) -> DomResult<()> {
        let options = options.into();
        self.node(target)?;
        if options.signal.as_ref().is_some_and(AbortSignal::aborted) {
            return Ok(());
        }

        let hooks = self.hooks();
        if hooks.on_add_event_listener(self, target, event_type, options.capture) == HookAction::Handled {
            return Ok(());
        }

        let node = self.node_mut(target)?;
        let bucket = node
            .listeners
            .get_or_insert_with(Box::default)
            .phase_mut(options.capture)
            .entry(event_type.to_string())
            .or_default();
        if bucket.iter().any(|d| d.handler.same(listener)) {
            return Ok(());
        }

        let descriptor = Rc::new(ListenerDescriptor {
            target,
            event_type: event_type.to_string(),
            handler: listener.clone(),
            capture: options.capture,
            once: options.once,
            passive: options.passive,
            signal: options.signal.clone(),
            removed: Cell::new(false),
        });
        if let Some(signal) = &options.signal {
            signal.follow(&descriptor);
        }
        bucket.push(descriptor);

        hooks.on_added_event_listener(self, target, event_type, options.capture);
        Ok(())
    }

    /// Unregister `listener` for `event_type` in the phase named by `options`
    pub fn remove_event_listener(
        &mut self,
        target: NodeId,
        event_type: &str,
        listener: &EventListener,
        options: impl Into<ListenerOptions>,
    ) -> DomResult<()> {
        let capture = options.into().capture;
        self.node(target)?;

        let hooks = self.hooks();
        if hooks.on_remove_event_listener(self, target, event_type, capture) == HookAction::Handled {
            return Ok(());
        }
        self.forget_listener(target, event_type, listener, capture)
    }

    /// Remove a registration without consulting the veto hook
    fn forget_listener(
        &mut self,
        target: NodeId,
        event_type: &str,
        listener: &EventListener,
        capture: bool,
    ) -> DomResult<()> {
        let node = self.node_mut(target)?;
        let Some(listeners) = node.listeners.as_mut() else {
            return Ok(());
        };
        let removed = listeners.take(event_type, capture, listener);
        if listeners.is_empty() {
            node.listeners = None;
        }

        if let Some(descriptor) = removed {
            descriptor.removed.set(true);
            if let Some(signal) = &descriptor.signal {
                signal.unfollow(&descriptor);
            }
            self.hooks()
                .on_removed_event_listener(self, target, event_type, capture);
        }
        Ok(())
    }

    /// Number of live listeners on `target` for a type and phase
    pub fn listener_count(&self, target: NodeId, event_type: &str, capture: bool) -> usize {
        self.tree
            .get(target)
            .and_then(|n| n.listeners.as_deref())
            .map_or(0, |l| l.count(event_type, capture))
    }

    fn bucket(&self, node: NodeId, event_type: &str, capture: bool) -> Option<PhaseBucket> {
        let listeners = self.tree.get(node)?.listeners.as_deref()?;
        listeners
            .snapshot(event_type, capture)
            .map(|listeners| PhaseBucket { node, listeners })
    }

    /// Dispatch `event` at `target`
    ///
    /// Capture buckets run root-first when the event `captures`, otherwise
    /// only the target's own capture bucket runs. Bubble buckets run
    /// target-first when the event `bubbles`, otherwise only the target's own.
    /// After every bucket, dispatch ends if the event does not bubble or
    /// propagation was stopped. Returns `false` if the default was prevented.
    pub fn dispatch_event(&mut self, target: NodeId, event: &mut Event) -> DomResult<bool> {
        self.node(target)?;
        event.target = Some(target);
        tracing::trace!("Dispatching {} at {:?}", event.event_type(), target);

        let path: Vec<NodeId> = std::iter::once(target)
            .chain(self.tree.ancestors(target))
            .collect();
        let event_type = event.event_type().to_string();

        let mut buckets: Vec<PhaseBucket> = Vec::new();
        if event.captures() {
            buckets.extend(path.iter().rev().filter_map(|&n| self.bucket(n, &event_type, true)));
        } else {
            buckets.extend(self.bucket(target, &event_type, true));
        }
        if event.bubbles() {
            buckets.extend(path.iter().filter_map(|&n| self.bucket(n, &event_type, false)));
        } else {
            buckets.extend(self.bucket(target, &event_type, false));
        }

        let mut outcome = Ok(());
        for bucket in &buckets {
            match self.run_bucket(bucket, &event_type, event) {
                Ok(true) if event.bubbles() && !event.propagation_stopped => {}
                Ok(_) => break,
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            }
        }

        // Reset even when a listener failed
        event.current_target = None;
        event.propagation_stopped = false;
        event.immediate_propagation_stopped = false;
        outcome.map(|()| !event.default_prevented())
    }

    /// Run one snapshot; `Ok(false)` means stop-immediate was requested
    fn run_bucket(&mut self, bucket: &PhaseBucket, event_type: &str, event: &mut Event) -> DomResult<bool> {
        for descriptor in &bucket.listeners {
            if descriptor.removed.get() {
                continue;
            }
            event.current_target = Some(bucket.node);
            event.passive = !event.cancelable() || descriptor.passive;
            if descriptor.once {
                self.forget_listener(descriptor.target, event_type, &descriptor.handler, descriptor.capture)?;
            }

            let result = descriptor.handler.call(self, event);
            event.passive = false;
            result?;

            if event.immediate_propagation_stopped {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
