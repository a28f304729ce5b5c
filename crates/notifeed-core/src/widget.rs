//! The notification summary widget.
//!
//! `NotificationWidget` is the single owner of the notification list. It is
//! driven from the render thread:
//!
//! ```ignore
//! let mut widget = NotificationWidget::new(store, Config::default())?;
//! let pan = widget.recognizer(Source::Telegram)?;   // hand to the input thread
//! // every frame:
//! let events = widget.pump(Instant::now());
//! let cards = widget.cards(Instant::now(), Utc::now());
//! ```
//!
//! Gesture input never mutates the list directly. Recognizers send messages
//! that `pump()` drains; a committed release is the only path from a gesture
//! to a deletion.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::aggregate::SourceGroup;
use crate::card::{CardFrame, CardView, Collapse, DetailView};
use crate::error::Result;
use crate::events::{DeleteTrigger, Event};
use crate::notification::{Notification, Source};
use crate::storage::{Config, NotificationStore};
use crate::swipe::{
    gesture_channel, GestureMessage, GestureReceiver, GestureSender, PanRecognizer, Release,
    SwipeController,
};

/// Per-source card state: the swipe controller plus its layout transition.
#[derive(Debug)]
struct CardSlot {
    swipe: SwipeController,
    collapse: Collapse,
}

pub struct NotificationWidget<S: NotificationStore> {
    store: S,
    config: Config,
    notifications: Vec<Notification>,
    slots: BTreeMap<Source, CardSlot>,
    sender: GestureSender,
    receiver: GestureReceiver,
    detail: Option<Source>,
}

impl<S: NotificationStore> std::fmt::Debug for NotificationWidget<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationWidget")
            .field("notifications", &self.notifications.len())
            .field("slots", &self.slots)
            .field("detail", &self.detail)
            .finish_non_exhaustive()
    }
}

impl<S: NotificationStore> NotificationWidget<S> {
    /// Mounts the widget: loads the current list and creates one resting
    /// card slot per known source.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid or the store cannot be read.
    pub fn new(store: S, config: Config) -> Result<Self> {
        config.validate()?;
        let notifications = store.current()?;
        let (sender, receiver) = gesture_channel();

        let slots = Source::KNOWN
            .iter()
            .map(|&source| {
                let shown = notifications.iter().any(|n| n.source == source);
                let slot = CardSlot {
                    swipe: SwipeController::new(source, config.swipe, config.spring),
                    collapse: Collapse::new(shown, config.card.collapse_duration()),
                };
                (source, slot)
            })
            .collect();

        debug!(total = notifications.len(), "widget mounted");
        Ok(Self {
            store,
            config,
            notifications,
            slots,
            sender,
            receiver,
            detail: None,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Nothing at all to show; renderers display an empty-state message.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn group(&self, source: Source) -> SourceGroup<'_> {
        SourceGroup::collect(&self.notifications, source)
    }

    pub fn controller(&self, source: Source) -> Option<&SwipeController> {
        self.slots.get(&source).map(|slot| &slot.swipe)
    }

    /// A pan recognizer for `source`'s card, to be moved to the input thread.
    /// `None` for sources without a card.
    pub fn recognizer(&self, source: Source) -> Option<PanRecognizer> {
        self.slots
            .contains_key(&source)
            .then(|| PanRecognizer::new(source, self.config.swipe, self.sender.clone()))
    }

    /// Summary cards for every known source, in display order.
    pub fn cards(&self, at: Instant, now: DateTime<Utc>) -> Vec<CardView> {
        self.slots
            .iter()
            .map(|(&source, slot)| {
                let group = SourceGroup::collect(&self.notifications, source);
                CardView::compose(
                    &group,
                    CardFrame {
                        offset: slot.swipe.offset(),
                        state: slot.swipe.state(),
                        shown: slot.collapse.fraction(at),
                        full_height: self.config.card.height,
                        now,
                        date_format: &self.config.format.date_format,
                    },
                )
            })
            .collect()
    }

    /// The open detail view, recomputed from the current list.
    pub fn detail(&self) -> Option<DetailView> {
        self.detail
            .map(|source| DetailView::from_group(&self.group(source)))
    }

    /// Whether any card still needs animation frames.
    pub fn is_animating(&self, at: Instant) -> bool {
        self.slots
            .values()
            .any(|slot| slot.swipe.is_animating() || slot.collapse.is_animating(at))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Drains gesture messages and advances animations. Call once per frame.
    pub fn pump(&mut self, at: Instant) -> Vec<Event> {
        let mut events = Vec::new();

        for message in self.receiver.drain() {
            self.apply_gesture(message, at, &mut events);
        }

        for slot in self.slots.values_mut() {
            events.extend(slot.swipe.tick(at));
        }
        events
    }

    /// Taps the delete button of `source`'s card.
    ///
    /// Returns `None` when the group is already empty or being removed.
    pub fn tap_delete(&mut self, source: Source, at: Instant) -> Option<Event> {
        if self.controller(source)?.is_removing() {
            return None;
        }
        self.delete_source(source, DeleteTrigger::ActionTap, at)
    }

    /// Taps the body of `source`'s card, opening the detail view.
    /// Empty groups open nothing.
    pub fn tap_card(&mut self, source: Source) -> Option<(DetailView, Event)> {
        if !self.slots.contains_key(&source) {
            return None;
        }
        let view = DetailView::from_group(&self.group(source));
        if view.items.is_empty() {
            return None;
        }
        self.detail = Some(source);
        let event = Event::DetailOpened {
            source,
            count: view.items.len(),
            at: Utc::now(),
        };
        Some((view, event))
    }

    pub fn close_detail(&mut self) -> Option<Event> {
        self.detail.take().map(|source| Event::DetailClosed {
            source,
            at: Utc::now(),
        })
    }

    /// Reloads the list from the store. Sources that were deleted and have
    /// items again come back at rest.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read; the current list is kept.
    pub fn refresh(&mut self, at: Instant) -> Result<Vec<Event>> {
        self.notifications = self.store.current()?;
        let mut events = vec![Event::Refreshed {
            total: self.notifications.len(),
            at: Utc::now(),
        }];

        for (&source, slot) in &mut self.slots {
            let count = self.notifications.iter().filter(|n| n.source == source).count();
            if count > 0 && slot.swipe.revive() {
                debug!(%source, count, "source restored");
                events.push(Event::SourceRestored {
                    source,
                    count,
                    at: Utc::now(),
                });
            }
        }
        self.sync_layout(at);
        Ok(events)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply_gesture(&mut self, message: GestureMessage, at: Instant, events: &mut Vec<Event>) {
        let source = message.source();
        let Some(slot) = self.slots.get_mut(&source) else {
            return;
        };

        match message {
            GestureMessage::Offset { offset, .. } => {
                events.extend(slot.swipe.drag_to(offset));
            }
            GestureMessage::Release {
                decision, offset, ..
            } => match slot.swipe.release(decision, offset) {
                Release::Ignored => {}
                Release::Settle => events.extend(slot.swipe.start_settle(at)),
                Release::Commit => {
                    if let Some(event) = self.delete_source(source, DeleteTrigger::Swipe, at) {
                        events.push(event);
                    } else if let Some(slot) = self.slots.get_mut(&source) {
                        events.extend(slot.swipe.start_settle(at));
                    }
                }
            },
        }
    }

    /// Removes every notification of `source`, once.
    fn delete_source(&mut self, source: Source, trigger: DeleteTrigger, at: Instant) -> Option<Event> {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.source != source);
        let removed = before - self.notifications.len();
        if removed == 0 {
            debug!(%source, "delete ignored, group already empty");
            return None;
        }

        if let Err(e) = self.store.remove_source(source) {
            warn!(%source, error = %e, "store failed to remove source");
        }
        if let Some(slot) = self.slots.get_mut(&source) {
            slot.swipe.begin_removal(at);
        }
        self.sync_layout(at);

        info!(%source, removed, ?trigger, "source deleted");
        Some(Event::SourceDeleted {
            source,
            removed,
            trigger,
            at: Utc::now(),
        })
    }

    fn sync_layout(&mut self, at: Instant) {
        for (&source, slot) in &mut self.slots {
            let shown = self.notifications.iter().any(|n| n.source == source);
            slot.collapse.set_shown(shown, at);
        }
    }
}
