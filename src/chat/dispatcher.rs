//! Conversation state: append-only history, the single in-flight reply, and
//! the one-time greeting.
//!
//! The dispatcher never touches the DOM or reads the clock. The glue calls
//! [`Dispatcher::submit`] on user input and [`Dispatcher::poll`] whenever a
//! timer fires, then renders whatever `poll` appended.

use super::responses::{WELCOME_MESSAGE, classify};
use super::schedule::{Schedule, TaskId};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// Suffix used for the bubble's `{sender}-message` class.
    pub fn css_class(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "ai",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

/// Result of a submission attempt. Only `Accepted` changes any state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// User message appended; the reply is due at `reply_due_ms`.
    Accepted { reply_due_ms: f64 },
    /// Blank after trimming.
    Empty,
    /// A reply is still pending.
    Busy,
}

#[derive(Debug)]
enum Pending {
    Reply(&'static str),
    Welcome,
}

#[derive(Debug)]
pub struct Dispatcher {
    history: Vec<Message>,
    is_typing: bool,
    schedule: Schedule<Pending>,
    pending_reply: Option<TaskId>,
    welcome_scheduled: bool,
    reply_delay_min_ms: f64,
    reply_delay_max_ms: f64,
    welcome_delay_ms: f64,
}

impl Dispatcher {
    pub fn new(reply_delay_min_ms: f64, reply_delay_max_ms: f64, welcome_delay_ms: f64) -> Self {
        Self {
            history: Vec::new(),
            is_typing: false,
            schedule: Schedule::new(),
            pending_reply: None,
            welcome_scheduled: false,
            reply_delay_min_ms,
            reply_delay_max_ms,
            welcome_delay_ms,
        }
    }

    pub fn from_config(cfg: &crate::config::WidgetConfig) -> Self {
        Self::new(cfg.reply_delay_min_ms, cfg.reply_delay_max_ms, cfg.welcome_delay_ms)
    }

    /// Queue the greeting once per session. Returns its due time, or `None`
    /// if it was already queued.
    pub fn start(&mut self, now_ms: f64) -> Option<f64> {
        if self.welcome_scheduled {
            return None;
        }
        self.welcome_scheduled = true;
        let due = now_ms + self.welcome_delay_ms;
        self.schedule.schedule(due, Pending::Welcome);
        Some(due)
    }

    pub fn submit<R: Rng>(&mut self, text: &str, now_ms: f64, rng: &mut R) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Empty;
        }
        if self.is_typing {
            return SubmitOutcome::Busy;
        }

        self.history.push(Message { text: text.to_string(), sender: Sender::User });
        self.is_typing = true;

        let span = self.reply_delay_max_ms - self.reply_delay_min_ms;
        let delay = self.reply_delay_min_ms + rng.r#gen::<f64>() * span;
        let due = now_ms + delay;
        self.pending_reply = Some(self.schedule.schedule(due, Pending::Reply(classify(text))));
        log::debug!("reply scheduled in {:.0}ms", delay);
        SubmitOutcome::Accepted { reply_due_ms: due }
    }

    /// Deliver everything due at `now_ms`. Returns the number of messages
    /// appended to the history.
    pub fn poll(&mut self, now_ms: f64) -> usize {
        let due = self.schedule.drain_due(now_ms);
        let delivered = due.len();
        for task in due {
            match task {
                Pending::Reply(text) => {
                    self.is_typing = false;
                    self.pending_reply = None;
                    self.history.push(Message { text: text.to_string(), sender: Sender::Assistant });
                    log::debug!("reply delivered ({} messages)", self.history.len());
                }
                Pending::Welcome => {
                    self.history.push(Message { text: WELCOME_MESSAGE.to_string(), sender: Sender::Assistant });
                }
            }
        }
        delivered
    }

    /// Drop the in-flight reply, if any, and clear the typing state.
    pub fn abandon_pending(&mut self) -> bool {
        self.is_typing = false;
        match self.pending_reply.take() {
            Some(id) => self.schedule.cancel(id).is_some(),
            None => false,
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn next_due(&self) -> Option<f64> {
        self.schedule.next_due()
    }
}
