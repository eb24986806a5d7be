//! Authentication session state machine
//!
//! One `AuthSession` owns one authentication attempt lifecycle: it issues
//! exactly one outstanding evaluation at a time, classifies failures, and
//! applies the per-kind policy (retry on foreground, passcode fallback,
//! settings redirect, or terminal alert).
//!
//! The session runs as a spawned task; every command, lifecycle event, and
//! evaluation completion enters through one channel, so all state
//! transitions and callback invocations are serialized on a single logical
//! execution context. Evaluation completions carry a generation counter and
//! results from a dismissed attempt are dropped.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use biolock_core::{classify, AuthErrorKind, AuthRequest, EvalPolicy, FailurePolicy};

use crate::authenticator::{Authenticator, EvalPrompt};
use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::lifecycle::LifecycleEvent;
use crate::settings::{NoopSettingsOpener, SettingsOpener, SETTINGS_URI};

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No attempt in progress
    #[default]
    Idle,
    /// A biometric evaluation is outstanding
    Requesting,
    /// The attempt succeeded (transient, resets to `Idle`)
    Succeeded,
    /// A passcode evaluation is outstanding
    AwaitingFallback,
    /// Waiting for the app to return to the foreground before retrying
    AwaitingForeground,
    /// A prompt intent has been surfaced and the caller has not answered
    PresentingAlert,
}

/// Presentation intents emitted by the state machine.
///
/// The session never draws anything; the embedding presentation adapter
/// consumes these and answers prompts via [`SessionHandle::respond`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Show the failure message with a "try again" action
    ShowRetryPrompt { message: String },
    /// Show the failure message with "retry" and "open settings" actions
    ShowSettingsPrompt { message: String },
    /// Show a final failure message; no automatic action follows
    ShowTerminalError { message: String },
}

/// The caller's answer to a prompt intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    /// Re-enter biometric authentication now
    Retry,
    /// Send the user to system settings and retry on return
    OpenSettings,
}

/// Point-in-time view of the session, also usable as an ordering barrier:
/// the reply is sent only after all previously submitted commands have been
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub pending_return_to_foreground: bool,
    pub cancelled_by_system: bool,
}

type SuccessCallback = Box<dyn Fn() + Send>;
type ErrorCallback = Box<dyn Fn(AuthErrorKind) + Send>;

enum Command {
    Start(AuthRequest),
    Dismiss,
    Lifecycle(LifecycleEvent),
    Respond(PromptChoice),
    Completed {
        generation: u64,
        result: std::result::Result<(), i32>,
    },
    Snapshot(oneshot::Sender<SessionSnapshot>),
}

/// Builder for an authentication session.
///
/// Callbacks are registered up front; there is no way to swap them on a
/// live session.
pub struct SessionBuilder {
    authenticator: Arc<dyn Authenticator>,
    settings: Arc<dyn SettingsOpener>,
    config: SessionConfig,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
}

impl SessionBuilder {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            authenticator,
            settings: Arc::new(NoopSettingsOpener),
            config: SessionConfig::default(),
            on_success: None,
            on_error: None,
        }
    }

    /// Use a non-default configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Install the host's settings-redirect hook
    pub fn settings_opener(mut self, opener: Arc<dyn SettingsOpener>) -> Self {
        self.settings = opener;
        self
    }

    /// Observe authentication success
    pub fn on_success(mut self, callback: impl Fn() + Send + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Observe every authentication failure, including ones the session
    /// will heal automatically
    pub fn on_error(mut self, callback: impl Fn(AuthErrorKind) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Spawn the session task. Returns the command handle and the stream of
    /// presentation intents.
    pub fn spawn(self) -> (SessionHandle, mpsc::UnboundedReceiver<Intent>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();

        let session = AuthSession {
            state: SessionState::Idle,
            generation: 0,
            pending_return_to_foreground: false,
            cancelled_by_system: false,
            current_request: None,
            on_success: self.on_success,
            on_error: self.on_error,
            authenticator: self.authenticator,
            settings: self.settings,
            config: self.config,
            command_tx: command_tx.clone(),
            command_rx,
            intent_tx,
        };
        tokio::spawn(session.run());

        (SessionHandle { command_tx }, intent_rx)
    }
}

/// Cloneable handle to a running session task
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    /// Begin an authentication attempt. A no-op while an attempt is already
    /// in progress; results arrive via the registered callbacks.
    pub fn start(&self, request: AuthRequest) -> Result<()> {
        self.send(Command::Start(request))
    }

    /// Forcibly reset to idle, discarding callbacks and any in-flight
    /// evaluation result.
    pub fn dismiss(&self) -> Result<()> {
        self.send(Command::Dismiss)
    }

    /// Deliver one app lifecycle transition
    pub fn lifecycle(&self, event: LifecycleEvent) -> Result<()> {
        self.send(Command::Lifecycle(event))
    }

    /// Answer the most recent prompt intent
    pub fn respond(&self, choice: PromptChoice) -> Result<()> {
        self.send(Command::Respond(choice))
    }

    /// Snapshot the session state after all previously submitted commands
    /// have been applied
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Snapshot(reply_tx))?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }

    fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| SessionError::Closed)
    }
}

struct AuthSession {
    state: SessionState,
    /// Bumped for every issued evaluation and on dismissal; completions
    /// whose generation no longer matches are dropped.
    generation: u64,
    pending_return_to_foreground: bool,
    cancelled_by_system: bool,
    current_request: Option<AuthRequest>,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
    authenticator: Arc<dyn Authenticator>,
    settings: Arc<dyn SettingsOpener>,
    config: SessionConfig,
    command_tx: mpsc::UnboundedSender<Command>,
    command_rx: mpsc::UnboundedReceiver<Command>,
    intent_tx: mpsc::UnboundedSender<Intent>,
}

impl AuthSession {
    async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            self.handle(command);
        }
        debug!("command channel closed, session task stopping");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Start(request) => self.start(request),
            Command::Dismiss => self.dismiss(),
            Command::Lifecycle(event) => self.on_lifecycle(event),
            Command::Respond(choice) => self.on_response(choice),
            Command::Completed { generation, result } => self.on_completed(generation, result),
            Command::Snapshot(reply) => {
                let _ = reply.send(SessionSnapshot {
                    state: self.state,
                    pending_return_to_foreground: self.pending_return_to_foreground,
                    cancelled_by_system: self.cancelled_by_system,
                });
            }
        }
    }

    fn start(&mut self, request: AuthRequest) {
        if self.state != SessionState::Idle {
            // UI entry points may double-fire; one outstanding attempt max.
            debug!(state = ?self.state, "start ignored, attempt already in progress");
            return;
        }
        self.current_request = Some(request);
        self.begin_biometric();
    }

    /// Issue a biometric evaluation for the current request
    fn begin_biometric(&mut self) {
        let Some(request) = self.current_request.clone() else {
            warn!("no request to authenticate, staying idle");
            self.state = SessionState::Idle;
            return;
        };

        let class = self.authenticator.biometry_class();
        let reason = match request.reason.as_deref() {
            Some(reason) if !reason.is_empty() => reason.to_string(),
            _ => self.config.messages.default_auth_reason(class).to_string(),
        };
        let fallback_title = request
            .fallback_title
            .unwrap_or_else(|| self.config.messages.user_fallback.clone());

        let prompt = EvalPrompt {
            reason,
            cancel_title: request.cancel_title,
            fallback_title: Some(fallback_title),
            reuse_duration: request.reuse_duration,
        };
        self.state = SessionState::Requesting;
        self.evaluate(EvalPolicy::Biometry, prompt);
    }

    /// Issue a passcode evaluation carrying the failed outcome's message
    fn begin_passcode(&mut self, reason: String) {
        let class = self.authenticator.biometry_class();
        let reason = if reason.is_empty() {
            self.config
                .messages
                .default_passcode_reason(class)
                .to_string()
        } else {
            reason
        };

        let prompt = EvalPrompt {
            reason,
            cancel_title: self
                .current_request
                .as_ref()
                .and_then(|r| r.cancel_title.clone()),
            fallback_title: None,
            reuse_duration: None,
        };
        self.state = SessionState::AwaitingFallback;
        self.evaluate(EvalPolicy::DeviceOwner, prompt);
    }

    fn evaluate(&mut self, policy: EvalPolicy, prompt: EvalPrompt) {
        self.generation += 1;
        let generation = self.generation;
        let authenticator = Arc::clone(&self.authenticator);
        let command_tx = self.command_tx.clone();

        debug!(?policy, generation, "issuing evaluation");
        tokio::spawn(async move {
            let result = authenticator.evaluate(policy, &prompt).await;
            let _ = command_tx.send(Command::Completed { generation, result });
        });
    }

    fn on_completed(&mut self, generation: u64, result: std::result::Result<(), i32>) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "dropping stale evaluation result"
            );
            return;
        }
        match result {
            Ok(()) => self.succeed(),
            Err(raw_code) => self.fail(classify(raw_code)),
        }
    }

    fn succeed(&mut self) {
        self.state = SessionState::Succeeded;
        info!("authentication succeeded");
        if let Some(callback) = &self.on_success {
            callback();
        }
        self.reset();
    }

    fn fail(&mut self, kind: AuthErrorKind) {
        let in_fallback = self.state == SessionState::AwaitingFallback;
        info!(?kind, in_fallback, "authentication failed");

        // Callers observe every failure before any remediation runs.
        if let Some(callback) = &self.on_error {
            callback(kind);
        }

        let class = self.authenticator.biometry_class();
        let message = self.config.messages.message(kind, class).to_string();

        match kind.policy() {
            FailurePolicy::RetryOnForeground => {
                // The OS cancelled out-of-band; retry once we're visible again.
                self.cancelled_by_system = true;
                self.state = SessionState::AwaitingForeground;
            }
            FailurePolicy::PasscodeFallback => {
                if in_fallback {
                    // A passcode failure never re-offers passcode entry.
                    self.emit(Intent::ShowTerminalError { message });
                    self.reset();
                } else {
                    self.begin_passcode(message);
                }
            }
            FailurePolicy::SettingsPrompt if self.config.allow_settings_redirect => {
                self.state = SessionState::PresentingAlert;
                self.emit(Intent::ShowSettingsPrompt { message });
            }
            FailurePolicy::TerminalSilent => {
                // Deliberate cancellation is not contested with a dialog.
                self.reset();
            }
            FailurePolicy::SettingsPrompt | FailurePolicy::TerminalWithAlert => {
                self.state = SessionState::PresentingAlert;
                self.emit(Intent::ShowRetryPrompt { message });
            }
        }
    }

    fn on_response(&mut self, choice: PromptChoice) {
        if self.state != SessionState::PresentingAlert {
            debug!(state = ?self.state, ?choice, "prompt response ignored");
            return;
        }
        match choice {
            PromptChoice::Retry => self.begin_biometric(),
            PromptChoice::OpenSettings => {
                if self.settings.open(SETTINGS_URI) {
                    self.pending_return_to_foreground = true;
                    self.state = SessionState::AwaitingForeground;
                } else {
                    warn!(uri = SETTINGS_URI, "settings redirect refused");
                }
            }
        }
    }

    fn on_lifecycle(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::WillEnterForeground | LifecycleEvent::DidBecomeActive => {
                if self.pending_return_to_foreground {
                    self.pending_return_to_foreground = false;
                    debug!("returned from settings, restarting authentication");
                    self.begin_biometric();
                } else if self.cancelled_by_system {
                    self.cancelled_by_system = false;
                    debug!("foregrounded after system cancel, restarting authentication");
                    self.begin_biometric();
                }
            }
            LifecycleEvent::DidEnterBackground => {
                debug!("app moved to background");
            }
        }
    }

    fn dismiss(&mut self) {
        // Invalidate any in-flight evaluation; its result will be stale.
        self.generation += 1;
        self.on_success = None;
        self.on_error = None;
        self.reset();
        info!("session dismissed");
    }

    /// Return to idle; callbacks survive so the session can be restarted
    fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.pending_return_to_foreground = false;
        self.cancelled_by_system = false;
        self.current_request = None;
    }

    fn emit(&self, intent: Intent) {
        if self.intent_tx.send(intent).is_err() {
            debug!("no presentation adapter listening, intent dropped");
        }
    }
}
