//! Main loop pass

use chessclock_hal::{Advertiser, Monotonic, NotifyChannel};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, PinState};
use embedded_io::{Read, ReadReady, Write};
use heapless::Vec;

use crate::camera::ImageRetrievalClient;
use crate::clock::{GameClock, Transition, TransitionKind};
use crate::config::ClockConfig;
use crate::connection::{ConnectionChange, ConnectionTracker};
use crate::display::DisplayThrottle;
use crate::input::{Button, Debouncer, BUTTON_COUNT};
use crate::log::{debug, info, warn};
use crate::publish::{PublishPacing, StatusPublisher};
use crate::traits::ClockDisplay;

/// At most one transition per button plus the countdown
pub const MAX_TRANSITIONS_PER_STEP: usize = BUTTON_COUNT + 1;

/// Hardware handed to the scheduler
pub struct Devices<B, L, N, V> {
    /// Active-low buttons in [`Button`] order
    pub buttons: [B; BUTTON_COUNT],
    /// Serial link to the camera peripheral
    pub camera: L,
    /// Notification channel to the companion app
    pub radio: N,
    pub display: V,
}

/// What one pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub transitions: Vec<TransitionKind, MAX_TRANSITIONS_PER_STEP>,
    pub redrawn: bool,
    pub connection: Option<ConnectionChange>,
}

/// Owns all clock state and drives it from the main loop
pub struct Scheduler<'buf, B, L, N, V> {
    config: ClockConfig,
    buttons: [B; BUTTON_COUNT],
    debouncer: Debouncer<BUTTON_COUNT>,
    clock: GameClock,
    camera: ImageRetrievalClient<L>,
    /// `None` when the buffer could not be allocated; images are skipped
    image_buffer: Option<&'buf mut [u8]>,
    publisher: StatusPublisher<N>,
    display: V,
    throttle: DisplayThrottle,
    connection: ConnectionTracker,
}

impl<'buf, B, L, N, V> Scheduler<'buf, B, L, N, V>
where
    B: InputPin,
    L: Read + Write + ReadReady,
    N: NotifyChannel + Advertiser,
    V: ClockDisplay,
{
    /// Create a scheduler with the clock idle at the configured time
    pub fn new(
        config: ClockConfig,
        devices: Devices<B, L, N, V>,
        image_buffer: Option<&'buf mut [u8]>,
        now_ms: u32,
    ) -> Self {
        if image_buffer.is_none() {
            warn!("no image buffer, board images disabled");
        }

        Self {
            buttons: devices.buttons,
            debouncer: Debouncer::new(config.debounce_ms),
            clock: GameClock::new(config.initial_time_ms, now_ms),
            camera: ImageRetrievalClient::new(
                devices.camera,
                config.retrieval_timeout_ms,
                config.retrieval_poll_us,
            ),
            image_buffer,
            publisher: StatusPublisher::new(devices.radio, PublishPacing::from(&config)),
            display: devices.display,
            throttle: DisplayThrottle::new(config.display_refresh_ms),
            connection: ConnectionTracker::new(),
            config,
        }
    }

    /// Reset the game, announce it and draw the first frame
    pub fn start(&mut self, now_ms: u32) {
        let transition = self.clock.reset(now_ms);
        self.publisher.publish(&transition.status);
        self.refresh_display(now_ms, true);
    }

    /// Game clock
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Notification channel
    pub fn radio(&self) -> &N {
        self.publisher.channel()
    }

    /// Notification channel, mutably
    pub fn radio_mut(&mut self) -> &mut N {
        self.publisher.channel_mut()
    }

    /// Camera link
    pub fn camera_link(&self) -> &L {
        self.camera.link()
    }

    pub fn display(&self) -> &V {
        &self.display
    }

    /// Run one pass of the main loop
    ///
    /// A pass blocks for at most one camera transfer per transition plus the
    /// image pacing and re-advertise delays.
    pub fn run_once<C, D>(&mut self, clock: &C, delay: &mut D) -> StepReport
    where
        C: Monotonic,
        D: DelayNs,
    {
        let mut report = StepReport::default();
        let mut pressed = false;

        // 1. Buttons
        for index in 0..BUTTON_COUNT {
            let level = self.read_button(index);
            let now = clock.now_ms();
            let Some(press) = self.debouncer.sample(index, level, now) else {
                continue;
            };
            pressed = true;

            let Some(button) = Button::from_index(press.index) else {
                continue;
            };
            if let Some(transition) = self.clock.press(button, now) {
                let _ = report.transitions.push(transition.kind);
                self.dispatch(transition, clock, delay);
            }
        }

        // 2. Countdown
        if let Some(transition) = self.clock.tick(clock.now_ms()) {
            let _ = report.transitions.push(transition.kind);
            self.dispatch(transition, clock, delay);
        }

        // 3. Display
        report.redrawn = self.refresh_display(clock.now_ms(), pressed);

        // 4. Connection
        report.connection = self.connection.reconcile(self.publisher.channel().is_connected());
        match report.connection {
            Some(ConnectionChange::Connected) => info!("client connected"),
            Some(ConnectionChange::Disconnected) => {
                info!("client disconnected, advertising again");
                delay.delay_ms(self.config.readvertise_delay_ms);
                if self.publisher.channel_mut().restart_advertising().is_err() {
                    warn!("failed to restart advertising");
                }
            }
            None => {}
        }

        report
    }

    fn read_button(&mut self, index: usize) -> PinState {
        let Some(pin) = self.buttons.get_mut(index) else {
            return PinState::High;
        };
        match pin.is_low() {
            Ok(true) => PinState::Low,
            Ok(false) => PinState::High,
            Err(_) => {
                warn!("button {} read failed", index);
                PinState::High
            }
        }
    }

    /// Publish a transition and, for moves, the board image
    fn dispatch<C, D>(&mut self, transition: Transition, clock: &C, delay: &mut D)
    where
        C: Monotonic,
        D: DelayNs,
    {
        self.publisher.publish(&transition.status);
        if !transition.requests_image() {
            return;
        }

        let Some(buffer) = self.image_buffer.as_deref_mut() else {
            debug!("skipping image, no buffer");
            return;
        };
        match self.camera.retrieve(buffer, clock, delay) {
            Ok(size) => {
                self.publisher.publish_image(&buffer[..size], delay);
            }
            Err(error) => warn!("no image for this move: {}", error),
        }
    }

    fn refresh_display(&mut self, now_ms: u32, force: bool) -> bool {
        let snapshot = self.clock.snapshot();
        if !self.throttle.check(&snapshot, now_ms, force) {
            return false;
        }
        if self.display.render(&snapshot, force).is_err() {
            warn!("display update failed");
        }
        true
    }
}
