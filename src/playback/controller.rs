use tracing::{debug, info};

use super::surface::{MediaEvent, PlaybackCommand, SurfaceId, SurfaceState};

/// Delay between the support video ending and the primary resume, to let the
/// browser settle after the fullscreen change.
pub const RESUME_SETTLE_DELAY_MS: u64 = 300;

/// Outcomes an event produced beyond playback commands; the session actor
/// owns detection and the event log, so those effects are signalled upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerSignal {
    /// Detection polling must stop (fullscreen exited)
    StopDetection,
    /// The break finished; resume the primary surface after the settle delay
    ScheduleResume,
    /// The viewer switched tabs
    TabSwitch,
    /// The primary video's duration became known
    VideoDurationKnown(f64),
}

/// Owns the primary and support surface state and the command choreography
/// between them. All mutation happens on the session actor.
#[derive(Debug)]
pub struct PlaybackController {
    primary: SurfaceState,
    support: SurfaceState,
    fullscreen_surface: Option<SurfaceId>,
    notification_visible: bool,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    pub fn new() -> Self {
        Self {
            primary: SurfaceState {
                visible: true,
                ..SurfaceState::default()
            },
            support: SurfaceState::default(),
            fullscreen_surface: None,
            notification_visible: false,
        }
    }

    pub fn primary(&self) -> &SurfaceState {
        &self.primary
    }

    pub fn support(&self) -> &SurfaceState {
        &self.support
    }

    pub fn fullscreen_surface(&self) -> Option<SurfaceId> {
        self.fullscreen_surface
    }

    pub fn notification_visible(&self) -> bool {
        self.notification_visible
    }

    fn surface_mut(&mut self, id: SurfaceId) -> &mut SurfaceState {
        match id {
            SurfaceId::Primary => &mut self.primary,
            SurfaceId::Support => &mut self.support,
        }
    }

    /// Apply a media event from the frontend.
    pub fn on_media_event(
        &mut self,
        event: &MediaEvent,
    ) -> (Vec<PlaybackCommand>, Vec<ControllerSignal>) {
        let mut commands = Vec::new();
        let mut signals = Vec::new();

        match *event {
            MediaEvent::LoadedMetadata {
                surface,
                duration_secs,
            } => {
                self.surface_mut(surface).duration_secs = Some(duration_secs);
                if surface == SurfaceId::Primary {
                    signals.push(ControllerSignal::VideoDurationKnown(duration_secs));
                    if self.fullscreen_surface.is_none() {
                        self.primary.fullscreen_requested = true;
                        commands.push(PlaybackCommand::RequestFullscreen {
                            surface: SurfaceId::Primary,
                        });
                    }
                }
            }

            MediaEvent::TimeUpdate {
                surface,
                position_secs,
            } => {
                self.surface_mut(surface).position_secs = position_secs;
            }

            MediaEvent::Ended { surface } => {
                self.surface_mut(surface).playing = false;
                if surface == SurfaceId::Support {
                    info!("Support video ended, returning to main video");
                    self.support.visible = false;
                    commands.push(PlaybackCommand::HideSurface {
                        surface: SurfaceId::Support,
                    });
                    signals.push(ControllerSignal::ScheduleResume);
                }
            }

            MediaEvent::EnteredPictureInPicture { surface } => {
                // PiP would let the video escape monitoring; pause immediately.
                let state = self.surface_mut(surface);
                state.pip_active = true;
                state.playing = false;
                commands.push(PlaybackCommand::Pause { surface });
            }

            MediaEvent::LeftPictureInPicture { surface } => {
                self.surface_mut(surface).pip_active = false;
            }

            MediaEvent::FullscreenChanged { surface } => {
                self.fullscreen_surface = surface;
                match surface {
                    Some(id) => {
                        self.surface_mut(id).fullscreen_requested = false;
                    }
                    None => {
                        debug!("Exited fullscreen, pausing both surfaces");
                        self.primary.playing = false;
                        self.support.playing = false;
                        commands.push(PlaybackCommand::Pause {
                            surface: SurfaceId::Primary,
                        });
                        commands.push(PlaybackCommand::Pause {
                            surface: SurfaceId::Support,
                        });
                        signals.push(ControllerSignal::StopDetection);
                    }
                }
            }

            MediaEvent::VisibilityChanged { hidden } => {
                self.primary.playing = !hidden;
                commands.push(if hidden {
                    PlaybackCommand::Pause {
                        surface: SurfaceId::Primary,
                    }
                } else {
                    PlaybackCommand::Play {
                        surface: SurfaceId::Primary,
                    }
                });
            }

            MediaEvent::WindowBlurred => {
                signals.push(ControllerSignal::TabSwitch);
            }
        }

        (commands, signals)
    }

    /// The break trigger: pause primary where it is, surface the support
    /// video fullscreen and play it.
    pub fn on_trigger(&mut self) -> Vec<PlaybackCommand> {
        self.primary.playing = false;
        self.support.visible = true;
        self.support.playing = true;
        self.support.fullscreen_requested = true;

        vec![
            PlaybackCommand::Pause {
                surface: SurfaceId::Primary,
            },
            PlaybackCommand::ShowSurface {
                surface: SurfaceId::Support,
            },
            PlaybackCommand::RequestFullscreen {
                surface: SurfaceId::Support,
            },
            PlaybackCommand::Play {
                surface: SurfaceId::Support,
            },
        ]
    }

    /// Resume the primary surface from the captured position (after the
    /// settle delay has elapsed).
    pub fn resume_primary(&mut self, position_secs: f64) -> Vec<PlaybackCommand> {
        self.primary.playing = true;
        self.primary.position_secs = position_secs;

        let mut commands = vec![PlaybackCommand::Seek {
            surface: SurfaceId::Primary,
            position_secs,
        }];
        if self.fullscreen_surface.is_none() {
            self.primary.fullscreen_requested = true;
            commands.push(PlaybackCommand::RequestFullscreen {
                surface: SurfaceId::Primary,
            });
        }
        commands.push(PlaybackCommand::Play {
            surface: SurfaceId::Primary,
        });
        commands
    }

    /// The user play/pause control. Turning monitoring on starts the primary
    /// surface; turning it off only stops detection, playback is untouched.
    pub fn on_toggle(&mut self, running: bool) -> Vec<PlaybackCommand> {
        if !running {
            return Vec::new();
        }

        self.primary.playing = true;
        let mut commands = vec![PlaybackCommand::Play {
            surface: SurfaceId::Primary,
        }];
        if self.fullscreen_surface.is_none() {
            self.primary.fullscreen_requested = true;
            commands.push(PlaybackCommand::RequestFullscreen {
                surface: SurfaceId::Primary,
            });
        }
        commands
    }

    /// Show the negative-emotion notice; deduplicated across ticks.
    pub fn show_notification(&mut self) -> Option<PlaybackCommand> {
        if self.notification_visible {
            return None;
        }
        self.notification_visible = true;
        Some(PlaybackCommand::ShowNotification)
    }

    /// Hide the negative-emotion notice; deduplicated across ticks.
    pub fn hide_notification(&mut self) -> Option<PlaybackCommand> {
        if !self.notification_visible {
            return None;
        }
        self.notification_visible = false;
        Some(PlaybackCommand::HideNotification)
    }
}
