// Tests for the playback controller: surface state, command choreography,
// and the wire shape of media events and commands.

use attention_monitor::playback::{
    ControllerSignal, MediaEvent, PlaybackCommand, PlaybackController, SurfaceId,
};

#[test]
fn test_trigger_swaps_primary_for_support() {
    let mut controller = PlaybackController::new();

    let commands = controller.on_trigger();
    assert_eq!(
        commands,
        vec![
            PlaybackCommand::Pause {
                surface: SurfaceId::Primary
            },
            PlaybackCommand::ShowSurface {
                surface: SurfaceId::Support
            },
            PlaybackCommand::RequestFullscreen {
                surface: SurfaceId::Support
            },
            PlaybackCommand::Play {
                surface: SurfaceId::Support
            },
        ]
    );

    assert!(!controller.primary().playing);
    assert!(controller.support().playing);
    assert!(controller.support().visible);
    assert!(controller.support().fullscreen_requested);
}

#[test]
fn test_support_end_schedules_resume() {
    let mut controller = PlaybackController::new();
    controller.on_trigger();

    let (commands, signals) = controller.on_media_event(&MediaEvent::Ended {
        surface: SurfaceId::Support,
    });

    assert_eq!(
        commands,
        vec![PlaybackCommand::HideSurface {
            surface: SurfaceId::Support
        }]
    );
    assert_eq!(signals, vec![ControllerSignal::ScheduleResume]);
    assert!(!controller.support().visible);
    assert!(!controller.support().playing);
}

#[test]
fn test_resume_primary_from_captured_position() {
    let mut controller = PlaybackController::new();
    controller.on_trigger();
    controller.on_media_event(&MediaEvent::Ended {
        surface: SurfaceId::Support,
    });

    let commands = controller.resume_primary(42.5);
    assert_eq!(
        commands,
        vec![
            PlaybackCommand::Seek {
                surface: SurfaceId::Primary,
                position_secs: 42.5
            },
            PlaybackCommand::RequestFullscreen {
                surface: SurfaceId::Primary
            },
            PlaybackCommand::Play {
                surface: SurfaceId::Primary
            },
        ]
    );
    assert!(controller.primary().playing);
    assert_eq!(controller.primary().position_secs, 42.5);
}

#[test]
fn test_fullscreen_exit_pauses_everything_and_stops_detection() {
    let mut controller = PlaybackController::new();
    controller.on_trigger();

    let (commands, signals) =
        controller.on_media_event(&MediaEvent::FullscreenChanged { surface: None });

    assert!(commands.contains(&PlaybackCommand::Pause {
        surface: SurfaceId::Primary
    }));
    assert!(commands.contains(&PlaybackCommand::Pause {
        surface: SurfaceId::Support
    }));
    assert_eq!(signals, vec![ControllerSignal::StopDetection]);
    assert!(!controller.primary().playing);
    assert!(!controller.support().playing);
}

#[test]
fn test_entering_pip_pauses_that_surface() {
    let mut controller = PlaybackController::new();
    controller.on_toggle(true);
    assert!(controller.primary().playing);

    let (commands, signals) = controller.on_media_event(&MediaEvent::EnteredPictureInPicture {
        surface: SurfaceId::Primary,
    });
    assert_eq!(
        commands,
        vec![PlaybackCommand::Pause {
            surface: SurfaceId::Primary
        }]
    );
    assert!(signals.is_empty());
    assert!(controller.primary().pip_active);
    assert!(!controller.primary().playing);

    controller.on_media_event(&MediaEvent::LeftPictureInPicture {
        surface: SurfaceId::Primary,
    });
    assert!(!controller.primary().pip_active);
}

#[test]
fn test_visibility_pauses_and_resumes_primary() {
    let mut controller = PlaybackController::new();

    let (commands, _) = controller.on_media_event(&MediaEvent::VisibilityChanged { hidden: true });
    assert_eq!(
        commands,
        vec![PlaybackCommand::Pause {
            surface: SurfaceId::Primary
        }]
    );

    let (commands, _) = controller.on_media_event(&MediaEvent::VisibilityChanged { hidden: false });
    assert_eq!(
        commands,
        vec![PlaybackCommand::Play {
            surface: SurfaceId::Primary
        }]
    );
    assert!(controller.primary().playing);
}

#[test]
fn test_window_blur_is_a_tab_switch() {
    let mut controller = PlaybackController::new();
    let (commands, signals) = controller.on_media_event(&MediaEvent::WindowBlurred);
    assert!(commands.is_empty());
    assert_eq!(signals, vec![ControllerSignal::TabSwitch]);
}

#[test]
fn test_primary_metadata_reports_duration_and_requests_fullscreen() {
    let mut controller = PlaybackController::new();

    let (commands, signals) = controller.on_media_event(&MediaEvent::LoadedMetadata {
        surface: SurfaceId::Primary,
        duration_secs: 221.0,
    });
    assert_eq!(signals, vec![ControllerSignal::VideoDurationKnown(221.0)]);
    assert_eq!(
        commands,
        vec![PlaybackCommand::RequestFullscreen {
            surface: SurfaceId::Primary
        }]
    );
    assert_eq!(controller.primary().duration_secs, Some(221.0));

    // Already fullscreen: metadata reload must not re-request it
    controller.on_media_event(&MediaEvent::FullscreenChanged {
        surface: Some(SurfaceId::Primary),
    });
    let (commands, _) = controller.on_media_event(&MediaEvent::LoadedMetadata {
        surface: SurfaceId::Primary,
        duration_secs: 221.0,
    });
    assert!(commands.is_empty());
}

#[test]
fn test_support_metadata_is_recorded_but_not_logged() {
    let mut controller = PlaybackController::new();

    let (commands, signals) = controller.on_media_event(&MediaEvent::LoadedMetadata {
        surface: SurfaceId::Support,
        duration_secs: 30.0,
    });
    assert!(commands.is_empty());
    assert!(signals.is_empty());
    assert_eq!(controller.support().duration_secs, Some(30.0));
}

#[test]
fn test_notification_commands_are_deduplicated() {
    let mut controller = PlaybackController::new();

    assert_eq!(
        controller.show_notification(),
        Some(PlaybackCommand::ShowNotification)
    );
    assert_eq!(controller.show_notification(), None);

    assert_eq!(
        controller.hide_notification(),
        Some(PlaybackCommand::HideNotification)
    );
    assert_eq!(controller.hide_notification(), None);
}

#[test]
fn test_media_event_wire_shape() {
    let event: MediaEvent = serde_json::from_str(
        r#"{"type": "loadedMetadata", "surface": "primary", "durationSecs": 120.5}"#,
    )
    .expect("parses");
    assert_eq!(
        event,
        MediaEvent::LoadedMetadata {
            surface: SurfaceId::Primary,
            duration_secs: 120.5
        }
    );

    let event: MediaEvent =
        serde_json::from_str(r#"{"type": "windowBlurred"}"#).expect("parses");
    assert_eq!(event, MediaEvent::WindowBlurred);

    let event: MediaEvent =
        serde_json::from_str(r#"{"type": "fullscreenChanged", "surface": null}"#).expect("parses");
    assert_eq!(event, MediaEvent::FullscreenChanged { surface: None });
}

#[test]
fn test_playback_command_wire_shape() {
    let value = serde_json::to_value(PlaybackCommand::RequestFullscreen {
        surface: SurfaceId::Support,
    })
    .expect("serializes");
    assert_eq!(value["command"], "requestFullscreen");
    assert_eq!(value["surface"], "support");

    let value = serde_json::to_value(PlaybackCommand::Seek {
        surface: SurfaceId::Primary,
        position_secs: 12.0,
    })
    .expect("serializes");
    assert_eq!(value["command"], "seek");
    assert_eq!(value["positionSecs"], 12.0);
}
