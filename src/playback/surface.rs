use serde::{Deserialize, Serialize};

/// The two playback surfaces the controller owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceId {
    /// Main educational video
    Primary,
    /// Break/support video
    Support,
}

/// State of one playback surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfaceState {
    pub playing: bool,
    pub fullscreen_requested: bool,
    pub pip_active: bool,
    pub visible: bool,
    /// Last playback position reported by the frontend
    pub position_secs: f64,
    /// Duration reported by the surface's metadata, once known
    pub duration_secs: Option<f64>,
}

/// Browser/media events pushed into the engine by the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MediaEvent {
    /// A surface's metadata loaded; carries its duration
    #[serde(rename_all = "camelCase")]
    LoadedMetadata {
        surface: SurfaceId,
        duration_secs: f64,
    },

    /// Periodic playback position report
    #[serde(rename_all = "camelCase")]
    TimeUpdate {
        surface: SurfaceId,
        position_secs: f64,
    },

    /// A surface finished playing naturally
    Ended { surface: SurfaceId },

    /// A surface entered Picture-in-Picture
    EnteredPictureInPicture { surface: SurfaceId },

    /// A surface left Picture-in-Picture
    LeftPictureInPicture { surface: SurfaceId },

    /// The fullscreen element changed; `None` means fullscreen was exited
    FullscreenChanged { surface: Option<SurfaceId> },

    /// Page visibility changed
    VisibilityChanged { hidden: bool },

    /// The window lost focus (tab switch)
    WindowBlurred,
}

/// Commands the engine issues back to whatever owns the real media elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PlaybackCommand {
    Play { surface: SurfaceId },
    Pause { surface: SurfaceId },
    #[serde(rename_all = "camelCase")]
    Seek {
        surface: SurfaceId,
        position_secs: f64,
    },
    RequestFullscreen { surface: SurfaceId },
    ShowSurface { surface: SurfaceId },
    HideSurface { surface: SurfaceId },
    /// Surface the "negative emotion detected" notice
    ShowNotification,
    HideNotification,
}
