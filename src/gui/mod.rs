use ordered_float::NotNan;
use three_d::{Context as ThreeDContext, Event as ThreeDEvent, GUI, Viewport, egui::Context as EguiContext};

use crate::control::CameraState;

mod fps;

macro_rules! declare_id {
    ($name:ident, $val:expr) => {
        ::pastey::paste! {
            const [<$name _SALT>]: ::core::num::NonZeroU64 =
                ::core::num::NonZeroU64::new(u64::from_be_bytes(*$val)).unwrap();
            const [<$name _ID>]: ::std::sync::LazyLock<::three_d::egui::Id> =
                ::std::sync::LazyLock::new(|| ::three_d::egui::Id::new([<$name _SALT>]));
        }
    };
}
use declare_id;

/// The on-screen overlay: frame rate and camera readout.
pub(crate) struct Hud {
    gui: GUI,
    frame_data: fps::FrameData,
    visible: bool,
}

impl Hud {
    pub(crate) fn new(context: &ThreeDContext, visible: bool) -> Self {
        Self {
            gui: GUI::new(context),
            frame_data: fps::FrameData::new(),
            visible,
        }
    }

    /// Records the frame duration and lays out the overlay.
    ///
    /// Events egui consumes are marked as handled in `events`.
    pub(crate) fn update(
        &mut self,
        events: &mut [ThreeDEvent],
        accumulated_time_ms: f64,
        viewport: Viewport,
        device_pixel_ratio: f32,
        elapsed_time_ms: f64,
        camera: CameraState,
    ) {
        if let Ok(frame_duration) = NotNan::new(elapsed_time_ms / 1000.0)
            && frame_duration.is_finite()
            && *frame_duration > 0.0
        {
            self.frame_data.insert_frame_data(frame_duration);
        }

        let visible = self.visible;
        let frame_data = &self.frame_data;
        self.gui.update(
            events,
            accumulated_time_ms,
            viewport,
            device_pixel_ratio,
            |ctx| handle_ui(ctx, visible, frame_data, camera),
        );
    }

    pub(crate) fn render(&mut self) -> Result<(), three_d::core::CoreError> {
        self.gui.render()
    }
}

fn handle_ui(ctx: &EguiContext, visible: bool, frame_data: &fps::FrameData, camera: CameraState) {
    if visible {
        fps::fps_area(ctx, frame_data, camera);
    }
}
