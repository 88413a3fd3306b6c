use std::time::Duration;

use crate::error::SpawnError;
use crate::state::{EntityHandle, MarkerHandle, Position};

/// Map icon styles used by the mission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
pub enum BlipSprite {
    #[default]
    Standard,
    Friend,
    Cab,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MarkerColor {
    #[default]
    Yellow,
    Blue,
    Green,
}

/// Map blips attached to entities, and standalone markers.
///
/// Operations on entities without a blip, or on deleted markers, are no-ops.
pub trait BlipDisplay {
    fn add_blip(&mut self, entity: EntityHandle);
    fn set_blip_sprite(&mut self, entity: EntityHandle, sprite: BlipSprite);
    fn remove_blip_label(&mut self, entity: EntityHandle);
    fn set_blip_route(&mut self, entity: EntityHandle, visible: bool);
    fn delete_blip(&mut self, entity: EntityHandle);

    fn create_marker(
        &mut self,
        position: Position,
        color: MarkerColor,
    ) -> Result<MarkerHandle, SpawnError>;
    fn set_marker_route(&mut self, marker: MarkerHandle, visible: bool);
    fn remove_marker_label(&mut self, marker: MarkerHandle);
    fn delete_marker(&mut self, marker: MarkerHandle);
}

/// Transient on-screen text.
pub trait Screen {
    /// Shows a subtitle; `None` leaves the duration to the host default.
    fn show_subtitle(&mut self, text: &str, duration: Option<Duration>);

    /// Shows a notification feed entry, independent of subtitles.
    fn notify(&mut self, text: &str);
}
