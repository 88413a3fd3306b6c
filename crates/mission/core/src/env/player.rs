use crate::state::EntityHandle;

/// Named input signals the mission reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Control {
    VehicleHorn,
}

/// The controlling agent: its character, input, wallet and social group.
pub trait PlayerState {
    fn player(&self) -> EntityHandle;
    fn is_control_pressed(&self, control: Control) -> bool;

    fn money(&self) -> i64;
    fn set_money(&mut self, amount: i64);

    /// Moves `ped` into the player's relationship group.
    fn join_player_group(&mut self, ped: EntityHandle);
    /// Makes the player's relationship group respect its own members.
    fn set_player_group_friendly(&mut self);
}
