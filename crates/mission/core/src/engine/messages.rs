//! Player-facing mission text.

pub const PICKUP: &str = "Come on, get in!";
pub const COMPLETED: &str = "Ok we're here. Thanks for using Dashound Bus Center.";
pub const CANCELLED: &str =
    "MISSION CANCELED ALL YOU HAD TO DO WAS TAKE THEM TO THE DAMN DESTINATION!";
pub const FAILED: &str = "ALL YOU HAD TO DO WAS TAKE THEM TO THE DAMN DESTINATION!";
pub const FAILED_INSULT: &str = "YOU'RE USELESS AS A CORPSE'S DICK!";
