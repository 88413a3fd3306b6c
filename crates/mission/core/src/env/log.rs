/// Diagnostic sink injected into the engine.
///
/// Implementations must never fail outward: a sink that cannot write
/// reports through its own channel and drops the message.
pub trait MissionLog {
    fn log(&self, message: &str);
}

impl<L: MissionLog + ?Sized> MissionLog for Box<L> {
    fn log(&self, message: &str) {
        (**self).log(message)
    }
}
