/// Player input consumed by [`GameSession::apply`](crate::GameSession::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    Hold,
    PauseToggle,
    Reset,
    Start,
}
