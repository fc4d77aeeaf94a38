#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyEvent {
    /// Open the finder panel.
    Find,
    /// Open the create-snippet panel.
    Create,
}
