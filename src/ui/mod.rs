pub mod control;
pub mod notice;
pub mod view;

pub use control::{BusyGuard, Control, LoadingOverlay, OverlayGuard};
pub use notice::{Notice, NoticeLevel};
pub use view::{TerminalView, View};
