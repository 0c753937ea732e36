// Producer components - the page surfaces that feed the session log
//
// Each component owns its ephemeral view state (open flags, slide index,
// counter values) plus a SharedSession handle. Recording goes through the
// session helpers; no component writes to the display sink directly.

pub mod accordion;
pub mod carousel;
pub mod counters;
pub mod forms;
pub mod menu;
pub mod nav;
pub mod theme;
pub mod toast;
pub mod visibility;
