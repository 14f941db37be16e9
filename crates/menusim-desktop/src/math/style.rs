//! Frame style constants

/// Window chrome measurements shared by hit testing and the draw list
pub struct FrameStyle {
    pub title_bar_height: f32,
    pub border_width: f32,
    pub button_size: f32,
    /// Distance from the right window edge to the close button's left edge
    pub close_button_inset: f32,
    /// Distance from the top window edge to the title bar buttons
    pub button_top: f32,
    pub button_spacing: f32,
}

/// Default frame style matching the themed window art
pub const FRAME_STYLE: FrameStyle = FrameStyle {
    title_bar_height: 40.0,
    border_width: 2.0,
    button_size: 20.0,
    close_button_inset: 25.0,
    button_top: 10.0,
    button_spacing: 5.0,
};
