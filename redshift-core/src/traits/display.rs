//! Display surface trait

/// The layer the face is drawn on
///
/// Drawing itself happens in the runtime's redraw pass, which reads the
/// current settings. The core only asks for that pass to run.
pub trait DisplaySurface {
    /// Request a redraw on the next frame
    fn mark_dirty(&mut self);
}
